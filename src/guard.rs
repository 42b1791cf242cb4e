//! Anti-poisoning growth guard.
//!
//! A set may grow only while it satisfies both
//! `new <= baseline * MAX_SET_GROWTH_FACTOR + GROWTH_SLACK` and
//! `new - baseline <= MAX_SET_GROWTH_ABS_DELTA`. The ratio bound alone is too
//! strict for tiny baselines and too permissive for large ones.

use crate::error::GrowthGuardError;

pub const MAX_SET_GROWTH_FACTOR: usize = 4;

/// Added to the ratio bound. Calibrated value; do not re-derive.
pub const GROWTH_SLACK: usize = 64;

pub const MAX_SET_GROWTH_ABS_DELTA: usize = 2048;

/// Check a set's new size against its previous size.
///
/// No baseline (or a zero baseline) and non-growth always pass. With
/// `allow_large_delta` any growth passes.
pub fn enforce_growth_guard(
    set_id: &str,
    baseline: Option<usize>,
    new_count: usize,
    allow_large_delta: bool,
) -> Result<(), GrowthGuardError> {
    let baseline = match baseline {
        Some(b) if b > 0 => b,
        _ => return Ok(()),
    };
    if new_count <= baseline {
        return Ok(());
    }

    let ratio_ok = new_count
        <= baseline
            .saturating_mul(MAX_SET_GROWTH_FACTOR)
            .saturating_add(GROWTH_SLACK);
    let delta_ok = new_count - baseline <= MAX_SET_GROWTH_ABS_DELTA;
    if (ratio_ok && delta_ok) || allow_large_delta {
        return Ok(());
    }

    Err(GrowthGuardError {
        set_id: set_id.to_string(),
        baseline,
        new: new_count,
    })
}
