//! Content-addressed per-set version labels.

use sha2::{Digest, Sha256};

/// Hex characters of the digest kept in the label
const DIGEST_PREFIX_LEN: usize = 16;

/// Derive `{date}-{16 hex}` from a set's canonical CIDRs and source timestamp.
///
/// The digest covers the newline-joined CIDRs, a trailing newline, then the
/// timestamp (if any). Same inputs on the same date give the same label.
///
/// # Examples
/// ```
/// use rangewarden::version::version_for_set;
/// let cidrs = vec!["192.0.2.0/24".to_string()];
/// let v = version_for_set("2025-01-01", &cidrs, None);
/// assert!(v.starts_with("2025-01-01-"));
/// assert_eq!(v.len(), "2025-01-01-".len() + 16);
/// ```
pub fn version_for_set(date: &str, cidrs: &[String], source_timestamp: Option<&str>) -> String {
    let mut hasher = Sha256::new();
    hasher.update(cidrs.join("\n").as_bytes());
    hasher.update(b"\n");
    if let Some(ts) = source_timestamp {
        hasher.update(ts.as_bytes());
    }
    let digest = hex::encode(hasher.finalize());
    format!("{}-{}", date, &digest[..DIGEST_PREFIX_LEN])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cidrs(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_known_digest() {
        // sha256("192.0.2.0/24\n")
        let expected = Sha256::digest(b"192.0.2.0/24\n");
        let expected = &hex::encode(expected)[..16];
        let v = version_for_set("2025-01-01", &cidrs(&["192.0.2.0/24"]), None);
        assert_eq!(v, format!("2025-01-01-{}", expected));
    }

    #[test]
    fn test_byte_layout_includes_timestamp_after_newline() {
        let expected = hex::encode(Sha256::digest(
            b"192.0.2.0/24\n2001:db8::/32\n2025-03-01T00:00:00Z",
        ));
        let v = version_for_set(
            "2025-03-02",
            &cidrs(&["192.0.2.0/24", "2001:db8::/32"]),
            Some("2025-03-01T00:00:00Z"),
        );
        assert_eq!(v, format!("2025-03-02-{}", &expected[..16]));
    }

    #[test]
    fn test_deterministic() {
        let list = cidrs(&["192.0.2.0/24", "198.51.100.0/24"]);
        assert_eq!(
            version_for_set("2025-01-01", &list, Some("2025-01-01T00:00:00Z")),
            version_for_set("2025-01-01", &list, Some("2025-01-01T00:00:00Z"))
        );
    }

    #[test]
    fn test_changes_with_content() {
        let a = version_for_set("2025-01-01", &cidrs(&["192.0.2.0/24"]), None);
        let b = version_for_set("2025-01-01", &cidrs(&["192.0.2.0/25"]), None);
        assert_ne!(a, b);
    }

    #[test]
    fn test_changes_with_timestamp() {
        let list = cidrs(&["192.0.2.0/24"]);
        let a = version_for_set("2025-01-01", &list, None);
        let b = version_for_set("2025-01-01", &list, Some("2025-01-01T00:00:00Z"));
        assert_ne!(a, b);
    }

    #[test]
    fn test_date_is_prefix_only() {
        let list = cidrs(&["192.0.2.0/24"]);
        let a = version_for_set("2025-01-01", &list, None);
        let b = version_for_set("2025-01-02", &list, None);
        assert_eq!(a[11..], b[11..]);
        assert_ne!(a, b);
    }
}
