//! Sources command implementation.

use anyhow::Result;

use crate::sources::{SourceSpec, SOURCES};

/// Format one registry row
fn format_source(source: &SourceSpec) -> String {
    let parser = match source.parser.payload_key() {
        Some(key) => format!("{} ({})", source.parser.name(), key),
        None => source.parser.name().to_string(),
    };
    format!(
        " {:<22} {:<8} {:<24} {}\n {:<22} {}",
        source.set_id, source.provider, parser, source.label, "", source.source_url
    )
}

/// Run the sources command
pub fn run() -> Result<()> {
    println!();
    println!(" SET ID                 PROVIDER PARSER                   LABEL");
    println!(" ────────────────────── ──────── ──────────────────────── ────────────────────");
    for source in SOURCES {
        println!("{}", format_source(source));
    }
    println!();
    Ok(())
}
