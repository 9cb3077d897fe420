use anyhow::{Context, Result};
use flacedit_core::TagSet;
use std::io::Write;

/// Print a tag listing, or a notice when there is nothing to show.
pub fn print_metadata<W: Write>(out: &mut W, tags: Option<&TagSet>) -> Result<()> {
    match tags {
        Some(tags) if !tags.is_empty() => {
            writeln!(out, "\nFLAC Metadata:").context("Failed to write output")?;
            for (field, values) in tags {
                writeln!(out, "  {}: {}", field, values.join(", "))
                    .context("Failed to write output")?;
            }
        }
        _ => writeln!(out, "\nNo metadata found.").context("Failed to write output")?,
    }
    Ok(())
}
