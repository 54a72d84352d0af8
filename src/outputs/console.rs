//! Plain-text run report for the `report` command.

use crate::models::{Digest, SourceKind};
use std::fmt::{self, Write};

const SEPARATOR_WIDTH: usize = 60;

/// Render the per-kind summary, any failures, then one block per article.
pub fn render_report(digest: &Digest) -> String {
    let mut report = String::new();
    let _ = write_report(&mut report, digest);
    report
}

fn write_report(out: &mut String, digest: &Digest) -> fmt::Result {
    for kind in [SourceKind::Feed, SourceKind::Search, SourceKind::Listing] {
        writeln!(
            out,
            "✅ Found {} article(s) from {}.",
            digest.count_for(kind),
            kind.label()
        )?;
    }
    for source in digest.failures() {
        writeln!(
            out,
            "⚠️  {} failed: {}",
            source.name,
            source.error.as_deref().unwrap_or_default()
        )?;
    }
    writeln!(out)?;

    for article in &digest.articles {
        writeln!(out, "🚢 {}", article.title)?;
        writeln!(out, "🔗 {}", article.link)?;
        writeln!(out, "📅 {}", article.published)?;
        writeln!(out, "{}", "-".repeat(SEPARATOR_WIDTH))?;
    }
    Ok(())
}
