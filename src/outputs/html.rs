//! HTML dashboard rendering.
//!
//! The page is a single self-contained document: a short summary of what
//! each source contributed, any source failures, and a table of articles in
//! digest order. Every piece of scraped text is escaped before it is written.

use crate::models::{Digest, SourceKind};
use chrono::{DateTime, Local};
use html_escape::{encode_double_quoted_attribute, encode_text};
use std::fmt::{self, Write};

const PAGE_TITLE: &str = "Chemical Tanker Newbuild Tracker";

const STYLE: &str = "body{font-family:sans-serif;margin:2rem;color:#222}\
table{border-collapse:collapse;width:100%}\
th,td{text-align:left;padding:.4rem .6rem;border-bottom:1px solid #ddd}\
.failures{color:#a40000}\
.muted{color:#777}";

/// Render the full dashboard page.
pub fn render_dashboard(digest: &Digest, generated_at: DateTime<Local>) -> String {
    let mut page = String::new();
    // writing into a String cannot fail
    let _ = write_dashboard(&mut page, digest, generated_at);
    page
}

fn write_dashboard(out: &mut String, digest: &Digest, generated_at: DateTime<Local>) -> fmt::Result {
    writeln!(out, "<!DOCTYPE html>")?;
    writeln!(out, "<html lang=\"en\">")?;
    writeln!(out, "<head>")?;
    writeln!(out, "<meta charset=\"utf-8\">")?;
    writeln!(out, "<title>{PAGE_TITLE}</title>")?;
    writeln!(out, "<style>{STYLE}</style>")?;
    writeln!(out, "</head>")?;
    writeln!(out, "<body>")?;
    writeln!(out, "<h1>{PAGE_TITLE}</h1>")?;
    writeln!(
        out,
        "<p class=\"muted\">Generated {}</p>",
        generated_at.format("%Y-%m-%d %H:%M:%S %Z")
    )?;

    write_summary(out, digest)?;
    write_failures(out, digest)?;
    write_articles(out, digest)?;

    writeln!(out, "</body>")?;
    writeln!(out, "</html>")
}

fn write_summary(out: &mut String, digest: &Digest) -> fmt::Result {
    writeln!(out, "<ul class=\"summary\">")?;
    for kind in [SourceKind::Feed, SourceKind::Search, SourceKind::Listing] {
        writeln!(
            out,
            "<li>{} article(s) from {}</li>",
            digest.count_for(kind),
            kind.label()
        )?;
    }
    writeln!(out, "</ul>")
}

fn write_failures(out: &mut String, digest: &Digest) -> fmt::Result {
    if !digest.is_partial() {
        return Ok(());
    }
    writeln!(out, "<div class=\"failures\">")?;
    writeln!(out, "<h2>Sources that could not be read</h2>")?;
    writeln!(out, "<ul>")?;
    for source in digest.failures() {
        writeln!(
            out,
            "<li><strong>{}</strong>: {}</li>",
            encode_text(&source.name),
            encode_text(source.error.as_deref().unwrap_or_default())
        )?;
    }
    writeln!(out, "</ul>")?;
    writeln!(out, "</div>")
}

fn write_articles(out: &mut String, digest: &Digest) -> fmt::Result {
    if digest.articles.is_empty() {
        return writeln!(out, "<p>No matching articles found.</p>");
    }
    writeln!(out, "<table>")?;
    writeln!(out, "<thead><tr><th>Title</th><th>Published</th></tr></thead>")?;
    writeln!(out, "<tbody>")?;
    for article in &digest.articles {
        writeln!(
            out,
            "<tr><td><a href=\"{}\" target=\"_blank\" rel=\"noopener\">{}</a></td><td>{}</td></tr>",
            encode_double_quoted_attribute(&article.link),
            encode_text(&article.title),
            encode_text(&article.published)
        )?;
    }
    writeln!(out, "</tbody>")?;
    writeln!(out, "</table>")
}
