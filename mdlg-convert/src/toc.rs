//! Table of contents
//!
//! A flat listing of the document's headings in document order, filtered by the configured
//! cutoff. The title (level 1) is never listed. When nothing survives the filter there is no
//! table at all, not an empty container.

use crate::anchors::AnchorTable;
use crate::inline::minor_text;
use crate::options::TocLevels;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocEntry {
    pub level: u8,
    pub slug: String,
    /// Heading text as HTML, inline code marked up
    pub rendered_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toc {
    entries: Vec<TocEntry>,
}

impl Toc {
    pub fn entries(&self) -> &[TocEntry] {
        &self.entries
    }

    pub fn to_html(&self) -> String {
        let mut html = String::from(
            "<div id=toc class=no-print>\n<div class=label>Contents</div>\n<ul class=custom>\n",
        );
        for entry in &self.entries {
            html.push_str(&format!(
                "<li><span class=symbol>{}&nbsp;</span><a class=internal href=#{}>{}</a></li>\n",
                "#".repeat(usize::from(entry.level)),
                entry.slug,
                entry.rendered_text
            ));
        }
        html.push_str("</ul>\n</div>\n");
        html
    }
}

/// Build the table from the collected headings, or `None` if no heading qualifies.
pub fn build_toc(table: &AnchorTable<'_>, levels: TocLevels) -> Option<Toc> {
    if levels.is_disabled() {
        return None;
    }
    let entries: Vec<TocEntry> = table
        .headings()
        .filter(|(level, _)| levels.includes(*level))
        .map(|(level, anchor)| TocEntry {
            level,
            slug: anchor.slug.clone(),
            rendered_text: minor_text(anchor.text).html,
        })
        .collect();

    tracing::debug!(entries = entries.len(), cutoff = levels.get(), "built table of contents");
    if entries.is_empty() {
        None
    } else {
        Some(Toc { entries })
    }
}
