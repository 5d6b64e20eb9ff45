//! Link integrity check
//!
//! Runs after rendering. A reference to a slug nothing defines is only a warning: the HTML
//! keeps its dead anchor and the conversion still succeeds.

use crate::error::Warning;
use crate::slug::SlugRegistry;
use std::collections::BTreeSet;

/// Warnings for every referenced slug missing from `defined`, sorted by slug.
pub fn check_links(referenced: &BTreeSet<String>, defined: &SlugRegistry) -> Vec<Warning> {
    referenced
        .iter()
        .filter(|slug| !defined.contains(slug))
        .map(|slug| {
            tracing::warn!(%slug, "broken link");
            Warning::BrokenInternalLink { slug: slug.clone() }
        })
        .collect()
}
