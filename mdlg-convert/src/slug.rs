//! Slug formatting and per-conversion slug registries

use crate::error::ConvertError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;

static NON_SLUG_TEXT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9]+").expect("static pattern"));

/// Normalize display text into an id: every run of characters outside `[A-Za-z0-9]` becomes a
/// single `-`, then one leading and one trailing `-` are stripped.
///
/// Text with nothing left after normalization (e.g. `"!!"`) is rejected.
pub fn format_slug(text: &str) -> Result<String, ConvertError> {
    let replaced = NON_SLUG_TEXT.replace_all(text, "-");
    let replaced: &str = &replaced;
    let slug = replaced.strip_prefix('-').unwrap_or(replaced);
    let slug = slug.strip_suffix('-').unwrap_or(slug);
    if slug.is_empty() {
        return Err(ConvertError::EmptySlug {
            text: text.to_string(),
        });
    }
    Ok(slug.to_string())
}

/// Multiset of slugs seen during one conversion.
///
/// The collection pass fills one to find duplicates, the rendering pass fills a second one that
/// must come out identical.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SlugRegistry {
    counts: BTreeMap<String, usize>,
}

impl SlugRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slugify `text` and count the result.
    pub fn register(&mut self, text: &str) -> Result<String, ConvertError> {
        let slug = format_slug(text)?;
        self.record(&slug);
        Ok(slug)
    }

    pub fn record(&mut self, slug: &str) {
        *self.counts.entry(slug.to_string()).or_insert(0) += 1;
    }

    pub fn count(&self, slug: &str) -> usize {
        self.counts.get(slug).copied().unwrap_or(0)
    }

    pub fn contains(&self, slug: &str) -> bool {
        self.counts.contains_key(slug)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Distinct slugs in sorted order.
    pub fn slugs(&self) -> impl Iterator<Item = &str> {
        self.counts.keys().map(String::as_str)
    }

    /// Slugs counted more than once, sorted.
    pub fn duplicates(&self) -> Vec<String> {
        self.counts
            .iter()
            .filter(|(_, count)| **count > 1)
            .map(|(slug, _)| slug.clone())
            .collect()
    }

    /// Occurrences present in `self` but not in `other`, one entry per surplus occurrence.
    pub fn surplus_over(&self, other: &SlugRegistry) -> Vec<String> {
        let mut surplus = Vec::new();
        for (slug, count) in &self.counts {
            let extra = count.saturating_sub(other.count(slug));
            surplus.extend(std::iter::repeat(slug.clone()).take(extra));
        }
        surplus
    }
}
