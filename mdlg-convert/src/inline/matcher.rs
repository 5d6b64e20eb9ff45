//! Internal-link recognition
//!
//! Known anchor texts are tried longest first, so a short anchor name can never shadow a
//! longer one that contains it. A match must sit on word boundaries: the characters on either
//! side may not be alphanumeric or `_`.

use std::cmp::Reverse;

/// Longest-first matcher over the anchor texts of one document
#[derive(Debug, Clone, Default)]
pub struct InternalLinkMatcher<'t> {
    texts: Vec<&'t str>,
}

impl<'t> InternalLinkMatcher<'t> {
    pub fn new(candidates: impl IntoIterator<Item = &'t str>) -> Self {
        let mut texts: Vec<&'t str> = Vec::new();
        for text in candidates {
            if !text.is_empty() && !texts.contains(&text) {
                texts.push(text);
            }
        }
        // Stable: equal lengths keep document order.
        texts.sort_by_key(|text| Reverse(text.chars().count()));
        Self { texts }
    }

    /// A matcher that recognizes nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }

    /// Candidate texts in matching priority.
    pub fn texts(&self) -> &[&'t str] {
        &self.texts
    }

    /// The anchor text starting at byte `pos` of `text`, if any.
    pub fn match_at<'a>(&self, text: &'a str, pos: usize) -> Option<&'a str> {
        if self.texts.is_empty() {
            return None;
        }
        if text[..pos].chars().next_back().is_some_and(is_word_char) {
            return None;
        }
        let rest = &text[pos..];
        self.texts
            .iter()
            .find(|candidate| {
                rest.starts_with(**candidate)
                    && !rest[candidate.len()..]
                        .chars()
                        .next()
                        .is_some_and(is_word_char)
            })
            .map(|candidate| &rest[..candidate.len()])
    }
}

pub(crate) fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
