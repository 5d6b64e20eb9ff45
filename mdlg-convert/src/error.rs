//! Error and warning types for conversion
//!
//! Fatal problems abort a conversion before any HTML reaches the caller and are reported as
//! [`ConvertError`]. Broken internal links are the only non-fatal condition; they come back as
//! [`Warning`]s next to a complete HTML fragment.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Errors that abort a conversion
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    /// Two or more headings/bold terms normalize to the same slug
    #[error("duplicate anchor: {}", .slugs.join(", "))]
    DuplicateAnchor { slugs: Vec<String> },

    /// A heading is not isolated by blank lines
    #[error("line {line}: {problem}: {heading:?}")]
    MalformedHeadingSpacing {
        line: usize,
        heading: String,
        problem: HeadingSpacing,
    },

    /// A fenced code block names a language
    #[error("line {line}: code block language {language:?} is not supported (no syntax highlighting)")]
    UnsupportedCodeLanguage { line: usize, language: String },

    /// An ordered list item is not numbered one more than the item before it
    #[error("line {line}: non-sequential ordered list, expected {expected}: {text:?}")]
    NonSequentialList {
        line: usize,
        expected: u32,
        text: String,
    },

    /// A heading or bold term has no characters left after slug normalization
    #[error("anchor text {text:?} has an empty slug")]
    EmptySlug { text: String },

    /// The slugs produced while rendering differ from the ones collected up front
    #[error(
        "rendered anchors differ from collected anchors (missing: [{}], unexpected: [{}])",
        .missing.join(", "),
        .unexpected.join(", ")
    )]
    InternalConsistency {
        missing: Vec<String>,
        unexpected: Vec<String>,
    },

    /// A heading deeper than `####`
    #[error("line {line}: heading level {level} is not supported (1-4): {heading:?}")]
    UnsupportedHeadingLevel {
        line: usize,
        level: usize,
        heading: String,
    },

    /// An opening code fence that is never closed
    #[error("line {line}: code block is never closed")]
    UnterminatedCodeBlock { line: usize },

    /// Bold terms that appear or vanish depending on which anchors are linked
    #[error("bold terms never settle once internal links are matched: {}", .terms.join(", "))]
    UnstableBoldTerms { terms: Vec<String> },

    /// A table-of-contents cutoff outside the allowed set
    #[error("invalid toc levels {0} (allowed: 0, 2, 3, 4)")]
    InvalidTocLevels(u8),
}

/// Which side of a heading is missing its blank line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingSpacing {
    /// The heading continues a paragraph
    MissingBlankBefore,
    /// The heading is followed by this many blank lines instead of exactly one
    BlankLinesAfter(usize),
}

impl fmt::Display for HeadingSpacing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeadingSpacing::MissingBlankBefore => write!(f, "need a blank line before a # heading"),
            HeadingSpacing::BlankLinesAfter(count) => write!(
                f,
                "need exactly one blank line after a # heading, found {count}"
            ),
        }
    }
}

/// Errors from splicing a fragment into a page template
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("template must contain the placeholder {placeholder} exactly once, found {count}")]
    Placeholder {
        placeholder: &'static str,
        count: usize,
    },
}

/// Non-fatal diagnostics attached to a successful conversion
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Warning {
    /// A recognized reference points at a slug no heading or bold term defines
    BrokenInternalLink { slug: String },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::BrokenInternalLink { slug } => write!(f, "broken link: {slug}"),
        }
    }
}
