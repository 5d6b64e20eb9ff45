//! Anchor collection (first pass)
//!
//! Walks the whole document once before anything is rendered and finds every addressable
//! anchor: headings and bold terms. Each anchor is slugified into one shared registry so that
//! colliding ids are rejected up front, and the anchor texts become the vocabulary the inline
//! renderer recognizes as internal links.
//!
//! The pass mirrors what the renderer will see: fenced code is skipped, heading text is read as
//! minor syntax, and every other line goes through the same major-syntax scanner. Internal
//! links can consume `_` or `**`, so body lines are rescanned with the links of the anchors
//! found so far until the bold terms stop changing; the renderer then sees exactly those.

use crate::blocks::{heading_level, is_closing_fence, Line};
use crate::error::ConvertError;
use crate::inline::{major_spans, minor_text, InlineSpan, InternalLinkMatcher};
use crate::slug::SlugRegistry;
use serde::Serialize;

/// What kind of construct defined an anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum AnchorKind {
    Heading { level: u8 },
    BoldTerm,
}

/// An addressable heading or bold term
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Anchor<'a> {
    /// Source text as written, inline-code backticks included
    pub text: &'a str,
    pub slug: String,
    #[serde(flatten)]
    pub kind: AnchorKind,
    /// 1-based source line
    pub line: usize,
}

/// Every anchor of one document in document order, with the registry of their slugs.
///
/// Built once by [`collect_anchors`] and only read afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnchorTable<'a> {
    anchors: Vec<Anchor<'a>>,
    registry: SlugRegistry,
}

impl<'a> AnchorTable<'a> {
    pub fn anchors(&self) -> &[Anchor<'a>] {
        &self.anchors
    }

    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    /// Headings in document order, with their levels.
    pub fn headings(&self) -> impl Iterator<Item = (u8, &Anchor<'a>)> {
        self.anchors.iter().filter_map(|anchor| match anchor.kind {
            AnchorKind::Heading { level } => Some((level, anchor)),
            AnchorKind::BoldTerm => None,
        })
    }

    /// Raw anchor texts in document order.
    pub fn known_texts(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.anchors.iter().map(|anchor| anchor.text)
    }

    /// Internal-link matcher over every known anchor text.
    pub fn link_matcher(&self) -> InternalLinkMatcher<'a> {
        InternalLinkMatcher::new(self.known_texts())
    }

    /// Slugs defined by the collected anchors.
    pub fn registry(&self) -> &SlugRegistry {
        &self.registry
    }

    #[cfg(test)]
    pub(crate) fn from_parts(anchors: Vec<Anchor<'a>>, registry: SlugRegistry) -> Self {
        Self { anchors, registry }
    }
}

/// Collect every heading and bold term of `source`.
///
/// Bold terms are the ones the renderer will see: body lines are rescanned with the internal
/// links of the current anchor set until that set no longer changes.
///
/// Fails with [`ConvertError::DuplicateAnchor`] (naming every colliding slug, sorted) if two
/// anchors share a slug, with [`ConvertError::EmptySlug`] if an anchor has no slug at all, and
/// with [`ConvertError::UnstableBoldTerms`] if the bold terms never settle.
pub fn collect_anchors(source: &str) -> Result<AnchorTable<'_>, ConvertError> {
    let (headings, body) = split_lines(source)?;

    let mut bold = bold_terms(&body, &InternalLinkMatcher::empty());
    let mut earlier: Vec<Vec<Candidate<'_>>> = Vec::new();
    loop {
        let candidates = in_document_order(&headings, &bold);
        let links = InternalLinkMatcher::new(candidates.iter().map(|candidate| candidate.text));
        let next = bold_terms(&body, &links);
        if next == bold {
            break;
        }
        if earlier.contains(&next) {
            return Err(ConvertError::UnstableBoldTerms {
                terms: flipping_terms(&bold, &next),
            });
        }
        earlier.push(std::mem::replace(&mut bold, next));
    }

    let mut table = AnchorTable::default();
    for candidate in in_document_order(&headings, &bold) {
        let slug = table.registry.register(&minor_text(candidate.text).plain)?;
        table.anchors.push(Anchor {
            text: candidate.text,
            slug,
            kind: candidate.kind,
            line: candidate.line,
        });
    }

    let duplicates = table.registry.duplicates();
    if !duplicates.is_empty() {
        return Err(ConvertError::DuplicateAnchor { slugs: duplicates });
    }

    tracing::debug!(
        anchors = table.len(),
        headings = table.headings().count(),
        rescans = earlier.len() + 1,
        "collected anchors"
    );
    Ok(table)
}

/// An anchor before its slug is known
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Candidate<'a> {
    text: &'a str,
    kind: AnchorKind,
    line: usize,
}

/// A line scanned for major syntax, with its 1-based number
type BodyLine<'a> = (usize, &'a str);

/// Headings, and the lines that may hold bold terms. Fenced code is skipped.
fn split_lines(source: &str) -> Result<(Vec<Candidate<'_>>, Vec<BodyLine<'_>>), ConvertError> {
    let mut headings = Vec::new();
    let mut body = Vec::new();
    let mut lines = source.lines().enumerate();

    while let Some((index, line)) = lines.next() {
        let line_number = index + 1;
        match Line::classify(line) {
            Line::Heading { level, text } => {
                let level = heading_level(level, line, line_number)?;
                headings.push(Candidate {
                    text,
                    kind: AnchorKind::Heading { level },
                    line: line_number,
                });
            }
            Line::Fence { .. } => {
                // An unterminated fence swallows the rest; segmentation reports it.
                for (_, fenced) in lines.by_ref() {
                    if is_closing_fence(fenced) {
                        break;
                    }
                }
            }
            Line::Blank => {}
            Line::UnorderedItem { text } | Line::OrderedItem { text, .. } | Line::Text(text) => {
                body.push((line_number, text));
            }
        }
    }
    Ok((headings, body))
}

fn bold_terms<'a>(body: &[BodyLine<'a>], links: &InternalLinkMatcher<'_>) -> Vec<Candidate<'a>> {
    let mut terms = Vec::new();
    for &(line, text) in body {
        for span in major_spans(text, links) {
            if let InlineSpan::Bold(inner) = span {
                terms.push(Candidate {
                    text: inner,
                    kind: AnchorKind::BoldTerm,
                    line,
                });
            }
        }
    }
    terms
}

fn in_document_order<'a>(headings: &[Candidate<'a>], bold: &[Candidate<'a>]) -> Vec<Candidate<'a>> {
    let mut all: Vec<Candidate<'a>> = headings.iter().chain(bold).copied().collect();
    // Stable: bold terms of one line keep their order.
    all.sort_by_key(|candidate| candidate.line);
    all
}

fn flipping_terms(current: &[Candidate<'_>], next: &[Candidate<'_>]) -> Vec<String> {
    let mut terms: Vec<String> = current
        .iter()
        .filter(|candidate| !next.contains(candidate))
        .chain(next.iter().filter(|candidate| !current.contains(candidate)))
        .map(|candidate| candidate.text.to_string())
        .collect();
    terms.sort();
    terms.dedup();
    terms
}
