//! Inline syntax
//!
//! Inline parsing is a two-level grammar. *Major* syntax is recognized at the top level of a
//! paragraph line or list item: bold, italics, external autolinks, internal links and inline
//! code. *Minor* syntax is the restricted grammar used inside bold, italics, headings and
//! link texts, and only knows inline code.
//!
//! Scanning walks the text left to right and stops at the first position where any construct
//! matches; at a single position the precedence is bold > italics > external link > internal
//! link > code. Spans live only while their block is rendered.

mod matcher;
mod renderer;

pub use matcher::InternalLinkMatcher;
pub(crate) use renderer::InlineRenderer;

use crate::escape::push_text;
use serde::Serialize;

/// A piece of inline syntax borrowed from the text being scanned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "text", rename_all = "kebab-case")]
pub enum InlineSpan<'a> {
    Text(&'a str),
    /// Inner text of `**...**`
    Bold(&'a str),
    /// Inner text of `_..._`
    Italics(&'a str),
    /// A bare `http://` or `https://` token
    ExternalLink(&'a str),
    /// A verbatim occurrence of a known anchor text
    InternalLink(&'a str),
    /// Inner text of `` `...` ``
    Code(&'a str),
}

/// Split `text` into major-syntax spans, recognizing internal links with `links`.
pub fn major_spans<'a>(text: &'a str, links: &InternalLinkMatcher<'_>) -> Vec<InlineSpan<'a>> {
    scan(text, |pos| {
        if let Some((inner, end)) = delimited(text, pos, "**") {
            return Some((InlineSpan::Bold(inner), end));
        }
        if let Some((inner, end)) = delimited(text, pos, "_") {
            return Some((InlineSpan::Italics(inner), end));
        }
        if let Some(url) = external_link(text, pos) {
            return Some((InlineSpan::ExternalLink(url), pos + url.len()));
        }
        if let Some(anchor) = links.match_at(text, pos) {
            return Some((InlineSpan::InternalLink(anchor), pos + anchor.len()));
        }
        delimited(text, pos, "`").map(|(inner, end)| (InlineSpan::Code(inner), end))
    })
}

/// Split `text` into plain text and inline code only.
pub fn minor_spans(text: &str) -> Vec<InlineSpan<'_>> {
    scan(text, |pos| {
        delimited(text, pos, "`").map(|(inner, end)| (InlineSpan::Code(inner), end))
    })
}

/// Minor-syntax text in two renditions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MinorText {
    /// The text with code delimiters dropped, used for slugs
    pub plain: String,
    /// Escaped HTML with code spans marked up
    pub html: String,
}

/// Render minor syntax (inline code) inside bold, italics, headings and link texts.
pub fn minor_text(text: &str) -> MinorText {
    let mut minor = MinorText::default();
    for span in minor_spans(text) {
        match span {
            InlineSpan::Code(inner) => {
                minor.plain.push_str(inner);
                push_code(&mut minor.html, inner);
            }
            other => {
                let raw = other.raw();
                minor.plain.push_str(raw);
                push_text(&mut minor.html, raw);
            }
        }
    }
    minor
}

impl<'a> InlineSpan<'a> {
    /// The text carried by the span, without delimiters.
    pub fn raw(&self) -> &'a str {
        match *self {
            InlineSpan::Text(text)
            | InlineSpan::Bold(text)
            | InlineSpan::Italics(text)
            | InlineSpan::ExternalLink(text)
            | InlineSpan::InternalLink(text)
            | InlineSpan::Code(text) => text,
        }
    }
}

pub(crate) fn push_code(out: &mut String, inner: &str) {
    out.push_str("<span class=symbol>`</span><code>");
    push_text(out, inner);
    out.push_str("</code><span class=symbol>`</span>");
}

fn scan<'a>(
    text: &'a str,
    mut probe: impl FnMut(usize) -> Option<(InlineSpan<'a>, usize)>,
) -> Vec<InlineSpan<'a>> {
    let mut spans = Vec::new();
    let mut plain_start = 0;
    let mut pos = 0;
    while pos < text.len() {
        match probe(pos) {
            Some((span, end)) => {
                if plain_start < pos {
                    spans.push(InlineSpan::Text(&text[plain_start..pos]));
                }
                spans.push(span);
                pos = end;
                plain_start = end;
            }
            None => {
                pos += text[pos..].chars().next().map_or(1, char::len_utf8);
            }
        }
    }
    if plain_start < text.len() {
        spans.push(InlineSpan::Text(&text[plain_start..]));
    }
    spans
}

/// `delim`, at least one character, then the nearest following `delim`.
fn delimited<'a>(text: &'a str, pos: usize, delim: &str) -> Option<(&'a str, usize)> {
    let rest = text[pos..].strip_prefix(delim)?;
    let first = rest.chars().next()?;
    let close = rest[first.len_utf8()..].find(delim)? + first.len_utf8();
    let inner = &rest[..close];
    if inner.contains('\n') {
        return None;
    }
    Some((inner, pos + delim.len() + close + delim.len()))
}

fn external_link(text: &str, pos: usize) -> Option<&str> {
    let rest = &text[pos..];
    let scheme = ["https://", "http://"]
        .into_iter()
        .find(|scheme| rest.starts_with(scheme))?;
    let tail = &rest[scheme.len()..];
    let len = tail.find(char::is_whitespace).unwrap_or(tail.len());
    if len == 0 {
        return None;
    }
    Some(&rest[..scheme.len() + len])
}
