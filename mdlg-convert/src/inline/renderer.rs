//! HTML rendering of inline spans
//!
//! Besides writing markup, the renderer keeps two per-conversion records: the slugs it assigns
//! to headings and bold terms (which must end up equal to the collected registry) and the slugs
//! every internal link points at (checked for broken links afterwards).

use super::{major_spans, minor_text, push_code, InlineSpan, InternalLinkMatcher};
use crate::error::ConvertError;
use crate::escape::{escape_attribute, push_text};
use crate::slug::{format_slug, SlugRegistry};
use std::collections::BTreeSet;

pub(crate) struct InlineRenderer<'t> {
    links: InternalLinkMatcher<'t>,
    internal_links: bool,
    defined: SlugRegistry,
    referenced: BTreeSet<String>,
}

impl<'t> InlineRenderer<'t> {
    pub(crate) fn new(links: InternalLinkMatcher<'t>, internal_links: bool) -> Self {
        Self {
            links,
            internal_links,
            defined: SlugRegistry::new(),
            referenced: BTreeSet::new(),
        }
    }

    /// Render a paragraph line or list item.
    pub(crate) fn render_major(&mut self, text: &str, out: &mut String) -> Result<(), ConvertError> {
        for span in major_spans(text, &self.links) {
            match span {
                InlineSpan::Text(text) => push_text(out, text),
                InlineSpan::Bold(inner) => {
                    let minor = minor_text(inner);
                    let slug = self.defined.register(&minor.plain)?;
                    out.push_str(&format!(
                        "<strong id={slug}><a class=self-link href=#{slug}><span class=symbol>**</span></a>{}<span class=symbol>**</span></strong>",
                        minor.html
                    ));
                }
                InlineSpan::Italics(inner) => {
                    let minor = minor_text(inner);
                    out.push_str(&format!(
                        "<span class=symbol>_</span><em>{}</em><span class=symbol>_</span>",
                        minor.html
                    ));
                }
                InlineSpan::ExternalLink(url) => {
                    out.push_str(&format!("<a class=external href={}>", escape_attribute(url)));
                    push_text(out, url);
                    out.push_str("</a>");
                }
                InlineSpan::InternalLink(anchor_text) => {
                    let minor = minor_text(anchor_text);
                    let slug = format_slug(&minor.plain)?;
                    if self.internal_links {
                        out.push_str(&format!(
                            "<a class=internal href=#{slug}>{}</a>",
                            minor.html
                        ));
                    } else {
                        out.push_str(&minor.html);
                    }
                    self.referenced.insert(slug);
                }
                InlineSpan::Code(inner) => push_code(out, inner),
            }
        }
        Ok(())
    }

    /// Render a heading with its id and a self-link around the literal `#` markers.
    pub(crate) fn render_heading(
        &mut self,
        level: u8,
        text: &str,
        out: &mut String,
    ) -> Result<(), ConvertError> {
        let minor = minor_text(text);
        let slug = self.defined.register(&minor.plain)?;
        let hashes = "#".repeat(usize::from(level));
        out.push_str(&format!(
            "<h{level} id={slug}><a class=self-link href=#{slug}><span class=symbol>{hashes}</span></a> {}</h{level}>\n",
            minor.html
        ));
        Ok(())
    }

    /// Slugs defined while rendering, and slugs referenced by internal links.
    pub(crate) fn finish(self) -> (SlugRegistry, BTreeSet<String>) {
        (self.defined, self.referenced)
    }
}
