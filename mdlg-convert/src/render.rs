//! Block rendering (second pass)
//!
//! Turns segmented blocks into the HTML fragment, delegating inline syntax to the inline
//! renderer. The table of contents goes in front of the first heading below the title. Once
//! every block is written, the slugs assigned while rendering are checked against the ones
//! collected in the first pass; any difference is a defect, never bad input.

use crate::anchors::AnchorTable;
use crate::blocks::Block;
use crate::error::ConvertError;
use crate::escape::push_text;
use crate::inline::InlineRenderer;
use crate::toc::Toc;
use std::collections::BTreeSet;

/// Rendered fragment plus the slugs its internal links point at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub html: String,
    pub referenced: BTreeSet<String>,
}

pub fn render_blocks(
    blocks: &[Block<'_>],
    table: &AnchorTable<'_>,
    toc: Option<&Toc>,
    internal_links: bool,
) -> Result<Rendered, ConvertError> {
    let mut inline = InlineRenderer::new(table.link_matcher(), internal_links);
    let mut html = String::new();
    let mut toc = toc;

    for block in blocks {
        match block {
            Block::Heading { level, text, .. } => {
                if *level > 1 {
                    if let Some(toc) = toc.take() {
                        html.push_str(&toc.to_html());
                    }
                }
                inline.render_heading(*level, text, &mut html)?;
            }
            Block::CodeBlock { body, .. } => {
                html.push_str("<pre><span class=symbol>```</span>\n");
                for line in body {
                    push_text(&mut html, line);
                    html.push('\n');
                }
                html.push_str("<span class=symbol>```</span></pre>\n");
            }
            Block::UnorderedList { items } => {
                html.push_str("<ul class=custom>\n");
                for item in items {
                    html.push_str("<li class=custom><span class=symbol>*</span> ");
                    inline.render_major(item, &mut html)?;
                    html.push_str("</li>\n");
                }
                html.push_str("</ul>\n");
            }
            Block::OrderedList { items } => {
                html.push_str("<ol class=custom>\n");
                for item in items {
                    html.push_str(&format!(
                        "<li class=custom><span class=symbol>{}.</span> ",
                        item.marker
                    ));
                    inline.render_major(item.text, &mut html)?;
                    html.push_str("</li>\n");
                }
                html.push_str("</ol>\n");
            }
            Block::Paragraph { lines } => {
                html.push_str("<p>\n");
                for (index, line) in lines.iter().enumerate() {
                    if index > 0 {
                        html.push_str("<br>\n");
                    }
                    inline.render_major(line, &mut html)?;
                }
                html.push_str("\n</p>\n");
            }
            Block::Blank => {}
        }
    }

    let (defined, referenced) = inline.finish();
    let missing = table.registry().surplus_over(&defined);
    let unexpected = defined.surplus_over(table.registry());
    if !missing.is_empty() || !unexpected.is_empty() {
        return Err(ConvertError::InternalConsistency {
            missing,
            unexpected,
        });
    }

    Ok(Rendered { html, referenced })
}
