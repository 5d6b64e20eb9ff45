//! Markdown-looks-good conversion
//!
//!     This crate converts a small, strict Markdown dialect into an HTML fragment that still
//!     shows its markup: the `#` of a heading, the `**` around a bold term and the backticks of
//!     inline code stay visible, wrapped in `symbol` spans so a stylesheet can dim them.
//!
//!     This is a pure lib, that is, it powers mdlg-cli but is shell agnostic: no code here
//!     prints, reads env vars or touches the filesystem. Diagnostics are returned as values and
//!     mirrored as tracing events.
//!
//! Architecture
//!
//!     Conversion is two explicit traversals sharing one immutable anchor table:
//!
//!     1. Collection (./anchors.rs): find every heading and bold term, slug it, reject
//!        duplicate ids. Nothing has been rendered yet, so a failure leaves no partial output.
//!     2. Segmentation (./blocks.rs) then rendering (./render.rs): split the document into
//!        flat blocks, validate their layout, and render each one. Inline syntax
//!        (./inline/) recognizes internal links by matching the collected anchor texts,
//!        longest first.
//!
//!     Afterwards the link checker (./links.rs) reports references to undefined slugs as
//!     warnings. The table of contents (./toc.rs) is built from the collected headings.
//!
//!     The file structure :
//!     .
//!     ├── anchors.rs          # First pass, AnchorTable
//!     ├── blocks.rs           # Line classification and block segmentation
//!     ├── error.rs
//!     ├── escape.rs           # Text, attribute and CDATA escaping
//!     ├── inline
//!     │   ├── matcher.rs      # Longest-first internal link matching
//!     │   ├── renderer.rs     # Inline HTML and the render-time slug registry
//!     │   └── mod.rs          # Major/minor span scanning
//!     ├── links.rs            # Broken link warnings
//!     ├── options.rs
//!     ├── render.rs           # Block HTML and the registry cross-check
//!     ├── slug.rs
//!     ├── template.rs         # Splicing into a page template
//!     └── toc.rs
//!
//! The Dialect
//!
//!     - Headings: `#` to `####`, a space, text. A heading may not continue a paragraph and is
//!       followed by exactly one blank line.
//!     - `**bold**` (an anchor), `_italics_`, `` `code` ``. Bold and italics hold code only.
//!     - Bare `http://` and `https://` tokens are links.
//!     - `* ` lists and `N. ` lists, numbered 1, 2, 3...
//!     - Fenced code blocks with no language.
//!
//!     Any heading or bold term is a link target: its text appearing verbatim elsewhere, on word
//!     boundaries, becomes a same-page link.
//!
//! Testing
//!     tests
//!     ├── lib.rs
//!     ├── common              # Conversion shortcuts and DOM helpers
//!     ├── <area>
//!     │   ├── <testname>.rs
//!     │   └── mod.rs
//!     └── fixtures
//!         └── kitchensink.md
//!
//!     Note that rust does not by default discover tests in subdirectories, so we need to include these
//!     in the mod.
//!
pub mod anchors;
pub mod blocks;
pub mod error;
pub mod escape;
pub mod inline;
pub mod links;
pub mod options;
pub mod render;
pub mod slug;
pub mod template;
pub mod toc;

pub use anchors::{collect_anchors, Anchor, AnchorKind, AnchorTable};
pub use blocks::{segment, Block};
pub use error::{ConvertError, HeadingSpacing, TemplateError, Warning};
pub use escape::{escape_attribute, escape_cdata, escape_text};
pub use options::{ConvertOptions, TocLevels};
pub use slug::{format_slug, SlugRegistry};
pub use template::{apply_template, PLACEHOLDER};
pub use toc::{build_toc, Toc, TocEntry};

use serde::Serialize;

/// A complete HTML fragment and the non-fatal problems found while producing it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionResult {
    pub html: String,
    /// Sorted by slug
    pub warnings: Vec<Warning>,
}

/// Converts a document to an HTML fragment.
///
/// Every call is independent: all registries live for the duration of the call only. On error
/// no HTML is returned.
pub fn markdown_to_html(
    source: &str,
    options: &ConvertOptions,
) -> Result<ConversionResult, ConvertError> {
    let table = collect_anchors(source)?;
    let toc = build_toc(&table, options.toc_levels);
    let blocks = segment(source)?;
    tracing::debug!(blocks = blocks.len(), "segmented document");

    let rendered = render::render_blocks(&blocks, &table, toc.as_ref(), options.internal_links)?;
    let warnings = links::check_links(&rendered.referenced, table.registry());
    tracing::debug!(
        bytes = rendered.html.len(),
        warnings = warnings.len(),
        "converted document"
    );

    Ok(ConversionResult {
        html: rendered.html,
        warnings,
    })
}
