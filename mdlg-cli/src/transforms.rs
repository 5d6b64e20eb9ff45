//! CLI-specific transforms
//!
//! This module defines the inspection views available in the CLI. Each transform is a
//! stage + format combination (e.g., "anchors-json", "slugs-simple").
//!
//! ## Transform Pipeline
//!
//! The converter runs two passes, and each one can be looked at on its own:
//!
//! 1. **Collection** - Document → anchors (headings and bold terms) with their slugs
//!    - `anchors-json`: every anchor, in document order
//!    - `slugs-simple`: the defined slugs, one per line, sorted
//!    - `toc-json`: the table of contents built from the headings
//!
//! 2. **Segmentation** - Document → flat blocks
//!    - `blocks-json`: headings, paragraphs, lists and code blocks
//!
//! Example: `mdlg inspect README.md toc-json --toc-levels 4`

use mdlg_convert::{build_toc, collect_anchors, segment, ConvertOptions};

/// All available CLI transforms (stage + format combinations)
pub const AVAILABLE_TRANSFORMS: &[&str] = &["anchors-json", "blocks-json", "toc-json", "slugs-simple"];

/// Execute a named transform on a source document.
///
/// `options` only matters for `toc-json`, where it picks the cutoff.
pub fn execute_transform(
    source: &str,
    transform_name: &str,
    options: &ConvertOptions,
) -> Result<String, String> {
    match transform_name {
        "anchors-json" => {
            let table = collect_anchors(source).map_err(|e| format!("Transform failed: {e}"))?;
            to_json(table.anchors())
        }
        "blocks-json" => {
            let blocks = segment(source).map_err(|e| format!("Transform failed: {e}"))?;
            to_json(&blocks)
        }
        "toc-json" => {
            let table = collect_anchors(source).map_err(|e| format!("Transform failed: {e}"))?;
            let toc = build_toc(&table, options.toc_levels);
            to_json(toc.as_ref().map(|toc| toc.entries()).unwrap_or_default())
        }
        "slugs-simple" => {
            let table = collect_anchors(source).map_err(|e| format!("Transform failed: {e}"))?;
            let mut output = String::new();
            for slug in table.registry().slugs() {
                output.push_str(slug);
                output.push('\n');
            }
            Ok(output)
        }
        _ => Err(format!("Unknown transform: {transform_name}")),
    }
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String, String> {
    let mut json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("JSON serialization failed: {e}"))?;
    json.push('\n');
    Ok(json)
}
