//! Property tests over generated documents

use mdlg_convert::{
    collect_anchors, escape_text, format_slug, markdown_to_html, ConvertError, ConvertOptions,
    TocLevels,
};
use once_cell::sync::Lazy;
use proptest::prelude::*;
use regex::Regex;

static SLUG_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9]+(-[A-Za-z0-9]+)*$").unwrap());

/// Lines that combine into valid and invalid documents alike.
const LINES: &[&str] = &[
    "",
    "# Title",
    "## Setup",
    "### Deep dive",
    "#### `Code` notes",
    "plain text with Setup and Title",
    "a **bold term** here",
    "**Setup**",
    "_italic_ and `code` and https://example.com/?a=1&b=<2>",
    "* item mentioning bold term",
    "1. first",
    "2. second",
    "```",
    "x < y && z > w",
    "## snake_case",
    "snake_case is **great** and so_on",
    "my_var **Term** other_x",
    "## `a_b` **c",
    "`a_b` **c** and Term_",
];

fn documents() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(LINES), 0..16).prop_map(|lines| {
        let mut doc = lines.join("\n");
        doc.push('\n');
        doc
    })
}

fn options() -> impl Strategy<Value = ConvertOptions> {
    (prop::sample::select(TocLevels::ALLOWED.to_vec()), any::<bool>()).prop_map(
        |(levels, internal_links)| {
            ConvertOptions::new(TocLevels::new(levels).unwrap()).with_internal_links(internal_links)
        },
    )
}

fn unescape(html: &str) -> String {
    html.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

proptest! {
    #[test]
    fn conversion_is_deterministic(doc in documents(), options in options()) {
        let first = markdown_to_html(&doc, &options);
        let second = markdown_to_html(&doc, &options);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn plain_text_is_escaped_completely(text in "[a-z <>&]{0,40}") {
        let html = markdown_to_html(&format!("{text}\n"), &ConvertOptions::default())
            .unwrap()
            .html;
        if text.trim().is_empty() {
            prop_assert_eq!(html, "");
        } else {
            let inner = html
                .strip_prefix("<p>\n")
                .and_then(|rest| rest.strip_suffix("\n</p>\n"))
                .unwrap();
            prop_assert!(!inner.contains('<') && !inner.contains('>'));
            prop_assert_eq!(inner, escape_text(&text));
            prop_assert_eq!(unescape(inner), text);
        }
    }

    #[test]
    fn slugs_are_hyphen_separated_alphanumerics(text in "\\PC{0,30}") {
        if let Ok(slug) = format_slug(&text) {
            prop_assert!(SLUG_SHAPE.is_match(&slug), "{:?} -> {:?}", text, slug);
        }
    }

    #[test]
    fn successful_conversions_define_every_internal_target(doc in documents()) {
        if let Ok(result) = markdown_to_html(&doc, &ConvertOptions::default()) {
            prop_assert!(result.warnings.is_empty());
            for (index, _) in result.html.match_indices("href=#") {
                let target: String = result.html[index + 6..]
                    .chars()
                    .take_while(|c| c.is_ascii_alphanumeric() || *c == '-')
                    .collect();
                let defined = format!("id={target}>");
                prop_assert!(result.html.contains(&defined), "missing {}", defined);
            }
        }
    }

    #[test]
    fn collected_anchors_always_render(doc in documents(), options in options()) {
        if collect_anchors(&doc).is_ok() {
            let result = markdown_to_html(&doc, &options);
            prop_assert!(
                !matches!(result, Err(ConvertError::InternalConsistency { .. })),
                "{:?} -> {:?}",
                doc,
                result
            );
        }
    }
}
