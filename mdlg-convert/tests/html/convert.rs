//! End-to-end conversion tests
//!
//! These drive `markdown_to_html` the way the CLI does and check the emitted fragment.

use crate::common::{convert, convert_with_toc};
use insta::assert_snapshot;
use mdlg_convert::{markdown_to_html, ConvertError, ConvertOptions, HeadingSpacing};

// ============================================================================
// WHOLE DOCUMENTS
// ============================================================================

#[test]
fn test_title_and_bold_term() {
    let result = convert("# Title\n\nHello **World**.\n");

    assert!(result.warnings.is_empty());
    assert_snapshot!(result.html, @r"
    <h1 id=Title><a class=self-link href=#Title><span class=symbol>#</span></a> Title</h1>
    <p>
    Hello <strong id=World><a class=self-link href=#World><span class=symbol>**</span></a>World<span class=symbol>**</span></strong>.
    </p>
    ");
}

#[test]
fn test_guide_with_toc_and_cross_references() {
    let source = "\
# Guide

Intro mentions Setup and `Config` values.

## Setup

Run **the tool** first.
See the tool docs at https://example.com/docs?a=1.

## `Config` values

* set _quiet_ mode
* read Setup again

1. first
2. the tool
";
    let result = convert(source);

    assert!(result.warnings.is_empty());
    assert_snapshot!(result.html, @r"
    <h1 id=Guide><a class=self-link href=#Guide><span class=symbol>#</span></a> Guide</h1>
    <p>
    Intro mentions <a class=internal href=#Setup>Setup</a> and <a class=internal href=#Config-values><span class=symbol>`</span><code>Config</code><span class=symbol>`</span> values</a>.
    </p>
    <div id=toc class=no-print>
    <div class=label>Contents</div>
    <ul class=custom>
    <li><span class=symbol>##&nbsp;</span><a class=internal href=#Setup>Setup</a></li>
    <li><span class=symbol>##&nbsp;</span><a class=internal href=#Config-values><span class=symbol>`</span><code>Config</code><span class=symbol>`</span> values</a></li>
    </ul>
    </div>
    <h2 id=Setup><a class=self-link href=#Setup><span class=symbol>##</span></a> Setup</h2>
    <p>
    Run <strong id=the-tool><a class=self-link href=#the-tool><span class=symbol>**</span></a>the tool<span class=symbol>**</span></strong> first.<br>
    See <a class=internal href=#the-tool>the tool</a> docs at <a class=external href=https://example.com/docs?a&#61;1.>https://example.com/docs?a=1.</a>
    </p>
    <h2 id=Config-values><a class=self-link href=#Config-values><span class=symbol>##</span></a> <span class=symbol>`</span><code>Config</code><span class=symbol>`</span> values</h2>
    <ul class=custom>
    <li class=custom><span class=symbol>*</span> set <span class=symbol>_</span><em>quiet</em><span class=symbol>_</span> mode</li>
    <li class=custom><span class=symbol>*</span> read <a class=internal href=#Setup>Setup</a> again</li>
    </ul>
    <ol class=custom>
    <li class=custom><span class=symbol>1.</span> first</li>
    <li class=custom><span class=symbol>2.</span> <a class=internal href=#the-tool>the tool</a></li>
    </ol>
    ");
}

#[test]
fn test_document_without_anchors() {
    let result = convert("plain text & more\n");
    assert_eq!(result.html, "<p>\nplain text &amp; more\n</p>\n");
}

#[test]
fn test_empty_document() {
    let result = convert("");
    assert_eq!(result.html, "");
    assert!(result.warnings.is_empty());
}

// ============================================================================
// ANCHORS AND LINKS
// ============================================================================

#[test]
fn test_duplicate_slugs_fail() {
    let err = markdown_to_html("## Foo bar\n\nA **Foo-bar** term.\n", &ConvertOptions::default())
        .unwrap_err();
    assert_eq!(
        err,
        ConvertError::DuplicateAnchor {
            slugs: vec!["Foo-bar".to_string()]
        }
    );
}

#[test]
fn test_longest_anchor_wins() {
    let result = convert("## Foo\n\n## FooBar\n\nUse FooBar and Foo.\n");

    assert!(result
        .html
        .contains("Use <a class=internal href=#FooBar>FooBar</a> and <a class=internal href=#Foo>Foo</a>."));
    assert!(!result.html.contains("href=#Foo>Foo</a>Bar"));
}

#[test]
fn test_anchor_inside_identifier_is_not_linked() {
    let result = convert("## Foo\n\nFooish and my_Foo but (Foo).\n");
    assert!(result
        .html
        .contains("Fooish and my_Foo but (<a class=internal href=#Foo>Foo</a>)."));
}

#[test]
fn test_disabled_internal_links_render_plain_text() {
    let options = ConvertOptions::default().with_internal_links(false);
    let result = markdown_to_html("## Setup\n\nSee `Setup` and Setup.\n", &options).unwrap();

    assert!(result.html.contains(
        "<p>\nSee <span class=symbol>`</span><code>Setup</code><span class=symbol>`</span> and Setup.\n</p>\n"
    ));
    assert!(result.warnings.is_empty());
}

// ============================================================================
// TABLE OF CONTENTS
// ============================================================================

const LEVELS: &str = "# One\n\n## Two\n\n### Three\n\n#### Four\n\nbody\n";

#[test]
fn test_toc_levels_two_lists_only_second_level() {
    let html = convert_with_toc(LEVELS, 2).html;
    let toc = &html[html.find("<div id=toc").unwrap()..html.find("<h2").unwrap()];

    assert_eq!(toc.matches("<li>").count(), 1);
    assert!(toc.contains("href=#Two>"));
    assert!(!toc.contains("href=#Three>"));
}

#[test]
fn test_toc_levels_four_lists_everything_but_title() {
    let html = convert_with_toc(LEVELS, 4).html;
    let toc = &html[html.find("<div id=toc").unwrap()..html.find("<h2").unwrap()];

    assert_eq!(toc.matches("<li>").count(), 3);
    assert!(!toc.contains("href=#One>"));
}

#[test]
fn test_toc_levels_zero_has_no_container() {
    let html = convert_with_toc(LEVELS, 0).html;
    assert!(!html.contains("id=toc"));
    assert!(!html.contains("Contents"));
}

// ============================================================================
// LAYOUT ERRORS
// ============================================================================

#[test]
fn test_ordered_list_numbering() {
    assert!(markdown_to_html("1. a\n2. b\n3. c\n", &ConvertOptions::default()).is_ok());

    let err = markdown_to_html("1. a\n2. b\n4. c\n", &ConvertOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        ConvertError::NonSequentialList { line: 3, expected: 3, .. }
    ));
}

#[test]
fn test_heading_spacing_errors() {
    let err = markdown_to_html("text\n# Title\n\nmore\n", &ConvertOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        ConvertError::MalformedHeadingSpacing {
            problem: HeadingSpacing::MissingBlankBefore,
            ..
        }
    ));

    let err = markdown_to_html("# Title\nmore\n", &ConvertOptions::default()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "line 1: need exactly one blank line after a # heading, found 0: \"# Title\""
    );
}

#[test]
fn test_fence_language_is_unsupported() {
    let err = markdown_to_html("```python\nprint()\n```\n", &ConvertOptions::default()).unwrap_err();
    assert!(matches!(err, ConvertError::UnsupportedCodeLanguage { .. }));
}

#[test]
fn test_punctuation_heading_has_no_slug() {
    let err = markdown_to_html("## ???\n\ntext\n", &ConvertOptions::default()).unwrap_err();
    assert_eq!(
        err,
        ConvertError::EmptySlug {
            text: "???".to_string()
        }
    );
}
