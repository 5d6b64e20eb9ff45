//! Structural checks on the kitchensink fixture, parsed back with html5ever
//!
//! String snapshots pin the exact bytes; these tests check what a browser would build from them.

use crate::common::{all_elements, attr, convert, elements, fixture, is_element, parse_fragment, text_content};
use std::collections::HashSet;

fn kitchensink_dom() -> markup5ever_rcdom::RcDom {
    let result = convert(&fixture("kitchensink.md"));
    assert!(result.warnings.is_empty(), "{:?}", result.warnings);
    parse_fragment(&result.html)
}

#[test]
fn test_heading_levels() {
    let dom = kitchensink_dom();
    let count = |name: &str| elements(&dom.document, name).len();

    assert_eq!(count("h1"), 1);
    assert_eq!(count("h2"), 3);
    assert_eq!(count("h3"), 1);
    assert_eq!(count("h4"), 1);

    let h2_texts: Vec<String> = elements(&dom.document, "h2").iter().map(text_content).collect();
    assert_eq!(h2_texts, vec!["## Inline", "## Lists", "## `Code` blocks"]);
}

#[test]
fn test_ids_are_unique_and_every_link_resolves() {
    let dom = kitchensink_dom();
    let mut ids = HashSet::new();
    for element in all_elements(&dom.document) {
        if let Some(id) = attr(&element, "id") {
            assert!(ids.insert(id.clone()), "duplicate id {id}");
        }
    }

    let mut internal = 0;
    for link in elements(&dom.document, "a") {
        let href = attr(&link, "href").unwrap();
        if let Some(target) = href.strip_prefix('#') {
            assert!(ids.contains(target), "dangling link to {target}");
            internal += 1;
        }
    }
    assert!(internal > 10);
}

#[test]
fn test_bold_terms_link_to_themselves() {
    let dom = kitchensink_dom();
    let strong = elements(&dom.document, "strong");
    let ids: Vec<String> = strong.iter().filter_map(|node| attr(node, "id")).collect();
    assert_eq!(ids, vec!["anchors", "self-linking", "numbered-term"]);

    for node in &strong {
        let self_link = &elements(node, "a")[0];
        assert_eq!(attr(self_link, "class").as_deref(), Some("self-link"));
        assert_eq!(attr(self_link, "href"), attr(node, "id").map(|id| format!("#{id}")));
    }
}

#[test]
fn test_toc_comes_before_first_subheading() {
    let dom = kitchensink_dom();
    let order: Vec<String> = all_elements(&dom.document)
        .iter()
        .filter_map(|node| {
            if attr(node, "id").as_deref() == Some("toc") {
                Some("toc".to_string())
            } else if is_element(node, "h1") || is_element(node, "h2") {
                attr(node, "id")
            } else {
                None
            }
        })
        .collect();
    assert_eq!(order, vec!["Kitchen-Sink", "toc", "Inline", "Lists", "Code-blocks"]);

    let toc = all_elements(&dom.document)
        .into_iter()
        .find(|node| attr(node, "id").as_deref() == Some("toc"))
        .unwrap();
    let entries: Vec<String> = elements(&toc, "li").iter().map(text_content).collect();
    assert_eq!(
        entries,
        vec![
            "##\u{a0}Inline",
            "##\u{a0}Lists",
            "##\u{a0}`Code` blocks",
            "###\u{a0}Nested level",
        ]
    );
}

#[test]
fn test_markup_in_text_stays_text() {
    let dom = kitchensink_dom();
    assert!(elements(&dom.document, "b").is_empty());

    let pre = elements(&dom.document, "pre");
    assert_eq!(pre.len(), 1);
    assert_eq!(
        text_content(&pre[0]),
        "```\nfn main() {\n    println!(\"<not a tag> & **not bold**\");\n}\n```"
    );

    let codes: Vec<String> = elements(&dom.document, "code").iter().map(text_content).collect();
    assert!(codes.contains(&"<b>&".to_string()));
}

#[test]
fn test_external_link_round_trips_through_attribute_escaping() {
    let dom = kitchensink_dom();
    let external: Vec<_> = elements(&dom.document, "a")
        .into_iter()
        .filter(|link| attr(link, "class").as_deref() == Some("external"))
        .collect();
    assert_eq!(external.len(), 1);
    assert_eq!(
        attr(&external[0], "href").as_deref(),
        Some("https://example.com/path?q=1&r=2")
    );
    assert_eq!(text_content(&external[0]), "https://example.com/path?q=1&r=2");
}

#[test]
fn test_lists_keep_their_markers() {
    let dom = kitchensink_dom();
    let items: Vec<String> = elements(&dom.document, "ol")
        .iter()
        .flat_map(|list| elements(list, "li"))
        .map(|item| text_content(&item))
        .collect();
    assert_eq!(
        items,
        vec![
            "1. first",
            "2. second with **numbered term**",
            "3. third mentions numbered term",
        ]
    );
    assert_eq!(elements(&dom.document, "ul").len(), 2);
}
