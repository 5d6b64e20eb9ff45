//! Shared helpers: conversion shortcuts, fixtures and a small DOM toolkit over html5ever.

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use html5ever::ParseOpts;
use markup5ever_rcdom::{Handle, NodeData, RcDom};
use mdlg_convert::{markdown_to_html, ConversionResult, ConvertOptions, TocLevels};

/// Convert with default options, panicking on conversion errors.
pub fn convert(source: &str) -> ConversionResult {
    markdown_to_html(source, &ConvertOptions::default()).expect("conversion failed")
}

pub fn convert_with_toc(source: &str, levels: u8) -> ConversionResult {
    let options = ConvertOptions::new(TocLevels::new(levels).expect("valid toc levels"));
    markdown_to_html(source, &options).expect("conversion failed")
}

pub fn fixture(name: &str) -> String {
    let path = format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("reading {path}: {e}"))
}

/// Parse a fragment the way a browser would inside `<body>`.
pub fn parse_fragment(html: &str) -> RcDom {
    let wrapped = format!("<!DOCTYPE html><html><head></head><body>{html}</body></html>");
    parse_document(RcDom::default(), ParseOpts::default())
        .from_utf8()
        .one(wrapped.as_bytes())
}

/// Elements with the given local name, in document order.
pub fn elements(handle: &Handle, name: &str) -> Vec<Handle> {
    let mut found = Vec::new();
    collect_elements(handle, &mut |node| is_element(node, name), &mut found);
    found
}

/// Every element, in document order.
pub fn all_elements(handle: &Handle) -> Vec<Handle> {
    let mut found = Vec::new();
    collect_elements(handle, &mut |node| matches!(node.data, NodeData::Element { .. }), &mut found);
    found
}

fn collect_elements(handle: &Handle, keep: &mut dyn FnMut(&Handle) -> bool, found: &mut Vec<Handle>) {
    if keep(handle) {
        found.push(handle.clone());
    }
    for child in handle.children.borrow().iter() {
        collect_elements(child, keep, found);
    }
}

pub fn is_element(handle: &Handle, name: &str) -> bool {
    matches!(handle.data, NodeData::Element { name: ref qname, .. } if qname.local.as_ref() == name)
}

pub fn attr(handle: &Handle, name: &str) -> Option<String> {
    if let NodeData::Element { ref attrs, .. } = handle.data {
        for attribute in attrs.borrow().iter() {
            if attribute.name.local.as_ref() == name {
                return Some(attribute.value.to_string());
            }
        }
    }
    None
}

pub fn text_content(handle: &Handle) -> String {
    let mut text = String::new();
    push_text(handle, &mut text);
    text
}

fn push_text(handle: &Handle, text: &mut String) {
    match handle.data {
        NodeData::Text { ref contents } => text.push_str(&contents.borrow()),
        _ => {
            for child in handle.children.borrow().iter() {
                push_text(child, text);
            }
        }
    }
}
