//! Structural segmentation (second pass)
//!
//! Splits a document into flat, non-nesting blocks in document order. Each line is classified
//! in priority order: heading > code fence > `* ` item > `N. ` item > blank / paragraph text.
//! Consecutive `* ` (or `N. `) lines form one list; consecutive text lines form one paragraph.
//!
//! The layout rules are validated here, and every violation is fatal:
//! - a heading may not continue a paragraph, and is followed by exactly one blank line (unless
//!   it ends the document)
//! - code fences carry no language tag and must be closed
//! - ordered lists count 1, 2, 3, ... without gaps

use crate::error::{ConvertError, HeadingSpacing};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

pub(crate) const MAX_HEADING_LEVEL: usize = 4;
const FENCE: &str = "```";

static HEADING_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(#+) (.*)$").expect("static pattern"));
static ORDERED_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]+)\. (.*)$").expect("static pattern"));

/// What a single source line looks like, before any grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Line<'a> {
    Heading { level: usize, text: &'a str },
    Fence { language: &'a str },
    UnorderedItem { text: &'a str },
    OrderedItem { number: &'a str, text: &'a str },
    Blank,
    Text(&'a str),
}

impl<'a> Line<'a> {
    pub(crate) fn classify(line: &'a str) -> Self {
        if let Some(caps) = HEADING_LINE.captures(line) {
            let (Some(hashes), Some(text)) = (caps.get(1), caps.get(2)) else {
                return Line::Text(line);
            };
            return Line::Heading {
                level: hashes.as_str().len(),
                text: text.as_str(),
            };
        }
        if let Some(language) = line.strip_prefix(FENCE) {
            return Line::Fence { language };
        }
        if let Some(text) = line.strip_prefix("* ") {
            return Line::UnorderedItem { text };
        }
        if let Some(caps) = ORDERED_ITEM.captures(line) {
            if let (Some(number), Some(text)) = (caps.get(1), caps.get(2)) {
                return Line::OrderedItem {
                    number: number.as_str(),
                    text: text.as_str(),
                };
            }
        }
        if is_blank(line) {
            Line::Blank
        } else {
            Line::Text(line)
        }
    }
}

pub(crate) fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

pub(crate) fn is_closing_fence(line: &str) -> bool {
    line.trim_end() == FENCE
}

/// One numbered item of an ordered list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OrderedItem<'a> {
    pub number: u32,
    /// The digits as written, leading zeros included
    pub marker: &'a str,
    pub text: &'a str,
}

/// Block-level structure of a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Block<'a> {
    Heading {
        line: usize,
        level: u8,
        text: &'a str,
    },
    CodeBlock {
        line: usize,
        language: &'a str,
        body: Vec<&'a str>,
    },
    UnorderedList {
        items: Vec<&'a str>,
    },
    OrderedList {
        items: Vec<OrderedItem<'a>>,
    },
    Paragraph {
        lines: Vec<&'a str>,
    },
    Blank,
}

/// Split `source` into blocks, validating heading spacing, fences and list numbering.
pub fn segment(source: &str) -> Result<Vec<Block<'_>>, ConvertError> {
    let lines: Vec<&str> = source.lines().collect();
    let mut blocks: Vec<Block<'_>> = Vec::new();
    let mut index = 0;

    while index < lines.len() {
        let line_number = index + 1;
        match Line::classify(lines[index]) {
            Line::Heading { level, text } => {
                if matches!(blocks.last(), Some(Block::Paragraph { .. })) {
                    return Err(ConvertError::MalformedHeadingSpacing {
                        line: line_number,
                        heading: lines[index].to_string(),
                        problem: HeadingSpacing::MissingBlankBefore,
                    });
                }
                let level = heading_level(level, lines[index], line_number)?;
                let blanks = lines[index + 1..]
                    .iter()
                    .take_while(|line| is_blank(line))
                    .count();
                let next = index + 1 + blanks;
                if next < lines.len() && blanks != 1 {
                    return Err(ConvertError::MalformedHeadingSpacing {
                        line: line_number,
                        heading: lines[index].to_string(),
                        problem: HeadingSpacing::BlankLinesAfter(blanks),
                    });
                }
                blocks.push(Block::Heading {
                    line: line_number,
                    level,
                    text,
                });
                index = next;
            }

            Line::Fence { language } => {
                let language = language.trim();
                if !language.is_empty() {
                    return Err(ConvertError::UnsupportedCodeLanguage {
                        line: line_number,
                        language: language.to_string(),
                    });
                }
                let body_len = lines[index + 1..]
                    .iter()
                    .position(|line| is_closing_fence(line))
                    .ok_or(ConvertError::UnterminatedCodeBlock { line: line_number })?;
                blocks.push(Block::CodeBlock {
                    line: line_number,
                    language,
                    body: lines[index + 1..index + 1 + body_len].to_vec(),
                });
                index += body_len + 2;
            }

            Line::UnorderedItem { .. } => {
                let mut items = Vec::new();
                while let Some(Line::UnorderedItem { text }) =
                    lines.get(index).copied().map(Line::classify)
                {
                    items.push(text);
                    index += 1;
                }
                blocks.push(Block::UnorderedList { items });
            }

            Line::OrderedItem { .. } => {
                let mut items = Vec::new();
                let mut expected: u32 = 1;
                while let Some(Line::OrderedItem { number, text }) =
                    lines.get(index).copied().map(Line::classify)
                {
                    match number.parse::<u32>() {
                        Ok(parsed) if parsed == expected => {
                            items.push(OrderedItem {
                                number: parsed,
                                marker: number,
                                text,
                            });
                        }
                        _ => {
                            return Err(ConvertError::NonSequentialList {
                                line: index + 1,
                                expected,
                                text: lines[index].to_string(),
                            });
                        }
                    }
                    expected += 1;
                    index += 1;
                }
                blocks.push(Block::OrderedList { items });
            }

            Line::Blank => {
                blocks.push(Block::Blank);
                index += 1;
            }

            Line::Text(text) => {
                match blocks.last_mut() {
                    Some(Block::Paragraph { lines }) => lines.push(text),
                    _ => blocks.push(Block::Paragraph { lines: vec![text] }),
                }
                index += 1;
            }
        }
    }

    Ok(blocks)
}

/// Checks a heading's `#` count against the supported depth.
pub(crate) fn heading_level(
    level: usize,
    heading: &str,
    line_number: usize,
) -> Result<u8, ConvertError> {
    if (1..=MAX_HEADING_LEVEL).contains(&level) {
        Ok(level as u8)
    } else {
        Err(ConvertError::UnsupportedHeadingLevel {
            line: line_number,
            level,
            heading: heading.to_string(),
        })
    }
}
