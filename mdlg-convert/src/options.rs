//! Conversion options

use crate::error::ConvertError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Deepest heading level listed in the table of contents, or 0 for no table.
///
/// Level-1 headings are the document title and never appear in the table, so the only useful
/// cutoffs are 0, 2, 3 and 4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct TocLevels(u8);

impl TocLevels {
    pub const ALLOWED: [u8; 4] = [0, 2, 3, 4];
    pub const DISABLED: TocLevels = TocLevels(0);

    pub fn new(levels: u8) -> Result<Self, ConvertError> {
        if Self::ALLOWED.contains(&levels) {
            Ok(Self(levels))
        } else {
            Err(ConvertError::InvalidTocLevels(levels))
        }
    }

    pub fn is_disabled(self) -> bool {
        self.0 == 0
    }

    /// Whether a heading at `level` belongs in the table.
    pub fn includes(self, level: u8) -> bool {
        level >= 2 && level <= self.0
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for TocLevels {
    fn default() -> Self {
        Self(3)
    }
}

impl TryFrom<u8> for TocLevels {
    type Error = ConvertError;

    fn try_from(levels: u8) -> Result<Self, Self::Error> {
        Self::new(levels)
    }
}

impl From<TocLevels> for u8 {
    fn from(levels: TocLevels) -> Self {
        levels.0
    }
}

impl fmt::Display for TocLevels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Knobs recognized by the converter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertOptions {
    /// Maximum heading depth shown in the table of contents
    pub toc_levels: TocLevels,
    /// Render recognized cross-references as anchors (otherwise as plain formatted text)
    pub internal_links: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            toc_levels: TocLevels::default(),
            internal_links: true,
        }
    }
}

impl ConvertOptions {
    pub fn new(toc_levels: TocLevels) -> Self {
        Self {
            toc_levels,
            ..Self::default()
        }
    }

    pub fn with_internal_links(mut self, enabled: bool) -> Self {
        self.internal_links = enabled;
        self
    }
}
