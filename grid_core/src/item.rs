use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{Cell, Span};

/// Identity of an item, unique for the lifetime of its board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemId(u64);

impl ItemId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ItemId {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        let raw: u64 = s.parse().with_context(|| format!("invalid item id '{s}'"))?;
        Ok(Self(raw))
    }
}

/// RGBA display color. Written as `#rrggbb` or `#rrggbbaa`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_hex(&self) -> String {
        if self.a == 0xff {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl FromStr for Color {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        let hex = s
            .trim()
            .strip_prefix('#')
            .with_context(|| format!("color '{s}' must start with '#'"))?;

        if !matches!(hex.len(), 6 | 8) || !hex.is_ascii() {
            anyhow::bail!("color '{s}' must be #rrggbb or #rrggbbaa");
        }

        let byte = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .with_context(|| format!("color '{s}' has a bad hex digit"))
        };

        let a = if hex.len() == 8 { byte(6)? } else { 0xff };
        Ok(Self::rgba(byte(0)?, byte(2)?, byte(4)?, a))
    }
}

impl TryFrom<String> for Color {
    type Error = anyhow::Error;

    fn try_from(s: String) -> anyhow::Result<Self> {
        s.parse()
    }
}

impl From<Color> for String {
    fn from(c: Color) -> String {
        c.to_hex()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// A placed rectangle on the grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub id: ItemId,
    pub position: Cell,
    pub span: Span,
    pub label: String,
    pub color: Color,
}

impl Item {
    /// Same item at a new cell; everything else carried over.
    pub fn moved_to(self, position: Cell) -> Self {
        Self { position, ..self }
    }

    /// One-line summary for item listings.
    pub fn describe(&self) -> String {
        format!(
            "{} area of {} x {} at position {}",
            self.label,
            self.span.width(),
            self.span.height(),
            self.position
        )
    }
}

/// Everything the caller chooses when adding an item.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemDraft {
    pub span: Span,
    pub label: String,
    pub color: Color,
}

impl ItemDraft {
    pub fn new(span: Span, label: impl Into<String>, color: Color) -> Self {
        Self {
            span,
            label: label.into(),
            color,
        }
    }
}
