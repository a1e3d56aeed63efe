use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::drag::DropAnchor;
use crate::{CELL_SIZE, Cell, Color, GRID_SIZE, GridGeometry, ItemDraft, Span};

/// Largest grid the editor will lay out; every cell is painted each frame.
pub const MAX_GRID_SIZE: u32 = 256;

/// Editor settings, read once at startup. Every field has a default, so an
/// empty JSON object is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Cells per side.
    pub grid_size: u32,
    /// Side of one cell in surface units (pixels in the GUI).
    pub cell_size: f32,
    pub drop_anchor: DropAnchor,
    pub initial_items: Vec<ItemSeed>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            grid_size: GRID_SIZE,
            cell_size: CELL_SIZE,
            drop_anchor: DropAnchor::default(),
            initial_items: default_items(),
        }
    }
}

/// An item placed on the board at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemSeed {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub label: String,
    pub color: Color,
}

impl ItemSeed {
    pub fn to_draft(&self) -> (Cell, ItemDraft) {
        (
            Cell::new(self.x, self.y),
            ItemDraft::new(
                Span::new(self.width, self.height),
                self.label.clone(),
                self.color,
            ),
        )
    }
}

/// The three items a fresh editor starts with.
pub fn default_items() -> Vec<ItemSeed> {
    let seed = |x, y, width, height, label: &str, color| ItemSeed {
        x,
        y,
        width,
        height,
        label: label.to_string(),
        color,
    };

    vec![
        seed(2, 3, 1, 1, "farm", Color::rgba(0xff, 0x27, 0x27, 0xff)),
        seed(5, 5, 2, 1, "death", Color::rgb(0x4e, 0xcd, 0xc4)),
        seed(7, 1, 2, 2, "minecraft", Color::rgb(0x45, 0xb7, 0xd1)),
    ]
}

impl EditorConfig {
    pub fn geometry(&self) -> GridGeometry {
        GridGeometry::new(self.grid_size, self.cell_size)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if !(1..=MAX_GRID_SIZE).contains(&self.grid_size) {
            anyhow::bail!(
                "grid_size must be in 1..={MAX_GRID_SIZE}, got {}",
                self.grid_size
            );
        }
        if !self.cell_size.is_finite() || self.cell_size <= 0.0 {
            anyhow::bail!("cell_size must be a positive number, got {}", self.cell_size);
        }
        if !self.geometry().extent().is_finite() {
            anyhow::bail!(
                "grid of {0}x{0} cells of size {1} is too large to lay out",
                self.grid_size,
                self.cell_size
            );
        }

        for (i, seed) in self.initial_items.iter().enumerate() {
            if seed.width == 0 || seed.height == 0 {
                anyhow::bail!(
                    "initial item {} '{}' has an empty size {}x{}",
                    i,
                    seed.label,
                    seed.width,
                    seed.height
                );
            }
            if seed.x >= self.grid_size || seed.y >= self.grid_size {
                log::warn!(
                    "initial item {} '{}' at ({}, {}) is outside the grid and will be clamped",
                    i,
                    seed.label,
                    seed.x,
                    seed.y
                );
            }
        }

        Ok(())
    }

    pub fn from_json_str(text: &str) -> anyhow::Result<Self> {
        let cfg = serde_json::from_str::<EditorConfig>(text).context("parse editor config json")?;
        cfg.validate().context("validate editor config")?;
        Ok(cfg)
    }

    /// Load and validate a config file.
    pub fn load_json_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path.as_ref()).context("read editor config file")?;
        Self::from_json_str(&text)
    }
}
