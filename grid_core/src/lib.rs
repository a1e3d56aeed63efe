pub mod board;
pub mod command;
pub mod config;
pub mod drag;
pub mod editor;
pub mod geometry;
pub mod item;
pub mod kind;

pub use board::Board;
pub use config::{EditorConfig, ItemSeed, MAX_GRID_SIZE, default_items};
pub use drag::{DragOver, DragSession, DropAnchor, DropEffect};
pub use editor::{EMPTY_BOARD_HINT, Editor, Reply};
pub use geometry::{CELL_SIZE, Cell, GRID_SIZE, GridGeometry, Point, Span};
pub use item::{Color, Item, ItemDraft, ItemId};
pub use kind::{ItemKind, MAX_SPAN, Selection, color_for_label};

pub fn version() -> &'static str {
    "0.1.0"
}
