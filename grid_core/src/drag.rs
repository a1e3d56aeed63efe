use serde::{Deserialize, Serialize};

use crate::{Cell, ItemId, Point};

/// Visual affordance reported to the frontend while a drag is in flight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DropEffect {
    #[default]
    None,
    Move,
}

/// At most one in-flight drag gesture.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum DragSession {
    #[default]
    Idle,
    Dragging {
        item: ItemId,
        /// Pointer offset from the item's top-left corner at gesture start.
        grab_offset: Point,
    },
}

impl DragSession {
    pub fn is_dragging(&self) -> bool {
        matches!(self, DragSession::Dragging { .. })
    }

    pub fn subject(&self) -> Option<ItemId> {
        match self {
            DragSession::Idle => None,
            DragSession::Dragging { item, .. } => Some(*item),
        }
    }

    pub fn grab_offset(&self) -> Option<Point> {
        match self {
            DragSession::Idle => None,
            DragSession::Dragging { grab_offset, .. } => Some(*grab_offset),
        }
    }

    /// Move to Idle, returning what was there.
    pub fn finish(&mut self) -> DragSession {
        std::mem::take(self)
    }
}

/// Which point of the dragged item lands in the drop cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropAnchor {
    /// The grabbed point of the item stays under the pointer.
    #[default]
    GrabPoint,
    /// The item's top-left corner goes to the pointer's cell.
    Pointer,
}

impl DropAnchor {
    /// Position the cell mapping is applied to.
    pub fn target(self, pointer: Point, grab_offset: Point) -> Point {
        match self {
            DropAnchor::GrabPoint => pointer - grab_offset,
            DropAnchor::Pointer => pointer,
        }
    }
}

/// Answer to a drag-over event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragOver {
    pub effect: DropEffect,
    /// Cell the dragged item would land on, if a drag is active.
    pub target: Option<Cell>,
}
