use crate::drag::{DragOver, DragSession, DropAnchor, DropEffect};
use crate::{Cell, EditorConfig, GridGeometry, Item, ItemDraft, ItemId, Point};

/// The grid editor state: an ordered item list plus the drag session.
///
/// Every operation is total. Positions are clamped instead of rejected, and
/// gestures that refer to nothing are ignored.
#[derive(Debug, Clone)]
pub struct Board {
    geometry: GridGeometry,
    anchor: DropAnchor,
    items: Vec<Item>,
    next_id: u64,
    drag: DragSession,
}

impl Default for Board {
    fn default() -> Self {
        Self::from_config(&EditorConfig::default())
    }
}

impl Board {
    /// An empty board.
    pub fn new(geometry: GridGeometry) -> Self {
        Self {
            geometry,
            anchor: DropAnchor::default(),
            items: Vec::new(),
            next_id: 1,
            drag: DragSession::Idle,
        }
    }

    /// A board laid out from the configured geometry and seeded items.
    /// Seeds receive identities 1.. in order.
    pub fn from_config(cfg: &EditorConfig) -> Self {
        let mut board = Self::new(cfg.geometry()).with_anchor(cfg.drop_anchor);
        for seed in &cfg.initial_items {
            let (position, draft) = seed.to_draft();
            board.insert(position, draft);
        }
        board
    }

    pub fn with_anchor(mut self, anchor: DropAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn geometry(&self) -> GridGeometry {
        self.geometry
    }

    pub fn anchor(&self) -> DropAnchor {
        self.anchor
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|it| it.id == id)
    }

    pub fn drag(&self) -> &DragSession {
        &self.drag
    }

    /// Top-left corner of an item in surface units.
    pub fn item_origin(&self, item: &Item) -> Point {
        self.geometry.cell_origin(item.position)
    }

    fn issue_id(&mut self) -> ItemId {
        let id = ItemId::new(self.next_id);
        self.next_id += 1;
        id
    }

    fn insert(&mut self, position: Cell, draft: ItemDraft) -> ItemId {
        let id = self.issue_id();
        self.items.push(Item {
            id,
            position: self.geometry.clamp(position),
            span: draft.span,
            label: draft.label,
            color: draft.color,
        });
        id
    }

    /// Append a new item at (0, 0).
    pub fn add(&mut self, draft: ItemDraft) -> ItemId {
        let id = self.insert(Cell::ORIGIN, draft);
        log::info!("added item {id}");
        id
    }

    /// Remove one item by identity. Unknown ids are ignored.
    pub fn remove(&mut self, id: ItemId) -> bool {
        let before = self.items.len();
        self.items.retain(|it| it.id != id);
        let removed = self.items.len() != before;

        if removed {
            if self.drag.subject() == Some(id) {
                self.drag.finish();
            }
            log::info!("removed item {id}");
        }
        removed
    }

    pub fn clear(&mut self) {
        if !self.items.is_empty() {
            log::info!("cleared {} items", self.items.len());
        }
        self.items.clear();
        self.drag.finish();
    }

    /// Start dragging `id`, recording where on the item it was grabbed.
    /// Returns the allowed effect, or `None` when `id` is not on the board.
    pub fn begin_drag(&mut self, id: ItemId, pointer: Point) -> Option<DropEffect> {
        let origin = self.item_origin(self.get(id)?);
        let grab_offset = pointer - origin;

        self.drag = DragSession::Dragging {
            item: id,
            grab_offset,
        };
        log::debug!("drag start item={id} offset=({}, {})", grab_offset.x, grab_offset.y);
        Some(DropEffect::Move)
    }

    /// The surface always accepts a drop; while dragging, also report the
    /// cell the item would land on.
    pub fn drag_over(&self, pointer: Point) -> DragOver {
        let target = self
            .drag
            .grab_offset()
            .map(|offset| self.geometry.cell_at(self.anchor.target(pointer, offset)));

        DragOver {
            effect: DropEffect::Move,
            target,
        }
    }

    /// Finish the drag by moving its item to the cell under `pointer`.
    /// Returns the new cell when an item moved.
    pub fn drop_at(&mut self, pointer: Point) -> Option<Cell> {
        let DragSession::Dragging { item, grab_offset } = self.drag.finish() else {
            log::debug!("drop with no drag in progress");
            return None;
        };

        let cell = self
            .geometry
            .cell_at(self.anchor.target(pointer, grab_offset));

        if self.replace_position(item, cell) {
            log::info!("moved item {item} to {cell}");
            Some(cell)
        } else {
            None
        }
    }

    /// Abandon the drag; nothing moves.
    pub fn end_drag(&mut self) {
        if let Some(id) = self.drag.finish().subject() {
            log::debug!("drag of item {id} ended without drop");
        }
    }

    fn replace_position(&mut self, id: ItemId, cell: Cell) -> bool {
        let mut found = false;
        self.items = std::mem::take(&mut self.items)
            .into_iter()
            .map(|it| {
                if it.id == id {
                    found = true;
                    it.moved_to(cell)
                } else {
                    it
                }
            })
            .collect();
        found
    }
}
