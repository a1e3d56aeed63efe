use std::fmt;

use crate::{Color, ItemDraft, Span};

/// Largest width/height offered by the add controls.
pub const MAX_SPAN: u32 = 6;

/// The catalogue of item kinds offered when adding an item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ItemKind {
    #[default]
    FoodStorage,
    WasteManagement,
    Communication,
    Farm,
    RestingBay,
    Entertainment,
}

impl ItemKind {
    pub const ALL: [ItemKind; 6] = [
        ItemKind::FoodStorage,
        ItemKind::WasteManagement,
        ItemKind::Communication,
        ItemKind::Farm,
        ItemKind::RestingBay,
        ItemKind::Entertainment,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ItemKind::FoodStorage => "food storage",
            ItemKind::WasteManagement => "waste management",
            ItemKind::Communication => "communication",
            ItemKind::Farm => "farm",
            ItemKind::RestingBay => "resting bay",
            ItemKind::Entertainment => "entertainment",
        }
    }

    pub fn color(self) -> Color {
        match self {
            ItemKind::FoodStorage => Color::rgba(0xff, 0x27, 0x27, 0xff),
            ItemKind::WasteManagement => Color::rgba(0xff, 0x9a, 0x27, 0xff),
            ItemKind::Communication => Color::rgba(0xf1, 0xff, 0x27, 0xff),
            ItemKind::Farm => Color::rgba(0x40, 0xff, 0x27, 0xff),
            ItemKind::RestingBay => Color::rgba(0x27, 0x93, 0xff, 0xff),
            ItemKind::Entertainment => Color::rgba(0x88, 0x27, 0xff, 0xff),
        }
    }

    /// Case-insensitive lookup by label; inner whitespace is normalized.
    pub fn from_label(label: &str) -> Option<Self> {
        let wanted = label.split_whitespace().collect::<Vec<_>>().join(" ");
        Self::ALL
            .into_iter()
            .find(|k| k.label().eq_ignore_ascii_case(&wanted))
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Color for a free-form label. Anything outside the catalogue gets the
/// entertainment color.
pub fn color_for_label(label: &str) -> Color {
    ItemKind::from_label(label)
        .unwrap_or(ItemKind::Entertainment)
        .color()
}

/// Current state of the add controls: size pickers plus the type label.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    span: Span,
    pub label: String,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            span: Span::default(),
            label: ItemKind::default().label().to_string(),
        }
    }
}

impl Selection {
    pub fn span(&self) -> Span {
        self.span
    }

    /// Set the size, each side kept in `1..=MAX_SPAN`.
    pub fn set_span(&mut self, width: u32, height: u32) {
        self.span = Span::new(width.min(MAX_SPAN), height.min(MAX_SPAN));
    }

    pub fn set_kind(&mut self, kind: ItemKind) {
        self.label = kind.label().to_string();
    }

    pub fn kind(&self) -> Option<ItemKind> {
        ItemKind::from_label(&self.label)
    }

    pub fn color(&self) -> Color {
        color_for_label(&self.label)
    }

    pub fn draft(&self) -> ItemDraft {
        ItemDraft::new(self.span, self.label.clone(), self.color())
    }
}
