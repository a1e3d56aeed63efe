use anyhow::Context;
use eframe::egui;
use grid_core::{
    Board, DropEffect, EMPTY_BOARD_HINT, Editor, EditorConfig, GridGeometry, Item, ItemId, ItemKind,
    MAX_SPAN, Point,
};

const TITLE: &str = "Umacord at 25:00";

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config_path = std::env::args().nth(1);
    let config = load_config(config_path.as_deref());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([760.0, 920.0]),
        ..Default::default()
    };
    eframe::run_native(
        TITLE,
        options,
        Box::new(move |_cc| Ok(Box::new(GridApp::new(config, config_path)))),
    )
}

/// A config that cannot be loaded is logged and replaced by the defaults.
fn load_config(path: Option<&str>) -> EditorConfig {
    let Some(path) = path else {
        return EditorConfig::default();
    };

    match EditorConfig::load_json_file(path).with_context(|| format!("load editor config: {path}"))
    {
        Ok(cfg) => {
            log::info!("loaded editor config from {path}");
            cfg
        }
        Err(e) => {
            log::error!("{e:#}; falling back to defaults");
            EditorConfig::default()
        }
    }
}

/// Pointer gestures collected while painting, applied once the frame's
/// item loop is done.
enum Gesture {
    Grab(ItemId, Point),
    Release(egui::Pos2),
    /// Drag stopped with no known pointer position.
    Cancel,
    Remove(ItemId),
}

/// Apply one gesture to the board. A release inside the grid drops, a
/// release anywhere else cancels. Returns the effect of a started drag.
fn apply_gesture(board: &mut Board, grid_rect: egui::Rect, gesture: Gesture) -> Option<DropEffect> {
    match gesture {
        Gesture::Grab(id, at) => return board.begin_drag(id, at),
        Gesture::Release(p) => {
            if grid_rect.contains(p) {
                board.drop_at(to_grid(grid_rect.min, p));
            }
            board.end_drag();
        }
        Gesture::Cancel => board.end_drag(),
        Gesture::Remove(id) => {
            board.remove(id);
        }
    }
    None
}

struct GridApp {
    editor: Editor,
    config_path: Option<String>,
}

impl GridApp {
    fn new(config: EditorConfig, config_path: Option<String>) -> Self {
        Self {
            editor: Editor::new(&config),
            config_path,
        }
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal_wrapped(|ui| {
            if ui.button("Add Square").clicked() {
                self.editor.add_selected();
            }

            let span = self.editor.selection.span();
            let (mut width, mut height) = (span.width(), span.height());

            ui.label("Horizontal dimension:");
            span_picker(ui, "width", &mut width);
            ui.label("Vertical dimension:");
            span_picker(ui, "height", &mut height);
            self.editor.selection.set_span(width, height);

            ui.label("Type:");
            let current = self.editor.selection.kind();
            egui::ComboBox::from_id_salt("kind")
                .selected_text(self.editor.selection.label.clone())
                .show_ui(ui, |ui| {
                    for kind in ItemKind::ALL {
                        if ui
                            .selectable_label(current == Some(kind), kind.label())
                            .clicked()
                        {
                            self.editor.selection.set_kind(kind);
                        }
                    }
                });

            if ui.button("Clear All").clicked() {
                self.editor.board.clear();
            }

            ui.weak("Drag and drop squares to move them around the grid");
        });
    }

    fn grid(&mut self, ui: &mut egui::Ui) {
        let geometry = self.editor.board.geometry();
        let extent = geometry.extent();
        let (grid_rect, _) =
            ui.allocate_exact_size(egui::vec2(extent, extent), egui::Sense::hover());
        let origin = grid_rect.min;
        let painter = ui.painter().clone();

        painter.rect_filled(grid_rect, 0.0, ui.visuals().extreme_bg_color);
        let line = egui::Stroke::new(1.0, ui.visuals().widgets.noninteractive.bg_stroke.color);
        for row in 0..geometry.size {
            for col in 0..geometry.size {
                let rect = span_rect(origin, geometry, grid_core::Cell::new(col, row), 1, 1);
                painter.rect_stroke(rect, 0.0, line);
            }
        }

        let mut gestures = Vec::new();
        for item in self.editor.board.items() {
            let rect = item_rect(origin, geometry, item);
            let response = ui.interact(
                rect,
                egui::Id::new(("grid_item", item.id.get())),
                egui::Sense::click_and_drag(),
            );

            let fill = color32(item.color);
            painter.rect_filled(rect.shrink(1.0), 4.0, fill);
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                &item.label,
                egui::FontId::proportional(13.0),
                text_color(fill),
            );

            let pointer = response
                .interact_pointer_pos()
                .or_else(|| ui.input(|i| i.pointer.latest_pos()));

            if response.double_clicked() {
                gestures.push(Gesture::Remove(item.id));
            } else if response.drag_started() {
                if let Some(p) = pointer {
                    gestures.push(Gesture::Grab(item.id, to_grid(origin, p)));
                }
            }
            if response.drag_stopped() {
                gestures.push(pointer.map_or(Gesture::Cancel, Gesture::Release));
            }
            if response.hovered() && !self.editor.board.drag().is_dragging() {
                ui.ctx().set_cursor_icon(egui::CursorIcon::Grab);
            }
        }

        for gesture in gestures {
            if apply_gesture(&mut self.editor.board, grid_rect, gesture) == Some(DropEffect::Move) {
                ui.ctx().set_cursor_icon(egui::CursorIcon::Grabbing);
            }
        }

        self.drag_feedback(ui, &painter, origin, grid_rect);
    }

    /// Drop preview and a ghost of the dragged item under the pointer.
    fn drag_feedback(
        &self,
        ui: &egui::Ui,
        painter: &egui::Painter,
        origin: egui::Pos2,
        grid_rect: egui::Rect,
    ) {
        let board = &self.editor.board;
        let (Some(id), Some(offset)) = (board.drag().subject(), board.drag().grab_offset()) else {
            return;
        };
        let Some(item) = board.get(id) else {
            return;
        };
        let Some(pos) = ui.input(|i| i.pointer.hover_pos()) else {
            return;
        };

        ui.ctx().set_cursor_icon(egui::CursorIcon::Grabbing);
        let geometry = board.geometry();
        let size = item_rect(origin, geometry, item).size();

        if grid_rect.contains(pos) {
            let over = board.drag_over(to_grid(origin, pos));
            if let Some(cell) = over.target {
                let target = span_rect(
                    origin,
                    geometry,
                    cell,
                    item.span.width(),
                    item.span.height(),
                );
                painter.rect_stroke(target, 4.0, egui::Stroke::new(2.0, color32(item.color)));
            }
        }

        let ghost = egui::Rect::from_min_size(pos - egui::vec2(offset.x, offset.y), size);
        painter.rect_filled(ghost, 4.0, color32(item.color).gamma_multiply(0.5));
    }

    fn items_list(&self, ui: &mut egui::Ui) {
        ui.heading("Items on Grid:");
        let items = self.editor.board.items();
        if items.is_empty() {
            ui.label(EMPTY_BOARD_HINT);
            return;
        }
        for item in items {
            ui.colored_label(color32(item.color), item.describe());
        }
    }
}

impl eframe::App for GridApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("top").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(TITLE);
                if let Some(path) = &self.config_path {
                    ui.separator();
                    ui.label(format!("Config: {path}"));
                }
            });
            self.controls(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::both().show(ui, |ui| {
                self.grid(ui);
                ui.add_space(12.0);
                self.items_list(ui);
            });
        });
    }
}

fn span_picker(ui: &mut egui::Ui, salt: &str, value: &mut u32) {
    egui::ComboBox::from_id_salt(salt)
        .selected_text(value.to_string())
        .show_ui(ui, |ui| {
            for n in 1..=MAX_SPAN {
                ui.selectable_value(value, n, n.to_string());
            }
        });
}

fn to_grid(origin: egui::Pos2, p: egui::Pos2) -> Point {
    Point::new(p.x - origin.x, p.y - origin.y)
}

fn span_rect(
    origin: egui::Pos2,
    geometry: GridGeometry,
    cell: grid_core::Cell,
    width: u32,
    height: u32,
) -> egui::Rect {
    let corner = geometry.cell_origin(cell);
    egui::Rect::from_min_size(
        origin + egui::vec2(corner.x, corner.y),
        egui::vec2(
            width as f32 * geometry.cell_size,
            height as f32 * geometry.cell_size,
        ),
    )
}

// items may extend past the grid edge
fn item_rect(origin: egui::Pos2, geometry: GridGeometry, item: &Item) -> egui::Rect {
    span_rect(
        origin,
        geometry,
        item.position,
        item.span.width(),
        item.span.height(),
    )
}

fn color32(c: grid_core::Color) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(c.r, c.g, c.b, c.a)
}

fn text_color(fill: egui::Color32) -> egui::Color32 {
    let luma = 0.299 * fill.r() as f32 + 0.587 * fill.g() as f32 + 0.114 * fill.b() as f32;
    if luma > 150.0 {
        egui::Color32::BLACK
    } else {
        egui::Color32::WHITE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grid_core::{Cell, Color, DragSession, Span};

    // grid drawn at (20, 80) on screen, 500x500
    fn grid_rect() -> egui::Rect {
        egui::Rect::from_min_size(egui::pos2(20.0, 80.0), egui::vec2(500.0, 500.0))
    }

    fn grab_farm(board: &mut Board) -> Option<DropEffect> {
        // farm sits at (2, 3); grab its top-left corner
        apply_gesture(board, grid_rect(), Gesture::Grab(ItemId::new(1), Point::new(100.0, 150.0)))
    }

    #[test]
    fn release_inside_grid_drops() {
        let mut board = Board::default();
        assert_eq!(grab_farm(&mut board), Some(DropEffect::Move));

        apply_gesture(&mut board, grid_rect(), Gesture::Release(egui::pos2(295.0, 205.0)));

        assert_eq!(board.get(ItemId::new(1)).unwrap().position, Cell::new(5, 2));
        assert_eq!(*board.drag(), DragSession::Idle);
    }

    #[test]
    fn release_outside_grid_cancels() {
        let mut board = Board::default();
        grab_farm(&mut board);

        let outside = egui::pos2(600.0, 205.0);
        assert_eq!(apply_gesture(&mut board, grid_rect(), Gesture::Release(outside)), None);

        assert_eq!(board.get(ItemId::new(1)).unwrap().position, Cell::new(2, 3));
        assert_eq!(*board.drag(), DragSession::Idle);

        // a later release inside finds no drag to complete
        apply_gesture(&mut board, grid_rect(), Gesture::Release(egui::pos2(295.0, 205.0)));
        assert_eq!(board.get(ItemId::new(1)).unwrap().position, Cell::new(2, 3));
    }

    #[test]
    fn release_without_pointer_cancels() {
        let mut board = Board::default();
        grab_farm(&mut board);

        apply_gesture(&mut board, grid_rect(), Gesture::Cancel);
        assert_eq!(*board.drag(), DragSession::Idle);

        apply_gesture(&mut board, grid_rect(), Gesture::Release(egui::pos2(295.0, 205.0)));
        assert_eq!(board.get(ItemId::new(1)).unwrap().position, Cell::new(2, 3));
    }

    #[test]
    fn remove_drops_exactly_one_item() {
        let mut board = Board::default();
        apply_gesture(&mut board, grid_rect(), Gesture::Remove(ItemId::new(2)));

        let left: Vec<_> = board.items().iter().map(|it| it.id.get()).collect();
        assert_eq!(left, vec![1, 3]);
    }

    #[test]
    fn screen_pointer_becomes_grid_relative() {
        let p = to_grid(egui::pos2(20.0, 80.0), egui::pos2(295.0, 205.0));
        assert_eq!(p, Point::new(275.0, 125.0));
        assert_eq!(GridGeometry::default().cell_at(p), Cell::new(5, 2));
    }

    #[test]
    fn item_rect_follows_span_and_may_overflow() {
        let item = Item {
            id: ItemId::new(1),
            position: Cell::new(9, 9),
            span: Span::new(3, 2),
            label: "dock".into(),
            color: Color::rgb(0, 0, 0),
        };
        let rect = item_rect(egui::Pos2::ZERO, GridGeometry::default(), &item);
        assert_eq!(rect.min, egui::pos2(450.0, 450.0));
        assert_eq!(rect.size(), egui::vec2(150.0, 100.0));
    }

    #[test]
    fn labels_stay_readable() {
        assert_eq!(text_color(egui::Color32::from_rgb(0xf1, 0xff, 0x27)), egui::Color32::BLACK);
        assert_eq!(text_color(egui::Color32::from_rgb(0x88, 0x27, 0xff)), egui::Color32::WHITE);
    }
}
