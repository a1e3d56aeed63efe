use crate::command::Command;
use crate::drag::DropEffect;
use crate::{Board, EditorConfig, ItemKind, Selection, color_for_label};

/// Board plus the add controls. Both frontends drive one of these.
#[derive(Debug, Clone, Default)]
pub struct Editor {
    pub board: Board,
    pub selection: Selection,
}

pub const EMPTY_BOARD_HINT: &str = r#"No items on grid. Click "Add Square" to add one."#;

/// What a command did, in words the CLI can print.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Lines(Vec<String>),
    Quit,
}

impl Editor {
    pub fn new(cfg: &EditorConfig) -> Self {
        Self {
            board: Board::from_config(cfg),
            selection: Selection::default(),
        }
    }

    /// Add an item from the current selection.
    pub fn add_selected(&mut self) -> crate::ItemId {
        self.board.add(self.selection.draft())
    }

    /// Item summaries, or the empty-board hint.
    pub fn listing(&self) -> Vec<String> {
        if self.board.is_empty() {
            return vec![EMPTY_BOARD_HINT.to_string()];
        }
        self.board
            .items()
            .iter()
            .map(|it| format!("#{} {} [{}]", it.id, it.describe(), it.color))
            .collect()
    }

    pub fn apply(&mut self, cmd: Command) -> Reply {
        let line = |s: String| Reply::Lines(vec![s]);

        match cmd {
            Command::Help => {
                Reply::Lines(crate::command::USAGE.lines().map(str::to_string).collect())
            }
            Command::List => Reply::Lines(self.listing()),
            Command::Kinds => Reply::Lines(
                ItemKind::ALL
                    .iter()
                    .map(|k| format!("{:<18}{}", k.label(), k.color()))
                    .collect(),
            ),
            Command::Size { width, height } => {
                self.selection.set_span(width, height);
                let span = self.selection.span();
                line(format!("next item: {} x {}", span.width(), span.height()))
            }
            Command::Kind(label) => {
                let known = ItemKind::from_label(&label);
                match known {
                    Some(kind) => self.selection.set_kind(kind),
                    None => self.selection.label = label,
                }
                let note = if known.is_some() { "" } else { " (custom type)" };
                line(format!(
                    "next item: '{}' {}{}",
                    self.selection.label,
                    color_for_label(&self.selection.label),
                    note
                ))
            }
            Command::Add => {
                let id = self.add_selected();
                line(format!("added #{id}"))
            }
            Command::Grab { item, at } => match self.board.begin_drag(item, at) {
                Some(DropEffect::Move) => line(format!("dragging #{item}")),
                _ => line(format!("no item #{item}")),
            },
            Command::Over(at) => match self.board.drag_over(at).target {
                Some(cell) => line(format!("would drop at {cell}")),
                None => line("not dragging".to_string()),
            },
            Command::Drop(at) => match self.board.drop_at(at) {
                Some(cell) => line(format!("moved to {cell}")),
                None => line("nothing to drop".to_string()),
            },
            Command::Cancel => {
                self.board.end_drag();
                line("drag cancelled".to_string())
            }
            Command::Remove(id) => {
                if self.board.remove(id) {
                    line(format!("removed #{id}"))
                } else {
                    line(format!("no item #{id}"))
                }
            }
            Command::Clear => {
                self.board.clear();
                line("cleared".to_string())
            }
            Command::Quit => Reply::Quit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::parse_line;
    use crate::{Cell, Color, ItemId, Span};

    fn run(ed: &mut Editor, script: &str) -> anyhow::Result<Vec<Reply>> {
        let mut out = Vec::new();
        for l in script.lines() {
            if let Some(cmd) = parse_line(l)? {
                out.push(ed.apply(cmd));
            }
        }
        Ok(out)
    }

    #[test]
    fn scripted_drag_moves_item() -> anyhow::Result<()> {
        let mut ed = Editor::default();
        run(&mut ed, "grab 2 250 250\nover 275 125\ndrop 275 125")?;
        assert_eq!(ed.board.get(ItemId::new(2)).unwrap().position, Cell::new(5, 2));
        Ok(())
    }

    #[test]
    fn add_uses_selection() -> anyhow::Result<()> {
        let mut ed = Editor::default();
        run(&mut ed, "size 3 2\nkind communication\nadd")?;

        let it = ed.board.items().last().unwrap();
        assert_eq!(it.span, Span::new(3, 2));
        assert_eq!(it.label, "communication");
        assert_eq!(it.color, "#f1ff27ff".parse::<Color>()?);
        assert_eq!(it.position, Cell::ORIGIN);
        Ok(())
    }

    #[test]
    fn custom_kind_gets_fallback_color() -> anyhow::Result<()> {
        let mut ed = Editor::default();
        run(&mut ed, "kind cargo hold\nadd")?;
        let it = ed.board.items().last().unwrap();
        assert_eq!(it.label, "cargo hold");
        assert_eq!(it.color, "#8827ffff".parse::<Color>()?);
        Ok(())
    }

    #[test]
    fn listing_reports_empty_board() -> anyhow::Result<()> {
        let mut ed = Editor::default();
        assert_eq!(ed.listing().len(), 3);
        run(&mut ed, "clear")?;
        assert_eq!(ed.listing(), vec![EMPTY_BOARD_HINT.to_string()]);
        Ok(())
    }

    #[test]
    fn quit_is_reported() -> anyhow::Result<()> {
        let mut ed = Editor::default();
        let replies = run(&mut ed, "remove 1\nquit")?;
        assert_eq!(replies.last(), Some(&Reply::Quit));
        assert!(ed.board.get(ItemId::new(1)).is_none());
        Ok(())
    }
}
