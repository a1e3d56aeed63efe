use anyhow::Context;
use grid_core::command::{USAGE, parse_line};
use grid_core::{Editor, EditorConfig, Reply};
use std::env;
use std::io::{self, BufRead, Write};

fn print_help() {
    println!(
        r#"Grid editor CLI {}

            Usage:
            grid_cli [config.json]

            Examples:
            cargo run -p grid_cli
            cargo run -p grid_cli -- layout.json
            RUST_LOG=debug cargo run -p grid_cli
        "#,
        grid_core::version()
    );
}

fn repl(editor: &mut Editor, input: impl BufRead, mut out: impl Write) -> anyhow::Result<()> {
    let geometry = editor.board.geometry();
    writeln!(
        out,
        "Grid {0}x{0}, cell size {1}. Type 'help' for commands. 'quit' to exit.",
        geometry.size, geometry.cell_size
    )?;

    let mut lines = input.lines();
    loop {
        write!(out, "grid> ")?;
        out.flush()?;

        let Some(line) = lines.next() else {
            // EOF (Ctrl+D)
            writeln!(out)?;
            break;
        };
        let line = line.context("read command line")?;

        let cmd = match parse_line(&line) {
            Ok(Some(cmd)) => cmd,
            Ok(None) => continue,
            Err(e) => {
                writeln!(out, "{e:#}")?;
                continue;
            }
        };

        match editor.apply(cmd) {
            Reply::Lines(reply) => {
                for l in reply {
                    writeln!(out, "{l}")?;
                }
            }
            Reply::Quit => break,
        }
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();
    let config = match args.get(1).map(String::as_str) {
        Some("-h" | "--help" | "help") => {
            print_help();
            print!("{USAGE}");
            return Ok(());
        }
        Some(path) => EditorConfig::load_json_file(path)
            .with_context(|| format!("load editor config: {path}"))?,
        None => EditorConfig::default(),
    };

    let mut editor = Editor::new(&config);
    log::debug!("starting with {} items", editor.board.len());

    let stdin = io::stdin();
    repl(&mut editor, stdin.lock(), io::stdout())
}

#[cfg(test)]
mod tests {
    use super::*;
    use grid_core::{Cell, ItemId};

    fn session(script: &str) -> anyhow::Result<(Editor, String)> {
        let mut editor = Editor::default();
        let mut out = Vec::new();
        repl(&mut editor, script.as_bytes(), &mut out)?;
        Ok((editor, String::from_utf8(out)?))
    }

    #[test]
    fn drag_session_over_stdin() -> anyhow::Result<()> {
        let (editor, out) = session("grab 1 100 150\nover 275 125\ndrop 275 125\nquit\n")?;

        assert_eq!(
            editor.board.get(ItemId::new(1)).map(|it| it.position),
            Some(Cell::new(5, 2))
        );
        assert!(out.contains("dragging #1"));
        assert!(out.contains("would drop at (5, 2)"));
        assert!(out.contains("moved to (5, 2)"));
        Ok(())
    }

    #[test]
    fn bad_lines_do_not_stop_the_loop() -> anyhow::Result<()> {
        let (editor, out) = session("bogus\ndrop x y\nclear\nlist\n")?;

        assert!(out.contains("unknown command 'bogus'"));
        assert!(out.contains("invalid pointer x 'x'"));
        assert!(out.contains("No items on grid."));
        assert!(editor.board.is_empty());
        Ok(())
    }

    #[test]
    fn eof_ends_session() -> anyhow::Result<()> {
        let (editor, _) = session("add\n")?;
        assert_eq!(editor.board.len(), 4);
        Ok(())
    }
}
