// grid_core/src/command.rs
use anyhow::Context;

use crate::{ItemId, Point};

/// One line of the text gesture language.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Help,
    List,
    Kinds,
    Size { width: u32, height: u32 },
    Kind(String),
    Add,
    Grab { item: ItemId, at: Point },
    Over(Point),
    Drop(Point),
    Cancel,
    Remove(ItemId),
    Clear,
    Quit,
}

pub const USAGE: &str = r#"Commands:
    list                  (items on the grid)
    kinds                 (item types and colors)
    size <w> <h>          (size for the next add, 1..6)
    kind <name...>        (type for the next add)
    add                   (add an item at (0, 0))
    grab <id> <px> <py>   (start dragging, pointer in grid units)
    over <px> <py>        (preview the drop cell)
    drop <px> <py>        (drop the dragged item)
    cancel                (end the drag without dropping)
    remove <id>
    clear
    quit
"#;

fn number<T: std::str::FromStr>(parts: &[&str], i: usize, what: &str) -> anyhow::Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw = parts.get(i).with_context(|| format!("missing {what}"))?;
    raw.parse::<T>().with_context(|| format!("invalid {what} '{raw}'"))
}

fn point(parts: &[&str], i: usize) -> anyhow::Result<Point> {
    Ok(Point::new(
        number(parts, i, "pointer x")?,
        number(parts, i + 1, "pointer y")?,
    ))
}

fn expect_len(parts: &[&str], n: usize, usage: &str) -> anyhow::Result<()> {
    if parts.len() != n {
        anyhow::bail!("usage: {usage}");
    }
    Ok(())
}

/// Parse one input line. Blank lines yield `None`.
pub fn parse_line(line: &str) -> anyhow::Result<Option<Command>> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let Some(first) = parts.first() else {
        return Ok(None);
    };

    let cmd = match first.to_lowercase().as_str() {
        "help" | "?" => Command::Help,
        "list" | "ls" => Command::List,
        "kinds" => Command::Kinds,
        "size" => {
            expect_len(&parts, 3, "size <w> <h>")?;
            Command::Size {
                width: number(&parts, 1, "width")?,
                height: number(&parts, 2, "height")?,
            }
        }
        "kind" => {
            if parts.len() < 2 {
                anyhow::bail!("usage: kind <name...>");
            }
            Command::Kind(parts[1..].join(" "))
        }
        "add" => Command::Add,
        "grab" => {
            expect_len(&parts, 4, "grab <id> <px> <py>")?;
            Command::Grab {
                item: parts[1].parse()?,
                at: point(&parts, 2)?,
            }
        }
        "over" => {
            expect_len(&parts, 3, "over <px> <py>")?;
            Command::Over(point(&parts, 1)?)
        }
        "drop" => {
            expect_len(&parts, 3, "drop <px> <py>")?;
            Command::Drop(point(&parts, 1)?)
        }
        "cancel" => Command::Cancel,
        "remove" | "rm" => {
            expect_len(&parts, 2, "remove <id>")?;
            Command::Remove(parts[1].parse()?)
        }
        "clear" => Command::Clear,
        "quit" | "exit" => Command::Quit,
        other => anyhow::bail!("unknown command '{other}' (try 'help')"),
    };

    Ok(Some(cmd))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_line_is_nothing() -> anyhow::Result<()> {
        assert_eq!(parse_line("   ")?, None);
        Ok(())
    }

    #[test]
    fn gestures_parse() -> anyhow::Result<()> {
        assert_eq!(
            parse_line("grab 3 130 170.5")?,
            Some(Command::Grab {
                item: ItemId::new(3),
                at: Point::new(130.0, 170.5),
            })
        );
        assert_eq!(
            parse_line("DROP 275 -10")?,
            Some(Command::Drop(Point::new(275.0, -10.0)))
        );
        assert_eq!(parse_line("over 1 2")?, Some(Command::Over(Point::new(1.0, 2.0))));
        assert_eq!(parse_line("cancel")?, Some(Command::Cancel));
        assert_eq!(parse_line("rm 2")?, Some(Command::Remove(ItemId::new(2))));
        Ok(())
    }

    #[test]
    fn controls_parse() -> anyhow::Result<()> {
        assert_eq!(
            parse_line("size 2 3")?,
            Some(Command::Size { width: 2, height: 3 })
        );
        assert_eq!(
            parse_line("kind resting bay")?,
            Some(Command::Kind("resting bay".into()))
        );
        assert_eq!(parse_line("add")?, Some(Command::Add));
        assert_eq!(parse_line("exit")?, Some(Command::Quit));
        Ok(())
    }

    #[test]
    fn bad_input_is_an_error() {
        for bad in ["grab 1 2", "grab x 1 2", "drop a b", "size 1", "kind", "frobnicate"] {
            assert!(parse_line(bad).is_err(), "{bad} should not parse");
        }
    }
}
