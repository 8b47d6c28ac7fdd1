//! Line-oriented board session
//!
//! Each input line is one user event. Timers are polled before every event
//! and finished exit transitions are settled after it.

use crate::application::ports::{NoteStore, QuoteSource};
use crate::application::{settle_deletions, BoardSession};
use crate::cli::output::format_note_list;
use crate::domain::{GestureTarget, NoteId, Position, Size, SortOrder};
use crate::error::Result;
use crate::infrastructure::{HeadlessRenderer, JsonFileExporter};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::time::Instant;

const HELP: &str = "\
commands:
  new X Y TEXT            create a note
  edit ID TEXT            replace a note's text
  grab ID PX PY [TARGET]  press on a note (body, content, delete, quote)
  drag ID PX PY           move the pointer while grabbing
  drop ID                 release the pointer
  delete ID               delete a note
  sort asc|desc           sort by creation time and cascade
  quote ID                append a quote
  resize W H              change the board size
  list                    show notes
  export FILE             write notes as JSON
  save                    save now
  quit                    save and leave";

/// One parsed session event
#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    New { x: f64, y: f64, content: String },
    Edit { id: String, content: String },
    Grab { id: String, pointer: Position, target: GestureTarget },
    Drag { id: String, pointer: Position },
    Drop { id: String },
    Delete { id: String },
    Sort(SortOrder),
    Quote { id: String },
    Resize(Size),
    List,
    Export(PathBuf),
    Save,
    Help,
    Quit,
}

/// Parse one input line. Blank lines and `#` comments yield `None`.
pub fn parse_command(line: &str) -> std::result::Result<Option<SessionCommand>, String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (verb, rest) = split_word(line);
    let command = match verb.to_lowercase().as_str() {
        "new" => {
            let (x, rest) = split_number(rest, "X")?;
            let (y, rest) = split_number(rest, "Y")?;
            SessionCommand::New {
                x,
                y,
                content: rest.to_string(),
            }
        }
        "edit" => {
            let (id, rest) = split_required(rest, "ID")?;
            SessionCommand::Edit {
                id: id.to_string(),
                content: rest.to_string(),
            }
        }
        "grab" => {
            let (id, rest) = split_required(rest, "ID")?;
            let (px, rest) = split_number(rest, "PX")?;
            let (py, rest) = split_number(rest, "PY")?;
            let target = match rest.trim() {
                "" => GestureTarget::Body,
                other => other.parse()?,
            };
            SessionCommand::Grab {
                id: id.to_string(),
                pointer: Position::new(px, py),
                target,
            }
        }
        "drag" => {
            let (id, rest) = split_required(rest, "ID")?;
            let (px, rest) = split_number(rest, "PX")?;
            let (py, _) = split_number(rest, "PY")?;
            SessionCommand::Drag {
                id: id.to_string(),
                pointer: Position::new(px, py),
            }
        }
        "drop" => SessionCommand::Drop {
            id: split_required(rest, "ID")?.0.to_string(),
        },
        "delete" => SessionCommand::Delete {
            id: split_required(rest, "ID")?.0.to_string(),
        },
        "sort" => {
            let order = match rest.trim() {
                "" => SortOrder::Ascending,
                other => other.parse()?,
            };
            SessionCommand::Sort(order)
        }
        "quote" => SessionCommand::Quote {
            id: split_required(rest, "ID")?.0.to_string(),
        },
        "resize" => {
            let (width, rest) = split_number(rest, "W")?;
            let (height, _) = split_number(rest, "H")?;
            SessionCommand::Resize(Size::new(width, height))
        }
        "list" => SessionCommand::List,
        "export" => {
            let path = rest.trim();
            if path.is_empty() {
                return Err("missing FILE".to_string());
            }
            SessionCommand::Export(PathBuf::from(path))
        }
        "save" => SessionCommand::Save,
        "help" | "?" => SessionCommand::Help,
        "quit" | "exit" => SessionCommand::Quit,
        other => return Err(format!("unknown command '{}' (try 'help')", other)),
    };

    Ok(Some(command))
}

fn split_word(input: &str) -> (&str, &str) {
    let input = input.trim_start();
    match input.find(char::is_whitespace) {
        Some(idx) => (&input[..idx], input[idx..].trim_start()),
        None => (input, ""),
    }
}

fn split_required<'a>(
    input: &'a str,
    name: &str,
) -> std::result::Result<(&'a str, &'a str), String> {
    let (word, rest) = split_word(input);
    if word.is_empty() {
        return Err(format!("missing {}", name));
    }
    Ok((word, rest))
}

fn split_number<'a>(input: &'a str, name: &str) -> std::result::Result<(f64, &'a str), String> {
    let (word, rest) = split_required(input, name)?;
    let value = word
        .parse::<f64>()
        .map_err(|_| format!("{} must be a number, got '{}'", name, word))?;
    Ok((value, rest))
}

/// Run the event loop until `quit` or end of input, then save.
/// The final save is attempted even when reading input fails.
pub fn run_session<S, I, O, Q>(
    board: &mut BoardSession<HeadlessRenderer, S>,
    input: I,
    output: &mut O,
    quotes: &mut Q,
) -> Result<()>
where
    S: NoteStore,
    I: BufRead,
    O: Write,
    Q: QuoteSource,
{
    board.start_autosave(Instant::now());
    let outcome = event_loop(board, input, output, quotes);
    board.stop_autosave();
    let saved = board.save_now();

    outcome?;
    saved?;
    writeln!(output, "saved {} notes", board.manager().len())?;
    Ok(())
}

fn event_loop<S, I, O, Q>(
    board: &mut BoardSession<HeadlessRenderer, S>,
    mut input: I,
    output: &mut O,
    quotes: &mut Q,
) -> Result<()>
where
    S: NoteStore,
    I: BufRead,
    O: Write,
    Q: QuoteSource,
{
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            return Ok(());
        }
        board.poll(Instant::now());

        let Ok(line) = std::str::from_utf8(&buf) else {
            writeln!(output, "error: input line is not valid UTF-8")?;
            continue;
        };

        let command = match parse_command(line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(msg) => {
                writeln!(output, "error: {}", msg)?;
                continue;
            }
        };

        if command == SessionCommand::Quit {
            return Ok(());
        }

        if let Err(err) = execute(board, command, output, quotes) {
            writeln!(output, "error: {}", err)?;
        }
        settle_deletions(board);
        board.renderer_mut().clear_events();
    }
}

fn execute<S, O, Q>(
    board: &mut BoardSession<HeadlessRenderer, S>,
    command: SessionCommand,
    output: &mut O,
    quotes: &mut Q,
) -> Result<()>
where
    S: NoteStore,
    O: Write,
    Q: QuoteSource,
{
    match command {
        SessionCommand::New { x, y, content } => {
            let id = board.create_note(&content, x, y)?;
            let placed = note_position(board, &id);
            writeln!(
                output,
                "created {} at ({:.0}, {:.0})",
                id.short(),
                placed.x,
                placed.y
            )?;
        }
        SessionCommand::Edit { id, content } => {
            let id = board.resolve_id(&id)?;
            board.edit_note(&id, &content)?;
            writeln!(output, "edited {}", id.short())?;
        }
        SessionCommand::Grab {
            id,
            pointer,
            target,
        } => {
            let id = board.resolve_id(&id)?;
            if board.begin_drag(&id, pointer, target)? {
                writeln!(output, "dragging {}", id.short())?;
            } else {
                writeln!(output, "{} not dragged", id.short())?;
            }
        }
        SessionCommand::Drag { id, pointer } => {
            let id = board.resolve_id(&id)?;
            match board.drag_to(&id, pointer) {
                Some(placed) => writeln!(
                    output,
                    "moved {} to ({:.0}, {:.0})",
                    id.short(),
                    placed.x,
                    placed.y
                )?,
                None => writeln!(output, "{} is not being dragged", id.short())?,
            }
        }
        SessionCommand::Drop { id } => {
            let id = board.resolve_id(&id)?;
            if board.end_drag(&id) {
                writeln!(output, "dropped {}", id.short())?;
            }
        }
        SessionCommand::Delete { id } => {
            let id = board.resolve_id(&id)?;
            if board.request_delete(&id) {
                writeln!(output, "deleted {}", id.short())?;
            }
        }
        SessionCommand::Sort(order) => {
            board.sort(order);
            writeln!(output, "sorted {} notes", board.manager().len())?;
        }
        SessionCommand::Quote { id } => {
            let id = board.resolve_id(&id)?;
            if board.augment_with_quote(&id, quotes, Instant::now())? {
                writeln!(output, "quoted {}", id.short())?;
            } else {
                writeln!(output, "no quote added to {}", id.short())?;
            }
        }
        SessionCommand::Resize(size) => {
            board.renderer_mut().resize(size);
            writeln!(output, "board is {} x {}", size.width, size.height)?;
        }
        SessionCommand::List => {
            writeln!(output, "{}", format_note_list(&board.snapshot()).trim_end())?;
        }
        SessionCommand::Export(path) => {
            let mut exporter = JsonFileExporter::new(path);
            let count = board.export(&mut exporter)?;
            writeln!(
                output,
                "exported {} notes to {}",
                count,
                exporter.path().display()
            )?;
        }
        SessionCommand::Save => {
            board.save_now()?;
            writeln!(output, "saved {} notes", board.manager().len())?;
        }
        SessionCommand::Help => writeln!(output, "{}", HELP)?,
        SessionCommand::Quit => {}
    }
    Ok(())
}

fn note_position<S: NoteStore>(
    board: &BoardSession<HeadlessRenderer, S>,
    id: &NoteId,
) -> Position {
    board
        .manager()
        .get(id)
        .map(|note| note.position())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_new_keeps_text_spacing() {
        let command = parse_command("new 10 -5 Call  the plumber").unwrap();
        assert_eq!(
            command,
            Some(SessionCommand::New {
                x: 10.0,
                y: -5.0,
                content: "Call  the plumber".to_string(),
            })
        );
    }

    #[test]
    fn test_parse_grab_defaults_to_body() {
        let command = parse_command("grab ab12 100 200").unwrap();
        assert_eq!(
            command,
            Some(SessionCommand::Grab {
                id: "ab12".to_string(),
                pointer: Position::new(100.0, 200.0),
                target: GestureTarget::Body,
            })
        );

        let command = parse_command("grab ab12 1 2 delete").unwrap();
        assert!(matches!(
            command,
            Some(SessionCommand::Grab {
                target: GestureTarget::DeleteControl,
                ..
            })
        ));
    }

    #[test]
    fn test_parse_sort() {
        assert_eq!(
            parse_command("sort").unwrap(),
            Some(SessionCommand::Sort(SortOrder::Ascending))
        );
        assert_eq!(
            parse_command("sort desc").unwrap(),
            Some(SessionCommand::Sort(SortOrder::Descending))
        );
        assert!(parse_command("sort up").is_err());
    }

    #[test]
    fn test_parse_blank_and_comments() {
        assert_eq!(parse_command("   ").unwrap(), None);
        assert_eq!(parse_command("# setup").unwrap(), None);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            parse_command("new ten 5 x").unwrap_err(),
            "X must be a number, got 'ten'"
        );
        assert_eq!(parse_command("drag").unwrap_err(), "missing ID");
        assert_eq!(parse_command("export").unwrap_err(), "missing FILE");
        assert!(parse_command("dance").unwrap_err().contains("unknown command"));
    }

    #[test]
    fn test_parse_quit_aliases() {
        assert_eq!(parse_command("quit").unwrap(), Some(SessionCommand::Quit));
        assert_eq!(parse_command("EXIT").unwrap(), Some(SessionCommand::Quit));
    }
}
