use chrono::Utc;
use clap::Parser;
use stickyboard::application::{init::init, manage_config::ConfigService, open_board};
use stickyboard::application::{settle_deletions, DirectoryBoard};
use stickyboard::cli::{format_config, format_note_list, run_session, Cli, Commands};
use stickyboard::error::BoardError;
use stickyboard::infrastructure::{BuiltinQuotes, FileSystemRepository, JsonFileExporter};
use stickyboard::logging::init_logging;
use std::io;
use std::time::Instant;

fn main() {
    let cli = Cli::parse();

    let _logger = match init_logging(cli.verbose) {
        Ok(handle) => Some(handle),
        Err(msg) => {
            eprintln!("Warning: {}", msg);
            None
        }
    };

    match run(cli) {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

fn open() -> Result<DirectoryBoard, BoardError> {
    let repo = FileSystemRepository::discover()?;
    open_board(repo)
}

fn run(cli: Cli) -> Result<(), BoardError> {
    match cli.command {
        Commands::Init {
            path,
            width,
            height,
        } => init(&path, width, height),
        Commands::Add { content, x, y } => {
            let mut board = open()?;
            let id = board.create_note(&content, x, y)?;
            board.save_now()?;

            let position = board
                .manager()
                .get(&id)
                .map(|note| note.position())
                .unwrap_or_default();
            println!("Created note {}", id.short());
            println!("Position: ({:.0}, {:.0})", position.x, position.y);
            Ok(())
        }
        Commands::List => {
            let board = open()?;
            println!("{}", format_note_list(&board.snapshot()).trim_end());
            Ok(())
        }
        Commands::Edit { id, content } => {
            let mut board = open()?;
            let id = board.resolve_id(&id)?;
            board.edit_note(&id, &content)?;
            board.save_now()?;
            println!("Updated note {}", id.short());
            Ok(())
        }
        Commands::Move { id, x, y } => {
            let mut board = open()?;
            let id = board.resolve_id(&id)?;
            let placed = board.move_note(&id, x, y)?;
            board.save_now()?;
            println!(
                "Moved note {} to ({:.0}, {:.0})",
                id.short(),
                placed.x,
                placed.y
            );
            Ok(())
        }
        Commands::Delete { id } => {
            let mut board = open()?;
            // Deleting twice is not an error.
            let id = match board.resolve_id(&id) {
                Ok(id) => id,
                Err(BoardError::NoteNotFound(prefix)) => {
                    println!("No note matches '{}'; nothing deleted", prefix);
                    return Ok(());
                }
                Err(e) => return Err(e),
            };
            board.request_delete(&id);
            settle_deletions(&mut board);
            board.save_now()?;
            println!("Deleted note {}", id.short());
            Ok(())
        }
        Commands::Sort { order } => {
            let mut board = open()?;
            board.sort(order);
            board.save_now()?;
            println!("{}", format_note_list(&board.snapshot()).trim_end());
            Ok(())
        }
        Commands::Quote { id } => {
            let mut board = open()?;
            let id = board.resolve_id(&id)?;
            let mut quotes = BuiltinQuotes::new(Utc::now().timestamp() as u64);
            if board.augment_with_quote(&id, &mut quotes, Instant::now())? {
                board.save_now()?;
                if let Some(note) = board.manager().get(&id) {
                    println!("{}", note.content());
                }
            } else {
                println!("No quote added to note {}", id.short());
            }
            Ok(())
        }
        Commands::Export { output } => {
            let board = open()?;
            let mut exporter = JsonFileExporter::new(output);
            let count = board.export(&mut exporter)?;
            println!(
                "Exported {} notes to {}",
                count,
                exporter.path().display()
            );
            Ok(())
        }
        Commands::Clear => {
            let mut board = open()?;
            let count = board.manager().len();
            board.clear();
            board.save_now()?;
            println!("Cleared {} notes", count);
            Ok(())
        }
        Commands::Config { key, value, list } => {
            let repo = FileSystemRepository::discover()?;
            let service = ConfigService::new(repo);

            if list {
                print!("{}", format_config(&service.list()?));
                Ok(())
            } else if let Some(k) = key {
                if let Some(v) = value {
                    service.set(&k, &v)?;
                    println!("Set {} = {}", k, v);
                    Ok(())
                } else {
                    let val = service.get(&k)?;
                    println!("{}", val);
                    Ok(())
                }
            } else {
                println!("Usage: stickyboard config [--list | <key> [<value>]]");
                Ok(())
            }
        }
        Commands::Session => {
            let mut board = open()?;
            let mut quotes = BuiltinQuotes::new(Utc::now().timestamp() as u64);
            let stdin = io::stdin();
            let mut stdout = io::stdout();
            run_session(&mut board, stdin.lock(), &mut stdout, &mut quotes)
        }
    }
}
