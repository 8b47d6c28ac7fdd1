//! File system repository

use crate::application::ports::NoteStore;
use crate::domain::NoteRecord;
use crate::error::{BoardError, Result};
use crate::infrastructure::config::{Config, BOARD_DIR};
use std::fs;
use std::path::{Path, PathBuf};

/// Snapshot file inside the board directory
pub const NOTES_FILE: &str = "notes.json";

/// Abstract repository for board directory operations
pub trait BoardRepository {
    /// Get the root directory of this repository
    fn root(&self) -> &Path;

    /// Load configuration from .stickies/config.toml
    fn load_config(&self) -> Result<Config>;

    /// Save configuration to .stickies/config.toml
    fn save_config(&self, config: &Config) -> Result<()>;

    /// Check if .stickies directory exists
    fn is_initialized(&self) -> bool;

    /// Create .stickies directory structure
    fn initialize(&self) -> Result<()>;
}

/// File system implementation of BoardRepository
#[derive(Debug, Clone)]
pub struct FileSystemRepository {
    pub root: PathBuf,
}

impl FileSystemRepository {
    /// Create a new repository with the given root directory
    pub fn new(root: PathBuf) -> Self {
        FileSystemRepository { root }
    }

    /// Discover board root by walking up from current directory.
    /// First checks STICKIES_ROOT environment variable, then falls back to discovery
    pub fn discover() -> Result<Self> {
        if let Ok(root_path) = std::env::var("STICKIES_ROOT") {
            let path = PathBuf::from(root_path);
            if Self::has_board_dir(&path) {
                return Ok(FileSystemRepository::new(path));
            } else {
                return Err(BoardError::Config(format!(
                    "STICKIES_ROOT is set to '{}' but no .stickies directory found. \
                    Run 'stickyboard init' in that directory or unset STICKIES_ROOT.",
                    path.display()
                )));
            }
        }

        let current_dir = std::env::current_dir()?;
        Self::discover_from(&current_dir)
    }

    /// Discover board root by walking up from a specific starting directory
    pub fn discover_from(start: &Path) -> Result<Self> {
        let mut current = start.to_path_buf();

        loop {
            if Self::has_board_dir(&current) {
                return Ok(FileSystemRepository::new(current));
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => {
                    return Err(BoardError::NotBoardDirectory(start.to_path_buf()));
                }
            }
        }
    }

    fn has_board_dir(path: &Path) -> bool {
        path.join(BOARD_DIR).is_dir()
    }

    /// Path of the persisted snapshot
    pub fn notes_path(&self) -> PathBuf {
        self.root.join(BOARD_DIR).join(NOTES_FILE)
    }

    /// Remove the persisted snapshot, if any
    pub fn delete_snapshot(&self) -> Result<()> {
        let path = self.notes_path();
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

impl BoardRepository for FileSystemRepository {
    fn root(&self) -> &Path {
        &self.root
    }

    fn load_config(&self) -> Result<Config> {
        Config::load_from_dir(&self.root)
    }

    fn save_config(&self, config: &Config) -> Result<()> {
        config.save_to_dir(&self.root)
    }

    fn is_initialized(&self) -> bool {
        Self::has_board_dir(&self.root)
    }

    fn initialize(&self) -> Result<()> {
        let board_dir = self.root.join(BOARD_DIR);

        if board_dir.exists() {
            return Err(BoardError::Config(format!(
                "Directory already initialized: {}",
                self.root.display()
            )));
        }

        fs::create_dir(&board_dir)?;
        Ok(())
    }
}

impl NoteStore for FileSystemRepository {
    fn save(&mut self, records: &[NoteRecord]) -> Result<()> {
        let json = serde_json::to_string_pretty(records)?;
        write_atomic(&self.notes_path(), &json)
    }

    fn load(&self) -> Result<Option<Vec<NoteRecord>>> {
        let path = self.notes_path();
        if !path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&path)?;
        if contents.trim().is_empty() {
            return Ok(None);
        }
        let records = serde_json::from_str(&contents)?;
        Ok(Some(records))
    }
}

/// Write using a best-effort atomic replace:
/// write to a temp file in the same directory, then rename into place.
///
/// On Windows, `rename` does not overwrite existing files, so we remove the destination first.
pub fn write_atomic(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let tmp_name = format!(
        "{}.stickies-tmp-{}",
        path.file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("notes.json"),
        std::process::id()
    );
    let tmp_path = path.with_file_name(tmp_name);

    fs::write(&tmp_path, content)?;

    if cfg!(windows) && path.exists() {
        fs::remove_file(path)?;
    }

    fs::rename(&tmp_path, path)?;
    Ok(())
}
