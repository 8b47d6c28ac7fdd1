//! JSON file export

use crate::application::ports::Exporter;
use crate::domain::NoteRecord;
use crate::error::{BoardError, Result};
use crate::infrastructure::repository::write_atomic;
use std::path::{Path, PathBuf};

/// Default export file name
pub const DEFAULT_EXPORT_FILE: &str = "stickies-export.json";

/// Writes a snapshot as a pretty-printed JSON array
#[derive(Debug, Clone)]
pub struct JsonFileExporter {
    path: PathBuf,
}

impl JsonFileExporter {
    pub fn new(path: PathBuf) -> Self {
        JsonFileExporter { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Exporter for JsonFileExporter {
    fn export(&mut self, records: &[NoteRecord]) -> Result<()> {
        if self.path.is_dir() {
            return Err(BoardError::Export(format!(
                "{} is a directory",
                self.path.display()
            )));
        }

        let json = serde_json::to_string_pretty(records)?;
        write_atomic(&self.path, &json)
            .map_err(|e| BoardError::Export(format!("{}: {}", self.path.display(), e)))
    }
}
