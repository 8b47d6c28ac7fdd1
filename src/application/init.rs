//! Initialize board use case

use crate::error::Result;
use crate::infrastructure::{BoardRepository, Config, FileSystemRepository};
use std::fs;
use std::path::Path;

/// Initialize a new board at the specified path.
pub fn init(path: &Path, board_width: f64, board_height: f64) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }

    let repo = FileSystemRepository::new(path.to_path_buf());
    repo.initialize()?;

    let config = Config::new(board_width, board_height);
    repo.save_config(&config)?;

    println!("Initialized stickyboard at {}", path.display());
    println!("Board: {} x {}", board_width, board_height);

    Ok(())
}
