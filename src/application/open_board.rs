//! Open a board directory as a live session

use crate::application::board::BoardSession;
use crate::application::ports::NoteStore;
use crate::error::Result;
use crate::infrastructure::{BoardRepository, FileSystemRepository, HeadlessRenderer};

/// Board session backed by a board directory
pub type DirectoryBoard = BoardSession<HeadlessRenderer, FileSystemRepository>;

/// Load config and snapshot from the repository and hydrate a session
pub fn open_board(repository: FileSystemRepository) -> Result<DirectoryBoard> {
    let config = repository.load_config()?;
    let renderer = HeadlessRenderer::new(config.board_size(), config.note_size());
    BoardSession::hydrate(renderer, repository, config.board_settings())
}

/// Complete every exit transition the renderer has finished
pub fn settle_deletions<S: NoteStore>(board: &mut BoardSession<HeadlessRenderer, S>) -> usize {
    let finished = board.renderer_mut().drain_finished_transitions();
    finished
        .iter()
        .filter(|id| board.finish_deletion(id))
        .count()
}
