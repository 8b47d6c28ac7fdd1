//! stickyboard - Sticky notes on a 2D board
//!
//! The core owns a collection of positioned notes and keeps them consistent
//! while they are created, dragged, edited, sorted, deleted and saved. Visual
//! output, storage, export and quote fetching are collaborators behind traits.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod logging;

pub use error::BoardError;
