//! Infrastructure layer - External I/O and persistence

pub mod config;
pub mod export;
pub mod quotes;
pub mod render;
pub mod repository;

pub use config::Config;
pub use export::JsonFileExporter;
pub use quotes::BuiltinQuotes;
pub use render::{HeadlessRenderer, RenderEvent};
pub use repository::{BoardRepository, FileSystemRepository};
