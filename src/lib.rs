//! # rlhex - Terminal Hex Viewer
//!
//! An interactive hex viewer for arbitrary binary files: a hex dump with a
//! configurable character column, numeric interpretation of each row, and search
//! across text, raw hex and integer/float encodings of a query.
//!
//! ## Architecture
//!
//! - [`error`] - Centralized error types
//! - [`file_handler`] - Immutable whole-file byte storage, memory mapped for large files
//! - [`codec`] - Named text encodings and the registry cycled at runtime
//! - [`config`] - Custom encoding configuration files
//! - [`format`] - Dump line rendering and numeric readouts
//! - [`search`] - Query expansion, multi-format search and the background worker
//! - [`input`] - Terminal polling, the key table and jump target parsing
//! - [`render`] - Render loop, viewer state and the ratatui front end
//! - [`app`] - Component wiring and the main event loop

pub mod error;
pub mod file_handler;

pub mod codec;
pub mod config;
pub mod format;

pub mod input;
pub mod render;

pub mod app;
pub mod search;

pub use error::{Result, RlhexError};

pub use app::Application;
pub use codec::{Codec, CodecRegistry};
pub use file_handler::{ByteStore, ByteStoreFactory};
pub use format::{LineFormatter, LineOptions, LineView};
pub use search::{PatternExpander, SearchEngine, SearchResults};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
