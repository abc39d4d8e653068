//! Rendering subsystem: worker protocol, the render loop, and the terminal UI.

pub mod protocol;
pub mod service;
pub mod ui;

pub use service::RenderLoopState;
