//! Terminal rendering components: the renderer trait and its ratatui implementation,
//! the viewer state they draw, and the color schemes.

pub mod renderer;
pub mod state;
pub mod terminal;
pub mod theme;

pub use renderer::UIRenderer;
pub use state::ViewerState;
pub use terminal::TerminalUI;
pub use theme::{ColorScheme, ColorTheme};

#[cfg(test)]
pub use renderer::tests::MockUIRenderer;
