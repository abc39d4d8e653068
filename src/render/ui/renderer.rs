//! Renderer trait and a recording mock for tests.

use crate::error::Result;
use crate::render::ui::state::ViewerState;

/// Draws the viewer and owns the terminal lifecycle
pub trait UIRenderer {
    /// Draw the dump rows, status lines and info line of `state`
    fn render(&mut self, state: &ViewerState) -> Result<()>;

    /// Enter raw mode and the alternate screen
    fn initialize(&mut self) -> Result<()>;

    /// Restore the terminal. Safe to call more than once.
    fn cleanup(&mut self) -> Result<()>;

    /// (width, height)
    fn get_terminal_size(&self) -> Result<(u16, u16)>;
}
