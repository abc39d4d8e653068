//! Hex dump line formatting and numeric interpretation of byte windows.

pub mod line;
pub mod values;

pub use line::{LineFormatter, LineOptions, LineView, DEFAULT_LINE_WIDTH};
pub use values::{format_general, Endianness, ValueReadout};
