//! Rendering of one dump row: address, hex field, character field and values.
//!
//! Layout of a full row with the default width of 16:
//!
//! ```text
//! 00000000: 00 01 02 03 04 05 06 07  08 09 0a 0b 0c 0d 0e 0f   │................│ int16: 256 ...
//! ```
//!
//! The hex field is always padded to the same width so short rows at the end of the
//! file keep the character field aligned.

use crate::codec::{Codec, Glyph};
use crate::file_handler::ByteStore;
use crate::format::values::{Endianness, ValueReadout};

/// Bytes rendered per row
pub const DEFAULT_LINE_WIDTH: usize = 16;

/// Width of the `xxxxxxxx: ` address column
const ADDRESS_WIDTH: usize = 10;

/// Delimiter around the character field
const CHAR_DELIMITER: char = '│';

/// Per-render settings, normally taken from the viewer state
#[derive(Debug, Clone, Copy)]
pub struct LineOptions<'a> {
    pub codec: &'a Codec,
    pub endianness: Endianness,
    /// Number of bytes the display window is moved back by; the address is unaffected
    pub shift: u64,
    pub show_values: bool,
}

impl<'a> LineOptions<'a> {
    pub fn new(codec: &'a Codec) -> Self {
        Self {
            codec,
            endianness: Endianness::Little,
            shift: 0,
            show_values: true,
        }
    }

    pub fn with_endianness(mut self, endianness: Endianness) -> Self {
        self.endianness = endianness;
        self
    }

    pub fn with_shift(mut self, shift: u64) -> Self {
        self.shift = shift;
        self
    }

    pub fn with_values(mut self, show_values: bool) -> Self {
        self.show_values = show_values;
        self
    }
}

/// A rendered row. Built fresh for every render call.
#[derive(Debug, Clone, PartialEq)]
pub struct LineView {
    /// Unshifted, line-aligned offset shown in the address column
    pub offset: u64,
    /// Bytes at `offset` as stored in the file
    pub raw: Vec<u8>,
    /// Bytes actually shown (differs from `raw` when a shift is active)
    pub display: Vec<u8>,
    pub address: String,
    /// Padded hex field
    pub hex: String,
    pub glyphs: Vec<Glyph>,
    /// Character field including its delimiters
    pub chars: String,
    pub values: Option<ValueReadout>,
    /// In-line indices of bytes that failed to decode, ascending
    pub error_columns: Vec<usize>,
    /// The composed row
    pub text: String,
}

/// Formats byte windows into dump rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineFormatter {
    width: usize,
}

impl Default for LineFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl LineFormatter {
    pub fn new() -> Self {
        Self::with_width(DEFAULT_LINE_WIDTH)
    }

    pub fn with_width(width: usize) -> Self {
        Self {
            width: width.max(1),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Start of the row containing `offset`
    pub fn align(&self, offset: u64) -> u64 {
        offset - offset % self.width as u64
    }

    /// Index of the byte after which the extra grouping space is inserted
    fn group_break(&self) -> usize {
        self.width / 2
    }

    /// Padded length of the hex field
    fn hex_field_width(&self) -> usize {
        3 * self.width + 2
    }

    /// Terminal column of the hex pair for the byte at in-line `index`
    pub fn hex_column(&self, index: usize) -> usize {
        let gap = usize::from(index >= self.group_break());
        ADDRESS_WIDTH + 3 * index + gap
    }

    /// Terminal column of the glyph for the byte at in-line `index`
    pub fn char_column(&self, index: usize) -> usize {
        ADDRESS_WIDTH + self.hex_field_width() + 2 + index
    }

    /// Bytes shown for the row at `offset` once `shift` is applied.
    ///
    /// With a shift the window starts `shift` bytes earlier; rows closer than that to
    /// the start of the file are left-padded with zeros and cut back to the row width.
    pub fn display_window(&self, store: &ByteStore, offset: u64, shift: u64) -> Vec<u8> {
        let width = self.width as u64;
        if shift == 0 {
            return store.slice(offset, offset.saturating_add(width)).to_vec();
        }

        let shift_start = offset.saturating_sub(shift);
        let shifted = store.slice(shift_start, shift_start.saturating_add(width));
        if offset >= shift {
            return shifted.to_vec();
        }

        let pad = (shift - offset).min(width) as usize;
        let mut window = vec![0u8; pad];
        window.extend_from_slice(shifted);
        window.truncate(self.width);
        window
    }

    /// Render the row at `offset` from `store`
    pub fn format_line(&self, store: &ByteStore, offset: u64, options: &LineOptions<'_>) -> LineView {
        let raw = store.slice(offset, offset.saturating_add(self.width as u64));
        let display = self.display_window(store, offset, options.shift);
        self.format_window(offset, raw, display, options)
    }

    /// Render a row from explicit windows. Pure: equal inputs give equal output.
    pub fn format_window(
        &self,
        offset: u64,
        raw: &[u8],
        display: Vec<u8>,
        options: &LineOptions<'_>,
    ) -> LineView {
        let address = format!("{:08x}: ", offset);

        let mut hex = String::with_capacity(self.hex_field_width());
        for (i, byte) in display.iter().enumerate() {
            hex.push_str(&format!("{:02x} ", byte));
            if i + 1 == self.group_break() {
                hex.push(' ');
            }
        }
        while hex.len() < self.hex_field_width() {
            hex.push(' ');
        }

        let glyphs: Vec<Glyph> = display
            .iter()
            .map(|&byte| options.codec.decode_one(byte))
            .collect();
        let error_columns = glyphs
            .iter()
            .enumerate()
            .filter(|(_, glyph)| glyph.is_error())
            .map(|(i, _)| i)
            .collect();

        let mut chars = String::with_capacity(glyphs.len() + 2);
        chars.push(CHAR_DELIMITER);
        chars.extend(glyphs.iter().map(|glyph| glyph.ch));
        chars.push(CHAR_DELIMITER);

        let values = if options.show_values {
            ValueReadout::interpret(&display, options.endianness)
        } else {
            None
        };

        let mut text = format!("{}{} {}", address, hex, chars);
        if let Some(readout) = &values {
            text.push_str(&readout.suffix());
        }

        LineView {
            offset,
            raw: raw.to_vec(),
            display,
            address,
            hex,
            glyphs,
            chars,
            values,
            error_columns,
            text,
        }
    }

    /// Render up to `rows` consecutive rows starting at the row containing `top`
    pub fn visible_lines(
        &self,
        store: &ByteStore,
        top: u64,
        rows: usize,
        options: &LineOptions<'_>,
    ) -> Vec<LineView> {
        let start = self.align(top);
        (0..rows as u64)
            .map(|row| start + row * self.width as u64)
            .take_while(|&offset| offset < store.len())
            .map(|offset| self.format_line(store, offset, options))
            .collect()
    }
}
