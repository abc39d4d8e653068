//! Viewer state: cursor, display settings, search results, and the text of the
//! status area. Every mutation goes through a method so the invariants hold
//! (offset inside the file, shift never negative).

use crate::format::{Endianness, LineView, DEFAULT_LINE_WIDTH};
use crate::input::PromptKind;
use crate::render::ui::theme::ColorScheme;
use crate::search::SearchResults;
use std::path::{Path, PathBuf};

/// Rows below the dump: three status lines and the info line
pub const STATUS_ROWS: u16 = 4;

const HINTS: &str =
    " h=Help | q=Quit | j=Jump | s=Search | n/p=Next/Prev | i=Investigate | e=Encoding | c=Color | v=Values";
const HELP_NAVIGATION: &str = " Navigation: Arrows=Move | Home/End=Start/End | PgUp/PgDown=Page | j=Jump | [/]=Shift ±1byte | {/}=Shift ±4bytes";
const HELP_COMMANDS: &str = " Commands: q=Quit | s=Search | n/p=Next/Prev | </>=Endian | e=Encoding | v=Values | i=Investigate | c=Color | h=Help";
const HELP_DETAIL: &str =
    "[ ] Shift by 1 byte | { } Shift by 4 bytes | \\ Reset shift | v Toggle values | To exit help: press h again";

#[derive(Debug)]
pub struct ViewerState {
    pub file_path: PathBuf,
    pub file_size: u64,
    offset: u64,
    shift: u64,
    pub bytes_per_line: usize,
    pub endianness: Endianness,
    pub show_values: bool,
    pub color_scheme: ColorScheme,
    pub show_help: bool,
    show_investigate: bool,
    pub encoding_index: usize,
    pub encoding_name: String,
    search: Option<SearchResults>,
    /// Open prompt and the text typed so far
    pub prompt: Option<(PromptKind, String)>,
    /// One-shot message for the info line, cleared by the next action
    pub message: Option<String>,
    /// Summary of the selected hit while investigate is on
    pub investigate_line: Option<String>,
    pub viewport_width: u16,
    pub viewport_height: u16,
    /// Rendered rows, refreshed by the render loop before drawing
    pub visible_lines: Vec<LineView>,
}

impl ViewerState {
    pub fn new(file_path: impl AsRef<Path>, file_size: u64, width: u16, height: u16) -> Self {
        Self {
            file_path: file_path.as_ref().to_path_buf(),
            file_size,
            offset: 0,
            shift: 0,
            bytes_per_line: DEFAULT_LINE_WIDTH,
            endianness: Endianness::default(),
            show_values: true,
            color_scheme: ColorScheme::default(),
            show_help: false,
            show_investigate: false,
            encoding_index: 0,
            encoding_name: String::new(),
            search: None,
            prompt: None,
            message: None,
            investigate_line: None,
            viewport_width: width,
            viewport_height: height,
            visible_lines: Vec::new(),
        }
    }

    /// Cursor offset, always in `[0, size - 1]` (0 for an empty file)
    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn shift(&self) -> u64 {
        self.shift
    }

    pub fn search(&self) -> Option<&SearchResults> {
        self.search.as_ref()
    }

    pub fn show_investigate(&self) -> bool {
        self.show_investigate
    }

    /// Rows available for the dump
    pub fn content_rows(&self) -> usize {
        usize::from(self.viewport_height.saturating_sub(STATUS_ROWS).max(1))
    }

    /// First byte of the top row; the cursor row is always the top row
    pub fn top_offset(&self) -> u64 {
        self.offset - self.offset % self.bytes_per_line as u64
    }

    fn last_offset(&self) -> u64 {
        self.file_size.saturating_sub(1)
    }

    pub fn set_offset(&mut self, offset: u64) {
        self.offset = offset.min(self.last_offset());
    }

    pub fn move_bytes(&mut self, delta: i64) {
        let target = if delta.is_negative() {
            self.offset.saturating_sub(delta.unsigned_abs())
        } else {
            self.offset.saturating_add(delta as u64)
        };
        self.set_offset(target);
    }

    pub fn move_lines(&mut self, delta: i64) {
        self.move_bytes(delta.saturating_mul(self.bytes_per_line as i64));
    }

    pub fn page_up(&mut self) {
        self.move_lines(-(self.content_rows() as i64));
    }

    pub fn page_down(&mut self) {
        self.move_lines(self.content_rows() as i64);
    }

    pub fn go_to_start(&mut self) {
        self.set_offset(0);
    }

    pub fn go_to_end(&mut self) {
        self.set_offset(self.last_offset());
    }

    /// Change the display shift, saturating at zero
    pub fn shift_by(&mut self, delta: i64) {
        self.shift = if delta.is_negative() {
            self.shift.saturating_sub(delta.unsigned_abs())
        } else {
            self.shift.saturating_add(delta as u64)
        };
    }

    pub fn reset_shift(&mut self) {
        self.shift = 0;
    }

    pub fn toggle_values(&mut self) {
        self.show_values = !self.show_values;
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn cycle_color_scheme(&mut self) {
        self.color_scheme = self.color_scheme.next();
    }

    pub fn set_encoding(&mut self, index: usize, name: impl Into<String>) {
        self.encoding_index = index;
        self.encoding_name = name.into();
    }

    /// Install new results and move the cursor to the first hit, if any
    pub fn set_search_results(&mut self, results: SearchResults) -> bool {
        let first = results.current().map(|hit| hit.offset);
        self.search = Some(results);
        match first {
            Some(offset) => {
                self.set_offset(offset);
                true
            }
            None => false,
        }
    }

    pub fn clear_search(&mut self) {
        self.search = None;
    }

    pub fn next_hit(&mut self) -> bool {
        self.step_hit(SearchResults::next)
    }

    pub fn prev_hit(&mut self) -> bool {
        self.step_hit(SearchResults::prev)
    }

    fn step_hit(&mut self, step: fn(&mut SearchResults) -> bool) -> bool {
        let Some(results) = self.search.as_mut() else {
            return false;
        };
        if !step(results) {
            return false;
        }
        if let Some(offset) = results.current().map(|hit| hit.offset) {
            self.set_offset(offset);
        }
        true
    }

    /// Flip investigate mode. Turning it on with the cursor off every hit selects
    /// the nearest hit and moves the cursor there.
    pub fn toggle_investigate(&mut self) -> bool {
        self.show_investigate = !self.show_investigate;
        if !self.show_investigate {
            return false;
        }

        let offset = self.offset;
        let target = self
            .search
            .as_mut()
            .filter(|results| !results.contains_offset(offset))
            .and_then(|results| results.select_nearest(offset).map(|hit| hit.offset));
        if let Some(target) = target {
            self.set_offset(target);
        }
        true
    }

    /// Update terminal dimensions. Returns true if they changed.
    pub fn update_terminal_size(&mut self, width: u16, height: u16) -> bool {
        let changed = self.viewport_width != width || self.viewport_height != height;
        self.viewport_width = width;
        self.viewport_height = height;
        changed
    }

    pub fn filename(&self) -> String {
        self.file_path.display().to_string()
    }

    /// File, size, position, shift, endianness and encoding
    pub fn file_status_line(&self) -> String {
        let percent = if self.file_size == 0 {
            0.0
        } else {
            self.offset as f64 / self.file_size as f64 * 100.0
        };
        let mut line = format!(
            " File: {} | Size: {} bytes | Offset: {}/{} ({:.1}%) | ",
            self.filename(),
            group_thousands(self.file_size),
            group_thousands(self.offset),
            group_thousands(self.file_size),
            percent
        );
        if self.shift != 0 {
            line.push_str(&format!("Shift: {} bytes | ", self.shift));
        }
        line.push_str(&format!(
            "Endian: {} | Encoding: {}",
            self.endianness, self.encoding_name
        ));
        line
    }

    /// Hints (or help) plus the optional second line with the search position
    pub fn command_status_lines(&self) -> (String, Option<String>) {
        if self.show_help {
            return (HELP_NAVIGATION.to_string(), Some(HELP_COMMANDS.to_string()));
        }

        let position = self.search.as_ref().and_then(|results| {
            let cursor = results.cursor()?;
            Some(format!(" Search: Result {}/{}", cursor + 1, results.len()))
        });
        (HINTS.to_string(), position)
    }

    /// Bottom line: open prompt, then message, then investigate, then help
    pub fn info_line(&self) -> Option<String> {
        if let Some((kind, buffer)) = &self.prompt {
            return Some(format!("{}{}", kind.label(), buffer));
        }
        if let Some(message) = &self.message {
            return Some(message.clone());
        }
        if self.show_investigate {
            if let Some(line) = &self.investigate_line {
                return Some(line.clone());
            }
        }
        if self.show_help {
            return Some(HELP_DETAIL.to_string());
        }
        None
    }
}

/// `1234567` -> `1,234,567`
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
