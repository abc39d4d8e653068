//! ratatui implementation of [`UIRenderer`].
//!
//! Rows come pre-rendered in [`ViewerState::visible_lines`]; this module only decides
//! which columns get which style and lays out the status area.

use crate::error::Result;
use crate::format::{LineFormatter, LineView};
use crate::render::ui::renderer::UIRenderer;
use crate::render::ui::state::ViewerState;
use crate::render::ui::theme::ColorTheme;
use ratatui::crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame, Terminal,
};
use std::io::{self, Stdout};

type CrosstermTerminal = Terminal<CrosstermBackend<Stdout>>;

pub struct TerminalUI {
    terminal: Option<CrosstermTerminal>,
}

impl TerminalUI {
    pub fn new() -> Result<Self> {
        Ok(Self { terminal: None })
    }

    fn draw(frame: &mut Frame, state: &ViewerState) {
        let theme = state.color_scheme.theme();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(frame.size());

        Self::draw_rows(frame, chunks[0], state, &theme);

        let (commands, search_line) = state.command_status_lines();
        let status_lines = [Some(state.file_status_line()), Some(commands), search_line];
        for (area, text) in chunks[1..4].iter().zip(status_lines) {
            if let Some(text) = text {
                frame.render_widget(Paragraph::new(text).style(theme.current_line), *area);
            }
        }

        if let Some(info) = state.info_line() {
            let style = if state.prompt.is_some() {
                Style::default()
            } else {
                theme.info_line
            };
            frame.render_widget(Paragraph::new(info).style(style), chunks[4]);
        }
    }

    fn draw_rows(frame: &mut Frame, area: Rect, state: &ViewerState, theme: &ColorTheme) {
        let formatter = LineFormatter::with_width(state.bytes_per_line);
        let rows: Vec<Line> = state
            .visible_lines
            .iter()
            .map(|line| styled_row(line, &formatter, state, theme))
            .collect();
        frame.render_widget(Paragraph::new(rows), area);
    }
}

/// Build the styled row for `line`.
///
/// Precedence, lowest first: cursor row background, decode errors, search hit
/// starts, the cursor byte.
pub fn styled_row(
    line: &LineView,
    formatter: &LineFormatter,
    state: &ViewerState,
    theme: &ColorTheme,
) -> Line<'static> {
    let chars: Vec<char> = line.text.chars().collect();
    let width = formatter.width() as u64;
    let shown = line.display.len();
    let cursor = state.offset();
    let on_cursor_row = line.offset <= cursor && cursor < line.offset + width;

    let base = if on_cursor_row {
        theme.current_line
    } else {
        Style::default()
    };
    let mut styles = vec![base; chars.len()];
    let paint_byte = |styles: &mut Vec<Style>, index: usize, style: Style, hex: bool| {
        if index >= shown {
            return;
        }
        let mut columns = vec![formatter.char_column(index)];
        if hex {
            let col = formatter.hex_column(index);
            columns.extend([col, col + 1]);
        }
        for col in columns {
            if let Some(slot) = styles.get_mut(col) {
                *slot = style;
            }
        }
    };

    for &index in &line.error_columns {
        paint_byte(&mut styles, index, theme.decode_error, false);
    }
    if let Some(results) = state.search() {
        for (_, hit) in results.hits_in_range(line.offset, line.offset + width) {
            paint_byte(
                &mut styles,
                (hit.offset - line.offset) as usize,
                theme.search_hit,
                true,
            );
        }
    }
    if on_cursor_row {
        paint_byte(
            &mut styles,
            (cursor - line.offset) as usize,
            theme.cursor_byte,
            true,
        );
    }

    let mut spans = Vec::new();
    let mut run = String::new();
    let mut run_style = base;
    for (ch, style) in chars.into_iter().zip(styles) {
        if style != run_style && !run.is_empty() {
            spans.push(Span::styled(std::mem::take(&mut run), run_style));
        }
        run_style = style;
        run.push(ch);
    }
    if !run.is_empty() {
        spans.push(Span::styled(run, run_style));
    }
    Line::from(spans)
}

impl UIRenderer for TerminalUI {
    fn render(&mut self, state: &ViewerState) -> Result<()> {
        if let Some(terminal) = self.terminal.as_mut() {
            terminal.draw(|frame| Self::draw(frame, state))?;
        }
        Ok(())
    }

    fn initialize(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        terminal.hide_cursor()?;
        self.terminal = Some(terminal);
        Ok(())
    }

    fn cleanup(&mut self) -> Result<()> {
        if let Some(mut terminal) = self.terminal.take() {
            disable_raw_mode()?;
            execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
            terminal.show_cursor()?;
        }
        Ok(())
    }

    fn get_terminal_size(&self) -> Result<(u16, u16)> {
        let (cols, rows) = ratatui::crossterm::terminal::size()?;
        Ok((cols, rows))
    }
}

impl Drop for TerminalUI {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
