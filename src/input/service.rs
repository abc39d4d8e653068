//! High-level input service.
//!
//! Consumes coalesced raw events, applies the viewer's key table, and yields
//! `InputAction`s for the render coordinator.

use crate::error::Result;
use crate::format::Endianness;
use crate::input::raw::{RawInputCollector, RawInputEvent};
use ratatui::crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;

/// Which text prompt is open on the bottom line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Search,
    Jump,
}

impl PromptKind {
    /// Label shown before the typed text
    pub fn label(self) -> &'static str {
        match self {
            PromptKind::Search => "Search (string): ",
            PromptKind::Jump => "Jump to offset (decimal or 0xHEX): ",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputState {
    Navigation,
    Prompt { kind: PromptKind },
}

/// Actions emitted by the key table.
#[derive(Debug, Clone, PartialEq)]
pub enum InputAction {
    /// Move the cursor by a signed number of bytes
    MoveBytes(i64),
    /// Move the cursor by a signed number of lines
    MoveLines(i64),
    PageUp,
    PageDown,
    GoToStart,
    GoToEnd,
    StartPrompt(PromptKind),
    UpdatePrompt { kind: PromptKind, buffer: String },
    CancelPrompt,
    SubmitSearch(String),
    SubmitJump(String),
    NextHit,
    PreviousHit,
    /// Change the display shift by a signed number of bytes
    ShiftBy(i64),
    ResetShift,
    SetEndianness(Endianness),
    CycleEncoding,
    ToggleValues,
    ToggleInvestigate,
    CycleColorScheme,
    ToggleHelp,
    Quit,
    Resize { width: u16, height: u16 },
    NoAction,
    InvalidInput,
}

/// Key table for navigation mode plus the line editor used by the prompts.
pub struct InputStateMachine {
    state: InputState,
    buffer: String,
}

impl InputStateMachine {
    pub fn new() -> Self {
        Self {
            state: InputState::Navigation,
            buffer: String::new(),
        }
    }

    pub fn handle_key_event(&mut self, key_event: KeyEvent) -> InputAction {
        if key_event.kind != KeyEventKind::Press {
            return InputAction::NoAction;
        }

        match self.state {
            InputState::Navigation => self.handle_navigation(key_event),
            InputState::Prompt { kind } => self.handle_prompt(kind, key_event),
        }
    }

    fn handle_navigation(&mut self, key_event: KeyEvent) -> InputAction {
        let modifiers = key_event.modifiers;
        if modifiers.contains(KeyModifiers::CONTROL) {
            return match key_event.code {
                KeyCode::Char('c') => InputAction::Quit,
                _ => InputAction::InvalidInput,
            };
        }
        if modifiers.contains(KeyModifiers::ALT) {
            return InputAction::InvalidInput;
        }

        match key_event.code {
            KeyCode::Left => InputAction::MoveBytes(-1),
            KeyCode::Right => InputAction::MoveBytes(1),
            KeyCode::Up => InputAction::MoveLines(-1),
            KeyCode::Down => InputAction::MoveLines(1),
            KeyCode::PageUp => InputAction::PageUp,
            KeyCode::PageDown => InputAction::PageDown,
            KeyCode::Home => InputAction::GoToStart,
            KeyCode::End => InputAction::GoToEnd,
            KeyCode::Char('s') => self.open_prompt(PromptKind::Search),
            KeyCode::Char('j') => self.open_prompt(PromptKind::Jump),
            KeyCode::Char('n') => InputAction::NextHit,
            KeyCode::Char('p') => InputAction::PreviousHit,
            KeyCode::Char('[') => InputAction::ShiftBy(-1),
            KeyCode::Char(']') => InputAction::ShiftBy(1),
            KeyCode::Char('{') => InputAction::ShiftBy(-4),
            KeyCode::Char('}') => InputAction::ShiftBy(4),
            KeyCode::Char('\\') => InputAction::ResetShift,
            KeyCode::Char('<') => InputAction::SetEndianness(Endianness::Little),
            KeyCode::Char('>') => InputAction::SetEndianness(Endianness::Big),
            KeyCode::Char('e') => InputAction::CycleEncoding,
            KeyCode::Char('v') => InputAction::ToggleValues,
            KeyCode::Char('i') => InputAction::ToggleInvestigate,
            KeyCode::Char('c') => InputAction::CycleColorScheme,
            KeyCode::Char('h') => InputAction::ToggleHelp,
            KeyCode::Char('q') => InputAction::Quit,
            _ => InputAction::InvalidInput,
        }
    }

    fn handle_prompt(&mut self, kind: PromptKind, key_event: KeyEvent) -> InputAction {
        match (key_event.code, key_event.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) | (KeyCode::Esc, _) => self.close_prompt(),
            (KeyCode::Char(ch), modifiers)
                if !modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.buffer.push(ch);
                InputAction::UpdatePrompt {
                    kind,
                    buffer: self.buffer.clone(),
                }
            }
            (KeyCode::Backspace, _) => {
                if self.buffer.pop().is_none() {
                    return self.close_prompt();
                }
                InputAction::UpdatePrompt {
                    kind,
                    buffer: self.buffer.clone(),
                }
            }
            (KeyCode::Enter, _) => {
                let text = std::mem::take(&mut self.buffer);
                self.state = InputState::Navigation;
                if text.is_empty() {
                    return InputAction::CancelPrompt;
                }
                match kind {
                    PromptKind::Search => InputAction::SubmitSearch(text),
                    PromptKind::Jump => InputAction::SubmitJump(text),
                }
            }
            _ => InputAction::NoAction,
        }
    }

    fn open_prompt(&mut self, kind: PromptKind) -> InputAction {
        self.state = InputState::Prompt { kind };
        self.buffer.clear();
        InputAction::StartPrompt(kind)
    }

    fn close_prompt(&mut self) -> InputAction {
        self.state = InputState::Navigation;
        self.buffer.clear();
        InputAction::CancelPrompt
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn state(&self) -> InputState {
        self.state
    }
}

impl Default for InputStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

/// Produces `InputAction`s from terminal events.
pub struct InputService {
    state_machine: InputStateMachine,
    raw_input: RawInputCollector,
}

impl InputService {
    pub fn new() -> Self {
        Self {
            state_machine: InputStateMachine::new(),
            raw_input: RawInputCollector::new(),
        }
    }

    pub fn poll_actions(&mut self, timeout: Option<Duration>) -> Result<Vec<InputAction>> {
        let mut actions = Vec::new();
        if let Some(raw_event) = self.raw_input.poll_event(timeout)? {
            actions.extend(self.process_raw_event(raw_event));
            self.drain_ready(&mut actions);
        }
        Ok(actions)
    }

    pub fn process_event(&mut self, event: Event) -> Vec<InputAction> {
        let mut actions = Vec::new();
        self.raw_input.process_event(event);
        self.drain_ready(&mut actions);
        actions
    }

    fn drain_ready(&mut self, actions: &mut Vec<InputAction>) {
        while let Some(raw_event) = self.raw_input.try_next() {
            actions.extend(self.process_raw_event(raw_event));
        }
    }

    fn process_raw_event(&mut self, event: RawInputEvent) -> Option<InputAction> {
        let action = match event {
            RawInputEvent::Key(key_event) => self.state_machine.handle_key_event(key_event),
            RawInputEvent::Resize { width, height } => InputAction::Resize { width, height },
            RawInputEvent::Scroll { direction, rows } => {
                InputAction::MoveLines(direction.signed(rows))
            }
        };

        match action {
            InputAction::NoAction | InputAction::InvalidInput => None,
            _ => Some(action),
        }
    }
}

impl Default for InputService {
    fn default() -> Self {
        Self::new()
    }
}

/// Spawn a blocking thread that polls the terminal and forwards actions to the render loop.
pub fn spawn_input_thread(
    tx: UnboundedSender<InputAction>,
    shutdown: Arc<AtomicBool>,
    poll_interval: Duration,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let mut service = InputService::new();
        while !shutdown.load(Ordering::SeqCst) {
            match service.poll_actions(Some(poll_interval)) {
                Ok(actions) => {
                    for action in actions {
                        if tx.send(action).is_err() {
                            return;
                        }
                    }
                }
                Err(err) => {
                    log::error!("input thread stopped: {}", err);
                    break;
                }
            }
        }
    })
}
