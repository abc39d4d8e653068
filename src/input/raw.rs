//! Low-level input collection: crossterm polling and mouse wheel coalescing.
//!
//! Wheel ticks arrive much faster than the viewer can redraw, so ticks in the same
//! direction are merged into a single scroll of several rows before they reach the
//! key table.

use crate::error::Result;
use ratatui::crossterm::event::{self, Event, KeyEvent, MouseEventKind};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

const DEFAULT_COALESCE_WINDOW_MS: u64 = 12;
/// Rows moved by one wheel tick
const WHEEL_ROWS: u64 = 3;
const DEFAULT_POLL_TIMEOUT_MS: u64 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
}

impl ScrollDirection {
    /// Signed row delta for `rows` rows in this direction
    pub fn signed(self, rows: u64) -> i64 {
        let rows = rows.min(i64::MAX as u64) as i64;
        match self {
            ScrollDirection::Up => -rows,
            ScrollDirection::Down => rows,
        }
    }
}

/// Events surfaced by the collector, before key bindings are applied.
#[derive(Debug, Clone, PartialEq)]
pub enum RawInputEvent {
    Key(KeyEvent),
    Resize { width: u16, height: u16 },
    Scroll { direction: ScrollDirection, rows: u64 },
}

/// Merges wheel ticks in one direction that arrive within `window` of each other.
#[derive(Debug, Clone)]
pub struct ScrollCoalescer {
    window: Duration,
    pending: Option<PendingScroll>,
}

#[derive(Debug, Clone)]
struct PendingScroll {
    direction: ScrollDirection,
    rows: u64,
    last_tick: Instant,
}

impl ScrollCoalescer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    /// Add a tick. A tick in the opposite direction returns the accumulated scroll.
    pub fn push(
        &mut self,
        direction: ScrollDirection,
        rows: u64,
        now: Instant,
    ) -> Option<(ScrollDirection, u64)> {
        if let Some(pending) = self.pending.as_mut() {
            if pending.direction == direction {
                pending.rows = pending.rows.saturating_add(rows);
                pending.last_tick = now;
                return None;
            }
        }

        let flushed = self.take();
        self.pending = Some(PendingScroll {
            direction,
            rows,
            last_tick: now,
        });
        flushed
    }

    /// Release the accumulated scroll once no tick arrived for a whole window.
    pub fn take_if_settled(&mut self, now: Instant) -> Option<(ScrollDirection, u64)> {
        let settled = self
            .pending
            .as_ref()
            .is_some_and(|pending| now.duration_since(pending.last_tick) >= self.window);
        if settled {
            self.take()
        } else {
            None
        }
    }

    pub fn take(&mut self) -> Option<(ScrollDirection, u64)> {
        self.pending
            .take()
            .map(|pending| (pending.direction, pending.rows))
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_none()
    }
}

/// Polls crossterm and queues keys, resizes, and coalesced wheel scrolls in arrival order.
#[derive(Debug)]
pub struct RawInputCollector {
    coalescer: ScrollCoalescer,
    queue: VecDeque<RawInputEvent>,
}

impl RawInputCollector {
    pub fn new() -> Self {
        Self::with_window(Duration::from_millis(DEFAULT_COALESCE_WINDOW_MS))
    }

    pub fn with_window(window: Duration) -> Self {
        Self {
            coalescer: ScrollCoalescer::new(window),
            queue: VecDeque::new(),
        }
    }

    pub fn is_idle(&self) -> bool {
        self.queue.is_empty() && self.coalescer.is_empty()
    }

    /// Feed an event without polling the terminal.
    pub fn process_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => self.queue.push_back(RawInputEvent::Key(key)),
            Event::Resize(width, height) => {
                self.flush_scroll();
                self.queue.push_back(RawInputEvent::Resize { width, height });
            }
            Event::Mouse(mouse) => {
                let direction = match mouse.kind {
                    MouseEventKind::ScrollUp => ScrollDirection::Up,
                    MouseEventKind::ScrollDown => ScrollDirection::Down,
                    _ => return,
                };
                if let Some((direction, rows)) =
                    self.coalescer.push(direction, WHEEL_ROWS, Instant::now())
                {
                    self.queue.push_back(RawInputEvent::Scroll { direction, rows });
                }
            }
            _ => {}
        }
    }

    /// Next ready event: a settled scroll first, then the queue.
    pub fn try_next(&mut self) -> Option<RawInputEvent> {
        self.coalescer
            .take_if_settled(Instant::now())
            .map(|(direction, rows)| RawInputEvent::Scroll { direction, rows })
            .or_else(|| self.queue.pop_front())
    }

    /// Wait up to `timeout` for the next event.
    pub fn poll_event(&mut self, timeout: Option<Duration>) -> Result<Option<RawInputEvent>> {
        if let Some(event) = self.try_next() {
            return Ok(Some(event));
        }

        let timeout = timeout.unwrap_or(Duration::from_millis(DEFAULT_POLL_TIMEOUT_MS));
        if event::poll(timeout)? {
            let event = event::read()?;
            self.process_event(event);
        }
        Ok(self.try_next())
    }

    fn flush_scroll(&mut self) {
        if let Some((direction, rows)) = self.coalescer.take() {
            self.queue.push_back(RawInputEvent::Scroll { direction, rows });
        }
    }
}

impl Default for RawInputCollector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::{KeyCode, KeyModifiers, MouseEvent};

    fn wheel(kind: MouseEventKind) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn same_direction_ticks_merge() {
        let mut coalescer = ScrollCoalescer::new(Duration::from_millis(10));
        let start = Instant::now();

        assert!(coalescer.push(ScrollDirection::Down, 3, start).is_none());
        assert!(coalescer
            .push(ScrollDirection::Down, 3, start + Duration::from_millis(5))
            .is_none());
        assert!(coalescer
            .take_if_settled(start + Duration::from_millis(8))
            .is_none());
        assert_eq!(
            coalescer.take_if_settled(start + Duration::from_millis(16)),
            Some((ScrollDirection::Down, 6))
        );
        assert!(coalescer.is_empty());
    }

    #[test]
    fn direction_change_releases_previous_scroll() {
        let mut coalescer = ScrollCoalescer::new(Duration::from_millis(10));
        let start = Instant::now();

        coalescer.push(ScrollDirection::Up, 3, start);
        assert_eq!(
            coalescer.push(ScrollDirection::Down, 3, start + Duration::from_millis(1)),
            Some((ScrollDirection::Up, 3))
        );
        assert_eq!(coalescer.take(), Some((ScrollDirection::Down, 3)));
    }

    #[test]
    fn resize_flushes_pending_scroll_first() {
        let mut collector = RawInputCollector::new();
        collector.process_event(wheel(MouseEventKind::ScrollDown));
        collector.process_event(Event::Resize(80, 40));

        assert_eq!(
            collector.try_next(),
            Some(RawInputEvent::Scroll {
                direction: ScrollDirection::Down,
                rows: WHEEL_ROWS
            })
        );
        assert_eq!(
            collector.try_next(),
            Some(RawInputEvent::Resize {
                width: 80,
                height: 40
            })
        );
        assert!(collector.is_idle());
    }

    #[test]
    fn keys_are_queued_in_order() {
        let mut collector = RawInputCollector::new();
        collector.process_event(Event::Key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::NONE)));
        collector.process_event(Event::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)));

        let codes: Vec<KeyCode> = std::iter::from_fn(|| collector.try_next())
            .filter_map(|event| match event {
                RawInputEvent::Key(key) => Some(key.code),
                _ => None,
            })
            .collect();
        assert_eq!(codes, vec![KeyCode::Char('s'), KeyCode::Enter]);
    }

    #[test]
    fn scroll_direction_sign() {
        assert_eq!(ScrollDirection::Up.signed(3), -3);
        assert_eq!(ScrollDirection::Down.signed(3), 3);
    }
}
