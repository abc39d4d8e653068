//! Render coordination.
//!
//! Applies input actions to the viewer state, forwards searches to the worker, folds
//! worker responses back in, and refreshes the rows that the renderer draws.

use crate::codec::{Codec, CodecRegistry};
use crate::error::{Result, RlhexError};
use crate::file_handler::ByteStore;
use crate::format::{LineFormatter, LineOptions};
use crate::input::{resolve_jump_target, InputAction};
use crate::render::protocol::{RequestId, SearchCommand, SearchResponse};
use crate::render::ui::ViewerState;
use crate::search::investigate;
use std::sync::Arc;
use tokio::sync::mpsc;

/// State that persists across input actions and worker responses
pub struct RenderLoopState {
    store: Arc<ByteStore>,
    registry: CodecRegistry,
    formatter: LineFormatter,
    next_request_id: RequestId,
    /// Only the response to the most recent search is applied
    latest_search_request: Option<RequestId>,
}

impl RenderLoopState {
    pub fn new(store: Arc<ByteStore>, registry: CodecRegistry) -> Self {
        Self {
            store,
            registry,
            formatter: LineFormatter::new(),
            next_request_id: 0,
            latest_search_request: None,
        }
    }

    pub fn registry(&self) -> &CodecRegistry {
        &self.registry
    }

    pub fn pending_search(&self) -> Option<RequestId> {
        self.latest_search_request
    }

    fn codec(&self, state: &ViewerState) -> &Codec {
        self.registry.get_or_default(state.encoding_index)
    }

    /// Apply one action. Returns false when the viewer should exit.
    pub async fn process_action(
        &mut self,
        action: InputAction,
        state: &mut ViewerState,
        search_tx: &mpsc::Sender<SearchCommand>,
    ) -> Result<bool> {
        if !matches!(action, InputAction::Resize { .. }) {
            state.message = None;
        }

        match action {
            InputAction::Quit => return Ok(false),
            InputAction::MoveBytes(delta) => state.move_bytes(delta),
            InputAction::MoveLines(delta) => state.move_lines(delta),
            InputAction::PageUp => state.page_up(),
            InputAction::PageDown => state.page_down(),
            InputAction::GoToStart => state.go_to_start(),
            InputAction::GoToEnd => state.go_to_end(),
            InputAction::StartPrompt(kind) => state.prompt = Some((kind, String::new())),
            InputAction::UpdatePrompt { kind, buffer } => state.prompt = Some((kind, buffer)),
            InputAction::CancelPrompt => state.prompt = None,
            InputAction::SubmitSearch(query) => {
                state.prompt = None;
                self.request_search(query, state, search_tx).await?;
            }
            InputAction::SubmitJump(text) => {
                state.prompt = None;
                match resolve_jump_target(&text, state.file_size) {
                    Ok(target) => state.set_offset(target),
                    Err(err) => {
                        log::debug!("rejected jump target: {}", err);
                        state.message =
                            Some("Invalid offset format. Use decimal, 0xHEX, or percentage%".to_string());
                    }
                }
            }
            InputAction::NextHit => {
                if !state.next_hit() {
                    state.message = Some("No search results".to_string());
                }
            }
            InputAction::PreviousHit => {
                if !state.prev_hit() {
                    state.message = Some("No search results".to_string());
                }
            }
            InputAction::ShiftBy(delta) => state.shift_by(delta),
            InputAction::ResetShift => state.reset_shift(),
            InputAction::SetEndianness(endianness) => state.endianness = endianness,
            InputAction::CycleEncoding => {
                let next = self.registry.cycle(state.encoding_index);
                let name = self.registry.get_or_default(next).name().to_string();
                log::info!("encoding changed to {}", name);
                state.message = Some(format!("Encoding changed to: {}", name));
                state.set_encoding(next, name);
            }
            InputAction::ToggleValues => state.toggle_values(),
            InputAction::ToggleInvestigate => {
                state.toggle_investigate();
            }
            InputAction::CycleColorScheme => state.cycle_color_scheme(),
            InputAction::ToggleHelp => state.toggle_help(),
            InputAction::Resize { width, height } => {
                state.update_terminal_size(width, height);
            }
            InputAction::NoAction | InputAction::InvalidInput => {}
        }

        self.refresh_view(state);
        Ok(true)
    }

    async fn request_search(
        &mut self,
        query: String,
        state: &mut ViewerState,
        search_tx: &mpsc::Sender<SearchCommand>,
    ) -> Result<RequestId> {
        let request_id = self.next_request_id;
        self.next_request_id += 1;
        self.latest_search_request = Some(request_id);
        state.message = Some(format!("Searching for {:?}...", query));

        search_tx
            .send(SearchCommand::ExecuteSearch {
                request_id,
                query,
                from_offset: state.offset(),
                codec: self.codec(state).clone(),
            })
            .await
            .map_err(|_| RlhexError::other("search worker unavailable"))?;
        Ok(request_id)
    }

    /// Fold a worker response into the state. Stale responses are dropped.
    pub fn handle_response(&mut self, response: SearchResponse, state: &mut ViewerState) {
        if Some(response.request_id()) != self.latest_search_request {
            log::debug!("dropping stale search response {}", response.request_id());
            return;
        }
        self.latest_search_request = None;

        match response {
            SearchResponse::SearchCompleted { results, .. } => {
                let query = results.query().to_string();
                let count = results.len();
                state.message = if state.set_search_results(results) {
                    None
                } else {
                    Some(format!("Pattern not found: {}", query))
                };
                log::info!("search {:?} found {} hits", query, count);
            }
            SearchResponse::Error { error, .. } => {
                log::warn!("search failed: {}", error);
                state.clear_search();
                state.message = Some(format!("Search failed: {}", error));
            }
        }
        self.refresh_view(state);
    }

    /// Rebuild the visible rows and the investigate summary from the current state
    pub fn refresh_view(&self, state: &mut ViewerState) {
        let codec = self.codec(state);
        let options = LineOptions::new(codec)
            .with_endianness(state.endianness)
            .with_shift(state.shift())
            .with_values(state.show_values);

        state.visible_lines = self.formatter.visible_lines(
            &self.store,
            state.top_offset(),
            state.content_rows(),
            &options,
        );
        state.investigate_line = state
            .search()
            .and_then(|results| investigate(&self.store, results, codec))
            .map(|details| details.summary());
    }
}
