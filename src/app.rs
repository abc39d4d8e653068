//! Application orchestration.
//!
//! Opens the file, builds the codec registry, and runs the render loop with a
//! dedicated input thread and a background search worker.

use crate::codec::CodecRegistry;
use crate::config::EncodingConfig;
use crate::error::Result;
use crate::file_handler::{ByteStore, ByteStoreFactory};
use crate::input::spawn_input_thread;
use crate::render::protocol::SearchCommand;
use crate::render::service::RenderLoopState;
use crate::render::ui::{UIRenderer, ViewerState};
use crate::search::{search_worker_loop, SearchEngine};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(50);
const SEARCH_CHANNEL_CAPACITY: usize = 8;

pub struct Application {
    store: Arc<ByteStore>,
    registry: CodecRegistry,
    ui_renderer: Box<dyn UIRenderer>,
}

impl Application {
    /// Open `file_path` and load custom encodings from `config_path`, or from the
    /// default locations when none is given.
    pub fn new(
        file_path: &Path,
        config_path: Option<&Path>,
        ui_renderer: Box<dyn UIRenderer>,
    ) -> Result<Self> {
        let store = Arc::new(ByteStoreFactory::open(file_path)?);

        let config = match config_path {
            Some(path) => Some(EncodingConfig::load(path)?),
            None => EncodingConfig::discover(),
        };
        let mut registry = CodecRegistry::new();
        if let Some(config) = config {
            let added = registry.extend_from_config(&config);
            log::info!("registered {} custom encodings", added);
        }

        Ok(Self {
            store,
            registry,
            ui_renderer,
        })
    }

    pub fn registry(&self) -> &CodecRegistry {
        &self.registry
    }

    /// Run until the user quits
    pub async fn run(&mut self) -> Result<()> {
        self.ui_renderer.initialize()?;
        let outcome = self.event_loop().await;
        self.ui_renderer.cleanup()?;
        outcome
    }

    async fn event_loop(&mut self) -> Result<()> {
        let (width, height) = self.ui_renderer.get_terminal_size()?;
        let mut state = ViewerState::new(self.store.path(), self.store.len(), width, height);
        state.set_encoding(0, self.registry.get_or_default(0).name());

        let (search_tx, search_rx) = mpsc::channel(SEARCH_CHANNEL_CAPACITY);
        let (response_tx, mut response_rx) = mpsc::channel(SEARCH_CHANNEL_CAPACITY);
        let worker = tokio::spawn(search_worker_loop(
            search_rx,
            response_tx,
            SearchEngine::new(Arc::clone(&self.store)),
        ));

        let (input_tx, mut input_rx) = mpsc::unbounded_channel();
        let shutdown = Arc::new(AtomicBool::new(false));
        let input_thread = spawn_input_thread(input_tx, Arc::clone(&shutdown), INPUT_POLL_INTERVAL);

        let mut render_loop = RenderLoopState::new(Arc::clone(&self.store), self.registry.clone());
        render_loop.refresh_view(&mut state);
        self.ui_renderer.render(&state)?;

        let outcome = loop {
            tokio::select! {
                action = input_rx.recv() => {
                    let Some(action) = action else { break Ok(()) };
                    match render_loop.process_action(action, &mut state, &search_tx).await {
                        Ok(true) => {}
                        Ok(false) => break Ok(()),
                        Err(err) => break Err(err),
                    }
                }
                response = response_rx.recv() => {
                    let Some(response) = response else { break Ok(()) };
                    render_loop.handle_response(response, &mut state);
                }
            }

            if let Err(err) = self.ui_renderer.render(&state) {
                break Err(err);
            }
        };

        shutdown.store(true, Ordering::SeqCst);
        let _ = search_tx.send(SearchCommand::Shutdown).await;
        if let Err(err) = worker.await {
            log::warn!("search worker ended abnormally: {}", err);
        }
        if input_thread.join().is_err() {
            log::warn!("input thread panicked");
        }
        outcome
    }
}
