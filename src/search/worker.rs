use crate::codec::Codec;
use crate::error::RlhexError;
use crate::render::protocol::{RequestId, SearchCommand, SearchResponse};
use crate::search::SearchEngine;
use tokio::sync::mpsc::{Receiver, Sender};

/// Run the search worker processing commands from the coordinator.
///
/// Each search runs on the blocking pool so a long scan never stalls the runtime;
/// commands are still handled one at a time, in order.
pub async fn search_worker_loop(
    mut rx: Receiver<SearchCommand>,
    tx: Sender<SearchResponse>,
    search_engine: SearchEngine,
) {
    let state = WorkerState::new(search_engine);

    while let Some(cmd) = rx.recv().await {
        let outcome = state.handle_command(cmd).await;
        if let Some(response) = outcome.response {
            if tx.send(response).await.is_err() {
                break;
            }
        }

        if outcome.done {
            break;
        }
    }
}

struct WorkerState {
    search_engine: SearchEngine,
}

impl WorkerState {
    fn new(search_engine: SearchEngine) -> Self {
        Self { search_engine }
    }

    async fn handle_command(&self, cmd: SearchCommand) -> HandlerOutcome {
        match cmd {
            SearchCommand::ExecuteSearch {
                request_id,
                query,
                from_offset,
                codec,
            } => HandlerOutcome::respond(
                self.execute_search(request_id, query, from_offset, codec)
                    .await,
            ),
            SearchCommand::Shutdown => HandlerOutcome::exit(),
        }
    }

    async fn execute_search(
        &self,
        request_id: RequestId,
        query: String,
        from_offset: u64,
        codec: Codec,
    ) -> SearchResponse {
        let engine = self.search_engine.clone();
        let joined = tokio::task::spawn_blocking(move || {
            engine.try_search(&query, from_offset, &codec)
        })
        .await;

        match joined {
            Ok(Ok(results)) => SearchResponse::SearchCompleted {
                request_id,
                results,
            },
            Ok(Err(error)) => SearchResponse::Error { request_id, error },
            Err(join_error) => SearchResponse::Error {
                request_id,
                error: RlhexError::other(format!("search task failed: {}", join_error)),
            },
        }
    }
}

struct HandlerOutcome {
    response: Option<SearchResponse>,
    done: bool,
}

impl HandlerOutcome {
    fn respond(response: SearchResponse) -> Self {
        Self {
            response: Some(response),
            done: false,
        }
    }

    fn exit() -> Self {
        Self {
            response: None,
            done: true,
        }
    }
}
