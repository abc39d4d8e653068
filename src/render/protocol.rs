//! Protocol definitions shared between the render coordinator and the search worker.

use crate::codec::Codec;
use crate::error::RlhexError;
use crate::search::SearchResults;

/// Identifier attached to cross-task requests so responses can be correlated.
pub type RequestId = u64;

/// Commands sent from the render coordinator to the search worker.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchCommand {
    ExecuteSearch {
        request_id: RequestId,
        query: String,
        from_offset: u64,
        codec: Codec,
    },
    Shutdown,
}

/// Responses emitted by the search worker back to the coordinator.
#[derive(Debug)]
pub enum SearchResponse {
    SearchCompleted {
        request_id: RequestId,
        results: SearchResults,
    },
    Error {
        request_id: RequestId,
        error: RlhexError,
    },
}

impl SearchResponse {
    pub fn request_id(&self) -> RequestId {
        match self {
            SearchResponse::SearchCompleted { request_id, .. }
            | SearchResponse::Error { request_id, .. } => *request_id,
        }
    }
}
