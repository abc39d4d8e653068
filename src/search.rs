pub mod engine;
pub mod investigate;
pub mod pattern;
pub mod worker;

pub use engine::{SearchEngine, SearchHit, SearchResults};
pub use investigate::{investigate, HitDetails};
pub use pattern::{Candidate, FormatTag, PatternExpander};
pub use worker::search_worker_loop;
