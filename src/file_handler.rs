//! File handling: whole-file byte storage with bounded slicing.
//!
//! The viewed file is loaded once and never mutated afterwards. Small files are read
//! into memory, large files are memory-mapped; both are exposed as one immutable
//! byte slice through [`ByteStore`].

pub mod factory;
pub mod store;
pub mod validation;

pub use factory::ByteStoreFactory;
pub use store::{ByteSource, ByteStore};
pub use validation::validate_file_path;
