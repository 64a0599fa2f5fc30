//! billbook-core
//!
//! Business logic over the ledger tree: validated mutations, prefix search,
//! balance summaries, and the persistence gateway contract.
//! Depends on billbook-domain. No CLI, no terminal I/O, no direct file access.

pub mod codec;
pub mod error;
pub mod input;
pub mod ledger_service;
pub mod search;
pub mod storage;
pub mod summary_service;


pub use error::{CoreError, CoreResult, IndexTarget};
pub use ledger_service::*;
pub use search::*;
pub use storage::{KeyValueStore, MemoryStore, DEFAULT_STORAGE_KEY};
pub use summary_service::*;
