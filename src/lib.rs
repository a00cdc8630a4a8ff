#![doc = include_str!("../README.md")]

pub mod api;
pub mod cli;
pub mod error;
pub mod extract;
pub mod highlight;
pub mod log;
mod macros;
pub mod patterns;
pub mod selectors;
pub mod storage;
pub mod store;
pub mod types;

pub use error::{GarimpoError, Result};
pub use extract::{extract_contacts, PageScan};
pub use highlight::{DomOp, Highlighter};
pub use storage::{KeyValueStore, LocalFsStore, MemoryStore};
pub use store::ContactBook;
pub use types::*;
