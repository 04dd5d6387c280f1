//! Task module
//!
//! Record types plus the two storage clients.

mod backend;
mod model;
mod repository;
mod rest_store;
mod table_store;

pub use backend::{BackendError, BackendResult, Filter, MemoryBackend, TableBackend};
pub use model::*;
pub use repository::TaskRepository;
pub use rest_store::{RestConfig, RestTaskStore};
pub use table_store::TableTaskStore;
