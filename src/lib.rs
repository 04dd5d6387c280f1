//! Thin clients for remote task storage
//!
//! This crate contains two interchangeable task storage clients:
//! - [`task::TableTaskStore`] drives a table-oriented backend SDK through
//!   its query interface
//! - [`task::RestTaskStore`] issues plain HTTP requests against a REST
//!   task endpoint
//!
//! Both implement [`task::TaskRepository`], so callers can swap transports
//! without touching call sites.

pub mod error;
pub mod task;

pub use error::Error;
pub type Result<T> = std::result::Result<T, Error>;
