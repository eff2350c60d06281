//! Domain types and leaf utilities for the work broker.
//!
//! This crate is dependency-light by design: types, errors, the cache-key
//! digest, pagination, and request validation. Everything that performs I/O
//! lives in `workbroker-cache` or `workbroker-api`.

pub mod error;
pub mod hashing;
pub mod pagination;
pub mod types;
pub mod validate;

pub use error::CoreError;
pub use types::{Pagination, SortDirection, WorkRequest, WorkResponse};
