//! Content-addressed response cache for the work broker.
//!
//! [`store::CacheStore`] is the seam to the external key-value engine;
//! [`memory::MemoryStore`] is the in-process implementation used in tests
//! and single-node deployments; [`gateway::CacheGateway`] owns key
//! derivation and the hit/miss/store protocol.

pub mod gateway;
pub mod memory;
pub mod store;

pub use gateway::{CacheGateway, CacheLookup, DEFAULT_TTL};
pub use memory::MemoryStore;
pub use store::{CacheStore, CacheStoreError};
