//! In-memory storage backend for the MedWard hospital backend.
//!
//! This crate provides an in-memory implementation of the
//! `HospitalStorage` trait from `medward-storage`, with all tables behind
//! a single async `RwLock` so conditional episode updates stay atomic.
//!
//! # Example
//!
//! ```ignore
//! use medward_db_memory::create_storage;
//! use medward_core::NewEpisode;
//!
//! let storage = create_storage();
//! let episode = storage.insert_episode(NewEpisode::open_for(patient_id)).await?;
//! ```

pub mod storage;

pub use medward_storage::{DynStorage, HospitalStorage, StorageError};
pub use storage::InMemoryStorage;

/// Creates a new shareable in-memory storage instance.
pub fn create_storage() -> DynStorage {
    std::sync::Arc::new(InMemoryStorage::new())
}
