//! # medward-storage
//!
//! Storage abstraction layer for the MedWard hospital backend.
//!
//! The [`HospitalStorage`] trait is the contract between the domain
//! services and whatever relational backend a deployment wires in; the
//! in-memory implementation lives in `medward-db-memory`.

pub mod error;
pub mod traits;

pub use error::StorageError;
pub use traits::HospitalStorage;

/// Type alias for a shareable storage instance.
pub type DynStorage = std::sync::Arc<dyn HospitalStorage>;
