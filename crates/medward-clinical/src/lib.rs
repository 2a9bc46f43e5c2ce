//! # medward-clinical
//!
//! Domain services for the MedWard hospital backend: the
//! treatment-episode lifecycle ([`EpisodeService`]), account registration
//! and authentication ([`AccountService`]), and thin append/list
//! operations over clinical child records ([`RecordsService`]).
//!
//! All services operate through the `HospitalStorage` collaborator; none
//! hold in-process locks. The lifecycle invariants (no mutation after
//! lock, no double rotation) are enforced by the storage layer's
//! conditional updates.

pub mod accounts;
pub mod episodes;
pub mod error;
pub mod records;

pub use accounts::AccountService;
pub use episodes::{EpisodeService, RotationOutcome};
pub use error::{ClinicalError, ClinicalResult};
pub use records::RecordsService;
