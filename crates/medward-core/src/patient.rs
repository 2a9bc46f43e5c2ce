//! Patient account and its denormalized current-treatment snapshot.

use serde::{Deserialize, Serialize};
use time::{Date, Time};

use crate::episode::EpisodeId;

/// Primary key type for patients.
pub type PatientId = i64;

/// A registered patient.
///
/// Besides identity and credentials, the patient row carries a denormalized
/// snapshot of the current treatment (department, doctor, treatment,
/// subtype, procedure date/time, completion flag). The authoritative
/// per-course record is [`crate::TreatmentEpisode`]; the snapshot exists so
/// list views do not need a join.
///
/// `username`, `email` and `phone` are unique across all patients; the
/// storage backend enforces this and reports violations as conflicts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    pub id: PatientId,
    pub name: String,
    pub dob: Date,
    pub gender: String,
    pub phone: String,
    pub email: String,
    pub username: String,

    /// PHC-formatted password hash.
    ///
    /// Stored for password authentication. When exposing Patient via an
    /// API response, filter this field out manually.
    pub password_hash: String,

    // Denormalized current-treatment snapshot
    pub department: Option<String>,
    pub doctor: Option<String>,
    pub treatment: Option<String>,
    pub treatment_subtype: Option<String>,
    pub procedure_date: Option<Date>,
    pub procedure_time: Option<Time>,
    pub procedure_completed: Option<bool>,

    /// Explicit pointer to the patient's current treatment episode.
    ///
    /// Repointed transactionally whenever an episode is created or
    /// rotated, so "current" never depends on query ordering.
    pub current_episode_id: Option<EpisodeId>,
}

/// Fields required to register a new patient.
///
/// The raw password is deliberately not part of this struct; it is passed
/// separately to the registration operation and only its hash is stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPatient {
    pub name: String,
    pub dob: Date,
    pub gender: String,
    pub phone: String,
    pub email: String,
    pub username: String,

    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub doctor: Option<String>,
    #[serde(default)]
    pub treatment: Option<String>,
    #[serde(default)]
    pub treatment_subtype: Option<String>,
    #[serde(default)]
    pub procedure_date: Option<Date>,
    #[serde(default)]
    pub procedure_time: Option<Time>,
}
