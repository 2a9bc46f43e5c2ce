//! Treatment episodes and their lifecycle state machine.
//!
//! A treatment episode is one tracked course of treatment for a patient.
//! Its lifecycle is `Open` → `Completed` → `Locked`:
//!
//! - `Open`: created, procedure not completed, not locked
//! - `Completed`: `procedure_completed` set, still mutable
//! - `Locked`: terminal; no field mutation is permitted
//!
//! Locking is one-way. Rotation (locking a completed episode and opening a
//! fresh one) is driven by `medward-clinical`; this module only owns the
//! per-record state rules.

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime, Time};

use crate::error::{CoreError, Result};
use crate::patient::PatientId;

/// Primary key type for treatment episodes.
pub type EpisodeId = i64;

/// Lifecycle state derived from the `procedure_completed`/`locked` flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EpisodeState {
    Open,
    Completed,
    Locked,
}

impl std::fmt::Display for EpisodeState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::Completed => write!(f, "completed"),
            Self::Locked => write!(f, "locked"),
        }
    }
}

/// One course of treatment for a patient.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreatmentEpisode {
    pub id: EpisodeId,
    pub patient_id: PatientId,
    pub department: Option<String>,
    pub doctor: Option<String>,
    pub treatment: Option<String>,
    pub subtype: Option<String>,
    pub procedure_date: Option<Date>,
    pub procedure_time: Option<Time>,
    pub procedure_completed: bool,
    pub locked: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl TreatmentEpisode {
    /// Current lifecycle state.
    ///
    /// A locked episode reports `Locked` regardless of its completion
    /// flag, since lock is terminal.
    pub fn state(&self) -> EpisodeState {
        if self.locked {
            EpisodeState::Locked
        } else if self.procedure_completed {
            EpisodeState::Completed
        } else {
            EpisodeState::Open
        }
    }

    /// Sets the completion flag, optionally overwriting the procedure
    /// date/time.
    ///
    /// Does not lock the episode. Fails with [`CoreError::EpisodeLocked`]
    /// on a locked episode, leaving the record untouched.
    pub fn set_completion(
        &mut self,
        completed: bool,
        date: Option<Date>,
        time: Option<Time>,
    ) -> Result<()> {
        if self.locked {
            return Err(CoreError::episode_locked(self.id));
        }
        self.procedure_completed = completed;
        if date.is_some() {
            self.procedure_date = date;
        }
        if time.is_some() {
            self.procedure_time = time;
        }
        Ok(())
    }

    /// Locks the episode. One-way: there is no unlock.
    pub fn lock(&mut self) {
        self.locked = true;
    }
}

/// Fields for inserting a fresh episode. New episodes always start `Open`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewEpisode {
    pub patient_id: PatientId,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub doctor: Option<String>,
    #[serde(default)]
    pub treatment: Option<String>,
    #[serde(default)]
    pub subtype: Option<String>,
    #[serde(default)]
    pub procedure_date: Option<Date>,
    #[serde(default)]
    pub procedure_time: Option<Time>,
}

impl NewEpisode {
    /// An empty open episode for the given patient.
    pub fn open_for(patient_id: PatientId) -> Self {
        Self {
            patient_id,
            ..Self::default()
        }
    }

    /// The successor episode opened by a rotation.
    ///
    /// Department and doctor carry over from the episode being retired;
    /// treatment-specific fields start empty.
    pub fn rotation_from(previous: &TreatmentEpisode) -> Self {
        Self {
            patient_id: previous.patient_id,
            department: previous.department.clone(),
            doctor: previous.doctor.clone(),
            treatment: None,
            subtype: None,
            procedure_date: None,
            procedure_time: None,
        }
    }
}
