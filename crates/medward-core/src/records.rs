//! Append-only clinical child records.
//!
//! All of these are exclusively owned by a parent [`crate::Patient`]
//! (doctor feedback also references its authoring [`crate::Doctor`]) and
//! are destroyed with the parent.

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::doctor::DoctorId;
use crate::patient::PatientId;

/// Feedback a patient left for the hospital.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feedback {
    pub id: i64,
    pub patient_id: PatientId,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewFeedback {
    pub patient_id: PatientId,
    pub message: String,
}

/// Feedback a doctor left on a patient's record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorFeedback {
    pub id: i64,
    pub doctor_id: DoctorId,
    pub patient_id: PatientId,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDoctorFeedback {
    pub doctor_id: DoctorId,
    pub patient_id: PatientId,
    pub message: String,
}

/// A timestamped progress note on a patient.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Progress {
    pub id: i64,
    pub patient_id: PatientId,
    pub message: String,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProgress {
    pub patient_id: PatientId,
    pub message: String,
}

/// Whether a patient followed one treatment instruction on a given day.
///
/// `instruction_index` orders instructions within a `group`; `followed`
/// records the patient's answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstructionStatus {
    pub id: i64,
    pub patient_id: PatientId,
    pub date: Date,
    pub treatment: String,
    pub subtype: Option<String>,
    pub group: String,
    pub instruction_index: i32,
    pub instruction_text: String,
    pub followed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewInstructionStatus {
    pub patient_id: PatientId,
    pub date: Date,
    pub treatment: String,
    #[serde(default)]
    pub subtype: Option<String>,
    pub group: String,
    pub instruction_index: i32,
    pub instruction_text: String,
    #[serde(default)]
    pub followed: bool,
}
