//! # medward-core
//!
//! Core domain types for the MedWard hospital backend: patient and doctor
//! accounts, the treatment-episode lifecycle state machine, appointments,
//! clinical child records, and the shared error taxonomy.

pub mod appointment;
pub mod doctor;
pub mod episode;
pub mod error;
pub mod patient;
pub mod records;
pub mod time;

pub use appointment::{Appointment, AppointmentId, NewAppointment};
pub use doctor::{Doctor, DoctorId, NewDoctor};
pub use episode::{EpisodeId, EpisodeState, NewEpisode, TreatmentEpisode};
pub use error::{CoreError, ErrorCategory, Result};
pub use patient::{NewPatient, Patient, PatientId};
pub use records::{
    DoctorFeedback, Feedback, InstructionStatus, NewDoctorFeedback, NewFeedback,
    NewInstructionStatus, NewProgress, Progress,
};
pub use time::now_utc;
