//! Storage traits for the MedWard persistence abstraction layer.
//!
//! This module defines the contract every storage backend must implement:
//! CRUD by primary key and by unique fields, cascading deletes from parent
//! accounts to their child records, and the episode operations.
//!
//! Episode mutations are expressed as *conditional* updates so that the
//! lifecycle invariants (no mutation after lock, no double rotation) hold
//! under the backend's native transaction/row-locking guarantees even when
//! multiple process instances run concurrently. In-process locking is
//! deliberately not part of the contract.

use async_trait::async_trait;
use time::{Date, Time};

use medward_core::{
    Appointment, AppointmentId, Doctor, DoctorFeedback, DoctorId, EpisodeId, Feedback,
    InstructionStatus, NewAppointment, NewDoctor, NewDoctorFeedback, NewEpisode, NewFeedback,
    NewInstructionStatus, NewPatient, NewProgress, Patient, PatientId, Progress, TreatmentEpisode,
};

use crate::error::StorageError;

/// The main storage trait all MedWard backends must implement.
///
/// Implementations must be thread-safe (`Send + Sync`).
///
/// # Example
///
/// ```ignore
/// use medward_storage::{HospitalStorage, StorageError};
/// use medward_core::Patient;
///
/// async fn get_patient(
///     storage: &dyn HospitalStorage,
///     id: i64,
/// ) -> Result<Patient, StorageError> {
///     storage
///         .patient(id)
///         .await?
///         .ok_or_else(|| StorageError::not_found("Patient", id))
/// }
/// ```
#[async_trait]
pub trait HospitalStorage: Send + Sync {
    // ==================== Patients ====================

    /// Inserts a new patient with an already-hashed password.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Conflict` if the username, email, or phone
    /// collides with an existing patient.
    async fn insert_patient(
        &self,
        new: NewPatient,
        password_hash: String,
    ) -> Result<Patient, StorageError>;

    /// Reads a patient by primary key. Returns `None` if absent.
    async fn patient(&self, id: PatientId) -> Result<Option<Patient>, StorageError>;

    /// Reads a patient by unique username. Returns `None` if absent.
    async fn patient_by_username(&self, username: &str) -> Result<Option<Patient>, StorageError>;

    /// Replaces a patient row.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the patient does not exist.
    /// Returns `StorageError::Conflict` if a unique field now collides
    /// with another patient.
    async fn update_patient(&self, patient: Patient) -> Result<Patient, StorageError>;

    /// Deletes a patient and cascades to every owned child record
    /// (episodes, appointments, feedback, doctor feedback, progress,
    /// instruction statuses).
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the patient does not exist.
    async fn delete_patient(&self, id: PatientId) -> Result<(), StorageError>;

    // ==================== Doctors ====================

    /// Inserts a new doctor with an already-hashed password.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Conflict` on a username or email collision.
    async fn insert_doctor(
        &self,
        new: NewDoctor,
        password_hash: String,
    ) -> Result<Doctor, StorageError>;

    /// Reads a doctor by primary key. Returns `None` if absent.
    async fn doctor(&self, id: DoctorId) -> Result<Option<Doctor>, StorageError>;

    /// Reads a doctor by unique username. Returns `None` if absent.
    async fn doctor_by_username(&self, username: &str) -> Result<Option<Doctor>, StorageError>;

    /// Deletes a doctor, cascading to its appointments and authored
    /// doctor-feedback entries.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the doctor does not exist.
    async fn delete_doctor(&self, id: DoctorId) -> Result<(), StorageError>;

    // ==================== Treatment episodes ====================

    /// Inserts a fresh `Open` episode and repoints the owning patient's
    /// `current_episode_id` to it, atomically.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::InvalidReference` if the patient does not
    /// exist.
    async fn insert_episode(&self, new: NewEpisode) -> Result<TreatmentEpisode, StorageError>;

    /// Reads an episode by primary key. Returns `None` if absent.
    async fn episode(&self, id: EpisodeId) -> Result<Option<TreatmentEpisode>, StorageError>;

    /// Resolves the patient's current episode via its explicit pointer.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the patient does not exist.
    async fn current_episode(
        &self,
        patient_id: PatientId,
    ) -> Result<Option<TreatmentEpisode>, StorageError>;

    /// Lists a patient's episodes ordered by creation (oldest first).
    async fn episodes_for_patient(
        &self,
        patient_id: PatientId,
    ) -> Result<Vec<TreatmentEpisode>, StorageError>;

    /// Sets the completion flag (and optionally the procedure date/time)
    /// as a single conditional update that applies only while the episode
    /// is unlocked.
    ///
    /// Returns `Ok(None)` when the episode is locked; the row is left
    /// untouched in that case.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the episode does not exist.
    async fn set_episode_completion(
        &self,
        id: EpisodeId,
        completed: bool,
        date: Option<Date>,
        time: Option<Time>,
    ) -> Result<Option<TreatmentEpisode>, StorageError>;

    /// One-way test-and-set: locks the episode only if it is currently
    /// completed and unlocked.
    ///
    /// Returns `Ok(None)` when the precondition does not hold (already
    /// locked, or not completed). This is the guard that makes rotation
    /// idempotent across concurrent callers.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the episode does not exist.
    async fn lock_episode_if_completed(
        &self,
        id: EpisodeId,
    ) -> Result<Option<TreatmentEpisode>, StorageError>;

    // ==================== Appointments ====================

    /// Books an appointment between an existing patient and doctor.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::InvalidReference` if either party is
    /// missing.
    async fn insert_appointment(&self, new: NewAppointment)
    -> Result<Appointment, StorageError>;

    /// Lists a patient's appointments ordered by time.
    async fn appointments_for_patient(
        &self,
        patient_id: PatientId,
    ) -> Result<Vec<Appointment>, StorageError>;

    /// Lists a doctor's appointments ordered by time.
    async fn appointments_for_doctor(
        &self,
        doctor_id: DoctorId,
    ) -> Result<Vec<Appointment>, StorageError>;

    /// Cancels an appointment.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the appointment does not exist.
    async fn delete_appointment(&self, id: AppointmentId) -> Result<(), StorageError>;

    // ==================== Clinical records ====================

    /// Appends patient feedback.
    async fn insert_feedback(&self, new: NewFeedback) -> Result<Feedback, StorageError>;

    /// Lists a patient's feedback entries.
    async fn feedback_for_patient(
        &self,
        patient_id: PatientId,
    ) -> Result<Vec<Feedback>, StorageError>;

    /// Appends doctor feedback on a patient.
    async fn insert_doctor_feedback(
        &self,
        new: NewDoctorFeedback,
    ) -> Result<DoctorFeedback, StorageError>;

    /// Lists the doctor feedback left on a patient.
    async fn doctor_feedback_for_patient(
        &self,
        patient_id: PatientId,
    ) -> Result<Vec<DoctorFeedback>, StorageError>;

    /// Appends a timestamped progress note.
    async fn insert_progress(&self, new: NewProgress) -> Result<Progress, StorageError>;

    /// Lists a patient's progress notes ordered by timestamp.
    async fn progress_for_patient(
        &self,
        patient_id: PatientId,
    ) -> Result<Vec<Progress>, StorageError>;

    /// Appends an instruction status entry.
    async fn insert_instruction_status(
        &self,
        new: NewInstructionStatus,
    ) -> Result<InstructionStatus, StorageError>;

    /// Lists a patient's instruction statuses ordered by group and
    /// `instruction_index`.
    async fn instruction_statuses_for_patient(
        &self,
        patient_id: PatientId,
    ) -> Result<Vec<InstructionStatus>, StorageError>;

    // ==================== Metadata ====================

    /// Returns the name of this storage backend for logging/debugging.
    fn backend_name(&self) -> &'static str;
}
