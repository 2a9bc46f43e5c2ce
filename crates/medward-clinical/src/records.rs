//! Thin append/list operations over clinical child records.

use medward_core::{
    Appointment, DoctorFeedback, DoctorId, Feedback, InstructionStatus, NewAppointment,
    NewDoctorFeedback, NewFeedback, NewInstructionStatus, NewProgress, PatientId, Progress, Result,
};
use medward_storage::DynStorage;

/// Append-only clinical records: appointments, feedback, progress notes,
/// instruction statuses.
pub struct RecordsService {
    storage: DynStorage,
}

impl RecordsService {
    pub fn new(storage: DynStorage) -> Self {
        Self { storage }
    }

    pub async fn book_appointment(&self, new: NewAppointment) -> Result<Appointment> {
        Ok(self.storage.insert_appointment(new).await?)
    }

    pub async fn appointments_for_patient(&self, patient_id: PatientId) -> Result<Vec<Appointment>> {
        Ok(self.storage.appointments_for_patient(patient_id).await?)
    }

    pub async fn appointments_for_doctor(&self, doctor_id: DoctorId) -> Result<Vec<Appointment>> {
        Ok(self.storage.appointments_for_doctor(doctor_id).await?)
    }

    pub async fn leave_feedback(&self, new: NewFeedback) -> Result<Feedback> {
        Ok(self.storage.insert_feedback(new).await?)
    }

    pub async fn leave_doctor_feedback(&self, new: NewDoctorFeedback) -> Result<DoctorFeedback> {
        Ok(self.storage.insert_doctor_feedback(new).await?)
    }

    pub async fn add_progress_note(&self, new: NewProgress) -> Result<Progress> {
        Ok(self.storage.insert_progress(new).await?)
    }

    pub async fn progress_for_patient(&self, patient_id: PatientId) -> Result<Vec<Progress>> {
        Ok(self.storage.progress_for_patient(patient_id).await?)
    }

    pub async fn record_instruction_status(
        &self,
        new: NewInstructionStatus,
    ) -> Result<InstructionStatus> {
        Ok(self.storage.insert_instruction_status(new).await?)
    }

    pub async fn instruction_statuses_for_patient(
        &self,
        patient_id: PatientId,
    ) -> Result<Vec<InstructionStatus>> {
        Ok(self
            .storage
            .instruction_statuses_for_patient(patient_id)
            .await?)
    }
}
