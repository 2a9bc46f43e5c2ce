use std::collections::HashMap;

use async_trait::async_trait;
use time::{Date, Time};
use tokio::sync::RwLock;

use medward_core::{
    Appointment, AppointmentId, Doctor, DoctorFeedback, DoctorId, EpisodeId, EpisodeState,
    Feedback, InstructionStatus, NewAppointment, NewDoctor, NewDoctorFeedback, NewEpisode,
    NewFeedback, NewInstructionStatus, NewPatient, NewProgress, Patient, PatientId, Progress,
    TreatmentEpisode, now_utc,
};
use medward_storage::{HospitalStorage, StorageError};

/// All tables plus the shared id sequence.
///
/// Kept behind a single lock so the conditional episode updates and the
/// insert-episode/repoint-patient pair are atomic, mirroring what a
/// relational backend does with row locks in one transaction.
#[derive(Debug, Default)]
struct Tables {
    patients: HashMap<PatientId, Patient>,
    doctors: HashMap<DoctorId, Doctor>,
    episodes: HashMap<EpisodeId, TreatmentEpisode>,
    appointments: HashMap<AppointmentId, Appointment>,
    feedback: HashMap<i64, Feedback>,
    doctor_feedback: HashMap<i64, DoctorFeedback>,
    progress: HashMap<i64, Progress>,
    instruction_statuses: HashMap<i64, InstructionStatus>,
    next_id: i64,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn check_patient_unique(
        &self,
        username: &str,
        email: &str,
        phone: &str,
        exclude: Option<PatientId>,
    ) -> Result<(), StorageError> {
        for patient in self.patients.values() {
            if Some(patient.id) == exclude {
                continue;
            }
            if patient.username == username {
                return Err(StorageError::conflict("Patient", "username", username));
            }
            if patient.email == email {
                return Err(StorageError::conflict("Patient", "email", email));
            }
            if patient.phone == phone {
                return Err(StorageError::conflict("Patient", "phone", phone));
            }
        }
        Ok(())
    }

    fn check_doctor_unique(&self, username: &str, email: &str) -> Result<(), StorageError> {
        for doctor in self.doctors.values() {
            if doctor.username == username {
                return Err(StorageError::conflict("Doctor", "username", username));
            }
            if doctor.email == email {
                return Err(StorageError::conflict("Doctor", "email", email));
            }
        }
        Ok(())
    }
}

/// In-memory MedWard storage backend.
///
/// Intended for tests and local development; production deployments wire
/// in a relational backend behind the same trait.
#[derive(Debug, Default)]
pub struct InMemoryStorage {
    inner: RwLock<Tables>,
}

impl InMemoryStorage {
    /// Creates a new, empty in-memory storage.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HospitalStorage for InMemoryStorage {
    // ==================== Patients ====================

    async fn insert_patient(
        &self,
        new: NewPatient,
        password_hash: String,
    ) -> Result<Patient, StorageError> {
        let mut tables = self.inner.write().await;
        tables.check_patient_unique(&new.username, &new.email, &new.phone, None)?;

        let id = tables.next_id();
        let patient = Patient {
            id,
            name: new.name,
            dob: new.dob,
            gender: new.gender,
            phone: new.phone,
            email: new.email,
            username: new.username,
            password_hash,
            department: new.department,
            doctor: new.doctor,
            treatment: new.treatment,
            treatment_subtype: new.treatment_subtype,
            procedure_date: new.procedure_date,
            procedure_time: new.procedure_time,
            procedure_completed: None,
            current_episode_id: None,
        };
        tables.patients.insert(id, patient.clone());
        Ok(patient)
    }

    async fn patient(&self, id: PatientId) -> Result<Option<Patient>, StorageError> {
        let tables = self.inner.read().await;
        Ok(tables.patients.get(&id).cloned())
    }

    async fn patient_by_username(&self, username: &str) -> Result<Option<Patient>, StorageError> {
        let tables = self.inner.read().await;
        Ok(tables
            .patients
            .values()
            .find(|p| p.username == username)
            .cloned())
    }

    async fn update_patient(&self, patient: Patient) -> Result<Patient, StorageError> {
        let mut tables = self.inner.write().await;
        if !tables.patients.contains_key(&patient.id) {
            return Err(StorageError::not_found("Patient", patient.id));
        }
        tables.check_patient_unique(
            &patient.username,
            &patient.email,
            &patient.phone,
            Some(patient.id),
        )?;
        tables.patients.insert(patient.id, patient.clone());
        Ok(patient)
    }

    async fn delete_patient(&self, id: PatientId) -> Result<(), StorageError> {
        let mut tables = self.inner.write().await;
        if tables.patients.remove(&id).is_none() {
            return Err(StorageError::not_found("Patient", id));
        }
        tables.episodes.retain(|_, e| e.patient_id != id);
        tables.appointments.retain(|_, a| a.patient_id != id);
        tables.feedback.retain(|_, f| f.patient_id != id);
        tables.doctor_feedback.retain(|_, f| f.patient_id != id);
        tables.progress.retain(|_, p| p.patient_id != id);
        tables.instruction_statuses.retain(|_, s| s.patient_id != id);
        Ok(())
    }

    // ==================== Doctors ====================

    async fn insert_doctor(
        &self,
        new: NewDoctor,
        password_hash: String,
    ) -> Result<Doctor, StorageError> {
        let mut tables = self.inner.write().await;
        tables.check_doctor_unique(&new.username, &new.email)?;

        let id = tables.next_id();
        let doctor = Doctor {
            id,
            name: new.name,
            specialty: new.specialty,
            username: new.username,
            email: new.email,
            password_hash,
        };
        tables.doctors.insert(id, doctor.clone());
        Ok(doctor)
    }

    async fn doctor(&self, id: DoctorId) -> Result<Option<Doctor>, StorageError> {
        let tables = self.inner.read().await;
        Ok(tables.doctors.get(&id).cloned())
    }

    async fn doctor_by_username(&self, username: &str) -> Result<Option<Doctor>, StorageError> {
        let tables = self.inner.read().await;
        Ok(tables
            .doctors
            .values()
            .find(|d| d.username == username)
            .cloned())
    }

    async fn delete_doctor(&self, id: DoctorId) -> Result<(), StorageError> {
        let mut tables = self.inner.write().await;
        if tables.doctors.remove(&id).is_none() {
            return Err(StorageError::not_found("Doctor", id));
        }
        tables.appointments.retain(|_, a| a.doctor_id != id);
        tables.doctor_feedback.retain(|_, f| f.doctor_id != id);
        Ok(())
    }

    // ==================== Treatment episodes ====================

    async fn insert_episode(&self, new: NewEpisode) -> Result<TreatmentEpisode, StorageError> {
        let mut tables = self.inner.write().await;
        if !tables.patients.contains_key(&new.patient_id) {
            return Err(StorageError::invalid_reference(format!(
                "episode references missing patient {}",
                new.patient_id
            )));
        }

        let id = tables.next_id();
        let episode = TreatmentEpisode {
            id,
            patient_id: new.patient_id,
            department: new.department,
            doctor: new.doctor,
            treatment: new.treatment,
            subtype: new.subtype,
            procedure_date: new.procedure_date,
            procedure_time: new.procedure_time,
            procedure_completed: false,
            locked: false,
            created_at: now_utc(),
        };
        tables.episodes.insert(id, episode.clone());

        // Same logical transaction: the new episode becomes current.
        if let Some(patient) = tables.patients.get_mut(&new.patient_id) {
            patient.current_episode_id = Some(id);
        }
        Ok(episode)
    }

    async fn episode(&self, id: EpisodeId) -> Result<Option<TreatmentEpisode>, StorageError> {
        let tables = self.inner.read().await;
        Ok(tables.episodes.get(&id).cloned())
    }

    async fn current_episode(
        &self,
        patient_id: PatientId,
    ) -> Result<Option<TreatmentEpisode>, StorageError> {
        let tables = self.inner.read().await;
        let patient = tables
            .patients
            .get(&patient_id)
            .ok_or_else(|| StorageError::not_found("Patient", patient_id))?;
        Ok(patient
            .current_episode_id
            .and_then(|id| tables.episodes.get(&id))
            .cloned())
    }

    async fn episodes_for_patient(
        &self,
        patient_id: PatientId,
    ) -> Result<Vec<TreatmentEpisode>, StorageError> {
        let tables = self.inner.read().await;
        let mut episodes: Vec<_> = tables
            .episodes
            .values()
            .filter(|e| e.patient_id == patient_id)
            .cloned()
            .collect();
        episodes.sort_by_key(|e| (e.created_at, e.id));
        Ok(episodes)
    }

    async fn set_episode_completion(
        &self,
        id: EpisodeId,
        completed: bool,
        date: Option<Date>,
        time: Option<Time>,
    ) -> Result<Option<TreatmentEpisode>, StorageError> {
        let mut tables = self.inner.write().await;
        let Some(episode) = tables.episodes.get_mut(&id) else {
            return Err(StorageError::not_found("TreatmentEpisode", id));
        };
        // The entity guard is the update condition: a locked row rejects
        // the mutation and we report the failed precondition as None.
        match episode.set_completion(completed, date, time) {
            Ok(()) => Ok(Some(episode.clone())),
            Err(_) => Ok(None),
        }
    }

    async fn lock_episode_if_completed(
        &self,
        id: EpisodeId,
    ) -> Result<Option<TreatmentEpisode>, StorageError> {
        let mut tables = self.inner.write().await;
        let Some(episode) = tables.episodes.get_mut(&id) else {
            return Err(StorageError::not_found("TreatmentEpisode", id));
        };
        if episode.state() != EpisodeState::Completed {
            return Ok(None);
        }
        episode.lock();
        Ok(Some(episode.clone()))
    }

    // ==================== Appointments ====================

    async fn insert_appointment(
        &self,
        new: NewAppointment,
    ) -> Result<Appointment, StorageError> {
        let mut tables = self.inner.write().await;
        if !tables.patients.contains_key(&new.patient_id) {
            return Err(StorageError::invalid_reference(format!(
                "appointment references missing patient {}",
                new.patient_id
            )));
        }
        if !tables.doctors.contains_key(&new.doctor_id) {
            return Err(StorageError::invalid_reference(format!(
                "appointment references missing doctor {}",
                new.doctor_id
            )));
        }

        let id = tables.next_id();
        let appointment = Appointment {
            id,
            patient_id: new.patient_id,
            doctor_id: new.doctor_id,
            appointment_time: new.appointment_time,
        };
        tables.appointments.insert(id, appointment.clone());
        Ok(appointment)
    }

    async fn appointments_for_patient(
        &self,
        patient_id: PatientId,
    ) -> Result<Vec<Appointment>, StorageError> {
        let tables = self.inner.read().await;
        let mut appointments: Vec<_> = tables
            .appointments
            .values()
            .filter(|a| a.patient_id == patient_id)
            .cloned()
            .collect();
        appointments.sort_by_key(|a| (a.appointment_time, a.id));
        Ok(appointments)
    }

    async fn appointments_for_doctor(
        &self,
        doctor_id: DoctorId,
    ) -> Result<Vec<Appointment>, StorageError> {
        let tables = self.inner.read().await;
        let mut appointments: Vec<_> = tables
            .appointments
            .values()
            .filter(|a| a.doctor_id == doctor_id)
            .cloned()
            .collect();
        appointments.sort_by_key(|a| (a.appointment_time, a.id));
        Ok(appointments)
    }

    async fn delete_appointment(&self, id: AppointmentId) -> Result<(), StorageError> {
        let mut tables = self.inner.write().await;
        if tables.appointments.remove(&id).is_none() {
            return Err(StorageError::not_found("Appointment", id));
        }
        Ok(())
    }

    // ==================== Clinical records ====================

    async fn insert_feedback(&self, new: NewFeedback) -> Result<Feedback, StorageError> {
        let mut tables = self.inner.write().await;
        if !tables.patients.contains_key(&new.patient_id) {
            return Err(StorageError::invalid_reference(format!(
                "feedback references missing patient {}",
                new.patient_id
            )));
        }
        let id = tables.next_id();
        let feedback = Feedback {
            id,
            patient_id: new.patient_id,
            message: new.message,
        };
        tables.feedback.insert(id, feedback.clone());
        Ok(feedback)
    }

    async fn feedback_for_patient(
        &self,
        patient_id: PatientId,
    ) -> Result<Vec<Feedback>, StorageError> {
        let tables = self.inner.read().await;
        let mut entries: Vec<_> = tables
            .feedback
            .values()
            .filter(|f| f.patient_id == patient_id)
            .cloned()
            .collect();
        entries.sort_by_key(|f| f.id);
        Ok(entries)
    }

    async fn insert_doctor_feedback(
        &self,
        new: NewDoctorFeedback,
    ) -> Result<DoctorFeedback, StorageError> {
        let mut tables = self.inner.write().await;
        if !tables.patients.contains_key(&new.patient_id) {
            return Err(StorageError::invalid_reference(format!(
                "doctor feedback references missing patient {}",
                new.patient_id
            )));
        }
        if !tables.doctors.contains_key(&new.doctor_id) {
            return Err(StorageError::invalid_reference(format!(
                "doctor feedback references missing doctor {}",
                new.doctor_id
            )));
        }
        let id = tables.next_id();
        let feedback = DoctorFeedback {
            id,
            doctor_id: new.doctor_id,
            patient_id: new.patient_id,
            message: new.message,
        };
        tables.doctor_feedback.insert(id, feedback.clone());
        Ok(feedback)
    }

    async fn doctor_feedback_for_patient(
        &self,
        patient_id: PatientId,
    ) -> Result<Vec<DoctorFeedback>, StorageError> {
        let tables = self.inner.read().await;
        let mut entries: Vec<_> = tables
            .doctor_feedback
            .values()
            .filter(|f| f.patient_id == patient_id)
            .cloned()
            .collect();
        entries.sort_by_key(|f| f.id);
        Ok(entries)
    }

    async fn insert_progress(&self, new: NewProgress) -> Result<Progress, StorageError> {
        let mut tables = self.inner.write().await;
        if !tables.patients.contains_key(&new.patient_id) {
            return Err(StorageError::invalid_reference(format!(
                "progress references missing patient {}",
                new.patient_id
            )));
        }
        let id = tables.next_id();
        let progress = Progress {
            id,
            patient_id: new.patient_id,
            message: new.message,
            timestamp: now_utc(),
        };
        tables.progress.insert(id, progress.clone());
        Ok(progress)
    }

    async fn progress_for_patient(
        &self,
        patient_id: PatientId,
    ) -> Result<Vec<Progress>, StorageError> {
        let tables = self.inner.read().await;
        let mut entries: Vec<_> = tables
            .progress
            .values()
            .filter(|p| p.patient_id == patient_id)
            .cloned()
            .collect();
        entries.sort_by_key(|p| (p.timestamp, p.id));
        Ok(entries)
    }

    async fn insert_instruction_status(
        &self,
        new: NewInstructionStatus,
    ) -> Result<InstructionStatus, StorageError> {
        let mut tables = self.inner.write().await;
        if !tables.patients.contains_key(&new.patient_id) {
            return Err(StorageError::invalid_reference(format!(
                "instruction status references missing patient {}",
                new.patient_id
            )));
        }
        let id = tables.next_id();
        let status = InstructionStatus {
            id,
            patient_id: new.patient_id,
            date: new.date,
            treatment: new.treatment,
            subtype: new.subtype,
            group: new.group,
            instruction_index: new.instruction_index,
            instruction_text: new.instruction_text,
            followed: new.followed,
        };
        tables.instruction_statuses.insert(id, status.clone());
        Ok(status)
    }

    async fn instruction_statuses_for_patient(
        &self,
        patient_id: PatientId,
    ) -> Result<Vec<InstructionStatus>, StorageError> {
        let tables = self.inner.read().await;
        let mut entries: Vec<_> = tables
            .instruction_statuses
            .values()
            .filter(|s| s.patient_id == patient_id)
            .cloned()
            .collect();
        entries.sort_by(|a, b| {
            (&a.group, a.instruction_index, a.id).cmp(&(&b.group, b.instruction_index, b.id))
        });
        Ok(entries)
    }

    // ==================== Metadata ====================

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
