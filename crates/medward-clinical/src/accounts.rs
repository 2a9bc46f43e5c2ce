//! Account registration and authentication.
//!
//! Patients and doctors share one credential path: hash on registration,
//! verify through the `Credentials` capability, issue a role-tagged token
//! on success. The welcome email is best-effort; registration succeeds
//! even when delivery fails.

use tracing::info;

use medward_auth::{AuthError, Credentials, IssuedToken, Role, TokenIssuer, password, subject_claims};
use medward_core::{CoreError, Doctor, NewDoctor, NewPatient, Patient};
use medward_notifications::Notifier;
use medward_storage::DynStorage;

use crate::error::ClinicalResult;

/// Registration and login for both account kinds.
pub struct AccountService {
    storage: DynStorage,
    tokens: TokenIssuer,
    notifier: Notifier,
}

impl AccountService {
    pub fn new(storage: DynStorage, tokens: TokenIssuer, notifier: Notifier) -> Self {
        Self {
            storage,
            tokens,
            notifier,
        }
    }

    /// Registers a patient.
    ///
    /// Unique-field collisions surface as conflicts. The welcome email is
    /// sent after the insert returns and its failure is only logged.
    pub async fn register_patient(
        &self,
        new: NewPatient,
        raw_password: &str,
    ) -> ClinicalResult<Patient> {
        if raw_password.is_empty() {
            return Err(CoreError::validation("password must not be empty").into());
        }

        let password_hash = password::hash(raw_password)?;
        let patient = self.storage.insert_patient(new, password_hash).await?;
        info!(patient_id = patient.id, "patient registered");

        self.notifier
            .notify_registration(&patient.email, &patient.name)
            .await;

        Ok(patient)
    }

    /// Registers a doctor. Same credential path as patients.
    pub async fn register_doctor(
        &self,
        new: NewDoctor,
        raw_password: &str,
    ) -> ClinicalResult<Doctor> {
        if raw_password.is_empty() {
            return Err(CoreError::validation("password must not be empty").into());
        }

        let password_hash = password::hash(raw_password)?;
        let doctor = self.storage.insert_doctor(new, password_hash).await?;
        info!(doctor_id = doctor.id, "doctor registered");

        self.notifier
            .notify_registration(&doctor.email, &doctor.name)
            .await;

        Ok(doctor)
    }

    /// Verifies a patient's password and issues an access token.
    ///
    /// Unknown username and wrong password are indistinguishable to the
    /// caller; both are `AuthError::InvalidCredentials`.
    pub async fn authenticate_patient(
        &self,
        username: &str,
        raw_password: &str,
    ) -> ClinicalResult<IssuedToken> {
        let Some(patient) = self.storage.patient_by_username(username).await? else {
            return Err(AuthError::InvalidCredentials.into());
        };
        if !patient.verify_password(raw_password)? {
            return Err(AuthError::InvalidCredentials.into());
        }

        let issued = self
            .tokens
            .issue(subject_claims(patient.id, Role::Patient), None)?;
        info!(patient_id = patient.id, "patient authenticated");
        Ok(issued)
    }

    /// Verifies a doctor's password and issues an access token.
    pub async fn authenticate_doctor(
        &self,
        username: &str,
        raw_password: &str,
    ) -> ClinicalResult<IssuedToken> {
        let Some(doctor) = self.storage.doctor_by_username(username).await? else {
            return Err(AuthError::InvalidCredentials.into());
        };
        if !doctor.verify_password(raw_password)? {
            return Err(AuthError::InvalidCredentials.into());
        }

        let issued = self
            .tokens
            .issue(subject_claims(doctor.id, Role::Doctor), None)?;
        info!(doctor_id = doctor.id, "doctor authenticated");
        Ok(issued)
    }
}
