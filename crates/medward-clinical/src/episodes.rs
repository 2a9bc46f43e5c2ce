//! Treatment-episode lifecycle operations.
//!
//! The state rules live on the entity (`medward-core`); the conditional
//! writes live in the storage contract. This service sequences them:
//! creation never touches prior episodes, completion refuses locked rows,
//! and rotation is a lock-then-open pair guarded by the storage layer's
//! test-and-set so concurrent callers cannot double-rotate.

use time::{Date, Time};
use tracing::{debug, info};

use medward_core::{
    CoreError, EpisodeId, EpisodeState, NewEpisode, PatientId, Result, TreatmentEpisode,
};
use medward_notifications::Notifier;
use medward_storage::DynStorage;

/// What `rotate_if_due` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationOutcome {
    pub rotated: bool,
    pub new_episode_id: Option<EpisodeId>,
}

impl RotationOutcome {
    fn skipped() -> Self {
        Self {
            rotated: false,
            new_episode_id: None,
        }
    }

    fn rotated(new_episode_id: EpisodeId) -> Self {
        Self {
            rotated: true,
            new_episode_id: Some(new_episode_id),
        }
    }
}

/// Lifecycle operations over a patient's treatment episodes.
pub struct EpisodeService {
    storage: DynStorage,
    notifier: Option<Notifier>,
}

impl EpisodeService {
    pub fn new(storage: DynStorage) -> Self {
        Self {
            storage,
            notifier: None,
        }
    }

    /// Attaches a notifier for best-effort status emails.
    pub fn with_notifier(mut self, notifier: Notifier) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Opens a fresh episode for the patient.
    ///
    /// Prior episodes are left untouched; several open episodes may
    /// coexist, and the newest one becomes the patient's current episode.
    pub async fn create_episode(&self, new: NewEpisode) -> Result<TreatmentEpisode> {
        let episode = self.storage.insert_episode(new).await?;
        info!(
            episode_id = episode.id,
            patient_id = episode.patient_id,
            "opened treatment episode"
        );
        Ok(episode)
    }

    /// Sets the completion flag, optionally overwriting the procedure
    /// date/time. Does not lock.
    ///
    /// # Errors
    ///
    /// `CoreError::EpisodeLocked` when the episode is locked; the stored
    /// record is never mutated in that case.
    pub async fn mark_complete(
        &self,
        id: EpisodeId,
        completed: bool,
        date: Option<Date>,
        time: Option<Time>,
    ) -> Result<TreatmentEpisode> {
        let Some(episode) = self
            .storage
            .set_episode_completion(id, completed, date, time)
            .await?
        else {
            return Err(CoreError::episode_locked(id));
        };

        info!(episode_id = id, completed, "episode completion updated");

        if let Some(notifier) = &self.notifier {
            // Best-effort: a failed email never fails the update. Sent
            // after the storage write, never inside it.
            if let Some(patient) = self.storage.patient(episode.patient_id).await? {
                notifier
                    .notify_procedure_status(
                        &patient.email,
                        &patient.name,
                        episode.treatment.as_deref(),
                        completed,
                    )
                    .await;
            }
        }

        Ok(episode)
    }

    /// Rotates the patient's current episode when it is completed:
    /// locks it (one-way) and opens a fresh episode carrying over the
    /// department/doctor, with the treatment-specific fields reset.
    ///
    /// Idempotent: when the current episode is open, already locked, or
    /// another caller rotated first, this returns `rotated: false` and
    /// creates nothing.
    pub async fn rotate_if_due(&self, patient_id: PatientId) -> Result<RotationOutcome> {
        let Some(current) = self.storage.current_episode(patient_id).await? else {
            debug!(patient_id, "no current episode; nothing to rotate");
            return Ok(RotationOutcome::skipped());
        };

        if current.state() != EpisodeState::Completed {
            debug!(
                patient_id,
                episode_id = current.id,
                state = %current.state(),
                "current episode not due for rotation"
            );
            return Ok(RotationOutcome::skipped());
        }

        // The storage test-and-set is the rotation guard: whoever locks
        // the row performs the rotation, everyone else backs off.
        let Some(retired) = self.storage.lock_episode_if_completed(current.id).await? else {
            return Ok(RotationOutcome::skipped());
        };

        let next = self
            .storage
            .insert_episode(NewEpisode::rotation_from(&retired))
            .await?;
        info!(
            patient_id,
            retired_episode_id = retired.id,
            new_episode_id = next.id,
            "rotated treatment episode"
        );

        if let Some(notifier) = &self.notifier {
            if let Some(patient) = self.storage.patient(patient_id).await? {
                notifier
                    .notify_episode_rotated(
                        &patient.email,
                        &patient.name,
                        next.department.as_deref(),
                    )
                    .await;
            }
        }

        Ok(RotationOutcome::rotated(next.id))
    }

    /// The patient's current episode, if any.
    pub async fn current_episode(&self, patient_id: PatientId) -> Result<Option<TreatmentEpisode>> {
        Ok(self.storage.current_episode(patient_id).await?)
    }

    /// Full episode history for a patient, oldest first.
    pub async fn episode_history(&self, patient_id: PatientId) -> Result<Vec<TreatmentEpisode>> {
        Ok(self.storage.episodes_for_patient(patient_id).await?)
    }
}
