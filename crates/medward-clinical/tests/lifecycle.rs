//! End-to-end lifecycle tests over the in-memory storage backend.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use time::macros::date;

use medward_auth::{AuthConfig, AuthError, TokenIssuer};
use medward_clinical::{AccountService, ClinicalError, EpisodeService};
use medward_core::{CoreError, EpisodeState, NewEpisode, NewPatient};
use medward_db_memory::create_storage;
use medward_notifications::{EmailMessage, Mailer, NotificationError, Notifier};
use medward_storage::DynStorage;

/// Mailer double that always reports a network failure.
struct FailingMailer {
    attempts: AtomicUsize,
}

#[async_trait]
impl Mailer for FailingMailer {
    async fn send(&self, _message: &EmailMessage) -> Result<(), NotificationError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(NotificationError::SendFailed("simulated network error".into()))
    }

    fn transport_name(&self) -> &'static str {
        "failing"
    }
}

fn failing_notifier() -> (Notifier, Arc<FailingMailer>) {
    let mailer = Arc::new(FailingMailer {
        attempts: AtomicUsize::new(0),
    });
    (Notifier::new(mailer.clone()), mailer)
}

fn token_issuer() -> TokenIssuer {
    TokenIssuer::new(&AuthConfig {
        token_secret: "lifecycle-test-secret".to_string(),
        ..AuthConfig::default()
    })
    .unwrap()
}

fn alice() -> NewPatient {
    NewPatient {
        name: "Alice Example".to_string(),
        dob: date!(1990 - 04 - 12),
        gender: "female".to_string(),
        phone: "555-0101".to_string(),
        email: "alice@example.com".to_string(),
        username: "alice".to_string(),
        department: Some("Orthopedics".to_string()),
        doctor: Some("Dr. Rao".to_string()),
        treatment: None,
        treatment_subtype: None,
        procedure_date: None,
        procedure_time: None,
    }
}

async fn register_alice(storage: &DynStorage) -> medward_core::Patient {
    let (notifier, _) = failing_notifier();
    let accounts = AccountService::new(storage.clone(), token_issuer(), notifier);
    accounts.register_patient(alice(), "correct horse").await.unwrap()
}

#[tokio::test]
async fn registration_survives_notification_failure() {
    let storage = create_storage();
    let (notifier, mailer) = failing_notifier();
    let accounts = AccountService::new(storage.clone(), token_issuer(), notifier);

    let patient = accounts
        .register_patient(alice(), "correct horse")
        .await
        .unwrap();

    // The mailer was tried and failed, yet the record exists.
    assert_eq!(mailer.attempts.load(Ordering::SeqCst), 1);
    let stored = storage.patient(patient.id).await.unwrap().unwrap();
    assert_eq!(stored.username, "alice");
    // The raw password is never stored
    assert!(stored.password_hash.starts_with("$argon2id$"));
}

#[tokio::test]
async fn authentication_issues_a_compact_token() {
    let storage = create_storage();
    let (notifier, _) = failing_notifier();
    let accounts = AccountService::new(storage.clone(), token_issuer(), notifier);
    accounts
        .register_patient(alice(), "correct horse")
        .await
        .unwrap();

    let issued = accounts
        .authenticate_patient("alice", "correct horse")
        .await
        .unwrap();
    assert_eq!(issued.token.split('.').count(), 3);

    // Wrong password and unknown user are the same failure to a caller.
    let err = accounts
        .authenticate_patient("alice", "wrong")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ClinicalError::Auth(AuthError::InvalidCredentials)
    ));
    let err = accounts
        .authenticate_patient("nobody", "correct horse")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ClinicalError::Auth(AuthError::InvalidCredentials)
    ));
}

#[tokio::test]
async fn rotate_does_nothing_while_the_episode_is_open() {
    let storage = create_storage();
    let patient = register_alice(&storage).await;
    let episodes = EpisodeService::new(storage.clone());

    episodes
        .create_episode(NewEpisode {
            treatment: Some("Physio".to_string()),
            ..NewEpisode::open_for(patient.id)
        })
        .await
        .unwrap();

    let outcome = episodes.rotate_if_due(patient.id).await.unwrap();
    assert!(!outcome.rotated);
    assert!(outcome.new_episode_id.is_none());
    assert_eq!(episodes.episode_history(patient.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn rotate_with_no_episode_at_all_is_a_no_op() {
    let storage = create_storage();
    let patient = register_alice(&storage).await;
    let episodes = EpisodeService::new(storage.clone());

    let outcome = episodes.rotate_if_due(patient.id).await.unwrap();
    assert!(!outcome.rotated);
}

#[tokio::test]
async fn completed_episode_rotates_once() {
    let storage = create_storage();
    let patient = register_alice(&storage).await;
    let episodes = EpisodeService::new(storage.clone());

    let e1 = episodes
        .create_episode(NewEpisode {
            department: Some("Orthopedics".to_string()),
            doctor: Some("Dr. Rao".to_string()),
            treatment: Some("Physio".to_string()),
            ..NewEpisode::open_for(patient.id)
        })
        .await
        .unwrap();

    // Completion does not lock.
    let completed = episodes.mark_complete(e1.id, true, None, None).await.unwrap();
    assert!(completed.procedure_completed);
    assert!(!completed.locked);
    assert_eq!(completed.state(), EpisodeState::Completed);

    let outcome = episodes.rotate_if_due(patient.id).await.unwrap();
    assert!(outcome.rotated);
    let e2_id = outcome.new_episode_id.unwrap();

    // E1 is retired, E2 is the fresh current episode.
    let retired = storage.episode(e1.id).await.unwrap().unwrap();
    assert!(retired.locked);
    assert_eq!(retired.state(), EpisodeState::Locked);

    let fresh = storage.episode(e2_id).await.unwrap().unwrap();
    assert!(!fresh.procedure_completed);
    assert!(!fresh.locked);
    assert_eq!(fresh.department.as_deref(), Some("Orthopedics"));
    assert_eq!(fresh.doctor.as_deref(), Some("Dr. Rao"));
    assert!(fresh.treatment.is_none());
    assert!(fresh.subtype.is_none());

    let current = episodes.current_episode(patient.id).await.unwrap().unwrap();
    assert_eq!(current.id, e2_id);

    // Idempotent: the fresh episode is open, so nothing rotates again.
    let second = episodes.rotate_if_due(patient.id).await.unwrap();
    assert!(!second.rotated);
    assert_eq!(episodes.episode_history(patient.id).await.unwrap().len(), 2);
}

#[tokio::test]
async fn locked_episode_rejects_completion_changes() {
    let storage = create_storage();
    let patient = register_alice(&storage).await;
    let episodes = EpisodeService::new(storage.clone());

    let e1 = episodes
        .create_episode(NewEpisode {
            treatment: Some("Physio".to_string()),
            ..NewEpisode::open_for(patient.id)
        })
        .await
        .unwrap();
    episodes.mark_complete(e1.id, true, None, None).await.unwrap();
    episodes.rotate_if_due(patient.id).await.unwrap();

    let err = episodes
        .mark_complete(e1.id, false, None, None)
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::EpisodeLocked { episode_id } if episode_id == e1.id));

    // The locked record kept its state.
    let stored = storage.episode(e1.id).await.unwrap().unwrap();
    assert!(stored.procedure_completed);
    assert!(stored.locked);
}

#[tokio::test]
async fn rotation_notification_failure_does_not_block_rotation() {
    let storage = create_storage();
    let patient = register_alice(&storage).await;
    let (notifier, mailer) = failing_notifier();
    let episodes = EpisodeService::new(storage.clone()).with_notifier(notifier);

    let e1 = episodes
        .create_episode(NewEpisode::open_for(patient.id))
        .await
        .unwrap();
    episodes.mark_complete(e1.id, true, None, None).await.unwrap();

    let outcome = episodes.rotate_if_due(patient.id).await.unwrap();
    assert!(outcome.rotated);
    // One status email per lifecycle change was attempted and swallowed.
    assert!(mailer.attempts.load(Ordering::SeqCst) >= 1);
}

#[tokio::test]
async fn mark_complete_on_missing_episode_is_not_found() {
    let storage = create_storage();
    register_alice(&storage).await;
    let episodes = EpisodeService::new(storage.clone());

    let err = episodes.mark_complete(9999, true, None, None).await.unwrap_err();
    assert!(matches!(err, CoreError::NotFound { .. }));
}
