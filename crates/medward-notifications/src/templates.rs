//! Canned notification messages.

use crate::types::EmailMessage;

/// Welcome email sent after a successful registration.
pub fn registration(to: &str, name: &str) -> EmailMessage {
    EmailMessage::new(
        to,
        "Welcome to MedWard Hospital!",
        format!(
            "Hello {name},\n\nYou have registered in MedWard Hospital's patient portal.\n\nThank you!"
        ),
    )
}

/// Status update when a procedure's completion flag changes.
pub fn procedure_status(to: &str, name: &str, treatment: Option<&str>, completed: bool) -> EmailMessage {
    let treatment = treatment.unwrap_or("your treatment");
    let status = if completed {
        "marked as completed"
    } else {
        "reopened"
    };
    EmailMessage::new(
        to,
        "Treatment status update",
        format!("Hello {name},\n\nThe procedure for {treatment} has been {status}.\n\nMedWard Hospital"),
    )
}

/// Sent when a completed course is archived and a fresh one opened.
pub fn episode_rotated(to: &str, name: &str, department: Option<&str>) -> EmailMessage {
    let department = department.unwrap_or("your department");
    EmailMessage::new(
        to,
        "New treatment course opened",
        format!(
            "Hello {name},\n\nYour completed treatment course has been archived and a new course \
             has been opened with {department}.\n\nMedWard Hospital"
        ),
    )
}
