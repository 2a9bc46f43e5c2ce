//! Appointments linking a patient and a doctor at a point in time.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::doctor::DoctorId;
use crate::patient::PatientId;

/// Primary key type for appointments.
pub type AppointmentId = i64;

/// A booked appointment.
///
/// No overlap prevention is enforced here; scheduling conflicts are the
/// calling layer's concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: AppointmentId,
    pub patient_id: PatientId,
    pub doctor_id: DoctorId,
    #[serde(with = "time::serde::rfc3339")]
    pub appointment_time: OffsetDateTime,
}

/// Fields for booking a new appointment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAppointment {
    pub patient_id: PatientId,
    pub doctor_id: DoctorId,
    #[serde(with = "time::serde::rfc3339")]
    pub appointment_time: OffsetDateTime,
}
