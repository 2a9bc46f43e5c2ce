//! Doctor account.

use serde::{Deserialize, Serialize};

/// Primary key type for doctors.
pub type DoctorId = i64;

/// A registered doctor.
///
/// `username` and `email` are unique across all doctors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Doctor {
    pub id: DoctorId,
    pub name: String,
    pub specialty: String,
    pub username: String,
    pub email: String,

    /// PHC-formatted password hash. Filter out at the API boundary.
    pub password_hash: String,
}

/// Fields required to register a new doctor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDoctor {
    pub name: String,
    pub specialty: String,
    pub username: String,
    pub email: String,
}
