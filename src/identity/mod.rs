//! Principal types and registration payloads.
//!
//! Three disjoint principal kinds with independent login namespaces: Officers
//! (health-authority staff), Caregivers (field midwives) and Patients.
//! Stored principals carry their password hash; handlers answer with the
//! `*Response` views, which omit it.

pub mod patch;

pub use patch::Patch;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A health-authority officer. Created via self-registration; never mutated
/// or deleted afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Officer {
    pub id: u64,
    pub username: String,
    pub password_hash: String,
    pub full_name: String,
    pub area: Option<String>,
    pub email: Option<String>,
}

/// A caregiver, owner of zero or more Patients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Caregiver {
    pub id: u64,
    /// Login name; defaults to the national-ID on full registration.
    pub username: String,
    pub password_hash: String,
    pub full_name: Option<String>,
    pub national_id: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub residential_address: Option<String>,
    pub registration_no: Option<String>,
    pub service_grade: Option<String>,
    pub assigned_area: Option<String>,
    pub must_change_password: bool,
    pub is_active: bool,
}

/// A patient. Owned by exactly one Caregiver; the owner never changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    pub id: u64,
    pub full_name: String,
    /// Unique national identity number; also the login identifier.
    pub national_id: String,
    pub address: Option<String>,
    pub contact_number: Option<String>,
    pub password_hash: String,
    pub caregiver_id: u64,
}

/// Officer profile as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct OfficerResponse {
    pub id: u64,
    pub username: String,
    pub full_name: String,
    pub area: Option<String>,
    pub email: Option<String>,
}

impl From<Officer> for OfficerResponse {
    fn from(officer: Officer) -> Self {
        OfficerResponse {
            id: officer.id,
            username: officer.username,
            full_name: officer.full_name,
            area: officer.area,
            email: officer.email,
        }
    }
}

/// Caregiver profile as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct CaregiverResponse {
    pub id: u64,
    pub username: String,
    pub full_name: Option<String>,
    pub national_id: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub residential_address: Option<String>,
    pub registration_no: Option<String>,
    pub service_grade: Option<String>,
    pub assigned_area: Option<String>,
    pub must_change_password: bool,
    pub is_active: bool,
}

impl From<Caregiver> for CaregiverResponse {
    fn from(caregiver: Caregiver) -> Self {
        CaregiverResponse {
            id: caregiver.id,
            username: caregiver.username,
            full_name: caregiver.full_name,
            national_id: caregiver.national_id,
            date_of_birth: caregiver.date_of_birth,
            phone: caregiver.phone,
            email: caregiver.email,
            residential_address: caregiver.residential_address,
            registration_no: caregiver.registration_no,
            service_grade: caregiver.service_grade,
            assigned_area: caregiver.assigned_area,
            must_change_password: caregiver.must_change_password,
            is_active: caregiver.is_active,
        }
    }
}

/// Patient profile as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct PatientResponse {
    pub id: u64,
    pub full_name: String,
    pub national_id: String,
    pub address: Option<String>,
    pub contact_number: Option<String>,
    pub caregiver_id: u64,
}

impl From<Patient> for PatientResponse {
    fn from(patient: Patient) -> Self {
        PatientResponse {
            id: patient.id,
            full_name: patient.full_name,
            national_id: patient.national_id,
            address: patient.address,
            contact_number: patient.contact_number,
            caregiver_id: patient.caregiver_id,
        }
    }
}

/// Officer self-registration payload.
#[derive(Debug, Clone, Deserialize)]
pub struct OfficerRegistration {
    pub username: String,
    pub password: String,
    pub full_name: String,
    pub area: Option<String>,
    pub email: Option<String>,
}

/// Officer-initiated full Caregiver registration payload.
///
/// The login name is derived from `national_id`; the password is generated,
/// not supplied.
#[derive(Debug, Clone, Deserialize)]
pub struct CaregiverRegistration {
    pub full_name: String,
    pub national_id: String,
    pub date_of_birth: Option<NaiveDate>,
    pub phone: String,
    pub email: String,
    pub residential_address: Option<String>,
    pub registration_no: Option<String>,
    pub service_grade: Option<String>,
    pub assigned_area: Option<String>,
}

/// Legacy Caregiver self-registration payload (caller-supplied password).
#[derive(Debug, Clone, Deserialize)]
pub struct CaregiverSelfRegistration {
    pub username: String,
    pub password: String,
    pub full_name: Option<String>,
}

/// Caregiver-initiated Patient creation payload.
#[derive(Debug, Clone, Deserialize)]
pub struct PatientRegistration {
    pub full_name: String,
    pub national_id: String,
    pub address: Option<String>,
    pub contact_number: Option<String>,
    pub password: String,
}

/// Partial update of a Patient profile. Only fields carrying a value
/// overwrite stored state; see [`Patch`] for the null/absent distinction.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PatientUpdate {
    #[serde(default)]
    pub full_name: Patch<String>,
    #[serde(default)]
    pub address: Patch<String>,
    #[serde(default)]
    pub contact_number: Patch<String>,
}

/// Patient self-service password change.
#[derive(Debug, Clone, Deserialize)]
pub struct PasswordChange {
    pub old_password: String,
    pub new_password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn responses_never_carry_the_password_hash() {
        let officer = Officer {
            id: 1,
            username: "moh_admin".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            full_name: "Dr. Silva".to_string(),
            area: Some("Colombo".to_string()),
            email: None,
        };
        let json = serde_json::to_string(&OfficerResponse::from(officer)).unwrap();
        assert!(!json.contains("argon2"));
        assert!(!json.contains("password_hash"));

        let patient = Patient {
            id: 7,
            full_name: "K. Perera".to_string(),
            national_id: "901234567V".to_string(),
            address: None,
            contact_number: None,
            password_hash: "$argon2id$secret".to_string(),
            caregiver_id: 3,
        };
        let json = serde_json::to_string(&PatientResponse::from(patient)).unwrap();
        assert!(!json.contains("password_hash"));
    }

    #[test]
    fn stored_principals_round_trip_with_the_hash() {
        let patient = Patient {
            id: 7,
            full_name: "K. Perera".to_string(),
            national_id: "901234567V".to_string(),
            address: None,
            contact_number: None,
            password_hash: "$argon2id$secret".to_string(),
            caregiver_id: 3,
        };
        let bytes = serde_json::to_vec(&patient).unwrap();
        let back: Patient = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(back.password_hash, patient.password_hash);
    }
}
