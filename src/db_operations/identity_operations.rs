//! Typed tree accessors for the three principal registries.

use super::core::{id_key, DbOperations};
use crate::error::MaternaResult;
use crate::identity::{Caregiver, Officer, Patient};

impl DbOperations {
    // --- Officers (keyed by username) ---

    pub fn get_officer(&self, username: &str) -> MaternaResult<Option<Officer>> {
        self.get_item(&self.officers_tree, username)
    }

    pub fn put_officer(&self, officer: &Officer) -> MaternaResult<()> {
        self.store_item(&self.officers_tree, &officer.username, officer)
    }

    // --- Caregivers (keyed by username) ---

    pub fn get_caregiver(&self, username: &str) -> MaternaResult<Option<Caregiver>> {
        self.get_item(&self.caregivers_tree, username)
    }

    pub fn put_caregiver(&self, caregiver: &Caregiver) -> MaternaResult<()> {
        self.store_item(&self.caregivers_tree, &caregiver.username, caregiver)
    }

    /// All caregivers in username order. The registry is small (one row per
    /// field midwife); conflict checks scan it.
    pub fn all_caregivers(&self) -> MaternaResult<Vec<Caregiver>> {
        self.scan_items(&self.caregivers_tree)
    }

    // --- Patients (keyed by id, with a national-ID index) ---

    pub fn get_patient(&self, id: u64) -> MaternaResult<Option<Patient>> {
        self.get_item(&self.patients_tree, &id_key(id))
    }

    pub fn get_patient_by_national_id(
        &self,
        national_id: &str,
    ) -> MaternaResult<Option<Patient>> {
        match self.get_item::<u64>(&self.patients_by_national_id_tree, national_id)? {
            Some(id) => self.get_patient(id),
            None => Ok(None),
        }
    }

    /// Insert or overwrite a patient row and its national-ID index entry.
    pub fn put_patient(&self, patient: &Patient) -> MaternaResult<()> {
        self.store_item(&self.patients_tree, &id_key(patient.id), patient)?;
        self.store_item(
            &self.patients_by_national_id_tree,
            &patient.national_id,
            &patient.id,
        )
    }

    /// All patients in id (creation) order.
    pub fn all_patients(&self) -> MaternaResult<Vec<Patient>> {
        self.scan_items(&self.patients_tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_db() -> (DbOperations, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let ops = DbOperations::open(dir.path()).unwrap();
        (ops, dir)
    }

    fn patient(id: u64, national_id: &str, caregiver_id: u64) -> Patient {
        Patient {
            id,
            full_name: format!("Patient {}", id),
            national_id: national_id.to_string(),
            address: None,
            contact_number: None,
            password_hash: String::new(),
            caregiver_id,
        }
    }

    #[test]
    fn patient_lookup_by_id_and_national_id() {
        let (ops, _dir) = test_db();
        ops.put_patient(&patient(11, "901234567V", 2)).unwrap();

        let by_id = ops.get_patient(11).unwrap().unwrap();
        assert_eq!(by_id.national_id, "901234567V");

        let by_nic = ops.get_patient_by_national_id("901234567V").unwrap().unwrap();
        assert_eq!(by_nic.id, 11);

        assert!(ops.get_patient(12).unwrap().is_none());
        assert!(ops.get_patient_by_national_id("999999999V").unwrap().is_none());
    }

    #[test]
    fn caregiver_keyed_by_username() {
        let (ops, _dir) = test_db();
        let caregiver = Caregiver {
            id: 1,
            username: "mw_901".to_string(),
            password_hash: String::new(),
            full_name: Some("A. Fernando".to_string()),
            national_id: Some("851234567V".to_string()),
            date_of_birth: None,
            phone: Some("0771234567".to_string()),
            email: Some("a.fernando@example.org".to_string()),
            residential_address: None,
            registration_no: None,
            service_grade: None,
            assigned_area: None,
            must_change_password: true,
            is_active: true,
        };
        ops.put_caregiver(&caregiver).unwrap();
        assert!(ops.get_caregiver("mw_901").unwrap().is_some());
        assert!(ops.get_caregiver("mw_902").unwrap().is_none());
        assert_eq!(ops.all_caregivers().unwrap().len(), 1);
    }
}
