//! Caregiver-scoped patient operations and patient self-service.

use crate::crypto;
use crate::error::{MaternaError, MaternaResult};
use crate::identity::{PasswordChange, Patient, PatientUpdate};
use crate::node::MaternaNode;
use log::info;

impl MaternaNode {
    /// Load a patient and check the caller owns it.
    ///
    /// Existence is checked before ownership, so an unknown id is `NotFound`
    /// even for a caller who would not have owned it.
    pub(crate) fn owned_patient(
        &self,
        caregiver_id: u64,
        patient_id: u64,
    ) -> MaternaResult<Patient> {
        let patient = self
            .ops
            .get_patient(patient_id)?
            .ok_or_else(|| MaternaError::NotFound("patient not found".to_string()))?;
        if patient.caregiver_id != caregiver_id {
            return Err(MaternaError::Forbidden(
                "patient belongs to another caregiver".to_string(),
            ));
        }
        Ok(patient)
    }

    /// List a caregiver's own patients with offset+limit pagination and an
    /// optional case-sensitive substring search over full name OR
    /// national-ID. Patients owned by other caregivers never appear,
    /// matching or not.
    pub fn list_patients(
        &self,
        caregiver_id: u64,
        skip: usize,
        limit: usize,
        search: Option<&str>,
    ) -> MaternaResult<Vec<Patient>> {
        let patients = self
            .ops
            .all_patients()?
            .into_iter()
            .filter(|p| p.caregiver_id == caregiver_id)
            .filter(|p| match search {
                Some(needle) if !needle.is_empty() => {
                    p.full_name.contains(needle) || p.national_id.contains(needle)
                }
                _ => true,
            })
            .skip(skip)
            .take(limit)
            .collect();
        Ok(patients)
    }

    /// Partially update a patient's profile. Only fields carrying a value in
    /// the patch overwrite stored state; national-ID, password and owner are
    /// not part of the patch surface.
    pub fn update_patient(
        &self,
        caregiver_id: u64,
        patient_id: u64,
        update: PatientUpdate,
    ) -> MaternaResult<Patient> {
        let mut patient = self.owned_patient(caregiver_id, patient_id)?;
        update.full_name.apply_to(&mut patient.full_name);
        update.address.apply_to_option(&mut patient.address);
        update
            .contact_number
            .apply_to_option(&mut patient.contact_number);
        self.ops.put_patient(&patient)?;
        Ok(patient)
    }

    /// Patient self-service password change.
    ///
    /// The old password must verify against the stored hash; otherwise
    /// [`MaternaError::InvalidCredential`] is returned and the stored hash is
    /// untouched.
    pub fn change_patient_password(
        &self,
        patient_id: u64,
        change: PasswordChange,
    ) -> MaternaResult<()> {
        let mut patient = self
            .ops
            .get_patient(patient_id)?
            .ok_or_else(|| MaternaError::NotFound("patient not found".to_string()))?;
        if !crypto::verify_password(&change.old_password, &patient.password_hash) {
            return Err(MaternaError::InvalidCredential);
        }
        patient.password_hash = crypto::hash_password(&change.new_password)?;
        self.ops.put_patient(&patient)?;
        info!("Patient {} changed password", patient_id);
        Ok(())
    }
}
