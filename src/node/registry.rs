//! Registration operations for the three principal registries.
//!
//! Every duplicate check happens before any write, so a rejected
//! registration never mutates a tree and re-attempting it is idempotent.

use crate::crypto;
use crate::error::{MaternaError, MaternaResult};
use crate::identity::{
    Caregiver, CaregiverRegistration, CaregiverSelfRegistration, Officer, OfficerRegistration,
    Patient, PatientRegistration,
};
use crate::node::MaternaNode;
use log::info;

impl MaternaNode {
    /// Officer self-registration.
    pub fn register_officer(&self, registration: OfficerRegistration) -> MaternaResult<Officer> {
        if self.ops.get_officer(&registration.username)?.is_some() {
            return Err(MaternaError::DuplicateIdentity(
                "username already registered".to_string(),
            ));
        }
        let officer = Officer {
            id: self.ops.next_id()?,
            username: registration.username,
            password_hash: crypto::hash_password(&registration.password)?,
            full_name: registration.full_name,
            area: registration.area,
            email: registration.email,
        };
        self.ops.put_officer(&officer)?;
        info!("Registered officer {}", officer.username);
        Ok(officer)
    }

    /// Officer-initiated full Caregiver registration.
    ///
    /// The login name is derived from the supplied national-ID. Before any
    /// write, the registration is checked for collision against four fields
    /// of every existing Caregiver: username, national-ID, email and phone.
    /// Any single collision rejects the whole operation; which field
    /// collided is deliberately not reported.
    ///
    /// On success a random onboarding password is generated and a
    /// credentials notification is queued. The Caregiver row is committed
    /// before the enqueue, so it exists whether or not the email arrives.
    pub fn register_caregiver_full(
        &self,
        registration: CaregiverRegistration,
    ) -> MaternaResult<Caregiver> {
        let username = registration.national_id.clone();

        if self.ops.get_caregiver(&username)?.is_some() {
            return Err(MaternaError::DuplicateIdentity(
                "caregiver already registered".to_string(),
            ));
        }
        for existing in self.ops.all_caregivers()? {
            let national_id_taken =
                existing.national_id.as_deref() == Some(registration.national_id.as_str());
            let email_taken = existing.email.as_deref() == Some(registration.email.as_str());
            let phone_taken = existing.phone.as_deref() == Some(registration.phone.as_str());
            if national_id_taken || email_taken || phone_taken {
                return Err(MaternaError::DuplicateIdentity(
                    "caregiver already registered".to_string(),
                ));
            }
        }

        let onboarding_password =
            crypto::generate_onboarding_password(crypto::password::ONBOARDING_PASSWORD_LENGTH);
        let caregiver = Caregiver {
            id: self.ops.next_id()?,
            username: username.clone(),
            password_hash: crypto::hash_password(&onboarding_password)?,
            full_name: Some(registration.full_name.clone()),
            national_id: Some(registration.national_id),
            date_of_birth: registration.date_of_birth,
            phone: Some(registration.phone),
            email: Some(registration.email.clone()),
            residential_address: registration.residential_address,
            registration_no: registration.registration_no,
            service_grade: registration.service_grade,
            assigned_area: registration.assigned_area,
            must_change_password: true,
            is_active: true,
        };
        self.ops.put_caregiver(&caregiver)?;
        info!("Registered caregiver {} (full registration)", username);

        // Row is committed; notification is best-effort from here on.
        self.outbox.enqueue(
            &registration.email,
            &username,
            &onboarding_password,
            &registration.full_name,
        )?;
        Ok(caregiver)
    }

    /// Legacy Caregiver self-registration with a caller-supplied password.
    pub fn register_caregiver(
        &self,
        registration: CaregiverSelfRegistration,
    ) -> MaternaResult<Caregiver> {
        if self.ops.get_caregiver(&registration.username)?.is_some() {
            return Err(MaternaError::DuplicateIdentity(
                "username already registered".to_string(),
            ));
        }
        let caregiver = Caregiver {
            id: self.ops.next_id()?,
            username: registration.username,
            password_hash: crypto::hash_password(&registration.password)?,
            full_name: registration.full_name,
            national_id: None,
            date_of_birth: None,
            phone: None,
            email: None,
            residential_address: None,
            registration_no: None,
            service_grade: None,
            assigned_area: None,
            must_change_password: false,
            is_active: true,
        };
        self.ops.put_caregiver(&caregiver)?;
        info!("Registered caregiver {} (self registration)", caregiver.username);
        Ok(caregiver)
    }

    /// All caregivers, for the officer directory.
    pub fn list_caregivers(&self) -> MaternaResult<Vec<Caregiver>> {
        self.ops.all_caregivers()
    }

    /// Caregiver-initiated Patient creation. The creating Caregiver becomes
    /// the owner, immutably.
    pub fn create_patient(
        &self,
        caregiver_id: u64,
        registration: PatientRegistration,
    ) -> MaternaResult<Patient> {
        if self
            .ops
            .get_patient_by_national_id(&registration.national_id)?
            .is_some()
        {
            return Err(MaternaError::DuplicateIdentity(
                "patient with this national-ID already registered".to_string(),
            ));
        }
        let patient = Patient {
            id: self.ops.next_id()?,
            full_name: registration.full_name,
            national_id: registration.national_id,
            address: registration.address,
            contact_number: registration.contact_number,
            password_hash: crypto::hash_password(&registration.password)?,
            caregiver_id,
        };
        self.ops.put_patient(&patient)?;
        info!(
            "Caregiver {} registered patient {}",
            caregiver_id, patient.id
        );
        Ok(patient)
    }
}
