//! Clinical record creation and listing.
//!
//! Caregiver-side operations require the authenticated Caregiver to own the
//! target Patient for every record kind, creation and listing alike. The
//! patient portal methods skip that check: their `patient_id` always comes
//! from the caller's own resolved token.

use crate::error::MaternaResult;
use crate::node::MaternaNode;
use crate::records::{
    CarePlan, CarePlanCreate, DeliveryOutcome, DeliveryOutcomeCreate, PregnancyProfile,
    PregnancyProfileCreate, VisitRecord, VisitRecordCreate,
};
use chrono::Utc;

impl MaternaNode {
    pub fn create_visit_record(
        &self,
        caregiver_id: u64,
        patient_id: u64,
        payload: VisitRecordCreate,
    ) -> MaternaResult<VisitRecord> {
        self.owned_patient(caregiver_id, patient_id)?;
        let record = VisitRecord {
            id: self.ops.next_id()?,
            patient_id,
            visit_date: payload.visit_date,
            weight_kg: payload.weight_kg,
            blood_pressure: payload.blood_pressure,
            notes: payload.notes,
        };
        self.ops.put_visit_record(&record)?;
        Ok(record)
    }

    pub fn list_visit_records(
        &self,
        caregiver_id: u64,
        patient_id: u64,
    ) -> MaternaResult<Vec<VisitRecord>> {
        self.owned_patient(caregiver_id, patient_id)?;
        self.ops.visit_records_for_patient(patient_id)
    }

    pub fn create_pregnancy_profile(
        &self,
        caregiver_id: u64,
        patient_id: u64,
        payload: PregnancyProfileCreate,
    ) -> MaternaResult<PregnancyProfile> {
        self.owned_patient(caregiver_id, patient_id)?;
        let record = PregnancyProfile {
            id: self.ops.next_id()?,
            patient_id,
            created_at: Utc::now(),
            blood_group: payload.blood_group,
            bmi: payload.bmi,
            height_cm: payload.height_cm,
            allergies: payload.allergies,
            consanguinity: payload.consanguinity,
            rubella_immunization: payload.rubella_immunization,
            pre_pregnancy_screening: payload.pre_pregnancy_screening,
            folic_acid: payload.folic_acid,
            subfertility_history: payload.subfertility_history,
            identified_risks: payload.identified_risks,
            gravidity: payload.gravidity,
            parity: payload.parity,
            living_children: payload.living_children,
            youngest_child_age: payload.youngest_child_age,
            last_menstrual_period: payload.last_menstrual_period,
            expected_delivery_date: payload.expected_delivery_date,
            corrected_delivery_date: payload.corrected_delivery_date,
            gestation_at_registration: payload.gestation_at_registration,
        };
        self.ops.put_pregnancy_profile(&record)?;
        Ok(record)
    }

    pub fn list_pregnancy_profiles(
        &self,
        caregiver_id: u64,
        patient_id: u64,
    ) -> MaternaResult<Vec<PregnancyProfile>> {
        self.owned_patient(caregiver_id, patient_id)?;
        self.ops.pregnancy_profiles_for_patient(patient_id)
    }

    pub fn create_delivery_outcome(
        &self,
        caregiver_id: u64,
        patient_id: u64,
        payload: DeliveryOutcomeCreate,
    ) -> MaternaResult<DeliveryOutcome> {
        self.owned_patient(caregiver_id, patient_id)?;
        let record = DeliveryOutcome {
            id: self.ops.next_id()?,
            patient_id,
            created_at: Utc::now(),
            delivery_date: payload.delivery_date,
            delivery_mode: payload.delivery_mode,
            episiotomy: payload.episiotomy,
            temperature_normal: payload.temperature_normal,
            vaginal_exam_done: payload.vaginal_exam_done,
            maternal_complications: payload.maternal_complications,
            wound_infection: payload.wound_infection,
            family_planning_discussed: payload.family_planning_discussed,
            danger_signals_explained: payload.danger_signals_explained,
            breast_feeding_established: payload.breast_feeding_established,
            birth_weight: payload.birth_weight,
            gestation_at_birth: payload.gestation_at_birth,
            apgar_score: payload.apgar_score,
            abnormalities: payload.abnormalities,
            vitamin_a_given: payload.vitamin_a_given,
            rubella_given: payload.rubella_given,
            anti_d_given: payload.anti_d_given,
            diagnosis_card_given: payload.diagnosis_card_given,
            child_health_record_completed: payload.child_health_record_completed,
            prescription_given: payload.prescription_given,
            referred_to_field_clinic: payload.referred_to_field_clinic,
            special_notes: payload.special_notes,
            discharge_date: payload.discharge_date,
        };
        self.ops.put_delivery_outcome(&record)?;
        Ok(record)
    }

    pub fn list_delivery_outcomes(
        &self,
        caregiver_id: u64,
        patient_id: u64,
    ) -> MaternaResult<Vec<DeliveryOutcome>> {
        self.owned_patient(caregiver_id, patient_id)?;
        self.ops.delivery_outcomes_for_patient(patient_id)
    }

    pub fn create_care_plan(
        &self,
        caregiver_id: u64,
        patient_id: u64,
        payload: CarePlanCreate,
    ) -> MaternaResult<CarePlan> {
        self.owned_patient(caregiver_id, patient_id)?;
        let record = CarePlan {
            id: self.ops.next_id()?,
            patient_id,
            created_at: Utc::now(),
            next_clinic_date: payload.next_clinic_date,
            first_class: payload.first_class,
            second_class: payload.second_class,
            third_class: payload.third_class,
            antenatal_book: payload.antenatal_book,
            breastfeeding_book: payload.breastfeeding_book,
            early_childhood_book: payload.early_childhood_book,
            family_planning_leaflet: payload.family_planning_leaflet,
            emergency_contact_name: payload.emergency_contact_name,
            emergency_contact_address: payload.emergency_contact_address,
            emergency_contact_phone: payload.emergency_contact_phone,
            health_office_phone: payload.health_office_phone,
            field_clinic_phone: payload.field_clinic_phone,
            administrative_division: payload.administrative_division,
        };
        self.ops.put_care_plan(&record)?;
        Ok(record)
    }

    pub fn list_care_plans(
        &self,
        caregiver_id: u64,
        patient_id: u64,
    ) -> MaternaResult<Vec<CarePlan>> {
        self.owned_patient(caregiver_id, patient_id)?;
        self.ops.care_plans_for_patient(patient_id)
    }

    // --- Patient self-service (read-only, always the caller's own id) ---

    pub fn my_pregnancy_profiles(&self, patient_id: u64) -> MaternaResult<Vec<PregnancyProfile>> {
        self.ops.pregnancy_profiles_for_patient(patient_id)
    }

    pub fn my_delivery_outcomes(&self, patient_id: u64) -> MaternaResult<Vec<DeliveryOutcome>> {
        self.ops.delivery_outcomes_for_patient(patient_id)
    }

    pub fn my_care_plans(&self, patient_id: u64) -> MaternaResult<Vec<CarePlan>> {
        self.ops.care_plans_for_patient(patient_id)
    }
}
