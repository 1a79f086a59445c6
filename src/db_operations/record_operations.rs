//! Typed tree accessors for the four clinical record kinds.
//!
//! Records are append-only: stored once under a monotonic id, listed by a
//! patient-filtered scan, never updated or removed.

use super::core::{id_key, DbOperations};
use crate::error::MaternaResult;
use crate::records::{CarePlan, DeliveryOutcome, PregnancyProfile, VisitRecord};
use serde::{de::DeserializeOwned, Serialize};

impl DbOperations {
    fn append_record<T: Serialize>(
        &self,
        tree: &sled::Tree,
        id: u64,
        record: &T,
    ) -> MaternaResult<()> {
        self.store_item(tree, &id_key(id), record)
    }

    fn records_for_patient<T: DeserializeOwned>(
        &self,
        tree: &sled::Tree,
        patient_id: u64,
        extract: impl Fn(&T) -> u64,
    ) -> MaternaResult<Vec<T>> {
        let all: Vec<T> = self.scan_items(tree)?;
        Ok(all
            .into_iter()
            .filter(|record| extract(record) == patient_id)
            .collect())
    }

    pub fn put_visit_record(&self, record: &VisitRecord) -> MaternaResult<()> {
        self.append_record(&self.visits_tree, record.id, record)
    }

    pub fn visit_records_for_patient(&self, patient_id: u64) -> MaternaResult<Vec<VisitRecord>> {
        self.records_for_patient(&self.visits_tree, patient_id, |r: &VisitRecord| r.patient_id)
    }

    pub fn put_pregnancy_profile(&self, record: &PregnancyProfile) -> MaternaResult<()> {
        self.append_record(&self.pregnancy_profiles_tree, record.id, record)
    }

    pub fn pregnancy_profiles_for_patient(
        &self,
        patient_id: u64,
    ) -> MaternaResult<Vec<PregnancyProfile>> {
        self.records_for_patient(&self.pregnancy_profiles_tree, patient_id, |r: &PregnancyProfile| {
            r.patient_id
        })
    }

    pub fn put_delivery_outcome(&self, record: &DeliveryOutcome) -> MaternaResult<()> {
        self.append_record(&self.delivery_outcomes_tree, record.id, record)
    }

    pub fn delivery_outcomes_for_patient(
        &self,
        patient_id: u64,
    ) -> MaternaResult<Vec<DeliveryOutcome>> {
        self.records_for_patient(&self.delivery_outcomes_tree, patient_id, |r: &DeliveryOutcome| {
            r.patient_id
        })
    }

    pub fn put_care_plan(&self, record: &CarePlan) -> MaternaResult<()> {
        self.append_record(&self.care_plans_tree, record.id, record)
    }

    pub fn care_plans_for_patient(&self, patient_id: u64) -> MaternaResult<Vec<CarePlan>> {
        self.records_for_patient(&self.care_plans_tree, patient_id, |r: &CarePlan| r.patient_id)
    }
}
