//! Clinical record types.
//!
//! Four record kinds, each owned by exactly one Patient and created only by
//! the Patient's owning Caregiver. Records are immutable once created: the
//! API surface is additive history, with no update or delete.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A clinic visit entry: vitals taken at a routine check-up.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisitRecord {
    pub id: u64,
    pub patient_id: u64,
    pub visit_date: DateTime<Utc>,
    pub weight_kg: Option<f64>,
    pub blood_pressure: Option<String>,
    pub notes: Option<String>,
}

/// Payload for creating a [`VisitRecord`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisitRecordCreate {
    pub visit_date: DateTime<Utc>,
    pub weight_kg: Option<f64>,
    pub blood_pressure: Option<String>,
    pub notes: Option<String>,
}

/// Baseline pregnancy profile: vitals, screening history and key dates
/// captured at registration of a pregnancy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PregnancyProfile {
    pub id: u64,
    pub patient_id: u64,
    pub created_at: DateTime<Utc>,

    // Vitals
    pub blood_group: Option<String>,
    pub bmi: Option<f64>,
    pub height_cm: Option<f64>,
    pub allergies: Option<String>,

    // Screening
    #[serde(default)]
    pub consanguinity: bool,
    #[serde(default)]
    pub rubella_immunization: bool,
    #[serde(default)]
    pub pre_pregnancy_screening: bool,
    #[serde(default)]
    pub folic_acid: bool,
    #[serde(default)]
    pub subfertility_history: bool,

    // Obstetric history
    pub identified_risks: Option<String>,
    pub gravidity: Option<i32>,
    pub parity: Option<i32>,
    pub living_children: Option<i32>,
    pub youngest_child_age: Option<String>,

    // Dates
    pub last_menstrual_period: Option<DateTime<Utc>>,
    pub expected_delivery_date: Option<DateTime<Utc>>,
    pub corrected_delivery_date: Option<DateTime<Utc>>,
    pub gestation_at_registration: Option<String>,
}

/// Payload for creating a [`PregnancyProfile`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PregnancyProfileCreate {
    pub blood_group: Option<String>,
    pub bmi: Option<f64>,
    pub height_cm: Option<f64>,
    pub allergies: Option<String>,
    #[serde(default)]
    pub consanguinity: bool,
    #[serde(default)]
    pub rubella_immunization: bool,
    #[serde(default)]
    pub pre_pregnancy_screening: bool,
    #[serde(default)]
    pub folic_acid: bool,
    #[serde(default)]
    pub subfertility_history: bool,
    pub identified_risks: Option<String>,
    pub gravidity: Option<i32>,
    pub parity: Option<i32>,
    pub living_children: Option<i32>,
    pub youngest_child_age: Option<String>,
    pub last_menstrual_period: Option<DateTime<Utc>>,
    pub expected_delivery_date: Option<DateTime<Utc>>,
    pub corrected_delivery_date: Option<DateTime<Utc>>,
    pub gestation_at_registration: Option<String>,
}

/// Delivery outcome: labour, newborn and discharge details.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryOutcome {
    pub id: u64,
    pub patient_id: u64,
    pub created_at: DateTime<Utc>,

    // Delivery
    pub delivery_date: Option<DateTime<Utc>>,
    pub delivery_mode: Option<String>,
    #[serde(default)]
    pub episiotomy: bool,
    #[serde(default)]
    pub temperature_normal: bool,
    #[serde(default)]
    pub vaginal_exam_done: bool,
    pub maternal_complications: Option<String>,
    #[serde(default)]
    pub wound_infection: bool,
    #[serde(default)]
    pub family_planning_discussed: bool,
    #[serde(default)]
    pub danger_signals_explained: bool,
    #[serde(default)]
    pub breast_feeding_established: bool,

    // Newborn
    pub birth_weight: Option<f64>,
    pub gestation_at_birth: Option<i32>,
    pub apgar_score: Option<i32>,
    pub abnormalities: Option<String>,

    // Discharge
    #[serde(default)]
    pub vitamin_a_given: bool,
    #[serde(default)]
    pub rubella_given: bool,
    #[serde(default)]
    pub anti_d_given: bool,
    #[serde(default)]
    pub diagnosis_card_given: bool,
    #[serde(default)]
    pub child_health_record_completed: bool,
    #[serde(default)]
    pub prescription_given: bool,
    #[serde(default)]
    pub referred_to_field_clinic: bool,
    pub special_notes: Option<String>,
    pub discharge_date: Option<DateTime<Utc>>,
}

/// Payload for creating a [`DeliveryOutcome`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeliveryOutcomeCreate {
    pub delivery_date: Option<DateTime<Utc>>,
    pub delivery_mode: Option<String>,
    #[serde(default)]
    pub episiotomy: bool,
    #[serde(default)]
    pub temperature_normal: bool,
    #[serde(default)]
    pub vaginal_exam_done: bool,
    pub maternal_complications: Option<String>,
    #[serde(default)]
    pub wound_infection: bool,
    #[serde(default)]
    pub family_planning_discussed: bool,
    #[serde(default)]
    pub danger_signals_explained: bool,
    #[serde(default)]
    pub breast_feeding_established: bool,
    pub birth_weight: Option<f64>,
    pub gestation_at_birth: Option<i32>,
    pub apgar_score: Option<i32>,
    pub abnormalities: Option<String>,
    #[serde(default)]
    pub vitamin_a_given: bool,
    #[serde(default)]
    pub rubella_given: bool,
    #[serde(default)]
    pub anti_d_given: bool,
    #[serde(default)]
    pub diagnosis_card_given: bool,
    #[serde(default)]
    pub child_health_record_completed: bool,
    #[serde(default)]
    pub prescription_given: bool,
    #[serde(default)]
    pub referred_to_field_clinic: bool,
    pub special_notes: Option<String>,
    pub discharge_date: Option<DateTime<Utc>>,
}

/// Attendance at one antenatal class session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassAttendance {
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub husband: bool,
    #[serde(default)]
    pub wife: bool,
    pub other: Option<String>,
}

/// Issue/return dates for one piece of educational material.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MaterialLoan {
    pub issued: Option<DateTime<Utc>>,
    pub returned: Option<DateTime<Utc>>,
}

/// Antenatal care plan: clinic schedule, class attendance, materials and
/// emergency contacts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarePlan {
    pub id: u64,
    pub patient_id: u64,
    pub created_at: DateTime<Utc>,

    pub next_clinic_date: Option<DateTime<Utc>>,

    #[serde(default)]
    pub first_class: ClassAttendance,
    #[serde(default)]
    pub second_class: ClassAttendance,
    #[serde(default)]
    pub third_class: ClassAttendance,

    #[serde(default)]
    pub antenatal_book: MaterialLoan,
    #[serde(default)]
    pub breastfeeding_book: MaterialLoan,
    #[serde(default)]
    pub early_childhood_book: MaterialLoan,
    #[serde(default)]
    pub family_planning_leaflet: MaterialLoan,

    pub emergency_contact_name: Option<String>,
    pub emergency_contact_address: Option<String>,
    pub emergency_contact_phone: Option<String>,
    pub health_office_phone: Option<String>,
    pub field_clinic_phone: Option<String>,
    pub administrative_division: Option<String>,
}

/// Payload for creating a [`CarePlan`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CarePlanCreate {
    pub next_clinic_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub first_class: ClassAttendance,
    #[serde(default)]
    pub second_class: ClassAttendance,
    #[serde(default)]
    pub third_class: ClassAttendance,
    #[serde(default)]
    pub antenatal_book: MaterialLoan,
    #[serde(default)]
    pub breastfeeding_book: MaterialLoan,
    #[serde(default)]
    pub early_childhood_book: MaterialLoan,
    #[serde(default)]
    pub family_planning_leaflet: MaterialLoan,
    pub emergency_contact_name: Option<String>,
    pub emergency_contact_address: Option<String>,
    pub emergency_contact_phone: Option<String>,
    pub health_office_phone: Option<String>,
    pub field_clinic_phone: Option<String>,
    pub administrative_division: Option<String>,
}
