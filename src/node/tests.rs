use super::{MaternaNode, NodeConfig};
use crate::auth::PrincipalKind;
use crate::error::MaternaError;
use crate::identity::{
    CaregiverRegistration, CaregiverSelfRegistration, OfficerRegistration, PasswordChange,
    Patch, PatientRegistration, PatientUpdate,
};
use crate::notify::MockNotifier;
use crate::records::{PregnancyProfileCreate, VisitRecordCreate};
use chrono::Utc;
use tempfile::TempDir;

fn test_node() -> (MaternaNode, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let config = NodeConfig::new(dir.path().to_path_buf(), "test-secret");
    let node = MaternaNode::load(config).unwrap();
    (node, dir)
}

fn officer_registration(username: &str) -> OfficerRegistration {
    OfficerRegistration {
        username: username.to_string(),
        password: "officer-pass".to_string(),
        full_name: "Dr. Silva".to_string(),
        area: Some("Colombo".to_string()),
        email: None,
    }
}

fn caregiver_registration(national_id: &str, email: &str, phone: &str) -> CaregiverRegistration {
    CaregiverRegistration {
        full_name: "A. Fernando".to_string(),
        national_id: national_id.to_string(),
        date_of_birth: None,
        phone: phone.to_string(),
        email: email.to_string(),
        residential_address: None,
        registration_no: Some("SL-4471".to_string()),
        service_grade: None,
        assigned_area: Some("Galle".to_string()),
    }
}

fn self_caregiver(username: &str) -> CaregiverSelfRegistration {
    CaregiverSelfRegistration {
        username: username.to_string(),
        password: "midwife-pass".to_string(),
        full_name: Some("B. Jayasuriya".to_string()),
    }
}

fn patient_registration(national_id: &str, name: &str) -> PatientRegistration {
    PatientRegistration {
        full_name: name.to_string(),
        national_id: national_id.to_string(),
        address: Some("12 Lake Rd".to_string()),
        contact_number: Some("0711234567".to_string()),
        password: "patient-pass".to_string(),
    }
}

#[test]
fn officer_registration_and_login() {
    let (node, _dir) = test_node();
    let officer = node.register_officer(officer_registration("moh_admin")).unwrap();
    assert_eq!(officer.username, "moh_admin");

    // Re-registration is rejected and mutates nothing.
    assert!(matches!(
        node.register_officer(officer_registration("moh_admin")),
        Err(MaternaError::DuplicateIdentity(_))
    ));

    let token = node
        .login(PrincipalKind::Officer, "moh_admin", "officer-pass")
        .unwrap();
    let resolved = node.resolve_officer(&token).unwrap();
    assert_eq!(resolved.id, officer.id);

    assert!(matches!(
        node.login(PrincipalKind::Officer, "moh_admin", "wrong"),
        Err(MaternaError::AuthFailure)
    ));
    assert!(matches!(
        node.login(PrincipalKind::Officer, "nobody", "officer-pass"),
        Err(MaternaError::AuthFailure)
    ));
}

#[tokio::test]
async fn caregiver_full_registration_generates_and_delivers_credentials() {
    let (node, _dir) = test_node();
    let caregiver = node
        .register_caregiver_full(caregiver_registration(
            "851234567V",
            "a.fernando@example.org",
            "0771234567",
        ))
        .unwrap();
    assert_eq!(caregiver.username, "851234567V");
    assert!(caregiver.must_change_password);

    // The API view of the record never contains the password hash.
    let json =
        serde_json::to_string(&crate::identity::CaregiverResponse::from(caregiver.clone()))
            .unwrap();
    assert!(!json.contains("password_hash"));

    // Delivery yields the onboarding password; it must log the caregiver in.
    let outbox = node.outbox();
    assert_eq!(outbox.pending(), 1);
    let notifier = MockNotifier::default();
    outbox.drain_once(&notifier).await.unwrap();
    let sent = notifier.sent.lock().unwrap();
    let (to, login, password) = &sent[0];
    assert_eq!(to, "a.fernando@example.org");
    assert_eq!(login, "851234567V");
    assert!(node
        .login(PrincipalKind::Caregiver, login, password)
        .is_ok());
}

#[test]
fn caregiver_full_registration_conflicts_on_any_of_four_fields() {
    let (node, _dir) = test_node();
    node.register_caregiver_full(caregiver_registration(
        "851234567V",
        "a.fernando@example.org",
        "0771234567",
    ))
    .unwrap();

    // National-ID (and hence username) collision.
    assert!(matches!(
        node.register_caregiver_full(caregiver_registration(
            "851234567V",
            "other@example.org",
            "0770000000",
        )),
        Err(MaternaError::DuplicateIdentity(_))
    ));
    // Email collision.
    assert!(matches!(
        node.register_caregiver_full(caregiver_registration(
            "900000000V",
            "a.fernando@example.org",
            "0770000000",
        )),
        Err(MaternaError::DuplicateIdentity(_))
    ));
    // Phone collision.
    assert!(matches!(
        node.register_caregiver_full(caregiver_registration(
            "900000000V",
            "other@example.org",
            "0771234567",
        )),
        Err(MaternaError::DuplicateIdentity(_))
    ));

    // Rejected attempts mutated nothing.
    assert_eq!(node.list_caregivers().unwrap().len(), 1);
    assert_eq!(node.outbox().pending(), 1);

    // All-distinct values succeed.
    node.register_caregiver_full(caregiver_registration(
        "900000000V",
        "other@example.org",
        "0770000000",
    ))
    .unwrap();
    assert_eq!(node.list_caregivers().unwrap().len(), 2);
}

#[test]
fn tokens_do_not_cross_principal_kinds() {
    let (node, _dir) = test_node();
    node.register_officer(officer_registration("moh_admin")).unwrap();
    let caregiver = node.register_caregiver(self_caregiver("mw_galle")).unwrap();
    node.create_patient(caregiver.id, patient_registration("901234567V", "K. Perera"))
        .unwrap();

    let officer_token = node
        .login(PrincipalKind::Officer, "moh_admin", "officer-pass")
        .unwrap();
    let caregiver_token = node
        .login(PrincipalKind::Caregiver, "mw_galle", "midwife-pass")
        .unwrap();
    let patient_token = node
        .login(PrincipalKind::Patient, "901234567V", "patient-pass")
        .unwrap();

    // Each token resolves only against its own registry.
    assert!(node.resolve_officer(&officer_token).is_ok());
    assert!(node.resolve_caregiver(&caregiver_token).is_ok());
    assert!(node.resolve_patient(&patient_token).is_ok());

    assert!(node.resolve_caregiver(&officer_token).is_err());
    assert!(node.resolve_patient(&officer_token).is_err());
    assert!(node.resolve_officer(&caregiver_token).is_err());
    assert!(node.resolve_patient(&caregiver_token).is_err());
    assert!(node.resolve_officer(&patient_token).is_err());
    assert!(node.resolve_caregiver(&patient_token).is_err());
}

#[test]
fn patient_update_requires_ownership_and_is_partial() {
    let (node, _dir) = test_node();
    let caregiver_a = node.register_caregiver(self_caregiver("mw_a")).unwrap();
    let caregiver_b = node.register_caregiver(self_caregiver("mw_b")).unwrap();
    let patient = node
        .create_patient(caregiver_a.id, patient_registration("901234567V", "K. Perera"))
        .unwrap();

    // Duplicate national-ID is rejected, even from the owner.
    assert!(matches!(
        node.create_patient(caregiver_a.id, patient_registration("901234567V", "Other")),
        Err(MaternaError::DuplicateIdentity(_))
    ));

    // Unknown id: NotFound. Wrong owner: Forbidden.
    assert!(matches!(
        node.update_patient(caregiver_a.id, 999_999, PatientUpdate::default()),
        Err(MaternaError::NotFound(_))
    ));
    assert!(matches!(
        node.update_patient(caregiver_b.id, patient.id, PatientUpdate::default()),
        Err(MaternaError::Forbidden(_))
    ));

    // Owner update: only fields carrying a value change.
    let update = PatientUpdate {
        full_name: Patch::Absent,
        address: Patch::Value("99 Hill St".to_string()),
        contact_number: Patch::Null,
    };
    let updated = node.update_patient(caregiver_a.id, patient.id, update).unwrap();
    assert_eq!(updated.full_name, "K. Perera");
    assert_eq!(updated.address.as_deref(), Some("99 Hill St"));
    assert_eq!(updated.contact_number.as_deref(), Some("0711234567"));
    assert_eq!(updated.caregiver_id, caregiver_a.id);
}

#[test]
fn patient_search_is_owner_scoped_and_case_sensitive() {
    let (node, _dir) = test_node();
    let caregiver_a = node.register_caregiver(self_caregiver("mw_a")).unwrap();
    let caregiver_b = node.register_caregiver(self_caregiver("mw_b")).unwrap();

    node.create_patient(caregiver_a.id, patient_registration("901234567V", "Kusuma Perera"))
        .unwrap();
    node.create_patient(caregiver_a.id, patient_registration("885671234V", "Nirmala 901"))
        .unwrap();
    node.create_patient(caregiver_a.id, patient_registration("776543210V", "Sita Kumari"))
        .unwrap();
    // Matching patient owned by someone else: must never appear.
    node.create_patient(caregiver_b.id, patient_registration("901999999V", "Also 901"))
        .unwrap();

    let matches = node.list_patients(caregiver_a.id, 0, 100, Some("901")).unwrap();
    assert_eq!(matches.len(), 2);
    assert!(matches.iter().all(|p| p.caregiver_id == caregiver_a.id));
    assert!(matches
        .iter()
        .any(|p| p.national_id == "901234567V"));
    assert!(matches.iter().any(|p| p.full_name == "Nirmala 901"));

    // Case-sensitive: lowercase query does not match "Kusuma".
    assert!(node
        .list_patients(caregiver_a.id, 0, 100, Some("kusuma"))
        .unwrap()
        .is_empty());

    // Absent search returns the full page; pagination applies.
    assert_eq!(node.list_patients(caregiver_a.id, 0, 100, None).unwrap().len(), 3);
    assert_eq!(node.list_patients(caregiver_a.id, 1, 1, None).unwrap().len(), 1);
    assert_eq!(node.list_patients(caregiver_a.id, 3, 100, None).unwrap().len(), 0);
}

#[test]
fn record_operations_require_ownership() {
    let (node, _dir) = test_node();
    let caregiver_a = node.register_caregiver(self_caregiver("mw_a")).unwrap();
    let caregiver_b = node.register_caregiver(self_caregiver("mw_b")).unwrap();
    let patient = node
        .create_patient(caregiver_a.id, patient_registration("901234567V", "K. Perera"))
        .unwrap();

    let visit = VisitRecordCreate {
        visit_date: Utc::now(),
        weight_kg: Some(63.2),
        blood_pressure: Some("110/70".to_string()),
        notes: Some("routine".to_string()),
    };

    // Non-owner: rejected for creation and listing alike.
    assert!(matches!(
        node.create_visit_record(caregiver_b.id, patient.id, visit.clone()),
        Err(MaternaError::Forbidden(_))
    ));
    assert!(matches!(
        node.list_visit_records(caregiver_b.id, patient.id),
        Err(MaternaError::Forbidden(_))
    ));
    // Unknown patient: NotFound even for a would-be owner.
    assert!(matches!(
        node.create_visit_record(caregiver_a.id, 999_999, visit.clone()),
        Err(MaternaError::NotFound(_))
    ));

    let record = node
        .create_visit_record(caregiver_a.id, patient.id, visit)
        .unwrap();
    assert_eq!(record.patient_id, patient.id);
    assert_eq!(node.list_visit_records(caregiver_a.id, patient.id).unwrap().len(), 1);

    node.create_pregnancy_profile(
        caregiver_a.id,
        patient.id,
        PregnancyProfileCreate {
            blood_group: Some("O+".to_string()),
            gravidity: Some(2),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(
        node.list_pregnancy_profiles(caregiver_a.id, patient.id).unwrap().len(),
        1
    );
}

#[test]
fn patient_portal_sees_only_own_records() {
    let (node, _dir) = test_node();
    let caregiver = node.register_caregiver(self_caregiver("mw_a")).unwrap();
    let first = node
        .create_patient(caregiver.id, patient_registration("901234567V", "K. Perera"))
        .unwrap();
    let second = node
        .create_patient(caregiver.id, patient_registration("885671234V", "N. Silva"))
        .unwrap();

    node.create_pregnancy_profile(caregiver.id, first.id, PregnancyProfileCreate::default())
        .unwrap();
    node.create_pregnancy_profile(caregiver.id, second.id, PregnancyProfileCreate::default())
        .unwrap();

    let own = node.my_pregnancy_profiles(first.id).unwrap();
    assert_eq!(own.len(), 1);
    assert_eq!(own[0].patient_id, first.id);
    assert!(node.my_delivery_outcomes(first.id).unwrap().is_empty());
    assert!(node.my_care_plans(first.id).unwrap().is_empty());
}

#[test]
fn patient_password_change_verifies_old_password() {
    let (node, _dir) = test_node();
    let caregiver = node.register_caregiver(self_caregiver("mw_a")).unwrap();
    let patient = node
        .create_patient(caregiver.id, patient_registration("901234567V", "K. Perera"))
        .unwrap();

    // Wrong old password: rejected, stored hash untouched.
    assert!(matches!(
        node.change_patient_password(
            patient.id,
            PasswordChange {
                old_password: "wrong".to_string(),
                new_password: "new-pass".to_string(),
            },
        ),
        Err(MaternaError::InvalidCredential)
    ));
    assert!(node
        .login(PrincipalKind::Patient, "901234567V", "patient-pass")
        .is_ok());
    assert!(node
        .login(PrincipalKind::Patient, "901234567V", "new-pass")
        .is_err());

    // Correct old password: the new one works, the old no longer does.
    node.change_patient_password(
        patient.id,
        PasswordChange {
            old_password: "patient-pass".to_string(),
            new_password: "new-pass".to_string(),
        },
    )
    .unwrap();
    assert!(node
        .login(PrincipalKind::Patient, "901234567V", "new-pass")
        .is_ok());
    assert!(node
        .login(PrincipalKind::Patient, "901234567V", "patient-pass")
        .is_err());
}
