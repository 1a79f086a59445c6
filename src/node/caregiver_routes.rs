//! Caregiver-facing HTTP routes: login, patient management and clinical
//! record entry. Every patient- or record-touching handler authenticates the
//! caregiver and passes its id down; the node enforces ownership.

use super::http_server::{
    authenticate_caregiver, error_response, token_response, AppState, LoginForm, PatientListQuery,
};
use crate::auth::PrincipalKind;
use crate::identity::{
    CaregiverResponse, CaregiverSelfRegistration, PatientRegistration, PatientResponse,
    PatientUpdate,
};
use crate::records::{
    CarePlanCreate, DeliveryOutcomeCreate, PregnancyProfileCreate, VisitRecordCreate,
};
use actix_web::{web, HttpRequest, HttpResponse, Responder};

/// Legacy caregiver self-registration.
pub async fn register(
    payload: web::Json<CaregiverSelfRegistration>,
    state: web::Data<AppState>,
) -> impl Responder {
    let node = state.node.lock().await;
    match node.register_caregiver(payload.into_inner()) {
        Ok(caregiver) => HttpResponse::Created().json(CaregiverResponse::from(caregiver)),
        Err(e) => error_response(&e),
    }
}

/// Caregiver credential exchange.
pub async fn login(form: web::Form<LoginForm>, state: web::Data<AppState>) -> impl Responder {
    let node = state.node.lock().await;
    match node.login(PrincipalKind::Caregiver, &form.username, &form.password) {
        Ok(token) => token_response(token),
        Err(e) => error_response(&e),
    }
}

/// The authenticated caregiver's own profile.
pub async fn me(req: HttpRequest, state: web::Data<AppState>) -> impl Responder {
    let node = state.node.lock().await;
    match authenticate_caregiver(&req, &node) {
        Ok(caregiver) => HttpResponse::Ok().json(CaregiverResponse::from(caregiver)),
        Err(e) => error_response(&e),
    }
}

/// Register a patient under the authenticated caregiver.
pub async fn create_patient(
    req: HttpRequest,
    payload: web::Json<PatientRegistration>,
    state: web::Data<AppState>,
) -> impl Responder {
    let node = state.node.lock().await;
    let caregiver = match authenticate_caregiver(&req, &node) {
        Ok(c) => c,
        Err(e) => return error_response(&e),
    };
    match node.create_patient(caregiver.id, payload.into_inner()) {
        Ok(patient) => HttpResponse::Created().json(PatientResponse::from(patient)),
        Err(e) => error_response(&e),
    }
}

/// List the authenticated caregiver's patients, optionally filtered by a
/// case-sensitive substring of name or national-ID.
pub async fn list_patients(
    req: HttpRequest,
    query: web::Query<PatientListQuery>,
    state: web::Data<AppState>,
) -> impl Responder {
    let node = state.node.lock().await;
    let caregiver = match authenticate_caregiver(&req, &node) {
        Ok(c) => c,
        Err(e) => return error_response(&e),
    };
    match node.list_patients(caregiver.id, query.skip, query.limit, query.search.as_deref()) {
        Ok(patients) => HttpResponse::Ok().json(
            patients
                .into_iter()
                .map(PatientResponse::from)
                .collect::<Vec<_>>(),
        ),
        Err(e) => error_response(&e),
    }
}

/// Partially update one of the caregiver's own patients.
pub async fn update_patient(
    req: HttpRequest,
    path: web::Path<u64>,
    payload: web::Json<PatientUpdate>,
    state: web::Data<AppState>,
) -> impl Responder {
    let node = state.node.lock().await;
    let caregiver = match authenticate_caregiver(&req, &node) {
        Ok(c) => c,
        Err(e) => return error_response(&e),
    };
    match node.update_patient(caregiver.id, path.into_inner(), payload.into_inner()) {
        Ok(patient) => HttpResponse::Ok().json(PatientResponse::from(patient)),
        Err(e) => error_response(&e),
    }
}

// Record endpoints - creation and listing per kind, all owner-checked.

pub async fn create_visit_record(
    req: HttpRequest,
    path: web::Path<u64>,
    payload: web::Json<VisitRecordCreate>,
    state: web::Data<AppState>,
) -> impl Responder {
    let node = state.node.lock().await;
    let caregiver = match authenticate_caregiver(&req, &node) {
        Ok(c) => c,
        Err(e) => return error_response(&e),
    };
    match node.create_visit_record(caregiver.id, path.into_inner(), payload.into_inner()) {
        Ok(record) => HttpResponse::Created().json(record),
        Err(e) => error_response(&e),
    }
}

pub async fn list_visit_records(
    req: HttpRequest,
    path: web::Path<u64>,
    state: web::Data<AppState>,
) -> impl Responder {
    let node = state.node.lock().await;
    let caregiver = match authenticate_caregiver(&req, &node) {
        Ok(c) => c,
        Err(e) => return error_response(&e),
    };
    match node.list_visit_records(caregiver.id, path.into_inner()) {
        Ok(records) => HttpResponse::Ok().json(records),
        Err(e) => error_response(&e),
    }
}

pub async fn create_pregnancy_profile(
    req: HttpRequest,
    path: web::Path<u64>,
    payload: web::Json<PregnancyProfileCreate>,
    state: web::Data<AppState>,
) -> impl Responder {
    let node = state.node.lock().await;
    let caregiver = match authenticate_caregiver(&req, &node) {
        Ok(c) => c,
        Err(e) => return error_response(&e),
    };
    match node.create_pregnancy_profile(caregiver.id, path.into_inner(), payload.into_inner()) {
        Ok(record) => HttpResponse::Created().json(record),
        Err(e) => error_response(&e),
    }
}

pub async fn list_pregnancy_profiles(
    req: HttpRequest,
    path: web::Path<u64>,
    state: web::Data<AppState>,
) -> impl Responder {
    let node = state.node.lock().await;
    let caregiver = match authenticate_caregiver(&req, &node) {
        Ok(c) => c,
        Err(e) => return error_response(&e),
    };
    match node.list_pregnancy_profiles(caregiver.id, path.into_inner()) {
        Ok(records) => HttpResponse::Ok().json(records),
        Err(e) => error_response(&e),
    }
}

pub async fn create_delivery_outcome(
    req: HttpRequest,
    path: web::Path<u64>,
    payload: web::Json<DeliveryOutcomeCreate>,
    state: web::Data<AppState>,
) -> impl Responder {
    let node = state.node.lock().await;
    let caregiver = match authenticate_caregiver(&req, &node) {
        Ok(c) => c,
        Err(e) => return error_response(&e),
    };
    match node.create_delivery_outcome(caregiver.id, path.into_inner(), payload.into_inner()) {
        Ok(record) => HttpResponse::Created().json(record),
        Err(e) => error_response(&e),
    }
}

pub async fn list_delivery_outcomes(
    req: HttpRequest,
    path: web::Path<u64>,
    state: web::Data<AppState>,
) -> impl Responder {
    let node = state.node.lock().await;
    let caregiver = match authenticate_caregiver(&req, &node) {
        Ok(c) => c,
        Err(e) => return error_response(&e),
    };
    match node.list_delivery_outcomes(caregiver.id, path.into_inner()) {
        Ok(records) => HttpResponse::Ok().json(records),
        Err(e) => error_response(&e),
    }
}

pub async fn create_care_plan(
    req: HttpRequest,
    path: web::Path<u64>,
    payload: web::Json<CarePlanCreate>,
    state: web::Data<AppState>,
) -> impl Responder {
    let node = state.node.lock().await;
    let caregiver = match authenticate_caregiver(&req, &node) {
        Ok(c) => c,
        Err(e) => return error_response(&e),
    };
    match node.create_care_plan(caregiver.id, path.into_inner(), payload.into_inner()) {
        Ok(record) => HttpResponse::Created().json(record),
        Err(e) => error_response(&e),
    }
}

pub async fn list_care_plans(
    req: HttpRequest,
    path: web::Path<u64>,
    state: web::Data<AppState>,
) -> impl Responder {
    let node = state.node.lock().await;
    let caregiver = match authenticate_caregiver(&req, &node) {
        Ok(c) => c,
        Err(e) => return error_response(&e),
    };
    match node.list_care_plans(caregiver.id, path.into_inner()) {
        Ok(records) => HttpResponse::Ok().json(records),
        Err(e) => error_response(&e),
    }
}
