//! Patient portal HTTP routes: login, read-only record access and password
//! change. Every handler resolves the patient from its own token; there is
//! no way to reach another patient's data from this surface.

use super::http_server::{
    authenticate_patient, error_response, token_response, AppState, LoginForm,
};
use crate::auth::PrincipalKind;
use crate::identity::{PasswordChange, PatientResponse};
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use serde_json::json;

/// Patient credential exchange; the form's username field carries the
/// national-ID.
pub async fn login(form: web::Form<LoginForm>, state: web::Data<AppState>) -> impl Responder {
    let node = state.node.lock().await;
    match node.login(PrincipalKind::Patient, &form.username, &form.password) {
        Ok(token) => token_response(token),
        Err(e) => error_response(&e),
    }
}

/// The authenticated patient's own profile.
pub async fn me(req: HttpRequest, state: web::Data<AppState>) -> impl Responder {
    let node = state.node.lock().await;
    match authenticate_patient(&req, &node) {
        Ok(patient) => HttpResponse::Ok().json(PatientResponse::from(patient)),
        Err(e) => error_response(&e),
    }
}

pub async fn my_pregnancy_profiles(
    req: HttpRequest,
    state: web::Data<AppState>,
) -> impl Responder {
    let node = state.node.lock().await;
    let patient = match authenticate_patient(&req, &node) {
        Ok(p) => p,
        Err(e) => return error_response(&e),
    };
    match node.my_pregnancy_profiles(patient.id) {
        Ok(records) => HttpResponse::Ok().json(records),
        Err(e) => error_response(&e),
    }
}

pub async fn my_delivery_outcomes(
    req: HttpRequest,
    state: web::Data<AppState>,
) -> impl Responder {
    let node = state.node.lock().await;
    let patient = match authenticate_patient(&req, &node) {
        Ok(p) => p,
        Err(e) => return error_response(&e),
    };
    match node.my_delivery_outcomes(patient.id) {
        Ok(records) => HttpResponse::Ok().json(records),
        Err(e) => error_response(&e),
    }
}

pub async fn my_care_plans(req: HttpRequest, state: web::Data<AppState>) -> impl Responder {
    let node = state.node.lock().await;
    let patient = match authenticate_patient(&req, &node) {
        Ok(p) => p,
        Err(e) => return error_response(&e),
    };
    match node.my_care_plans(patient.id) {
        Ok(records) => HttpResponse::Ok().json(records),
        Err(e) => error_response(&e),
    }
}

/// Change the authenticated patient's own password.
pub async fn change_password(
    req: HttpRequest,
    payload: web::Json<PasswordChange>,
    state: web::Data<AppState>,
) -> impl Responder {
    let node = state.node.lock().await;
    let patient = match authenticate_patient(&req, &node) {
        Ok(p) => p,
        Err(e) => return error_response(&e),
    };
    match node.change_patient_password(patient.id, payload.into_inner()) {
        Ok(()) => HttpResponse::Ok().json(json!({"message": "Password updated successfully"})),
        Err(e) => error_response(&e),
    }
}
