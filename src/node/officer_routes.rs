//! Officer-facing HTTP routes: self-registration, login, caregiver
//! management.

use super::http_server::{
    authenticate_officer, error_response, token_response, AppState, LoginForm,
};
use crate::auth::PrincipalKind;
use crate::identity::{
    CaregiverRegistration, CaregiverResponse, OfficerRegistration, OfficerResponse,
};
use actix_web::{web, HttpRequest, HttpResponse, Responder};

/// Officer self-registration. Open endpoint; used to create the first
/// administrative account.
pub async fn register_officer(
    payload: web::Json<OfficerRegistration>,
    state: web::Data<AppState>,
) -> impl Responder {
    let node = state.node.lock().await;
    match node.register_officer(payload.into_inner()) {
        Ok(officer) => HttpResponse::Created().json(OfficerResponse::from(officer)),
        Err(e) => error_response(&e),
    }
}

/// Officer credential exchange.
pub async fn login(form: web::Form<LoginForm>, state: web::Data<AppState>) -> impl Responder {
    let node = state.node.lock().await;
    match node.login(PrincipalKind::Officer, &form.username, &form.password) {
        Ok(token) => token_response(token),
        Err(e) => error_response(&e),
    }
}

/// The authenticated officer's own profile.
pub async fn me(req: HttpRequest, state: web::Data<AppState>) -> impl Responder {
    let node = state.node.lock().await;
    match authenticate_officer(&req, &node) {
        Ok(officer) => HttpResponse::Ok().json(OfficerResponse::from(officer)),
        Err(e) => error_response(&e),
    }
}

/// Officer-initiated full caregiver registration. Generates and delivers an
/// onboarding password out-of-band.
pub async fn register_caregiver_full(
    req: HttpRequest,
    payload: web::Json<CaregiverRegistration>,
    state: web::Data<AppState>,
) -> impl Responder {
    let node = state.node.lock().await;
    if let Err(e) = authenticate_officer(&req, &node) {
        return error_response(&e);
    }
    match node.register_caregiver_full(payload.into_inner()) {
        Ok(caregiver) => HttpResponse::Created().json(CaregiverResponse::from(caregiver)),
        Err(e) => error_response(&e),
    }
}

/// The caregiver directory.
pub async fn list_caregivers(req: HttpRequest, state: web::Data<AppState>) -> impl Responder {
    let node = state.node.lock().await;
    if let Err(e) = authenticate_officer(&req, &node) {
        return error_response(&e);
    }
    match node.list_caregivers() {
        Ok(caregivers) => HttpResponse::Ok().json(
            caregivers
                .into_iter()
                .map(CaregiverResponse::from)
                .collect::<Vec<_>>(),
        ),
        Err(e) => error_response(&e),
    }
}
