use super::{caregiver_routes, officer_routes, patient_routes};
use crate::auth::bearer_token;
use crate::error::{MaternaError, MaternaResult};
use crate::identity::{Caregiver, Officer, Patient};
use crate::node::MaternaNode;
use crate::notify::{DisabledNotifier, HttpRelayNotifier, Notifier};

use actix_cors::Cors;
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer as ActixHttpServer};
use log::info;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

/// HTTP server for the materna node.
///
/// Exposes the REST surface: per-kind registration and credential-exchange
/// endpoints, caregiver-scoped patient and record management, and the
/// read-only patient portal. Every request is stateless; handlers lock the
/// node for the duration of one call and release it on every exit path.
pub struct MaternaHttpServer {
    node: Arc<Mutex<MaternaNode>>,
    bind_address: String,
}

/// Shared application state for the HTTP server.
pub struct AppState {
    pub node: Arc<Mutex<MaternaNode>>,
}

impl MaternaHttpServer {
    /// Create a new HTTP server around a loaded node, binding to the node's
    /// configured address unless `bind_address` overrides it.
    pub fn new(node: MaternaNode, bind_address: &str) -> Self {
        Self {
            node: Arc::new(Mutex::new(node)),
            bind_address: bind_address.to_string(),
        }
    }

    /// Run the HTTP server.
    ///
    /// Starts the outbox delivery worker, then accepts connections until the
    /// server is shut down.
    pub async fn run(&self) -> MaternaResult<()> {
        info!("HTTP server running on {}", self.bind_address);

        // Wire the outbox worker to the configured notifier.
        {
            let node = self.node.lock().await;
            let notifier: Arc<dyn Notifier> = match &node.config.notifier.relay_url {
                Some(url) => Arc::new(HttpRelayNotifier::new(
                    url,
                    &node.config.notifier.from_address,
                    node.config.notifier.timeout_secs,
                )),
                None => {
                    log::warn!("No mail relay configured; credential notifications will be logged and dropped");
                    Arc::new(DisabledNotifier)
                }
            };
            node.outbox().spawn_worker(
                notifier,
                Duration::from_secs(node.config.notifier.poll_interval_secs),
            );
        }

        let app_state = web::Data::new(AppState {
            node: self.node.clone(),
        });

        let server = ActixHttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600);

            App::new().wrap(cors).app_data(app_state.clone()).service(
                web::scope("/api")
                    // Officer endpoints
                    .route(
                        "/officers/register",
                        web::post().to(officer_routes::register_officer),
                    )
                    .route("/officers/token", web::post().to(officer_routes::login))
                    .route("/officers/me", web::get().to(officer_routes::me))
                    .route(
                        "/caregivers/full",
                        web::post().to(officer_routes::register_caregiver_full),
                    )
                    .route(
                        "/caregivers",
                        web::get().to(officer_routes::list_caregivers),
                    )
                    // Caregiver endpoints
                    .route(
                        "/caregivers/register",
                        web::post().to(caregiver_routes::register),
                    )
                    .route("/caregivers/token", web::post().to(caregiver_routes::login))
                    .route("/caregivers/me", web::get().to(caregiver_routes::me))
                    .route(
                        "/patients",
                        web::post().to(caregiver_routes::create_patient),
                    )
                    .route("/patients", web::get().to(caregiver_routes::list_patients))
                    .route(
                        "/patients/{id}",
                        web::put().to(caregiver_routes::update_patient),
                    )
                    .route(
                        "/patients/{id}/visits",
                        web::post().to(caregiver_routes::create_visit_record),
                    )
                    .route(
                        "/patients/{id}/visits",
                        web::get().to(caregiver_routes::list_visit_records),
                    )
                    .route(
                        "/patients/{id}/pregnancy-profiles",
                        web::post().to(caregiver_routes::create_pregnancy_profile),
                    )
                    .route(
                        "/patients/{id}/pregnancy-profiles",
                        web::get().to(caregiver_routes::list_pregnancy_profiles),
                    )
                    .route(
                        "/patients/{id}/delivery-outcomes",
                        web::post().to(caregiver_routes::create_delivery_outcome),
                    )
                    .route(
                        "/patients/{id}/delivery-outcomes",
                        web::get().to(caregiver_routes::list_delivery_outcomes),
                    )
                    .route(
                        "/patients/{id}/care-plans",
                        web::post().to(caregiver_routes::create_care_plan),
                    )
                    .route(
                        "/patients/{id}/care-plans",
                        web::get().to(caregiver_routes::list_care_plans),
                    )
                    // Patient portal endpoints
                    .route("/patients/token", web::post().to(patient_routes::login))
                    .route("/patients/me", web::get().to(patient_routes::me))
                    .route(
                        "/me/pregnancy-profiles",
                        web::get().to(patient_routes::my_pregnancy_profiles),
                    )
                    .route(
                        "/me/delivery-outcomes",
                        web::get().to(patient_routes::my_delivery_outcomes),
                    )
                    .route(
                        "/me/care-plans",
                        web::get().to(patient_routes::my_care_plans),
                    )
                    .route(
                        "/me/password",
                        web::put().to(patient_routes::change_password),
                    ),
            )
        })
        .bind(&self.bind_address)
        .map_err(|e| MaternaError::Config(format!("Failed to bind HTTP server: {}", e)))?
        .run();

        server
            .await
            .map_err(|e| MaternaError::Config(format!("HTTP server error: {}", e)))?;

        Ok(())
    }
}

/// Url-encoded credential-exchange form, shared by all three token
/// endpoints.
#[derive(Debug, Deserialize)]
pub(crate) struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Pagination and search parameters for patient listing.
#[derive(Debug, Deserialize)]
pub(crate) struct PatientListQuery {
    #[serde(default)]
    pub skip: usize,
    #[serde(default = "default_limit")]
    pub limit: usize,
    pub search: Option<String>,
}

fn default_limit() -> usize {
    100
}

/// Map a domain error to its HTTP response.
pub(crate) fn error_response(error: &MaternaError) -> HttpResponse {
    let body = json!({"error": error.to_string()});
    match error {
        MaternaError::DuplicateIdentity(_) | MaternaError::InvalidCredential => {
            HttpResponse::BadRequest().json(body)
        }
        MaternaError::AuthFailure => HttpResponse::Unauthorized()
            .insert_header(("WWW-Authenticate", "Bearer"))
            .json(body),
        MaternaError::NotFound(_) => HttpResponse::NotFound().json(body),
        MaternaError::Forbidden(_) => HttpResponse::Forbidden().json(body),
        _ => {
            log::error!("Internal error servicing request: {}", error);
            HttpResponse::InternalServerError().json(json!({"error": "internal error"}))
        }
    }
}

/// Token endpoint response body.
pub(crate) fn token_response(token: String) -> HttpResponse {
    HttpResponse::Ok().json(json!({"access_token": token, "token_type": "bearer"}))
}

// Bearer-token authentication helpers, one per principal kind. Each resolves
// against its own registry, so a token issued for another kind fails with
// the same AuthFailure as a garbage token.

pub(crate) fn authenticate_officer(
    req: &HttpRequest,
    node: &MaternaNode,
) -> MaternaResult<Officer> {
    node.resolve_officer(bearer_token(req)?)
}

pub(crate) fn authenticate_caregiver(
    req: &HttpRequest,
    node: &MaternaNode,
) -> MaternaResult<Caregiver> {
    node.resolve_caregiver(bearer_token(req)?)
}

pub(crate) fn authenticate_patient(
    req: &HttpRequest,
    node: &MaternaNode,
) -> MaternaResult<Patient> {
    node.resolve_patient(bearer_token(req)?)
}
