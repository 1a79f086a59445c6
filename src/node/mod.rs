//! The materna node: configuration, domain operations and HTTP surface.

mod caregiver_routes;
mod clinical;
mod config;
mod core;
mod http_server;
mod officer_routes;
mod patient_routes;
mod patients;
mod registry;
#[cfg(test)]
mod tests;

pub use config::{load_node_config, AuthConfig, NodeConfig, NotifierConfig};
pub use core::{MaternaNode, Principal};
pub use http_server::{AppState, MaternaHttpServer};
