//! # Materna
//!
//! Records-management backend for maternal health data. Health-authority
//! officers register caregivers, caregivers register patients and record
//! clinical visits, and patients view their own records read-only.
//!
//! ## Core Components
//!
//! * `auth` - Bearer token issuance and per-kind resolution
//! * `crypto` - Password hashing and onboarding password generation
//! * `db_operations` - sled-backed persistence, one tree per entity kind
//! * `identity` - The three principal kinds and registration payloads
//! * `records` - The four clinical record kinds
//! * `node` - Node implementation: configuration, domain operations and the
//!   HTTP server
//! * `notify` - Best-effort credential notification through a persistent
//!   outbox
//!
//! ## Authorization model
//!
//! Every request carries a bearer token bound to one of three disjoint
//! principal kinds. A patient belongs to exactly one caregiver and every
//! clinical record to exactly one patient; both relations are immutable.
//! Handlers resolve the token against the registry for the expected kind
//! and the node enforces ownership before touching any patient or record.

pub mod auth;
pub mod crypto;
pub mod db_operations;
pub mod error;
pub mod identity;
pub mod logging;
pub mod node;
pub mod notify;
pub mod records;

// Re-export main types for convenience
pub use auth::{PrincipalKind, TokenSigner};
pub use error::{MaternaError, MaternaResult};
pub use node::{load_node_config, AppState, MaternaHttpServer, MaternaNode, NodeConfig};
