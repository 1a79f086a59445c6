//! Persistent storage over sled.
//!
//! One tree per entity kind, serde_json values, and a monotonic id source.
//! Uniqueness of login identifiers is a tree-key property: Officers and
//! Caregivers are keyed by username, Patients by id with a national-ID index
//! tree. Higher-level rules (duplicate detection across fields, ownership)
//! live in the node layer.

mod core;
mod identity_operations;
mod record_operations;

pub use self::core::DbOperations;
