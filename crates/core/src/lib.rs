//! Domain types, error taxonomy, and pure audience logic for the campus
//! community backend.
//!
//! This crate has no internal dependencies so the storage layer, the service
//! layer, and the HTTP surface can all share the same role identifiers,
//! targeting rules, and validation.

pub mod audience;
pub mod error;
pub mod notification_roles;
pub mod notifications;
pub mod roles;
pub mod types;
