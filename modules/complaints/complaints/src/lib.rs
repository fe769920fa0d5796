//! Complaints Module
//!
//! Maintenance complaint lifecycle for hostels: residents file complaints
//! against rooms, washrooms and water filters; each complaint is routed to
//! the manager of the resident's facility, resolved by that manager and
//! confirmed by the filer.
//!
//! ## Architecture
//!
//! ### Contract Layer (`complaints-sdk`)
//! - `ComplaintsClientV1` trait, models, and `ComplaintsError`
//!
//! ### API Layer (`complaints::api`)
//! - `rest/auth.rs` - bearer token -> verified identity -> `SessionContext`
//! - `rest/handlers.rs`, `rest/routes.rs` - axum handlers and router, `OpenAPI` via utoipa
//! - `rest/dto.rs` - REST-specific DTOs
//! - `rest/error.rs` - HTTP error mapping (domain errors -> RFC9457 Problem)
//! - **Rule:** May import `domain::service` and `domain::error::DomainError`
//!
//! ### Domain Layer (`complaints::domain`)
//! - `service/` - identity, routing, complaints and stats services
//! - `lifecycle.rs` - state machine and input rules
//! - `repos.rs` - repository traits
//! - `local_client.rs` - `ComplaintsClientV1` implementation
//! - **Rule:** MUST NOT import `api::*`
//!
//! ### Infrastructure Layer (`complaints::infra`)
//! - `storage/entity/` - `SeaORM` entities
//! - `storage/mapper.rs` - entity <-> SDK model conversions
//! - `storage/migrations/` - schema migrations
//! - **Rule:** ALL `SeaORM` query specifics contained here
//!
//! ## Public API
//!
//! Other crates construct [`Complaints`] over a database connection and use
//! [`Complaints::client`] for in-process calls or [`Complaints::router`] for HTTP.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

// === PUBLIC API (from SDK) ===
pub use complaints_sdk::{
    AmenityKind, AmenityRef, Complaint, ComplaintStats, ComplaintStatus, ComplaintsClientV1,
    ComplaintsError, ManagedComplaint, NewComplaint,
};

// === MODULE DEFINITION ===
pub mod config;
pub mod module;
pub use config::ComplaintsConfig;
pub use module::Complaints;

// === INTERNAL MODULES ===
// WARNING: These modules are internal implementation details!
// They are exposed only for comprehensive testing and should NOT be used by external consumers.
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;

#[cfg(test)]
mod test_support;
