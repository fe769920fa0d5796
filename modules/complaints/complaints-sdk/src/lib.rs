//! Complaints SDK
//!
//! Public contract of the complaints module. Consumers depend on this crate only:
//!
//! - [`ComplaintsClientV1`] - the operation set exposed to presentation layers
//! - [`Complaint`], [`ManagedComplaint`], [`ComplaintStats`] - read models
//! - [`AmenityRef`], [`AmenityKind`], [`ComplaintStatus`] - value types
//! - [`ComplaintsError`] - error surface, free of internal detail
//!
//! Every operation takes a [`SessionContext`](hostel_security::SessionContext)
//! produced by [`ComplaintsClientV1::open_session`].

pub mod api;
pub mod errors;
pub mod models;

pub use api::ComplaintsClientV1;
pub use errors::ComplaintsError;
pub use models::{
    AmenityKind, AmenityRef, Complaint, ComplaintStats, ComplaintStatus, ManagedComplaint,
    ManagerProfile, NewComplaint, ResidentProfile, ResolvedIdentity, UnknownAmenityKind,
    UnknownStatus,
};
