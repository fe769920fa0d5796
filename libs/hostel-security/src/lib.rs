#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
pub mod context;
pub mod principal;

pub use context::{SessionContext, SessionError};
pub use principal::{ManagerPrincipal, Principal, ResidentPrincipal, Role};
