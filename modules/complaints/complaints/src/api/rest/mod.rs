pub mod auth;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod problem;
pub mod routes;
