pub mod error;
pub mod lifecycle;
pub mod local_client;
pub mod repos;
pub mod service;
