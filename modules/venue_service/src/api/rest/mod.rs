//! REST API layer

pub mod auth;
pub mod dto;
pub mod error;
pub mod etag;
pub mod handlers;
pub mod mapper;
pub mod routes;

pub use routes::{build_router, AppState};
