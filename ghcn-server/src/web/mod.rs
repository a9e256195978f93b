//! HTTP layer for the climate service.
//!
//! Handlers only convert path parameters and errors; the queries themselves
//! live in [`crate::service`].

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
