//! HTTP layer: axum handlers, routing, and error mapping over the
//! repositories and the link lifecycle service.

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod routes;
pub mod state;
