use std::sync::Arc;

use grantflow_db::provisioning::LinkService;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: grantflow_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Link lifecycle service carrying the provisioning engine.
    pub links: LinkService,
}
