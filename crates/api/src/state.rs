use std::sync::Arc;

use gamecraft_core::publish::Publisher;
use gamecraft_core::uploads::UploadStore;
use gamecraft_generator::GameGenerator;

use crate::auth::AccessPolicy;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: gamecraft_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// External game-generation collaborator.
    pub generator: Arc<dyn GameGenerator>,
    /// Publish pipeline for launched games.
    pub publisher: Arc<Publisher>,
    /// Per-owner image upload store.
    pub uploads: Arc<UploadStore>,
    /// Owner access predicate checked at the HTTP boundary.
    pub access: Arc<dyn AccessPolicy>,
}
