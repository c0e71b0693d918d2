use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::model_client::ModelProvider;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Injected inference capability. `HttpModelProvider` when an endpoint is
    /// configured, `KeywordOnlyProvider` otherwise — handlers never know which.
    pub model: Arc<dyn ModelProvider>,
    pub config: Config,
}
