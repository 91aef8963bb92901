use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;
use sqlx::PgPool;

use crate::auth::session::SessionStore;
use crate::config::Config;
use crate::llm_client::ChatCompletion;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub sessions: SessionStore,
    pub s3: S3Client,
    /// None when no API key is configured; chat then uses the graph-only fallback.
    pub llm: Option<Arc<dyn ChatCompletion>>,
    pub config: Config,
}
