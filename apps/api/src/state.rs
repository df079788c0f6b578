use std::sync::Arc;

use sqlx::PgPool;

use crate::bias::BiasLexicon;
use crate::config::Config;
use crate::llm_client::LlmClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub llm: LlmClient,
    /// Bias lexicon, built once at startup and injected — never read as a
    /// module-level global.
    pub lexicon: Arc<BiasLexicon>,
    pub config: Config,
}
