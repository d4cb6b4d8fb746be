use std::sync::Arc;

use tokio::sync::RwLock;

use crate::document::EditorSession;
use crate::enhance::TextEnhancer;
use crate::export::{DocumentExporter, ExportOptions};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The one editing session. Handlers hold the lock only for the length of one edit.
    pub session: Arc<RwLock<EditorSession>>,
    /// Pluggable gateway. `LlmEnhancer` with an API key, `OfflineEnhancer` without.
    pub enhancer: Arc<dyn TextEnhancer>,
    pub exporter: Arc<dyn DocumentExporter>,
    pub export_options: ExportOptions,
}
