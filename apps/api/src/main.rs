mod config;
mod document;
mod enhance;
mod errors;
mod export;
mod layout;
mod llm_client;
mod models;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tokio::sync::RwLock;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::document::demo::demo_document;
use crate::document::EditorSession;
use crate::enhance::{LlmEnhancer, OfflineEnhancer, TextEnhancer};
use crate::export::{ExportOptions, PdfExporter};
use crate::llm_client::LlmClient;
use crate::models::resume::ResumeData;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("resume_api={},tower_http=info", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume API v{}", env!("CARGO_PKG_VERSION"));

    let enhancer: Arc<dyn TextEnhancer> = match &config.anthropic_api_key {
        Some(key) => {
            let llm = LlmClient::new(key.clone(), config.llm_timeout)?;
            info!("LLM client initialized (model: {})", llm_client::MODEL);
            Arc::new(LlmEnhancer::new(llm))
        }
        None => {
            warn!("ANTHROPIC_API_KEY not set; text enhancement runs offline");
            Arc::new(OfflineEnhancer)
        }
    };

    let export_options = ExportOptions::a4(config.export_scale);
    export_options.validate()?;
    info!(raster_scale = export_options.raster_scale, "PDF export configured");

    let document = if config.seed_demo {
        info!("Seeding session with demo document");
        demo_document()
    } else {
        ResumeData::default()
    };

    let state = AppState {
        session: Arc::new(RwLock::new(EditorSession::new(document))),
        enhancer,
        exporter: Arc::new(PdfExporter),
        export_options,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
