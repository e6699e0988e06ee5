use std::sync::Arc;

use tracing::{info, warn};

use crate::config::AppConfig;
use crate::data::DataStore;
use crate::export::{FontPdfRenderer, PdfRenderer};

pub mod api;
pub mod page;
pub mod routes;
pub mod sync;

/// Shared handler state, built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: DataStore,
    pub renderer: Arc<dyn PdfRenderer>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self::with_renderer(config, Arc::new(FontPdfRenderer::default()))
    }

    pub fn with_renderer(config: AppConfig, renderer: Arc<dyn PdfRenderer>) -> Self {
        let store = DataStore::new(config.data_dir.clone());
        AppState {
            config: Arc::new(config),
            store,
            renderer,
        }
    }
}

pub async fn run_server(config: AppConfig) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!(
        addr = %config.bind_addr,
        data_dir = %config.data_dir.display(),
        "tuition server listening on http://{}",
        config.bind_addr
    );
    if config.sync_token.is_none() {
        warn!("no sync token configured; sync webhook will reject all requests");
    }

    let app = routes::router(AppState::new(config));
    axum::serve(listener, app).await
}
