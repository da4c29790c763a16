//! Router assembly

use std::path::Path;
use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::handlers::{self, AppState};
use ytrelay_core::Extractor;

pub fn router(extractor: Arc<dyn Extractor>, static_dir: Option<&Path>) -> Router {
    let state = AppState { extractor };

    let mut app = Router::new()
        .route("/get-info", get(handlers::get_info))
        .route("/download", get(handlers::download))
        .with_state(state);

    if let Some(dir) = static_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }

    app.layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
