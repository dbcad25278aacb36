use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use wq_predictor::{config::ArtifactPaths, create_router, AppState, ModelArtifact, ServiceConfig};

fn load_artifact(domain: &str, paths: &ArtifactPaths) -> Option<Arc<ModelArtifact>> {
    let artifact = match ModelArtifact::load(&paths.model_path, &paths.meta_path) {
        Ok(a) => a,
        Err(e) => {
            tracing::warn!("failed to load {} model: {:#}", domain, e);
            return None;
        }
    };
    // Warmup to ensure the module accepts the declared feature width
    match artifact.warmup() {
        Ok(p) => tracing::info!("{} warmup forward ok (p={:.3})", domain, p),
        Err(e) => {
            tracing::warn!("{} warmup failed: {:#}", domain, e);
            return None;
        }
    }
    tracing::info!(
        "loaded {} model; threshold={} feature_cols[{}]: {:?}",
        domain,
        artifact.threshold,
        artifact.feature_names.len(),
        &artifact.feature_names
    );
    Some(Arc::new(artifact))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cfg = ServiceConfig::from_env();

    let state = AppState {
        brisbane: load_artifact("brisbane", &cfg.brisbane),
        nyc: load_artifact("nyc", &cfg.nyc),
        log_pred: cfg.log_pred,
    };

    let app = create_router(state);

    let addr = cfg.addr();
    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
