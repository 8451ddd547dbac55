//! Feedback service HTTP entry point.
//!
//! # Purpose
//! Wires configuration, observability, storage, and the analyzer into the
//! router, then serves until Ctrl-C or SIGTERM.
//!
//! # Notes
//! `build_state`, `run_with_shutdown`, and `serve_state` are split out so startup and shutdown
//! are testable without signals.
use anyhow::Context;
use feedback::app::{AppState, build_router};
use feedback::config::{self, FeedbackConfig};
use feedback::observability;
use feedback::store::{
    FeedbackStore, StoreConfig, memory::InMemoryStore, postgres::PostgresStore,
};
use feedback_analyzer::LexiconAnalyzer;
use metrics_exporter_prometheus::PrometheusHandle;
use std::future::Future;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = FeedbackConfig::from_env_or_yaml().context("feedback service config")?;
    run_with_shutdown(config, shutdown_signal()).await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutdown signal received");
}

async fn run_with_shutdown<F>(config: FeedbackConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let metrics_handle = observability::init_observability(observability::SERVICE_NAME);
    let state = build_state(&config).await?;
    tracing::info!(
        backend = state.store.backend_name(),
        collection = state.store.collection(),
        "feedback store opened"
    );
    serve_state(state, &config, metrics_handle, shutdown).await
}

/// Serve `state` until `shutdown` resolves. The store is closed on every exit
/// path once it has been handed over, including a failed API bind.
async fn serve_state<F>(
    state: AppState,
    config: &FeedbackConfig,
    metrics_handle: PrometheusHandle,
    shutdown: F,
) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = config.bind_addr;
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(err) => {
            state.store.close().await;
            return Err(anyhow::Error::new(err).context(format!("bind {addr}")));
        }
    };
    let metrics_addr = config.metrics_bind;
    let metrics_task = tokio::spawn(async move {
        if let Err(err) = observability::serve_metrics(metrics_handle, metrics_addr).await {
            tracing::warn!(error = %err, %metrics_addr, "metrics listener stopped");
        }
    });

    let app = build_router(state.clone());
    if let Ok(local) = listener.local_addr() {
        tracing::info!(addr = %local, "feedback service listening");
    }
    let served = axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown)
        .await;

    metrics_task.abort();
    let _ = metrics_task.await;
    state.store.close().await;
    tracing::info!("feedback service stopped");
    served.context("serve feedback api")
}

async fn build_state(config: &FeedbackConfig) -> anyhow::Result<AppState> {
    let store_config = StoreConfig {
        collection: config.collection.clone(),
    };
    let store: Arc<dyn FeedbackStore + Send + Sync> = match config.storage {
        config::StorageBackend::Memory => Arc::new(InMemoryStore::new(store_config)),
        config::StorageBackend::Postgres => {
            let pg = config
                .postgres
                .as_ref()
                .context("postgres configuration missing")?;
            Arc::new(
                PostgresStore::connect(pg, store_config)
                    .await
                    .context("connect postgres feedback store")?,
            )
        }
    };
    Ok(AppState::new(store, Arc::new(LexiconAnalyzer::new())))
}
