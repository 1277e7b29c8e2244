//! Fulcrum HTTP service entry point.
//!
//! # Purpose
//! Wires configuration, storage and the HTTP router, then serves the API and
//! the metrics endpoint until shutdown.
use anyhow::Context;
use fulcrum::app::{AppState, build_router};
use fulcrum::config::{FulcrumConfig, StorageBackend};
use fulcrum::observability;
use fulcrum::store::FulcrumStore;
use fulcrum::store::memory::InMemoryStore;
use fulcrum::store::postgres::PostgresStore;
use std::future::Future;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = FulcrumConfig::from_env_or_yaml().context("fulcrum config")?;
    run_with_shutdown(config, async {
        let _ = tokio::signal::ctrl_c().await;
    })
    .await
}

async fn run_with_shutdown<F>(config: FulcrumConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let metrics_handle = observability::init_observability(observability::SERVICE_NAME)?;
    let state = build_state(&config).await?;
    tracing::info!(
        storage = state.store.backend_name(),
        durable = state.store.is_durable(),
        "storage ready"
    );
    let metrics_task = tokio::spawn(observability::serve_metrics(
        metrics_handle,
        config.metrics_bind,
    ));

    let app = build_router(state);
    let addr = config.bind_addr;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("bind {addr}"))?;
    tracing::info!(%addr, "fulcrum listening");
    tokio::pin!(shutdown);
    tokio::select! {
        result = axum::serve(listener, app.into_make_service()) => {
            result?;
        }
        _ = &mut shutdown => {
            tracing::info!("shutdown requested");
        }
    }

    metrics_task.abort();
    let _ = metrics_task.await;
    Ok(())
}

async fn build_state(config: &FulcrumConfig) -> anyhow::Result<AppState> {
    let store: Arc<dyn FulcrumStore + Send + Sync> = match config.storage {
        StorageBackend::Memory => Arc::new(InMemoryStore::new()),
        StorageBackend::Postgres => {
            let pg = config
                .postgres
                .as_ref()
                .context("postgres configuration missing (set DATABASE_URL or DB_HOST)")?;
            Arc::new(
                PostgresStore::connect(pg)
                    .await
                    .context("connect to postgres")?,
            )
        }
    };
    Ok(AppState::new(store))
}
