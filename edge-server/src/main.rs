//! Edge server: tenant-edge router behind a TCP listener.
//!
//! Run from repo root: `cargo run -p edge-server`
//! Uses PostgreSQL for the KV store when `DATABASE_URL` is set, otherwise an in-memory store
//! seeded from `KV_SEED_PATH`.

use std::sync::Arc;
use tenant_edge::{
    ensure_kv_table, router, AppState, EdgeConfig, HandlebarsRenderer, HttpUpstream, KvStore, MemoryKvStore,
    PgKvStore,
};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("tenant_edge=info,tower_http=info")),
        )
        .init();

    let config = EdgeConfig::from_env()?;
    let store: Arc<dyn KvStore> = match (&config.database_url, &config.kv_seed_path) {
        (Some(database_url), _) => {
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(5)
                .connect(database_url)
                .await?;
            ensure_kv_table(&pool).await?;
            tracing::info!("using postgres kv store");
            Arc::new(PgKvStore::new(pool))
        }
        (None, Some(path)) => Arc::new(MemoryKvStore::from_json_file(path).await?),
        (None, None) => {
            tracing::warn!("no DATABASE_URL or KV_SEED_PATH set; every tenant will be unknown");
            Arc::new(MemoryKvStore::new())
        }
    };

    let state = AppState {
        store,
        upstream: Arc::new(HttpUpstream::new(config.upstream_timeout)?),
        renderer: Arc::new(HandlebarsRenderer::new()?),
        config: Arc::new(config.clone()),
    };

    let app = router(state);

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
