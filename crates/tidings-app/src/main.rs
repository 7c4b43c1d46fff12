use std::sync::Arc;

use salvo::Listener;
use salvo::conn::TcpListener;
use tidings_app::app::{AppContext, router};
use tidings_core::config::{StoreBackend, load_config};
use tidings_core::schedule::SiteClock;
use tidings_db::db::connection::create_pool;
use tidings_db::db::migrate::run_migrations;
use tidings_db::store::Store;
use tidings_service::feed::{FeedSession, StoreFeedSource};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (filter_layer, filter_handle) = reload::Layer::new(EnvFilter::new("debug"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    tracing::info!("Starting Tidings content server");

    let config = load_config()?;

    tracing::info!(config = ?config, "Configuration loaded");

    if let Ok(filter) = EnvFilter::try_new(config.logging.level.as_str()) {
        if let Err(e) = filter_handle.modify(|current| *current = filter) {
            tracing::warn!(error = %e, "Failed to update log filter from config");
        }
    } else {
        tracing::warn!(level = %config.logging.level, "Invalid log level in config, keeping debug");
    }

    let clock = SiteClock::new(config.site.tz()?);

    let store = match config.database.backend {
        StoreBackend::Postgres => {
            run_migrations(&config.database.url).await?;
            let pool = create_pool(
                &config.database.url,
                u32::from(config.database.max_connections),
            )
            .await?;
            tracing::info!("Database connection pool created.");
            Store::postgres(pool)
        }
        StoreBackend::Memory => {
            tracing::warn!("Using the in-memory store; data is lost on restart");
            Store::in_memory()
        }
    };

    let feed = FeedSession::spawn(Arc::new(StoreFeedSource::new(store.clone())), &config.feed);

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let acceptor = TcpListener::new(bind_addr.clone()).bind().await;

    let router = router(AppContext {
        settings: Arc::new(config.clone()),
        clock,
        store,
        feed: feed.handle(),
    })?;

    tracing::info!(origin = %config.server.origin(), "Server listening on {bind_addr}");

    salvo::Server::new(acceptor).serve(router).await;

    drop(feed);

    Ok(())
}
