//! Live quiz backend entrypoint wiring configuration, the quiz store and the REST routes.

use std::{env, net::SocketAddr, sync::Arc};

use anyhow::{Context, bail};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use live_quiz_back::{
    config::{AppConfig, StoreBackend},
    dao::quiz_store::{QuizStore, memory::MemoryQuizStore},
    routes,
    state::{AppState, SharedState},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let mut config = AppConfig::load().context("loading configuration")?;
    // A bare first argument names the Redis host, as older deployment scripts pass it.
    if let Some(host) = env::args().nth(1) {
        config = config.with_redis_host(&host);
    }
    if config.questions_base_url.is_empty() {
        bail!("QUIZ_QUESTIONS_BASE_URL (or GCOOL_QUIZ_QUES_PATH) must be set");
    }

    let store = connect_store(&config).await?;
    let port = config.port;
    let app = build_router(AppState::new(config, store));

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(%addr, "starting server");

    let listener = TcpListener::bind(addr).await.context("binding server")?;
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving axum")?;

    Ok(())
}

/// Build the configured store; the server refuses to start if it cannot reach it.
async fn connect_store(config: &AppConfig) -> anyhow::Result<Arc<dyn QuizStore>> {
    match config.store {
        StoreBackend::Memory => {
            warn!("using the in-memory quiz store; quiz data is lost on restart");
            Ok(Arc::new(MemoryQuizStore::new()))
        }
        StoreBackend::Redis => connect_redis(config).await,
    }
}

#[cfg(feature = "redis-store")]
async fn connect_redis(config: &AppConfig) -> anyhow::Result<Arc<dyn QuizStore>> {
    use live_quiz_back::dao::quiz_store::redis::{RedisConfig, RedisQuizStore};

    let mut redis_config = RedisConfig::new(config.redis_url.clone());
    if let Some(password) = &config.redis_password {
        redis_config = redis_config.with_password(password.clone());
    }

    let store = RedisQuizStore::connect(redis_config)
        .await
        .context("connecting to Redis")?;
    info!("connected to Redis");
    Ok(Arc::new(store))
}

#[cfg(not(feature = "redis-store"))]
async fn connect_redis(_config: &AppConfig) -> anyhow::Result<Arc<dyn QuizStore>> {
    bail!("built without the `redis-store` feature; set QUIZ_STORE=memory")
}

/// Build the top-level router and attach cross-cutting middleware layers.
fn build_router(state: SharedState) -> Router<()> {
    routes::router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Configure tracing subscribers so logs include spans by default.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,tower_http=debug".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Wait for Ctrl+C or SIGTERM and shut the server down gracefully.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut term = signal(SignalKind::terminate()).expect("install SIGTERM handler");
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {},
            _ = term.recv() => {},
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
