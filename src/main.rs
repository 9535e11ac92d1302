//! Service entry point: configuration, wiring, and the axum server.

use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderValue;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use parley_relay::adapters::http::{resolver_router, ResolverAppState};
use parley_relay::adapters::nlu::{
    LexHttpRuntime, LexRuntimeConfig, LlmEndpointConfig, LlmEndpointRuntime,
};
use parley_relay::adapters::store::RedisResultStore;
use parley_relay::config::{AppConfig, NluProvider};
use parley_relay::domain::foundation::SessionId;
use parley_relay::ports::{NluRuntime, ResultStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&config.server.log_level)
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    config.validate()?;

    let runtime: Arc<dyn NluRuntime> = match config.nlu.provider {
        NluProvider::Lex => Arc::new(LexHttpRuntime::new(
            LexRuntimeConfig::new(config.nlu.api_key())
                .with_base_url(config.nlu.base_url.clone())
                .with_timeout(config.nlu.timeout()),
        )),
        NluProvider::LlmEndpoint => Arc::new(LlmEndpointRuntime::new(
            LlmEndpointConfig::new(config.nlu.api_key(), config.nlu.base_url.clone())
                .with_timeout(config.nlu.timeout()),
        )),
    };

    let store: Option<Arc<dyn ResultStore>> = if config.store.enabled {
        let client = redis::Client::open(config.store.redis_url.as_str())?;
        let conn = client.get_multiplexed_tokio_connection().await?;
        tracing::info!("result store connected");
        Some(Arc::new(RedisResultStore::new(conn)))
    } else {
        tracing::info!("result store disabled; resolved replies will not be persisted");
        None
    };

    let session_id = match &config.bot.session_id {
        Some(id) => SessionId::new(id.clone())?,
        None => SessionId::generate(),
    };

    let state = ResolverAppState {
        runtime,
        store,
        bot_id: config.bot.bot_id.clone(),
        bot_alias_id: config.bot.bot_alias_id.clone(),
        locale_id: config.bot.locale_id.clone(),
        session_id,
        result_ttl_secs: config.store.result_ttl_secs,
    };

    let cors = match config.server.cors_origins_list() {
        origins if origins.is_empty() => CorsLayer::permissive(),
        origins => CorsLayer::new().allow_origin(AllowOrigin::list(
            origins
                .iter()
                .filter_map(|o| o.parse::<HeaderValue>().ok()),
        )),
    };

    let app = resolver_router()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(cors);

    let addr = config.server.socket_addr();
    tracing::info!(%addr, provider = ?config.nlu.provider, "parley-relay listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
