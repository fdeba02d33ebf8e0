mod config;
mod error;
mod pdf;
mod router;
mod state;
#[cfg(test)]
mod testing;
mod view;

use anyhow::Context;
use axum::Router;
use dotenvy::dotenv;
use tower_http::trace::TraceLayer;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};

use crate::{config::Config, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    // 1. Initialize logger
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::DEBUG.into())
        .from_env()?
        .add_directive("hyper::proto=info".parse()?)
        .add_directive("hyper::client=info".parse()?)
        .add_directive("reqwest=info".parse()?);
    tracing_subscriber::fmt().with_env_filter(filter).compact().init();

    // 2. Load configuration, open cache and API client
    let config = Config::from_env()?;
    let app_state = AppState::from_config(&config)?;

    // 3. Setup router
    let app = Router::new()
        .merge(router::page::page_router())
        .merge(router::pdf::pdf_router())
        .merge(router::cache::cache_router())
        .fallback(router::page::not_found)
        .layer(TraceLayer::new_for_http().on_request(()))
        .with_state(app_state);

    // 4. Start server
    tracing::info!("Server starting at {}", config.server_address);
    axum::Server::bind(&config.server_address)
        .serve(app.into_make_service())
        .await
        .context("server stopped")?;
    Ok(())
}
