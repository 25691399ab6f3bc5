mod config;
mod db;
mod error;
mod handlers;
mod models;
mod state;

use axum::{
    routing::{get, post, put},
    Router,
};
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::Config;
use handlers::{
    buy_stock, delete_stock, get_stocks, get_transactions, profit_loss, sell_stock, update_stock,
};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;
    let pool = db::create_pool(&config).await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    let state = AppState { pool };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(health))
        .route("/v1/stock", get(get_stocks))
        .route("/v1/stock/buy", post(buy_stock))
        .route("/v1/stock/sell", post(sell_stock))
        .route("/v1/stock/profit_loss", get(profit_loss))
        .route("/v1/stock/transactions", get(get_transactions))
        .route("/v1/stock/:name", put(update_stock).delete(delete_stock))
        .layer(cors)
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Server listening on http://{}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, app).await?;

    Ok(())
}

async fn health() -> &'static str {
    "OK"
}
