use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, FromRow, Serialize)]
pub struct Stock {
    pub id: i64,
    pub name: String,
    pub quantity: i64,
    pub price_per_unit: f64,
}

/// Body for buy and sell. Fields stay optional so a missing or null value
/// surfaces as a 400 instead of a deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct TradeRequest {
    pub stock_name: Option<String>,
    pub quantity: Option<i64>,
    pub price_per_unit: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStockRequest {
    pub quantity: Option<i64>,
    pub price_per_unit: Option<f64>,
}
