use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, FromRow, Serialize)]
pub struct Transaction {
    pub id: i64,
    pub stock_name: String,
    pub quantity: i64,
    pub price_per_unit: f64,
    pub transaction_type: String,
    pub transaction_date: chrono::DateTime<chrono::Utc>,
}
