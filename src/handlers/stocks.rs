use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use tracing::{error, info, warn};

use crate::{
    error::AppError,
    models::{Stock, TradeRequest, Transaction, UpdateStockRequest},
    state::AppState,
};

/// Pulls the three mandatory trade fields out of the body, rejecting missing,
/// empty, and non-positive values.
fn validate_trade(req: &TradeRequest) -> Result<(String, i64, f64), AppError> {
    let stock_name = match req.stock_name.as_deref() {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => {
            error!("invalid input data: missing or empty stock_name");
            return Err(AppError::InvalidInput);
        }
    };
    let quantity = match req.quantity {
        Some(q) if q > 0 => q,
        _ => {
            error!(stock = %stock_name, "invalid input data: quantity must be positive");
            return Err(AppError::InvalidInput);
        }
    };
    let price_per_unit = match req.price_per_unit {
        Some(p) if p > 0.0 => p,
        _ => {
            error!(stock = %stock_name, "invalid input data: price_per_unit must be positive");
            return Err(AppError::InvalidInput);
        }
    };
    Ok((stock_name, quantity, price_per_unit))
}

pub async fn buy_stock(
    State(state): State<AppState>,
    Json(req): Json<TradeRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    let (stock_name, quantity, price_per_unit) = validate_trade(&req)?;

    let mut tx = state.pool.begin().await?;

    // Every buy opens a fresh holding row; rows of the same name are not merged.
    sqlx::query("INSERT INTO stocks (name, quantity, price_per_unit) VALUES (?, ?, ?)")
        .bind(&stock_name)
        .bind(quantity)
        .bind(price_per_unit)
        .execute(&mut *tx)
        .await?;

    sqlx::query(
        "INSERT INTO transactions (stock_name, transaction_type, quantity, price_per_unit, transaction_date) VALUES (?, 'buy', ?, ?, ?)",
    )
    .bind(&stock_name)
    .bind(quantity)
    .bind(price_per_unit)
    .bind(Utc::now())
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    info!(stock = %stock_name, quantity, price_per_unit, "stock bought");

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "message": "Stock bought successfully" })),
    ))
}

pub async fn sell_stock(
    State(state): State<AppState>,
    Json(req): Json<TradeRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let (stock_name, quantity, price_per_unit) = validate_trade(&req)?;

    let held: Option<(i64, f64)> =
        sqlx::query_as("SELECT quantity, price_per_unit FROM stocks WHERE name = ?")
            .bind(&stock_name)
            .fetch_optional(&state.pool)
            .await?;

    let (held_quantity, held_price) = match held {
        Some(h) => h,
        None => {
            warn!(stock = %stock_name, "stock not found");
            return Err(AppError::StockNotFound);
        }
    };

    if quantity > held_quantity {
        warn!(
            stock = %stock_name,
            requested = quantity,
            held = held_quantity,
            "insufficient quantity"
        );
        return Err(AppError::InsufficientQuantity);
    }

    let profit_or_loss = (price_per_unit - held_price) * quantity as f64;

    let mut tx = state.pool.begin().await?;

    sqlx::query(
        "INSERT INTO transactions (stock_name, transaction_type, quantity, price_per_unit, transaction_date) VALUES (?, 'sell', ?, ?, ?)",
    )
    .bind(&stock_name)
    .bind(quantity)
    .bind(price_per_unit)
    .bind(Utc::now())
    .execute(&mut *tx)
    .await?;

    if quantity == held_quantity {
        sqlx::query("DELETE FROM stocks WHERE name = ?")
            .bind(&stock_name)
            .execute(&mut *tx)
            .await?;
    } else {
        // Quantity shrinks in place; price_per_unit keeps its buy-side value.
        sqlx::query("UPDATE stocks SET quantity = ? WHERE name = ?")
            .bind(held_quantity - quantity)
            .bind(&stock_name)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;

    let message = if profit_or_loss > 0.0 {
        format!("Successfully sold {quantity} units of {stock_name} with a profit of {profit_or_loss}")
    } else if profit_or_loss < 0.0 {
        format!("Successfully sold {quantity} units of {stock_name} with a loss of {profit_or_loss}")
    } else {
        format!("Successfully sold {quantity} units of {stock_name}")
    };

    info!(stock = %stock_name, quantity, profit_or_loss, "stock sold");

    Ok(Json(serde_json::json!({ "message": message })))
}

pub async fn update_stock(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(req): Json<UpdateStockRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let exists: Option<(i64,)> = sqlx::query_as("SELECT id FROM stocks WHERE name = ?")
        .bind(&name)
        .fetch_optional(&state.pool)
        .await?;

    if exists.is_none() {
        warn!(stock = %name, "stock not found");
        return Err(AppError::StockNotFound);
    }

    let mut tx = state.pool.begin().await?;

    // Each present field gets its own statement.
    if let Some(quantity) = req.quantity {
        sqlx::query("UPDATE stocks SET quantity = ? WHERE name = ?")
            .bind(quantity)
            .bind(&name)
            .execute(&mut *tx)
            .await?;
    }
    if let Some(price_per_unit) = req.price_per_unit {
        sqlx::query("UPDATE stocks SET price_per_unit = ? WHERE name = ?")
            .bind(price_per_unit)
            .bind(&name)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;

    info!(stock = %name, "stock updated");

    Ok(Json(serde_json::json!({ "message": "Stock updated successfully" })))
}

pub async fn delete_stock(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let exists: Option<(i64,)> = sqlx::query_as("SELECT id FROM stocks WHERE name = ?")
        .bind(&name)
        .fetch_optional(&state.pool)
        .await?;

    if exists.is_none() {
        warn!(stock = %name, "stock not found");
        return Err(AppError::StockNotFound);
    }

    sqlx::query("DELETE FROM stocks WHERE name = ?")
        .bind(&name)
        .execute(&state.pool)
        .await?;

    info!(stock = %name, "stock deleted");

    Ok(Json(serde_json::json!({ "message": "Stock deleted successfully" })))
}

pub async fn profit_loss(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let total_value: Option<f64> =
        sqlx::query_scalar("SELECT SUM(price_per_unit * quantity) FROM stocks")
            .fetch_one(&state.pool)
            .await?;

    let total_sell_cost: Option<f64> = sqlx::query_scalar(
        "SELECT SUM(price_per_unit * quantity) FROM transactions WHERE transaction_type = 'sell'",
    )
    .fetch_one(&state.pool)
    .await?;

    let total_buy_cost: Option<f64> = sqlx::query_scalar(
        "SELECT SUM(price_per_unit * quantity) FROM transactions WHERE transaction_type = 'buy'",
    )
    .fetch_one(&state.pool)
    .await?;

    // NULL aggregates mean an empty table and count as zero.
    let profit_or_loss = total_value.unwrap_or(0.0) - total_sell_cost.unwrap_or(0.0)
        + total_buy_cost.unwrap_or(0.0);

    info!(profit_or_loss, "profit/loss calculated");

    Ok(Json(serde_json::json!({ "profit_or_loss": profit_or_loss })))
}

pub async fn get_stocks(State(state): State<AppState>) -> Result<Json<Vec<Stock>>, AppError> {
    let stocks = sqlx::query_as::<_, Stock>(
        "SELECT id, name, quantity, price_per_unit FROM stocks ORDER BY name",
    )
    .fetch_all(&state.pool)
    .await?;

    Ok(Json(stocks))
}

pub async fn get_transactions(
    State(state): State<AppState>,
) -> Result<Json<Vec<Transaction>>, AppError> {
    let transactions = sqlx::query_as::<_, Transaction>(
        "SELECT id, stock_name, quantity, price_per_unit, transaction_type, transaction_date FROM transactions ORDER BY transaction_date DESC LIMIT 50",
    )
    .fetch_all(&state.pool)
    .await?;

    Ok(Json(transactions))
}
