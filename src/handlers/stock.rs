use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};
use sqlx::{Postgres, QueryBuilder};

use crate::database::Database;
use crate::error::ApiError;
use crate::models::{StockPayload, StockRecord, StockSummary};
use crate::vocab::StockStatus;

const LIST_COLUMNS: &str =
    "stock_id, category, stock_status, location, item_name, unit, stock_date, quantity";

/// Optional equality filters; each absent parameter is simply not applied.
#[derive(Debug, Default, Deserialize)]
pub struct StockFilterQuery {
    pub category: Option<String>,
    pub location: Option<String>,
    pub status: Option<String>,
}

/// Body of the create/update/delete responses.
#[derive(Debug, Serialize)]
pub struct MutationResponse {
    pub message: &'static str,
    #[serde(rename = "stockId")]
    pub stock_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<StockRecord>,
}

pub async fn list_stocks(
    State(db): State<Database>,
) -> Result<Json<Vec<StockRecord>>, ApiError> {
    let rows = sqlx::query_as::<_, StockRecord>(&format!(
        "SELECT {LIST_COLUMNS} FROM daily_stock ORDER BY stock_id DESC"
    ))
    .fetch_all(&db)
    .await?;

    Ok(Json(rows))
}

pub async fn filter_stocks(
    State(db): State<Database>,
    Query(query): Query<StockFilterQuery>,
) -> Result<Json<Vec<StockRecord>>, ApiError> {
    let mut sql: QueryBuilder<Postgres> =
        QueryBuilder::new(format!("SELECT {LIST_COLUMNS} FROM daily_stock WHERE 1=1"));

    if let Some(category) = normalize(query.category) {
        sql.push(" AND category = ");
        sql.push_bind(category);
    }
    if let Some(location) = normalize(query.location) {
        sql.push(" AND location = ");
        sql.push_bind(location);
    }
    if let Some(status) = normalize(query.status) {
        sql.push(" AND stock_status = ");
        sql.push_bind(status);
    }
    sql.push(" ORDER BY stock_id DESC");

    let rows = sql
        .build_query_as::<StockRecord>()
        .fetch_all(&db)
        .await?;

    Ok(Json(rows))
}

pub async fn get_stock(
    State(db): State<Database>,
    Path(id): Path<i64>,
) -> Result<Json<StockRecord>, ApiError> {
    let record = sqlx::query_as::<_, StockRecord>(&format!(
        "SELECT {LIST_COLUMNS} FROM daily_stock WHERE stock_id = $1"
    ))
    .bind(id)
    .fetch_optional(&db)
    .await?
    .ok_or_else(|| ApiError::NotFound("Stock not found".to_string()))?;

    Ok(Json(record))
}

pub async fn create_stock(
    State(db): State<Database>,
    Json(payload): Json<StockPayload>,
) -> Result<(StatusCode, Json<MutationResponse>), ApiError> {
    // Duplicate check comes first, matching the original validation order:
    // a taken id reports the conflict even when other fields are missing.
    if let Some(id) = payload.stock_id {
        let existing = sqlx::query_scalar::<_, i64>(
            "SELECT stock_id FROM daily_stock WHERE stock_id = $1",
        )
        .bind(id)
        .fetch_optional(&db)
        .await?;
        if existing.is_some() {
            return Err(ApiError::Conflict("Stock id already exists".to_string()));
        }
    }

    let record = payload.validate_create()?;

    let row_id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO daily_stock \
         (stock_id, category, stock_status, location, item_name, unit, stock_date, quantity) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING id",
    )
    .bind(record.stock_id)
    .bind(&record.category)
    .bind(&record.stock_status)
    .bind(&record.location)
    .bind(&record.item_name)
    .bind(&record.unit)
    .bind(record.stock_date)
    .bind(record.quantity)
    .fetch_one(&db)
    .await
    .map_err(conflict_on_unique)?;

    Ok((
        StatusCode::CREATED,
        Json(MutationResponse {
            message: "Stock created successfully",
            stock_id: row_id,
            data: Some(record),
        }),
    ))
}

pub async fn update_stock(
    State(db): State<Database>,
    Path(id): Path<i64>,
    Json(payload): Json<StockPayload>,
) -> Result<Json<MutationResponse>, ApiError> {
    ensure_exists(&db, id, "Stock to update not found").await?;

    let record = payload.validate_update(id)?;

    sqlx::query(
        "UPDATE daily_stock \
         SET category = $1, stock_status = $2, location = $3, item_name = $4, \
             unit = $5, stock_date = $6, quantity = $7 \
         WHERE stock_id = $8",
    )
    .bind(&record.category)
    .bind(&record.stock_status)
    .bind(&record.location)
    .bind(&record.item_name)
    .bind(&record.unit)
    .bind(record.stock_date)
    .bind(record.quantity)
    .bind(id)
    .execute(&db)
    .await?;

    Ok(Json(MutationResponse {
        message: "Stock updated successfully",
        stock_id: id,
        data: Some(record),
    }))
}

pub async fn delete_stock(
    State(db): State<Database>,
    Path(id): Path<i64>,
) -> Result<Json<MutationResponse>, ApiError> {
    ensure_exists(&db, id, "Stock to delete not found").await?;

    sqlx::query("DELETE FROM daily_stock WHERE stock_id = $1")
        .bind(id)
        .execute(&db)
        .await?;

    Ok(Json(MutationResponse {
        message: "Stock deleted successfully",
        stock_id: id,
        data: None,
    }))
}

pub async fn stock_summary(
    State(db): State<Database>,
) -> Result<Json<StockSummary>, ApiError> {
    let summary = sqlx::query_as::<_, StockSummary>(
        "SELECT COUNT(*) AS total, \
                COUNT(*) FILTER (WHERE stock_status = $1) AS normal, \
                COUNT(*) FILTER (WHERE stock_status = $2) AS low, \
                COUNT(*) FILTER (WHERE stock_status = $3) AS urgent, \
                COUNT(*) FILTER (WHERE stock_status = $4) AS inactive \
         FROM daily_stock",
    )
    .bind(StockStatus::Normal.label())
    .bind(StockStatus::Low.label())
    .bind(StockStatus::Urgent.label())
    .bind(StockStatus::Inactive.label())
    .fetch_one(&db)
    .await?;

    Ok(Json(summary))
}

async fn ensure_exists(db: &Database, id: i64, message: &str) -> Result<(), ApiError> {
    let existing =
        sqlx::query_scalar::<_, i64>("SELECT stock_id FROM daily_stock WHERE stock_id = $1")
            .bind(id)
            .fetch_optional(db)
            .await?;
    match existing {
        Some(_) => Ok(()),
        None => Err(ApiError::NotFound(message.to_string())),
    }
}

/// The UNIQUE constraint on `stock_id` backstops the duplicate pre-check;
/// a racing insert surfaces as the same conflict response.
fn conflict_on_unique(err: sqlx::Error) -> ApiError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            ApiError::Conflict("Stock id already exists".to_string())
        }
        _ => ApiError::Store(err),
    }
}

/// An empty query parameter means the filter is not applied.
fn normalize(param: Option<String>) -> Option<String> {
    param.filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filter_params_are_not_applied() {
        assert_eq!(normalize(None), None);
        assert_eq!(normalize(Some(String::new())), None);
        assert_eq!(normalize(Some("Stockroom".into())), Some("Stockroom".into()));
    }

    #[test]
    fn mutation_response_uses_camel_case_stock_id() {
        let body = MutationResponse {
            message: "Stock deleted successfully",
            stock_id: 42,
            data: None,
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["stockId"], 42);
        assert!(value.get("data").is_none());
    }
}
