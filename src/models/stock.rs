use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::ApiError;
use crate::vocab;

/// One stock line, as stored and as listed on the wire. The wire keeps the
/// original PascalCase field names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "PascalCase")]
pub struct StockRecord {
    #[serde(rename = "StockID")]
    pub stock_id: i64,
    pub category: String,
    pub stock_status: String,
    pub location: String,
    pub item_name: String,
    pub unit: String,
    pub stock_date: NaiveDate,
    pub quantity: Decimal,
}

/// Write body for create and update. Every field is optional so the
/// handlers answer missing fields with the contractual 400 body instead of
/// a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StockPayload {
    #[serde(rename = "StockID", skip_serializing_if = "Option::is_none")]
    pub stock_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<Decimal>,
}

impl StockPayload {
    /// Validates a create body and builds the canonical record, applying
    /// the status and unit defaults. A missing, empty, or zero required
    /// field rejects.
    pub fn validate_create(self) -> Result<StockRecord, ApiError> {
        let stock_id = match self.stock_id {
            Some(id) if id != 0 => id,
            _ => return Err(missing_fields()),
        };
        self.validate_fields(stock_id)
    }

    /// Validates an update body against the target identifier. `StockID`
    /// in the body is ignored; the path parameter wins.
    pub fn validate_update(self, stock_id: i64) -> Result<StockRecord, ApiError> {
        self.validate_fields(stock_id)
    }

    fn validate_fields(self, stock_id: i64) -> Result<StockRecord, ApiError> {
        let category = require(self.category)?;
        let location = require(self.location)?;
        let item_name = require(self.item_name)?;
        let stock_date = self.stock_date.ok_or_else(missing_fields)?;
        let quantity = match self.quantity {
            Some(q) if q != Decimal::ZERO => q,
            _ => return Err(missing_fields()),
        };

        Ok(StockRecord {
            stock_id,
            category,
            stock_status: or_default(self.stock_status, vocab::default_status()),
            location,
            item_name,
            unit: or_default(self.unit, vocab::DEFAULT_UNIT),
            stock_date,
            quantity,
        })
    }
}

fn require(field: Option<String>) -> Result<String, ApiError> {
    match field {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(missing_fields()),
    }
}

fn or_default(field: Option<String>, default: &str) -> String {
    match field {
        Some(value) if !value.is_empty() => value,
        _ => default.to_string(),
    }
}

fn missing_fields() -> ApiError {
    ApiError::Validation("All required fields must be provided".to_string())
}

/// Aggregate counts returned by the summary endpoint.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, FromRow)]
pub struct StockSummary {
    pub total: i64,
    pub normal: i64,
    pub low: i64,
    pub urgent: i64,
    pub inactive: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn full_payload() -> StockPayload {
        StockPayload {
            stock_id: Some(1),
            category: Some("เมล็ด".into()),
            stock_status: Some("เหลือน้อย".into()),
            location: Some("Stockroom".into()),
            item_name: Some("Arabica beans".into()),
            unit: Some("ถุง".into()),
            stock_date: NaiveDate::from_ymd_opt(2024, 1, 1),
            quantity: Some(Decimal::from_str("10.5").unwrap()),
        }
    }

    #[test]
    fn wire_names_are_the_original_ones() {
        let record = full_payload().validate_create().unwrap();
        let value = serde_json::to_value(&record).unwrap();
        for key in [
            "StockID",
            "Category",
            "StockStatus",
            "Location",
            "ItemName",
            "Unit",
            "StockDate",
            "Quantity",
        ] {
            assert!(value.get(key).is_some(), "missing wire field {key}");
        }
    }

    #[test]
    fn record_json_round_trip() {
        let record = full_payload().validate_create().unwrap();
        let json = serde_json::to_string(&record).unwrap();
        let back: StockRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, back);
    }

    #[test]
    fn create_applies_defaults_for_status_and_unit() {
        let payload = StockPayload {
            stock_status: None,
            unit: None,
            ..full_payload()
        };
        let record = payload.validate_create().unwrap();
        assert_eq!(record.stock_status, "ปกติ");
        assert_eq!(record.unit, "กิโลกรัม");
    }

    #[test]
    fn empty_status_and_unit_also_default() {
        let payload = StockPayload {
            stock_status: Some(String::new()),
            unit: Some(String::new()),
            ..full_payload()
        };
        let record = payload.validate_create().unwrap();
        assert_eq!(record.stock_status, "ปกติ");
        assert_eq!(record.unit, "กิโลกรัม");
    }

    #[test]
    fn missing_required_fields_reject() {
        for payload in [
            StockPayload { stock_id: None, ..full_payload() },
            StockPayload { category: None, ..full_payload() },
            StockPayload { category: Some(String::new()), ..full_payload() },
            StockPayload { location: None, ..full_payload() },
            StockPayload { item_name: None, ..full_payload() },
            StockPayload { stock_date: None, ..full_payload() },
            StockPayload { quantity: None, ..full_payload() },
        ] {
            assert!(matches!(
                payload.validate_create(),
                Err(ApiError::Validation(_))
            ));
        }
    }

    #[test]
    fn zero_id_and_zero_quantity_are_falsy() {
        let payload = StockPayload { stock_id: Some(0), ..full_payload() };
        assert!(payload.validate_create().is_err());

        let payload = StockPayload { quantity: Some(Decimal::ZERO), ..full_payload() };
        assert!(payload.validate_create().is_err());
    }

    #[test]
    fn update_ignores_body_stock_id() {
        let payload = StockPayload { stock_id: Some(99), ..full_payload() };
        let record = payload.validate_update(7).unwrap();
        assert_eq!(record.stock_id, 7);
    }

    #[test]
    fn quantity_accepts_numbers_and_strings() {
        let from_number: StockPayload = serde_json::from_str(r#"{"Quantity": 10}"#).unwrap();
        let from_string: StockPayload = serde_json::from_str(r#"{"Quantity": "10"}"#).unwrap();
        assert_eq!(from_number.quantity, from_string.quantity);
    }
}
