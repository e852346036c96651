//! Application state of the client UI.
//!
//! The state is a single struct with an enumerable shape (record list,
//! filter selections, loading flag, error message, modal variant), mutated
//! only through the transition methods below. Rendering reads it; fetch
//! completions and user actions drive it.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::{StockPayload, StockRecord};
use crate::vocab::StockStatus;

/// The three independent filter selections. `None` means "all".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters {
    pub category: Option<String>,
    pub location: Option<String>,
    pub status: Option<String>,
}

impl Filters {
    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.location.is_none() && self.status.is_none()
    }

    pub fn clear(&mut self) {
        *self = Filters::default();
    }
}

/// Working copy of the modal form. Everything is held as entered text;
/// conversion happens on submit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StockForm {
    pub stock_id: String,
    pub category: String,
    pub stock_status: String,
    pub location: String,
    pub item_name: String,
    pub unit: String,
    pub stock_date: String,
    pub quantity: String,
}

impl StockForm {
    /// Blank form with the given date preselected, for the add modal.
    pub fn blank(today: NaiveDate) -> Self {
        Self {
            stock_date: today.format("%Y-%m-%d").to_string(),
            ..Self::default()
        }
    }

    /// Form seeded from an existing record, for the edit modal.
    pub fn from_record(record: &StockRecord) -> Self {
        Self {
            stock_id: record.stock_id.to_string(),
            category: record.category.clone(),
            stock_status: record.stock_status.clone(),
            location: record.location.clone(),
            item_name: record.item_name.clone(),
            unit: record.unit.clone(),
            stock_date: record.stock_date.format("%Y-%m-%d").to_string(),
            quantity: record.quantity.to_string(),
        }
    }

    /// Builds the write payload. Blank or unparsable fields are omitted so
    /// the server applies its own validation and defaults.
    pub fn to_payload(&self) -> StockPayload {
        StockPayload {
            stock_id: self.stock_id.trim().parse().ok(),
            category: non_blank(&self.category),
            stock_status: non_blank(&self.stock_status),
            location: non_blank(&self.location),
            item_name: non_blank(&self.item_name),
            unit: non_blank(&self.unit),
            stock_date: NaiveDate::from_str(self.stock_date.trim()).ok(),
            quantity: Decimal::from_str(self.quantity.trim()).ok(),
        }
    }
}

fn non_blank(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Modal state. The stock id is only editable while adding; editing keeps
/// the target id outside the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    Closed,
    Add(StockForm),
    Edit { stock_id: i64, form: StockForm },
}

/// Per-status counts derived from the currently loaded list. These reflect
/// the filtered view and may diverge from the server summary, which always
/// counts the unfiltered total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewStats {
    pub total: usize,
    pub normal: usize,
    pub low: usize,
    pub urgent: usize,
    pub inactive: usize,
}

#[derive(Debug)]
pub struct AppState {
    pub stocks: Vec<StockRecord>,
    pub filters: Filters,
    pub loading: bool,
    pub error: Option<String>,
    pub modal: Modal,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            stocks: Vec::new(),
            filters: Filters::default(),
            loading: true,
            error: None,
            modal: Modal::Closed,
        }
    }

    /// A list fetch has started.
    pub fn fetch_started(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// A list fetch completed with rows.
    pub fn list_loaded(&mut self, stocks: Vec<StockRecord>) {
        self.stocks = stocks;
        self.loading = false;
    }

    /// A list fetch failed. The stale list is dropped rather than shown.
    pub fn fetch_failed(&mut self, message: String) {
        self.stocks.clear();
        self.error = Some(message);
        self.loading = false;
    }

    /// A mutation failed; the last fetched list stays on screen.
    pub fn action_failed(&mut self, message: String) {
        self.error = Some(message);
    }

    pub fn open_add(&mut self, today: NaiveDate) {
        self.modal = Modal::Add(StockForm::blank(today));
    }

    pub fn open_edit(&mut self, record: &StockRecord) {
        self.modal = Modal::Edit {
            stock_id: record.stock_id,
            form: StockForm::from_record(record),
        };
    }

    pub fn close_modal(&mut self) {
        self.modal = Modal::Closed;
    }

    pub fn view_stats(&self) -> ViewStats {
        let mut stats = ViewStats {
            total: self.stocks.len(),
            ..ViewStats::default()
        };
        for record in &self.stocks {
            match StockStatus::from_label(&record.stock_status) {
                Some(StockStatus::Normal) => stats.normal += 1,
                Some(StockStatus::Low) => stats.low += 1,
                Some(StockStatus::Urgent) => stats.urgent += 1,
                Some(StockStatus::Inactive) => stats.inactive += 1,
                None => {}
            }
        }
        stats
    }
}
