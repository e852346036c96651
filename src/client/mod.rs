pub mod api;
pub mod state;

pub use api::{ClientError, StockApi};
pub use state::{AppState, Filters, Modal, StockForm, ViewStats};

/// Ties the API client to the application state and enforces the
/// synchronization contract: every filter change and every successful
/// mutation refetches the current filtered view, so the displayed list
/// always reflects server truth rather than a local merge.
pub struct StockClient {
    pub api: StockApi,
    pub state: AppState,
}

impl StockClient {
    pub fn new(api: StockApi) -> Self {
        Self {
            api,
            state: AppState::new(),
        }
    }

    /// Refetches the list for the current filters.
    pub fn refresh(&mut self) {
        self.state.fetch_started();
        match self.api.list(&self.state.filters) {
            Ok(stocks) => self.state.list_loaded(stocks),
            Err(err) => self.state.fetch_failed(err.to_string()),
        }
    }

    /// Applies a filter change; any actual change refetches immediately.
    pub fn set_filters(&mut self, filters: Filters) {
        if self.state.filters != filters {
            self.state.filters = filters;
            self.refresh();
        }
    }

    pub fn clear_filters(&mut self) {
        if !self.state.filters.is_empty() {
            self.state.filters.clear();
            self.refresh();
        }
    }

    /// Submits the open modal. Success closes it and refetches; the local
    /// list is never patched in place.
    pub fn submit_modal(&mut self) {
        let result = match &self.state.modal {
            Modal::Closed => return,
            Modal::Add(form) => self.api.create(&form.to_payload()),
            Modal::Edit { stock_id, form } => self.api.update(*stock_id, &form.to_payload()),
        };
        match result {
            Ok(()) => {
                self.state.close_modal();
                self.refresh();
            }
            Err(err) => self.state.action_failed(err.to_string()),
        }
    }

    pub fn delete(&mut self, stock_id: i64) {
        match self.api.delete(stock_id) {
            Ok(()) => self.refresh(),
            Err(err) => self.state.action_failed(err.to_string()),
        }
    }
}
