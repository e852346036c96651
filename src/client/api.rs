//! Typed HTTP client over the stock API, used by the `stock_ui` binary.

use std::time::Duration;

use serde_json::Value;
use thiserror::Error;

use super::state::Filters;
use crate::models::{StockPayload, StockRecord, StockSummary};

/// Client-side failure. The UI surfaces every kind through the same error
/// banner; the split mostly matters for logging.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{message}")]
    Api { status: u16, message: String },
    #[error("{0}")]
    Transport(String),
}

pub struct StockApi {
    base_url: String,
    agent: ureq::Agent,
}

impl StockApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(10))
            .build();
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            agent,
        }
    }

    /// Fetches the list for the given filters. No filters hits the plain
    /// list endpoint; otherwise only the set filters become parameters.
    pub fn list(&self, filters: &Filters) -> Result<Vec<StockRecord>, ClientError> {
        let request = if filters.is_empty() {
            self.agent.get(&self.url("/dailystock"))
        } else {
            let mut request = self.agent.get(&self.url("/dailystock/filter"));
            if let Some(category) = &filters.category {
                request = request.query("category", category);
            }
            if let Some(location) = &filters.location {
                request = request.query("location", location);
            }
            if let Some(status) = &filters.status {
                request = request.query("status", status);
            }
            request
        };

        let response = request.call().map_err(convert)?;
        response
            .into_json()
            .map_err(|err| ClientError::Transport(err.to_string()))
    }

    pub fn get(&self, stock_id: i64) -> Result<StockRecord, ClientError> {
        let response = self
            .agent
            .get(&self.url(&format!("/dailystock/{stock_id}")))
            .call()
            .map_err(convert)?;
        response
            .into_json()
            .map_err(|err| ClientError::Transport(err.to_string()))
    }

    pub fn create(&self, payload: &StockPayload) -> Result<(), ClientError> {
        self.agent
            .post(&self.url("/dailystock"))
            .send_json(payload)
            .map_err(convert)?;
        Ok(())
    }

    pub fn update(&self, stock_id: i64, payload: &StockPayload) -> Result<(), ClientError> {
        self.agent
            .put(&self.url(&format!("/dailystock/{stock_id}")))
            .send_json(payload)
            .map_err(convert)?;
        Ok(())
    }

    pub fn delete(&self, stock_id: i64) -> Result<(), ClientError> {
        self.agent
            .delete(&self.url(&format!("/dailystock/{stock_id}")))
            .call()
            .map_err(convert)?;
        Ok(())
    }

    /// Server-wide counts; unlike the stats row, these are never filtered.
    pub fn summary(&self) -> Result<StockSummary, ClientError> {
        let response = self
            .agent
            .get(&self.url("/dailystock/stats/summary"))
            .call()
            .map_err(convert)?;
        response
            .into_json()
            .map_err(|err| ClientError::Transport(err.to_string()))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn convert(err: ureq::Error) -> ClientError {
    match err {
        ureq::Error::Status(status, response) => {
            let message = response
                .into_json::<Value>()
                .ok()
                .and_then(|body| body["error"].as_str().map(str::to_string))
                .unwrap_or_else(|| format!("request failed with status {status}"));
            ClientError::Api { status, message }
        }
        ureq::Error::Transport(transport) => ClientError::Transport(transport.to_string()),
    }
}
