pub mod stock;

pub use stock::{StockPayload, StockRecord, StockSummary};
