pub mod client;
pub mod database;
pub mod error;
pub mod handlers;
pub mod models;
pub mod vocab;

pub use database::{create_database_pool, Database};
pub use error::ApiError;
pub use handlers::router;
pub use models::{StockPayload, StockRecord, StockSummary};
