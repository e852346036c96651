use sqlx::{PgPool, Pool, Postgres};

pub type Database = Pool<Postgres>;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS daily_stock (
    id           BIGSERIAL PRIMARY KEY,
    stock_id     BIGINT NOT NULL UNIQUE,
    category     TEXT NOT NULL,
    stock_status TEXT NOT NULL,
    location     TEXT NOT NULL,
    item_name    TEXT NOT NULL,
    unit         TEXT NOT NULL,
    stock_date   DATE NOT NULL,
    quantity     NUMERIC(14, 2) NOT NULL
)
"#;

pub async fn create_database_pool(database_url: &str) -> Result<Database, sqlx::Error> {
    let pool = PgPool::connect(database_url).await?;

    // Test the connection
    sqlx::query("SELECT 1")
        .fetch_one(&pool)
        .await?;

    ensure_schema(&pool).await?;

    Ok(pool)
}

/// Creates the stock table on first run. The UNIQUE constraint on
/// `stock_id` backs the duplicate check performed on create.
pub async fn ensure_schema(pool: &Database) -> Result<(), sqlx::Error> {
    sqlx::query(SCHEMA).execute(pool).await?;
    Ok(())
}
