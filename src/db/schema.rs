use deadpool_postgres::Pool;

use crate::db::error::Result;

/// DDL for every table the service owns. Every statement is idempotent.
pub const SCHEMA_SQL: &str = include_str!("schema.sql");

/// Create any missing tables and indexes
pub async fn ensure_schema(pool: &Pool) -> Result<()> {
    let conn = pool.get().await?;
    conn.batch_execute(SCHEMA_SQL).await?;
    Ok(())
}
