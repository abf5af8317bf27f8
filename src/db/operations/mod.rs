// SQL for each entity; every function checks out its own pooled connection

pub mod admins;
pub mod projects;
pub mod sub_projects;
pub mod supabase;
pub mod users;

use deadpool_postgres::Pool;

use crate::db::error::Result;

/// Round-trip a trivial query
pub async fn ping(pool: &Pool) -> Result<()> {
    let conn = pool.get().await?;
    conn.query_one("SELECT 1", &[]).await?;
    Ok(())
}
