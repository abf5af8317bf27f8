use deadpool_postgres::Pool;
use tokio_postgres::Row;
use uuid::Uuid;

use crate::db::error::{Error, Result};
use crate::models::AdminUser;

const ADMIN_COLUMNS: &str = "id, email, password_hash, name, created_at, updated_at";

pub(crate) fn parse_admin_row(row: &Row) -> Result<AdminUser> {
    Ok(AdminUser {
        id: row.try_get("id")?,
        email: row.try_get("email")?,
        password_hash: row.try_get("password_hash")?,
        name: row.try_get("name")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

pub async fn get_admin(pool: &Pool, admin_id: Uuid) -> Result<AdminUser> {
    let conn = pool.get().await?;

    let sql = format!("SELECT {} FROM admin_users WHERE id = $1", ADMIN_COLUMNS);
    let row = conn
        .query_opt(&sql, &[&admin_id])
        .await?
        .ok_or_else(|| Error::NotFound("Admin not found".to_string()))?;
    parse_admin_row(&row)
}

pub async fn find_admin_by_email(pool: &Pool, email: &str) -> Result<Option<AdminUser>> {
    let conn = pool.get().await?;

    let sql = format!("SELECT {} FROM admin_users WHERE email = $1", ADMIN_COLUMNS);
    conn.query_opt(&sql, &[&email])
        .await?
        .as_ref()
        .map(parse_admin_row)
        .transpose()
}

pub async fn create_admin(
    pool: &Pool,
    email: &str,
    password_hash: &str,
    name: &str,
) -> Result<AdminUser> {
    let conn = pool.get().await?;

    let sql = format!(
        "INSERT INTO admin_users (email, password_hash, name) \
         VALUES ($1, $2, $3) \
         RETURNING {}",
        ADMIN_COLUMNS
    );
    let row = conn
        .query_one(&sql, &[&email, &password_hash, &name])
        .await?;
    parse_admin_row(&row)
}
