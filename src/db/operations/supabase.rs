use chrono::{DateTime, Utc};
use deadpool_postgres::Pool;
use tokio_postgres::Row;
use uuid::Uuid;

use crate::db::error::{Error, Result};
use crate::models::{SupabaseConfigInput, UserSupabaseConfig};

const CONFIG_COLUMNS: &str = "id, user_id, supabase_url, anon_key, service_role_key, \
     use_service_role, last_verified_at, created_at, updated_at";

pub(crate) fn parse_config_row(row: &Row) -> Result<UserSupabaseConfig> {
    Ok(UserSupabaseConfig {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        supabase_url: row.try_get("supabase_url")?,
        anon_key: row.try_get("anon_key")?,
        service_role_key: row.try_get("service_role_key")?,
        use_service_role: row.try_get("use_service_role")?,
        last_verified_at: row.try_get("last_verified_at")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

pub async fn get_supabase_config(pool: &Pool, user_id: Uuid) -> Result<Option<UserSupabaseConfig>> {
    let conn = pool.get().await?;

    let sql = format!(
        "SELECT {} FROM user_supabase_configs WHERE user_id = $1",
        CONFIG_COLUMNS
    );
    conn.query_opt(&sql, &[&user_id])
        .await?
        .as_ref()
        .map(parse_config_row)
        .transpose()
}

/// Create or replace a user's credentials
///
/// Keys omitted from `input` keep their stored value. Any change clears
/// `last_verified_at`. Fails with `NotFound` when the user doesn't exist.
pub async fn upsert_supabase_config(
    pool: &Pool,
    user_id: Uuid,
    input: &SupabaseConfigInput,
) -> Result<UserSupabaseConfig> {
    let conn = pool.get().await?;

    let sql = format!(
        "INSERT INTO user_supabase_configs \
            (user_id, supabase_url, anon_key, service_role_key, use_service_role) \
         SELECT u.id, $2::text, $3::text, $4::text, $5::boolean \
         FROM users u WHERE u.id = $1 \
         ON CONFLICT (user_id) DO UPDATE SET \
            supabase_url = EXCLUDED.supabase_url, \
            anon_key = COALESCE(EXCLUDED.anon_key, user_supabase_configs.anon_key), \
            service_role_key = COALESCE(EXCLUDED.service_role_key, user_supabase_configs.service_role_key), \
            use_service_role = EXCLUDED.use_service_role, \
            last_verified_at = NULL, \
            updated_at = now() \
         RETURNING {}",
        CONFIG_COLUMNS
    );
    let row = conn
        .query_opt(
            &sql,
            &[
                &user_id,
                &input.supabase_url,
                &input.anon_key,
                &input.service_role_key,
                &input.use_service_role,
            ],
        )
        .await?
        .ok_or_else(|| Error::NotFound("User not found".to_string()))?;
    parse_config_row(&row)
}

pub async fn delete_supabase_config(pool: &Pool, user_id: Uuid) -> Result<()> {
    let conn = pool.get().await?;

    let deleted = conn
        .execute(
            "DELETE FROM user_supabase_configs WHERE user_id = $1",
            &[&user_id],
        )
        .await?;
    if deleted == 0 {
        return Err(Error::NotFound("Supabase config not found".to_string()));
    }
    Ok(())
}

/// Record a successful credential check
pub async fn mark_supabase_verified(
    pool: &Pool,
    user_id: Uuid,
    verified_at: DateTime<Utc>,
) -> Result<()> {
    let conn = pool.get().await?;

    conn.execute(
        "UPDATE user_supabase_configs SET last_verified_at = $2 WHERE user_id = $1",
        &[&user_id, &verified_at],
    )
    .await?;
    Ok(())
}
