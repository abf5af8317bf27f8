use deadpool_postgres::Pool;
use tokio_postgres::Row;
use uuid::Uuid;

use crate::db::error::{Error, Result};
use crate::models::{NewUser, User, UserChanges, UserSummary};

const USER_COLUMNS: &str = "id, email, password_hash, name, is_verified, created_at, updated_at";

pub(crate) fn parse_user_row(row: &Row) -> Result<User> {
    Ok(User {
        id: row.try_get("id")?,
        email: row.try_get("email")?,
        password_hash: row.try_get("password_hash")?,
        name: row.try_get("name")?,
        is_verified: row.try_get("is_verified")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn not_found() -> Error {
    Error::NotFound("User not found".to_string())
}

/// All users, newest first, flagged with whether they have Supabase credentials
pub async fn list_users(pool: &Pool) -> Result<Vec<UserSummary>> {
    let conn = pool.get().await?;

    let rows = conn
        .query(
            "SELECT u.id, u.email, u.password_hash, u.name, u.is_verified, u.created_at, u.updated_at, \
                    EXISTS (SELECT 1 FROM user_supabase_configs c WHERE c.user_id = u.id) AS has_supabase_config \
             FROM users u \
             ORDER BY u.created_at DESC, u.email ASC",
            &[],
        )
        .await?;

    rows.iter()
        .map(|row| {
            Ok(UserSummary {
                user: parse_user_row(row)?,
                has_supabase_config: row.try_get("has_supabase_config")?,
            })
        })
        .collect()
}

pub async fn get_user(pool: &Pool, user_id: Uuid) -> Result<User> {
    let conn = pool.get().await?;

    let sql = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
    let row = conn.query_opt(&sql, &[&user_id]).await?.ok_or_else(not_found)?;
    parse_user_row(&row)
}

/// Look up a user by normalized (trimmed, lower-cased) email
pub async fn find_user_by_email(pool: &Pool, email: &str) -> Result<Option<User>> {
    let conn = pool.get().await?;

    let sql = format!("SELECT {} FROM users WHERE email = $1", USER_COLUMNS);
    conn.query_opt(&sql, &[&email])
        .await?
        .as_ref()
        .map(parse_user_row)
        .transpose()
}

/// Insert a user; `Error::Conflict` when the email is taken
pub async fn create_user(pool: &Pool, user: &NewUser, password_hash: &str) -> Result<User> {
    let conn = pool.get().await?;

    let sql = format!(
        "INSERT INTO users (email, password_hash, name, is_verified) \
         VALUES ($1, $2, $3, $4) \
         RETURNING {}",
        USER_COLUMNS
    );
    let row = conn
        .query_one(
            &sql,
            &[&user.email, &password_hash, &user.name, &user.is_verified],
        )
        .await?;
    parse_user_row(&row)
}

pub async fn update_user(
    pool: &Pool,
    user_id: Uuid,
    changes: &UserChanges,
    password_hash: Option<&str>,
) -> Result<User> {
    let conn = pool.get().await?;

    let sql = format!(
        "UPDATE users SET \
            email = COALESCE($2, email), \
            name = COALESCE($3, name), \
            password_hash = COALESCE($4, password_hash), \
            is_verified = COALESCE($5, is_verified), \
            updated_at = now() \
         WHERE id = $1 \
         RETURNING {}",
        USER_COLUMNS
    );
    let row = conn
        .query_opt(
            &sql,
            &[
                &user_id,
                &changes.email,
                &changes.name,
                &password_hash,
                &changes.is_verified,
            ],
        )
        .await?
        .ok_or_else(not_found)?;
    parse_user_row(&row)
}

/// Delete a user and everything they own in one transaction
///
/// Order: project files, sub-projects, projects, Supabase config, user.
pub async fn delete_user(pool: &Pool, user_id: Uuid) -> Result<()> {
    let mut conn = pool.get().await?;
    let tx = conn.transaction().await?;

    tx.execute(
        "DELETE FROM project_files WHERE sub_project_id IN ( \
            SELECT s.id FROM sub_projects s \
            JOIN projects p ON p.id = s.project_id \
            WHERE p.user_id = $1)",
        &[&user_id],
    )
    .await?;
    tx.execute(
        "DELETE FROM sub_projects WHERE project_id IN (SELECT id FROM projects WHERE user_id = $1)",
        &[&user_id],
    )
    .await?;
    tx.execute("DELETE FROM projects WHERE user_id = $1", &[&user_id])
        .await?;
    tx.execute(
        "DELETE FROM user_supabase_configs WHERE user_id = $1",
        &[&user_id],
    )
    .await?;

    let deleted = tx
        .execute("DELETE FROM users WHERE id = $1", &[&user_id])
        .await?;
    if deleted == 0 {
        // dropping the transaction rolls it back
        return Err(not_found());
    }

    tx.commit().await?;
    Ok(())
}
