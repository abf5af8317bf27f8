use deadpool_postgres::Pool;
use tokio_postgres::Row;
use uuid::Uuid;

use super::projects::project_not_found;
use crate::db::error::{Error, Result};
use crate::models::{NewSubProject, ProjectFile, SubProject, SubProjectChanges};

const SUB_PROJECT_COLUMNS: &str =
    "id, project_id, name, description, icon, sort_order, created_at, updated_at";

pub(crate) fn parse_sub_project_row(row: &Row) -> Result<SubProject> {
    Ok(SubProject {
        id: row.try_get("id")?,
        project_id: row.try_get("project_id")?,
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        icon: row.try_get("icon")?,
        sort_order: row.try_get("sort_order")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

pub(crate) fn parse_project_file_row(row: &Row) -> Result<ProjectFile> {
    Ok(ProjectFile {
        id: row.try_get("id")?,
        sub_project_id: row.try_get("sub_project_id")?,
        file_name: row.try_get("file_name")?,
        mime_type: row.try_get("mime_type")?,
        storage_path: row.try_get("storage_path")?,
        size_bytes: row.try_get("size_bytes")?,
        created_at: row.try_get("created_at")?,
    })
}

fn sub_project_not_found() -> Error {
    Error::NotFound("Sub-project not found".to_string())
}

/// Ownership predicate: the sub-project's parent project belongs to the caller
const OWNED_SUB_PROJECT: &str = "SELECT s.id FROM sub_projects s \
     JOIN projects p ON p.id = s.project_id \
     WHERE s.id = $1 AND p.user_id = $2";

/// Sub-projects of an owned project, ordered by `sort_order` then name
pub async fn list_sub_projects(
    pool: &Pool,
    user_id: Uuid,
    project_id: Uuid,
) -> Result<Vec<SubProject>> {
    let conn = pool.get().await?;

    conn.query_opt(
        "SELECT id FROM projects WHERE id = $1 AND user_id = $2",
        &[&project_id, &user_id],
    )
    .await?
    .ok_or_else(project_not_found)?;

    let sql = format!(
        "SELECT {} FROM sub_projects \
         WHERE project_id = $1 \
         ORDER BY sort_order ASC, name ASC",
        SUB_PROJECT_COLUMNS
    );
    let rows = conn.query(&sql, &[&project_id]).await?;
    rows.iter().map(parse_sub_project_row).collect()
}

/// Insert a sub-project under an owned project, last in its ordering
pub async fn create_sub_project(
    pool: &Pool,
    user_id: Uuid,
    project_id: Uuid,
    sub_project: &NewSubProject,
) -> Result<SubProject> {
    let conn = pool.get().await?;

    let sql = format!(
        "INSERT INTO sub_projects (project_id, name, description, icon, sort_order) \
         SELECT p.id, $3::text, $4::text, $5::text, \
            (SELECT COALESCE(MAX(s.sort_order) + 1, 0) FROM sub_projects s WHERE s.project_id = p.id) \
         FROM projects p \
         WHERE p.id = $1 AND p.user_id = $2 \
         RETURNING {}",
        SUB_PROJECT_COLUMNS
    );
    let row = conn
        .query_opt(
            &sql,
            &[
                &project_id,
                &user_id,
                &sub_project.name,
                &sub_project.description,
                &sub_project.icon,
            ],
        )
        .await?
        .ok_or_else(project_not_found)?;
    parse_sub_project_row(&row)
}

pub async fn update_sub_project(
    pool: &Pool,
    user_id: Uuid,
    sub_project_id: Uuid,
    changes: &SubProjectChanges,
) -> Result<SubProject> {
    let conn = pool.get().await?;

    let sql = format!(
        "UPDATE sub_projects SET \
            name = COALESCE($3, name), \
            description = NULLIF(COALESCE($4, description), ''), \
            icon = NULLIF(COALESCE($5, icon), ''), \
            sort_order = COALESCE($6, sort_order), \
            updated_at = now() \
         WHERE id IN ({}) \
         RETURNING {}",
        OWNED_SUB_PROJECT,
        SUB_PROJECT_COLUMNS
    );
    let row = conn
        .query_opt(
            &sql,
            &[
                &sub_project_id,
                &user_id,
                &changes.name,
                &changes.description,
                &changes.icon,
                &changes.sort_order,
            ],
        )
        .await?
        .ok_or_else(sub_project_not_found)?;
    parse_sub_project_row(&row)
}

/// Delete an owned sub-project and its files
pub async fn delete_sub_project(pool: &Pool, user_id: Uuid, sub_project_id: Uuid) -> Result<()> {
    let mut conn = pool.get().await?;
    let tx = conn.transaction().await?;

    tx.query_opt(OWNED_SUB_PROJECT, &[&sub_project_id, &user_id])
        .await?
        .ok_or_else(sub_project_not_found)?;

    tx.execute(
        "DELETE FROM project_files WHERE sub_project_id = $1",
        &[&sub_project_id],
    )
    .await?;
    tx.execute("DELETE FROM sub_projects WHERE id = $1", &[&sub_project_id])
        .await?;

    tx.commit().await?;
    Ok(())
}

/// Files attached to an owned sub-project, newest first
pub async fn list_project_files(
    pool: &Pool,
    user_id: Uuid,
    sub_project_id: Uuid,
) -> Result<Vec<ProjectFile>> {
    let conn = pool.get().await?;

    conn.query_opt(OWNED_SUB_PROJECT, &[&sub_project_id, &user_id])
        .await?
        .ok_or_else(sub_project_not_found)?;

    let rows = conn
        .query(
            "SELECT id, sub_project_id, file_name, mime_type, storage_path, size_bytes, created_at \
             FROM project_files \
             WHERE sub_project_id = $1 \
             ORDER BY created_at DESC, file_name ASC",
            &[&sub_project_id],
        )
        .await?;
    rows.iter().map(parse_project_file_row).collect()
}
