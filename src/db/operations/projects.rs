use deadpool_postgres::Pool;
use tokio_postgres::Row;
use uuid::Uuid;

use crate::db::error::{Error, Result};
use crate::models::{NewProject, Project, ProjectChanges};

const PROJECT_COLUMNS: &str =
    "id, user_id, name, description, icon, color, sort_order, created_at, updated_at";

pub(crate) fn parse_project_row(row: &Row) -> Result<Project> {
    Ok(Project {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        icon: row.try_get("icon")?,
        color: row.try_get("color")?,
        sort_order: row.try_get("sort_order")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

pub(crate) fn project_not_found() -> Error {
    Error::NotFound("Project not found".to_string())
}

/// Projects owned by `user_id`, ordered by `sort_order` then creation time
pub async fn list_projects(pool: &Pool, user_id: Uuid) -> Result<Vec<Project>> {
    let conn = pool.get().await?;

    let sql = format!(
        "SELECT {} FROM projects \
         WHERE user_id = $1 \
         ORDER BY sort_order ASC, created_at ASC",
        PROJECT_COLUMNS
    );
    let rows = conn.query(&sql, &[&user_id]).await?;
    rows.iter().map(parse_project_row).collect()
}

pub async fn get_project(pool: &Pool, user_id: Uuid, project_id: Uuid) -> Result<Project> {
    let conn = pool.get().await?;

    let sql = format!(
        "SELECT {} FROM projects WHERE id = $1 AND user_id = $2",
        PROJECT_COLUMNS
    );
    let row = conn
        .query_opt(&sql, &[&project_id, &user_id])
        .await?
        .ok_or_else(project_not_found)?;
    parse_project_row(&row)
}

/// Insert a project at the end of the owner's ordering
pub async fn create_project(pool: &Pool, user_id: Uuid, project: &NewProject) -> Result<Project> {
    let conn = pool.get().await?;

    let sql = format!(
        "INSERT INTO projects (user_id, name, description, icon, color, sort_order) \
         VALUES ($1, $2, $3, $4, $5, \
            (SELECT COALESCE(MAX(sort_order) + 1, 0) FROM projects WHERE user_id = $1)) \
         RETURNING {}",
        PROJECT_COLUMNS
    );
    let row = conn
        .query_one(
            &sql,
            &[
                &user_id,
                &project.name,
                &project.description,
                &project.icon,
                &project.color,
            ],
        )
        .await?;
    parse_project_row(&row)
}

pub async fn update_project(
    pool: &Pool,
    user_id: Uuid,
    project_id: Uuid,
    changes: &ProjectChanges,
) -> Result<Project> {
    let conn = pool.get().await?;

    let sql = format!(
        "UPDATE projects SET \
            name = COALESCE($3, name), \
            description = NULLIF(COALESCE($4, description), ''), \
            icon = NULLIF(COALESCE($5, icon), ''), \
            color = COALESCE($6, color), \
            sort_order = COALESCE($7, sort_order), \
            updated_at = now() \
         WHERE id = $1 AND user_id = $2 \
         RETURNING {}",
        PROJECT_COLUMNS
    );
    let row = conn
        .query_opt(
            &sql,
            &[
                &project_id,
                &user_id,
                &changes.name,
                &changes.description,
                &changes.icon,
                &changes.color,
                &changes.sort_order,
            ],
        )
        .await?
        .ok_or_else(project_not_found)?;
    parse_project_row(&row)
}

/// Delete an owned project with its sub-projects and their files
pub async fn delete_project(pool: &Pool, user_id: Uuid, project_id: Uuid) -> Result<()> {
    let mut conn = pool.get().await?;
    let tx = conn.transaction().await?;

    let owned = tx
        .query_opt(
            "SELECT id FROM projects WHERE id = $1 AND user_id = $2 FOR UPDATE",
            &[&project_id, &user_id],
        )
        .await?;
    if owned.is_none() {
        return Err(project_not_found());
    }

    tx.execute(
        "DELETE FROM project_files WHERE sub_project_id IN ( \
            SELECT id FROM sub_projects WHERE project_id = $1)",
        &[&project_id],
    )
    .await?;
    tx.execute(
        "DELETE FROM sub_projects WHERE project_id = $1",
        &[&project_id],
    )
    .await?;
    tx.execute("DELETE FROM projects WHERE id = $1", &[&project_id])
        .await?;

    tx.commit().await?;
    Ok(())
}
