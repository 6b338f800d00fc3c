use crate::DbError;
use sqlx::SqliteConnection;

/// Upsert one rendered choice button, keyed on (poll_id, action_id).
/// Existing content is left untouched; the first label seen wins.
pub async fn ensure_choice(
    conn: &mut SqliteConnection,
    poll_id: i64,
    action_id: i64,
    content: &str,
) -> Result<i64, DbError> {
    sqlx::query(
        "INSERT INTO choices (poll_id, action_id, content)
         VALUES ($1, $2, $3)
         ON CONFLICT DO NOTHING",
    )
    .bind(poll_id)
    .bind(action_id)
    .bind(content)
    .execute(&mut *conn)
    .await?;

    let id: i64 = sqlx::query_scalar("SELECT id FROM choices WHERE poll_id = $1 AND action_id = $2")
        .bind(poll_id)
        .bind(action_id)
        .fetch_one(&mut *conn)
        .await?;
    Ok(id)
}

pub async fn count_choices(conn: &mut SqliteConnection, poll_id: i64) -> Result<i64, DbError> {
    let count: i64 = sqlx::query_scalar("SELECT count(*) FROM choices WHERE poll_id = $1")
        .bind(poll_id)
        .fetch_one(conn)
        .await?;
    Ok(count)
}
