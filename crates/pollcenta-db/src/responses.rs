use crate::DbError;
use sqlx::SqliteConnection;

/// One row of the tally read: a choice label paired with one responder, or
/// with `None` when nobody has picked that choice yet.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ChoiceVoteRow {
    pub action_id: i64,
    pub content: String,
    pub voter: Option<String>,
}

/// Look up the voter's active response for the clicked button, going through
/// `choices` so callers only ever speak in (poll, action_id) terms.
pub async fn find_response(
    conn: &mut SqliteConnection,
    user_id: &str,
    poll_id: i64,
    action_id: i64,
) -> Result<Option<i64>, DbError> {
    let id: Option<i64> = sqlx::query_scalar(
        "SELECT responses.id
         FROM responses
         INNER JOIN choices ON responses.choice_id = choices.id
         WHERE responses.user_id = $1
           AND choices.poll_id = $2
           AND choices.action_id = $3",
    )
    .bind(user_id)
    .bind(poll_id)
    .bind(action_id)
    .fetch_optional(&mut *conn)
    .await?;
    Ok(id)
}

pub async fn insert_response(
    conn: &mut SqliteConnection,
    user_id: &str,
    poll_id: i64,
    action_id: i64,
) -> Result<(), DbError> {
    sqlx::query(
        "INSERT INTO responses (user_id, choice_id)
         SELECT $1, choices.id
         FROM choices
         WHERE poll_id = $2
           AND action_id = $3",
    )
    .bind(user_id)
    .bind(poll_id)
    .bind(action_id)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

pub async fn delete_response(conn: &mut SqliteConnection, response_id: i64) -> Result<(), DbError> {
    sqlx::query("DELETE FROM responses WHERE id = $1")
        .bind(response_id)
        .execute(conn)
        .await?;
    Ok(())
}

/// Withdraw every response the user holds in this poll. The single-select
/// path runs this before inserting the new pick.
pub async fn delete_poll_responses_for_user(
    conn: &mut SqliteConnection,
    poll_id: i64,
    user_id: &str,
) -> Result<(), DbError> {
    sqlx::query(
        "DELETE FROM responses
         WHERE id IN (
             SELECT responses.id
             FROM responses
             INNER JOIN choices ON responses.choice_id = choices.id
             WHERE choices.poll_id = $1
               AND responses.user_id = $2
         )",
    )
    .bind(poll_id)
    .bind(user_id)
    .execute(conn)
    .await?;
    Ok(())
}

/// Every (choice, responder) pair for the poll in action_id order, with one
/// NULL-voter row per unvoted choice so no choice disappears from the read.
pub async fn list_choices_with_votes(
    conn: &mut SqliteConnection,
    poll_id: i64,
) -> Result<Vec<ChoiceVoteRow>, DbError> {
    let rows = sqlx::query_as::<_, ChoiceVoteRow>(
        "SELECT choices.action_id, choices.content, responses.user_id AS voter
         FROM choices
         LEFT JOIN responses ON choices.id = responses.choice_id
         WHERE choices.poll_id = $1
         ORDER BY choices.action_id",
    )
    .bind(poll_id)
    .fetch_all(conn)
    .await?;
    Ok(rows)
}
