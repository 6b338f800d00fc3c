use crate::{datetime_to_db_text, DbError, DbPool};
use chrono::Utc;
use pollcenta_models::{PollConfig, PollKey};
use sqlx::SqliteConnection;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PollRow {
    pub id: i64,
    pub channel_id: String,
    pub message_ts: String,
    pub anonymous: bool,
    pub allow_multiple: bool,
}

/// Insert the poll row if this message has never been voted on, then return
/// its id. On conflict the stored flags win and the supplied ones are
/// ignored, so every collaborator must derive them from the same message.
pub async fn ensure_poll(
    conn: &mut SqliteConnection,
    key: &PollKey,
    config: PollConfig,
) -> Result<i64, DbError> {
    sqlx::query(
        "INSERT INTO polls (channel_id, message_ts, anonymous, allow_multiple, created_at)
         VALUES ($1, $2, $3, $4, $5)
         ON CONFLICT DO NOTHING",
    )
    .bind(&key.channel_id)
    .bind(&key.message_ts)
    .bind(config.anonymous)
    .bind(config.allow_multiple)
    .bind(datetime_to_db_text(Utc::now()))
    .execute(&mut *conn)
    .await?;

    let id: i64 =
        sqlx::query_scalar("SELECT id FROM polls WHERE channel_id = $1 AND message_ts = $2")
            .bind(&key.channel_id)
            .bind(&key.message_ts)
            .fetch_one(&mut *conn)
            .await?;
    Ok(id)
}

pub async fn get_poll(pool: &DbPool, key: &PollKey) -> Result<Option<PollRow>, DbError> {
    let row = sqlx::query_as::<_, PollRow>(
        "SELECT id, channel_id, message_ts, anonymous, allow_multiple
         FROM polls WHERE channel_id = $1 AND message_ts = $2",
    )
    .bind(&key.channel_id)
    .bind(&key.message_ts)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

#[cfg(test)]
mod tests {
    use super::ensure_poll;
    use pollcenta_models::{PollConfig, PollKey};

    #[tokio::test]
    async fn ensure_poll_is_idempotent_and_keeps_first_flags() {
        let pool = crate::tests_support::setup_db().await;
        let key = PollKey::new("C123", "1700000000.000100");
        let config = PollConfig {
            anonymous: true,
            allow_multiple: false,
        };

        let mut conn = pool.acquire().await.expect("acquire");
        let first = ensure_poll(&mut *conn, &key, config).await.expect("first");
        let second = ensure_poll(
            &mut *conn,
            &key,
            PollConfig {
                anonymous: false,
                allow_multiple: true,
            },
        )
        .await
        .expect("second");
        assert_eq!(first, second);

        let row = super::get_poll(&pool, &key)
            .await
            .expect("get")
            .expect("row");
        assert!(row.anonymous);
        assert!(!row.allow_multiple);
    }

    #[tokio::test]
    async fn distinct_messages_get_distinct_polls() {
        let pool = crate::tests_support::setup_db().await;
        let config = PollConfig::default();

        let mut conn = pool.acquire().await.expect("acquire");
        let a = ensure_poll(&mut *conn, &PollKey::new("C1", "1.0"), config)
            .await
            .expect("poll a");
        let b = ensure_poll(&mut *conn, &PollKey::new("C1", "2.0"), config)
            .await
            .expect("poll b");
        assert_ne!(a, b);
    }
}
