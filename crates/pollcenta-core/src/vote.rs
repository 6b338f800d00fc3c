use crate::error::CoreError;
use crate::{results, tally};
use pollcenta_db::responses::ChoiceVoteRow;
use pollcenta_db::{choices, polls, responses, DbError, DbPool};
use pollcenta_models::{Block, PollConfig, PollKey, RenderedChoice};
use serde::{Deserialize, Serialize};

/// Everything the transport layer extracts from a button click plus the
/// currently rendered message. The message is the source of truth: the
/// choice list and config flags come from it, not from a config store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoteEvent {
    pub key: PollKey,
    pub config: PollConfig,
    /// Every choice button currently rendered, in action_id order.
    pub choices: Vec<RenderedChoice>,
    pub clicked_action_id: i64,
    pub user_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteAction {
    Recorded,
    Withdrawn,
}

/// What one click did, plus the tally rows read inside the same transaction.
#[derive(Debug)]
pub struct VoteOutcome {
    pub action: VoteAction,
    pub rows: Vec<ChoiceVoteRow>,
}

/// Toggle one vote.
///
/// Runs the whole of it in a single transaction: upsert the poll row, lazily
/// backfill every rendered choice, then either withdraw the user's existing
/// response or record a new one (clearing any prior pick first when the poll
/// is single-select). The tally is read before the commit so the returned
/// rows can never disagree with what was stored.
pub async fn toggle_vote(pool: &DbPool, event: &VoteEvent) -> Result<VoteOutcome, CoreError> {
    if !event
        .choices
        .iter()
        .any(|choice| choice.action_id == event.clicked_action_id)
    {
        return Err(CoreError::UnknownChoice(event.clicked_action_id));
    }

    let mut tx = pool.begin().await.map_err(DbError::Sqlx)?;

    let poll_id = polls::ensure_poll(&mut *tx, &event.key, event.config).await?;
    for choice in &event.choices {
        choices::ensure_choice(&mut *tx, poll_id, choice.action_id, &choice.content).await?;
    }

    let existing = responses::find_response(
        &mut *tx,
        &event.user_id,
        poll_id,
        event.clicked_action_id,
    )
    .await?;

    let action = match existing {
        Some(response_id) => {
            responses::delete_response(&mut *tx, response_id).await?;
            VoteAction::Withdrawn
        }
        None => {
            if !event.config.allow_multiple {
                responses::delete_poll_responses_for_user(&mut *tx, poll_id, &event.user_id)
                    .await?;
            }
            responses::insert_response(&mut *tx, &event.user_id, poll_id, event.clicked_action_id)
                .await?;
            VoteAction::Recorded
        }
    };

    let rows = responses::list_choices_with_votes(&mut *tx, poll_id).await?;
    tx.commit().await.map_err(DbError::Sqlx)?;

    tracing::debug!(
        channel_id = %event.key.channel_id,
        message_ts = %event.key.message_ts,
        user_id = %event.user_id,
        action_id = event.clicked_action_id,
        ?action,
        "vote toggled"
    );

    Ok(VoteOutcome { action, rows })
}

/// Full click handling: toggle the vote, aggregate, and render the results
/// segment the caller splices back into the message.
pub async fn handle_vote_click(
    pool: &DbPool,
    event: &VoteEvent,
) -> Result<(VoteAction, Vec<Block>), CoreError> {
    let outcome = toggle_vote(pool, event).await?;
    let aggregated = results::aggregate(&outcome.rows);
    let blocks = tally::render_results(&aggregated, event.config.anonymous);
    Ok((outcome.action, blocks))
}
