use pollcenta_db::responses::ChoiceVoteRow;
use std::collections::HashSet;

/// One choice and everyone currently voting for it, in store order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceTally {
    pub action_id: i64,
    pub content: String,
    pub voter_ids: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct PollResults {
    /// Per-choice tallies in action_id order.
    pub choices: Vec<ChoiceTally>,
    /// Distinct users with at least one active response anywhere in the
    /// poll. Deliberately not the sum of per-choice counts, so multi-select
    /// percentages are each relative to the same respondent population.
    pub total_respondents: usize,
}

impl PollResults {
    /// Share of respondents who picked a choice, rounded to the nearest
    /// whole percent with ties away from zero.
    pub fn percentage(&self, count: usize) -> u32 {
        if self.total_respondents == 0 {
            return 0;
        }
        (count as f64 / self.total_respondents as f64 * 100.0).round() as u32
    }
}

/// Fold the (choice, responder) rows of one poll into per-choice tallies.
/// Rows arrive ordered by action_id with NULL-voter placeholders for
/// unvoted choices, exactly as `list_choices_with_votes` produces them.
pub fn aggregate(rows: &[ChoiceVoteRow]) -> PollResults {
    let mut choices: Vec<ChoiceTally> = Vec::new();
    let mut respondents: HashSet<&str> = HashSet::new();

    for row in rows {
        if choices
            .last()
            .map(|tally| tally.action_id != row.action_id)
            .unwrap_or(true)
        {
            choices.push(ChoiceTally {
                action_id: row.action_id,
                content: row.content.clone(),
                voter_ids: Vec::new(),
            });
        }
        if let Some(voter) = row.voter.as_deref() {
            respondents.insert(voter);
            if let Some(tally) = choices.last_mut() {
                tally.voter_ids.push(voter.to_string());
            }
        }
    }

    PollResults {
        choices,
        total_respondents: respondents.len(),
    }
}
