use serde::{Deserialize, Serialize};

/// Identity of a poll: the channel it was posted to plus the timestamp of
/// the rendered message. The message is the poll; there is no separate
/// creation record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PollKey {
    pub channel_id: String,
    pub message_ts: String,
}

impl PollKey {
    pub fn new(channel_id: impl Into<String>, message_ts: impl Into<String>) -> Self {
        Self {
            channel_id: channel_id.into(),
            message_ts: message_ts.into(),
        }
    }
}

/// Poll mode flags, resolved once from the rendered message at first-vote
/// time and persisted alongside the poll row. Fixed for the poll's lifetime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollConfig {
    pub anonymous: bool,
    pub allow_multiple: bool,
}

/// One choice button as it currently appears in the rendered message.
/// `action_id` is the 1-based ordinal of the button, stable across re-renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedChoice {
    pub action_id: i64,
    pub content: String,
}

impl RenderedChoice {
    pub fn new(action_id: i64, content: impl Into<String>) -> Self {
        Self {
            action_id,
            content: content.into(),
        }
    }
}
