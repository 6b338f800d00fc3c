use serde::{Deserialize, Serialize};

/// Kind discriminator for the message-surface blocks this crate deals in.
/// Header and results are sections, voting buttons live in actions rows,
/// and the trailing metadata line is a context block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockType {
    Section,
    Actions,
    Context,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextKind {
    Mrkdwn,
    PlainText,
}

/// A composition text object: `{"type": "mrkdwn"|"plain_text", "text": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Text {
    #[serde(rename = "type")]
    pub kind: TextKind,
    pub text: String,
}

impl Text {
    pub fn mrkdwn(text: impl Into<String>) -> Self {
        Self {
            kind: TextKind::Mrkdwn,
            text: text.into(),
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            kind: TextKind::PlainText,
            text: text.into(),
        }
    }
}

/// An interactive or textual element inside an actions/context block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Element {
    Button { text: Text, action_id: String },
    Mrkdwn { text: String },
}

impl Element {
    pub fn button(label: impl Into<String>, action_id: impl Into<String>) -> Self {
        Self::Button {
            text: Text::plain(label),
            action_id: action_id.into(),
        }
    }

    pub fn action_id(&self) -> Option<&str> {
        match self {
            Self::Button { action_id, .. } => Some(action_id),
            Self::Mrkdwn { .. } => None,
        }
    }

    pub fn label(&self) -> Option<&str> {
        match self {
            Self::Button { text, .. } => Some(&text.text),
            Self::Mrkdwn { .. } => None,
        }
    }
}

/// A flat layout block that uses `block_type` to distinguish variants.
///
/// Fields that don't apply to a given block type are simply `None` / empty,
/// so one struct round-trips every block shape the poll message uses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    #[serde(rename = "type")]
    pub block_type: BlockType,
    /// Section body text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<Text>,
    /// Section fields (results tally entries)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<Text>,
    /// Actions/context child elements
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub elements: Vec<Element>,
}

impl Block {
    pub fn section(text: Text) -> Self {
        Self {
            block_type: BlockType::Section,
            text: Some(text),
            fields: Vec::new(),
            elements: Vec::new(),
        }
    }

    pub fn section_fields(fields: Vec<Text>) -> Self {
        Self {
            block_type: BlockType::Section,
            text: None,
            fields,
            elements: Vec::new(),
        }
    }

    pub fn actions(elements: Vec<Element>) -> Self {
        Self {
            block_type: BlockType::Actions,
            text: None,
            fields: Vec::new(),
            elements,
        }
    }

    pub fn context(elements: Vec<Element>) -> Self {
        Self {
            block_type: BlockType::Context,
            text: None,
            fields: Vec::new(),
            elements,
        }
    }

    pub fn is_actions(&self) -> bool {
        self.block_type == BlockType::Actions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn button_serializes_in_wire_shape() {
        let element = Element::button("Red", "choice_1");
        let value = serde_json::to_value(&element).expect("serialize");
        assert_eq!(value["type"], "button");
        assert_eq!(value["text"]["type"], "plain_text");
        assert_eq!(value["text"]["text"], "Red");
        assert_eq!(value["action_id"], "choice_1");
    }

    #[test]
    fn empty_block_fields_are_omitted() {
        let block = Block::section(Text::mrkdwn("*Lunch?*"));
        let value = serde_json::to_value(&block).expect("serialize");
        assert_eq!(value["type"], "section");
        assert!(value.get("fields").is_none());
        assert!(value.get("elements").is_none());
    }

    #[test]
    fn actions_block_round_trips() {
        let block = Block::actions(vec![
            Element::button("Red", "choice_1"),
            Element::button("Blue", "choice_2"),
        ]);
        let json = serde_json::to_string(&block).expect("serialize");
        let back: Block = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, block);
    }
}
