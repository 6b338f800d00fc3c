use crate::error::CoreError;
use crate::MAX_CHOICES;
use pollcenta_models::{Block, Element, RenderedChoice};

/// An actions row holds at most this many buttons.
const BUTTONS_PER_ROW: usize = 5;

/// Action id of the voter-facing "add an option" button.
pub const ADD_CHOICE_ACTION: &str = "add_user_choice";
const ADD_CHOICE_LABEL: &str = "\u{2795} Add an option";

pub fn choice_action_name(action_id: i64) -> String {
    format!("choice_{action_id}")
}

/// Inverse of [`choice_action_name`]; `None` for the affordance button and
/// anything else that is not a choice.
pub fn parse_choice_action(action_id: &str) -> Option<i64> {
    let ordinal: i64 = action_id.strip_prefix("choice_")?.parse().ok()?;
    (ordinal >= 1).then_some(ordinal)
}

/// Build the voting-button rows for a new poll: choice buttons five to a
/// row, with the add-option affordance appended while the poll can still
/// grow and the author opted in to voter additions.
pub fn build_choice_buttons<S: AsRef<str>>(
    labels: &[S],
    allow_voter_additions: bool,
) -> Result<Vec<Block>, CoreError> {
    if labels.is_empty() {
        return Err(CoreError::BadRequest("poll needs at least one choice".into()));
    }
    if labels.len() > MAX_CHOICES {
        return Err(CoreError::PollFull);
    }

    let mut elements: Vec<Element> = labels
        .iter()
        .enumerate()
        .map(|(index, label)| {
            Element::button(label.as_ref(), choice_action_name(index as i64 + 1))
        })
        .collect();
    if allow_voter_additions && labels.len() < MAX_CHOICES {
        elements.push(Element::button(ADD_CHOICE_LABEL, ADD_CHOICE_ACTION));
    }

    Ok(elements
        .chunks(BUTTONS_PER_ROW)
        .map(|chunk| Block::actions(chunk.to_vec()))
        .collect())
}

/// Read the (action_id, label) choice list back out of a rendered message.
/// This is what the Vote Toggle Engine consumes; the message stays the
/// source of truth for the choice set.
pub fn rendered_choices(blocks: &[Block]) -> Vec<RenderedChoice> {
    blocks
        .iter()
        .filter(|block| block.is_actions())
        .flat_map(|block| block.elements.iter())
        .filter_map(|element| {
            let action_id = parse_choice_action(element.action_id()?)?;
            Some(RenderedChoice::new(action_id, element.label()?))
        })
        .collect()
}

pub fn choice_count(blocks: &[Block]) -> usize {
    rendered_choices(blocks).len()
}

fn has_affordance(blocks: &[Block]) -> bool {
    blocks
        .iter()
        .filter(|block| block.is_actions())
        .flat_map(|block| block.elements.iter())
        .any(|element| element.action_id() == Some(ADD_CHOICE_ACTION))
}

/// Append a voter-added choice to the button layout.
///
/// The affordance button itself becomes the new choice, and a fresh
/// affordance is re-added after it (opening a new actions row when the
/// current one is full) unless the poll just reached [`MAX_CHOICES`] — at
/// that point the affordance is gone for good. Returns the new action id.
pub fn append_choice(blocks: &mut Vec<Block>, label: &str) -> Result<i64, CoreError> {
    if label.trim().is_empty() {
        return Err(CoreError::BadRequest("choice label must not be empty".into()));
    }
    if !has_affordance(blocks) {
        return Err(CoreError::PollFull);
    }

    let last_actions_index = blocks
        .iter()
        .rposition(Block::is_actions)
        .ok_or_else(|| CoreError::BadRequest("message has no voting buttons".into()))?;

    // The affordance always renders last, so the newest choice button is
    // either right before it or at the tail of the previous actions row.
    let last_choice_id = if blocks[last_actions_index].elements.len() > 1 {
        let elements = &blocks[last_actions_index].elements;
        choice_id_of(&elements[elements.len() - 2])?
    } else {
        let previous = blocks[..last_actions_index]
            .iter()
            .rfind(|block| block.is_actions())
            .ok_or_else(|| CoreError::BadRequest("message has no choice buttons".into()))?;
        let element = previous
            .elements
            .last()
            .ok_or_else(|| CoreError::BadRequest("empty actions block".into()))?;
        choice_id_of(element)?
    };

    let new_id = last_choice_id + 1;
    if new_id as usize > MAX_CHOICES {
        return Err(CoreError::PollFull);
    }

    match blocks[last_actions_index].elements.last_mut() {
        Some(element) if element.action_id() == Some(ADD_CHOICE_ACTION) => {
            *element = Element::button(label, choice_action_name(new_id));
        }
        _ => {
            return Err(CoreError::BadRequest(
                "add-option button must be the last element".into(),
            ))
        }
    }

    if (new_id as usize) < MAX_CHOICES {
        if blocks[last_actions_index].elements.len() == BUTTONS_PER_ROW {
            blocks.insert(
                last_actions_index + 1,
                Block::actions(vec![Element::button(ADD_CHOICE_LABEL, ADD_CHOICE_ACTION)]),
            );
        } else {
            blocks[last_actions_index]
                .elements
                .push(Element::button(ADD_CHOICE_LABEL, ADD_CHOICE_ACTION));
        }
    }

    Ok(new_id)
}

fn choice_id_of(element: &Element) -> Result<i64, CoreError> {
    element
        .action_id()
        .and_then(parse_choice_action)
        .ok_or_else(|| CoreError::BadRequest("expected a choice button".into()))
}

#[cfg(test)]
mod tests {
    use super::{
        append_choice, build_choice_buttons, choice_count, has_affordance, parse_choice_action,
        rendered_choices, ADD_CHOICE_ACTION,
    };
    use crate::error::CoreError;
    use crate::MAX_CHOICES;

    #[test]
    fn parse_choice_action_accepts_only_choice_buttons() {
        assert_eq!(parse_choice_action("choice_1"), Some(1));
        assert_eq!(parse_choice_action("choice_30"), Some(30));
        assert_eq!(parse_choice_action("choice_0"), None);
        assert_eq!(parse_choice_action(ADD_CHOICE_ACTION), None);
        assert_eq!(parse_choice_action("choice_"), None);
    }

    #[test]
    fn buttons_are_laid_out_five_per_row() {
        let labels: Vec<String> = (1..=7).map(|i| format!("Option {i}")).collect();
        let blocks = build_choice_buttons(&labels, false).expect("layout");

        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].elements.len(), 5);
        assert_eq!(blocks[1].elements.len(), 2);

        let choices = rendered_choices(&blocks);
        assert_eq!(choices.len(), 7);
        assert_eq!(choices[0].action_id, 1);
        assert_eq!(choices[6].action_id, 7);
        assert_eq!(choices[6].content, "Option 7");
    }

    #[test]
    fn affordance_rides_along_when_enabled() {
        let blocks = build_choice_buttons(&["Red", "Blue"], true).expect("layout");
        assert!(has_affordance(&blocks));
        // The affordance is not a choice.
        assert_eq!(choice_count(&blocks), 2);
    }

    #[test]
    fn appending_replaces_the_affordance_and_readds_it() {
        let mut blocks = build_choice_buttons(&["Red", "Blue"], true).expect("layout");

        let new_id = append_choice(&mut blocks, "Green").expect("append");
        assert_eq!(new_id, 3);
        assert!(has_affordance(&blocks));

        let choices = rendered_choices(&blocks);
        assert_eq!(choices.len(), 3);
        assert_eq!(choices[2].content, "Green");
    }

    #[test]
    fn affordance_overflows_into_a_new_row() {
        // Four choices + affordance fill the first row of five.
        let mut blocks = build_choice_buttons(&["A", "B", "C", "D"], true).expect("layout");
        assert_eq!(blocks.len(), 1);

        append_choice(&mut blocks, "E").expect("append");
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].elements.len(), 5);
        assert_eq!(blocks[1].elements.len(), 1);
        assert_eq!(blocks[1].elements[0].action_id(), Some(ADD_CHOICE_ACTION));

        // The next append grows from the affordance-only row.
        let new_id = append_choice(&mut blocks, "F").expect("append");
        assert_eq!(new_id, 6);
        assert_eq!(choice_count(&blocks), 6);
    }

    #[test]
    fn affordance_survives_to_twenty_nine_and_dies_at_thirty() {
        let labels: Vec<String> = (1..=28).map(|i| format!("Option {i}")).collect();
        let mut blocks = build_choice_buttons(&labels, true).expect("layout");

        append_choice(&mut blocks, "Option 29").expect("append 29");
        assert_eq!(choice_count(&blocks), 29);
        assert!(has_affordance(&blocks));

        append_choice(&mut blocks, "Option 30").expect("append 30");
        assert_eq!(choice_count(&blocks), MAX_CHOICES);
        assert!(!has_affordance(&blocks));

        let err = append_choice(&mut blocks, "Option 31").expect_err("full");
        assert!(matches!(err, CoreError::PollFull));
    }

    #[test]
    fn creation_respects_the_ceiling() {
        let labels: Vec<String> = (1..=MAX_CHOICES).map(|i| format!("Option {i}")).collect();
        let blocks = build_choice_buttons(&labels, true).expect("layout");
        assert!(!has_affordance(&blocks));
        assert_eq!(choice_count(&blocks), MAX_CHOICES);

        let labels: Vec<String> = (1..=MAX_CHOICES + 1).map(|i| format!("Option {i}")).collect();
        assert!(matches!(
            build_choice_buttons(&labels, false),
            Err(CoreError::PollFull)
        ));
    }
}
