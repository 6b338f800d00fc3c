use crate::results::PollResults;
use pollcenta_models::{Block, Text};

/// A section block holds at most this many fields; longer tallies span
/// multiple sections.
const FIELDS_PER_SECTION: usize = 10;

/// Fixed bar width: 20 units of 5% each.
const BAR_UNITS: u32 = 20;
const BAR_FILLED: char = '\u{2588}';
/// Space + invisible separator, so empty bar segments keep their width.
const BAR_EMPTY: &str = " \u{2062}";

/// Backtick-wrapped fixed-width bar: `ceil(pct / 5)` filled glyphs padded
/// out to 20 units.
pub fn percentage_bar(percentage: u32) -> String {
    let filled = percentage.div_ceil(5).min(BAR_UNITS);
    let mut bar = String::from("`");
    for _ in 0..filled {
        bar.push(BAR_FILLED);
    }
    for _ in filled..BAR_UNITS {
        bar.push_str(BAR_EMPTY);
    }
    bar.push('`');
    bar
}

/// Render the results segment of the poll message. The caller splices these
/// sections between the voting buttons and the trailing context block.
/// An untouched poll renders nothing: no respondents, no results segment.
pub fn render_results(results: &PollResults, anonymous: bool) -> Vec<Block> {
    if results.total_respondents == 0 {
        return Vec::new();
    }

    let mut blocks: Vec<Block> = Vec::new();
    for (index, choice) in results.choices.iter().enumerate() {
        if index % FIELDS_PER_SECTION == 0 {
            blocks.push(Block::section_fields(Vec::new()));
        }

        let count = choice.voter_ids.len();
        let percentage = results.percentage(count);

        let mut respondents = String::new();
        if !anonymous {
            respondents.push('\n');
            respondents.push_str(
                &choice
                    .voter_ids
                    .iter()
                    .map(|voter| format!("<@{voter}>"))
                    .collect::<Vec<_>>()
                    .join(", "),
            );
        }

        let text = format!(
            "{}\n{} | {}% ({}){}",
            choice.content,
            percentage_bar(percentage),
            percentage,
            count,
            respondents
        );
        if let Some(block) = blocks.last_mut() {
            block.fields.push(Text::mrkdwn(text));
        }
    }

    blocks
}
