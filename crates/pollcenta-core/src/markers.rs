//! Textual config markers embedded in the poll message.
//!
//! The poll's mode flags live inside the rendered text rather than a config
//! record, so the header and context lines must be regenerated from
//! [`PollConfig`] byte-for-byte identically every time, and parsing them
//! back must recover the exact flags. Both directions live here so they
//! cannot drift apart.

use pollcenta_models::PollConfig;

const MULTIPLE_SUFFIX: &str = "\nYou may vote for multiple options";
const ANONYMOUS_MARKER: &str = ":lock: *Responses:* Anonymous";
const NON_ANONYMOUS_MARKER: &str = ":unlock: *Responses:* Non-Anonymous";

/// Header text for the poll message: the bolded question, plus the
/// multi-select marker line when applicable.
pub fn header_text(question: &str, allow_multiple: bool) -> String {
    let mut text = format!("*{question}*");
    if allow_multiple {
        text.push_str(MULTIPLE_SUFFIX);
    }
    text
}

/// Trailing context line naming the poster and the anonymity mode.
pub fn context_text(sender: &str, anonymous: bool) -> String {
    let marker = if anonymous {
        ANONYMOUS_MARKER
    } else {
        NON_ANONYMOUS_MARKER
    };
    format!("Sender: {sender} | {marker}")
}

/// Recover the poll flags from the rendered header and context text.
pub fn config_from_message(header: &str, context: &str) -> PollConfig {
    PollConfig {
        anonymous: context.ends_with(ANONYMOUS_MARKER),
        allow_multiple: header.ends_with(MULTIPLE_SUFFIX),
    }
}

#[cfg(test)]
mod tests {
    use super::{config_from_message, context_text, header_text};
    use pollcenta_models::PollConfig;

    #[test]
    fn config_round_trips_through_marker_text() {
        for anonymous in [false, true] {
            for allow_multiple in [false, true] {
                let config = PollConfig {
                    anonymous,
                    allow_multiple,
                };
                let header = header_text("Lunch?", config.allow_multiple);
                let context = context_text("Jordan Doe", config.anonymous);
                assert_eq!(config_from_message(&header, &context), config);
            }
        }
    }

    #[test]
    fn non_anonymous_marker_does_not_read_as_anonymous() {
        let context = context_text("Jordan Doe", false);
        assert!(!config_from_message("*Lunch?*", &context).anonymous);
    }

    #[test]
    fn question_text_cannot_fake_the_multi_select_marker() {
        // The bold wrapper leaves a trailing '*', so a question that merely
        // repeats the marker words never matches the suffix.
        let header = header_text("You may vote for multiple options", false);
        assert!(!config_from_message(&header, &context_text("A", false)).allow_multiple);
    }
}
