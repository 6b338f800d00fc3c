pub mod error;
pub mod growth;
pub mod markers;
pub mod results;
pub mod tally;
pub mod vote;

pub use error::CoreError;

/// Ceiling on the number of choices a poll may ever have, counting both the
/// author's initial set and post-hoc voter additions.
pub const MAX_CHOICES: usize = 30;
