pub mod block;
pub mod poll;

pub use block::{Block, BlockType, Element, Text, TextKind};
pub use poll::{PollConfig, PollKey, RenderedChoice};
