//! Turn rules.
//!
//! - `engine`: the match engine and its transitions
//! - `validation`: word checks for a drawn letter
//! - `rotation`: next-alive-seat scan

mod engine;
pub mod rotation;
pub mod validation;

pub use engine::MatchEngine;
pub use rotation::next_alive_index;
pub use validation::{check_word, WordVerdict};
