//! Small helpers shared by handlers and the terminal decision source.

pub mod input;

pub use input::{parse_yes_no, prompt_confirmation_with_default, prompt_string_with_default};
