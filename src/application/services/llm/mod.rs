//! Generator-facing helpers: prompt templates and response parsing

pub mod prompt_builder;
pub mod response_parser;

pub use prompt_builder::{build_event_prompt, build_role_prompt, build_story_prompt};
pub use response_parser::{parse_card_batch, parse_story, ResponseError};
