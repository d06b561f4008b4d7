//! Per-strategy prompts and the shared response format.

mod parser;
mod prompts;

pub use parser::parse_response;
pub use prompts::{system_prompt, temperature, user_prompt};
