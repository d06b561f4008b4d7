//! Text-generation clients.

mod openai;

pub use openai::OpenAiCompatibleGenerator;
