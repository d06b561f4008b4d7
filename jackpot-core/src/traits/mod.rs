mod entity_source;
mod text_generator;

pub use entity_source::IEntitySource;
pub use text_generator::{GenerationRequest, ITextGenerator};
