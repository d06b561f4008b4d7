//! Entity sources: in-memory, JSON file, and the SQLite corpus database.

mod json_source;
mod sqlite_source;
mod static_source;

pub use json_source::JsonEntitySource;
pub use sqlite_source::SqliteEntitySource;
pub use static_source::StaticEntitySource;
