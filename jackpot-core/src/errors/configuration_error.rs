/// Catalog and configuration errors. Fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("entity catalog is empty")]
    EmptyCatalog,

    #[error("duplicate entity in catalog: {name}")]
    DuplicateEntity { name: String },

    #[error("invalid entity record: {reason}")]
    InvalidEntity { reason: String },

    #[error("entity source unavailable: {source_name}: {reason}")]
    SourceUnavailable { source_name: String, reason: String },

    #[error("invalid config: {reason}")]
    InvalidConfig { reason: String },
}
