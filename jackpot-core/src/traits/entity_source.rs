use crate::errors::JackpotResult;
use crate::models::Entity;

/// Supplies the persisted entity corpus at startup.
pub trait IEntitySource: Send + Sync {
    /// Load every entity record. Failures are fatal configuration errors.
    fn load(&self) -> JackpotResult<Vec<Entity>>;

    /// Human-readable source name for logs and errors.
    fn name(&self) -> &str;
}
