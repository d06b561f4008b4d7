use jackpot_core::errors::JackpotResult;
use jackpot_core::models::Entity;
use jackpot_core::traits::IEntitySource;

/// Entities held in memory. Used by tests and embedders.
#[derive(Debug, Clone, Default)]
pub struct StaticEntitySource {
    entities: Vec<Entity>,
}

impl StaticEntitySource {
    pub fn new(entities: Vec<Entity>) -> Self {
        Self { entities }
    }
}

impl IEntitySource for StaticEntitySource {
    fn load(&self) -> JackpotResult<Vec<Entity>> {
        Ok(self.entities.clone())
    }

    fn name(&self) -> &str {
        "static"
    }
}
