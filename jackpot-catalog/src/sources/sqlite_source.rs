//! Entity corpus stored in SQLite: `entities`, `aliases`,
//! `polysemy_triggers` and `clue_associations` tables.

use std::collections::HashMap;
use std::path::PathBuf;

use jackpot_core::errors::{ConfigurationError, JackpotError, JackpotResult};
use jackpot_core::models::{Category, Entity};
use jackpot_core::traits::IEntitySource;
use rusqlite::{params, Connection, OpenFlags};
use tracing::warn;

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS entities (
        id             INTEGER PRIMARY KEY AUTOINCREMENT,
        canonical_name TEXT UNIQUE NOT NULL,
        category       TEXT NOT NULL,
        recency_score  REAL DEFAULT 0.5
    );

    CREATE TABLE IF NOT EXISTS aliases (
        id        INTEGER PRIMARY KEY AUTOINCREMENT,
        entity_id INTEGER NOT NULL REFERENCES entities(id) ON DELETE CASCADE,
        alias     TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS polysemy_triggers (
        id        INTEGER PRIMARY KEY AUTOINCREMENT,
        entity_id INTEGER NOT NULL REFERENCES entities(id) ON DELETE CASCADE,
        trigger   TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS clue_associations (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        entity_id   INTEGER NOT NULL REFERENCES entities(id) ON DELETE CASCADE,
        association TEXT NOT NULL
    );

    CREATE INDEX IF NOT EXISTS idx_category ON entities(category);
    CREATE INDEX IF NOT EXISTS idx_aliases ON aliases(alias);
    CREATE INDEX IF NOT EXISTS idx_triggers ON polysemy_triggers(trigger);
";

/// Read-only loader for the entity corpus database.
#[derive(Debug, Clone)]
pub struct SqliteEntitySource {
    path: PathBuf,
}

impl SqliteEntitySource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create the corpus tables if they do not exist.
    pub fn init_schema(conn: &Connection) -> JackpotResult<()> {
        conn.execute_batch(SCHEMA)
            .map_err(|e| unavailable("sqlite", e))
    }

    /// Insert entities with their annotations in one transaction.
    pub fn insert_entities(conn: &mut Connection, entities: &[Entity]) -> JackpotResult<()> {
        let tx = conn.transaction().map_err(|e| unavailable("sqlite", e))?;
        for entity in entities {
            tx.execute(
                "INSERT INTO entities (canonical_name, category, recency_score) VALUES (?1, ?2, ?3)",
                params![entity.name, entity.category.as_str(), entity.recency_score],
            )
            .map_err(|e| unavailable("sqlite", e))?;
            let id = tx.last_insert_rowid();
            for (table, column, values) in [
                ("aliases", "alias", &entity.aliases),
                ("polysemy_triggers", "trigger", &entity.polysemy_triggers),
                ("clue_associations", "association", &entity.clue_associations),
            ] {
                let sql = format!("INSERT INTO {table} (entity_id, {column}) VALUES (?1, ?2)");
                for value in values {
                    tx.execute(&sql, params![id, value])
                        .map_err(|e| unavailable("sqlite", e))?;
                }
            }
        }
        tx.commit().map_err(|e| unavailable("sqlite", e))
    }

    fn read(&self, conn: &Connection) -> rusqlite::Result<Vec<Entity>> {
        let mut stmt = conn.prepare(
            "SELECT id, canonical_name, category, recency_score FROM entities ORDER BY id",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, Option<f64>>(3)?,
            ))
        })?;

        let mut ids = Vec::new();
        let mut entities = Vec::new();
        for row in rows {
            let (id, name, category, recency) = row?;
            let Some(category) = Category::parse(&category) else {
                warn!(entity = %name, category = %category, "skipping entity with unknown category");
                continue;
            };
            ids.push(id);
            entities.push(Entity::new(name, category).with_recency(recency.unwrap_or(0.5)));
        }

        let position: HashMap<i64, usize> = ids.iter().enumerate().map(|(i, id)| (*id, i)).collect();
        for (table, column) in [
            ("aliases", "alias"),
            ("polysemy_triggers", "trigger"),
            ("clue_associations", "association"),
        ] {
            let mut stmt = conn.prepare(&format!(
                "SELECT entity_id, {column} FROM {table} ORDER BY id"
            ))?;
            let rows = stmt.query_map([], |row| {
                Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?))
            })?;
            for row in rows {
                let (entity_id, value) = row?;
                let Some(&i) = position.get(&entity_id) else {
                    continue;
                };
                let entity = &mut entities[i];
                match table {
                    "aliases" => entity.aliases.push(value),
                    "polysemy_triggers" => entity.polysemy_triggers.push(value),
                    _ => entity.clue_associations.push(value),
                }
            }
        }
        Ok(entities)
    }
}

impl IEntitySource for SqliteEntitySource {
    fn load(&self) -> JackpotResult<Vec<Entity>> {
        let source_name = self.path.display().to_string();
        let conn = Connection::open_with_flags(&self.path, OpenFlags::SQLITE_OPEN_READ_ONLY)
            .map_err(|e| unavailable(&source_name, e))?;
        self.read(&conn).map_err(|e| unavailable(&source_name, e))
    }

    fn name(&self) -> &str {
        "sqlite"
    }
}

fn unavailable(source_name: &str, e: rusqlite::Error) -> JackpotError {
    ConfigurationError::SourceUnavailable {
        source_name: source_name.to_string(),
        reason: e.to_string(),
    }
    .into()
}
