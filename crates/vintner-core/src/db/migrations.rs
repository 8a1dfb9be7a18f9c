//! Database schema initialization and record upgrades.

use log::{info, warn};
use rusqlite::params;

use crate::{
    error::{DatabaseResultExt, Result, TrackerError},
    migration::{self, CURRENT_SCHEMA_VERSION},
};

const SELECT_OUTDATED_SQL: &str =
    "SELECT id, schema_version, record FROM bottles WHERE schema_version < ?1";
const REWRITE_RECORD_SQL: &str =
    "UPDATE bottles SET schema_version = ?1, record = ?2, updated_at = ?3 WHERE id = ?4";

impl super::Database {
    /// Initializes the database schema using the embedded SQL file.
    pub(super) fn initialize_schema(&self) -> Result<()> {
        let schema_sql = include_str!("../../assets/schema.sql");
        self.connection
            .execute_batch(schema_sql)
            .db_context("Failed to initialize database schema")?;

        self.apply_migrations()?;

        Ok(())
    }

    /// Upgrade every row stored below the current schema version.
    ///
    /// Rows that cannot be upgraded are left untouched and logged; they are
    /// skipped by [`list_all`](crate::store::BottleStore::list_all) until
    /// repaired.
    pub(crate) fn apply_migrations(&self) -> Result<usize> {
        let outdated: Vec<(String, i64, String)> = {
            let mut stmt = self
                .connection
                .prepare(SELECT_OUTDATED_SQL)
                .db_context("Failed to prepare migration query")?;
            let rows = stmt
                .query_map(params![i64::from(CURRENT_SCHEMA_VERSION)], |row| {
                    Ok((row.get(0)?, row.get(1)?, row.get(2)?))
                })
                .db_context("Failed to query outdated records")?;
            rows.collect::<rusqlite::Result<_>>()
                .db_context("Failed to read outdated records")?
        };

        if outdated.is_empty() {
            return Ok(0);
        }

        let now = Self::now_string();
        let mut upgraded = 0;
        for (id, version, raw) in outdated {
            let bottle = serde_json::from_str::<serde_json::Value>(&raw)
                .map_err(TrackerError::from)
                .and_then(|value| migration::decode(value, u32::try_from(version).unwrap_or(0)));
            match bottle {
                Ok(bottle) => {
                    let record = serde_json::to_string(&bottle)?;
                    self.connection
                        .execute(
                            REWRITE_RECORD_SQL,
                            params![i64::from(CURRENT_SCHEMA_VERSION), record, &now, id],
                        )
                        .db_context("Failed to rewrite upgraded record")?;
                    upgraded += 1;
                }
                Err(e) => warn!("Could not upgrade bottle record '{id}' (v{version}): {e}"),
            }
        }

        info!("Upgraded {upgraded} bottle record(s) to schema version {CURRENT_SCHEMA_VERSION}");
        Ok(upgraded)
    }
}
