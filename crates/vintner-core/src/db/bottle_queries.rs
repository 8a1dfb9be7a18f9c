//! Bottle CRUD operations and queries.

use log::{debug, warn};
use rusqlite::{params, OptionalExtension};
use serde_json::Value;

use crate::{
    error::{DatabaseResultExt, Result, TrackerError},
    migration::{self, CURRENT_SCHEMA_VERSION},
    models::{Bottle, BottleId},
    store::BottleStore,
};

const SELECT_ALL_SQL: &str = "SELECT id, schema_version, record FROM bottles ORDER BY id";
const SELECT_BY_ID_SQL: &str = "SELECT schema_version, record FROM bottles WHERE id = ?1";
const UPSERT_SQL: &str = "INSERT INTO bottles (id, schema_version, record, updated_at) VALUES (?1, ?2, ?3, ?4)
     ON CONFLICT(id) DO UPDATE SET schema_version = excluded.schema_version, record = excluded.record, updated_at = excluded.updated_at";
const DELETE_SQL: &str = "DELETE FROM bottles WHERE id = ?1";
const INSERT_LEGACY_SQL: &str =
    "INSERT OR REPLACE INTO bottles (id, schema_version, record, updated_at) VALUES (?1, 0, ?2, ?3)";

fn decode_row(raw: &str, version: i64) -> Result<Bottle> {
    let value: Value = serde_json::from_str(raw)?;
    migration::decode(value, u32::try_from(version).unwrap_or(0))
}

fn legacy_id(record: &Value) -> Option<String> {
    match record.get("id")? {
        Value::String(id) if !id.trim().is_empty() => Some(id.clone()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}

impl super::Database {
    /// Load a legacy dump (a JSON array of version-0 records) and upgrade it.
    ///
    /// Records without an id are skipped. Existing rows with the same id are
    /// replaced. Returns the number of records imported.
    pub fn import_legacy(&mut self, records: &[Value]) -> Result<usize> {
        let now = Self::now_string();
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let mut imported = 0;
        for record in records {
            let Some(id) = legacy_id(record) else {
                warn!("Skipping legacy record without id");
                continue;
            };
            tx.execute(INSERT_LEGACY_SQL, params![id, record.to_string(), &now])
                .db_context("Failed to insert legacy record")?;
            imported += 1;
        }

        tx.commit().db_context("Failed to commit transaction")?;
        self.apply_migrations()?;
        Ok(imported)
    }
}

impl BottleStore for super::Database {
    fn list_all(&self) -> Result<Vec<Bottle>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_ALL_SQL)
            .db_context("Failed to prepare query")?;

        let rows: Vec<(String, i64, String)> = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)))
            .db_context("Failed to query bottles")?
            .collect::<rusqlite::Result<_>>()
            .db_context("Failed to read bottles")?;

        let bottles = rows
            .into_iter()
            .filter_map(|(id, version, raw)| match decode_row(&raw, version) {
                Ok(bottle) => Some(bottle),
                Err(e) => {
                    warn!("Skipping unreadable bottle record '{id}': {e}");
                    None
                }
            })
            .collect();
        Ok(bottles)
    }

    fn get(&self, id: &BottleId) -> Result<Option<Bottle>> {
        let row: Option<(i64, String)> = self
            .connection
            .query_row(SELECT_BY_ID_SQL, params![id.as_str()], |row| {
                Ok((row.get(0)?, row.get(1)?))
            })
            .optional()
            .db_context("Failed to query bottle")?;

        row.map(|(version, raw)| decode_row(&raw, version))
            .transpose()
    }

    fn upsert(&mut self, bottle: &Bottle) -> Result<()> {
        let record = serde_json::to_string(bottle)?;
        self.connection
            .execute(
                UPSERT_SQL,
                params![
                    bottle.id.as_str(),
                    i64::from(CURRENT_SCHEMA_VERSION),
                    record,
                    Self::now_string()
                ],
            )
            .db_context("Failed to save bottle")?;
        debug!("Saved bottle {}", bottle.id);
        Ok(())
    }

    fn delete(&mut self, id: &BottleId) -> Result<()> {
        let affected = self
            .connection
            .execute(DELETE_SQL, params![id.as_str()])
            .db_context("Failed to delete bottle")?;
        if affected == 0 {
            return Err(TrackerError::BottleNotFound { id: id.to_string() });
        }
        debug!("Deleted bottle {id}");
        Ok(())
    }
}
