//! Command handlers: run one tracker operation and render its result.

use std::{fs, path::Path, time::Duration};

use anyhow::{bail, Context, Result};
use jiff::Timestamp;
use log::info;
use serde_json::Value;
use vintner_core::{
    display::BottleReport,
    params::{CompleteStep, CreateBottle, DeleteBottle, EditBottle, Id, SetArchived},
    OperationStatus, Tracker,
};

use crate::renderer::TerminalRenderer;

/// Key under which the first clients kept their bottle list.
const LEGACY_KEY: &str = "bottles_data";

pub struct Cli {
    tracker: Tracker,
    renderer: TerminalRenderer,
}

/// Pull the record array out of an import file.
///
/// Accepts a bare array, or an object whose `bottles_data` entry holds the
/// array either directly or as a JSON-encoded string.
fn legacy_records(document: Value) -> Result<Vec<Value>> {
    match document {
        Value::Array(records) => Ok(records),
        Value::Object(mut map) => match map.remove(LEGACY_KEY) {
            Some(Value::Array(records)) => Ok(records),
            Some(Value::String(encoded)) => {
                let inner: Value = serde_json::from_str(&encoded)
                    .with_context(|| format!("'{LEGACY_KEY}' does not hold valid JSON"))?;
                legacy_records(inner)
            }
            _ => bail!("expected an array of bottles or a '{LEGACY_KEY}' entry"),
        },
        _ => bail!("expected an array of bottles or a '{LEGACY_KEY}' entry"),
    }
}

impl Cli {
    pub fn new(tracker: Tracker, renderer: TerminalRenderer) -> Self {
        Self { tracker, renderer }
    }

    pub async fn add(&self, params: &CreateBottle) -> Result<()> {
        let result = self.tracker.create_result(params).await?;
        self.renderer.render(&result.to_string())
    }

    pub async fn show(&self, params: &Id) -> Result<()> {
        match self.tracker.show(params, Timestamp::now()).await? {
            Some(view) => self.renderer.render(&BottleReport(&view).to_string()),
            None => bail!("Bottle with ID {} not found", params.id),
        }
    }

    pub async fn edit(&self, params: &EditBottle) -> Result<()> {
        let result = self.tracker.edit_result(params).await?;
        self.renderer.render(&result.to_string())
    }

    /// Complete `day`, or the earliest pending step when no day is given.
    pub async fn complete(&self, id: String, day: Option<u32>) -> Result<()> {
        let day = match day {
            Some(day) => day,
            None => {
                let bottle = self
                    .tracker
                    .get(&Id { id: id.clone() })
                    .await?
                    .with_context(|| format!("Bottle with ID {id} not found"))?;
                match bottle.earliest_pending() {
                    Some(step) => step.day,
                    None => bail!("Every step of bottle {id} is already completed"),
                }
            }
        };
        let result = self
            .tracker
            .complete_step_result(&CompleteStep { id, day })
            .await?;
        self.renderer.render(&result.to_string())
    }

    pub async fn set_archived(&self, params: &Id, archived: bool) -> Result<()> {
        let result = self
            .tracker
            .set_archived_result(&SetArchived {
                id: params.id.clone(),
                archived,
            })
            .await?;
        self.renderer.render(&result.to_string())
    }

    pub async fn delete(&self, params: &DeleteBottle) -> Result<()> {
        if !params.confirmed {
            bail!("Refusing to delete bottle {} without --confirm", params.id);
        }
        let result = self.tracker.delete_result(params).await?;
        self.renderer.render(&result.to_string())
    }

    pub async fn dashboard(&self) -> Result<()> {
        let dashboard = self.tracker.dashboard(Timestamp::now()).await?;
        self.renderer.render(&dashboard.to_string())
    }

    /// Redraw the dashboard every `interval` until Ctrl-C.
    pub async fn watch(&self, interval: Duration) -> Result<()> {
        let mut ticker = tokio::time::interval(interval);
        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);

        info!("Refreshing dashboard every {}s", interval.as_secs());
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let dashboard = self.tracker.dashboard(Timestamp::now()).await?;
                    self.renderer.clear()?;
                    self.renderer.render(&dashboard.to_string())?;
                }
                signal = &mut ctrl_c => {
                    signal.context("Failed to listen for Ctrl-C")?;
                    info!("Stopped watching");
                    return Ok(());
                }
            }
        }
    }

    pub async fn import(&self, file: &Path) -> Result<()> {
        let text = fs::read_to_string(file)
            .with_context(|| format!("Failed to read {}", file.display()))?;
        let document: Value = serde_json::from_str(&text)
            .with_context(|| format!("{} is not valid JSON", file.display()))?;
        let records = legacy_records(document)?;
        let total = records.len();

        let imported = self.tracker.import_legacy(records).await?;
        let status = if imported == total {
            OperationStatus::success(format!("Imported {imported} bottle(s)"))
        } else {
            OperationStatus::failure(format!(
                "Imported {imported} of {total} bottle(s); records without an id were skipped"
            ))
        };
        self.renderer.render(&status.to_string())
    }

    /// Write every bottle as pretty JSON to `file`, or to stdout.
    pub async fn export(&self, file: Option<&Path>) -> Result<()> {
        let bottles = self.tracker.export().await?;
        let json = serde_json::to_string_pretty(&bottles)?;
        match file {
            Some(path) => {
                fs::write(path, format!("{json}\n"))
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                let status = OperationStatus::success(format!(
                    "Exported {} bottle(s) to {}",
                    bottles.len(),
                    path.display()
                ));
                self.renderer.render(&status.to_string())
            }
            None => {
                println!("{json}");
                Ok(())
            }
        }
    }
}
