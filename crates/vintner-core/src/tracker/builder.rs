//! Builder for creating and configuring Tracker instances.

use std::path::{Path, PathBuf};

use log::debug;
use tokio::task;

use super::Tracker;
use crate::{
    db::Database,
    error::{Result, TrackerError},
    recipe::RecipeOptions,
};

/// Builder for creating and configuring Tracker instances.
#[derive(Debug, Clone, Default)]
pub struct TrackerBuilder {
    database_path: Option<PathBuf>,
    options: RecipeOptions,
}

impl TrackerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/vintner/vintner.db` or
    /// `~/.local/share/vintner/vintner.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Sets how new bottles are initialised.
    pub fn with_recipe_options(mut self, options: RecipeOptions) -> Self {
        self.options = options;
        self
    }

    /// Builds the configured tracker instance.
    ///
    /// Opening the database once here creates the schema and upgrades any
    /// outdated records before the first operation runs.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::FileSystem` if the database directory cannot be
    /// created
    /// Returns `TrackerError::Database` if database initialization fails
    pub async fn build(self) -> Result<Tracker> {
        let db_path = match self.database_path {
            Some(path) => path,
            None => Self::default_database_path()?,
        };

        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| TrackerError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let db_path_clone = db_path.clone();
        task::spawn_blocking(move || {
            let _db = Database::new(&db_path_clone)?;
            Ok::<(), TrackerError>(())
        })
        .await
        .map_err(|e| TrackerError::Configuration {
            message: format!("Task join error: {e}"),
        })??;

        debug!("Using database at {}", db_path.display());
        Ok(Tracker::new(db_path, self.options))
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("vintner")
            .place_data_file("vintner.db")
            .map_err(|e| TrackerError::XdgDirectory(e.to_string()))
    }
}
