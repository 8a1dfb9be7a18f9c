//! High-level async API for managing bottles.
//!
//! The [`Tracker`] coordinates between the interface layers and the SQLite
//! database. Every call opens the database on a blocking thread, runs one
//! operation from [`crate::operations`] and returns.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │    Handlers     │    │   Operations    │    │    Database     │
//! │ (display result │───▶│ (recipe,        │───▶│   (via db/)     │
//! │  wrappers)      │    │  process, ...)  │    │                 │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Submodules
//!
//! - [`builder`]: Factory for creating [`Tracker`] instances with configuration
//! - [`bottle_ops`]: Async wrappers over the storage operations
//! - [`handlers`]: Operations returning display wrapper types
//!
//! # Usage Examples
//!
//! ```rust,no_run
//! use vintner_core::{params::CreateBottle, TrackerBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let tracker = TrackerBuilder::new()
//!     .with_database_path(Some("/tmp/vintner.db"))
//!     .build()
//!     .await?;
//!
//! let bottle = tracker
//!     .create(&CreateBottle {
//!         name: Some("Black currant".to_string()),
//!         mass: 6.0,
//!         ..Default::default()
//!     })
//!     .await?;
//! println!("{bottle}");
//!
//! let dashboard = tracker.dashboard(jiff::Timestamp::now()).await?;
//! println!("{dashboard}");
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;

use tokio::task;

use crate::{
    db::Database,
    error::{Result, TrackerError},
    recipe::RecipeOptions,
};

pub mod bottle_ops;
pub mod builder;
pub mod handlers;


pub use builder::TrackerBuilder;

/// Main tracker interface for managing bottles.
#[derive(Debug, Clone)]
pub struct Tracker {
    pub(crate) db_path: PathBuf,
    pub(crate) options: RecipeOptions,
}

impl Tracker {
    pub(crate) fn new(db_path: PathBuf, options: RecipeOptions) -> Self {
        Self { db_path, options }
    }

    /// Path of the database file this tracker writes to.
    pub fn database_path(&self) -> &std::path::Path {
        &self.db_path
    }

    /// Run `op` against a freshly opened database on a blocking thread.
    pub(crate) async fn with_database<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
    {
        let db_path = self.db_path.clone();
        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            op(&mut db)
        })
        .await
        .map_err(|e| TrackerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }
}
