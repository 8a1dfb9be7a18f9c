//! Core library for the Vintner fermentation tracker.
//!
//! A bottle is one batch of fruit wine. Its raw berry mass fixes a recipe of
//! three sugar and water additions scheduled on days 1, 10 and 13. This crate
//! derives those recipes, tracks step completion, computes progress and
//! countdowns, groups bottles by urgency and persists them in SQLite.
//!
//! # Layout
//!
//! - **Pure logic**: [`recipe`], [`process`], [`progress`], [`countdown`] and
//!   [`dashboard`] are functions of `(bottle, now)` with no I/O
//! - **Storage**: the [`BottleStore`] seam, implemented by [`Database`]
//!   (SQLite) and [`MemoryStore`], with record upgrades in [`migration`]
//! - **Operations**: [`operations`] combines the two; [`Tracker`] runs them
//!   asynchronously for the interface layers
//! - **Display**: markdown [`std::fmt::Display`] output in [`display`]
//!
//! # Quick Start
//!
//! ```rust
//! use vintner_core::{params::CreateBottle, TrackerBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let tracker = TrackerBuilder::new()
//!     .with_database_path(Some("test.db"))
//!     .build()
//!     .await?;
//!
//! let bottle = tracker
//!     .create(&CreateBottle {
//!         name: Some("Black currant".to_string()),
//!         mass: 6.0,
//!         description: None,
//!         start_date: Some("2024-05-01".to_string()),
//!     })
//!     .await?;
//! println!("Created bottle: {}", bottle);
//!
//! let dashboard = tracker.dashboard(jiff::Timestamp::now()).await?;
//! println!("{dashboard}");
//! # Ok(())
//! # }
//! ```

pub mod countdown;
pub mod dashboard;
pub mod db;
pub mod display;
pub mod error;
pub mod migration;
pub mod models;
pub mod operations;
pub mod params;
pub mod process;
pub mod progress;
pub mod recipe;
pub mod store;
pub mod tracker;

// Re-export commonly used types
pub use countdown::{Countdown, Granularity, DEFAULT_REFRESH_INTERVAL};
pub use dashboard::{BottleView, Bucket, BucketGroup, Dashboard};
pub use db::Database;
pub use display::{
    BottleReport, CreateResult, DeleteResult, LocalDate, LocalDateTime, OperationStatus,
    UpdateResult,
};
pub use error::{Result, TrackerError};
pub use models::{Bottle, BottleId, BottleStatus, RecordedDate, Step};
pub use params::{CompleteStep, CreateBottle, DeleteBottle, EditBottle, Id, SetArchived};
pub use progress::{Milestone, Progress};
pub use recipe::{Recipe, RecipeOptions};
pub use store::{BottleStore, MemoryStore};
pub use tracker::{Tracker, TrackerBuilder};
