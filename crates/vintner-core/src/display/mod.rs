//! Display formatting for bottles, dashboards and operation results.
//!
//! Domain models implement [`std::fmt::Display`] directly; wrappers in this
//! module add the context a particular output needs. Everything renders as
//! markdown so the CLI can pass it to its terminal renderer unchanged.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │ Wrappers &      │    │   Markdown      │
//! │ (Bottle, Step)  │───▶│ Result Types    │───▶│    Output       │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`models`]: Display implementations for domain models and views
//! - [`dashboard`]: Grouped dashboard output
//! - [`progress`]: Text progress bar with milestone ticks
//! - [`results`]: Operation result types (CreateResult, UpdateResult, DeleteResult)
//! - [`status`]: Status messages (OperationStatus)
//! - [`datetime`]: Date/time formatting utilities
//!
//! ## Usage Examples
//!
//! ```rust
//! use vintner_core::{
//!     display::{CreateResult, OperationStatus},
//!     recipe::{build_bottle, NewBottle, RecipeOptions},
//! };
//!
//! let bottle = build_bottle(
//!     NewBottle {
//!         id: "1714564800000".into(),
//!         name: Some("Black currant".to_string()),
//!         mass: 6.0,
//!         description: None,
//!         start_date: "2024-05-01T12:00:00Z".parse()?,
//!     },
//!     &RecipeOptions::default(),
//! )?;
//!
//! let output = CreateResult::new(bottle).to_string();
//! assert!(output.contains("Created bottle with ID: 1714564800000"));
//! assert!(output.contains("Final volume: 25.00 l"));
//!
//! let status = OperationStatus::success("Imported 3 bottle(s)");
//! assert_eq!(status.to_string(), "Success: Imported 3 bottle(s)\n");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod dashboard;
pub mod datetime;
pub mod models;
pub mod progress;
pub mod results;
pub mod status;

pub use datetime::{LocalDate, LocalDateTime};
pub use models::BottleReport;
pub use progress::ProgressBar;
pub use results::{CreateResult, DeleteResult, UpdateResult};
pub use status::OperationStatus;
