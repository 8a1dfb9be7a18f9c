//! Data models for bottles and steps.
//!
//! Display implementations for these models live in
//! [`crate::display::models`]. The serde representation of [`Bottle`] is the
//! canonical record exchanged with storage.
//!
//! # Examples
//!
//! ```rust
//! use vintner_core::models::{Bottle, BottleId, RecordedDate};
//!
//! let json = r#"{
//!     "id": 1714564800000,
//!     "name": "Black currant",
//!     "mass": 6,
//!     "startDate": "2024-05-01",
//!     "steps": []
//! }"#;
//! let bottle: Bottle = serde_json::from_str(json)?;
//! assert_eq!(bottle.id, BottleId::new("1714564800000"));
//! assert!(matches!(bottle.start_date, RecordedDate::Valid(_)));
//! assert!(!bottle.is_archived);
//! # Ok::<(), serde_json::Error>(())
//! ```

pub mod bottle;
pub mod date;
pub mod status;
pub mod step;


pub use bottle::{Bottle, BottleId, Totals, DEFAULT_NAME};
pub use date::RecordedDate;
pub use status::BottleStatus;
pub use step::Step;
