//! Command-line interface definitions using clap.
//!
//! Argument structures here carry clap derives and convert into the core
//! parameter types with `From`, keeping clap out of `vintner-core`:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Tracker
//! ```

use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};
use vintner_core::{
    params::{CreateBottle, DeleteBottle, EditBottle, Id},
    DEFAULT_REFRESH_INTERVAL,
};

/// Fermentation batch tracker
///
/// Registers bottles of fruit wine by berry mass, derives their sugar and
/// water additions, and shows which bottles need attention today, tomorrow
/// and in the coming days.
#[derive(Parser)]
#[command(version, about, name = "vintner")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/vintner/vintner.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Mark day 1 completed when registering a bottle
    #[arg(long, global = true)]
    pub complete_first_step: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Register a new bottle
    #[command(alias = "a")]
    Add(AddArgs),
    /// Show one bottle with its steps and progress
    #[command(alias = "s")]
    Show(IdArgs),
    /// Change a bottle's name, notes, mass or start date
    #[command(alias = "e")]
    Edit(EditArgs),
    /// Complete the next step of a bottle
    #[command(alias = "c")]
    Complete(CompleteArgs),
    /// Move a bottle to the archive
    Archive(IdArgs),
    /// Restore a bottle from the archive
    Unarchive(IdArgs),
    /// Delete a bottle permanently
    #[command(aliases = ["d", "rm"])]
    Delete(DeleteArgs),
    /// Show bottles grouped by urgency (default)
    #[command(alias = "ls")]
    Dashboard,
    /// Keep the dashboard on screen, refreshing until Ctrl-C
    #[command(alias = "w")]
    Watch(WatchArgs),
    /// Import bottles from a legacy JSON dump
    Import(ImportArgs),
    /// Export every bottle as JSON
    Export(ExportArgs),
}

/// Register a new bottle
#[derive(ClapArgs)]
pub struct AddArgs {
    /// Berry mass in kilograms
    pub mass: f64,
    /// Display name
    #[arg(short, long)]
    pub name: Option<String>,
    /// Free-form notes
    #[arg(short, long)]
    pub description: Option<String>,
    /// Start date as YYYY-MM-DD (noon local time) or RFC 3339; defaults to
    /// today
    #[arg(short, long)]
    pub start_date: Option<String>,
}

impl From<AddArgs> for CreateBottle {
    fn from(val: AddArgs) -> Self {
        CreateBottle {
            name: val.name,
            mass: val.mass,
            description: val.description,
            start_date: val.start_date,
        }
    }
}

#[derive(ClapArgs)]
pub struct IdArgs {
    /// ID of the bottle
    pub id: String,
}

impl From<IdArgs> for Id {
    fn from(val: IdArgs) -> Self {
        Id { id: val.id }
    }
}

/// Edit a bottle. A new mass or start date regenerates its recipe.
#[derive(ClapArgs)]
pub struct EditArgs {
    /// ID of the bottle to edit
    pub id: String,
    #[arg(short, long)]
    pub name: Option<String>,
    /// New berry mass in kilograms
    #[arg(short, long)]
    pub mass: Option<f64>,
    /// New notes; an empty string clears them
    #[arg(short, long)]
    pub description: Option<String>,
    /// New start date as YYYY-MM-DD or RFC 3339
    #[arg(short, long)]
    pub start_date: Option<String>,
}

impl From<EditArgs> for EditBottle {
    fn from(val: EditArgs) -> Self {
        EditBottle {
            id: val.id,
            name: val.name,
            mass: val.mass,
            description: val.description,
            start_date: val.start_date,
        }
    }
}

#[derive(ClapArgs)]
pub struct CompleteArgs {
    /// ID of the bottle
    pub id: String,
    /// Day label of the step; defaults to the earliest pending step
    pub day: Option<u32>,
}

#[derive(ClapArgs)]
pub struct DeleteArgs {
    /// ID of the bottle to delete
    pub id: String,
    /// Confirm the deletion (required to prevent accidental deletion)
    #[arg(long)]
    pub confirm: bool,
}

impl From<DeleteArgs> for DeleteBottle {
    fn from(val: DeleteArgs) -> Self {
        DeleteBottle {
            id: val.id,
            confirmed: val.confirm,
        }
    }
}

#[derive(ClapArgs)]
pub struct WatchArgs {
    /// Seconds between refreshes
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_REFRESH_INTERVAL.as_secs(),
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub interval: u64,
}

#[derive(ClapArgs)]
pub struct ImportArgs {
    /// JSON file holding an array of bottle records, or an object with a
    /// `bottles_data` entry
    pub file: PathBuf,
}

#[derive(ClapArgs)]
pub struct ExportArgs {
    /// Output file; prints to stdout when omitted
    pub file: Option<PathBuf>,
}
