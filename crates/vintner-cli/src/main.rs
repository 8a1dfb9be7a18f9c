//! Vintner CLI Application
//!
//! Command-line interface for the vintner fermentation tracker.

mod args;
mod cli;
mod renderer;

use std::time::Duration;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use renderer::TerminalRenderer;
use vintner_core::{RecipeOptions, TrackerBuilder};
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        complete_first_step,
        command,
    } = Args::parse();

    let tracker = TrackerBuilder::new()
        .with_database_path(database_file)
        .with_recipe_options(RecipeOptions {
            complete_first_step,
        })
        .build()
        .await
        .context("Failed to initialize tracker")?;

    info!("Vintner started");

    let cli = Cli::new(tracker, TerminalRenderer::new(!no_color));
    match command {
        Some(Add(args)) => cli.add(&args.into()).await,
        Some(Show(args)) => cli.show(&args.into()).await,
        Some(Edit(args)) => cli.edit(&args.into()).await,
        Some(Complete(args)) => cli.complete(args.id, args.day).await,
        Some(Archive(args)) => cli.set_archived(&args.into(), true).await,
        Some(Unarchive(args)) => cli.set_archived(&args.into(), false).await,
        Some(Delete(args)) => cli.delete(&args.into()).await,
        Some(Watch(args)) => cli.watch(Duration::from_secs(args.interval)).await,
        Some(Import(args)) => cli.import(&args.file).await,
        Some(Export(args)) => cli.export(args.file.as_deref()).await,
        Some(Dashboard) | None => cli.dashboard().await,
    }
}
