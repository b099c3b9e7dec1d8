//! Collage - still life collage generator.

mod adapters;
mod cassette;
mod cli;
mod config;
mod context;
mod error;
mod logging;
mod output;
mod pipeline;
mod ports;
mod prompt;
mod request;
mod style;

use std::path::Path;
use std::process;

use clap::Parser;

use crate::cli::Cli;
use crate::config::Config;
use crate::context::ServiceContext;
use crate::error::CollageError;
use crate::output::{render_details, resolve_output_path, save_collage};
use crate::prompt::build_prompt;
use crate::request::parse_objects;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    if let Err(e) = run(cli).await {
        tracing::debug!(kind = ?e.kind(), detail = %e.detail(), "collage failed");
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CollageError> {
    if cli.list_options {
        print!("{}", style::list_options());
        return Ok(());
    }

    let config_path = config::discover_config_path(cli.config.as_deref());
    tracing::debug!(path = %config_path.display(), "loading config");
    let config = Config::load(&config_path).map_err(CollageError::Config)?;

    let input = cli.collage_input(&config)?;

    if cli.prompt_only {
        let objects = parse_objects(&input.objects)?;
        println!("{}", build_prompt(&objects, &input.style));
        return Ok(());
    }

    let (ctx, recording_session) = ServiceContext::from_env()?;

    eprintln!("Creating your collage... cutting and arranging objects.");
    let result = pipeline::run(ctx.generator.as_ref(), input).await;
    drop(ctx);

    if let Some(session) = recording_session {
        match session.finish() {
            Ok(path) => eprintln!("Cassette saved: {}", path.display()),
            Err(e) => tracing::warn!("failed to save cassette: {e}"),
        }
    }

    let collage = result?;
    tracing::debug!(prompt = %collage.prompt, "collage generated");
    let generated_at = chrono::Local::now().naive_local();

    let output_path =
        resolve_output_path(cli.output.as_deref(), Path::new(&cli.out_dir), generated_at);
    save_collage(&collage.png, &output_path)?;
    eprintln!("Saved: {}", output_path.display());

    if cli.details {
        print!("{}", render_details(&collage, generated_at));
    }

    Ok(())
}
