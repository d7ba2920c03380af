//! `placard` binary: renders the welcome page to standard output.

use std::io;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use placard::demo;

/// Render the demo welcome page to stdout.
#[derive(Parser, Debug)]
#[command(name = "placard", version, about)]
struct Cli {}

fn main() -> anyhow::Result<()> {
    let _cli = Cli::parse();

    // Logs go to stderr so stdout carries only the page
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    demo::run(&mut out).context("rendering the welcome page failed")?;
    info!(template = demo::WELCOME_TEMPLATE_NAME, "rendered welcome page");
    Ok(())
}
