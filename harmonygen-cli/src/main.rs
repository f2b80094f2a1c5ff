mod app;
mod generate;
mod output;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use crate::app::Cli;

fn main() -> anyhow::Result<ExitCode> {
    ctrlc::set_handler(|| {
        eprintln!("\nCancelled.");
        std::process::exit(130);
    })
    .context("failed to set Ctrl+C handler")?;

    let cli = Cli::parse();

    // harmonygen info+ on stderr; --verbose enables debug; RUST_LOG overrides
    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_module("harmonygen", level)
        .parse_default_env()
        .target(env_logger::Target::Stderr)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .init();

    for line in generate::filter_banner(&cli.filters) {
        println!("{line}");
    }

    let Some(libraries) = generate::load_libraries(&cli.libraries) else {
        return Ok(ExitCode::FAILURE);
    };

    generate::run(&cli, &libraries)?;

    let written = std::path::absolute(&cli.output)
        .with_context(|| format!("failed to resolve {}", cli.output.display()))?;
    println!("File written to {}.", written.display());

    Ok(ExitCode::SUCCESS)
}
