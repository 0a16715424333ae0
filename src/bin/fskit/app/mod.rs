mod commands;
mod session;

use std::env;
use std::fs;

use anyhow::Context;
use clap::Parser;

use fskit::ToolRegistry;

use crate::args::{CliArgs, Command};
use crate::config::load_config;
use crate::logging::init_logging;

pub fn run() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    let loaded = load_config(args.config.clone())?;
    let _logger = init_logging(&loaded.config.logging, &loaded.paths)?;
    if !loaded.config_exists {
        log::debug!(
            "no config at {}, using defaults",
            loaded.paths.config_file.display()
        );
    }

    let workdir = match &args.workdir {
        Some(dir) => dir.clone(),
        None => env::current_dir().context("reading current directory")?,
    };
    let workdir = fs::canonicalize(&workdir)
        .with_context(|| format!("working directory '{}'", workdir.display()))?;

    let tools = &loaded.config.tools;
    let registry = ToolRegistry::new().with_enabled(&tools.enabled);
    let context = tools.context(&workdir)?;
    log::info!(
        "fskit started in {} with tools {:?}",
        workdir.display(),
        registry.tool_names()
    );

    match args.command {
        Command::Session => session::run_session(&registry, context),
        Command::Schema => {
            println!("{}", serde_json::to_string_pretty(&registry.schemas())?);
            Ok(())
        }
        command => commands::run_one_shot(&registry, context, command),
    }
}
