//! Command-line interface entry point for `KtuAnalytics`

mod args;
mod commands;

use args::{Cli, Command};
use clap::Parser;
use commands::report::ReportArgs;
use ktu_analytics::config::Config;
use ktu_analytics::info;
use ktu_analytics::logger::{enable_debug, enable_verbose, init_file_logging, set_level, Level};

fn main() {
    let args = Cli::parse();

    // Load configuration once at startup and apply CLI overrides to it
    let mut config = Config::load();
    let defaults = Config::from_defaults();
    config.apply_overrides(&args.to_config_overrides());

    // CLI flag overrides config logging.level; fallback warn
    let effective_level = args
        .log_level
        .map(std::convert::Into::into)
        .or_else(|| config.logging.level.parse::<Level>().ok())
        .unwrap_or(Level::Warn);

    let mut level = effective_level;
    if args.debug_flag || level == Level::Debug {
        level = Level::Debug;
        enable_debug();
    }

    let verbose = args.verbose || config.logging.verbose;
    if verbose {
        enable_verbose();
    }
    set_level(level);

    // CLI flag wins, otherwise use config logging.file if set
    let config_log_path: Option<std::path::PathBuf> = if config.logging.file.is_empty() {
        None
    } else {
        Some(std::path::PathBuf::from(&config.logging.file))
    };

    if let Some(log_path) = args.log_file.as_ref().or(config_log_path.as_ref()) {
        let display_path = log_path.to_string_lossy();
        if init_file_logging(log_path) {
            if verbose {
                eprintln!("✓ File logging initialized at: {display_path}");
            } else {
                info!("File logging initialized at: {display_path}");
            }
        } else {
            eprintln!("✗ Failed to initialize file logging at: {display_path}");
        }
    }

    match args.command {
        Command::Config { subcommand } => {
            commands::config::run(subcommand, &mut config, &defaults);
        }
        Command::Report {
            input_file,
            output,
            format,
            curriculum,
            topper_threshold,
        } => {
            let report_args = ReportArgs {
                input_file: &input_file,
                output: output.as_deref(),
                format: format.as_deref(),
                curriculum: curriculum.as_deref(),
                topper_threshold,
            };
            commands::report::run(&report_args, &config);
        }
        Command::Summary {
            input_file,
            curriculum,
        } => {
            commands::summary::run(&input_file, curriculum.as_deref(), &config);
        }
    }
}
