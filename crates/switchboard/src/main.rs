// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Switchboard - module adapter registry and invocation dispatcher.
//!
//! This is the binary entry point: it loads configuration, registers the
//! enabled built-in modules and runs one subcommand against them.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod commands;
mod host;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use switchboard_builtins::BUILTIN_MODULES;

/// Switchboard - module adapter registry and invocation dispatcher.
#[derive(Parser, Debug)]
#[command(name = "switchboard", version, about, long_about = None)]
struct Cli {
    /// Load configuration from this file instead of the standard locations.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// List registered modules in registration order.
    List,
    /// Show a module's metadata and function signatures.
    Describe {
        /// Module name.
        module: String,
        /// Print the description as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Search modules and functions by name, description or category.
    Search {
        /// Case-insensitive substring to look for.
        query: String,
    },
    /// Invoke a function and print the outcome as JSON.
    Invoke {
        /// `module.function`, or a bare global function name.
        target: String,
        /// Arguments as a JSON object.
        #[arg(long, value_name = "JSON")]
        args: Option<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => switchboard_config::load_and_validate_path(path, &BUILTIN_MODULES),
        None => switchboard_config::load_and_validate(&BUILTIN_MODULES),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            switchboard_config::render_errors(&errors);
            return ExitCode::from(commands::EXIT_ERROR);
        }
    };

    host::init_tracing(&config.logging.level.trim().to_ascii_lowercase());

    let dispatcher = match host::build_dispatcher(&config) {
        Ok(dispatcher) => dispatcher,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(commands::EXIT_ERROR);
        }
    };

    let mut out = std::io::stdout();
    let mut err = std::io::stderr();
    let registry = dispatcher.registry();
    let result = match &cli.command {
        Commands::List => commands::list(registry, &mut out),
        Commands::Describe { module, json } => {
            commands::describe(registry, module, *json, &mut out, &mut err)
        }
        Commands::Search { query } => commands::search(registry, query, &mut out),
        Commands::Invoke { target, args } => {
            commands::invoke(&dispatcher, target, args.as_deref(), &mut out, &mut err).await
        }
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(commands::EXIT_ERROR)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    #[cfg(not(target_env = "msvc"))]
    fn jemalloc_is_active() {
        // Only jemalloc can advance the stats epoch.
        use tikv_jemalloc_ctl::{epoch, stats};
        epoch::advance().unwrap();
        let allocated = stats::allocated::read().unwrap();
        assert!(allocated > 0, "jemalloc should report non-zero allocation");
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn invoke_parses_target_and_args() {
        let cli = Cli::parse_from(["switchboard", "invoke", "math.add", "--args", r#"{"a":1}"#]);
        match cli.command {
            Commands::Invoke { target, args } => {
                assert_eq!(target, "math.add");
                assert_eq!(args.as_deref(), Some(r#"{"a":1}"#));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
