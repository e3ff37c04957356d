//! # Stone CLI Entry Point
//!
//! The main executable for the Stone tool. This file drives the application lifecycle:
//!
//! 1. **Initialization**: Parses command-line arguments using [`cli::Cli`] and installs logging.
//! 2. **Execution**: Delegates conversions to [`convert`] and route work to `stone_core` and the
//!    bundled `stone-files` catalog.
//! 3. **Presentation**: Formats and prints the resulting data or error to standard output/error.

mod cli;
mod convert;
mod formatter;

use clap::Parser;
use cli::{Cli, Commands};
use formatter::{FormattedString, GenericError, RouteList};
use std::process;
use stone_core::response::decode_response;
use tracing_subscriber::EnvFilter;

fn main() {
    let args = Cli::parse();
    init_tracing(args.log_level);

    match args.command {
        Commands::Encode {
            kind,
            values,
            list,
            date_format,
        } => match convert::encode(kind, &values, list, &date_format.pattern) {
            Ok(wire) => println!("{}", FormattedString::from(wire)),
            Err(err) => exit_with(err),
        },
        Commands::Decode {
            kind,
            wire,
            list,
            date_format,
        } => match convert::decode(kind, &wire, list, &date_format.pattern) {
            Ok(description) => println!("{}", FormattedString(description)),
            Err(err) => exit_with(err),
        },
        Commands::Routes { namespace } => list_routes(namespace.as_deref()),
        Commands::Response {
            route,
            status,
            body,
        } => run_response(&route, status, &body),
    }
}

const DEFAULT_LOG_LEVEL: &str = "warn";

fn init_tracing(log_level: Option<String>) {
    let directives = log_directives(log_level, std::env::var(EnvFilter::DEFAULT_ENV).ok());
    let env_filter =
        EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// `--log-level` / `STONE_LOG` first, then `RUST_LOG`, then `warn`.
fn log_directives(log_level: Option<String>, rust_log: Option<String>) -> String {
    log_level
        .or(rust_log)
        .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string())
}

fn exit_with(err: impl Into<FormattedString>) -> ! {
    eprintln!("{}", err.into());
    process::exit(1);
}

fn list_routes(namespace: Option<&str>) {
    let routes = stone_files::routes()
        .into_iter()
        .filter(|route| namespace.is_none_or(|ns| route.namespace() == ns))
        .collect();

    println!("{}", FormattedString::from(RouteList(routes)));
}

fn run_response(route_name: &str, status: u16, body: &str) {
    let Some(route) = stone_files::find_route(route_name) else {
        exit_with(GenericError("Route not found", route_name));
    };

    if route.deprecated() {
        tracing::warn!(route = %route.full_name(), "route is deprecated");
    }

    match decode_response(route, status, body) {
        Ok(outcome) => println!("{}", FormattedString::from(outcome)),
        Err(err) => exit_with(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_overrides_rust_log() {
        assert_eq!(
            log_directives(Some("debug".to_string()), Some("error".to_string())),
            "debug"
        );
    }

    #[test]
    fn test_rust_log_is_used_without_log_level() {
        assert_eq!(
            log_directives(None, Some("stone_core=trace".to_string())),
            "stone_core=trace"
        );
    }

    #[test]
    fn test_defaults_to_warn() {
        assert_eq!(log_directives(None, None), "warn");
    }
}
