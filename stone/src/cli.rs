//! # CLI
//!
//! This module defines the command-line interface of `stone` using `clap`.
//!
//! It is responsible for parsing user input and performing validation (e.g., ensuring wire values are valid JSON
//! and routes are addressed as `namespace/route`).
use clap::{Parser, Subcommand, ValueEnum};

/// Date pattern used by `timestamp` conversions unless overridden.
pub const DEFAULT_DATE_FORMAT: &str = "yyyy-MM-dd'T'HH:mm:ss'Z'";

#[derive(Parser)]
#[command(name = "stone", version, about = "Stone wire value and route inspector")]
pub struct Cli {
    /// Log filter, in `RUST_LOG` syntax (e.g. `debug`, `stone_core=trace`). Takes precedence
    /// over `RUST_LOG`; without either, only warnings are logged
    #[arg(long, global = true, env = "STONE_LOG")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert domain values to their wire representation
    ///
    /// ## Examples:
    ///
    /// ```bash
    /// stone encode boolean true
    /// stone encode timestamp 2023-01-15T00:00:00Z --date-format yyyy-MM-dd
    /// stone encode number 1 2 3 --list
    /// ```
    Encode {
        /// Converter to use
        #[arg(value_enum)]
        kind: ValueKind,

        /// Domain values (timestamps in RFC 3339)
        #[arg(required = true)]
        values: Vec<String>,

        /// Wrap the values in a list instead of taking exactly one
        #[arg(long)]
        list: bool,

        #[command(flatten)]
        date_format: DateFormatArg,
    },

    /// Convert a wire value (JSON) back to a domain value
    ///
    /// ## Examples:
    ///
    /// ```bash
    /// stone decode boolean 42
    /// stone decode text '["a", "b"]' --list
    /// ```
    Decode {
        /// Converter to use
        #[arg(value_enum)]
        kind: ValueKind,

        /// Wire value as JSON text
        #[arg(value_parser = parse_json)]
        wire: serde_json::Value,

        /// Decode a list of values with the collection converter
        #[arg(long)]
        list: bool,

        #[command(flatten)]
        date_format: DateFormatArg,
    },

    /// List the routes of the bundled catalog
    Routes {
        /// Only show routes of this namespace
        #[arg(long)]
        namespace: Option<String>,
    },

    /// Decode a recorded HTTP response for a catalog route
    ///
    /// ## Examples:
    ///
    /// ```bash
    /// stone response files/get_metadata --status 409 --body '{"error": "not_found"}'
    /// ```
    Response {
        /// Route (namespace/route)
        #[arg(value_parser = parse_route)]
        route: String,

        /// HTTP status of the response
        #[arg(long, default_value_t = 200)]
        status: u16,

        /// Raw response body
        #[arg(long, default_value = "null")]
        body: String,
    },
}

#[derive(clap::Args)]
pub struct DateFormatArg {
    /// Date pattern of timestamp values
    #[arg(long = "date-format", env = "STONE_DATE_FORMAT", default_value = DEFAULT_DATE_FORMAT)]
    pub pattern: String,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ValueKind {
    Text,
    Number,
    Boolean,
    Timestamp,
    Bytes,
}

fn parse_route(value: &str) -> Result<String, String> {
    let (namespace, route) = value.split_once('/').ok_or_else(|| {
        format!("Invalid route format: '{value}'. Expected 'namespace/route'")
    })?;

    if namespace.trim().is_empty() || route.trim().is_empty() {
        return Err("Namespace and route names cannot be empty".to_string());
    }

    Ok(value.to_string())
}

fn parse_json(value: &str) -> Result<serde_json::Value, String> {
    serde_json::from_str(value).map_err(|e| format!("Invalid JSON: {e}"))
}
