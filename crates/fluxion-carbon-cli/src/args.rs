// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of FluxION.

//! CLI argument definitions using clap.

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use fluxion_carbon::Provider;
use fluxion_carbon_types::{DateRange, EnergySource};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "fluxion-co2")]
#[command(author, version, about = "FluxION grid carbon intensity generator")]
#[command(
    long_about = "Generate synthetic generation-mix and carbon-intensity series for a grid region.\n\
    \nAll providers are synthetic; no external data is fetched.\n\
    \nExamples:\n  \
    fluxion-co2 generate                          # Last 24h from the mock provider\n  \
    fluxion-co2 generate --range 7d --provider realtime --output json\n  \
    fluxion-co2 serve --port 8110                 # JSON API for chart front-ends"
)]
pub struct Cli {
    /// Path to TOML configuration file
    #[arg(
        long,
        global = true,
        value_name = "PATH",
        help = "Configuration file (default: fluxion_carbon.toml if present)"
    )]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate a mix and intensity series and print or export it
    #[command(
        long_about = "Generate one series for the chosen range and provider.\n\
        \nRanges: 24h and 48h (15-minute steps), 7d (30-minute steps).\n\
        Providers: mock, realtime, grid_operator (not implemented; falls back to mock\n\
        unless --strict is given).\n\
        \nExamples:\n  \
        fluxion-co2 generate --range 48h\n  \
        fluxion-co2 generate --profile mock_low_carbon --output csv --csv-path mix.csv"
    )]
    Generate(GenerateArgs),

    /// List available profiles and providers
    Profiles,

    /// Serve the HTTP API
    Serve(ServeArgs),

    /// Print an example configuration file
    ExampleConfig,
}

#[derive(Debug, Parser)]
pub struct GenerateArgs {
    /// Time range (24h, 48h, 7d)
    #[arg(long, value_name = "RANGE", help = "Range to generate (default from config)")]
    pub range: Option<DateRange>,

    /// Data provider
    #[arg(
        long,
        value_name = "PROVIDER",
        help = "Provider: mock, realtime, grid_operator (default from config)"
    )]
    pub provider: Option<Provider>,

    /// Profile id overriding the provider's profile
    #[arg(long, value_name = "ID", help = "Profile to use instead of the provider's")]
    pub profile: Option<String>,

    /// Fail instead of falling back to mock for unimplemented providers
    #[arg(long, default_value_t = false)]
    pub strict: bool,

    /// Reference instant (RFC 3339); defaults to now
    #[arg(long, value_name = "RFC3339")]
    pub now: Option<DateTime<Utc>>,

    /// Output format: table, json, or csv
    #[arg(long, default_value = "table",
          value_parser = ["table", "json", "csv"],
          help = "How to display results")]
    pub output: String,

    /// CSV file path; with `--output csv` and no path, CSV goes to stdout
    #[arg(long, value_name = "PATH", help = "Also save per-sample CSV rows to this file")]
    pub csv_path: Option<PathBuf>,

    /// Share columns in table output
    #[arg(
        long,
        value_delimiter = ',',
        value_name = "SOURCES",
        help = "Comma-separated sources to show in the table (default: all)"
    )]
    pub sources: Vec<EnergySource>,

    /// Show every Nth sample in table output
    #[arg(long, default_value_t = 4, help = "Table row sampling interval (must be > 0)")]
    pub every: usize,
}

#[derive(Debug, Parser)]
pub struct ServeArgs {
    /// Bind address (overrides server.bind_address)
    #[arg(long, value_name = "ADDR")]
    pub bind: Option<String>,

    /// Port (overrides server.port)
    #[arg(long)]
    pub port: Option<u16>,
}
