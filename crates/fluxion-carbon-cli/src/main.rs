// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of FluxION.
//
// Licensed under the Creative Commons Attribution-NonCommercial-NoDerivatives 4.0 International
// (CC BY-NC-ND 4.0). You may use and share this file for non-commercial purposes only and you may not
// create derivatives. See <https://creativecommons.org/licenses/by-nc-nd/4.0/>.
//
// This software is provided "AS IS", without warranty of any kind.
//
// For commercial licensing, please contact: info@solare.cz

//! CLI entry point for FluxION carbon intensity generation

mod args;
mod config;
mod formatters;

use anyhow::{Context, Result, bail};
use args::{Cli, Commands, GenerateArgs, ServeArgs};
use chrono::Utc;
use clap::Parser;
use config::CarbonConfig;
use fluxion_carbon::{ProviderRequest, summarize};
use fluxion_carbon_web::GenerationResponse;
use formatters::{CsvFormatter, JsonFormatter, TableFormatter, TableOptions};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if matches!(cli.command, Commands::ExampleConfig) {
        print!("{}", CarbonConfig::example_toml());
        return Ok(());
    }

    let config = CarbonConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Generate(args) => generate_command(&config, args),
        Commands::Profiles => profiles_command(&config),
        Commands::Serve(args) => serve_command(&config, args).await,
        Commands::ExampleConfig => Ok(()),
    }
}

/// Logs go to stderr so JSON and CSV on stdout stay clean
fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let default_filter =
        format!("fluxion_carbon={level},fluxion_carbon_web={level},fluxion_co2={level}");

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn generate_command(config: &CarbonConfig, args: GenerateArgs) -> Result<()> {
    if args.every == 0 {
        bail!("--every must be greater than 0");
    }

    let registry = config.build_registry()?;
    let region = config.region()?;
    let range = args.range.unwrap_or(config.generation.default_range);
    let provider = args.provider.unwrap_or(config.generation.default_provider);
    let now = args.now.unwrap_or_else(Utc::now);

    let request = ProviderRequest {
        profile: args.profile,
        strict: args.strict,
        timezone: region.timezone,
        ..ProviderRequest::new(provider, range, now)
    };
    let generation = request
        .run(&registry)
        .with_context(|| format!("Failed to generate {range} series for provider {provider}"))?;

    info!(
        %range,
        provider = %generation.provider,
        profile = %generation.profile_id,
        samples = generation.output.len(),
        "Series generated"
    );

    if let Some(path) = &args.csv_path {
        CsvFormatter::write_file(&generation.output, path)?;
        info!(path = %path.display(), "CSV written");
    }

    let summary = summarize(&generation.output);
    match args.output.as_str() {
        "json" => {
            let response = GenerationResponse {
                requested_provider: generation.requested,
                provider: generation.provider,
                profile: generation.profile_id,
                range,
                region: region.name,
                generated_at: now,
                output: generation.output,
                summary,
            };
            println!("{}", JsonFormatter::format_generation(&response)?);
        }
        "csv" => {
            if args.csv_path.is_none() {
                CsvFormatter::write_to(&generation.output, std::io::stdout().lock())?;
            }
        }
        _ => {
            print!(
                "{}",
                TableFormatter::format_generation(
                    &generation,
                    range,
                    &region,
                    summary.as_ref(),
                    &TableOptions {
                        every: args.every,
                        sources: args.sources,
                    },
                )
            );
        }
    }

    Ok(())
}

fn profiles_command(config: &CarbonConfig) -> Result<()> {
    let registry = config.build_registry()?;
    print!("{}", TableFormatter::format_profiles(&registry.list()));
    Ok(())
}

async fn serve_command(config: &CarbonConfig, args: ServeArgs) -> Result<()> {
    let bind = args.bind.unwrap_or_else(|| config.server.bind_address.clone());
    let port = args.port.unwrap_or(config.server.port);
    let addr = format!("{bind}:{port}");

    let state = config.api_state()?;
    info!(
        %addr,
        range = %state.default_range,
        provider = %state.default_provider,
        "Starting carbon intensity API"
    );

    fluxion_carbon_web::serve(&addr, state)
        .await
        .with_context(|| format!("API server on {addr} failed"))
}
