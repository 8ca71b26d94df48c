// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of FluxION.

//! Output formatters for generated series.

use anyhow::{Context, Result};
use comfy_table::{Attribute, Cell, Color, Table, presets::UTF8_FULL};
use fluxion_carbon::{EMISSION_FACTORS, EnergySource, ProfileInfo, Provider, ProviderGeneration};
use fluxion_carbon_types::{DateRange, GenerationOutput, SeriesSummary};
use fluxion_carbon_web::{GenerationResponse, RegionInfo};
use serde::Serialize;
use std::fmt::Write as _;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Formatter for pretty terminal tables
#[derive(Debug)]
pub struct TableFormatter;

/// Formatter for JSON output, same shape as `GET /api/generation`
#[derive(Debug)]
pub struct JsonFormatter;

/// Formatter for CSV export
#[derive(Debug)]
pub struct CsvFormatter;

/// Row sampling and column selection for [`TableFormatter::format_generation`]
#[derive(Debug, Clone)]
pub struct TableOptions {
    /// Show every Nth sample; the last sample is always shown
    pub every: usize,
    /// Share columns to show; empty means all seven
    pub sources: Vec<EnergySource>,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            every: 4,
            sources: Vec::new(),
        }
    }
}

impl TableOptions {
    fn columns(&self) -> Vec<EnergySource> {
        if self.sources.is_empty() {
            EnergySource::ALL.to_vec()
        } else {
            // Canonical order, duplicates dropped
            EnergySource::ALL
                .into_iter()
                .filter(|source| self.sources.contains(source))
                .collect()
        }
    }
}

/// One CSV row: timestamp, intensity and the seven shares
#[derive(Debug, Serialize)]
struct CsvRow {
    timestamp: String,
    intensity_gco2_per_kwh: u32,
    wind: f64,
    solar: f64,
    hydro: f64,
    gas: f64,
    coal: f64,
    biomass: f64,
    imports: f64,
}

fn percent(share: f64) -> String {
    format!("{:.1}", share * 100.0)
}

/// Indices of every `every`-th sample, always ending with the last one
fn sampled_indices(len: usize, every: usize) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..len).step_by(every.max(1)).collect();
    let last = len.saturating_sub(1);
    if len > 0 && indices.last() != Some(&last) {
        indices.push(last);
    }
    indices
}

impl TableFormatter {
    /// Sampled series table followed by the window summary
    pub fn format_generation(
        generation: &ProviderGeneration,
        range: DateRange,
        region: &RegionInfo,
        summary: Option<&SeriesSummary>,
        options: &TableOptions,
    ) -> String {
        let mut output = String::new();
        let series = &generation.output;
        let columns = options.columns();

        let mut header = vec![
            Cell::new(format!("Time\n({})", region.timezone)).add_attribute(Attribute::Bold),
            Cell::new("Intensity\n(gCO2/kWh)").add_attribute(Attribute::Bold),
        ];
        header.extend(columns.iter().map(|source| {
            Cell::new(format!("{source}\n(%)")).add_attribute(Attribute::Bold)
        }));

        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(header);

        for index in sampled_indices(series.len(), options.every) {
            let (Some(mix_point), Some(intensity_point)) =
                (series.mix_series.get(index), series.intensity_series.get(index))
            else {
                continue;
            };

            let time = mix_point
                .timestamp
                .with_timezone(&region.timezone)
                .format("%Y-%m-%d %H:%M")
                .to_string();
            let intensity = Cell::new(intensity_point.intensity);
            let intensity = match summary {
                Some(s) if mix_point.timestamp == s.greenest_at => {
                    intensity.fg(Color::Green).add_attribute(Attribute::Bold)
                }
                Some(s) if mix_point.timestamp == s.dirtiest_at => {
                    intensity.fg(Color::Red).add_attribute(Attribute::Bold)
                }
                _ => intensity,
            };

            let mut row = vec![Cell::new(time), intensity];
            row.extend(
                columns
                    .iter()
                    .map(|&source| Cell::new(percent(mix_point.mix.get(source)))),
            );
            table.add_row(row);
        }

        output.push_str(&table.to_string());
        output.push('\n');

        let provider = if generation.fell_back() {
            format!(
                "{} (requested {}, not implemented)",
                generation.provider, generation.requested
            )
        } else {
            generation.provider.to_string()
        };
        let _ = writeln!(
            output,
            "{} | Provider: {provider} | Profile: {} | Region: {} ({})",
            range.label(),
            generation.profile_id,
            region.name,
            region.timezone
        );

        match summary {
            Some(s) => {
                output.push_str(&Self::format_summary(s, region));
            }
            None => output.push_str("No samples generated\n"),
        }

        output
    }

    fn format_summary(summary: &SeriesSummary, region: &RegionInfo) -> String {
        let mut output = String::new();
        let local = |t: chrono::DateTime<chrono::Utc>| {
            t.with_timezone(&region.timezone)
                .format("%Y-%m-%d %H:%M")
                .to_string()
        };

        let _ = writeln!(
            output,
            "Samples: {} | Intensity min/mean/max: {} / {:.1} / {} gCO2/kWh",
            summary.samples, summary.min_intensity, summary.mean_intensity, summary.max_intensity
        );
        let _ = writeln!(
            output,
            "Greenest: {} | Dirtiest: {}",
            local(summary.greenest_at),
            local(summary.dirtiest_at)
        );
        let _ = writeln!(
            output,
            "Renewable share: {}% | Fossil share: {}%",
            percent(summary.mean_renewable_share),
            percent(summary.mean_fossil_share)
        );

        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(vec![
            Cell::new("Source").add_attribute(Attribute::Bold),
            Cell::new("Mean share\n(%)").add_attribute(Attribute::Bold),
            Cell::new("Emission factor\n(gCO2/kWh)").add_attribute(Attribute::Bold),
        ]);
        for (source, share) in summary.mean_mix.iter() {
            table.add_row(vec![
                Cell::new(source),
                Cell::new(percent(share)),
                Cell::new(EMISSION_FACTORS.factor(source)),
            ]);
        }
        output.push_str(&table.to_string());
        output.push('\n');
        output
    }

    /// Registered profiles and providers
    pub fn format_profiles(profiles: &[ProfileInfo]) -> String {
        let mut output = String::new();

        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(vec![
            Cell::new("Profile").add_attribute(Attribute::Bold),
            Cell::new("Name").add_attribute(Attribute::Bold),
            Cell::new("Description").add_attribute(Attribute::Bold),
            Cell::new("Source").add_attribute(Attribute::Bold),
        ]);
        for info in profiles {
            table.add_row(vec![
                Cell::new(&info.id),
                Cell::new(&info.name),
                Cell::new(&info.description),
                Cell::new(if info.builtin { "preset" } else { "config" }),
            ]);
        }
        output.push_str(&table.to_string());
        output.push('\n');

        let mut providers = Table::new();
        providers.load_preset(UTF8_FULL);
        providers.set_header(vec![
            Cell::new("Provider").add_attribute(Attribute::Bold),
            Cell::new("Profile").add_attribute(Attribute::Bold),
            Cell::new("Status").add_attribute(Attribute::Bold),
        ]);
        for provider in Provider::ALL {
            let status = if provider.is_implemented() {
                Cell::new("available").fg(Color::Green)
            } else {
                Cell::new("not implemented (falls back to mock)").fg(Color::Yellow)
            };
            providers.add_row(vec![
                Cell::new(provider),
                Cell::new(provider.profile_id().unwrap_or("-")),
                status,
            ]);
        }
        output.push_str(&providers.to_string());
        output.push('\n');
        output
    }
}

impl JsonFormatter {
    pub fn format_generation(response: &GenerationResponse) -> Result<String> {
        serde_json::to_string_pretty(response).context("Failed to serialize generation")
    }
}

impl CsvFormatter {
    /// One row per sample
    pub fn write_to<W: Write>(output: &GenerationOutput, writer: W) -> Result<()> {
        let mut csv = csv::Writer::from_writer(writer);
        for (mix_point, intensity_point) in output.samples() {
            let mix = mix_point.mix;
            csv.serialize(CsvRow {
                timestamp: mix_point.timestamp.to_rfc3339(),
                intensity_gco2_per_kwh: intensity_point.intensity,
                wind: mix.wind,
                solar: mix.solar,
                hydro: mix.hydro,
                gas: mix.gas,
                coal: mix.coal,
                biomass: mix.biomass,
                imports: mix.imports,
            })?;
        }
        csv.flush()?;
        Ok(())
    }

    pub fn write_file(output: &GenerationOutput, path: &Path) -> Result<()> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;
        Self::write_to(output, file)
    }
}
