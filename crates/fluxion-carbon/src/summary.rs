// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of FluxION.

//! Window statistics for a generated series.

use fluxion_carbon_types::{GenerationMixBreakdown, GenerationOutput, SeriesSummary};

/// Summarize a generation pass. `None` for an empty output.
pub fn summarize(output: &GenerationOutput) -> Option<SeriesSummary> {
    let greenest = output
        .intensity_series
        .iter()
        .reduce(|best, point| if point.intensity < best.intensity { point } else { best })?;
    let dirtiest = output
        .intensity_series
        .iter()
        .reduce(|worst, point| if point.intensity > worst.intensity { point } else { worst })?;

    let samples = output.len();
    let count = samples as f64;
    let mean_intensity = output
        .intensity_series
        .iter()
        .map(|p| f64::from(p.intensity))
        .sum::<f64>()
        / count;

    let mix_count = output.mix_series.len().max(1) as f64;
    let totals = output
        .mix_series
        .iter()
        .fold(GenerationMixBreakdown::default(), |acc, point| {
            acc.map(|source, share| share + point.mix.get(source))
        });
    let mean_mix = totals.map(|_, share| share / mix_count);

    Some(SeriesSummary {
        samples,
        min_intensity: greenest.intensity,
        max_intensity: dirtiest.intensity,
        mean_intensity,
        greenest_at: greenest.timestamp,
        dirtiest_at: dirtiest.timestamp,
        mean_renewable_share: mean_mix.renewable_share(),
        mean_fossil_share: mean_mix.fossil_share(),
        mean_mix,
    })
}
