// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of FluxION.

//! Per-source generation shares and emission factors.

use crate::source::EnergySource;
use serde::{Deserialize, Serialize};

/// Fractional share of output per generation source.
///
/// Raw generator output may sum to anything (including zero or less);
/// after normalization the seven shares sum to 1. Fields missing from
/// serialized input default to 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationMixBreakdown {
    pub wind: f64,
    pub solar: f64,
    pub hydro: f64,
    pub gas: f64,
    pub coal: f64,
    pub biomass: f64,
    pub imports: f64,
}

/// Distribution substituted when a raw mix has no positive total
pub const FALLBACK_MIX: GenerationMixBreakdown = GenerationMixBreakdown {
    wind: 0.30,
    solar: 0.05,
    hydro: 0.05,
    gas: 0.45,
    coal: 0.05,
    biomass: 0.05,
    imports: 0.05,
};

impl GenerationMixBreakdown {
    /// Build a mix by evaluating `f` for every source
    pub fn from_fn(mut f: impl FnMut(EnergySource) -> f64) -> Self {
        let mut mix = Self::default();
        for source in EnergySource::ALL {
            mix.set(source, f(source));
        }
        mix
    }

    pub fn get(&self, source: EnergySource) -> f64 {
        match source {
            EnergySource::Wind => self.wind,
            EnergySource::Solar => self.solar,
            EnergySource::Hydro => self.hydro,
            EnergySource::Gas => self.gas,
            EnergySource::Coal => self.coal,
            EnergySource::Biomass => self.biomass,
            EnergySource::Imports => self.imports,
        }
    }

    pub fn set(&mut self, source: EnergySource, value: f64) {
        let slot = match source {
            EnergySource::Wind => &mut self.wind,
            EnergySource::Solar => &mut self.solar,
            EnergySource::Hydro => &mut self.hydro,
            EnergySource::Gas => &mut self.gas,
            EnergySource::Coal => &mut self.coal,
            EnergySource::Biomass => &mut self.biomass,
            EnergySource::Imports => &mut self.imports,
        };
        *slot = value;
    }

    /// Iterate `(source, share)` pairs in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (EnergySource, f64)> + '_ {
        EnergySource::ALL
            .into_iter()
            .map(move |source| (source, self.get(source)))
    }

    /// Sum of all seven shares
    pub fn total(&self) -> f64 {
        self.iter().map(|(_, share)| share).sum()
    }

    /// Apply `f` to each share
    #[must_use]
    pub fn map(&self, mut f: impl FnMut(EnergySource, f64) -> f64) -> Self {
        Self::from_fn(|source| f(source, self.get(source)))
    }

    /// Combined share of renewable sources
    pub fn renewable_share(&self) -> f64 {
        self.iter()
            .filter(|(source, _)| source.is_renewable())
            .map(|(_, share)| share)
            .sum()
    }

    /// Combined share of fossil sources
    pub fn fossil_share(&self) -> f64 {
        self.iter()
            .filter(|(source, _)| source.is_fossil())
            .map(|(_, share)| share)
            .sum()
    }
}

/// Average carbon cost per source in gCO2/kWh
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EmissionFactors(GenerationMixBreakdown);

/// Process-wide emission factors
pub const EMISSION_FACTORS: EmissionFactors = EmissionFactors(GenerationMixBreakdown {
    wind: 12.0,
    solar: 50.0,
    hydro: 24.0,
    gas: 400.0,
    coal: 900.0,
    biomass: 230.0,
    imports: 300.0,
});

impl EmissionFactors {
    /// gCO2/kWh for one source
    pub fn factor(&self, source: EnergySource) -> f64 {
        self.0.get(source)
    }

    /// Share-weighted sum of factors, unrounded
    pub fn weighted_sum(&self, mix: &GenerationMixBreakdown) -> f64 {
        mix.iter()
            .map(|(source, share)| share * self.factor(source))
            .sum()
    }
}
