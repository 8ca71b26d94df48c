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

//! Shared data model for grid generation mix and carbon intensity series.

pub mod mix;
pub mod range;
pub mod series;
pub mod source;

// Re-export common types for convenience
pub use mix::{EMISSION_FACTORS, EmissionFactors, FALLBACK_MIX, GenerationMixBreakdown};
pub use range::DateRange;
pub use series::{CarbonIntensityPoint, GenerationMixPoint, GenerationOutput, SeriesSummary};
pub use source::{EnergySource, ParseIdError};
