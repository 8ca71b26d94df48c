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

//! Synthetic grid generation mix and carbon intensity for FluxION
//!
//! Produces a time series of per-source generation shares for a single
//! grid region and the carbon intensity derived from it. There is no live
//! data source: every implemented provider is a tuned synthetic generator.
//!
//! # Pipeline
//!
//! - **Range resolution**: window length and sampling step per [`DateRange`]
//! - **Series generation**: diurnal and periodic shaping per source, driven by a [`GeneratorProfile`]
//! - **Normalization**: shares rescaled to sum to 1, with a fixed fallback for degenerate input
//! - **Re-weighting**: optional per-source scaling from the profile, then re-normalized
//! - **Intensity**: share-weighted emission factors, rounded to gCO2/kWh
//!
//! # Example
//!
//! ```
//! use fluxion_carbon::{DateRange, GenerationRequest, MOCK_PROFILE, generate, summarize};
//!
//! let request = GenerationRequest::now_for(DateRange::Last24Hours, MOCK_PROFILE);
//! let output = generate(&request);
//! assert_eq!(output.len(), 97);
//!
//! let summary = summarize(&output).unwrap();
//! assert!(summary.min_intensity <= summary.max_intensity);
//! ```

pub mod error;
pub mod generator;
pub mod intensity;
pub mod normalize;
pub mod pipeline;
pub mod profile;
pub mod provider;
pub mod range;
pub mod summary;

// Re-exports for convenience
pub use error::{MixError, Result};
pub use fluxion_carbon_types::{
    CarbonIntensityPoint, DateRange, EMISSION_FACTORS, EnergySource, FALLBACK_MIX,
    GenerationMixBreakdown, GenerationMixPoint, GenerationOutput, SeriesSummary,
};
pub use generator::{RawSample, SeriesGenerator};
pub use intensity::carbon_intensity;
pub use normalize::{apply_scaling, normalize};
pub use pipeline::{
    GenerationRequest, ProviderGeneration, ProviderRequest, generate, generate_for_provider,
    generate_with_fallback, raw_samples,
};
pub use profile::{
    GeneratorProfile, MOCK_PROFILE, PROFILE_PRESETS, ProfileInfo, ProfilePreset, ProfileRegistry,
    REALISTIC_PROFILE, SourceWeights,
};
pub use provider::Provider;
pub use range::{RangeResolution, resolve};
pub use summary::summarize;
