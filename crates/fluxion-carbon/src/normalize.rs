// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of FluxION.

//! Mix normalization and post-normalization re-weighting.

use crate::profile::SourceWeights;
use fluxion_carbon_types::{FALLBACK_MIX, GenerationMixBreakdown};

/// Rescale a raw mix so its shares sum to 1.
///
/// A mix whose total is zero or negative is replaced by [`FALLBACK_MIX`].
/// This is never an error.
pub fn normalize(raw: &GenerationMixBreakdown) -> GenerationMixBreakdown {
    let total = raw.total();
    if total <= 0.0 || !total.is_finite() {
        return FALLBACK_MIX;
    }
    raw.map(|_, share| share / total)
}

/// Multiply a normalized mix by per-source weights and re-normalize.
///
/// Scaling breaks the unit-sum invariant, hence the second pass. All-zero
/// weights fall back to [`FALLBACK_MIX`] through [`normalize`].
pub fn apply_scaling(
    mix: &GenerationMixBreakdown,
    weights: &SourceWeights,
) -> GenerationMixBreakdown {
    normalize(&weights.apply(mix))
}

#[cfg(test)]
mod tests {
    use super::*;
    use fluxion_carbon_types::EnergySource;

    const TOLERANCE: f64 = 1e-9;

    fn sample_mix() -> GenerationMixBreakdown {
        GenerationMixBreakdown {
            wind: 0.42,
            solar: 0.11,
            hydro: 0.06,
            gas: 0.33,
            coal: 0.05,
            biomass: 0.05,
            imports: 0.02,
        }
    }

    #[test]
    fn test_normalized_mix_sums_to_one() {
        let mixes = [
            sample_mix(),
            GenerationMixBreakdown {
                wind: 3.0,
                gas: 7.0,
                ..GenerationMixBreakdown::default()
            },
            GenerationMixBreakdown {
                solar: 1e-6,
                ..GenerationMixBreakdown::default()
            },
        ];
        for raw in mixes {
            let normalized = normalize(&raw);
            assert!(
                (normalized.total() - 1.0).abs() < TOLERANCE,
                "{raw:?} normalized to total {}",
                normalized.total()
            );
        }
    }

    #[test]
    fn test_normalize_preserves_proportions() {
        let raw = GenerationMixBreakdown {
            wind: 3.0,
            gas: 1.0,
            ..GenerationMixBreakdown::default()
        };
        let normalized = normalize(&raw);
        assert!((normalized.wind - 0.75).abs() < TOLERANCE);
        assert!((normalized.gas - 0.25).abs() < TOLERANCE);
        assert_eq!(normalized.coal, 0.0);
    }

    #[test]
    fn test_all_zero_mix_yields_fallback_exactly() {
        let normalized = normalize(&GenerationMixBreakdown::default());
        assert_eq!(normalized, FALLBACK_MIX);
        assert_eq!(normalized.wind, 0.30);
        assert_eq!(normalized.gas, 0.45);
    }

    #[test]
    fn test_negative_total_yields_fallback() {
        let raw = GenerationMixBreakdown {
            wind: 0.2,
            gas: -0.5,
            ..GenerationMixBreakdown::default()
        };
        assert_eq!(normalize(&raw), FALLBACK_MIX);
    }

    #[test]
    fn test_scaling_renormalizes() {
        let weights = SourceWeights {
            wind: 1.3,
            coal: 0.5,
            ..SourceWeights::IDENTITY
        };
        let base = normalize(&sample_mix());
        let scaled = apply_scaling(&base, &weights);

        assert!((scaled.total() - 1.0).abs() < TOLERANCE);
        assert!(scaled.wind > base.wind, "wind share should grow");
        assert!(scaled.coal < base.coal, "coal share should shrink");
    }

    #[test]
    fn test_inverse_scaling_still_sums_to_one() {
        let weights = SourceWeights {
            wind: 1.5,
            coal: 0.2,
            ..SourceWeights::IDENTITY
        };
        let base = normalize(&sample_mix());
        let round_trip = apply_scaling(&apply_scaling(&base, &weights), &weights.inverse());

        assert!((round_trip.total() - 1.0).abs() < TOLERANCE);
        for source in EnergySource::ALL {
            assert!(round_trip.get(source) >= 0.0);
        }
    }

    #[test]
    fn test_zero_weights_fall_back() {
        let zero = SourceWeights {
            wind: 0.0,
            solar: 0.0,
            hydro: 0.0,
            gas: 0.0,
            coal: 0.0,
            biomass: 0.0,
            imports: 0.0,
        };
        assert_eq!(apply_scaling(&sample_mix(), &zero), FALLBACK_MIX);
    }
}
