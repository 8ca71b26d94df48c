// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of FluxION.

//! Weighted carbon intensity.

use fluxion_carbon_types::{EMISSION_FACTORS, GenerationMixBreakdown};

/// Carbon intensity in gCO2/kWh of a normalized mix, rounded
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "value is clamped to the u32 range before the cast"
)]
pub fn carbon_intensity(mix: &GenerationMixBreakdown) -> u32 {
    let weighted = EMISSION_FACTORS.weighted_sum(mix).round();
    if weighted.is_nan() {
        return 0;
    }
    weighted.clamp(0.0, f64::from(u32::MAX)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use fluxion_carbon_types::FALLBACK_MIX;

    #[test]
    fn test_fallback_mix_intensity_is_259() {
        assert_eq!(carbon_intensity(&FALLBACK_MIX), 259);
    }

    #[test]
    fn test_single_source_mixes_match_factors() {
        let all_coal = GenerationMixBreakdown {
            coal: 1.0,
            ..GenerationMixBreakdown::default()
        };
        let all_wind = GenerationMixBreakdown {
            wind: 1.0,
            ..GenerationMixBreakdown::default()
        };
        assert_eq!(carbon_intensity(&all_coal), 900);
        assert_eq!(carbon_intensity(&all_wind), 12);
    }

    #[test]
    fn test_rounds_to_nearest() {
        // 0.5 * 12 + 0.5 * 50 = 31
        let mix = GenerationMixBreakdown {
            wind: 0.5,
            solar: 0.5,
            ..GenerationMixBreakdown::default()
        };
        assert_eq!(carbon_intensity(&mix), 31);

        // 0.01 * 50 = 0.5 rounds away from zero
        let mix = GenerationMixBreakdown {
            solar: 0.01,
            ..GenerationMixBreakdown::default()
        };
        assert_eq!(carbon_intensity(&mix), 1);
    }

    #[test]
    fn test_empty_mix_is_zero() {
        assert_eq!(carbon_intensity(&GenerationMixBreakdown::default()), 0);
    }
}
