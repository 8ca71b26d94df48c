// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of FluxION.

//! Synthetic per-source generation shares.
//!
//! Each sample is shaped from its local hour-of-day (diurnal wind, solar,
//! gas) and from its index within the window (hydro and coal ripples).
//! Output is raw: shares are clamped per source but not normalized.

use crate::profile::GeneratorProfile;
use crate::range::RangeResolution;
use chrono::{DateTime, Timelike, Utc};
use chrono_tz::Tz;
use fluxion_carbon_types::GenerationMixBreakdown;
use std::f64::consts::PI;

/// Solar output is zero outside `[SUNRISE_HOUR, SUNSET_HOUR]`
pub const SUNRISE_HOUR: f64 = 6.0;
pub const SUNSET_HOUR: f64 = 18.0;

/// Bound `value` to `[min, max]`.
///
/// Unlike `f64::clamp` this never panics; with an inverted band the
/// upper bound wins.
pub fn bound(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

/// One raw sample before normalization
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawSample {
    pub index: u32,
    pub timestamp: DateTime<Utc>,
    /// Fractional local hour-of-day (`hour + minute / 60`)
    pub hour_of_day: f64,
    pub mix: GenerationMixBreakdown,
}

/// Stateless generator over one profile
#[derive(Debug, Clone, Copy)]
pub struct SeriesGenerator<'a> {
    profile: &'a GeneratorProfile,
}

impl<'a> SeriesGenerator<'a> {
    pub fn new(profile: &'a GeneratorProfile) -> Self {
        Self { profile }
    }

    /// Raw samples for the window ending at `now`, hour-of-day taken in `timezone`
    pub fn samples(
        &self,
        resolution: RangeResolution,
        now: DateTime<Utc>,
        timezone: Tz,
    ) -> Vec<RawSample> {
        let step_count = resolution.step_count();
        resolution
            .timestamps(now)
            .zip(0..)
            .map(|(timestamp, index)| {
                let hour_of_day = local_hour_of_day(timestamp, timezone);
                RawSample {
                    index,
                    timestamp,
                    hour_of_day,
                    mix: self.raw_mix(index, step_count, hour_of_day),
                }
            })
            .collect()
    }

    /// Raw shares for sample `index` of `step_count`, at local hour `hour`
    pub fn raw_mix(&self, index: u32, step_count: u32, hour: f64) -> GenerationMixBreakdown {
        let p = self.profile;

        let wind = self.wind(hour);
        let solar = self.solar(hour);
        // Unvalidated profiles may carry ripple > base
        let hydro =
            (p.hydro.base + p.hydro.ripple * ripple(index, step_count, p.hydro.cycles)).max(0.0);
        let coal =
            (p.coal.base + p.coal.ripple * ripple(index, step_count, p.coal.cycles)).max(0.0);
        let biomass = p.biomass;

        let gas = bound(
            p.gas.base + p.gas.amplitude * (2.0 * PI * hour / 24.0).cos() - (wind + solar - 0.3),
            p.gas.min,
            p.gas.max,
        );

        let others = wind + solar + hydro + gas + coal + biomass;
        let imports = bound(1.0 - others, p.imports.min, p.imports.max);

        GenerationMixBreakdown {
            wind,
            solar,
            hydro,
            gas,
            coal,
            biomass,
            imports,
        }
    }

    fn wind(&self, hour: f64) -> f64 {
        let w = &self.profile.wind;
        bound(
            w.base + w.amplitude * (2.0 * PI * (hour - w.phase_hours) / 24.0).sin(),
            w.min,
            w.max,
        )
    }

    fn solar(&self, hour: f64) -> f64 {
        // sin(PI) is not exactly zero in floating point
        if hour <= SUNRISE_HOUR || hour >= SUNSET_HOUR {
            return 0.0;
        }
        let s = &self.profile.solar;
        let daylight = (PI * (hour - SUNRISE_HOUR) / 12.0).sin().max(0.0);
        bound(s.coefficient * daylight, 0.0, s.max)
    }
}

/// `sin(2*PI * index / period)` with `period = step_count / cycles`
fn ripple(index: u32, step_count: u32, cycles: f64) -> f64 {
    if step_count == 0 || cycles == 0.0 {
        return 0.0;
    }
    let period = f64::from(step_count) / cycles;
    (2.0 * PI * f64::from(index) / period).sin()
}

fn local_hour_of_day(timestamp: DateTime<Utc>, timezone: Tz) -> f64 {
    let local = timestamp.with_timezone(&timezone);
    f64::from(local.hour()) + f64::from(local.minute()) / 60.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{MOCK_PROFILE, PROFILE_PRESETS, REALISTIC_PROFILE};
    use crate::range::resolve;
    use chrono::TimeZone;
    use fluxion_carbon_types::DateRange;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 21, 14, 0, 0).unwrap()
    }

    #[test]
    fn test_sample_count_matches_resolution() {
        let generator = SeriesGenerator::new(&MOCK_PROFILE);
        for range in DateRange::ALL {
            let resolution = resolve(range);
            let samples = generator.samples(resolution, now(), Tz::UTC);
            assert_eq!(samples.len(), resolution.sample_count(), "{range}");
            assert_eq!(samples[0].index, 0);
            assert_eq!(
                samples.last().map(|s| s.index),
                Some(resolution.step_count())
            );
        }
    }

    #[test]
    fn test_solar_is_zero_outside_daylight() {
        for preset in PROFILE_PRESETS {
            let generator = SeriesGenerator::new(&preset.profile);
            let samples = generator.samples(resolve(DateRange::Last7Days), now(), Tz::UTC);
            for sample in &samples {
                if sample.hour_of_day <= 6.0 || sample.hour_of_day >= 18.0 {
                    assert_eq!(
                        sample.mix.solar, 0.0,
                        "{}: solar should be 0 at hour {}",
                        preset.id, sample.hour_of_day
                    );
                }
            }
        }
    }

    #[test]
    fn test_solar_boundaries_are_exactly_zero() {
        let generator = SeriesGenerator::new(&REALISTIC_PROFILE);
        assert_eq!(generator.raw_mix(0, 96, 6.0).solar, 0.0);
        assert_eq!(generator.raw_mix(0, 96, 18.0).solar, 0.0);
        assert_eq!(generator.raw_mix(0, 96, 3.25).solar, 0.0);
        assert_eq!(generator.raw_mix(0, 96, 23.75).solar, 0.0);
    }

    #[test]
    fn test_solar_peaks_at_noon_within_cap() {
        let generator = SeriesGenerator::new(&MOCK_PROFILE);
        let morning = generator.raw_mix(0, 96, 9.0).solar;
        let noon = generator.raw_mix(0, 96, 12.0).solar;
        let afternoon = generator.raw_mix(0, 96, 15.0).solar;

        assert!(noon > morning && noon > afternoon, "noon should be the peak");
        assert!((noon - MOCK_PROFILE.solar.coefficient).abs() < 1e-12);
        assert!(noon <= MOCK_PROFILE.solar.max);
    }

    #[test]
    fn test_wind_stays_within_band_for_every_sample() {
        for preset in PROFILE_PRESETS {
            let band = preset.profile.wind;
            let generator = SeriesGenerator::new(&preset.profile);
            for range in DateRange::ALL {
                for sample in generator.samples(resolve(range), now(), Tz::UTC) {
                    assert!(
                        (band.min..=band.max).contains(&sample.mix.wind),
                        "{} {range}: wind {} outside [{}, {}]",
                        preset.id,
                        sample.mix.wind,
                        band.min,
                        band.max
                    );
                }
            }
        }
    }

    #[test]
    fn test_wind_band_is_enforced_for_extreme_amplitude() {
        let mut profile = MOCK_PROFILE;
        profile.wind.amplitude = 5.0;
        let generator = SeriesGenerator::new(&profile);

        let peak = generator.raw_mix(0, 96, 3.0).wind;
        let trough = generator.raw_mix(0, 96, 15.0).wind;
        assert_eq!(peak, profile.wind.max);
        assert_eq!(trough, profile.wind.min);
    }

    #[test]
    fn test_wind_peaks_overnight() {
        let generator = SeriesGenerator::new(&MOCK_PROFILE);
        let night = generator.raw_mix(0, 96, 3.0).wind;
        let afternoon = generator.raw_mix(0, 96, 15.0).wind;
        assert!(
            night > afternoon,
            "night wind {night} should exceed afternoon {afternoon}"
        );
    }

    #[test]
    fn test_gas_and_imports_respect_bands() {
        for preset in PROFILE_PRESETS {
            let p = preset.profile;
            let generator = SeriesGenerator::new(&p);
            for sample in generator.samples(resolve(DateRange::Last48Hours), now(), Tz::UTC) {
                assert!((p.gas.min..=p.gas.max).contains(&sample.mix.gas));
                assert!((p.imports.min..=p.imports.max).contains(&sample.mix.imports));
            }
        }
    }

    #[test]
    fn test_biomass_is_constant() {
        let generator = SeriesGenerator::new(&REALISTIC_PROFILE);
        let samples = generator.samples(resolve(DateRange::Last24Hours), now(), Tz::UTC);
        assert!(samples.iter().all(|s| s.mix.biomass == REALISTIC_PROFILE.biomass));
    }

    #[test]
    fn test_hydro_ripple_repeats_cycles_times_per_window() {
        let generator = SeriesGenerator::new(&MOCK_PROFILE);
        // 7-day window: 336 steps, period 48 samples
        let first = generator.raw_mix(0, 336, 0.0).hydro;
        let one_period_later = generator.raw_mix(48, 336, 0.0).hydro;
        let quarter_period = generator.raw_mix(12, 336, 0.0).hydro;

        assert!((first - MOCK_PROFILE.hydro.base).abs() < 1e-12);
        assert!((one_period_later - first).abs() < 1e-12);
        assert!(
            (quarter_period - (MOCK_PROFILE.hydro.base + MOCK_PROFILE.hydro.ripple)).abs() < 1e-12
        );
    }

    #[test]
    fn test_hydro_and_coal_never_go_negative() {
        let mut profile = MOCK_PROFILE;
        profile.hydro.base = 0.01;
        profile.hydro.ripple = 0.2;
        profile.coal.ripple = 0.3;
        let generator = SeriesGenerator::new(&profile);

        let samples = generator.samples(resolve(DateRange::Last7Days), now(), Tz::UTC);
        assert!(samples.iter().any(|s| s.mix.hydro == 0.0), "trough should clamp");
        for sample in &samples {
            assert!(sample.mix.hydro >= 0.0, "hydro {}", sample.mix.hydro);
            assert!(sample.mix.coal >= 0.0, "coal {}", sample.mix.coal);
        }
    }

    #[test]
    fn test_hour_of_day_uses_region_timezone() {
        let generator = SeriesGenerator::new(&MOCK_PROFILE);
        let prague: Tz = "Europe/Prague".parse().unwrap();
        let summer_noon_utc = Utc.with_ymd_and_hms(2025, 6, 21, 10, 0, 0).unwrap();

        let samples = generator.samples(resolve(DateRange::Last24Hours), summer_noon_utc, prague);
        let last = samples.last().unwrap();
        assert_eq!(last.timestamp, summer_noon_utc);
        assert!((last.hour_of_day - 12.0).abs() < 1e-12, "CEST is UTC+2");
    }

    #[test]
    fn test_generation_is_deterministic_for_fixed_now() {
        let generator = SeriesGenerator::new(&MOCK_PROFILE);
        let a = generator.samples(resolve(DateRange::Last48Hours), now(), Tz::UTC);
        let b = generator.samples(resolve(DateRange::Last48Hours), now(), Tz::UTC);
        assert_eq!(a, b);
    }

    #[test]
    fn test_bound_never_panics_on_inverted_band() {
        assert_eq!(bound(0.5, 0.1, 0.9), 0.5);
        assert_eq!(bound(-1.0, 0.1, 0.9), 0.1);
        assert_eq!(bound(2.0, 0.1, 0.9), 0.9);
        assert_eq!(bound(0.5, 0.9, 0.1), 0.1);
    }
}
