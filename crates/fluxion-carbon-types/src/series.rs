// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of FluxION.

//! Timestamped output series consumed by chart front-ends.

use crate::mix::GenerationMixBreakdown;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Normalized generation mix at one sample instant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationMixPoint {
    pub timestamp: DateTime<Utc>,
    pub mix: GenerationMixBreakdown,
}

/// Carbon intensity at one sample instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarbonIntensityPoint {
    pub timestamp: DateTime<Utc>,
    /// gCO2/kWh, rounded
    pub intensity: u32,
}

/// Result of one generation pass.
///
/// Both series share the same timestamp sequence. An empty output is a
/// valid "no data" state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationOutput {
    pub intensity_series: Vec<CarbonIntensityPoint>,
    pub mix_series: Vec<GenerationMixPoint>,
}

impl GenerationOutput {
    pub fn len(&self) -> usize {
        self.intensity_series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intensity_series.is_empty()
    }

    /// Iterate mix and intensity samples together
    pub fn samples(&self) -> impl Iterator<Item = (&GenerationMixPoint, &CarbonIntensityPoint)> {
        self.mix_series.iter().zip(&self.intensity_series)
    }
}

/// Aggregate statistics over a generated window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSummary {
    pub samples: usize,
    pub min_intensity: u32,
    pub max_intensity: u32,
    pub mean_intensity: f64,
    /// Timestamp of the lowest-intensity sample (first one on ties)
    pub greenest_at: DateTime<Utc>,
    /// Timestamp of the highest-intensity sample (first one on ties)
    pub dirtiest_at: DateTime<Utc>,
    pub mean_mix: GenerationMixBreakdown,
    pub mean_renewable_share: f64,
    pub mean_fossil_share: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mix::FALLBACK_MIX;
    use chrono::TimeZone;

    fn output() -> GenerationOutput {
        let timestamp = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        GenerationOutput {
            intensity_series: vec![CarbonIntensityPoint {
                timestamp,
                intensity: 259,
            }],
            mix_series: vec![GenerationMixPoint {
                timestamp,
                mix: FALLBACK_MIX,
            }],
        }
    }

    #[test]
    fn test_wire_format_uses_camel_case_series() {
        let value = serde_json::to_value(output()).unwrap();
        assert_eq!(value["intensitySeries"][0]["intensity"], 259);
        assert_eq!(value["mixSeries"][0]["mix"]["gas"], 0.45);
        assert_eq!(value["mixSeries"][0]["timestamp"], "2025-01-01T00:00:00Z");
    }

    #[test]
    fn test_empty_output_is_valid() {
        let empty: GenerationOutput =
            serde_json::from_str(r#"{"intensitySeries":[],"mixSeries":[]}"#).unwrap();
        assert!(empty.is_empty());
        assert_eq!(empty.samples().count(), 0);
    }

    #[test]
    fn test_samples_pairs_points_by_index() {
        let output = output();
        let (mix, intensity) = output.samples().next().unwrap();
        assert_eq!(mix.timestamp, intensity.timestamp);
        assert_eq!(output.len(), 1);
    }
}
