// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of FluxION.

//! Range to sampling resolution.

use chrono::{DateTime, Duration, Utc};
use fluxion_carbon_types::DateRange;

/// Window length and sampling step for a [`DateRange`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeResolution {
    pub total_hours: u32,
    pub step_minutes: u32,
}

/// Map a range to its duration and step: 15-minute steps for 24h/48h,
/// 30-minute steps for 7d.
pub fn resolve(range: DateRange) -> RangeResolution {
    match range {
        DateRange::Last24Hours => RangeResolution {
            total_hours: 24,
            step_minutes: 15,
        },
        DateRange::Last48Hours => RangeResolution {
            total_hours: 48,
            step_minutes: 15,
        },
        DateRange::Last7Days => RangeResolution {
            total_hours: 168,
            step_minutes: 30,
        },
    }
}

impl RangeResolution {
    /// Number of steps between the first and last sample
    #[expect(clippy::integer_division)]
    pub fn step_count(&self) -> u32 {
        self.total_hours * 60 / self.step_minutes
    }

    /// Samples including both endpoints
    pub fn sample_count(&self) -> usize {
        self.step_count() as usize + 1
    }

    pub fn duration(&self) -> Duration {
        Duration::hours(i64::from(self.total_hours))
    }

    pub fn step(&self) -> Duration {
        Duration::minutes(i64::from(self.step_minutes))
    }

    /// Timestamps from `now - duration` to `now`, `step` apart
    pub fn timestamps(&self, now: DateTime<Utc>) -> impl Iterator<Item = DateTime<Utc>> {
        let start = now - self.duration();
        let step_minutes = i64::from(self.step_minutes);
        (0..=self.step_count()).map(move |i| start + Duration::minutes(step_minutes * i64::from(i)))
    }
}
