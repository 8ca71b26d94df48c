// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of FluxION.

//! Requested time window for a generation pass.

use crate::source::ParseIdError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Trailing window ending at the reference instant
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DateRange {
    #[default]
    #[serde(rename = "24h")]
    Last24Hours,
    #[serde(rename = "48h")]
    Last48Hours,
    #[serde(rename = "7d")]
    Last7Days,
}

impl DateRange {
    pub const ALL: [DateRange; 3] = [Self::Last24Hours, Self::Last48Hours, Self::Last7Days];

    pub fn id(self) -> &'static str {
        match self {
            Self::Last24Hours => "24h",
            Self::Last48Hours => "48h",
            Self::Last7Days => "7d",
        }
    }

    /// Human-readable label
    pub fn label(self) -> &'static str {
        match self {
            Self::Last24Hours => "Last 24 hours",
            Self::Last48Hours => "Last 48 hours",
            Self::Last7Days => "Last 7 days",
        }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for DateRange {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "24h" | "1d" => Ok(Self::Last24Hours),
            "48h" | "2d" => Ok(Self::Last48Hours),
            "7d" | "168h" | "1w" => Ok(Self::Last7Days),
            _ => Err(ParseIdError {
                kind: "date range",
                value: s.to_owned(),
                expected: "24h, 48h, 7d",
            }),
        }
    }
}
