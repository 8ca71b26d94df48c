// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of FluxION.

//! Generation source identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when a textual id does not name a known value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}' (expected one of: {expected})")]
pub struct ParseIdError {
    pub kind: &'static str,
    pub value: String,
    pub expected: &'static str,
}

/// One of the seven generation sources tracked in a mix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnergySource {
    Wind,
    Solar,
    Hydro,
    Gas,
    Coal,
    Biomass,
    Imports,
}

impl EnergySource {
    /// All sources in canonical order
    pub const ALL: [EnergySource; 7] = [
        Self::Wind,
        Self::Solar,
        Self::Hydro,
        Self::Gas,
        Self::Coal,
        Self::Biomass,
        Self::Imports,
    ];

    /// Stable snake_case identifier
    pub fn id(self) -> &'static str {
        match self {
            Self::Wind => "wind",
            Self::Solar => "solar",
            Self::Hydro => "hydro",
            Self::Gas => "gas",
            Self::Coal => "coal",
            Self::Biomass => "biomass",
            Self::Imports => "imports",
        }
    }

    pub fn is_renewable(self) -> bool {
        matches!(self, Self::Wind | Self::Solar | Self::Hydro | Self::Biomass)
    }

    pub fn is_fossil(self) -> bool {
        matches!(self, Self::Gas | Self::Coal)
    }
}

impl fmt::Display for EnergySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for EnergySource {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|source| source.id() == wanted)
            .ok_or_else(|| ParseIdError {
                kind: "energy source",
                value: s.to_owned(),
                expected: "wind, solar, hydro, gas, coal, biomass, imports",
            })
    }
}
