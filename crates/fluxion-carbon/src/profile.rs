// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of FluxION.

//! Generator tuning profiles.
//!
//! A profile holds every constant that shapes the synthetic series:
//!
//! - **mock**: default demo tuning
//! - **realistic**: tuning used by the "real-time" provider (windier, less gas and coal)
//! - **mock_windy** / **mock_low_carbon**: mock tuning with multiplicative
//!   per-source weights applied after normalization

use crate::error::{MixError, Result};
use fluxion_carbon_types::{EnergySource, GenerationMixBreakdown};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Wind: diurnal sine around a base, peaking at `phase_hours + 6`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindParams {
    pub base: f64,
    pub amplitude: f64,
    pub phase_hours: f64,
    pub min: f64,
    pub max: f64,
}

/// Solar: half-sine between 06:00 and 18:00
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolarParams {
    pub coefficient: f64,
    pub max: f64,
}

/// Hydro: near-constant base with a ripple of `cycles` periods per window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HydroParams {
    pub base: f64,
    pub ripple: f64,
    pub cycles: f64,
}

/// Coal: small base with a ripple of `cycles` periods per window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoalParams {
    pub base: f64,
    pub ripple: f64,
    pub cycles: f64,
}

/// Gas: balancing term that absorbs wind and solar swings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GasParams {
    pub base: f64,
    pub amplitude: f64,
    pub min: f64,
    pub max: f64,
}

/// Imports: residual `1 - others`, clamped
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportsParams {
    pub min: f64,
    pub max: f64,
}

/// Multiplicative per-source weights, 1.0 when unspecified
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceWeights {
    pub wind: f64,
    pub solar: f64,
    pub hydro: f64,
    pub gas: f64,
    pub coal: f64,
    pub biomass: f64,
    pub imports: f64,
}

impl SourceWeights {
    pub const IDENTITY: SourceWeights = SourceWeights {
        wind: 1.0,
        solar: 1.0,
        hydro: 1.0,
        gas: 1.0,
        coal: 1.0,
        biomass: 1.0,
        imports: 1.0,
    };

    pub fn weight(&self, source: EnergySource) -> f64 {
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

    /// Multiply each share by its weight (no re-normalization)
    pub fn apply(&self, mix: &GenerationMixBreakdown) -> GenerationMixBreakdown {
        mix.map(|source, share| share * self.weight(source))
    }

    /// Per-source reciprocal; zero weights stay zero
    #[must_use]
    pub fn inverse(&self) -> Self {
        let inv = |w: f64| if w == 0.0 { 0.0 } else { 1.0 / w };
        Self {
            wind: inv(self.wind),
            solar: inv(self.solar),
            hydro: inv(self.hydro),
            gas: inv(self.gas),
            coal: inv(self.coal),
            biomass: inv(self.biomass),
            imports: inv(self.imports),
        }
    }
}

impl Default for SourceWeights {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Complete set of tuning constants for one synthetic series shape
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorProfile {
    pub wind: WindParams,
    pub solar: SolarParams,
    pub hydro: HydroParams,
    pub coal: CoalParams,
    /// Constant biomass share
    pub biomass: f64,
    pub gas: GasParams,
    pub imports: ImportsParams,
    /// Applied to the normalized mix, followed by re-normalization
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scaling: Option<SourceWeights>,
}

pub const MOCK_PROFILE: GeneratorProfile = GeneratorProfile {
    wind: WindParams {
        base: 0.35,
        amplitude: 0.15,
        phase_hours: 21.0, // peaks around 03:00
        min: 0.1,
        max: 0.75,
    },
    solar: SolarParams {
        coefficient: 0.12,
        max: 0.15,
    },
    hydro: HydroParams {
        base: 0.05,
        ripple: 0.01,
        cycles: 7.0,
    },
    coal: CoalParams {
        base: 0.04,
        ripple: 0.01,
        cycles: 3.0,
    },
    biomass: 0.05,
    gas: GasParams {
        base: 0.4,
        amplitude: 0.05,
        min: 0.05,
        max: 0.6,
    },
    imports: ImportsParams {
        min: 0.02,
        max: 0.2,
    },
    scaling: None,
};

pub const REALISTIC_PROFILE: GeneratorProfile = GeneratorProfile {
    wind: WindParams {
        base: 0.4,
        amplitude: 0.2,
        phase_hours: 20.0, // peaks around 02:00
        min: 0.1,
        max: 0.8,
    },
    solar: SolarParams {
        coefficient: 0.18,
        max: 0.25,
    },
    hydro: HydroParams {
        base: 0.08,
        ripple: 0.02,
        cycles: 7.0,
    },
    coal: CoalParams {
        base: 0.02,
        ripple: 0.01,
        cycles: 3.0,
    },
    biomass: 0.06,
    gas: GasParams {
        base: 0.35,
        amplitude: 0.08,
        min: 0.05,
        max: 0.7,
    },
    imports: ImportsParams {
        min: 0.02,
        max: 0.2,
    },
    scaling: None,
};

pub const MOCK_WINDY_PROFILE: GeneratorProfile = GeneratorProfile {
    scaling: Some(SourceWeights {
        wind: 1.3,
        coal: 0.5,
        ..SourceWeights::IDENTITY
    }),
    ..MOCK_PROFILE
};

pub const MOCK_LOW_CARBON_PROFILE: GeneratorProfile = GeneratorProfile {
    scaling: Some(SourceWeights {
        wind: 1.5,
        coal: 0.2,
        ..SourceWeights::IDENTITY
    }),
    ..MOCK_PROFILE
};

impl Default for WindParams {
    fn default() -> Self {
        MOCK_PROFILE.wind
    }
}

impl Default for SolarParams {
    fn default() -> Self {
        MOCK_PROFILE.solar
    }
}

impl Default for HydroParams {
    fn default() -> Self {
        MOCK_PROFILE.hydro
    }
}

impl Default for CoalParams {
    fn default() -> Self {
        MOCK_PROFILE.coal
    }
}

impl Default for GasParams {
    fn default() -> Self {
        MOCK_PROFILE.gas
    }
}

impl Default for ImportsParams {
    fn default() -> Self {
        MOCK_PROFILE.imports
    }
}

impl Default for GeneratorProfile {
    fn default() -> Self {
        MOCK_PROFILE
    }
}

impl GeneratorProfile {
    /// Reject bands with `min > max`, negative bases or weights, ripples larger
    /// than their base, and non-finite values
    pub fn validate(&self) -> Result<()> {
        let values = [
            ("wind.base", self.wind.base),
            ("wind.amplitude", self.wind.amplitude),
            ("wind.phase_hours", self.wind.phase_hours),
            ("wind.min", self.wind.min),
            ("wind.max", self.wind.max),
            ("solar.coefficient", self.solar.coefficient),
            ("solar.max", self.solar.max),
            ("hydro.base", self.hydro.base),
            ("hydro.ripple", self.hydro.ripple),
            ("hydro.cycles", self.hydro.cycles),
            ("coal.base", self.coal.base),
            ("coal.ripple", self.coal.ripple),
            ("coal.cycles", self.coal.cycles),
            ("biomass", self.biomass),
            ("gas.base", self.gas.base),
            ("gas.amplitude", self.gas.amplitude),
            ("gas.min", self.gas.min),
            ("gas.max", self.gas.max),
            ("imports.min", self.imports.min),
            ("imports.max", self.imports.max),
        ];
        for (name, value) in values {
            if !value.is_finite() {
                return Err(MixError::InvalidProfile(format!("{name} must be finite")));
            }
        }

        let non_negative = [
            ("wind.min", self.wind.min),
            ("solar.coefficient", self.solar.coefficient),
            ("solar.max", self.solar.max),
            ("hydro.base", self.hydro.base),
            ("coal.base", self.coal.base),
            ("biomass", self.biomass),
            ("gas.min", self.gas.min),
            ("imports.min", self.imports.min),
        ];
        for (name, value) in non_negative {
            if value < 0.0 {
                return Err(MixError::InvalidProfile(format!(
                    "{name} must not be negative (got {value})"
                )));
            }
        }

        let bands = [
            ("wind", self.wind.min, self.wind.max),
            ("gas", self.gas.min, self.gas.max),
            ("imports", self.imports.min, self.imports.max),
        ];
        for (name, min, max) in bands {
            if min > max {
                return Err(MixError::InvalidProfile(format!(
                    "{name} band is inverted: min {min} > max {max}"
                )));
            }
        }

        let ripples = [
            ("hydro", self.hydro.base, self.hydro.ripple),
            ("coal", self.coal.base, self.coal.ripple),
        ];
        for (name, base, ripple) in ripples {
            if ripple.abs() > base {
                return Err(MixError::InvalidProfile(format!(
                    "{name}.ripple {ripple} exceeds {name}.base {base}; share would go negative"
                )));
            }
        }

        if let Some(scaling) = &self.scaling {
            for source in EnergySource::ALL {
                let weight = scaling.weight(source);
                if !weight.is_finite() || weight < 0.0 {
                    return Err(MixError::InvalidProfile(format!(
                        "scaling.{source} must be a finite non-negative weight (got {weight})"
                    )));
                }
            }
        }

        Ok(())
    }
}

/// Built-in profile with metadata
#[derive(Debug, Clone)]
pub struct ProfilePreset {
    /// Unique identifier
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
    /// Description
    pub description: &'static str,
    /// The profile
    pub profile: GeneratorProfile,
}

/// Available profile presets
pub const PROFILE_PRESETS: &[ProfilePreset] = &[
    ProfilePreset {
        id: "mock",
        name: "Mock",
        description: "Default demo tuning: moderate wind, gas-led balancing",
        profile: MOCK_PROFILE,
    },
    ProfilePreset {
        id: "realistic",
        name: "Realistic",
        description: "Real-time provider tuning: higher wind baseline, lower gas and coal",
        profile: REALISTIC_PROFILE,
    },
    ProfilePreset {
        id: "mock_windy",
        name: "Mock (Windy)",
        description: "Mock tuning with wind x1.3 and coal x0.5, re-normalized",
        profile: MOCK_WINDY_PROFILE,
    },
    ProfilePreset {
        id: "mock_low_carbon",
        name: "Mock (Low Carbon)",
        description: "Mock tuning with wind x1.5 and coal x0.2, re-normalized",
        profile: MOCK_LOW_CARBON_PROFILE,
    },
];

/// Listing entry for a registered profile
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileInfo {
    pub id: String,
    pub name: String,
    pub description: String,
    pub builtin: bool,
}

#[derive(Debug, Clone)]
struct RegisteredProfile {
    info: ProfileInfo,
    profile: GeneratorProfile,
}

/// Presets plus user-defined profiles, keyed by id
#[derive(Debug, Clone)]
pub struct ProfileRegistry {
    profiles: BTreeMap<String, RegisteredProfile>,
}

impl ProfileRegistry {
    /// Registry containing only the built-in presets
    pub fn with_presets() -> Self {
        let profiles = PROFILE_PRESETS
            .iter()
            .map(|preset| {
                (
                    preset.id.to_owned(),
                    RegisteredProfile {
                        info: ProfileInfo {
                            id: preset.id.to_owned(),
                            name: preset.name.to_owned(),
                            description: preset.description.to_owned(),
                            builtin: true,
                        },
                        profile: preset.profile,
                    },
                )
            })
            .collect();
        Self { profiles }
    }

    /// Add a custom profile. Presets cannot be replaced.
    pub fn register(
        &mut self,
        id: &str,
        description: Option<String>,
        profile: GeneratorProfile,
    ) -> Result<()> {
        if id.trim().is_empty() {
            return Err(MixError::InvalidProfile(
                "profile id must not be empty".to_owned(),
            ));
        }
        if self.profiles.get(id).is_some_and(|p| p.info.builtin) {
            return Err(MixError::InvalidProfile(format!(
                "'{id}' is a built-in profile and cannot be redefined"
            )));
        }
        profile.validate().map_err(|e| match e {
            MixError::InvalidProfile(reason) => MixError::InvalidProfile(format!("{id}: {reason}")),
            other => other,
        })?;

        self.profiles.insert(
            id.to_owned(),
            RegisteredProfile {
                info: ProfileInfo {
                    id: id.to_owned(),
                    name: id.to_owned(),
                    description: description.unwrap_or_else(|| "Custom profile".to_owned()),
                    builtin: false,
                },
                profile,
            },
        );
        Ok(())
    }

    pub fn get(&self, id: &str) -> Result<&GeneratorProfile> {
        self.profiles
            .get(id)
            .map(|p| &p.profile)
            .ok_or_else(|| MixError::UnknownProfile(id.to_owned()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.profiles.contains_key(id)
    }

    /// Presets first, then custom profiles, each alphabetically
    pub fn list(&self) -> Vec<ProfileInfo> {
        let mut infos: Vec<ProfileInfo> = self.profiles.values().map(|p| p.info.clone()).collect();
        infos.sort_by(|a, b| b.builtin.cmp(&a.builtin).then_with(|| a.id.cmp(&b.id)));
        infos
    }
}

impl Default for ProfileRegistry {
    fn default() -> Self {
        Self::with_presets()
    }
}
