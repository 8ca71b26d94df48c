// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of FluxION.

//! TOML configuration for the carbon intensity CLI and server.

use anyhow::{Context, Result, bail};
use chrono_tz::Tz;
use fluxion_carbon::{GeneratorProfile, ProfileRegistry, Provider};
use fluxion_carbon_types::DateRange;
use fluxion_carbon_web::{ApiState, RegionInfo};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Config file looked up when `--config` is not given
pub const DEFAULT_CONFIG_PATH: &str = "fluxion_carbon.toml";

const EXAMPLE_CONFIG: &str = r#"# FluxION carbon intensity configuration

[region]
name = "CZ"
# IANA timezone; hour-of-day shaping (solar, wind, gas) uses local time
timezone = "Europe/Prague"

[generation]
# 24h, 48h or 7d
default_range = "24h"
# mock, realtime or grid_operator
default_provider = "mock"

[server]
bind_address = "127.0.0.1"
port = 8110

# Custom profiles. Missing keys take the mock profile's values.
[profiles.windy_winter]
description = "Strong overnight wind, weak solar"
biomass = 0.06

[profiles.windy_winter.wind]
base = 0.45
amplitude = 0.2

[profiles.windy_winter.solar]
coefficient = 0.05
max = 0.08

[profiles.windy_winter.scaling]
coal = 0.5
"#;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CarbonConfig {
    #[serde(default)]
    pub region: RegionSettings,
    #[serde(default)]
    pub generation: GenerationSettings,
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub profiles: BTreeMap<String, CustomProfile>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegionSettings {
    #[serde(default = "default_region_name")]
    pub name: String,
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerationSettings {
    #[serde(default)]
    pub default_range: DateRange,
    #[serde(default)]
    pub default_provider: Provider,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

/// `[profiles.<id>]` table
#[derive(Debug, Clone, Deserialize)]
pub struct CustomProfile {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(flatten)]
    pub profile: GeneratorProfile,
}

fn default_region_name() -> String {
    "default".to_owned()
}

fn default_timezone() -> String {
    "UTC".to_owned()
}

fn default_bind_address() -> String {
    "127.0.0.1".to_owned()
}

fn default_port() -> u16 {
    8110
}

impl Default for RegionSettings {
    fn default() -> Self {
        Self {
            name: default_region_name(),
            timezone: default_timezone(),
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
        }
    }
}

impl CarbonConfig {
    /// Load from `path`, or from [`DEFAULT_CONFIG_PATH`] when present.
    ///
    /// An explicit path must exist; a missing default file yields defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let path = Path::new(DEFAULT_CONFIG_PATH);
                if path.exists() {
                    Self::from_file(path)
                } else {
                    debug!(path = DEFAULT_CONFIG_PATH, "No config file, using defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = Self::parse(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        info!(
            path = %path.display(),
            region = %config.region.name,
            custom_profiles = config.profiles.len(),
            "Configuration loaded"
        );
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse config TOML")?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.region.name.trim().is_empty() {
            bail!("region.name must not be empty");
        }
        self.timezone()?;
        if self.server.bind_address.trim().is_empty() {
            bail!("server.bind_address must be set");
        }
        self.build_registry()?;
        Ok(())
    }

    pub fn timezone(&self) -> Result<Tz> {
        self.region
            .timezone
            .parse::<Tz>()
            .map_err(|e| anyhow::anyhow!("region.timezone '{}': {e}", self.region.timezone))
    }

    /// Presets plus every `[profiles.<id>]` entry
    pub fn build_registry(&self) -> Result<ProfileRegistry> {
        let mut registry = ProfileRegistry::with_presets();
        for (id, custom) in &self.profiles {
            registry
                .register(id, custom.description.clone(), custom.profile)
                .with_context(|| format!("Invalid profile [profiles.{id}]"))?;
        }
        Ok(registry)
    }

    pub fn region(&self) -> Result<RegionInfo> {
        Ok(RegionInfo {
            name: self.region.name.clone(),
            timezone: self.timezone()?,
        })
    }

    pub fn api_state(&self) -> Result<ApiState> {
        Ok(ApiState {
            registry: Arc::new(self.build_registry()?),
            region: self.region()?,
            default_range: self.generation.default_range,
            default_provider: self.generation.default_provider,
        })
    }

    pub fn example_toml() -> &'static str {
        EXAMPLE_CONFIG
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = CarbonConfig::parse("").unwrap();
        assert_eq!(config.region.name, "default");
        assert_eq!(config.timezone().unwrap(), Tz::UTC);
        assert_eq!(config.generation.default_range, DateRange::Last24Hours);
        assert_eq!(config.generation.default_provider, Provider::Mock);
        assert_eq!(config.server.bind_address, "127.0.0.1");
        assert_eq!(config.server.port, 8110);
        assert!(config.profiles.is_empty());
    }

    #[test]
    fn test_example_config_is_valid() {
        let config = CarbonConfig::parse(CarbonConfig::example_toml()).unwrap();
        assert_eq!(config.region.name, "CZ");
        assert_eq!(config.timezone().unwrap(), chrono_tz::Europe::Prague);

        let registry = config.build_registry().unwrap();
        let profile = registry.get("windy_winter").unwrap();
        assert!((profile.wind.base - 0.45).abs() < 1e-12);
        assert!((profile.solar.max - 0.08).abs() < 1e-12);
        let scaling = profile.scaling.unwrap();
        assert!((scaling.coal - 0.5).abs() < 1e-12);
        assert!((scaling.wind - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_partial_profile_defaults_to_mock() {
        let config = CarbonConfig::parse(
            r#"
[profiles.my_profile]
biomass = 0.07

[profiles.my_profile.wind]
base = 0.45
"#,
        )
        .unwrap();

        let registry = config.build_registry().unwrap();
        let profile = registry.get("my_profile").unwrap();
        assert!((profile.biomass - 0.07).abs() < 1e-12);
        assert!((profile.wind.base - 0.45).abs() < 1e-12);
        assert_eq!(profile.wind.amplitude, fluxion_carbon::MOCK_PROFILE.wind.amplitude);
        assert_eq!(profile.gas, fluxion_carbon::MOCK_PROFILE.gas);
        assert!(profile.scaling.is_none());
    }

    #[test]
    fn test_generation_defaults_parse_ids() {
        let config = CarbonConfig::parse(
            r#"
[generation]
default_range = "7d"
default_provider = "realtime"
"#,
        )
        .unwrap();
        let state = config.api_state().unwrap();
        assert_eq!(state.default_range, DateRange::Last7Days);
        assert_eq!(state.default_provider, Provider::Realtime);
    }

    #[test]
    fn test_rejects_unknown_range() {
        let result = CarbonConfig::parse("[generation]\ndefault_range = \"30d\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_bad_timezone() {
        let err = CarbonConfig::parse("[region]\ntimezone = \"Mars/Olympus\"\n").unwrap_err();
        assert!(format!("{err:#}").contains("region.timezone"), "{err:#}");
    }

    #[test]
    fn test_rejects_preset_shadowing() {
        let err = CarbonConfig::parse("[profiles.mock]\nbiomass = 0.1\n").unwrap_err();
        assert!(format!("{err:#}").contains("built-in"), "{err:#}");
    }

    #[test]
    fn test_rejects_invalid_custom_profile() {
        let err = CarbonConfig::parse(
            r#"
[profiles.broken.wind]
min = 0.9
max = 0.1
"#,
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("profiles.broken"), "{err:#}");
    }

    #[test]
    fn test_rejects_ripple_larger_than_base() {
        let err = CarbonConfig::parse(
            r#"
[profiles.spiky_hydro.hydro]
base = 0.01
ripple = 0.2
"#,
        )
        .unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("profiles.spiky_hydro"), "{message}");
        assert!(message.contains("hydro.ripple"), "{message}");
    }

    #[test]
    fn test_load_from_file() {
        let file = write_config("[region]\nname = \"GB\"\ntimezone = \"Europe/London\"\n");
        let config = CarbonConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.region.name, "GB");
        assert_eq!(config.region().unwrap().timezone, chrono_tz::Europe::London);
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(CarbonConfig::load(Some(&missing)).is_err());
    }
}
