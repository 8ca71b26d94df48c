// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of FluxION.

//! Data providers.
//!
//! Every implemented provider is synthetic and maps onto a profile preset.
//! `GridOperator` stands in for a live grid-operator feed and always fails
//! with [`MixError::UnsupportedProvider`].

use crate::error::{MixError, Result};
use crate::profile::{GeneratorProfile, ProfileRegistry};
use fluxion_carbon_types::ParseIdError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provider {
    /// Demo generator (profile `mock`)
    #[default]
    Mock,
    /// "Real-time" generator, synthetic with its own tuning (profile `realistic`)
    Realtime,
    /// Live grid-operator feed, not implemented
    GridOperator,
}

impl Provider {
    pub const ALL: [Provider; 3] = [Self::Mock, Self::Realtime, Self::GridOperator];

    pub fn id(self) -> &'static str {
        match self {
            Self::Mock => "mock",
            Self::Realtime => "realtime",
            Self::GridOperator => "grid_operator",
        }
    }

    /// Profile preset backing this provider, `None` for the stub
    pub fn profile_id(self) -> Option<&'static str> {
        match self {
            Self::Mock => Some("mock"),
            Self::Realtime => Some("realistic"),
            Self::GridOperator => None,
        }
    }

    pub fn is_implemented(self) -> bool {
        self.profile_id().is_some()
    }

    /// Look up the provider's profile. Fails immediately for the stub.
    pub fn resolve_profile(
        self,
        registry: &ProfileRegistry,
    ) -> Result<(&'static str, GeneratorProfile)> {
        let id = self
            .profile_id()
            .ok_or(MixError::UnsupportedProvider { provider: self })?;
        Ok((id, *registry.get(id)?))
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Provider {
    type Err = ParseIdError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mock" => Ok(Self::Mock),
            "realtime" | "real_time" | "real-time" => Ok(Self::Realtime),
            "grid_operator" | "grid-operator" | "operator" => Ok(Self::GridOperator),
            _ => Err(ParseIdError {
                kind: "provider",
                value: s.to_owned(),
                expected: "mock, realtime, grid_operator",
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{MOCK_PROFILE, REALISTIC_PROFILE};

    #[test]
    fn test_implemented_providers_resolve_to_presets() {
        let registry = ProfileRegistry::with_presets();
        assert_eq!(
            Provider::Mock.resolve_profile(&registry),
            Ok(("mock", MOCK_PROFILE))
        );
        assert_eq!(
            Provider::Realtime.resolve_profile(&registry),
            Ok(("realistic", REALISTIC_PROFILE))
        );
    }

    #[test]
    fn test_stub_provider_fails() {
        let registry = ProfileRegistry::with_presets();
        let err = Provider::GridOperator.resolve_profile(&registry).unwrap_err();
        assert_eq!(
            err,
            MixError::UnsupportedProvider {
                provider: Provider::GridOperator
            }
        );
        assert_eq!(err.to_string(), "provider 'grid_operator' is not implemented");
        assert!(!Provider::GridOperator.is_implemented());
    }

    #[test]
    fn test_parse_provider_ids() {
        for provider in Provider::ALL {
            assert_eq!(provider.id().parse::<Provider>(), Ok(provider));
        }
        assert_eq!("Real-Time".parse::<Provider>(), Ok(Provider::Realtime));
        assert!("entsoe".parse::<Provider>().is_err());
    }
}
