// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of FluxION.

//! Generation entrypoint: generate, normalize, re-weight, compute intensity.

use crate::error::{MixError, Result};
use crate::generator::{RawSample, SeriesGenerator};
use crate::intensity::carbon_intensity;
use crate::normalize::{apply_scaling, normalize};
use crate::profile::{GeneratorProfile, ProfileRegistry};
use crate::provider::Provider;
use crate::range::resolve;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use fluxion_carbon_types::{CarbonIntensityPoint, DateRange, GenerationMixPoint, GenerationOutput};
use tracing::{debug, warn};

/// Everything a single generation pass depends on
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationRequest {
    pub range: DateRange,
    pub profile: GeneratorProfile,
    /// Reference instant; the window ends here
    pub now: DateTime<Utc>,
    /// Region timezone for hour-of-day shaping
    pub timezone: Tz,
}

impl GenerationRequest {
    /// Request with an explicit reference instant, hours taken in UTC
    pub fn new(range: DateRange, profile: GeneratorProfile, now: DateTime<Utc>) -> Self {
        Self {
            range,
            profile,
            now,
            timezone: Tz::UTC,
        }
    }

    /// Request anchored at the current wall-clock time
    pub fn now_for(range: DateRange, profile: GeneratorProfile) -> Self {
        Self::new(range, profile, Utc::now())
    }

    #[must_use]
    pub fn with_timezone(mut self, timezone: Tz) -> Self {
        self.timezone = timezone;
        self
    }
}

/// Unnormalized samples for a request
pub fn raw_samples(request: &GenerationRequest) -> Vec<RawSample> {
    SeriesGenerator::new(&request.profile).samples(
        resolve(request.range),
        request.now,
        request.timezone,
    )
}

/// Produce the mix and intensity series for a request.
///
/// Pure given the request: the same request always yields the same output.
pub fn generate(request: &GenerationRequest) -> GenerationOutput {
    let samples = raw_samples(request);
    let mut output = GenerationOutput {
        intensity_series: Vec::with_capacity(samples.len()),
        mix_series: Vec::with_capacity(samples.len()),
    };

    let mut max_drift: f64 = 0.0;
    for sample in samples {
        max_drift = max_drift.max((sample.mix.total() - 1.0).abs());

        let mut mix = normalize(&sample.mix);
        if let Some(weights) = &request.profile.scaling {
            mix = apply_scaling(&mix, weights);
        }

        output.intensity_series.push(CarbonIntensityPoint {
            timestamp: sample.timestamp,
            intensity: carbon_intensity(&mix),
        });
        output.mix_series.push(GenerationMixPoint {
            timestamp: sample.timestamp,
            mix,
        });
    }

    debug!(
        range = %request.range,
        samples = output.len(),
        timezone = %request.timezone,
        scaled = request.profile.scaling.is_some(),
        max_raw_drift = max_drift,
        "Generated carbon intensity series"
    );

    output
}

/// Output of a provider-driven generation pass
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderGeneration {
    /// Provider the caller asked for
    pub requested: Provider,
    /// Provider that actually produced the data
    pub provider: Provider,
    /// Profile id used
    pub profile_id: String,
    pub output: GenerationOutput,
}

impl ProviderGeneration {
    pub fn fell_back(&self) -> bool {
        self.requested != self.provider
    }
}

/// Generate with the provider's profile. Fails for unimplemented providers
/// before any sample is produced.
pub fn generate_for_provider(
    provider: Provider,
    range: DateRange,
    registry: &ProfileRegistry,
    now: DateTime<Utc>,
    timezone: Tz,
) -> Result<ProviderGeneration> {
    ProviderRequest {
        strict: true,
        timezone,
        ..ProviderRequest::new(provider, range, now)
    }
    .run(registry)
}

/// Like [`generate_for_provider`], but an unsupported provider falls back
/// to [`Provider::Mock`] for the same range.
pub fn generate_with_fallback(
    provider: Provider,
    range: DateRange,
    registry: &ProfileRegistry,
    now: DateTime<Utc>,
    timezone: Tz,
) -> Result<ProviderGeneration> {
    ProviderRequest {
        timezone,
        ..ProviderRequest::new(provider, range, now)
    }
    .run(registry)
}

/// Provider-driven request as issued by the API and CLI front-ends
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderRequest {
    pub provider: Provider,
    pub range: DateRange,
    /// Registry profile replacing the provider's own
    pub profile: Option<String>,
    /// Fail instead of falling back when the provider is not implemented
    pub strict: bool,
    pub now: DateTime<Utc>,
    pub timezone: Tz,
}

impl ProviderRequest {
    pub fn new(provider: Provider, range: DateRange, now: DateTime<Utc>) -> Self {
        Self {
            provider,
            range,
            profile: None,
            strict: false,
            now,
            timezone: Tz::UTC,
        }
    }

    /// Provider that will serve this request
    pub fn served_provider(&self) -> Result<Provider> {
        if self.provider.is_implemented() {
            Ok(self.provider)
        } else if self.strict {
            Err(MixError::UnsupportedProvider {
                provider: self.provider,
            })
        } else {
            warn!(
                provider = %self.provider,
                fallback = %Provider::Mock,
                "Provider not implemented, falling back"
            );
            Ok(Provider::Mock)
        }
    }

    pub fn run(&self, registry: &ProfileRegistry) -> Result<ProviderGeneration> {
        let served = self.served_provider()?;
        let (profile_id, profile) = match self.profile.as_deref() {
            Some(id) => (id.to_owned(), *registry.get(id)?),
            None => {
                let (id, profile) = served.resolve_profile(registry)?;
                (id.to_owned(), profile)
            }
        };

        let request =
            GenerationRequest::new(self.range, profile, self.now).with_timezone(self.timezone);
        Ok(ProviderGeneration {
            requested: self.provider,
            provider: served,
            profile_id,
            output: generate(&request),
        })
    }
}
