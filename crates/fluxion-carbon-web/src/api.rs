// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of FluxION.

//! Generation API endpoints.

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use fluxion_carbon::{
    DateRange, MixError, ProfileInfo, ProfileRegistry, Provider, ProviderRequest, summarize,
};
use fluxion_carbon_types::{GenerationOutput, SeriesSummary};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

/// Grid region the series are generated for
#[derive(Debug, Clone, PartialEq)]
pub struct RegionInfo {
    pub name: String,
    pub timezone: Tz,
}

impl Default for RegionInfo {
    fn default() -> Self {
        Self {
            name: "default".to_owned(),
            timezone: Tz::UTC,
        }
    }
}

/// Shared, read-only state for API handlers
#[derive(Debug, Clone)]
pub struct ApiState {
    pub registry: Arc<ProfileRegistry>,
    pub region: RegionInfo,
    pub default_range: DateRange,
    pub default_provider: Provider,
}

impl ApiState {
    pub fn new(registry: ProfileRegistry, region: RegionInfo) -> Self {
        Self {
            registry: Arc::new(registry),
            region,
            default_range: DateRange::default(),
            default_provider: Provider::default(),
        }
    }
}

impl Default for ApiState {
    fn default() -> Self {
        Self::new(ProfileRegistry::with_presets(), RegionInfo::default())
    }
}

// ============= Errors =============

/// Error response: status code plus `{"error": "..."}` body
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl From<MixError> for ApiError {
    fn from(err: MixError) -> Self {
        let status = match &err {
            MixError::UnsupportedProvider { .. } => StatusCode::NOT_IMPLEMENTED,
            MixError::UnknownProfile(_) | MixError::InvalidProfile(_) | MixError::Parse(_) => {
                StatusCode::BAD_REQUEST
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(serde_json::json!({
                "error": self.message
            })),
        )
            .into_response()
    }
}

// ============= Request/Response Types =============

/// Query string for `GET /api/generation`
#[derive(Debug, Default, Deserialize)]
pub struct GenerationQuery {
    /// `24h`, `48h` or `7d` (defaults to the configured range)
    pub range: Option<String>,
    /// `mock`, `realtime` or `grid_operator` (defaults to the configured provider)
    pub provider: Option<String>,
    /// Profile id overriding the provider's profile
    pub profile: Option<String>,
    /// Return 501 instead of falling back for unimplemented providers
    #[serde(default)]
    pub strict: bool,
    /// Reference instant (RFC 3339); defaults to now
    pub now: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerationResponse {
    pub requested_provider: Provider,
    pub provider: Provider,
    pub profile: String,
    pub range: DateRange,
    pub region: String,
    pub generated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub output: GenerationOutput,
    pub summary: Option<SeriesSummary>,
}

#[derive(Debug, Serialize)]
pub struct ProfilesResponse {
    pub profiles: Vec<ProfileInfo>,
    pub providers: Vec<ProviderInfo>,
}

#[derive(Debug, Serialize)]
pub struct ProviderInfo {
    pub id: &'static str,
    pub profile: Option<&'static str>,
    pub implemented: bool,
}

// ============= API Handlers =============

/// GET /api/health
pub async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

/// GET /api/profiles
/// Lists registered profiles and providers
pub async fn profiles_handler(State(state): State<ApiState>) -> impl IntoResponse {
    let providers = Provider::ALL
        .into_iter()
        .map(|provider| ProviderInfo {
            id: provider.id(),
            profile: provider.profile_id(),
            implemented: provider.is_implemented(),
        })
        .collect();

    Json(ProfilesResponse {
        profiles: state.registry.list(),
        providers,
    })
}

/// GET /api/generation
/// Generates mix and intensity series for the requested range and provider
pub async fn generation_handler(
    State(state): State<ApiState>,
    Query(query): Query<GenerationQuery>,
) -> Result<Json<GenerationResponse>, ApiError> {
    let range = match query.range.as_deref() {
        Some(id) => id.parse::<DateRange>().map_err(MixError::from)?,
        None => state.default_range,
    };
    let provider = match query.provider.as_deref() {
        Some(id) => id.parse::<Provider>().map_err(MixError::from)?,
        None => state.default_provider,
    };
    if query.profile.as_deref().is_some_and(|id| id.trim().is_empty()) {
        return Err(ApiError::bad_request("profile must not be empty"));
    }

    let now = query.now.unwrap_or_else(Utc::now);
    let request = ProviderRequest {
        profile: query.profile,
        strict: query.strict,
        timezone: state.region.timezone,
        ..ProviderRequest::new(provider, range, now)
    };

    let generation = request.run(&state.registry).inspect_err(|e| {
        warn!(error = %e, %provider, %range, "Generation request rejected");
    })?;

    debug!(
        requested = %generation.requested,
        served = %generation.provider,
        profile = %generation.profile_id,
        samples = generation.output.len(),
        "Served generation request"
    );

    let summary = summarize(&generation.output);
    Ok(Json(GenerationResponse {
        requested_provider: generation.requested,
        provider: generation.provider,
        profile: generation.profile_id,
        range,
        region: state.region.name.clone(),
        generated_at: now,
        output: generation.output,
        summary,
    }))
}
