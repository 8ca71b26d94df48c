// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of FluxION.
//
// Licensed under the Creative Commons Attribution-NonCommercial-NoDerivatives 4.0 International
// (CC BY-NC-ND 4.0). You may use and share this file for non-commercial purposes only and you may not
// create derivatives. See <https://creativecommons.org/licenses/by-nc-nd/4.0/>.
//
// This software is provided "AS IS", without warranty of any kind.
//
// For commercial licensing, please contact: info@solare.cz

//! HTTP API serving synthetic carbon intensity series.
//!
//! Every request is an independent generation pass; nothing is kept
//! between requests.

pub mod api;

use axum::Router;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tracing::info;

pub use api::{ApiError, ApiState, GenerationQuery, GenerationResponse, RegionInfo};

/// Build the API router
pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/api/health", get(api::health_handler))
        .route("/api/profiles", get(api::profiles_handler))
        .route("/api/generation", get(api::generation_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind `addr` and serve until the process exits
pub async fn serve(addr: &str, state: ApiState) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(
        addr = %listener.local_addr()?,
        region = %state.region.name,
        profiles = state.registry.list().len(),
        "Carbon intensity API listening"
    );
    axum::serve(listener, router(state)).await
}
