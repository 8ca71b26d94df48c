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

//! Error types for the carbon mix crate

use crate::provider::Provider;
use fluxion_carbon_types::ParseIdError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MixError {
    #[error("provider '{provider}' is not implemented")]
    UnsupportedProvider { provider: Provider },

    #[error("unknown profile: {0}")]
    UnknownProfile(String),

    #[error("invalid profile: {0}")]
    InvalidProfile(String),

    #[error(transparent)]
    Parse(#[from] ParseIdError),
}

pub type Result<T> = std::result::Result<T, MixError>;
