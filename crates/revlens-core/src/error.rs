// SPDX-FileCopyrightText: 2026 Revlens Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for Revlens.

use thiserror::Error;

/// The primary error type used across all Revlens adapter traits and core operations.
#[derive(Debug, Error)]
pub enum RevlensError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Client input was rejected before any collaborator or store call.
    #[error("{0}")]
    Validation(String),

    /// Storage backend errors (database connection, query failure, serialization).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A model collaborator was constructed without credentials.
    #[error("{collaborator} is not configured")]
    Unconfigured { collaborator: String },

    /// A model collaborator failed (transport, API status, undecodable output).
    #[error("{collaborator} error: {message}")]
    Collaborator {
        collaborator: String,
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl RevlensError {
    /// Build a [`RevlensError::Collaborator`] without an underlying source.
    pub fn collaborator(collaborator: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Collaborator {
            collaborator: collaborator.into(),
            message: message.into(),
            source: None,
        }
    }

    /// True for errors the caller caused (HTTP 4xx).
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
