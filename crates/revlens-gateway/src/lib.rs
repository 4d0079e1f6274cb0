// SPDX-FileCopyrightText: 2026 Revlens Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP boundary for the Revlens review API.
//!
//! Decodes request bodies, delegates to the [`revlens_analyzer::ReviewAnalyzer`],
//! maps errors to status codes, and attaches CORS headers to every response.
//! No business logic lives here.

pub mod cors;
pub mod error;
pub mod handlers;
pub mod server;

pub use error::{ApiError, ErrorResponse};
pub use server::{GatewayState, ServerConfig, build_router, start_server};
