// SPDX-FileCopyrightText: 2026 Revlens Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Cross-origin headers for browser clients.
//!
//! The same four headers go on every response, errors and pre-flight answers
//! included. Credentials are not allowed: browsers reject
//! `Allow-Credentials: true` alongside a wildcard origin.

use axum::{
    extract::Request,
    http::{HeaderMap, HeaderValue, header},
    middleware::Next,
    response::Response,
};

pub const ALLOW_ORIGIN: &str = "*";
pub const ALLOW_METHODS: &str = "POST, GET, OPTIONS, DELETE, PUT";
pub const ALLOW_HEADERS: &str = "Origin, Content-Type, Accept, Authorization";
/// Twenty days, in seconds.
pub const MAX_AGE: &str = "1728000";

/// Middleware that stamps the CORS headers onto the response.
pub async fn cors_middleware(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    apply_cors_headers(response.headers_mut());
    response
}

/// Insert the CORS headers, replacing any set by a handler.
pub fn apply_cors_headers(headers: &mut HeaderMap) {
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static(ALLOW_ORIGIN),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOW_METHODS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOW_HEADERS),
    );
    headers.insert(
        header::ACCESS_CONTROL_MAX_AGE,
        HeaderValue::from_static(MAX_AGE),
    );
}
