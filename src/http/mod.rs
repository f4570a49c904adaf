//! HTTP surface for the recognition service, available with the `http` feature.
//!
//! This module exposes the Axum router that accepts raw frame JSON, runs
//! recognition + translation, and reports health and telemetry.

#[cfg(feature = "http")]
mod routes;

#[cfg(feature = "http")]
pub use routes::{build_router, run_http_server, HttpServerError, HttpState, TranslateRequest};

use std::net::SocketAddr;

use crate::config::ServerConfig;

/// Environment variable overriding the configured bind address
pub const HTTP_ADDR_ENV: &str = "GLOSS_HTTP_ADDR";

const FALLBACK_ADDR: ([u8; 4], u16) = ([0, 0, 0, 0], 5000);

/// Resolve the socket address to bind: env override, then config, then 0.0.0.0:5000
pub fn resolve_bind_addr(config: &ServerConfig) -> SocketAddr {
    let raw = std::env::var(HTTP_ADDR_ENV).unwrap_or_else(|_| config.bind_addr.clone());
    parse_bind_addr(&raw)
}

fn parse_bind_addr(raw: &str) -> SocketAddr {
    raw.parse().unwrap_or_else(|err| {
        log::warn!(
            "[Http] Invalid bind address {:?} ({}), using {:?}",
            raw,
            err,
            FALLBACK_ADDR
        );
        SocketAddr::from(FALLBACK_ADDR)
    })
}
