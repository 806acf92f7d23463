//! Server-side wiring around the `skyfeed` library.
//!
//! ## Structure
//!
//! - [`config`] - CLI/env configuration.
//! - [`app`] - router assembly, health endpoint and request metrics.
//! - [`feeds`] - bundled feed algorithms.
//! - [`telemetry`] - logging and OpenTelemetry setup.

pub mod app;
pub mod config;
pub mod feeds;
pub mod telemetry;
