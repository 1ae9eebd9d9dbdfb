//! Planboard HTTP Server - admin and advisor API
//!
//! This crate exposes the partner, data-partner and plan endpoints over HTTP,
//! together with bulk upload endpoints, health probes and Prometheus metrics.

pub mod api;
pub mod config;
pub mod error;
pub mod form;
pub mod handlers;
pub mod metrics;
pub mod routes;
pub mod server;
pub mod state;
pub mod tracing;

pub use api::{HealthResponse, HealthStatus, MessageResponse};
pub use config::ServerConfig;
pub use error::{ApiError, ApiResult};
pub use state::AppState;
