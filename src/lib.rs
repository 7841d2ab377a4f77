//! Library crate for live-quiz-back, exposing modules for binaries and integration tests.

/// Runtime configuration.
pub mod config;
/// Store boundary and its backends.
pub mod dao;
/// Wire payloads of the REST routes.
pub mod dto;
/// Error taxonomy and HTTP mapping.
pub mod error;
/// Axum routers.
pub mod routes;
/// Request-level orchestration.
pub mod services;
/// Quiz lifecycle, leaderboard and shared application state.
pub mod state;
