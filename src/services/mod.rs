/// OpenAPI documentation generation.
pub mod documentation;
/// Store health probe.
pub mod health_service;
/// Student join and answer handling.
pub mod player_service;
/// Host lifecycle actions and status reads.
pub mod quiz_service;
