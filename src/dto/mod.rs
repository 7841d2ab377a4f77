/// Health check payloads.
pub mod health;
pub mod player;
pub mod quiz;
