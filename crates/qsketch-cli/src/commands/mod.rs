//! CLI command implementations.

pub mod classify;
pub mod common;
pub mod health;
pub mod render;
pub mod status;
pub mod version;
pub mod wait;
