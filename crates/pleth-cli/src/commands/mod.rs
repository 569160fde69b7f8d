//! CLI command implementations.

pub mod common;
pub mod config;
pub mod cycles;
pub mod pauses;
pub mod score;
pub mod summary;
pub mod timing;
