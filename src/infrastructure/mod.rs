//! Infrastructure layer - config, persistence and adapters

pub mod adapters;
pub mod config;
pub mod store;
