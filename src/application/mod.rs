//! Application layer - message processing services

pub mod errors;
pub mod services;
