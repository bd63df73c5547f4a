//! Transport adapters

pub mod console;
