//! Domain layer - entities and storage traits

pub mod entities;
pub mod traits;
