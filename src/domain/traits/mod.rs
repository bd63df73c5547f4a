//! Domain traits

mod store;

pub use store::{KvBackend, Lookup};
