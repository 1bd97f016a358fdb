pub mod entities;
pub mod media;

pub use entities::{EntityStore, Keyed};
pub use media::{MediaCache, MediaResolver};
