//! Concrete implementations of the [`crate::ports`] traits

pub mod filesystem;
pub mod sonos;
pub mod spotify;
