//! Ports (Hexagonal Architecture)
//!
//! The command core talks to the outside world only through these traits. Concrete adapters
//! live in [`crate::adapters`]; tests substitute mocks or the in-memory fakes from the
//! `test-common` crate.

pub mod catalog;
pub mod device;
pub mod filesystem;
pub mod transport;

pub use catalog::{CatalogError, CatalogProvider};
pub use device::{DeviceError, NowPlaying, PlaybackDevice, PlaybackState, QueueEntry, QueuePage};
pub use filesystem::{FileSystem, FileSystemError};
pub use transport::{ChatTransport, InboundMessage, TransportError};
