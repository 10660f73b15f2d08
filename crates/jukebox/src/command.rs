//! Chat commands
//!
//! [`table::CommandTable`] maps keywords to [`CommandKind`]s, [`service::Jukebox`] runs them
//! against the catalog and the device, and [`dispatcher::Dispatcher`] ties both to a chat
//! transport.

pub mod dispatcher;
pub mod error;
pub mod reply;
pub mod service;
pub mod table;

pub use dispatcher::Dispatcher;
pub use error::CommandError;
pub use reply::Reply;
pub use service::Jukebox;
pub use table::{CommandKind, CommandTable, Lookup, Tier};
