//! Jukebox - A chat-driven remote for a networked speaker
//!
//! The `jukebox` library turns short chat commands (`search`, `add`, `gong`, `playlist`, ...)
//! into music catalog searches and speaker control. It implements a hexagonal architecture
//! with ports and adapters so the command core can be driven by any chat transport and tested
//! without a network.
//!
//! # Architecture
//!
//! The command core only talks to the outside world through the traits in [`ports`]: a
//! [`ports::CatalogProvider`] for searching and browsing music, a [`ports::PlaybackDevice`]
//! for the speaker, and a [`ports::ChatTransport`] for replies. [`adapters`] holds the
//! concrete Spotify and Sonos implementations.
//!
//! # Main Components
//!
//! - [`command`] - Command table, dispatcher and handlers
//! - [`selector`] - Resolves letter codes and free text to catalog items
//! - [`session`] - Per-channel result sets and gong votes
//! - [`format`] - Chat rendering of catalog items
//! - [`config`] - Application configuration management
//! - [`validation`] - Validation types and utilities
//!
//! # Examples
//!
//! ```no_run
//! use jukebox::adapters::{sonos::SonosDevice, spotify::SpotifyCatalog};
//! use jukebox::command::{Dispatcher, Jukebox};
//! use jukebox::config::AppConfigBuilder;
//! use jukebox::ports::InboundMessage;
//! # async fn run(transport: impl jukebox::ports::ChatTransport) -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfigBuilder::default()
//!     .standard_channel("music")
//!     .admin_channel("music-admin")
//!     .spotify_credentials("id", "secret")
//!     .sonos_address("192.168.1.20:1400")
//!     .build();
//!
//! let catalog = SpotifyCatalog::new(&config)?;
//! let device = SonosDevice::new(&config)?;
//! let dispatcher = Dispatcher::new(Jukebox::new(catalog, device, config), transport);
//!
//! dispatcher
//!     .handle_message(&InboundMessage::new("search closer", "U123", "music"))
//!     .await;
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod catalog;
pub mod command;
pub mod config;
pub mod format;
pub mod gong;
pub mod ports;
pub mod selector;
pub mod session;
pub mod validation;
