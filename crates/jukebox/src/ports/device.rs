//! Playback device port
//!
//! Control surface of the speaker the bot drives. Boolean results report whether the device
//! accepted the request; `Err` means the device could not be reached or answered nonsense.

use std::fmt;

use async_trait::async_trait;
use thiserror::Error;

use crate::catalog::CatalogItem;

/// Port for playback device operations
#[cfg_attr(any(test, feature = "with_mocks"), mockall::automock)]
#[async_trait]
pub trait PlaybackDevice: Send + Sync {
    /// The item the device is currently on, if any
    async fn current_track(&self) -> Result<Option<NowPlaying>, DeviceError>;

    /// Transport state (playing, paused, ...)
    async fn state(&self) -> Result<PlaybackState, DeviceError>;

    /// Insert `uri` into the queue directly after the current track
    async fn enqueue_after_current(&self, uri: &str) -> Result<bool, DeviceError>;

    /// Clear the queue, queue `uri` and start playing it
    async fn replace_queue_and_play(&self, uri: &str) -> Result<bool, DeviceError>;

    async fn play(&self) -> Result<bool, DeviceError>;

    async fn pause(&self) -> Result<bool, DeviceError>;

    async fn stop(&self) -> Result<bool, DeviceError>;

    async fn next(&self) -> Result<bool, DeviceError>;

    async fn previous(&self) -> Result<bool, DeviceError>;

    /// Reshuffle the queue
    async fn shuffle(&self) -> Result<bool, DeviceError>;

    /// Current volume, 0 to 100
    async fn volume(&self) -> Result<u8, DeviceError>;

    /// Set the volume; callers only pass values in 0 to 100
    async fn set_volume(&self, volume: u8) -> Result<bool, DeviceError>;

    /// A page of the play queue
    ///
    /// # Arguments
    ///
    /// * `start` - Zero-based index of the first entry to return
    /// * `count` - Maximum number of entries to return
    async fn list_queue(&self, start: u32, count: u32) -> Result<QueuePage, DeviceError>;

    /// Catalog playlists saved as favourites on the device
    async fn favorite_playlists(&self) -> Result<Vec<CatalogItem>, DeviceError>;
}

/// What the device reports as playing
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NowPlaying {
    pub uri: String,
    pub title: String,
    pub artist: String,
    pub position_secs: u64,
    pub duration_secs: u64,
    /// One-based position in the queue, 0 if unknown
    pub queue_position: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Playing,
    Paused,
    Stopped,
    Transitioning,
    NoMedia,
}

impl fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Playing => f.write_str("playing"),
            Self::Paused => f.write_str("paused"),
            Self::Stopped => f.write_str("stopped"),
            Self::Transitioning => f.write_str("transitioning"),
            Self::NoMedia => f.write_str("no_media"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueEntry {
    pub uri: String,
    pub artist: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueuePage {
    /// Total number of entries in the queue, not just this page
    pub total: u32,
    pub items: Vec<QueueEntry>,
}

/// Errors from the playback device
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeviceError {
    /// The device could not be reached
    #[error("Device request `{action}` failed: {message}")]
    Request { action: String, message: String },

    /// The device rejected the request with a fault
    #[error("Device fault for `{action}`: {message}")]
    Fault { action: String, message: String },

    /// The device answered but the response could not be understood
    #[error("Unexpected device response for `{action}`: {message}")]
    Decode { action: String, message: String },

    /// The URI is not something this device knows how to play
    #[error("Unsupported URI: {0}")]
    UnsupportedUri(String),
}
