pub mod loader;
pub mod validate;

use std::{
    num::{NonZeroU32, NonZeroU64, NonZeroUsize},
    time::Duration,
};

use serde::Deserialize;

const GONG_LIMIT_DEFAULT: usize = 3;
const SEARCH_LIMIT_DEFAULT: usize = 20;
const QUEUE_LISTING_SIZE_DEFAULT: u32 = 10;
const REQUEST_TIMEOUT_DEFAULT: u64 = 10;
const SPOTIFY_REGION_DEFAULT: &str = "US";
const SONOS_SERVICE_REGION_DEFAULT: &str = "2311";

/// Application configuration, read from the config file and adjusted by CLI args
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    // Chat settings
    pub(crate) standard_channel: String,
    pub(crate) admin_channel: String,

    // Command settings
    #[serde(default = "default_gong_limit")]
    pub(crate) gong_limit: NonZeroUsize,

    #[serde(default = "default_search_limit")]
    pub(crate) search_limit: NonZeroUsize,

    #[serde(default = "default_queue_listing_size")]
    pub(crate) queue_listing_size: NonZeroU32,

    // Collaborators
    #[serde(default = "default_request_timeout")]
    pub(crate) request_timeout: NonZeroU64,

    pub(crate) spotify: SpotifyConfig,

    pub(crate) sonos: SonosConfig,
}

/// Credentials and market for the Spotify Web API
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct SpotifyConfig {
    pub(crate) client_id: String,
    pub(crate) client_secret: String,

    #[serde(default = "default_spotify_region")]
    pub(crate) region: String,
}

/// Where to find the speaker
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct SonosConfig {
    /// `host` or `host:port`; port 1400 is assumed when missing
    pub(crate) address: String,

    /// Sonos service account region used when building Spotify metadata
    #[serde(default = "default_sonos_service_region")]
    pub(crate) service_region: String,
}

fn default_gong_limit() -> NonZeroUsize {
    NonZeroUsize::new(GONG_LIMIT_DEFAULT).unwrap_or(NonZeroUsize::MIN)
}
fn default_search_limit() -> NonZeroUsize {
    NonZeroUsize::new(SEARCH_LIMIT_DEFAULT).unwrap_or(NonZeroUsize::MIN)
}
fn default_queue_listing_size() -> NonZeroU32 {
    NonZeroU32::new(QUEUE_LISTING_SIZE_DEFAULT).unwrap_or(NonZeroU32::MIN)
}
fn default_request_timeout() -> NonZeroU64 {
    NonZeroU64::new(REQUEST_TIMEOUT_DEFAULT).unwrap_or(NonZeroU64::MIN)
}
fn default_spotify_region() -> String {
    SPOTIFY_REGION_DEFAULT.to_string()
}
fn default_sonos_service_region() -> String {
    SONOS_SERVICE_REGION_DEFAULT.to_string()
}

/// Normalise a channel name as typed by a human: no leading `#`, lower case, no padding
#[must_use]
pub fn sanitize_channel(channel: &str) -> String {
    channel.trim().trim_start_matches('#').to_lowercase()
}

impl AppConfig {
    #[must_use]
    pub fn standard_channel(&self) -> &str {
        &self.standard_channel
    }

    #[must_use]
    pub fn admin_channel(&self) -> &str {
        &self.admin_channel
    }

    /// Whether messages from `channel` may run admin commands
    #[must_use]
    pub fn is_admin_channel(&self, channel: &str) -> bool {
        sanitize_channel(channel) == self.admin_channel
    }

    #[must_use]
    pub fn gong_limit(&self) -> NonZeroUsize {
        self.gong_limit
    }

    #[must_use]
    pub fn search_limit(&self) -> NonZeroUsize {
        self.search_limit
    }

    #[must_use]
    pub fn queue_listing_size(&self) -> NonZeroU32 {
        self.queue_listing_size
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout.into())
    }

    #[must_use]
    pub fn spotify(&self) -> &SpotifyConfig {
        &self.spotify
    }

    #[must_use]
    pub fn sonos(&self) -> &SonosConfig {
        &self.sonos
    }

    pub fn standard_channel_mut(&mut self) -> &mut String {
        &mut self.standard_channel
    }

    pub fn admin_channel_mut(&mut self) -> &mut String {
        &mut self.admin_channel
    }

    pub fn gong_limit_mut(&mut self) -> &mut NonZeroUsize {
        &mut self.gong_limit
    }

    /// Apply [`sanitize_channel`] to both channel names
    pub(crate) fn sanitize_channels(&mut self) {
        self.standard_channel = sanitize_channel(&self.standard_channel);
        self.admin_channel = sanitize_channel(&self.admin_channel);
    }
}

impl SpotifyConfig {
    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    #[must_use]
    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }

    #[must_use]
    pub fn region(&self) -> &str {
        &self.region
    }
}

impl SonosConfig {
    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    #[must_use]
    pub fn service_region(&self) -> &str {
        &self.service_region
    }
}

/// Builder pattern for `AppConfig` testing
///
#[derive(Default, Debug)]
pub struct AppConfigBuilder {
    standard_channel: String,
    admin_channel: String,
    gong_limit: Option<NonZeroUsize>,
    search_limit: Option<NonZeroUsize>,
    queue_listing_size: Option<NonZeroU32>,
    request_timeout: Option<NonZeroU64>,
    spotify_client_id: String,
    spotify_client_secret: String,
    spotify_region: Option<String>,
    sonos_address: String,
    sonos_service_region: Option<String>,
}

impl AppConfigBuilder {
    #[must_use]
    pub fn standard_channel(mut self, channel: &str) -> Self {
        self.standard_channel = channel.to_string();
        self
    }

    #[must_use]
    pub fn admin_channel(mut self, channel: &str) -> Self {
        self.admin_channel = channel.to_string();
        self
    }

    #[must_use]
    pub fn gong_limit_unchecked(mut self, limit: usize) -> Self {
        self.gong_limit = Some(NonZeroUsize::new(limit).unwrap());
        self
    }

    #[must_use]
    pub fn search_limit_unchecked(mut self, limit: usize) -> Self {
        self.search_limit = Some(NonZeroUsize::new(limit).unwrap());
        self
    }

    #[must_use]
    pub fn queue_listing_size_unchecked(mut self, size: u32) -> Self {
        self.queue_listing_size = Some(NonZeroU32::new(size).unwrap());
        self
    }

    #[must_use]
    pub fn request_timeout_unchecked(mut self, timeout: u64) -> Self {
        self.request_timeout = Some(NonZeroU64::new(timeout).unwrap());
        self
    }

    #[must_use]
    pub fn spotify_credentials(mut self, client_id: &str, client_secret: &str) -> Self {
        self.spotify_client_id = client_id.to_string();
        self.spotify_client_secret = client_secret.to_string();
        self
    }

    #[must_use]
    pub fn spotify_region(mut self, region: &str) -> Self {
        self.spotify_region = Some(region.to_string());
        self
    }

    #[must_use]
    pub fn sonos_address(mut self, address: &str) -> Self {
        self.sonos_address = address.to_string();
        self
    }

    #[must_use]
    pub fn sonos_service_region(mut self, region: &str) -> Self {
        self.sonos_service_region = Some(region.to_string());
        self
    }

    #[must_use]
    pub fn build(self) -> AppConfig {
        let mut config = AppConfig {
            standard_channel: self.standard_channel,
            admin_channel: self.admin_channel,
            gong_limit: self.gong_limit.unwrap_or(default_gong_limit()),
            search_limit: self.search_limit.unwrap_or(default_search_limit()),
            queue_listing_size: self
                .queue_listing_size
                .unwrap_or(default_queue_listing_size()),
            request_timeout: self.request_timeout.unwrap_or(default_request_timeout()),
            spotify: SpotifyConfig {
                client_id: self.spotify_client_id,
                client_secret: self.spotify_client_secret,
                region: self.spotify_region.unwrap_or_else(default_spotify_region),
            },
            sonos: SonosConfig {
                address: self.sonos_address,
                service_region: self
                    .sonos_service_region
                    .unwrap_or_else(default_sonos_service_region),
            },
        };
        config.sanitize_channels();
        config
    }
}
