//! Catalog provider port
//!
//! Search and browse access to the music catalog. Every call returns an ordered list (possibly
//! empty) or a [`CatalogError`]; there is no "no answer" case.

use async_trait::async_trait;
use thiserror::Error;

use crate::catalog::{CatalogItem, ItemKind};

/// Port for catalog search and browse operations
#[cfg_attr(any(test, feature = "with_mocks"), mockall::automock)]
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Search tracks matching free text, best match first
    async fn search_tracks(&self, query: &str) -> Result<Vec<CatalogItem>, CatalogError>;

    /// Search albums matching free text, best match first
    async fn search_albums(&self, query: &str) -> Result<Vec<CatalogItem>, CatalogError>;

    /// Search artists matching free text, best match first
    async fn search_artists(&self, query: &str) -> Result<Vec<CatalogItem>, CatalogError>;

    /// Search public playlists matching free text, best match first
    async fn search_playlists(&self, query: &str) -> Result<Vec<CatalogItem>, CatalogError>;

    /// An artist's most popular tracks, most popular first
    ///
    /// # Arguments
    ///
    /// * `artist_id` - Provider id of the artist (not its URI)
    async fn top_tracks(&self, artist_id: &str) -> Result<Vec<CatalogItem>, CatalogError>;

    /// Tracks of an album in album order
    ///
    /// # Arguments
    ///
    /// * `album_href` - The album's resolvable href, as carried by [`crate::catalog::Album`]
    async fn album_tracks(&self, album_href: &str) -> Result<Vec<CatalogItem>, CatalogError>;

    /// Playlists the provider is currently featuring
    async fn featured_playlists(&self) -> Result<Vec<CatalogItem>, CatalogError>;
}

/// Run the search matching `kind`
pub async fn search<C>(
    catalog: &C,
    kind: ItemKind,
    query: &str,
) -> Result<Vec<CatalogItem>, CatalogError>
where
    C: CatalogProvider + ?Sized,
{
    match kind {
        ItemKind::Track => catalog.search_tracks(query).await,
        ItemKind::Album => catalog.search_albums(query).await,
        ItemKind::Artist => catalog.search_artists(query).await,
        ItemKind::Playlist => catalog.search_playlists(query).await,
    }
}

/// Errors from the catalog provider
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Fetching or refreshing the access token failed
    #[error("Catalog authentication failed: {0}")]
    Auth(String),

    /// The request could not be sent or the connection failed
    #[error("Catalog request to `{endpoint}` failed: {message}")]
    Request { endpoint: String, message: String },

    /// The provider answered with a non-success status
    #[error("Catalog returned status {status} for `{endpoint}`")]
    Status { endpoint: String, status: u16 },

    /// The response body could not be decoded
    #[error("Unexpected catalog response from `{endpoint}`: {message}")]
    Decode { endpoint: String, message: String },
}
