//! Catalog domain types
//!
//! Everything the catalog provider hands back to the core is a [`CatalogItem`]. Each variant
//! carries only what the formatter and the orchestrator need; provider wire formats are mapped
//! into these types by the adapters.

use std::fmt;

/// The variant tag of a [`CatalogItem`]
///
/// A result set only ever holds items of a single kind, and the selector only matches against a
/// result set whose kind agrees with the command being run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Track,
    Album,
    Artist,
    Playlist,
}

impl ItemKind {
    /// Plural noun used in search replies, e.g. "I found the following albums"
    #[must_use]
    pub fn plural(self) -> &'static str {
        match self {
            Self::Track => "tracks",
            Self::Album => "albums",
            Self::Artist => "artists",
            Self::Playlist => "playlists",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Track => f.write_str("track"),
            Self::Album => f.write_str("album"),
            Self::Artist => f.write_str("artist"),
            Self::Playlist => f.write_str("playlist"),
        }
    }
}

/// A single artwork image. Providers return these largest-first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl Image {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            width: None,
            height: None,
        }
    }
}

/// Summary of the album a track belongs to
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AlbumSummary {
    pub name: String,
    pub release_year: Option<String>,
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub uri: String,
    pub name: String,
    pub artists: Vec<String>,
    pub duration_ms: u64,
    pub explicit: bool,
    pub album: AlbumSummary,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Album {
    pub uri: String,
    pub name: String,
    pub artists: Vec<String>,
    pub release_year: Option<String>,
    pub images: Vec<Image>,
    /// Provider reference used to fetch the album's track list
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artist {
    pub uri: String,
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playlist {
    pub uri: String,
    pub name: String,
    pub track_count: u32,
}

/// Anything the catalog can return and a result set can hold
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogItem {
    Track(Track),
    Album(Album),
    Artist(Artist),
    Playlist(Playlist),
}

impl CatalogItem {
    #[must_use]
    pub fn kind(&self) -> ItemKind {
        match self {
            Self::Track(_) => ItemKind::Track,
            Self::Album(_) => ItemKind::Album,
            Self::Artist(_) => ItemKind::Artist,
            Self::Playlist(_) => ItemKind::Playlist,
        }
    }

    #[must_use]
    pub fn uri(&self) -> &str {
        match self {
            Self::Track(t) => &t.uri,
            Self::Album(a) => &a.uri,
            Self::Artist(a) => &a.uri,
            Self::Playlist(p) => &p.uri,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Track(t) => &t.name,
            Self::Album(a) => &a.name,
            Self::Artist(a) => &a.name,
            Self::Playlist(p) => &p.name,
        }
    }

    /// Contributing artist names, in provider order. Empty for artists and playlists.
    #[must_use]
    pub fn artists(&self) -> &[String] {
        match self {
            Self::Track(t) => &t.artists,
            Self::Album(a) => &a.artists,
            Self::Artist(_) | Self::Playlist(_) => &[],
        }
    }

    /// Artwork to attach to a rich reply: the second image (a medium thumbnail) when there is
    /// more than one, otherwise the only one.
    #[must_use]
    pub fn thumbnail(&self) -> Option<&Image> {
        let images = match self {
            Self::Track(t) => &t.album.images,
            Self::Album(a) => &a.images,
            Self::Artist(_) | Self::Playlist(_) => return None,
        };

        images.get(1).or_else(|| images.first())
    }
}

impl From<Track> for CatalogItem {
    fn from(value: Track) -> Self {
        Self::Track(value)
    }
}

impl From<Album> for CatalogItem {
    fn from(value: Album) -> Self {
        Self::Album(value)
    }
}

impl From<Artist> for CatalogItem {
    fn from(value: Artist) -> Self {
        Self::Artist(value)
    }
}

impl From<Playlist> for CatalogItem {
    fn from(value: Playlist) -> Self {
        Self::Playlist(value)
    }
}
