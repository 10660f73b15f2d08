//! Spotify Web API catalog
//!
//! Uses the client-credentials flow, so only public catalog data is reachable. The access
//! token is cached for most of its advertised lifetime and refreshed lazily on the next call
//! after it lapses.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde::{Deserialize, de::DeserializeOwned};
use tokio::sync::Mutex;

use crate::{
    catalog::{Album, AlbumSummary, Artist, CatalogItem, Image, Playlist, Track},
    config::AppConfig,
    ports::{CatalogError, CatalogProvider},
};

const API_BASE: &str = "https://api.spotify.com/v1";
const TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

/// Share of the advertised token lifetime we rely on
const TOKEN_LIFETIME_FACTOR: f64 = 0.95;

struct CachedToken {
    access_token: String,
    expires_at: Instant,
}

/// [`CatalogProvider`] backed by the Spotify Web API
pub struct SpotifyCatalog {
    http: reqwest::Client,
    client_id: String,
    client_secret: String,
    region: String,
    search_limit: usize,
    token: Mutex<Option<CachedToken>>,
}

impl SpotifyCatalog {
    pub fn new(config: &AppConfig) -> Result<Self, CatalogError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| CatalogError::Request {
                endpoint: "client".to_string(),
                message: e.to_string(),
            })?;

        tracing::info!(region = config.spotify().region(), "catalog region");

        Ok(Self {
            http,
            client_id: config.spotify().client_id().to_string(),
            client_secret: config.spotify().client_secret().to_string(),
            region: config.spotify().region().to_string(),
            search_limit: config.search_limit().get(),
            token: Mutex::new(None),
        })
    }

    async fn access_token(&self) -> Result<String, CatalogError> {
        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref().filter(|t| Instant::now() < t.expires_at) {
            return Ok(token.access_token.clone());
        }

        tracing::debug!("requesting catalog access token");
        let response = self
            .http
            .post(TOKEN_URL)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(|e| CatalogError::Auth(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Auth(format!("token endpoint returned {status}")));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| CatalogError::Auth(e.to_string()))?;

        let access_token = token.access_token.clone();
        *cached = Some(CachedToken {
            access_token: token.access_token,
            expires_at: Instant::now() + token_lifetime(token.expires_in),
        });

        Ok(access_token)
    }

    async fn get_json<T>(
        &self,
        endpoint: &str,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T, CatalogError>
    where
        T: DeserializeOwned,
    {
        let token = self.access_token().await?;

        let response = self
            .http
            .get(url)
            .bearer_auth(token)
            .query(query)
            .send()
            .await
            .map_err(|e| CatalogError::Request {
                endpoint: endpoint.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            self.token.lock().await.take();
        }
        if !status.is_success() {
            tracing::warn!(endpoint, status = status.as_u16(), "catalog request rejected");
            return Err(CatalogError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            });
        }

        response.json().await.map_err(|e| CatalogError::Decode {
            endpoint: endpoint.to_string(),
            message: e.to_string(),
        })
    }

    async fn search_query(&self, kind: &str, query: &str) -> Result<SearchResponse, CatalogError> {
        let limit = self.search_limit.to_string();
        self.get_json(
            "search",
            &format!("{API_BASE}/search"),
            &[
                ("q", query),
                ("type", kind),
                ("market", self.region.as_str()),
                ("limit", limit.as_str()),
            ],
        )
        .await
    }
}

#[async_trait]
impl CatalogProvider for SpotifyCatalog {
    async fn search_tracks(&self, query: &str) -> Result<Vec<CatalogItem>, CatalogError> {
        let response = self.search_query("track", query).await?;
        Ok(map_tracks(response.tracks.unwrap_or_default().items, None))
    }

    async fn search_albums(&self, query: &str) -> Result<Vec<CatalogItem>, CatalogError> {
        let response = self.search_query("album", query).await?;
        Ok(response
            .albums
            .unwrap_or_default()
            .items
            .into_iter()
            .flatten()
            .map(|album| CatalogItem::from(album.into_album()))
            .collect())
    }

    async fn search_artists(&self, query: &str) -> Result<Vec<CatalogItem>, CatalogError> {
        let response = self.search_query("artist", query).await?;
        Ok(response
            .artists
            .unwrap_or_default()
            .items
            .into_iter()
            .flatten()
            .map(|artist| CatalogItem::from(Artist::from(artist)))
            .collect())
    }

    async fn search_playlists(&self, query: &str) -> Result<Vec<CatalogItem>, CatalogError> {
        let response = self.search_query("playlist", query).await?;
        Ok(map_playlists(response.playlists.unwrap_or_default()))
    }

    async fn top_tracks(&self, artist_id: &str) -> Result<Vec<CatalogItem>, CatalogError> {
        let response: TopTracksResponse = self
            .get_json(
                "top-tracks",
                &format!("{API_BASE}/artists/{artist_id}/top-tracks"),
                &[("country", self.region.as_str())],
            )
            .await?;
        Ok(map_tracks(response.tracks.into_iter().map(Some).collect(), None))
    }

    async fn album_tracks(&self, album_href: &str) -> Result<Vec<CatalogItem>, CatalogError> {
        let album: AlbumDto = self
            .get_json("album", album_href, &[("market", self.region.as_str())])
            .await?;
        let summary = album.summary();
        Ok(map_tracks(album.tracks.unwrap_or_default().items, Some(&summary)))
    }

    async fn featured_playlists(&self) -> Result<Vec<CatalogItem>, CatalogError> {
        let response: FeaturedResponse = self
            .get_json(
                "featured-playlists",
                &format!("{API_BASE}/browse/featured-playlists"),
                &[("country", self.region.as_str())],
            )
            .await?;
        Ok(map_playlists(response.playlists))
    }
}

fn token_lifetime(expires_in_secs: u64) -> Duration {
    Duration::from_secs(expires_in_secs).mul_f64(TOKEN_LIFETIME_FACTOR)
}

fn release_year(release_date: Option<&str>) -> Option<String> {
    release_date
        .and_then(|date| date.get(..4))
        .map(ToString::to_string)
}

/// Map wire tracks, skipping the `null` entries the API sometimes returns
///
/// Tracks listed under an album carry no album object of their own; `album` fills it in.
fn map_tracks(tracks: Vec<Option<TrackDto>>, album: Option<&AlbumSummary>) -> Vec<CatalogItem> {
    tracks
        .into_iter()
        .flatten()
        .map(|track| {
            let summary = match (track.album.as_ref(), album) {
                (Some(own), _) => own.summary(),
                (None, Some(parent)) => parent.clone(),
                (None, None) => AlbumSummary::default(),
            };
            Track {
                uri: track.uri,
                name: track.name,
                artists: track.artists.into_iter().map(|a| a.name).collect(),
                duration_ms: track.duration_ms,
                explicit: track.explicit,
                album: summary,
            }
            .into()
        })
        .collect()
}

fn map_playlists(page: Page<PlaylistDto>) -> Vec<CatalogItem> {
    page.items
        .into_iter()
        .flatten()
        .map(|playlist| {
            Playlist {
                uri: playlist.uri,
                name: playlist.name,
                track_count: playlist.tracks.map(|t| t.total).unwrap_or_default(),
            }
            .into()
        })
        .collect()
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

#[derive(Debug, Clone, Deserialize)]
struct Page<T> {
    #[serde(default = "Vec::new")]
    items: Vec<Option<T>>,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    tracks: Option<Page<TrackDto>>,
    albums: Option<Page<AlbumDto>>,
    artists: Option<Page<ArtistDto>>,
    playlists: Option<Page<PlaylistDto>>,
}

#[derive(Debug, Deserialize)]
struct TopTracksResponse {
    #[serde(default)]
    tracks: Vec<TrackDto>,
}

#[derive(Debug, Deserialize)]
struct FeaturedResponse {
    #[serde(default)]
    playlists: Page<PlaylistDto>,
}

#[derive(Debug, Clone, Deserialize)]
struct NamedDto {
    name: String,
}

#[derive(Debug, Clone, Deserialize)]
struct ImageDto {
    url: String,
    width: Option<u32>,
    height: Option<u32>,
}

impl From<ImageDto> for Image {
    fn from(value: ImageDto) -> Self {
        Self {
            url: value.url,
            width: value.width,
            height: value.height,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct TrackDto {
    uri: String,
    name: String,
    #[serde(default)]
    artists: Vec<NamedDto>,
    #[serde(default)]
    duration_ms: u64,
    #[serde(default)]
    explicit: bool,
    album: Option<AlbumDto>,
}

#[derive(Debug, Clone, Deserialize)]
struct AlbumDto {
    uri: String,
    name: String,
    #[serde(default)]
    artists: Vec<NamedDto>,
    release_date: Option<String>,
    #[serde(default)]
    images: Vec<ImageDto>,
    #[serde(default)]
    href: String,
    tracks: Option<Page<TrackDto>>,
}

impl AlbumDto {
    fn summary(&self) -> AlbumSummary {
        AlbumSummary {
            name: self.name.clone(),
            release_year: release_year(self.release_date.as_deref()),
            images: self.images.iter().cloned().map(Image::from).collect(),
        }
    }

    fn into_album(self) -> Album {
        Album {
            release_year: release_year(self.release_date.as_deref()),
            uri: self.uri,
            name: self.name,
            artists: self.artists.into_iter().map(|a| a.name).collect(),
            images: self.images.into_iter().map(Image::from).collect(),
            href: self.href,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ArtistDto {
    uri: String,
    id: String,
    name: String,
}

impl From<ArtistDto> for Artist {
    fn from(value: ArtistDto) -> Self {
        Self {
            uri: value.uri,
            id: value.id,
            name: value.name,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TrackCountDto {
    #[serde(default)]
    total: u32,
}

#[derive(Debug, Deserialize)]
struct PlaylistDto {
    uri: String,
    name: String,
    tracks: Option<TrackCountDto>,
}
