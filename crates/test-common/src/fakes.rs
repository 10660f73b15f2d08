//! In-memory implementations of the ports.
//!
//! Each fake is a cheap handle around shared state, so a test can keep a clone after moving
//! the original into a dispatcher and inspect it afterwards.

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use parking_lot::Mutex;

use jukebox::{
    catalog::{CatalogItem, ItemKind},
    format::Detail,
    ports::{
        CatalogError, CatalogProvider, ChatTransport, DeviceError, NowPlaying, PlaybackDevice,
        PlaybackState, QueueEntry, QueuePage, TransportError,
    },
};

#[derive(Default)]
struct CatalogState {
    searches: HashMap<(ItemKind, String), Vec<CatalogItem>>,
    album_tracks: HashMap<String, Vec<CatalogItem>>,
    top_tracks: HashMap<String, Vec<CatalogItem>>,
    featured: Vec<CatalogItem>,
    unavailable: bool,
    calls: Vec<String>,
}

/// Catalog answering from canned results; unknown queries find nothing
#[derive(Clone, Default)]
pub struct FakeCatalog {
    state: Arc<Mutex<CatalogState>>,
}

impl FakeCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Results for a search of `kind` with exactly `query`
    #[must_use]
    pub fn with_search(self, kind: ItemKind, query: &str, items: Vec<CatalogItem>) -> Self {
        self.state
            .lock()
            .searches
            .insert((kind, query.to_string()), items);
        self
    }

    #[must_use]
    pub fn with_album_tracks(self, href: &str, tracks: Vec<CatalogItem>) -> Self {
        self.state
            .lock()
            .album_tracks
            .insert(href.to_string(), tracks);
        self
    }

    #[must_use]
    pub fn with_top_tracks(self, artist_id: &str, tracks: Vec<CatalogItem>) -> Self {
        self.state
            .lock()
            .top_tracks
            .insert(artist_id.to_string(), tracks);
        self
    }

    #[must_use]
    pub fn with_featured(self, playlists: Vec<CatalogItem>) -> Self {
        self.state.lock().featured = playlists;
        self
    }

    /// Make every call fail as if the provider were down
    pub fn set_unavailable(&self, unavailable: bool) {
        self.state.lock().unavailable = unavailable;
    }

    /// Every call made so far, e.g. `search_tracks(closer)`
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.state.lock().calls.clone()
    }

    fn answer<F>(&self, call: String, lookup: F) -> Result<Vec<CatalogItem>, CatalogError>
    where
        F: FnOnce(&CatalogState) -> Option<Vec<CatalogItem>>,
    {
        let mut state = self.state.lock();
        let endpoint = call.clone();
        state.calls.push(call);
        if state.unavailable {
            return Err(CatalogError::Request {
                endpoint,
                message: "connection refused".to_string(),
            });
        }
        Ok(lookup(&state).unwrap_or_default())
    }

    fn search(&self, kind: ItemKind, query: &str) -> Result<Vec<CatalogItem>, CatalogError> {
        self.answer(format!("search_{}({query})", kind.plural()), |state| {
            state.searches.get(&(kind, query.to_string())).cloned()
        })
    }
}

#[async_trait]
impl CatalogProvider for FakeCatalog {
    async fn search_tracks(&self, query: &str) -> Result<Vec<CatalogItem>, CatalogError> {
        self.search(ItemKind::Track, query)
    }

    async fn search_albums(&self, query: &str) -> Result<Vec<CatalogItem>, CatalogError> {
        self.search(ItemKind::Album, query)
    }

    async fn search_artists(&self, query: &str) -> Result<Vec<CatalogItem>, CatalogError> {
        self.search(ItemKind::Artist, query)
    }

    async fn search_playlists(&self, query: &str) -> Result<Vec<CatalogItem>, CatalogError> {
        self.search(ItemKind::Playlist, query)
    }

    async fn top_tracks(&self, artist_id: &str) -> Result<Vec<CatalogItem>, CatalogError> {
        self.answer(format!("top_tracks({artist_id})"), |state| {
            state.top_tracks.get(artist_id).cloned()
        })
    }

    async fn album_tracks(&self, album_href: &str) -> Result<Vec<CatalogItem>, CatalogError> {
        self.answer(format!("album_tracks({album_href})"), |state| {
            state.album_tracks.get(album_href).cloned()
        })
    }

    async fn featured_playlists(&self) -> Result<Vec<CatalogItem>, CatalogError> {
        self.answer("featured_playlists()".to_string(), |state| {
            Some(state.featured.clone())
        })
    }
}

struct DeviceState {
    queue: Vec<QueueEntry>,
    current: Option<usize>,
    state: PlaybackState,
    volume: u8,
    favourites: Vec<CatalogItem>,
    library: HashMap<String, (String, String)>,
    refusing: bool,
    calls: Vec<String>,
}

impl Default for DeviceState {
    fn default() -> Self {
        Self {
            queue: Vec::new(),
            current: None,
            state: PlaybackState::Stopped,
            volume: 20,
            favourites: Vec::new(),
            library: HashMap::new(),
            refusing: false,
            calls: Vec::new(),
        }
    }
}

impl DeviceState {
    fn entry(&self, uri: &str) -> QueueEntry {
        let (artist, title) = self
            .library
            .get(uri)
            .cloned()
            .unwrap_or_else(|| (String::new(), uri.to_string()));
        QueueEntry {
            uri: uri.to_string(),
            artist,
            title,
        }
    }
}

/// Speaker with an in-memory queue
///
/// `enqueue_after_current` inserts directly after the current entry, like the real speaker.
#[derive(Clone, Default)]
pub struct FakeDevice {
    state: Arc<Mutex<DeviceState>>,
}

impl FakeDevice {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Teach the device the artist and title behind catalog URIs
    #[must_use]
    pub fn with_library(self, items: &[CatalogItem]) -> Self {
        {
            let mut state = self.state.lock();
            for item in items {
                let artist = item.artists().join(", ");
                state
                    .library
                    .insert(item.uri().to_string(), (artist, item.name().to_string()));
            }
        }
        self
    }

    /// Start with `uris` queued and the first one playing
    #[must_use]
    pub fn playing(self, uris: &[&str]) -> Self {
        {
            let mut state = self.state.lock();
            let queue = uris.iter().map(|uri| state.entry(uri)).collect();
            state.queue = queue;
            state.current = (!uris.is_empty()).then_some(0);
            state.state = PlaybackState::Playing;
        }
        self
    }

    #[must_use]
    pub fn with_favourites(self, playlists: Vec<CatalogItem>) -> Self {
        self.state.lock().favourites = playlists;
        self
    }

    /// Make every control request come back refused
    pub fn set_refusing(&self, refusing: bool) {
        self.state.lock().refusing = refusing;
    }

    #[must_use]
    pub fn queue_uris(&self) -> Vec<String> {
        self.state
            .lock()
            .queue
            .iter()
            .map(|entry| entry.uri.clone())
            .collect()
    }

    #[must_use]
    pub fn current_uri(&self) -> Option<String> {
        let state = self.state.lock();
        state
            .current
            .and_then(|index| state.queue.get(index))
            .map(|entry| entry.uri.clone())
    }

    #[must_use]
    pub fn volume_now(&self) -> u8 {
        self.state.lock().volume
    }

    #[must_use]
    pub fn playback_state(&self) -> PlaybackState {
        self.state.lock().state
    }

    /// Every call made so far, e.g. `set_volume(50)`
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.state.lock().calls.clone()
    }

    fn control<F>(&self, call: String, apply: F) -> Result<bool, DeviceError>
    where
        F: FnOnce(&mut DeviceState) -> bool,
    {
        let mut state = self.state.lock();
        state.calls.push(call);
        if state.refusing {
            return Ok(false);
        }
        Ok(apply(&mut state))
    }

    fn record(&self, call: &str) {
        self.state.lock().calls.push(call.to_string());
    }
}

#[async_trait]
impl PlaybackDevice for FakeDevice {
    async fn current_track(&self) -> Result<Option<NowPlaying>, DeviceError> {
        self.record("current_track()");
        let state = self.state.lock();
        Ok(state.current.and_then(|index| {
            state.queue.get(index).map(|entry| NowPlaying {
                uri: entry.uri.clone(),
                title: entry.title.clone(),
                artist: entry.artist.clone(),
                position_secs: 0,
                duration_secs: 240,
                queue_position: u32::try_from(index + 1).unwrap_or(u32::MAX),
            })
        }))
    }

    async fn state(&self) -> Result<PlaybackState, DeviceError> {
        self.record("state()");
        Ok(self.state.lock().state)
    }

    async fn enqueue_after_current(&self, uri: &str) -> Result<bool, DeviceError> {
        self.control(format!("enqueue_after_current({uri})"), |state| {
            let index = state.current.map_or(0, |current| current + 1);
            let entry = state.entry(uri);
            state.queue.insert(index, entry);
            true
        })
    }

    async fn replace_queue_and_play(&self, uri: &str) -> Result<bool, DeviceError> {
        self.control(format!("replace_queue_and_play({uri})"), |state| {
            let entry = state.entry(uri);
            state.queue = vec![entry];
            state.current = Some(0);
            state.state = PlaybackState::Playing;
            true
        })
    }

    async fn play(&self) -> Result<bool, DeviceError> {
        self.control("play()".to_string(), |state| {
            state.state = PlaybackState::Playing;
            true
        })
    }

    async fn pause(&self) -> Result<bool, DeviceError> {
        self.control("pause()".to_string(), |state| {
            state.state = PlaybackState::Paused;
            true
        })
    }

    async fn stop(&self) -> Result<bool, DeviceError> {
        self.control("stop()".to_string(), |state| {
            state.state = PlaybackState::Stopped;
            true
        })
    }

    async fn next(&self) -> Result<bool, DeviceError> {
        self.control("next()".to_string(), |state| match state.current {
            Some(index) if index + 1 < state.queue.len() => {
                state.current = Some(index + 1);
                true
            }
            _ => false,
        })
    }

    async fn previous(&self) -> Result<bool, DeviceError> {
        self.control("previous()".to_string(), |state| match state.current {
            Some(index) if index > 0 => {
                state.current = Some(index - 1);
                true
            }
            _ => false,
        })
    }

    async fn shuffle(&self) -> Result<bool, DeviceError> {
        self.control("shuffle()".to_string(), |_| true)
    }

    async fn volume(&self) -> Result<u8, DeviceError> {
        self.record("volume()");
        Ok(self.state.lock().volume)
    }

    async fn set_volume(&self, volume: u8) -> Result<bool, DeviceError> {
        self.control(format!("set_volume({volume})"), |state| {
            state.volume = volume;
            true
        })
    }

    async fn list_queue(&self, start: u32, count: u32) -> Result<QueuePage, DeviceError> {
        self.record(&format!("list_queue({start}, {count})"));
        let state = self.state.lock();
        Ok(QueuePage {
            total: u32::try_from(state.queue.len()).unwrap_or(u32::MAX),
            items: state
                .queue
                .iter()
                .skip(start as usize)
                .take(count as usize)
                .cloned()
                .collect(),
        })
    }

    async fn favorite_playlists(&self) -> Result<Vec<CatalogItem>, DeviceError> {
        self.record("favorite_playlists()");
        Ok(self.state.lock().favourites.clone())
    }
}

/// A reply captured by [`RecordingTransport`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sent {
    Text { channel: String, text: String },
    Rich { channel: String, detail: Detail },
}

/// Chat transport that keeps every reply instead of sending it
#[derive(Clone, Default)]
pub struct RecordingTransport {
    sent: Arc<Mutex<Vec<Sent>>>,
}

impl RecordingTransport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().clone()
    }

    /// Text of every plain reply, in order
    #[must_use]
    pub fn texts(&self) -> Vec<String> {
        self.sent
            .lock()
            .iter()
            .filter_map(|sent| match sent {
                Sent::Text { text, .. } => Some(text.clone()),
                Sent::Rich { .. } => None,
            })
            .collect()
    }

    #[must_use]
    pub fn last(&self) -> Option<Sent> {
        self.sent.lock().last().cloned()
    }

    pub fn clear(&self) {
        self.sent.lock().clear();
    }
}

#[async_trait]
impl ChatTransport for RecordingTransport {
    async fn send_text(&self, text: &str, channel: &str) -> Result<(), TransportError> {
        self.sent.lock().push(Sent::Text {
            channel: channel.to_string(),
            text: text.to_string(),
        });
        Ok(())
    }

    async fn send_rich(&self, detail: &Detail, channel: &str) -> Result<(), TransportError> {
        self.sent.lock().push(Sent::Rich {
            channel: channel.to_string(),
            detail: detail.clone(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_enqueue_after_current_keeps_call_order_reversed() {
        let device = FakeDevice::new().playing(&["spotify:track:now"]);

        for uri in ["spotify:track:c", "spotify:track:b", "spotify:track:a"] {
            assert!(device.enqueue_after_current(uri).await.unwrap());
        }

        assert_eq!(
            device.queue_uris(),
            [
                "spotify:track:now",
                "spotify:track:a",
                "spotify:track:b",
                "spotify:track:c"
            ]
        );
    }

    #[tokio::test]
    async fn test_unavailable_catalog_fails() {
        let catalog = FakeCatalog::new();
        catalog.set_unavailable(true);

        assert!(catalog.search_tracks("anything").await.is_err());
        assert_eq!(catalog.calls(), ["search_tracks(anything)"]);
    }
}
