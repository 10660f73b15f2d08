use std::{collections::HashMap, fmt};

/// Every command the bot understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    // Standard tier
    AddTrack,
    AddAlbum,
    AddArtist,
    Current,
    Gong,
    Help,
    ListQueue,
    SearchTracks,
    SearchAlbums,
    SearchArtists,
    Status,
    Volume,

    // Admin tier
    Next,
    Pause,
    Play,
    Playlist,
    Previous,
    SearchPlaylists,
    SetVolume,
    Shuffle,
    Stop,
    /// `volume` in the admin channel: reports without an argument, sets with one
    AdminVolume,
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AddTrack => f.write_str("add_track"),
            Self::AddAlbum => f.write_str("add_album"),
            Self::AddArtist => f.write_str("add_artist"),
            Self::Current => f.write_str("current"),
            Self::Gong => f.write_str("gong"),
            Self::Help => f.write_str("help"),
            Self::ListQueue => f.write_str("list_queue"),
            Self::SearchTracks => f.write_str("search_tracks"),
            Self::SearchAlbums => f.write_str("search_albums"),
            Self::SearchArtists => f.write_str("search_artists"),
            Self::Status => f.write_str("status"),
            Self::Volume => f.write_str("volume"),
            Self::Next => f.write_str("next"),
            Self::Pause => f.write_str("pause"),
            Self::Play => f.write_str("play"),
            Self::Playlist => f.write_str("playlist"),
            Self::Previous => f.write_str("previous"),
            Self::SearchPlaylists => f.write_str("search_playlists"),
            Self::SetVolume => f.write_str("set_volume"),
            Self::Shuffle => f.write_str("shuffle"),
            Self::Stop => f.write_str("stop"),
            Self::AdminVolume => f.write_str("admin_volume"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Standard,
    Admin,
}

const STANDARD_COMMANDS: &[(&str, CommandKind)] = &[
    ("add", CommandKind::AddTrack),
    ("addalbum", CommandKind::AddAlbum),
    ("addartist", CommandKind::AddArtist),
    ("current", CommandKind::Current),
    ("gong", CommandKind::Gong),
    ("help", CommandKind::Help),
    ("list", CommandKind::ListQueue),
    ("search", CommandKind::SearchTracks),
    ("searchalbum", CommandKind::SearchAlbums),
    ("searchartist", CommandKind::SearchArtists),
    ("status", CommandKind::Status),
    ("volume", CommandKind::Volume),
];

const ADMIN_COMMANDS: &[(&str, CommandKind)] = &[
    ("next", CommandKind::Next),
    ("pause", CommandKind::Pause),
    ("play", CommandKind::Play),
    ("playlist", CommandKind::Playlist),
    ("previous", CommandKind::Previous),
    ("searchplaylist", CommandKind::SearchPlaylists),
    ("setvolume", CommandKind::SetVolume),
    ("shuffle", CommandKind::Shuffle),
    ("stop", CommandKind::Stop),
    ("volume", CommandKind::AdminVolume),
];

/// Result of looking a keyword up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    Command(CommandKind),
    /// The keyword exists, but only for privileged senders
    AdminOnly,
    Unknown,
}

/// Keyword to command mapping, split into standard and admin tiers
#[derive(Debug, Clone)]
pub struct CommandTable {
    standard: HashMap<&'static str, CommandKind>,
    admin: HashMap<&'static str, CommandKind>,
}

impl Default for CommandTable {
    fn default() -> Self {
        Self {
            standard: STANDARD_COMMANDS.iter().copied().collect(),
            admin: ADMIN_COMMANDS.iter().copied().collect(),
        }
    }
}

impl CommandTable {
    /// Find the command for an already lower-cased `keyword`
    ///
    /// Privileged senders see the admin tier first, so a keyword present in both tiers resolves
    /// to its admin variant for them.
    #[must_use]
    pub fn lookup(&self, keyword: &str, privileged: bool) -> Lookup {
        if privileged {
            if let Some(kind) = self.admin.get(keyword) {
                return Lookup::Command(*kind);
            }
        }

        match self.standard.get(keyword) {
            Some(kind) => Lookup::Command(*kind),
            None if self.admin.contains_key(keyword) => Lookup::AdminOnly,
            None => Lookup::Unknown,
        }
    }

    /// Keywords of one tier, sorted
    #[must_use]
    pub fn keywords(&self, tier: Tier) -> Vec<&'static str> {
        let map = match tier {
            Tier::Standard => &self.standard,
            Tier::Admin => &self.admin,
        };
        let mut keywords: Vec<_> = map.keys().copied().collect();
        keywords.sort_unstable();
        keywords
    }
}
