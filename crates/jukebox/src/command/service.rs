mod add;
mod help;
mod playback;
mod playlist;
mod queue;
mod search;
mod vote;

use tracing::instrument;

use super::{
    error::CommandError,
    reply::{NOTHING_SPECIFIED, Reply},
    table::{CommandKind, CommandTable},
};

use crate::{
    catalog::{CatalogItem, ItemKind},
    config::AppConfig,
    ports::{CatalogProvider, PlaybackDevice},
    selector::{self, Selection},
    session::{SessionHandle, SessionStore},
};

/// The command core: runs commands against a catalog and a playback device
///
/// Holds one session per channel; everything else is borrowed from the ports per call.
#[derive(Debug)]
pub struct Jukebox<C, D> {
    catalog: C,
    device: D,
    sessions: SessionStore,
    table: CommandTable,
    config: AppConfig,
}

impl<C, D> Jukebox<C, D>
where
    C: CatalogProvider,
    D: PlaybackDevice,
{
    pub fn new(catalog: C, device: D, config: AppConfig) -> Self {
        Self {
            catalog,
            device,
            sessions: SessionStore::new(config.gong_limit()),
            table: CommandTable::default(),
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    #[must_use]
    pub fn table(&self) -> &CommandTable {
        &self.table
    }

    /// Session for a channel, created on first use
    pub fn session(&self, channel: &str) -> SessionHandle {
        self.sessions.session(channel)
    }

    /// Run one command to completion
    ///
    /// User mistakes (nothing to add, nothing found, bad volume) come back as `Ok` text replies;
    /// only collaborator failures and broken invariants are errors.
    #[instrument(skip(self, session), fields(channel = session.key()))]
    pub async fn execute(
        &self,
        kind: CommandKind,
        args: &str,
        sender_id: &str,
        session: &SessionHandle,
    ) -> Result<Reply, CommandError> {
        let catalog = &self.catalog;
        let device = &self.device;
        let listing_size = self.config.queue_listing_size();

        match kind {
            CommandKind::AddTrack => add::handle_add_track(catalog, device, session, args).await,
            CommandKind::AddAlbum => add::handle_add_album(catalog, device, session, args).await,
            CommandKind::AddArtist => {
                add::handle_add_artist(catalog, device, session, args, listing_size).await
            }
            CommandKind::Current => playback::handle_current(device).await,
            CommandKind::Gong => vote::handle_gong(device, session, sender_id).await,
            CommandKind::Help => Ok(help::handle_help(self.config.gong_limit())),
            CommandKind::ListQueue => queue::handle_list(device, listing_size).await,
            CommandKind::SearchTracks => {
                search::handle_search(catalog, session, ItemKind::Track, args).await
            }
            CommandKind::SearchAlbums => {
                search::handle_search(catalog, session, ItemKind::Album, args).await
            }
            CommandKind::SearchArtists => {
                search::handle_search(catalog, session, ItemKind::Artist, args).await
            }
            CommandKind::Status => playback::handle_status(device).await,
            CommandKind::Volume => playback::handle_volume(device).await,
            CommandKind::Next => playback::handle_next(device).await,
            CommandKind::Pause => playback::handle_pause(device).await,
            CommandKind::Play => playback::handle_play(device).await,
            CommandKind::Playlist => {
                playlist::handle_playlist(catalog, device, session, args, listing_size).await
            }
            CommandKind::Previous => playback::handle_previous(device).await,
            CommandKind::SearchPlaylists => {
                search::handle_search_playlists(
                    catalog,
                    device,
                    session,
                    args,
                    self.config.search_limit().get(),
                )
                .await
            }
            CommandKind::SetVolume => playback::handle_set_volume(device, args).await,
            CommandKind::Shuffle => playback::handle_shuffle(device, listing_size).await,
            CommandKind::Stop => playback::handle_stop(device).await,
            CommandKind::AdminVolume if args.trim().is_empty() => {
                playback::handle_volume(device).await
            }
            CommandKind::AdminVolume => playback::handle_set_volume(device, args).await,
        }
    }
}

/// Either the item a token resolved to, or the reply explaining why there is none
pub(super) enum Resolved {
    Item(CatalogItem),
    Reply(Reply),
}

/// Run the selector and turn its misses into the standard replies
pub(super) async fn resolve_item<C>(
    catalog: &C,
    session: &SessionHandle,
    kind: ItemKind,
    args: &str,
    not_found: &str,
) -> Result<Resolved, CommandError>
where
    C: CatalogProvider + ?Sized,
{
    Ok(match selector::resolve(catalog, session, kind, args).await? {
        Selection::Found(item) => Resolved::Item(item),
        Selection::NothingSpecified => Resolved::Reply(Reply::text(NOTHING_SPECIFIED)),
        Selection::NotFound => Resolved::Reply(Reply::text(not_found)),
    })
}

/// Error for an item whose variant does not match the kind it was resolved as
pub(super) fn unexpected_kind(expected: ItemKind, item: &CatalogItem) -> CommandError {
    CommandError::Internal(format!(
        "expected a {expected}, got a {} ({})",
        item.kind(),
        item.uri()
    ))
}
