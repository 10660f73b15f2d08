use std::num::NonZeroU32;

use rand::seq::IndexedRandom;

use crate::{
    catalog::{CatalogItem, ItemKind},
    command::{error::CommandError, reply::Reply},
    ports::{CatalogProvider, PlaybackDevice},
    session::SessionHandle,
};

use super::{Resolved, queue, resolve_item};

const PLAYLIST_NOT_FOUND: &str =
    "I could not find that playlist. Have you tried `searchplaylist`ing for it?";
const NOTHING_TO_PLAY: &str = "Nothing to play :(";
const FROM_FAVOURITES: &str = "No playlist specified, picking from your Sonos favourites...\n";
const FROM_FEATURED: &str = "No playlist specified, picking from Spotify featured playlists...\n";

/// Replace the queue with a playlist and start playing it
///
/// Without an argument a random favourite is played, or failing that a random featured
/// playlist from the catalog.
pub(super) async fn handle_playlist<C, D>(
    catalog: &C,
    device: &D,
    session: &SessionHandle,
    args: &str,
    listing_size: NonZeroU32,
) -> Result<Reply, CommandError>
where
    C: CatalogProvider + ?Sized,
    D: PlaybackDevice + ?Sized,
{
    let (playlist, prefix) = if args.trim().is_empty() {
        match pick_fallback(catalog, device).await? {
            Some(picked) => picked,
            None => return Ok(Reply::text(NOTHING_TO_PLAY)),
        }
    } else {
        match resolve_item(catalog, session, ItemKind::Playlist, args, PLAYLIST_NOT_FOUND).await? {
            Resolved::Item(item) => (item, ""),
            Resolved::Reply(reply) => return Ok(reply),
        }
    };

    if !device.replace_queue_and_play(playlist.uri()).await? {
        tracing::warn!(uri = playlist.uri(), "device refused to play playlist");
        return Ok(Reply::generic_error());
    }
    tracing::info!(uri = playlist.uri(), "playlist now playing");

    let listing = queue::render_queue(device, listing_size).await?;
    Ok(Reply::text(format!(
        "{prefix}*{}* is now playing!\n\n{listing}",
        playlist.name()
    )))
}

async fn pick_fallback<C, D>(
    catalog: &C,
    device: &D,
) -> Result<Option<(CatalogItem, &'static str)>, CommandError>
where
    C: CatalogProvider + ?Sized,
    D: PlaybackDevice + ?Sized,
{
    if let Some(playlist) = pick_random(&device.favorite_playlists().await?) {
        return Ok(Some((playlist, FROM_FAVOURITES)));
    }

    Ok(pick_random(&catalog.featured_playlists().await?).map(|playlist| (playlist, FROM_FEATURED)))
}

fn pick_random(items: &[CatalogItem]) -> Option<CatalogItem> {
    items.choose(&mut rand::rng()).cloned()
}
