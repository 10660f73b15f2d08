//!
//! `add`, `addalbum` and `addartist`: resolve an item, then queue it after the current track.
//!
//! Albums and artists fan out into one enqueue per track. Every insert lands directly after the
//! current track, so tracks are inserted last-first to come out in order. The fan-out keeps
//! going past individual failures.
//!

use std::num::NonZeroU32;

use crate::{
    catalog::{CatalogItem, ItemKind},
    command::{error::CommandError, reply::Reply},
    format::render_detail,
    ports::{CatalogProvider, PlaybackDevice},
    session::SessionHandle,
};

use super::{Resolved, queue, resolve_item, unexpected_kind};

const TRACK_NOT_FOUND: &str = "I could not find that track. Have you tried `search`ing for it?";
const ALBUM_NOT_FOUND: &str =
    "I could not find that album. Have you tried `searchalbum`ing for it?";
const ARTIST_NOT_FOUND: &str =
    "I could not find that artist. Have you tried `searchartist`ing for it?";

pub(super) async fn handle_add_track<C, D>(
    catalog: &C,
    device: &D,
    session: &SessionHandle,
    args: &str,
) -> Result<Reply, CommandError>
where
    C: CatalogProvider + ?Sized,
    D: PlaybackDevice + ?Sized,
{
    let track = match resolve_item(catalog, session, ItemKind::Track, args, TRACK_NOT_FOUND).await? {
        Resolved::Item(item) => item,
        Resolved::Reply(reply) => return Ok(reply),
    };

    if device.enqueue_after_current(track.uri()).await? {
        tracing::info!(uri = track.uri(), "track queued");
        Ok(render_detail(&track).into())
    } else {
        tracing::warn!(uri = track.uri(), "device refused to queue track");
        Ok(Reply::generic_error())
    }
}

pub(super) async fn handle_add_album<C, D>(
    catalog: &C,
    device: &D,
    session: &SessionHandle,
    args: &str,
) -> Result<Reply, CommandError>
where
    C: CatalogProvider + ?Sized,
    D: PlaybackDevice + ?Sized,
{
    let item = match resolve_item(catalog, session, ItemKind::Album, args, ALBUM_NOT_FOUND).await? {
        Resolved::Item(item) => item,
        Resolved::Reply(reply) => return Ok(reply),
    };
    let CatalogItem::Album(album) = &item else {
        return Err(unexpected_kind(ItemKind::Album, &item));
    };

    let tracks = catalog.album_tracks(&album.href).await?;
    let queued = enqueue_in_reverse(device, &tracks).await;
    tracing::info!(uri = %album.uri, queued, total = tracks.len(), "album queued");

    if queued == 0 {
        return Ok(Reply::generic_error());
    }
    Ok(render_detail(&item).into())
}

pub(super) async fn handle_add_artist<C, D>(
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
    let item = match resolve_item(catalog, session, ItemKind::Artist, args, ARTIST_NOT_FOUND).await?
    {
        Resolved::Item(item) => item,
        Resolved::Reply(reply) => return Ok(reply),
    };
    let CatalogItem::Artist(artist) = &item else {
        return Err(unexpected_kind(ItemKind::Artist, &item));
    };

    let tracks = catalog.top_tracks(&artist.id).await?;
    let queued = enqueue_in_reverse(device, &tracks).await;
    tracing::info!(uri = %artist.uri, queued, total = tracks.len(), "artist queued");

    if queued == 0 {
        return Ok(Reply::generic_error());
    }

    let listing = queue::render_queue(device, listing_size).await?;
    Ok(Reply::text(format!("Artist added to queue.\n{listing}")))
}

/// Enqueue `tracks` after the current track, last first, one at a time
///
/// Returns how many the device accepted.
async fn enqueue_in_reverse<D>(device: &D, tracks: &[CatalogItem]) -> usize
where
    D: PlaybackDevice + ?Sized,
{
    let mut queued = 0;

    for track in tracks.iter().rev() {
        match device.enqueue_after_current(track.uri()).await {
            Ok(true) => queued += 1,
            Ok(false) => tracing::warn!(uri = track.uri(), "device refused to queue track"),
            Err(error) => tracing::warn!(uri = track.uri(), %error, "failed to queue track"),
        }
    }

    queued
}
