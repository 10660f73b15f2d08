//!
//! `search`, `searchalbum`, `searchartist` and `searchplaylist`.
//!
//! Every search replaces the channel's result set with everything it found, so the letter codes
//! in the reply line up with what `add`/`playlist` will select.
//!

use std::collections::HashSet;

use crate::{
    catalog::{CatalogItem, ItemKind},
    command::{
        error::CommandError,
        reply::{NOT_FOUND, Reply},
    },
    format::{render_list, word_search},
    ports::{CatalogProvider, PlaybackDevice, catalog},
    session::SessionHandle,
};

/// Keyword that adds an item of `kind` from a search listing
fn follow_up(kind: ItemKind) -> &'static str {
    match kind {
        ItemKind::Track => "*To add to the queue, use the `add` command.*",
        ItemKind::Album => "*To add to the queue, use the `addalbum` command.*",
        ItemKind::Artist => "*To add to the queue, use the `addartist` command.*",
        ItemKind::Playlist => "*To replace the queue with a playlist, use the `playlist` command.*",
    }
}

fn format_results(kind: ItemKind, items: &[CatalogItem]) -> Reply {
    if items.is_empty() {
        return Reply::text(NOT_FOUND);
    }

    Reply::text(format!(
        "*I found the following {}:*\n\n{}\n\n{}",
        kind.plural(),
        render_list(items),
        follow_up(kind)
    ))
}

pub(super) async fn handle_search<C>(
    catalog: &C,
    session: &SessionHandle,
    kind: ItemKind,
    args: &str,
) -> Result<Reply, CommandError>
where
    C: CatalogProvider + ?Sized,
{
    let query = args.trim();
    if query.is_empty() {
        return Ok(Reply::text(NOT_FOUND));
    }

    let items = catalog::search(catalog, kind, query).await?;
    tracing::debug!(%kind, query, found = items.len(), "search finished");

    let reply = format_results(kind, &items);
    session.replace_results(kind, items);
    Ok(reply)
}

/// Search the device's favourite playlists and the catalog at the same time
///
/// Matching favourites come first, then catalog playlists that are not favourites, capped at
/// `limit` items in total.
pub(super) async fn handle_search_playlists<C, D>(
    catalog: &C,
    device: &D,
    session: &SessionHandle,
    args: &str,
    limit: usize,
) -> Result<Reply, CommandError>
where
    C: CatalogProvider + ?Sized,
    D: PlaybackDevice + ?Sized,
{
    let query = args.trim();
    if query.is_empty() {
        return Ok(Reply::text(NOT_FOUND));
    }

    let (favourites, found) = tokio::join!(
        device.favorite_playlists(),
        catalog.search_playlists(query)
    );
    let playlists = merge_playlists(query, favourites?, found?, limit);
    tracing::debug!(query, found = playlists.len(), "playlist search finished");

    let reply = format_results(ItemKind::Playlist, &playlists);
    session.replace_results(ItemKind::Playlist, playlists);
    Ok(reply)
}

fn merge_playlists(
    query: &str,
    favourites: Vec<CatalogItem>,
    found: Vec<CatalogItem>,
    limit: usize,
) -> Vec<CatalogItem> {
    let favourite_uris: HashSet<String> = favourites
        .iter()
        .map(|playlist| playlist.uri().to_string())
        .collect();

    let mut merged: Vec<_> = favourites
        .into_iter()
        .take(limit)
        .filter(|playlist| word_search(query, playlist.name()))
        .collect();

    let remaining = limit.saturating_sub(merged.len());
    merged.extend(
        found
            .into_iter()
            .filter(|playlist| !favourite_uris.contains(playlist.uri()))
            .take(remaining),
    );

    merged
}
