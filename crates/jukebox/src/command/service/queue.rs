use std::num::NonZeroU32;

use crate::{
    command::{error::CommandError, reply::Reply},
    ports::{NowPlaying, PlaybackDevice, QueuePage},
};

pub(super) async fn handle_list<D>(device: &D, listing_size: NonZeroU32) -> Result<Reply, CommandError>
where
    D: PlaybackDevice + ?Sized,
{
    Ok(Reply::text(render_queue(device, listing_size).await?))
}

/// Up to `listing_size` queue entries starting at the current track
pub(super) async fn render_queue<D>(
    device: &D,
    listing_size: NonZeroU32,
) -> Result<String, CommandError>
where
    D: PlaybackDevice + ?Sized,
{
    let current = device.current_track().await?;
    let start = current
        .as_ref()
        .map_or(0, |np| np.queue_position.saturating_sub(1));

    let page = device.list_queue(start, listing_size.get()).await?;
    Ok(format_queue(&page, start, current.as_ref()))
}

fn format_queue(page: &QueuePage, start: u32, current: Option<&NowPlaying>) -> String {
    let rows = page
        .items
        .iter()
        .zip(start + 1..)
        .map(|(entry, n)| {
            if current.is_some_and(|np| np.uri == entry.uri) {
                format!("*{n}.* *{} - {}* :notes:", entry.artist, entry.title)
            } else {
                format!("*{n}.* {} - {}", entry.artist, entry.title)
            }
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!("*{}* total tracks in queue:\n\n{rows}", page.total)
}
