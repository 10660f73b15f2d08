//!
//! Transport and volume commands. Each one is a single device call (plus a read-back or queue
//! listing for a few) mapped to a fixed reply.
//!

use std::num::NonZeroU32;

use crate::{
    command::{error::CommandError, reply::Reply},
    format::format_seconds,
    ports::{PlaybackDevice, PlaybackState},
};

use super::queue;

const INVALID_VOLUME: &str = "Invalid volume.";
const MAX_VOLUME: u8 = 100;

/// `text` if the device accepted the request, the generic error otherwise
fn confirm(accepted: bool, action: &str, text: &str) -> Reply {
    if accepted {
        Reply::text(text)
    } else {
        tracing::warn!(action, "device refused request");
        Reply::generic_error()
    }
}

pub(super) async fn handle_next<D: PlaybackDevice + ?Sized>(
    device: &D,
) -> Result<Reply, CommandError> {
    Ok(confirm(device.next().await?, "next", "Skipping track..."))
}

pub(super) async fn handle_previous<D: PlaybackDevice + ?Sized>(
    device: &D,
) -> Result<Reply, CommandError> {
    Ok(confirm(device.previous().await?, "previous", "Jumping back!"))
}

pub(super) async fn handle_play<D: PlaybackDevice + ?Sized>(
    device: &D,
) -> Result<Reply, CommandError> {
    Ok(confirm(
        device.play().await?,
        "play",
        "The speaker is now playing.",
    ))
}

pub(super) async fn handle_pause<D: PlaybackDevice + ?Sized>(
    device: &D,
) -> Result<Reply, CommandError> {
    Ok(confirm(
        device.pause().await?,
        "pause",
        "The speaker is now paused.",
    ))
}

pub(super) async fn handle_stop<D: PlaybackDevice + ?Sized>(
    device: &D,
) -> Result<Reply, CommandError> {
    Ok(confirm(device.stop().await?, "stop", "Stahped. :("))
}

pub(super) async fn handle_shuffle<D: PlaybackDevice + ?Sized>(
    device: &D,
    listing_size: NonZeroU32,
) -> Result<Reply, CommandError> {
    if !device.shuffle().await? {
        tracing::warn!(action = "shuffle", "device refused request");
        return Ok(Reply::generic_error());
    }

    let listing = queue::render_queue(device, listing_size).await?;
    Ok(Reply::text(format!(
        "Every day I'm shufflin'...\n\n{listing}"
    )))
}

pub(super) async fn handle_status<D: PlaybackDevice + ?Sized>(
    device: &D,
) -> Result<Reply, CommandError> {
    let state = device.state().await?;
    Ok(Reply::text(format!("The speaker is currently {state}!")))
}

pub(super) async fn handle_current<D: PlaybackDevice + ?Sized>(
    device: &D,
) -> Result<Reply, CommandError> {
    let Some(now_playing) = device.current_track().await? else {
        return Ok(Reply::text("I have no idea what we're listening to."));
    };

    if device.state().await? != PlaybackState::Playing {
        return Ok(Reply::text("The speaker is not playing."));
    }

    Ok(Reply::text(format!(
        "Currently listening to *{}* - *{}* ({}/{})",
        now_playing.artist,
        now_playing.title,
        format_seconds(now_playing.position_secs),
        format_seconds(now_playing.duration_secs),
    )))
}

pub(super) async fn handle_volume<D: PlaybackDevice + ?Sized>(
    device: &D,
) -> Result<Reply, CommandError> {
    let volume = device.volume().await?;
    Ok(Reply::text(format!("Current volume is {volume}.")))
}

/// Set the volume and report what the device ended up at
///
/// Out-of-range or unparsable input never reaches the device.
pub(super) async fn handle_set_volume<D: PlaybackDevice + ?Sized>(
    device: &D,
    args: &str,
) -> Result<Reply, CommandError> {
    let Some(volume) = parse_volume(args) else {
        return Ok(Reply::text(INVALID_VOLUME));
    };

    if !device.set_volume(volume).await? {
        tracing::warn!(volume, "device refused volume change");
    }

    let confirmed = device.volume().await?;
    Ok(Reply::text(format!("Volume is now {confirmed}.")))
}

fn parse_volume(args: &str) -> Option<u8> {
    let volume: u8 = args.trim().parse().ok()?;
    (volume <= MAX_VOLUME).then_some(volume)
}

#[cfg(test)]
mod tests {
    use mockall::{Sequence, predicate::eq};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        command::reply::GENERIC_ERROR,
        ports::{NowPlaying, QueuePage, device::MockPlaybackDevice},
    };

    #[test]
    fn test_parse_volume() {
        assert_eq!(parse_volume("0"), Some(0));
        assert_eq!(parse_volume(" 50 "), Some(50));
        assert_eq!(parse_volume("100"), Some(100));
        assert_eq!(parse_volume("101"), None);
        assert_eq!(parse_volume("150"), None);
        assert_eq!(parse_volume("-1"), None);
        assert_eq!(parse_volume("loud"), None);
        assert_eq!(parse_volume(""), None);
    }

    #[tokio::test]
    async fn test_invalid_volume_never_touches_device() {
        let mut device = MockPlaybackDevice::new();
        device.expect_set_volume().never();
        device.expect_volume().never();

        let reply = handle_set_volume(&device, "150").await.unwrap();

        assert_eq!(reply, Reply::text(INVALID_VOLUME));
    }

    #[tokio::test]
    async fn test_set_volume_reads_back() {
        let mut device = MockPlaybackDevice::new();
        device
            .expect_set_volume()
            .with(eq(50u8))
            .times(1)
            .returning(|_| Ok(true));
        device.expect_volume().times(1).returning(|| Ok(50));

        let reply = handle_set_volume(&device, "50").await.unwrap();

        assert_eq!(reply, Reply::text("Volume is now 50."));
    }

    #[tokio::test]
    async fn test_simple_commands_map_result_to_text() {
        let mut device = MockPlaybackDevice::new();
        device.expect_next().times(1).returning(|| Ok(true));
        device.expect_stop().times(1).returning(|| Ok(false));

        assert_eq!(
            handle_next(&device).await.unwrap(),
            Reply::text("Skipping track...")
        );
        assert_eq!(handle_stop(&device).await.unwrap(), Reply::text(GENERIC_ERROR));
    }

    #[tokio::test]
    async fn test_shuffle_lists_queue() {
        let mut device = MockPlaybackDevice::new();
        device.expect_shuffle().times(1).returning(|| Ok(true));
        device.expect_current_track().returning(|| Ok(None));
        device
            .expect_list_queue()
            .returning(|_, _| Ok(QueuePage::default()));

        let reply = handle_shuffle(&device, NonZeroU32::new(10).unwrap())
            .await
            .unwrap();

        assert_eq!(
            reply,
            Reply::text("Every day I'm shufflin'...\n\n*0* total tracks in queue:\n\n")
        );
    }

    #[tokio::test]
    async fn test_shuffle_refused() {
        let mut device = MockPlaybackDevice::new();
        device.expect_shuffle().returning(|| Ok(false));
        device.expect_list_queue().never();

        let reply = handle_shuffle(&device, NonZeroU32::new(10).unwrap())
            .await
            .unwrap();

        assert_eq!(reply, Reply::text(GENERIC_ERROR));
    }

    #[tokio::test]
    async fn test_current_track() {
        let mut device = MockPlaybackDevice::new();
        device.expect_current_track().returning(|| {
            Ok(Some(NowPlaying {
                uri: "x-sonos-spotify:spotify:track:1".to_string(),
                title: "Laid".to_string(),
                artist: "James".to_string(),
                position_secs: 65,
                duration_secs: 156,
                queue_position: 3,
            }))
        });
        device
            .expect_state()
            .returning(|| Ok(PlaybackState::Playing));

        let reply = handle_current(&device).await.unwrap();

        assert_eq!(
            reply,
            Reply::text("Currently listening to *James* - *Laid* (1:05/2:36)")
        );
    }

    #[tokio::test]
    async fn test_current_when_paused_or_empty() {
        let mut device = MockPlaybackDevice::new();
        let mut seq = Sequence::new();
        device
            .expect_current_track()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(Some(NowPlaying::default())));
        device
            .expect_current_track()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(None));
        device.expect_state().returning(|| Ok(PlaybackState::Paused));

        assert_eq!(
            handle_current(&device).await.unwrap(),
            Reply::text("The speaker is not playing.")
        );
        assert_eq!(
            handle_current(&device).await.unwrap(),
            Reply::text("I have no idea what we're listening to.")
        );
    }

    #[tokio::test]
    async fn test_status() {
        let mut device = MockPlaybackDevice::new();
        device
            .expect_state()
            .returning(|| Ok(PlaybackState::Stopped));

        assert_eq!(
            handle_status(&device).await.unwrap(),
            Reply::text("The speaker is currently stopped!")
        );
    }
}
