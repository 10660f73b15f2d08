use crate::{
    command::{error::CommandError, reply::Reply},
    gong::VoteOutcome,
    ports::PlaybackDevice,
    session::SessionHandle,
};

pub(super) async fn handle_gong<D>(
    device: &D,
    session: &SessionHandle,
    voter_id: &str,
) -> Result<Reply, CommandError>
where
    D: PlaybackDevice + ?Sized,
{
    let Some(now_playing) = device.current_track().await? else {
        tracing::warn!("gong with nothing playing");
        return Ok(Reply::generic_error());
    };

    match session.register_vote(&now_playing.uri, voter_id) {
        VoteOutcome::ThresholdReached => {
            tracing::info!(uri = %now_playing.uri, "gong threshold reached, skipping");
            if !device.next().await? {
                tracing::warn!(uri = %now_playing.uri, "device refused to skip gonged track");
            }
            Ok(Reply::text("GONGED!"))
        }
        VoteOutcome::Duplicate => Ok(Reply::text(format!(
            "Nice try, <@{voter_id}>, you've already gonged this!"
        ))),
        VoteOutcome::Counted { count, threshold } => Ok(Reply::text(format!(
            "This is gong {count} of {threshold} for *{}* - *{}*",
            now_playing.artist, now_playing.title
        ))),
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroUsize;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        command::reply::GENERIC_ERROR,
        ports::{NowPlaying, device::MockPlaybackDevice},
        session::SessionStore,
    };

    fn playing(uri: &str) -> NowPlaying {
        NowPlaying {
            uri: uri.to_string(),
            title: "Closer".to_string(),
            artist: "Nine Inch Nails".to_string(),
            ..Default::default()
        }
    }

    fn session(limit: usize) -> SessionHandle {
        SessionStore::new(NonZeroUsize::new(limit).unwrap()).session("music")
    }

    #[tokio::test]
    async fn test_gong_counts_then_skips() {
        let mut device = MockPlaybackDevice::new();
        device
            .expect_current_track()
            .returning(|| Ok(Some(playing("uri:1"))));
        device.expect_next().times(1).returning(|| Ok(true));
        let session = session(2);

        assert_eq!(
            handle_gong(&device, &session, "alice").await.unwrap(),
            Reply::text("This is gong 1 of 2 for *Nine Inch Nails* - *Closer*")
        );
        assert_eq!(
            handle_gong(&device, &session, "alice").await.unwrap(),
            Reply::text("Nice try, <@alice>, you've already gonged this!")
        );
        assert_eq!(
            handle_gong(&device, &session, "bob").await.unwrap(),
            Reply::text("GONGED!")
        );
    }

    #[tokio::test]
    async fn test_gong_with_nothing_playing() {
        let mut device = MockPlaybackDevice::new();
        device.expect_current_track().returning(|| Ok(None));
        device.expect_next().never();

        assert_eq!(
            handle_gong(&device, &session(3), "alice").await.unwrap(),
            Reply::text(GENERIC_ERROR)
        );
    }
}
