use std::num::NonZeroUsize;

use crate::command::reply::Reply;

pub(super) fn handle_help(gong_limit: NonZeroUsize) -> Reply {
    Reply::text(help_text(gong_limit.get()))
}

fn help_text(gong_limit: usize) -> String {
    format!(
        "\
>>>*Standard commands:*

  *`search`* _text_: Search for a track
  *`add`* _text_: Add a track to the queue. You can specify the full text or the letter code returned from a `search`.
  *`current`*: Display the currently playing track.
  *`gong`*: Express your dislike for the current track. {gong_limit} gongs and it will be skipped.
  *`searchalbum`* _text_: Search for an album
  *`searchartist`* _text_: Search for an artist
  *`addalbum`* _text_: Add an entire album to the queue.
  *`addartist`* _text_: Add an artist's top tracks to the queue.
  *`help`*: Display this message.
  *`list`*: Display the current queue.
  *`status`*: Get the current speaker status.
  *`volume`*: Show the current volume.

*Admin commands:*

  *`next`*: Skip to the next track
  *`searchplaylist`* _text_: Search for a playlist.
  *`setvolume`* _number_: Set the volume (0-100). `volume` _number_ does the same.
  *`shuffle`*: (Re)shuffle the queue
  *`stop`*: Stop the music entirely. :(
  *`pause`*: Pause the speaker
  *`playlist`* _text_: Replace the current queue with a playlist. You can specify the full text or the letter code returned from a `searchplaylist`. Without text, a random favourite is picked.
  *`previous`*: Go to the previous track
  *`play`*: Play or unpause the speaker"
    )
}
