use jukebox::{
    catalog::{CatalogItem, ItemKind},
    command::{Dispatcher, Jukebox},
    config::AppConfig,
    ports::{InboundMessage, PlaybackState},
};
use pretty_assertions::assert_eq;
use test_common::{
    ADMIN_CHANNEL, ALICE, BOB, CAROL, FakeCatalog, FakeDevice, RecordingTransport,
    STANDARD_CHANNEL, Sent, closer_tracks, dinner_playlists, james_artists, james_top_tracks,
    ok_computer_albums, ok_computer_tracks, test_config, test_config_with_gong_limit,
};

type TestDispatcher = Dispatcher<FakeCatalog, FakeDevice, RecordingTransport>;

struct Harness {
    dispatcher: TestDispatcher,
    catalog: FakeCatalog,
    device: FakeDevice,
    transport: RecordingTransport,
}

impl Harness {
    fn new(catalog: FakeCatalog, device: FakeDevice) -> Self {
        Self::with_config(catalog, device, test_config())
    }

    fn with_config(catalog: FakeCatalog, device: FakeDevice, config: AppConfig) -> Self {
        let transport = RecordingTransport::new();
        let dispatcher = Dispatcher::new(
            Jukebox::new(catalog.clone(), device.clone(), config),
            transport.clone(),
        );
        Self {
            dispatcher,
            catalog,
            device,
            transport,
        }
    }

    async fn say(&self, channel: &str, sender: &str, text: &str) -> Option<Sent> {
        self.transport.clear();
        self.dispatcher
            .handle_message(&InboundMessage::new(text, sender, channel))
            .await;
        let sent = self.transport.sent();
        assert!(sent.len() <= 1, "more than one reply: {sent:?}");
        sent.into_iter().next()
    }

    async fn say_text(&self, channel: &str, sender: &str, text: &str) -> String {
        match self.say(channel, sender, text).await {
            Some(Sent::Text { text, .. }) => text,
            other => panic!("expected a text reply to `{text}`, got {other:?}"),
        }
    }
}

fn uris(items: &[CatalogItem]) -> Vec<String> {
    items.iter().map(|item| item.uri().to_string()).collect()
}

#[tokio::test]
async fn test_search_lists_tracks_with_letter_codes() {
    let catalog = FakeCatalog::new().with_search(ItemKind::Track, "closer", closer_tracks());
    let harness = Harness::new(catalog, FakeDevice::new());

    let reply = harness.say_text(STANDARD_CHANNEL, ALICE, "search closer").await;

    assert_eq!(
        reply,
        "*I found the following tracks:*\n\n\
         *a.* The Chainsmokers, Halsey - Closer\n\
         *b.* Nine Inch Nails - Closer *`E`*\n\n\
         *To add to the queue, use the `add` command.*"
    );
}

#[tokio::test]
async fn test_add_by_letter_queues_after_current_track() {
    let catalog = FakeCatalog::new().with_search(ItemKind::Track, "closer", closer_tracks());
    let device = FakeDevice::new().playing(&["spotify:track:now", "spotify:track:later"]);
    let harness = Harness::new(catalog, device);

    harness.say(STANDARD_CHANNEL, ALICE, "search closer").await;
    let reply = harness.say(STANDARD_CHANNEL, BOB, "add b").await;

    let Some(Sent::Rich { channel, detail }) = reply else {
        panic!("expected a rich reply, got {reply:?}");
    };
    assert_eq!(channel, STANDARD_CHANNEL);
    assert_eq!(detail.summary, "Track added to queue.");
    assert!(detail.body.starts_with("*Closer* *`E`* (4:00)"));
    assert_eq!(detail.image_url.as_deref(), Some("https://img.test/1994/300"));
    assert_eq!(
        harness.device.queue_uris(),
        [
            "spotify:track:now",
            "spotify:track:closer-nin",
            "spotify:track:later"
        ]
    );
}

#[tokio::test]
async fn test_add_by_prefix_and_by_fresh_search() {
    let catalog = FakeCatalog::new()
        .with_search(ItemKind::Track, "closer", closer_tracks())
        .with_search(ItemKind::Track, "nine inch nails closer", closer_tracks()[1..].to_vec());
    let harness = Harness::new(catalog, FakeDevice::new());

    harness.say(STANDARD_CHANNEL, ALICE, "search closer").await;
    harness.say(STANDARD_CHANNEL, ALICE, "add the chainsmokers").await;
    harness
        .say(STANDARD_CHANNEL, ALICE, "add nine inch nails closer")
        .await;

    assert_eq!(
        harness.catalog.calls(),
        ["search_tracks(closer)", "search_tracks(nine inch nails closer)"]
    );
    assert_eq!(
        harness.device.queue_uris(),
        ["spotify:track:closer-nin", "spotify:track:closer-chainsmokers"]
    );
}

#[tokio::test]
async fn test_add_without_argument_asks_what_to_add() {
    let harness = Harness::new(FakeCatalog::new(), FakeDevice::new());

    let reply = harness.say_text(STANDARD_CHANNEL, ALICE, "add").await;

    assert_eq!(reply, "What am I adding?");
    assert!(harness.catalog.calls().is_empty());
}

#[tokio::test]
async fn test_addalbum_queues_every_track_in_album_order() {
    let albums = ok_computer_albums();
    let catalog = FakeCatalog::new()
        .with_search(ItemKind::Album, "ok computer", albums)
        .with_album_tracks(
            "https://api.test/v1/albums/oknotok",
            ok_computer_tracks("oknotok"),
        );
    let device = FakeDevice::new().playing(&["spotify:track:now"]);
    let harness = Harness::new(catalog, device);

    harness
        .say(STANDARD_CHANNEL, ALICE, "searchalbum ok computer")
        .await;
    let reply = harness.say(STANDARD_CHANNEL, ALICE, "addalbum b").await;

    assert!(matches!(
        reply,
        Some(Sent::Rich { ref detail, .. }) if detail.summary == "Album added to queue."
    ));
    let mut expected = vec!["spotify:track:now".to_string()];
    expected.extend(uris(&ok_computer_tracks("oknotok")));
    assert_eq!(harness.device.queue_uris(), expected);
}

#[tokio::test]
async fn test_addartist_queues_top_tracks_and_lists_queue() {
    let catalog = FakeCatalog::new()
        .with_search(ItemKind::Artist, "james", james_artists())
        .with_top_tracks("james", james_top_tracks());
    let device = FakeDevice::new()
        .with_library(&james_top_tracks())
        .playing(&["spotify:track:now"]);
    let harness = Harness::new(catalog, device);

    let listing = harness
        .say_text(STANDARD_CHANNEL, ALICE, "searchartist james")
        .await;
    assert!(listing.contains("*a.* James\n*b.* James Blake"));

    let reply = harness.say_text(STANDARD_CHANNEL, ALICE, "addartist a").await;

    assert_eq!(
        reply,
        "Artist added to queue.\n\
         *4* total tracks in queue:\n\n\
         *1.* * - spotify:track:now* :notes:\n\
         *2.* James - Sit Down\n\
         *3.* James - Laid\n\
         *4.* James - Sometimes"
    );
}

#[tokio::test]
async fn test_admin_commands_are_refused_outside_admin_channel() {
    let device = FakeDevice::new().playing(&["spotify:track:1", "spotify:track:2"]);
    let harness = Harness::new(FakeCatalog::new(), device);

    for keyword in ["next", "stop", "setvolume 10", "playlist jazz", "searchplaylist jazz"] {
        let reply = harness.say_text(STANDARD_CHANNEL, ALICE, keyword).await;
        assert_eq!(reply, "Sorry, only admins can do that.", "for `{keyword}`");
    }

    assert!(harness.device.calls().is_empty());
    assert!(harness.catalog.calls().is_empty());
}

#[tokio::test]
async fn test_volume_in_admin_channel() {
    let harness = Harness::new(FakeCatalog::new(), FakeDevice::new());

    let reply = harness.say_text(ADMIN_CHANNEL, ALICE, "volume 150").await;
    assert_eq!(reply, "Invalid volume.");
    assert!(harness.device.calls().is_empty());

    let reply = harness.say_text(ADMIN_CHANNEL, ALICE, "volume 50").await;
    assert_eq!(reply, "Volume is now 50.");
    assert_eq!(harness.device.calls(), ["set_volume(50)", "volume()"]);

    let reply = harness.say_text(ADMIN_CHANNEL, ALICE, "volume").await;
    assert_eq!(reply, "Current volume is 50.");
}

#[tokio::test]
async fn test_volume_in_standard_channel_only_reports() {
    let harness = Harness::new(FakeCatalog::new(), FakeDevice::new());

    let reply = harness.say_text(STANDARD_CHANNEL, ALICE, "volume 50").await;

    assert_eq!(reply, "Current volume is 20.");
    assert_eq!(harness.device.calls(), ["volume()"]);
}

#[tokio::test]
async fn test_gong_skips_after_limit_distinct_voters() {
    let device = FakeDevice::new()
        .with_library(&closer_tracks())
        .playing(&["spotify:track:closer-nin", "spotify:track:next"]);
    let harness = Harness::with_config(FakeCatalog::new(), device, test_config_with_gong_limit(2));

    assert_eq!(
        harness.say_text(STANDARD_CHANNEL, ALICE, "gong").await,
        "This is gong 1 of 2 for *Nine Inch Nails* - *Closer*"
    );
    assert_eq!(
        harness.say_text(STANDARD_CHANNEL, ALICE, "gong").await,
        format!("Nice try, <@{ALICE}>, you've already gonged this!")
    );
    assert_eq!(
        harness.say_text(STANDARD_CHANNEL, BOB, "gong").await,
        "GONGED!"
    );
    assert_eq!(
        harness.device.current_uri().as_deref(),
        Some("spotify:track:next")
    );

    // A new track starts a new vote
    assert_eq!(
        harness.say_text(STANDARD_CHANNEL, CAROL, "gong").await,
        "This is gong 1 of 2 for ** - *spotify:track:next*"
    );
}

#[tokio::test]
async fn test_result_sets_are_per_channel() {
    let catalog = FakeCatalog::new().with_search(ItemKind::Track, "closer", closer_tracks());
    let harness = Harness::new(catalog, FakeDevice::new());

    harness.say(STANDARD_CHANNEL, ALICE, "search closer").await;
    let reply = harness.say_text(ADMIN_CHANNEL, ALICE, "add a").await;

    assert_eq!(
        reply,
        "I could not find that track. Have you tried `search`ing for it?"
    );
    assert_eq!(
        harness.catalog.calls(),
        ["search_tracks(closer)", "search_tracks(a)"]
    );
}

#[tokio::test]
async fn test_playlist_search_then_play() {
    let catalog = FakeCatalog::new().with_search(ItemKind::Playlist, "dinner", dinner_playlists());
    let harness = Harness::new(catalog, FakeDevice::new());

    let listing = harness
        .say_text(ADMIN_CHANNEL, ALICE, "searchplaylist dinner")
        .await;
    assert!(listing.contains("*b.* Dinner Party  _(120 tracks)_"));

    let reply = harness.say_text(ADMIN_CHANNEL, ALICE, "playlist b").await;

    assert!(reply.starts_with("*Dinner Party* is now playing!"));
    assert_eq!(
        harness.device.queue_uris(),
        ["spotify:playlist:dinner-party"]
    );
    assert_eq!(harness.device.playback_state(), PlaybackState::Playing);
}

#[tokio::test]
async fn test_playlist_without_argument_falls_back_to_featured() {
    let catalog = FakeCatalog::new().with_featured(dinner_playlists()[..1].to_vec());
    let harness = Harness::new(catalog, FakeDevice::new());

    let reply = harness.say_text(ADMIN_CHANNEL, ALICE, "playlist").await;

    assert!(reply.starts_with(
        "No playlist specified, picking from Spotify featured playlists...\n*Dinner Jazz* is now playing!"
    ));
}

#[tokio::test]
async fn test_catalog_outage_gets_generic_reply() {
    let catalog = FakeCatalog::new();
    catalog.set_unavailable(true);
    let harness = Harness::new(catalog, FakeDevice::new());

    let reply = harness.say_text(STANDARD_CHANNEL, ALICE, "search closer").await;

    assert_eq!(reply, "Something went wrong :(");
}

#[tokio::test]
async fn test_refused_skip_gets_generic_reply() {
    let device = FakeDevice::new().playing(&["spotify:track:1"]);
    device.set_refusing(true);
    let harness = Harness::new(FakeCatalog::new(), device);

    assert_eq!(
        harness.say_text(ADMIN_CHANNEL, ALICE, "next").await,
        "Something went wrong :("
    );
}

#[tokio::test]
async fn test_unknown_keywords_are_ignored() {
    let harness = Harness::new(FakeCatalog::new(), FakeDevice::new());

    assert_eq!(harness.say(STANDARD_CHANNEL, ALICE, "hello everyone").await, None);
    assert_eq!(harness.say(ADMIN_CHANNEL, ALICE, "").await, None);
}

#[tokio::test]
async fn test_channel_names_are_sanitized() {
    let device = FakeDevice::new().playing(&["spotify:track:1", "spotify:track:2"]);
    let harness = Harness::new(FakeCatalog::new(), device);

    let reply = harness.say_text("#Music-Admin", ALICE, "next").await;

    assert_eq!(reply, "Skipping track...");
}
