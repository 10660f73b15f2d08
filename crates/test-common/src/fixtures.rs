//! Catalog fixtures shaped like real provider results.

use jukebox::catalog::{Album, AlbumSummary, Artist, CatalogItem, Image, Playlist, Track};

fn track(id: &str, name: &str, artists: &[&str], explicit: bool, album: &AlbumSummary) -> CatalogItem {
    Track {
        uri: format!("spotify:track:{id}"),
        name: name.to_string(),
        artists: artists.iter().map(ToString::to_string).collect(),
        duration_ms: 240_000,
        explicit,
        album: album.clone(),
    }
    .into()
}

fn summary(name: &str, year: &str) -> AlbumSummary {
    AlbumSummary {
        name: name.to_string(),
        release_year: Some(year.to_string()),
        images: vec![
            Image::new(format!("https://img.test/{year}/640")),
            Image::new(format!("https://img.test/{year}/300")),
        ],
    }
}

/// Two tracks called "Closer"; only the second is explicit
#[must_use]
pub fn closer_tracks() -> Vec<CatalogItem> {
    vec![
        track(
            "closer-chainsmokers",
            "Closer",
            &["The Chainsmokers", "Halsey"],
            false,
            &summary("Closer", "2016"),
        ),
        track(
            "closer-nin",
            "Closer",
            &["Nine Inch Nails"],
            true,
            &summary("The Downward Spiral", "1994"),
        ),
    ]
}

/// Search results for "ok computer": the original album and its reissue
#[must_use]
pub fn ok_computer_albums() -> Vec<CatalogItem> {
    ["ok-computer", "oknotok"]
        .into_iter()
        .zip([("OK Computer", "1997"), ("OK Computer OKNOTOK 1997 2017", "2017")])
        .map(|(id, (name, year))| {
            Album {
                uri: format!("spotify:album:{id}"),
                name: name.to_string(),
                artists: vec!["Radiohead".to_string()],
                release_year: Some(year.to_string()),
                images: summary(name, year).images,
                href: format!("https://api.test/v1/albums/{id}"),
            }
            .into()
        })
        .collect()
}

/// Track list of one of the [`ok_computer_albums`], in album order
#[must_use]
pub fn ok_computer_tracks(album_id: &str) -> Vec<CatalogItem> {
    let album = summary("OK Computer", "1997");
    ["Airbag", "Paranoid Android", "Subterranean Homesick Alien", "Lucky"]
        .into_iter()
        .enumerate()
        .map(|(n, name)| track(&format!("{album_id}-{}", n + 1), name, &["Radiohead"], false, &album))
        .collect()
}

#[must_use]
pub fn james_artists() -> Vec<CatalogItem> {
    vec![
        Artist {
            uri: "spotify:artist:james".to_string(),
            id: "james".to_string(),
            name: "James".to_string(),
        }
        .into(),
        Artist {
            uri: "spotify:artist:james-blake".to_string(),
            id: "james-blake".to_string(),
            name: "James Blake".to_string(),
        }
        .into(),
    ]
}

/// Top tracks of the first of the [`james_artists`], most popular first
#[must_use]
pub fn james_top_tracks() -> Vec<CatalogItem> {
    let album = summary("Gold Mother", "1990");
    ["Sit Down", "Laid", "Sometimes"]
        .into_iter()
        .enumerate()
        .map(|(n, name)| track(&format!("james-top-{}", n + 1), name, &["James"], false, &album))
        .collect()
}

#[must_use]
pub fn dinner_playlists() -> Vec<CatalogItem> {
    [("dinner-jazz", "Dinner Jazz", 80), ("dinner-party", "Dinner Party", 120)]
        .into_iter()
        .map(|(id, name, track_count)| {
            Playlist {
                uri: format!("spotify:playlist:{id}"),
                name: name.to_string(),
                track_count,
            }
            .into()
        })
        .collect()
}
