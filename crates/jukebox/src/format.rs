//! Text rendering for catalog items
//!
//! Pure functions only: given the same items in the same order these always produce the same
//! text. Output uses chat markup (`*bold*`, `_italic_`, `` `code` ``).

use std::sync::LazyLock;

use regex::Regex;

use crate::catalog::{CatalogItem, Track};

/// Marker appended to tracks flagged as explicit
pub const EXPLICIT_MARKER: &str = " *`E`*";

/// Number of letter codes available (a-z)
pub const LETTER_CODES: usize = 26;

static LETTER_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^[a-z]\.?\s*$").expect("letter code pattern is valid"));

/// Rich reply payload for a single item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detail {
    pub summary: String,
    pub body: String,
    pub image_url: Option<String>,
}

fn format_artists(artists: &[String]) -> String {
    artists.join(", ")
}

fn release_year_suffix(year: Option<&str>) -> String {
    year.map(|y| format!(" ({y})")).unwrap_or_default()
}

fn explicit_suffix(track: &Track) -> &'static str {
    if track.explicit { EXPLICIT_MARKER } else { "" }
}

/// Single-line rendering of an item
///
/// This is also the text that prefix selection matches against.
#[must_use]
pub fn format_item(item: &CatalogItem) -> String {
    match item {
        CatalogItem::Track(track) => format!(
            "{} - {}{}",
            format_artists(&track.artists),
            track.name,
            explicit_suffix(track)
        ),
        CatalogItem::Album(album) => format!(
            "{} - {}{}",
            format_artists(&album.artists),
            album.name,
            release_year_suffix(album.release_year.as_deref())
        ),
        CatalogItem::Artist(artist) => artist.name.clone(),
        CatalogItem::Playlist(playlist) => {
            format!("{}  _({} tracks)_", playlist.name, playlist.track_count)
        }
    }
}

/// Richer rendering used after an item has been queued
#[must_use]
pub fn render_detail(item: &CatalogItem) -> Detail {
    let (summary, body) = match item {
        CatalogItem::Track(track) => (
            "Track added to queue.",
            format!(
                "*{}*{} ({})\n\n{}\n_{}_\n_{}_",
                track.name,
                explicit_suffix(track),
                format_millis(track.duration_ms),
                format_artists(&track.artists),
                track.album.name,
                track.album.release_year.as_deref().unwrap_or_default(),
            ),
        ),
        CatalogItem::Album(album) => (
            "Album added to queue.",
            format!(
                "*{}*\n{}\n_{}_",
                album.name,
                format_artists(&album.artists),
                album.release_year.as_deref().unwrap_or_default(),
            ),
        ),
        CatalogItem::Artist(artist) => ("Artist added to queue.", format!("*{}*", artist.name)),
        CatalogItem::Playlist(playlist) => (
            "Playlist is now playing.",
            format!("*{}*\n_{} tracks_", playlist.name, playlist.track_count),
        ),
    };

    Detail {
        summary: summary.to_string(),
        body,
        image_url: item.thumbnail().map(|image| image.url.clone()),
    }
}

/// Letter-indexed list of the first 26 items, one per line
#[must_use]
pub fn render_list(items: &[CatalogItem]) -> String {
    items
        .iter()
        .take(LETTER_CODES)
        .enumerate()
        .filter_map(|(idx, item)| {
            index_to_letter(idx).map(|letter| format!("*{letter}.* {}", format_item(item)))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// `m:ss` from milliseconds, rounded to the nearest second. Minutes are not wrapped into hours.
#[must_use]
pub fn format_millis(millis: u64) -> String {
    format_seconds((millis + 500) / 1000)
}

/// `m:ss` from whole seconds. Minutes are not wrapped into hours.
#[must_use]
pub fn format_seconds(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Letter code for a result set position, `None` past `z`
#[must_use]
pub fn index_to_letter(index: usize) -> Option<char> {
    (index < LETTER_CODES).then(|| char::from(b'a' + index as u8))
}

/// Result set position for the first character of `code`, case-insensitively
#[must_use]
pub fn letter_to_index(code: &str) -> Option<usize> {
    let first = code.chars().next()?.to_ascii_lowercase();
    first
        .is_ascii_lowercase()
        .then(|| (first as u8 - b'a') as usize)
}

/// Whether `token` is a letter code: one letter, an optional period, optional trailing space
#[must_use]
pub fn is_letter_code(token: &str) -> bool {
    LETTER_CODE.is_match(token)
}

/// Loose match: every whitespace-separated word of `query` occurs in `text`, ignoring case
///
/// Words are matched literally, so regex metacharacters in the query have no special meaning.
#[must_use]
pub fn word_search(query: &str, text: &str) -> bool {
    let haystack = text.to_lowercase();
    query
        .split_whitespace()
        .all(|word| haystack.contains(&word.to_lowercase()))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::catalog::{Album, AlbumSummary, Artist, Image, Playlist};

    fn track(artists: &[&str], name: &str, explicit: bool) -> CatalogItem {
        Track {
            uri: format!("spotify:track:{name}"),
            name: name.to_string(),
            artists: artists.iter().map(ToString::to_string).collect(),
            duration_ms: 237_480,
            explicit,
            album: AlbumSummary {
                name: "Collage".to_string(),
                release_year: Some("2016".to_string()),
                images: vec![Image::new("big"), Image::new("medium")],
            },
        }
        .into()
    }

    mod letters {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_letter_to_index() {
            assert_eq!(letter_to_index("a"), Some(0));
            assert_eq!(letter_to_index("b"), Some(1));
            assert_eq!(letter_to_index("z"), Some(25));
            assert_eq!(letter_to_index("E"), Some(4));
            assert_eq!(letter_to_index("Y"), Some(24));
            assert_eq!(letter_to_index("b....!"), Some(1));
        }

        #[test]
        fn test_letter_to_index_rejects_non_letters() {
            assert_eq!(letter_to_index("["), None);
            assert_eq!(letter_to_index("~"), None);
            assert_eq!(letter_to_index(""), None);
            assert_eq!(letter_to_index("é"), None);
        }

        #[test]
        fn test_index_to_letter() {
            assert_eq!(index_to_letter(0), Some('a'));
            assert_eq!(index_to_letter(1), Some('b'));
            assert_eq!(index_to_letter(25), Some('z'));
            assert_eq!(index_to_letter(26), None);
            assert_eq!(index_to_letter(12131), None);
        }

        #[test]
        fn test_letter_codes_are_a_bijection() {
            for idx in 0..LETTER_CODES {
                let letter = index_to_letter(idx).unwrap();
                assert_eq!(letter_to_index(&letter.to_string()), Some(idx));
            }
        }

        #[test]
        fn test_is_letter_code() {
            assert!(is_letter_code("a"));
            assert!(is_letter_code("b"));
            assert!(is_letter_code("c."));
            assert!(is_letter_code("D.   "));
            assert!(is_letter_code("E          "));
        }

        #[test]
        fn test_is_letter_code_rejects_other_input() {
            assert!(!is_letter_code("0"));
            assert!(!is_letter_code("Hi, how are you?"));
            assert!(!is_letter_code("Special K"));
            assert!(!is_letter_code(""));
            assert!(!is_letter_code("f.f.f.f."));
        }
    }

    mod durations {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_format_millis() {
            assert_eq!(format_millis(237_480), "3:57");
            assert_eq!(format_millis(61_000), "1:01");
            assert_eq!(format_millis(30_000), "0:30");
            assert_eq!(format_millis(2 * 60 * 60 * 1000), "120:00");
        }

        #[test]
        fn test_format_millis_never_shows_sixty_seconds() {
            assert_eq!(format_millis(59_600), "1:00");
        }

        #[test]
        fn test_format_seconds() {
            assert_eq!(format_seconds(237), "3:57");
            assert_eq!(format_seconds(61), "1:01");
            assert_eq!(format_seconds(30), "0:30");
            assert_eq!(format_seconds(2 * 60 * 60), "120:00");
        }
    }

    mod word_search {
        use super::*;

        const TEXT: &str = "This is most certainly a string with a few words in it";

        #[test]
        fn test_matches_every_word() {
            assert!(word_search("this is", TEXT));
            assert!(word_search("This is", TEXT));
            assert!(word_search("CERTAIN", TEXT));
            assert!(word_search("string few words", TEXT));
            assert!(word_search("a it is with this", TEXT));
        }

        #[test]
        fn test_rejects_missing_words() {
            assert!(!word_search("not here", TEXT));
            assert!(!word_search("This is most certainly a camel", TEXT));
            assert!(!word_search("This is almost certainly a string", TEXT));
        }

        #[test]
        fn test_special_chars_are_literal() {
            let text = "Some cool regex chars are (?:/])";
            assert!(!word_search(".*", text));
            assert!(word_search("(?:/", text));
        }
    }

    #[test]
    fn test_format_track_with_explicit_marker() {
        assert_eq!(
            format_item(&track(&["Nine Inch Nails"], "Closer", true)),
            "Nine Inch Nails - Closer *`E`*"
        );
        assert_eq!(
            format_item(&track(&["The Chainsmokers", "Halsey"], "Closer", false)),
            "The Chainsmokers, Halsey - Closer"
        );
    }

    #[test]
    fn test_format_other_kinds() {
        let album: CatalogItem = Album {
            uri: "spotify:album:1".to_string(),
            name: "OK Computer".to_string(),
            artists: vec!["Radiohead".to_string()],
            release_year: Some("1997".to_string()),
            images: vec![],
            href: String::new(),
        }
        .into();
        let artist: CatalogItem = Artist {
            uri: "spotify:artist:1".to_string(),
            id: "1".to_string(),
            name: "James Blake".to_string(),
        }
        .into();
        let playlist: CatalogItem = Playlist {
            uri: "spotify:playlist:1".to_string(),
            name: "Calm Classical".to_string(),
            track_count: 68,
        }
        .into();

        assert_eq!(format_item(&album), "Radiohead - OK Computer (1997)");
        assert_eq!(format_item(&artist), "James Blake");
        assert_eq!(format_item(&playlist), "Calm Classical  _(68 tracks)_");
    }

    #[test]
    fn test_render_list() {
        let items = vec![
            track(&["The Chainsmokers", "Halsey"], "Closer", false),
            track(&["Nine Inch Nails"], "Closer", true),
        ];

        assert_eq!(
            render_list(&items),
            "*a.* The Chainsmokers, Halsey - Closer\n*b.* Nine Inch Nails - Closer *`E`*"
        );
    }

    #[test]
    fn test_render_list_truncates_after_z() {
        let items: Vec<_> = (0..30)
            .map(|i| track(&["Artist"], &format!("Song {i}"), false))
            .collect();

        let rendered = render_list(&items);
        let lines: Vec<_> = rendered.lines().collect();

        assert_eq!(lines.len(), LETTER_CODES);
        assert_eq!(lines[25], "*z.* Artist - Song 25");
    }

    #[test]
    fn test_render_track_detail() {
        let detail = render_detail(&track(&["Nine Inch Nails"], "Closer", true));

        assert_eq!(detail.summary, "Track added to queue.");
        assert_eq!(
            detail.body,
            "*Closer* *`E`* (3:57)\n\nNine Inch Nails\n_Collage_\n_2016_"
        );
        assert_eq!(detail.image_url.as_deref(), Some("medium"));
    }

    #[test]
    fn test_render_album_detail() {
        let album: CatalogItem = Album {
            uri: "spotify:album:4ENxWWkPImVwAle9cpJ12I".to_string(),
            name: "OK Computer OKNOTOK 1997 2017".to_string(),
            artists: vec!["Radiohead".to_string()],
            release_year: Some("2017".to_string()),
            images: vec![Image::new("640"), Image::new("300"), Image::new("64")],
            href: String::new(),
        }
        .into();

        let detail = render_detail(&album);

        assert_eq!(detail.summary, "Album added to queue.");
        assert_eq!(detail.body, "*OK Computer OKNOTOK 1997 2017*\nRadiohead\n_2017_");
        assert_eq!(detail.image_url.as_deref(), Some("300"));
    }
}
