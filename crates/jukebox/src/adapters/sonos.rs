//! Sonos speaker over UPnP/SOAP
//!
//! Control requests go to the speaker's `AVTransport`, `RenderingControl` and
//! `ContentDirectory` services. Catalog URIs are rewritten into the Sonos forms for the
//! Spotify music service before they are queued.

use std::fmt::{self, Write as _};

use async_trait::async_trait;
use quick_xml::{Reader, escape::escape, events::Event};
use reqwest::header::CONTENT_TYPE;
use tokio::sync::OnceCell;

use crate::{
    catalog::{CatalogItem, Playlist},
    config::AppConfig,
    ports::{DeviceError, NowPlaying, PlaybackDevice, PlaybackState, QueueEntry, QueuePage},
};

const DEFAULT_PORT: u16 = 1400;
const INSTANCE: (&str, &str) = ("InstanceID", "0");
const MASTER: (&str, &str) = ("Channel", "Master");
const QUEUE_OBJECT: &str = "Q:0";
const FAVOURITES_OBJECT: &str = "FV:2";
const FAVOURITES_PAGE: u32 = 100;

/// Spotify's service id on Sonos
const SPOTIFY_SID: u32 = 9;

#[derive(Debug, Clone, Copy)]
enum Service {
    AvTransport,
    RenderingControl,
    ContentDirectory,
}

impl Service {
    fn urn(self) -> &'static str {
        match self {
            Self::AvTransport => "urn:schemas-upnp-org:service:AVTransport:1",
            Self::RenderingControl => "urn:schemas-upnp-org:service:RenderingControl:1",
            Self::ContentDirectory => "urn:schemas-upnp-org:service:ContentDirectory:1",
        }
    }

    fn control_path(self) -> &'static str {
        match self {
            Self::AvTransport => "/MediaRenderer/AVTransport/Control",
            Self::RenderingControl => "/MediaRenderer/RenderingControl/Control",
            Self::ContentDirectory => "/MediaServer/ContentDirectory/Control",
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AvTransport => f.write_str("av_transport"),
            Self::RenderingControl => f.write_str("rendering_control"),
            Self::ContentDirectory => f.write_str("content_directory"),
        }
    }
}

/// [`PlaybackDevice`] driving a single Sonos speaker
pub struct SonosDevice {
    http: reqwest::Client,
    base_url: String,
    service_region: String,
    queue_uri: OnceCell<String>,
}

impl SonosDevice {
    pub fn new(config: &AppConfig) -> Result<Self, DeviceError> {
        let base_url = device_base_url(config.sonos().address())?;
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| request_error("client", e))?;

        tracing::info!(%base_url, "speaker address");

        Ok(Self {
            http,
            base_url,
            service_region: config.sonos().service_region().to_string(),
            queue_uri: OnceCell::new(),
        })
    }

    /// Send one SOAP action and return the response body
    async fn soap(
        &self,
        service: Service,
        action: &str,
        args: &[(&str, &str)],
    ) -> Result<String, DeviceError> {
        tracing::trace!(%service, action, "soap request");

        let response = self
            .http
            .post(format!("{}{}", self.base_url, service.control_path()))
            .header(CONTENT_TYPE, r#"text/xml; charset="utf-8""#)
            .header("SOAPACTION", format!("\"{}#{action}\"", service.urn()))
            .body(envelope(service, action, args))
            .send()
            .await
            .map_err(|e| request_error(action, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| request_error(action, e))?;

        if status.is_success() {
            return Ok(body);
        }

        let message = match element_text(&body, "errorCode") {
            Ok(Some(code)) => format!("UPnP error {code}"),
            _ => format!("HTTP {status}"),
        };
        Err(DeviceError::Fault {
            action: action.to_string(),
            message,
        })
    }

    /// Run a control action, reporting a SOAP fault as a refusal
    async fn accepted(
        &self,
        service: Service,
        action: &str,
        args: &[(&str, &str)],
    ) -> Result<bool, DeviceError> {
        match self.soap(service, action, args).await {
            Ok(_) => Ok(true),
            Err(error @ DeviceError::Fault { .. }) => {
                tracing::warn!(%service, action, %error, "speaker refused request");
                Ok(false)
            }
            Err(error) => Err(error),
        }
    }

    async fn browse(&self, object_id: &str, start: u32, count: u32) -> Result<String, DeviceError> {
        self.soap(
            Service::ContentDirectory,
            "Browse",
            &[
                ("ObjectID", object_id),
                ("BrowseFlag", "BrowseDirectChildren"),
                ("Filter", "*"),
                ("StartingIndex", start.to_string().as_str()),
                ("RequestedCount", count.to_string().as_str()),
                ("SortCriteria", ""),
            ],
        )
        .await
    }

    /// `x-rincon-queue:` URI of this speaker's own queue
    async fn queue_uri(&self) -> Result<&str, DeviceError> {
        let uri = self
            .queue_uri
            .get_or_try_init(|| async {
                let action = "device_description";
                let body = self
                    .http
                    .get(format!("{}/xml/device_description.xml", self.base_url))
                    .send()
                    .await
                    .map_err(|e| request_error(action, e))?
                    .text()
                    .await
                    .map_err(|e| request_error(action, e))?;

                let udn = required_text(&body, "UDN", action)?;
                let rincon = udn.trim_start_matches("uuid:");
                Ok::<_, DeviceError>(format!("x-rincon-queue:{rincon}#0"))
            })
            .await?;
        Ok(uri.as_str())
    }

    async fn add_to_queue(
        &self,
        uri: &str,
        metadata: &str,
        position: u32,
        as_next: bool,
    ) -> Result<bool, DeviceError> {
        self.accepted(
            Service::AvTransport,
            "AddURIToQueue",
            &[
                INSTANCE,
                ("EnqueuedURI", uri),
                ("EnqueuedURIMetaData", metadata),
                ("DesiredFirstTrackNumberEnqueued", position.to_string().as_str()),
                ("EnqueueAsNext", if as_next { "1" } else { "0" }),
            ],
        )
        .await
    }
}

#[async_trait]
impl PlaybackDevice for SonosDevice {
    async fn current_track(&self) -> Result<Option<NowPlaying>, DeviceError> {
        let xml = self
            .soap(Service::AvTransport, "GetPositionInfo", &[INSTANCE])
            .await?;
        parse_position_info(&xml)
    }

    async fn state(&self) -> Result<PlaybackState, DeviceError> {
        let action = "GetTransportInfo";
        let xml = self.soap(Service::AvTransport, action, &[INSTANCE]).await?;
        parse_transport_state(&required_text(&xml, "CurrentTransportState", action)?)
    }

    async fn enqueue_after_current(&self, uri: &str) -> Result<bool, DeviceError> {
        let (sonos_uri, metadata) = to_sonos_uri(uri, &self.service_region)?;
        let position = self
            .current_track()
            .await?
            .map_or(0, |now| now.queue_position)
            + 1;

        tracing::debug!(uri, position, "enqueueing after current track");
        self.add_to_queue(&sonos_uri, &metadata, position, true)
            .await
    }

    async fn replace_queue_and_play(&self, uri: &str) -> Result<bool, DeviceError> {
        let (sonos_uri, metadata) = to_sonos_uri(uri, &self.service_region)?;

        if !self
            .accepted(Service::AvTransport, "RemoveAllTracksFromQueue", &[INSTANCE])
            .await?
        {
            return Ok(false);
        }
        if !self.add_to_queue(&sonos_uri, &metadata, 0, false).await? {
            return Ok(false);
        }

        let queue_uri = self.queue_uri().await?;
        if !self
            .accepted(
                Service::AvTransport,
                "SetAVTransportURI",
                &[INSTANCE, ("CurrentURI", queue_uri), ("CurrentURIMetaData", "")],
            )
            .await?
        {
            return Ok(false);
        }

        self.play().await
    }

    async fn play(&self) -> Result<bool, DeviceError> {
        self.accepted(Service::AvTransport, "Play", &[INSTANCE, ("Speed", "1")])
            .await
    }

    async fn pause(&self) -> Result<bool, DeviceError> {
        self.accepted(Service::AvTransport, "Pause", &[INSTANCE]).await
    }

    async fn stop(&self) -> Result<bool, DeviceError> {
        self.accepted(Service::AvTransport, "Stop", &[INSTANCE]).await
    }

    async fn next(&self) -> Result<bool, DeviceError> {
        self.accepted(Service::AvTransport, "Next", &[INSTANCE]).await
    }

    async fn previous(&self) -> Result<bool, DeviceError> {
        self.accepted(Service::AvTransport, "Previous", &[INSTANCE])
            .await
    }

    async fn shuffle(&self) -> Result<bool, DeviceError> {
        // Going through NORMAL makes the speaker reshuffle even when already shuffling
        for mode in ["NORMAL", "SHUFFLE"] {
            if !self
                .accepted(
                    Service::AvTransport,
                    "SetPlayMode",
                    &[INSTANCE, ("NewPlayMode", mode)],
                )
                .await?
            {
                return Ok(false);
            }
        }
        Ok(true)
    }

    async fn volume(&self) -> Result<u8, DeviceError> {
        let action = "GetVolume";
        let xml = self
            .soap(Service::RenderingControl, action, &[INSTANCE, MASTER])
            .await?;
        let volume = required_text(&xml, "CurrentVolume", action)?;
        volume
            .trim()
            .parse()
            .map_err(|_| decode_error(action, format!("bad volume `{volume}`")))
    }

    async fn set_volume(&self, volume: u8) -> Result<bool, DeviceError> {
        self.accepted(
            Service::RenderingControl,
            "SetVolume",
            &[INSTANCE, MASTER, ("DesiredVolume", volume.to_string().as_str())],
        )
        .await
    }

    async fn list_queue(&self, start: u32, count: u32) -> Result<QueuePage, DeviceError> {
        let xml = self.browse(QUEUE_OBJECT, start, count).await?;
        let (total, items) = parse_browse(&xml)?;
        Ok(QueuePage {
            total,
            items: items
                .into_iter()
                .map(|item| QueueEntry {
                    uri: item.res,
                    artist: item.creator,
                    title: item.title,
                })
                .collect(),
        })
    }

    async fn favorite_playlists(&self) -> Result<Vec<CatalogItem>, DeviceError> {
        let xml = self.browse(FAVOURITES_OBJECT, 0, FAVOURITES_PAGE).await?;
        let (_, items) = parse_browse(&xml)?;
        Ok(items.into_iter().filter_map(favourite_playlist).collect())
    }
}

fn request_error(action: &str, error: impl fmt::Display) -> DeviceError {
    DeviceError::Request {
        action: action.to_string(),
        message: error.to_string(),
    }
}

fn decode_error(action: &str, error: impl fmt::Display) -> DeviceError {
    DeviceError::Decode {
        action: action.to_string(),
        message: error.to_string(),
    }
}

/// `http://host:port` for a configured `host` or `host:port`
fn device_base_url(address: &str) -> Result<String, DeviceError> {
    let url = url::Url::parse(&format!("http://{}", address.trim()))
        .map_err(|e| request_error("connect", format!("bad speaker address `{address}`: {e}")))?;
    let host = url
        .host_str()
        .filter(|host| !host.is_empty())
        .ok_or_else(|| request_error("connect", format!("bad speaker address `{address}`")))?;

    Ok(format!(
        "http://{host}:{}",
        url.port().unwrap_or(DEFAULT_PORT)
    ))
}

fn envelope(service: Service, action: &str, args: &[(&str, &str)]) -> String {
    let mut body = String::new();
    for (name, value) in args {
        let _ = write!(body, "<{name}>{}</{name}>", escape(*value));
    }

    format!(
        r#"<?xml version="1.0" encoding="utf-8"?><s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/" s:encodingStyle="http://schemas.xmlsoap.org/soap/encoding/"><s:Body><u:{action} xmlns:u="{}">{body}</u:{action}></s:Body></s:Envelope>"#,
        service.urn()
    )
}

/// Sonos transport URI and DIDL-Lite metadata for a catalog URI
///
/// URIs that are already Sonos URIs (`x-...`) pass through without metadata.
fn to_sonos_uri(uri: &str, service_region: &str) -> Result<(String, String), DeviceError> {
    if uri.starts_with("x-") {
        return Ok((uri.to_string(), String::new()));
    }

    let encoded = uri.replace(':', "%3a");
    let parts: Vec<_> = uri.split(':').collect();
    let (sonos_uri, item_id, class) = match parts.as_slice() {
        ["spotify", "track", _] => (
            format!("x-sonos-spotify:{encoded}?sid={SPOTIFY_SID}&flags=8224&sn=7"),
            format!("00032020{encoded}"),
            "object.item.audioItem.musicTrack",
        ),
        ["spotify", "album", _] => (
            format!("x-rincon-cpcontainer:1004206c{encoded}"),
            format!("0004206c{encoded}"),
            "object.container.album.musicAlbum",
        ),
        ["spotify", "playlist", _] | ["spotify", "user", _, "playlist", _] => (
            format!("x-rincon-cpcontainer:1006206c{encoded}"),
            format!("1006206c{encoded}"),
            "object.container.playlistContainer",
        ),
        _ => return Err(DeviceError::UnsupportedUri(uri.to_string())),
    };

    Ok((sonos_uri, didl_metadata(&item_id, class, service_region)))
}

fn didl_metadata(item_id: &str, class: &str, service_region: &str) -> String {
    format!(
        r#"<DIDL-Lite xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:upnp="urn:schemas-upnp-org:metadata-1-0/upnp/" xmlns:r="urn:schemas-rinconnetworks-com:metadata-1-0/" xmlns="urn:schemas-upnp-org:metadata-1-0/DIDL-Lite/"><item id="{item_id}" restricted="true"><dc:title></dc:title><upnp:class>{class}</upnp:class><desc id="cdudn" nameSpace="urn:schemas-rinconnetworks-com:metadata-1-0/">SA_RINCON{service_region}_X_#Svc{service_region}-0-Token</desc></item></DIDL-Lite>"#
    )
}

/// Catalog URI embedded in a Sonos URI, e.g. `spotify:playlist:...`
fn from_sonos_uri(sonos_uri: &str) -> Option<String> {
    let start = sonos_uri.to_ascii_lowercase().find("spotify%3a")?;
    let embedded = &sonos_uri[start..];
    let embedded = embedded.split('?').next().unwrap_or(embedded);
    Some(embedded.replace("%3a", ":").replace("%3A", ":"))
}

fn favourite_playlist(item: DidlItem) -> Option<CatalogItem> {
    let uri = from_sonos_uri(&item.res)?;
    if !uri.contains(":playlist:") {
        return None;
    }

    Some(
        Playlist {
            uri,
            name: item.title,
            track_count: 0,
        }
        .into(),
    )
}

/// Seconds in an `H:MM:SS` duration; anything unparseable counts as zero
fn parse_hms(value: &str) -> u64 {
    value
        .split(':')
        .try_fold(0u64, |total, part| {
            part.trim().parse::<u64>().ok().map(|n| total * 60 + n)
        })
        .unwrap_or_default()
}

fn parse_transport_state(state: &str) -> Result<PlaybackState, DeviceError> {
    match state.trim() {
        "PLAYING" => Ok(PlaybackState::Playing),
        "PAUSED_PLAYBACK" => Ok(PlaybackState::Paused),
        "STOPPED" => Ok(PlaybackState::Stopped),
        "TRANSITIONING" => Ok(PlaybackState::Transitioning),
        "NO_MEDIA_PRESENT" => Ok(PlaybackState::NoMedia),
        other => Err(decode_error(
            "GetTransportInfo",
            format!("unknown transport state `{other}`"),
        )),
    }
}

fn parse_position_info(xml: &str) -> Result<Option<NowPlaying>, DeviceError> {
    let action = "GetPositionInfo";
    let uri = required_text(xml, "TrackURI", action)?;
    if uri.trim().is_empty() {
        return Ok(None);
    }

    let metadata = element_text(xml, "TrackMetaData")
        .map_err(|e| decode_error(action, e))?
        .unwrap_or_default();
    let item = if metadata.starts_with('<') {
        parse_didl(&metadata)
            .map_err(|e| decode_error(action, e))?
            .into_iter()
            .next()
            .unwrap_or_default()
    } else {
        DidlItem::default()
    };

    let field = |tag| -> Result<String, DeviceError> {
        Ok(element_text(xml, tag)
            .map_err(|e| decode_error(action, e))?
            .unwrap_or_default())
    };

    Ok(Some(NowPlaying {
        uri,
        title: item.title,
        artist: item.creator,
        position_secs: parse_hms(&field("RelTime")?),
        duration_secs: parse_hms(&field("TrackDuration")?),
        queue_position: field("Track")?.trim().parse().unwrap_or_default(),
    }))
}

/// Total match count and items of a `Browse` response
fn parse_browse(xml: &str) -> Result<(u32, Vec<DidlItem>), DeviceError> {
    let action = "Browse";
    let total = required_text(xml, "TotalMatches", action)?
        .trim()
        .parse()
        .map_err(|e| decode_error(action, e))?;
    let didl = required_text(xml, "Result", action)?;
    let items = parse_didl(&didl).map_err(|e| decode_error(action, e))?;
    Ok((total, items))
}

fn required_text(xml: &str, tag: &str, action: &str) -> Result<String, DeviceError> {
    element_text(xml, tag)
        .map_err(|e| decode_error(action, e))?
        .ok_or_else(|| decode_error(action, format!("missing <{tag}>")))
}

/// Unescaped text of the first element whose local name is `tag`
fn element_text(xml: &str, tag: &str) -> Result<Option<String>, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    let tag = tag.as_bytes();
    let mut text: Option<String> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) if text.is_none() && e.local_name().as_ref() == tag => {
                text = Some(String::new());
            }
            Event::Empty(e) if text.is_none() && e.local_name().as_ref() == tag => {
                return Ok(Some(String::new()));
            }
            Event::Text(t) => {
                if let Some(text) = text.as_mut() {
                    text.push_str(&t.unescape()?);
                }
            }
            Event::End(e) if text.is_some() && e.local_name().as_ref() == tag => {
                return Ok(text);
            }
            Event::Eof => return Ok(None),
            _ => {}
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct DidlItem {
    title: String,
    creator: String,
    res: String,
}

#[derive(Clone, Copy)]
enum DidlField {
    Title,
    Creator,
    Res,
}

fn parse_didl(didl: &str) -> Result<Vec<DidlItem>, quick_xml::Error> {
    let mut reader = Reader::from_str(didl);
    let mut items = Vec::new();
    let mut current: Option<DidlItem> = None;
    let mut field: Option<DidlField> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"item" | b"container" => current = Some(DidlItem::default()),
                b"title" => field = Some(DidlField::Title),
                b"creator" => field = Some(DidlField::Creator),
                b"res" => field = Some(DidlField::Res),
                _ => field = None,
            },
            Event::Text(t) => {
                if let (Some(item), Some(field)) = (current.as_mut(), field) {
                    let text = t.unescape()?.into_owned();
                    match field {
                        DidlField::Title => item.title = text,
                        DidlField::Creator => item.creator = text,
                        DidlField::Res if item.res.is_empty() => item.res = text,
                        DidlField::Res => {}
                    }
                }
            }
            Event::End(e) => {
                field = None;
                if matches!(e.local_name().as_ref(), b"item" | b"container") {
                    items.extend(current.take());
                }
            }
            Event::Eof => return Ok(items),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const POSITION_INFO: &str = r#"<s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/"><s:Body><u:GetPositionInfoResponse xmlns:u="urn:schemas-upnp-org:service:AVTransport:1"><Track>4</Track><TrackDuration>0:02:36</TrackDuration><TrackMetaData>&lt;DIDL-Lite xmlns:dc=&quot;http://purl.org/dc/elements/1.1/&quot; xmlns=&quot;urn:schemas-upnp-org:metadata-1-0/DIDL-Lite/&quot;&gt;&lt;item id=&quot;-1&quot; parentID=&quot;-1&quot;&gt;&lt;res&gt;x-sonos-spotify:spotify%3atrack%3a1?sid=9&amp;amp;sn=7&lt;/res&gt;&lt;dc:title&gt;Laid&lt;/dc:title&gt;&lt;dc:creator&gt;James&lt;/dc:creator&gt;&lt;/item&gt;&lt;/DIDL-Lite&gt;</TrackMetaData><TrackURI>x-sonos-spotify:spotify%3atrack%3a1?sid=9&amp;sn=7</TrackURI><RelTime>0:01:05</RelTime></u:GetPositionInfoResponse></s:Body></s:Envelope>"#;

    fn browse_response(total: u32, didl_items: &str) -> String {
        let didl = format!(
            r#"<DIDL-Lite xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns="urn:schemas-upnp-org:metadata-1-0/DIDL-Lite/">{didl_items}</DIDL-Lite>"#
        );
        format!(
            "<s:Envelope><s:Body><u:BrowseResponse><Result>{}</Result><NumberReturned>0</NumberReturned><TotalMatches>{total}</TotalMatches></u:BrowseResponse></s:Body></s:Envelope>",
            escape(&didl)
        )
    }

    #[test]
    fn test_device_base_url() {
        assert_eq!(
            device_base_url("192.168.1.20").unwrap(),
            "http://192.168.1.20:1400"
        );
        assert_eq!(
            device_base_url(" speaker.local:1443 ").unwrap(),
            "http://speaker.local:1443"
        );
        assert!(matches!(
            device_base_url(""),
            Err(DeviceError::Request { .. })
        ));
    }

    #[test]
    fn test_envelope_escapes_arguments() {
        let body = envelope(
            Service::AvTransport,
            "AddURIToQueue",
            &[INSTANCE, ("EnqueuedURIMetaData", "<DIDL-Lite/>")],
        );

        assert!(body.contains(
            r#"<u:AddURIToQueue xmlns:u="urn:schemas-upnp-org:service:AVTransport:1">"#
        ));
        assert!(body.contains("<InstanceID>0</InstanceID>"));
        assert!(body.contains("<EnqueuedURIMetaData>&lt;DIDL-Lite/&gt;</EnqueuedURIMetaData>"));
    }

    #[test]
    fn test_track_uri_conversion() {
        let (uri, metadata) = to_sonos_uri("spotify:track:7BKLCZ1jbUBVqRi2FVlTVw", "2311").unwrap();

        assert_eq!(
            uri,
            "x-sonos-spotify:spotify%3atrack%3a7BKLCZ1jbUBVqRi2FVlTVw?sid=9&flags=8224&sn=7"
        );
        assert!(metadata.contains(r#"<item id="00032020spotify%3atrack%3a7BKLCZ1jbUBVqRi2FVlTVw""#));
        assert!(metadata.contains("SA_RINCON2311_X_#Svc2311-0-Token"));
    }

    #[test]
    fn test_container_uri_conversion() {
        let (album, _) = to_sonos_uri("spotify:album:6dVIqQ8qmQ5GBnJ9shOYGE", "2311").unwrap();
        assert_eq!(
            album,
            "x-rincon-cpcontainer:1004206cspotify%3aalbum%3a6dVIqQ8qmQ5GBnJ9shOYGE"
        );

        let (playlist, metadata) =
            to_sonos_uri("spotify:user:spotify:playlist:37i9dQZF1DX0XUsuxWHRQd", "3079").unwrap();
        assert_eq!(
            playlist,
            "x-rincon-cpcontainer:1006206cspotify%3auser%3aspotify%3aplaylist%3a37i9dQZF1DX0XUsuxWHRQd"
        );
        assert!(metadata.contains("object.container.playlistContainer"));
    }

    #[test]
    fn test_uri_conversion_passthrough_and_unsupported() {
        assert_eq!(
            to_sonos_uri("x-rincon-queue:RINCON_1#0", "2311").unwrap(),
            ("x-rincon-queue:RINCON_1#0".to_string(), String::new())
        );
        assert_eq!(
            to_sonos_uri("spotify:artist:1", "2311"),
            Err(DeviceError::UnsupportedUri("spotify:artist:1".to_string()))
        );
    }

    #[test]
    fn test_from_sonos_uri() {
        assert_eq!(
            from_sonos_uri("x-rincon-cpcontainer:1006206cspotify%3Aplaylist%3A37i9?sid=9&flags=8300"),
            Some("spotify:playlist:37i9".to_string())
        );
        assert_eq!(from_sonos_uri("x-sonosapi-radio:s1234?sid=254"), None);
    }

    #[test]
    fn test_parse_hms() {
        assert_eq!(parse_hms("0:02:36"), 156);
        assert_eq!(parse_hms("1:00:00"), 3600);
        assert_eq!(parse_hms("NOT_IMPLEMENTED"), 0);
        assert_eq!(parse_hms(""), 0);
    }

    #[test]
    fn test_parse_position_info() {
        let now = parse_position_info(POSITION_INFO).unwrap().unwrap();

        assert_eq!(
            now,
            NowPlaying {
                uri: "x-sonos-spotify:spotify%3atrack%3a1?sid=9&sn=7".to_string(),
                title: "Laid".to_string(),
                artist: "James".to_string(),
                position_secs: 65,
                duration_secs: 156,
                queue_position: 4,
            }
        );
    }

    #[test]
    fn test_parse_position_info_without_track() {
        let xml = "<u:GetPositionInfoResponse><Track>0</Track><TrackDuration>NOT_IMPLEMENTED</TrackDuration><TrackMetaData>NOT_IMPLEMENTED</TrackMetaData><TrackURI></TrackURI><RelTime>NOT_IMPLEMENTED</RelTime></u:GetPositionInfoResponse>";

        assert_eq!(parse_position_info(xml).unwrap(), None);
    }

    #[test]
    fn test_parse_transport_state() {
        assert_eq!(
            parse_transport_state("PAUSED_PLAYBACK").unwrap(),
            PlaybackState::Paused
        );
        assert_eq!(
            parse_transport_state("NO_MEDIA_PRESENT").unwrap(),
            PlaybackState::NoMedia
        );
        assert!(matches!(
            parse_transport_state("BUFFERING"),
            Err(DeviceError::Decode { .. })
        ));
    }

    #[test]
    fn test_parse_browse_queue() {
        let xml = browse_response(
            12,
            r#"<item id="Q:0/5" parentID="Q:0"><res protocolInfo="sonos.com-spotify:*:audio/x-spotify:*">x-sonos-spotify:spotify%3atrack%3a5?sid=9&amp;sn=7</res><dc:title>Sit Down</dc:title><dc:creator>James</dc:creator></item><item id="Q:0/6" parentID="Q:0"><res>x-sonos-spotify:spotify%3atrack%3a6</res><dc:title>Sometimes</dc:title><dc:creator>James</dc:creator></item>"#,
        );

        let (total, items) = parse_browse(&xml).unwrap();

        assert_eq!(total, 12);
        assert_eq!(
            items,
            vec![
                DidlItem {
                    title: "Sit Down".to_string(),
                    creator: "James".to_string(),
                    res: "x-sonos-spotify:spotify%3atrack%3a5?sid=9&sn=7".to_string(),
                },
                DidlItem {
                    title: "Sometimes".to_string(),
                    creator: "James".to_string(),
                    res: "x-sonos-spotify:spotify%3atrack%3a6".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_favourite_playlists_keep_only_spotify_playlists() {
        let xml = browse_response(
            3,
            r#"<item id="FV:2/1"><dc:title>Dinner Jazz</dc:title><res>x-rincon-cpcontainer:1006206cspotify%3aplaylist%3a1?sid=9</res></item><item id="FV:2/2"><dc:title>Radio 6</dc:title><res>x-sonosapi-stream:s44491?sid=254</res></item><item id="FV:2/3"><dc:title>OK Computer</dc:title><res>x-rincon-cpcontainer:1004206cspotify%3aalbum%3a2</res></item>"#,
        );

        let (_, items) = parse_browse(&xml).unwrap();
        let playlists: Vec<_> = items.into_iter().filter_map(favourite_playlist).collect();

        assert_eq!(
            playlists,
            vec![CatalogItem::from(Playlist {
                uri: "spotify:playlist:1".to_string(),
                name: "Dinner Jazz".to_string(),
                track_count: 0,
            })]
        );
    }

    #[test]
    fn test_fault_code_is_found() {
        let body = r#"<s:Envelope><s:Body><s:Fault><faultcode>s:Client</faultcode><faultstring>UPnPError</faultstring><detail><UPnPError xmlns="urn:schemas-upnp-org:control-1-0"><errorCode>701</errorCode></UPnPError></detail></s:Fault></s:Body></s:Envelope>"#;

        assert_eq!(
            element_text(body, "errorCode").unwrap(),
            Some("701".to_string())
        );
        assert_eq!(element_text(body, "missing").unwrap(), None);
    }
}
