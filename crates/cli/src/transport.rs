//! A chat transport on top of the terminal
//!
//! Replies are written to stdout. Inbound messages are lines of text; see [`parse_line`].

use async_trait::async_trait;
use console::style;
use jukebox::{
    format::Detail,
    ports::{ChatTransport, InboundMessage, TransportError},
};
use tokio::{
    io::{AsyncWrite, AsyncWriteExt, Stdout},
    sync::Mutex,
};

pub(crate) struct ConsoleTransport<W = Stdout> {
    out: Mutex<W>,
    use_colors: bool,
}

impl ConsoleTransport {
    pub(crate) fn stdout(use_colors: bool) -> Self {
        Self::new(tokio::io::stdout(), use_colors)
    }
}

impl<W> ConsoleTransport<W>
where
    W: AsyncWrite + Unpin + Send,
{
    pub(crate) fn new(out: W, use_colors: bool) -> Self {
        Self {
            out: Mutex::new(out),
            use_colors,
        }
    }

    #[cfg(test)]
    pub(crate) fn into_inner(self) -> W {
        self.out.into_inner()
    }

    async fn write(&self, channel: &str, text: &str) -> Result<(), TransportError> {
        let delivery = |source| TransportError::Delivery {
            channel: channel.to_string(),
            source,
        };

        let mut out = self.out.lock().await;
        out.write_all(text.as_bytes()).await.map_err(delivery)?;
        out.write_all(b"\n").await.map_err(delivery)?;
        out.flush().await.map_err(delivery)
    }
}

#[async_trait]
impl<W> ChatTransport for ConsoleTransport<W>
where
    W: AsyncWrite + Unpin + Send,
{
    async fn send_text(&self, text: &str, channel: &str) -> Result<(), TransportError> {
        self.write(channel, text).await
    }

    async fn send_rich(&self, detail: &Detail, channel: &str) -> Result<(), TransportError> {
        let summary = if self.use_colors {
            style(&detail.summary).bold().to_string()
        } else {
            detail.summary.clone()
        };

        let mut text = format!("{summary}\n{}", detail.body);
        if let Some(url) = &detail.image_url {
            text.push_str(&format!("\n<{url}>"));
        }

        self.write(channel, &text).await
    }
}

/// Turn a line typed at the terminal into a message
///
/// A leading `#name` token picks the channel; otherwise the message goes to `default_channel`.
/// Blank lines yield `None`.
pub(crate) fn parse_line(line: &str, default_channel: &str, sender: &str) -> Option<InboundMessage> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    match line.split_once(char::is_whitespace) {
        Some((channel, text)) if channel.len() > 1 && channel.starts_with('#') => {
            Some(InboundMessage::new(text.trim_start(), sender, channel))
        }
        None if line.len() > 1 && line.starts_with('#') => None,
        _ => Some(InboundMessage::new(line, sender, default_channel)),
    }
}
