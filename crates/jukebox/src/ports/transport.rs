//! Chat transport port
//!
//! The transport delivers [`InboundMessage`]s to the dispatcher and carries replies back to the
//! channel they came from.

use async_trait::async_trait;
use thiserror::Error;

use crate::format::Detail;

/// Port for sending replies to a chat channel
#[cfg_attr(any(test, feature = "with_mocks"), mockall::automock)]
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Post plain text to `channel`
    async fn send_text(&self, text: &str, channel: &str) -> Result<(), TransportError>;

    /// Post a rich reply (summary, body and optional thumbnail) to `channel`
    async fn send_rich(&self, detail: &Detail, channel: &str) -> Result<(), TransportError>;
}

/// A message typed by a user in some channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    pub text: String,
    pub sender_id: String,
    pub channel_id: String,
}

impl InboundMessage {
    pub fn new(
        text: impl Into<String>,
        sender_id: impl Into<String>,
        channel_id: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            sender_id: sender_id.into(),
            channel_id: channel_id.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Failed to deliver message to `{channel}`: {source}")]
    Delivery {
        channel: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Transport closed")]
    Closed,
}
