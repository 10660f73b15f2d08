use tracing::instrument;

use super::{
    error::CommandError,
    reply::{GENERIC_ERROR, PERMISSION_DENIED, Reply},
    service::Jukebox,
    table::{Lookup, Tier},
};

use crate::{
    config::sanitize_channel,
    ports::{CatalogProvider, ChatTransport, InboundMessage, PlaybackDevice},
    session::SessionHandle,
};

/// Split a raw message into a lower-cased keyword and its arguments joined by single spaces
///
/// Returns `None` for blank messages.
#[must_use]
pub fn parse_message(text: &str) -> Option<(String, String)> {
    let mut words = text.split_whitespace();
    let keyword = words.next()?.to_lowercase();
    let args = words.collect::<Vec<_>>().join(" ");
    Some((keyword, args))
}

/// Routes chat messages to commands and sends the replies back
pub struct Dispatcher<C, D, T> {
    jukebox: Jukebox<C, D>,
    transport: T,
}

impl<C, D, T> Dispatcher<C, D, T>
where
    C: CatalogProvider,
    D: PlaybackDevice,
    T: ChatTransport,
{
    pub fn new(jukebox: Jukebox<C, D>, transport: T) -> Self {
        tracing::debug!(
            standard = ?jukebox.table().keywords(Tier::Standard),
            admin = ?jukebox.table().keywords(Tier::Admin),
            "command table loaded"
        );
        Self { jukebox, transport }
    }

    #[must_use]
    pub fn jukebox(&self) -> &Jukebox<C, D> {
        &self.jukebox
    }

    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Look up and run one command
    ///
    /// Errors are logged here and turned into the generic reply (collaborator failures) or no
    /// reply at all (internal errors). Unknown keywords get no reply.
    #[instrument(skip(self, args, session), fields(channel = session.key()))]
    pub async fn dispatch(
        &self,
        keyword: &str,
        args: &str,
        sender_id: &str,
        is_privileged: bool,
        session: &SessionHandle,
    ) -> Option<Reply> {
        let kind = match self.jukebox.table().lookup(keyword, is_privileged) {
            Lookup::Command(kind) => kind,
            Lookup::AdminOnly => {
                tracing::info!(keyword, sender = sender_id, "admin command refused");
                return Some(Reply::text(PERMISSION_DENIED));
            }
            Lookup::Unknown => {
                tracing::trace!(keyword, "not a command");
                return None;
            }
        };

        match self.jukebox.execute(kind, args, sender_id, session).await {
            Ok(reply) => Some(reply),
            Err(error @ (CommandError::Catalog(_) | CommandError::Device(_))) => {
                tracing::warn!(command = %kind, error.kind = error.kind(), %error, "command failed");
                Some(Reply::text(GENERIC_ERROR))
            }
            Err(error @ CommandError::Internal(_)) => {
                tracing::error!(command = %kind, error.kind = error.kind(), %error, "command failed");
                None
            }
        }
    }

    /// Handle one inbound chat message end to end
    ///
    /// Sends at most one reply. Delivery failures are logged, never returned.
    pub async fn handle_message(&self, message: &InboundMessage) {
        let Some((keyword, args)) = parse_message(&message.text) else {
            return;
        };

        let is_privileged = self.jukebox.config().is_admin_channel(&message.channel_id);
        let session = self.jukebox.session(&sanitize_channel(&message.channel_id));

        let Some(reply) = self
            .dispatch(&keyword, &args, &message.sender_id, is_privileged, &session)
            .await
        else {
            return;
        };

        let sent = match &reply {
            Reply::Text(text) => self.transport.send_text(text, &message.channel_id).await,
            Reply::Rich(detail) => self.transport.send_rich(detail, &message.channel_id).await,
        };

        if let Err(error) = sent {
            tracing::error!(channel = %message.channel_id, %error, "failed to send reply");
        }
    }
}
