//! Discord Rich Presence publisher.
//!
//! Talks to the local Discord client over its IPC socket. The session is
//! opened by [`DiscordPublisher::connect`] and closed when the publisher is
//! dropped.

use discord_rich_presence::{activity, DiscordIpc, DiscordIpcClient};
use kicad_presence_context::{PresencePublisher, PresenceState, PublishError};

/// Connected Discord IPC session.
pub struct DiscordPublisher {
    client: DiscordIpcClient,
}

impl DiscordPublisher {
    /// Open a session for the given Discord application.
    ///
    /// Fails when Discord is not running or refuses the handshake.
    pub fn connect(client_id: &str) -> Result<Self, PublishError> {
        let mut client =
            DiscordIpcClient::new(client_id).map_err(|e| PublishError::Connect(e.to_string()))?;

        client
            .connect()
            .map_err(|e| PublishError::Connect(e.to_string()))?;

        tracing::info!(client_id, "connected to Discord");
        Ok(Self { client })
    }
}

impl PresencePublisher for DiscordPublisher {
    fn update(&mut self, state: &PresenceState) -> Result<(), PublishError> {
        let mut assets = activity::Assets::new()
            .large_image(&state.large_image)
            .large_text(&state.large_text);
        if let Some(small_image) = state.small_image.as_deref() {
            assets = assets.small_image(small_image);
        }
        if let Some(small_text) = state.small_text.as_deref() {
            assets = assets.small_text(small_text);
        }

        let payload = activity::Activity::new()
            .details(&state.details)
            .state(&state.state_text)
            .assets(assets)
            .timestamps(activity::Timestamps::new().start(state.session_start.timestamp()));

        if let Err(err) = self.client.set_activity(payload) {
            // Discord may have restarted; the next tick uses the new socket.
            if let Err(reconnect_err) = self.client.reconnect() {
                tracing::debug!(error = %reconnect_err, "Discord reconnect failed");
            }
            return Err(PublishError::Update(err.to_string()));
        }

        Ok(())
    }

    fn clear(&mut self) -> Result<(), PublishError> {
        self.client
            .clear_activity()
            .map_err(|e| PublishError::Clear(e.to_string()))
    }
}

impl Drop for DiscordPublisher {
    fn drop(&mut self) {
        if let Err(err) = self.client.close() {
            tracing::debug!(error = %err, "failed to close Discord session");
        }
    }
}
