//! Platform transport-command listener
//!
//! Maps media-session commands (hardware keys, lock-screen controls) onto
//! engine operations. Commands are requests; the session remains the only
//! source of truth.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::ports::media_session::TransportCommand;

use super::PlaybackEngine;

impl PlaybackEngine {
    pub(crate) fn start_transport_listener(
        &self,
        mut commands: mpsc::UnboundedReceiver<TransportCommand>,
    ) -> JoinHandle<()> {
        let engine = self.clone();
        tracing::info!("Starting transport command listener");

        tokio::spawn(async move {
            while let Some(command) = commands.recv().await {
                if engine.is_shutting_down().await {
                    break;
                }
                tracing::debug!(?command, "Transport command received");
                match command {
                    TransportCommand::Play => {
                        if !engine.is_playing().await {
                            engine.toggle_play().await;
                        }
                    }
                    TransportCommand::Pause => {
                        if engine.is_playing().await {
                            engine.toggle_play().await;
                        }
                    }
                    TransportCommand::Next => engine.play_next().await,
                    TransportCommand::Previous => engine.play_previous().await,
                    TransportCommand::SeekTo(position_secs) => {
                        engine.seek_to(position_secs).await;
                    }
                }
            }
            tracing::debug!("Transport command channel closed");
        })
    }
}
