//! Engine module - playback orchestration
//!
//! `PlaybackEngine` drives the single audio device in lockstep with the
//! session state and absorbs every failure into an advisory or a log line.
//! It is organized into submodules by responsibility:
//!
//! - `playback`: play/pause/advance/seek/volume operations
//! - `queue`: queue mutation
//! - `library`: like/save bookkeeping and sharing
//! - `device_events`: the device event listener
//! - `transport`: platform transport-command listener

mod device_events;
mod library;
mod playback;
mod queue;
mod transport;

use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::config::EngineConfig;
use crate::model::{Advisory, Library, PlaybackInfo, PlaybackSession, RepeatMode, Track};
use crate::outbox::Outbox;
use crate::ports::catalog::TrackCatalog;
use crate::ports::device::AudioDevice;
use crate::ports::engagement::EngagementStore;
use crate::ports::media_session::{MediaSessionPort, NowPlaying};
use crate::ports::share::ShareTarget;
use crate::ports::storage::KvStore;
use crate::resolve::{MediaResolver, UrlProber};

/// Everything the engine needs from the outside world, decided by the
/// composition root.
pub struct EnginePorts {
    pub device: Arc<dyn AudioDevice>,
    pub catalog: Arc<dyn TrackCatalog>,
    pub engagement: Arc<dyn EngagementStore>,
    pub storage: Arc<dyn KvStore>,
    pub share: Arc<dyn ShareTarget>,
    pub media_session: Option<Arc<dyn MediaSessionPort>>,
    pub prober: Arc<dyn UrlProber>,
}

/// The playback engine. Cloneable handle over shared session state; one
/// instance of the underlying state exists per application run.
#[derive(Clone)]
pub struct PlaybackEngine {
    pub(crate) session: Arc<Mutex<PlaybackSession>>,
    pub(crate) library: Library,
    pub(crate) device: Arc<dyn AudioDevice>,
    pub(crate) catalog: Arc<dyn TrackCatalog>,
    pub(crate) share_target: Arc<dyn ShareTarget>,
    pub(crate) media_session: Option<Arc<dyn MediaSessionPort>>,
    pub(crate) resolver: MediaResolver,
    pub(crate) outbox: Outbox,
    pub(crate) config: Arc<EngineConfig>,
    /// Serializes device source assignment across concurrent loads.
    pub(crate) load_gate: Arc<Mutex<()>>,
    listeners_started: Arc<Mutex<bool>>,
    shutting_down: Arc<Mutex<bool>>,
    listener_tasks: Arc<Mutex<Vec<JoinHandle<()>>>>,
    outbox_task: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl PlaybackEngine {
    /// Build the engine, loading liked/saved sets from storage and spawning
    /// the engagement outbox. Call [`PlaybackEngine::start`] afterwards to
    /// attach the event listeners.
    pub async fn new(config: EngineConfig, ports: EnginePorts) -> Self {
        let library = Library::load(ports.storage).await;
        let resolver = MediaResolver::new(
            ports.prober,
            config.media_base_url.clone(),
            config.probe_timeout(),
        );
        let (outbox, outbox_task) = Outbox::spawn(
            ports.engagement,
            config.outbox_retry_limit,
            config.outbox_retry_base(),
        );
        let session = PlaybackSession::new(config.default_volume, config.advisory_ttl());

        Self {
            session: Arc::new(Mutex::new(session)),
            library,
            device: ports.device,
            catalog: ports.catalog,
            share_target: ports.share,
            media_session: ports.media_session,
            resolver,
            outbox,
            config: Arc::new(config),
            load_gate: Arc::new(Mutex::new(())),
            listeners_started: Arc::new(Mutex::new(false)),
            shutting_down: Arc::new(Mutex::new(false)),
            listener_tasks: Arc::new(Mutex::new(Vec::new())),
            outbox_task: Arc::new(Mutex::new(Some(outbox_task))),
        }
    }

    /// Attach the device event listener and, when a media session is wired,
    /// the transport-command listener. Idempotent.
    pub async fn start(&self) {
        let mut started = self.listeners_started.lock().await;
        if *started {
            return;
        }
        *started = true;
        drop(started);

        if let Some(events) = self.device.take_event_channel().await {
            let task = self.start_device_event_listener(events);
            self.listener_tasks.lock().await.push(task);
        } else {
            tracing::warn!("Device event channel unavailable; playback state will not track the device");
        }

        if let Some(media_session) = &self.media_session {
            if let Some(commands) = media_session.take_command_channel().await {
                let task = self.start_transport_listener(commands);
                self.listener_tasks.lock().await.push(task);
            }
        }
    }

    /// Tear the session down: stop listeners, silence the device, clear the
    /// platform now-playing surface.
    pub async fn shutdown(&self) {
        *self.shutting_down.lock().await = true;

        if let Err(e) = self.device.stop().await {
            tracing::warn!(error = %e, "Device did not stop cleanly");
        }
        if let Some(media_session) = &self.media_session {
            if let Err(e) = media_session.clear().await {
                tracing::debug!(error = %e, "Could not clear media session");
            }
        }
        for task in self.listener_tasks.lock().await.drain(..) {
            task.abort();
        }
        if let Some(task) = self.outbox_task.lock().await.take() {
            task.abort();
        }
        tracing::info!("Playback engine shut down");
    }

    pub(crate) async fn is_shutting_down(&self) -> bool {
        *self.shutting_down.lock().await
    }

    // ========================================================================
    // Read side
    // ========================================================================

    pub async fn playback_info(&self) -> PlaybackInfo {
        self.session.lock().await.snapshot()
    }

    pub async fn current_track(&self) -> Option<Track> {
        self.session.lock().await.current_track.clone()
    }

    pub async fn is_playing(&self) -> bool {
        self.session.lock().await.is_playing
    }

    /// Latest user-facing banner, if it has not expired.
    pub async fn advisory(&self) -> Option<Advisory> {
        self.session.lock().await.advisory()
    }

    // ========================================================================
    // Mode toggles
    // ========================================================================

    pub async fn toggle_shuffle(&self) {
        let mut session = self.session.lock().await;
        session.shuffle = !session.shuffle;
        tracing::debug!(shuffle = session.shuffle, "Shuffle toggled");
    }

    pub async fn cycle_repeat(&self) {
        let mut session = self.session.lock().await;
        session.repeat = session.repeat.next();
        tracing::debug!(repeat = ?session.repeat, "Repeat mode cycled");
    }

    pub async fn set_repeat(&self, repeat: RepeatMode) {
        self.session.lock().await.repeat = repeat;
    }

    // ========================================================================
    // Platform integration helpers
    // ========================================================================

    pub(crate) async fn publish_now_playing(&self, track: &Track) {
        if let Some(media_session) = &self.media_session {
            let now_playing = NowPlaying {
                title: track.title.clone(),
                artist: track.artist.clone(),
                artwork_url: track.cover_path.clone(),
            };
            if let Err(e) = media_session.publish(now_playing).await {
                tracing::debug!(error = %e, "Media session publish failed");
            }
        }
    }

    pub(crate) async fn update_platform_playback_state(&self) {
        if let Some(media_session) = &self.media_session {
            let is_playing = self.is_playing().await;
            if let Err(e) = media_session.set_playback_state(is_playing).await {
                tracing::debug!(error = %e, "Media session state update failed");
            }
        }
    }
}
