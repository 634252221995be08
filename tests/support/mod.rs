//! Shared test doubles for engine integration tests
//!
//! All mocks follow the spy pattern: they log the calls they receive behind
//! an `Arc<Mutex<_>>` so tests can assert on the exact command sequence the
//! engine issued.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use tokio::sync::{Mutex, mpsc};

use tunedeck::ports::catalog::TrackCatalog;
use tunedeck::ports::device::{AudioDevice, DeviceEvent};
use tunedeck::ports::engagement::EngagementStore;
use tunedeck::ports::media_session::{MediaSessionPort, NowPlaying, TransportCommand};
use tunedeck::ports::share::{ShareRequest, ShareTarget};
use tunedeck::ports::storage::MemoryStore;
use tunedeck::resolve::UrlProber;
use tunedeck::{EngineConfig, EnginePorts, PlaybackEngine, Track};

pub const MEDIA_BASE: &str = "https://media.test";
pub const SHARE_BASE: &str = "https://app.test";

// ================================================================================================
// Device
// ================================================================================================

#[derive(Clone, Debug, PartialEq)]
pub enum DeviceCommand {
    Load(String),
    Play,
    Pause,
    Seek(f64),
    SetVolume(f32),
    Stop,
}

pub struct MockDevice {
    log: Mutex<Vec<DeviceCommand>>,
    pub fail_play: Mutex<bool>,
    load_delays: Mutex<HashMap<String, Duration>>,
    events_tx: mpsc::UnboundedSender<DeviceEvent>,
    events_rx: Mutex<Option<mpsc::UnboundedReceiver<DeviceEvent>>>,
}

impl MockDevice {
    pub fn new() -> Arc<Self> {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Arc::new(Self {
            log: Mutex::new(Vec::new()),
            fail_play: Mutex::new(false),
            load_delays: Mutex::new(HashMap::new()),
            events_tx,
            events_rx: Mutex::new(Some(events_rx)),
        })
    }

    pub fn emit(&self, event: DeviceEvent) {
        let _ = self.events_tx.send(event);
    }

    /// Make `load` of the given source take this long before returning.
    pub async fn delay_load(&self, url: &str, delay: Duration) {
        self.load_delays.lock().await.insert(url.to_string(), delay);
    }

    /// Whether the engine's event listener still holds the channel.
    pub fn listener_attached(&self) -> bool {
        !self.events_tx.is_closed()
    }

    pub async fn commands(&self) -> Vec<DeviceCommand> {
        self.log.lock().await.clone()
    }

    pub async fn loaded_urls(&self) -> Vec<String> {
        self.log
            .lock()
            .await
            .iter()
            .filter_map(|c| match c {
                DeviceCommand::Load(url) => Some(url.clone()),
                _ => None,
            })
            .collect()
    }

    pub async fn clear_log(&self) {
        self.log.lock().await.clear();
    }

    async fn record(&self, command: DeviceCommand) {
        self.log.lock().await.push(command);
    }
}

#[async_trait]
impl AudioDevice for MockDevice {
    async fn load(&self, url: &str) -> Result<()> {
        self.record(DeviceCommand::Load(url.to_string())).await;
        let delay = self.load_delays.lock().await.get(url).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        Ok(())
    }

    async fn play(&self) -> Result<()> {
        if *self.fail_play.lock().await {
            return Err(anyhow!("playback rejected by autoplay policy"));
        }
        self.record(DeviceCommand::Play).await;
        Ok(())
    }

    async fn pause(&self) -> Result<()> {
        self.record(DeviceCommand::Pause).await;
        Ok(())
    }

    async fn seek(&self, position_secs: f64) -> Result<()> {
        self.record(DeviceCommand::Seek(position_secs)).await;
        Ok(())
    }

    async fn set_volume(&self, level: f32) -> Result<()> {
        self.record(DeviceCommand::SetVolume(level)).await;
        Ok(())
    }

    async fn stop(&self) -> Result<()> {
        self.record(DeviceCommand::Stop).await;
        Ok(())
    }

    async fn take_event_channel(&self) -> Option<mpsc::UnboundedReceiver<DeviceEvent>> {
        self.events_rx.lock().await.take()
    }
}

// ================================================================================================
// Prober
// ================================================================================================

pub struct MockProber {
    reachable: Mutex<HashSet<String>>,
    delays: Mutex<HashMap<String, Duration>>,
    pub probed: Mutex<Vec<String>>,
}

impl MockProber {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            reachable: Mutex::new(HashSet::new()),
            delays: Mutex::new(HashMap::new()),
            probed: Mutex::new(Vec::new()),
        })
    }

    pub async fn allow(&self, url: &str) {
        self.reachable.lock().await.insert(url.to_string());
    }

    pub async fn delay(&self, url: &str, delay: Duration) {
        self.delays.lock().await.insert(url.to_string(), delay);
    }
}

#[async_trait]
impl UrlProber for MockProber {
    async fn is_reachable(&self, url: &str) -> Result<bool> {
        self.probed.lock().await.push(url.to_string());
        let delay = self.delays.lock().await.get(url).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        Ok(self.reachable.lock().await.contains(url))
    }
}

// ================================================================================================
// Engagement store
// ================================================================================================

pub struct MockEngagement {
    pub calls: Mutex<Vec<String>>,
    pub fail: Mutex<bool>,
}

impl MockEngagement {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            fail: Mutex::new(false),
        })
    }

    async fn record(&self, call: String) -> Result<()> {
        if *self.fail.lock().await {
            return Err(anyhow!("engagement store unavailable"));
        }
        self.calls.lock().await.push(call);
        Ok(())
    }
}

#[async_trait]
impl EngagementStore for MockEngagement {
    async fn increment_like_count(&self, track_id: &str) -> Result<()> {
        self.record(format!("inc:{track_id}")).await
    }

    async fn decrement_like_count(&self, track_id: &str) -> Result<()> {
        self.record(format!("dec:{track_id}")).await
    }

    async fn record_play_start(&self, track_id: &str) -> Result<()> {
        self.record(format!("play:{track_id}")).await
    }
}

// ================================================================================================
// Catalog
// ================================================================================================

pub struct MockCatalog {
    tracks: Mutex<HashMap<String, Track>>,
}

impl MockCatalog {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            tracks: Mutex::new(HashMap::new()),
        })
    }

    pub async fn insert(&self, track: Track) {
        self.tracks.lock().await.insert(track.id.clone(), track);
    }
}

#[async_trait]
impl TrackCatalog for MockCatalog {
    async fn track(&self, track_id: &str) -> Result<Option<Track>> {
        Ok(self.tracks.lock().await.get(track_id).cloned())
    }
}

// ================================================================================================
// Share target
// ================================================================================================

pub struct MockShare {
    pub fail_share: Mutex<bool>,
    pub fail_clipboard: Mutex<bool>,
    pub shared: Mutex<Vec<ShareRequest>>,
    pub clipboard: Mutex<Vec<String>>,
}

impl MockShare {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            fail_share: Mutex::new(false),
            fail_clipboard: Mutex::new(false),
            shared: Mutex::new(Vec::new()),
            clipboard: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl ShareTarget for MockShare {
    async fn share(&self, request: &ShareRequest) -> Result<()> {
        if *self.fail_share.lock().await {
            return Err(anyhow!("native share unavailable"));
        }
        self.shared.lock().await.push(request.clone());
        Ok(())
    }

    async fn copy_to_clipboard(&self, text: &str) -> Result<()> {
        if *self.fail_clipboard.lock().await {
            return Err(anyhow!("clipboard write denied"));
        }
        self.clipboard.lock().await.push(text.to_string());
        Ok(())
    }
}

// ================================================================================================
// Media session
// ================================================================================================

pub struct MockMediaSession {
    pub published: Mutex<Vec<NowPlaying>>,
    pub states: Mutex<Vec<bool>>,
    pub commands_tx: mpsc::UnboundedSender<TransportCommand>,
    commands_rx: Mutex<Option<mpsc::UnboundedReceiver<TransportCommand>>>,
}

impl MockMediaSession {
    pub fn new() -> Arc<Self> {
        let (commands_tx, commands_rx) = mpsc::unbounded_channel();
        Arc::new(Self {
            published: Mutex::new(Vec::new()),
            states: Mutex::new(Vec::new()),
            commands_tx,
            commands_rx: Mutex::new(Some(commands_rx)),
        })
    }
}

#[async_trait]
impl MediaSessionPort for MockMediaSession {
    async fn publish(&self, now_playing: NowPlaying) -> Result<()> {
        self.published.lock().await.push(now_playing);
        Ok(())
    }

    async fn set_playback_state(&self, is_playing: bool) -> Result<()> {
        self.states.lock().await.push(is_playing);
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        Ok(())
    }

    async fn take_command_channel(&self) -> Option<mpsc::UnboundedReceiver<TransportCommand>> {
        self.commands_rx.lock().await.take()
    }
}

// ================================================================================================
// Harness
// ================================================================================================

pub struct Harness {
    pub engine: PlaybackEngine,
    pub device: Arc<MockDevice>,
    pub prober: Arc<MockProber>,
    pub engagement: Arc<MockEngagement>,
    pub catalog: Arc<MockCatalog>,
    pub share: Arc<MockShare>,
    pub media_session: Arc<MockMediaSession>,
    pub storage: Arc<MemoryStore>,
}

pub fn test_config() -> EngineConfig {
    EngineConfig {
        media_base_url: MEDIA_BASE.to_string(),
        share_base_url: SHARE_BASE.to_string(),
        probe_timeout_ms: 1_000,
        outbox_retry_base_ms: 1,
        ..EngineConfig::default()
    }
}

pub async fn harness() -> Harness {
    harness_with(test_config()).await
}

pub async fn harness_with(config: EngineConfig) -> Harness {
    let device = MockDevice::new();
    let prober = MockProber::new();
    let engagement = MockEngagement::new();
    let catalog = MockCatalog::new();
    let share = MockShare::new();
    let media_session = MockMediaSession::new();
    let storage = Arc::new(MemoryStore::new());

    let ports = EnginePorts {
        device: device.clone(),
        catalog: catalog.clone(),
        engagement: engagement.clone(),
        storage: storage.clone(),
        share: share.clone(),
        media_session: Some(media_session.clone()),
        prober: prober.clone(),
    };

    let engine = PlaybackEngine::new(config, ports).await;
    engine.start().await;

    Harness {
        engine,
        device,
        prober,
        engagement,
        catalog,
        share,
        media_session,
        storage,
    }
}

impl Harness {
    /// A track whose primary locator resolves under the test media base.
    pub async fn reachable_track(&self, id: &str, title: &str) -> Track {
        let track = Track::new(id, title, "Test Artist").with_audio(format!("uploads/{id}.mp3"));
        self.prober.allow(&primary_url(id)).await;
        track
    }
}

pub fn primary_url(id: &str) -> String {
    format!("{MEDIA_BASE}/uploads/{id}.mp3")
}

pub fn alternate_url(id: &str) -> String {
    format!("{MEDIA_BASE}/audio/{id}.mp3")
}

/// Let spawned loads and event handlers run to completion.
pub async fn settle() {
    tokio::time::sleep(Duration::from_millis(80)).await;
}
