// ── Controller abstraction ──
//
// Full lifecycle management for a pylights device connection.
// Handles address validation, command routing, the playback clock,
// the debounced loading flag, and background refresh.

use std::sync::Arc;
use std::time::Duration;

use pylights_api::{Descriptor, PylightsClient, TransportConfig};
use tokio::sync::{Mutex, Notify, watch};
use tokio::task::JoinHandle;
use tokio::time::Interval;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::clock::PlaybackClock;
use crate::command::{Command, CommandResult};
use crate::config::ControllerConfig;
use crate::error::CoreError;
use crate::loading::loading_task;
use crate::model::{ClientState, DeveloperInfo, RemapSession};
use crate::store::{DataStore, ReconcileOutcome};
use crate::stream::StateStream;

// ── ConnectionState ──────────────────────────────────────────────

/// Connection state observable by consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
    Failed,
}

// ── Controller ───────────────────────────────────────────────────

/// The main entry point for consumers.
///
/// Cheaply cloneable via `Arc<ControllerInner>`. Each command issues one
/// request, reconciles the response into the [`DataStore`], and returns
/// any failure unchanged. Nothing is retried or queued; concurrent
/// commands are allowed and the last one to reconcile wins.
#[derive(Clone)]
pub struct Controller {
    inner: Arc<ControllerInner>,
}

struct ControllerInner {
    config: ControllerConfig,
    client: PylightsClient,
    store: Arc<DataStore>,
    clock: PlaybackClock,
    /// Notified by the clock when a song ends; served by the refresh task.
    refresh_signal: Arc<Notify>,
    connection_state: watch::Sender<ConnectionState>,
    cancel: CancellationToken,
    /// Child token for the current connection. Cancelled on disconnect,
    /// replaced on reconnect.
    cancel_child: Mutex<CancellationToken>,
    task_handles: Mutex<Vec<JoinHandle<()>>>,
}

impl Controller {
    /// Create a new Controller. Does NOT connect; call
    /// [`connect()`](Self::connect) to validate an address.
    pub fn new(config: ControllerConfig) -> Result<Self, CoreError> {
        let transport = TransportConfig::with_timeout(config.timeout);
        let client = PylightsClient::new(&transport)?;
        Ok(Self::with_client(config, client))
    }

    /// Create a Controller around an existing transport client.
    pub fn with_client(config: ControllerConfig, client: PylightsClient) -> Self {
        let store = Arc::new(DataStore::new());
        let refresh_signal = Arc::new(Notify::new());
        let clock = PlaybackClock::new(
            Arc::clone(&store),
            config.clock_period,
            Arc::clone(&refresh_signal),
        );
        let (connection_state, _) = watch::channel(ConnectionState::Disconnected);
        let cancel = CancellationToken::new();
        let cancel_child = cancel.child_token();

        Self {
            inner: Arc::new(ControllerInner {
                config,
                client,
                store,
                clock,
                refresh_signal,
                connection_state,
                cancel,
                cancel_child: Mutex::new(cancel_child),
                task_handles: Mutex::new(Vec::new()),
            }),
        }
    }

    // ── Connection lifecycle ─────────────────────────────────────

    /// Connect to the device listening on `host:port`.
    ///
    /// `host` must already be an address; resolving hostnames is the
    /// caller's job. IPv6 literals are bracketed automatically.
    pub async fn connect(&self, host: &str, port: u16) -> Result<(), CoreError> {
        self.connect_url(&device_address(host, port)).await
    }

    /// Validate `candidate` with an `/info` round trip and make it the
    /// active device.
    ///
    /// On success the returned info bundle is reconciled and background
    /// tasks start. On failure the device address stays unset and the
    /// original error is wrapped in [`CoreError::ConnectionFailed`].
    pub async fn connect_url(&self, candidate: &str) -> Result<(), CoreError> {
        self.shutdown_tasks().await;
        self.inner.store.reset();
        self.inner
            .connection_state
            .send_replace(ConnectionState::Connecting);

        // Fresh child token for this connection (supports reconnect).
        let child = self.inner.cancel.child_token();
        *self.inner.cancel_child.lock().await = child.clone();

        // Loading must already be tracked while validation is in flight.
        let loading = tokio::spawn(loading_task(
            self.inner.client.in_flight().subscribe(),
            Arc::clone(&self.inner.store),
            self.inner.config.loading_debounce,
            child.clone(),
        ));
        self.inner.task_handles.lock().await.push(loading);

        let info = match self.inner.client.connect(candidate).await {
            Ok(info) => info,
            Err(e) => {
                warn!(address = candidate, error = %e, "device address rejected");
                self.shutdown_tasks().await;
                self.inner.store.reset();
                self.inner
                    .connection_state
                    .send_replace(ConnectionState::Failed);
                return Err(CoreError::ConnectionFailed {
                    address: candidate.to_owned(),
                    source: Box::new(e.into()),
                });
            }
        };

        self.inner.store.set_base_url(self.inner.client.base_url());
        self.apply(info.into());

        let refresh = tokio::spawn(refresh_task(
            self.clone(),
            self.inner.config.refresh_interval_secs,
            child,
        ));
        self.inner.task_handles.lock().await.push(refresh);

        self.inner
            .connection_state
            .send_replace(ConnectionState::Connected);
        info!(address = candidate, "connected to device");
        Ok(())
    }

    /// Disconnect from the device.
    ///
    /// Stops the playback clock and background tasks, forgets the device
    /// address, and clears the client state.
    pub async fn disconnect(&self) {
        self.shutdown_tasks().await;
        self.inner.client.disconnect();
        self.inner.store.reset();
        // Catches a timer armed by a response that raced the reset.
        self.inner.clock.stop();
        self.inner
            .connection_state
            .send_replace(ConnectionState::Disconnected);
        info!("disconnected from device");
    }

    /// Cancel the current connection's tasks and wait for them to exit.
    async fn shutdown_tasks(&self) {
        self.inner.cancel_child.lock().await.cancel();
        self.inner.clock.stop();

        let handles: Vec<_> = self.inner.task_handles.lock().await.drain(..).collect();
        for handle in handles {
            let _ = handle.await;
        }
    }

    // ── State observation ────────────────────────────────────────

    /// Point-in-time copy of the client state.
    pub fn snapshot(&self) -> Arc<ClientState> {
        self.inner.store.snapshot()
    }

    /// Subscribe to client state changes.
    pub fn state(&self) -> StateStream {
        self.inner.store.stream()
    }

    /// Subscribe to connection state changes.
    pub fn connection_state(&self) -> watch::Receiver<ConnectionState> {
        self.inner.connection_state.subscribe()
    }

    /// Debounced "requests are outstanding" flag.
    pub fn is_loading(&self) -> bool {
        self.inner.store.snapshot().loading
    }

    /// `true` while the local playback clock is interpolating position.
    pub fn clock_running(&self) -> bool {
        self.inner.clock.is_running()
    }

    /// Reconcile a response, re-arming the clock for playback shapes.
    fn apply(&self, descriptor: Descriptor) -> ReconcileOutcome {
        if descriptor.carries_playback() {
            // A response landing after `disconnect` must not restart the clock.
            self.inner.clock.resync_if(
                || self.inner.store.apply(descriptor),
                ClientState::is_connected,
            )
        } else {
            self.inner.store.apply(descriptor)
        }
    }

    // ── Commands ─────────────────────────────────────────────────

    /// Execute a [`Command`].
    pub async fn execute(&self, cmd: Command) -> Result<CommandResult, CoreError> {
        debug!(command = cmd.name(), "executing command");
        match cmd {
            Command::Refresh => self.refresh().await?,
            Command::PlaySong { title } => self.play_song(&title).await?,
            Command::Pause => self.pause().await?,
            Command::Resume => self.resume().await?,
            Command::Stop => self.stop().await?,
            Command::SetVolume { value } => self.set_volume(value).await?,
            Command::AllLightsOn => self.all_lights_on().await?,
            Command::AllLightsOff => self.all_lights_off().await?,
            Command::TurnOnLight { name } => self.turn_on_light(&name).await?,
            Command::TurnOffLight { name } => self.turn_off_light(&name).await?,
            Command::ToggleLight { name } => self.toggle_light(&name).await?,
            Command::ActivatePreset { name } => self.activate_preset(&name).await?,
            Command::AddPreset { name, lights } => self.add_preset(&name, &lights).await?,
            Command::StartRemap => return Ok(CommandResult::Remap(self.start_remap().await?)),
            Command::NextRemap { name } => {
                return Ok(CommandResult::Remap(self.next_remap(&name).await?));
            }
            Command::CancelRemap => return Ok(CommandResult::Remap(self.cancel_remap().await?)),
            Command::AcknowledgeRemap => self.acknowledge_remap().await?,
            Command::DeveloperInfo => {
                return Ok(CommandResult::Developer(self.developer_info().await?));
            }
            Command::RecompileShows => {
                return Ok(CommandResult::Developer(self.recompile_shows().await?));
            }
            Command::CloseDeveloper => self.close_developer(),
        }
        Ok(CommandResult::Ok)
    }

    /// Fetch and reconcile the full `/info` bundle.
    pub async fn refresh(&self) -> Result<(), CoreError> {
        let info = self.inner.client.info().await?;
        self.apply(info.into());
        Ok(())
    }

    // ── Playback ─────────────────────────────────────────────────

    /// Start playing the first song titled `title`.
    pub async fn play_song(&self, title: &str) -> Result<(), CoreError> {
        let songs = self.inner.client.play_song(title).await?;
        self.apply(songs.into());
        Ok(())
    }

    pub async fn pause(&self) -> Result<(), CoreError> {
        let songs = self.inner.client.pause_song().await?;
        self.apply(songs.into());
        Ok(())
    }

    pub async fn resume(&self) -> Result<(), CoreError> {
        let songs = self.inner.client.resume_song().await?;
        self.apply(songs.into());
        Ok(())
    }

    pub async fn stop(&self) -> Result<(), CoreError> {
        let songs = self.inner.client.stop_song().await?;
        self.apply(songs.into());
        Ok(())
    }

    /// Set output volume. `value` must be within 0-100.
    pub async fn set_volume(&self, value: i64) -> Result<(), CoreError> {
        if !(0..=100).contains(&value) {
            return Err(CoreError::ValidationFailed {
                message: format!("volume must be between 0 and 100, got {value}"),
            });
        }
        let songs = self.inner.client.set_volume(value).await?;
        self.apply(songs.into());
        Ok(())
    }

    // ── Lights ───────────────────────────────────────────────────

    pub async fn all_lights_on(&self) -> Result<(), CoreError> {
        let lights = self.inner.client.all_lights_on().await?;
        self.apply(lights.into());
        Ok(())
    }

    pub async fn all_lights_off(&self) -> Result<(), CoreError> {
        let lights = self.inner.client.all_lights_off().await?;
        self.apply(lights.into());
        Ok(())
    }

    pub async fn turn_on_light(&self, name: &str) -> Result<(), CoreError> {
        let lights = self.inner.client.turn_on_light(name).await?;
        self.apply(lights.into());
        Ok(())
    }

    pub async fn turn_off_light(&self, name: &str) -> Result<(), CoreError> {
        let lights = self.inner.client.turn_off_light(name).await?;
        self.apply(lights.into());
        Ok(())
    }

    pub async fn toggle_light(&self, name: &str) -> Result<(), CoreError> {
        let lights = self.inner.client.toggle_light(name).await?;
        self.apply(lights.into());
        Ok(())
    }

    // ── Presets ──────────────────────────────────────────────────

    pub async fn activate_preset(&self, name: &str) -> Result<(), CoreError> {
        let presets = self.inner.client.activate_preset(name).await?;
        self.apply(presets.into());
        Ok(())
    }

    /// Store a preset. Requires a non-empty name and at least one light.
    pub async fn add_preset(&self, name: &str, lights: &[String]) -> Result<(), CoreError> {
        if name.trim().is_empty() {
            return Err(CoreError::ValidationFailed {
                message: "preset name must not be empty".into(),
            });
        }
        if lights.is_empty() {
            return Err(CoreError::ValidationFailed {
                message: "a preset needs at least one light".into(),
            });
        }
        let presets = self.inner.client.add_preset(name, lights).await?;
        self.apply(presets.into());
        Ok(())
    }

    // ── Remap ────────────────────────────────────────────────────

    /// Begin remapping. The device answers with every light to name.
    pub async fn start_remap(&self) -> Result<RemapSession, CoreError> {
        let remap = self.inner.client.start_remap().await?;
        Ok(self.apply_remap(remap.into()))
    }

    /// Name the light that is currently lit.
    pub async fn next_remap(&self, name: &str) -> Result<RemapSession, CoreError> {
        let remap = self.inner.client.next_remap(name).await?;
        Ok(self.apply_remap(remap.into()))
    }

    pub async fn cancel_remap(&self) -> Result<RemapSession, CoreError> {
        let remap = self.inner.client.cancel_remap().await?;
        Ok(self.apply_remap(remap.into()))
    }

    /// Close out a finished remap session and pull the new light layout.
    ///
    /// Fails with `ValidationFailed` while lights are still left to name.
    pub async fn acknowledge_remap(&self) -> Result<(), CoreError> {
        let remap = self.inner.store.snapshot().remap.clone();
        match remap {
            RemapSession::Idle => {}
            RemapSession::Active(remaining) if !remaining.is_empty() => {
                return Err(CoreError::ValidationFailed {
                    message: format!("{} light(s) still need a name", remaining.len()),
                });
            }
            RemapSession::Active(_) => {
                self.inner.store.clear_completed_remap();
            }
        }
        self.refresh().await
    }

    fn apply_remap(&self, descriptor: Descriptor) -> RemapSession {
        self.apply(descriptor);
        self.inner.store.snapshot().remap.clone()
    }

    // ── Developer ────────────────────────────────────────────────

    pub async fn developer_info(&self) -> Result<DeveloperInfo, CoreError> {
        let dev = self.inner.client.developer_info().await?;
        let info = DeveloperInfo::from(dev.clone());
        self.apply(dev.into());
        Ok(info)
    }

    /// Ask the device to rebuild its light shows from source.
    pub async fn recompile_shows(&self) -> Result<DeveloperInfo, CoreError> {
        let dev = self.inner.client.recompile_shows().await?;
        let info = DeveloperInfo::from(dev.clone());
        self.apply(dev.into());
        Ok(info)
    }

    /// Drop developer diagnostics.
    pub fn close_developer(&self) {
        self.inner.store.clear_developer();
    }
}

// ── Helpers ──────────────────────────────────────────────────────

/// Build the base address for `host:port`, bracketing IPv6 literals.
pub fn device_address(host: &str, port: u16) -> String {
    if host.contains(':') && !host.starts_with('[') {
        format!("http://[{host}]:{port}")
    } else {
        format!("http://{host}:{port}")
    }
}

// ── Background tasks ─────────────────────────────────────────────

/// Serve end-of-song refresh requests from the playback clock, plus an
/// optional periodic full refresh.
async fn refresh_task(controller: Controller, interval_secs: u64, cancel: CancellationToken) {
    let signal = Arc::clone(&controller.inner.refresh_signal);
    let mut interval = (interval_secs > 0).then(|| {
        let period = Duration::from_secs(interval_secs);
        tokio::time::interval_at(tokio::time::Instant::now() + period, period)
    });

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            () = signal.notified() => {
                if let Err(e) = controller.refresh().await {
                    warn!(error = %e, "refresh after song end failed");
                }
            }
            () = next_tick(interval.as_mut()) => {
                if let Err(e) = controller.refresh().await {
                    warn!(error = %e, "periodic refresh failed");
                }
            }
        }
    }
}

async fn next_tick(interval: Option<&mut Interval>) {
    match interval {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending().await,
    }
}
