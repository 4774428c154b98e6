//! Content-side bridge.
//!
//! `Bridge` owns the platform cell, the transport dispatcher, the callback
//! demultiplexer and the pending tables, and exposes the capability groups.
//!
//! Call flow:
//! - version gate (synthesizes `app_version_too_low` on failure),
//! - envelope build (synthesizes `app_param_error` on failure),
//! - platform restriction of the capability, if any,
//! - hand-off to the channel registered for the detected platform.

use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value};
use tokio::runtime::Handle;
use tracing::{debug, warn};

use hostbridge_core::error::{BridgeError, Result};
use hostbridge_core::platform::{Environment, PlatformKind, PlatformState};
use hostbridge_core::protocol::{Envelope, HostMessage};

use crate::capabilities::catalog;
use crate::capabilities::{
    Business, Capability, Encrypt, File, Map as MapGroup, NavBar, Page, Pay, Pipe, User, Util,
    Wallet,
};
use crate::config::{BridgeConfig, BridgeSection};
use crate::demux::{Demultiplexer, MessageSink};
use crate::detector::PlatformCell;
use crate::pending::{PendingHandle, PendingTable};
use crate::transport::{
    ChannelKind, Delivery, FrameHost, LocalStore, NativeEntryChannel, NativeEntryPoints,
    NavigationChannel, NotifyChannel, NotifyHost, TransportDispatcher,
};

/// Which path a call took.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "channel", rename_all = "snake_case")]
pub enum CallOutcome {
    /// Handed to the host over a channel.
    Sent(ChannelKind),
    /// The page itself was navigated instead of using the bridge.
    Navigated,
    /// Nothing to do for these arguments.
    Skipped,
    /// No channel for the platform, or the capability is not offered there.
    Dropped,
    VersionTooLow,
    ParamError,
}

pub struct BridgeBuilder {
    config: BridgeConfig,
    env: Environment,
    frames: Option<Arc<dyn FrameHost>>,
    natives: Option<Arc<dyn NativeEntryPoints>>,
    notify: Option<Arc<dyn NotifyHost>>,
    store: Option<Arc<dyn LocalStore>>,
    sink: Option<Arc<dyn MessageSink>>,
    runtime: Option<Handle>,
}

impl BridgeBuilder {
    pub fn environment(mut self, env: Environment) -> Self {
        self.env = env;
        self
    }

    /// iOS: detached-frame navigation channel. Needs a tokio runtime.
    pub fn frame_host(mut self, host: Arc<dyn FrameHost>) -> Self {
        self.frames = Some(host);
        self
    }

    /// Android: per-service native entry points.
    pub fn native_entry_points(mut self, host: Arc<dyn NativeEntryPoints>) -> Self {
        self.natives = Some(host);
        self
    }

    /// Windows Phone: single notify entry point.
    pub fn notify_host(mut self, host: Arc<dyn NotifyHost>) -> Self {
        self.notify = Some(host);
        self
    }

    pub fn local_store(mut self, store: Arc<dyn LocalStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn sink(mut self, sink: Arc<dyn MessageSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Runtime used for frame teardown. Defaults to the current runtime.
    pub fn runtime(mut self, handle: Handle) -> Self {
        self.runtime = Some(handle);
        self
    }

    pub fn build(self) -> Result<Bridge> {
        self.config.validate()?;
        let cfg = self.config.bridge;

        let platform = Arc::new(PlatformCell::new(self.env, self.config.detect.markers()));
        let transport = TransportDispatcher::new();

        if let Some(frames) = &self.frames {
            let rt = match self.runtime {
                Some(h) => h,
                None => Handle::try_current().map_err(|_| {
                    BridgeError::Config(
                        "navigation channel needs a tokio runtime (BridgeBuilder::runtime)".into(),
                    )
                })?,
            };
            transport.register(
                PlatformKind::Ios,
                Arc::new(NavigationChannel::new(Arc::clone(frames), &cfg, rt)),
            );
        }
        if let Some(natives) = &self.natives {
            transport.register(
                PlatformKind::Android,
                Arc::new(NativeEntryChannel::new(
                    Arc::clone(natives),
                    cfg.native_namespace_suffix.clone(),
                )),
            );
        }
        if let Some(notify) = self.notify {
            transport.register(PlatformKind::WindowsPhone, Arc::new(NotifyChannel::new(notify)));
        }

        let sink = self
            .sink
            .unwrap_or_else(|| Arc::new(|_: HostMessage| {}) as Arc<dyn MessageSink>);
        let by_tag = Arc::new(PendingTable::new());
        let by_sequence = Arc::new(PendingTable::new());
        let demux = Demultiplexer::new(
            Arc::clone(&platform),
            sink,
            Arc::clone(&by_tag),
            Arc::clone(&by_sequence),
        );

        Ok(Bridge {
            cfg,
            platform,
            transport,
            demux,
            by_tag,
            by_sequence,
            frames: self.frames,
            natives: self.natives,
            store: self.store,
        })
    }
}

pub struct Bridge {
    cfg: BridgeSection,
    platform: Arc<PlatformCell>,
    transport: TransportDispatcher,
    demux: Demultiplexer,
    by_tag: Arc<PendingTable>,
    by_sequence: Arc<PendingTable>,
    frames: Option<Arc<dyn FrameHost>>,
    natives: Option<Arc<dyn NativeEntryPoints>>,
    store: Option<Arc<dyn LocalStore>>,
}

impl Bridge {
    pub fn builder(config: BridgeConfig) -> BridgeBuilder {
        BridgeBuilder {
            config,
            env: Environment::default(),
            frames: None,
            natives: None,
            notify: None,
            store: None,
            sink: None,
            runtime: None,
        }
    }

    pub fn config(&self) -> &BridgeSection {
        &self.cfg
    }

    pub fn platform(&self) -> &PlatformCell {
        &self.platform
    }

    pub fn detect(&self) -> PlatformKind {
        self.platform.detect()
    }

    pub fn state(&self) -> PlatformState {
        self.platform.state()
    }

    pub fn is_supported(&self, min_version: &str) -> bool {
        self.platform.is_supported(min_version)
    }

    /// Invoke a catalogued capability.
    pub fn call(&self, cap: &Capability, params: Option<Map<String, Value>>) -> Result<CallOutcome> {
        if let Some(min) = cap.min_version {
            if !self.platform.is_supported(min) {
                return Ok(self.reject_version(min));
            }
        }
        let Some(envelope) = Envelope::build(cap.service, cap.action, params, cap.tag) else {
            return Ok(self.reject_params("service and action must not be empty"));
        };
        self.send_envelope(&envelope, cap.only)
    }

    /// Invoke an arbitrary `(service, action)` without a version gate.
    pub fn call_parts(
        &self,
        service: &str,
        action: &str,
        params: Option<Map<String, Value>>,
        tag: &str,
    ) -> Result<CallOutcome> {
        let Some(envelope) = Envelope::build(service, action, params, tag) else {
            return Ok(self.reject_params("service and action must not be empty"));
        };
        self.send_envelope(&envelope, None)
    }

    /// Invoke `cap` and wait for the host message carrying its tag.
    ///
    /// Only one waiter per tag may be outstanding. Pipe sends are keyed by
    /// sequence id instead; use the tracked sends on `Bridge::pipe`.
    pub async fn call_and_wait(
        &self,
        cap: &Capability,
        params: Option<Map<String, Value>>,
    ) -> Result<HostMessage> {
        if catalog::is_pipe_response_tag(cap.tag) {
            return Err(BridgeError::Param(format!(
                "{}.{} is awaited by sequence id",
                cap.service, cap.action
            )));
        }
        let handle = self.by_tag.register(cap.tag)?;
        match self.call(cap, params)? {
            CallOutcome::Sent(_) => self.settle(handle).await,
            CallOutcome::VersionTooLow => Err(BridgeError::VersionUnsupported {
                required: cap.min_version.unwrap_or_default().to_owned(),
                actual: self.platform.app_version().to_owned(),
            }),
            CallOutcome::ParamError => Err(BridgeError::Param(format!(
                "{}.{} rejected locally",
                cap.service, cap.action
            ))),
            other => Err(BridgeError::Transport(format!(
                "{}.{} not sent ({other:?})",
                cap.service, cap.action
            ))),
        }
    }

    /// Host -> content decode entry point. See `demux::Demultiplexer`.
    pub fn on_host_message(&self, encoded: &str) -> i32 {
        self.demux.on_host_message(encoded)
    }

    /// Host-invoked local storage write. Empty keys are ignored.
    pub fn write_local_storage(&self, key: &str, value: &str) -> bool {
        if key.is_empty() {
            debug!("local storage write with empty key ignored");
            return false;
        }
        match &self.store {
            Some(store) => {
                store.set_item(key, value);
                true
            }
            None => {
                warn!(key, "no local store configured; write dropped");
                false
            }
        }
    }

    pub fn util(&self) -> Util<'_> {
        Util::new(self)
    }

    pub fn user(&self) -> User<'_> {
        User::new(self)
    }

    pub fn encrypt(&self) -> Encrypt<'_> {
        Encrypt::new(self)
    }

    pub fn pay(&self) -> Pay<'_> {
        Pay::new(self)
    }

    pub fn pipe(&self) -> Pipe<'_> {
        Pipe::new(self)
    }

    pub fn wallet(&self) -> Wallet<'_> {
        Wallet::new(self)
    }

    pub fn file(&self) -> File<'_> {
        File::new(self)
    }

    pub fn nav_bar(&self) -> NavBar<'_> {
        NavBar::new(self)
    }

    pub fn map(&self) -> MapGroup<'_> {
        MapGroup::new(self)
    }

    pub fn business(&self) -> Business<'_> {
        Business::new(self)
    }

    pub fn page(&self) -> Page<'_> {
        Page::new(self)
    }

    pub(crate) fn send_envelope(
        &self,
        envelope: &Envelope,
        only: Option<PlatformKind>,
    ) -> Result<CallOutcome> {
        let platform = self.platform.detect();
        if let Some(required) = only {
            if platform != required {
                debug!(
                    platform = platform.as_str(),
                    service = %envelope.service,
                    action = %envelope.action,
                    "capability not offered on this platform"
                );
                return Ok(CallOutcome::Dropped);
            }
        }
        match self.transport.send(envelope, platform)? {
            Delivery::Sent(kind) => Ok(CallOutcome::Sent(kind)),
            Delivery::NoChannel => Ok(CallOutcome::Dropped),
        }
    }

    pub(crate) fn reject_version(&self, min_version: &str) -> CallOutcome {
        let app_version = self.platform.app_version();
        debug!(required = min_version, app_version, "host version too low");
        self.demux
            .deliver_local(HostMessage::version_too_low(min_version, app_version));
        CallOutcome::VersionTooLow
    }

    pub(crate) fn reject_params(&self, description: &str) -> CallOutcome {
        debug!(description, "call rejected locally");
        self.demux.deliver_local(HostMessage::param_error(description));
        CallOutcome::ParamError
    }

    /// Navigate the page itself (legacy paths that bypass the bridge).
    pub(crate) fn navigate_page(&self, url: &str) -> Result<CallOutcome> {
        let frames = self
            .frames
            .as_ref()
            .ok_or_else(|| BridgeError::Transport("no frame host for page navigation".into()))?;
        frames.navigate(url)?;
        debug!(url, "page navigated");
        Ok(CallOutcome::Navigated)
    }

    /// Invoke a native entry point regardless of the detected platform.
    pub(crate) fn invoke_native(&self, envelope: &Envelope) -> Result<CallOutcome> {
        let natives = self
            .natives
            .as_ref()
            .ok_or_else(|| BridgeError::Transport("no native entry points".into()))?;
        let namespace = format!("{}{}", envelope.service, self.cfg.native_namespace_suffix);
        natives.invoke(&namespace, &envelope.action, &envelope.to_json()?)?;
        Ok(CallOutcome::Sent(ChannelKind::Native))
    }

    pub(crate) fn sequence_table(&self) -> &Arc<PendingTable> {
        &self.by_sequence
    }

    pub(crate) async fn settle(&self, handle: PendingHandle) -> Result<HostMessage> {
        match self.cfg.pending_timeout() {
            Some(limit) => handle.wait_timeout(limit).await,
            None => handle.wait().await,
        }
    }
}
