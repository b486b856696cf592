// libultralight-rs/libultralight/src/poller/mod.rs
//! Ultralight / NTAG polling state machine.
//!
//! A [`Poller`] is advanced one [`Poller::tick`] at a time. Each tick runs
//! the handler of the current [`PollerState`], performs at most a handful
//! of exchanges and reports a [`Step`]. Password authentication pauses the
//! machine: the tick returns [`Step::AuthRequested`] and the caller answers
//! through [`Poller::answer_auth`] before ticking again. [`Poller::run`]
//! wraps that loop behind an event callback.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::constants::{
    COUNTER_NUM, NTAG203_PROBE_PAGE, PAGES_PER_READ, SINGLE_COUNTER_INDEX, TEARING_FLAG_NUM,
};
use crate::tag::{self, FeatureSet, TagSnapshot, TagType};
use crate::transport::FrameTransport;
use crate::types::{Pack, Password};
use crate::{Error, Result};

pub mod config;
mod ops;
pub mod sync;

pub use config::PollerConfig;
pub use sync::SyncPoller;

/// Scan stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollerState {
    Idle,
    ReadVersion,
    DetectNtag203,
    GetFeatureSet,
    ReadSignature,
    ReadCounters,
    ReadTearingFlags,
    Auth,
    ReadPages,
    TryDefaultPassword,
    ReadFailed,
    ReadSuccess,
}

/// Outcome of one [`Poller::tick`].
#[derive(Debug)]
pub enum Step {
    /// More work to do, tick again.
    Continue,
    /// Answer with [`Poller::answer_auth`], then tick again.
    AuthRequested,
    AuthSucceeded(Pack),
    AuthFailed,
    /// Terminal. The snapshot stays readable until the next scan starts.
    ReadSucceeded,
    /// Terminal.
    ReadFailed(Error),
    /// A stop was requested; the transport is halted and the poller idle.
    Stopped,
}

/// Caller answer to an authentication request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthDecision {
    #[default]
    Skip,
    Password(Password),
}

/// Events delivered by [`Poller::run`].
#[derive(Debug)]
pub enum PollerEvent<'a> {
    /// Fill in the decision. Left untouched it stays [`AuthDecision::Skip`].
    AuthRequest(&'a mut AuthDecision),
    AuthSuccess { pack: Pack },
    AuthFailed,
    ReadSuccess(&'a TagSnapshot),
    ReadFailed(&'a Error),
}

/// Callback verdict for [`Poller::run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Flow {
    #[default]
    Continue,
    Stop,
}

/// Password authentication bookkeeping for one scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AuthContext {
    pub password: Password,
    pub pack: Pack,
    pub success: bool,
    pub skip: bool,
}

/// Cloneable stop flag. Checked before every tick; consumed when honoured.
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn request_stop(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_stop_requested(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    fn take(&self) -> bool {
        self.0.swap(false, Ordering::AcqRel)
    }
}

/// The polling state machine.
#[derive(Debug)]
pub struct Poller {
    config: PollerConfig,
    state: PollerState,
    snapshot: TagSnapshot,
    features: FeatureSet,
    counters_read: usize,
    counters_total: usize,
    tearing_flags_read: usize,
    tearing_flags_total: usize,
    auth: AuthContext,
    auth_requested: bool,
    auth_answer: Option<AuthDecision>,
    selected_sector: u8,
    error: Option<Error>,
    stop: StopHandle,
}

impl Default for Poller {
    fn default() -> Self {
        Self::new()
    }
}

impl Poller {
    pub fn new() -> Self {
        Self::with_config(PollerConfig::default())
    }

    pub fn with_config(config: PollerConfig) -> Self {
        Self {
            config,
            state: PollerState::Idle,
            snapshot: TagSnapshot::default(),
            features: FeatureSet::empty(),
            counters_read: 0,
            counters_total: 0,
            tearing_flags_read: 0,
            tearing_flags_total: 0,
            auth: AuthContext::default(),
            auth_requested: false,
            auth_answer: None,
            selected_sector: 0,
            error: None,
            stop: StopHandle::default(),
        }
    }

    pub fn config(&self) -> &PollerConfig {
        &self.config
    }

    pub fn state(&self) -> PollerState {
        self.state
    }

    /// Snapshot of the current or most recent scan.
    pub fn snapshot(&self) -> &TagSnapshot {
        &self.snapshot
    }

    pub fn auth_context(&self) -> &AuthContext {
        &self.auth
    }

    pub fn selected_sector(&self) -> u8 {
        self.selected_sector
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Deliver the decision for a pending [`Step::AuthRequested`].
    pub fn answer_auth(&mut self, decision: AuthDecision) {
        self.auth_answer = Some(decision);
    }

    /// Run the current state's handler once.
    pub fn tick(&mut self, transport: &mut dyn FrameTransport) -> Step {
        if self.stop.take() {
            log::debug!("stop requested in {:?}", self.state);
            self.halt(transport);
            self.state = PollerState::Idle;
            return Step::Stopped;
        }

        match self.state {
            PollerState::Idle => self.handle_idle(transport),
            PollerState::ReadVersion => self.handle_read_version(transport),
            PollerState::DetectNtag203 => self.handle_detect_ntag203(transport),
            PollerState::GetFeatureSet => self.handle_get_feature_set(),
            PollerState::ReadSignature => self.handle_read_signature(transport),
            PollerState::ReadCounters => self.handle_read_counters(transport),
            PollerState::ReadTearingFlags => self.handle_read_tearing_flags(transport),
            PollerState::Auth => self.handle_auth(transport),
            PollerState::ReadPages => self.handle_read_pages(transport),
            PollerState::TryDefaultPassword => self.handle_try_default_password(transport),
            PollerState::ReadFailed => self.handle_read_failed(transport),
            PollerState::ReadSuccess => self.handle_read_success(transport),
        }
    }

    /// Drive a whole scan, forwarding events to `on_event`.
    ///
    /// Returns `Ok` after `ReadSuccess`, the fatal error after
    /// `ReadFailed`, and [`Error::Cancelled`] when stopped, either through
    /// [`Flow::Stop`] or a [`StopHandle`].
    pub fn run<F>(&mut self, transport: &mut dyn FrameTransport, mut on_event: F) -> Result<()>
    where
        F: FnMut(PollerEvent<'_>) -> Flow,
    {
        loop {
            let flow = match self.tick(transport) {
                Step::Continue => Flow::Continue,
                Step::AuthRequested => {
                    let mut decision = AuthDecision::Skip;
                    let flow = on_event(PollerEvent::AuthRequest(&mut decision));
                    self.answer_auth(decision);
                    flow
                }
                Step::AuthSucceeded(pack) => on_event(PollerEvent::AuthSuccess { pack }),
                Step::AuthFailed => on_event(PollerEvent::AuthFailed),
                Step::ReadSucceeded => {
                    on_event(PollerEvent::ReadSuccess(&self.snapshot));
                    return Ok(());
                }
                Step::ReadFailed(err) => {
                    on_event(PollerEvent::ReadFailed(&err));
                    return Err(err);
                }
                Step::Stopped => return Err(Error::Cancelled),
            };
            if flow == Flow::Stop {
                self.stop.request_stop();
            }
        }
    }

    fn handle_idle(&mut self, transport: &mut dyn FrameTransport) -> Step {
        self.snapshot = TagSnapshot::new(transport.anticollision());
        self.features = FeatureSet::empty();
        self.counters_read = 0;
        self.counters_total = 0;
        self.tearing_flags_read = 0;
        self.tearing_flags_total = 0;
        self.auth = AuthContext::default();
        self.auth_requested = false;
        self.auth_answer = None;
        self.selected_sector = 0;
        self.error = None;
        log::debug!("scan start, uid {}", self.snapshot.uid().to_hex());
        self.state = PollerState::ReadVersion;
        Step::Continue
    }

    fn handle_read_version(&mut self, transport: &mut dyn FrameTransport) -> Step {
        match self.read_version(transport) {
            Ok(version) => {
                let tag_type = TagType::from_version(&version);
                log::debug!("version {:02X?} -> {tag_type}", version.to_bytes());
                self.snapshot.set_version(version);
                self.snapshot.set_tag_type(tag_type);
                self.state = PollerState::GetFeatureSet;
            }
            Err(err) => {
                // Tags without GET_VERSION NAK it
                log::debug!("no version ({err}), probing for NTAG203");
                self.halt(transport);
                self.state = PollerState::DetectNtag203;
            }
        }
        Step::Continue
    }

    fn handle_detect_ntag203(&mut self, transport: &mut dyn FrameTransport) -> Step {
        let tag_type = match self.read_pages(transport, NTAG203_PROBE_PAGE) {
            Ok(_) => TagType::Ntag203,
            Err(err) => {
                log::debug!("page {NTAG203_PROBE_PAGE} unreadable ({err})");
                self.halt(transport);
                TagType::Origin
            }
        };
        self.snapshot.set_tag_type(tag_type);
        self.state = PollerState::GetFeatureSet;
        Step::Continue
    }

    fn handle_get_feature_set(&mut self) -> Step {
        // tag type is always resolved by now
        let tag_type = self.snapshot.tag_type().unwrap_or(TagType::Origin);
        self.features = tag_type.features();
        self.counters_total = if self.features.contains(FeatureSet::READ_COUNTER) {
            COUNTER_NUM
        } else {
            0
        };
        self.tearing_flags_total = if self.features.contains(FeatureSet::CHECK_TEARING_FLAG) {
            TEARING_FLAG_NUM
        } else {
            0
        };
        log::debug!(
            "{tag_type}: {} pages, features {:?}",
            self.snapshot.pages_total(),
            self.features
        );
        self.state = PollerState::ReadSignature;
        Step::Continue
    }

    fn handle_read_signature(&mut self, transport: &mut dyn FrameTransport) -> Step {
        self.state = PollerState::ReadCounters;
        if !self.features.contains(FeatureSet::READ_SIGNATURE) {
            return Step::Continue;
        }
        match self.read_signature(transport) {
            Ok(signature) => self.snapshot.set_signature(signature),
            Err(err) => self.fail(err),
        }
        Step::Continue
    }

    fn handle_read_counters(&mut self, transport: &mut dyn FrameTransport) -> Step {
        let provisioned = self.snapshot.counters_configured() != Some(false);
        if !self.features.contains(FeatureSet::READ_COUNTER)
            || !provisioned
            || self.counters_read >= self.counters_total
        {
            self.state = PollerState::ReadTearingFlags;
            return Step::Continue;
        }

        if self.features.contains(FeatureSet::SINGLE_COUNTER) {
            self.counters_read = SINGLE_COUNTER_INDEX;
        }
        let index = self.counters_read;
        match self.read_counter(transport, index as u8) {
            Ok(counter) => {
                self.snapshot.set_counter(index, counter);
                self.counters_read += 1;
            }
            Err(err) => {
                log::debug!("counter {index} unreadable ({err}), skipping counters");
                self.state = PollerState::ReadTearingFlags;
            }
        }
        Step::Continue
    }

    fn handle_read_tearing_flags(&mut self, transport: &mut dyn FrameTransport) -> Step {
        if !self.features.contains(FeatureSet::CHECK_TEARING_FLAG)
            || self.tearing_flags_read >= self.tearing_flags_total
        {
            self.state = PollerState::Auth;
            return Step::Continue;
        }

        let index = self.tearing_flags_read;
        match self.read_tearing_flag(transport, index as u8) {
            Ok(flag) => {
                self.snapshot.set_tearing_flag(index, flag);
                self.tearing_flags_read += 1;
            }
            Err(err) => self.fail(err),
        }
        Step::Continue
    }

    fn handle_auth(&mut self, transport: &mut dyn FrameTransport) -> Step {
        if !self.features.contains(FeatureSet::PASSWORD_AUTH) {
            self.state = PollerState::ReadPages;
            return Step::Continue;
        }
        if !self.auth_requested {
            self.auth_requested = true;
            return Step::AuthRequested;
        }

        self.state = PollerState::ReadPages;
        let password = match self.auth_answer.take().unwrap_or_default() {
            AuthDecision::Skip => {
                log::debug!("auth skipped");
                self.auth.skip = true;
                return Step::Continue;
            }
            AuthDecision::Password(password) => password,
        };

        self.auth.password = password;
        match self.authenticate(transport, &password) {
            Ok(pack) => {
                self.auth.pack = pack;
                self.auth.success = true;
                Step::AuthSucceeded(pack)
            }
            Err(err) => {
                log::debug!("auth failed: {err}");
                self.halt(transport);
                Step::AuthFailed
            }
        }
    }

    fn handle_read_pages(&mut self, transport: &mut dyn FrameTransport) -> Step {
        let start = self.snapshot.pages_read();
        let total = self.snapshot.pages_total();
        if start >= total {
            self.state = PollerState::TryDefaultPassword;
            return Step::Continue;
        }

        let tag_type = self.snapshot.tag_type().unwrap_or(TagType::Origin);
        let read = if tag_type.is_ntag_i2c() {
            match tag::translate(tag_type, start) {
                Some(addr) => self
                    .read_pages_from_sector(transport, addr.sector, addr.address)
                    .map(|pages| (pages, addr.pages_left as usize + 1)),
                None => Err(Error::OutOfRange {
                    what: "page",
                    index: start,
                    limit: total,
                }),
            }
        } else {
            match u8::try_from(start) {
                Ok(page) => self
                    .read_pages(transport, page)
                    .map(|pages| (pages, PAGES_PER_READ)),
                Err(_) => Err(Error::OutOfRange {
                    what: "page",
                    index: start,
                    limit: usize::from(u8::MAX) + 1,
                }),
            }
        };

        match read {
            Ok((pages, usable)) => {
                let count = usable.min(PAGES_PER_READ);
                self.snapshot.append_pages(&pages[..count]);
                if self.snapshot.pages_read() == total {
                    self.state = PollerState::TryDefaultPassword;
                }
            }
            Err(err) if start > 0 => {
                log::debug!("read stopped at page {start}: {err}");
                self.state = PollerState::TryDefaultPassword;
            }
            Err(err) => self.fail(err),
        }
        Step::Continue
    }

    fn handle_try_default_password(&mut self, transport: &mut dyn FrameTransport) -> Step {
        self.state = PollerState::ReadSuccess;
        if !self.features.contains(FeatureSet::PASSWORD_AUTH) {
            return Step::Continue;
        }
        let Some(mut config) = self.snapshot.config() else {
            return Step::Continue;
        };

        if self.auth.success {
            config.password = self.auth.password;
            config.pack = self.auth.pack;
        } else if config.access.authlim() == 0 && self.config.try_default_password {
            let password = self.config.default_password;
            log::debug!("trying default password");
            match self.authenticate(transport, &password) {
                Ok(pack) => {
                    self.auth.password = password;
                    self.auth.pack = pack;
                    self.auth.success = true;
                    config.password = password;
                    config.pack = pack;
                }
                Err(err) => log::debug!("default password rejected: {err}"),
            }
        }

        let pages_read = self.snapshot.pages_read();
        if pages_read != self.snapshot.pages_total() {
            // Unread pages are most likely behind AUTH0
            config.auth0 = u8::try_from(pages_read).unwrap_or(u8::MAX);
            config.access.set_prot(true);
        }
        self.snapshot.set_config(&config);
        Step::Continue
    }

    fn handle_read_failed(&mut self, transport: &mut dyn FrameTransport) -> Step {
        self.halt(transport);
        self.state = PollerState::Idle;
        let err = self
            .error
            .take()
            .unwrap_or_else(|| Error::Protocol("read failed".into()));
        log::debug!("read failed: {err}");
        Step::ReadFailed(err)
    }

    fn handle_read_success(&mut self, transport: &mut dyn FrameTransport) -> Step {
        self.halt(transport);
        self.state = PollerState::Idle;
        log::debug!(
            "read {}/{} pages",
            self.snapshot.pages_read(),
            self.snapshot.pages_total()
        );
        Step::ReadSucceeded
    }

    fn fail(&mut self, err: Error) {
        log::debug!("{:?} failed: {err}", self.state);
        self.error = Some(err);
        self.state = PollerState::ReadFailed;
    }
}
