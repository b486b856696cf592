// libultralight-rs/libultralight/src/poller/sync.rs
//! Blocking facade over the poller.
//!
//! A worker thread owns the transport and a [`Poller`]. Every call is sent
//! to it as a job; the worker runs exactly one operation, answers on a
//! oneshot channel and halts the tag. The blocking methods must not be
//! called from inside an async runtime; use the `*_async` variants there
//! (feature `async`).

use std::thread::{self, JoinHandle};

use tokio::sync::{mpsc, oneshot};

use super::{AuthDecision, Flow, Poller, PollerConfig, PollerEvent, StopHandle};
use crate::constants::{COUNTER_NUM, TEARING_FLAG_NUM};
use crate::tag::TagSnapshot;
use crate::transport::FrameTransport;
use crate::types::{Counter, Page, Signature, TearingFlag, Version};
use crate::{Error, Result};

type Job = Box<dyn FnOnce(&mut dyn FrameTransport, &mut Poller) + Send>;

/// One job in flight at a time
const QUEUE_DEPTH: usize = 1;

pub struct SyncPoller {
    jobs: Option<mpsc::Sender<Job>>,
    worker: Option<JoinHandle<()>>,
    stop: StopHandle,
}

impl SyncPoller {
    /// Spawn the worker thread owning `transport`.
    pub fn new<T>(transport: T, config: PollerConfig) -> Result<Self>
    where
        T: FrameTransport + Send + 'static,
    {
        let (tx, mut rx) = mpsc::channel::<Job>(QUEUE_DEPTH);
        let mut poller = Poller::with_config(config);
        let stop = poller.stop_handle();

        let worker = thread::Builder::new()
            .name("ultralight-poller".into())
            .spawn(move || {
                let mut transport = transport;
                while let Some(job) = rx.blocking_recv() {
                    // only stops raised while a job runs count
                    if poller.stop.take() {
                        log::debug!("dropping stop requested while idle");
                    }
                    job(&mut transport, &mut poller);
                    poller.halt(&mut transport);
                }
                log::debug!("poller worker exiting");
            })?;

        Ok(Self {
            jobs: Some(tx),
            worker: Some(worker),
            stop,
        })
    }

    /// Handle to cancel a [`SyncPoller::read_card`] in progress. Requests
    /// made while no job is running are discarded when the next job starts.
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    fn job<R, F>(op: F) -> (Job, oneshot::Receiver<Result<R>>)
    where
        R: Send + 'static,
        F: FnOnce(&mut dyn FrameTransport, &mut Poller) -> Result<R> + Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        let job: Job = Box::new(move |transport: &mut dyn FrameTransport, poller: &mut Poller| {
            // receiver gone means the caller stopped waiting
            let _ = tx.send(op(transport, poller));
        });
        (job, rx)
    }

    fn sender(&self) -> Result<&mpsc::Sender<Job>> {
        self.jobs.as_ref().ok_or(Error::Disconnected)
    }

    fn call<R, F>(&self, op: F) -> Result<R>
    where
        R: Send + 'static,
        F: FnOnce(&mut dyn FrameTransport, &mut Poller) -> Result<R> + Send + 'static,
    {
        let (job, rx) = Self::job(op);
        self.sender()?
            .blocking_send(job)
            .map_err(|_| Error::Disconnected)?;
        rx.blocking_recv().map_err(|_| Error::Disconnected)?
    }

    /// Read one page. Page addresses are tag-local; NTAG I2C sectors are
    /// not switched.
    pub fn read_page(&self, page: u8) -> Result<Page> {
        self.call(move |t, p| p.read_pages(t, page).map(|pages| pages[0]))
    }

    pub fn read_version(&self) -> Result<Version> {
        self.call(|t, p| p.read_version(t))
    }

    pub fn read_signature(&self) -> Result<Signature> {
        self.call(|t, p| p.read_signature(t))
    }

    pub fn read_counter(&self, counter: usize) -> Result<Counter> {
        let counter = check_index("counter", counter, COUNTER_NUM)?;
        self.call(move |t, p| p.read_counter(t, counter))
    }

    pub fn read_tearing_flag(&self, flag: usize) -> Result<TearingFlag> {
        let flag = check_index("tearing flag", flag, TEARING_FLAG_NUM)?;
        self.call(move |t, p| p.read_tearing_flag(t, flag))
    }

    pub fn write_page(&self, page: u8, data: Page) -> Result<()> {
        self.call(move |t, p| p.write_page(t, page, &data))
    }

    /// Run a full scan and return a copy of the snapshot.
    pub fn read_card(&self, decision: AuthDecision) -> Result<TagSnapshot> {
        self.call(move |t, p| scan(t, p, decision))
    }
}

#[cfg(feature = "async")]
impl SyncPoller {
    async fn call_async<R, F>(&self, op: F) -> Result<R>
    where
        R: Send + 'static,
        F: FnOnce(&mut dyn FrameTransport, &mut Poller) -> Result<R> + Send + 'static,
    {
        let (job, rx) = Self::job(op);
        self.sender()?
            .send(job)
            .await
            .map_err(|_| Error::Disconnected)?;
        rx.await.map_err(|_| Error::Disconnected)?
    }

    pub async fn read_page_async(&self, page: u8) -> Result<Page> {
        self.call_async(move |t, p| p.read_pages(t, page).map(|pages| pages[0]))
            .await
    }

    pub async fn read_version_async(&self) -> Result<Version> {
        self.call_async(|t, p| p.read_version(t)).await
    }

    pub async fn read_signature_async(&self) -> Result<Signature> {
        self.call_async(|t, p| p.read_signature(t)).await
    }

    pub async fn read_counter_async(&self, counter: usize) -> Result<Counter> {
        let counter = check_index("counter", counter, COUNTER_NUM)?;
        self.call_async(move |t, p| p.read_counter(t, counter)).await
    }

    pub async fn read_tearing_flag_async(&self, flag: usize) -> Result<TearingFlag> {
        let flag = check_index("tearing flag", flag, TEARING_FLAG_NUM)?;
        self.call_async(move |t, p| p.read_tearing_flag(t, flag))
            .await
    }

    pub async fn write_page_async(&self, page: u8, data: Page) -> Result<()> {
        self.call_async(move |t, p| p.write_page(t, page, &data))
            .await
    }

    pub async fn read_card_async(&self, decision: AuthDecision) -> Result<TagSnapshot> {
        self.call_async(move |t, p| scan(t, p, decision)).await
    }
}

impl Drop for SyncPoller {
    fn drop(&mut self) {
        // closing the queue ends the worker loop
        self.jobs.take();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                log::warn!("poller worker panicked");
            }
        }
    }
}

fn check_index(what: &'static str, index: usize, limit: usize) -> Result<u8> {
    if index >= limit {
        return Err(Error::OutOfRange { what, index, limit });
    }
    Ok(index as u8)
}

fn scan(
    transport: &mut dyn FrameTransport,
    poller: &mut Poller,
    decision: AuthDecision,
) -> Result<TagSnapshot> {
    poller.run(transport, |event| {
        if let PollerEvent::AuthRequest(answer) = event {
            *answer = decision;
        }
        Flow::Continue
    })?;
    Ok(poller.snapshot().clone())
}
