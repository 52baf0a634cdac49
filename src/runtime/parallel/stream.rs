//! In-order execution stream
//!
//! A stream owns one worker thread that runs submissions strictly in the order
//! they were enqueued. Kernel launches and stream-ordered frees are both
//! submissions, so memory released behind a kernel is never freed while that
//! kernel can still touch it.
//!
//! A panic inside a submission is caught on the worker, recorded, and reported
//! by the next [`Stream::synchronize`]; later submissions still run.

use crate::error::{Error, Result};
use parking_lot::{Condvar, Mutex};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc;

type Job = Box<dyn FnOnce() + Send + 'static>;

struct Submission {
    id: u64,
    name: &'static str,
    job: Job,
}

#[derive(Default)]
struct StreamState {
    pending: Mutex<usize>,
    drained: Condvar,
    failure: Mutex<Option<(&'static str, String)>>,
}

/// Per-device in-order execution stream
pub struct Stream {
    label: String,
    sender: Mutex<Option<mpsc::Sender<Submission>>>,
    state: Arc<StreamState>,
    next_id: AtomicU64,
}

impl Stream {
    pub(crate) fn new(label: String) -> Self {
        Self {
            label,
            sender: Mutex::new(None),
            state: Arc::new(StreamState::default()),
            next_id: AtomicU64::new(0),
        }
    }

    /// Name of the stream's worker thread
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Number of submissions that have not finished yet
    pub fn pending(&self) -> usize {
        *self.state.pending.lock()
    }

    /// Enqueue `job` behind every earlier submission
    ///
    /// Returns immediately; the job runs asynchronously on the stream worker.
    pub fn enqueue<F>(&self, name: &'static str, job: F) -> Result<()>
    where
        F: FnOnce() + Send + 'static,
    {
        let mut guard = self.sender.lock();
        let tx = match guard.take() {
            Some(tx) => tx,
            None => self.spawn_worker(name)?,
        };

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        *self.state.pending.lock() += 1;
        log::trace!("{} submit #{}: '{}'", self.label, id, name);

        let sent = tx.send(Submission {
            id,
            name,
            job: Box::new(job),
        });
        *guard = Some(tx);

        if sent.is_err() {
            self.finish_one();
            return Err(Error::launch_failed(name, "stream worker has exited"));
        }
        Ok(())
    }

    /// Run `job` in stream order, or inline when the stream was never started
    ///
    /// Used for host-side work (memory release) that must not overtake
    /// queued kernels but has no way to report a failure.
    pub(crate) fn enqueue_host<F>(&self, name: &'static str, job: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let sender = (*self.sender.lock()).clone();
        let Some(tx) = sender else {
            job();
            return;
        };

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        *self.state.pending.lock() += 1;
        if let Err(mpsc::SendError(submission)) = tx.send(Submission {
            id,
            name,
            job: Box::new(job),
        }) {
            self.finish_one();
            (submission.job)();
        }
    }

    /// Block until every submission so far has finished
    ///
    /// Returns the first kernel failure recorded since the previous call.
    pub fn synchronize(&self) -> Result<()> {
        let mut pending = self.state.pending.lock();
        while *pending > 0 {
            self.state.drained.wait(&mut pending);
        }
        drop(pending);

        match self.state.failure.lock().take() {
            Some((kernel, reason)) => Err(Error::KernelFailed { kernel, reason }),
            None => Ok(()),
        }
    }

    fn finish_one(&self) {
        let mut pending = self.state.pending.lock();
        *pending -= 1;
        if *pending == 0 {
            self.state.drained.notify_all();
        }
    }

    fn spawn_worker(&self, name: &'static str) -> Result<mpsc::Sender<Submission>> {
        let (tx, rx) = mpsc::channel::<Submission>();
        let state = Arc::clone(&self.state);
        let label = self.label.clone();

        std::thread::Builder::new()
            .name(self.label.clone())
            .spawn(move || {
                for submission in rx {
                    let outcome = panic::catch_unwind(AssertUnwindSafe(submission.job));
                    if let Err(payload) = outcome {
                        let reason = panic_message(payload.as_ref());
                        log::debug!(
                            "{} submission #{} '{}' failed: {}",
                            label,
                            submission.id,
                            submission.name,
                            reason
                        );
                        let mut failure = state.failure.lock();
                        if failure.is_none() {
                            *failure = Some((submission.name, reason));
                        }
                    }

                    let mut pending = state.pending.lock();
                    *pending -= 1;
                    if *pending == 0 {
                        state.drained.notify_all();
                    }
                }
            })
            .map_err(|e| Error::launch_failed(name, format!("cannot start stream worker: {e}")))?;

        log::debug!("{}: stream worker started", self.label);
        Ok(tx)
    }
}

impl std::fmt::Debug for Stream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stream")
            .field("label", &self.label)
            .field("pending", &self.pending())
            .finish()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
