//! Where request work runs.
//!
//! Controllers never block the control thread on the network: they hand a
//! job to a `Dispatch` implementation, and the job reports back through the
//! slot's completion channel.

use std::collections::VecDeque;
use std::io;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::thread;

/// A unit of off-thread work.
pub type Job = Box<dyn FnOnce() + Send + 'static>;

pub trait Dispatch: Send + Sync {
    /// Run `job` somewhere. `label` names the work for thread names and logs.
    fn dispatch(&self, label: &str, job: Job) -> io::Result<()>;
}

/// One named OS thread per request. Abandoned requests still run to
/// completion; their results are discarded by the generation guard.
#[derive(Debug, Default)]
pub struct ThreadDispatcher {
    spawned: AtomicU64,
}

impl ThreadDispatcher {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Dispatch for ThreadDispatcher {
    fn dispatch(&self, label: &str, job: Job) -> io::Result<()> {
        let n = self.spawned.fetch_add(1, Ordering::Relaxed);
        thread::Builder::new()
            .name(format!("signalradar-{label}-{n}"))
            .spawn(job)?;
        Ok(())
    }
}

/// Runs the job on the calling thread before returning. Used by the CLI,
/// where blocking the caller is the point.
#[derive(Debug, Default, Clone, Copy)]
pub struct InlineDispatcher;

impl Dispatch for InlineDispatcher {
    fn dispatch(&self, _label: &str, job: Job) -> io::Result<()> {
        job();
        Ok(())
    }
}

/// Queues jobs until told to run them, so completion order can be chosen
/// freely. Used to replay out-of-order network completions deterministically.
#[derive(Default)]
pub struct ManualDispatcher {
    queue: Mutex<VecDeque<(String, Job)>>,
}

impl ManualDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> usize {
        self.lock().len()
    }

    /// Labels of the queued jobs, oldest first.
    pub fn labels(&self) -> Vec<String> {
        self.lock().iter().map(|(label, _)| label.clone()).collect()
    }

    /// Run the job at `index` (0 = oldest). Returns false if there is none.
    pub fn run(&self, index: usize) -> bool {
        let job = self.lock().remove(index);
        match job {
            Some((_, job)) => {
                job();
                true
            }
            None => false,
        }
    }

    pub fn run_oldest(&self) -> bool {
        self.run(0)
    }

    pub fn run_newest(&self) -> bool {
        let len = self.pending();
        len > 0 && self.run(len - 1)
    }

    /// Run everything queued, oldest first. Returns how many ran.
    pub fn run_all(&self) -> usize {
        let mut ran = 0;
        while self.run_oldest() {
            ran += 1;
        }
        ran
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, VecDeque<(String, Job)>> {
        // A panicking job cannot poison this lock: jobs run after it is released.
        self.queue.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Dispatch for ManualDispatcher {
    fn dispatch(&self, label: &str, job: Job) -> io::Result<()> {
        self.lock().push_back((label.to_string(), job));
        Ok(())
    }
}
