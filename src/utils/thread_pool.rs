//! Resizable pool of worker threads fed from a shared job queue

use crate::core::error::{Result, SlogError};
use crossbeam_channel::{bounded, select, unbounded, Receiver, Sender};
use parking_lot::RwLock;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::thread::{self, JoinHandle};

pub type Job = Box<dyn FnOnce() + Send + 'static>;

struct Worker {
    stop: Sender<()>,
    handle: JoinHandle<()>,
}

impl Worker {
    fn spawn(id: usize, jobs: Receiver<Job>) -> Result<Self> {
        let (stop, stopped) = bounded::<()>(1);
        let handle = thread::Builder::new()
            .name(format!("slogpp-worker-{}", id))
            .spawn(move || loop {
                select! {
                    recv(stopped) -> _ => break,
                    recv(jobs) -> job => match job {
                        Ok(job) => run_job(job),
                        Err(_) => break,
                    },
                }
            })
            .map_err(|e| SlogError::io_operation("spawning pool worker", e))?;
        Ok(Self { stop, handle })
    }
}

/// Run a job, containing any panic so the calling thread survives it.
fn run_job(job: Job) {
    if let Err(panic_info) = catch_unwind(AssertUnwindSafe(job)) {
        let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };
        eprintln!("[SLOG CRITICAL] Pool job panicked: {}", panic_msg);
    }
}

/// Fixed-size set of workers consuming jobs in FIFO order.
///
/// A pool without workers runs each job inline on the thread that queues it.
///
/// # Example
///
/// ```
/// use slogpp::utils::ThreadPool;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
///
/// let pool = ThreadPool::with_size(2).unwrap();
/// let done = Arc::new(AtomicUsize::new(0));
/// for _ in 0..10 {
///     let done = Arc::clone(&done);
///     pool.queue(move || {
///         done.fetch_add(1, Ordering::SeqCst);
///     });
/// }
/// pool.set_size(0).unwrap();
/// assert_eq!(done.load(Ordering::SeqCst), 10);
/// ```
pub struct ThreadPool {
    jobs: Sender<Job>,
    receiver: Receiver<Job>,
    workers: RwLock<Vec<Worker>>,
}

impl ThreadPool {
    /// A pool with no workers.
    pub fn new() -> Self {
        let (jobs, receiver) = unbounded();
        Self {
            jobs,
            receiver,
            workers: RwLock::new(Vec::new()),
        }
    }

    pub fn with_size(size: usize) -> Result<Self> {
        let pool = Self::new();
        pool.set_size(size)?;
        Ok(pool)
    }

    pub fn size(&self) -> usize {
        self.workers.read().len()
    }

    /// Jobs waiting for a worker.
    pub fn pending(&self) -> usize {
        self.receiver.len()
    }

    pub fn queue<F>(&self, job: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let workers = self.workers.read_recursive();
        if workers.is_empty() {
            drop(workers);
            run_job(Box::new(job));
            return;
        }
        // The pool keeps a receiver alive, so the channel never disconnects.
        if let Err(unsent) = self.jobs.send(Box::new(job)) {
            drop(workers);
            run_job(unsent.into_inner());
        }
    }

    /// Grow or shrink to `size` workers.
    ///
    /// Shrinking stops the excess workers and joins them before returning;
    /// a worker finishes the job it is running first. Shrinking to zero also
    /// runs every job still queued on the calling thread.
    pub fn set_size(&self, size: usize) -> Result<()> {
        let excess = {
            let mut workers = self.workers.write();
            while workers.len() < size {
                let worker = Worker::spawn(workers.len(), self.receiver.clone())?;
                workers.push(worker);
            }
            if workers.len() > size {
                workers.split_off(size)
            } else {
                Vec::new()
            }
        };

        for worker in &excess {
            let _ = worker.stop.send(());
        }
        for worker in excess {
            if worker.handle.join().is_err() {
                eprintln!("[SLOG ERROR] Pool worker panicked during shutdown");
            }
        }

        if size == 0 {
            self.drain();
        }
        Ok(())
    }

    fn drain(&self) {
        let workers = self.workers.read_recursive();
        if !workers.is_empty() {
            return;
        }
        while let Ok(job) = self.receiver.try_recv() {
            run_job(job);
        }
    }
}

impl Default for ThreadPool {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ThreadPool {
    fn drop(&mut self) {
        // Shrinking never spawns, so it cannot fail.
        let _ = self.set_size(0);
    }
}
