//! Sink implementations and concurrency modes

pub mod async_offload;
pub mod destination;
pub mod locked;
pub mod writer;

pub use async_offload::{with_async_offload, AsyncOffload};
pub use destination::{Destination, FileDestination, ProgramOutput};
pub use locked::{with_locking, Locked};
pub use writer::WriterSink;

use crate::core::Sink;
use crate::utils::{ObjectPool, ThreadPool};
use once_cell::sync::Lazy;
use std::sync::Arc;

static BUFFER_POOL: Lazy<ObjectPool<String>> = Lazy::new(ObjectPool::new);

static THREAD_POOL: Lazy<Arc<ThreadPool>> = Lazy::new(|| Arc::new(ThreadPool::new()));

/// Formatting buffers shared by every sink of the process.
pub fn buffer_pool() -> &'static ObjectPool<String> {
    &BUFFER_POOL
}

/// Pool running the work of configuration-built asynchronous sinks. It has
/// no workers until a configuration asks for some.
pub fn shared_thread_pool() -> Arc<ThreadPool> {
    Arc::clone(&THREAD_POOL)
}

/// How a sink is shared between the threads that log to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConcurrencyMode {
    /// Synchronous, no lock
    Unsafe,
    /// Synchronous, one writer at a time
    MtSafe,
    /// Queued on a thread pool
    Async,
    /// Queued on a thread pool, one writer at a time
    AsyncMtSafe,
}

impl ConcurrencyMode {
    pub fn new(with_locking: bool, is_async: bool) -> Self {
        match (with_locking, is_async) {
            (false, false) => ConcurrencyMode::Unsafe,
            (true, false) => ConcurrencyMode::MtSafe,
            (false, true) => ConcurrencyMode::Async,
            (true, true) => ConcurrencyMode::AsyncMtSafe,
        }
    }

    pub fn is_async(self) -> bool {
        matches!(self, ConcurrencyMode::Async | ConcurrencyMode::AsyncMtSafe)
    }

    /// Whether records can be lent from the producer's stack.
    pub fn allocate_on_stack(self) -> bool {
        !self.is_async()
    }
}

/// Wrap `sink` in the decorators of `mode`.
pub fn compose<S: Sink + 'static>(
    sink: S,
    mode: ConcurrencyMode,
    pool: &Arc<ThreadPool>,
) -> Arc<dyn Sink> {
    match mode {
        ConcurrencyMode::Unsafe => Arc::new(sink),
        ConcurrencyMode::MtSafe => Arc::new(with_locking(sink)),
        ConcurrencyMode::Async => Arc::new(with_async_offload(sink, Arc::clone(pool))),
        ConcurrencyMode::AsyncMtSafe => Arc::new(with_async_offload(
            with_locking(sink),
            Arc::clone(pool),
        )),
    }
}
