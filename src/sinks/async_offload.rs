//! Decorator moving the format and write of each record onto a thread pool

use crate::core::level::Level;
use crate::core::record::RecordRef;
use crate::core::sink::Sink;
use crate::utils::ThreadPool;
use std::sync::Arc;

/// Fire-and-forget sink: every record is owned and queued on the pool.
///
/// Records reach the inner sink in queue order only when the pool has a
/// single worker.
pub struct AsyncOffload<S> {
    inner: Arc<S>,
    pool: Arc<ThreadPool>,
}

pub fn with_async_offload<S: Sink + 'static>(sink: S, pool: Arc<ThreadPool>) -> AsyncOffload<S> {
    AsyncOffload {
        inner: Arc::new(sink),
        pool,
    }
}

impl<S> AsyncOffload<S> {
    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn pool(&self) -> &Arc<ThreadPool> {
        &self.pool
    }
}

impl<S: Sink + 'static> Sink for AsyncOffload<S> {
    fn allocate_on_stack(&self) -> bool {
        false
    }

    #[inline]
    fn enabled(&self, level: Level) -> bool {
        self.inner.enabled(level)
    }

    fn log(&self, record: RecordRef<'_>) {
        let record = record.into_owned();
        let inner = Arc::clone(&self.inner);
        self.pool.queue(move || inner.log(RecordRef::Owned(record)));
    }
}
