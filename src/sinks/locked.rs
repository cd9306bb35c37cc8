//! Mutex decorator serializing every write of the wrapped sink

use crate::core::level::Level;
use crate::core::record::RecordRef;
use crate::core::sink::Sink;
use parking_lot::Mutex;

/// Holds a mutex for the whole format and write of each record.
pub struct Locked<S> {
    inner: S,
    mutex: Mutex<()>,
}

pub fn with_locking<S: Sink>(sink: S) -> Locked<S> {
    Locked {
        inner: sink,
        mutex: Mutex::new(()),
    }
}

impl<S> Locked<S> {
    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: Sink> Sink for Locked<S> {
    fn allocate_on_stack(&self) -> bool {
        self.inner.allocate_on_stack()
    }

    #[inline]
    fn enabled(&self, level: Level) -> bool {
        self.inner.enabled(level)
    }

    fn log(&self, record: RecordRef<'_>) {
        let _guard = self.mutex.lock();
        self.inner.log(record);
    }
}
