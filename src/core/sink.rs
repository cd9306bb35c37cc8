//! Sink trait: where records go once a logger accepts them

use crate::core::level::Level;
use crate::core::record::RecordRef;

/// Consumer of log records.
///
/// A logger asks [`Sink::enabled`] before building a record, so a disabled
/// level costs one lookup. When [`Sink::allocate_on_stack`] is true the sink
/// must be done with the record when [`Sink::log`] returns, and the logger
/// lends it a record living on its own stack. Otherwise the record is boxed
/// and handed over.
pub trait Sink: Send + Sync {
    fn allocate_on_stack(&self) -> bool;
    fn enabled(&self, level: Level) -> bool;
    fn log(&self, record: RecordRef<'_>);
}

impl<S: Sink + ?Sized> Sink for std::sync::Arc<S> {
    fn allocate_on_stack(&self) -> bool {
        (**self).allocate_on_stack()
    }

    fn enabled(&self, level: Level) -> bool {
        (**self).enabled(level)
    }

    fn log(&self, record: RecordRef<'_>) {
        (**self).log(record)
    }
}
