//! Formatting sink: renders records and writes them to a destination

use super::buffer_pool;
use super::destination::Destination;
use crate::core::level::{AtomicLevelFilter, Level, LevelFilter};
use crate::core::output_format::Formatter;
use crate::core::record::{Record, RecordRef};
use crate::core::sink::Sink;
use crate::core::{Result, SinkMetrics};

/// Formats each record into a pooled buffer and writes it as one line.
///
/// On its own this is the unsynchronized mode: no lock is taken around the
/// write. Wrap it with [`Locked`](super::Locked) or
/// [`AsyncOffload`](super::AsyncOffload) for the other modes.
pub struct WriterSink<D> {
    levels: AtomicLevelFilter,
    formatter: Formatter,
    destination: D,
    metrics: SinkMetrics,
}

impl<D: Destination> WriterSink<D> {
    pub fn new(destination: D, formatter: Formatter, levels: LevelFilter) -> Self {
        Self {
            levels: AtomicLevelFilter::new(levels),
            formatter,
            destination,
            metrics: SinkMetrics::new(),
        }
    }

    pub fn formatter(&self) -> Formatter {
        self.formatter
    }

    pub fn destination(&self) -> &D {
        &self.destination
    }

    pub fn metrics(&self) -> &SinkMetrics {
        &self.metrics
    }

    /// Current level filter.
    pub fn levels(&self) -> LevelFilter {
        self.levels.snapshot()
    }

    /// Enable or disable a single level at runtime.
    pub fn set_level(&self, level: Level, enabled: bool) {
        self.levels.set(level, enabled);
    }

    /// Enable `level` and everything above it at runtime.
    pub fn enable_from(&self, level: Level) {
        self.levels.enable_from(level);
    }

    pub fn flush(&self) -> Result<()> {
        self.destination.flush()?;
        Ok(())
    }

    fn write_record(&self, record: &Record) {
        let mut buffer = buffer_pool().get();
        buffer.clear();
        self.formatter.format(record, &mut buffer);
        buffer.push('\n');

        match self.destination.write_line(buffer.as_bytes()) {
            Ok(()) => {
                self.metrics.record_written();
            }
            Err(e) => {
                let failed = self.metrics.record_failed();
                // Alert on first failure and periodically thereafter
                if failed == 0 || (failed + 1) % 1000 == 0 {
                    eprintln!(
                        "[SLOG ERROR] Writing {} record to {} failed ({} failures): {}",
                        self.formatter.name(),
                        self.destination.name(),
                        failed + 1,
                        e
                    );
                }
            }
        }
    }
}

impl<D: Destination> Sink for WriterSink<D> {
    fn allocate_on_stack(&self) -> bool {
        true
    }

    #[inline]
    fn enabled(&self, level: Level) -> bool {
        self.levels.enabled(level)
    }

    fn log(&self, record: RecordRef<'_>) {
        self.write_record(&record);
    }
}
