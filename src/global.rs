//! Process-wide default logger
//!
//! The default logger writes text to stderr from INFO up until
//! [`init`] or [`set_sink`] replaces its sink.
//!
//! ```no_run
//! use slogpp::{attr, config};
//!
//! slogpp::init([config::with_file_output("app.log", [config::with_async()])]).unwrap();
//! slogpp::info("hello world", [attr::int("a", 23)]);
//!
//! let logger = slogpp::with([attr::string("domain", "billing")]);
//! logger.warn("ouch", []);
//! slogpp::shutdown();
//! ```

use crate::core::attribute::Attribute;
use crate::core::config::{self, program_output_sink, ConfigOption, ProgramOutputSinkConfig};
use crate::core::level::Level;
use crate::core::logger::Logger;
use crate::core::sink::Sink;
use crate::core::Result;
use crate::sinks::shared_thread_pool;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::borrow::Cow;
use std::sync::Arc;

static DEFAULT_LOGGER: Lazy<RwLock<Logger>> = Lazy::new(|| {
    let sink = program_output_sink(
        ProgramOutputSinkConfig::default_stderr(),
        &shared_thread_pool(),
    );
    RwLock::new(Logger::new(sink))
});

/// A handle on the default logger, sharing its current sink.
pub fn default_logger() -> Logger {
    DEFAULT_LOGGER.read().clone()
}

/// Replace the default logger's sink. Handles obtained earlier keep the
/// sink they were created with.
pub fn set_sink(sink: Arc<dyn Sink>) {
    DEFAULT_LOGGER.write().set_sink(sink);
}

/// Build a sink from `options` and install it on the default logger.
///
/// Records of asynchronous sinks wait on the shared thread pool, which is
/// never dropped. Call [`shutdown`] before the process exits or whatever is
/// still queued is lost.
pub fn init<I>(options: I) -> Result<()>
where
    I: IntoIterator<Item = ConfigOption<config::Config>>,
{
    let sink = config::build_sink(options)?;
    set_sink(sink);
    Ok(())
}

/// Run every queued asynchronous write and stop the shared workers.
///
/// Asynchronous sinks keep working afterwards, writing inline, until a new
/// configuration starts workers again.
pub fn shutdown() {
    if let Err(e) = shared_thread_pool().set_size(0) {
        eprintln!("[SLOG ERROR] Failed to stop the shared thread pool: {}", e);
    }
}

/// A logger derived from the default one with `attributes` bound.
pub fn with<const N: usize>(attributes: [Attribute; N]) -> Logger {
    DEFAULT_LOGGER.read().with(attributes)
}

pub fn log<const N: usize>(
    level: Level,
    message: impl Into<Cow<'static, str>>,
    attributes: [Attribute; N],
) {
    // release the guard before the sink formats and writes
    let logger = {
        let current = DEFAULT_LOGGER.read();
        if !current.enabled(level) {
            return;
        }
        current.clone()
    };
    logger.log(level, message, attributes);
}

pub fn trace<const N: usize>(message: impl Into<Cow<'static, str>>, attributes: [Attribute; N]) {
    log(Level::TRACE, message, attributes);
}

pub fn debug<const N: usize>(message: impl Into<Cow<'static, str>>, attributes: [Attribute; N]) {
    log(Level::DEBUG, message, attributes);
}

pub fn info<const N: usize>(message: impl Into<Cow<'static, str>>, attributes: [Attribute; N]) {
    log(Level::INFO, message, attributes);
}

pub fn warn<const N: usize>(message: impl Into<Cow<'static, str>>, attributes: [Attribute; N]) {
    log(Level::WARN, message, attributes);
}

pub fn error<const N: usize>(message: impl Into<Cow<'static, str>>, attributes: [Attribute; N]) {
    log(Level::ERROR, message, attributes);
}

pub fn critical<const N: usize>(message: impl Into<Cow<'static, str>>, attributes: [Attribute; N]) {
    log(Level::CRITICAL, message, attributes);
}
