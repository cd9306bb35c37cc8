//! Logger handle: bound attributes plus a shared sink

use crate::core::attribute::{err, Attribute};
use crate::core::level::Level;
use crate::core::record::{Record, RecordRef};
use crate::core::sink::Sink;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// Cheap to clone; clones share the sink and the bound attributes.
///
/// # Example
///
/// ```
/// use slogpp::{attr, config, Logger};
///
/// let sink = config::build_sink([config::with_program_output([
///     config::with_stdout_output(),
///     config::from_level(slogpp::Level::INFO),
/// ])])
/// .unwrap();
/// let logger = Logger::new(sink).with([attr::string("request", "/index.html")]);
///
/// logger.info("served", [attr::int("status", 200)]);
/// logger.debug("filtered out before any record is built", []);
/// ```
#[derive(Clone)]
pub struct Logger {
    sink: Option<Arc<dyn Sink>>,
    attributes: Arc<[Attribute]>,
}

impl Logger {
    pub fn new(sink: Arc<dyn Sink>) -> Self {
        Self {
            sink: Some(sink),
            attributes: Arc::from(Vec::new()),
        }
    }

    /// A logger that drops everything.
    pub fn disabled() -> Self {
        Self {
            sink: None,
            attributes: Arc::from(Vec::new()),
        }
    }

    pub fn sink(&self) -> Option<&Arc<dyn Sink>> {
        self.sink.as_ref()
    }

    pub fn set_sink(&mut self, sink: Arc<dyn Sink>) {
        self.sink = Some(sink);
    }

    /// Attributes bound with [`Logger::with`], in binding order.
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// A logger sharing this sink whose records carry `attributes` after
    /// the ones already bound.
    #[must_use]
    pub fn with<const N: usize>(&self, attributes: [Attribute; N]) -> Logger {
        let mut bound = Vec::with_capacity(self.attributes.len() + N);
        bound.extend_from_slice(&self.attributes);
        bound.extend(attributes);
        Logger {
            sink: self.sink.clone(),
            attributes: bound.into(),
        }
    }

    /// Shorthand for binding an `"error"` attribute.
    #[must_use]
    pub fn with_error<E: fmt::Display + ?Sized>(&self, error: &E) -> Logger {
        self.with([err(error)])
    }

    #[inline]
    pub fn enabled(&self, level: Level) -> bool {
        self.sink.as_ref().is_some_and(|sink| sink.enabled(level))
    }

    pub fn log<const N: usize>(
        &self,
        level: Level,
        message: impl Into<Cow<'static, str>>,
        attributes: [Attribute; N],
    ) {
        let sink = match &self.sink {
            Some(sink) if sink.enabled(level) => sink,
            _ => return,
        };

        let record = Record::from_parts(level, message.into(), &self.attributes, attributes);
        if sink.allocate_on_stack() {
            sink.log(RecordRef::Borrowed(&record));
        } else {
            sink.log(RecordRef::Owned(Box::new(record)));
        }
    }

    pub fn trace<const N: usize>(
        &self,
        message: impl Into<Cow<'static, str>>,
        attributes: [Attribute; N],
    ) {
        self.log(Level::TRACE, message, attributes);
    }

    pub fn debug<const N: usize>(
        &self,
        message: impl Into<Cow<'static, str>>,
        attributes: [Attribute; N],
    ) {
        self.log(Level::DEBUG, message, attributes);
    }

    pub fn info<const N: usize>(
        &self,
        message: impl Into<Cow<'static, str>>,
        attributes: [Attribute; N],
    ) {
        self.log(Level::INFO, message, attributes);
    }

    pub fn warn<const N: usize>(
        &self,
        message: impl Into<Cow<'static, str>>,
        attributes: [Attribute; N],
    ) {
        self.log(Level::WARN, message, attributes);
    }

    pub fn error<const N: usize>(
        &self,
        message: impl Into<Cow<'static, str>>,
        attributes: [Attribute; N],
    ) {
        self.log(Level::ERROR, message, attributes);
    }

    pub fn critical<const N: usize>(
        &self,
        message: impl Into<Cow<'static, str>>,
        attributes: [Attribute; N],
    ) {
        self.log(Level::CRITICAL, message, attributes);
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::disabled()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("has_sink", &self.sink.is_some())
            .field("attributes", &self.attributes)
            .finish()
    }
}
