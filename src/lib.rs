//! # slog++
//!
//! Structured logging with typed attributes, pluggable sinks and exact
//! output formats.
//!
//! ## Features
//!
//! - **Typed attributes**: booleans, integers, floats, strings, durations,
//!   timestamps and nested groups
//! - **Cheap filtering**: a disabled level costs one lookup, no record is built
//! - **Concurrency modes**: unlocked, locked, thread-pool offload, or both
//! - **Formats**: JSON lines, `key=value` text and a coloured tree for terminals
//!
//! ## Quick start
//!
//! ```no_run
//! use slogpp::{attr, config, group};
//!
//! slogpp::init([config::with_file_output(
//!     "app.log",
//!     [config::with_async(), config::from_level(slogpp::Level::DEBUG)],
//! )])
//! .unwrap();
//!
//! let logger = slogpp::with([attr::string("service", "billing")]);
//! logger.info(
//!     "request served",
//!     [
//!         group!("request", attr::string("URL", "/"), attr::int("status", 200)),
//!         attr::duration("latency", std::time::Duration::from_micros(1250)),
//!     ],
//! );
//!
//! slogpp::shutdown();
//! ```

pub mod core;
pub mod global;
pub mod macros;
pub mod sinks;
pub mod utils;

pub use crate::core::attribute as attr;
pub use crate::core::config;

pub mod prelude {
    pub use crate::core::attribute as attr;
    pub use crate::core::{
        Attribute, Config, Formatter, Level, LevelFilter, Logger, OutputFormat, Record, RecordRef,
        Result, Sink, SinkMetrics, SlogError, Value,
    };
    pub use crate::sinks::{ConcurrencyMode, WriterSink};
}

pub use crate::core::{
    Attribute, Formatter, Level, LevelFilter, Logger, OutputFormat, Record, RecordRef, Result,
    Sink, SinkMetrics, SlogError, Value,
};
pub use global::{
    critical, debug, default_logger, error, info, init, log, set_sink, shutdown, trace, warn, with,
};
