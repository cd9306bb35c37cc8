//! Core logger types and traits

pub mod attribute;
pub mod config;
pub mod error;
pub mod humanize;
pub mod level;
pub mod logger;
pub mod metrics;
pub mod output_format;
pub mod record;
pub mod sink;

pub use attribute::{Attribute, Key, Value};
pub use config::{
    BaseSinkConfig, Config, ConfigOption, FileSinkConfig, ProgramOutputSinkConfig, SinkConfig,
};
pub use error::{Result, SlogError};
pub use level::{AtomicLevelFilter, Level, LevelFilter, NUM_LEVELS};
pub use logger::Logger;
pub use metrics::SinkMetrics;
pub use output_format::{Formatter, OutputFormat};
pub use record::{Attributes, Record, RecordRef, INLINE_ATTRIBUTES};
pub use sink::Sink;
