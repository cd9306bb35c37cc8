//! Sink configuration, functional options and the sink builder
//!
//! A configuration is either assembled from options:
//!
//! ```
//! use slogpp::config::*;
//! use slogpp::{Level, OutputFormat};
//!
//! let sink = build_sink([with_program_output([
//!     with_stdout_output(),
//!     with_format(OutputFormat::Text),
//!     from_level(Level::DEBUG),
//!     with_locking(),
//! ])])
//! .unwrap();
//! assert!(sink.enabled(Level::INFO));
//! ```
//!
//! or loaded from JSON with [`Config::from_json`] and materialized with
//! [`build_sink_from_config`].

use crate::core::error::{Result, SlogError};
use crate::core::level::{Level, LevelFilter};
use crate::core::output_format::{Formatter, OutputFormat};
use crate::core::sink::Sink;
use crate::sinks::{
    compose, shared_thread_pool, ConcurrencyMode, Destination, FileDestination, ProgramOutput,
    WriterSink,
};
use crate::utils::ThreadPool;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

/// A mutation applied to a configuration value.
pub type ConfigOption<T> = Box<dyn FnOnce(&mut T) + Send>;

/// Settings shared by every kind of sink.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaseSinkConfig {
    pub with_locking: bool,
    #[serde(rename = "async")]
    pub is_async: bool,
    pub format: OutputFormat,
    pub levels: LevelFilter,
}

impl BaseSinkConfig {
    pub fn concurrency_mode(&self) -> ConcurrencyMode {
        ConcurrencyMode::new(self.with_locking, self.is_async)
    }
}

impl AsMut<BaseSinkConfig> for BaseSinkConfig {
    fn as_mut(&mut self) -> &mut BaseSinkConfig {
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgramOutputSinkConfig {
    #[serde(flatten)]
    pub base: BaseSinkConfig,
    /// Write to stdout instead of stderr.
    pub stdout: bool,
    pub disabled_color: bool,
    pub force_color: bool,
}

impl ProgramOutputSinkConfig {
    /// The sink used when nothing is configured: text on stderr from INFO up.
    pub fn default_stderr() -> Self {
        Self {
            base: BaseSinkConfig {
                format: OutputFormat::Text,
                levels: LevelFilter::from_level(Level::INFO),
                ..BaseSinkConfig::default()
            },
            ..Self::default()
        }
    }

    pub fn output(&self) -> ProgramOutput {
        if self.stdout {
            ProgramOutput::Stdout
        } else {
            ProgramOutput::Stderr
        }
    }

    /// JSON stays JSON. Text is colored when forced or when writing to a
    /// terminal, unless colors are disabled.
    pub fn formatter(&self) -> Formatter {
        match self.base.format {
            OutputFormat::Json => Formatter::Json,
            OutputFormat::Text if self.disabled_color => Formatter::RawText,
            OutputFormat::Text if self.force_color || self.output().is_terminal() => {
                Formatter::AnsiText
            }
            OutputFormat::Text => Formatter::RawText,
        }
    }
}

impl AsMut<BaseSinkConfig> for ProgramOutputSinkConfig {
    fn as_mut(&mut self) -> &mut BaseSinkConfig {
        &mut self.base
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSinkConfig {
    #[serde(flatten)]
    pub base: BaseSinkConfig,
    pub filepath: PathBuf,
}

impl FileSinkConfig {
    pub fn new(filepath: impl Into<PathBuf>) -> Self {
        Self {
            base: BaseSinkConfig::default(),
            filepath: filepath.into(),
        }
    }

    pub fn formatter(&self) -> Formatter {
        match self.base.format {
            OutputFormat::Json => Formatter::Json,
            OutputFormat::Text => Formatter::RawText,
        }
    }
}

impl AsMut<BaseSinkConfig> for FileSinkConfig {
    fn as_mut(&mut self) -> &mut BaseSinkConfig {
        &mut self.base
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SinkConfig {
    ProgramOutput(ProgramOutputSinkConfig),
    File(FileSinkConfig),
}

impl SinkConfig {
    pub fn base(&self) -> &BaseSinkConfig {
        match self {
            SinkConfig::ProgramOutput(config) => &config.base,
            SinkConfig::File(config) => &config.base,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub sinks: Vec<SinkConfig>,
    /// Workers of the shared pool; 0 leaves the pool as it is.
    pub thread_pool_size: usize,
}

impl Config {
    /// Parse a declarative configuration.
    ///
    /// ```
    /// use slogpp::config::{Config, SinkConfig};
    ///
    /// let config = Config::from_json(r#"{
    ///     "sinks": [{"type": "file", "filepath": "app.log", "async": true}]
    /// }"#).unwrap();
    /// assert!(matches!(config.sinks[0], SinkConfig::File(_)));
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Apply every option, in order.
pub fn apply<T, I>(config: &mut T, options: I)
where
    I: IntoIterator<Item = ConfigOption<T>>,
{
    for option in options {
        option(config);
    }
}

pub fn with_locking<C: AsMut<BaseSinkConfig> + 'static>() -> ConfigOption<C> {
    Box::new(|config: &mut C| config.as_mut().with_locking = true)
}

pub fn with_async<C: AsMut<BaseSinkConfig> + 'static>() -> ConfigOption<C> {
    Box::new(|config: &mut C| config.as_mut().is_async = true)
}

pub fn with_format<C: AsMut<BaseSinkConfig> + 'static>(format: OutputFormat) -> ConfigOption<C> {
    Box::new(move |config: &mut C| config.as_mut().format = format)
}

/// Enable `level` and every level above it.
pub fn from_level<C: AsMut<BaseSinkConfig> + 'static>(level: Level) -> ConfigOption<C> {
    Box::new(move |config: &mut C| config.as_mut().levels.enable_from(level))
}

/// Enable each of `levels`.
pub fn with_level<C: AsMut<BaseSinkConfig> + 'static>(levels: &[Level]) -> ConfigOption<C> {
    let levels = levels.to_vec();
    Box::new(move |config: &mut C| {
        for level in levels {
            config.as_mut().levels.set(level, true);
        }
    })
}

pub fn with_stdout_output() -> ConfigOption<ProgramOutputSinkConfig> {
    Box::new(|config: &mut ProgramOutputSinkConfig| config.stdout = true)
}

pub fn with_force_color() -> ConfigOption<ProgramOutputSinkConfig> {
    Box::new(|config: &mut ProgramOutputSinkConfig| config.force_color = true)
}

pub fn with_disabled_color() -> ConfigOption<ProgramOutputSinkConfig> {
    Box::new(|config: &mut ProgramOutputSinkConfig| config.disabled_color = true)
}

/// Add a stdout/stderr sink built from `options`.
pub fn with_program_output<I>(options: I) -> ConfigOption<Config>
where
    I: IntoIterator<Item = ConfigOption<ProgramOutputSinkConfig>>,
{
    let options: Vec<_> = options.into_iter().collect();
    Box::new(move |config: &mut Config| {
        let mut sink = ProgramOutputSinkConfig::default();
        apply(&mut sink, options);
        config.sinks.push(SinkConfig::ProgramOutput(sink));
    })
}

/// Add a file sink appending to `path`, built from `options`.
pub fn with_file_output<I>(path: impl Into<PathBuf>, options: I) -> ConfigOption<Config>
where
    I: IntoIterator<Item = ConfigOption<FileSinkConfig>>,
{
    let path = path.into();
    let options: Vec<_> = options.into_iter().collect();
    Box::new(move |config: &mut Config| {
        let mut sink = FileSinkConfig::new(path);
        apply(&mut sink, options);
        config.sinks.push(SinkConfig::File(sink));
    })
}

pub fn with_thread_pool_size(size: usize) -> ConfigOption<Config> {
    Box::new(move |config: &mut Config| config.thread_pool_size = size)
}

/// Fill in what a usable configuration needs: a stderr text sink when none
/// is configured, and at least one pool worker when a sink is asynchronous.
pub fn sanitize(config: &mut Config) {
    if config.sinks.is_empty() {
        config
            .sinks
            .push(SinkConfig::ProgramOutput(ProgramOutputSinkConfig::default_stderr()));
    }
    let has_async = config.sinks.iter().any(|sink| sink.base().is_async);
    if has_async && config.thread_pool_size == 0 {
        config.thread_pool_size = 1;
    }
}

/// Build a sink from functional options.
pub fn build_sink<I>(options: I) -> Result<Arc<dyn Sink>>
where
    I: IntoIterator<Item = ConfigOption<Config>>,
{
    let mut config = Config::default();
    apply(&mut config, options);
    build_sink_from_config(config)
}

/// Sanitize `config` and materialize its single sink. Asynchronous sinks
/// run on [`shared_thread_pool`], resized to `thread_pool_size`.
pub fn build_sink_from_config(mut config: Config) -> Result<Arc<dyn Sink>> {
    sanitize(&mut config);
    if config.sinks.len() > 1 {
        return Err(SlogError::unsupported(format!(
            "{} sinks configured, multiple sinks per logger are not supported yet",
            config.sinks.len()
        )));
    }

    let pool = shared_thread_pool();
    if config.thread_pool_size > 0 {
        pool.set_size(config.thread_pool_size)?;
    }

    match config.sinks.pop() {
        Some(sink) => build_single(sink, &pool),
        None => Ok(program_output_sink(
            ProgramOutputSinkConfig::default_stderr(),
            &pool,
        )),
    }
}

fn build_single(config: SinkConfig, pool: &Arc<ThreadPool>) -> Result<Arc<dyn Sink>> {
    match config {
        SinkConfig::ProgramOutput(config) => Ok(program_output_sink(config, pool)),
        SinkConfig::File(config) => {
            if config.filepath.as_os_str().is_empty() {
                return Err(SlogError::config("file sink", "filepath is empty"));
            }
            let destination = FileDestination::open(&config.filepath)?;
            let writer = WriterSink::new(destination, config.formatter(), config.base.levels);
            Ok(compose(writer, config.base.concurrency_mode(), pool))
        }
    }
}

/// Program output never fails to open.
pub(crate) fn program_output_sink(
    config: ProgramOutputSinkConfig,
    pool: &Arc<ThreadPool>,
) -> Arc<dyn Sink> {
    let writer = WriterSink::new(config.output(), config.formatter(), config.base.levels);
    compose(writer, config.base.concurrency_mode(), pool)
}
