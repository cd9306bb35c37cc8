//! Logging macros for formatted messages and attribute groups.
//!
//! The message is formatted only when the logger accepts the level.
//! Attributes follow the format arguments after a `;`.
//!
//! # Examples
//!
//! ```
//! use slogpp::{attr, info, Logger};
//!
//! let logger = Logger::disabled();
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//!
//! // With attributes
//! info!(logger, "User {} logged in", 42; attr::string("method", "password"));
//! ```

/// Build a group attribute from a non-empty list of attributes.
///
/// ```
/// use slogpp::{attr, group};
///
/// let request = group!("request", attr::string("URL", "/"), attr::int("status", 200));
/// assert_eq!(request.key, "request");
/// ```
#[macro_export]
macro_rules! group {
    ($key:expr, $($attr:expr),+ $(,)?) => {
        $crate::attr::group($key, [$($attr),+])
    };
}

/// Log a message at an explicit level.
///
/// # Examples
///
/// ```
/// # use slogpp::{attr, Level, Logger};
/// # let logger = Logger::disabled();
/// use slogpp::log;
/// log!(logger, Level::INFO, "Simple message");
/// log!(logger, Level::ERROR, "Error code: {}", 500);
/// log!(logger, Level::WARN.sub(1), "Slow request"; attr::int("ms", 1200));
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $fmt:literal $(, $arg:expr)* ; $($attr:expr),+ $(,)?) => {{
        let logger = &$logger;
        let level = $level;
        if logger.enabled(level) {
            logger.log(level, ::std::format!($fmt $(, $arg)*), [$($attr),+]);
        }
    }};
    ($logger:expr, $level:expr, $fmt:literal $(, $arg:expr)* $(,)?) => {{
        let logger = &$logger;
        let level = $level;
        if logger.enabled(level) {
            logger.log(level, ::std::format!($fmt $(, $arg)*), []);
        }
    }};
}

/// Log a trace-level message.
///
/// ```
/// # let logger = slogpp::Logger::disabled();
/// use slogpp::trace;
/// trace!(logger, "Entering function: calculate()");
/// trace!(logger, "Variable value: {}", 42);
/// ```
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::TRACE, $($arg)+)
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::DEBUG, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::INFO, $($arg)+)
    };
}

/// Log a warning-level message.
///
/// ```
/// # let logger = slogpp::Logger::disabled();
/// use slogpp::{attr, warn};
/// warn!(logger, "Retry attempt {} of {}", 3, 5; attr::string("peer", "10.0.0.7"));
/// ```
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::WARN, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::ERROR, $($arg)+)
    };
}

/// Log a critical-level message.
#[macro_export]
macro_rules! critical {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::CRITICAL, $($arg)+)
    };
}
