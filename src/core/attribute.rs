//! Typed attribute values and their constructors
//!
//! ```
//! use slogpp::attr;
//! use std::time::Duration;
//!
//! let request = attr::group("request", [
//!     attr::string("URL", "https://example.com/"),
//!     attr::int("status", 200),
//!     attr::duration("latency", Duration::from_micros(32)),
//! ]);
//! assert_eq!(request.key, "request");
//! ```

use chrono::{DateTime, TimeZone, Utc};
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;
use std::time::SystemTime;

/// Attribute keys are borrowed when they are literals.
pub type Key = Cow<'static, str>;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    /// Signed nanoseconds.
    Duration(i64),
    Time(DateTime<Utc>),
    Group(Arc<[Attribute]>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub key: Key,
    pub value: Value,
}

impl Attribute {
    pub fn new(key: impl Into<Key>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Integer types accepted by [`int`].
pub trait IntoI64 {
    fn into_i64(self) -> i64;
}

macro_rules! impl_into_i64 {
    ($($t:ty),*) => {
        $(impl IntoI64 for $t {
            #[inline]
            fn into_i64(self) -> i64 {
                self as i64
            }
        })*
    };
}

impl_into_i64!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

/// Floating point types accepted by [`float`].
pub trait IntoF64 {
    fn into_f64(self) -> f64;
}

impl IntoF64 for f32 {
    #[inline]
    fn into_f64(self) -> f64 {
        self as f64
    }
}

impl IntoF64 for f64 {
    #[inline]
    fn into_f64(self) -> f64 {
        self
    }
}

/// Durations accepted by [`duration`], saturated to the `i64` nanosecond range.
pub trait IntoNanos {
    fn into_nanos(self) -> i64;
}

impl IntoNanos for std::time::Duration {
    fn into_nanos(self) -> i64 {
        i64::try_from(self.as_nanos()).unwrap_or(i64::MAX)
    }
}

impl IntoNanos for chrono::Duration {
    fn into_nanos(self) -> i64 {
        self.num_nanoseconds().unwrap_or(if self < chrono::Duration::zero() {
            i64::MIN
        } else {
            i64::MAX
        })
    }
}

/// Points in time accepted by [`time`].
pub trait IntoTimestamp {
    fn into_timestamp(self) -> DateTime<Utc>;
}

impl IntoTimestamp for SystemTime {
    fn into_timestamp(self) -> DateTime<Utc> {
        DateTime::<Utc>::from(self)
    }
}

impl<Tz: TimeZone> IntoTimestamp for DateTime<Tz> {
    fn into_timestamp(self) -> DateTime<Utc> {
        self.with_timezone(&Utc)
    }
}

pub fn bool(key: impl Into<Key>, value: bool) -> Attribute {
    Attribute {
        key: key.into(),
        value: Value::Bool(value),
    }
}

/// Any integer; values beyond the `i64` range wrap.
pub fn int(key: impl Into<Key>, value: impl IntoI64) -> Attribute {
    Attribute {
        key: key.into(),
        value: Value::Int(value.into_i64()),
    }
}

pub fn float(key: impl Into<Key>, value: impl IntoF64) -> Attribute {
    Attribute {
        key: key.into(),
        value: Value::Float(value.into_f64()),
    }
}

pub fn string(key: impl Into<Key>, value: impl Into<String>) -> Attribute {
    Attribute {
        key: key.into(),
        value: Value::String(value.into()),
    }
}

pub fn duration(key: impl Into<Key>, value: impl IntoNanos) -> Attribute {
    Attribute {
        key: key.into(),
        value: Value::Duration(value.into_nanos()),
    }
}

pub fn time(key: impl Into<Key>, value: impl IntoTimestamp) -> Attribute {
    Attribute {
        key: key.into(),
        value: Value::Time(value.into_timestamp()),
    }
}

/// Nest attributes under `key`. An empty group does not compile.
///
/// ```compile_fail
/// let empty = slogpp::attr::group("g", []);
/// ```
pub fn group<const N: usize>(key: impl Into<Key>, attributes: [Attribute; N]) -> Attribute {
    const { assert!(N >= 1, "a group needs at least one attribute") };
    Attribute {
        key: key.into(),
        value: Value::Group(attributes.into_iter().collect()),
    }
}

/// The `"error"` attribute carrying the error's message.
pub fn err<E: fmt::Display + ?Sized>(error: &E) -> Attribute {
    Attribute {
        key: Cow::Borrowed("error"),
        value: Value::String(error.to_string()),
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

macro_rules! impl_value_from_int {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(value: $t) -> Self {
                Value::Int(value.into_i64())
            }
        })*
    };
}

impl_value_from_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(value as f64)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<std::time::Duration> for Value {
    fn from(value: std::time::Duration) -> Self {
        Value::Duration(value.into_nanos())
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Value::Time(value)
    }
}

impl From<SystemTime> for Value {
    fn from(value: SystemTime) -> Self {
        Value::Time(value.into_timestamp())
    }
}

impl fmt::Display for Value {
    /// Same rendering as the raw text formatter, without quoting.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buffer = String::new();
        crate::core::humanize::value_to_string(self, &mut buffer);
        f.write_str(&buffer)
    }
}
