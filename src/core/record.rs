//! Log records and the borrowed/owned handle passed to sinks

use crate::core::attribute::Attribute;
use crate::core::level::Level;
use chrono::{DateTime, Utc};
use smallvec::SmallVec;
use std::borrow::Cow;
use std::ops::Deref;

/// Attributes stored inline in a record before spilling to the heap.
pub const INLINE_ATTRIBUTES: usize = 8;

pub type Attributes = SmallVec<[Attribute; INLINE_ATTRIBUTES]>;

#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub timestamp: DateTime<Utc>,
    pub level: Level,
    pub message: Cow<'static, str>,
    pub attributes: Attributes,
}

impl Record {
    /// A record stamped with the current time.
    pub fn new(
        level: Level,
        message: impl Into<Cow<'static, str>>,
        attributes: impl IntoIterator<Item = Attribute>,
    ) -> Self {
        Self::with_timestamp(Utc::now(), level, message, attributes)
    }

    pub fn with_timestamp(
        timestamp: DateTime<Utc>,
        level: Level,
        message: impl Into<Cow<'static, str>>,
        attributes: impl IntoIterator<Item = Attribute>,
    ) -> Self {
        Self {
            timestamp,
            level,
            message: message.into(),
            attributes: attributes.into_iter().collect(),
        }
    }

    /// Bound attributes first, then the call-site ones, with storage
    /// reserved once.
    pub(crate) fn from_parts<const N: usize>(
        level: Level,
        message: Cow<'static, str>,
        bound: &[Attribute],
        call_site: [Attribute; N],
    ) -> Self {
        let mut attributes = Attributes::with_capacity(bound.len() + N);
        attributes.extend(bound.iter().cloned());
        attributes.extend(call_site);
        Self {
            timestamp: Utc::now(),
            level,
            message,
            attributes,
        }
    }
}

/// A record handed to a sink: borrowed from the producer's stack when the
/// sink consumes it synchronously, owned otherwise.
#[derive(Debug)]
pub enum RecordRef<'a> {
    Borrowed(&'a Record),
    Owned(Box<Record>),
}

impl RecordRef<'_> {
    pub fn is_owned(&self) -> bool {
        matches!(self, RecordRef::Owned(_))
    }

    /// Take ownership, cloning a borrowed record.
    pub fn into_owned(self) -> Box<Record> {
        match self {
            RecordRef::Borrowed(record) => Box::new(record.clone()),
            RecordRef::Owned(record) => record,
        }
    }
}

impl Deref for RecordRef<'_> {
    type Target = Record;

    fn deref(&self) -> &Record {
        match self {
            RecordRef::Borrowed(record) => record,
            RecordRef::Owned(record) => record,
        }
    }
}
