//! Severity levels, sub-levels and per-level filtering
//!
//! Levels live on an integer scale where every named tier except
//! [`Level::CRITICAL`] owns three finer sub-levels:
//!
//! ```
//! use slogpp::Level;
//!
//! assert_eq!(Level::WARN.sub(2).name(), "WARN_2");
//! assert!(Level::INFO < Level::INFO.sub(1));
//! assert!(Level::INFO.sub(3) < Level::WARN);
//! ```

use once_cell::sync::Lazy;
use serde::de::{self, Deserializer, SeqAccess, Visitor};
use serde::ser::{SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};

/// Number of slots in a level table: one per valid level plus the unknown slot.
pub const NUM_LEVELS: usize = Level::CRITICAL.0 as usize + 2;

const LEVEL_NAMES: [&str; NUM_LEVELS] = [
    "UNKNOWN", "TRACE", "TRACE_1", "TRACE_2", "TRACE_3", "DEBUG", "DEBUG_1", "DEBUG_2", "DEBUG_3",
    "INFO", "INFO_1", "INFO_2", "INFO_3", "WARN", "WARN_1", "WARN_2", "WARN_3", "ERROR",
    "ERROR_1", "ERROR_2", "ERROR_3", "FATAL",
];

/// ANSI reset sequence written after a colored level name.
pub const ANSI_RESET: &str = "\x1b[m";

static LEVEL_ESCAPES: Lazy<[String; NUM_LEVELS]> = Lazy::new(|| {
    std::array::from_fn(|slot| match Level::from_slot(slot).palette() {
        None => String::new(),
        Some((fg, None)) => format!("\x1b[{}m", fg.to_fg_str()),
        Some((fg, Some(bg))) => format!("\x1b[{};{}m", fg.to_fg_str(), bg.to_bg_str()),
    })
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Level(i8);

impl Level {
    pub const UNKNOWN: Level = Level(-1);
    pub const TRACE: Level = Level(0);
    pub const DEBUG: Level = Level(4);
    pub const INFO: Level = Level(8);
    pub const WARN: Level = Level(12);
    pub const ERROR: Level = Level(16);
    pub const CRITICAL: Level = Level(20);

    /// Sub-level `n` of a named tier, `n` in `[0, 3]`.
    ///
    /// Panics for `CRITICAL`, `UNKNOWN` or an already refined level, and for
    /// `n > 3`. In a const context the panic is a compile error.
    pub const fn sub(self, n: u8) -> Level {
        assert!(
            self.0 >= 0 && self.0 < Level::CRITICAL.0 && self.0 % 4 == 0,
            "sub-levels only exist below TRACE, DEBUG, INFO, WARN and ERROR"
        );
        assert!(n <= 3, "sub-level must be in [0, 3]");
        Level(self.0 + n as i8)
    }

    /// Wrap a raw value. Values outside the table behave as `UNKNOWN`.
    pub const fn from_raw(value: i8) -> Level {
        Level(value)
    }

    pub const fn value(self) -> i8 {
        self.0
    }

    const fn from_slot(slot: usize) -> Level {
        Level(slot as i8 - 1)
    }

    /// Table slot for this level, `None` when out of range.
    pub(crate) const fn slot(self) -> Option<usize> {
        let slot = self.0 as i16 + 1;
        if slot < 0 || slot >= NUM_LEVELS as i16 {
            None
        } else {
            Some(slot as usize)
        }
    }

    /// Table index; out-of-range levels share the unknown slot.
    #[inline]
    pub(crate) const fn index(self) -> usize {
        match self.slot() {
            Some(slot) => slot,
            None => 0,
        }
    }

    pub fn name(self) -> &'static str {
        LEVEL_NAMES[self.index()]
    }

    /// Foreground and optional background colour of this level's tier.
    pub fn palette(self) -> Option<(colored::Color, Option<colored::Color>)> {
        use colored::Color::*;
        match self.index() {
            0..=4 => None,
            5..=8 => Some((Blue, None)),
            9..=12 => Some((Cyan, None)),
            13..=16 => Some((Yellow, None)),
            17..=20 => Some((Red, None)),
            _ => Some((White, Some(Red))),
        }
    }

    /// ANSI escape that starts this level's colour, empty when uncoloured.
    pub fn ansi_color(self) -> &'static str {
        &LEVEL_ESCAPES[self.index()]
    }
}

impl Default for Level {
    fn default() -> Self {
        Level::INFO
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        let name = match upper.as_str() {
            "WARNING" => "WARN",
            "CRITICAL" => "FATAL",
            other => other,
        };
        LEVEL_NAMES
            .iter()
            .position(|candidate| *candidate == name)
            .map(Level::from_slot)
            .ok_or_else(|| format!("Invalid log level: '{}'", s))
    }
}

impl Serialize for Level {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Level {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(de::Error::custom)
    }
}

/// One enabled flag per level slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelFilter {
    levels: [bool; NUM_LEVELS],
}

impl LevelFilter {
    /// Everything disabled.
    pub const fn none() -> Self {
        Self {
            levels: [false; NUM_LEVELS],
        }
    }

    /// `level` and everything above it.
    pub fn from_level(level: Level) -> Self {
        let mut filter = Self::none();
        filter.enable_from(level);
        filter
    }

    /// Exactly the given levels; out-of-range levels are ignored.
    pub fn with_levels(levels: &[Level]) -> Self {
        let mut filter = Self::none();
        for level in levels {
            filter.set(*level, true);
        }
        filter
    }

    /// Enable `level` and every level above it. Lower levels are left as is.
    pub fn enable_from(&mut self, level: Level) {
        let start = match level.slot() {
            Some(slot) => slot,
            None if level < Level::UNKNOWN => 0,
            None => return,
        };
        for enabled in &mut self.levels[start..] {
            *enabled = true;
        }
    }

    pub fn set(&mut self, level: Level, enabled: bool) {
        if let Some(slot) = level.slot() {
            self.levels[slot] = enabled;
        }
    }

    #[inline]
    pub fn enabled(&self, level: Level) -> bool {
        self.levels[level.index()]
    }

    /// Enabled levels in ascending order.
    pub fn levels(&self) -> impl Iterator<Item = Level> + '_ {
        self.levels
            .iter()
            .enumerate()
            .filter(|(_, enabled)| **enabled)
            .map(|(slot, _)| Level::from_slot(slot))
    }
}

impl Default for LevelFilter {
    fn default() -> Self {
        Self::none()
    }
}

impl Serialize for LevelFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(None)?;
        for level in self.levels() {
            seq.serialize_element(&level)?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for LevelFilter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct LevelList;

        impl<'de> Visitor<'de> for LevelList {
            type Value = LevelFilter;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a list of level names")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<LevelFilter, A::Error> {
                let mut filter = LevelFilter::none();
                while let Some(level) = seq.next_element::<Level>()? {
                    filter.set(level, true);
                }
                Ok(filter)
            }
        }

        deserializer.deserialize_seq(LevelList)
    }
}

/// A [`LevelFilter`] that can be reconfigured while shared between threads.
#[derive(Debug)]
pub struct AtomicLevelFilter {
    levels: [AtomicBool; NUM_LEVELS],
}

impl AtomicLevelFilter {
    pub fn new(filter: LevelFilter) -> Self {
        Self {
            levels: std::array::from_fn(|slot| AtomicBool::new(filter.levels[slot])),
        }
    }

    #[inline]
    pub fn enabled(&self, level: Level) -> bool {
        self.levels[level.index()].load(Ordering::Relaxed)
    }

    pub fn set(&self, level: Level, enabled: bool) {
        if let Some(slot) = level.slot() {
            self.levels[slot].store(enabled, Ordering::Relaxed);
        }
    }

    pub fn enable_from(&self, level: Level) {
        let mut filter = self.snapshot();
        filter.enable_from(level);
        for (slot, enabled) in filter.levels.iter().enumerate() {
            if *enabled {
                self.levels[slot].store(true, Ordering::Relaxed);
            }
        }
    }

    pub fn snapshot(&self) -> LevelFilter {
        LevelFilter {
            levels: std::array::from_fn(|slot| self.levels[slot].load(Ordering::Relaxed)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_names() {
        assert_eq!(Level::UNKNOWN.name(), "UNKNOWN");
        assert_eq!(Level::TRACE.name(), "TRACE");
        assert_eq!(Level::TRACE.sub(1).name(), "TRACE_1");
        assert_eq!(Level::DEBUG.name(), "DEBUG");
        assert_eq!(Level::INFO.sub(3).name(), "INFO_3");
        assert_eq!(Level::WARN.name(), "WARN");
        assert_eq!(Level::ERROR.sub(2).name(), "ERROR_2");
        assert_eq!(Level::CRITICAL.name(), "FATAL");
        assert_eq!(Level::from_raw(42).name(), "UNKNOWN");
        assert_eq!(Level::from_raw(-7).name(), "UNKNOWN");
    }

    #[test]
    fn test_sub_levels_are_ordered() {
        assert_eq!(Level::DEBUG.sub(0), Level::DEBUG);
        assert!(Level::DEBUG < Level::DEBUG.sub(1));
        assert!(Level::DEBUG.sub(3) < Level::INFO);
        assert_eq!(Level::ERROR.sub(3).value(), 19);
    }

    #[test]
    #[should_panic(expected = "sub-level must be in [0, 3]")]
    fn test_sub_level_out_of_range() {
        let _ = Level::INFO.sub(4);
    }

    #[test]
    #[should_panic(expected = "sub-levels only exist")]
    fn test_critical_has_no_sub_level() {
        let _ = Level::CRITICAL.sub(1);
    }

    #[test]
    fn test_level_parse() {
        assert_eq!("info".parse::<Level>().unwrap(), Level::INFO);
        assert_eq!("WARNING".parse::<Level>().unwrap(), Level::WARN);
        assert_eq!("critical".parse::<Level>().unwrap(), Level::CRITICAL);
        assert_eq!("FATAL".parse::<Level>().unwrap(), Level::CRITICAL);
        assert_eq!("trace_2".parse::<Level>().unwrap(), Level::TRACE.sub(2));
        assert!("VERBOSE".parse::<Level>().is_err());
    }

    #[test]
    fn test_level_colors() {
        assert_eq!(Level::UNKNOWN.ansi_color(), "");
        assert_eq!(Level::TRACE.sub(1).ansi_color(), "");
        assert_eq!(Level::DEBUG.ansi_color(), "\x1b[34m");
        assert_eq!(Level::INFO.sub(2).ansi_color(), "\x1b[36m");
        assert_eq!(Level::WARN.ansi_color(), "\x1b[33m");
        assert_eq!(Level::ERROR.ansi_color(), "\x1b[31m");
        assert_eq!(Level::CRITICAL.ansi_color(), "\x1b[37;41m");
    }

    #[test]
    fn test_filter_from_level() {
        let filter = LevelFilter::from_level(Level::WARN);
        assert!(!filter.enabled(Level::UNKNOWN));
        assert!(!filter.enabled(Level::TRACE));
        assert!(!filter.enabled(Level::INFO.sub(3)));
        assert!(filter.enabled(Level::WARN));
        assert!(filter.enabled(Level::WARN.sub(1)));
        assert!(filter.enabled(Level::ERROR));
        assert!(filter.enabled(Level::CRITICAL));
        assert!(!filter.enabled(Level::from_raw(100)));
    }

    #[test]
    fn test_filter_with_levels() {
        let filter = LevelFilter::with_levels(&[Level::INFO, Level::ERROR, Level::from_raw(90)]);
        let enabled: Vec<Level> = filter.levels().collect();
        assert_eq!(enabled, vec![Level::INFO, Level::ERROR]);
        assert!(!filter.enabled(Level::WARN));
        assert!(!filter.enabled(Level::from_raw(90)));
    }

    #[test]
    fn test_unknown_slot_must_be_enabled_explicitly() {
        let mut filter = LevelFilter::none();
        assert!(!filter.enabled(Level::from_raw(55)));
        filter.set(Level::UNKNOWN, true);
        assert!(filter.enabled(Level::from_raw(55)));
        assert!(filter.enabled(Level::from_raw(-20)));
    }

    #[test]
    fn test_filter_serde() {
        let filter = LevelFilter::with_levels(&[Level::DEBUG, Level::CRITICAL]);
        let json = serde_json::to_string(&filter).unwrap();
        assert_eq!(json, r#"["DEBUG","FATAL"]"#);

        let parsed: LevelFilter = serde_json::from_str(r#"["warn", "ERROR_1"]"#).unwrap();
        assert_eq!(parsed, LevelFilter::with_levels(&[Level::WARN, Level::ERROR.sub(1)]));
    }

    #[test]
    fn test_atomic_filter_reconfiguration() {
        let filter = AtomicLevelFilter::new(LevelFilter::from_level(Level::ERROR));
        assert!(!filter.enabled(Level::INFO));

        filter.set(Level::INFO, true);
        assert!(filter.enabled(Level::INFO));
        assert!(!filter.enabled(Level::WARN));

        filter.enable_from(Level::DEBUG);
        assert!(filter.enabled(Level::WARN));
        assert!(!filter.enabled(Level::TRACE));
        assert_eq!(filter.snapshot(), LevelFilter::from_level(Level::DEBUG));
    }
}
