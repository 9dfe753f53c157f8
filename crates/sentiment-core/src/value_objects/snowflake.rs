//! Snowflake ID - 64-bit time-ordered identifier
//!
//! Layout:
//! - Bits 63-22: milliseconds since [`Snowflake::EPOCH`]
//! - Bits 21-12: worker ID (0-1023)
//! - Bits 11-0:  per-millisecond sequence

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, TimeZone, Utc};

const WORKER_BITS: u8 = 10;
const SEQUENCE_BITS: u8 = 12;
const TIMESTAMP_SHIFT: u8 = WORKER_BITS + SEQUENCE_BITS;
const SEQUENCE_MASK: i64 = (1 << SEQUENCE_BITS) - 1;

/// Time-ordered unique identifier for users, searches and results
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Snowflake(i64);

impl Snowflake {
    /// Custom epoch: 2025-01-01 00:00:00 UTC (milliseconds)
    pub const EPOCH: i64 = 1_735_689_600_000;

    #[inline]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    #[inline]
    pub const fn into_inner(self) -> i64 {
        self.0
    }

    /// Milliseconds since the Unix epoch at which this ID was issued
    #[inline]
    pub fn timestamp_millis(self) -> i64 {
        (self.0 >> TIMESTAMP_SHIFT) + Self::EPOCH
    }

    /// Worker that issued this ID
    #[inline]
    pub fn worker_id(self) -> u16 {
        ((self.0 >> SEQUENCE_BITS) & ((1 << WORKER_BITS) - 1)) as u16
    }

    /// Issue time as a UTC timestamp
    pub fn created_at(self) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(self.timestamp_millis())
            .single()
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
    }
}

/// Error when parsing a Snowflake from string
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SnowflakeParseError {
    #[error("invalid snowflake format")]
    InvalidFormat,
}

impl FromStr for Snowflake {
    type Err = SnowflakeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(Snowflake)
            .map_err(|_| SnowflakeParseError::InvalidFormat)
    }
}

impl fmt::Display for Snowflake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for Snowflake {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<Snowflake> for i64 {
    fn from(id: Snowflake) -> Self {
        id.0
    }
}

// JSON clients get strings; 64-bit integers lose precision in JavaScript.
impl Serialize for Snowflake {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Snowflake {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Text(String),
            Number(i64),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Number(n) => Ok(Snowflake(n)),
            Repr::Text(s) => s
                .parse()
                .map_err(|_| serde::de::Error::custom("invalid snowflake string")),
        }
    }
}

/// Lock-free Snowflake generator.
///
/// Keeps the last issued ID and hands out `max(now_id, last + 1)`, so IDs
/// are strictly increasing per generator even when the clock stalls or
/// steps backwards.
#[derive(Debug)]
pub struct SnowflakeGenerator {
    worker_id: u16,
    last: AtomicI64,
}

impl SnowflakeGenerator {
    /// Create a generator for the given worker
    ///
    /// # Panics
    /// Panics if `worker_id >= 1024`
    pub fn new(worker_id: u16) -> Self {
        assert!(worker_id < 1024, "Worker ID must be < 1024");
        Self {
            worker_id,
            last: AtomicI64::new(0),
        }
    }

    pub fn worker_id(&self) -> u16 {
        self.worker_id
    }

    /// Issue the next ID
    pub fn generate(&self) -> Snowflake {
        let worker_bits = i64::from(self.worker_id) << SEQUENCE_BITS;
        let base = ((Utc::now().timestamp_millis() - Snowflake::EPOCH).max(0) << TIMESTAMP_SHIFT)
            | worker_bits;

        let mut last = self.last.load(Ordering::Acquire);
        loop {
            let next = if base > last {
                base
            } else if last & SEQUENCE_MASK == SEQUENCE_MASK {
                // Sequence exhausted: borrow the next millisecond
                (((last >> TIMESTAMP_SHIFT) + 1) << TIMESTAMP_SHIFT) | worker_bits
            } else {
                last + 1
            };
            match self
                .last
                .compare_exchange_weak(last, next, Ordering::AcqRel, Ordering::Acquire)
            {
                Ok(_) => return Snowflake(next),
                Err(current) => last = current,
            }
        }
    }
}

impl Default for SnowflakeGenerator {
    fn default() -> Self {
        Self::new(0)
    }
}
