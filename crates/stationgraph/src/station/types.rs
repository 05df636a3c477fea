//! Station identifiers and station records.

use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::warn;

/// Display name used when a snapshot record carries none.
pub const UNKNOWN_NAME: &str = "Unknown";

/// Stable station identifier (integer or free-form string).
///
/// Invariants:
/// - Canonical integers (`"42"`, `42`) always use `Num`, so JSON object keys
///   (strings) reload to the same id they were written from.
/// - Strings with leading zeros (`"007"`) stay `Text`; they are distinct ids.
/// - Ordering: all `Num` ids (numeric order) before all `Text` ids (lexicographic).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StationId {
    Num(u64),
    Text(String),
}

impl StationId {
    /// Parse a textual id, normalizing canonical integers to `Num`.
    pub fn parse(raw: &str) -> Self {
        let canonical = !raw.is_empty()
            && raw.bytes().all(|b| b.is_ascii_digit())
            && (raw == "0" || !raw.starts_with('0'));
        if canonical {
            if let Ok(n) = raw.parse::<u64>() {
                return StationId::Num(n);
            }
        }
        StationId::Text(raw.to_string())
    }
}

impl From<u64> for StationId {
    fn from(n: u64) -> Self {
        StationId::Num(n)
    }
}

impl From<&str> for StationId {
    fn from(raw: &str) -> Self {
        StationId::parse(raw)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StationId::Num(n) => write!(f, "{n}"),
            StationId::Text(s) => f.write_str(s),
        }
    }
}

impl Serialize for StationId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            StationId::Num(n) => serializer.serialize_u64(*n),
            StationId::Text(s) => serializer.serialize_str(s),
        }
    }
}

struct StationIdVisitor;

impl<'de> Visitor<'de> for StationIdVisitor {
    type Value = StationId;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a station id (non-negative integer or string)")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<StationId, E> {
        Ok(StationId::Num(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<StationId, E> {
        match u64::try_from(v) {
            Ok(n) => Ok(StationId::Num(n)),
            Err(_) => Ok(StationId::Text(v.to_string())),
        }
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<StationId, E> {
        Ok(StationId::parse(v))
    }
}

impl<'de> Deserialize<'de> for StationId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(StationIdVisitor)
    }
}

/// Capacity from a numeric snapshot value: whole, non-negative, within `u32`.
/// Anything else counts as unknown.
pub fn capacity_from_f64(raw: f64) -> Option<u32> {
    let valid = raw.is_finite()
        && raw.fract() == 0.0
        && (0.0..=f64::from(u32::MAX)).contains(&raw);
    valid.then_some(raw as u32)
}

/// Snapshot capacities arrive as integers, floats, strings or null. An
/// unusable value degrades that station's capacity to unknown instead of
/// failing the whole snapshot.
struct CapacityVisitor;

impl CapacityVisitor {
    fn unusable<T: fmt::Debug>(raw: T) -> Option<u32> {
        warn!(capacity = ?raw, "unusable capacity treated as unknown");
        None
    }
}

impl<'de> Visitor<'de> for CapacityVisitor {
    type Value = Option<u32>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a station capacity")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Option<u32>, E> {
        Ok(u32::try_from(v).ok().or_else(|| Self::unusable(v)))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Option<u32>, E> {
        Ok(u32::try_from(v).ok().or_else(|| Self::unusable(v)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Option<u32>, E> {
        Ok(capacity_from_f64(v).or_else(|| Self::unusable(v)))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Option<u32>, E> {
        Ok(v.trim().parse::<u32>().ok().or_else(|| Self::unusable(v)))
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Option<u32>, E> {
        Ok(Self::unusable(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Option<u32>, E> {
        Ok(None)
    }

    fn visit_none<E: de::Error>(self) -> Result<Option<u32>, E> {
        Ok(None)
    }
}

fn lenient_capacity<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    deserializer.deserialize_any(CapacityVisitor)
}

fn unknown_name() -> String {
    UNKNOWN_NAME.to_string()
}

/// One station record as loaded from a snapshot.
///
/// Coordinates and capacity are optional on purpose: the snapshot may omit
/// them. `capacity()` applies the default of 0; `capacity_known()` tells the
/// median computation whether the value was actually present.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Station {
    #[serde(rename = "station_id")]
    pub id: StationId,
    #[serde(default = "unknown_name")]
    pub name: String,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    #[serde(default, deserialize_with = "lenient_capacity")]
    pub capacity: Option<u32>,
}

impl Station {
    /// Station with coordinates and a known capacity.
    pub fn new(id: impl Into<StationId>, lat: f64, lon: f64, capacity: u32) -> Self {
        Self {
            id: id.into(),
            name: unknown_name(),
            lat: Some(lat),
            lon: Some(lon),
            capacity: Some(capacity),
        }
    }

    #[inline]
    pub fn capacity(&self) -> u32 {
        self.capacity.unwrap_or(0)
    }

    #[inline]
    pub fn capacity_known(&self) -> bool {
        self.capacity.is_some()
    }
}
