//! Deserialization helpers for PurrSong payloads.
//!
//! The service is loose with scalar types: ids and `creationTime` arrive as
//! numbers in some responses and as numeric strings in others.

use chrono::{DateTime, Utc};
use serde::de::{self, Deserializer};
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Int(i64),
    Float(f64),
    Str(String),
}

impl NumberOrString {
    fn into_i64<E: de::Error>(self) -> Result<i64, E> {
        match self {
            Self::Int(value) => Ok(value),
            #[allow(clippy::cast_possible_truncation)]
            Self::Float(value) if value.fract() == 0.0 => Ok(value as i64),
            Self::Float(value) => Err(E::custom(format!("expected an integer, got {value}"))),
            Self::Str(value) => value
                .trim()
                .parse()
                .map_err(|_| E::custom(format!("expected a numeric string, got '{value}'"))),
        }
    }
}

/// Deserializes an id given as a number or a numeric string.
pub(crate) fn id<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    NumberOrString::deserialize(deserializer)?.into_i64()
}

/// Deserializes an optional epoch-milliseconds timestamp.
pub(crate) fn opt_timestamp_millis<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<NumberOrString>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let millis = raw.into_i64()?;
    DateTime::<Utc>::from_timestamp_millis(millis)
        .map(Some)
        .ok_or_else(|| de::Error::custom(format!("timestamp {millis} is out of range")))
}
