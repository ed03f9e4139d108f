use chrono::NaiveDate;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serializer};

use super::objects::DirectionType;

/// GTFS dates are written `YYYYMMDD`
pub const GTFS_DATE_FORMAT: &str = "%Y%m%d";

pub fn deserialize_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    NaiveDate::parse_from_str(s.trim(), GTFS_DATE_FORMAT)
        .map_err(|e| de::Error::custom(format!("Invalid date {:?}: {}", s, e)))
}

pub fn serialize_date<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&date.format(GTFS_DATE_FORMAT).to_string())
}

/// `0`/`1` flags, as used by calendar.txt
pub fn deserialize_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    match s.trim() {
        "0" | "" => Ok(false),
        "1" => Ok(true),
        other => Err(de::Error::custom(format!("Invalid boolean value {:?}", other))),
    }
}

pub fn serialize_bool<S>(value: &bool, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_u8(u8::from(*value))
}

/// Loosely typed text column: a missing or blank value is `None`
pub fn deserialize_option_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.filter(|s| !s.trim().is_empty()))
}

/// Identifier read from a file that isn't trimmed as a whole
pub fn deserialize_trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(s.trim().to_string())
}

/// `0`/`1` direction, blank or missing is `None`
pub fn deserialize_option_direction<'de, D>(
    deserializer: D,
) -> Result<Option<DirectionType>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some("0") => Ok(Some(DirectionType::Outbound)),
        Some("1") => Ok(Some(DirectionType::Inbound)),
        Some(other) => Err(de::Error::custom(format!("Invalid direction {:?}", other))),
    }
}
