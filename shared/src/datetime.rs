//! Zone-less local date-time handling.
//!
//! The backend speaks `LocalDateTime`: no offset, and seconds are dropped
//! when they are zero (`2024-06-05T10:30`). Browser `datetime-local` inputs
//! produce the same short form. Everything here is lenient on input and
//! canonical (`%Y-%m-%dT%H:%M:%S`) on output.

use chrono::NaiveDateTime;

/// Canonical wire format
pub const WIRE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Format expected by `<input type="datetime-local">`
pub const INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";

const ACCEPTED_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parse a local date-time in any of the accepted shapes.
///
/// A trailing `Z` or numeric offset is tolerated and ignored, so values
/// round-tripped through `Date.toISOString()` still land on the same wall
/// clock reading.
pub fn parse_local(input: &str) -> Option<NaiveDateTime> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    let without_zone = strip_offset(trimmed);
    ACCEPTED_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(without_zone, format).ok())
}

/// Value for a `datetime-local` input
pub fn to_input_value(value: &NaiveDateTime) -> String {
    value.format(INPUT_FORMAT).to_string()
}

/// Canonical wire string
pub fn to_wire(value: &NaiveDateTime) -> String {
    value.format(WIRE_FORMAT).to_string()
}

fn strip_offset(input: &str) -> &str {
    if let Some(stripped) = input.strip_suffix('Z') {
        return stripped;
    }
    // Offsets look like +HH:MM / -HH:MM after the time part
    if let Some(t_index) = input.find('T') {
        let time_part = &input[t_index..];
        if let Some(offset_index) = time_part.rfind(|c: char| c == '+' || c == '-') {
            return &input[..t_index + offset_index];
        }
    }
    input
}

/// `#[serde(with = "datetime::local")]` for required timestamps
pub mod local {
    use chrono::NaiveDateTime;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::to_wire(value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_local(&raw)
            .ok_or_else(|| D::Error::custom(format!("invalid local date-time: {}", raw)))
    }
}

/// `#[serde(with = "datetime::local_opt")]` for optional timestamps
pub mod local_opt {
    use chrono::NaiveDateTime;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(value) => serializer.serialize_str(&super::to_wire(value)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(None),
            Some(raw) => super::parse_local(&raw)
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("invalid local date-time: {}", raw))),
        }
    }
}
