pub mod exif;

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Marker appended to a key that is already taken by an earlier file.
pub const DUPLICATE_SUFFIX: &str = "_dupl";

/// Which EXIF timestamp names a photo.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimestampField {
    /// `Image DateTime` (0x0132), last modification of the image
    #[default]
    DateTime,
    /// `EXIF DateTimeOriginal` (0x9003), when the shutter fired
    Original,
}

impl TimestampField {
    pub fn tag(self) -> ::exif::Tag {
        match self {
            TimestampField::DateTime => ::exif::Tag::DateTime,
            TimestampField::Original => ::exif::Tag::DateTimeOriginal,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TimestampField::DateTime => "DateTime",
            TimestampField::Original => "DateTimeOriginal",
        }
    }
}

/// Capture timestamp in its raw EXIF form, e.g. `2018:05:03 14:22:10`.
///
/// Ordering is plain string ordering. The EXIF fields have fixed widths, so
/// this is also chronological order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimestampKey(String);

impl TimestampKey {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The alternate slot for a colliding key.
    pub fn with_duplicate_suffix(&self) -> Self {
        Self(format!("{}{}", self.0, DUPLICATE_SUFFIX))
    }

    /// Key with `:` and spaces replaced by `_`, ready for a filename.
    pub fn sanitized(&self) -> String {
        self.0.replace([':', ' '], "_")
    }

    /// Parse the timestamp part as local time. Any suffix is ignored.
    pub fn datetime(&self) -> Option<NaiveDateTime> {
        let stamp = self.0.strip_suffix(DUPLICATE_SUFFIX).unwrap_or(&self.0);
        NaiveDateTime::parse_from_str(stamp, "%Y:%m:%d %H:%M:%S").ok()
    }
}

impl fmt::Display for TimestampKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitized() {
        let key = TimestampKey::new("2018:05:03 14:22:10");
        assert_eq!(key.sanitized(), "2018_05_03_14_22_10");
        assert_eq!(key.with_duplicate_suffix().sanitized(), "2018_05_03_14_22_10_dupl");
    }

    #[test]
    fn test_order_is_chronological() {
        let mut keys = vec![
            TimestampKey::new("2019:01:01 00:00:00"),
            TimestampKey::new("2018:12:31 23:59:59"),
            TimestampKey::new("2018:12:31 23:59:59").with_duplicate_suffix(),
            TimestampKey::new("2018:02:10 08:00:00"),
        ];
        keys.sort();
        let sorted: Vec<&str> = keys.iter().map(|k| k.as_str()).collect();
        assert_eq!(
            sorted,
            [
                "2018:02:10 08:00:00",
                "2018:12:31 23:59:59",
                "2018:12:31 23:59:59_dupl",
                "2019:01:01 00:00:00",
            ]
        );
    }

    #[test]
    fn test_datetime() {
        let key = TimestampKey::new("2018:05:03 14:22:10").with_duplicate_suffix();
        let dt = key.datetime().unwrap();
        assert_eq!(dt.format("%Y-%m-%d %H:%M:%S").to_string(), "2018-05-03 14:22:10");
        assert!(TimestampKey::new("    :  :     :  :  ").datetime().is_none());
    }
}
