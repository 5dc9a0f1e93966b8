use std::io::{self, BufRead, Seek};

use exif::{In, Reader, Value};

use super::{TimestampField, TimestampKey};

/// Outcome of looking up a timestamp tag in one file.
#[derive(Debug, PartialEq, Eq)]
pub enum Lookup {
    Found(TimestampKey),
    /// The container has no EXIF block, or is not an image at all.
    NoExif,
    /// EXIF is present but the requested tag is absent, blank or not ASCII.
    MissingTag,
}

/// Read the timestamp tag from an image container.
///
/// The value is kept as the raw ASCII text (`2018:05:03 14:22:10`), not
/// parsed, so ordering and naming follow the camera's own string.
/// Only I/O failures are returned as errors.
pub fn read_timestamp<R: BufRead + Seek>(reader: &mut R, field: TimestampField) -> io::Result<Lookup> {
    let exif = match Reader::new().read_from_container(reader) {
        Ok(exif) => exif,
        Err(exif::Error::Io(e)) => return Err(e),
        Err(_) => return Ok(Lookup::NoExif),
    };

    let Some(field) = exif.get_field(field.tag(), In::PRIMARY) else {
        return Ok(Lookup::MissingTag);
    };

    let raw = match &field.value {
        Value::Ascii(parts) => parts.first().map(|p| String::from_utf8_lossy(p).into_owned()),
        _ => None,
    };

    match raw.as_deref().map(|s| s.trim_end_matches(['\0', ' '])) {
        Some(s) if !s.is_empty() => Ok(Lookup::Found(TimestampKey::new(s))),
        _ => Ok(Lookup::MissingTag),
    }
}
