#![allow(dead_code)]

use std::fs;
use std::path::Path;

const ASCII: u16 = 2;
const LONG: u16 = 4;

const TAG_DATE_TIME: u16 = 0x0132;
const TAG_EXIF_IFD: u16 = 0x8769;
const TAG_DATE_TIME_ORIGINAL: u16 = 0x9003;

fn ascii(s: &str) -> Vec<u8> {
    let mut v = s.as_bytes().to_vec();
    v.push(0);
    v
}

fn entry(buf: &mut Vec<u8>, tag: u16, typ: u16, count: u32, value: u32) {
    buf.extend_from_slice(&tag.to_be_bytes());
    buf.extend_from_slice(&typ.to_be_bytes());
    buf.extend_from_slice(&count.to_be_bytes());
    buf.extend_from_slice(&value.to_be_bytes());
}

/// Big-endian TIFF block: IFD0 with `DateTime`, plus an Exif IFD with
/// `DateTimeOriginal` when given.
fn tiff(datetime: Option<&str>, original: Option<&str>) -> Vec<u8> {
    let dt = datetime.map(ascii);
    let orig = original.map(ascii);

    let n0 = dt.is_some() as usize + orig.is_some() as usize;
    let exif_ifd = 8 + 2 + 12 * n0 + 4;
    let exif_len = if orig.is_some() { 2 + 12 + 4 } else { 0 };
    let dt_off = exif_ifd + exif_len;
    let orig_off = dt_off + dt.as_ref().map_or(0, Vec::len);

    let mut buf = b"MM\0\x2a".to_vec();
    buf.extend_from_slice(&8u32.to_be_bytes());

    buf.extend_from_slice(&(n0 as u16).to_be_bytes());
    if let Some(v) = &dt {
        entry(&mut buf, TAG_DATE_TIME, ASCII, v.len() as u32, dt_off as u32);
    }
    if orig.is_some() {
        entry(&mut buf, TAG_EXIF_IFD, LONG, 1, exif_ifd as u32);
    }
    buf.extend_from_slice(&0u32.to_be_bytes());

    if let Some(v) = &orig {
        buf.extend_from_slice(&1u16.to_be_bytes());
        entry(&mut buf, TAG_DATE_TIME_ORIGINAL, ASCII, v.len() as u32, orig_off as u32);
        buf.extend_from_slice(&0u32.to_be_bytes());
    }

    assert_eq!(buf.len(), dt_off);
    if let Some(v) = &dt {
        buf.extend_from_slice(v);
    }
    if let Some(v) = &orig {
        buf.extend_from_slice(v);
    }
    buf
}

/// Minimal JPEG: SOI, APP1 Exif segment, EOI, then `trailer` so tests can
/// tell files with equal timestamps apart.
pub fn jpeg(datetime: Option<&str>, original: Option<&str>, trailer: &[u8]) -> Vec<u8> {
    let tiff = tiff(datetime, original);
    let mut out = vec![0xFF, 0xD8, 0xFF, 0xE1];
    out.extend_from_slice(&((2 + 6 + tiff.len()) as u16).to_be_bytes());
    out.extend_from_slice(b"Exif\0\0");
    out.extend_from_slice(&tiff);
    out.extend_from_slice(&[0xFF, 0xD9]);
    out.extend_from_slice(trailer);
    out
}

/// Write a JPEG whose `DateTime` is `datetime`; the file content ends with its own name.
pub fn write_photo(dir: &Path, name: &str, datetime: &str) {
    fs::write(dir.join(name), jpeg(Some(datetime), None, name.as_bytes())).unwrap();
}

/// Sorted file names in `dir`.
pub fn names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

/// The trailer written by [`write_photo`], i.e. the original file name.
pub fn origin(path: &Path) -> String {
    let bytes = fs::read(path).unwrap();
    let eoi = bytes.windows(2).rposition(|w| w == [0xFF, 0xD9]).unwrap();
    String::from_utf8(bytes[eoi + 2..].to_vec()).unwrap()
}
