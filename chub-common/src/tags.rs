//! Catalog field name → EXIF tag mapping
//!
//! Maps the short (last-segment) name of a catalog field to the fully
//! qualified tag key expected by the metadata writer, e.g. `Make` →
//! `Exif.Image.Make`. The table is compiled in and never changes at runtime.

use once_cell::sync::Lazy;
use std::collections::HashMap;

pub const GPS_LATITUDE: &str = "Exif.GPSInfo.GPSLatitude";
pub const GPS_LATITUDE_REF: &str = "Exif.GPSInfo.GPSLatitudeRef";
pub const GPS_LONGITUDE: &str = "Exif.GPSInfo.GPSLongitude";
pub const GPS_LONGITUDE_REF: &str = "Exif.GPSInfo.GPSLongitudeRef";

pub const IMAGE_UNIQUE_ID: &str = "Exif.Photo.ImageUniqueID";
pub const FOCAL_LENGTH: &str = "Exif.Image.FocalLength";
pub const FOCAL_LENGTH_35MM: &str = "Exif.Photo.FocalLengthIn35mmFilm";

/// Short field name → destination tag, in table order
const TAG_TABLE: &[(&str, &str)] = &[
    ("ImageUniqueID", IMAGE_UNIQUE_ID),
    ("Make", "Exif.Image.Make"),
    ("LensMake", "Exif.Photo.LensMake"),
    ("Model", "Exif.Image.Model"),
    ("BodySerialNumber", "Exif.Photo.BodySerialNumber"),
    ("ISOSpeed", "Exif.Photo.ISOSpeed"),
    ("LensModel", "Exif.Photo.LensModel"),
    ("ExposureProgram", "Exif.Image.ExposureProgram"),
    ("MeteringMode", "Exif.Image.MeteringMode"),
    ("ImageDescription", "Exif.Photo.UserComment"),
    ("DateTimeOriginal", "Exif.Image.DateTimeOriginal"),
    ("FNumber", "Exif.Image.FNumber"),
    ("UserComment", "Exif.Photo.UserComment"),
    ("FocalLength", FOCAL_LENGTH),
    ("Flash", "Exif.Photo.Flash"),
    ("Artist", "Exif.Image.Artist"),
    ("LensSerialNumber", "Exif.Photo.LensSerialNumber"),
    ("ShutterSpeedValue", "Exif.Photo.ExposureTime"),
    ("MaxApertureValue", "Exif.Image.MaxApertureValue"),
    ("Copyright", "Exif.Image.Copyright"),
    ("FocalLengthIn35mmFilm", FOCAL_LENGTH_35MM),
];

static TAG_INDEX: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| TAG_TABLE.iter().copied().collect());

/// Look up the destination tag for a short field name.
///
/// Exact, case-sensitive match. `None` means the field has no EXIF
/// counterpart and should be dropped.
pub fn map_tag(short_name: &str) -> Option<&'static str> {
    TAG_INDEX.get(short_name).copied()
}

/// The full mapping table in declaration order
pub fn mapping_table() -> &'static [(&'static str, &'static str)] {
    TAG_TABLE
}
