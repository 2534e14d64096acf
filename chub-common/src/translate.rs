//! Catalog record → EXIF tag translation
//!
//! **Algorithm:**
//! 1. Flatten the record into (path, value) leaves
//! 2. Drop null leaves
//! 3. `negative.latitude` / `negative.longitude` become a DMS value plus a
//!    hemisphere reference, bypassing the tag table
//! 4. Every other leaf is looked up by its short name; unmapped fields are
//!    dropped
//! 5. Focal lengths are re-encoded as EXIF rationals (`"<int>/1"`)
//!
//! Later leaves overwrite earlier ones that map to the same tag.

use crate::error::{Error, Result};
use crate::flatten::flatten;
use crate::geo::{convert_angle_to_dms, parse_decimal, Axis, Hemisphere};
use crate::tags::{self, map_tag};
use crate::value::Scalar;
use indexmap::IndexMap;
use serde_json::Value;
use tracing::debug;

/// Flat EXIF tag key → string value, in insertion order
pub type TagMap = IndexMap<String, String>;

const LATITUDE_FIELD: &str = "negative.latitude";
const LONGITUDE_FIELD: &str = "negative.longitude";

/// Tags whose values must be written as integer rationals
const RATIONAL_TAGS: &[&str] = &[tags::FOCAL_LENGTH, tags::FOCAL_LENGTH_35MM];

/// Translate a catalog scan record into EXIF tags.
///
/// Fails with [`Error::MalformedNumeric`] if a coordinate or focal length
/// does not hold a number.
pub fn translate(record: &Value) -> Result<TagMap> {
    let mut exif = TagMap::new();

    for leaf in flatten(record, &[]) {
        if leaf.value.is_null() {
            continue;
        }

        let key = leaf.path.dotted();
        match key.as_str() {
            LATITUDE_FIELD => insert_coordinate(&mut exif, Axis::Latitude, &key, &leaf.value)?,
            LONGITUDE_FIELD => insert_coordinate(&mut exif, Axis::Longitude, &key, &leaf.value)?,
            _ => {
                let destination = leaf.path.short_name().and_then(map_tag);
                match destination {
                    Some(tag) => {
                        exif.insert(tag.to_string(), leaf.value.to_string());
                    }
                    None => debug!(field = %key, "No EXIF tag for field, dropping"),
                }
            }
        }
    }

    for tag in RATIONAL_TAGS {
        if let Some(value) = exif.get_mut(*tag) {
            *value = encode_integer_rational(tag, value)?;
        }
    }

    Ok(exif)
}

fn insert_coordinate(
    exif: &mut TagMap,
    axis: Axis,
    field: &str,
    value: &Scalar<'_>,
) -> Result<()> {
    let degrees = parse_decimal(field, value)?;
    let dms = convert_angle_to_dms(degrees)?;
    let hemisphere = Hemisphere::for_axis(axis, degrees);

    let (value_tag, ref_tag) = match axis {
        Axis::Latitude => (tags::GPS_LATITUDE, tags::GPS_LATITUDE_REF),
        Axis::Longitude => (tags::GPS_LONGITUDE, tags::GPS_LONGITUDE_REF),
    };

    exif.insert(value_tag.to_string(), dms.to_rational_string());
    exif.insert(ref_tag.to_string(), hemisphere.to_string());
    Ok(())
}

/// Encode a numeric string as `"<int>/1"`, truncating any fraction.
///
/// `"50.9"` becomes `"50/1"`: the value goes through a float and is cut
/// toward zero, never rounded.
pub fn encode_integer_rational(tag: &str, value: &str) -> Result<String> {
    let number: f64 = value
        .trim()
        .parse()
        .map_err(|_| Error::malformed(tag, value))?;

    if !number.is_finite() {
        return Err(Error::malformed(tag, value));
    }

    // f64 Display never uses exponent notation; fold -0 into 0
    let whole = number.trunc();
    let whole = if whole == 0.0 { 0.0 } else { whole };
    Ok(format!("{}/1", whole))
}
