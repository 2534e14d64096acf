//! End-to-end translation of catalog scan records into EXIF tags

use chub_common::tags::{self, mapping_table};
use chub_common::{diff, flatten, translate, Error, TagMap};
use serde_json::{json, Value};

fn scan_record() -> Value {
    json!({
        "uuid": "9a5e1c4e-3f0b-4d8e-9d55-2b2f3b8f6a11",
        "filename": "123-22-thames.jpg",
        "negative": {
            "frame": "22",
            "film": {
                "camera": {
                    "cameramodel": {"Make": "Nikon", "Model": "F3"},
                    "BodySerialNumber": "1234567"
                },
                "ISOSpeed": 400
            },
            "lens": {
                "lensmodel": {"LensMake": "Nikon", "LensModel": "Nikkor 50mm f/1.4", "MaxApertureValue": 1.4},
                "LensSerialNumber": "L99"
            },
            "FNumber": 8,
            "ShutterSpeedValue": "1/125",
            "FocalLength": "50.9",
            "FocalLengthIn35mmFilm": 50,
            "latitude": "51.5074",
            "longitude": -0.1278,
            "DateTimeOriginal": "2021:06:01 12:00:00",
            "Artist": null,
            "ImageDescription": "Thames at dusk",
            "tags": [{"name": "city"}, {"name": "river"}]
        }
    })
}

#[test]
fn test_full_record_translation() {
    let exif = translate(&scan_record()).unwrap();

    let expected: TagMap = [
        ("Exif.Image.Make", "Nikon"),
        ("Exif.Image.Model", "F3"),
        ("Exif.Photo.BodySerialNumber", "1234567"),
        ("Exif.Photo.ISOSpeed", "400"),
        ("Exif.Photo.LensMake", "Nikon"),
        ("Exif.Photo.LensModel", "Nikkor 50mm f/1.4"),
        ("Exif.Image.MaxApertureValue", "1.4"),
        ("Exif.Photo.LensSerialNumber", "L99"),
        ("Exif.Image.FNumber", "8"),
        ("Exif.Photo.ExposureTime", "1/125"),
        ("Exif.Image.FocalLength", "50/1"),
        ("Exif.Photo.FocalLengthIn35mmFilm", "50/1"),
        ("Exif.GPSInfo.GPSLatitude", "51/1 30/1 2664/100"),
        ("Exif.GPSInfo.GPSLatitudeRef", "N"),
        ("Exif.GPSInfo.GPSLongitude", "0/1 7/1 4008/100"),
        ("Exif.GPSInfo.GPSLongitudeRef", "W"),
        ("Exif.Image.DateTimeOriginal", "2021:06:01 12:00:00"),
        ("Exif.Photo.UserComment", "Thames at dusk"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    assert_eq!(exif, expected);
    // insertion order follows the record
    assert!(exif.keys().eq(expected.keys()));
}

#[test]
fn test_every_mapped_non_null_leaf_is_present() {
    let record = scan_record();
    let exif = translate(&record).unwrap();

    for leaf in flatten(&record, &[]) {
        if leaf.value.is_null() {
            continue;
        }
        let Some(tag) = leaf.path.short_name().and_then(chub_common::map_tag) else {
            continue;
        };
        if tag == tags::FOCAL_LENGTH || tag == tags::FOCAL_LENGTH_35MM {
            continue;
        }
        assert_eq!(exif.get(tag), Some(&leaf.value.to_string()), "{}", leaf.path);
    }
}

#[test]
fn test_null_leaf_produces_no_tag() {
    let exif = translate(&scan_record()).unwrap();
    assert!(!exif.contains_key("Exif.Image.Artist"));
}

#[test]
fn test_every_table_entry_translates() {
    let mut negative = serde_json::Map::new();
    for (short, _) in mapping_table() {
        negative.insert(short.to_string(), json!("7"));
    }
    let exif = translate(&json!({ "negative": negative })).unwrap();

    for (_, destination) in mapping_table() {
        assert!(exif.contains_key(*destination), "{}", destination);
    }
}

#[test]
fn test_translation_diff_against_existing_tags() {
    let exif = translate(&scan_record()).unwrap();

    let mut existing = TagMap::new();
    existing.insert("Exif.Image.Make".to_string(), "Nikon".to_string());
    existing.insert("Exif.Image.Model".to_string(), "FM2".to_string());
    existing.insert("Exif.Image.Software".to_string(), "Scanner 1.0".to_string());

    let changes = diff(&existing, &exif);

    // Make is unchanged, Model changes, Software is never reported as removed
    assert_eq!(changes.changed().count(), 1);
    assert_eq!(changes.len(), exif.len() - 1);
    assert!(changes.updates().all(|(k, _)| k != "Exif.Image.Software"));
}

#[test]
fn test_empty_record_translates_to_nothing() {
    assert!(translate(&json!({})).unwrap().is_empty());
}

#[test]
fn test_malformed_focal_length_fails_whole_record() {
    let mut record = scan_record();
    record["negative"]["FocalLengthIn35mmFilm"] = json!("n/a");

    assert!(matches!(
        translate(&record),
        Err(Error::MalformedNumeric { .. })
    ));
}

#[test]
fn test_boolean_fields_render_lowercase() {
    // JSON spelling of booleans
    let exif = translate(&json!({"negative": {"Flash": true, "Copyright": false}})).unwrap();

    assert_eq!(exif.get("Exif.Photo.Flash").map(String::as_str), Some("true"));
    assert_eq!(exif.get("Exif.Image.Copyright").map(String::as_str), Some("false"));
}
