//! # CameraHub Common Library
//!
//! Shared code for the CameraHub tagging tools including:
//! - Catalog record → EXIF tag translation pipeline
//! - GPS coordinate conversion (decimal degrees → DMS)
//! - Tag map diffing
//! - UUID validation and filename conventions
//! - Console prompts
//! - Configuration loading

pub mod config;
pub mod diff;
pub mod error;
pub mod filename;
pub mod flatten;
pub mod geo;
pub mod prompt;
pub mod tags;
pub mod translate;
pub mod uuid_utils;
pub mod value;

pub use diff::{diff, merge, DiffEntry, TagDiff};
pub use error::{Error, Result};
pub use filename::{guess_ids, FrameRef};
pub use flatten::flatten;
pub use tags::map_tag;
pub use translate::{translate, TagMap};
pub use uuid_utils::is_valid_uuid;
pub use value::{FieldPath, LeafEntry, Scalar};
