//! Film/frame filename convention
//!
//! Scans are usually named `[film]-[frame]-title.jpg`, e.g.
//! `123-22-holiday.jpg` is frame 22 of film 123.

use std::fmt;
use std::path::Path;

/// Film and frame identifiers of a negative
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameRef {
    pub film: String,
    pub frame: String,
}

impl FrameRef {
    pub fn new(film: impl Into<String>, frame: impl Into<String>) -> Self {
        Self {
            film: film.into(),
            frame: frame.into(),
        }
    }
}

impl fmt::Display for FrameRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.film, self.frame)
    }
}

/// Guess film and frame IDs from a file name.
///
/// Only the base name is considered. It must start with `<digits>-<digits>`
/// and end in `.jpg` or `.jpeg` (any case); otherwise `None`.
pub fn guess_ids(filepath: impl AsRef<Path>) -> Option<FrameRef> {
    let name = filepath.as_ref().file_name()?.to_str()?.to_lowercase();

    if !(name.ends_with(".jpg") || name.ends_with(".jpeg")) {
        return None;
    }

    let (film, rest) = split_digits(&name)?;
    let rest = rest.strip_prefix('-')?;
    let (frame, _) = split_digits(rest)?;

    Some(FrameRef::new(film, frame))
}

/// Split a leading run of ASCII digits off `s`; `None` if there is none
fn split_digits(s: &str) -> Option<(&str, &str)> {
    let end = s
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(s.len());
    if end == 0 {
        return None;
    }
    Some(s.split_at(end))
}
