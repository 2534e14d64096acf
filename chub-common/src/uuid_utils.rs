//! UUID utilities

use uuid::Uuid;

/// Generate a new UUIDv4
pub fn generate() -> Uuid {
    Uuid::new_v4()
}

/// Parse UUID from string
pub fn parse(s: &str) -> Result<Uuid, uuid::Error> {
    Uuid::parse_str(s)
}

/// Check whether `s` is a canonical version-4 UUID.
///
/// Scan IDs are stored in the hyphenated lowercase form, so anything that
/// parses but prints differently (braces, uppercase, no hyphens) is rejected.
/// Never panics; malformed input is simply `false`.
pub fn is_valid_uuid(s: &str) -> bool {
    match parse(s) {
        Ok(uuid) => uuid.get_version_num() == 4 && uuid.hyphenated().to_string() == s,
        Err(_) => false,
    }
}
