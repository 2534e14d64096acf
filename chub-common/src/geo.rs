//! GPS coordinate conversion
//!
//! Catalog records carry coordinates as signed decimal degrees. EXIF wants an
//! unsigned degrees/minutes/seconds triple plus a hemisphere reference letter.
//! All arithmetic uses `rust_decimal` so the seconds component is exact.

use crate::error::{Error, Result};
use crate::value::Scalar;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

const SECONDS_PER_DEGREE: Decimal = Decimal::from_parts(3600, 0, 0, false, 0);
const SIXTY: Decimal = Decimal::from_parts(60, 0, 0, false, 0);

/// Degrees, minutes and seconds of an angle's magnitude
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dms {
    pub degrees: u32,
    pub minutes: u32,
    pub seconds: Decimal,
}

impl Dms {
    /// Render as three EXIF rationals: `"D/1 M/1 num/den"`.
    ///
    /// Seconds keep their exact decimal value, e.g. `36.5` becomes `365/10`.
    pub fn to_rational_string(&self) -> String {
        let seconds = self.seconds.normalize();
        let denominator = 10u128.pow(seconds.scale());
        format!(
            "{}/1 {}/1 {}/{}",
            self.degrees,
            self.minutes,
            seconds.mantissa(),
            denominator
        )
    }
}

impl fmt::Display for Dms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}° {}' {}\"", self.degrees, self.minutes, self.seconds.normalize())
    }
}

/// Decompose a signed decimal-degree angle into degrees, minutes, seconds.
///
/// The sign is discarded; the hemisphere is reported by [`hemisphere`].
/// Fails only when the magnitude is too large to represent.
pub fn convert_angle_to_dms(value: Decimal) -> Result<Dms> {
    let total_seconds = value
        .abs()
        .checked_mul(SECONDS_PER_DEGREE)
        .ok_or_else(|| Error::InvalidInput(format!("Angle out of range: {}", value)))?;

    // divmod on whole units keeps the divisions exact
    let seconds = total_seconds % SIXTY;
    let total_minutes = (total_seconds - seconds) / SIXTY;
    let minutes = total_minutes % SIXTY;
    let degrees = (total_minutes - minutes) / SIXTY;

    let degrees = degrees
        .to_u32()
        .ok_or_else(|| Error::InvalidInput(format!("Angle out of range: {}", value)))?;
    // minutes < 60
    let minutes = minutes.to_u32().unwrap_or_default();

    Ok(Dms {
        degrees,
        minutes,
        seconds,
    })
}

/// Coordinate axis of a GPS value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Latitude,
    Longitude,
}

impl Axis {
    /// Parse the axis labels used by catalog records (`latitude`, `longitude`)
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "latitude" => Some(Axis::Latitude),
            "longitude" => Some(Axis::Longitude),
            _ => None,
        }
    }
}

/// EXIF GPS reference letter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hemisphere {
    North,
    South,
    East,
    West,
}

impl Hemisphere {
    pub fn for_axis(axis: Axis, value: Decimal) -> Self {
        let negative = value.is_sign_negative() && !value.is_zero();
        match (axis, negative) {
            (Axis::Latitude, false) => Hemisphere::North,
            (Axis::Latitude, true) => Hemisphere::South,
            (Axis::Longitude, false) => Hemisphere::East,
            (Axis::Longitude, true) => Hemisphere::West,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Hemisphere::North => "N",
            Hemisphere::South => "S",
            Hemisphere::East => "E",
            Hemisphere::West => "W",
        }
    }
}

impl fmt::Display for Hemisphere {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reference letter for `value` on the axis named `axis`.
///
/// Zero counts as non-negative. Unknown axis labels give `None`.
pub fn hemisphere(axis: &str, value: Decimal) -> Option<Hemisphere> {
    Axis::from_label(axis).map(|axis| Hemisphere::for_axis(axis, value))
}

/// Read a leaf value as an exact decimal.
///
/// The catalog API sends decimal fields either as JSON numbers or as numeric
/// strings; both are accepted. JSON numbers beyond 28 decimal places are
/// rounded through their float value instead of failing.
pub fn parse_decimal(field: &str, value: &Scalar<'_>) -> Result<Decimal> {
    let text = match value {
        Scalar::Number(n) => n.to_string(),
        Scalar::Text(s) => s.trim().to_string(),
        other => return Err(Error::malformed(field, other.to_string())),
    };

    if let Ok(exact) = Decimal::from_str(&text).or_else(|_| Decimal::from_scientific(&text)) {
        return Ok(exact);
    }

    let rounded = match value {
        Scalar::Number(n) => n.as_f64().and_then(Decimal::from_f64),
        _ => None,
    };
    rounded.ok_or_else(|| Error::malformed(field, text))
}
