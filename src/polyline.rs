//! Route geometry returned when `Options::polylines` is requested.
//!
//! The service sends each leg as an encoded polyline string (precision
//! 1e-5). [`Polyline::decode`] turns one into coordinates.

use serde::{Deserialize, Serialize};
use thiserror::Error;

const PRECISION: f64 = 1e5;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolylineError {
    #[error("invalid polyline character {found:?} at byte {offset}")]
    InvalidCharacter { found: char, offset: usize },
    #[error("polyline ends in the middle of a coordinate")]
    Truncated,
    #[error("polyline coordinate exceeds the representable range")]
    Overflow,
}

/// A polyline representing a route geometry as decoded coordinates.
///
/// Each point is a (latitude, longitude) tuple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<(f64, f64)>,
}

impl Polyline {
    /// Creates a new Polyline from decoded coordinate points.
    pub fn new(points: Vec<(f64, f64)>) -> Self {
        Self { points }
    }

    /// Decode an encoded polyline string.
    pub fn decode(encoded: &str) -> Result<Self, PolylineError> {
        let mut chars = encoded.char_indices();
        let mut points = Vec::new();
        let mut lat: i64 = 0;
        let mut lng: i64 = 0;

        while let Some(delta_lat) = next_value(&mut chars)? {
            let delta_lng = next_value(&mut chars)?.ok_or(PolylineError::Truncated)?;
            lat = lat.checked_add(delta_lat).ok_or(PolylineError::Overflow)?;
            lng = lng.checked_add(delta_lng).ok_or(PolylineError::Overflow)?;
            points.push((lat as f64 / PRECISION, lng as f64 / PRECISION));
        }

        Ok(Self { points })
    }

    /// Returns a reference to the coordinate points.
    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    /// Consumes the polyline and returns the owned coordinate points.
    pub fn into_points(self) -> Vec<(f64, f64)> {
        self.points
    }
}

/// Read one zig-zag encoded value; `None` at a clean end of input.
fn next_value(chars: &mut std::str::CharIndices<'_>) -> Result<Option<i64>, PolylineError> {
    let mut result: i64 = 0;
    let mut shift = 0;
    let mut started = false;

    loop {
        let Some((offset, ch)) = chars.next() else {
            return if started {
                Err(PolylineError::Truncated)
            } else {
                Ok(None)
            };
        };
        started = true;

        let byte = u32::from(ch)
            .checked_sub(63)
            .filter(|value| *value < 64 && shift < 60)
            .ok_or(PolylineError::InvalidCharacter { found: ch, offset })?;

        result |= i64::from(byte & 0x1f) << shift;
        shift += 5;

        if byte < 0x20 {
            break;
        }
    }

    let value = if result & 1 == 1 { !(result >> 1) } else { result >> 1 };
    Ok(Some(value))
}
