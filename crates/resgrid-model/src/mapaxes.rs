//! Map coordinate system.

use serde::{Deserialize, Serialize};

use crate::error::{GridValueError, Result};

/// The MAPAXES keyword: local coordinate system of the map.
///
/// The coordinate system is given by three points: one on the y axis, the
/// origin, and one on the x axis. The usual system is y line (0, 1), origin
/// (0, 0), x line (1, 0).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapAxes {
    pub y_line: (f32, f32),
    pub origin: (f32, f32),
    pub x_line: (f32, f32),
}

impl Default for MapAxes {
    fn default() -> Self {
        Self {
            y_line: (0.0, 1.0),
            origin: (0.0, 0.0),
            x_line: (1.0, 0.0),
        }
    }
}

impl MapAxes {
    /// Decode a MAPAXES payload, which must contain exactly 6 values.
    pub fn from_values(values: &[f32]) -> Result<Self> {
        if values.len() != 6 {
            return Err(GridValueError::incorrect(
                "MAPAXES",
                format!("expected 6 values, got {}", values.len()),
            ));
        }
        Ok(Self {
            y_line: (values[0], values[1]),
            origin: (values[2], values[3]),
            x_line: (values[4], values[5]),
        })
    }

    /// Encode as a MAPAXES payload.
    pub fn to_values(&self) -> Vec<f32> {
        vec![
            self.y_line.0,
            self.y_line.1,
            self.origin.0,
            self.origin.1,
            self.x_line.0,
            self.x_line.1,
        ]
    }
}
