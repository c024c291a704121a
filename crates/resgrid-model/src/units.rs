//! Measurement units for grid dimensions and map coordinates.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{GridValueError, Result};
use crate::token::match_token;

/// Length unit used for grid dimensions and map coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Units {
    Metres,
    Cm,
    Feet,
}

/// File token for a unit.
pub fn units_token(units: Units) -> &'static str {
    match units {
        Units::Metres => "METRES",
        Units::Cm => "CM",
        Units::Feet => "FEET",
    }
}

/// Parse a unit token, ignoring padding and case.
pub fn units_from_token(token: &str) -> Result<Units> {
    if match_token(token, "METRES") {
        Ok(Units::Metres)
    } else if match_token(token, "CM") {
        Ok(Units::Cm)
    } else if match_token(token, "FEET") {
        Ok(Units::Feet)
    } else {
        Err(GridValueError::InvalidEnumValue {
            expected: "unit",
            token: token.to_string(),
        })
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", units_token(*self))
    }
}

/// Whether grid measurements are map relative or origin relative.
///
/// This is the second value of the GRIDUNIT keyword. "MAP" means relative to
/// the map coordinate system; a blank value means relative to the origin
/// given by MAPAXES.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GridRelative {
    Map,
    Origin,
}

/// File token for a grid-relative flag. Origin is written as a blank token.
pub fn grid_relative_token(relative: GridRelative) -> &'static str {
    match relative {
        GridRelative::Map => "MAP",
        GridRelative::Origin => "",
    }
}

/// Parse a grid-relative token. Anything other than "MAP" means origin.
pub fn grid_relative_from_token(token: &str) -> GridRelative {
    if match_token(token, "MAP") {
        GridRelative::Map
    } else {
        GridRelative::Origin
    }
}

/// The GRIDUNIT keyword: unit of grid dimensions and whether they are map
/// relative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridUnit {
    pub unit: Units,
    pub grid_relative: GridRelative,
}

impl Default for GridUnit {
    fn default() -> Self {
        Self {
            unit: Units::Metres,
            grid_relative: GridRelative::Origin,
        }
    }
}

impl GridUnit {
    /// Decode a GRIDUNIT payload. Omitted trailing fields take the keyword
    /// defaults (metres, origin relative).
    pub fn from_values(values: &[String]) -> Result<Self> {
        let mut result = Self::default();
        if let Some(unit) = values.first() {
            result.unit = units_from_token(unit)?;
        }
        if let Some(relative) = values.get(1) {
            result.grid_relative = grid_relative_from_token(relative);
        }
        Ok(result)
    }

    /// Encode as a GRIDUNIT payload.
    pub fn to_values(&self) -> Vec<String> {
        vec![
            units_token(self.unit).to_string(),
            grid_relative_token(self.grid_relative).to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_tokens_roundtrip() {
        for units in [Units::Metres, Units::Cm, Units::Feet] {
            assert_eq!(units_from_token(units_token(units)).unwrap(), units);
        }
    }

    #[test]
    fn unit_token_matching_is_padded_and_case_insensitive() {
        assert_eq!(units_from_token("METRES  ").unwrap(), Units::Metres);
        assert_eq!(units_from_token("feet").unwrap(), Units::Feet);
    }

    #[test]
    fn unknown_unit_token_is_rejected() {
        let err = units_from_token("FURLONG").unwrap_err();
        assert!(matches!(err, GridValueError::InvalidEnumValue { .. }));
    }

    #[test]
    fn grid_relative_blank_means_origin() {
        assert_eq!(grid_relative_from_token(""), GridRelative::Origin);
        assert_eq!(grid_relative_from_token("        "), GridRelative::Origin);
        assert_eq!(grid_relative_from_token("MAP     "), GridRelative::Map);
    }

    #[test]
    fn gridunit_decodes_partial_payloads() {
        let unit = GridUnit::from_values(&[]).unwrap();
        assert_eq!(unit, GridUnit::default());

        let unit = GridUnit::from_values(&["FEET    ".to_string()]).unwrap();
        assert_eq!(unit.unit, Units::Feet);
        assert_eq!(unit.grid_relative, GridRelative::Origin);
    }

    #[test]
    fn gridunit_roundtrips() {
        let unit = GridUnit {
            unit: Units::Cm,
            grid_relative: GridRelative::Map,
        };
        assert_eq!(GridUnit::from_values(&unit.to_values()).unwrap(), unit);
    }
}
