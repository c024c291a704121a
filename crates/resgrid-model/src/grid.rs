//! Grid layout descriptors.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{GridValueError, Result};

/// Data layout of a grid.
///
/// Only the corner point layout is widely supported; the others occur in the
/// wild but are rejected by this crate's readers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeOfGrid {
    Composite,
    CornerPoint,
    Unstructured,
    BlockCenter,
}

/// Canonical integer code of a grid layout, used by the GRIDHEAD keyword.
pub fn type_of_grid_code(type_of_grid: TypeOfGrid) -> i32 {
    match type_of_grid {
        TypeOfGrid::Composite => 0,
        TypeOfGrid::CornerPoint => 1,
        TypeOfGrid::Unstructured => 2,
        TypeOfGrid::BlockCenter => 3,
    }
}

/// Parse a canonical grid layout code.
pub fn type_of_grid_from_code(code: i32) -> Result<TypeOfGrid> {
    match code {
        0 => Ok(TypeOfGrid::Composite),
        1 => Ok(TypeOfGrid::CornerPoint),
        2 => Ok(TypeOfGrid::Unstructured),
        3 => Ok(TypeOfGrid::BlockCenter),
        other => Err(GridValueError::InvalidEnumValue {
            expected: "grid layout",
            token: other.to_string(),
        }),
    }
}

/// Alternate integer code of a grid layout.
///
/// The FILEHEAD keyword (and a few restart-file headers) number the layouts
/// differently from GRIDHEAD. The two schemes must never be conflated.
pub fn type_of_grid_alternate_code(type_of_grid: TypeOfGrid) -> i32 {
    match type_of_grid {
        TypeOfGrid::CornerPoint => 0,
        TypeOfGrid::Unstructured => 1,
        TypeOfGrid::Composite => 2,
        TypeOfGrid::BlockCenter => 3,
    }
}

/// Parse an alternate grid layout code.
pub fn type_of_grid_from_alternate_code(code: i32) -> Result<TypeOfGrid> {
    match code {
        0 => Ok(TypeOfGrid::CornerPoint),
        1 => Ok(TypeOfGrid::Unstructured),
        2 => Ok(TypeOfGrid::Composite),
        3 => Ok(TypeOfGrid::BlockCenter),
        other => Err(GridValueError::InvalidEnumValue {
            expected: "grid layout",
            token: other.to_string(),
        }),
    }
}

impl TypeOfGrid {
    /// Canonical name as it appears in file format documentation.
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeOfGrid::Composite => "composite",
            TypeOfGrid::CornerPoint => "corner point",
            TypeOfGrid::Unstructured => "unstructured",
            TypeOfGrid::BlockCenter => "block center",
        }
    }
}

impl fmt::Display for TypeOfGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Type of rock model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RockModel {
    SinglePermeabilityPorosity,
    DualPorosity,
    DualPermeability,
}

/// Integer code of a rock model.
pub fn rock_model_code(rock_model: RockModel) -> i32 {
    match rock_model {
        RockModel::SinglePermeabilityPorosity => 0,
        RockModel::DualPorosity => 1,
        RockModel::DualPermeability => 2,
    }
}

/// Parse a rock model code.
pub fn rock_model_from_code(code: i32) -> Result<RockModel> {
    match code {
        0 => Ok(RockModel::SinglePermeabilityPorosity),
        1 => Ok(RockModel::DualPorosity),
        2 => Ok(RockModel::DualPermeability),
        other => Err(GridValueError::InvalidEnumValue {
            expected: "rock model",
            token: other.to_string(),
        }),
    }
}

/// How the original grid in the file was constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GridFormat {
    Unknown,
    IrregularCornerPoint,
    RegularCartesian,
}

/// Integer code of a grid format.
pub fn grid_format_code(grid_format: GridFormat) -> i32 {
    match grid_format {
        GridFormat::Unknown => 0,
        GridFormat::IrregularCornerPoint => 1,
        GridFormat::RegularCartesian => 2,
    }
}

/// Parse a grid format code.
pub fn grid_format_from_code(code: i32) -> Result<GridFormat> {
    match code {
        0 => Ok(GridFormat::Unknown),
        1 => Ok(GridFormat::IrregularCornerPoint),
        2 => Ok(GridFormat::RegularCartesian),
        other => Err(GridValueError::InvalidEnumValue {
            expected: "grid format",
            token: other.to_string(),
        }),
    }
}

/// Coordinate system type of a grid section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CoordinateType {
    Cartesian,
    Cylindrical,
}

/// Integer code of a coordinate type.
pub fn coordinate_type_code(coordinate_type: CoordinateType) -> i32 {
    match coordinate_type {
        CoordinateType::Cartesian => 0,
        CoordinateType::Cylindrical => 1,
    }
}

/// Parse a coordinate type code. Zero means cartesian, any non-zero value
/// cylindrical.
pub fn coordinate_type_from_code(code: i32) -> CoordinateType {
    if code == 0 {
        CoordinateType::Cartesian
    } else {
        CoordinateType::Cylindrical
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_TYPES: [TypeOfGrid; 4] = [
        TypeOfGrid::Composite,
        TypeOfGrid::CornerPoint,
        TypeOfGrid::Unstructured,
        TypeOfGrid::BlockCenter,
    ];

    #[test]
    fn canonical_codes_roundtrip() {
        for type_of_grid in ALL_TYPES {
            let code = type_of_grid_code(type_of_grid);
            assert_eq!(type_of_grid_from_code(code).unwrap(), type_of_grid);
        }
    }

    #[test]
    fn alternate_codes_roundtrip() {
        for type_of_grid in ALL_TYPES {
            let code = type_of_grid_alternate_code(type_of_grid);
            assert_eq!(
                type_of_grid_from_alternate_code(code).unwrap(),
                type_of_grid
            );
        }
    }

    #[test]
    fn encodings_are_distinct() {
        // Corner point is 0 in the alternate scheme but 1 canonically.
        assert_eq!(
            type_of_grid_from_alternate_code(0).unwrap(),
            TypeOfGrid::CornerPoint
        );
        assert_eq!(type_of_grid_alternate_code(TypeOfGrid::CornerPoint), 0);
        assert_eq!(type_of_grid_code(TypeOfGrid::CornerPoint), 1);
        assert_eq!(type_of_grid_from_code(0).unwrap(), TypeOfGrid::Composite);
    }

    #[test]
    fn out_of_range_codes_are_rejected() {
        assert!(type_of_grid_from_code(4).is_err());
        assert!(type_of_grid_from_alternate_code(-1).is_err());
        assert!(rock_model_from_code(3).is_err());
        assert!(grid_format_from_code(9).is_err());
    }

    #[test]
    fn coordinate_type_is_truthy() {
        assert_eq!(coordinate_type_from_code(0), CoordinateType::Cartesian);
        assert_eq!(coordinate_type_from_code(1), CoordinateType::Cylindrical);
        assert_eq!(coordinate_type_from_code(7), CoordinateType::Cylindrical);
    }

    #[test]
    fn model_types_serialize() {
        let json = serde_json::to_string(&TypeOfGrid::CornerPoint).expect("serialize");
        let round: TypeOfGrid = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(round, TypeOfGrid::CornerPoint);
    }
}
