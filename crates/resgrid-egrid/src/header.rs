//! Fixed-width header frames.
//!
//! FILEHEAD, GRIDHEAD and NNCHEAD carry their fields at fixed offsets inside
//! integer frames that are longer than the used portion; unused slots are
//! written as zero. Decoding accepts any frame at least as long as the last
//! used offset, encoding always emits the full frame.

use resgrid_model::grid::{
    coordinate_type_code, coordinate_type_from_code, grid_format_code, grid_format_from_code,
    rock_model_code, rock_model_from_code, type_of_grid_alternate_code, type_of_grid_code,
    type_of_grid_from_alternate_code, type_of_grid_from_code,
};
use resgrid_model::{CoordinateType, GridFormat, GridValueError, RockModel, TypeOfGrid};

use crate::keyword;

/// Full frame length of the FILEHEAD and GRIDHEAD keywords.
pub const HEAD_FRAME_LEN: usize = 100;

/// Full frame length of the NNCHEAD keyword.
pub const NNC_HEAD_FRAME_LEN: usize = 10;

/// The FILEHEAD keyword, first in every EGRID file.
///
/// # Frame layout
///
/// | Slot | Field          | Notes                                 |
/// |------|----------------|---------------------------------------|
/// | 0    | version_number |                                       |
/// | 1    | year           | Release year of the writing simulator |
/// | 3    | version_bound  |                                       |
/// | 4    | type_of_grid   | Alternate encoding, not canonical     |
/// | 5    | rock_model     |                                       |
/// | 6    | grid_format    |                                       |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Filehead {
    pub version_number: i32,
    pub year: i32,
    pub version_bound: i32,
    pub type_of_grid: TypeOfGrid,
    pub rock_model: RockModel,
    pub grid_format: GridFormat,
}

impl Filehead {
    /// Decode a FILEHEAD frame, which must contain at least 7 values.
    pub fn from_values(values: &[i32]) -> Result<Self, GridValueError> {
        if values.len() < 7 {
            return Err(GridValueError::TooFewValues {
                keyword: keyword::FILEHEAD,
                got: values.len(),
                expected: 7,
            });
        }
        Ok(Self {
            version_number: values[0],
            year: values[1],
            version_bound: values[3],
            type_of_grid: type_of_grid_from_alternate_code(values[4])?,
            rock_model: rock_model_from_code(values[5])?,
            grid_format: grid_format_from_code(values[6])?,
        })
    }

    /// Encode as a full 100-slot frame with unused slots zeroed.
    pub fn to_values(&self) -> Vec<i32> {
        let mut frame = vec![0; HEAD_FRAME_LEN];
        frame[0] = self.version_number;
        frame[1] = self.year;
        frame[3] = self.version_bound;
        frame[4] = type_of_grid_alternate_code(self.type_of_grid);
        frame[5] = rock_model_code(self.rock_model);
        frame[6] = grid_format_code(self.grid_format);
        frame
    }
}

/// The GRIDHEAD keyword, which opens the grid layout of both the global grid
/// and each LGR section.
///
/// # Frame layout
///
/// | Slot  | Field                 | Notes                          |
/// |-------|-----------------------|--------------------------------|
/// | 0     | type_of_grid          | Canonical encoding             |
/// | 1-3   | num_x, num_y, num_z   |                                |
/// | 4     | grid_reference_number | 0 global, LGR ordinal otherwise|
/// | 24    | numres                |                                |
/// | 25    | nseg                  |                                |
/// | 26    | coordinate_type       | 0 cartesian, else cylindrical  |
/// | 27-29 | lgr_start             |                                |
/// | 30-32 | lgr_end               |                                |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridHead {
    pub type_of_grid: TypeOfGrid,
    pub num_x: i32,
    pub num_y: i32,
    pub num_z: i32,
    pub grid_reference_number: i32,
    pub numres: i32,
    pub nseg: i32,
    pub coordinate_type: CoordinateType,
    pub lgr_start: (i32, i32, i32),
    pub lgr_end: (i32, i32, i32),
}

impl GridHead {
    /// Decode a GRIDHEAD frame, which must contain at least 33 values.
    pub fn from_values(values: &[i32]) -> Result<Self, GridValueError> {
        if values.len() < 33 {
            return Err(GridValueError::TooFewValues {
                keyword: keyword::GRIDHEAD,
                got: values.len(),
                expected: 33,
            });
        }
        Ok(Self {
            type_of_grid: type_of_grid_from_code(values[0])?,
            num_x: values[1],
            num_y: values[2],
            num_z: values[3],
            grid_reference_number: values[4],
            numres: values[24],
            nseg: values[25],
            coordinate_type: coordinate_type_from_code(values[26]),
            lgr_start: (values[27], values[28], values[29]),
            lgr_end: (values[30], values[31], values[32]),
        })
    }

    /// Encode as a full 100-slot frame with unused slots zeroed.
    pub fn to_values(&self) -> Vec<i32> {
        let mut frame = vec![0; HEAD_FRAME_LEN];
        frame[0] = type_of_grid_code(self.type_of_grid);
        frame[1] = self.num_x;
        frame[2] = self.num_y;
        frame[3] = self.num_z;
        frame[4] = self.grid_reference_number;
        frame[24] = self.numres;
        frame[25] = self.nseg;
        frame[26] = coordinate_type_code(self.coordinate_type);
        frame[27] = self.lgr_start.0;
        frame[28] = self.lgr_start.1;
        frame[29] = self.lgr_start.2;
        frame[30] = self.lgr_end.0;
        frame[31] = self.lgr_end.1;
        frame[32] = self.lgr_end.2;
        frame
    }

    /// Grid dimensions (nx, ny, nz).
    pub fn dimensions(&self) -> (usize, usize, usize) {
        (
            self.num_x as usize,
            self.num_y as usize,
            self.num_z as usize,
        )
    }
}

/// The NNCHEAD keyword: connection count and owning grid of an NNC section.
///
/// The grid identifier is 0 for the global grid, otherwise the 1-based
/// ordinal of the owning LGR.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NncHead {
    pub num_nnc: i32,
    pub grid_identifier: i32,
}

impl NncHead {
    /// Decode an NNCHEAD frame, which must contain at least 2 values.
    pub fn from_values(values: &[i32]) -> Result<Self, GridValueError> {
        if values.len() < 2 {
            return Err(GridValueError::TooFewValues {
                keyword: keyword::NNCHEAD,
                got: values.len(),
                expected: 2,
            });
        }
        Ok(Self {
            num_nnc: values[0],
            grid_identifier: values[1],
        })
    }

    /// Encode as a full 10-slot frame with unused slots zeroed.
    pub fn to_values(&self) -> Vec<i32> {
        let mut frame = vec![0; NNC_HEAD_FRAME_LEN];
        frame[0] = self.num_nnc;
        frame[1] = self.grid_identifier;
        frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_filehead() -> Filehead {
        Filehead {
            version_number: 3,
            year: 2007,
            version_bound: 2,
            type_of_grid: TypeOfGrid::CornerPoint,
            rock_model: RockModel::DualPorosity,
            grid_format: GridFormat::IrregularCornerPoint,
        }
    }

    #[test]
    fn test_filehead_roundtrip() {
        let head = sample_filehead();
        assert_eq!(Filehead::from_values(&head.to_values()).unwrap(), head);
    }

    #[test]
    fn test_filehead_uses_alternate_grid_type_slot() {
        // Corner point is 0 in the FILEHEAD scheme.
        let frame = sample_filehead().to_values();
        assert_eq!(frame.len(), HEAD_FRAME_LEN);
        assert_eq!(frame[4], 0);

        let mut frame = vec![0; HEAD_FRAME_LEN];
        frame[4] = 2;
        let head = Filehead::from_values(&frame).unwrap();
        assert_eq!(head.type_of_grid, TypeOfGrid::Composite);
    }

    #[test]
    fn test_filehead_too_few_values() {
        let err = Filehead::from_values(&[]).unwrap_err();
        assert!(matches!(
            err,
            GridValueError::TooFewValues { expected: 7, .. }
        ));
        assert!(Filehead::from_values(&[0; 6]).is_err());
        assert!(Filehead::from_values(&[0; 7]).is_ok());
    }

    #[test]
    fn test_gridhead_roundtrip() {
        let head = GridHead {
            type_of_grid: TypeOfGrid::CornerPoint,
            num_x: 4,
            num_y: 5,
            num_z: 6,
            grid_reference_number: 1,
            numres: 1,
            nseg: 1,
            coordinate_type: CoordinateType::Cylindrical,
            lgr_start: (1, 2, 3),
            lgr_end: (4, 5, 6),
        };
        let frame = head.to_values();
        assert_eq!(frame.len(), HEAD_FRAME_LEN);
        assert_eq!(GridHead::from_values(&frame).unwrap(), head);
    }

    #[test]
    fn test_gridhead_too_few_values() {
        let err = GridHead::from_values(&[0; 32]).unwrap_err();
        assert!(matches!(
            err,
            GridValueError::TooFewValues { expected: 33, .. }
        ));
        assert!(GridHead::from_values(&[0; 33]).is_ok());
    }

    #[test]
    fn test_nnchead_roundtrip() {
        let head = NncHead {
            num_nnc: 7,
            grid_identifier: 2,
        };
        let frame = head.to_values();
        assert_eq!(frame.len(), NNC_HEAD_FRAME_LEN);
        assert_eq!(NncHead::from_values(&frame).unwrap(), head);
        assert!(NncHead::from_values(&[1]).is_err());
    }
}
