//! File sections of the EGRID format.
//!
//! An EGRID file is a header section, one global grid section, then any
//! number of LGR and connectivity subsections. Each section type here maps
//! 1-to-1 onto a run of keywords in the file, and an [`EGrid`] holds the
//! sections in file order, so a decoded grid can be re-encoded without
//! restructuring.
//!
//! # Corner point geometry
//!
//! The grid sections describe a corner point geometry of nx·ny·nz cells.
//! For every pillar of the (nx+1)·(ny+1) pillar lattice there is a straight
//! corner line; COORD stores its top and bottom (x, y, z) endpoints, six
//! floats per line. ZCORN stores, for each cell, the eight heights at which
//! the cell's corners intersect their corner lines. ACTNUM stores one
//! activity flag per cell: 0 inactive, 1 active; dual-porosity and thermal
//! runs use 2 and 3 for matrix/fracture and rock-volume/pore-volume
//! refinements. All three arrays are flattened in the file's native column
//! order, giving the length invariants
//!
//! - coord:  6·(nx+1)·(ny+1)
//! - zcorn:  8·nx·ny·nz
//! - actnum: nx·ny·nz

use resgrid_model::{GdOrient, GridUnit, MapAxes, Units};

use crate::header::{Filehead, GridHead, NncHead};

/// Expected COORD length for the given dimensions.
pub fn coord_len(dimensions: (usize, usize, usize)) -> usize {
    6 * (dimensions.0 + 1) * (dimensions.1 + 1)
}

/// Expected ZCORN length for the given dimensions.
pub fn zcorn_len(dimensions: (usize, usize, usize)) -> usize {
    8 * dimensions.0 * dimensions.1 * dimensions.2
}

/// Expected ACTNUM (and HOSTNUM) length for the given dimensions.
pub fn cell_count(dimensions: (usize, usize, usize)) -> usize {
    dimensions.0 * dimensions.1 * dimensions.2
}

/// The header section, once at the start of every file.
#[derive(Debug, Clone, PartialEq)]
pub struct EGridHead {
    pub file_head: Filehead,
    pub mapunits: Option<Units>,
    pub mapaxes: Option<MapAxes>,
    pub gridunit: Option<GridUnit>,
    pub gdorient: Option<GdOrient>,
}

/// The global grid section: the corner point layout of the grid without
/// refinements, plus the optional coarsening partition (CORSNUM).
#[derive(Debug, Clone, PartialEq)]
pub struct GlobalGrid {
    pub grid_head: GridHead,
    pub coord: Vec<f32>,
    pub zcorn: Vec<f32>,
    pub actnum: Option<Vec<i32>>,
    pub coord_sys: Option<MapAxes>,
    pub boxorig: Option<(i32, i32, i32)>,
    pub corsnum: Option<Vec<i32>>,
}

/// One LGR (local grid refinement) section: a finer corner point grid over
/// part of the global grid.
///
/// `hostnum` maps each local cell to the global cell hosting it. `parent`
/// and `grid_parent` name the refined LGR's parents; both are absent for a
/// refinement of the global grid.
#[derive(Debug, Clone, PartialEq)]
pub struct LgrSection {
    pub name: String,
    pub grid_head: GridHead,
    pub coord: Vec<f32>,
    pub zcorn: Vec<f32>,
    pub actnum: Option<Vec<i32>>,
    pub parent: Option<String>,
    pub grid_parent: Option<String>,
    pub hostnum: Option<Vec<i32>>,
    pub boxorig: Option<(i32, i32, i32)>,
    pub coord_sys: Option<MapAxes>,
}

/// One NNC section: non-neighbor connections within one grid.
///
/// `upstream_nnc` and `downstream_nnc` are equal-length cell index arrays;
/// connection i links `upstream_nnc[i]` to `downstream_nnc[i]`. The
/// optional `nncl`/`nncg` pair connects LGR cells to global cells.
#[derive(Debug, Clone, PartialEq)]
pub struct NncSection {
    pub nnchead: NncHead,
    pub upstream_nnc: Vec<i32>,
    pub downstream_nnc: Vec<i32>,
    pub nncl: Option<Vec<i32>>,
    pub nncg: Option<Vec<i32>>,
}

/// One amalgamation section: connections between the cells of two LGRs.
///
/// `lgr_idxs` holds the 1-based ordinals of the two amalgamated LGRs;
/// `nna1`/`nna2` are the connected cell indices in the first and second.
#[derive(Debug, Clone, PartialEq)]
pub struct AmalgamationSection {
    pub lgr_idxs: (i32, i32),
    pub nna1: Vec<i32>,
    pub nna2: Vec<i32>,
}

/// One entry of the connectivity subsection list.
///
/// NNC and amalgamation subsections occur interleaved in the file, so they
/// are kept as one list of tagged entries rather than two lists; the tag
/// records which keyword opened the subsection.
#[derive(Debug, Clone, PartialEq)]
pub enum NncEntry {
    Nnc(NncSection),
    Amalgamation(AmalgamationSection),
}

/// All the data of an EGRID file.
///
/// An `EGrid` is an immutable value: it is produced whole by
/// [`decode`](crate::decode) or [`EGridBuilder`](crate::EGridBuilder), and
/// consumed by [`encode`](crate::encode). LGR sections and connectivity
/// entries keep their file order.
#[derive(Debug, Clone, PartialEq)]
pub struct EGrid {
    pub egrid_head: EGridHead,
    pub global_grid: GlobalGrid,
    pub lgr_sections: Vec<LgrSection>,
    pub nnc_sections: Vec<NncEntry>,
}

impl EGrid {
    /// A single-grid EGrid with default header settings.
    ///
    /// Produces a corner point grid of the given dimensions with a
    /// metres/origin-relative GRIDUNIT and no refinements or connectivity.
    /// Array lengths are validated against the dimensions.
    pub fn default_settings_grid(
        coord: Vec<f32>,
        zcorn: Vec<f32>,
        actnum: Option<Vec<i32>>,
        dimensions: (usize, usize, usize),
    ) -> crate::error::Result<EGrid> {
        use resgrid_model::{CoordinateType, GridFormat, RockModel, TypeOfGrid};

        let geometry = crate::builder::GridGeometry {
            dimensions,
            coord,
            zcorn,
            actnum,
        };
        geometry.validate()?;
        let grid_head = GridHead {
            type_of_grid: TypeOfGrid::CornerPoint,
            num_x: dimensions.0 as i32,
            num_y: dimensions.1 as i32,
            num_z: dimensions.2 as i32,
            grid_reference_number: 1,
            numres: 1,
            nseg: 1,
            coordinate_type: CoordinateType::Cartesian,
            lgr_start: (0, 0, 0),
            lgr_end: (0, 0, 0),
        };
        Ok(EGrid {
            egrid_head: EGridHead {
                file_head: Filehead {
                    version_number: 3,
                    year: 2007,
                    version_bound: 3,
                    type_of_grid: TypeOfGrid::CornerPoint,
                    rock_model: RockModel::SinglePermeabilityPorosity,
                    grid_format: GridFormat::IrregularCornerPoint,
                },
                mapunits: None,
                mapaxes: None,
                gridunit: Some(GridUnit::default()),
                gdorient: None,
            },
            global_grid: GlobalGrid {
                grid_head,
                coord: geometry.coord,
                zcorn: geometry.zcorn,
                actnum: geometry.actnum,
                coord_sys: None,
                boxorig: None,
                corsnum: None,
            },
            lgr_sections: Vec::new(),
            nnc_sections: Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_array_length_invariants() {
        assert_eq!(coord_len((2, 3, 4)), 6 * 3 * 4);
        assert_eq!(zcorn_len((2, 3, 4)), 8 * 24);
        assert_eq!(cell_count((2, 3, 4)), 24);
    }

    #[test]
    fn test_default_settings_grid() {
        let dims = (1, 1, 1);
        let grid = EGrid::default_settings_grid(
            vec![0.0; coord_len(dims)],
            vec![0.0; zcorn_len(dims)],
            None,
            dims,
        )
        .unwrap();
        assert_eq!(grid.egrid_head.file_head.year, 2007);
        assert_eq!(grid.egrid_head.gridunit, Some(GridUnit::default()));
        assert_eq!(grid.global_grid.grid_head.num_x, 1);
        assert!(grid.lgr_sections.is_empty());
        assert!(grid.nnc_sections.is_empty());
    }

    #[test]
    fn test_default_settings_grid_validates_lengths() {
        let result = EGrid::default_settings_grid(vec![0.0; 3], vec![0.0; 8], None, (1, 1, 1));
        assert!(result.is_err());
    }
}
