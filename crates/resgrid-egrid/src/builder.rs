//! Building an [`EGrid`] from raw arrays.
//!
//! The builder takes geometry arrays already laid out in native flattened
//! order, LGR descriptors, and connectivity descriptors that reference LGRs
//! by name. It validates every array length against its grid's dimensions,
//! assigns 1-based ordinals to the LGRs in declaration order (ordinal 0 is
//! the global grid), resolves all name references, and produces a fully
//! formed immutable [`EGrid`] ready for encoding.

use std::collections::HashMap;

use tracing::{debug, trace};

use resgrid_model::{
    CoordinateType, GdOrient, GridFormat, GridUnit, MapAxes, RockModel, TypeOfGrid, Units,
};

use crate::error::{EGridError, Result};
use crate::header::{Filehead, GridHead, NncHead};
use crate::keyword;
use crate::sections::{
    AmalgamationSection, EGrid, EGridHead, GlobalGrid, LgrSection, NncEntry, NncSection,
    cell_count, coord_len, zcorn_len,
};

/// Raw corner point arrays of one grid, global or refined.
#[derive(Debug, Clone, PartialEq)]
pub struct GridGeometry {
    /// Cell counts (nx, ny, nz).
    pub dimensions: (usize, usize, usize),
    /// Corner line endpoints, flattened, length 6·(nx+1)·(ny+1).
    pub coord: Vec<f32>,
    /// Corner heights, flattened, length 8·nx·ny·nz.
    pub zcorn: Vec<f32>,
    /// Cell activity flags, length nx·ny·nz.
    pub actnum: Option<Vec<i32>>,
}

impl GridGeometry {
    /// Check every array length against the dimensions. Mismatches fail
    /// fast; arrays are never truncated or padded.
    pub fn validate(&self) -> Result<()> {
        check_len(keyword::COORD, coord_len(self.dimensions), self.coord.len())?;
        check_len(keyword::ZCORN, zcorn_len(self.dimensions), self.zcorn.len())?;
        if let Some(actnum) = &self.actnum {
            check_len(keyword::ACTNUM, cell_count(self.dimensions), actnum.len())?;
        }
        Ok(())
    }
}

fn check_len(kw: &'static str, expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(EGridError::InvalidArrayLength {
            keyword: kw,
            expected,
            actual,
        });
    }
    Ok(())
}

/// Descriptor of one local grid refinement.
#[derive(Debug, Clone, PartialEq)]
pub struct Lgr {
    pub geometry: GridGeometry,
    /// Name of the refinement, unique within the file.
    pub name: String,
    /// First refined cell in the host grid, 1-based (i, j, k).
    pub start: (i32, i32, i32),
    /// Last refined cell in the host grid, 1-based (i, j, k).
    pub end: (i32, i32, i32),
    pub coordinate_type: CoordinateType,
    /// Name of the parent refinement, if refining another LGR.
    pub parent: Option<String>,
    pub grid_parent: Option<String>,
    /// Host cell of each local cell, length nx·ny·nz.
    pub hostnum: Option<Vec<i32>>,
    pub boxorig: Option<(i32, i32, i32)>,
    pub coord_sys: Option<MapAxes>,
}

impl Lgr {
    /// A refinement with the given geometry, host-cell box and name; every
    /// optional field absent, cartesian coordinates.
    pub fn new(
        geometry: GridGeometry,
        name: impl Into<String>,
        start: (i32, i32, i32),
        end: (i32, i32, i32),
    ) -> Self {
        Self {
            geometry,
            name: name.into(),
            start,
            end,
            coordinate_type: CoordinateType::Cartesian,
            parent: None,
            grid_parent: None,
            hostnum: None,
            boxorig: None,
            coord_sys: None,
        }
    }
}

/// Descriptor of one non-neighbor connection set.
#[derive(Debug, Clone, PartialEq)]
pub struct Nnc {
    pub upstream: Vec<i32>,
    pub downstream: Vec<i32>,
    /// Owning LGR; `None` means the global grid.
    pub lgr_name: Option<String>,
    pub nncl: Option<Vec<i32>>,
    pub nncg: Option<Vec<i32>>,
}

/// Descriptor of one amalgamation between two LGRs.
#[derive(Debug, Clone, PartialEq)]
pub struct Amalgamation {
    pub lgr1_name: String,
    pub lgr2_name: String,
    pub lgr1_cells: Vec<i32>,
    pub lgr2_cells: Vec<i32>,
}

/// One connectivity descriptor, in file order.
#[derive(Debug, Clone, PartialEq)]
pub enum NncInput {
    Nnc(Nnc),
    Amalgamation(Amalgamation),
}

/// Derives a well-formed [`EGrid`] from raw arrays and named
/// cross-references.
///
/// ```
/// use resgrid_egrid::{EGridBuilder, GridGeometry};
///
/// let geometry = GridGeometry {
///     dimensions: (1, 1, 1),
///     coord: vec![0.0; 24],
///     zcorn: vec![0.0; 8],
///     actnum: None,
/// };
/// let grid = EGridBuilder::new(geometry).build().unwrap();
/// assert_eq!(grid.global_grid.grid_head.num_x, 1);
/// ```
#[derive(Debug, Clone)]
pub struct EGridBuilder {
    geometry: GridGeometry,
    coordinate_type: CoordinateType,
    coord_sys: Option<MapAxes>,
    boxorig: Option<(i32, i32, i32)>,
    corsnum: Option<Vec<i32>>,
    mapunits: Option<Units>,
    mapaxes: Option<MapAxes>,
    gridunit: Option<GridUnit>,
    gdorient: Option<GdOrient>,
    rock_model: RockModel,
    grid_format: GridFormat,
    version_number: i32,
    year: i32,
    version_bound: i32,
    lgrs: Vec<Lgr>,
    nncs: Vec<NncInput>,
}

impl EGridBuilder {
    pub fn new(geometry: GridGeometry) -> Self {
        Self {
            geometry,
            coordinate_type: CoordinateType::Cartesian,
            coord_sys: None,
            boxorig: None,
            corsnum: None,
            mapunits: None,
            mapaxes: None,
            gridunit: None,
            gdorient: None,
            rock_model: RockModel::SinglePermeabilityPorosity,
            grid_format: GridFormat::IrregularCornerPoint,
            version_number: 3,
            year: 2004,
            version_bound: 0,
            lgrs: Vec::new(),
            nncs: Vec::new(),
        }
    }

    pub fn with_coordinate_type(mut self, coordinate_type: CoordinateType) -> Self {
        self.coordinate_type = coordinate_type;
        self
    }

    pub fn with_coord_sys(mut self, coord_sys: MapAxes) -> Self {
        self.coord_sys = Some(coord_sys);
        self
    }

    pub fn with_boxorig(mut self, boxorig: (i32, i32, i32)) -> Self {
        self.boxorig = Some(boxorig);
        self
    }

    pub fn with_corsnum(mut self, corsnum: Vec<i32>) -> Self {
        self.corsnum = Some(corsnum);
        self
    }

    pub fn with_mapunits(mut self, mapunits: Units) -> Self {
        self.mapunits = Some(mapunits);
        self
    }

    pub fn with_mapaxes(mut self, mapaxes: MapAxes) -> Self {
        self.mapaxes = Some(mapaxes);
        self
    }

    pub fn with_gridunit(mut self, gridunit: GridUnit) -> Self {
        self.gridunit = Some(gridunit);
        self
    }

    pub fn with_gdorient(mut self, gdorient: GdOrient) -> Self {
        self.gdorient = Some(gdorient);
        self
    }

    pub fn with_rock_model(mut self, rock_model: RockModel) -> Self {
        self.rock_model = rock_model;
        self
    }

    pub fn with_grid_format(mut self, grid_format: GridFormat) -> Self {
        self.grid_format = grid_format;
        self
    }

    pub fn with_version(mut self, version_number: i32, year: i32, version_bound: i32) -> Self {
        self.version_number = version_number;
        self.year = year;
        self.version_bound = version_bound;
        self
    }

    pub fn with_lgr(mut self, lgr: Lgr) -> Self {
        self.lgrs.push(lgr);
        self
    }

    pub fn with_nnc(mut self, nnc: Nnc) -> Self {
        self.nncs.push(NncInput::Nnc(nnc));
        self
    }

    pub fn with_amalgamation(mut self, amalgamation: Amalgamation) -> Self {
        self.nncs.push(NncInput::Amalgamation(amalgamation));
        self
    }

    /// Validate all descriptors, resolve name references and assemble the
    /// grid.
    pub fn build(self) -> Result<EGrid> {
        self.geometry.validate()?;

        // Ordinal 0 is the global grid; LGRs get 1..n in declaration order.
        let mut ordinals: HashMap<String, i32> = HashMap::new();
        for (idx, lgr) in self.lgrs.iter().enumerate() {
            let ordinal = (idx + 1) as i32;
            if ordinals.insert(lgr.name.clone(), ordinal).is_some() {
                return Err(EGridError::DuplicateLgrName {
                    name: lgr.name.clone(),
                });
            }
            trace!(name = %lgr.name, ordinal, "assigned lgr ordinal");
        }
        let resolve = |name: &str| -> Result<i32> {
            ordinals
                .get(name)
                .copied()
                .ok_or_else(|| EGridError::UnknownLgrName {
                    name: name.to_string(),
                })
        };

        let mut lgr_sections = Vec::with_capacity(self.lgrs.len());
        for (idx, lgr) in self.lgrs.into_iter().enumerate() {
            lgr.geometry.validate()?;
            if let Some(hostnum) = &lgr.hostnum {
                check_len(
                    keyword::HOSTNUM,
                    cell_count(lgr.geometry.dimensions),
                    hostnum.len(),
                )?;
            }
            if let Some(parent) = &lgr.parent {
                resolve(parent)?;
            }
            if let Some(grid_parent) = &lgr.grid_parent {
                resolve(grid_parent)?;
            }
            let dims = lgr.geometry.dimensions;
            lgr_sections.push(LgrSection {
                name: lgr.name,
                grid_head: grid_head(
                    dims,
                    (idx + 1) as i32,
                    lgr.coordinate_type,
                    lgr.start,
                    lgr.end,
                ),
                coord: lgr.geometry.coord,
                zcorn: lgr.geometry.zcorn,
                actnum: lgr.geometry.actnum,
                parent: lgr.parent,
                grid_parent: lgr.grid_parent,
                hostnum: lgr.hostnum,
                boxorig: lgr.boxorig,
                coord_sys: lgr.coord_sys,
            });
        }

        let mut nnc_sections = Vec::with_capacity(self.nncs.len());
        for input in self.nncs {
            nnc_sections.push(match input {
                NncInput::Nnc(nnc) => {
                    check_len(keyword::NNC2, nnc.upstream.len(), nnc.downstream.len())?;
                    let grid_identifier = match &nnc.lgr_name {
                        Some(name) => resolve(name)?,
                        None => 0,
                    };
                    NncEntry::Nnc(NncSection {
                        nnchead: NncHead {
                            num_nnc: nnc.upstream.len() as i32,
                            grid_identifier,
                        },
                        upstream_nnc: nnc.upstream,
                        downstream_nnc: nnc.downstream,
                        nncl: nnc.nncl,
                        nncg: nnc.nncg,
                    })
                }
                NncInput::Amalgamation(amalgamation) => {
                    check_len(
                        keyword::NNA2,
                        amalgamation.lgr1_cells.len(),
                        amalgamation.lgr2_cells.len(),
                    )?;
                    NncEntry::Amalgamation(AmalgamationSection {
                        lgr_idxs: (
                            resolve(&amalgamation.lgr1_name)?,
                            resolve(&amalgamation.lgr2_name)?,
                        ),
                        nna1: amalgamation.lgr1_cells,
                        nna2: amalgamation.lgr2_cells,
                    })
                }
            });
        }

        debug!(
            lgrs = lgr_sections.len(),
            connectivity = nnc_sections.len(),
            "built egrid"
        );
        Ok(EGrid {
            egrid_head: EGridHead {
                file_head: Filehead {
                    version_number: self.version_number,
                    year: self.year,
                    version_bound: self.version_bound,
                    type_of_grid: TypeOfGrid::CornerPoint,
                    rock_model: self.rock_model,
                    grid_format: self.grid_format,
                },
                mapunits: self.mapunits,
                mapaxes: self.mapaxes,
                gridunit: self.gridunit,
                gdorient: self.gdorient,
            },
            global_grid: GlobalGrid {
                grid_head: grid_head(
                    self.geometry.dimensions,
                    0,
                    self.coordinate_type,
                    (0, 0, 0),
                    (0, 0, 0),
                ),
                coord: self.geometry.coord,
                zcorn: self.geometry.zcorn,
                actnum: self.geometry.actnum,
                coord_sys: self.coord_sys,
                boxorig: self.boxorig,
                corsnum: self.corsnum,
            },
            lgr_sections,
            nnc_sections,
        })
    }
}

fn grid_head(
    dimensions: (usize, usize, usize),
    grid_reference_number: i32,
    coordinate_type: CoordinateType,
    lgr_start: (i32, i32, i32),
    lgr_end: (i32, i32, i32),
) -> GridHead {
    GridHead {
        type_of_grid: TypeOfGrid::CornerPoint,
        num_x: dimensions.0 as i32,
        num_y: dimensions.1 as i32,
        num_z: dimensions.2 as i32,
        grid_reference_number,
        numres: 1,
        nseg: 1,
        coordinate_type,
        lgr_start,
        lgr_end,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry(dims: (usize, usize, usize)) -> GridGeometry {
        GridGeometry {
            dimensions: dims,
            coord: vec![0.0; coord_len(dims)],
            zcorn: vec![0.0; zcorn_len(dims)],
            actnum: None,
        }
    }

    fn lgr(name: &str) -> Lgr {
        let dims = (2, 2, 2);
        let mut lgr = Lgr::new(geometry(dims), name, (1, 1, 1), (2, 2, 2));
        lgr.hostnum = Some(vec![1; cell_count(dims)]);
        lgr
    }

    #[test]
    fn test_builds_single_grid() {
        let grid = EGridBuilder::new(geometry((2, 3, 4))).build().unwrap();
        assert_eq!(grid.global_grid.grid_head.dimensions(), (2, 3, 4));
        assert_eq!(grid.global_grid.grid_head.grid_reference_number, 0);
        assert_eq!(grid.egrid_head.file_head.year, 2004);
    }

    #[test]
    fn test_assigns_lgr_ordinals_in_declaration_order() {
        let grid = EGridBuilder::new(geometry((2, 2, 2)))
            .with_lgr(lgr("A"))
            .with_lgr(lgr("B"))
            .with_amalgamation(Amalgamation {
                lgr1_name: "A".to_string(),
                lgr2_name: "B".to_string(),
                lgr1_cells: vec![1, 2],
                lgr2_cells: vec![3, 4],
            })
            .build()
            .unwrap();
        assert_eq!(grid.lgr_sections[0].grid_head.grid_reference_number, 1);
        assert_eq!(grid.lgr_sections[1].grid_head.grid_reference_number, 2);
        let NncEntry::Amalgamation(amalgamation) = &grid.nnc_sections[0] else {
            panic!("expected amalgamation entry");
        };
        assert_eq!(amalgamation.lgr_idxs, (1, 2));
    }

    #[test]
    fn test_undeclared_lgr_name_is_rejected() {
        let err = EGridBuilder::new(geometry((2, 2, 2)))
            .with_lgr(lgr("A"))
            .with_lgr(lgr("B"))
            .with_amalgamation(Amalgamation {
                lgr1_name: "A".to_string(),
                lgr2_name: "C".to_string(),
                lgr1_cells: vec![1],
                lgr2_cells: vec![2],
            })
            .build()
            .unwrap_err();
        assert!(matches!(err, EGridError::UnknownLgrName { name } if name == "C"));
    }

    #[test]
    fn test_duplicate_lgr_name_is_rejected() {
        let err = EGridBuilder::new(geometry((2, 2, 2)))
            .with_lgr(lgr("A"))
            .with_lgr(lgr("A"))
            .build()
            .unwrap_err();
        assert!(matches!(err, EGridError::DuplicateLgrName { name } if name == "A"));
    }

    #[test]
    fn test_nnc_owner_resolves_to_ordinal() {
        let grid = EGridBuilder::new(geometry((2, 2, 2)))
            .with_lgr(lgr("A"))
            .with_nnc(Nnc {
                upstream: vec![1, 2],
                downstream: vec![3, 4],
                lgr_name: Some("A".to_string()),
                nncl: None,
                nncg: None,
            })
            .build()
            .unwrap();
        let NncEntry::Nnc(nnc) = &grid.nnc_sections[0] else {
            panic!("expected nnc entry");
        };
        assert_eq!(nnc.nnchead.num_nnc, 2);
        assert_eq!(nnc.nnchead.grid_identifier, 1);
    }

    #[test]
    fn test_array_length_mismatch_fails_fast() {
        let mut bad = geometry((2, 2, 2));
        bad.zcorn.pop();
        let err = EGridBuilder::new(bad).build().unwrap_err();
        assert!(matches!(
            err,
            EGridError::InvalidArrayLength {
                keyword: "ZCORN",
                ..
            }
        ));

        let mut bad_actnum = geometry((2, 2, 2));
        bad_actnum.actnum = Some(vec![1; 7]);
        assert!(EGridBuilder::new(bad_actnum).build().is_err());
    }

    #[test]
    fn test_mismatched_nnc_arrays_are_rejected() {
        let err = EGridBuilder::new(geometry((2, 2, 2)))
            .with_nnc(Nnc {
                upstream: vec![1, 2],
                downstream: vec![3],
                lgr_name: None,
                nncl: None,
                nncg: None,
            })
            .build()
            .unwrap_err();
        assert!(matches!(err, EGridError::InvalidArrayLength { .. }));
    }
}
