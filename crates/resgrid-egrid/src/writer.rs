//! EGRID encoding.
//!
//! Each section assembles its records in one fixed canonical keyword order;
//! optional keywords are emitted only when present, mandatory trailers
//! (ENDGRID, ENDLGR) always. The top level concatenates header, global
//! grid, LGR sections and connectivity entries exactly in the order the
//! [`EGrid`] holds them; nothing is resorted.
//!
//! Decoding accepts optional keywords in any relative order, encoding emits
//! the one canonical order. The asymmetry is deliberate: it makes a second
//! encode of a decoded file reproduce the first encode byte for byte.

use resgrid_model::units::units_token;

use crate::error::Result;
use crate::keyword::{self, pad_keyword};
use crate::record::{RecordSink, RecordValues};
use crate::sections::{
    AmalgamationSection, EGrid, EGridHead, GlobalGrid, LgrSection, NncEntry, NncSection,
};

/// One section's records in canonical keyword order.
type Records = Vec<(&'static str, RecordValues)>;

fn ascii_record(value: &str) -> RecordValues {
    RecordValues::Ascii(vec![value.to_string()])
}

fn triple_record(triple: (i32, i32, i32)) -> RecordValues {
    RecordValues::Int(vec![triple.0, triple.1, triple.2])
}

impl EGridHead {
    fn to_records(&self) -> Records {
        let mut records = vec![(
            keyword::FILEHEAD,
            RecordValues::Int(self.file_head.to_values()),
        )];
        if let Some(mapunits) = self.mapunits {
            records.push((keyword::MAPUNITS, ascii_record(units_token(mapunits))));
        }
        if let Some(mapaxes) = self.mapaxes {
            records.push((keyword::MAPAXES, RecordValues::Float(mapaxes.to_values())));
        }
        if let Some(gridunit) = self.gridunit {
            records.push((keyword::GRIDUNIT, RecordValues::Ascii(gridunit.to_values())));
        }
        if let Some(gdorient) = self.gdorient {
            records.push((keyword::GDORIENT, RecordValues::Ascii(gdorient.to_values())));
        }
        records
    }
}

impl GlobalGrid {
    fn to_records(&self) -> Records {
        let mut records = vec![(
            keyword::GRIDHEAD,
            RecordValues::Int(self.grid_head.to_values()),
        )];
        if let Some(boxorig) = self.boxorig {
            records.push((keyword::BOXORIG, triple_record(boxorig)));
        }
        records.push((keyword::COORD, RecordValues::Float(self.coord.clone())));
        if let Some(coord_sys) = self.coord_sys {
            records.push((keyword::COORDSYS, RecordValues::Float(coord_sys.to_values())));
        }
        records.push((keyword::ZCORN, RecordValues::Float(self.zcorn.clone())));
        if let Some(actnum) = &self.actnum {
            records.push((keyword::ACTNUM, RecordValues::Int(actnum.clone())));
        }
        if let Some(corsnum) = &self.corsnum {
            records.push((keyword::CORSNUM, RecordValues::Int(corsnum.clone())));
        }
        records.push((keyword::ENDGRID, RecordValues::Int(Vec::new())));
        records
    }
}

impl LgrSection {
    fn to_records(&self) -> Records {
        let mut records = vec![(keyword::LGR, ascii_record(&self.name))];
        if let Some(parent) = &self.parent {
            records.push((keyword::LGRPARNT, ascii_record(parent)));
        }
        if let Some(grid_parent) = &self.grid_parent {
            records.push((keyword::LGRSGRID, ascii_record(grid_parent)));
        }
        records.push((
            keyword::GRIDHEAD,
            RecordValues::Int(self.grid_head.to_values()),
        ));
        if let Some(boxorig) = self.boxorig {
            records.push((keyword::BOXORIG, triple_record(boxorig)));
        }
        records.push((keyword::COORD, RecordValues::Float(self.coord.clone())));
        if let Some(coord_sys) = self.coord_sys {
            records.push((keyword::COORDSYS, RecordValues::Float(coord_sys.to_values())));
        }
        records.push((keyword::ZCORN, RecordValues::Float(self.zcorn.clone())));
        if let Some(actnum) = &self.actnum {
            records.push((keyword::ACTNUM, RecordValues::Int(actnum.clone())));
        }
        if let Some(hostnum) = &self.hostnum {
            records.push((keyword::HOSTNUM, RecordValues::Int(hostnum.clone())));
        }
        records.push((keyword::ENDGRID, RecordValues::Int(Vec::new())));
        records.push((keyword::ENDLGR, RecordValues::Int(Vec::new())));
        records
    }
}

impl NncSection {
    fn to_records(&self) -> Records {
        let mut records = vec![
            (keyword::NNCHEAD, RecordValues::Int(self.nnchead.to_values())),
            (keyword::NNC1, RecordValues::Int(self.upstream_nnc.clone())),
            (keyword::NNC2, RecordValues::Int(self.downstream_nnc.clone())),
        ];
        if let Some(nncl) = &self.nncl {
            records.push((keyword::NNCL, RecordValues::Int(nncl.clone())));
        }
        if let Some(nncg) = &self.nncg {
            records.push((keyword::NNCG, RecordValues::Int(nncg.clone())));
        }
        records
    }
}

impl AmalgamationSection {
    fn to_records(&self) -> Records {
        vec![
            (
                keyword::NNCHEADA,
                RecordValues::Int(vec![self.lgr_idxs.0, self.lgr_idxs.1]),
            ),
            (keyword::NNA1, RecordValues::Int(self.nna1.clone())),
            (keyword::NNA2, RecordValues::Int(self.nna2.clone())),
        ]
    }
}

impl EGrid {
    /// All records of the grid, in file order.
    pub(crate) fn to_records(&self) -> Records {
        let mut records = self.egrid_head.to_records();
        records.extend(self.global_grid.to_records());
        for lgr in &self.lgr_sections {
            records.extend(lgr.to_records());
        }
        for entry in &self.nnc_sections {
            match entry {
                NncEntry::Nnc(section) => records.extend(section.to_records()),
                NncEntry::Amalgamation(section) => records.extend(section.to_records()),
            }
        }
        records
    }

    /// Encode the grid to a record sink. See [`encode`].
    pub fn write_to<W: RecordSink>(&self, sink: &mut W) -> Result<()> {
        encode(self, sink)
    }
}

/// Encode an [`EGrid`] as an ordered record sequence.
///
/// Keywords are handed to the sink padded to their 8-character stream form;
/// coord/zcorn payloads are 32-bit floats, index and flag arrays 32-bit
/// integers.
pub fn encode<W: RecordSink>(grid: &EGrid, sink: &mut W) -> Result<()> {
    for (kw, values) in grid.to_records() {
        sink.put_record(&pad_keyword(kw), &values)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::{GridHead, NncHead};
    use resgrid_model::{CoordinateType, TypeOfGrid};

    fn grid_head(dims: (i32, i32, i32)) -> GridHead {
        GridHead {
            type_of_grid: TypeOfGrid::CornerPoint,
            num_x: dims.0,
            num_y: dims.1,
            num_z: dims.2,
            grid_reference_number: 0,
            numres: 1,
            nseg: 1,
            coordinate_type: CoordinateType::Cartesian,
            lgr_start: (0, 0, 0),
            lgr_end: (0, 0, 0),
        }
    }

    #[test]
    fn test_lgr_canonical_order() {
        let section = LgrSection {
            name: "LGR1".to_string(),
            grid_head: grid_head((1, 1, 1)),
            coord: vec![0.0; 24],
            zcorn: vec![0.0; 8],
            actnum: Some(vec![1]),
            parent: Some("GLOBAL".to_string()),
            grid_parent: None,
            hostnum: Some(vec![1]),
            boxorig: Some((1, 1, 1)),
            coord_sys: None,
        };
        let order: Vec<&str> = section.to_records().iter().map(|(kw, _)| *kw).collect();
        assert_eq!(
            order,
            vec![
                "LGR", "LGRPARNT", "GRIDHEAD", "BOXORIG", "COORD", "ZCORN", "ACTNUM", "HOSTNUM",
                "ENDGRID", "ENDLGR",
            ]
        );
    }

    #[test]
    fn test_trailers_emitted_even_when_optional_fields_absent() {
        let grid = GlobalGrid {
            grid_head: grid_head((1, 1, 1)),
            coord: vec![0.0; 24],
            zcorn: vec![0.0; 8],
            actnum: None,
            coord_sys: None,
            boxorig: None,
            corsnum: None,
        };
        let records = grid.to_records();
        let (last_kw, last_values) = records.last().unwrap();
        assert_eq!(*last_kw, "ENDGRID");
        assert_eq!(*last_values, RecordValues::Int(Vec::new()));
        assert_eq!(records.len(), 4);
    }

    #[test]
    fn test_nnc_optional_arrays_only_when_present() {
        let section = NncSection {
            nnchead: NncHead {
                num_nnc: 1,
                grid_identifier: 0,
            },
            upstream_nnc: vec![1],
            downstream_nnc: vec![2],
            nncl: None,
            nncg: None,
        };
        let order: Vec<&str> = section.to_records().iter().map(|(kw, _)| *kw).collect();
        assert_eq!(order, vec!["NNCHEAD", "NNC1", "NNC2"]);
    }

    #[test]
    fn test_keywords_are_padded_for_the_sink() {
        let grid = EGrid::default_settings_grid(vec![0.0; 24], vec![0.0; 8], None, (1, 1, 1))
            .expect("valid grid");
        let mut sink = crate::record::VecRecordSink::new();
        encode(&grid, &mut sink).unwrap();
        assert!(sink.records.iter().all(|(kw, _)| kw.len() == 8));
        assert_eq!(sink.records[0].0, "FILEHEAD");
        assert_eq!(sink.records[1].0, "GRIDUNIT");
    }
}
