//! EGRID decoding.
//!
//! A single grammar routine, [`EGridReader::read_section`], parses every
//! section of the file. Each call is parametrized by a static
//! [`SectionGrammar`]: the keyword factories of the section, its required
//! keywords, the keywords that end it, the keywords to discard, and
//! validation visitors run against each decoded value.
//!
//! Sections are recognized with one token of lookahead. The reader keeps a
//! single-slot pushback buffer so a section can end on the first keyword of
//! the next section without consuming it.

use tracing::{debug, trace};

use resgrid_model::units::units_from_token;
use resgrid_model::{GdOrient, GridUnit, GridValueError, MapAxes, TypeOfGrid, Units, until_space};

use crate::error::{EGridError, Result};
use crate::header::{Filehead, GridHead, NncHead};
use crate::keyword::{self, match_keyword};
use crate::record::{RecordEntry, RecordSource, RecordValues};
use crate::sections::{
    AmalgamationSection, EGrid, EGridHead, GlobalGrid, LgrSection, NncEntry, NncSection,
};

/// One decoded keyword value, tagged by which factory produced it.
#[derive(Debug, Clone, PartialEq)]
enum KeywordValue {
    FileHead(Filehead),
    GridHead(GridHead),
    NncHead(NncHead),
    MapUnits(Units),
    MapAxes(MapAxes),
    GridUnit(GridUnit),
    GdOrient(GdOrient),
    Name(String),
    Triple((i32, i32, i32)),
    Pair((i32, i32)),
    Ints(Vec<i32>),
    Floats(Vec<f32>),
}

impl KeywordValue {
    fn file_head(self) -> Option<Filehead> {
        match self {
            KeywordValue::FileHead(value) => Some(value),
            _ => None,
        }
    }

    fn grid_head(self) -> Option<GridHead> {
        match self {
            KeywordValue::GridHead(value) => Some(value),
            _ => None,
        }
    }

    fn nnc_head(self) -> Option<NncHead> {
        match self {
            KeywordValue::NncHead(value) => Some(value),
            _ => None,
        }
    }

    fn map_units(self) -> Option<Units> {
        match self {
            KeywordValue::MapUnits(value) => Some(value),
            _ => None,
        }
    }

    fn map_axes(self) -> Option<MapAxes> {
        match self {
            KeywordValue::MapAxes(value) => Some(value),
            _ => None,
        }
    }

    fn grid_unit(self) -> Option<GridUnit> {
        match self {
            KeywordValue::GridUnit(value) => Some(value),
            _ => None,
        }
    }

    fn gd_orient(self) -> Option<GdOrient> {
        match self {
            KeywordValue::GdOrient(value) => Some(value),
            _ => None,
        }
    }

    fn name(self) -> Option<String> {
        match self {
            KeywordValue::Name(value) => Some(value),
            _ => None,
        }
    }

    fn triple(self) -> Option<(i32, i32, i32)> {
        match self {
            KeywordValue::Triple(value) => Some(value),
            _ => None,
        }
    }

    fn pair(self) -> Option<(i32, i32)> {
        match self {
            KeywordValue::Pair(value) => Some(value),
            _ => None,
        }
    }

    fn ints(self) -> Option<Vec<i32>> {
        match self {
            KeywordValue::Ints(value) => Some(value),
            _ => None,
        }
    }

    fn floats(self) -> Option<Vec<f32>> {
        match self {
            KeywordValue::Floats(value) => Some(value),
            _ => None,
        }
    }
}

/// How a keyword's payload decodes into a [`KeywordValue`].
#[derive(Debug, Clone, Copy)]
enum ValueKind {
    FileHead,
    GridHead,
    NncHead,
    MapUnits,
    MapAxes,
    GridUnit,
    GdOrient,
    Name,
    Triple,
    Pair,
    Ints,
    Floats,
}

/// Decode one payload according to its registered kind.
fn decode_value(
    kind: ValueKind,
    keyword: &'static str,
    values: RecordValues,
) -> std::result::Result<KeywordValue, GridValueError> {
    match kind {
        ValueKind::FileHead => Ok(KeywordValue::FileHead(Filehead::from_values(
            &values.into_ints(keyword)?,
        )?)),
        ValueKind::GridHead => Ok(KeywordValue::GridHead(GridHead::from_values(
            &values.into_ints(keyword)?,
        )?)),
        ValueKind::NncHead => Ok(KeywordValue::NncHead(NncHead::from_values(
            &values.into_ints(keyword)?,
        )?)),
        ValueKind::MapUnits => {
            let token = values.into_first_string(keyword)?;
            Ok(KeywordValue::MapUnits(units_from_token(&token)?))
        }
        ValueKind::MapAxes => Ok(KeywordValue::MapAxes(MapAxes::from_values(
            &values.into_floats(keyword)?,
        )?)),
        ValueKind::GridUnit => Ok(KeywordValue::GridUnit(GridUnit::from_values(
            &values.into_strings(keyword)?,
        )?)),
        ValueKind::GdOrient => Ok(KeywordValue::GdOrient(GdOrient::from_values(
            &values.into_strings(keyword)?,
        )?)),
        ValueKind::Name => Ok(KeywordValue::Name(values.into_first_string(keyword)?)),
        ValueKind::Triple => Ok(KeywordValue::Triple(values.into_triple(keyword)?)),
        ValueKind::Pair => Ok(KeywordValue::Pair(values.into_pair(keyword)?)),
        ValueKind::Ints => Ok(KeywordValue::Ints(values.into_ints(keyword)?)),
        ValueKind::Floats => Ok(KeywordValue::Floats(values.into_floats(keyword)?)),
    }
}

/// Validation hook run against each decoded (keyword, value) pair.
type Visitor = fn(&'static str, &KeywordValue) -> Result<()>;

/// The grammar of one section type.
struct SectionGrammar {
    /// Keyword factories; also the set of keywords the section accepts.
    factories: &'static [(&'static str, ValueKind)],
    /// Keywords that must be present when the section ends.
    required: &'static [&'static str],
    /// Keywords that end the section once at least one keyword was accepted.
    stop: &'static [&'static str],
    /// Keywords discarded without decoding.
    skip: &'static [&'static str],
    /// Validation visitors.
    visitors: &'static [Visitor],
}

const HEADER_GRAMMAR: SectionGrammar = SectionGrammar {
    factories: &[
        (keyword::FILEHEAD, ValueKind::FileHead),
        (keyword::MAPUNITS, ValueKind::MapUnits),
        (keyword::MAPAXES, ValueKind::MapAxes),
        (keyword::GRIDUNIT, ValueKind::GridUnit),
        (keyword::GDORIENT, ValueKind::GdOrient),
    ],
    required: &[keyword::FILEHEAD],
    stop: &[keyword::GRIDHEAD],
    skip: &[],
    visitors: &[],
};

const GLOBAL_GRID_GRAMMAR: SectionGrammar = SectionGrammar {
    factories: &[
        (keyword::GRIDHEAD, ValueKind::GridHead),
        (keyword::BOXORIG, ValueKind::Triple),
        (keyword::COORD, ValueKind::Floats),
        (keyword::COORDSYS, ValueKind::MapAxes),
        (keyword::ZCORN, ValueKind::Floats),
        (keyword::ACTNUM, ValueKind::Ints),
        (keyword::CORSNUM, ValueKind::Ints),
    ],
    required: &[keyword::GRIDHEAD, keyword::COORD, keyword::ZCORN],
    stop: &[keyword::ENDGRID],
    skip: &[],
    visitors: &[require_corner_point],
};

const LGR_GRAMMAR: SectionGrammar = SectionGrammar {
    factories: &[
        (keyword::LGR, ValueKind::Name),
        (keyword::LGRPARNT, ValueKind::Name),
        (keyword::LGRSGRID, ValueKind::Name),
        (keyword::GRIDHEAD, ValueKind::GridHead),
        (keyword::BOXORIG, ValueKind::Triple),
        (keyword::COORD, ValueKind::Floats),
        (keyword::COORDSYS, ValueKind::MapAxes),
        (keyword::ZCORN, ValueKind::Floats),
        (keyword::ACTNUM, ValueKind::Ints),
        (keyword::HOSTNUM, ValueKind::Ints),
    ],
    required: &[
        keyword::LGR,
        keyword::GRIDHEAD,
        keyword::COORD,
        keyword::ZCORN,
        keyword::HOSTNUM,
    ],
    stop: &[keyword::ENDLGR],
    skip: &[keyword::ENDGRID],
    visitors: &[],
};

// NNC and amalgamation subsections have no trailer keyword; they end at the
// first keyword of the next subsection, which stays unconsumed.
const NNC_GRAMMAR: SectionGrammar = SectionGrammar {
    factories: &[
        (keyword::NNCHEAD, ValueKind::NncHead),
        (keyword::NNC1, ValueKind::Ints),
        (keyword::NNC2, ValueKind::Ints),
        (keyword::NNCL, ValueKind::Ints),
        (keyword::NNCG, ValueKind::Ints),
    ],
    required: &[keyword::NNCHEAD, keyword::NNC1, keyword::NNC2],
    stop: &[keyword::NNCHEAD, keyword::LGR, keyword::NNCHEADA],
    skip: &[],
    visitors: &[],
};

const AMALGAMATION_GRAMMAR: SectionGrammar = SectionGrammar {
    factories: &[
        (keyword::NNCHEADA, ValueKind::Pair),
        (keyword::NNA1, ValueKind::Ints),
        (keyword::NNA2, ValueKind::Ints),
    ],
    required: &[keyword::NNCHEADA, keyword::NNA1, keyword::NNA2],
    stop: &[keyword::NNCHEAD, keyword::LGR, keyword::NNCHEADA],
    skip: &[],
    visitors: &[],
};

/// Reject any global grid whose GRIDHEAD declares a non corner point layout.
fn require_corner_point(kw: &'static str, value: &KeywordValue) -> Result<()> {
    if kw == keyword::GRIDHEAD
        && let KeywordValue::GridHead(head) = value
        && head.type_of_grid != TypeOfGrid::CornerPoint
    {
        return Err(EGridError::UnsupportedGridLayout {
            type_of_grid: head.type_of_grid,
        });
    }
    Ok(())
}

/// The decoded keywords of one section, keyed by canonical keyword.
#[derive(Default)]
struct SectionValues {
    entries: Vec<(&'static str, KeywordValue)>,
}

impl SectionValues {
    fn contains(&self, kw: &str) -> bool {
        self.entries.iter().any(|(entry_kw, _)| *entry_kw == kw)
    }

    fn insert(&mut self, kw: &'static str, value: KeywordValue) {
        self.entries.push((kw, value));
    }

    fn take(&mut self, kw: &str) -> Option<KeywordValue> {
        let idx = self.entries.iter().position(|(entry_kw, _)| *entry_kw == kw)?;
        Some(self.entries.swap_remove(idx).1)
    }

    /// Extract a required keyword's value.
    fn required<T>(
        &mut self,
        kw: &'static str,
        extract: fn(KeywordValue) -> Option<T>,
    ) -> Result<T> {
        let value = self.take(kw).ok_or_else(|| EGridError::MissingKeywords {
            keywords: vec![kw.to_string()],
        })?;
        extract(value).ok_or_else(|| unexpected_payload(kw))
    }

    /// Extract an optional keyword's value.
    fn optional<T>(
        &mut self,
        kw: &'static str,
        extract: fn(KeywordValue) -> Option<T>,
    ) -> Result<Option<T>> {
        match self.take(kw) {
            Some(value) => extract(value)
                .map(Some)
                .ok_or_else(|| unexpected_payload(kw)),
            None => Ok(None),
        }
    }
}

fn unexpected_payload(kw: &'static str) -> EGridError {
    EGridError::incorrect_keyword(kw, GridValueError::incorrect(kw, "unexpected payload type"))
}

/// Reads one EGRID record stream end to end.
///
/// A reader consumes exactly one stream and is not shared; independent
/// streams are decoded by independent readers.
pub struct EGridReader<S: RecordSource> {
    source: S,
    buffered: Option<S::Entry>,
}

impl<S: RecordSource> EGridReader<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            buffered: None,
        }
    }

    /// Pull the next entry, draining the pushback buffer first.
    fn next_entry(&mut self) -> Result<Option<S::Entry>> {
        if let Some(entry) = self.buffered.take() {
            return Ok(Some(entry));
        }
        Ok(self.source.next_entry()?)
    }

    /// Return an entry to the buffer, to be pulled again next.
    fn push_back(&mut self, entry: S::Entry) {
        self.buffered = Some(entry);
    }

    /// The next entry's keyword without consuming it.
    fn peek_keyword(&mut self) -> Result<Option<&str>> {
        if self.buffered.is_none() {
            self.buffered = self.source.next_entry()?;
        }
        Ok(self
            .buffered
            .as_ref()
            .map(|entry| until_space(entry.keyword())))
    }

    /// Read one section according to the given grammar.
    ///
    /// Pulls entries until end of stream or a stop keyword. A stop keyword
    /// ends the section only after at least one keyword was accepted, and is
    /// pushed back rather than consumed; before anything was accepted it is
    /// treated as an ordinary member, which lets a section's own required
    /// opener double as the previous section's stop keyword.
    fn read_section(&mut self, grammar: &SectionGrammar) -> Result<SectionValues> {
        let mut values = SectionValues::default();
        let mut accepted = 0usize;
        loop {
            let Some(entry) = self.next_entry()? else {
                break;
            };
            if grammar
                .skip
                .iter()
                .any(|kw| match_keyword(kw, entry.keyword()))
            {
                continue;
            }
            if accepted > 0
                && grammar
                    .stop
                    .iter()
                    .any(|kw| match_keyword(kw, entry.keyword()))
            {
                self.push_back(entry);
                break;
            }
            if values.contains(until_space(entry.keyword())) {
                return Err(EGridError::DuplicateKeyword {
                    keyword: until_space(entry.keyword()).to_string(),
                });
            }
            let Some((canonical, kind)) = grammar
                .factories
                .iter()
                .find(|(kw, _)| match_keyword(kw, entry.keyword()))
                .copied()
            else {
                return Err(EGridError::UnknownKeyword {
                    keyword: until_space(entry.keyword()).to_string(),
                });
            };
            let payload = entry.values()?;
            let value = decode_value(kind, canonical, payload)
                .map_err(|source| EGridError::incorrect_keyword(canonical, source))?;
            for visitor in grammar.visitors {
                visitor(canonical, &value)?;
            }
            trace!(keyword = canonical, "decoded keyword record");
            values.insert(canonical, value);
            accepted += 1;
        }

        let missing: Vec<String> = grammar
            .required
            .iter()
            .filter(|kw| !values.contains(kw))
            .map(ToString::to_string)
            .collect();
        if !missing.is_empty() {
            return Err(EGridError::MissingKeywords { keywords: missing });
        }
        Ok(values)
    }

    /// Consume one entry that must carry the given trailer keyword.
    fn expect_trailer(&mut self, expected: &'static str) -> Result<()> {
        match self.next_entry()? {
            Some(entry) if match_keyword(entry.keyword(), expected) => Ok(()),
            _ => Err(EGridError::UnterminatedSection { keyword: expected }),
        }
    }

    /// Read the header section. Afterwards the stream is at the global
    /// grid's GRIDHEAD keyword.
    fn read_header(&mut self) -> Result<EGridHead> {
        let mut values = self.read_section(&HEADER_GRAMMAR)?;
        Ok(EGridHead {
            file_head: values.required(keyword::FILEHEAD, KeywordValue::file_head)?,
            mapunits: values.optional(keyword::MAPUNITS, KeywordValue::map_units)?,
            mapaxes: values.optional(keyword::MAPAXES, KeywordValue::map_axes)?,
            gridunit: values.optional(keyword::GRIDUNIT, KeywordValue::grid_unit)?,
            gdorient: values.optional(keyword::GDORIENT, KeywordValue::gd_orient)?,
        })
    }

    /// Read the global grid section including its mandatory ENDGRID
    /// trailer.
    fn read_global_grid(&mut self) -> Result<GlobalGrid> {
        let mut values = self.read_section(&GLOBAL_GRID_GRAMMAR)?;
        self.expect_trailer(keyword::ENDGRID)?;
        let grid = GlobalGrid {
            grid_head: values.required(keyword::GRIDHEAD, KeywordValue::grid_head)?,
            coord: values.required(keyword::COORD, KeywordValue::floats)?,
            zcorn: values.required(keyword::ZCORN, KeywordValue::floats)?,
            actnum: values.optional(keyword::ACTNUM, KeywordValue::ints)?,
            coord_sys: values.optional(keyword::COORDSYS, KeywordValue::map_axes)?,
            boxorig: values.optional(keyword::BOXORIG, KeywordValue::triple)?,
            corsnum: values.optional(keyword::CORSNUM, KeywordValue::ints)?,
        };
        let (nx, ny, nz) = grid.grid_head.dimensions();
        debug!(nx, ny, nz, "read global grid");
        Ok(grid)
    }

    /// Read LGR and connectivity subsections until end of stream.
    fn read_subsections(&mut self) -> Result<(Vec<LgrSection>, Vec<NncEntry>)> {
        let mut lgr_sections = Vec::new();
        let mut nnc_sections = Vec::new();
        loop {
            let Some(kw) = self.peek_keyword()? else {
                break;
            };
            if kw == keyword::LGR {
                lgr_sections.push(self.read_lgr_subsection()?);
            } else if kw == keyword::NNCHEAD {
                nnc_sections.push(NncEntry::Nnc(self.read_nnc_subsection()?));
            } else if kw == keyword::NNCHEADA {
                nnc_sections.push(NncEntry::Amalgamation(self.read_amalgamation_subsection()?));
            } else {
                return Err(EGridError::UnexpectedSection {
                    keyword: kw.to_string(),
                });
            }
        }
        Ok((lgr_sections, nnc_sections))
    }

    /// Read one LGR subsection including its mandatory ENDLGR trailer.
    fn read_lgr_subsection(&mut self) -> Result<LgrSection> {
        let mut values = self.read_section(&LGR_GRAMMAR)?;
        self.expect_trailer(keyword::ENDLGR)?;
        let section = LgrSection {
            name: values.required(keyword::LGR, KeywordValue::name)?,
            grid_head: values.required(keyword::GRIDHEAD, KeywordValue::grid_head)?,
            coord: values.required(keyword::COORD, KeywordValue::floats)?,
            zcorn: values.required(keyword::ZCORN, KeywordValue::floats)?,
            actnum: values.optional(keyword::ACTNUM, KeywordValue::ints)?,
            parent: values.optional(keyword::LGRPARNT, KeywordValue::name)?,
            grid_parent: values.optional(keyword::LGRSGRID, KeywordValue::name)?,
            hostnum: Some(values.required(keyword::HOSTNUM, KeywordValue::ints)?),
            boxorig: values.optional(keyword::BOXORIG, KeywordValue::triple)?,
            coord_sys: values.optional(keyword::COORDSYS, KeywordValue::map_axes)?,
        };
        debug!(name = %section.name, "read lgr subsection");
        Ok(section)
    }

    /// Read one NNC subsection. The stream is left at the first keyword of
    /// the next subsection.
    fn read_nnc_subsection(&mut self) -> Result<NncSection> {
        let mut values = self.read_section(&NNC_GRAMMAR)?;
        Ok(NncSection {
            nnchead: values.required(keyword::NNCHEAD, KeywordValue::nnc_head)?,
            upstream_nnc: values.required(keyword::NNC1, KeywordValue::ints)?,
            downstream_nnc: values.required(keyword::NNC2, KeywordValue::ints)?,
            nncl: values.optional(keyword::NNCL, KeywordValue::ints)?,
            nncg: values.optional(keyword::NNCG, KeywordValue::ints)?,
        })
    }

    /// Read one amalgamation subsection. The stream is left at the first
    /// keyword of the next subsection.
    fn read_amalgamation_subsection(&mut self) -> Result<AmalgamationSection> {
        let mut values = self.read_section(&AMALGAMATION_GRAMMAR)?;
        Ok(AmalgamationSection {
            lgr_idxs: values.required(keyword::NNCHEADA, KeywordValue::pair)?,
            nna1: values.required(keyword::NNA1, KeywordValue::ints)?,
            nna2: values.required(keyword::NNA2, KeywordValue::ints)?,
        })
    }

    /// Decode the whole stream into an [`EGrid`].
    ///
    /// The file-level grid layout is checked right after the header, before
    /// any geometry is decoded, so unsupported layouts fail as early as
    /// possible.
    pub fn read(mut self) -> Result<EGrid> {
        let egrid_head = self.read_header()?;
        if egrid_head.file_head.type_of_grid != TypeOfGrid::CornerPoint {
            return Err(EGridError::UnsupportedGridLayout {
                type_of_grid: egrid_head.file_head.type_of_grid,
            });
        }
        let global_grid = self.read_global_grid()?;
        let (lgr_sections, nnc_sections) = self.read_subsections()?;
        debug!(
            lgrs = lgr_sections.len(),
            connectivity = nnc_sections.len(),
            "decoded egrid"
        );
        Ok(EGrid {
            egrid_head,
            global_grid,
            lgr_sections,
            nnc_sections,
        })
    }
}

/// Decode an EGRID record stream.
pub fn decode<S: RecordSource>(source: S) -> Result<EGrid> {
    EGridReader::new(source).read()
}

impl EGrid {
    /// Decode an EGRID record stream. See [`decode`].
    pub fn read_from<S: RecordSource>(source: S) -> Result<EGrid> {
        decode(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::VecRecordSource;

    fn nnc_records() -> Vec<(String, RecordValues)> {
        vec![
            ("NNCHEAD ".to_string(), RecordValues::Int(vec![2, 0])),
            ("NNC1    ".to_string(), RecordValues::Int(vec![1, 2])),
            ("NNC2    ".to_string(), RecordValues::Int(vec![3, 4])),
        ]
    }

    #[test]
    fn test_stop_keyword_accepted_as_first_member() {
        // NNCHEAD is both the section's opener and its stop keyword; as the
        // first entry it must be consumed as a member.
        let source = VecRecordSource::new(nnc_records());
        let mut reader = EGridReader::new(source);
        let section = reader.read_nnc_subsection().unwrap();
        assert_eq!(section.nnchead.num_nnc, 2);
        assert_eq!(section.upstream_nnc, vec![1, 2]);
    }

    #[test]
    fn test_stop_keyword_pushed_back_after_first_member() {
        let mut records = nnc_records();
        records.extend(nnc_records());
        let mut reader = EGridReader::new(VecRecordSource::new(records));
        reader.read_nnc_subsection().unwrap();
        // The second section's opener must still be on the stream.
        assert_eq!(reader.peek_keyword().unwrap(), Some(keyword::NNCHEAD));
        reader.read_nnc_subsection().unwrap();
        assert_eq!(reader.peek_keyword().unwrap(), None);
    }

    #[test]
    fn test_mismatched_payload_type_is_incorrect_values() {
        let records = vec![(
            "NNCHEAD ".to_string(),
            RecordValues::Ascii(vec!["x".to_string()]),
        )];
        let mut reader = EGridReader::new(VecRecordSource::new(records));
        let err = reader.read_nnc_subsection().unwrap_err();
        assert!(matches!(
            err,
            EGridError::IncorrectKeywordValues { keyword, .. } if keyword == "NNCHEAD"
        ));
    }
}
