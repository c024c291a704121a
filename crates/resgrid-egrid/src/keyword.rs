//! Keyword tokens of the EGRID format.
//!
//! Keywords are 8-character blank-padded names. Two keywords are equal when
//! they agree up to the first embedded whitespace, so "COORD", "COORD " and
//! "COORD   " all name the same record.

use resgrid_model::until_space;

/// Keyword length in the physical record stream.
pub const KEYWORD_LEN: usize = 8;

pub const FILEHEAD: &str = "FILEHEAD";
pub const MAPUNITS: &str = "MAPUNITS";
pub const MAPAXES: &str = "MAPAXES";
pub const GRIDUNIT: &str = "GRIDUNIT";
pub const GDORIENT: &str = "GDORIENT";
pub const GRIDHEAD: &str = "GRIDHEAD";
pub const BOXORIG: &str = "BOXORIG";
pub const COORD: &str = "COORD";
pub const COORDSYS: &str = "COORDSYS";
pub const ZCORN: &str = "ZCORN";
pub const ACTNUM: &str = "ACTNUM";
pub const CORSNUM: &str = "CORSNUM";
pub const ENDGRID: &str = "ENDGRID";
pub const LGR: &str = "LGR";
pub const LGRPARNT: &str = "LGRPARNT";
pub const LGRSGRID: &str = "LGRSGRID";
pub const HOSTNUM: &str = "HOSTNUM";
pub const ENDLGR: &str = "ENDLGR";
pub const NNCHEAD: &str = "NNCHEAD";
pub const NNC1: &str = "NNC1";
pub const NNC2: &str = "NNC2";
pub const NNCL: &str = "NNCL";
pub const NNCG: &str = "NNCG";
pub const NNCHEADA: &str = "NNCHEADA";
pub const NNA1: &str = "NNA1";
pub const NNA2: &str = "NNA2";

/// Whether two keyword tokens name the same record.
pub fn match_keyword(a: &str, b: &str) -> bool {
    until_space(a) == until_space(b)
}

/// Pad a keyword to its 8-character stream form.
pub fn pad_keyword(keyword: &str) -> String {
    format!("{keyword:<width$}", width = KEYWORD_LEN)
}
