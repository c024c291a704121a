//! Error types for EGRID decoding, encoding and building.

use thiserror::Error;

use resgrid_model::{GridValueError, TypeOfGrid};

/// Errors that can occur while decoding, encoding or building an EGRID
/// aggregate.
///
/// All errors are terminal: a failed decode never yields a partial grid.
#[derive(Debug, Error)]
pub enum EGridError {
    /// A keyword payload failed to decode into its value type.
    #[error("incorrect values in keyword {keyword}")]
    IncorrectKeywordValues {
        keyword: String,
        #[source]
        source: GridValueError,
    },

    /// The same keyword occurred twice within one section.
    #[error("duplicate keyword {keyword}")]
    DuplicateKeyword { keyword: String },

    /// A keyword with no factory in the current section.
    #[error("unknown egrid keyword {keyword}")]
    UnknownKeyword { keyword: String },

    /// Required keywords absent when the section ended.
    #[error("missing required keywords {}", .keywords.join(", "))]
    MissingKeywords { keywords: Vec<String> },

    /// A subsection opened with a keyword that starts no known subsection.
    #[error("egrid subsection started with unexpected keyword {keyword}")]
    UnexpectedSection { keyword: String },

    /// A mandatory section trailer was never read.
    #[error("did not read {keyword} at end of section")]
    UnterminatedSection { keyword: &'static str },

    /// The file declares a grid layout other than corner point.
    #[error("only corner point grid layout is supported, got {type_of_grid}")]
    UnsupportedGridLayout { type_of_grid: TypeOfGrid },

    /// A section referenced an LGR name that was never declared.
    #[error("reference to undeclared lgr name {name:?}")]
    UnknownLgrName { name: String },

    /// A raw array does not have the length its grid dimensions dictate.
    #[error("{keyword} array has length {actual}, dimensions require {expected}")]
    InvalidArrayLength {
        keyword: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Two LGR sections declared the same name.
    #[error("duplicate lgr name {name:?}")]
    DuplicateLgrName { name: String },

    /// The record stream collaborator failed.
    #[error("record stream error: {0}")]
    Io(#[from] std::io::Error),
}

impl EGridError {
    /// Wrap a value codec failure with the keyword it occurred under.
    pub(crate) fn incorrect_keyword(keyword: impl Into<String>, source: GridValueError) -> Self {
        Self::IncorrectKeywordValues {
            keyword: keyword.into(),
            source,
        }
    }
}

/// Result type alias for EGRID operations.
pub type Result<T> = std::result::Result<T, EGridError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EGridError::DuplicateKeyword {
            keyword: "FILEHEAD".to_string(),
        };
        assert_eq!(format!("{err}"), "duplicate keyword FILEHEAD");

        let err = EGridError::MissingKeywords {
            keywords: vec!["COORD".to_string(), "ZCORN".to_string()],
        };
        assert_eq!(format!("{err}"), "missing required keywords COORD, ZCORN");

        let err = EGridError::UnterminatedSection { keyword: "ENDGRID" };
        assert!(format!("{err}").contains("ENDGRID"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "test");
        let err: EGridError = io_err.into();
        assert!(matches!(err, EGridError::Io(_)));
    }
}
