//! Record stream collaborator contract.
//!
//! An EGRID file is physically a flat sequence of (keyword, array) records.
//! Framing, byte order and file I/O belong to the host's record stream
//! implementation; this module defines the contract the grammar works
//! against, plus an in-memory reference implementation used by the tests.
//!
//! Reading is lazy: a [`RecordEntry`] exposes its keyword cheaply, and only
//! materializes the payload when [`RecordEntry::values`] is called, so
//! records the grammar skips never pay for array decoding.

use std::io;
use std::vec;

use resgrid_model::GridValueError;

/// Physical encoding of an EGRID file.
///
/// Orthogonal to the record grammar; hosts pick the encoding when they
/// construct their record stream. By convention the unformatted binary
/// encoding uses the ".EGRID" extension and the formatted text encoding
/// ".FEGRID".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Human-readable text records.
    Formatted,
    /// Binary records.
    Unformatted,
}

impl Format {
    /// Map a file extension to its conventional encoding.
    pub fn from_file_extension(extension: &str) -> Option<Format> {
        if extension.eq_ignore_ascii_case("egrid") {
            Some(Format::Unformatted)
        } else if extension.eq_ignore_ascii_case("fegrid") {
            Some(Format::Formatted)
        } else {
            None
        }
    }
}

/// Typed payload of one record.
///
/// The stream carries three element types: 32-bit integers, 32-bit floats
/// and blank-padded ascii strings.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordValues {
    Int(Vec<i32>),
    Float(Vec<f32>),
    Ascii(Vec<String>),
}

impl RecordValues {
    /// Number of elements in the payload.
    pub fn len(&self) -> usize {
        match self {
            RecordValues::Int(values) => values.len(),
            RecordValues::Float(values) => values.len(),
            RecordValues::Ascii(values) => values.len(),
        }
    }

    /// Whether the payload is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Extract an integer array. Float payloads are cast; some writers emit
    /// index arrays as floats.
    pub fn into_ints(self, keyword: &'static str) -> Result<Vec<i32>, GridValueError> {
        match self {
            RecordValues::Int(values) => Ok(values),
            RecordValues::Float(values) => Ok(values.into_iter().map(|v| v as i32).collect()),
            RecordValues::Ascii(_) => Err(GridValueError::incorrect(
                keyword,
                "expected an integer array, got strings",
            )),
        }
    }

    /// Extract a float array. Integer payloads are cast.
    pub fn into_floats(self, keyword: &'static str) -> Result<Vec<f32>, GridValueError> {
        match self {
            RecordValues::Float(values) => Ok(values),
            RecordValues::Int(values) => Ok(values.into_iter().map(|v| v as f32).collect()),
            RecordValues::Ascii(_) => Err(GridValueError::incorrect(
                keyword,
                "expected a float array, got strings",
            )),
        }
    }

    /// Extract a string array.
    pub fn into_strings(self, keyword: &'static str) -> Result<Vec<String>, GridValueError> {
        match self {
            RecordValues::Ascii(values) => Ok(values),
            _ => Err(GridValueError::incorrect(
                keyword,
                "expected a string array, got numbers",
            )),
        }
    }

    /// Extract the first string of an ascii payload.
    pub fn into_first_string(self, keyword: &'static str) -> Result<String, GridValueError> {
        let mut values = self.into_strings(keyword)?;
        if values.is_empty() {
            return Err(GridValueError::incorrect(keyword, "expected one string"));
        }
        Ok(values.swap_remove(0))
    }

    /// Extract the leading integer triple of the payload.
    pub fn into_triple(self, keyword: &'static str) -> Result<(i32, i32, i32), GridValueError> {
        let values = self.into_ints(keyword)?;
        if values.len() < 3 {
            return Err(GridValueError::TooFewValues {
                keyword,
                got: values.len(),
                expected: 3,
            });
        }
        Ok((values[0], values[1], values[2]))
    }

    /// Extract the leading integer pair of the payload.
    pub fn into_pair(self, keyword: &'static str) -> Result<(i32, i32), GridValueError> {
        let values = self.into_ints(keyword)?;
        if values.len() < 2 {
            return Err(GridValueError::TooFewValues {
                keyword,
                got: values.len(),
                expected: 2,
            });
        }
        Ok((values[0], values[1]))
    }
}

/// One record produced by a [`RecordSource`].
pub trait RecordEntry {
    /// The record's keyword token, blank padding included.
    fn keyword(&self) -> &str;

    /// Materialize the record's payload.
    fn values(self) -> io::Result<RecordValues>;
}

/// Ordered source of records, the read half of the collaborator contract.
pub trait RecordSource {
    type Entry: RecordEntry;

    /// Pull the next record, or `None` at end of stream.
    fn next_entry(&mut self) -> io::Result<Option<Self::Entry>>;
}

/// Ordered sink of records, the write half of the collaborator contract.
pub trait RecordSink {
    /// Append one record. The keyword is handed over already padded to
    /// [`KEYWORD_LEN`](crate::keyword::KEYWORD_LEN) characters.
    fn put_record(&mut self, keyword: &str, values: &RecordValues) -> io::Result<()>;
}

/// In-memory record entry.
#[derive(Debug, Clone, PartialEq)]
pub struct VecRecordEntry {
    keyword: String,
    values: RecordValues,
}

impl RecordEntry for VecRecordEntry {
    fn keyword(&self) -> &str {
        &self.keyword
    }

    fn values(self) -> io::Result<RecordValues> {
        Ok(self.values)
    }
}

/// In-memory record source over a list of (keyword, payload) pairs.
#[derive(Debug)]
pub struct VecRecordSource {
    records: vec::IntoIter<(String, RecordValues)>,
}

impl VecRecordSource {
    pub fn new(records: Vec<(String, RecordValues)>) -> Self {
        Self {
            records: records.into_iter(),
        }
    }
}

impl RecordSource for VecRecordSource {
    type Entry = VecRecordEntry;

    fn next_entry(&mut self) -> io::Result<Option<VecRecordEntry>> {
        Ok(self
            .records
            .next()
            .map(|(keyword, values)| VecRecordEntry { keyword, values }))
    }
}

/// In-memory record sink collecting (keyword, payload) pairs.
#[derive(Debug, Default)]
pub struct VecRecordSink {
    pub records: Vec<(String, RecordValues)>,
}

impl VecRecordSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reuse the collected records as a source, for write-then-read flows.
    pub fn into_source(self) -> VecRecordSource {
        VecRecordSource::new(self.records)
    }
}

impl RecordSink for VecRecordSink {
    fn put_record(&mut self, keyword: &str, values: &RecordValues) -> io::Result<()> {
        self.records.push((keyword.to_string(), values.clone()));
        Ok(())
    }
}
