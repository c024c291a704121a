//! EGRID reservoir grid geometry format reader and writer.
//!
//! EGRID files are written by reservoir simulators and carry the geometry
//! of a corner point grid: the global grid, any number of local grid
//! refinements (LGR), and non-neighbor connectivity between cells. The
//! file is a flat, ordered sequence of keyword/array records; this crate
//! recognizes its section grammar with one token of lookahead, decodes it
//! into typed sections, and encodes those sections back in canonical order
//! so that decode-then-encode reproduces the original structure exactly.
//!
//! The physical record stream is not handled here. Hosts supply an
//! implementation of the [`record`] contract ([`RecordSource`] /
//! [`RecordSink`]); framing, byte order and file I/O stay on their side,
//! and the grammar is identical for the formatted and unformatted physical
//! encodings.
//!
//! # Example
//!
//! ```
//! use resgrid_egrid::{EGrid, VecRecordSink, decode};
//!
//! // A one-cell grid with default header settings.
//! let grid = EGrid::default_settings_grid(
//!     vec![0.0; 24],
//!     vec![0.0; 8],
//!     None,
//!     (1, 1, 1),
//! )
//! .unwrap();
//!
//! // Encode to an in-memory record stream and decode it back.
//! let mut sink = VecRecordSink::new();
//! grid.write_to(&mut sink).unwrap();
//! let decoded = decode(sink.into_source()).unwrap();
//! assert_eq!(decoded, grid);
//! ```
//!
//! # Errors
//!
//! Decoding and building are all-or-nothing: the caller receives either a
//! fully validated [`EGrid`] or one typed [`EGridError`] naming the
//! offending keyword. Only the corner point layout is supported; files
//! declaring any other layout are rejected, not degraded.

mod builder;
mod error;
pub mod header;
pub mod keyword;
pub mod record;
mod reader;
mod sections;
mod writer;

// Re-export error types
pub use error::{EGridError, Result};

// Re-export section types
pub use sections::{
    AmalgamationSection, EGrid, EGridHead, GlobalGrid, LgrSection, NncEntry, NncSection,
    cell_count, coord_len, zcorn_len,
};

// Re-export header frames
pub use header::{Filehead, GridHead, NncHead};

// Re-export reader and writer entry points
pub use reader::{EGridReader, decode};
pub use writer::encode;

// Re-export the record stream contract
pub use record::{
    Format, RecordEntry, RecordSink, RecordSource, RecordValues, VecRecordSink, VecRecordSource,
};

// Re-export the builder
pub use builder::{Amalgamation, EGridBuilder, GridGeometry, Lgr, Nnc, NncInput};
