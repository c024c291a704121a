//! Shared value vocabulary for reservoir grid file formats.
//!
//! Grid geometry files carry their metadata as short keyword records whose
//! payloads are lists of integer codes or blank-padded string tokens. This
//! crate defines the domain types those records decode into (units, axis
//! orientation, map coordinate systems, grid layout descriptors) together
//! with the token tables that map each type to and from its file
//! representation.
//!
//! Token tables live beside the types as free functions rather than as
//! methods, so each bijection can be inspected and tested on its own:
//!
//! ```
//! use resgrid_model::units::{Units, units_from_token, units_token};
//!
//! assert_eq!(units_token(Units::Metres), "METRES");
//! assert_eq!(units_from_token("metres  ").unwrap(), Units::Metres);
//! ```
//!
//! Token matching is whitespace-normalized and case-insensitive: file
//! payloads are blank-padded to fixed width, and writers disagree on case.
//! Composite values ([`MapAxes`](mapaxes::MapAxes),
//! [`GridUnit`](units::GridUnit), [`GdOrient`](orientation::GdOrient))
//! decode field by field in declaration order, with documented defaults for
//! trailing fields a writer omitted.

pub mod error;
pub mod grid;
pub mod mapaxes;
pub mod orientation;
pub mod token;
pub mod units;

pub use error::{GridValueError, Result};
pub use grid::{CoordinateType, GridFormat, RockModel, TypeOfGrid};
pub use mapaxes::MapAxes;
pub use orientation::{GdOrient, Handedness, Order, Orientation};
pub use token::{match_token, until_space};
pub use units::{GridRelative, GridUnit, Units};
