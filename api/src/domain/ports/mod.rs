//! Domain ports (traits)
//!
//! Port traits define interfaces that the domain layer requires.
//! Adapters provide concrete implementations of these traits.

pub mod tabular_store;

pub use tabular_store::{CellRef, CellValue, ExternalCell, Formula, Rgb, TabularStore, TextStyle};
