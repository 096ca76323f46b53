//! Tabular store port
//!
//! The narrow interface the engine needs from the hosting spreadsheet
//! runtime: sheet lifecycle, cell writes, range reads, row sorting, and
//! presentation (styles, backgrounds, widths). The engine never builds
//! dialect-specific formula strings; it emits tagged [`Formula`] values and
//! the adapter renders them into its native syntax.

use std::ops::RangeInclusive;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::StoreError;

/// A cell value as read from or written to the store.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Date(NaiveDate),
}

impl CellValue {
    /// Text content, if the cell holds text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Date(d) => write!(f, "{}", d),
        }
    }
}

/// A 1-based cell position on the sheet the formula lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRef {
    pub row: u32,
    pub col: u32,
}

/// An A1-style cell on a named sheet, e.g. `'Config'!B2`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalCell {
    pub sheet: String,
    pub cell: String,
}

/// A spreadsheet formula, kept as a tagged value so the engine stays
/// independent of any one formula dialect.
#[derive(Debug, Clone, PartialEq)]
pub enum Formula {
    /// A clickable link with a display label.
    Hyperlink { url: String, label: String },
    /// Classify the text in `subject` against substring keywords, selecting
    /// the first matching branch's cell; falls back to `default` when no
    /// keyword matches.
    ConditionalLookup {
        subject: CellRef,
        branches: Vec<(String, ExternalCell)>,
        default: f64,
    },
    /// The value of `value` scaled by the number in `weight`.
    WeightedReference { weight: CellRef, value: ExternalCell },
}

/// Text styling for a single cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextStyle {
    /// Foreground color as `#rrggbb`.
    pub foreground: String,
    pub bold: bool,
    pub underline: bool,
}

/// An RGB background color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// The engine's window onto the hosting spreadsheet runtime.
///
/// All coordinates are 1-based. Only the holder of the dispatch lock may
/// call mutating methods; the engine guarantees that discipline.
#[async_trait]
pub trait TabularStore: Send + Sync {
    async fn sheet_exists(&self, name: &str) -> Result<bool, StoreError>;

    /// Create a new empty sheet appended at the end of the workbook.
    async fn create_sheet(&self, name: &str) -> Result<(), StoreError>;

    async fn set_value(
        &self,
        sheet: &str,
        row: u32,
        col: u32,
        value: CellValue,
    ) -> Result<(), StoreError>;

    async fn set_formula(
        &self,
        sheet: &str,
        row: u32,
        col: u32,
        formula: &Formula,
    ) -> Result<(), StoreError>;

    async fn set_column_width(&self, sheet: &str, col: u32, width: u32) -> Result<(), StoreError>;

    async fn set_text_style(
        &self,
        sheet: &str,
        row: u32,
        col: u32,
        style: &TextStyle,
    ) -> Result<(), StoreError>;

    async fn set_background(
        &self,
        sheet: &str,
        row: u32,
        col: u32,
        color: Rgb,
    ) -> Result<(), StoreError>;

    /// Read a rectangular range of values. Cells outside the populated grid
    /// come back as [`CellValue::Empty`].
    async fn get_range(
        &self,
        sheet: &str,
        rows: RangeInclusive<u32>,
        cols: RangeInclusive<u32>,
    ) -> Result<Vec<Vec<CellValue>>, StoreError>;

    /// Sort whole rows within `rows` by the values in `by_col`. The sort
    /// must be stable on the store's prior row order.
    async fn sort_rows(
        &self,
        sheet: &str,
        rows: RangeInclusive<u32>,
        by_col: u32,
        descending: bool,
    ) -> Result<(), StoreError>;

    /// The last row with any content, or 0 for an empty sheet.
    async fn last_row(&self, sheet: &str) -> Result<u32, StoreError>;

    /// The last column with any content, or 0 for an empty sheet.
    async fn last_column(&self, sheet: &str) -> Result<u32, StoreError>;
}
