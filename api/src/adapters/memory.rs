//! In-memory tabular store
//!
//! A workbook of growable grids backing the `TabularStore` port. Formulas
//! are rendered into the `;`-argument-separator dialect of the hosting
//! spreadsheet runtime and kept as strings; this adapter does not evaluate
//! them. Used for local runs and tests; a cloud-sheet adapter would
//! implement the same trait against the real runtime.

use std::collections::HashMap;
use std::ops::RangeInclusive;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::ports::{CellValue, Formula, Rgb, TabularStore, TextStyle};
use crate::error::StoreError;

#[derive(Debug, Clone, Default)]
struct Cell {
    value: CellValue,
    formula: Option<String>,
    style: Option<TextStyle>,
    background: Option<Rgb>,
}

impl Cell {
    fn has_content(&self) -> bool {
        self.formula.is_some() || !matches!(self.value, CellValue::Empty)
    }
}

#[derive(Debug, Default)]
struct Sheet {
    name: String,
    /// Row-major grid, 0-indexed internally; the port API is 1-based.
    cells: Vec<Vec<Cell>>,
    widths: HashMap<u32, u32>,
}

impl Sheet {
    fn cell(&self, row: u32, col: u32) -> Option<&Cell> {
        self.cells
            .get(row as usize - 1)
            .and_then(|r| r.get(col as usize - 1))
    }

    fn cell_mut(&mut self, row: u32, col: u32) -> &mut Cell {
        let row = row as usize - 1;
        let col = col as usize - 1;
        if self.cells.len() <= row {
            self.cells.resize_with(row + 1, Vec::new);
        }
        let cells = &mut self.cells[row];
        if cells.len() <= col {
            cells.resize_with(col + 1, Cell::default);
        }
        &mut cells[col]
    }
}

#[derive(Default)]
pub struct InMemoryTabularStore {
    /// Sheets in workbook order; `create_sheet` appends at the end.
    workbook: RwLock<Vec<Sheet>>,
}

impl InMemoryTabularStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sheet_names(&self) -> Vec<String> {
        let workbook = self.workbook.read().unwrap();
        workbook.iter().map(|s| s.name.clone()).collect()
    }

    pub fn value_at(&self, sheet: &str, row: u32, col: u32) -> CellValue {
        let workbook = self.workbook.read().unwrap();
        find(&workbook, sheet)
            .ok()
            .and_then(|s| s.cell(row, col))
            .map(|c| c.value.clone())
            .unwrap_or_default()
    }

    pub fn formula_at(&self, sheet: &str, row: u32, col: u32) -> Option<String> {
        let workbook = self.workbook.read().unwrap();
        find(&workbook, sheet)
            .ok()
            .and_then(|s| s.cell(row, col))
            .and_then(|c| c.formula.clone())
    }

    pub fn text_style(&self, sheet: &str, row: u32, col: u32) -> Option<TextStyle> {
        let workbook = self.workbook.read().unwrap();
        find(&workbook, sheet)
            .ok()
            .and_then(|s| s.cell(row, col))
            .and_then(|c| c.style.clone())
    }

    pub fn background(&self, sheet: &str, row: u32, col: u32) -> Option<Rgb> {
        let workbook = self.workbook.read().unwrap();
        find(&workbook, sheet)
            .ok()
            .and_then(|s| s.cell(row, col))
            .and_then(|c| c.background)
    }

    pub fn column_width(&self, sheet: &str, col: u32) -> Option<u32> {
        let workbook = self.workbook.read().unwrap();
        find(&workbook, sheet)
            .ok()
            .and_then(|s| s.widths.get(&col).copied())
    }
}

fn find<'a>(workbook: &'a [Sheet], name: &str) -> Result<&'a Sheet, StoreError> {
    workbook
        .iter()
        .find(|s| s.name == name)
        .ok_or_else(|| StoreError::SheetNotFound(name.to_string()))
}

fn find_mut<'a>(workbook: &'a mut [Sheet], name: &str) -> Result<&'a mut Sheet, StoreError> {
    workbook
        .iter_mut()
        .find(|s| s.name == name)
        .ok_or_else(|| StoreError::SheetNotFound(name.to_string()))
}

/// Render a tagged formula into the host dialect. Arguments separate with
/// `;`, sheet-qualified cells quote the sheet name, and same-sheet cell
/// positions go through `INDIRECT` in R1C1 form so they survive row moves.
fn render_formula(formula: &Formula) -> String {
    match formula {
        Formula::Hyperlink { url, label } => {
            format!("=HYPERLINK(\"{}\"; \"{}\")", url, label)
        }
        Formula::ConditionalLookup {
            subject,
            branches,
            default,
        } => {
            let subject = format!("INDIRECT(\"R{}C{}\"; FALSE)", subject.row, subject.col);
            let mut expr = format!("{}", default);
            for (keyword, cell) in branches.iter().rev() {
                expr = format!(
                    "IF(ISERROR(SEARCH(\"{}\"; {})); {}; '{}'!{})",
                    keyword, subject, expr, cell.sheet, cell.cell
                );
            }
            format!("={}", expr)
        }
        Formula::WeightedReference { weight, value } => format!(
            "=INDIRECT(\"R{}C{}\"; FALSE) * '{}'!{}",
            weight.row, weight.col, value.sheet, value.cell
        ),
    }
}

/// Sort key for a cell: numbers compare by value, everything else sinks
/// below every number.
fn sort_key(cell: Option<&Cell>) -> f64 {
    cell.and_then(|c| c.value.as_number())
        .unwrap_or(f64::NEG_INFINITY)
}

#[async_trait]
impl TabularStore for InMemoryTabularStore {
    async fn sheet_exists(&self, name: &str) -> Result<bool, StoreError> {
        let workbook = self.workbook.read().unwrap();
        Ok(workbook.iter().any(|s| s.name == name))
    }

    async fn create_sheet(&self, name: &str) -> Result<(), StoreError> {
        let mut workbook = self.workbook.write().unwrap();
        if workbook.iter().any(|s| s.name == name) {
            return Err(StoreError::SheetExists(name.to_string()));
        }
        workbook.push(Sheet {
            name: name.to_string(),
            ..Sheet::default()
        });
        Ok(())
    }

    async fn set_value(
        &self,
        sheet: &str,
        row: u32,
        col: u32,
        value: CellValue,
    ) -> Result<(), StoreError> {
        let mut workbook = self.workbook.write().unwrap();
        let cell = find_mut(&mut workbook, sheet)?.cell_mut(row, col);
        cell.value = value;
        cell.formula = None;
        Ok(())
    }

    async fn set_formula(
        &self,
        sheet: &str,
        row: u32,
        col: u32,
        formula: &Formula,
    ) -> Result<(), StoreError> {
        let mut workbook = self.workbook.write().unwrap();
        let cell = find_mut(&mut workbook, sheet)?.cell_mut(row, col);
        cell.formula = Some(render_formula(formula));
        Ok(())
    }

    async fn set_column_width(&self, sheet: &str, col: u32, width: u32) -> Result<(), StoreError> {
        let mut workbook = self.workbook.write().unwrap();
        find_mut(&mut workbook, sheet)?.widths.insert(col, width);
        Ok(())
    }

    async fn set_text_style(
        &self,
        sheet: &str,
        row: u32,
        col: u32,
        style: &TextStyle,
    ) -> Result<(), StoreError> {
        let mut workbook = self.workbook.write().unwrap();
        find_mut(&mut workbook, sheet)?.cell_mut(row, col).style = Some(style.clone());
        Ok(())
    }

    async fn set_background(
        &self,
        sheet: &str,
        row: u32,
        col: u32,
        color: Rgb,
    ) -> Result<(), StoreError> {
        let mut workbook = self.workbook.write().unwrap();
        find_mut(&mut workbook, sheet)?.cell_mut(row, col).background = Some(color);
        Ok(())
    }

    async fn get_range(
        &self,
        sheet: &str,
        rows: RangeInclusive<u32>,
        cols: RangeInclusive<u32>,
    ) -> Result<Vec<Vec<CellValue>>, StoreError> {
        let workbook = self.workbook.read().unwrap();
        let sheet = find(&workbook, sheet)?;
        let mut grid = Vec::new();
        for row in rows {
            let mut values = Vec::new();
            for col in cols.clone() {
                values.push(
                    sheet
                        .cell(row, col)
                        .map(|c| c.value.clone())
                        .unwrap_or_default(),
                );
            }
            grid.push(values);
        }
        Ok(grid)
    }

    async fn sort_rows(
        &self,
        sheet: &str,
        rows: RangeInclusive<u32>,
        by_col: u32,
        descending: bool,
    ) -> Result<(), StoreError> {
        let mut workbook = self.workbook.write().unwrap();
        let sheet = find_mut(&mut workbook, sheet)?;

        let (start, end) = (*rows.start() as usize, *rows.end() as usize);
        if sheet.cells.len() < end {
            sheet.cells.resize_with(end, Vec::new);
        }
        let mut block: Vec<Vec<Cell>> = sheet.cells[start - 1..end].to_vec();
        if descending {
            block.sort_by(|a, b| {
                sort_key(b.get(by_col as usize - 1))
                    .partial_cmp(&sort_key(a.get(by_col as usize - 1)))
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
        } else {
            block.sort_by(|a, b| {
                sort_key(a.get(by_col as usize - 1))
                    .partial_cmp(&sort_key(b.get(by_col as usize - 1)))
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
        }
        sheet.cells.splice(start - 1..end, block);
        Ok(())
    }

    async fn last_row(&self, sheet: &str) -> Result<u32, StoreError> {
        let workbook = self.workbook.read().unwrap();
        let sheet = find(&workbook, sheet)?;
        let last = sheet
            .cells
            .iter()
            .rposition(|row| row.iter().any(Cell::has_content))
            .map(|i| i + 1)
            .unwrap_or(0);
        Ok(last as u32)
    }

    async fn last_column(&self, sheet: &str) -> Result<u32, StoreError> {
        let workbook = self.workbook.read().unwrap();
        let sheet = find(&workbook, sheet)?;
        let last = sheet
            .cells
            .iter()
            .map(|row| {
                row.iter()
                    .rposition(Cell::has_content)
                    .map(|i| i + 1)
                    .unwrap_or(0)
            })
            .max()
            .unwrap_or(0);
        Ok(last as u32)
    }
}
