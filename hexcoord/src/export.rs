//! Spreadsheet export of every shape.
//!
//! The table is built first as plain data so ordering and sizing can be
//! checked without reading the workbook back.

use chrono::Local;
use rust_xlsxwriter::{Format, Workbook, XlsxError};

use hexcoord_shared::errors::{HexcoordError, HexcoordResult};

use crate::model::{HexPoint, Shape};

/// Column headers, in output order.
pub const HEADERS: [&str; 8] = [
    "id",
    "shape_type",
    "origin_id",
    "origin_q",
    "origin_r",
    "origin_s",
    "magnitude",
    "created_at",
];

pub const SHEET_NAME: &str = "shapes";

/// Largest magnitude an XLSX number (an f64) holds exactly.
const MAX_EXACT_NUMBER: u64 = 1 << 53;

const MIN_COLUMN_WIDTH: usize = 10;
const MAX_COLUMN_WIDTH: usize = 40;
const COLUMN_PADDING: usize = 2;

/// Local wall-clock time without an offset.
const CREATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Cell {
    Int(i64),
    Text(String),
}

/// What actually lands in a worksheet cell.
#[derive(Clone, Debug, PartialEq)]
enum SheetValue<'a> {
    Number(f64),
    Text(&'a str),
    Owned(String),
}

impl Cell {
    /// Integers beyond 2^53 would round as doubles, so they are written as
    /// text to keep every digit.
    fn sheet_value(&self) -> SheetValue<'_> {
        match self {
            Cell::Int(v) if v.unsigned_abs() <= MAX_EXACT_NUMBER => SheetValue::Number(*v as f64),
            Cell::Int(v) => SheetValue::Owned(v.to_string()),
            Cell::Text(s) => SheetValue::Text(s),
        }
    }

    fn display_len(&self) -> usize {
        match self {
            Cell::Int(v) => v.to_string().chars().count(),
            Cell::Text(s) => s.chars().count(),
        }
    }
}

/// Header plus one row per shape, ordered by shape id.
#[derive(Clone, Debug)]
pub struct ExportTable {
    pub headers: [&'static str; 8],
    pub rows: Vec<Vec<Cell>>,
}

impl Default for ExportTable {
    fn default() -> Self {
        Self {
            headers: HEADERS,
            rows: Vec::new(),
        }
    }
}

impl ExportTable {
    /// Build rows from `(shape, origin)` pairs, keeping their order.
    pub fn from_shapes(shapes: &[(Shape, HexPoint)]) -> Self {
        let rows = shapes
            .iter()
            .map(|(shape, origin)| {
                vec![
                    Cell::Int(shape.id),
                    Cell::Text(shape.kind.as_str().to_string()),
                    Cell::Int(origin.id),
                    Cell::Int(origin.coord.q),
                    Cell::Int(origin.coord.r),
                    Cell::Int(origin.coord.s),
                    Cell::Int(shape.magnitude),
                    Cell::Text(
                        shape
                            .created_at
                            .with_timezone(&Local)
                            .format(CREATED_AT_FORMAT)
                            .to_string(),
                    ),
                ]
            })
            .collect();
        Self {
            headers: HEADERS,
            rows,
        }
    }

    /// Width per column: longest header or value, clamped, plus padding.
    pub fn column_widths(&self) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .map(|(col, header)| {
                let longest = self
                    .rows
                    .iter()
                    .filter_map(|row| row.get(col))
                    .map(Cell::display_len)
                    .chain(std::iter::once(header.chars().count()))
                    .max()
                    .unwrap_or(0);
                longest.clamp(MIN_COLUMN_WIDTH, MAX_COLUMN_WIDTH) + COLUMN_PADDING
            })
            .collect()
    }
}

/// Render the table as an in-memory XLSX document.
pub fn render_xlsx(table: &ExportTable) -> HexcoordResult<Vec<u8>> {
    write_workbook(table).map_err(|e| HexcoordError::Export(e.to_string()))
}

fn write_workbook(table: &ExportTable) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();

    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (col, header) in (0u16..).zip(table.headers) {
        sheet.write_string_with_format(0, col, header, &bold)?;
    }

    for (row_num, row) in (1u32..).zip(&table.rows) {
        for (col, cell) in (0u16..).zip(row) {
            match cell.sheet_value() {
                SheetValue::Number(n) => sheet.write_number(row_num, col, n)?,
                SheetValue::Text(s) => sheet.write_string(row_num, col, s)?,
                SheetValue::Owned(s) => sheet.write_string(row_num, col, s)?,
            };
        }
    }

    for (col, width) in (0u16..).zip(table.column_widths()) {
        sheet.set_column_width(col, width as f64)?;
    }
    sheet.set_freeze_panes(1, 0)?;

    workbook.save_to_buffer()
}
