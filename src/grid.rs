// ============================================================================
// GRID MAPPER — CUDA launch geometry projected onto a flattened 1D array
// ============================================================================
//
// The matrix is always `gridDim.x * blockDim.x` columns wide so that blocks
// line up vertically. Rows extend past the thread grid when the input array
// is longer than the grid can cover.

use serde::{Deserialize, Serialize};

pub const DEFAULT_GRID_DIM_X: u32 = 3;
pub const DEFAULT_GRID_DIM_Y: u32 = 2;
pub const DEFAULT_BLOCK_DIM_X: u32 = 8;
pub const DEFAULT_BLOCK_DIM_Y: u32 = 4;
pub const DEFAULT_ARRAY_LENGTH: u32 = 96;

pub const MAX_GRID_DIMENSION: u32 = 10;
pub const MAX_BLOCK_DIMENSION: u32 = 32;
pub const MAX_ARRAY_LENGTH: u32 = 4096;

// ============================================================================
// Input parsing
// ============================================================================

/// Parse the leading base-10 integer of `raw`, the way a browser's
/// `parseInt(raw, 10)` does: leading whitespace and one sign are skipped and
/// trailing garbage after the digits is ignored. Overflow saturates.
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let digits = rest.bytes().take_while(|b| b.is_ascii_digit());
    let mut seen_digit = false;
    let mut value: i64 = 0;
    for b in digits {
        seen_digit = true;
        value = value
            .saturating_mul(10)
            .saturating_add(i64::from(b - b'0'));
    }

    if !seen_digit {
        return None;
    }
    Some(if negative { -value } else { value })
}

/// Turn a raw text field into a usable dimension.
///
/// Unparseable or non-positive input falls back to `fallback`; anything else
/// is capped at `max_value`. Never fails.
pub fn clamp_integer_input(raw: &str, fallback: u32, max_value: u32) -> u32 {
    match parse_leading_int(raw) {
        Some(v) if v >= 1 => v.min(i64::from(max_value)) as u32,
        _ => fallback,
    }
}

// ============================================================================
// Dimension fields
// ============================================================================

/// One of the five user-editable launch parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DimensionField {
    GridDimX,
    GridDimY,
    BlockDimX,
    BlockDimY,
    ArrayLength,
}

impl DimensionField {
    pub const ALL: [DimensionField; 5] = [
        DimensionField::GridDimX,
        DimensionField::GridDimY,
        DimensionField::BlockDimX,
        DimensionField::BlockDimY,
        DimensionField::ArrayLength,
    ];

    pub fn default_value(self) -> u32 {
        match self {
            DimensionField::GridDimX => DEFAULT_GRID_DIM_X,
            DimensionField::GridDimY => DEFAULT_GRID_DIM_Y,
            DimensionField::BlockDimX => DEFAULT_BLOCK_DIM_X,
            DimensionField::BlockDimY => DEFAULT_BLOCK_DIM_Y,
            DimensionField::ArrayLength => DEFAULT_ARRAY_LENGTH,
        }
    }

    pub fn max_value(self) -> u32 {
        match self {
            DimensionField::GridDimX | DimensionField::GridDimY => MAX_GRID_DIMENSION,
            DimensionField::BlockDimX | DimensionField::BlockDimY => MAX_BLOCK_DIMENSION,
            DimensionField::ArrayLength => MAX_ARRAY_LENGTH,
        }
    }

    /// CUDA-style label shown next to the input.
    pub fn label(self) -> &'static str {
        match self {
            DimensionField::GridDimX => "gridDim.x",
            DimensionField::GridDimY => "gridDim.y",
            DimensionField::BlockDimX => "blockDim.x",
            DimensionField::BlockDimY => "blockDim.y",
            DimensionField::ArrayLength => "arrayLength",
        }
    }

    pub fn clamp(self, raw: &str) -> u32 {
        clamp_integer_input(raw, self.default_value(), self.max_value())
    }
}

// ============================================================================
// Dimensions & totals
// ============================================================================

/// Clamped launch configuration. Every field is in `[1, max]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimensions {
    pub grid_dim_x: u32,
    pub grid_dim_y: u32,
    pub block_dim_x: u32,
    pub block_dim_y: u32,
    pub array_length: u32,
}

impl Default for Dimensions {
    fn default() -> Self {
        Self {
            grid_dim_x: DEFAULT_GRID_DIM_X,
            grid_dim_y: DEFAULT_GRID_DIM_Y,
            block_dim_x: DEFAULT_BLOCK_DIM_X,
            block_dim_y: DEFAULT_BLOCK_DIM_Y,
            array_length: DEFAULT_ARRAY_LENGTH,
        }
    }
}

impl Dimensions {
    /// Build from raw text in `DimensionField::ALL` order.
    pub fn from_raw(raw: [&str; 5]) -> Self {
        Self {
            grid_dim_x: DimensionField::GridDimX.clamp(raw[0]),
            grid_dim_y: DimensionField::GridDimY.clamp(raw[1]),
            block_dim_x: DimensionField::BlockDimX.clamp(raw[2]),
            block_dim_y: DimensionField::BlockDimY.clamp(raw[3]),
            array_length: DimensionField::ArrayLength.clamp(raw[4]),
        }
    }

    pub fn get(&self, field: DimensionField) -> u32 {
        match field {
            DimensionField::GridDimX => self.grid_dim_x,
            DimensionField::GridDimY => self.grid_dim_y,
            DimensionField::BlockDimX => self.block_dim_x,
            DimensionField::BlockDimY => self.block_dim_y,
            DimensionField::ArrayLength => self.array_length,
        }
    }

    pub fn totals(&self) -> Totals {
        let block_count = (self.grid_dim_x * self.grid_dim_y) as usize;
        let threads_per_block = (self.block_dim_x * self.block_dim_y) as usize;
        let total_columns = (self.grid_dim_x * self.block_dim_x) as usize;
        let logical_grid_rows = (self.grid_dim_y * self.block_dim_y) as usize;
        let data_rows = (self.array_length as usize).div_ceil(total_columns);
        let matrix_rows = logical_grid_rows.max(data_rows);
        Totals {
            block_count,
            threads_per_block,
            total_threads: block_count * threads_per_block,
            total_columns,
            logical_grid_rows,
            matrix_rows,
        }
    }
}

/// Quantities derived from a `Dimensions`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    pub block_count: usize,
    pub threads_per_block: usize,
    pub total_threads: usize,
    pub total_columns: usize,
    pub logical_grid_rows: usize,
    pub matrix_rows: usize,
}

impl Totals {
    pub fn cell_count(&self) -> usize {
        self.matrix_rows * self.total_columns
    }
}

// ============================================================================
// Cells
// ============================================================================

/// Matrix position of a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellCoord {
    pub row: usize,
    pub column: usize,
}

impl CellCoord {
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

/// How a cell relates to the input data and to the launched threads.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellKind {
    /// Real data with a thread mapped onto it.
    Active,
    /// A scheduled thread past the end of the array.
    IdleThread,
    /// Real data below the thread grid's row extent.
    Unmapped,
    /// Neither data nor thread.
    Empty,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub column: usize,
    pub linear_index: usize,
    pub block_idx_x: usize,
    pub block_idx_y: usize,
    pub thread_idx_x: usize,
    pub thread_idx_y: usize,
    pub within_array: bool,
    pub within_logical_grid: bool,
}

impl Cell {
    pub fn coord(&self) -> CellCoord {
        CellCoord::new(self.row, self.column)
    }

    pub fn kind(&self) -> CellKind {
        match (self.within_array, self.within_logical_grid) {
            (true, true) => CellKind::Active,
            (false, true) => CellKind::IdleThread,
            (true, false) => CellKind::Unmapped,
            (false, false) => CellKind::Empty,
        }
    }

    /// First row or column of its block.
    pub fn on_block_edge(&self) -> bool {
        self.thread_idx_x == 0 || self.thread_idx_y == 0
    }
}

// ============================================================================
// Mapping
// ============================================================================

/// Full cell table for one `Dimensions`, row-major.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mapping {
    pub dimensions: Dimensions,
    pub totals: Totals,
    pub cells: Vec<Cell>,
}

impl Mapping {
    pub fn cell(&self, row: usize, column: usize) -> Option<&Cell> {
        if row >= self.totals.matrix_rows || column >= self.totals.total_columns {
            return None;
        }
        self.cells.get(row * self.totals.total_columns + column)
    }

    pub fn cell_at(&self, coord: CellCoord) -> Option<&Cell> {
        self.cell(coord.row, coord.column)
    }

    /// Iterate the matrix one row slice at a time.
    pub fn rows(&self) -> std::slice::Chunks<'_, Cell> {
        self.cells.chunks(self.totals.total_columns)
    }
}

/// Enumerate every cell of the matrix for `dims`.
pub fn compute(dims: &Dimensions) -> Mapping {
    let totals = dims.totals();
    let block_dim_x = dims.block_dim_x as usize;
    let block_dim_y = dims.block_dim_y as usize;
    let array_length = dims.array_length as usize;

    let mut cells = Vec::with_capacity(totals.cell_count());
    for row in 0..totals.matrix_rows {
        for column in 0..totals.total_columns {
            let linear_index = row * totals.total_columns + column;
            cells.push(Cell {
                row,
                column,
                linear_index,
                block_idx_x: column / block_dim_x,
                block_idx_y: row / block_dim_y,
                thread_idx_x: column % block_dim_x,
                thread_idx_y: row % block_dim_y,
                within_array: linear_index < array_length,
                within_logical_grid: row < totals.logical_grid_rows,
            });
        }
    }

    Mapping {
        dimensions: *dims,
        totals,
        cells,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dims(gx: u32, gy: u32, bx: u32, by: u32, len: u32) -> Dimensions {
        Dimensions {
            grid_dim_x: gx,
            grid_dim_y: gy,
            block_dim_x: bx,
            block_dim_y: by,
            array_length: len,
        }
    }

    #[test]
    fn parse_leading_int_matches_browser_parse_int() {
        assert_eq!(parse_leading_int("42"), Some(42));
        assert_eq!(parse_leading_int("  7"), Some(7));
        assert_eq!(parse_leading_int("12px"), Some(12));
        assert_eq!(parse_leading_int("3.9"), Some(3));
        assert_eq!(parse_leading_int("-5"), Some(-5));
        assert_eq!(parse_leading_int("+8"), Some(8));
        assert_eq!(parse_leading_int(""), None);
        assert_eq!(parse_leading_int("abc"), None);
        assert_eq!(parse_leading_int("-"), None);
        assert_eq!(parse_leading_int("99999999999999999999999"), Some(i64::MAX));
    }

    #[test]
    fn clamp_substitutes_default_for_bad_input() {
        assert_eq!(clamp_integer_input("0", 96, 4096), 96);
        assert_eq!(clamp_integer_input("-3", 96, 4096), 96);
        assert_eq!(clamp_integer_input("", 96, 4096), 96);
        assert_eq!(clamp_integer_input("x", 96, 4096), 96);
    }

    #[test]
    fn clamp_caps_at_max() {
        assert_eq!(DimensionField::GridDimX.clamp("100"), MAX_GRID_DIMENSION);
        assert_eq!(DimensionField::BlockDimY.clamp("33"), MAX_BLOCK_DIMENSION);
        assert_eq!(DimensionField::ArrayLength.clamp("5000"), MAX_ARRAY_LENGTH);
        assert_eq!(DimensionField::ArrayLength.clamp("4096"), 4096);
        assert_eq!(DimensionField::GridDimY.clamp("1"), 1);
    }

    #[test]
    fn from_raw_uses_per_field_defaults() {
        let d = Dimensions::from_raw(["", "nope", "0", "-1", "0"]);
        assert_eq!(d, Dimensions::default());
    }

    #[test]
    fn default_launch_totals() {
        let t = Dimensions::default().totals();
        assert_eq!(t.total_columns, 24);
        assert_eq!(t.logical_grid_rows, 8);
        assert_eq!(t.block_count, 6);
        assert_eq!(t.threads_per_block, 32);
        assert_eq!(t.total_threads, 192);
        assert_eq!(t.matrix_rows, 8);
        assert_eq!(t.cell_count(), 192);
    }

    #[test]
    fn first_and_last_cell_of_default_launch() {
        let m = compute(&Dimensions::default());
        assert_eq!(m.cells.len(), 192);

        let first = m.cell(0, 0).unwrap();
        assert_eq!(first.linear_index, 0);
        assert!(first.within_array);
        assert!(first.within_logical_grid);
        assert_eq!((first.block_idx_x, first.block_idx_y), (0, 0));
        assert_eq!((first.thread_idx_x, first.thread_idx_y), (0, 0));

        let last = m.cell(7, 23).unwrap();
        assert_eq!(last.linear_index, 191);
        assert!(!last.within_array);
        assert!(last.within_logical_grid);
        assert_eq!((last.block_idx_x, last.block_idx_y), (2, 1));
        assert_eq!((last.thread_idx_x, last.thread_idx_y), (7, 3));
        assert_eq!(last.kind(), CellKind::IdleThread);
    }

    #[test]
    fn array_longer_than_grid_adds_unmapped_rows() {
        // 2 columns, 1 logical row, 10 elements -> 5 rows
        let m = compute(&dims(1, 1, 2, 1, 10));
        assert_eq!(m.totals.matrix_rows, 5);
        assert_eq!(m.totals.logical_grid_rows, 1);
        let below = m.cell(3, 1).unwrap();
        assert_eq!(below.linear_index, 7);
        assert!(below.within_array);
        assert!(!below.within_logical_grid);
        assert_eq!(below.kind(), CellKind::Unmapped);
    }

    #[test]
    fn partial_last_data_row_rounds_up() {
        // 3 columns, 7 elements -> ceil(7/3) = 3 rows
        let m = compute(&dims(1, 1, 3, 1, 7));
        assert_eq!(m.totals.matrix_rows, 3);
        assert_eq!(m.cell(2, 0).unwrap().kind(), CellKind::Unmapped);
        assert_eq!(m.cell(2, 1).unwrap().kind(), CellKind::Empty);
    }

    #[test]
    fn cell_lookup_out_of_range() {
        let m = compute(&Dimensions::default());
        assert!(m.cell(8, 0).is_none());
        assert!(m.cell(0, 24).is_none());
        assert!(m.cell_at(CellCoord::new(3, 5)).is_some());
    }

    #[test]
    fn rows_are_full_width_slices() {
        let m = compute(&dims(2, 1, 3, 2, 5));
        let rows: Vec<_> = m.rows().collect();
        assert_eq!(rows.len(), m.totals.matrix_rows);
        for (r, row) in rows.iter().enumerate() {
            assert_eq!(row.len(), 6);
            assert!(row.iter().all(|c| c.row == r));
        }
    }

    #[test]
    fn block_edges() {
        let m = compute(&Dimensions::default());
        assert!(m.cell(0, 5).unwrap().on_block_edge());
        assert!(m.cell(5, 8).unwrap().on_block_edge());
        assert!(!m.cell(5, 9).unwrap().on_block_edge());
    }
}
