// ============================================================================
// EXPORT — headless renderings of a mapping (text grid, CSV, JSON)
// ============================================================================

use std::fmt::Write as _;

use crate::grid::Mapping;
use crate::inspect::{NOT_APPLICABLE, group_thousands};

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    /// Aligned matrix with block rules
    Text,
    /// One line per cell
    Csv,
    /// Dimensions, totals and the full cell table
    Json,
}

impl ExportFormat {
    pub fn render(self, mapping: &Mapping) -> Result<String, String> {
        match self {
            ExportFormat::Text => Ok(render_text(mapping)),
            ExportFormat::Csv => Ok(render_csv(mapping)),
            ExportFormat::Json => render_json(mapping),
        }
    }
}

/// Summary header followed by the matrix. Block columns are split by `|`,
/// block rows by a `-` rule, and rows without threads are tagged.
pub fn render_text(mapping: &Mapping) -> String {
    let d = &mapping.dimensions;
    let t = &mapping.totals;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "gridDim = ({}, {})  blockDim = ({}, {})  arrayLength = {}",
        d.grid_dim_x, d.grid_dim_y, d.block_dim_x, d.block_dim_y, d.array_length
    );
    let _ = writeln!(
        out,
        "blocks {}  threads/block {}  total threads {}  matrix {} × {} ({} cells)",
        group_thousands(t.block_count),
        group_thousands(t.threads_per_block),
        group_thousands(t.total_threads),
        group_thousands(t.matrix_rows),
        t.total_columns,
        group_thousands(t.cell_count()),
    );
    out.push('\n');

    let width = t.cell_count().saturating_sub(1).to_string().len();
    let block_dim_x = d.block_dim_x as usize;
    let block_dim_y = d.block_dim_y as usize;

    for (row_idx, row) in mapping.rows().enumerate() {
        if row_idx > 0 && row_idx % block_dim_y == 0 {
            for column in 0..t.total_columns {
                if column > 0 && column % block_dim_x == 0 {
                    out.push_str("-+");
                }
                out.push_str(&"-".repeat(width + 1));
            }
            out.push('\n');
        }

        for cell in row {
            if cell.column > 0 && cell.column % block_dim_x == 0 {
                out.push_str(" |");
            }
            let label = if cell.within_array {
                cell.linear_index.to_string()
            } else {
                NOT_APPLICABLE.to_string()
            };
            let _ = write!(out, " {:>width$}", label);
        }
        if row_idx >= t.logical_grid_rows {
            out.push_str("   (no threads)");
        }
        out.push('\n');
    }
    out
}

pub const CSV_HEADER: &str = "row,column,linear_index,block_idx_x,block_idx_y,thread_idx_x,thread_idx_y,within_array,within_logical_grid";

pub fn render_csv(mapping: &Mapping) -> String {
    let mut out = String::with_capacity(mapping.cells.len() * 32);
    out.push_str(CSV_HEADER);
    out.push('\n');
    for c in &mapping.cells {
        let _ = writeln!(
            out,
            "{},{},{},{},{},{},{},{},{}",
            c.row,
            c.column,
            c.linear_index,
            c.block_idx_x,
            c.block_idx_y,
            c.thread_idx_x,
            c.thread_idx_y,
            c.within_array,
            c.within_logical_grid
        );
    }
    out
}

pub fn render_json(mapping: &Mapping) -> Result<String, String> {
    serde_json::to_string_pretty(mapping).map_err(|e| format!("JSON encoding failed: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{self, Dimensions};

    fn small() -> Mapping {
        grid::compute(&Dimensions {
            grid_dim_x: 2,
            grid_dim_y: 1,
            block_dim_x: 2,
            block_dim_y: 1,
            array_length: 6,
        })
    }

    #[test]
    fn text_grid_layout() {
        let text = render_text(&small());
        let lines: Vec<&str> = text.lines().collect();
        // 4 columns, 1 logical row, ceil(6/4) = 2 matrix rows, width 1
        assert_eq!(lines[3], " 0 1 | 2 3");
        assert_eq!(lines[4], "-----+----");
        assert_eq!(lines[5], " 4 5 | — —   (no threads)");
        assert_eq!(lines.len(), 6);
    }

    #[test]
    fn text_header_mentions_totals() {
        let text = render_text(&grid::compute(&Dimensions::default()));
        assert!(text.starts_with("gridDim = (3, 2)  blockDim = (8, 4)  arrayLength = 96\n"));
        assert!(text.contains("total threads 192"));
        assert!(text.contains("matrix 8 × 24 (192 cells)"));
    }

    #[test]
    fn csv_has_one_line_per_cell() {
        let m = small();
        let csv = render_csv(&m);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), m.cells.len() + 1);
        assert_eq!(lines[0], CSV_HEADER);
        assert_eq!(lines[1], "0,0,0,0,0,0,0,true,true");
        assert_eq!(lines[8], "1,3,7,1,1,1,0,false,false");
    }

    #[test]
    fn json_carries_the_cell_table() {
        let m = small();
        let json = render_json(&m).unwrap();
        let back: Mapping = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m);
    }
}
