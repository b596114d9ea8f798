//! Text shown in the "Current totals" and "Active cell" panels.

use crate::grid::{Cell, CellKind, Dimensions, Totals};
use crate::t;

/// Placeholder for a value that does not apply to the hovered cell.
pub const NOT_APPLICABLE: &str = "—";

/// Format `n` with `,` between groups of three digits.
pub fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// One labelled line of the totals panel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TotalsLine {
    pub label: String,
    pub value: String,
    /// Rendered in the accent color.
    pub highlight: bool,
}

pub fn totals_lines(dims: &Dimensions, totals: &Totals) -> Vec<TotalsLine> {
    vec![
        TotalsLine {
            label: t!("totals.blocks"),
            value: format!(
                "{} × {} = {}",
                dims.grid_dim_x,
                dims.grid_dim_y,
                group_thousands(totals.block_count)
            ),
            highlight: false,
        },
        TotalsLine {
            label: t!("totals.threads_per_block"),
            value: format!(
                "{} × {} = {}",
                dims.block_dim_x,
                dims.block_dim_y,
                group_thousands(totals.threads_per_block)
            ),
            highlight: false,
        },
        TotalsLine {
            label: t!("totals.total_threads"),
            value: group_thousands(totals.total_threads),
            highlight: true,
        },
        TotalsLine {
            label: t!("totals.matrix"),
            value: t!(
                "totals.matrix_value",
                rows = group_thousands(totals.matrix_rows),
                cols = totals.total_columns,
                cells = group_thousands(totals.cell_count())
            ),
            highlight: false,
        },
    ]
}

/// Formatted coordinates of the hovered cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellReadout {
    pub global_index: String,
    pub block_idx: String,
    pub thread_idx: String,
    pub matrix_coord: String,
    pub explanation: String,
}

impl CellReadout {
    pub fn new(cell: Option<&Cell>) -> Self {
        let global_index = match cell {
            Some(c) if c.within_array => c.linear_index.to_string(),
            _ => format!("{} (N/A)", NOT_APPLICABLE),
        };
        let (block_idx, thread_idx) = match cell {
            Some(c) if c.within_logical_grid => (
                format!("({}, {})", c.block_idx_x, c.block_idx_y),
                format!("({}, {})", c.thread_idx_x, c.thread_idx_y),
            ),
            _ => (NOT_APPLICABLE.to_string(), NOT_APPLICABLE.to_string()),
        };
        let matrix_coord = match cell {
            Some(c) => format!("({}, {})", c.row, c.column),
            None => NOT_APPLICABLE.to_string(),
        };

        Self {
            global_index,
            block_idx,
            thread_idx,
            matrix_coord,
            explanation: describe_cell(cell),
        }
    }
}

/// One-sentence explanation of what a cell represents.
pub fn describe_cell(cell: Option<&Cell>) -> String {
    let Some(cell) = cell else {
        return t!("cell.describe.none");
    };
    match cell.kind() {
        CellKind::IdleThread | CellKind::Empty => t!("cell.describe.idle"),
        CellKind::Unmapped => t!("cell.describe.unmapped"),
        CellKind::Active => t!("cell.describe.active"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{self, Dimensions};

    #[test]
    fn thousands_grouping() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(192), "192");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(102400), "102,400");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }

    #[test]
    fn readout_without_hover() {
        let r = CellReadout::new(None);
        assert_eq!(r.global_index, "— (N/A)");
        assert_eq!(r.block_idx, "—");
        assert_eq!(r.thread_idx, "—");
        assert_eq!(r.matrix_coord, "—");
    }

    #[test]
    fn readout_for_idle_thread() {
        let m = grid::compute(&Dimensions::default());
        let r = CellReadout::new(m.cell(7, 23));
        assert_eq!(r.global_index, "— (N/A)");
        assert_eq!(r.block_idx, "(2, 1)");
        assert_eq!(r.thread_idx, "(7, 3)");
        assert_eq!(r.matrix_coord, "(7, 23)");
    }

    #[test]
    fn readout_for_active_thread() {
        let m = grid::compute(&Dimensions::default());
        let r = CellReadout::new(m.cell(2, 10));
        assert_eq!(r.global_index, "58");
        assert_eq!(r.block_idx, "(1, 0)");
        assert_eq!(r.thread_idx, "(2, 2)");
    }

    #[test]
    fn readout_for_unmapped_data() {
        let dims = Dimensions {
            grid_dim_x: 1,
            grid_dim_y: 1,
            block_dim_x: 4,
            block_dim_y: 1,
            array_length: 12,
        };
        let m = grid::compute(&dims);
        let r = CellReadout::new(m.cell(2, 1));
        assert_eq!(r.global_index, "9");
        assert_eq!(r.block_idx, "—");
        assert_eq!(r.thread_idx, "—");
        assert_eq!(r.matrix_coord, "(2, 1)");
    }

    #[test]
    fn explanation_per_cell_kind() {
        let en = |key: &str| crate::i18n::translate_in("en", key);
        let dims = Dimensions {
            grid_dim_x: 1,
            grid_dim_y: 1,
            block_dim_x: 3,
            block_dim_y: 1,
            array_length: 7,
        };
        let m = grid::compute(&dims);

        assert_eq!(describe_cell(None), en("cell.describe.none"));
        assert_eq!(describe_cell(m.cell(0, 1)), en("cell.describe.active"));
        assert_eq!(describe_cell(m.cell(2, 0)), en("cell.describe.unmapped"));
        // Outside both the array and the grid: the array check wins.
        assert_eq!(m.cell(2, 2).map(Cell::kind), Some(CellKind::Empty));
        assert_eq!(describe_cell(m.cell(2, 2)), en("cell.describe.idle"));

        let idle = grid::compute(&Dimensions::default());
        assert_eq!(describe_cell(idle.cell(7, 23)), en("cell.describe.idle"));
        assert_eq!(CellReadout::new(idle.cell(7, 23)).explanation, en("cell.describe.idle"));
    }

    #[test]
    fn totals_for_default_launch() {
        let dims = Dimensions::default();
        let lines = totals_lines(&dims, &dims.totals());
        let values: Vec<&str> = lines.iter().map(|l| l.value.as_str()).collect();
        assert_eq!(values, ["3 × 2 = 6", "8 × 4 = 32", "192", "8 × 24 (192 cells)"]);
        assert_eq!(
            lines.iter().map(|l| l.highlight).collect::<Vec<_>>(),
            [false, false, true, false]
        );
    }

    #[test]
    fn totals_group_large_counts() {
        let dims = Dimensions {
            grid_dim_x: 10,
            grid_dim_y: 10,
            block_dim_x: 32,
            block_dim_y: 32,
            array_length: 4096,
        };
        let lines = totals_lines(&dims, &dims.totals());
        assert_eq!(lines[0].value, "10 × 10 = 100");
        assert_eq!(lines[1].value, "32 × 32 = 1,024");
        assert_eq!(lines[2].value, "102,400");
        assert_eq!(lines[3].value, "320 × 320 (102,400 cells)");
    }
}
