// ============================================================================
// BLOCK PALETTE — per-cell colors for the CUDA grid overlay
// ============================================================================

use eframe::egui::Color32;

use crate::grid::{Cell, CellKind};

/// Block tint colors, cycled across blocks in row-major block order.
pub const BLOCK_PALETTE: [[u8; 3]; 6] = [
    [139, 92, 246],
    [14, 165, 233],
    [16, 185, 129],
    [249, 115, 22],
    [236, 72, 153],
    [217, 119, 6],
];

const SLATE: [u8; 3] = [148, 163, 184];
const BORDER_BLOCK_EDGE: Color32 = Color32::from_rgba_premultiplied(13, 20, 36, 217);
const BORDER_INNER: Color32 = Color32::from_rgba_premultiplied(36, 46, 60, 179);
const TEXT_DATA: Color32 = Color32::from_rgb(226, 232, 240);
const TEXT_IDLE: Color32 = Color32::from_rgb(100, 116, 139);

/// Index into [`BLOCK_PALETTE`] for a cell's block.
pub fn block_color_index(cell: &Cell, grid_dim_x: u32) -> usize {
    (cell.block_idx_y * grid_dim_x as usize + cell.block_idx_x) % BLOCK_PALETTE.len()
}

fn rgba(rgb: [u8; 3], alpha: f32) -> Color32 {
    Color32::from_rgba_unmultiplied(rgb[0], rgb[1], rgb[2], (alpha * 255.0).round() as u8)
}

/// Resolved colors for drawing one cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellStyle {
    pub fill: Color32,
    pub border: Color32,
    pub text: Color32,
}

pub fn cell_style(cell: &Cell, grid_dim_x: u32) -> CellStyle {
    let block_rgb = BLOCK_PALETTE[block_color_index(cell, grid_dim_x)];
    let fill = match cell.kind() {
        CellKind::Active => rgba(block_rgb, 0.35),
        CellKind::IdleThread => rgba(block_rgb, 0.15),
        CellKind::Unmapped => rgba(SLATE, 0.12),
        CellKind::Empty => Color32::TRANSPARENT,
    };
    let border = if cell.on_block_edge() {
        BORDER_BLOCK_EDGE
    } else {
        BORDER_INNER
    };
    let text = if cell.within_array { TEXT_DATA } else { TEXT_IDLE };
    CellStyle { fill, border, text }
}

/// Text drawn inside a cell.
pub fn cell_label(cell: &Cell) -> String {
    if cell.within_array {
        cell.linear_index.to_string()
    } else {
        crate::inspect::NOT_APPLICABLE.to_string()
    }
}
