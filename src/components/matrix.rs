use eframe::egui;
use egui::{Align2, Color32, FontId, Pos2, Rect, Sense, Stroke, Vec2};

use crate::grid::{CellCoord, Mapping};
use crate::palette;
use crate::session::VisualizerSession;
use crate::theme::Theme;

/// Space between neighbouring cells, in points.
const CELL_GAP: f32 = 2.0;
/// Below this cell size the index labels are unreadable and skipped.
const MIN_LABEL_CELL_SIZE: f32 = 18.0;

// ============================================================================
// Geometry helpers
// ============================================================================

/// Cell under `pos` for a matrix whose top-left corner is `origin`.
///
/// The gap between cells belongs to no cell.
pub fn cell_at_pos(
    origin: Pos2,
    pos: Pos2,
    cell_size: f32,
    rows: usize,
    columns: usize,
) -> Option<CellCoord> {
    let pitch = cell_size + CELL_GAP;
    let local = pos - origin;
    if local.x < 0.0 || local.y < 0.0 || cell_size <= 0.0 {
        return None;
    }
    if local.x % pitch > cell_size || local.y % pitch > cell_size {
        return None;
    }
    let column = (local.x / pitch).floor() as usize;
    let row = (local.y / pitch).floor() as usize;
    (row < rows && column < columns).then(|| CellCoord::new(row, column))
}

/// Move `from` one step in the arrow direction, staying inside the matrix.
pub fn step(from: CellCoord, key: egui::Key, rows: usize, columns: usize) -> CellCoord {
    let mut to = from;
    match key {
        egui::Key::ArrowLeft => to.column = from.column.saturating_sub(1),
        egui::Key::ArrowRight => to.column = (from.column + 1).min(columns.saturating_sub(1)),
        egui::Key::ArrowUp => to.row = from.row.saturating_sub(1),
        egui::Key::ArrowDown => to.row = (from.row + 1).min(rows.saturating_sub(1)),
        _ => {}
    }
    to
}

/// Half-open index range of cells that intersect `[lo, hi)` along one axis.
fn visible_range(lo: f32, hi: f32, start: f32, pitch: f32, count: usize) -> std::ops::Range<usize> {
    let first = ((lo - start) / pitch).floor().max(0.0) as usize;
    let last = (((hi - start) / pitch).ceil().max(0.0) as usize).min(count);
    first.min(last)..last
}

// ============================================================================
// MatrixView — interactive cell grid
// ============================================================================

/// Draws the whole matrix as one widget and turns pointer / keyboard input
/// into hover and unhover events on the session.
///
/// The widget is focusable: Tab lands on it and the arrow keys walk the
/// focused cell, which counts as hovered just like the pointer does.
#[derive(Default)]
pub struct MatrixView {
    pointer_cell: Option<CellCoord>,
    focus_cell: Option<CellCoord>,
    seen_generation: Option<u64>,
}

impl MatrixView {
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        session: &mut VisualizerSession,
        theme: &Theme,
        cell_size: f32,
        show_labels: bool,
    ) {
        let totals = session.mapping().totals;
        let pitch = cell_size + CELL_GAP;
        let desired = Vec2::new(
            totals.total_columns as f32 * pitch,
            totals.matrix_rows as f32 * pitch,
        );
        let (rect, response) = ui.allocate_exact_size(desired, Sense::click());

        let pointer_now = response
            .hover_pos()
            .and_then(|p| cell_at_pos(rect.min, p, cell_size, totals.matrix_rows, totals.total_columns));

        // The table was rebuilt under us: everything tracked refers to old cells.
        if self.seen_generation != Some(session.generation()) {
            self.seen_generation = Some(session.generation());
            self.pointer_cell = pointer_now;
            self.focus_cell = None;
        }

        self.track_pointer(session, pointer_now);
        self.track_focus(ui, &response, session, totals.matrix_rows, totals.total_columns);

        if response.clicked() {
            response.request_focus();
        }

        if ui.is_rect_visible(rect) {
            self.paint(ui, rect, session, theme, cell_size, show_labels);
        }
    }

    fn track_pointer(&mut self, session: &mut VisualizerSession, now: Option<CellCoord>) {
        if now == self.pointer_cell {
            return;
        }
        if let Some(left) = self.pointer_cell {
            session.unhover(left);
        }
        if let Some(entered) = now {
            session.hover(entered);
        }
        self.pointer_cell = now;
    }

    fn track_focus(
        &mut self,
        ui: &egui::Ui,
        response: &egui::Response,
        session: &mut VisualizerSession,
        rows: usize,
        columns: usize,
    ) {
        if response.lost_focus() {
            if let Some(blurred) = self.focus_cell.take() {
                session.unhover(blurred);
            }
            return;
        }
        if !response.has_focus() {
            return;
        }

        // Keep the arrow keys for cell navigation instead of moving widget focus.
        ui.memory_mut(|mem| {
            mem.set_focus_lock_filter(
                response.id,
                egui::EventFilter {
                    arrows: true,
                    ..Default::default()
                },
            )
        });

        if response.gained_focus() || self.focus_cell.is_none() {
            let start = self.pointer_cell.unwrap_or(CellCoord::new(0, 0));
            self.focus_cell = Some(start);
            session.hover(start);
        }

        let pressed = ui.input(|i| {
            [
                egui::Key::ArrowLeft,
                egui::Key::ArrowRight,
                egui::Key::ArrowUp,
                egui::Key::ArrowDown,
            ]
            .into_iter()
            .filter(|k| i.key_pressed(*k))
            .collect::<Vec<_>>()
        });
        for key in pressed {
            if let Some(from) = self.focus_cell {
                let to = step(from, key, rows, columns);
                if to != from {
                    session.unhover(from);
                    session.hover(to);
                    self.focus_cell = Some(to);
                }
            }
        }
    }

    fn paint(
        &self,
        ui: &egui::Ui,
        rect: Rect,
        session: &VisualizerSession,
        theme: &Theme,
        cell_size: f32,
        show_labels: bool,
    ) {
        let mapping: &Mapping = session.mapping();
        let totals = mapping.totals;
        let grid_dim_x = mapping.dimensions.grid_dim_x;
        let pitch = cell_size + CELL_GAP;
        let painter = ui.painter_at(rect);
        let clip = ui.clip_rect().intersect(rect);

        let rows = visible_range(clip.top(), clip.bottom(), rect.top(), pitch, totals.matrix_rows);
        let columns = visible_range(clip.left(), clip.right(), rect.left(), pitch, totals.total_columns);

        let label_font = FontId::monospace((cell_size * 0.34).clamp(8.0, 14.0));
        let draw_labels = show_labels && cell_size >= MIN_LABEL_CELL_SIZE;

        for row in rows {
            for column in columns.clone() {
                let Some(cell) = mapping.cell(row, column) else { continue };
                let min = Pos2::new(
                    rect.left() + column as f32 * pitch,
                    rect.top() + row as f32 * pitch,
                );
                let cell_rect = Rect::from_min_size(min, Vec2::splat(cell_size));
                let style = palette::cell_style(cell, grid_dim_x);

                if style.fill != Color32::TRANSPARENT {
                    painter.rect_filled(cell_rect, 2.0, style.fill);
                }
                painter.rect_stroke(cell_rect, 2.0, Stroke::new(1.0, style.border));

                if draw_labels {
                    painter.text(
                        cell_rect.center(),
                        Align2::CENTER_CENTER,
                        palette::cell_label(cell),
                        label_font.clone(),
                        style.text,
                    );
                }
            }
        }

        if let Some(hovered) = session.hovered() {
            let min = Pos2::new(
                rect.left() + hovered.column as f32 * pitch,
                rect.top() + hovered.row as f32 * pitch,
            );
            let cell_rect = Rect::from_min_size(min, Vec2::splat(cell_size));
            painter.rect_stroke(cell_rect.expand(1.0), 3.0, Stroke::new(2.0, theme.highlight));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_maps_to_cell() {
        let origin = Pos2::new(10.0, 20.0);
        assert_eq!(
            cell_at_pos(origin, Pos2::new(10.0, 20.0), 30.0, 8, 24),
            Some(CellCoord::new(0, 0))
        );
        assert_eq!(
            cell_at_pos(origin, Pos2::new(10.0 + 32.0 * 23.5, 20.0 + 32.0 * 7.9), 30.0, 8, 24),
            Some(CellCoord::new(7, 23))
        );
        assert_eq!(cell_at_pos(origin, Pos2::new(9.0, 25.0), 30.0, 8, 24), None);
        assert_eq!(cell_at_pos(origin, Pos2::new(10.0 + 32.0 * 24.0, 25.0), 30.0, 8, 24), None);
    }

    #[test]
    fn gaps_between_cells_hit_nothing() {
        let origin = Pos2::ZERO;
        // 30 pt cells, 2 pt gap: column 0 spans [0, 30], the gap (30, 32)
        assert_eq!(cell_at_pos(origin, Pos2::new(29.5, 5.0), 30.0, 8, 24), Some(CellCoord::new(0, 0)));
        assert_eq!(cell_at_pos(origin, Pos2::new(31.0, 5.0), 30.0, 8, 24), None);
        assert_eq!(cell_at_pos(origin, Pos2::new(5.0, 31.0), 30.0, 8, 24), None);
        assert_eq!(cell_at_pos(origin, Pos2::new(31.0, 31.0), 30.0, 8, 24), None);
        assert_eq!(cell_at_pos(origin, Pos2::new(33.0, 33.0), 30.0, 8, 24), Some(CellCoord::new(1, 1)));
    }

    #[test]
    fn arrow_steps_stay_inside() {
        let corner = CellCoord::new(0, 0);
        assert_eq!(step(corner, egui::Key::ArrowLeft, 8, 24), corner);
        assert_eq!(step(corner, egui::Key::ArrowUp, 8, 24), corner);
        assert_eq!(step(corner, egui::Key::ArrowRight, 8, 24), CellCoord::new(0, 1));
        let far = CellCoord::new(7, 23);
        assert_eq!(step(far, egui::Key::ArrowDown, 8, 24), far);
        assert_eq!(step(far, egui::Key::ArrowRight, 8, 24), far);
        assert_eq!(step(far, egui::Key::ArrowUp, 8, 24), CellCoord::new(6, 23));
    }

    #[test]
    fn visible_range_clips_to_count() {
        assert_eq!(visible_range(0.0, 100.0, 0.0, 10.0, 50), 0..10);
        assert_eq!(visible_range(25.0, 55.0, 0.0, 10.0, 50), 2..6);
        assert_eq!(visible_range(0.0, 1000.0, 0.0, 10.0, 50), 0..50);
        assert_eq!(visible_range(-50.0, -10.0, 0.0, 10.0, 50), 0..0);
    }

    #[test]
    fn pointer_moves_emit_leave_then_enter() {
        let mut view = MatrixView::default();
        let mut session = VisualizerSession::default();
        view.track_pointer(&mut session, Some(CellCoord::new(1, 2)));
        assert_eq!(session.hovered(), Some(CellCoord::new(1, 2)));
        view.track_pointer(&mut session, Some(CellCoord::new(1, 3)));
        assert_eq!(session.hovered(), Some(CellCoord::new(1, 3)));
        view.track_pointer(&mut session, None);
        assert_eq!(session.hovered(), None);
    }
}
