use eframe::egui;
use egui::RichText;

use crate::grid::Cell;
use crate::inspect::{self, CellReadout};
use crate::session::VisualizerSession;
use crate::t;
use crate::theme::Theme;

fn card(ui: &mut egui::Ui, theme: &Theme, title: &str, add_contents: impl FnOnce(&mut egui::Ui)) {
    egui::Frame::none()
        .fill(theme.window_bg)
        .stroke(egui::Stroke::new(1.0, theme.panel_border))
        .rounding(12.0)
        .inner_margin(14.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(title.to_uppercase()).strong().color(theme.text_muted));
            ui.add_space(8.0);
            add_contents(ui);
        });
}

/// "Current totals" card.
pub fn show_totals(ui: &mut egui::Ui, session: &VisualizerSession, theme: &Theme) {
    let mapping = session.mapping();
    let lines = inspect::totals_lines(&mapping.dimensions, &mapping.totals);

    card(ui, theme, &t!("panel.totals"), |ui| {
        egui::Grid::new("totals_grid")
            .num_columns(2)
            .spacing([18.0, 10.0])
            .show(ui, |ui| {
                for (i, line) in lines.iter().enumerate() {
                    ui.vertical(|ui| {
                        ui.label(RichText::new(line.label.to_uppercase()).small().color(theme.text_muted));
                        let color = if line.highlight { theme.accent } else { theme.text_strong };
                        ui.label(RichText::new(&line.value).size(19.0).strong().color(color));
                    });
                    if i % 2 == 1 {
                        ui.end_row();
                    }
                }
            });
    });
}

/// "Active cell" card for the hovered cell.
pub fn show_active_cell(ui: &mut egui::Ui, hovered: Option<&Cell>, theme: &Theme) {
    let readout = CellReadout::new(hovered);

    card(ui, theme, &t!("panel.active_cell"), |ui| {
        ui.label(RichText::new(t!("panel.active_hint")).small().color(theme.text_muted));
        ui.add_space(8.0);

        ui.label(
            RichText::new(format!("{}: {}", t!("cell.global_index"), readout.global_index))
                .monospace()
                .size(16.0)
                .color(theme.text_strong),
        );
        for (key, value) in [
            ("cell.block_idx", &readout.block_idx),
            ("cell.thread_idx", &readout.thread_idx),
            ("cell.matrix_coord", &readout.matrix_coord),
        ] {
            ui.label(RichText::new(format!("{}: {}", t!(key), value)).monospace());
        }
        ui.add_space(4.0);
        ui.label(RichText::new(&readout.explanation).small().color(theme.text_muted));
    });
}
