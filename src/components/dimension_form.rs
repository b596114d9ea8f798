use eframe::egui;
use egui::RichText;

use crate::grid::{
    DimensionField, MAX_ARRAY_LENGTH, MAX_BLOCK_DIMENSION, MAX_GRID_DIMENSION, parse_leading_int,
};
use crate::session::VisualizerSession;
use crate::t;
use crate::theme::Theme;

/// Note shown under an input whose text is not used verbatim.
pub fn substitution_note(field: DimensionField, raw: &str, effective: u32) -> Option<String> {
    match parse_leading_int(raw) {
        Some(v) if v >= 1 && v <= i64::from(field.max_value()) => {
            if raw.trim() == v.to_string() {
                None
            } else {
                Some(t!("form.note_using", value = effective))
            }
        }
        Some(v) if v > i64::from(field.max_value()) => {
            Some(t!("form.note_clamped", value = effective))
        }
        _ => Some(t!("form.note_default", value = effective)),
    }
}

/// The three input fieldsets: grid, block and input data.
#[derive(Default)]
pub struct DimensionForm;

impl DimensionForm {
    pub fn show(&mut self, ui: &mut egui::Ui, session: &mut VisualizerSession, theme: &Theme) {
        ui.horizontal_wrapped(|ui| {
            ui.label(RichText::new(t!("form.title")).strong().color(theme.text_strong).size(17.0));
            ui.add_space(12.0);
            ui.label(
                RichText::new(t!(
                    "form.limits",
                    grid = MAX_GRID_DIMENSION,
                    block = MAX_BLOCK_DIMENSION,
                    length = MAX_ARRAY_LENGTH
                ))
                .small()
                .color(theme.text_muted),
            );
        });
        ui.add_space(8.0);

        ui.columns(3, |cols| {
            fieldset(&mut cols[0], theme, &t!("form.grid_legend"), |ui| {
                input_row(ui, session, theme, DimensionField::GridDimX);
                input_row(ui, session, theme, DimensionField::GridDimY);
            });
            fieldset(&mut cols[1], theme, &t!("form.block_legend"), |ui| {
                input_row(ui, session, theme, DimensionField::BlockDimX);
                input_row(ui, session, theme, DimensionField::BlockDimY);
            });
            fieldset(&mut cols[2], theme, &t!("form.data_legend"), |ui| {
                input_row(ui, session, theme, DimensionField::ArrayLength);
                ui.label(
                    RichText::new(t!(
                        "form.width_note",
                        cols = session.mapping().totals.total_columns
                    ))
                    .small()
                    .color(theme.text_muted),
                );
            });
        });

        ui.add_space(6.0);
        if ui.button(t!("form.reset")).clicked() {
            session.reset();
        }
    }
}

fn fieldset(ui: &mut egui::Ui, theme: &Theme, legend: &str, add_contents: impl FnOnce(&mut egui::Ui)) {
    egui::Frame::none()
        .fill(theme.window_bg)
        .stroke(egui::Stroke::new(1.0, theme.panel_border))
        .rounding(12.0)
        .inner_margin(12.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(legend.to_uppercase()).small().color(theme.text_muted));
            ui.add_space(4.0);
            add_contents(ui);
        });
}

fn input_row(ui: &mut egui::Ui, session: &mut VisualizerSession, theme: &Theme, field: DimensionField) {
    ui.label(
        RichText::new(format!("{}  (1–{})", label_for(field), field.max_value()))
            .color(theme.text),
    );
    let response = ui.add(
        egui::TextEdit::singleline(session.raw_input_mut(field))
            .desired_width(f32::INFINITY)
            .font(egui::TextStyle::Monospace),
    );
    if response.changed() {
        session.commit_input(field);
    }

    let effective = session.dimensions().get(field);
    if let Some(note) = substitution_note(field, session.raw_input(field), effective) {
        ui.label(RichText::new(note).small().color(theme.highlight));
    }
    ui.add_space(4.0);
}

fn label_for(field: DimensionField) -> String {
    match field {
        DimensionField::ArrayLength => t!("form.array_length"),
        other => other.label().to_string(),
    }
}
