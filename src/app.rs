use eframe::egui;
use egui::RichText;

use crate::components::dimension_form::DimensionForm;
use crate::components::matrix::MatrixView;
use crate::components::summary;
use crate::session::VisualizerSession;
use crate::settings::{AppSettings, MAX_CELL_SIZE, MIN_CELL_SIZE};
use crate::t;
use crate::theme::{Theme, ThemeMode};

pub struct CudaVizApp {
    session: VisualizerSession,

    // UI Components
    dimension_form: DimensionForm,
    matrix_view: MatrixView,

    // Settings & theme
    settings: AppSettings,
    theme: Theme,
    settings_open: bool,
}

/// Rounded panel behind each page section.
fn section(ui: &mut egui::Ui, theme: &Theme, add_contents: impl FnOnce(&mut egui::Ui)) {
    egui::Frame::none()
        .fill(theme.panel_bg)
        .stroke(egui::Stroke::new(1.0, theme.panel_border))
        .rounding(18.0)
        .inner_margin(18.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            add_contents(ui);
        });
}

impl CudaVizApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        session: VisualizerSession,
        language_override: Option<String>,
    ) -> Self {
        let settings = AppSettings::load();

        // Command line wins, then the saved preference, then the system locale
        let language = match language_override {
            Some(code) => code,
            None if settings.language.is_empty() => crate::i18n::detect_system_language(),
            None => settings.language.clone(),
        };
        crate::i18n::set_language(&language);

        let theme = Theme::for_mode(settings.theme_mode);
        theme.apply(&cc.egui_ctx);

        let d = session.dimensions();
        crate::log_info!(
            "Window opened: grid ({}, {}), block ({}, {}), length {}, language {}",
            d.grid_dim_x,
            d.grid_dim_y,
            d.block_dim_x,
            d.block_dim_y,
            d.array_length,
            crate::i18n::current_language()
        );

        Self {
            session,
            dimension_form: DimensionForm,
            matrix_view: MatrixView::default(),
            settings,
            theme,
            settings_open: false,
        }
    }

    fn show_header(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label(
                RichText::new(t!("app.kicker"))
                    .small()
                    .strong()
                    .color(self.theme.text_muted),
            );
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button(t!("menu.settings")).clicked() {
                    self.settings_open = !self.settings_open;
                }
            });
        });
        ui.label(
            RichText::new(t!("app.title"))
                .size(28.0)
                .strong()
                .color(self.theme.text_strong),
        );
        ui.label(RichText::new(t!("app.subtitle")).color(self.theme.text_muted));
    }

    fn show_settings_window(&mut self, ctx: &egui::Context) {
        if !self.settings_open {
            return;
        }
        let before = self.settings.clone();
        let mut open = self.settings_open;

        egui::Window::new(t!("menu.settings"))
            .id(egui::Id::new("settings_window"))
            .open(&mut open)
            .resizable(false)
            .collapsible(false)
            .show(ctx, |ui| {
                egui::Grid::new("settings_grid")
                    .num_columns(2)
                    .spacing([12.0, 8.0])
                    .show(ui, |ui| {
                        ui.label(t!("settings.theme"));
                        ui.horizontal(|ui| {
                            ui.selectable_value(&mut self.settings.theme_mode, ThemeMode::Dark, t!("settings.dark"));
                            ui.selectable_value(&mut self.settings.theme_mode, ThemeMode::Light, t!("settings.light"));
                        });
                        ui.end_row();

                        ui.label(t!("settings.language"));
                        let mut language = crate::i18n::current_language();
                        let selected = crate::i18n::LANGUAGES
                            .iter()
                            .find(|(code, _)| *code == language)
                            .map(|(_, name)| *name)
                            .unwrap_or("English");
                        egui::ComboBox::from_id_source("language_combo")
                            .selected_text(selected)
                            .show_ui(ui, |ui| {
                                for &(code, name) in crate::i18n::LANGUAGES {
                                    ui.selectable_value(&mut language, code.to_string(), name);
                                }
                            });
                        if language != crate::i18n::current_language() {
                            crate::i18n::set_language(&language);
                            self.settings.language = language;
                        }
                        ui.end_row();

                        ui.label(t!("settings.cell_size"));
                        ui.add(egui::Slider::new(
                            &mut self.settings.cell_size,
                            MIN_CELL_SIZE..=MAX_CELL_SIZE,
                        ));
                        ui.end_row();

                        ui.label(t!("settings.labels"));
                        ui.checkbox(&mut self.settings.show_labels, "");
                        ui.end_row();
                    });
            });
        self.settings_open = open;

        if self.settings != before {
            if self.settings.theme_mode != before.theme_mode {
                self.theme = Theme::for_mode(self.settings.theme_mode);
                self.theme.apply(ctx);
            }
            self.settings.save();
        }
    }
}

impl eframe::App for CudaVizApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.show_settings_window(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .id_source("page_scroll")
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.spacing_mut().item_spacing.y = 10.0;
                    self.show_header(ui);
                    ui.add_space(12.0);

                    let theme = self.theme.clone();
                    section(ui, &theme, |ui| {
                        self.dimension_form.show(ui, &mut self.session, &theme)
                    });

                    section(ui, &theme, |ui| {
                        ui.columns(2, |cols| {
                            summary::show_totals(&mut cols[0], &self.session, &theme);
                            summary::show_active_cell(
                                &mut cols[1],
                                self.session.hovered_cell(),
                                &theme,
                            );
                        });
                    });

                    ui.label(
                        RichText::new(t!("grid.title"))
                            .size(17.0)
                            .strong()
                            .color(theme.text_strong),
                    );
                    ui.label(RichText::new(t!("grid.description")).color(theme.text_muted));

                    let cell_size = self.settings.cell_size;
                    let show_labels = self.settings.show_labels;
                    section(ui, &theme, |ui| {
                        egui::ScrollArea::both()
                            .id_source("matrix_scroll")
                            .max_height(640.0)
                            .auto_shrink([false, true])
                            .show(ui, |ui| {
                                self.matrix_view.show(
                                    ui,
                                    &mut self.session,
                                    &theme,
                                    cell_size,
                                    show_labels,
                                );
                            });
                    });
                });
        });
    }
}
