use eframe::egui;
use egui::Color32;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThemeMode {
    Light,
    Dark,
}

/// Window colors. The dark variant follows a slate palette; the light one
/// inverts the background ramp and keeps the same accents.
#[derive(Clone, Debug)]
pub struct Theme {
    pub mode: ThemeMode,
    pub window_bg: Color32,
    pub panel_bg: Color32,
    pub panel_border: Color32,
    pub text: Color32,
    pub text_muted: Color32,
    pub text_strong: Color32,
    pub accent: Color32,
    pub highlight: Color32,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            mode: ThemeMode::Dark,
            window_bg: Color32::from_rgb(2, 6, 23),
            panel_bg: Color32::from_rgb(15, 23, 42),
            panel_border: Color32::from_rgb(30, 41, 59),
            text: Color32::from_rgb(203, 213, 225),
            text_muted: Color32::from_rgb(100, 116, 139),
            text_strong: Color32::from_rgb(248, 250, 252),
            accent: Color32::from_rgb(110, 231, 183),
            highlight: Color32::from_rgb(250, 204, 21),
        }
    }

    pub fn light() -> Self {
        Self {
            mode: ThemeMode::Light,
            window_bg: Color32::from_rgb(248, 250, 252),
            panel_bg: Color32::from_rgb(241, 245, 249),
            panel_border: Color32::from_rgb(203, 213, 225),
            text: Color32::from_rgb(51, 65, 85),
            text_muted: Color32::from_rgb(100, 116, 139),
            text_strong: Color32::from_rgb(15, 23, 42),
            accent: Color32::from_rgb(5, 150, 105),
            highlight: Color32::from_rgb(217, 119, 6),
        }
    }

    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Dark => Self::dark(),
            ThemeMode::Light => Self::light(),
        }
    }

    pub fn is_dark(&self) -> bool {
        self.mode == ThemeMode::Dark
    }

    /// Push the colors into egui's global style.
    pub fn apply(&self, ctx: &egui::Context) {
        let mut visuals = if self.is_dark() {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        };
        visuals.panel_fill = self.window_bg;
        visuals.window_fill = self.panel_bg;
        visuals.extreme_bg_color = self.panel_bg;
        visuals.override_text_color = Some(self.text);
        visuals.selection.stroke = egui::Stroke::new(1.0, self.highlight);
        ctx.set_visuals(visuals);
    }
}
