//! Green theme - dark green panels, rounded keys, bright green accents.

use egui::{Color32, FontFamily, FontId, Rounding, Stroke, Style, TextStyle, Visuals};

/// The calculator palette.
pub struct GreenColors;

impl GreenColors {
    /// Window and panel background.
    pub const BACKGROUND: Color32 = Color32::from_rgb(30, 60, 50);
    /// Key face.
    pub const KEY: Color32 = Color32::from_rgb(40, 80, 65);
    /// Key face while hovered.
    pub const KEY_HOVER: Color32 = Color32::from_rgb(52, 98, 80);
    /// Operators, AC, %, ±.
    pub const ACCENT: Color32 = Color32::from_rgb(0, 200, 100);
    /// The equals key.
    pub const EQUALS: Color32 = Color32::from_rgb(0, 220, 110);
    pub const TEXT: Color32 = Color32::from_rgb(255, 255, 255);
    /// Secondary text (expression line, about labels).
    pub const MUTED: Color32 = Color32::from_rgb(200, 200, 200);
    /// Backspace glyph.
    pub const DANGER: Color32 = Color32::from_rgb(255, 80, 80);
}

/// Theme configuration for the calculator windows
pub struct GreenTheme {
    pub font_size_body: f32,
    pub font_size_heading: f32,
    pub font_size_small: f32,
    pub window_padding: f32,
    pub item_spacing: f32,
    pub rounding: f32,
}

impl Default for GreenTheme {
    fn default() -> Self {
        Self {
            font_size_body: 14.0,
            font_size_heading: 18.0,
            font_size_small: 11.0,
            window_padding: 20.0,
            item_spacing: 10.0,
            rounding: 8.0,
        }
    }
}

impl GreenTheme {
    /// Apply the green theme to an egui context
    pub fn apply(&self, ctx: &egui::Context) {
        let mut style = Style::default();

        style.text_styles = [
            (TextStyle::Small, FontId::new(self.font_size_small, FontFamily::Proportional)),
            (TextStyle::Body, FontId::new(self.font_size_body, FontFamily::Proportional)),
            (TextStyle::Button, FontId::new(self.font_size_body, FontFamily::Proportional)),
            (TextStyle::Heading, FontId::new(self.font_size_heading, FontFamily::Proportional)),
            (TextStyle::Monospace, FontId::new(self.font_size_body, FontFamily::Monospace)),
        ]
        .into();

        let mut visuals = Visuals::dark();

        visuals.window_fill = GreenColors::BACKGROUND;
        visuals.panel_fill = GreenColors::BACKGROUND;
        visuals.faint_bg_color = GreenColors::KEY;
        visuals.extreme_bg_color = GreenColors::BACKGROUND;
        visuals.override_text_color = Some(GreenColors::TEXT);

        visuals.window_rounding = Rounding::same(self.rounding);
        visuals.menu_rounding = Rounding::same(self.rounding);
        visuals.window_stroke = Stroke::NONE;

        let rounding = self.rounding;
        let green = |ws: &mut egui::style::WidgetVisuals, fill: Color32| {
            ws.bg_fill = fill;
            ws.weak_bg_fill = fill;
            ws.bg_stroke = Stroke::NONE;
            ws.fg_stroke = Stroke::new(1.0, GreenColors::TEXT);
            ws.rounding = Rounding::same(rounding);
        };
        green(&mut visuals.widgets.noninteractive, GreenColors::BACKGROUND);
        green(&mut visuals.widgets.inactive, GreenColors::KEY);
        green(&mut visuals.widgets.hovered, GreenColors::KEY_HOVER);
        green(&mut visuals.widgets.active, GreenColors::ACCENT);
        green(&mut visuals.widgets.open, GreenColors::KEY);

        visuals.window_shadow = egui::epaint::Shadow::NONE;
        visuals.popup_shadow = egui::epaint::Shadow::NONE;

        visuals.selection.bg_fill = GreenColors::KEY_HOVER;
        visuals.selection.stroke = Stroke::new(1.0, GreenColors::ACCENT);

        style.visuals = visuals;

        style.spacing.window_margin = egui::Margin::same(self.window_padding);
        style.spacing.item_spacing = egui::vec2(self.item_spacing, self.item_spacing);
        style.spacing.button_padding = egui::vec2(12.0, 6.0);

        ctx.set_style(style);
    }

    /// Panel frame: background fill, no border.
    pub fn panel_frame(&self) -> egui::Frame {
        egui::Frame::none()
            .fill(GreenColors::BACKGROUND)
            .inner_margin(egui::Margin::same(self.window_padding))
    }

    /// Title bar frame: background fill, tighter vertical margin.
    pub fn title_bar_frame(&self) -> egui::Frame {
        egui::Frame::none()
            .fill(GreenColors::BACKGROUND)
            .inner_margin(egui::Margin::symmetric(self.window_padding, 15.0))
    }
}

/// Strip zoom shortcuts (Cmd +, Cmd -, Cmd =) and Tab before the app sees input.
///
/// The keypad maps `+`, `-` and `=` to tokens, so a zoom shortcut would
/// otherwise both rescale the UI and feed the engine.
pub fn consume_special_keys(ctx: &egui::Context) {
    ctx.input_mut(|i| {
        i.events.retain(|event| {
            !matches!(
                event,
                egui::Event::Key { key: egui::Key::Tab, .. }
            ) && !matches!(
                event,
                egui::Event::Key { key, modifiers, .. }
                    if modifiers.command
                        && matches!(key, egui::Key::Plus | egui::Key::Minus | egui::Key::Equals)
            )
        });
    });
}
