//! Custom widgets - rounded keypad keys and the self-drawn title bar

use egui::{Align2, Color32, FontId, Painter, Rect, Response, RichText, Sense, Stroke, Ui, Widget};
use crate::theme::GreenColors;

/// Action returned by the title bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleAction {
    None,
    /// The "about" link was clicked.
    About,
    /// The close icon was clicked.
    Close,
    /// A drag started on the empty part of the bar; the window should move.
    Drag,
}

/// Draw a title bar: optional link on the left, title in the middle,
/// close icon on the right.
pub fn title_bar(ui: &mut Ui, title: &str, link: Option<&str>) -> TitleAction {
    let mut action = TitleAction::None;
    let icon_size = egui::vec2(24.0, 24.0);

    ui.horizontal(|ui| {
        if let Some(link) = link {
            let resp = ui.add(
                egui::Label::new(RichText::new(link).size(14.0).color(GreenColors::TEXT))
                    .sense(Sense::click()),
            );
            if resp.clicked() {
                action = TitleAction::About;
            }
        }

        let spacing = ui.spacing().item_spacing.x;
        let drag_width = (ui.available_width() - icon_size.x - spacing).max(0.0);
        let (drag_rect, drag_resp) =
            ui.allocate_exact_size(egui::vec2(drag_width, icon_size.y), Sense::click_and_drag());
        if ui.is_rect_visible(drag_rect) {
            ui.painter().text(
                drag_rect.center(),
                Align2::CENTER_CENTER,
                title,
                FontId::proportional(16.0),
                GreenColors::TEXT,
            );
        }
        if drag_resp.drag_started() {
            action = TitleAction::Drag;
        }

        let (close_rect, close_resp) = ui.allocate_exact_size(icon_size, Sense::click());
        if ui.is_rect_visible(close_rect) {
            let color = if close_resp.hovered() { GreenColors::ACCENT } else { GreenColors::TEXT };
            paint_close_icon(ui.painter(), close_rect.shrink(2.0), color);
        }
        if close_resp.clicked() {
            action = TitleAction::Close;
        }
    });

    action
}

/// Two crossing 2px strokes filling `rect`.
pub fn paint_close_icon(painter: &Painter, rect: Rect, color: Color32) {
    let stroke = Stroke::new(2.0, color);
    painter.line_segment([rect.left_top(), rect.right_bottom()], stroke);
    painter.line_segment([rect.right_top(), rect.left_bottom()], stroke);
}

/// Backspace glyph: a left-pointing tag outline with a small X inside.
pub fn paint_backspace_icon(painter: &Painter, rect: Rect, color: Color32) {
    let stroke = Stroke::new(2.0, color);
    let h = rect.height();
    let tip = rect.left() + h * 0.45;
    let outline = vec![
        egui::pos2(rect.left(), rect.center().y),
        egui::pos2(tip, rect.top()),
        rect.right_top(),
        rect.right_bottom(),
        egui::pos2(tip, rect.bottom()),
    ];
    painter.add(egui::Shape::closed_line(outline, stroke));

    let body = Rect::from_min_max(egui::pos2(tip, rect.top()), rect.right_bottom());
    let cross = Rect::from_center_size(body.center(), egui::vec2(h * 0.4, h * 0.4));
    paint_close_icon(painter, cross, color);
}

/// What a key does, which decides how it is coloured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyRole {
    Digit,
    /// AC, ±, %
    Function,
    Operator,
    Equals,
    Backspace,
}

impl KeyRole {
    fn colors(self) -> (Color32, Color32) {
        match self {
            KeyRole::Digit => (GreenColors::KEY, GreenColors::TEXT),
            KeyRole::Function | KeyRole::Operator => (GreenColors::KEY, GreenColors::ACCENT),
            KeyRole::Equals => (GreenColors::EQUALS, GreenColors::TEXT),
            KeyRole::Backspace => (GreenColors::KEY, GreenColors::DANGER),
        }
    }
}

/// A fully rounded keypad key.
pub struct CalcKey<'a> {
    label: &'a str,
    role: KeyRole,
    size: egui::Vec2,
    selected: bool,
}

impl<'a> CalcKey<'a> {
    pub fn new(label: &'a str, role: KeyRole, size: egui::Vec2) -> Self {
        Self { label, role, size, selected: false }
    }

    /// Highlight the key, e.g. the operator awaiting its right operand.
    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }
}

impl<'a> Widget for CalcKey<'a> {
    fn ui(self, ui: &mut Ui) -> Response {
        let (rect, response) = ui.allocate_exact_size(self.size, Sense::click());

        if ui.is_rect_visible(rect) {
            let painter = ui.painter();
            let (mut fill, mut fg) = self.role.colors();
            if response.is_pointer_button_down_on() || self.selected {
                fill = GreenColors::ACCENT;
                fg = GreenColors::BACKGROUND;
            } else if response.hovered() && self.role != KeyRole::Equals {
                fill = GreenColors::KEY_HOVER;
            }

            let radius = rect.height().min(rect.width()) / 2.0;
            painter.rect_filled(rect, radius, fill);

            if self.role == KeyRole::Backspace {
                let icon = Rect::from_center_size(rect.center(), egui::vec2(30.0, 20.0));
                paint_backspace_icon(painter, icon, fg);
            } else {
                painter.text(
                    rect.center(),
                    Align2::CENTER_CENTER,
                    self.label,
                    FontId::proportional(28.0),
                    fg,
                );
            }
        }

        response
    }
}
