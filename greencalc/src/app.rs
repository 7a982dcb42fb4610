//! Calculator window: title bar, display and keypad

use crate::about::AboutWindow;
use crate::build_info::BuildInfo;
use crate::config::CalcConfig;
use crate::engine::Engine;
use crate::token::{Operator, Token};
use egui::{Align2, Context, FontId, Key, Sense, ViewportCommand};
use greencore::repaint::RepaintController;
use greencore::safety::catch_or;
use greencore::theme::{consume_special_keys, GreenColors, GreenTheme};
use greencore::widgets::{title_bar, CalcKey, KeyRole, TitleAction};

/// Keypad labels, row by row.
const KEYPAD: [[&str; 4]; 5] = [
    ["AC", "±", "%", "÷"],
    ["7", "8", "9", "×"],
    ["4", "5", "6", "−"],
    ["1", "2", "3", "+"],
    ["⌫", "0", ".", "="],
];

const KEY_GAP: f32 = 10.0;
const MIN_KEY_SIZE: f32 = 40.0;
const DISPLAY_HEIGHT: f32 = 180.0;
const DISPLAY_FONT_SIZE: f32 = 48.0;
const EXPRESSION_FONT_SIZE: f32 = 14.0;

pub struct CalcApp {
    engine: Engine,
    theme: GreenTheme,
    about: AboutWindow,
    repaint: RepaintController,
}

impl CalcApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: &CalcConfig) -> Self {
        Self {
            engine: Engine::new(),
            theme: GreenTheme::default(),
            about: AboutWindow::new(BuildInfo::current(), [config.about_width, config.about_height]),
            repaint: RepaintController::new(),
        }
    }

    fn apply_all(&mut self, tokens: Vec<Token>) {
        for token in tokens {
            let was_error = self.engine.is_error();
            self.engine.apply(token);
            if self.engine.is_error() && !was_error {
                tracing::warn!(expression = %self.engine.expression(), "calculation error shown");
            }
        }
    }

    fn handle_keys(&mut self, ctx: &Context) {
        consume_special_keys(ctx);

        let tokens: Vec<Token> = ctx.input(|i| {
            i.events
                .iter()
                .filter_map(|event| match event {
                    egui::Event::Text(text) => {
                        let mut chars = text.chars();
                        match (chars.next(), chars.next()) {
                            (Some(ch), None) => token_for_char(ch),
                            _ => None,
                        }
                    }
                    egui::Event::Key { key, pressed: true, .. } => token_for_key(*key),
                    _ => None,
                })
                .collect()
        });
        self.apply_all(tokens);
    }

    fn render_display(&self, ui: &mut egui::Ui) {
        let width = ui.available_width();
        let (rect, _) = ui.allocate_exact_size(egui::vec2(width, DISPLAY_HEIGHT), Sense::hover());
        if !ui.is_rect_visible(rect) {
            return;
        }

        let painter = ui.painter();
        let display = self.engine.display();
        let color = if self.engine.is_error() { GreenColors::DANGER } else { GreenColors::TEXT };
        let size = display_font_size(display.chars().count(), width);
        painter.text(
            rect.right_bottom(),
            Align2::RIGHT_BOTTOM,
            display,
            FontId::proportional(size),
            color,
        );

        let expression = self.engine.expression();
        if !expression.is_empty() {
            painter.text(
                rect.right_bottom() - egui::vec2(0.0, size + 5.0),
                Align2::RIGHT_BOTTOM,
                expression,
                FontId::proportional(EXPRESSION_FONT_SIZE),
                GreenColors::MUTED,
            );
        }
    }

    fn render_keypad(&self, ui: &mut egui::Ui) -> Vec<Token> {
        let key = key_size(ui.available_width(), ui.available_height());
        let mut pressed = Vec::new();

        ui.spacing_mut().item_spacing = egui::vec2(KEY_GAP, KEY_GAP);
        for row in KEYPAD {
            ui.horizontal(|ui| {
                for label in row {
                    let Some(token) = Token::from_label(label) else {
                        continue;
                    };
                    let selected = match token {
                        Token::Op(op) => self.awaiting_operand_for(op),
                        _ => false,
                    };
                    let widget = CalcKey::new(label, key_role(token), egui::vec2(key, key))
                        .selected(selected);
                    if ui.add(widget).clicked() {
                        pressed.push(token);
                    }
                }
            });
        }
        pressed
    }

    /// The operator key stays lit until the right operand is started.
    fn awaiting_operand_for(&self, op: Operator) -> bool {
        self.engine.pending() == Some(op) && self.engine.resets_on_next_digit()
    }
}

impl eframe::App for CalcApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.repaint.begin_frame();
        self.handle_keys(ctx);

        egui::TopBottomPanel::top("title")
            .frame(self.theme.title_bar_frame())
            .show_separator_line(false)
            .show(ctx, |ui| match title_bar(ui, "Calculator", Some("about")) {
                TitleAction::About => self.about.open(),
                TitleAction::Close => {
                    tracing::info!("close requested from title bar");
                    ctx.send_viewport_cmd(ViewportCommand::Close);
                }
                TitleAction::Drag => ctx.send_viewport_cmd(ViewportCommand::StartDrag),
                TitleAction::None => {}
            });

        let tokens = egui::CentralPanel::default()
            .frame(self.theme.panel_frame())
            .show(ctx, |ui| {
                catch_or(Vec::new(), || {
                    self.render_display(ui);
                    ui.add_space(KEY_GAP * 2.0);
                    self.render_keypad(ui)
                })
            })
            .inner;
        self.apply_all(tokens);

        if self.about.is_open() && self.about.show(ctx, &self.theme) {
            self.repaint.mark_needs_repaint();
        }

        self.repaint.end_frame(ctx);
    }
}

fn key_role(token: Token) -> KeyRole {
    match token {
        Token::Digit(_) | Token::Decimal => KeyRole::Digit,
        Token::Clear | Token::ToggleSign | Token::Percent => KeyRole::Function,
        Token::Op(_) => KeyRole::Operator,
        Token::Equals => KeyRole::Equals,
        Token::Backspace => KeyRole::Backspace,
    }
}

/// Square key edge for a 4x5 grid in the given area.
fn key_size(width: f32, height: f32) -> f32 {
    let by_width = (width - KEY_GAP * 3.0) / 4.0;
    let by_height = (height - KEY_GAP * 4.0) / 5.0;
    by_width.min(by_height).max(MIN_KEY_SIZE)
}

/// Shrink the main display font so long numbers fit the width.
fn display_font_size(chars: usize, width: f32) -> f32 {
    // proportional digits are roughly 0.6 em wide
    let fit = width / (chars.max(1) as f32 * 0.6);
    fit.clamp(EXPRESSION_FONT_SIZE, DISPLAY_FONT_SIZE)
}

/// Typed characters that map to keypad tokens.
fn token_for_char(ch: char) -> Option<Token> {
    match ch {
        '0'..='9' | '.' | '%' | '+' | '-' | '*' | '/' | '=' | '×' | '÷' => {
            ch.encode_utf8(&mut [0; 4]).parse::<Token>().ok()
        }
        ',' => Some(Token::Decimal),
        _ => None,
    }
}

/// Non-text keys.
fn token_for_key(key: Key) -> Option<Token> {
    match key {
        Key::Enter => Some(Token::Equals),
        Key::Backspace => Some(Token::Backspace),
        Key::Escape | Key::Delete => Some(Token::Clear),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_keypad_label_is_a_token() {
        for label in KEYPAD.iter().flatten() {
            assert!(Token::from_label(label).is_some(), "{label}");
        }
    }

    #[test]
    fn test_keypad_has_each_operator_once() {
        let ops: Vec<Operator> = KEYPAD
            .iter()
            .flatten()
            .filter_map(|label| match Token::from_label(label) {
                Some(Token::Op(op)) => Some(op),
                _ => None,
            })
            .collect();
        assert_eq!(
            ops,
            vec![Operator::Divide, Operator::Multiply, Operator::Subtract, Operator::Add]
        );
    }

    #[test]
    fn test_typed_characters() {
        assert_eq!(token_for_char('7'), Some(Token::Digit(7)));
        assert_eq!(token_for_char('*'), Some(Token::Op(Operator::Multiply)));
        assert_eq!(token_for_char('/'), Some(Token::Op(Operator::Divide)));
        assert_eq!(token_for_char('-'), Some(Token::Op(Operator::Subtract)));
        assert_eq!(token_for_char('='), Some(Token::Equals));
        assert_eq!(token_for_char(','), Some(Token::Decimal));
        assert_eq!(token_for_char('÷'), Some(Token::Op(Operator::Divide)));
        assert_eq!(token_for_char('a'), None);
    }

    #[test]
    fn test_special_keys() {
        assert_eq!(token_for_key(Key::Enter), Some(Token::Equals));
        assert_eq!(token_for_key(Key::Escape), Some(Token::Clear));
        assert_eq!(token_for_key(Key::Backspace), Some(Token::Backspace));
        assert_eq!(token_for_key(Key::A), None);
    }

    #[test]
    fn test_key_roles() {
        assert_eq!(key_role(Token::Digit(3)), KeyRole::Digit);
        assert_eq!(key_role(Token::Percent), KeyRole::Function);
        assert_eq!(key_role(Token::Op(Operator::Add)), KeyRole::Operator);
        assert_eq!(key_role(Token::Backspace), KeyRole::Backspace);
    }

    #[test]
    fn test_key_size() {
        // 360 wide: (360 - 30) / 4 = 82.5; plenty of height
        assert_eq!(key_size(360.0, 1000.0), 82.5);
        // height-bound: (290 - 40) / 5 = 50
        assert_eq!(key_size(360.0, 290.0), 50.0);
        assert_eq!(key_size(100.0, 100.0), MIN_KEY_SIZE);
    }

    #[test]
    fn test_display_font_shrinks() {
        assert_eq!(display_font_size(1, 360.0), DISPLAY_FONT_SIZE);
        assert!(display_font_size(25, 360.0) < DISPLAY_FONT_SIZE);
        assert_eq!(display_font_size(500, 360.0), EXPRESSION_FONT_SIZE);
    }
}
