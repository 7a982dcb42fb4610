//! Calculator engine
//!
//! A left-to-right state machine: each [`Token`] mutates the state and the
//! UI reads back [`Engine::display`] and [`Engine::expression`]. There is
//! no precedence; pressing an operator while another is pending resolves
//! the pending one first.

use crate::format::{
    digit_count, format_entry, format_number, parse_display, strip_separators, ERROR_TOKEN,
};
use crate::token::{Operator, Token};
use thiserror::Error;

/// Digits accepted in a single typed number.
pub const MAX_ENTRY_DIGITS: usize = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CalcError {
    #[error("division by zero")]
    DivisionByZero,
    #[error("result out of range")]
    Overflow,
}

/// Apply `op` to two operands.
pub fn evaluate(lhs: f64, op: Operator, rhs: f64) -> Result<f64, CalcError> {
    let result = match op {
        Operator::Add => lhs + rhs,
        Operator::Subtract => lhs - rhs,
        Operator::Multiply => lhs * rhs,
        Operator::Divide => {
            if rhs == 0.0 {
                return Err(CalcError::DivisionByZero);
            }
            lhs / rhs
        }
    };
    if result.is_finite() {
        Ok(result)
    } else {
        Err(CalcError::Overflow)
    }
}

#[derive(Debug, Clone)]
pub struct Engine {
    display: String,
    previous_value: f64,
    pending: Option<Operator>,
    reset_on_next_digit: bool,
    expression: String,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    pub fn new() -> Self {
        Self {
            display: "0".to_string(),
            previous_value: 0.0,
            pending: None,
            reset_on_next_digit: false,
            expression: String::new(),
        }
    }

    /// The main display line.
    pub fn display(&self) -> &str {
        &self.display
    }

    /// The smaller line above the display: `"8 ×"` or `"8 × 8"`.
    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn pending(&self) -> Option<Operator> {
        self.pending
    }

    #[cfg(test)]
    pub fn previous_value(&self) -> f64 {
        self.previous_value
    }

    /// Whether the next digit starts a new number.
    pub fn resets_on_next_digit(&self) -> bool {
        self.reset_on_next_digit
    }

    pub fn is_error(&self) -> bool {
        self.display == ERROR_TOKEN
    }

    /// Feed one token to the engine.
    pub fn apply(&mut self, token: Token) {
        match token {
            Token::Digit(d) => self.push_digit(d),
            Token::Decimal => self.push_decimal(),
            Token::Clear => self.clear(),
            Token::Backspace => self.backspace(),
            Token::ToggleSign => self.toggle_sign(),
            Token::Percent => self.percent(),
            Token::Op(op) => self.set_operator(op),
            Token::Equals => self.equals(),
        }
        tracing::trace!(?token, display = %self.display, expression = %self.expression, "applied");
    }

    fn current_value(&self) -> f64 {
        parse_display(&self.display)
    }

    fn push_digit(&mut self, digit: u8) {
        let digit = char::from(b'0' + digit.min(9));
        if self.reset_on_next_digit || self.display == "0" || self.is_error() {
            self.display = digit.to_string();
            self.reset_on_next_digit = false;
            return;
        }

        let mut raw = strip_separators(&self.display);
        if digit_count(&raw) >= MAX_ENTRY_DIGITS {
            return;
        }
        raw.push(digit);
        self.display = format_entry(&raw);
    }

    fn push_decimal(&mut self) {
        if self.reset_on_next_digit || self.is_error() {
            self.display = "0.".to_string();
            self.reset_on_next_digit = false;
        } else if !self.display.contains('.') {
            self.display.push('.');
        }
    }

    fn clear(&mut self) {
        *self = Self::new();
    }

    fn backspace(&mut self) {
        if self.is_error() {
            self.display = "0".to_string();
            return;
        }
        let mut raw = strip_separators(&self.display);
        raw.pop();
        self.display = if raw.is_empty() || raw == "-" {
            "0".to_string()
        } else {
            format_entry(&raw)
        };
    }

    fn toggle_sign(&mut self) {
        if self.display == "0" || self.is_error() {
            return;
        }
        self.display = match self.display.strip_prefix('-') {
            Some(rest) => rest.to_string(),
            None => format!("-{}", self.display),
        };
    }

    fn percent(&mut self) {
        self.display = format_number(self.current_value() / 100.0);
        self.reset_on_next_digit = true;
    }

    fn set_operator(&mut self, op: Operator) {
        if self.pending.is_some() {
            self.equals();
        }
        self.previous_value = self.current_value();
        self.pending = Some(op);
        self.reset_on_next_digit = true;
        self.expression = format!("{} {}", format_number(self.previous_value), op);
    }

    fn equals(&mut self) {
        let Some(op) = self.pending else {
            return;
        };
        let current = self.current_value();

        match evaluate(self.previous_value, op, current) {
            Ok(result) => {
                self.expression = format!(
                    "{} {} {}",
                    format_number(self.previous_value),
                    op,
                    format_number(current)
                );
                self.display = format_number(result);
                self.previous_value = result;
            }
            Err(err) => {
                tracing::debug!(%err, lhs = self.previous_value, rhs = current, "calculation failed");
                self.display = ERROR_TOKEN.to_string();
                self.previous_value = 0.0;
                self.expression.clear();
            }
        }
        self.pending = None;
        self.reset_on_next_digit = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Press keypad labels one character at a time.
    fn press(engine: &mut Engine, keys: &str) {
        for key in keys.chars() {
            let token = Token::from_label(&key.to_string())
                .unwrap_or_else(|| panic!("no token for {key:?}"));
            engine.apply(token);
        }
    }

    fn engine_after(keys: &str) -> Engine {
        let mut engine = Engine::new();
        press(&mut engine, keys);
        engine
    }

    #[test]
    fn test_fresh_engine() {
        let engine = Engine::new();
        assert_eq!(engine.display(), "0");
        assert_eq!(engine.expression(), "");
        assert_eq!(engine.pending(), None);
        assert!(!engine.resets_on_next_digit());
    }

    #[test]
    fn test_digits_group_as_typed() {
        assert_eq!(engine_after("1234567").display(), "1,234,567");
        assert_eq!(engine_after("007").display(), "7");
    }

    #[test]
    fn test_entry_digit_cap() {
        let engine = engine_after("99999999999999999");
        assert_eq!(digit_count(engine.display()), MAX_ENTRY_DIGITS);
        assert_eq!(engine.display(), "999,999,999,999,999");
    }

    #[test]
    fn test_second_decimal_point_ignored() {
        assert_eq!(engine_after("1.2").display(), "1.2");
        assert_eq!(engine_after("1.2.").display(), "1.2");
    }

    #[test]
    fn test_decimal_after_operator_starts_fresh() {
        let mut engine = engine_after("5+.");
        assert_eq!(engine.display(), "0.");
        assert!(!engine.resets_on_next_digit());
        press(&mut engine, "5");
        assert_eq!(engine.display(), "0.5");
    }

    #[test]
    fn test_typed_fraction_zeros_survive() {
        assert_eq!(engine_after("1.0").display(), "1.0");
        assert_eq!(engine_after("1.05").display(), "1.05");
        assert_eq!(engine_after("1234.50").display(), "1,234.50");
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut engine = engine_after("5+3");
        engine.apply(Token::Clear);
        assert_eq!(engine.display(), "0");
        assert_eq!(engine.pending(), None);
        assert_eq!(engine.expression(), "");
        assert_eq!(engine.previous_value(), 0.0);
        assert!(!engine.resets_on_next_digit());

        let mut engine = engine_after("5÷0=");
        engine.apply(Token::Clear);
        assert_eq!(engine.display(), "0");
        assert!(!engine.is_error());
        assert_eq!(engine.pending(), None);
        assert_eq!(engine.expression(), "");
        assert!(!engine.resets_on_next_digit());
        press(&mut engine, "4");
        assert_eq!(engine.display(), "4");
    }

    #[test]
    fn test_division_by_zero() {
        let engine = engine_after("5÷0=");
        assert_eq!(engine.display(), ERROR_TOKEN);
        assert!(engine.is_error());
        assert_eq!(engine.pending(), None);
        assert_eq!(engine.expression(), "");
        assert_eq!(engine.previous_value(), 0.0);
        assert!(engine.resets_on_next_digit());
    }

    #[test]
    fn test_recovers_after_error() {
        assert_eq!(engine_after("5÷0=7").display(), "7");
        assert_eq!(engine_after("5÷0=.").display(), "0.");
        assert_eq!(engine_after("5÷0=±").display(), ERROR_TOKEN);
        assert_eq!(engine_after("5÷0=⌫").display(), "0");
        let engine = engine_after("5÷0=+");
        assert_eq!(engine.expression(), "0 +");
        assert_eq!(engine.pending(), Some(Operator::Add));
    }

    #[test]
    fn test_chained_operator_resolves_pending() {
        let mut engine = engine_after("5+3×");
        assert_eq!(engine.display(), "8");
        assert_eq!(engine.expression(), "8 ×");
        assert_eq!(engine.pending(), Some(Operator::Multiply));
        press(&mut engine, "=");
        assert_eq!(engine.display(), "64");
        assert_eq!(engine.expression(), "8 × 8");
        assert_eq!(engine.pending(), None);
    }

    #[test]
    fn test_equals_records_full_expression() {
        let mut engine = engine_after("12+3=");
        assert_eq!(engine.display(), "15");
        assert_eq!(engine.expression(), "12 + 3");
        assert_eq!(engine.previous_value(), 15.0);
        assert!(engine.resets_on_next_digit());
        press(&mut engine, "4");
        assert_eq!(engine.display(), "4");
    }

    #[test]
    fn test_equals_without_pending_is_noop() {
        assert_eq!(engine_after("=").display(), "0");
        let engine = engine_after("12=");
        assert_eq!(engine.display(), "12");
        assert_eq!(engine.expression(), "");
        assert!(!engine.resets_on_next_digit());
        assert_eq!(engine_after("2+3==").display(), "5");
    }

    #[test]
    fn test_subtraction_below_zero() {
        assert_eq!(engine_after("1000-2500=").display(), "-1,500");
    }

    #[test]
    fn test_fractional_result() {
        let engine = engine_after("1÷3=");
        assert_eq!(engine.display(), "0.3333333333333333");
        assert_eq!(engine.expression(), "1 ÷ 3");
    }

    #[test]
    fn test_overflow_shows_error() {
        let mut engine = engine_after("999999999999999");
        for _ in 0..5 {
            press(&mut engine, "×=");
        }
        assert_eq!(engine.display(), ERROR_TOKEN);
        assert_eq!(engine.pending(), None);
    }

    #[test]
    fn test_backspace() {
        assert_eq!(engine_after("5⌫").display(), "0");
        assert_eq!(engine_after("⌫").display(), "0");
        assert_eq!(engine_after("1234⌫").display(), "123");
        assert_eq!(engine_after("12345⌫").display(), "1,234");
        assert_eq!(engine_after("1.5⌫").display(), "1.");
        assert_eq!(engine_after("5±⌫").display(), "0");

        let mut engine = engine_after("12+3=");
        press(&mut engine, "⌫");
        assert_eq!(engine.display(), "1");
        assert!(engine.resets_on_next_digit());
        press(&mut engine, "7");
        assert_eq!(engine.display(), "7");
    }

    #[test]
    fn test_backspace_on_result_wider_than_f64_mantissa() {
        // 2^60 = 1,152,921,504,606,846,976 is exact in f64, its prefix is not
        let mut engine = engine_after("1048576×1048576×1048576=");
        assert_eq!(engine.display(), "1,152,921,504,606,846,976");
        press(&mut engine, "⌫");
        assert_eq!(engine.display(), "115,292,150,460,684,697");
        assert_eq!(strip_separators(engine.display()), "115292150460684697");
    }

    #[test]
    fn test_toggle_sign() {
        assert_eq!(engine_after("±").display(), "0");
        assert_eq!(engine_after("1234±").display(), "-1,234");
        assert_eq!(engine_after("12±±").display(), "12");
        assert_eq!(engine_after("12±3").display(), "-123");
    }

    #[test]
    fn test_percent() {
        let mut engine = engine_after("200%");
        assert_eq!(engine.display(), "2");
        assert!(engine.resets_on_next_digit());
        press(&mut engine, "5");
        assert_eq!(engine.display(), "5");
    }

    #[test]
    fn test_percent_ignores_pending_operator() {
        let mut engine = engine_after("5+10%");
        assert_eq!(engine.display(), "0.1");
        assert_eq!(engine.pending(), Some(Operator::Add));
        press(&mut engine, "=");
        assert_eq!(engine.display(), "5.1");
    }

    #[test]
    fn test_display_always_parses() {
        for keys in ["1234567", "0.5", "9±⌫⌫", "5÷0=", "7×8-", "1.0⌫⌫", "3%%"] {
            let engine = engine_after(keys);
            let text = engine.display();
            assert!(!text.is_empty());
            if !engine.is_error() {
                let raw = strip_separators(text);
                assert!(raw.parse::<f64>().is_ok(), "{keys}: {text:?} does not parse");
            }
        }
    }

    #[test]
    fn test_digit_sequences_format_idempotently() {
        for keys in ["1", "12", "1234", "1000000", "98765432109876"] {
            let first = parse_display(engine_after(keys).display());
            let again = parse_display(&format_number(first));
            assert_eq!(first, again);
        }
    }

    #[test]
    fn test_evaluate() {
        assert_eq!(evaluate(6.0, Operator::Divide, 3.0), Ok(2.0));
        assert_eq!(evaluate(1.0, Operator::Divide, 0.0), Err(CalcError::DivisionByZero));
        assert_eq!(evaluate(f64::MAX, Operator::Multiply, 2.0), Err(CalcError::Overflow));
    }
}
