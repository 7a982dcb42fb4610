//! Input tokens: the only way the UI talks to the engine.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A binary operator awaiting its right operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "×",
            Operator::Divide => "÷",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// One recognised button press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// 0..=9
    Digit(u8),
    Decimal,
    /// AC
    Clear,
    Backspace,
    ToggleSign,
    Percent,
    Op(Operator),
    Equals,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("not a calculator key: {0:?}")]
pub struct ParseTokenError(pub String);

impl Token {
    /// Map a keypad label to its token.
    pub fn from_label(label: &str) -> Option<Token> {
        let token = match label {
            "." => Token::Decimal,
            "AC" => Token::Clear,
            "⌫" => Token::Backspace,
            "±" => Token::ToggleSign,
            "%" => Token::Percent,
            "+" => Token::Op(Operator::Add),
            "-" | "−" => Token::Op(Operator::Subtract),
            "×" | "*" => Token::Op(Operator::Multiply),
            "÷" | "/" => Token::Op(Operator::Divide),
            "=" => Token::Equals,
            _ => {
                let mut chars = label.chars();
                let digit = chars.next()?.to_digit(10)?;
                if chars.next().is_some() {
                    return None;
                }
                Token::Digit(digit as u8)
            }
        };
        Some(token)
    }
}

impl FromStr for Token {
    type Err = ParseTokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Token::from_label(s).ok_or_else(|| ParseTokenError(s.to_string()))
    }
}
