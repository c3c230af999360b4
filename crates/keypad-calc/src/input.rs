//! Input events and the vocabularies that produce them
//!
//! A front end never calls engine methods directly. It translates whatever
//! it receives (a key name, a button's value or action, a scripted token)
//! into an [`InputEvent`] and hands that to [`Engine::handle`].
//!
//! [`Engine::handle`]: crate::engine::Engine::handle

use crate::core::{CalcError, CalcResult, Function, Operation};
use serde::{Deserialize, Serialize};

/// Memory register keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemoryCommand {
    /// MC
    Clear,
    /// MR
    Recall,
    /// M+
    Add,
    /// M-
    Subtract,
}

impl MemoryCommand {
    /// Short keypad label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Clear => "MC",
            Self::Recall => "MR",
            Self::Add => "M+",
            Self::Subtract => "M-",
        }
    }
}

/// One keypad press
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum InputEvent {
    /// A digit 0-9
    Digit(u8),
    /// Decimal point
    Decimal,
    /// +/- toggle
    Sign,
    /// Binary operator
    Operator(Operation),
    /// Function key
    Function(Function),
    /// Memory key
    Memory(MemoryCommand),
    /// `=`
    Equals,
    /// C
    Clear,
    /// CE
    ClearEntry,
    /// Delete the last typed character
    Backspace,
}

impl InputEvent {
    /// Maps a keyboard key name to an event.
    ///
    /// Returns `None` for keys the calculator does not react to.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "Enter" | "=" => Some(Self::Equals),
            "Backspace" => Some(Self::Backspace),
            "Escape" => Some(Self::Clear),
            _ => Self::from_char_key(key),
        }
    }

    /// Maps a button's value (digits, `.`, `+/-`, operators)
    pub fn from_button_value(value: &str) -> CalcResult<Self> {
        if value == "+/-" {
            return Ok(Self::Sign);
        }
        Self::from_char_key(value).ok_or_else(|| CalcError::unknown_input(value))
    }

    /// Maps a button's action name
    pub fn from_button_action(action: &str) -> CalcResult<Self> {
        let event = match action {
            "clear" => Self::Clear,
            "clear-entry" => Self::ClearEntry,
            "calculate" => Self::Equals,
            "memory-clear" => Self::Memory(MemoryCommand::Clear),
            "memory-recall" => Self::Memory(MemoryCommand::Recall),
            "memory-add" => Self::Memory(MemoryCommand::Add),
            "memory-subtract" => Self::Memory(MemoryCommand::Subtract),
            _ => Function::from_name(action)
                .map(Self::Function)
                .ok_or_else(|| CalcError::unknown_input(action))?,
        };
        Ok(event)
    }

    /// Maps a single script token.
    ///
    /// Accepts everything the key, button value and button action
    /// vocabularies accept, plus short aliases for the keys without a
    /// printable symbol.
    pub fn from_token(token: &str) -> CalcResult<Self> {
        let alias = match token {
            "C" => Some(Self::Clear),
            "CE" => Some(Self::ClearEntry),
            "MC" => Some(Self::Memory(MemoryCommand::Clear)),
            "MR" => Some(Self::Memory(MemoryCommand::Recall)),
            "M+" => Some(Self::Memory(MemoryCommand::Add)),
            "M-" => Some(Self::Memory(MemoryCommand::Subtract)),
            "neg" => Some(Self::Sign),
            "bs" => Some(Self::Backspace),
            "sqr" => Some(Self::Function(Function::Square)),
            "inv" => Some(Self::Function(Function::Reciprocal)),
            "pow" => Some(Self::Function(Function::Power)),
            _ => None,
        };
        if let Some(event) = alias.or_else(|| Self::from_key(token)) {
            return Ok(event);
        }
        Self::from_button_value(token).or_else(|_| Self::from_button_action(token))
    }

    /// Maps a token that may spell a whole number (`123`, `4.5`) into one
    /// event per character; any other token maps through [`Self::from_token`].
    pub fn expand_token(token: &str) -> CalcResult<Vec<Self>> {
        let is_literal = token.len() > 1
            && token.chars().any(|c| c.is_ascii_digit())
            && token.chars().all(|c| c.is_ascii_digit() || c == '.');
        if is_literal {
            token
                .chars()
                .map(|c| Self::from_literal_char(c).ok_or_else(|| CalcError::unknown_input(token)))
                .collect()
        } else {
            Self::from_token(token).map(|event| vec![event])
        }
    }

    /// Keypad label of the event
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Digit(d) => d.to_string(),
            Self::Decimal => ".".to_string(),
            Self::Sign => "+/-".to_string(),
            Self::Operator(op) => op.to_string(),
            Self::Function(f) => f.to_string(),
            Self::Memory(m) => m.label().to_string(),
            Self::Equals => "=".to_string(),
            Self::Clear => "C".to_string(),
            Self::ClearEntry => "CE".to_string(),
            Self::Backspace => "⌫".to_string(),
        }
    }

    /// Single characters shared by keys and button values
    fn from_char_key(key: &str) -> Option<Self> {
        let mut chars = key.chars();
        let (Some(ch), None) = (chars.next(), chars.next()) else {
            return None;
        };
        Self::from_literal_char(ch).or_else(|| Operation::from_char(ch).map(Self::Operator))
    }

    fn from_literal_char(ch: char) -> Option<Self> {
        match ch {
            '.' => Some(Self::Decimal),
            _ => ch
                .to_digit(10)
                .and_then(|d| u8::try_from(d).ok())
                .map(Self::Digit),
        }
    }
}

impl std::fmt::Display for InputEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label())
    }
}
