//! The calculator engine: an input-driven state machine
//!
//! Every keypad event becomes one method call that runs to completion. The
//! engine keeps text, not numbers, for the operand being typed and for the
//! accumulated left-hand side, because that is what the display shows and
//! what the user edits. Numbers only appear when a function, memory key or
//! `=` needs one.
//!
//! Errors never escape. Anything undefined puts [`ERROR_MARKER`] on the
//! display, clears the expression and leaves the engine ready for the next
//! key.

use crate::core::evaluator::Evaluator;
use crate::core::functions::{power, Function};
use crate::core::number::{format_number, parse_float};
use crate::core::Operation;
use crate::input::{InputEvent, MemoryCommand};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Text shown in place of a result when an operation is undefined
pub const ERROR_MARKER: &str = "Error";

/// Initial and cleared value of the operand buffer
const ZERO: &str = "0";

/// Whether the engine is chaining operators or waiting for an exponent
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Mode {
    /// Ordinary operand and operator entry
    #[default]
    Normal,
    /// `power` was pressed; digits now build the exponent for `base`
    PowerPending {
        /// Operand text captured when power mode was entered
        base: String,
    },
}

/// Whether an operation changed what the display should show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The display must be redrawn
    Refresh,
    /// Nothing visible changed
    Unchanged,
}

impl Outcome {
    /// Returns true if the display must be redrawn
    #[must_use]
    pub const fn needs_refresh(self) -> bool {
        matches!(self, Self::Refresh)
    }
}

/// The two strings handed to a display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Display {
    /// Accumulated left-hand side, verbatim
    pub expression: String,
    /// Operand being typed or last result; never empty
    pub current_input: String,
}

impl Display {
    /// Returns true if the operand line shows the error marker
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.current_input == ERROR_MARKER
    }
}

/// Calculator engine state
#[derive(Debug, Clone)]
pub struct Engine {
    current_input: String,
    expression: String,
    memory: f64,
    last_result: Option<f64>,
    mode: Mode,
    evaluator: Evaluator,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Creates an engine showing `0` with empty memory
    #[must_use]
    pub fn new() -> Self {
        Self {
            current_input: ZERO.to_string(),
            expression: String::new(),
            memory: 0.0,
            last_result: None,
            mode: Mode::Normal,
            evaluator: Evaluator::new(),
        }
    }

    // ===== Accessors =====

    /// The operand buffer (may be empty right after an operator)
    #[must_use]
    pub fn current_input(&self) -> &str {
        &self.current_input
    }

    /// The accumulated expression
    #[must_use]
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// The memory register
    #[must_use]
    pub fn memory(&self) -> f64 {
        self.memory
    }

    /// The last result produced by `=`
    #[must_use]
    pub fn last_result(&self) -> Option<f64> {
        self.last_result
    }

    /// The current mode
    #[must_use]
    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    /// Returns true while waiting for an exponent
    #[must_use]
    pub fn is_power_pending(&self) -> bool {
        matches!(self.mode, Mode::PowerPending { .. })
    }

    /// What a display should show right now
    #[must_use]
    pub fn display(&self) -> Display {
        let current_input = if self.current_input.is_empty() {
            ZERO.to_string()
        } else {
            self.current_input.clone()
        };
        Display {
            expression: self.expression.clone(),
            current_input,
        }
    }

    // ===== Event dispatch =====

    /// Routes one input event to its operation
    pub fn handle(&mut self, event: InputEvent) -> Outcome {
        trace!(?event, mode = ?self.mode, "handling input event");
        match event {
            InputEvent::Digit(d) => self.input_digit(d),
            InputEvent::Decimal => self.input_decimal(),
            InputEvent::Sign => self.input_sign(),
            InputEvent::Operator(op) => self.input_operator(op),
            InputEvent::Function(f) => self.apply_function(f),
            InputEvent::Memory(cmd) => self.memory_command(cmd),
            InputEvent::Equals => self.evaluate(),
            InputEvent::Clear => self.clear_all(),
            InputEvent::ClearEntry => self.clear_entry(),
            InputEvent::Backspace => self.backspace(),
        }
    }

    // ===== Operand entry =====

    /// Appends a digit to the operand (or exponent) buffer.
    ///
    /// A lone `0` is replaced rather than extended. Values above 9 are ignored.
    pub fn input_digit(&mut self, digit: u8) -> Outcome {
        let Some(ch) = char::from_digit(u32::from(digit), 10) else {
            return Outcome::Unchanged;
        };
        self.reset_error_marker();
        if self.current_input == ZERO {
            self.current_input = ch.to_string();
        } else {
            self.current_input.push(ch);
        }
        Outcome::Refresh
    }

    /// Appends a decimal point unless the buffer already has one
    pub fn input_decimal(&mut self) -> Outcome {
        self.reset_error_marker();
        if self.current_input.contains('.') {
            return Outcome::Unchanged;
        }
        self.current_input.push('.');
        Outcome::Refresh
    }

    /// Toggles a leading minus on the operand (or exponent) buffer.
    ///
    /// `0` and the error marker have no sign to toggle. An empty buffer
    /// becomes `-`, starting a negative operand.
    pub fn input_sign(&mut self) -> Outcome {
        if let Some(unsigned) = self.current_input.strip_prefix('-') {
            self.current_input = unsigned.to_string();
        } else if !matches!(self.current_input.as_str(), ZERO | ERROR_MARKER) {
            self.current_input.insert(0, '-');
        } else {
            return Outcome::Unchanged;
        }
        Outcome::Refresh
    }

    /// Removes the last character, falling back to `0`
    pub fn backspace(&mut self) -> Outcome {
        if self.current_input == ERROR_MARKER {
            self.current_input = ZERO.to_string();
            return Outcome::Refresh;
        }
        self.current_input.pop();
        if self.current_input.is_empty() {
            self.current_input = ZERO.to_string();
        }
        Outcome::Refresh
    }

    fn reset_error_marker(&mut self) {
        if self.current_input == ERROR_MARKER {
            self.current_input = ZERO.to_string();
        }
    }

    // ===== Operators =====

    /// Commits the operand and operator to the expression.
    ///
    /// When the expression already ends in an operator, the new one replaces
    /// it and the operand buffer is dropped. While an exponent is pending,
    /// the operator instead commits the power and is itself discarded.
    pub fn input_operator(&mut self, op: Operation) -> Outcome {
        if self.is_power_pending() {
            return self.commit_power(false);
        }

        if self.expression.ends_with(Operation::is_operator_char) {
            if !self.current_input.is_empty() {
                trace!(dropped = %self.current_input, "operator replaced, operand discarded");
            }
            self.expression.pop();
        } else {
            self.expression.push_str(&self.current_input);
        }
        self.expression.push(op.symbol());
        self.current_input.clear();
        Outcome::Refresh
    }

    // ===== Functions =====

    /// Applies a function key to the operand.
    ///
    /// Silently ignored when the operand is not numeric. `power` captures the
    /// operand as the base and waits for an exponent.
    pub fn apply_function(&mut self, function: Function) -> Outcome {
        let Some(x) = parse_float(&self.current_input) else {
            trace!(%function, input = %self.current_input, "function ignored: operand is not numeric");
            return Outcome::Unchanged;
        };

        match function.apply(x) {
            None if self.is_power_pending() => Outcome::Unchanged,
            None => {
                let base = std::mem::take(&mut self.current_input);
                debug!(%base, "entering power mode");
                self.mode = Mode::PowerPending { base };
                Outcome::Refresh
            }
            Some(Ok(value)) => {
                self.current_input = format_number(value);
                self.expression.clear();
                Outcome::Refresh
            }
            Some(Err(err)) => {
                debug!(%err, "function rejected operand");
                self.show_error()
            }
        }
    }

    /// Computes `base ^ exponent` and returns to normal mode.
    ///
    /// Waits (no-op) while the exponent is still empty. An unparsable base
    /// or exponent abandons the whole entry.
    fn commit_power(&mut self, record_result: bool) -> Outcome {
        let Mode::PowerPending { base } = &self.mode else {
            return Outcome::Unchanged;
        };
        if self.current_input.is_empty() {
            return Outcome::Unchanged;
        }

        let (Some(b), Some(e)) = (parse_float(base), parse_float(&self.current_input)) else {
            debug!(%base, exponent = %self.current_input, "power operands not numeric, clearing");
            return self.clear_all();
        };

        let result = power(b, e);
        debug!(base = b, exponent = e, result, "power committed");
        self.current_input = format_number(result);
        self.expression.clear();
        self.mode = Mode::Normal;
        if record_result {
            self.last_result = Some(result);
        }
        Outcome::Refresh
    }

    // ===== Evaluation =====

    /// The `=` key
    pub fn evaluate(&mut self) -> Outcome {
        if self.is_power_pending() {
            return self.commit_power(true);
        }

        if self.expression.is_empty() && self.current_input.is_empty() {
            self.current_input = ZERO.to_string();
            return Outcome::Refresh;
        }

        let statement = format!("{}{}", self.expression, self.current_input);
        match self.evaluator.evaluate_statement(&statement) {
            Ok(value) => {
                debug!(%statement, value, "evaluated");
                self.last_result = Some(value);
                self.current_input = format_number(value);
                self.expression.clear();
                Outcome::Refresh
            }
            Err(err) => {
                debug!(%statement, %err, "evaluation failed");
                self.show_error()
            }
        }
    }

    fn show_error(&mut self) -> Outcome {
        self.current_input = ERROR_MARKER.to_string();
        self.expression.clear();
        Outcome::Refresh
    }

    // ===== Memory =====

    /// Dispatches a memory key
    pub fn memory_command(&mut self, command: MemoryCommand) -> Outcome {
        match command {
            MemoryCommand::Clear => self.memory_clear(),
            MemoryCommand::Recall => self.memory_recall(),
            MemoryCommand::Add => self.memory_add(),
            MemoryCommand::Subtract => self.memory_subtract(),
        }
    }

    /// Zeroes the memory register
    pub fn memory_clear(&mut self) -> Outcome {
        self.memory = 0.0;
        Outcome::Unchanged
    }

    /// Puts the memory register on the display
    pub fn memory_recall(&mut self) -> Outcome {
        self.current_input = format_number(self.memory);
        Outcome::Refresh
    }

    /// Adds the operand to memory, if it is numeric
    pub fn memory_add(&mut self) -> Outcome {
        if let Some(x) = parse_float(&self.current_input) {
            self.memory += x;
        }
        Outcome::Unchanged
    }

    /// Subtracts the operand from memory, if it is numeric
    pub fn memory_subtract(&mut self) -> Outcome {
        if let Some(x) = parse_float(&self.current_input) {
            self.memory -= x;
        }
        Outcome::Unchanged
    }

    // ===== Clearing =====

    /// Abandons all entry, including a pending power. Memory survives.
    pub fn clear_all(&mut self) -> Outcome {
        self.current_input = ZERO.to_string();
        self.expression.clear();
        self.mode = Mode::Normal;
        Outcome::Refresh
    }

    /// Resets only the operand buffer
    pub fn clear_entry(&mut self) -> Outcome {
        self.current_input = ZERO.to_string();
        Outcome::Refresh
    }
}
