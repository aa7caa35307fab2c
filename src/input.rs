//! Bounded integer input backed by an editable text
//!
//! The text is what the user types; the value only changes when the text parses
//! to an integer the bounds accept. Text above the maximum snaps to the maximum,
//! text below the minimum is left alone until the user finishes typing.

use crate::layout::LayoutError;

/// Integer field with step buttons
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumericInput {
    min: i64,
    max: i64,
    default: i64,
    step: i64,
    value: i64,
    text: String,
}

impl NumericInput {
    pub fn new(default: i64, min: i64, max: i64, step: i64) -> Result<Self, LayoutError> {
        if min > max {
            return Err(LayoutError::invalid_value(format!(
                "minimum {} is greater than maximum {}",
                min, max
            )));
        }
        if !(min..=max).contains(&default) {
            return Err(LayoutError::invalid_value(format!(
                "default {} outside [{}, {}]",
                default, min, max
            )));
        }
        Ok(Self {
            min,
            max,
            default,
            step,
            value: default,
            text: default.to_string(),
        })
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn bounds(&self) -> (i64, i64) {
        (self.min, self.max)
    }

    /// Whether a leading minus sign may be typed at all
    fn accepts_negative(&self) -> bool {
        self.min < 0 || self.max < 0
    }

    /// Replace the text as typed and update the value when it is acceptable
    ///
    /// Returns the new value when it changed.
    pub fn set_text(&mut self, text: &str) -> Option<i64> {
        let before = self.value;
        self.text = text.to_string();

        if text.is_empty() {
            self.value = self.default;
            return self.changed(before);
        }

        let digits = text.strip_prefix('-').filter(|_| self.accepts_negative()).unwrap_or(text);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            tracing::warn!(text, "ignoring malformed numeric input");
            return None;
        }

        let negative = digits.len() != text.len();
        let parsed = match text.parse::<i64>() {
            Ok(value) => value,
            // digits only, so the parse can only fail on overflow
            Err(_) if negative => i64::MIN,
            Err(_) => i64::MAX,
        };

        if parsed > self.max {
            self.value = self.max;
            self.text = self.max.to_string();
        } else if parsed < self.min {
            tracing::warn!(value = parsed, min = self.min, "numeric input below minimum");
            return None;
        } else {
            self.value = parsed;
        }
        self.changed(before)
    }

    /// Set the value directly, rewriting the text
    pub fn set_value(&mut self, value: i64) -> Result<(), LayoutError> {
        if !(self.min..=self.max).contains(&value) {
            return Err(LayoutError::invalid_value(format!(
                "{} outside [{}, {}]",
                value, self.min, self.max
            )));
        }
        self.value = value;
        self.text = value.to_string();
        Ok(())
    }

    /// Apply one step upward; a no-op once the step would lead past the bound
    pub fn increase(&mut self) -> Option<i64> {
        let movable = (self.step > 0 && self.value < self.max) || (self.step < 0 && self.value > self.min);
        if !movable {
            return None;
        }
        self.step_by(self.step)
    }

    /// Apply one step downward
    pub fn decrease(&mut self) -> Option<i64> {
        let movable = (self.step > 0 && self.value > self.min) || (self.step < 0 && self.value < self.max);
        if !movable {
            return None;
        }
        self.step_by(self.step.saturating_neg())
    }

    fn step_by(&mut self, delta: i64) -> Option<i64> {
        let before = self.value;
        self.value = self.value.saturating_add(delta).clamp(self.min, self.max);
        self.text = self.value.to_string();
        self.changed(before)
    }

    fn changed(&self, before: i64) -> Option<i64> {
        (self.value != before).then_some(self.value)
    }
}
