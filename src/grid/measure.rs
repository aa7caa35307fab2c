//! Text measurement used to size placeholders to their content

use crate::layout::Size;

/// Size-measurement collaborator supplied by the host toolkit
pub trait TextMeasure {
    /// Unscaled size of `text` as it would be drawn
    fn measure(&self, text: &str) -> Size;
}

/// Fixed-advance measurement: every character is equally wide
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMeasure {
    pub char_width: f64,
    pub line_height: f64,
}

impl Default for MonospaceMeasure {
    fn default() -> Self {
        Self {
            char_width: 7.0,
            line_height: 14.0,
        }
    }
}

impl MonospaceMeasure {
    pub fn new(char_width: f64, line_height: f64) -> Self {
        Self {
            char_width,
            line_height,
        }
    }
}

impl TextMeasure for MonospaceMeasure {
    fn measure(&self, text: &str) -> Size {
        let lines = text.split('\n');
        let (count, widest) = lines.fold((0usize, 0usize), |(count, widest), line| {
            (count + 1, widest.max(line.chars().count()))
        });
        Size::new(
            widest as f64 * self.char_width,
            count as f64 * self.line_height,
        )
    }
}
