//! Fixed-column field access and numeric conversion.
//!
//! All parsing and formatting goes through Rust's own number routines, which
//! always use `.` as the decimal point. [`NumericFormat`] is passed by value
//! to every reader and writer call, so no process-wide state is involved.

/// Field widths and precision of a fixed-column numeric layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumericFormat {
    /// Width of integer count/index fields.
    pub count_width: usize,
    /// Width of each coordinate field.
    pub coordinate_width: usize,
    /// Digits after the decimal point in coordinate fields.
    pub coordinate_precision: usize,
}

impl NumericFormat {
    pub const V2000: Self = Self {
        count_width: 3,
        coordinate_width: 10,
        coordinate_precision: 4,
    };

    /// Formats a coordinate right-justified, or `None` if it is non-finite or
    /// needs more than `coordinate_width` columns.
    pub fn format_coordinate(&self, value: f64) -> Option<String> {
        if !value.is_finite() {
            return None;
        }
        let text = format!(
            "{:>width$.prec$}",
            value,
            width = self.coordinate_width,
            prec = self.coordinate_precision
        );
        (text.len() == self.coordinate_width).then_some(text)
    }

    /// Formats an unsigned integer right-justified, or `None` on overflow.
    pub fn format_count(&self, value: usize) -> Option<String> {
        let text = format!("{:>width$}", value, width = self.count_width);
        (text.len() == self.count_width).then_some(text)
    }

    pub fn max_count(&self) -> usize {
        10usize.pow(self.count_width as u32) - 1
    }
}

impl Default for NumericFormat {
    fn default() -> Self {
        Self::V2000
    }
}

/// Byte columns `start..start + width` of `line`.
///
/// Returns `None` when the line is too short or the range splits a
/// multi-byte character.
pub fn field(line: &str, start: usize, width: usize) -> Option<&str> {
    line.get(start..start.checked_add(width)?)
}

/// Parses an unsigned integer that must account for every character of
/// `field`: leading whitespace, an optional `+`, then only ASCII digits.
pub fn parse_count(field: &str) -> Option<usize> {
    let body = field.trim_start();
    let digits = body.strip_prefix('+').unwrap_or(body);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Parses a finite decimal number surrounded by optional whitespace.
pub fn parse_real(field: &str) -> Option<f64> {
    field
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}
