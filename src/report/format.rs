//! Locale-style number formatting for report cells.

/// Separators used when rendering numbers.
///
/// The default matches `en_US`: `1,234,567` and `66.7`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberFormat {
    grouping: char,
    decimal: char,
}

impl NumberFormat {
    pub fn new(grouping: char, decimal: char) -> Self {
        Self { grouping, decimal }
    }

    /// `de_DE` style: `1.234.567` and `66,7`.
    pub fn german() -> Self {
        Self::new('.', ',')
    }

    /// Formats an integer with thousands separators.
    pub fn count(&self, value: i64) -> String {
        let digits = value.unsigned_abs().to_string();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
        if value < 0 {
            out.push('-');
        }
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push(self.grouping);
            }
            out.push(c);
        }
        out
    }

    /// Formats a percentage with exactly one fractional digit, e.g. `66.7 %`.
    pub fn percentage(&self, value: f64) -> String {
        let mut out = format!("{value:.1}");
        if self.decimal != '.' {
            out = out.replace('.', &self.decimal.to_string());
        }
        out.push_str(" %");
        out
    }
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self::new(',', '.')
    }
}

/// Share of `part` in `total` as a percentage. Returns 0.0 when `total` is 0.
pub fn pct(part: i64, total: i64) -> f64 {
    if total == 0 {
        0.0
    } else {
        (part as f64 / total as f64) * 100.0
    }
}
