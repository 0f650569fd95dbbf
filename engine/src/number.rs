//! FILENAME: engine/src/number.rs
//! PURPOSE: Lenient numeric reading and writing of cell text.
//! CONTEXT: Cells are always strings. Summing, min/max and sorting read them
//! as numbers here; anything that does not parse is simply not a number.

/// Reads a cell as a finite number. Blank, non-numeric and non-finite text
/// (`"N/A"`, `"inf"`, `"NaN"`) all yield `None`.
pub fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Writes a number back into cell text, without unnecessary decimal places.
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        // Avoid "-0" for sums that cancel out
        format!("{:.0}", n + 0.0)
    } else {
        format!("{}", n)
    }
}

/// True when a cell carries no value at all.
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}
