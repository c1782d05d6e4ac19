//! Currency string normalization
//!
//! OCR output spells amounts many ways: `$48,500.00`, `48,500.00`,
//! `(1,200.00)` for negatives, stray whitespace. Normalization is strict:
//! a string that does not look like money yields `None`, never `0.0`.

/// Parse a currency string into a decimal amount
///
/// # Examples
///
/// ```
/// use formfill_extract::parse_money;
///
/// assert_eq!(parse_money("$48,500.00"), Some(48500.0));
/// assert_eq!(parse_money("(1,200.00)"), Some(-1200.0));
/// assert_eq!(parse_money(""), None);
/// assert_eq!(parse_money("N/A"), None);
/// ```
pub fn parse_money(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }

    // Accounting-style negatives: (1,200.00)
    let (body, parens_negative) = if trimmed.starts_with('(') && trimmed.ends_with(')') {
        (&trimmed[1..trimmed.len() - 1], true)
    } else {
        (trimmed, false)
    };

    let mut cleaned = String::with_capacity(body.len());
    let mut saw_digit = false;
    for c in body.chars() {
        match c {
            '$' | ',' | ' ' => continue,
            '0'..='9' => {
                saw_digit = true;
                cleaned.push(c);
            }
            '.' | '-' | '+' => cleaned.push(c),
            _ => return None,
        }
    }

    if !saw_digit {
        return None;
    }

    let value: f64 = cleaned.parse().ok()?;
    Some(if parens_negative { -value } else { value })
}

/// Find the last money-looking token in a line fragment
///
/// Used when a label matched but the amount sits somewhere later on the
/// line (table rows, dotted leaders).
pub(crate) fn find_money(fragment: &str) -> Option<f64> {
    fragment
        .split_whitespace()
        .rev()
        .find_map(parse_money)
}
