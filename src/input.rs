// 🔢 Input Coercion - Raw field text → numbers
//
// Every editable field arrives as text. Anything that is not a number
// becomes 0 and is later excluded from the totals; nothing here can fail.

// ============================================================================
// COERCION
// ============================================================================

/// Coerce raw field text into a number, falling back to `0.0`.
///
/// Parses the longest leading decimal prefix, so `"3.5 credits"` reads as
/// `3.5` and `"abc"` reads as `0.0`. Non-finite results are also `0.0`.
/// Negative values are kept; the ledger's domain filters drop them.
pub fn coerce(raw: &str) -> f64 {
    parse_leading_float(raw)
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

/// Parse the longest prefix of `raw` (after leading whitespace) that forms a
/// decimal number: optional sign, digits, optional fraction, optional
/// exponent. Returns `None` when no digits are present.
pub fn parse_leading_float(raw: &str) -> Option<f64> {
    let s = raw.trim_start().as_bytes();
    let mut end = 0;

    if end < s.len() && (s[end] == b'+' || s[end] == b'-') {
        end += 1;
    }

    let int_start = end;
    while end < s.len() && s[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < s.len() && s[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < s.len() && s[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        let frac_digits = frac_end - frac_start;
        if digits + frac_digits > 0 {
            end = frac_end;
            digits += frac_digits;
        }
    }

    if digits == 0 {
        return None;
    }

    // Exponent only counts when at least one digit follows it
    if end < s.len() && (s[end] == b'e' || s[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < s.len() && (s[exp_end] == b'+' || s[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < s.len() && s[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    // Prefix is pure ASCII, so slicing on `end` is a char boundary
    std::str::from_utf8(&s[..end]).ok()?.parse::<f64>().ok()
}

// ============================================================================
// TESTS
// ============================================================================
