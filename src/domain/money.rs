use std::fmt;

/// Money is represented as integer cents to avoid floating-point precision issues.
/// 1 unit = 100 cents, so 12.50 = 1250 cents. No currency is attached.
pub type Cents = i64;

/// Format cents as a plain decimal string with two fractional digits.
/// Example: 1250 -> "12.50", -1234 -> "-12.34"
pub fn format_cents(cents: Cents) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs_cents = cents.unsigned_abs();
    format!("{}{}.{:02}", sign, abs_cents / 100, abs_cents % 100)
}

/// Parse a non-negative decimal amount into cents.
///
/// Accepts whole units ("100"), one or two fractional digits ("12.5", "12.50"),
/// a bare fraction (".50") and a leading `+`. A trailing `e`/`E` exponent is
/// also accepted ("1.0E7", "2.5e-1"), which is how older ledger files store
/// large and small amounts. Fractional digits past the cents are truncated,
/// so "100.999" becomes 10099.
pub fn parse_cents(input: &str) -> Result<Cents, ParseCentsError> {
    let input = input.trim();
    if input.starts_with('-') {
        return Err(ParseCentsError::Negative);
    }
    let input = input.strip_prefix('+').unwrap_or(input);

    let (mantissa, exponent) = match input.find(['e', 'E']) {
        Some(pos) => {
            let exponent: i64 = input[pos + 1..]
                .parse()
                .map_err(|_| ParseCentsError::InvalidFormat)?;
            (&input[..pos], exponent)
        }
        None => (input, 0),
    };

    let (units_str, decimal_str) = match mantissa.split_once('.') {
        Some((units, decimals)) => (units, decimals),
        None => (mantissa, ""),
    };

    if units_str.is_empty() && decimal_str.is_empty() {
        return Err(ParseCentsError::InvalidFormat);
    }
    if !units_str.bytes().all(|b| b.is_ascii_digit())
        || !decimal_str.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(ParseCentsError::InvalidFormat);
    }

    // Number of leading mantissa digits that land at or above the cents place.
    let cents_digits = (units_str.len() as i64)
        .saturating_add(exponent)
        .saturating_add(2);

    let mut cents: Cents = 0;
    let mut consumed: i64 = 0;
    for digit in units_str.bytes().chain(decimal_str.bytes()) {
        if consumed >= cents_digits {
            break;
        }
        cents = cents
            .checked_mul(10)
            .and_then(|c| c.checked_add(i64::from(digit - b'0')))
            .ok_or(ParseCentsError::Overflow)?;
        consumed += 1;
    }

    // Missing low-order digits are zeros ("12.5" -> 1250, "1E7" -> 1000000000).
    if cents != 0 {
        while consumed < cents_digits {
            cents = cents.checked_mul(10).ok_or(ParseCentsError::Overflow)?;
            consumed += 1;
        }
    }

    Ok(cents)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseCentsError {
    InvalidFormat,
    Negative,
    Overflow,
}

impl fmt::Display for ParseCentsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseCentsError::InvalidFormat => write!(f, "invalid money format"),
            ParseCentsError::Negative => write!(f, "amount must not be negative"),
            ParseCentsError::Overflow => write!(f, "amount is too large"),
        }
    }
}

impl std::error::Error for ParseCentsError {}
