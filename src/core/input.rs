//! Numeric coercion for user-entered text.
//!
//! Input fields accept whatever is typed into them. Rather than rejecting
//! bad input, the longest numeric prefix is used and anything without one
//! becomes zero. This permissive policy is intentional: a half-typed value
//! must never surface as an error.

use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse `text` into a decimal, coercing anything unparsable to zero.
///
/// # Examples
///
/// ```
/// use landed_cost::core::input::coerce_decimal;
/// use rust_decimal::Decimal;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(coerce_decimal("974.00"), dec!(974.00));
/// assert_eq!(coerce_decimal(" 12abc"), dec!(12));
/// assert_eq!(coerce_decimal("abc"), Decimal::ZERO);
/// assert_eq!(coerce_decimal(""), Decimal::ZERO);
/// ```
pub fn coerce_decimal(text: &str) -> Decimal {
    let Some(number) = NumericPrefix::scan(text.trim()) else {
        return Decimal::ZERO;
    };
    if number.exponent_digits() > MAX_EXPONENT_DIGITS {
        // far outside the representable range either way
        return Decimal::ZERO;
    }
    let canonical = number.canonical();
    let parsed = if number.exponent.is_some() {
        Decimal::from_scientific(&canonical)
    } else {
        Decimal::from_str(&canonical)
    };
    parsed.unwrap_or(Decimal::ZERO)
}

const MAX_EXPONENT_DIGITS: usize = 3;

/// The leading `[+-]digits[.digits][(e|E)[+-]digits]` run of a string.
struct NumericPrefix<'a> {
    negative: bool,
    integer: &'a str,
    fraction: &'a str,
    exponent: Option<&'a str>,
}

impl<'a> NumericPrefix<'a> {
    /// `None` when the mantissa has no digit at all.
    fn scan(s: &'a str) -> Option<Self> {
        let bytes = s.as_bytes();
        let mut pos = 0;

        let negative = bytes.first() == Some(&b'-');
        if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
            pos += 1;
        }
        let int_start = pos;
        pos += count_digits(&bytes[pos..]);
        let integer = &s[int_start..pos];

        let mut fraction = "";
        if bytes.get(pos) == Some(&b'.') {
            let frac_start = pos + 1;
            pos = frac_start + count_digits(&bytes[frac_start..]);
            fraction = &s[frac_start..pos];
        }
        if integer.is_empty() && fraction.is_empty() {
            return None;
        }

        let mut exponent = None;
        if matches!(bytes.get(pos), Some(b'e') | Some(b'E')) {
            let exp_start = pos + 1;
            let mut exp_end = exp_start;
            if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
                exp_end += 1;
            }
            let digits = count_digits(&bytes[exp_end..]);
            if digits > 0 {
                exponent = Some(&s[exp_start..exp_end + digits]);
            }
        }

        Some(Self {
            negative,
            integer,
            fraction,
            exponent,
        })
    }

    fn exponent_digits(&self) -> usize {
        self.exponent
            .map(|exp| exp.trim_start_matches(['+', '-']).len())
            .unwrap_or(0)
    }

    /// Rebuild the number as `-I.F` / `-IeX`, filling an empty integer
    /// part with `0` and dropping a dangling dot.
    fn canonical(&self) -> String {
        let mut out = String::new();
        if self.negative {
            out.push('-');
        }
        out.push_str(if self.integer.is_empty() { "0" } else { self.integer });
        if !self.fraction.is_empty() {
            out.push('.');
            out.push_str(self.fraction);
        }
        if let Some(exp) = self.exponent {
            out.push('e');
            out.push_str(exp.trim_start_matches('+'));
        }
        out
    }
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}
