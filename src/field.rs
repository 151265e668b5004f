//! Field parsers: convert one isolated fixed-width field into a value.
//!
//! Numeric conversion follows the usual leading-conversion rules: leading
//! blanks are skipped, an optional sign, then digits (and for floats a
//! fraction, an exponent, or `inf`/`infinity`/`nan`). Conversion may stop
//! before the field boundary, but everything after the stop point must be
//! blank. A field with no digits and only blanks converts to zero.
//!
//! Each call returns its own result; no conversion state outlives the call.

/// Why a single field failed to convert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    /// Non-blank bytes follow the converted prefix; `offset` is the first one.
    Trailing { offset: usize },
    /// The value does not fit the destination type.
    Overflow,
    /// The string cell could not be allocated.
    OutOfMemory,
}

/// Whitespace or line-boundary byte.
#[inline]
fn is_blank(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | 0x0b | 0x0c)
}

#[inline]
fn skip_blanks(raw: &[u8], mut pos: usize) -> usize {
    while pos < raw.len() && is_blank(raw[pos]) {
        pos += 1;
    }
    pos
}

#[inline]
fn skip_digits(raw: &[u8], mut pos: usize) -> usize {
    while pos < raw.len() && raw[pos].is_ascii_digit() {
        pos += 1;
    }
    pos
}

/// Everything from `end` to the field boundary must be blank.
fn check_trailing(raw: &[u8], end: usize) -> Result<(), FieldError> {
    match raw[end..].iter().position(|&b| !is_blank(b)) {
        Some(offset) => Err(FieldError::Trailing {
            offset: end + offset,
        }),
        None => Ok(()),
    }
}

/// A numeric element type that can be read from a fixed-width field.
pub trait ParseNumber: Sized + Copy + Default {
    fn parse_field(raw: &[u8]) -> Result<Self, FieldError>;
}

/// Leading decimal integer conversion into `i64`.
///
/// Returns the value and the index just past the converted prefix. When no
/// digits are found nothing is consumed and the value is zero.
fn convert_integer(raw: &[u8]) -> Result<(i64, usize), FieldError> {
    let start = skip_blanks(raw, 0);
    let mut pos = start;
    let negative = match raw.get(pos) {
        Some(b'-') => {
            pos += 1;
            true
        }
        Some(b'+') => {
            pos += 1;
            false
        }
        _ => false,
    };

    let digits_start = pos;
    let mut acc: i64 = 0;
    while pos < raw.len() && raw[pos].is_ascii_digit() {
        let digit = i64::from(raw[pos] - b'0');
        // Accumulate negatively so i64::MIN is representable
        acc = acc
            .checked_mul(10)
            .and_then(|v| {
                if negative {
                    v.checked_sub(digit)
                } else {
                    v.checked_add(digit)
                }
            })
            .ok_or(FieldError::Overflow)?;
        pos += 1;
    }

    if pos == digits_start {
        return Ok((0, 0));
    }
    Ok((acc, pos))
}

macro_rules! impl_parse_int {
    ($($ty:ty),*) => {
        $(
            impl ParseNumber for $ty {
                fn parse_field(raw: &[u8]) -> Result<Self, FieldError> {
                    let (value, end) = convert_integer(raw)?;
                    let value = <$ty>::try_from(value).map_err(|_| FieldError::Overflow)?;
                    check_trailing(raw, end)?;
                    Ok(value)
                }
            }
        )*
    };
}

impl_parse_int!(i8, i16, i32, i64);

/// Find the longest prefix that is a float literal.
///
/// Returns `(start, end, is_special)` where `raw[start..end]` is the literal
/// and `is_special` marks `inf`/`infinity`/`nan`. `end == 0` means nothing
/// was converted.
fn scan_float(raw: &[u8]) -> (usize, usize, bool) {
    let start = skip_blanks(raw, 0);
    let mut pos = start;
    if matches!(raw.get(pos), Some(b'+' | b'-')) {
        pos += 1;
    }

    let rest = &raw[pos..];
    for word in [&b"infinity"[..], &b"inf"[..], &b"nan"[..]] {
        if rest.len() >= word.len() && rest[..word.len()].eq_ignore_ascii_case(word) {
            return (start, pos + word.len(), true);
        }
    }

    let int_start = pos;
    pos = skip_digits(raw, pos);
    let mut has_digits = pos > int_start;

    if raw.get(pos) == Some(&b'.') {
        let frac_start = pos + 1;
        let frac_end = skip_digits(raw, frac_start);
        if has_digits || frac_end > frac_start {
            has_digits = true;
            pos = frac_end;
        }
    }

    if !has_digits {
        return (start, 0, false);
    }

    if matches!(raw.get(pos), Some(b'e' | b'E')) {
        let mut exp = pos + 1;
        if matches!(raw.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = skip_digits(raw, exp);
        if exp_end > exp {
            pos = exp_end;
        }
    }

    (start, pos, false)
}

macro_rules! impl_parse_float {
    ($($ty:ty),*) => {
        $(
            impl ParseNumber for $ty {
                fn parse_field(raw: &[u8]) -> Result<Self, FieldError> {
                    let (start, end, special) = scan_float(raw);
                    if end == 0 {
                        check_trailing(raw, 0)?;
                        return Ok(0.0);
                    }
                    // The literal is ASCII by construction
                    let text = std::str::from_utf8(&raw[start..end])
                        .map_err(|_| FieldError::Trailing { offset: start })?;
                    let value: $ty = text
                        .parse()
                        .map_err(|_| FieldError::Trailing { offset: start })?;
                    if value.is_infinite() && !special {
                        return Err(FieldError::Overflow);
                    }
                    check_trailing(raw, end)?;
                    Ok(value)
                }
            }
        )*
    };
}

impl_parse_float!(f32, f64);

/// Copy a string field verbatim into its own allocation of exactly
/// `raw.len()` bytes.
pub fn copy_string(raw: &[u8]) -> Result<Vec<u8>, FieldError> {
    let mut cell = Vec::new();
    cell.try_reserve_exact(raw.len())
        .map_err(|_| FieldError::OutOfMemory)?;
    cell.extend_from_slice(raw);
    Ok(cell)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_plain() {
        assert_eq!(i32::parse_field(b"123"), Ok(123));
        assert_eq!(i64::parse_field(b"-42"), Ok(-42));
        assert_eq!(i16::parse_field(b"+7"), Ok(7));
    }

    #[test]
    fn test_int_padding() {
        assert_eq!(i32::parse_field(b"   12"), Ok(12));
        assert_eq!(i32::parse_field(b"12   "), Ok(12));
        assert_eq!(i32::parse_field(b"\t12\r\n"), Ok(12));
    }

    #[test]
    fn test_int_trailing_garbage() {
        assert_eq!(
            i32::parse_field(b"12x45"),
            Err(FieldError::Trailing { offset: 2 })
        );
        // Everything after the stop point is checked, not just the first byte
        assert_eq!(
            i32::parse_field(b"12 4"),
            Err(FieldError::Trailing { offset: 3 })
        );
    }

    #[test]
    fn test_int_blank_is_zero() {
        assert_eq!(i32::parse_field(b"     "), Ok(0));
        assert_eq!(i8::parse_field(b""), Ok(0));
    }

    #[test]
    fn test_int_sign_without_digits() {
        assert_eq!(
            i32::parse_field(b" -  "),
            Err(FieldError::Trailing { offset: 1 })
        );
        assert!(i32::parse_field(b"abc").is_err());
    }

    #[test]
    fn test_int_ranges() {
        assert_eq!(i8::parse_field(b"127"), Ok(127));
        assert_eq!(i8::parse_field(b"-128"), Ok(-128));
        assert_eq!(i8::parse_field(b"128"), Err(FieldError::Overflow));
        assert_eq!(i16::parse_field(b"-32769"), Err(FieldError::Overflow));
        assert_eq!(i32::parse_field(b"2147483648"), Err(FieldError::Overflow));
        assert_eq!(i64::parse_field(b"-9223372036854775808"), Ok(i64::MIN));
        assert_eq!(
            i64::parse_field(b"9223372036854775808"),
            Err(FieldError::Overflow)
        );
    }

    #[test]
    fn test_int_stops_at_decimal_point() {
        assert_eq!(
            i32::parse_field(b"1.5"),
            Err(FieldError::Trailing { offset: 1 })
        );
    }

    #[test]
    fn test_float_forms() {
        assert_eq!(f64::parse_field(b"3.25"), Ok(3.25));
        assert_eq!(f64::parse_field(b"  -0.5  "), Ok(-0.5));
        assert_eq!(f64::parse_field(b".5"), Ok(0.5));
        assert_eq!(f64::parse_field(b"5."), Ok(5.0));
        assert_eq!(f64::parse_field(b"1.5e3"), Ok(1500.0));
        assert_eq!(f64::parse_field(b"2E-2"), Ok(0.02));
        assert_eq!(f32::parse_field(b"7"), Ok(7.0));
    }

    #[test]
    fn test_float_incomplete_exponent_stops() {
        // "1e" converts "1" and leaves "e" as trailing garbage
        assert_eq!(
            f64::parse_field(b"1e "),
            Err(FieldError::Trailing { offset: 1 })
        );
    }

    #[test]
    fn test_float_special_values() {
        assert_eq!(f64::parse_field(b" inf "), Ok(f64::INFINITY));
        assert_eq!(f64::parse_field(b"-Infinity"), Ok(f64::NEG_INFINITY));
        assert!(f32::parse_field(b"NaN").unwrap().is_nan());
    }

    #[test]
    fn test_float_overflow() {
        assert_eq!(f32::parse_field(b"1e39"), Err(FieldError::Overflow));
        assert_eq!(f64::parse_field(b"1e309"), Err(FieldError::Overflow));
        assert_eq!(f64::parse_field(b"1e39"), Ok(1e39));
    }

    #[test]
    fn test_float_blank_is_zero() {
        assert_eq!(f64::parse_field(b"    "), Ok(0.0));
    }

    #[test]
    fn test_float_trailing_garbage() {
        assert_eq!(
            f64::parse_field(b"1.0x"),
            Err(FieldError::Trailing { offset: 3 })
        );
        assert!(f64::parse_field(b"..").is_err());
    }

    #[test]
    fn test_copy_string() {
        let cell = copy_string(b"ab d").unwrap();
        assert_eq!(cell, b"ab d");
        assert_eq!(copy_string(b"").unwrap(), b"");
    }
}
