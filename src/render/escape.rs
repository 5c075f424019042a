//! Escaping of single code points into regexp source text.

use crate::interval_set::check_code_point;
use crate::surrogates::{surrogate_pair, ASTRAL_MIN};
use crate::CharClassError;

/// Printable ASCII with meaning in regexp syntax: `$()*+./?[]^{|}`.
/// Hyphen and backslash are handled separately.
fn is_syntax_char(cp: u32) -> bool {
    matches!(
        cp,
        0x24 | 0x28..=0x2B | 0x2E | 0x2F | 0x3F | 0x5B..=0x5E | 0x7B..=0x7D
    )
}

/// Append `value` as uppercase hex, zero-padded to at least `width` digits.
fn push_hex(out: &mut String, value: u32, width: usize) {
    let digits = (32 - value.leading_zeros()).div_ceil(4).max(1) as usize;
    for _ in digits..width {
        out.push('0');
    }
    for shift in (0..digits).rev() {
        let nibble = (value >> (shift * 4)) & 0xF;
        out.push(char::from(b"0123456789ABCDEF"[nibble as usize]));
    }
}

/// Append `\uXXXX`.
fn push_unit(out: &mut String, unit: u32) {
    out.push_str("\\u");
    push_hex(out, unit, 4);
}

/// Append the escaped form of `cp` to `out`.
///
/// Outside unicode mode an astral code point is written as its two escaped
/// surrogate units.
pub(crate) fn push_escaped(out: &mut String, cp: u32, unicode_mode: bool) {
    match cp {
        0x09 => out.push_str("\\t"),
        0x0A => out.push_str("\\n"),
        0x0C => out.push_str("\\f"),
        0x0D => out.push_str("\\r"),
        // `\-` is a syntax error outside a class in unicode mode; `\x2D` is not.
        0x2D => out.push_str("\\x2D"),
        0x5C => out.push_str("\\\\"),
        _ if is_syntax_char(cp) => {
            out.push('\\');
            out.push(char::from(cp as u8));
        }
        0x20..=0x7E => out.push(char::from(cp as u8)),
        _ if cp <= 0xFF => {
            out.push_str("\\x");
            push_hex(out, cp, 2);
        }
        _ if cp < ASTRAL_MIN => push_unit(out, cp),
        _ => match surrogate_pair(cp) {
            Ok((high, low)) if !unicode_mode => {
                push_unit(out, u32::from(high));
                push_unit(out, u32::from(low));
            }
            _ => {
                out.push_str("\\u{");
                push_hex(out, cp, 1);
                out.push('}');
            }
        },
    }
}

/// The shortest safe token matching exactly `cp`.
///
/// ```
/// use unicode_charclass::escape_code_point;
///
/// assert_eq!(escape_code_point(0x61, false).unwrap(), "a");
/// assert_eq!(escape_code_point(0x2E, false).unwrap(), "\\.");
/// assert_eq!(escape_code_point(0xE9, false).unwrap(), "\\xE9");
/// assert_eq!(escape_code_point(0x1F600, true).unwrap(), "\\u{1F600}");
/// ```
pub fn escape_code_point(cp: u32, unicode_mode: bool) -> Result<String, CharClassError> {
    check_code_point(cp)?;
    let mut out = String::new();
    push_escaped(&mut out, cp, unicode_mode);
    Ok(out)
}
