//! Backslash-escape decoding for the wrapper's string literal.

use std::iter::Peekable;
use std::str::CharIndices;

use thiserror::Error;

/// A malformed escape sequence in the wrapper literal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EscapeError {
    /// `\x`, `\u` or `\U` not followed by enough hex digits.
    #[error("truncated \\{kind} escape at byte {offset}")]
    Truncated { kind: char, offset: usize },
    /// `\U` escape naming a value outside the Unicode range.
    #[error("escape at byte {offset} is not a valid code point (0x{value:X})")]
    InvalidCodePoint { value: u32, offset: usize },
    /// Literal ends in a lone backslash.
    #[error("literal ends with a dangling backslash")]
    TrailingBackslash,
}

type Chars<'a> = Peekable<CharIndices<'a>>;

/// Decode backslash escapes in `input`.
///
/// Recognised: `\\ \" \' \n \r \t \b \f \v \a`, octal `\NNN` (one to three
/// digits), `\xHH`, `\uHHHH`, `\UHHHHHHHH` and backslash-newline (dropped).
/// A `\u` high surrogate directly followed by a `\u` low surrogate decodes to
/// one character; unpaired surrogates become U+FFFD. Unknown escapes are kept
/// as written, backslash included.
pub fn unescape(input: &str) -> Result<String, EscapeError> {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.char_indices().peekable();

    while let Some((offset, c)) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some((_, escape)) = chars.next() else {
            return Err(EscapeError::TrailingBackslash);
        };
        match escape {
            '\n' => {}
            '\\' => out.push('\\'),
            '\'' => out.push('\''),
            '"' => out.push('"'),
            'a' => out.push('\u{07}'),
            'b' => out.push('\u{08}'),
            'f' => out.push('\u{0C}'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'v' => out.push('\u{0B}'),
            '0'..='7' => {
                let mut value = escape as u32 - '0' as u32;
                for _ in 0..2 {
                    match chars.peek().and_then(|&(_, d)| d.to_digit(8)) {
                        Some(digit) => {
                            value = value * 8 + digit;
                            chars.next();
                        }
                        None => break,
                    }
                }
                // At most 0o777, always a scalar value.
                out.extend(char::from_u32(value));
            }
            'x' => {
                let value = read_hex(&mut chars, 2, 'x', offset)?;
                out.extend(char::from_u32(value));
            }
            'u' => {
                let value = read_hex(&mut chars, 4, 'u', offset)?;
                out.push(decode_utf16_unit(value, &mut chars));
            }
            'U' => {
                let value = read_hex(&mut chars, 8, 'U', offset)?;
                let c = char::from_u32(value)
                    .ok_or(EscapeError::InvalidCodePoint { value, offset })?;
                out.push(c);
            }
            other => {
                out.push('\\');
                out.push(other);
            }
        }
    }

    Ok(out)
}

fn read_hex(
    chars: &mut Chars<'_>,
    digits: usize,
    kind: char,
    offset: usize,
) -> Result<u32, EscapeError> {
    let mut value = 0u32;
    for _ in 0..digits {
        let digit = chars
            .next()
            .and_then(|(_, c)| c.to_digit(16))
            .ok_or(EscapeError::Truncated { kind, offset })?;
        value = (value << 4) | digit;
    }
    Ok(value)
}

/// Turn one `\uHHHH` unit into a char, consuming a following low surrogate
/// escape when `unit` is a high surrogate.
fn decode_utf16_unit(unit: u32, chars: &mut Chars<'_>) -> char {
    if let Some(c) = char::from_u32(unit) {
        return c;
    }
    if (0xD800..0xDC00).contains(&unit) {
        let mut ahead = chars.clone();
        let is_escape = matches!(ahead.next(), Some((_, '\\')))
            && matches!(ahead.next(), Some((_, 'u')));
        if is_escape {
            if let Ok(low) = read_hex(&mut ahead, 4, 'u', 0) {
                if (0xDC00..0xE000).contains(&low) {
                    let combined = 0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00);
                    if let Some(c) = char::from_u32(combined) {
                        *chars = ahead;
                        return c;
                    }
                }
            }
        }
    }
    char::REPLACEMENT_CHARACTER
}
