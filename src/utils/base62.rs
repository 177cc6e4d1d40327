//! Base62 short code encoding.
//!
//! Short codes are the base62 representation of the registry-assigned record id,
//! so uniqueness follows from id uniqueness and no collision retries are needed.
//!
//! The alphabet order (`0-9`, `a-z`, `A-Z`) decides which code every id maps to.
//! Changing it breaks every short link already handed out.

/// Symbols in digit order: index `n` is the digit with value `n`.
pub const ALPHABET: &[u8; 62] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

const BASE: u64 = ALPHABET.len() as u64;

/// Errors produced while encoding ids or decoding short codes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodeError {
    #[error("id must be non-negative, got {0}")]
    InvalidArgument(i64),

    #[error("short code is empty")]
    Empty,

    #[error("invalid symbol '{0}' in short code")]
    InvalidSymbol(char),

    #[error("short code does not fit into a 64-bit id")]
    Overflow,
}

/// Encodes a record id as a base62 short code.
///
/// `0` maps to `"0"`, never to the empty string. There is no upper bound:
/// the code grows by one symbol every time the id crosses a power of 62.
///
/// # Errors
///
/// Returns [`CodeError::InvalidArgument`] for negative ids.
///
/// # Examples
///
/// ```
/// use shorty::utils::base62::encode;
///
/// assert_eq!(encode(0).unwrap(), "0");
/// assert_eq!(encode(61).unwrap(), "Z");
/// assert_eq!(encode(62).unwrap(), "10");
/// ```
pub fn encode(id: i64) -> Result<String, CodeError> {
    let mut num = u64::try_from(id).map_err(|_| CodeError::InvalidArgument(id))?;

    if num == 0 {
        return Ok((ALPHABET[0] as char).to_string());
    }

    let mut digits = Vec::with_capacity(11);
    while num > 0 {
        digits.push(ALPHABET[(num % BASE) as usize]);
        num /= BASE;
    }
    digits.reverse();

    // Every byte comes from the ASCII alphabet.
    Ok(digits.into_iter().map(char::from).collect())
}

/// Decodes a base62 short code back into the record id it was built from.
///
/// # Errors
///
/// - [`CodeError::Empty`] for an empty code
/// - [`CodeError::InvalidSymbol`] for characters outside [`ALPHABET`]
/// - [`CodeError::Overflow`] when the value exceeds `i64::MAX`
pub fn decode(code: &str) -> Result<i64, CodeError> {
    if code.is_empty() {
        return Err(CodeError::Empty);
    }

    let mut value: i64 = 0;
    for c in code.chars() {
        let digit = symbol_value(c).ok_or(CodeError::InvalidSymbol(c))?;
        value = value
            .checked_mul(BASE as i64)
            .and_then(|v| v.checked_add(digit))
            .ok_or(CodeError::Overflow)?;
    }

    Ok(value)
}

/// Returns true if every character of `code` belongs to the alphabet.
pub fn is_valid_code(code: &str) -> bool {
    !code.is_empty() && code.chars().all(|c| symbol_value(c).is_some())
}

fn symbol_value(c: char) -> Option<i64> {
    match c {
        '0'..='9' => Some(c as i64 - '0' as i64),
        'a'..='z' => Some(c as i64 - 'a' as i64 + 10),
        'A'..='Z' => Some(c as i64 - 'A' as i64 + 36),
        _ => None,
    }
}
