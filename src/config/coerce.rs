//! Best-effort coercion of raw string tokens into typed values.
//!
//! Coercion is attempted, never silently defaulted: a failed attempt
//! returns a [`CoerceError`] and the caller falls back to the string/list
//! representation. Nothing in here aborts a run.

use thiserror::Error;

use crate::constants::{FALSE_TOKENS, TRUE_TOKENS};

/// A coercion attempt that did not apply. Always recoverable.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoerceError {
    #[error("not a boolean token: {0:?}")]
    NotABoolean(String),
    #[error("not a number: {0:?}")]
    NotANumber(String),
}

/// Interpret a token as a boolean.
///
/// Matches the truthy/falsy token sets case-insensitively; anything else
/// is [`CoerceError::NotABoolean`].
pub fn parse_bool(token: &str) -> Result<bool, CoerceError> {
    let lowered = token.trim().to_lowercase();
    if TRUE_TOKENS.contains(&lowered.as_str()) {
        return Ok(true);
    }
    if FALSE_TOKENS.contains(&lowered.as_str()) {
        return Ok(false);
    }
    Err(CoerceError::NotABoolean(token.to_string()))
}

/// Interpret a token as a signed decimal integer.
///
/// Accepts an optional leading sign followed by digits only; everything
/// else (including overflow) is [`CoerceError::NotANumber`].
pub fn parse_int(token: &str) -> Result<i64, CoerceError> {
    let trimmed = token.trim();
    let digits = trimmed.strip_prefix(['+', '-']).unwrap_or(trimmed);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(CoerceError::NotANumber(token.to_string()));
    }
    trimmed
        .parse::<i64>()
        .map_err(|_| CoerceError::NotANumber(token.to_string()))
}

/// Split a raw value on unescaped commas into individually trimmed
/// tokens. `\,` is a literal comma inside a token, not a separator.
///
/// An overall-empty value yields `None` ("no value"), never an empty list.
pub fn split_list(raw: &str) -> Option<Vec<String>> {
    if raw.trim().is_empty() {
        return None;
    }
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some(',') => current.push(','),
                Some(other) => {
                    current.push('\\');
                    current.push(other);
                }
                None => current.push('\\'),
            },
            ',' => tokens.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    tokens.push(current);
    Some(tokens.iter().map(|tok| tok.trim().to_string()).collect())
}
