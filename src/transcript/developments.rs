//! Developments field parser.
//!
//! The game log records each player's developments as a list of
//! `key=[items]` pairs, for example `roads=[0x45, 0x56]; settlements=[0x23]`.
//! Annotators only need the number of distinct items per key, so the field
//! is reduced to `roads=2; settlements=1`.
//!
//! Items may themselves be bracketed (`[(1, 2), (3, 4)]`); separators inside
//! nested brackets or parentheses never split.

use std::collections::HashSet;

/// Errors raised by [`parse_developments`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DevelopmentsError {
    #[error("missing '=' in {0:?}")]
    MissingEquals(String),

    #[error("empty key in {0:?}")]
    EmptyKey(String),

    #[error("value of {0:?} is not a bracketed list")]
    NotAList(String),

    #[error("unbalanced brackets")]
    Unbalanced,
}

/// Reduce a developments field to `key=count` pairs joined by `"; "`.
///
/// An empty (or blank) field yields an empty string.
pub fn parse_developments(field: &str) -> Result<String, DevelopmentsError> {
    let mut rendered = Vec::new();

    for pair in split_top_level(field, &[';'])? {
        let pair = pair.trim();
        if pair.is_empty() {
            continue;
        }

        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| DevelopmentsError::MissingEquals(pair.to_string()))?;
        let key = key.trim();
        if key.is_empty() {
            return Err(DevelopmentsError::EmptyKey(pair.to_string()));
        }

        let count = count_distinct_items(key, value.trim())?;
        rendered.push(format!("{key}={count}"));
    }

    Ok(rendered.join("; "))
}

/// Count the distinct items of a `[a, b, ...]` literal.
fn count_distinct_items(key: &str, value: &str) -> Result<usize, DevelopmentsError> {
    let inner = value
        .strip_prefix('[')
        .and_then(|v| v.strip_suffix(']'))
        .ok_or_else(|| DevelopmentsError::NotAList(key.to_string()))?;

    let mut items = HashSet::new();
    for item in split_top_level(inner, &[',', ';'])? {
        let item = item.trim();
        if !item.is_empty() {
            items.insert(canonical_item(item)?);
        }
    }

    Ok(items.len())
}

/// Canonical form of an item, so that `0x45` and `69`, or `(1,2)` and
/// `(1, 2)`, count as the same item.
fn canonical_item(item: &str) -> Result<String, DevelopmentsError> {
    let item = item.trim();

    for (open, close) in [('(', ')'), ('[', ']')] {
        if let Some(inner) = item.strip_prefix(open).and_then(|i| i.strip_suffix(close)) {
            let parts = split_top_level(inner, &[','])?
                .into_iter()
                .map(canonical_item)
                .collect::<Result<Vec<_>, _>>()?;
            return Ok(format!("{open}{}{close}", parts.join(", ")));
        }
    }

    Ok(parse_int(item).map_or_else(|| item.to_string(), |n| n.to_string()))
}

/// Integer literal in decimal, `0x`, `0o` or `0b` notation, with an
/// optional sign and `_` digit separators.
fn parse_int(literal: &str) -> Option<i128> {
    let (negative, digits) = match literal.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, literal.strip_prefix('+').unwrap_or(literal)),
    };
    let digits = digits.replace('_', "");
    let lower = digits.to_ascii_lowercase();

    let (radix, body) = if let Some(body) = lower.strip_prefix("0x") {
        (16, body)
    } else if let Some(body) = lower.strip_prefix("0o") {
        (8, body)
    } else if let Some(body) = lower.strip_prefix("0b") {
        (2, body)
    } else {
        (10, lower.as_str())
    };
    if body.is_empty() || !body.chars().all(|c| c.is_digit(radix)) {
        return None;
    }

    let value = i128::from_str_radix(body, radix).ok()?;
    Some(if negative { -value } else { value })
}

/// Split on any of `separators`, ignoring those nested in brackets.
fn split_top_level<'a>(
    input: &'a str,
    separators: &[char],
) -> Result<Vec<&'a str>, DevelopmentsError> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (i, c) in input.char_indices() {
        match c {
            '[' | '(' | '{' => depth += 1,
            ']' | ')' | '}' => {
                depth = depth.checked_sub(1).ok_or(DevelopmentsError::Unbalanced)?;
            }
            c if depth == 0 && separators.contains(&c) => {
                parts.push(&input[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }

    if depth != 0 {
        return Err(DevelopmentsError::Unbalanced);
    }
    parts.push(&input[start..]);
    Ok(parts)
}
