//! Query-string normalization for the question endpoints.
//!
//! Numbers are read with leading-integer semantics: surrounding whitespace
//! and an optional sign are accepted, parsing stops at the first non-digit,
//! and a string with no leading digits is treated as absent.
//!
//! A key given more than once (`?amount=5&amount=6`) is treated as absent,
//! so the endpoint falls back to that parameter's default.

use quizgen_storage::Difficulty;

/// Default and bounds for `/questions/random?amount=`.
pub(crate) const RANDOM_DEFAULT_AMOUNT: i64 = 10;
pub(crate) const RANDOM_MAX_AMOUNT: i64 = 30;

/// Default and bounds for `/questions/ai?amount=`.
pub(crate) const AI_DEFAULT_AMOUNT: usize = 1;
pub(crate) const AI_MAX_AMOUNT: usize = quizgen_core::MAX_BATCH_AMOUNT;

/// Topic used when `/questions/ai` is called without one.
pub(crate) const DEFAULT_TOPIC: &str = "Frontend and Backend programming";

/// Value of `key` when it occurs exactly once in `pairs`.
pub(crate) fn single<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    let mut values = pairs.iter().filter(|(k, _)| k == key).map(|(_, v)| v.as_str());
    match (values.next(), values.next()) {
        (Some(value), None) => Some(value),
        _ => None,
    }
}

/// Parse the leading integer of `raw`, e.g. `" 12abc"` -> 12, `"abc"` -> None.
/// Values beyond `i64` saturate.
pub(crate) fn parse_leading_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let value = digits[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -value } else { value })
}

/// Missing, non-numeric or < 1 -> 10; > 30 -> 30.
pub(crate) fn random_amount(raw: Option<&str>) -> i64 {
    match raw.and_then(parse_leading_int) {
        Some(n) if n < 1 => RANDOM_DEFAULT_AMOUNT,
        Some(n) => n.min(RANDOM_MAX_AMOUNT),
        None => RANDOM_DEFAULT_AMOUNT,
    }
}

/// Missing, non-numeric or < 1 -> 1; > 10 -> 10.
pub(crate) fn ai_amount(raw: Option<&str>) -> usize {
    match raw.and_then(parse_leading_int) {
        Some(n) if n >= 1 => usize::try_from(n).unwrap_or(AI_MAX_AMOUNT).min(AI_MAX_AMOUNT),
        _ => AI_DEFAULT_AMOUNT,
    }
}

/// Trim and lowercase; blank means no filter. Unknown values are an error
/// carrying the user-facing message.
pub(crate) fn difficulty(raw: Option<&str>) -> Result<Option<Difficulty>, String> {
    let normalized = match raw.map(|s| s.trim().to_lowercase()) {
        Some(s) if !s.is_empty() => s,
        _ => return Ok(None),
    };
    normalized.parse::<Difficulty>().map(Some).map_err(|_| {
        let allowed: Vec<&str> = Difficulty::ALL.iter().map(|d| d.as_str()).collect();
        format!("Invalid difficulty. Allowed values: {}.", allowed.join(", "))
    })
}

/// Empty or missing topic falls back to the default.
pub(crate) fn topic(raw: Option<&str>) -> &str {
    match raw {
        Some(t) if !t.is_empty() => t,
        _ => DEFAULT_TOPIC,
    }
}
