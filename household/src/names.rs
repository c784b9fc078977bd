//! Name handling
//!
//! Match keys for relative lookup, surname extraction for the demographic
//! aggregator, and the natural/locale-style orderings used for presentation.

use std::cmp::Ordering;
use std::collections::HashSet;

use once_cell::sync::Lazy;

/// Tokens that OCR lifts from roll headers and labels rather than names.
static SURNAME_STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "PHOTO", "AVAILABLE", "VOTER", "NAME", "HUSBAND", "FATHER", "MOTHER", "HOUSE", "NUMBER",
        "FEMALE", "MALE", "OTHER",
    ]
    .into_iter()
    .collect()
});

/// Lower-cases and drops everything that is not an ASCII letter.
///
/// "K. Raman Nair" and "kraman nair" both become "kramannair"; two names
/// match only when their keys are equal.
pub fn normalize_name(name: &str) -> String {
    name.chars()
        .filter(char::is_ascii_alphabetic)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Upper-cased last token of a multi-word name, if it looks like a surname.
pub fn surname_of(name: &str, min_len: usize) -> Option<String> {
    let cleaned: String = name
        .chars()
        .map(|c| if c.is_ascii_alphabetic() { c } else { ' ' })
        .collect();
    let mut tokens = cleaned.split_whitespace();
    tokens.next()?;
    let surname = tokens.last()?.to_ascii_uppercase();

    if surname.len() < min_len || SURNAME_STOP_WORDS.contains(surname.as_str()) {
        return None;
    }
    Some(surname)
}

/// Natural ordering for house numbers: digit runs compare by value,
/// everything else case-insensitively. Total: ties fall back to byte order.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    natural_key_cmp(a, b).then_with(|| a.cmp(b))
}

/// Locale-style name ordering: letters and digits first (ignoring case,
/// spacing and punctuation), then case-insensitive text, then lowercase
/// before uppercase, then raw bytes.
pub fn collate_names(a: &str, b: &str) -> Ordering {
    primary_key(a)
        .cmp(primary_key(b))
        .then_with(|| cmp_caseless(a, b))
        .then_with(|| case_key(a).cmp(case_key(b)))
        .then_with(|| a.cmp(b))
}

fn case_key(s: &str) -> impl Iterator<Item = bool> + '_ {
    s.chars().map(char::is_uppercase)
}

fn primary_key(s: &str) -> impl Iterator<Item = char> + '_ {
    s.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
}

fn cmp_caseless(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

fn natural_key_cmp(a: &str, b: &str) -> Ordering {
    let mut left = Runs { rest: a };
    let mut right = Runs { rest: b };

    loop {
        let ord = match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(Run::Digits(x)), Some(Run::Digits(y))) => cmp_digits(x, y),
            (Some(Run::Text(x)), Some(Run::Text(y))) => cmp_caseless(x, y),
            // Digits sort ahead of letters and punctuation
            (Some(Run::Digits(_)), Some(Run::Text(_))) => Ordering::Less,
            (Some(Run::Text(_)), Some(Run::Digits(_))) => Ordering::Greater,
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
}

/// Compares digit strings by value without parsing, so any length works.
fn cmp_digits(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

enum Run<'a> {
    Digits(&'a str),
    Text(&'a str),
}

/// Splits a string into alternating digit / non-digit runs.
struct Runs<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Runs<'a> {
    type Item = Run<'a>;

    fn next(&mut self) -> Option<Run<'a>> {
        let first = self.rest.chars().next()?;
        let digits = first.is_ascii_digit();
        let end = self
            .rest
            .find(|c: char| c.is_ascii_digit() != digits)
            .unwrap_or(self.rest.len());
        let (run, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(if digits { Run::Digits(run) } else { Run::Text(run) })
    }
}
