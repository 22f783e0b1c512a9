// File: listguard-core/src/text.rs
//! Character-level helpers used by the sanitizer after the pattern passes:
//! emoji-run collapsing, shouting detection, sentence casing, and the
//! bytes-to-text boundary check.
//!
//! License: MIT OR APACHE 2.0

use std::borrow::Cow;
use std::io::Read;
use std::ops::RangeInclusive;
use std::str::Utf8Error;

use crate::errors::GuardError;

/// Code points treated as emoji when collapsing runs.
pub const EMOJI_RANGE: RangeInclusive<char> = '\u{1F300}'..='\u{1F9FF}';

pub fn is_emoji(c: char) -> bool {
    EMOJI_RANGE.contains(&c)
}

/// Cuts every run of consecutive emoji longer than `max_run` down to its first
/// `max_run` code points. Anything that is not in [`EMOJI_RANGE`] (including
/// variation selectors and joiners) ends a run.
pub fn collapse_emoji_runs(text: &str, max_run: usize) -> Cow<'_, str> {
    let mut run = 0usize;
    let needs_work = text.chars().any(|c| {
        if is_emoji(c) {
            run += 1;
            run > max_run
        } else {
            run = 0;
            false
        }
    });
    if !needs_work {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    run = 0;
    for c in text.chars() {
        if is_emoji(c) {
            run += 1;
            if run > max_run {
                continue;
            }
        } else {
            run = 0;
        }
        out.push(c);
    }
    Cow::Owned(out)
}

/// True when uppercasing the text would not change it. Text without any cased
/// letters counts as uppercase.
pub fn is_all_uppercase(text: &str) -> bool {
    text.to_uppercase() == text
}

/// Whether the sanitizer's final sentence-case step applies.
pub fn is_shouting(text: &str, length_threshold: usize) -> bool {
    text.chars().count() > length_threshold && is_all_uppercase(text)
}

/// Keeps the first character as-is and lowercases the rest.
pub fn to_sentence_case(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => {
            let mut out = String::with_capacity(text.len());
            out.push(first);
            out.push_str(&chars.as_str().to_lowercase());
            out
        }
        None => String::new(),
    }
}

/// Input boundary check: only UTF-8 text is accepted by the engine.
pub fn require_text(bytes: &[u8]) -> Result<&str, GuardError> {
    std::str::from_utf8(bytes).map_err(not_text)
}

/// Reads `reader` to the end and applies the same UTF-8 check as
/// [`require_text`]. Read failures surface as [`GuardError::IoError`].
pub fn read_text<R: Read>(mut reader: R) -> Result<String, GuardError> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    String::from_utf8(bytes).map_err(|e| not_text(e.utf8_error()))
}

fn not_text(e: Utf8Error) -> GuardError {
    GuardError::InvalidInput(format!(
        "input is not valid UTF-8 text (invalid byte at offset {})",
        e.valid_up_to()
    ))
}
