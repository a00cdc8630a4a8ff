//! Pattern Recognizer
//!
//! Locale-specific (Brazilian Portuguese) recognition, validation, and
//! canonical formatting of phone numbers, emails, and person names.
//! Pure functions over strings; the regex and vocabulary tables in
//! `vocab` are immutable configuration with no lifecycle. Regex-only by
//! design: deterministic and auditable, with false positives/negatives
//! accepted as the precision ceiling.

mod vocab;


pub(crate) use vocab::{is_email_header, is_name_header, is_phone_header};

use crate::dedupe;
use unicode_normalization::UnicodeNormalization;
use vocab::*;

/// NFC-normalize so decomposed accents match the Unicode word shapes.
fn normalize(text: &str) -> String {
    text.nfc().collect()
}

/* ------------ phones ------------ */

/// Scan arbitrary text for Brazilian phone numbers.
///
/// Runs every template in [`vocab::PHONE_PATTERNS`] over the same input,
/// canonicalizes each match through [`format_phone`] (which discards
/// invalid shapes), and deduplicates preserving first-occurrence order.
pub fn extract_phones(text: &str) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    let text = normalize(text);
    let mut found = Vec::new();
    for pattern in PHONE_PATTERNS.iter() {
        for m in pattern.find_iter(&text) {
            if let Some(formatted) = format_phone(m.as_str()) {
                found.push(formatted);
            }
        }
    }
    dedupe!(found)
}

/// Brazilian validity rule over the digits of `phone`.
///
/// 10 or 11 digits; area code 11-99; 11-digit numbers carry the mobile
/// marker `9` as third digit; 10-digit landlines must not start the local
/// number with 9, 0, or 1.
pub fn validate_phone(phone: &str) -> bool {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    valid_phone_digits(&digits)
}

fn valid_phone_digits(digits: &str) -> bool {
    let len = digits.len();
    if len != 10 && len != 11 {
        return false;
    }
    let area: u32 = digits[..2].parse().unwrap_or(0);
    if !(11..=99).contains(&area) {
        return false;
    }
    let third = digits.as_bytes()[2] as char;
    if len == 11 {
        third == '9'
    } else {
        !matches!(third, '9' | '0' | '1')
    }
}

/// Canonicalize a raw phone into `(AA) 9XXXX-XXXX` / `(AA) XXXX-XXXX`.
///
/// Strips non-digits and a leading `55` country prefix (when 12-13 digits
/// remain), then re-validates. `None` when no valid shape is left.
/// Idempotent on its own output.
pub fn format_phone(raw: &str) -> Option<String> {
    let mut digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if (digits.len() == 12 || digits.len() == 13) && digits.starts_with("55") {
        digits = digits[2..].to_string();
    }
    if !valid_phone_digits(&digits) {
        return None;
    }
    let (area, local) = digits.split_at(2);
    let split = local.len() - 4;
    Some(format!("({}) {}-{}", area, &local[..split], &local[split..]))
}

/* ------------ emails ------------ */

/// Scan arbitrary text for emails, lowercased and re-validated,
/// deduplicated in first-occurrence order.
pub fn extract_emails(text: &str) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    let text = normalize(text);
    let found: Vec<String> = EMAIL_REGEX
        .find_iter(&text)
        .map(|m| m.as_str().to_lowercase())
        .filter(|e| validate_email(e))
        .collect();
    dedupe!(found)
}

/// Full `localpart@domain.tld` grammar check.
pub fn validate_email(email: &str) -> bool {
    let mut parts = email.split('@');
    let (local, domain) = match (parts.next(), parts.next(), parts.next()) {
        (Some(l), Some(d), None) => (l, d),
        _ => return false, // zero or multiple '@'
    };

    if local.is_empty() || local.len() > 64 {
        return false;
    }
    if local.starts_with('.') || local.ends_with('.') || local.contains("..") {
        return false;
    }
    if !local
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || "._%+-".contains(c))
    {
        return false;
    }

    if domain.is_empty() || domain.len() > 253 {
        return false;
    }
    if domain.starts_with('.')
        || domain.ends_with('.')
        || domain.starts_with('-')
        || domain.ends_with('-')
    {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return false;
    }
    for label in &labels {
        // an empty label means consecutive dots
        if label.is_empty() || label.len() > 63 {
            return false;
        }
        if label.starts_with('-') || label.ends_with('-') {
            return false;
        }
        if !label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return false;
        }
    }
    labels.last().is_some_and(|tld| tld.len() >= 2)
}

/* ------------ names ------------ */

/// Scan arbitrary text for Portuguese person names.
///
/// Greedily accumulates consecutive qualifying words (particles allowed
/// mid-run) into candidate phrases; a phrase survives only with >= 2
/// words, a passing [`validate_name`], and canonicalization through
/// [`format_name`]. Deduplicated in first-occurrence order.
pub fn extract_names(text: &str) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    let text = normalize(text);
    let mut found = Vec::new();
    let mut run: Vec<String> = Vec::new();
    for token in text.split_whitespace() {
        let word = token.trim_matches(|c: char| !c.is_alphabetic());
        if !word.is_empty() && is_name_word(word) {
            run.push(word.to_string());
            // trailing punctuation on the token ends the phrase
            if token.ends_with(|c: char| !c.is_alphabetic()) {
                flush_run(&mut run, &mut found);
            }
        } else {
            flush_run(&mut run, &mut found);
        }
    }
    flush_run(&mut run, &mut found);
    dedupe!(found)
}

fn is_name_word(word: &str) -> bool {
    if NAME_PARTICLES.contains(&word) {
        return true; // particles qualify even lowercase
    }
    let lower = word.to_lowercase();
    if NAME_STOP_WORDS.contains(&lower.as_str()) {
        return false;
    }
    NAME_WORD_REGEX.is_match(word)
}

fn flush_run(run: &mut Vec<String>, found: &mut Vec<String>) {
    // a phrase cannot end in a linking word
    while run.last().is_some_and(|w| NAME_PARTICLES.contains(&w.to_lowercase().as_str())) {
        run.pop();
    }
    if run.len() >= 2 {
        let phrase = run.join(" ");
        if validate_name(&phrase) {
            if let Some(formatted) = format_name(&phrase) {
                found.push(formatted);
            }
        }
    }
    run.clear();
}

/// Is this phrase plausibly a person name?
///
/// >= 2 words, at least one non-particle; non-particle words are >= 3
/// chars in capitalized shape; rejects phrases containing day-of-week,
/// month, or contact vocabulary in Portuguese or English.
pub fn validate_name(name: &str) -> bool {
    let words: Vec<&str> = name.split_whitespace().collect();
    if words.len() < 2 {
        return false;
    }
    let mut non_particles = 0;
    for word in &words {
        let lower = word.to_lowercase();
        if NON_NAME_VOCAB.contains(&lower.as_str()) {
            return false;
        }
        if NAME_PARTICLES.contains(&lower.as_str()) {
            continue;
        }
        non_particles += 1;
        if word.chars().count() < 3 {
            return false;
        }
        if !NAME_WORD_REGEX.is_match(word) {
            return false;
        }
    }
    non_particles > 0
}

/// Canonicalize a name: collapse whitespace, capitalize each word, keep
/// particles lowercase unless the name starts with one. `None` on blank
/// input.
pub fn format_name(name: &str) -> Option<String> {
    let words: Vec<&str> = name.split_whitespace().collect();
    if words.is_empty() {
        return None;
    }
    let mut out = Vec::with_capacity(words.len());
    for (i, word) in words.iter().enumerate() {
        let lower = word.to_lowercase();
        if i > 0 && NAME_PARTICLES.contains(&lower.as_str()) {
            out.push(lower);
        } else {
            out.push(capitalize(&lower));
        }
    }
    Some(out.join(" "))
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
