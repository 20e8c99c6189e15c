// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Player name normalization and lookup keys.
//!
//! Roster rows carry full first names ("Travis Konecny") while the live
//! feed abbreviates them ("T. Konecny"). Both sides are reduced to
//! first initial + surname + country, e.g. `tkonecny_can`, so the join
//! works regardless of which form a source uses.

use unicode_normalization::UnicodeNormalization;

/// Letters that have no NFD decomposition into an ASCII base letter.
fn fold_special(c: char) -> Option<&'static str> {
    match c {
        'ø' | 'Ø' => Some("o"),
        'æ' | 'Æ' => Some("ae"),
        'œ' | 'Œ' => Some("oe"),
        'ß' => Some("ss"),
        'ł' | 'Ł' => Some("l"),
        'đ' | 'Đ' => Some("d"),
        'þ' | 'Þ' => Some("th"),
        'ı' => Some("i"),
        _ => None,
    }
}

/// Canonical ASCII form of a name: lowercase, no diacritics, no spaces or punctuation.
///
/// Never fails; characters that cannot be mapped are dropped.
pub fn normalize(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.nfd() {
        if let Some(folded) = fold_special(c) {
            out.push_str(folded);
        } else if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
        }
    }
    out
}

/// Country codes are only trimmed and lowercased.
pub fn normalize_country(code: &str) -> String {
    code.trim().to_lowercase()
}

/// Lookup key for a roster player.
pub fn player_key(first_name: &str, last_name: &str, country: &str) -> String {
    let initial = normalize(first_name).chars().next();
    let mut key = String::new();
    if let Some(initial) = initial {
        key.push(initial);
    }
    key.push_str(&normalize(last_name));
    key.push('_');
    key.push_str(&normalize_country(country));
    key
}

/// Lookup key for a feed display name such as "T. Konecny".
///
/// A single-token name is treated as a surname.
pub fn feed_key(display_name: &str, country: &str) -> String {
    match display_name.trim().split_once(char::is_whitespace) {
        Some((first, last)) => player_key(first, last, country),
        None => player_key("", display_name, country),
    }
}
