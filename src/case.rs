// SPDX-FileCopyrightText: 2026 Headcase contributors
// SPDX-License-Identifier: GPL-3.0-or-later
//! Sentence case conversion with proper noun preservation.

use std::ops::Range;

use crate::nouns::ProperNouns;

/// Articles, conjunctions, and short prepositions forced to lowercase unless
/// they are the first word.
const STOPWORDS: &[&str] = &[
    "a", "an", "and", "as", "at", "but", "by", "for", "if", "in", "nor", "of", "on", "or", "so",
    "the", "to", "up", "yet", "with", "from", "into", "onto", "upon", "over", "under", "above",
    "below", "across", "through", "during", "before", "after", "since", "until", "within",
];

/// Common three-letter English words excluded from the abbreviation heuristic,
/// so an accidentally all-caps "THE" or "FOX" is lowercased rather than kept.
const COMMON_SHORT_WORDS: &[&str] = &[
    "the", "and", "for", "are", "but", "not", "you", "all", "can", "had", "her", "was", "one",
    "our", "out", "day", "get", "use", "man", "new", "now", "old", "see", "him", "two", "how",
    "its", "who", "oil", "sit", "set", "run", "eat", "far", "sea", "eye", "car", "cut", "dog",
    "end", "few", "fox", "got", "hat", "hot", "job", "let", "lot", "men", "mix", "put", "red",
    "say", "sun", "ten", "top", "try", "war", "way", "win", "yes",
];

/// Converts a span of heading text to sentence case.
///
/// Multi-word and dotted proper nouns are substituted first (longest match
/// wins, overlapping matches rejected), and the substituted ranges are
/// protected from the word pass. The remaining words are then classified one
/// at a time: single-word proper nouns take their canonical casing, the first
/// word is capitalized, stopwords are lowercased, short all-uppercase tokens
/// are kept as abbreviations, and everything else is lowercased.
///
/// Runs of whitespace between words collapse to single spaces.
pub fn to_sentence_case(text: &str, nouns: &ProperNouns) -> String {
    // Step 1: substitute multi-word proper nouns and record where they landed.
    let (text, protected) = replace_multi_word_nouns(text, nouns);

    // Step 2: classify the remaining words.
    let mut result = String::with_capacity(text.len());
    for (i, (offset, word)) in split_words(&text).into_iter().enumerate() {
        if i > 0 {
            result.push(' ');
        }

        let range = offset..offset + word.len();
        if protected.iter().any(|p| p.start < range.end && range.start < p.end) {
            // Part of a substituted proper noun; never re-cased.
            result.push_str(word);
            continue;
        }

        let (leading, core, trailing) = split_punctuation(word);
        if let Some(canonical) = nouns.single_word(core) {
            result.push_str(leading);
            result.push_str(canonical);
            result.push_str(trailing);
        } else if i == 0 {
            result.push_str(&capitalize_first(word));
        } else if STOPWORDS.contains(&core.to_lowercase().as_str()) {
            result.push_str(&word.to_lowercase());
        } else if is_short_abbreviation(core) {
            result.push_str(word);
        } else {
            result.push_str(&word.to_lowercase());
        }
    }
    result
}

/// Substitutes every multi-word proper noun match, longest entry first, and
/// returns the rebuilt text together with the byte ranges the canonical
/// replacements occupy in it.
///
/// A candidate match is rejected when it overlaps a match that was already
/// accepted, so two phrases never claim the same characters.
fn replace_multi_word_nouns(text: &str, nouns: &ProperNouns) -> (String, Vec<Range<usize>>) {
    // (start, end, canonical) in input coordinates.
    let mut matches: Vec<(usize, usize, &str)> = Vec::new();

    for noun in nouns.multi_word() {
        let mut from = 0;
        while let Some(start) = find_ignore_ascii_case(text, noun, from) {
            let end = start + noun.len();
            if matches.iter().any(|&(s, e, _)| s < end && start < e) {
                from = start + 1;
                continue;
            }
            matches.push((start, end, noun.as_str()));
            from = end;
        }
    }

    if matches.is_empty() {
        return (text.to_string(), Vec::new());
    }

    matches.sort_by_key(|&(start, _, _)| start);

    let mut result = String::with_capacity(text.len());
    let mut protected = Vec::with_capacity(matches.len());
    let mut cursor = 0;
    for (start, end, canonical) in matches {
        result.push_str(&text[cursor..start]);
        protected.push(result.len()..result.len() + canonical.len());
        result.push_str(canonical);
        cursor = end;
    }
    result.push_str(&text[cursor..]);

    (result, protected)
}

/// Finds the first ASCII-case-insensitive occurrence of `needle` in
/// `haystack` at or after byte position `from`.
///
/// Matching is byte-wise, which is safe for UTF-8: only ASCII letters fold,
/// and a needle can never start matching in the middle of a multi-byte
/// character because continuation bytes never equal a leading byte.
fn find_ignore_ascii_case(haystack: &str, needle: &str, from: usize) -> Option<usize> {
    let haystack = haystack.as_bytes();
    let needle = needle.as_bytes();
    if needle.is_empty() || from + needle.len() > haystack.len() {
        return None;
    }
    (from..=haystack.len() - needle.len())
        .find(|&i| haystack[i..i + needle.len()].eq_ignore_ascii_case(needle))
}

/// Splits text on whitespace, returning each word with its byte offset.
fn split_words(text: &str) -> Vec<(usize, &str)> {
    let mut words = Vec::new();
    let mut start = None;
    for (i, c) in text.char_indices() {
        if c.is_whitespace() {
            if let Some(s) = start.take() {
                words.push((s, &text[s..i]));
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        words.push((s, &text[s..]));
    }
    words
}

/// Splits a token into leading punctuation, core, and trailing punctuation.
///
/// Only leading and trailing non-alphanumeric characters count as punctuation;
/// interior characters such as the dot in `Vue.js` stay part of the core.
fn split_punctuation(word: &str) -> (&str, &str, &str) {
    let core_start = word.len() - word.trim_start_matches(|c: char| !c.is_alphanumeric()).len();
    let core_end = word
        .trim_end_matches(|c: char| !c.is_alphanumeric())
        .len()
        .max(core_start);
    (&word[..core_start], &word[core_start..core_end], &word[core_end..])
}

/// Whether a clean core looks like an abbreviation worth preserving: at most
/// three characters, at least one letter, every letter uppercase, and not a
/// common English word that merely happened to be typed in caps.
fn is_short_abbreviation(core: &str) -> bool {
    if core.chars().count() > 3 {
        return false;
    }
    let mut letters = core.chars().filter(|c| c.is_alphabetic()).peekable();
    if letters.peek().is_none() {
        return false;
    }
    if !letters.all(|c| c.is_uppercase()) {
        return false;
    }
    !COMMON_SHORT_WORDS.contains(&core.to_lowercase().as_str())
}

/// Capitalize the first letter of a word, lowercasing the rest.
fn capitalize_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => {
            let mut result = first.to_uppercase().to_string();
            result.push_str(&chars.as_str().to_lowercase());
            result
        }
    }
}
