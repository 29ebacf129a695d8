//! Text normalization and tokenization.
//!
//! All term text stored in the index goes through
//! [`remove_diacritics_and_punctuation`] with `is_word = true`: NFD
//! decomposition, combining-mark removal, split-character removal, and
//! lower-casing. Character indices produced by [`tokenize`] are offsets into
//! the *original* text, counted in Unicode scalar values (not bytes).

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::location::WordLocation;
use crate::occurrence::WordInfo;

/// Punctuation and symbols that terminate a word. Whitespace splits too,
/// see [`is_split_char`].
const SPLIT_CHARS: &[char] = &[
    ',', '.', ';', ':', '-', '"', '\'', '!', '?', '^', '=', '(', ')', '<', '>', '\\', '|', '/',
    '[', ']', '{', '}', '«', '»', '*', '°', '§', '%', '&', '#', '@', '~', '©', '®', '±',
];

/// Whether `c` separates words. Letters and digits never split, including
/// accented letters and currency symbols.
pub fn is_split_char(c: char) -> bool {
    c.is_whitespace() || SPLIT_CHARS.contains(&c)
}

/// Normalize a string for matching: NFD-decompose, drop combining marks,
/// drop split characters, and lower-case.
///
/// With `is_word = true` every split character is removed, producing
/// canonical term text. With `is_word = false` whitespace is preserved so
/// that multi-word phrases keep their word boundaries:
///
/// - `("Wòrd", true)` → `"word"`
/// - `("Wow, thìs sèems cool!", false)` → `"wow this seems cool"`
pub fn remove_diacritics_and_punctuation(text: &str, is_word: bool) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .filter(|c| !is_split_char(*c) || (!is_word && c.is_whitespace()))
        .collect::<String>()
        .to_lowercase()
}

/// Split `text` into positioned words, tagging each with `location`.
///
/// Words are maximal runs of non-split characters. `first_char_index` is the
/// char offset of the run in the original text; `word_index` is a zero-based
/// ordinal over the extracted words.
pub fn tokenize(text: &str, location: WordLocation) -> Vec<WordInfo> {
    let chars: Vec<char> = text.chars().collect();
    let mut words = Vec::new();
    let mut i = 0usize;
    let mut ordinal = 0u16;

    while i < chars.len() {
        while i < chars.len() && is_split_char(chars[i]) {
            i += 1;
        }
        if i >= chars.len() {
            break;
        }

        let start = i;
        while i < chars.len() && !is_split_char(chars[i]) {
            i += 1;
        }

        let raw: String = chars[start..i].iter().collect();
        let first_char_index = u16::try_from(start).unwrap_or(u16::MAX);

        // A run of bare combining marks normalizes to nothing; skip it.
        if let Ok(word) = WordInfo::new(&raw, first_char_index, ordinal, location) {
            words.push(word);
            ordinal = ordinal.saturating_add(1);
        }
    }

    words
}

/// Filter out words whose (already lower-cased) text appears in
/// `stop_words`. Surviving words keep their original `word_index` values,
/// so positional queries still line up with the stored occurrences.
pub fn remove_stop_words(words: &[WordInfo], stop_words: &[String]) -> Vec<WordInfo> {
    words
        .iter()
        .filter(|word| !stop_words.iter().any(|stop| stop == word.text()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_chars() {
        for c in ",.;:-\"'!?^=()<>\\|/[]{}«»*°§%&#@~©®± \t".chars() {
            assert!(is_split_char(c), "{c:?} should split");
        }
        for c in "abcdefghijklmnopqrstuvwxyz0123456789òçàùèéì€$£".chars() {
            assert!(!is_split_char(c), "{c:?} should not split");
        }
    }

    #[test]
    fn normalize_word() {
        assert_eq!(remove_diacritics_and_punctuation("Wòrd", true), "word");
        assert_eq!(remove_diacritics_and_punctuation("café!", true), "cafe");
    }

    #[test]
    fn normalize_phrase_keeps_whitespace() {
        assert_eq!(
            remove_diacritics_and_punctuation("Wow, thìs thing sèems really cool!", false),
            "wow this thing seems really cool"
        );
    }

    #[test]
    fn tokenize_records_positions() {
        let words = tokenize("Hello, there!", WordLocation::Content);
        assert_eq!(words.len(), 2);
        assert_eq!(words[0].text(), "hello");
        assert_eq!(words[0].first_char_index(), 0);
        assert_eq!(words[0].word_index(), 0);
        assert_eq!(words[1].text(), "there");
        assert_eq!(words[1].first_char_index(), 7);
        assert_eq!(words[1].word_index(), 1);
    }

    #[test]
    fn tokenize_single_word() {
        let words = tokenize("todo", WordLocation::Content);
        assert_eq!(words.len(), 1);
        assert_eq!(words[0].text(), "todo");
        assert_eq!(words[0].first_char_index(), 0);
        assert_eq!(words[0].word_index(), 0);
    }

    #[test]
    fn tokenize_trailing_split_char() {
        let words = tokenize("todo.", WordLocation::Content);
        assert_eq!(words.len(), 1);
        assert_eq!(words[0].text(), "todo");
    }

    #[test]
    fn tokenize_reference_content() {
        let words = tokenize("This is some content.", WordLocation::Content);
        let expected = [("this", 0, 0), ("is", 5, 1), ("some", 8, 2), ("content", 13, 3)];
        assert_eq!(words.len(), expected.len());
        for (word, (text, first, ordinal)) in words.iter().zip(expected) {
            assert_eq!(word.text(), text);
            assert_eq!(word.first_char_index(), first);
            assert_eq!(word.word_index(), ordinal);
        }
    }

    #[test]
    fn tokenize_char_offsets_with_accents() {
        // Offsets count chars, not bytes.
        let words = tokenize("è qui", WordLocation::Content);
        assert_eq!(words.len(), 2);
        assert_eq!(words[0].text(), "e");
        assert_eq!(words[0].first_char_index(), 0);
        assert_eq!(words[1].text(), "qui");
        assert_eq!(words[1].first_char_index(), 2);
    }

    #[test]
    fn tokenize_tags_location() {
        let words = tokenize("My Title", WordLocation::Title);
        assert!(words.iter().all(|w| w.location() == WordLocation::Title));
    }

    #[test]
    fn stop_words_preserve_word_indices() {
        let stop: Vec<String> = ["the", "in", "of"].map(String::from).to_vec();
        let words = tokenize("I like the cookies", WordLocation::Content);
        let kept = remove_stop_words(&words, &stop);

        assert_eq!(kept.len(), 3);
        assert_eq!(kept[0].text(), "i");
        assert_eq!(kept[1].text(), "like");
        assert_eq!(kept[2].text(), "cookies");
        // "the" was dropped but "cookies" keeps ordinal 3.
        assert_eq!(kept[2].word_index(), 3);
    }

    #[test]
    fn stop_words_match_is_case_sensitive() {
        // Stored text is already lower-cased, so an upper-case stop word
        // never matches anything.
        let stop: Vec<String> = vec!["THE".to_string()];
        let words = tokenize("the cat", WordLocation::Content);
        assert_eq!(remove_stop_words(&words, &stop).len(), 2);
    }
}
