//! Tokenizer based on Unicode word boundaries (UAX #29).

use unicode_segmentation::UnicodeSegmentation;

use super::{TokenSpan, Tokenizer};
use crate::error::Result;

/// Classification of a word found by [`UnicodeWordTokenizer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenType {
    Alphanum,
    Num,
    Ideographic,
    Hiragana,
    Katakana,
    Hangul,
    Other,
}

impl TokenType {
    /// The string stored in the type attribute.
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenType::Alphanum => "<ALPHANUM>",
            TokenType::Num => "<NUM>",
            TokenType::Ideographic => "<IDEOGRAPHIC>",
            TokenType::Hiragana => "<HIRAGANA>",
            TokenType::Katakana => "<KATAKANA>",
            TokenType::Hangul => "<HANGUL>",
            TokenType::Other => "<OTHER>",
        }
    }

    /// Detect token type based on character content.
    ///
    /// - All numeric → Num
    /// - All Hiragana → Hiragana
    /// - All Katakana → Katakana
    /// - Contains Hangul → Hangul
    /// - Contains CJK → Ideographic
    /// - Alphanumeric → Alphanum
    /// - Otherwise → Other
    pub fn detect(word: &str) -> TokenType {
        if word.is_empty() {
            return TokenType::Other;
        }

        if word.chars().all(|c| c.is_numeric()) {
            return TokenType::Num;
        }

        if word.chars().all(|c| matches!(c, '\u{3040}'..='\u{309F}')) {
            return TokenType::Hiragana;
        }

        if word.chars().all(|c| matches!(c, '\u{30A0}'..='\u{30FF}')) {
            return TokenType::Katakana;
        }

        if word
            .chars()
            .any(|c| matches!(c, '\u{AC00}'..='\u{D7AF}' | '\u{1100}'..='\u{11FF}'))
        {
            return TokenType::Hangul;
        }

        if word.chars().any(|c| {
            matches!(c,
                '\u{4E00}'..='\u{9FFF}' |  // CJK Unified Ideographs
                '\u{3400}'..='\u{4DBF}' |  // CJK Extension A
                '\u{20000}'..='\u{2A6DF}' | // CJK Extension B
                '\u{2A700}'..='\u{2CEAF}'   // CJK Extensions C-E
            )
        }) {
            return TokenType::Ideographic;
        }

        if word
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '\'' | '.' | '_'))
        {
            return TokenType::Alphanum;
        }

        TokenType::Other
    }
}

/// Emits the words of the text as defined by Unicode word boundaries.
///
/// Whitespace and punctuation between words are dropped. Each token's type
/// attribute is set from [`TokenType::detect`].
#[derive(Clone, Debug, Default)]
pub struct UnicodeWordTokenizer;

impl UnicodeWordTokenizer {
    pub fn new() -> Self {
        UnicodeWordTokenizer
    }
}

impl Tokenizer for UnicodeWordTokenizer {
    fn segment(&self, text: &str) -> Result<Vec<TokenSpan>> {
        Ok(text
            .unicode_word_indices()
            .map(|(start, word)| {
                TokenSpan::new(start, start + word.len(), TokenType::detect(word).as_str())
            })
            .collect())
    }

    fn name(&self) -> &'static str {
        "unicode_word"
    }
}
