//! Tokenizer implementations for text analysis.
//!
//! Tokenizers are the first stage of an analysis chain. They read the field
//! text and own the [`AttributeSource`] that every filter above them shares.
//!
//! A tokenizer only has to find token boundaries: [`Tokenizer::segment`]
//! returns byte spans, and [`SpanTokenStream`] turns them into a token stream
//! with char offsets, one position per token.
//!
//! # Available Tokenizers
//!
//! - [`whitespace::WhitespaceTokenizer`] - Splits on whitespace characters
//! - [`unicode_word::UnicodeWordTokenizer`] - Uses Unicode word boundaries
//! - [`regex::RegexTokenizer`] - Custom regex-based tokenization
//! - [`whole::WholeTokenizer`] - Treats entire text as single token
//!
//! # Examples
//!
//! ```
//! use lexis::analysis::token::collect_tokens;
//! use lexis::analysis::tokenizer::Tokenizer;
//! use lexis::analysis::tokenizer::whitespace::WhitespaceTokenizer;
//!
//! let tokenizer = WhitespaceTokenizer::new();
//! let mut stream = tokenizer.tokenize("Hello world").unwrap();
//! let tokens = collect_tokens(stream.as_mut()).unwrap();
//! assert_eq!(tokens.len(), 2);
//! assert_eq!(tokens[1].start_offset, 6);
//! ```

pub mod regex;
pub mod unicode_word;
pub mod whitespace;
pub mod whole;

use std::io::Read;

use crate::analysis::attribute::{AttrRef, AttributeSource};
use crate::analysis::token_attributes::{
    CharTermAttribute, OffsetAttribute, PositionIncrementAttribute, TypeAttribute,
};
use crate::analysis::token_stream::{TokenStream, to_offset};
use crate::error::{LexisError, Result};

/// A token found by a tokenizer, as a byte range of the input text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TokenSpan {
    pub start: usize,
    pub end: usize,
    pub token_type: &'static str,
}

impl TokenSpan {
    pub fn new(start: usize, end: usize, token_type: &'static str) -> Self {
        TokenSpan {
            start,
            end,
            token_type,
        }
    }
}

/// Trait for tokenizers that split text into tokens.
///
/// The trait requires `Send + Sync` so that analyzers holding tokenizers can
/// be shared between threads.
///
/// # Examples
///
/// Implementing a custom tokenizer:
///
/// ```
/// use lexis::analysis::token_attributes::DEFAULT_TYPE;
/// use lexis::analysis::tokenizer::{TokenSpan, Tokenizer};
/// use lexis::error::Result;
///
/// struct CommaTokenizer;
///
/// impl Tokenizer for CommaTokenizer {
///     fn segment(&self, text: &str) -> Result<Vec<TokenSpan>> {
///         let mut spans = Vec::new();
///         let mut start = 0;
///         for (i, _) in text.match_indices(',').chain([(text.len(), "")]) {
///             if i > start {
///                 spans.push(TokenSpan::new(start, i, DEFAULT_TYPE));
///             }
///             start = i + 1;
///         }
///         Ok(spans)
///     }
///
///     fn name(&self) -> &'static str {
///         "comma"
///     }
/// }
///
/// assert_eq!(CommaTokenizer.segment("a,,bc").unwrap().len(), 2);
/// ```
pub trait Tokenizer: Send + Sync {
    /// Find the byte spans of the tokens in `text`, in order.
    fn segment(&self, text: &str) -> Result<Vec<TokenSpan>>;

    /// Get the name of this tokenizer.
    fn name(&self) -> &'static str;

    /// Tokenize `text` into a fresh token stream.
    fn tokenize(&self, text: &str) -> Result<Box<dyn TokenStream>> {
        let spans = self.segment(text)?;
        Ok(Box::new(SpanTokenStream::new(text, &spans)?))
    }

    /// Drain `reader` and tokenize its contents.
    fn token_stream(&self, reader: &mut dyn Read) -> Result<Box<dyn TokenStream>> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        self.tokenize(&text)
    }
}

#[derive(Clone, Copy, Debug)]
struct CharSpan {
    start: usize,
    end: usize,
    token_type: &'static str,
}

/// Token stream over pre-computed spans of a text.
///
/// Emits one token per span with position increment 1. Offsets count chars,
/// not bytes. `reset` must be called before the first `increment_token`.
#[derive(Debug)]
pub struct SpanTokenStream {
    attrs: AttributeSource,
    term: AttrRef<dyn CharTermAttribute>,
    offset: AttrRef<dyn OffsetAttribute>,
    type_att: AttrRef<dyn TypeAttribute>,
    chars: Vec<char>,
    spans: Vec<CharSpan>,
    upto: usize,
    ready: bool,
}

impl SpanTokenStream {
    /// Build a stream over `text`. Spans must lie on char boundaries.
    pub fn new(text: &str, spans: &[TokenSpan]) -> Result<Self> {
        let char_starts: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
        let to_char = |byte: usize| -> Result<usize> {
            if byte > text.len() || !text.is_char_boundary(byte) {
                return Err(LexisError::analysis(format!(
                    "token boundary {byte} is not a char boundary"
                )));
            }
            Ok(char_starts.partition_point(|&start| start < byte))
        };

        let spans = spans
            .iter()
            .map(|span| {
                let (start, end) = (to_char(span.start)?, to_char(span.end)?);
                if end < start {
                    return Err(LexisError::analysis(format!(
                        "token span {}..{} is reversed",
                        span.start, span.end
                    )));
                }
                Ok(CharSpan {
                    start,
                    end,
                    token_type: span.token_type,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let mut attrs = AttributeSource::new();
        attrs.add_attribute::<dyn PositionIncrementAttribute>()?;
        Ok(SpanTokenStream {
            term: attrs.add_attribute::<dyn CharTermAttribute>()?,
            offset: attrs.add_attribute::<dyn OffsetAttribute>()?,
            type_att: attrs.add_attribute::<dyn TypeAttribute>()?,
            attrs,
            chars: text.chars().collect(),
            spans,
            upto: 0,
            ready: false,
        })
    }
}

impl TokenStream for SpanTokenStream {
    fn attributes(&self) -> &AttributeSource {
        &self.attrs
    }

    fn attributes_mut(&mut self) -> &mut AttributeSource {
        &mut self.attrs
    }

    fn increment_token(&mut self) -> Result<bool> {
        if !self.ready {
            return Err(LexisError::invalid_operation(
                "increment_token() called before reset()",
            ));
        }
        let Some(&span) = self.spans.get(self.upto) else {
            return Ok(false);
        };
        self.upto += 1;

        self.attrs.clear_attributes();
        self.attrs
            .get_mut(self.term)?
            .copy_buffer(&self.chars, span.start, span.end - span.start)?;
        self.attrs
            .get_mut(self.offset)?
            .set_offset(to_offset(span.start)?, to_offset(span.end)?)?;
        self.attrs.get_mut(self.type_att)?.set_type(span.token_type);
        Ok(true)
    }

    fn reset(&mut self) -> Result<()> {
        self.upto = 0;
        self.ready = true;
        Ok(())
    }

    fn end(&mut self) -> Result<()> {
        self.attrs.end_attributes();
        let final_offset = to_offset(self.chars.len())?;
        self.attrs
            .get_mut(self.offset)?
            .set_offset(final_offset, final_offset)
    }
}
