//! Token snapshots and a stream that replays them.
//!
//! A [`TokenStream`] exposes only the current token through its attributes.
//! [`Token`] is an owned snapshot of those attributes, handy for tests,
//! debugging and for feeding pre-analyzed content back into an index through
//! a [`CannedTokenStream`].
//!
//! # Token Graphs
//!
//! Positions are expressed through `position_increment` and
//! `position_length`, which lets a stream describe synonyms and multi-word
//! phrases:
//!
//! ```text
//! Input: "machine learning"
//! With synonym: "ml"
//!
//! Token Graph:
//!   "machine"  (pos_inc=1, pos_len=1)
//!   "ml"       (pos_inc=0, pos_len=2)  ← same position, spans 2
//!   "learning" (pos_inc=1, pos_len=1)
//! ```
//!
//! # Examples
//!
//! ```
//! use lexis::analysis::token::{collect_tokens, IntoTokenStream, Token};
//!
//! let tokens = vec![
//!     Token::new("machine", 0, 7),
//!     Token::new("ml", 0, 16).with_position_increment(0).with_position_length(2),
//!     Token::new("learning", 8, 16),
//! ];
//!
//! let mut stream = tokens.clone().into_token_stream().unwrap();
//! assert_eq!(collect_tokens(stream.as_mut()).unwrap(), tokens);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::analysis::attribute::{AttrRef, AttributeSource};
use crate::analysis::token_attributes::{
    CharTermAttribute, DEFAULT_TYPE, FlagsAttribute, KeywordAttribute, OffsetAttribute,
    PayloadAttribute, PositionIncrementAttribute, PositionLengthAttribute, TypeAttribute,
};
use crate::analysis::token_stream::TokenStream;
use crate::error::Result;
use crate::util::bytes_ref::BytesRef;

/// An owned copy of the standard attributes of one token.
///
/// # Fields
///
/// - `text` - The term text
/// - `start_offset` / `end_offset` - Char offsets in the original text
/// - `position_increment` - Position relative to the previous token (default: 1)
/// - `position_length` - Number of positions spanned (default: 1)
/// - `token_type` - Lexical type (default: `"word"`)
/// - `flags` - Application flag bits
/// - `payload` - Optional per-position bytes
/// - `keyword` - Whether rewriting filters must skip the token
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// The text content of the token
    pub text: String,

    /// The char offset where this token starts in the original text
    pub start_offset: i32,

    /// The char offset where this token ends in the original text
    pub end_offset: i32,

    /// Position increment from the previous token (default: 1).
    pub position_increment: i32,

    /// How many positions this token spans (default: 1).
    pub position_length: i32,

    /// Lexical type of the token (default: "word").
    pub token_type: String,

    #[serde(default)]
    pub flags: i32,

    #[serde(default)]
    pub payload: Option<BytesRef>,

    #[serde(default)]
    pub keyword: bool,
}

impl Token {
    /// Create a token with default position, type and flags.
    pub fn new<S: Into<String>>(text: S, start_offset: i32, end_offset: i32) -> Self {
        Token {
            text: text.into(),
            start_offset,
            end_offset,
            position_increment: 1,
            position_length: 1,
            token_type: DEFAULT_TYPE.to_string(),
            flags: 0,
            payload: None,
            keyword: false,
        }
    }

    pub fn with_position_increment(mut self, position_increment: i32) -> Self {
        self.position_increment = position_increment;
        self
    }

    pub fn with_position_length(mut self, position_length: i32) -> Self {
        self.position_length = position_length;
        self
    }

    pub fn with_token_type<S: Into<String>>(mut self, token_type: S) -> Self {
        self.token_type = token_type.into();
        self
    }

    pub fn with_flags(mut self, flags: i32) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_payload(mut self, payload: BytesRef) -> Self {
        self.payload = Some(payload);
        self
    }

    pub fn with_keyword(mut self, keyword: bool) -> Self {
        self.keyword = keyword;
        self
    }

    /// Snapshot the current token of `source`.
    ///
    /// Attributes the source does not have keep their defaults.
    pub fn capture(source: &AttributeSource) -> Self {
        let mut token = Token::new("", 0, 0);
        if let Some(term) = source.attribute::<dyn CharTermAttribute>() {
            token.text = term.term();
        }
        if let Some(offset) = source.attribute::<dyn OffsetAttribute>() {
            token.start_offset = offset.start_offset();
            token.end_offset = offset.end_offset();
        }
        if let Some(pos_inc) = source.attribute::<dyn PositionIncrementAttribute>() {
            token.position_increment = pos_inc.position_increment();
        }
        if let Some(pos_len) = source.attribute::<dyn PositionLengthAttribute>() {
            token.position_length = pos_len.position_length();
        }
        if let Some(ty) = source.attribute::<dyn TypeAttribute>() {
            token.token_type = ty.token_type().to_string();
        }
        if let Some(flags) = source.attribute::<dyn FlagsAttribute>() {
            token.flags = flags.flags();
        }
        if let Some(payload) = source.attribute::<dyn PayloadAttribute>() {
            token.payload = payload.payload().map(BytesRef::deep_copy);
        }
        if let Some(keyword) = source.attribute::<dyn KeywordAttribute>() {
            token.keyword = keyword.is_keyword();
        }
        token
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({},{},{},type={})",
            self.text, self.start_offset, self.end_offset, self.token_type
        )
    }
}

/// Consume a stream from `reset` to `end`, snapshotting every token.
pub fn collect_tokens(stream: &mut dyn TokenStream) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    stream.reset()?;
    while stream.increment_token()? {
        tokens.push(Token::capture(stream.attributes()));
    }
    stream.end()?;
    Ok(tokens)
}

/// Conversion into a boxed [`TokenStream`].
pub trait IntoTokenStream {
    fn into_token_stream(self) -> Result<Box<dyn TokenStream>>;
}

impl IntoTokenStream for Vec<Token> {
    fn into_token_stream(self) -> Result<Box<dyn TokenStream>> {
        Ok(Box::new(CannedTokenStream::new(self)?))
    }
}

/// Replays a fixed list of tokens.
#[derive(Debug)]
pub struct CannedTokenStream {
    attrs: AttributeSource,
    term: AttrRef<dyn CharTermAttribute>,
    offset: AttrRef<dyn OffsetAttribute>,
    pos_inc: AttrRef<dyn PositionIncrementAttribute>,
    pos_len: AttrRef<dyn PositionLengthAttribute>,
    type_att: AttrRef<dyn TypeAttribute>,
    flags: AttrRef<dyn FlagsAttribute>,
    payload: AttrRef<dyn PayloadAttribute>,
    keyword: AttrRef<dyn KeywordAttribute>,
    tokens: Vec<Token>,
    upto: usize,
    final_offset: i32,
}

impl CannedTokenStream {
    pub fn new(tokens: Vec<Token>) -> Result<Self> {
        let final_offset = tokens.iter().map(|t| t.end_offset).max().unwrap_or(0);
        Self::with_final_offset(tokens, final_offset)
    }

    /// Replay `tokens` and report `final_offset` from [`TokenStream::end`].
    pub fn with_final_offset(tokens: Vec<Token>, final_offset: i32) -> Result<Self> {
        let mut attrs = AttributeSource::new();
        Ok(CannedTokenStream {
            term: attrs.add_attribute::<dyn CharTermAttribute>()?,
            offset: attrs.add_attribute::<dyn OffsetAttribute>()?,
            pos_inc: attrs.add_attribute::<dyn PositionIncrementAttribute>()?,
            pos_len: attrs.add_attribute::<dyn PositionLengthAttribute>()?,
            type_att: attrs.add_attribute::<dyn TypeAttribute>()?,
            flags: attrs.add_attribute::<dyn FlagsAttribute>()?,
            payload: attrs.add_attribute::<dyn PayloadAttribute>()?,
            keyword: attrs.add_attribute::<dyn KeywordAttribute>()?,
            attrs,
            tokens,
            upto: 0,
            final_offset,
        })
    }

    fn apply(&mut self, index: usize) -> Result<()> {
        let token = &self.tokens[index];
        let attrs = &mut self.attrs;
        attrs.get_mut(self.term)?.append_str(&token.text);
        attrs
            .get_mut(self.offset)?
            .set_offset(token.start_offset, token.end_offset)?;
        attrs
            .get_mut(self.pos_inc)?
            .set_position_increment(token.position_increment)?;
        attrs
            .get_mut(self.pos_len)?
            .set_position_length(token.position_length)?;
        attrs.get_mut(self.type_att)?.set_type(&token.token_type);
        attrs.get_mut(self.flags)?.set_flags(token.flags);
        attrs.get_mut(self.payload)?.set_payload(token.payload.clone());
        attrs.get_mut(self.keyword)?.set_keyword(token.keyword);
        Ok(())
    }
}

impl TokenStream for CannedTokenStream {
    fn attributes(&self) -> &AttributeSource {
        &self.attrs
    }

    fn attributes_mut(&mut self) -> &mut AttributeSource {
        &mut self.attrs
    }

    fn increment_token(&mut self) -> Result<bool> {
        if self.upto >= self.tokens.len() {
            return Ok(false);
        }
        self.attrs.clear_attributes();
        self.apply(self.upto)?;
        self.upto += 1;
        Ok(true)
    }

    fn reset(&mut self) -> Result<()> {
        self.upto = 0;
        Ok(())
    }

    fn end(&mut self) -> Result<()> {
        self.attrs.end_attributes();
        self.attrs
            .get_mut(self.offset)?
            .set_offset(self.final_offset, self.final_offset)
    }
}
