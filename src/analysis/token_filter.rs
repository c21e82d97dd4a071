//! Token filter implementations for token transformation.
//!
//! A filter wraps the stream below it and rewrites, drops or annotates its
//! tokens in place. Filters do not have attributes of their own: they
//! register what they need on the attribute source of their input, so the
//! whole chain shares one set of per-token state.
//!
//! # Available Filters
//!
//! - [`lowercase::LowercaseFilter`] - Converts tokens to lowercase
//! - [`stop::StopFilter`] - Removes stop words, leaving position holes
//! - [`keyword_marker::KeywordMarkerFilter`] - Protects listed terms from rewriting
//! - [`stem::StemFilter`] - Reduces words to their stem form
//! - [`limit::LimitFilter`] - Limits number of tokens
//!
//! # Examples
//!
//! ```
//! use lexis::analysis::token::collect_tokens;
//! use lexis::analysis::token_filter::Filter;
//! use lexis::analysis::token_filter::lowercase::LowercaseFilter;
//! use lexis::analysis::tokenizer::Tokenizer;
//! use lexis::analysis::tokenizer::whitespace::WhitespaceTokenizer;
//!
//! let stream = WhitespaceTokenizer::new().tokenize("Hello WORLD").unwrap();
//! let mut filtered = LowercaseFilter::new().filter(stream).unwrap();
//! let tokens = collect_tokens(filtered.as_mut()).unwrap();
//!
//! assert_eq!(tokens[0].text, "hello");
//! assert_eq!(tokens[1].text, "world");
//! ```
//!
//! # Filter Chaining
//!
//! Filters can be chained together in an analyzer to create complex
//! text processing pipelines:
//!
//! ```text
//! Tokenizer → Lowercase → Stop Words → Keyword Marker → Stemmer → Index
//! ```

pub mod keyword_marker;
pub mod limit;
pub mod lowercase;
pub mod stem;
pub mod stop;

use crate::analysis::token_stream::TokenStream;
use crate::error::Result;

/// Trait for filters that transform token streams.
///
/// A filter is a reusable, thread-safe description of a stage; calling
/// [`Filter::filter`] wraps one concrete stream.
pub trait Filter: Send + Sync {
    /// Wrap `input` with this filter.
    fn filter(&self, input: Box<dyn TokenStream>) -> Result<Box<dyn TokenStream>>;

    /// Get the name of this filter.
    fn name(&self) -> &'static str;
}
