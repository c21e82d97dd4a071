//! Analyzers: complete text analysis chains.
//!
//! An analyzer turns the text of one field into a token stream. Fields call
//! [`Analyzer::token_stream`] with the field name and a reader over the
//! value, so an analyzer can pick its chain per field (see
//! [`per_field::PerFieldAnalyzer`]).
//!
//! # Available Analyzers
//!
//! - [`pipeline::PipelineAnalyzer`] - Tokenizer followed by a list of filters
//! - [`standard::StandardAnalyzer`] - Word tokens, lowercased, without stop words
//! - [`simple::SimpleAnalyzer`] - Tokenizer only
//! - [`keyword::KeywordAnalyzer`] - The whole value as one token
//! - [`noop::NoOpAnalyzer`] - No tokens at all
//! - [`per_field::PerFieldAnalyzer`] - Delegates by field name

#[allow(clippy::module_inception)]
pub mod analyzer;
pub mod keyword;
pub mod noop;
pub mod per_field;
pub mod pipeline;
pub mod simple;
pub mod standard;

pub use analyzer::Analyzer;
