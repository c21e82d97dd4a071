//! Text analysis for Lexis.
//!
//! This module provides the attribute-based token pipeline: tokenizers read
//! text into an [`attribute::AttributeSource`], filters rewrite the attributes
//! in place, and analyzers bundle a tokenizer with its filters. Consumers
//! pull tokens one at a time through [`token_stream::TokenStream`].

pub mod analyzer;
pub mod attribute;
pub mod config;
pub mod numeric_token_stream;
pub mod token;
pub mod token_attributes;
pub mod token_filter;
pub mod token_stream;
pub mod tokenizer;
