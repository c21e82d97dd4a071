//! Criterion benchmarks for Lexis.
//!
//! Covers the hot paths of document inversion:
//! - Term buffer appends
//! - Text analysis through the standard analyzer
//! - Numeric trie term generation
//! - Field reuse across documents

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use lexis::analysis::analyzer::Analyzer;
use lexis::analysis::analyzer::standard::StandardAnalyzer;
use lexis::analysis::attribute::AttributeSource;
use lexis::analysis::token_attributes::CharTermAttribute;
use lexis::analysis::token_stream::TokenStream;
use lexis::document::document::Document;
use lexis::document::field::{IndexableField, Store};
use lexis::document::fields::{LongField, TextField};
use std::hint::black_box;

/// Generate test documents for benchmarking.
fn generate_test_documents(count: usize) -> Vec<String> {
    let words = [
        "the", "search", "engine", "indexes", "a", "document", "field", "term", "phrase", "of",
        "analysis", "tokenization", "stemming", "normalization", "and", "posting", "offset",
        "position", "payload", "Grüße", "naïve", "Straße", "attribute", "stream",
    ];

    let mut documents = Vec::with_capacity(count);
    for i in 0..count {
        let doc_length = 50 + (i % 100); // Variable length documents
        let mut doc_words = Vec::with_capacity(doc_length);

        for j in 0..doc_length {
            let word_idx = (i * 7 + j * 13) % words.len(); // Pseudo-random distribution
            doc_words.push(words[word_idx]);
        }

        documents.push(doc_words.join(" "));
    }

    documents
}

/// Drain a stream the way an indexer would, returning the token count.
fn drain(stream: &mut dyn TokenStream) -> usize {
    let mut count = 0;
    stream.reset().unwrap();
    while stream.increment_token().unwrap() {
        count += 1;
    }
    stream.end().unwrap();
    count
}

fn bench_term_buffer(c: &mut Criterion) {
    let mut group = c.benchmark_group("term_buffer");

    let mut attrs = AttributeSource::new();
    let term = attrs.add_attribute::<dyn CharTermAttribute>().unwrap();
    let text = "normalization";

    group.bench_function("append_and_clear", |b| {
        b.iter(|| {
            let buffer = attrs.get_mut(term).unwrap();
            buffer.set_empty();
            for _ in 0..8 {
                buffer.append_str(black_box(text));
            }
            black_box(buffer.len())
        })
    });

    group.finish();
}

/// Benchmark text analysis and tokenization.
fn bench_text_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("text_analysis");

    let analyzer = StandardAnalyzer::new().unwrap();
    let texts = generate_test_documents(1000);

    group.bench_function("analyze_single_document", |b| {
        b.iter(|| {
            let mut stream = analyzer.analyze("body", black_box(&texts[0])).unwrap();
            black_box(drain(stream.as_mut()))
        })
    });

    group.throughput(Throughput::Elements(100));
    group.bench_function("analyze_batch_documents", |b| {
        b.iter(|| {
            for text in texts.iter().take(100) {
                let mut stream = analyzer.analyze("body", black_box(text)).unwrap();
                black_box(drain(stream.as_mut()));
            }
        })
    });

    group.finish();
}

/// Benchmark inverting reused documents.
fn bench_document_inversion(c: &mut Criterion) {
    let mut group = c.benchmark_group("document_inversion");

    let analyzer = StandardAnalyzer::new().unwrap();
    let texts = generate_test_documents(100);

    let mut doc = Document::new();
    doc.add(TextField::new("body", "", Store::No));
    doc.add(LongField::new("timestamp", 0, Store::Yes));

    group.throughput(Throughput::Elements(texts.len() as u64));
    group.bench_function("reuse_fields", |b| {
        b.iter(|| {
            let mut tokens = 0;
            for (i, text) in texts.iter().enumerate() {
                let body = doc.get_field_mut("body").unwrap();
                body.set_string_value(text.as_str()).unwrap();
                let timestamp = doc.get_field_mut("timestamp").unwrap();
                timestamp.set_long_value(1_700_000_000_000 + i as i64).unwrap();

                for field in doc.fields_mut() {
                    if let Some(stream) = field.token_stream(&analyzer).unwrap() {
                        tokens += drain(stream);
                    }
                }
            }
            black_box(tokens)
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_term_buffer,
    bench_text_analysis,
    bench_document_inversion
);
criterion_main!(benches);
