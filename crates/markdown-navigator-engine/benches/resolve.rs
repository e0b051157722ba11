use std::sync::Arc;

use criterion::{Criterion, criterion_group, criterion_main};
use markdown_navigator_engine::{
    Capabilities, Document, ParseCache, ParsedDocument, Scope, resolve, resolve::unresolved,
};
use markdown_navigator_syntax::ParserOptions;
mod common;

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    group.sample_size(10);

    let content = common::generate_markdown_content(100);
    let document = Document::new("bench.md", content.as_str());

    group.bench_function("parse_and_table", |b| {
        b.iter(|| {
            let parsed = ParsedDocument::parse(
                std::hint::black_box(document.clone()),
                ParserOptions::default(),
            );
            std::hint::black_box(parsed.reference_table());
        });
    });

    let cache = ParseCache::new(ParserOptions::default(), 8);
    cache.get_or_parse(&document).unwrap();
    group.bench_function("cache_hit", |b| {
        b.iter(|| std::hint::black_box(cache.get_or_parse(&document).unwrap()));
    });

    group.finish();
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve");
    group.sample_size(10);

    let documents: Vec<Arc<ParsedDocument>> = common::generate_linked_pages(200)
        .into_iter()
        .map(|(path, text)| {
            Arc::new(ParsedDocument::parse(
                Document::new(path.as_str(), text),
                ParserOptions::default(),
            ))
        })
        .collect();
    let scope = Scope::new(documents.clone());
    let origin = documents[0].clone();
    let references: Vec<_> = origin
        .elements()
        .filter(|e| e.has(Capabilities::REFERENCE))
        .collect();

    group.bench_function("references_in_one_document", |b| {
        b.iter(|| {
            for element in &references {
                std::hint::black_box(resolve(element, &origin, &scope));
            }
        });
    });

    group.bench_function("unresolved_workspace", |b| {
        b.iter(|| {
            for doc in scope.documents() {
                std::hint::black_box(unresolved(doc, &scope));
            }
        });
    });

    group.finish();
}

criterion_group!(benches, bench_parse, bench_resolve);
criterion_main!(benches);
