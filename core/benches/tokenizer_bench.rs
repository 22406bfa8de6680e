use criterion::{criterion_group, criterion_main, Criterion};
use index_core::tokenizer::tokenize;
use index_core::{IndexBuilder, SourceDocument};

const TEXT: &str = "The storm that swept across Southern California on New Year's Day \
    dropped 2.5 inches of rain in some areas, flooding streets and knocking out power \
    to more than 40,000 customers, officials said Sunday.";

fn bench_tokenize(c: &mut Criterion) {
    c.bench_function("tokenize_paragraph", |b| b.iter(|| tokenize(TEXT).count()));
}

fn bench_process(c: &mut Criterion) {
    let docs: Vec<SourceDocument> = (0..100)
        .map(|i| SourceDocument::new(format!("LA010189-{i:04}")).with_headline("Storm").with_text([TEXT, TEXT]))
        .collect();
    c.bench_function("process_100_docs", |b| {
        b.iter(|| {
            let mut builder = IndexBuilder::new();
            for doc in &docs {
                builder.process(doc);
            }
            builder.finish()
        })
    });
}

criterion_group!(benches, bench_tokenize, bench_process);
criterion_main!(benches);
