//! Typesetting throughput benchmarks
//!
//! Measures line breaking and pagination over growing amounts of text, and the cost of
//! measuring every word versus caching measurements.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use galley::{
    Document, ItemList, LineNumberConfig, ParagraphBuilder, PipelineBuilder, Typesetter,
    TypesetterConfig,
};
use std::hint::black_box;

const PARAGRAPH: &str = "The quick brown fox jumps over the lazy dog while the five boxing \
wizards jump quickly and a wizard's job is to vex chumps quickly in fog. Pack my box with five \
dozen liquor jugs, then sphinx of black quartz, judge my vow.";

fn text_of(paragraphs: usize) -> String {
    vec![PARAGRAPH; paragraphs].join("\n\n")
}

fn benchmark_typeset_text(c: &mut Criterion) {
    let mut group = c.benchmark_group("typeset_text");

    for paragraphs in [1, 10, 100] {
        let text = text_of(paragraphs);
        for cached in [false, true] {
            let pipeline = PipelineBuilder::new()
                .with_typesetter_config(TypesetterConfig::new(595.0, 842.0))
                .with_measurement_cache(cached)
                .build()
                .expect("valid bench config");
            let name = if cached { "cached" } else { "uncached" };

            group.bench_with_input(
                BenchmarkId::new(name, paragraphs),
                &paragraphs,
                |b, _| {
                    b.iter(|| {
                        let document: Document =
                            pipeline.typeset_text(black_box(&text)).expect("typesets");
                        black_box(document)
                    });
                },
            );
        }
    }

    group.finish();
}

fn benchmark_line_breaking(c: &mut Criterion) {
    let mut group = c.benchmark_group("line_breaking");
    let builder = ParagraphBuilder::new();

    for words in [50, 500, 5000] {
        let text = PARAGRAPH
            .split_whitespace()
            .cycle()
            .take(words)
            .collect::<Vec<_>>()
            .join(" ");
        let pipeline = PipelineBuilder::new()
            .with_typesetter_config(TypesetterConfig::new(595.0, 842.0))
            .build()
            .expect("valid bench config");
        let paragraph: ItemList = builder.build(&text);

        group.bench_with_input(BenchmarkId::new("words", words), &words, |b, _| {
            b.iter(|| {
                let lines = pipeline
                    .typesetter()
                    .typeset_horizontal_list(black_box(paragraph.clone()))
                    .expect("breaks");
                black_box(lines)
            });
        });
    }

    group.finish();
}

fn benchmark_line_numbers(c: &mut Criterion) {
    let mut group = c.benchmark_group("line_numbers");
    let text = text_of(100);
    let pipeline = PipelineBuilder::new()
        .with_typesetter_config(TypesetterConfig::new(595.0, 842.0))
        .with_line_numbers(LineNumberConfig::default())
        .build()
        .expect("valid bench config");

    group.bench_function("paragraphs/100", |b| {
        b.iter(|| black_box(pipeline.typeset_text(black_box(&text)).expect("typesets")));
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_typeset_text,
    benchmark_line_breaking,
    benchmark_line_numbers
);
criterion_main!(benches);
