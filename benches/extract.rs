//! Benchmarks for keyphrase extraction and concept matching.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use conceptdiff::extract::{FrequencyExtractor, TextRankExtractor, TfIdfExtractor};
use conceptdiff::{ConceptConfig, Detector, Document, KeyphraseExtractor, Strategy};

const ABSTRACT: &str = "\
Compatibility of systems of linear constraints over the set of natural numbers.
Criteria of compatibility of a system of linear Diophantine equations, strict inequations, \
and nonstrict inequations are considered.
Upper bounds for components of a minimal set of solutions and algorithms of construction \
of minimal generating sets of solutions for all types of systems are given.
These criteria and the corresponding algorithms for constructing a minimal supporting set \
of solutions can be used in solving all the considered types of systems and systems of mixed types.";

fn corpus() -> Vec<Document> {
    (0..20)
        .map(|i| Document::from_text(&format!("{ABSTRACT}\nRevision {i} of the survey.")))
        .collect()
}

fn bench_frequency(c: &mut Criterion) {
    let extractor = FrequencyExtractor::default();
    let doc = Document::from_text(ABSTRACT);

    c.bench_function("frequency_extract", |bench| {
        bench.iter(|| black_box(extractor.extract(&doc).unwrap()))
    });
}

fn bench_tfidf(c: &mut Criterion) {
    let corpus = corpus();
    let extractor = TfIdfExtractor::new(&corpus);
    let doc = Document::from_text(ABSTRACT);

    c.bench_function("tfidf_fit_20_docs", |bench| {
        bench.iter(|| black_box(TfIdfExtractor::new(&corpus)))
    });
    c.bench_function("tfidf_extract", |bench| {
        bench.iter(|| black_box(extractor.extract(&doc).unwrap()))
    });
}

fn bench_textrank(c: &mut Criterion) {
    let extractor = TextRankExtractor::default();
    let doc = Document::from_text(ABSTRACT);

    c.bench_function("textrank_extract", |bench| {
        bench.iter(|| black_box(extractor.extract(&doc).unwrap()))
    });
}

fn bench_fuzzy_match(c: &mut Criterion) {
    let detector = Detector::new(ConceptConfig::default()).unwrap();
    let library = corpus();
    let candidate = Document::from_text(ABSTRACT);

    c.bench_function("fuzzy_match_20_docs", |bench| {
        bench.iter(|| {
            black_box(
                detector
                    .match_concepts(Strategy::FrequencyBased, &library, &candidate)
                    .unwrap(),
            )
        })
    });
}

criterion_group!(
    benches,
    bench_frequency,
    bench_tfidf,
    bench_textrank,
    bench_fuzzy_match
);
criterion_main!(benches);
