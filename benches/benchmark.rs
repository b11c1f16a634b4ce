// Build and query benchmarks over synthetic catalogs
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::prelude::*;
use rand::rngs::StdRng;
use reelsim::{IndexConfig, RawItem, RecommendationIndex};
use reelsim_similarity::TextEncoder;

const GENRES: &[&str] = &[
    "Action", "Adventure", "Animation", "Comedy", "Crime", "Drama", "Family", "Fantasy",
    "Horror", "Mystery", "Romance", "Science Fiction", "Thriller", "War", "Western",
];

const WORDS: &[&str] = &[
    "hero", "city", "space", "alien", "love", "war", "family", "secret", "island", "robot",
    "detective", "murder", "kingdom", "dragon", "ship", "escape", "heist", "ghost", "school",
    "journey", "revenge", "planet", "empire", "magic", "storm", "river", "prison", "desert",
];

fn sentence(rng: &mut StdRng, len: usize) -> String {
    (0..len)
        .map(|_| WORDS[rng.random_range(0..WORDS.len())])
        .collect::<Vec<_>>()
        .join(" ")
}

fn generate_catalog(size: usize) -> Vec<RawItem> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..size)
        .map(|i| {
            let tags: Vec<&str> = GENRES.choose_multiple(&mut rng, 3).copied().collect();
            let keywords: Vec<String> = (0..4).map(|_| sentence(&mut rng, 2)).collect();
            RawItem::new(format!("movie {}", i))
                .with_id(i as u64)
                .with_tags(tags)
                .with_keywords(keywords)
                .with_synopsis(sentence(&mut rng, 30))
                .with_popularity(rng.random_range(0.0..200.0))
        })
        .collect()
}

fn benchmark_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_index");
    group.sample_size(10);

    for size in [100, 500, 2000].iter() {
        let catalog = generate_catalog(*size);
        group.bench_with_input(BenchmarkId::new("reelsim", size), &catalog, |b, catalog| {
            b.iter(|| {
                let index = RecommendationIndex::build(catalog.clone(), &IndexConfig::default()).unwrap();
                black_box(index);
            });
        });
    }

    group.finish();
}

fn benchmark_recommend(c: &mut Criterion) {
    let mut group = c.benchmark_group("recommend");

    let index = RecommendationIndex::build(generate_catalog(2000), &IndexConfig::default()).unwrap();

    group.bench_function("top_10", |b| {
        b.iter(|| {
            let recs = index.recommend(black_box("movie 1000"), 10).unwrap();
            black_box(recs);
        });
    });

    group.bench_function("scores_top_100", |b| {
        b.iter(|| {
            let scores = index.similarity_scores(black_box("movie 1000"), 100).unwrap();
            black_box(scores);
        });
    });

    group.finish();
}

fn benchmark_tfidf(c: &mut Criterion) {
    let mut group = c.benchmark_group("tfidf");

    let mut rng = StdRng::seed_from_u64(7);
    let corpus: Vec<String> = (0..2000).map(|_| sentence(&mut rng, 40)).collect();

    group.bench_function("fit_2000_docs", |b| {
        b.iter(|| {
            let mut encoder = TextEncoder::new("synopsis", 5000, Default::default());
            encoder.fit(black_box(&corpus));
            black_box(encoder);
        });
    });

    let mut encoder = TextEncoder::new("synopsis", 5000, Default::default());
    encoder.fit(&corpus);
    let doc = sentence(&mut rng, 40);

    group.bench_function("transform", |b| {
        b.iter(|| black_box(encoder.transform(black_box(&doc))));
    });

    group.finish();
}

criterion_group!(benches, benchmark_build, benchmark_recommend, benchmark_tfidf);
criterion_main!(benches);
