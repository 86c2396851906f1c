use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use mackolik_odds::match_list::parse_livedata_json;
use mackolik_odds::normalize::normalize;
use mackolik_odds::odds_table::extract_odds_blocks;

const MATCH_HTML: &str = include_str!("../tests/fixtures/match_odds.html");
const LIVEDATA_JSON: &str = include_str!("../tests/fixtures/livedata.json");

fn bench_extract_odds_blocks(c: &mut Criterion) {
    c.bench_function("extract_odds_blocks", |b| {
        b.iter(|| {
            let blocks = extract_odds_blocks(black_box(MATCH_HTML));
            black_box(blocks.len());
        })
    });
}

fn bench_normalize(c: &mut Criterion) {
    let blocks = extract_odds_blocks(MATCH_HTML);
    c.bench_function("normalize", |b| {
        b.iter(|| {
            let odds = normalize(black_box(&blocks)).unwrap();
            black_box(odds);
        })
    });
}

fn bench_livedata_parse(c: &mut Criterion) {
    c.bench_function("livedata_parse", |b| {
        b.iter(|| {
            let listed = parse_livedata_json(black_box(LIVEDATA_JSON)).unwrap();
            black_box(listed.len());
        })
    });
}

criterion_group!(
    benches,
    bench_extract_odds_blocks,
    bench_normalize,
    bench_livedata_parse
);
criterion_main!(benches);
