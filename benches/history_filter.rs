use std::hint::black_box;

use callgrade::history::{filter_summaries_in, page_controls, page_slice, total_pages};
use callgrade::model::AnalysisSummary;
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use time::UtcOffset;

const RECORD_COUNT: usize = 2_000;

fn summaries() -> Vec<AnalysisSummary> {
    (0..RECORD_COUNT)
        .map(|i| AnalysisSummary {
            id: (1_000 + i).to_string(),
            overall_score: (i % 101) as u8,
            created_at: format!(
                "2024-{:02}-{:02}T{:02}:{:02}:00Z",
                i % 12 + 1,
                i % 28 + 1,
                i % 24,
                i % 60
            ),
        })
        .collect()
}

fn bench_filter(c: &mut Criterion) {
    let records = summaries();
    for query in ["", "15", "mar", "no match"] {
        c.bench_with_input(
            BenchmarkId::new("filter_summaries", query),
            &records,
            |b, records| {
                b.iter(|| filter_summaries_in(black_box(records), black_box(query), UtcOffset::UTC));
            },
        );
    }
}

fn bench_page(c: &mut Criterion) {
    let records = summaries();
    c.bench_function("filter_then_page", |b| {
        b.iter(|| {
            let filtered = filter_summaries_in(&records, black_box("2024"), UtcOffset::UTC);
            let total = total_pages(filtered.len());
            let page = total / 2 + 1;
            black_box(page_controls(page, total));
            black_box(page_slice(&filtered, page).len())
        });
    });
}

criterion_group!(benches, bench_filter, bench_page);
criterion_main!(benches);
