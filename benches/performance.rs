use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tempfile::tempdir;
use tracker_core::{
    aggregate_months, predict_next_split, DocumentStore, SummaryService, DEFAULT_DOCUMENT_KEY,
};
use tracker_domain::{AppDocument, Calendar, Transaction, TransactionKind};
use tracker_storage_json::JsonDocumentStore;

const CATEGORIES: [&str; 5] = ["Food", "Bills", "Transport", "Shopping", "Salary"];

fn build_sample_transactions(count: usize) -> Vec<Transaction> {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
    (0..count)
        .map(|idx| {
            let kind = if idx % 4 == 0 {
                TransactionKind::Income
            } else {
                TransactionKind::Expense
            };
            Transaction::new(
                format!("Entry {idx}"),
                25.0 + (idx % 200) as f64,
                kind,
                CATEGORIES[idx % CATEGORIES.len()],
                start + Duration::hours(idx as i64 * 2),
            )
        })
        .collect()
}

fn bench_reports(c: &mut Criterion) {
    let transactions = build_sample_transactions(black_box(10_000));
    let as_of = Utc.with_ymd_and_hms(2026, 4, 15, 0, 0, 0).unwrap();

    c.bench_function("aggregate_months_12_of_10k", |b| {
        b.iter(|| black_box(aggregate_months(&transactions, 12, as_of, Calendar::Utc)))
    });

    c.bench_function("predict_next_split_6_of_10k", |b| {
        b.iter(|| black_box(predict_next_split(&transactions, 6, as_of, Calendar::Utc)))
    });

    c.bench_function("expense_breakdown_10k", |b| {
        b.iter(|| black_box(SummaryService::expense_breakdown(&transactions)))
    });
}

fn bench_document_io(c: &mut Criterion) {
    let mut document = AppDocument::default();
    document.current_mut().transactions = build_sample_transactions(black_box(10_000));
    let dir = tempdir().expect("tempdir");
    let store = JsonDocumentStore::with_retention(dir.path().to_path_buf(), 1).expect("store");

    c.bench_function("document_save_10k", |b| {
        b.iter(|| {
            store
                .save(DEFAULT_DOCUMENT_KEY, &document)
                .expect("save document");
        })
    });

    c.bench_function("document_load_10k", |b| {
        b.iter(|| {
            let loaded = store.load(DEFAULT_DOCUMENT_KEY).expect("load document");
            black_box(loaded);
        })
    });
}

criterion_group!(benches, bench_reports, bench_document_io);
criterion_main!(benches);
