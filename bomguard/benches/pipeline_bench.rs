use bomguard::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::path::PathBuf;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// A board with a few hundred passives spread over a handful of values.
fn large_board() -> Vec<ComponentRecord> {
    let values = ["10k", "100nF", "1uF", "4.7k", "22pF"];
    (0..500)
        .map(|i| {
            let value = values[i % values.len()];
            let component = ComponentRecord::new(
                format!("R{}", i + 1),
                value,
                "Resistor_SMD:R_0402_1005Metric",
            );
            match i % 4 {
                0 | 1 => component.with_field("LCSC", "C25744"),
                2 => component.with_field("Digikey", "311-10.0KLRCT-ND"),
                _ => component,
            }
        })
        .collect()
}

fn bench_process_fixture(c: &mut Criterion) {
    let components = bomguard::load_components(&fixture_path("board.json")).unwrap();
    let catalog = bomguard::load_catalog(&fixture_path("jlcpcb_parts.csv")).unwrap();
    let options = BomOptions::default();

    c.bench_function("process_fixture", |b| {
        b.iter(|| {
            BomGuardCore::process(
                black_box(&components),
                CatalogState::Ready(&catalog),
                black_box(&options),
            )
        });
    });
}

fn bench_process_large_board(c: &mut Criterion) {
    let components = large_board();
    let catalog = bomguard::load_catalog(&fixture_path("jlcpcb_parts.csv")).unwrap();
    let options = BomOptions {
        match_policy: MatchPolicy::Lenient,
        ..Default::default()
    };

    c.bench_function("process_large_board", |b| {
        b.iter(|| {
            BomGuardCore::process(
                black_box(&components),
                CatalogState::Ready(&catalog),
                black_box(&options),
            )
        });
    });
}

fn bench_load_catalog(c: &mut Criterion) {
    c.bench_function("load_catalog", |b| {
        b.iter(|| bomguard::load_catalog(black_box(&fixture_path("jlcpcb_parts.csv"))));
    });
}

criterion_group!(
    benches,
    bench_process_fixture,
    bench_process_large_board,
    bench_load_catalog
);
criterion_main!(benches);
