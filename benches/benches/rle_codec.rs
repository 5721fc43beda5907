//! Benchmark suite for the coverage run-length codec
//!
//! Run with: cargo bench --manifest-path benches/Cargo.toml --bench rle_codec

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use pfont_benches::{generate_glyph_coverage, generate_noise_coverage, sizes};
use pfont_types::file::pfont::codec;
use std::hint::black_box;

const SIZES: [(&str, usize); 4] = [
	("small", sizes::SMALL),
	("medium", sizes::MEDIUM),
	("large", sizes::LARGE),
	("huge", sizes::HUGE),
];

/// Benchmark encoding of glyph-like bitmaps
fn bench_encode(c: &mut Criterion) {
	let mut group = c.benchmark_group("rle_encode");

	for (name, size) in SIZES {
		let coverage = generate_glyph_coverage(size, size, 7);
		group.throughput(Throughput::Elements(coverage.len() as u64));
		group.bench_with_input(BenchmarkId::new("glyph", name), &coverage, |b, coverage| {
			b.iter(|| black_box(codec::encode(black_box(coverage))));
		});
	}

	group.finish();
}

/// Benchmark decoding of glyph-like bitmaps
fn bench_decode(c: &mut Criterion) {
	let mut group = c.benchmark_group("rle_decode");

	for (name, size) in SIZES {
		let coverage = generate_glyph_coverage(size, size, 7);
		let packed = match codec::encode(&coverage) {
			Ok(p) => p,
			Err(e) => {
				eprintln!("Warning: Could not encode {name} bitmap: {e}");
				continue;
			}
		};

		group.throughput(Throughput::Elements(coverage.len() as u64));
		group.bench_with_input(BenchmarkId::new("glyph", name), &packed, |b, packed| {
			b.iter(|| black_box(codec::decode(black_box(packed), coverage.len())));
		});
	}

	group.finish();
}

/// Benchmark the worst case: no runs at all
fn bench_incompressible(c: &mut Criterion) {
	let mut group = c.benchmark_group("rle_noise");

	let coverage = generate_noise_coverage(sizes::HUGE * sizes::HUGE);
	let packed = codec::encode(&coverage).unwrap_or_default();

	group.throughput(Throughput::Elements(coverage.len() as u64));
	group.bench_function("encode", |b| {
		b.iter(|| black_box(codec::encode(black_box(&coverage))));
	});
	group.bench_function("decode", |b| {
		b.iter(|| black_box(codec::decode(black_box(&packed), coverage.len())));
	});

	group.finish();
}

/// Benchmark a single long run, which exercises marker splitting
fn bench_long_run(c: &mut Criterion) {
	let mut group = c.benchmark_group("rle_long_run");

	let coverage = vec![64u8; sizes::HUGE * sizes::HUGE];
	let packed = codec::encode(&coverage).unwrap_or_default();

	group.throughput(Throughput::Elements(coverage.len() as u64));
	group.bench_function("encode", |b| {
		b.iter(|| black_box(codec::encode(black_box(&coverage))));
	});
	group.bench_function("decode", |b| {
		b.iter(|| black_box(codec::decode(black_box(&packed), coverage.len())));
	});

	group.finish();
}

criterion_group!(benches, bench_encode, bench_decode, bench_incompressible, bench_long_run);
criterion_main!(benches);
