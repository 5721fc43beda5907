//! Benchmark suite for building and reading whole glyph caches in memory
//!
//! Run with: cargo bench --manifest-path benches/Cargo.toml --bench cache_io

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use pfont_benches::{generate_glyph_set, sizes};
use pfont_types::file::pfont::{Builder, Reader};
use std::collections::BTreeMap;
use std::hint::black_box;
use std::io::Cursor;

/// Benchmark building a cache from pre-rasterized glyphs
fn bench_build(c: &mut Criterion) {
	let mut group = c.benchmark_group("cache_build");

	for count in [128u16, 1024, 8192] {
		let glyphs: BTreeMap<_, _> = generate_glyph_set(count, sizes::MEDIUM as u16).into_iter().collect();
		let codes: Vec<u16> = glyphs.keys().copied().collect();

		group.throughput(Throughput::Elements(u64::from(count)));
		group.bench_with_input(BenchmarkId::new("glyphs", count), &codes, |b, codes| {
			let mut glyphs = glyphs.clone();
			b.iter(|| black_box(Builder::new().to_bytes(black_box(codes), &mut glyphs)));
		});
	}

	group.finish();
}

/// Benchmark opening a cache and decoding every glyph
fn bench_read_all(c: &mut Criterion) {
	let mut group = c.benchmark_group("cache_read");

	for count in [128u16, 1024, 8192] {
		let mut glyphs: BTreeMap<_, _> = generate_glyph_set(count, sizes::MEDIUM as u16).into_iter().collect();
		let codes: Vec<u16> = glyphs.keys().copied().collect();
		let bytes = match Builder::new().to_bytes(&codes, &mut glyphs) {
			Ok(b) => b,
			Err(e) => {
				eprintln!("Warning: Could not build cache with {count} glyphs: {e}");
				continue;
			}
		};

		group.throughput(Throughput::Elements(u64::from(count)));
		group.bench_with_input(BenchmarkId::new("load", count), &bytes, |b, bytes| {
			b.iter(|| {
				let mut reader = match Reader::from_reader(Cursor::new(bytes.as_slice())) {
					Ok(r) => r,
					Err(_) => return 0,
				};
				let mut total = 0usize;
				let _ = reader.load(|glyph| total += glyph.coverage().len());
				black_box(total)
			});
		});

		group.bench_with_input(BenchmarkId::new("find", count), &bytes, |b, bytes| {
			let Ok(mut reader) = Reader::from_reader(Cursor::new(bytes.as_slice())) else {
				return;
			};
			b.iter(|| black_box(reader.find(black_box(count / 2))));
		});
	}

	group.finish();
}

criterion_group!(benches, bench_build, bench_read_all);
criterion_main!(benches);
