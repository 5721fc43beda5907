//! Damaged caches fail cleanly instead of panicking

use std::collections::BTreeMap;
use std::io::Cursor;

use pfont_rs::pfont_types::file::pfont::{Builder, ReadConfig, Reader};
use pfont_rs::PfFileError;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::ramp_glyph;

fn sample_cache() -> Vec<u8> {
	let mut glyphs: BTreeMap<_, _> = (0u16..16).map(|c| (c, ramp_glyph(c + 1, 9))).collect();
	let codes: Vec<u16> = glyphs.keys().copied().collect();
	Builder::new().to_bytes(&codes, &mut glyphs).unwrap()
}

#[test_log::test]
fn every_truncation_is_rejected_or_readable() {
	let bytes = sample_cache();
	for len in 0..bytes.len() {
		let result = Reader::from_reader(Cursor::new(bytes[..len].to_vec()));
		match result {
			Ok(_) => panic!("truncated cache of {len} bytes opened"),
			Err(e) => assert!(e.is_format_error(), "unexpected error at {len}: {e}"),
		}
	}
}

#[test_log::test]
fn random_byte_flips_never_panic() {
	let original = sample_cache();
	let mut rng = SmallRng::seed_from_u64(0x0067_6c79_7068);

	for _ in 0..500 {
		let mut bytes = original.clone();
		for _ in 0..rng.random_range(1..8) {
			let at = rng.random_range(0..bytes.len());
			bytes[at] = rng.random();
		}

		let Ok(mut reader) = Reader::with_config(Cursor::new(bytes), ReadConfig::strict()) else {
			continue;
		};
		for glyph in reader.iter_glyphs().flatten() {
			assert_eq!(glyph.coverage().len(), glyph.metrics().area());
		}
	}
}

#[test_log::test]
fn header_pointing_into_signature_is_rejected() {
	let mut bytes = sample_cache();
	bytes[28..32].copy_from_slice(&8u32.to_le_bytes());
	let result = Reader::from_reader(Cursor::new(bytes));
	assert!(matches!(
		result,
		Err(PfFileError::OffsetOutOfRange {
			offset: 8,
			..
		})
	));
}
