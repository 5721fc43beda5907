//! Build, read and update caches in memory

use std::collections::BTreeMap;
use std::io::Cursor;

use pfont_rs::pfont_types::file::pfont::{
	Builder, BuildConfig, GlyphMetrics, Quantized, RasterizedGlyph, Reader, Updater,
};

use crate::ramp_glyph;

#[test_log::test]
fn uniform_glyphs_have_documented_layout() {
	let mut glyphs = BTreeMap::new();
	for code in [65u16, 66, 67] {
		let metrics = GlyphMetrics {
			width: 2,
			height: 2,
			..GlyphMetrics::default()
		};
		glyphs.insert(code, RasterizedGlyph::new(metrics, vec![10; 4]));
	}

	let bytes = Builder::new().to_bytes(&[65, 66, 67], &mut glyphs).unwrap();
	assert_eq!(bytes.len(), 112);
	assert_eq!(&bytes[36..42], &[0x0A, 0x43, 0x0A, 0x43, 0x0A, 0x43]);
	assert_eq!(u32::from_le_bytes(bytes[24..28].try_into().unwrap()), 3);
	assert_eq!(u32::from_le_bytes(bytes[28..32].try_into().unwrap()), 44);
	assert_eq!(u32::from_le_bytes(bytes[32..36].try_into().unwrap()), 52);

	let mut reader = Reader::from_reader(Cursor::new(bytes)).unwrap();
	let mut delivered = Vec::new();
	reader.load(|glyph| delivered.push((glyph.code(), glyph.into_coverage()))).unwrap();
	assert_eq!(
		delivered,
		vec![(65, vec![10; 4]), (66, vec![10; 4]), (67, vec![10; 4])]
	);
}

#[test_log::test]
fn unsorted_codes_are_stored_sorted() {
	let mut glyphs: BTreeMap<u16, RasterizedGlyph> =
		[0x3042u16, 0x41, 0xFF01, 0x20].iter().map(|&c| (c, ramp_glyph(5, 3))).collect();

	let bytes = Builder::new().to_bytes(&[0xFF01, 0x3042, 0x20, 0x41], &mut glyphs).unwrap();
	let reader = Reader::from_reader(Cursor::new(bytes)).unwrap();
	assert_eq!(reader.codes(), &[0x20, 0x41, 0x3042, 0xFF01]);
}

#[test_log::test]
fn eight_bit_backend_is_quantized() {
	let metrics = GlyphMetrics {
		width: 4,
		height: 1,
		..GlyphMetrics::default()
	};
	let mut backend = Quantized(|_code: u16| Some(RasterizedGlyph::new(metrics, vec![0, 64, 128, 255])));

	let bytes = Builder::with_config(BuildConfig::strict()).to_bytes(&[1], &mut backend).unwrap();
	let mut reader = Reader::from_reader(Cursor::new(bytes)).unwrap();
	let glyph = reader.find(1).unwrap().unwrap();
	assert_eq!(glyph.coverage(), &[0, 16, 32, 64]);
}

#[test_log::test]
fn update_then_read_keeps_bitmaps() {
	let mut glyphs: BTreeMap<u16, RasterizedGlyph> =
		(0x30u16..0x3A).map(|c| (c, ramp_glyph(c - 0x2C, 7))).collect();
	let codes: Vec<u16> = glyphs.keys().copied().collect();
	let bytes = Builder::new().to_bytes(&codes, &mut glyphs).unwrap();
	let length = bytes.len();

	let mut updater = Updater::from_stream(Cursor::new(bytes)).unwrap();
	let changed = updater
		.update(|code, metrics| {
			(code % 2 == 0).then_some(GlyphMetrics {
				advance: metrics.advance + 2,
				origin_x: -1,
				..*metrics
			})
		})
		.unwrap();
	assert_eq!(changed, 5);

	let cursor = updater.into_inner().unwrap();
	assert_eq!(cursor.get_ref().len(), length);

	let mut reader = Reader::from_reader(cursor).unwrap();
	for glyph in reader.iter_glyphs() {
		let glyph = glyph.unwrap();
		let source = &glyphs[&glyph.code()];
		assert_eq!(glyph.coverage(), source.coverage.as_slice());
		let expected_advance = if glyph.code() % 2 == 0 {
			source.metrics.advance + 2
		} else {
			source.metrics.advance
		};
		assert_eq!(glyph.metrics().advance, expected_advance);
		assert_eq!(glyph.metrics().bounding_box(), source.metrics.bounding_box());
	}
}
