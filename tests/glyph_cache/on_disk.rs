//! Caches written to and patched on the file system

use std::collections::BTreeMap;
use std::fs;

use pfont_rs::pfont_types::file::pfont::{Builder, GlyphMetrics, RasterizedGlyph, Reader, Updater};

use crate::{ramp_glyph, scratch_path};

#[test_log::test]
fn build_open_update_on_disk() {
	let path = scratch_path("on-disk");
	let mut glyphs: BTreeMap<u16, RasterizedGlyph> = BTreeMap::new();
	glyphs.insert(0x20, RasterizedGlyph::blank(6));
	glyphs.insert(0x41, ramp_glyph(8, 10));
	glyphs.insert(0x3042, ramp_glyph(12, 12));

	let header = Builder::new().build_to_file(&path, &[0x41, 0x3042, 0x20], &mut glyphs).unwrap();
	assert_eq!(header.glyph_count, 3);
	let length = fs::metadata(&path).unwrap().len();
	assert_eq!(length, header.metadata_index_end());

	{
		let mut updater = Updater::open(&path).unwrap();
		let metrics = GlyphMetrics {
			advance: 7,
			advance_x: 7,
			..GlyphMetrics::default()
		};
		assert_eq!(updater.update_glyph(0x20, &metrics).unwrap(), 1);
	}
	assert_eq!(fs::metadata(&path).unwrap().len(), length);

	let mut reader = Reader::open(&path).unwrap();
	assert_eq!(reader.find(0x20).unwrap().unwrap().metrics().advance, 7);
	let a = reader.find(0x41).unwrap().unwrap();
	assert_eq!(a.coverage(), glyphs[&0x41].coverage.as_slice());
	assert!(reader.find(0x42).unwrap().is_none());

	fs::remove_file(&path).unwrap();
}

#[test_log::test]
fn open_missing_file_is_io_error() {
	let path = scratch_path("does-not-exist");
	let result = Reader::open(&path);
	assert!(matches!(result, Err(pfont_rs::PfFileError::IOError(_))));
}
