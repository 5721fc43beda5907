//! Iterators over glyph caches.

use std::io::{Read, Seek};

use crate::file::PfFileError;

use super::glyph::Glyph;
use super::reader::Reader;
use super::record::GlyphRecord;

/// Iterator over metadata records
///
/// Yields `(code, record)` pairs in storage order without touching the bitmaps.
pub struct RecordIter<'a, R> {
	pub(super) reader: &'a mut Reader<R>,
	pub(super) current: usize,
}

impl<R: Read + Seek> Iterator for RecordIter<'_, R> {
	type Item = Result<(u16, GlyphRecord), PfFileError>;

	fn next(&mut self) -> Option<Self::Item> {
		if self.current >= self.reader.glyph_count() {
			return None;
		}

		let index = self.current;
		self.current += 1;
		let code = self.reader.codes[index];
		Some(self.reader.record(index).map(|record| (code, record)))
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		let remaining = self.reader.glyph_count().saturating_sub(self.current);
		(remaining, Some(remaining))
	}
}

/// Iterator over decoded glyphs
///
/// Each call to `next()` reads one record and decodes one bitmap. A glyph that fails
/// to decode yields an error and the iterator moves on to the next one.
pub struct GlyphIter<'a, R> {
	pub(super) reader: &'a mut Reader<R>,
	pub(super) current: usize,
}

impl<R: Read + Seek> Iterator for GlyphIter<'_, R> {
	type Item = Result<Glyph, PfFileError>;

	fn next(&mut self) -> Option<Self::Item> {
		if self.current >= self.reader.glyph_count() {
			return None;
		}

		let index = self.current;
		self.current += 1;
		Some(self.reader.glyph(index))
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		let remaining = self.reader.glyph_count().saturating_sub(self.current);
		(remaining, Some(remaining))
	}
}
