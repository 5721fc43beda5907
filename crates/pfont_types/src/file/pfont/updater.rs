//! In-place metric updates.
//!
//! Only origin and advance fields can change. Bitmaps, the code index and the file
//! length stay as they are; each changed glyph costs one 20-byte record write.

use std::fs::{File as FsFile, OpenOptions};
use std::io::{Read, Seek, Write};
use std::path::Path;

use log::{debug, info};

use crate::file::PfFileError;

use super::record::{GlyphMetrics, GlyphRecord};
use super::stream::{CacheStream, Header};

/// Rewrites glyph metrics of an existing cache.
///
/// # Examples
///
/// ```no_run
/// use pfont_types::file::pfont::Updater;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut updater = Updater::open("font.tft")?;
///
/// // Widen every glyph's advance by one pixel
/// let changed = updater.update(|_code, metrics| {
///     let mut metrics = *metrics;
///     metrics.advance += 1;
///     Some(metrics)
/// })?;
/// println!("{changed} records rewritten");
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Updater<S> {
	stream: CacheStream<S>,
	header: Header,
	codes: Vec<u16>,
	file_size: u64,
}

impl<S: Read + Write + Seek> Updater<S> {
	/// Opens a cache for updating from a readable and writable stream.
	///
	/// # Errors
	///
	/// Same as [`Reader::from_reader`](super::Reader::from_reader).
	pub fn from_stream(inner: S) -> Result<Self, PfFileError> {
		let mut stream = CacheStream::open(inner)?;
		let header = stream.read_header()?;
		let file_size = stream.len()?;
		header.validate(file_size)?;
		let codes = stream.read_codes(header.code_index_offset, header.count())?;

		Ok(Self {
			stream,
			header,
			codes,
			file_size,
		})
	}

	/// Returns the parsed header.
	pub fn header(&self) -> &Header {
		&self.header
	}

	/// Returns the character codes in storage order.
	pub fn codes(&self) -> &[u16] {
		&self.codes
	}

	/// Visits every glyph in storage order and rewrites the ones `callback` changes.
	///
	/// `callback` receives the code and the current metrics and returns the new
	/// metrics, or `None` to leave the glyph alone. Returns the number of records
	/// rewritten.
	///
	/// # Errors
	///
	/// - [`PfFileError::BoundingBoxChanged`] if the callback returns a different width
	///   or height. Records rewritten before the failing glyph keep their new values;
	///   the failing record is not touched.
	/// - [`PfFileError::SizeChanged`] if the stream length differs once writes are flushed
	pub fn update<F>(&mut self, mut callback: F) -> Result<usize, PfFileError>
	where
		F: FnMut(u16, &GlyphMetrics) -> Option<GlyphMetrics>,
	{
		let mut rewritten = 0;
		for index in 0..self.header.count() {
			let code = self.codes[index];
			let position = self.header.record_position(index);

			self.stream.seek(position)?;
			let mut record = GlyphRecord::read_from(&mut self.stream)?;

			let Some(updated) = callback(code, &record.metrics) else {
				continue;
			};
			if updated == record.metrics {
				continue;
			}

			if let Err(e) = self.rewrite(position, &mut record, code, &updated) {
				// Keep what was already written on disk
				self.stream.flush()?;
				return Err(e);
			}
			rewritten += 1;
		}

		self.finish()?;
		info!("Updated metrics of {rewritten} glyphs");
		Ok(rewritten)
	}

	/// Replaces the metrics of every glyph with code `code`.
	///
	/// Returns the number of records rewritten, `0` if the code is not in the cache.
	pub fn update_glyph(&mut self, code: u16, metrics: &GlyphMetrics) -> Result<usize, PfFileError> {
		self.update(|c, _| (c == code).then_some(*metrics))
	}

	/// Flushes pending writes and returns the underlying stream.
	pub fn into_inner(mut self) -> Result<S, PfFileError> {
		self.stream.flush()?;
		Ok(self.stream.into_inner())
	}

	fn rewrite(
		&mut self,
		position: u64,
		record: &mut GlyphRecord,
		code: u16,
		updated: &GlyphMetrics,
	) -> Result<(), PfFileError> {
		record.apply_update(code, updated)?;
		self.stream.seek(position)?;
		record.write_to(&mut self.stream)?;
		debug!("Glyph 0x{code:04X}: {}", record.metrics);
		Ok(())
	}

	fn finish(&mut self) -> Result<(), PfFileError> {
		self.stream.flush()?;
		let size = self.stream.len()?;
		if size != self.file_size {
			return Err(PfFileError::SizeChanged {
				expected: self.file_size,
				actual: size,
			});
		}
		Ok(())
	}
}

impl Updater<FsFile> {
	/// Opens the cache file at `path` for reading and writing
	pub fn open(path: impl AsRef<Path>) -> Result<Self, PfFileError> {
		let file = OpenOptions::new().read(true).write(true).open(path)?;
		Self::from_stream(file)
	}
}
