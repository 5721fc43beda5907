//! Read access to glyph caches.
//!
//! Opening a cache reads the signature, the header and the code index. Metadata
//! records and bitmaps are only read when asked for, so opening a large cache is
//! cheap and decoding a single glyph touches one record and one block.

use std::fs::File as FsFile;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use log::{debug, warn};

use crate::file::PfFileError;

use super::config::ReadConfig;
use super::constants::{HEADER_SIZE, MAX_VALUES_PER_BYTE};
use super::glyph::Glyph;
use super::iterator::{GlyphIter, RecordIter};
use super::record::GlyphRecord;
use super::stream::{CacheStream, Header};

/// Reader for glyph cache files
#[derive(Debug)]
pub struct Reader<R> {
	/// Underlying cache stream
	pub(super) stream: CacheStream<R>,

	/// Parsed header
	pub(super) header: Header,

	/// Code index, in storage order
	pub(super) codes: Vec<u16>,

	/// Whether `codes` is ascending, which enables binary search
	sorted: bool,

	/// Total file length, fixed at open time
	file_size: u64,

	/// Read limits
	config: ReadConfig,
}

impl<R: Read + Seek> Reader<R> {
	/// Opens a cache from the given reader with the default configuration.
	pub fn from_reader(reader: R) -> Result<Self, PfFileError> {
		Self::with_config(reader, ReadConfig::default())
	}

	/// Opens a cache from the given reader with a custom configuration.
	///
	/// # Errors
	///
	/// - [`PfFileError::InvalidMagic`] if the signature does not match
	/// - [`PfFileError::EmptyCache`] if the header declares no glyphs
	/// - [`PfFileError::OffsetOutOfRange`] or [`PfFileError::InsufficientData`] if an
	///   index does not fit in the file
	pub fn with_config(reader: R, config: ReadConfig) -> Result<Self, PfFileError> {
		let mut stream = CacheStream::open(reader)?;
		let header = stream.read_header()?;
		let file_size = stream.len()?;
		header.validate(file_size)?;

		let codes = stream.read_codes(header.code_index_offset, header.count())?;
		let sorted = codes.is_sorted();
		if !sorted {
			debug!("Code index is not ascending; lookups fall back to a linear scan");
		}

		debug!("Opened glyph cache: {header}, {file_size} bytes");

		Ok(Self {
			stream,
			header,
			codes,
			sorted,
			file_size,
			config,
		})
	}

	/// Returns the parsed header.
	pub fn header(&self) -> &Header {
		&self.header
	}

	/// Returns the number of glyphs in the cache.
	pub fn glyph_count(&self) -> usize {
		self.header.count()
	}

	/// Returns the character codes in storage order.
	pub fn codes(&self) -> &[u16] {
		&self.codes
	}

	/// Returns the read configuration.
	pub fn config(&self) -> &ReadConfig {
		&self.config
	}

	/// Returns the file length seen when the cache was opened.
	pub fn file_size(&self) -> u64 {
		self.file_size
	}

	/// Returns the index of `code`, if present.
	///
	/// With duplicate codes any matching index may be returned.
	pub fn position(&self, code: u16) -> Option<usize> {
		if self.sorted {
			self.codes.binary_search(&code).ok()
		} else {
			self.codes.iter().position(|&c| c == code)
		}
	}

	/// Checks if the cache contains a glyph for `code`.
	pub fn contains(&self, code: u16) -> bool {
		self.position(code).is_some()
	}

	/// Reads the metadata record at `index`.
	///
	/// # Errors
	///
	/// [`PfFileError::IndexOutOfRange`] if `index` is past the last glyph.
	pub fn record(&mut self, index: usize) -> Result<GlyphRecord, PfFileError> {
		if index >= self.glyph_count() {
			return Err(PfFileError::IndexOutOfRange {
				index,
				count: self.glyph_count(),
			});
		}

		self.stream.seek(self.header.record_position(index))?;
		GlyphRecord::read_from(&mut self.stream)
	}

	/// Reads the whole metadata index in one go.
	pub fn read_records(&mut self) -> Result<Vec<GlyphRecord>, PfFileError> {
		self.stream.seek(u64::from(self.header.metadata_index_offset))?;
		let mut buffer = vec![0u8; self.glyph_count() * GlyphRecord::SIZE];
		self.stream.read_bytes(&mut buffer, "metadata index")?;
		buffer.chunks_exact(GlyphRecord::SIZE).map(GlyphRecord::from_bytes).collect()
	}

	/// Decodes the bitmap described by `record`.
	///
	/// # Errors
	///
	/// - [`PfFileError::BitmapTooLarge`] if the bounding box exceeds the configured limit,
	///   or, with verified offsets, more than the rest of the file could encode
	/// - [`PfFileError::OffsetOutOfRange`] if offsets are verified and the bitmap lies
	///   outside the data region
	/// - [`PfFileError::TruncatedBitmap`] if the file ends inside the block
	pub fn decode_bitmap(&mut self, code: u16, record: &GlyphRecord) -> Result<Vec<u8>, PfFileError> {
		let size = record.metrics.area();
		if size > self.config.max_bitmap_bytes {
			return Err(PfFileError::BitmapTooLarge {
				size,
				limit: self.config.max_bitmap_bytes,
			});
		}

		if self.config.verify_offsets {
			self.verify_offset(record)?;
			self.verify_size(record)?;
		}

		let decoded = record.read_bitmap(&mut self.stream)?;
		if decoded.clamped {
			warn!(
				"Glyph 0x{:04X}: malformed run in bitmap at offset {}, output was clamped",
				code, record.bitmap_offset
			);
		}

		Ok(decoded.coverage)
	}

	/// Reads and decodes the glyph at `index`.
	pub fn glyph(&mut self, index: usize) -> Result<Glyph, PfFileError> {
		let record = self.record(index)?;
		let code = self.codes[index];
		let coverage = self.decode_bitmap(code, &record)?;
		Ok(Glyph::new(code, record.metrics, coverage))
	}

	/// Looks up `code` and decodes its glyph.
	///
	/// Returns `Ok(None)` if the cache has no glyph for `code`.
	pub fn find(&mut self, code: u16) -> Result<Option<Glyph>, PfFileError> {
		match self.position(code) {
			Some(index) => self.glyph(index).map(Some),
			None => Ok(None),
		}
	}

	/// Decodes every glyph in storage order and hands it to `callback`.
	///
	/// Stops at the first error. Returns the number of glyphs delivered.
	pub fn load<F>(&mut self, mut callback: F) -> Result<usize, PfFileError>
	where
		F: FnMut(Glyph),
	{
		let records = self.read_records()?;
		for (index, record) in records.iter().enumerate() {
			let code = self.codes[index];
			let coverage = self.decode_bitmap(code, record)?;
			callback(Glyph::new(code, record.metrics, coverage));
		}

		debug!("Loaded {} glyphs", records.len());
		Ok(records.len())
	}

	/// Returns an iterator over `(code, record)` pairs without decoding bitmaps.
	pub fn iter_records(&mut self) -> RecordIter<'_, R> {
		RecordIter {
			reader: self,
			current: 0,
		}
	}

	/// Returns an iterator that decodes glyphs on demand.
	///
	/// # Examples
	///
	/// ```no_run
	/// use pfont_types::file::pfont::Reader;
	///
	/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
	/// let mut reader = Reader::open("font.tft")?;
	///
	/// for glyph in reader.iter_glyphs() {
	///     let glyph = glyph?;
	///     println!("{glyph}");
	/// }
	/// # Ok(())
	/// # }
	/// ```
	pub fn iter_glyphs(&mut self) -> GlyphIter<'_, R> {
		GlyphIter {
			reader: self,
			current: 0,
		}
	}

	/// Consumes the reader, returning the underlying stream.
	pub fn into_inner(self) -> R {
		self.stream.into_inner()
	}

	fn verify_offset(&self, record: &GlyphRecord) -> Result<(), PfFileError> {
		let offset = u64::from(record.bitmap_offset);
		let in_range = if record.metrics.is_blank() {
			offset <= self.file_size
		} else {
			offset >= HEADER_SIZE as u64 && offset < self.file_size
		};

		if !in_range {
			return Err(PfFileError::offset_out_of_range("bitmap", offset, self.file_size));
		}
		Ok(())
	}

	/// Bounds the allocation by the bytes left between the bitmap and the end of file.
	fn verify_size(&self, record: &GlyphRecord) -> Result<(), PfFileError> {
		let size = record.metrics.area();
		if size == 0 {
			return Ok(());
		}

		let available = self.file_size.saturating_sub(u64::from(record.bitmap_offset));
		let limit = usize::try_from(available).unwrap_or(usize::MAX).saturating_mul(MAX_VALUES_PER_BYTE);
		if size > limit {
			return Err(PfFileError::BitmapTooLarge {
				size,
				limit,
			});
		}
		Ok(())
	}
}

impl Reader<BufReader<FsFile>> {
	/// Opens a cache file from the given path
	pub fn open(path: impl AsRef<Path>) -> Result<Self, PfFileError> {
		Self::open_with_config(path, ReadConfig::default())
	}

	/// Opens a cache file from the given path with a custom configuration
	pub fn open_with_config(path: impl AsRef<Path>, config: ReadConfig) -> Result<Self, PfFileError> {
		let file = FsFile::open(path)?;
		Self::with_config(BufReader::new(file), config)
	}
}
