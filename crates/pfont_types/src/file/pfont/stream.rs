//! Positional stream wrapper and header handling for cache files.

use std::fmt::Display;
use std::io::{self, Read, Seek, SeekFrom, Write};

use crate::file::PfFileError;

use super::constants::{
	CODE_ENTRY_SIZE, HEADER_FIELDS_SIZE, HEADER_PLACEHOLDER, HEADER_SIZE, MAGIC, MAGIC_SIZE,
	RECORD_SIZE,
};

/// Cache file header, stored right after the signature
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Header {
	/// Number of glyphs in the cache
	pub glyph_count: u32,
	/// Absolute offset of the character-code index
	pub code_index_offset: u32,
	/// Absolute offset of the metadata index
	pub metadata_index_offset: u32,
}

impl Display for Header {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(
			f,
			"Header:\n\
			- Glyph Count: {}\n\
			- Code Index Offset: 0x{:08X}\n\
			- Metadata Index Offset: 0x{:08X}",
			self.glyph_count, self.code_index_offset, self.metadata_index_offset
		)
	}
}

impl Header {
	/// Size of the header fields in bytes (excluding the signature)
	pub const SIZE: usize = HEADER_FIELDS_SIZE;

	/// Parses the header fields from a byte slice.
	pub fn from_bytes(data: &[u8]) -> Result<Self, PfFileError> {
		if data.len() < Self::SIZE {
			return Err(PfFileError::insufficient_data(
				"header",
				Self::SIZE as u64,
				data.len() as u64,
			));
		}

		Ok(Self {
			glyph_count: u32::from_le_bytes([data[0], data[1], data[2], data[3]]),
			code_index_offset: u32::from_le_bytes([data[4], data[5], data[6], data[7]]),
			metadata_index_offset: u32::from_le_bytes([data[8], data[9], data[10], data[11]]),
		})
	}

	/// Serializes the header fields.
	pub fn to_bytes(&self) -> [u8; HEADER_FIELDS_SIZE] {
		let mut buffer = [0u8; HEADER_FIELDS_SIZE];
		buffer[0..4].copy_from_slice(&self.glyph_count.to_le_bytes());
		buffer[4..8].copy_from_slice(&self.code_index_offset.to_le_bytes());
		buffer[8..12].copy_from_slice(&self.metadata_index_offset.to_le_bytes());
		buffer
	}

	/// Number of glyphs as a `usize`.
	pub fn count(&self) -> usize {
		self.glyph_count as usize
	}

	/// End of the code index (exclusive).
	pub fn code_index_end(&self) -> u64 {
		u64::from(self.code_index_offset) + (self.count() * CODE_ENTRY_SIZE) as u64
	}

	/// End of the metadata index (exclusive).
	pub fn metadata_index_end(&self) -> u64 {
		u64::from(self.metadata_index_offset) + (self.count() * RECORD_SIZE) as u64
	}

	/// Absolute position of the `index`-th metadata record.
	pub fn record_position(&self, index: usize) -> u64 {
		u64::from(self.metadata_index_offset) + (index * RECORD_SIZE) as u64
	}

	/// Checks that the header is usable against a file of `file_size` bytes.
	///
	/// # Errors
	///
	/// - [`PfFileError::EmptyCache`] when no glyphs are declared
	/// - [`PfFileError::OffsetOutOfRange`] when an index starts inside the header
	/// - [`PfFileError::InsufficientData`] when an index runs past the end of the file
	pub fn validate(&self, file_size: u64) -> Result<(), PfFileError> {
		if self.glyph_count == 0 {
			return Err(PfFileError::EmptyCache);
		}

		let indices = [
			("code index", self.code_index_offset, self.code_index_end()),
			("metadata index", self.metadata_index_offset, self.metadata_index_end()),
		];
		for (what, start, end) in indices {
			if u64::from(start) < HEADER_SIZE as u64 || u64::from(start) > file_size {
				return Err(PfFileError::offset_out_of_range(what, u64::from(start), file_size));
			}
			if end > file_size {
				return Err(PfFileError::insufficient_data(
					what,
					end - u64::from(start),
					file_size - u64::from(start),
				));
			}
		}

		Ok(())
	}
}

/// Wrapper around a seekable byte stream holding a cache file.
///
/// Offsets in the format are 32-bit, so every position handed out by this type is a
/// `u32`; a stream that grows beyond that is reported as
/// [`PfFileError::PositionOverflow`].
#[derive(Debug)]
pub struct CacheStream<S> {
	inner: S,
}

impl<S> CacheStream<S> {
	/// Wraps a stream without touching it.
	pub fn new(inner: S) -> Self {
		Self {
			inner,
		}
	}

	/// Returns a reference to the underlying stream.
	pub fn get_ref(&self) -> &S {
		&self.inner
	}

	/// Returns a mutable reference to the underlying stream.
	pub fn get_mut(&mut self) -> &mut S {
		&mut self.inner
	}

	/// Unwraps the underlying stream.
	pub fn into_inner(self) -> S {
		self.inner
	}
}

impl<S: Seek> CacheStream<S> {
	/// Current absolute position.
	pub fn position(&mut self) -> Result<u32, PfFileError> {
		let position = self.inner.stream_position()?;
		u32::try_from(position).map_err(|_| PfFileError::PositionOverflow {
			position,
		})
	}

	/// Moves to an absolute position.
	///
	/// The move is issued as a relative seek so buffered readers can keep their
	/// buffer when the target is already loaded.
	pub fn seek(&mut self, offset: u64) -> Result<(), PfFileError> {
		let current = self.inner.stream_position()?;
		match i64::try_from(i128::from(offset) - i128::from(current)) {
			Ok(0) => {}
			Ok(delta) => self.inner.seek_relative(delta)?,
			Err(_) => {
				self.inner.seek(SeekFrom::Start(offset))?;
			}
		}
		Ok(())
	}

	/// Total length of the stream; the current position is preserved.
	pub fn len(&mut self) -> Result<u64, PfFileError> {
		let current = self.inner.stream_position()?;
		let end = self.inner.seek(SeekFrom::End(0))?;
		if current != end {
			self.inner.seek(SeekFrom::Start(current))?;
		}
		Ok(end)
	}

	/// Returns `true` if the stream holds no bytes.
	pub fn is_empty(&mut self) -> Result<bool, PfFileError> {
		Ok(self.len()? == 0)
	}
}

impl<S: Write + Seek> CacheStream<S> {
	/// Starts a new cache: writes the signature and reserves the header slot.
	///
	/// The stream is expected to be empty or positioned at its start.
	pub fn create(inner: S) -> Result<Self, PfFileError> {
		let mut stream = Self::new(inner);
		stream.seek(0)?;
		stream.write_bytes(MAGIC)?;
		stream.write_bytes(&HEADER_PLACEHOLDER)?;
		Ok(stream)
	}

	/// Writes all of `data` at the current position.
	pub fn write_bytes(&mut self, data: &[u8]) -> Result<(), PfFileError> {
		self.inner.write_all(data)?;
		Ok(())
	}

	/// Pads with zero bytes so the position becomes a multiple of `word`, returning the
	/// new position.
	///
	/// Always writes `word - (position % word)` bytes, so an already aligned position
	/// still receives a full word of filler. Existing cache files are laid out this way.
	///
	/// # Errors
	///
	/// An [`io::ErrorKind::InvalidInput`] error if `word` is zero.
	pub fn align_to(&mut self, word: u32) -> Result<u32, PfFileError> {
		if word == 0 {
			return Err(io::Error::new(io::ErrorKind::InvalidInput, "alignment word must be non-zero").into());
		}
		let position = self.position()?;
		let padding = word - (position % word);
		self.write_bytes(&vec![0u8; padding as usize])?;
		self.position()
	}

	/// Backpatches the header slot and returns to the previous position.
	pub fn write_header(&mut self, header: &Header) -> Result<(), PfFileError> {
		let current = self.inner.stream_position()?;
		self.seek(MAGIC_SIZE as u64)?;
		self.write_bytes(&header.to_bytes())?;
		self.seek(current)?;
		Ok(())
	}

	/// Flushes buffered writes to the underlying stream.
	pub fn flush(&mut self) -> Result<(), PfFileError> {
		self.inner.flush()?;
		Ok(())
	}
}

impl<S: Read + Seek> CacheStream<S> {
	/// Opens an existing cache, validating its signature.
	///
	/// On success the stream is positioned at the header fields.
	pub fn open(inner: S) -> Result<Self, PfFileError> {
		let mut stream = Self::new(inner);
		stream.seek(0)?;

		let mut magic = [0u8; MAGIC_SIZE];
		let read = stream.read_up_to(&mut magic)?;
		if read < MAGIC_SIZE || &magic != MAGIC {
			return Err(PfFileError::InvalidMagic {
				actual: magic[..read].to_vec(),
			});
		}

		Ok(stream)
	}

	/// Fills `buf` completely from the current position.
	///
	/// # Errors
	///
	/// [`PfFileError::InsufficientData`] if the stream ends first.
	pub fn read_bytes(&mut self, buf: &mut [u8], what: &'static str) -> Result<(), PfFileError> {
		let read = self.read_up_to(buf)?;
		if read < buf.len() {
			return Err(PfFileError::insufficient_data(what, buf.len() as u64, read as u64));
		}
		Ok(())
	}

	/// Reads the header fields following the signature.
	pub fn read_header(&mut self) -> Result<Header, PfFileError> {
		self.seek(MAGIC_SIZE as u64)?;
		let mut buffer = [0u8; HEADER_FIELDS_SIZE];
		self.read_bytes(&mut buffer, "header")?;
		Header::from_bytes(&buffer)
	}

	/// Reads `count` character codes starting at `offset`.
	pub fn read_codes(&mut self, offset: u32, count: usize) -> Result<Vec<u16>, PfFileError> {
		self.seek(u64::from(offset))?;
		let mut buffer = vec![0u8; count * CODE_ENTRY_SIZE];
		self.read_bytes(&mut buffer, "code index")?;
		Ok(buffer.chunks_exact(CODE_ENTRY_SIZE).map(|c| u16::from_le_bytes([c[0], c[1]])).collect())
	}

	/// Reads into `buf` until it is full or the stream ends, returning the byte count.
	fn read_up_to(&mut self, buf: &mut [u8]) -> Result<usize, PfFileError> {
		let mut filled = 0;
		while filled < buf.len() {
			match self.inner.read(&mut buf[filled..]) {
				Ok(0) => break,
				Ok(n) => filled += n,
				Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
				Err(e) => return Err(e.into()),
			}
		}
		Ok(filled)
	}
}

impl<S: Read> Read for CacheStream<S> {
	fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
		self.inner.read(buf)
	}
}

impl<S: Seek> Seek for CacheStream<S> {
	fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
		self.inner.seek(pos)
	}

	fn stream_position(&mut self) -> io::Result<u64> {
		self.inner.stream_position()
	}

	fn seek_relative(&mut self, offset: i64) -> io::Result<()> {
		self.inner.seek_relative(offset)
	}
}
