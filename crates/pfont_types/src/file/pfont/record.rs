//! Glyph metadata records and their compressed bitmaps.

use std::fmt::Display;
use std::io::{Read, Seek, Write};

use serde::{Deserialize, Serialize};

use crate::file::PfFileError;

use super::codec::{self, Decoded};
use super::constants::RECORD_SIZE;
use super::stream::CacheStream;

/// Geometry of one glyph: bounding box, origin and pen advance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GlyphMetrics {
	/// Bitmap width in pixels
	pub width: u16,
	/// Bitmap height in pixels
	pub height: u16,
	/// Horizontal offset from the pen position to the bitmap's left edge
	pub origin_x: i16,
	/// Vertical offset from the pen position to the bitmap's top edge
	pub origin_y: i16,
	/// Horizontal pen advance
	pub advance_x: i16,
	/// Vertical pen advance
	pub advance_y: i16,
	/// Cell advance used for text extent
	pub advance: i16,
}

impl Display for GlyphMetrics {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(
			f,
			"{}x{} origin ({}, {}) advance ({}, {}) cell {}",
			self.width,
			self.height,
			self.origin_x,
			self.origin_y,
			self.advance_x,
			self.advance_y,
			self.advance
		)
	}
}

impl GlyphMetrics {
	/// Number of coverage bytes the bounding box holds.
	pub fn area(&self) -> usize {
		usize::from(self.width) * usize::from(self.height)
	}

	/// Bounding box as `(width, height)`.
	pub fn bounding_box(&self) -> (u16, u16) {
		(self.width, self.height)
	}

	/// Returns `true` for glyphs without pixels (e.g. a space).
	pub fn is_blank(&self) -> bool {
		self.area() == 0
	}
}

/// One entry of the metadata index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct GlyphRecord {
	/// Absolute offset of the compressed bitmap
	pub bitmap_offset: u32,
	/// Glyph geometry
	pub metrics: GlyphMetrics,
}

impl GlyphRecord {
	/// Size of a serialized record in bytes
	pub const SIZE: usize = RECORD_SIZE;

	/// Creates a record for a bitmap stored at `bitmap_offset`.
	pub fn new(bitmap_offset: u32, metrics: GlyphMetrics) -> Self {
		Self {
			bitmap_offset,
			metrics,
		}
	}

	/// Parses a record; the two trailing reserved bytes are ignored.
	pub fn from_bytes(data: &[u8]) -> Result<Self, PfFileError> {
		if data.len() < RECORD_SIZE {
			return Err(PfFileError::insufficient_data(
				"metadata record",
				RECORD_SIZE as u64,
				data.len() as u64,
			));
		}

		let u16_at = |at: usize| u16::from_le_bytes([data[at], data[at + 1]]);
		let i16_at = |at: usize| i16::from_le_bytes([data[at], data[at + 1]]);

		Ok(Self {
			bitmap_offset: u32::from_le_bytes([data[0], data[1], data[2], data[3]]),
			metrics: GlyphMetrics {
				width: u16_at(4),
				height: u16_at(6),
				origin_x: i16_at(8),
				origin_y: i16_at(10),
				advance_x: i16_at(12),
				advance_y: i16_at(14),
				advance: i16_at(16),
			},
		})
	}

	/// Serializes the record, zeroing the reserved bytes.
	pub fn to_bytes(&self) -> [u8; RECORD_SIZE] {
		let m = &self.metrics;
		let mut buffer = [0u8; RECORD_SIZE];
		buffer[0..4].copy_from_slice(&self.bitmap_offset.to_le_bytes());
		buffer[4..6].copy_from_slice(&m.width.to_le_bytes());
		buffer[6..8].copy_from_slice(&m.height.to_le_bytes());
		buffer[8..10].copy_from_slice(&m.origin_x.to_le_bytes());
		buffer[10..12].copy_from_slice(&m.origin_y.to_le_bytes());
		buffer[12..14].copy_from_slice(&m.advance_x.to_le_bytes());
		buffer[14..16].copy_from_slice(&m.advance_y.to_le_bytes());
		buffer[16..18].copy_from_slice(&m.advance.to_le_bytes());
		buffer
	}

	/// Reads a record at the current stream position.
	pub fn read_from<S: Read + Seek>(stream: &mut CacheStream<S>) -> Result<Self, PfFileError> {
		let mut buffer = [0u8; RECORD_SIZE];
		stream.read_bytes(&mut buffer, "metadata record")?;
		Self::from_bytes(&buffer)
	}

	/// Writes the record at the current stream position.
	pub fn write_to<S: Write + Seek>(&self, stream: &mut CacheStream<S>) -> Result<(), PfFileError> {
		stream.write_bytes(&self.to_bytes())
	}

	/// Compresses `coverage` at the current position and returns the record pointing
	/// at it.
	///
	/// Blank glyphs write nothing; their offset is still the current position.
	///
	/// # Errors
	///
	/// - [`PfFileError::BitmapSizeMismatch`] if `coverage` does not match the bounding box
	/// - [`PfFileError::CoverageOutOfRange`] if a value is above 64
	pub fn write_bitmap<S: Write + Seek>(
		stream: &mut CacheStream<S>,
		code: u16,
		metrics: GlyphMetrics,
		coverage: &[u8],
	) -> Result<Self, PfFileError> {
		if coverage.len() != metrics.area() {
			return Err(PfFileError::BitmapSizeMismatch {
				code,
				width: metrics.width,
				height: metrics.height,
				expected: metrics.area(),
				actual: coverage.len(),
			});
		}

		let bitmap_offset = stream.position()?;
		if !metrics.is_blank() {
			let packed = codec::encode(coverage)?;
			stream.write_bytes(&packed)?;
		}

		Ok(Self::new(bitmap_offset, metrics))
	}

	/// Seeks to the bitmap and decodes exactly `width * height` values.
	///
	/// # Errors
	///
	/// [`PfFileError::TruncatedBitmap`] if the file ends before the block is complete.
	pub fn read_bitmap<S: Read + Seek>(
		&self,
		stream: &mut CacheStream<S>,
	) -> Result<Decoded, PfFileError> {
		let expected = self.metrics.area();
		if expected == 0 {
			return Ok(codec::decode(&[], 0));
		}

		stream.seek(u64::from(self.bitmap_offset))?;
		let decoded = codec::decode_from(stream, expected)?;
		if !decoded.is_complete() {
			return Err(PfFileError::TruncatedBitmap {
				offset: self.bitmap_offset,
				decoded: decoded.coverage.len(),
				expected,
			});
		}

		Ok(decoded)
	}

	/// Replaces origin and advance with those of `updated`.
	///
	/// # Errors
	///
	/// [`PfFileError::BoundingBoxChanged`] if `updated` has a different width or
	/// height; the record is left as it was.
	pub fn apply_update(&mut self, code: u16, updated: &GlyphMetrics) -> Result<(), PfFileError> {
		if updated.bounding_box() != self.metrics.bounding_box() {
			return Err(PfFileError::BoundingBoxChanged {
				code,
				expected: self.metrics.bounding_box(),
				actual: updated.bounding_box(),
			});
		}

		self.metrics = *updated;
		Ok(())
	}
}
