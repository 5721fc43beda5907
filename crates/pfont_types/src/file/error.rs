//! Error types for glyph cache parsing and manipulation.

use thiserror::Error;

/// Errors that can occur when building, reading or updating a glyph cache file
#[derive(Debug, Error)]
pub enum PfFileError {
	/// The file does not start with the pre-rendered font signature
	#[error("Invalid magic signature: {actual:02X?}")]
	InvalidMagic {
		/// Bytes found where the signature was expected
		actual: Vec<u8>,
	},

	/// Not enough data to parse a structure
	#[error("Insufficient data for {what}: expected {expected} bytes, got {actual} bytes")]
	InsufficientData {
		/// Which structure was being read
		what: &'static str,
		/// Expected number of bytes
		expected: u64,
		/// Actual number of bytes
		actual: u64,
	},

	/// The header declares zero glyphs
	#[error("Cache file contains no glyphs")]
	EmptyCache,

	/// A build was requested with no character codes
	#[error("Cannot build a cache from an empty character set")]
	EmptyGlyphSet,

	/// An offset stored in the file points outside of it
	#[error("{what} offset 0x{offset:08X} is out of range (file size: {file_size} bytes)")]
	OffsetOutOfRange {
		/// Which offset was invalid
		what: &'static str,
		/// The offending offset
		offset: u64,
		/// Total size of the file
		file_size: u64,
	},

	/// The stream grew past what a 32-bit offset can address
	#[error("Stream position {position} does not fit in a 32-bit offset")]
	PositionOverflow {
		/// Position that overflowed
		position: u64,
	},

	/// The rasterizer could not produce a glyph
	#[error("No glyph available for character code 0x{code:04X}")]
	MissingGlyph {
		/// Character code that failed to rasterize
		code: u16,
	},

	/// A glyph index past the end of the cache
	#[error("Glyph index {index} out of range (cache holds {count} glyphs)")]
	IndexOutOfRange {
		/// Requested index
		index: usize,
		/// Number of glyphs in the cache
		count: usize,
	},

	/// A coverage byte lies outside the 65-level alphabet
	#[error("Coverage value {value} at index {index} exceeds 64")]
	CoverageOutOfRange {
		/// Position of the value in the bitmap
		index: usize,
		/// The offending value
		value: u8,
	},

	/// The rasterizer produced coverage above 64 and the build policy rejects it
	#[error("Glyph for character code 0x{code:04X} has coverage value {value} at index {index}, above 64")]
	RejectedCoverage {
		/// Character code of the glyph
		code: u16,
		/// Position of the value in the bitmap
		index: usize,
		/// The offending value
		value: u8,
	},

	/// Bitmap byte count does not match the bounding box
	#[error(
		"Bitmap for character code 0x{code:04X} has {actual} bytes, bounding box {width}x{height} requires {expected}"
	)]
	BitmapSizeMismatch {
		/// Character code of the glyph
		code: u16,
		/// Bounding box width
		width: u16,
		/// Bounding box height
		height: u16,
		/// Required byte count
		expected: usize,
		/// Supplied byte count
		actual: usize,
	},

	/// An update tried to resize a glyph whose bitmap is already stored
	#[error(
		"Bounding box of character code 0x{code:04X} cannot change: stored {expected:?}, requested {actual:?}"
	)]
	BoundingBoxChanged {
		/// Character code of the glyph
		code: u16,
		/// Stored (width, height)
		expected: (u16, u16),
		/// Requested (width, height)
		actual: (u16, u16),
	},

	/// The compressed bitmap ended before `width * height` bytes were produced
	#[error("Compressed bitmap at 0x{offset:08X} is truncated: decoded {decoded} of {expected} bytes")]
	TruncatedBitmap {
		/// Start of the compressed block
		offset: u32,
		/// Bytes decoded before the stream ended
		decoded: usize,
		/// Bytes the bounding box requires
		expected: usize,
	},

	/// A bounding box exceeds the decode limit or what the file can still encode
	#[error("Bitmap of {size} bytes exceeds the limit of {limit} bytes")]
	BitmapTooLarge {
		/// Requested bitmap size
		size: usize,
		/// Configured or data-derived limit
		limit: usize,
	},

	/// The stream length changed while records were rewritten in place
	#[error("Cache size changed during update: was {expected} bytes, now {actual} bytes")]
	SizeChanged {
		/// Length before the update
		expected: u64,
		/// Length after the update
		actual: u64,
	},

	/// IO error
	#[error(transparent)]
	IOError(#[from] std::io::Error),
}

impl PfFileError {
	/// Shorthand for [`PfFileError::InsufficientData`]
	pub fn insufficient_data(what: &'static str, expected: u64, actual: u64) -> Self {
		Self::InsufficientData {
			what,
			expected,
			actual,
		}
	}

	/// Shorthand for [`PfFileError::OffsetOutOfRange`]
	pub fn offset_out_of_range(what: &'static str, offset: u64, file_size: u64) -> Self {
		Self::OffsetOutOfRange {
			what,
			offset,
			file_size,
		}
	}

	/// Returns `true` for errors caused by a malformed or foreign file rather than
	/// by the caller or the underlying stream.
	pub fn is_format_error(&self) -> bool {
		matches!(
			self,
			Self::InvalidMagic { .. }
				| Self::InsufficientData { .. }
				| Self::EmptyCache
				| Self::OffsetOutOfRange { .. }
				| Self::TruncatedBitmap { .. }
				| Self::BitmapTooLarge { .. }
		)
	}
}
