//! Cache construction.
//!
//! A cache is written in a single pass:
//!
//! 1. signature and a placeholder header slot
//! 2. one compressed bitmap per glyph, in ascending code order
//! 3. the code index (word aligned)
//! 4. the metadata index (word aligned)
//! 5. the header, backpatched with the final count and index offsets
//!
//! A build that fails midway leaves a partial file behind. Callers that need the
//! target to stay intact should build to a temporary path and rename on success.

use std::fs::File as FsFile;
use std::io::{BufWriter, Cursor, Seek, Write};
use std::path::Path;

use log::debug;

use crate::file::PfFileError;

use super::config::BuildConfig;
use super::constants::{CODE_ENTRY_SIZE, HEADER_SIZE, INDEX_ALIGNMENT};
use super::rasterizer::{RasterizedGlyph, Rasterizer};
use super::record::GlyphRecord;
use super::stream::{CacheStream, Header};

/// Writes glyph caches.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use pfont_types::file::pfont::{Builder, GlyphMetrics, RasterizedGlyph};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let metrics = GlyphMetrics { width: 2, height: 2, advance: 3, ..GlyphMetrics::default() };
/// let mut glyphs = BTreeMap::new();
/// glyphs.insert(0x41u16, RasterizedGlyph::new(metrics, vec![10; 4]));
///
/// let bytes = Builder::new().to_bytes(&[0x41], &mut glyphs)?;
/// assert_eq!(&bytes[36..38], &[0x0A, 0x43]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Builder {
	config: BuildConfig,
}

impl Builder {
	/// Creates a builder with the default configuration.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a builder with a custom configuration.
	pub fn with_config(config: BuildConfig) -> Self {
		Self {
			config,
		}
	}

	/// Returns the build configuration.
	pub fn config(&self) -> &BuildConfig {
		&self.config
	}

	/// Builds a cache for `codes` into `writer`, which should be empty.
	///
	/// Codes are sorted before rasterization. Duplicates are not removed; each
	/// occurrence is rasterized and stored.
	///
	/// # Errors
	///
	/// - [`PfFileError::EmptyGlyphSet`] if `codes` is empty
	/// - [`PfFileError::MissingGlyph`] if the rasterizer has no glyph for a code
	/// - [`PfFileError::BitmapSizeMismatch`] if a bitmap does not fit its bounding box
	/// - [`PfFileError::RejectedCoverage`] for coverage above 64 under
	///   [`CoveragePolicy::Reject`](super::CoveragePolicy::Reject)
	/// - any I/O error from `writer`
	pub fn build<W, Z>(&self, writer: W, codes: &[u16], rasterizer: &mut Z) -> Result<Header, PfFileError>
	where
		W: Write + Seek,
		Z: Rasterizer + ?Sized,
	{
		if codes.is_empty() {
			return Err(PfFileError::EmptyGlyphSet);
		}

		let mut sorted = codes.to_vec();
		sorted.sort_unstable();

		let mut stream = CacheStream::create(writer)?;

		// Data region
		let mut records = Vec::with_capacity(sorted.len());
		for &code in &sorted {
			let RasterizedGlyph {
				metrics,
				mut coverage,
			} = rasterizer.rasterize(code).ok_or(PfFileError::MissingGlyph {
				code,
			})?;

			self.config.coverage_policy.apply(code, &mut coverage)?;

			let record = GlyphRecord::write_bitmap(&mut stream, code, metrics, &coverage)?;
			records.push(record);
		}
		let data_end = stream.position()?;

		// Code index
		let code_index_offset = stream.align_to(INDEX_ALIGNMENT)?;
		let mut code_bytes = Vec::with_capacity(sorted.len() * CODE_ENTRY_SIZE);
		for code in &sorted {
			code_bytes.extend_from_slice(&code.to_le_bytes());
		}
		stream.write_bytes(&code_bytes)?;

		// Metadata index
		let metadata_index_offset = stream.align_to(INDEX_ALIGNMENT)?;
		for record in &records {
			record.write_to(&mut stream)?;
		}

		let glyph_count = u32::try_from(sorted.len()).map_err(|_| PfFileError::PositionOverflow {
			position: sorted.len() as u64,
		})?;
		let header = Header {
			glyph_count,
			code_index_offset,
			metadata_index_offset,
		};
		stream.write_header(&header)?;
		stream.flush()?;

		debug!(
			"Built glyph cache: {} glyphs, {} bytes of bitmap data, {} bytes total",
			glyph_count,
			data_end as usize - HEADER_SIZE,
			header.metadata_index_end()
		);

		Ok(header)
	}

	/// Builds a cache in memory and returns its bytes.
	pub fn to_bytes<Z>(&self, codes: &[u16], rasterizer: &mut Z) -> Result<Vec<u8>, PfFileError>
	where
		Z: Rasterizer + ?Sized,
	{
		let mut cursor = Cursor::new(Vec::new());
		self.build(&mut cursor, codes, rasterizer)?;
		Ok(cursor.into_inner())
	}

	/// Creates (or truncates) the file at `path` and builds a cache into it.
	pub fn build_to_file<Z>(
		&self,
		path: impl AsRef<Path>,
		codes: &[u16],
		rasterizer: &mut Z,
	) -> Result<Header, PfFileError>
	where
		Z: Rasterizer + ?Sized,
	{
		let file = FsFile::create(path)?;
		self.build(BufWriter::new(file), codes, rasterizer)
	}
}
