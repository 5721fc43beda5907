//! Interface to glyph rasterization backends.
//!
//! The cache never rasterizes anything itself. A [`Rasterizer`] turns a character
//! code into a coverage bitmap in the 65-level domain (`0..=64`) plus its metrics.
//! Backends producing 8-bit coverage can be wrapped in [`Quantized`].

use std::collections::{BTreeMap, HashMap};

use super::constants::MAX_COVERAGE;
use super::record::GlyphMetrics;

/// A rasterized glyph as handed to the builder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct RasterizedGlyph {
	/// Glyph geometry
	pub metrics: GlyphMetrics,
	/// Row-major coverage, `width * height` bytes
	pub coverage: Vec<u8>,
}

impl RasterizedGlyph {
	/// Creates a glyph from metrics and coverage.
	pub fn new(metrics: GlyphMetrics, coverage: Vec<u8>) -> Self {
		Self {
			metrics,
			coverage,
		}
	}

	/// Creates a glyph without pixels that only advances the pen.
	pub fn blank(advance: i16) -> Self {
		Self {
			metrics: GlyphMetrics {
				advance_x: advance,
				advance,
				..GlyphMetrics::default()
			},
			coverage: Vec::new(),
		}
	}

	/// Builds a glyph from the alpha channel of a 32-bit pixel buffer.
	///
	/// `pixels` holds `source_height` rows of `pitch` bytes, four bytes per pixel with
	/// alpha in the last byte. The copy is clipped to the smaller of the source size
	/// and the metrics' bounding box; uncovered pixels stay `0`. Alpha is scaled to
	/// the 65-level domain.
	pub fn from_alpha_plane(
		metrics: GlyphMetrics,
		pixels: &[u8],
		source_width: usize,
		source_height: usize,
		pitch: usize,
	) -> Self {
		let width = usize::from(metrics.width);
		let height = usize::from(metrics.height);
		let mut coverage = vec![0u8; width * height];

		let copy_width = source_width.min(width);
		let copy_height = source_height.min(height);
		for y in 0..copy_height {
			for x in 0..copy_width {
				let alpha = pixels.get(y * pitch + x * 4 + 3).copied().unwrap_or(0);
				coverage[y * width + x] = quantize_coverage(alpha);
			}
		}

		Self {
			metrics,
			coverage,
		}
	}
}

/// Maps 8-bit coverage (`0..=255`) onto the 65-level domain (`0..=64`).
pub fn quantize_coverage(value: u8) -> u8 {
	(u32::from(value) * u32::from(MAX_COVERAGE) / 255) as u8
}

/// Source of rasterized glyphs for the builder.
pub trait Rasterizer {
	/// Rasterizes `code`, or returns `None` if the backend has no glyph for it.
	fn rasterize(&mut self, code: u16) -> Option<RasterizedGlyph>;
}

impl<F> Rasterizer for F
where
	F: FnMut(u16) -> Option<RasterizedGlyph>,
{
	fn rasterize(&mut self, code: u16) -> Option<RasterizedGlyph> {
		self(code)
	}
}

impl Rasterizer for BTreeMap<u16, RasterizedGlyph> {
	fn rasterize(&mut self, code: u16) -> Option<RasterizedGlyph> {
		self.get(&code).cloned()
	}
}

impl<S: std::hash::BuildHasher> Rasterizer for HashMap<u16, RasterizedGlyph, S> {
	fn rasterize(&mut self, code: u16) -> Option<RasterizedGlyph> {
		self.get(&code).cloned()
	}
}

/// Adapter for backends that produce 8-bit (`0..=255`) coverage.
#[derive(Debug, Clone)]
pub struct Quantized<R>(pub R);

impl<R: Rasterizer> Rasterizer for Quantized<R> {
	fn rasterize(&mut self, code: u16) -> Option<RasterizedGlyph> {
		let mut glyph = self.0.rasterize(code)?;
		for value in &mut glyph.coverage {
			*value = quantize_coverage(*value);
		}
		Some(glyph)
	}
}
