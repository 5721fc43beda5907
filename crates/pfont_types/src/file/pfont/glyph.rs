//! Decoded glyph structure.

use std::fmt::Display;

use super::constants::MAX_COVERAGE;
use super::record::GlyphMetrics;

/// A glyph read back from a cache: code, metrics and decoded coverage.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Glyph {
	/// Character code
	code: u16,

	/// Glyph geometry
	metrics: GlyphMetrics,

	/// Row-major coverage values in `0..=64`, `width * height` bytes
	coverage: Vec<u8>,
}

impl Display for Glyph {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "Glyph 0x{:04X}: {}", self.code, self.metrics)
	}
}

impl Glyph {
	/// Creates a new Glyph instance.
	///
	/// # Arguments
	///
	/// * `code` - Character code.
	/// * `metrics` - Bounding box, origin and advance.
	/// * `coverage` - Decoded coverage, `width * height` bytes.
	pub fn new(code: u16, metrics: GlyphMetrics, coverage: Vec<u8>) -> Self {
		debug_assert_eq!(coverage.len(), metrics.area());
		Self {
			code,
			metrics,
			coverage,
		}
	}

	/// Returns the character code of the glyph.
	pub fn code(&self) -> u16 {
		self.code
	}

	/// Returns the glyph metrics.
	pub fn metrics(&self) -> &GlyphMetrics {
		&self.metrics
	}

	/// Returns the bitmap width in pixels.
	pub fn width(&self) -> usize {
		usize::from(self.metrics.width)
	}

	/// Returns the bitmap height in pixels.
	pub fn height(&self) -> usize {
		usize::from(self.metrics.height)
	}

	/// Returns the decoded coverage values.
	pub fn coverage(&self) -> &[u8] {
		&self.coverage
	}

	/// Consumes the glyph, returning its coverage.
	pub fn into_coverage(self) -> Vec<u8> {
		self.coverage
	}

	/// Gets the coverage at (x, y), or `None` outside the bounding box.
	pub fn pixel(&self, x: usize, y: usize) -> Option<u8> {
		if x >= self.width() || y >= self.height() {
			return None;
		}
		self.coverage.get(y * self.width() + x).copied()
	}

	/// Returns an iterator over the bitmap rows.
	pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
		// chunks_exact panics on zero; a zero-width glyph has no coverage anyway
		self.coverage.chunks_exact(self.width().max(1))
	}

	/// Converts the coverage to 32-bit ARGB pixels with white color.
	///
	/// Fully transparent pixels become `0`, fully opaque ones `0xFFFFFFFF`; anything in
	/// between keeps the white color with alpha `value * 4`.
	pub fn to_argb(&self) -> Vec<u32> {
		self.coverage.iter().map(|&v| coverage_to_argb(v)).collect()
	}

	/// Converts the bitmap to an ASCII art representation.
	///
	/// `ramp` lists characters from transparent to opaque; coverage is spread evenly
	/// over it.
	pub fn to_ascii_art(&self, ramp: &[char]) -> String {
		let mut art = String::with_capacity((self.width() + 1) * self.height());
		if ramp.is_empty() {
			return art;
		}

		let steps = ramp.len() - 1;
		for row in self.rows() {
			for &value in row {
				let index = usize::from(value.min(MAX_COVERAGE)) * steps / usize::from(MAX_COVERAGE);
				art.push(ramp[index]);
			}
			art.push('\n');
		}

		art
	}
}

/// Default shading ramp for [`Glyph::to_ascii_art`]
pub const ASCII_RAMP: [char; 5] = [' ', '.', '+', '*', '#'];

/// Converts one 65-level coverage value to a white ARGB pixel.
pub fn coverage_to_argb(value: u8) -> u32 {
	match value {
		0 => 0,
		v if v >= MAX_COVERAGE => 0xFFFF_FFFF,
		v => 0x00FF_FFFF | (u32::from(v) << 26),
	}
}
