//! Benchmark helper utilities for pfont-rs
//!
//! Generates synthetic coverage bitmaps that look like rasterized text: mostly empty
//! background, solid stems and short anti-aliased edges. The generators are
//! deterministic so results are comparable between runs.

use pfont_types::file::pfont::{GlyphMetrics, RasterizedGlyph};

/// Generates a glyph-like coverage bitmap of `width * height` values in `0..=64`
///
/// Each row has a transparent margin, one or two solid stems and a ramp on each stem
/// edge. `seed` shifts the stem positions so different glyphs compress differently.
pub fn generate_glyph_coverage(width: usize, height: usize, seed: u32) -> Vec<u8> {
	let mut coverage = vec![0u8; width * height];
	if width < 4 {
		return coverage;
	}

	let stem_width = (width / 6).max(1);
	let left = 1 + (seed as usize % (width / 3).max(1));
	let right = width.saturating_sub(left + stem_width);

	for y in 0..height {
		let row = &mut coverage[y * width..(y + 1) * width];
		// Crossbar in the middle third
		let bar = y >= height / 3 && y < height / 3 + stem_width;
		for (x, value) in row.iter_mut().enumerate() {
			let in_stem = (x >= left && x < left + stem_width) || (x >= right && x < right + stem_width);
			let in_bar = bar && x >= left && x < right + stem_width;
			*value = if in_stem || in_bar {
				64
			} else if x + 1 == left || x == left + stem_width || x + 1 == right {
				((seed as usize + y) % 48 + 8) as u8
			} else {
				0
			};
		}
	}

	coverage
}

/// Generates coverage that defeats run-length compression (no two neighbours equal)
pub fn generate_noise_coverage(len: usize) -> Vec<u8> {
	(0..len).map(|i| (i * 37 % 65) as u8).collect()
}

/// Generates a set of glyphs with the given edge size for codes `0..count`
pub fn generate_glyph_set(count: u16, size: u16) -> Vec<(u16, RasterizedGlyph)> {
	(0..count)
		.map(|code| {
			let metrics = GlyphMetrics {
				width: size,
				height: size,
				origin_x: 0,
				origin_y: size as i16,
				advance_x: size as i16 + 1,
				advance_y: 0,
				advance: size as i16 + 1,
			};
			let coverage = generate_glyph_coverage(size as usize, size as usize, u32::from(code));
			(code, RasterizedGlyph::new(metrics, coverage))
		})
		.collect()
}

/// Common glyph sizes for synthetic test data
pub mod sizes {
	/// Small UI text: 12x12 (144 pixels)
	pub const SMALL: usize = 12;
	/// Body text: 24x24 (576 pixels)
	pub const MEDIUM: usize = 24;
	/// Headline text: 64x64 (4,096 pixels)
	pub const LARGE: usize = 64;
	/// Display text: 256x256 (65,536 pixels)
	pub const HUGE: usize = 256;
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_generate_glyph_coverage() {
		let data = generate_glyph_coverage(24, 24, 3);
		assert_eq!(data.len(), 576);
		assert!(data.iter().all(|&v| v <= 64));
		assert!(data.contains(&64));
		assert!(data.contains(&0));
	}

	#[test]
	fn test_generate_noise_coverage() {
		let data = generate_noise_coverage(1000);
		assert!(data.windows(2).all(|w| w[0] != w[1]));
		assert!(data.iter().all(|&v| v <= 64));
	}

	#[test]
	fn test_generate_glyph_set() {
		let set = generate_glyph_set(10, 12);
		assert_eq!(set.len(), 10);
		assert_eq!(set[3].1.coverage.len(), 144);
	}
}
