//! Glyph cache integration tests for `pfont-rs`

mod corruption;
mod on_disk;
mod roundtrip;

use pfont_rs::pfont_types::file::pfont::{GlyphMetrics, RasterizedGlyph};
use std::path::PathBuf;

/// Returns a unique scratch path under the system temp directory
pub(crate) fn scratch_path(name: &str) -> PathBuf {
	std::env::temp_dir().join(format!("pfont-{}-{}.tft", std::process::id(), name))
}

/// A glyph whose coverage is a left-to-right ramp
pub(crate) fn ramp_glyph(width: u16, height: u16) -> RasterizedGlyph {
	let metrics = GlyphMetrics {
		width,
		height,
		origin_x: 0,
		origin_y: height as i16,
		advance_x: width as i16,
		advance_y: 0,
		advance: width as i16,
	};
	let coverage = (0..metrics.area())
		.map(|i| ((i % usize::from(width.max(1))) * 64 / usize::from(width.max(1))) as u8)
		.collect();
	RasterizedGlyph::new(metrics, coverage)
}
