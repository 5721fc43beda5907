//! File type support for `pfont-rs` project.

mod error;

pub mod pfont;

// Re-export unified error type
pub use error::PfFileError;

// Re-export main file types
pub use pfont::{
	BuildConfig, Builder as CacheBuilder, CoveragePolicy, Glyph, GlyphMetrics, GlyphRecord,
	Header as CacheHeader, RasterizedGlyph, Rasterizer, ReadConfig, Reader as CacheReader,
	Updater as CacheUpdater,
};
