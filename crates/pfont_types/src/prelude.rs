//! Prelude module for `pfont_types`.
//!
//! This module provides a convenient way to import commonly used types, traits, and constants.
//!
//! # Examples
//!
//! ```no_run
//! use pfont_types::prelude::*;
//!
//! // Now you can use all common types directly
//! let builder = CacheBuilder::with_config(BuildConfig::lenient());
//! let metrics = GlyphMetrics::default();
//! ```

// File module types
#[doc(inline)]
pub use crate::file::{
	// Configuration
	BuildConfig,

	// Cache access
	CacheBuilder,
	CacheHeader,
	CacheReader,
	CacheUpdater,
	CoveragePolicy,

	// Glyph types
	Glyph,
	GlyphMetrics,
	GlyphRecord,

	// Errors
	PfFileError,

	RasterizedGlyph,
	Rasterizer,
	ReadConfig,
};

// Codec entry points
#[doc(inline)]
pub use crate::file::pfont::codec::{decode, encode};
