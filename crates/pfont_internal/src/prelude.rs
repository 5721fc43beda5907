//! Prelude module for `pfont_internal`.
//!
//! This module provides a convenient way to import commonly used types and traits.
//!
//! # Examples
//!
//! ```rust
//! use pfont_internal::prelude::*;
//!
//! // Now you can use all common types directly
//! let metrics = GlyphMetrics { width: 1, height: 1, ..GlyphMetrics::default() };
//! let glyph = RasterizedGlyph::new(metrics, vec![64]);
//! let packed = encode(&glyph.coverage).unwrap();
//! assert_eq!(packed, vec![64]);
//! ```

// Re-export everything from pfont_types::prelude
#[doc(inline)]
pub use pfont_types::prelude::*;

// Re-export the entire pfont_types module for advanced usage
#[doc(inline)]
pub use pfont_types;
