//! This module is separated into its own crate to enable simple dynamic linking for `pfont`, and should not be used directly.

/// `use pfont::prelude::*;` to import commonly used items.
pub mod prelude;

// Re-export pfont_types for convenience
pub use pfont_types;

// Re-export commonly used types at crate root
pub use pfont_types::file::{CacheBuilder, CacheReader, CacheUpdater, GlyphMetrics, PfFileError};
