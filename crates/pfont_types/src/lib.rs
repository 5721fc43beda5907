//! This crate provides the pre-rendered glyph cache format for the `pfont-rs` project.
//!
//! A glyph cache holds run-length compressed, 65-level anti-aliased glyph bitmaps
//! together with their metrics, so text can be drawn without a font engine.
//!
//! # Components
//!
//! - **Codec**: the run-length scheme used for every bitmap
//! - **Builder**: rasterizes a code set through a [`Rasterizer`](file::Rasterizer) and writes a cache
//! - **Reader**: opens a cache and decodes glyphs on demand
//! - **Updater**: rewrites glyph metrics in place without touching bitmaps
//!
//! # Examples
//!
//! Using the prelude (recommended):
//!
//! ```no_run
//! use pfont_types::prelude::*;
//!
//! # fn main() -> Result<(), PfFileError> {
//! let mut reader = CacheReader::open("font.tft")?;
//! println!("{} glyphs", reader.glyph_count());
//! # Ok(())
//! # }
//! ```
//!
//! Or use explicit paths:
//!
//! ```no_run
//! use pfont_types::file::pfont::{Reader, ReadConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let reader = Reader::open_with_config("font.tft", ReadConfig::strict())?;
//! # Ok(())
//! # }
//! ```

pub mod file;

/// `use pfont_types::prelude::*;` to import commonly used items.
pub mod prelude;
