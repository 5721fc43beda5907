//! Pre-rendered glyph cache support for `pfont-rs` project.
//!
//! A glyph cache stores anti-aliased glyph bitmaps for a fixed set of character codes
//! so that a text renderer can draw them without a font engine at runtime. Coverage
//! is quantized to 65 levels (`0..=64`) and each bitmap is run-length compressed.
//!
//! # File Structure
//!
//! All integers are little-endian.
//!
//! | Offset | Size | Content |
//! |--------|------|---------|
//! | 0      | 24   | Signature `"TVP pre-rendered font\x1a\x01\x02"` |
//! | 24     | 4    | Glyph count |
//! | 28     | 4    | Code index offset |
//! | 32     | 4    | Metadata index offset |
//! | 36     | ...  | Compressed bitmaps, ascending code order |
//! | ...    | 2*N  | Code index (word aligned) |
//! | ...    | 20*N | Metadata index (word aligned) |
//!
//! Each metadata record holds the bitmap offset (u32), width and height (u16),
//! origin x/y, advance x/y and cell advance (i16) and two reserved bytes.
//!
//! # Compression
//!
//! A compressed byte `b` is either a literal coverage value (`b <= 64`) or a repeat
//! marker (`b > 0x40`) meaning "repeat the last value `b - 0x40` more times". Runs
//! longer than 190 are split over several markers. See [`codec`].
//!
//! # Examples
//!
//! ## Building a cache
//!
//! ```no_run
//! use pfont_types::file::pfont::{Builder, GlyphMetrics, RasterizedGlyph};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut rasterize = |code: u16| {
//!     let metrics = GlyphMetrics { width: 8, height: 8, advance: 9, ..GlyphMetrics::default() };
//!     let coverage = vec![if code % 2 == 0 { 64 } else { 0 }; 64];
//!     Some(RasterizedGlyph::new(metrics, coverage))
//! };
//!
//! let codes: Vec<u16> = (0x20..0x7F).collect();
//! let header = Builder::new().build_to_file("ascii.tft", &codes, &mut rasterize)?;
//! println!("{header}");
//! # Ok(())
//! # }
//! ```
//!
//! ## Reading glyphs
//!
//! ```no_run
//! use pfont_types::file::pfont::{Reader, ASCII_RAMP};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut reader = Reader::open("ascii.tft")?;
//! if let Some(glyph) = reader.find(u16::from(b'A'))? {
//!     print!("{}", glyph.to_ascii_art(&ASCII_RAMP));
//! }
//! # Ok(())
//! # }
//! ```

pub mod codec;
pub mod constants;

mod builder;
mod config;
mod glyph;
mod iterator;
mod rasterizer;
mod reader;
mod record;
mod stream;
mod updater;


pub use builder::Builder;
pub use config::{BuildConfig, CoveragePolicy, ReadConfig};
pub use glyph::{ASCII_RAMP, Glyph, coverage_to_argb};
pub use iterator::{GlyphIter, RecordIter};
pub use rasterizer::{Quantized, RasterizedGlyph, Rasterizer, quantize_coverage};
pub use reader::Reader;
pub use record::{GlyphMetrics, GlyphRecord};
pub use stream::{CacheStream, Header};
pub use updater::Updater;
