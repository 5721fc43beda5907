//! Build and read configuration for glyph caches.
//!
//! Both configurations follow the same preset scheme:
//! - `default()`: what most callers want
//! - `strict()`: reject anything unusual early
//! - `lenient()`: accept as much as can be handled safely
//!
//! # Examples
//!
//! ```
//! use pfont_types::file::pfont::{BuildConfig, CoveragePolicy, ReadConfig};
//!
//! let build = BuildConfig::lenient();
//! assert_eq!(build.coverage_policy, CoveragePolicy::Clamp);
//!
//! let read = ReadConfig::new(64 * 64, true);
//! assert_eq!(read.max_bitmap_bytes, 4096);
//! ```

use crate::file::PfFileError;

use super::constants::{MAX_BITMAP_AREA, MAX_COVERAGE};

/// What the builder does with coverage values above 64.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CoveragePolicy {
	/// Fail the build
	#[default]
	Reject,
	/// Saturate to 64
	Clamp,
}

impl CoveragePolicy {
	/// Applies the policy to the bitmap of glyph `code` in place.
	///
	/// # Errors
	///
	/// [`PfFileError::RejectedCoverage`] for the first value above 64 under `Reject`.
	pub fn apply(&self, code: u16, coverage: &mut [u8]) -> Result<(), PfFileError> {
		match self {
			Self::Reject => match coverage.iter().position(|&v| v > MAX_COVERAGE) {
				Some(index) => Err(PfFileError::RejectedCoverage {
					code,
					index,
					value: coverage[index],
				}),
				None => Ok(()),
			},
			Self::Clamp => {
				for value in coverage.iter_mut() {
					*value = (*value).min(MAX_COVERAGE);
				}
				Ok(())
			}
		}
	}
}

/// Configuration for [`Builder`](super::Builder).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct BuildConfig {
	/// Handling of coverage values outside the 65-level domain
	pub coverage_policy: CoveragePolicy,
}

impl BuildConfig {
	/// Create a build configuration with a custom coverage policy.
	pub fn new(coverage_policy: CoveragePolicy) -> Self {
		Self {
			coverage_policy,
		}
	}

	/// Rejects out-of-range coverage. Same as `default()`.
	pub fn strict() -> Self {
		Self::new(CoveragePolicy::Reject)
	}

	/// Clamps out-of-range coverage to 64.
	pub fn lenient() -> Self {
		Self::new(CoveragePolicy::Clamp)
	}
}

/// Configuration for [`Reader`](super::Reader).
///
/// `width * height` comes straight from the file. With `verify_offsets` the reader
/// already refuses any bounding box the rest of the file cannot possibly encode;
/// `max_bitmap_bytes` additionally caps what a single glyph may allocate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReadConfig {
	/// Largest decoded bitmap accepted, in bytes
	pub max_bitmap_bytes: usize,
	/// Check every record's bitmap offset and size against the file before decoding
	pub verify_offsets: bool,
}

impl Default for ReadConfig {
	fn default() -> Self {
		Self::new(MAX_BITMAP_AREA, true)
	}
}

impl ReadConfig {
	/// Create a read configuration with custom limits.
	///
	/// # Arguments
	/// * `max_bitmap_bytes` - Per-glyph allocation limit
	/// * `verify_offsets` - Whether bitmap offsets and sizes are checked against the file
	pub fn new(max_bitmap_bytes: usize, verify_offsets: bool) -> Self {
		Self {
			max_bitmap_bytes,
			verify_offsets,
		}
	}

	/// Limits bitmaps to 256x256 pixels.
	pub fn strict() -> Self {
		Self::new(256 * 256, true)
	}

	/// Accepts any bounding box and skips the offset checks; a bad offset then
	/// surfaces as a truncated bitmap.
	pub fn lenient() -> Self {
		Self::new(MAX_BITMAP_AREA, false)
	}
}
