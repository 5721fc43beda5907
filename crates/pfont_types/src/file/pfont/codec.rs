//! Run-length codec for 65-level coverage bitmaps.
//!
//! ## Alphabet
//!
//! | Byte        | Meaning                                              |
//! |-------------|------------------------------------------------------|
//! | `0x00-0x40` | Literal coverage value (0 = transparent, 64 = opaque) |
//! | `0x41-0xFF` | Run marker: repeat the previous value `byte - 0x40` times |
//!
//! The encoder never emits a marker for fewer than two repeats and splits long runs
//! into markers of at most 190 repeats (`0xFE`). A final marker may still cover a
//! single repeat when a run is split, e.g. 191 repeats encode as `0xFE 0x41`.
//!
//! ## Decode safety
//!
//! The compressed length is not stored anywhere; a block ends once `width * height`
//! values have been produced. The decoder is bounded by that expected length:
//! - a run that would overshoot the expected length is clamped,
//! - a run with no preceding value repeats `0`.
//!
//! Neither condition is an error. The result is flagged as `clamped` so callers can
//! report it, and the output never grows past the expected length.

use std::io::{self, Read, Seek};

use crate::file::PfFileError;

use super::constants::{MAX_COVERAGE, MAX_RUN, RUN_BASE};

/// Largest chunk pulled from a stream in one `read` call while decoding
const READ_CHUNK: usize = 4096;

/// Compresses a coverage bitmap.
///
/// # Errors
///
/// Returns [`PfFileError::CoverageOutOfRange`] if any value is above 64; such a byte
/// would be indistinguishable from a run marker.
///
/// # Examples
///
/// ```
/// use pfont_types::file::pfont::codec;
///
/// let packed = codec::encode(&[10, 10, 10, 10]).unwrap();
/// assert_eq!(packed, vec![0x0A, 0x43]);
/// ```
pub fn encode(coverage: &[u8]) -> Result<Vec<u8>, PfFileError> {
	let mut out = Vec::with_capacity(coverage.len());
	encode_into(coverage, &mut out)?;
	Ok(out)
}

/// Compresses a coverage bitmap, appending to `out`.
///
/// Nothing is appended when validation fails.
pub fn encode_into(coverage: &[u8], out: &mut Vec<u8>) -> Result<(), PfFileError> {
	if let Some((index, &value)) = coverage.iter().enumerate().find(|(_, v)| **v > MAX_COVERAGE) {
		return Err(PfFileError::CoverageOutOfRange {
			index,
			value,
		});
	}

	let mut last: Option<u8> = None;
	let mut repeats = 0usize;

	for &value in coverage {
		if last == Some(value) {
			repeats += 1;
			continue;
		}
		if let Some(prev) = last {
			flush_run(prev, repeats, out);
		}
		out.push(value);
		last = Some(value);
		repeats = 0;
	}

	if let Some(prev) = last {
		flush_run(prev, repeats, out);
	}

	Ok(())
}

/// Emits `repeats` further copies of `value`, which has already been written once.
fn flush_run(value: u8, mut repeats: usize, out: &mut Vec<u8>) {
	if repeats < 2 {
		out.extend(std::iter::repeat_n(value, repeats));
		return;
	}

	while repeats > 0 {
		let len = repeats.min(MAX_RUN);
		out.push(RUN_BASE + len as u8);
		repeats -= len;
	}
}

/// Result of decoding one compressed block
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Decoded {
	/// Decoded coverage values, never longer than the expected length
	pub coverage: Vec<u8>,

	/// Number of compressed bytes consumed
	pub consumed: usize,

	/// Length the caller asked for
	pub expected: usize,

	/// `true` if a malformed run had to be clamped or had no preceding value
	pub clamped: bool,
}

impl Decoded {
	/// Returns `true` if the full expected length was produced.
	pub fn is_complete(&self) -> bool {
		self.coverage.len() == self.expected
	}
}

/// Incremental, bounded run-length decoder.
///
/// Bytes are pushed one at a time; once the expected length has been produced every
/// further byte is ignored and not counted as consumed.
#[derive(Debug, Clone)]
pub struct RunLengthDecoder {
	output: Vec<u8>,
	expected: usize,
	consumed: usize,
	clamped: bool,
}

impl RunLengthDecoder {
	/// Creates a decoder that stops after `expected` output bytes.
	pub fn new(expected: usize) -> Self {
		Self {
			output: Vec::with_capacity(expected),
			expected,
			consumed: 0,
			clamped: false,
		}
	}

	/// Returns `true` once `expected` bytes have been produced.
	pub fn is_complete(&self) -> bool {
		self.output.len() >= self.expected
	}

	/// Number of output bytes still missing.
	pub fn remaining(&self) -> usize {
		self.expected - self.output.len()
	}

	/// Feeds one compressed byte, returning `true` when decoding is complete.
	pub fn push(&mut self, byte: u8) -> bool {
		if self.is_complete() {
			return true;
		}
		self.consumed += 1;

		if byte <= MAX_COVERAGE {
			self.output.push(byte);
			return self.is_complete();
		}

		let requested = usize::from(byte - RUN_BASE);
		let remaining = self.remaining();
		let len = if requested > remaining {
			self.clamped = true;
			remaining
		} else {
			requested
		};

		let value = match self.output.last() {
			Some(&value) => value,
			None => {
				self.clamped = true;
				0
			}
		};

		self.output.resize(self.output.len() + len, value);
		self.is_complete()
	}

	/// Feeds a slice, returning how many of its bytes were consumed.
	pub fn feed(&mut self, input: &[u8]) -> usize {
		let before = self.consumed;
		for &byte in input {
			if self.push(byte) {
				break;
			}
		}
		self.consumed - before
	}

	/// Finishes decoding, returning whatever has been produced.
	pub fn finish(self) -> Decoded {
		Decoded {
			coverage: self.output,
			consumed: self.consumed,
			expected: self.expected,
			clamped: self.clamped,
		}
	}
}

/// Decompresses a block held in memory.
///
/// Stops after `expected_len` values. If `input` runs out first the returned
/// coverage is shorter than requested; check [`Decoded::is_complete`].
///
/// # Examples
///
/// ```
/// use pfont_types::file::pfont::codec;
///
/// let decoded = codec::decode(&[0x0A, 0x43], 4);
/// assert_eq!(decoded.coverage, vec![10, 10, 10, 10]);
/// assert_eq!(decoded.consumed, 2);
/// ```
pub fn decode(input: &[u8], expected_len: usize) -> Decoded {
	let mut decoder = RunLengthDecoder::new(expected_len);
	decoder.feed(input);
	decoder.finish()
}

/// Decompresses a block read from a stream positioned at its first byte.
///
/// The stream is read in chunks; bytes read past the end of the block are given back
/// with a relative seek, so on return the stream sits right after the last consumed
/// byte. If the stream ends early the returned coverage is short, as with [`decode`].
///
/// # Errors
///
/// Propagates any read or seek error other than [`io::ErrorKind::Interrupted`].
pub fn decode_from<R: Read + Seek>(reader: &mut R, expected_len: usize) -> io::Result<Decoded> {
	let mut decoder = RunLengthDecoder::new(expected_len);
	let mut chunk = vec![0u8; expected_len.clamp(1, READ_CHUNK)];

	while !decoder.is_complete() {
		// A well-formed block is never longer than the values it still has to produce
		let want = decoder.remaining().min(chunk.len());
		let read = match reader.read(&mut chunk[..want]) {
			Ok(0) => break,
			Ok(n) => n,
			Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
			Err(e) => return Err(e),
		};

		let used = decoder.feed(&chunk[..read]);
		if used < read {
			reader.seek_relative(-((read - used) as i64))?;
		}
	}

	Ok(decoder.finish())
}

#[cfg(test)]
mod tests {
	use super::*;

	use rand::{Rng, SeedableRng, rngs::SmallRng};

	fn uniform(value: u8, count: usize) -> Vec<u8> {
		vec![value; count]
	}

	#[test]
	fn test_encode_empty() {
		assert!(encode(&[]).unwrap().is_empty());
		let decoded = decode(&[], 0);
		assert!(decoded.is_complete());
		assert_eq!(decoded.consumed, 0);
	}

	#[test]
	fn test_encode_distinct_literals() {
		let data = [0, 1, 64, 1, 0];
		assert_eq!(encode(&data).unwrap(), data.to_vec());
	}

	#[test]
	fn test_short_runs_stay_literal() {
		// One and two extra repeats cannot be expressed by a marker
		assert_eq!(encode(&uniform(7, 1)).unwrap(), vec![7]);
		assert_eq!(encode(&uniform(7, 2)).unwrap(), vec![7, 7]);
		assert_eq!(encode(&uniform(7, 3)).unwrap(), vec![7, 0x42]);
	}

	#[test]
	fn test_run_length_formula() {
		for k in [3usize, 4, 100, 190, 191, 192, 381, 382, 1000, 65535] {
			let encoded = encode(&uniform(33, k)).unwrap();
			assert_eq!(encoded.len(), 1 + (k - 1).div_ceil(MAX_RUN), "k = {k}");
			assert!(encoded[1..].iter().all(|&b| b > MAX_COVERAGE));
		}
	}

	#[test]
	fn test_long_run_split() {
		// 191 extra repeats split into a full marker and a single-repeat marker
		let encoded = encode(&uniform(5, 192)).unwrap();
		assert_eq!(encoded, vec![5, 0xFE, 0x41]);
		assert_eq!(decode(&encoded, 192).coverage, uniform(5, 192));
	}

	#[test]
	fn test_uniform_2x2_block() {
		let encoded = encode(&uniform(10, 4)).unwrap();
		assert_eq!(encoded, vec![0x0A, 0x43]);

		let decoded = decode(&encoded, 4);
		assert_eq!(decoded.coverage, uniform(10, 4));
		assert!(!decoded.clamped);
	}

	#[test]
	fn test_mixed_runs() {
		let data = [0, 0, 0, 0, 64, 64, 3, 3, 3, 0];
		let encoded = encode(&data).unwrap();
		assert_eq!(encoded, vec![0, 0x43, 64, 64, 3, 0x42, 0]);
		assert_eq!(decode(&encoded, data.len()).coverage, data.to_vec());
	}

	#[test]
	fn test_encode_rejects_marker_range() {
		let result = encode(&[1, 2, 65]);
		assert!(matches!(
			result,
			Err(PfFileError::CoverageOutOfRange {
				index: 2,
				value: 65
			})
		));

		let mut out = vec![9];
		assert!(encode_into(&[0xFF], &mut out).is_err());
		assert_eq!(out, vec![9]);
	}

	#[test]
	fn test_random_roundtrip() {
		let mut rng = SmallRng::seed_from_u64(0x5EED);
		for _ in 0..200 {
			let len = rng.random_range(0..600);
			// Small alphabet so that long runs actually occur
			let levels = rng.random_range(1..=65u8);
			let mut data = Vec::with_capacity(len);
			while data.len() < len {
				let value = rng.random_range(0..levels);
				let run = rng.random_range(1..=250usize).min(len - data.len());
				data.extend(std::iter::repeat_n(value, run));
			}

			let encoded = encode(&data).unwrap();
			let decoded = decode(&encoded, data.len());
			assert_eq!(decoded.coverage, data);
			assert_eq!(decoded.consumed, encoded.len());
			assert!(!decoded.clamped);
		}
	}

	#[test]
	fn test_decode_leading_marker() {
		let decoded = decode(&[0x45, 7], 6);
		assert_eq!(decoded.coverage, vec![0, 0, 0, 0, 0, 7]);
		assert!(decoded.clamped);
	}

	#[test]
	fn test_decode_run_overshoot_clamped() {
		let decoded = decode(&[3, 0xFF, 9, 9], 4);
		assert_eq!(decoded.coverage, vec![3, 3, 3, 3]);
		assert_eq!(decoded.consumed, 2);
		assert!(decoded.clamped);
	}

	#[test]
	fn test_decode_stops_at_expected_length() {
		let decoded = decode(&[1, 2, 3, 4, 5], 3);
		assert_eq!(decoded.coverage, vec![1, 2, 3]);
		assert_eq!(decoded.consumed, 3);
		assert!(!decoded.clamped);
	}

	#[test]
	fn test_decode_truncated_input() {
		let decoded = decode(&[4, 0x42], 10);
		assert_eq!(decoded.coverage, vec![4, 4, 4]);
		assert!(!decoded.is_complete());
	}

	#[test]
	fn test_decode_every_marker_position() {
		let base = [1u8, 2, 3, 4, 5, 6, 7, 8];
		for position in 0..base.len() {
			for marker in [0x41u8, 0x80, 0xFF] {
				let mut corrupt = base.to_vec();
				corrupt[position] = marker;
				for expected in 0..=base.len() {
					let decoded = decode(&corrupt, expected);
					assert!(decoded.coverage.len() <= expected);
					assert!(decoded.consumed <= corrupt.len());
				}
			}
		}
	}

	#[test]
	fn test_decode_from_reader_stops_at_block_end() {
		let mut stream = Vec::new();
		stream.extend(encode(&uniform(20, 50)).unwrap());
		stream.extend(encode(&[1, 2, 3]).unwrap());

		let mut cursor = std::io::Cursor::new(stream);
		let first = decode_from(&mut cursor, 50).unwrap();
		assert_eq!(first.coverage, uniform(20, 50));
		assert_eq!(cursor.position(), first.consumed as u64);

		let second = decode_from(&mut cursor, 3).unwrap();
		assert_eq!(second.coverage, vec![1, 2, 3]);
	}

	#[test]
	fn test_decode_from_reader_truncated() {
		let mut cursor = std::io::Cursor::new(vec![8u8, 8]);
		let decoded = decode_from(&mut cursor, 5).unwrap();
		assert_eq!(decoded.coverage, vec![8, 8]);
		assert!(!decoded.is_complete());
	}
}
