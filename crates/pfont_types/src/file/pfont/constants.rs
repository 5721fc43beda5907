//! Constants used in pre-rendered glyph cache files

/// Signature at the start of every cache file
pub const MAGIC: &[u8; MAGIC_SIZE] = b"TVP pre-rendered font\x1a\x01\x02";

/// Size of the signature in bytes
pub const MAGIC_SIZE: usize = 24;

/// Size of the count/offset triple following the signature
pub const HEADER_FIELDS_SIZE: usize = 12;

/// Total header size; the data region starts here
pub const HEADER_SIZE: usize = MAGIC_SIZE + HEADER_FIELDS_SIZE;

/// Filler written into the header slot until the build backpatches it
pub const HEADER_PLACEHOLDER: [u8; HEADER_FIELDS_SIZE] = [b' '; HEADER_FIELDS_SIZE];

/// Size of one entry in the character-code index
pub const CODE_ENTRY_SIZE: usize = 2;

/// Size of one entry in the metadata index
pub const RECORD_SIZE: usize = 20;

/// Word size the indices are aligned to
pub const INDEX_ALIGNMENT: u32 = 4;

/// Highest coverage level (fully opaque)
pub const MAX_COVERAGE: u8 = 64;

/// Marker bytes start above this value; `marker - RUN_BASE` is the repeat count
pub const RUN_BASE: u8 = 0x40;

/// Most repeats a single run marker may encode
pub const MAX_RUN: usize = 190;

/// Upper bound on coverage values produced per compressed byte
pub const MAX_VALUES_PER_BYTE: usize = MAX_RUN + 1;

/// Largest area a 16-bit bounding box can describe
pub const MAX_BITMAP_AREA: usize = u16::MAX as usize * u16::MAX as usize;
