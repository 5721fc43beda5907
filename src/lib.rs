#![allow(clippy::single_component_path_imports)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! `pfont-rs` reads and writes pre-rendered glyph caches: run-length compressed,
//! 65-level anti-aliased glyph bitmaps with their metrics, ready to be blitted by a
//! text renderer without a font engine.
//!
pub use pfont_internal::*;

#[cfg(all(feature = "dynamic_linking", not(target_family = "wasm")))]
#[allow(unused_imports)]
use pfont_dylib;
