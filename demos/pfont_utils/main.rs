//! Glyph cache CLI Utility
//!
//! A command-line tool for building, inspecting, exporting and patching pre-rendered
//! glyph caches.
//!
//! # Features
//!
//! - **info**: Display cache header and glyph statistics
//! - **dump**: Print glyph metrics and ASCII art
//! - **export**: Export glyphs to white-on-transparent PNG images
//! - **inspect**: Hex dump of one glyph's record and compressed bitmap
//! - **build**: Build a cache from a JSON manifest of grayscale images
//! - **update**: Rewrite glyph metrics from a JSON file
//!
//! # Manifest Format
//!
//! ```json
//! {
//!   "glyphs": [
//!     { "code": 65, "image": "a.png", "origin_x": 0, "origin_y": 12, "advance": 9 },
//!     { "code": 32, "advance": 5 }
//!   ]
//! }
//! ```
//!
//! Image paths are relative to the manifest. Glyphs without an image are blank.
//! Luminance is used as 8-bit coverage.
//!
//! # Usage Examples
//!
//! ```bash
//! # Build a cache
//! cargo run --example pfont_utils -- build glyphs.json -o font.tft
//!
//! # Display cache information
//! cargo run --example pfont_utils -- info font.tft --detailed
//!
//! # Print the glyph for 'A'
//! cargo run --example pfont_utils -- dump font.tft --code 0x41
//!
//! # Export every glyph to PNG
//! cargo run --example pfont_utils -- export font.tft -o glyphs/
//!
//! # Shift the advance of a few glyphs
//! cargo run --example pfont_utils -- update font.tft metrics.json
//! ```

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use image::{ImageBuffer, Rgba, RgbaImage};
use log::{debug, info};
use pfont_rs::pfont_types::file::pfont::{
	ASCII_RAMP, BuildConfig, Builder, Glyph, GlyphMetrics, Quantized, RasterizedGlyph, Reader,
	Updater, codec, constants,
};
use serde::Deserialize;

#[derive(Parser)]
#[command(name = "pfont_utils")]
#[command(author = "pfont-rs project")]
#[command(version = "1.0")]
#[command(about = "Glyph cache utility - build, inspect, export and patch pre-rendered fonts", long_about = None)]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Display cache information
	Info {
		/// Input cache file path
		#[arg(value_name = "INPUT")]
		input: PathBuf,

		/// Show per-glyph metrics
		#[arg(short, long)]
		detailed: bool,
	},

	/// Print glyphs as ASCII art
	Dump {
		/// Input cache file path
		#[arg(value_name = "INPUT")]
		input: PathBuf,

		/// Only dump this character code (hex, e.g. 0x41)
		#[arg(long, value_name = "HEX_CODE")]
		code: Option<String>,

		/// Maximum number of glyphs to dump
		#[arg(short, long, default_value = "16")]
		limit: usize,
	},

	/// Export glyphs to PNG
	Export {
		/// Input cache file path
		#[arg(value_name = "INPUT")]
		input: PathBuf,

		/// Output directory
		#[arg(short, long, value_name = "OUTPUT_DIR", default_value = ".")]
		output: PathBuf,

		/// Only export this character code (hex, e.g. 0x3042)
		#[arg(long, value_name = "HEX_CODE")]
		code: Option<String>,
	},

	/// Hex dump of a glyph's metadata record and compressed bitmap
	Inspect {
		/// Input cache file path
		#[arg(value_name = "INPUT")]
		input: PathBuf,

		/// Character code (hex, e.g. 0x41)
		#[arg(value_name = "HEX_CODE")]
		code: String,
	},

	/// Build a cache from a JSON manifest
	Build {
		/// Manifest file path
		#[arg(value_name = "MANIFEST")]
		manifest: PathBuf,

		/// Output cache file path
		#[arg(short, long, value_name = "OUTPUT")]
		output: PathBuf,
	},

	/// Rewrite glyph metrics from a JSON file
	Update {
		/// Cache file to patch in place
		#[arg(value_name = "INPUT")]
		input: PathBuf,

		/// JSON array of `{ "code": .., "metrics": { .. } }` entries
		#[arg(value_name = "METRICS_JSON")]
		metrics: PathBuf,
	},
}

/// One glyph entry of a build manifest
#[derive(Debug, Deserialize)]
struct ManifestGlyph {
	code: u16,
	#[serde(default)]
	image: Option<PathBuf>,
	#[serde(default)]
	origin_x: i16,
	#[serde(default)]
	origin_y: i16,
	#[serde(default)]
	advance_x: Option<i16>,
	#[serde(default)]
	advance_y: i16,
	advance: i16,
}

#[derive(Debug, Deserialize)]
struct Manifest {
	glyphs: Vec<ManifestGlyph>,
}

/// One entry of a metrics override file
#[derive(Debug, Deserialize)]
struct MetricsOverride {
	code: u16,
	metrics: GlyphMetrics,
}

/// Parses a character code given in hex, with or without a `0x` prefix
fn parse_code(text: &str) -> Result<u16> {
	let digits = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")).unwrap_or(text);
	u16::from_str_radix(digits, 16).with_context(|| format!("Invalid hex code '{text}'"))
}

/// Looks up a glyph or fails with a readable message
fn find_glyph<R: std::io::Read + std::io::Seek>(reader: &mut Reader<R>, code: u16) -> Result<Glyph> {
	reader.find(code)?.with_context(|| format!("Glyph not found for code 0x{code:04X}"))
}

/// Renders a glyph as white with coverage as alpha
fn glyph_to_image(glyph: &Glyph) -> RgbaImage {
	let width = glyph.width().max(1) as u32;
	let height = glyph.height().max(1) as u32;
	let mut img: RgbaImage = ImageBuffer::from_pixel(width, height, Rgba([0, 0, 0, 0]));

	for (y, row) in glyph.to_argb().chunks_exact(glyph.width().max(1)).enumerate() {
		for (x, &argb) in row.iter().enumerate() {
			let [a, r, g, b] = argb.to_be_bytes();
			img.put_pixel(x as u32, y as u32, Rgba([r, g, b, a]));
		}
	}

	img
}

/// Handles the 'info' command
fn handle_info(input: &Path, detailed: bool) -> Result<()> {
	let mut reader = Reader::open(input)
		.with_context(|| format!("Failed to open glyph cache {}", input.display()))?;

	println!("\n=== Glyph Cache Information ===");
	println!("File: {}", input.display());
	println!("File Size: {} bytes", reader.file_size());
	println!("{}", reader.header());

	let records = reader.read_records()?;
	let blank = records.iter().filter(|r| r.metrics.is_blank()).count();
	let pixels: usize = records.iter().map(|r| r.metrics.area()).sum();
	let data_bytes = u64::from(reader.header().code_index_offset) - constants::HEADER_SIZE as u64;

	println!("Blank Glyphs: {blank}");
	println!("Total Pixels: {pixels}");
	if pixels > 0 {
		println!(
			"Bitmap Data: {} bytes ({:.1}% of raw)",
			data_bytes,
			data_bytes as f64 * 100.0 / pixels as f64
		);
	}

	if detailed {
		println!("\n=== Glyphs ===");
		for (code, record) in reader.codes().iter().zip(&records) {
			println!("0x{:04X} @ {:>8}: {}", code, record.bitmap_offset, record.metrics);
		}
	}

	Ok(())
}

/// Handles the 'dump' command
fn handle_dump(input: &Path, code: Option<String>, limit: usize) -> Result<()> {
	let mut reader = Reader::open(input)
		.with_context(|| format!("Failed to open glyph cache {}", input.display()))?;

	let glyphs = match code {
		Some(code) => vec![find_glyph(&mut reader, parse_code(&code)?)?],
		None => reader.iter_glyphs().take(limit).collect::<Result<Vec<_>, _>>()?,
	};

	for glyph in &glyphs {
		println!("\n{glyph}");
		print!("{}", glyph.to_ascii_art(&ASCII_RAMP));
	}
	println!("\n(Showing {} of {} glyphs)", glyphs.len(), reader.glyph_count());

	Ok(())
}

/// Handles the 'export' command
fn handle_export(input: &Path, output: &Path, code: Option<String>) -> Result<()> {
	let mut reader = Reader::open(input)
		.with_context(|| format!("Failed to open glyph cache {}", input.display()))?;
	fs::create_dir_all(output)
		.with_context(|| format!("Failed to create directory {}", output.display()))?;

	let glyphs = match code {
		Some(code) => vec![find_glyph(&mut reader, parse_code(&code)?)?],
		None => reader.iter_glyphs().collect::<Result<Vec<_>, _>>()?,
	};

	let mut exported = 0;
	for glyph in glyphs.iter().filter(|g| !g.metrics().is_blank()) {
		let path = output.join(format!("glyph_{:04X}.png", glyph.code()));
		glyph_to_image(glyph)
			.save(&path)
			.with_context(|| format!("Failed to save image {}", path.display()))?;
		debug!("Exported {}", path.display());
		exported += 1;
	}

	println!("✓ Exported {exported} glyphs to {}", output.display());
	Ok(())
}

/// Handles the 'inspect' command
fn handle_inspect(input: &Path, code: &str) -> Result<()> {
	let code = parse_code(code)?;
	let bytes = fs::read(input).with_context(|| format!("Failed to read {}", input.display()))?;

	let mut reader = Reader::from_reader(Cursor::new(bytes.as_slice()))?;
	let index = reader.position(code).with_context(|| format!("Glyph not found for code 0x{code:04X}"))?;
	let record = reader.record(index)?;

	println!("Glyph 0x{code:04X} (index {index})");
	println!("Record @ {}: {}", reader.header().record_position(index), hex::encode(record.to_bytes()));
	println!("Metrics: {}", record.metrics);

	let start = record.bitmap_offset as usize;
	let block = bytes.get(start..).unwrap_or_default();
	let decoded = codec::decode(block, record.metrics.area());
	println!(
		"Bitmap @ {}: {} bytes -> {} values{}",
		start,
		decoded.consumed,
		decoded.coverage.len(),
		if decoded.clamped { " (clamped)" } else { "" }
	);
	for chunk in block[..decoded.consumed].chunks(16) {
		println!("  {}", hex::encode(chunk));
	}

	Ok(())
}

/// Handles the 'build' command
fn handle_build(manifest_path: &Path, output: &Path) -> Result<()> {
	let text = fs::read_to_string(manifest_path)
		.with_context(|| format!("Failed to read manifest {}", manifest_path.display()))?;
	let manifest: Manifest = serde_json::from_str(&text).context("Invalid manifest")?;
	if manifest.glyphs.is_empty() {
		bail!("Manifest lists no glyphs");
	}

	let base = manifest_path.parent().unwrap_or_else(|| Path::new("."));
	let mut glyphs = BTreeMap::new();
	for entry in &manifest.glyphs {
		let (width, height, coverage) = match &entry.image {
			Some(image_path) => {
				let path = base.join(image_path);
				let luma = image::open(&path)
					.with_context(|| format!("Failed to load image {}", path.display()))?
					.to_luma8();
				let width = u16::try_from(luma.width()).context("Image too wide")?;
				let height = u16::try_from(luma.height()).context("Image too tall")?;
				(width, height, luma.into_raw())
			}
			None => (0, 0, Vec::new()),
		};

		let metrics = GlyphMetrics {
			width,
			height,
			origin_x: entry.origin_x,
			origin_y: entry.origin_y,
			advance_x: entry.advance_x.unwrap_or(entry.advance),
			advance_y: entry.advance_y,
			advance: entry.advance,
		};
		glyphs.insert(entry.code, RasterizedGlyph::new(metrics, coverage));
	}

	let codes: Vec<u16> = manifest.glyphs.iter().map(|g| g.code).collect();
	let mut rasterizer = Quantized(glyphs);
	let header = Builder::with_config(BuildConfig::strict())
		.build_to_file(output, &codes, &mut rasterizer)
		.with_context(|| format!("Failed to build {}", output.display()))?;

	info!("Built {} glyphs", header.glyph_count);
	println!("✓ Cache saved: {}", output.display());
	println!("{header}");
	Ok(())
}

/// Handles the 'update' command
fn handle_update(input: &Path, metrics_path: &Path) -> Result<()> {
	let text = fs::read_to_string(metrics_path)
		.with_context(|| format!("Failed to read {}", metrics_path.display()))?;
	let overrides: Vec<MetricsOverride> = serde_json::from_str(&text).context("Invalid metrics file")?;
	let overrides: HashMap<u16, GlyphMetrics> =
		overrides.into_iter().map(|o| (o.code, o.metrics)).collect();

	let mut updater = Updater::open(input)
		.with_context(|| format!("Failed to open glyph cache {}", input.display()))?;
	let missing: Vec<_> = overrides.keys().filter(|c| !updater.codes().contains(*c)).collect();
	if !missing.is_empty() {
		log::warn!("{} codes are not in the cache: {:04X?}", missing.len(), missing);
	}

	let changed = updater.update(|code, _| overrides.get(&code).copied())?;
	println!("✓ Rewrote {changed} metadata records");
	Ok(())
}

fn main() {
	// Initialize logger with default level set to info if RUST_LOG is not set
	env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

	let cli = Cli::parse();

	let result = match cli.command {
		Commands::Info {
			input,
			detailed,
		} => handle_info(&input, detailed),
		Commands::Dump {
			input,
			code,
			limit,
		} => handle_dump(&input, code, limit),
		Commands::Export {
			input,
			output,
			code,
		} => handle_export(&input, &output, code),
		Commands::Inspect {
			input,
			code,
		} => handle_inspect(&input, &code),
		Commands::Build {
			manifest,
			output,
		} => handle_build(&manifest, &output),
		Commands::Update {
			input,
			metrics,
		} => handle_update(&input, &metrics),
	};

	if let Err(e) = result {
		eprintln!("Error: {e:#}");
		std::process::exit(1);
	}
}
