//! ddsforge CLI - Command-line tool for writing DDS textures.
//!
//! This is the main entry point for the ddsforge command-line application.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use tracing::{debug, info};

use ddsforge::dds::{mapping_mismatch, FourCC};
use ddsforge::prelude::*;

/// ddsforge - DDS texture encoder
#[derive(Parser)]
#[command(name = "ddsforge")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a PNG, JPEG or BMP image to DDS
    Encode {
        /// Input image
        #[arg(short, long)]
        input: PathBuf,

        /// Output DDS file
        #[arg(short, long)]
        output: PathBuf,

        /// Target pixel format
        #[arg(short, long, default_value = "rgba8")]
        format: PixelFormat,

        /// Write only the base level
        #[arg(long)]
        no_mipmaps: bool,

        /// Maximum number of generated levels below the base
        #[arg(long, conflicts_with = "no_mipmaps")]
        max_levels: Option<u32>,
    },

    /// Wrap pre-encoded level data in a DDS header
    EncodeRaw {
        /// Input file holding the base level followed by each mip level
        #[arg(short, long)]
        input: PathBuf,

        /// Output DDS file
        #[arg(short, long)]
        output: PathBuf,

        /// Base level width in pixels
        #[arg(long)]
        width: u32,

        /// Base level height in pixels
        #[arg(long)]
        height: u32,

        /// Pixel format of the data
        #[arg(short, long)]
        format: PixelFormat,

        /// Number of levels after the base
        #[arg(long, default_value_t = 0)]
        mipmaps: u32,
    },

    /// Convert every matching image in a directory
    Batch {
        /// Input directory
        #[arg(short, long)]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, env = "DDSFORGE_OUTPUT")]
        output: PathBuf,

        /// File name pattern (glob-style)
        #[arg(short, long, default_value = "*.png")]
        pattern: String,

        /// Target pixel format
        #[arg(short, long, default_value = "rgba8")]
        format: PixelFormat,

        /// Write only the base level
        #[arg(long)]
        no_mipmaps: bool,
    },

    /// Show the header of a DDS file
    Info {
        /// Input DDS file
        #[arg(short, long)]
        input: PathBuf,
    },

    /// List pixel formats and how they are stored
    Formats {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Encode {
            input,
            output,
            format,
            no_mipmaps,
            max_levels,
        } => {
            let options = encode_options(format, no_mipmaps, max_levels);
            cmd_encode(&input, &output, &options)?;
        }
        Commands::EncodeRaw {
            input,
            output,
            width,
            height,
            format,
            mipmaps,
        } => {
            cmd_encode_raw(&input, &output, width, height, format, mipmaps)?;
        }
        Commands::Batch {
            input,
            output,
            pattern,
            format,
            no_mipmaps,
        } => {
            let options = encode_options(format, no_mipmaps, None);
            cmd_batch(&input, &output, &pattern, &options)?;
        }
        Commands::Info { input } => {
            cmd_info(&input)?;
        }
        Commands::Formats { json } => {
            cmd_formats(json)?;
        }
    }

    Ok(())
}

fn encode_options(format: PixelFormat, no_mipmaps: bool, max_levels: Option<u32>) -> EncodeOptions {
    let options = EncodeOptions::new(format);
    match (no_mipmaps, max_levels) {
        (true, _) => options.without_mipmaps(),
        (false, Some(levels)) => options.with_max_levels(levels),
        (false, None) => options,
    }
}

fn cmd_encode(input: &Path, output: &Path, options: &EncodeOptions) -> Result<()> {
    println!("Encoding: {} -> {}", input.display(), output.display());

    let start = Instant::now();
    let image = convert_file(input, output, options)
        .with_context(|| format!("Failed to encode {}", input.display()))?;

    println!(
        "Wrote {}x{} {} with {} levels in {:?}",
        image.width(),
        image.height(),
        image.format(),
        image.mip_levels(),
        start.elapsed()
    );

    Ok(())
}

fn cmd_encode_raw(
    input: &Path,
    output: &Path,
    width: u32,
    height: u32,
    format: PixelFormat,
    mipmaps: u32,
) -> Result<()> {
    let data = fs::read(input).context("Failed to read input file")?;
    let image = Image::from_contiguous(width, height, format, mipmaps, &data)
        .context("Input does not match the requested layout")?;

    save_dds(output, &image).context("Failed to write DDS file")?;

    println!(
        "Wrote {} ({} bytes of level data, {} levels)",
        output.display(),
        data.len(),
        image.mip_levels()
    );

    Ok(())
}

fn cmd_batch(input: &Path, output: &Path, pattern: &str, options: &EncodeOptions) -> Result<()> {
    let full_pattern = input.join(pattern);
    let full_pattern = full_pattern
        .to_str()
        .context("Input path is not valid UTF-8")?;

    let files: Vec<PathBuf> = glob::glob(full_pattern)
        .context("Invalid file pattern")?
        .filter_map(|entry| entry.ok())
        .filter(|path| path.is_file())
        .collect();

    if files.is_empty() {
        println!("No files match {}", full_pattern);
        return Ok(());
    }

    println!("Encoding {} files to {}...", files.len(), output.display());
    fs::create_dir_all(output)?;

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("#>-"),
    );

    let start = Instant::now();
    let errors = AtomicUsize::new(0);

    files.par_iter().for_each(|path| {
        let target = batch_output_path(output, path);
        debug!(input = %path.display(), output = %target.display(), "encoding");

        if let Err(e) = convert_file(path, &target, options) {
            pb.println(format!("Error encoding {}: {}", path.display(), e));
            errors.fetch_add(1, Ordering::Relaxed);
        }

        pb.inc(1);
    });

    pb.finish_with_message("Done");

    let errors = errors.into_inner();
    println!(
        "Encoded {} files in {:?} ({} errors)",
        files.len() - errors,
        start.elapsed(),
        errors
    );
    info!(total = files.len(), errors, "batch finished");

    if errors > 0 {
        bail!("{} of {} files failed", errors, files.len());
    }

    Ok(())
}

/// `<output>/<input stem>.dds`
fn batch_output_path(output: &Path, input: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or(input.as_os_str());
    output.join(stem).with_extension("dds")
}

fn cmd_info(input: &Path) -> Result<()> {
    let data = fs::read(input).context("Failed to read input file")?;
    let header = DdsHeader::parse(&data).context("Failed to parse DDS header")?;

    let pf = header.pixel_format;
    let four_cc = pf.four_cc;

    println!("File:          {}", input.display());
    println!("Dimensions:    {}x{}", { header.width }, { header.height });
    println!("Flags:         {:#x}", { header.flags });
    println!("Pitch/size:    {}", { header.pitch_or_linear_size });
    println!("Depth:         {}", { header.depth });
    println!(
        "Mip levels:    {}{}",
        { header.mipmap_count },
        if header.has_mipmap_count() { "" } else { " (flag not set)" }
    );
    println!("Pixel flags:   {:#x}", { pf.flags });
    if four_cc.is_none() {
        println!("FourCC:        (none)");
    } else {
        println!("FourCC:        {} ({:#010x})", four_cc, four_cc.as_u32());
    }
    println!("Bit count:     {}", { pf.rgb_bit_count });
    println!(
        "Masks:         R {:#010x} G {:#010x} B {:#010x} A {:#010x}",
        { pf.r_bit_mask },
        { pf.g_bit_mask },
        { pf.b_bit_mask },
        { pf.a_bit_mask }
    );
    println!("Caps:          {:#x}", { header.caps });
    println!("Compressed:    {}", header.is_compressed());
    println!(
        "Payload:       {} bytes",
        data.len().saturating_sub(DdsHeader::ENCODED_LEN)
    );

    if header.is_dx10() {
        println!("Note: DX10 extended header follows; it is not decoded");
    }

    Ok(())
}

fn cmd_formats(json: bool) -> Result<()> {
    if json {
        let rows: Vec<_> = PixelFormat::ALL
            .into_iter()
            .map(|format| {
                let four_cc = to_fourcc(format);
                serde_json::json!({
                    "format": format.name(),
                    "dds": to_dds_format(format).map(DdsFormat::info),
                    "four_cc": four_cc_label(four_cc),
                    "four_cc_value": four_cc.as_u32(),
                    "mismatch": mapping_mismatch(format).map(|m| m.to_string()),
                })
            })
            .collect();

        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!(
        "{:<16} {:<12} {:>10} {:>6} {:>6}  {}",
        "FORMAT", "DDS", "COMPRESSED", "BLOCK", "UNIT", "FOURCC"
    );
    for format in PixelFormat::ALL {
        let four_cc = four_cc_label(to_fourcc(format)).unwrap_or_else(|| "-".to_string());
        match to_dds_format(format) {
            Some(dds) => {
                let info = dds.info();
                println!(
                    "{:<16} {:<12} {:>10} {:>6} {:>6}  {}",
                    format.name(),
                    info.name,
                    if info.compressed { "yes" } else { "no" },
                    info.block_divisor,
                    info.unit_size,
                    four_cc
                );
            }
            None => {
                println!(
                    "{:<16} {:<12} {:>10} {:>6} {:>6}  {}",
                    format.name(),
                    "-",
                    "-",
                    "-",
                    "-",
                    four_cc
                );
            }
        }
    }

    Ok(())
}

fn four_cc_label(four_cc: FourCC) -> Option<String> {
    (!four_cc.is_none()).then(|| four_cc.to_string())
}
