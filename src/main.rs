use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use bitstream_framer::{frame, framing, output, verify};

/// FPGA CI test shield firmware post-processing tool.
///
/// Wraps a raw binary FPGA image in the framing the shield's boot loader
/// expects: a 4-byte little-endian size field in front of the payload and a
/// 4-byte little-endian CRC32 of the payload behind it.
#[derive(Parser)]
#[clap(name = "bitstream-framer", version)]
struct Cli {
    /// Binary FPGA image to post-process
    src: PathBuf,
    /// Location to write the post-processed file to
    dst: PathBuf,
    /// Read the written file back and validate it like the boot loader would
    #[clap(long)]
    verify: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .compact()
        .without_time()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .init();

    let cli = Cli::parse();

    let image = fs::read(&cli.src)
        .with_context(|| format!("Failed to read image '{}'.", cli.src.display()))?;
    tracing::debug!("read {} bytes from {}", image.len(), cli.src.display());

    let framed = frame(&image)
        .with_context(|| format!("Failed to frame image '{}'.", cli.src.display()))?;

    output::write_image(&cli.dst, &framed)
        .with_context(|| format!("Failed to write output file '{}'.", cli.dst.display()))?;

    if cli.verify {
        let written = fs::read(&cli.dst)
            .with_context(|| format!("Failed to read back '{}'.", cli.dst.display()))?;
        verify(&written)
            .with_context(|| format!("Written file '{}' failed validation.", cli.dst.display()))?;
        tracing::debug!("verified {} bytes", written.len());
    }

    println!("File \"{}\" processed.", cli.src.display());
    println!("Output file \"{}\" written", cli.dst.display());
    println!("    Size: {}", image.len());
    println!("    CRC: {:#x}", framing::checksum(&image));

    Ok(())
}
