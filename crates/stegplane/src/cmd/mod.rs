use clap::{Args, Subcommand};
use std::path::{Path, PathBuf};

use stegplane_codec::BitRange;
use stegplane_raster::{read_raster, StegoImage};

use crate::exit::{codec_error, raster_error, CliResult};
use crate::output::OutputFormat;

pub mod capacity;
pub mod decode;
pub mod encode;
pub mod inspect;
pub mod plane;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Hide a message file inside a cover image.
    Encode(EncodeArgs),
    /// Recover a hidden message from a stego image.
    Decode(DecodeArgs),
    /// Report how many bytes an image can hide.
    Capacity(CapacityArgs),
    /// Read the embedded length prefix without extracting the message.
    Inspect(InspectArgs),
    /// Render one bit plane of an image as a black and white PNG.
    Plane(PlaneArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Encode(args) => encode::run(args, format),
        Command::Decode(args) => decode::run(args, format),
        Command::Capacity(args) => capacity::run(args, format),
        Command::Inspect(args) => inspect::run(args, format),
        Command::Plane(args) => plane::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

/// Writable bit window shared by every codec command.
#[derive(Args, Debug, Clone, Copy)]
pub struct BitArgs {
    /// Lowest bit position used in each layer (0 is the least significant bit).
    #[arg(
        long,
        default_value_t = 0,
        env = "STEGPLANE_START_BIT",
        value_parser = clap::value_parser!(u8).range(0..=7)
    )]
    pub start_bit: u8,
    /// Highest bit position used in each layer.
    #[arg(
        long,
        default_value_t = 0,
        env = "STEGPLANE_END_BIT",
        value_parser = clap::value_parser!(u8).range(0..=7)
    )]
    pub end_bit: u8,
}

impl BitArgs {
    pub fn range(self) -> CliResult<BitRange> {
        BitRange::new(self.start_bit, self.end_bit)
            .map_err(|err| codec_error("invalid bit range", err))
    }
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Cover image to hide the message in.
    pub cover: PathBuf,
    /// File whose bytes are hidden.
    pub message: PathBuf,
    /// Where to write the stego image; the container follows the extension.
    pub output: PathBuf,
    #[command(flatten)]
    pub bits: BitArgs,
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Stego image to read.
    pub stego: PathBuf,
    /// Where to write the recovered bytes (`-` for stdout).
    pub output: PathBuf,
    #[command(flatten)]
    pub bits: BitArgs,
}

#[derive(Args, Debug)]
pub struct CapacityArgs {
    /// Image to measure.
    pub image: PathBuf,
    #[command(flatten)]
    pub bits: BitArgs,
}

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Image whose length prefix is read.
    pub image: PathBuf,
    #[command(flatten)]
    pub bits: BitArgs,
}

#[derive(Args, Debug)]
pub struct PlaneArgs {
    /// Image to read.
    pub image: PathBuf,
    /// Where to write the rendered plane.
    pub output: PathBuf,
    /// Layer index (0 is blue for color images).
    #[arg(long)]
    pub layer: u8,
    /// Bit position within the layer.
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=7))]
    pub bit: u8,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

pub(crate) fn load_image(path: &Path) -> CliResult<StegoImage> {
    read_raster(path)
        .map_err(|err| raster_error(&format!("failed reading {}", path.display()), err))
}

/// Returns true when writing to `path` would use a lossy container.
pub(crate) fn is_lossy_output(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("jpg") || ext.eq_ignore_ascii_case("jpeg"))
        .unwrap_or(false)
}
