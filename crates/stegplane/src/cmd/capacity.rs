use serde::Serialize;
use stegplane_codec::{BitRange, Encoder};

use crate::cmd::{load_image, CapacityArgs};
use crate::exit::{codec_error, CliResult, SUCCESS};
use crate::output::{OutputFormat, Record};

#[derive(Serialize)]
struct CapacityOutput {
    image: String,
    format: String,
    layers: String,
    bit_range: BitRange,
    capacity_bits: u64,
    max_payload_bytes: u64,
}

pub fn run(args: CapacityArgs, format: OutputFormat) -> CliResult<i32> {
    let range = args.bits.range()?;
    let image = load_image(&args.image)?;

    let capacity = Encoder::new(range)
        .capacity(&image.raster)
        .map_err(|err| codec_error("capacity check failed", err))?;

    let out = CapacityOutput {
        image: image.path().display().to_string(),
        format: image.meta.format.to_string(),
        layers: image.meta.layers.to_string(),
        bit_range: range,
        capacity_bits: capacity.bits,
        max_payload_bytes: capacity.max_payload_bytes(),
    };

    Record {
        title: "capacity",
        value: &out,
        rows: vec![
            ("Image", out.image.clone()),
            (
                "Size",
                format!("{}x{}", image.raster.width(), image.raster.height()),
            ),
            ("Format", out.format.clone()),
            ("Layers", out.layers.clone()),
            ("Bits", format!("{}-{}", range.start(), range.end())),
            ("Capacity bits", capacity.bits.to_string()),
            ("Max payload bytes", out.max_payload_bytes.to_string()),
        ],
        raw: out.max_payload_bytes.to_string(),
    }
    .print(format);

    Ok(SUCCESS)
}
