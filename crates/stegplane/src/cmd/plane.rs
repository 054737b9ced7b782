use serde::Serialize;
use stegplane_raster::write_bit_plane;

use crate::cmd::{load_image, PlaneArgs};
use crate::exit::{raster_error, CliResult, SUCCESS};
use crate::output::{OutputFormat, Record};

#[derive(Serialize)]
struct PlaneOutput {
    image: String,
    output: String,
    layer: u8,
    bit: u8,
    width: u32,
    height: u32,
    ones: usize,
}

pub fn run(args: PlaneArgs, format: OutputFormat) -> CliResult<i32> {
    let image = load_image(&args.image)?;
    let plane = image
        .raster
        .bit_plane(args.layer, args.bit)
        .map_err(|err| raster_error("bit plane extraction failed", err))?;

    write_bit_plane(&plane, &args.output).map_err(|err| {
        raster_error(&format!("failed writing {}", args.output.display()), err)
    })?;

    let out = PlaneOutput {
        image: image.path().display().to_string(),
        output: args.output.display().to_string(),
        layer: args.layer,
        bit: args.bit,
        width: plane.width(),
        height: plane.height(),
        ones: plane.count_ones(),
    };

    Record {
        title: "bit plane",
        value: &out,
        rows: vec![
            ("Output", out.output.clone()),
            (
                "Layer",
                format!("{} ({})", out.layer, image.meta.layers.layer_name(out.layer)),
            ),
            ("Bit", out.bit.to_string()),
            (
                "Set bits",
                format!("{} of {}", out.ones, image.raster.pixel_count()),
            ),
        ],
        raw: out.ones.to_string(),
    }
    .print(format);

    Ok(SUCCESS)
}
