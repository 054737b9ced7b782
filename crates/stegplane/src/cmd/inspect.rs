use serde::Serialize;
use stegplane_codec::{Decoder, PrefixReport};

use crate::cmd::{load_image, InspectArgs};
use crate::exit::{codec_error, CliResult, SUCCESS};
use crate::output::{OutputFormat, Record};

#[derive(Serialize)]
struct InspectOutput<'a> {
    image: String,
    #[serde(flatten)]
    prefix: &'a PrefixReport,
}

pub fn run(args: InspectArgs, format: OutputFormat) -> CliResult<i32> {
    let range = args.bits.range()?;
    let image = load_image(&args.image)?;

    let prefix = Decoder::new(range)
        .peek_length(&image.raster)
        .map_err(|err| codec_error("inspect failed", err))?;

    let out = InspectOutput {
        image: image.path().display().to_string(),
        prefix: &prefix,
    };

    Record {
        title: "length prefix",
        value: &out,
        rows: vec![
            ("Image", out.image.clone()),
            ("Length", prefix.length.to_string()),
            ("Framed bits", prefix.framed_bits.to_string()),
            ("Capacity bits", prefix.capacity_bits.to_string()),
            ("Plausible", yes_no(prefix.plausible).to_string()),
        ],
        raw: prefix.length.to_string(),
    }
    .print(format);

    Ok(SUCCESS)
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}
