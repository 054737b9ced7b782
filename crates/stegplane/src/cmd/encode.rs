use std::fs;

use serde::Serialize;
use stegplane_codec::{EncodeReport, Encoder};
use stegplane_raster::write_raster;
use tracing::warn;

use crate::cmd::{is_lossy_output, load_image, EncodeArgs};
use crate::exit::{encode_error, io_error, raster_error, CliResult, SUCCESS};
use crate::output::{OutputFormat, Record};

#[derive(Serialize)]
struct EncodeOutput<'a> {
    cover: String,
    output: String,
    format: String,
    #[serde(flatten)]
    report: &'a EncodeReport,
}

pub fn run(args: EncodeArgs, format: OutputFormat) -> CliResult<i32> {
    let range = args.bits.range()?;
    let mut image = load_image(&args.cover)?;
    let payload = fs::read(&args.message).map_err(|err| {
        io_error(&format!("failed reading {}", args.message.display()), err)
    })?;

    if payload.is_empty() {
        warn!(
            message = %args.message.display(),
            "message file is empty; only the length prefix is embedded"
        );
    }

    if is_lossy_output(&args.output) {
        warn!(
            output = %args.output.display(),
            "lossy output format will destroy the hidden message"
        );
    }

    let report = Encoder::new(range)
        .embed(&mut image.raster, &payload)
        .map_err(encode_error)?;

    write_raster(&image.raster, &args.output).map_err(|err| {
        raster_error(&format!("failed writing {}", args.output.display()), err)
    })?;

    let out = EncodeOutput {
        cover: image.path().display().to_string(),
        output: args.output.display().to_string(),
        format: image.meta.format.to_string(),
        report: &report,
    };

    Record {
        title: "encoded",
        value: &out,
        rows: vec![
            ("Output", out.output.clone()),
            ("Format", out.format.clone()),
            ("Payload bytes", report.payload_bytes.to_string()),
            ("Bits used", report.bits_written.to_string()),
            ("Capacity bits", report.capacity.bits.to_string()),
            ("Max payload bytes", report.max_payload_bytes.to_string()),
        ],
        raw: report.payload_bytes.to_string(),
    }
    .print(format);

    Ok(SUCCESS)
}
