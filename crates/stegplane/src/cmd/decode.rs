use std::fs;
use std::path::Path;

use serde::Serialize;
use stegplane_codec::{DecodeReport, Decoder};

use crate::cmd::{load_image, DecodeArgs};
use crate::exit::{decode_error, io_error, CliResult, SUCCESS};
use crate::output::{payload_preview, print_raw, OutputFormat, Record};

#[derive(Serialize)]
struct DecodeOutput<'a> {
    stego: String,
    output: String,
    #[serde(flatten)]
    report: &'a DecodeReport,
}

pub fn run(args: DecodeArgs, format: OutputFormat) -> CliResult<i32> {
    let range = args.bits.range()?;
    let image = load_image(&args.stego)?;

    let (payload, report) = Decoder::new(range)
        .decode_with_report(&image.raster)
        .map_err(decode_error)?;

    if is_stdout(&args.output) {
        print_raw(&payload)
            .map_err(|err| io_error("failed writing payload to stdout", err))?;
        return Ok(SUCCESS);
    }

    fs::write(&args.output, &payload).map_err(|err| {
        io_error(&format!("failed writing {}", args.output.display()), err)
    })?;

    let out = DecodeOutput {
        stego: image.path().display().to_string(),
        output: args.output.display().to_string(),
        report: &report,
    };

    Record {
        title: "decoded",
        value: &out,
        rows: vec![
            ("Output", out.output.clone()),
            ("Payload bytes", report.payload_bytes.to_string()),
            ("Bits read", report.bits_read.to_string()),
            ("Preview", payload_preview(&payload)),
        ],
        raw: report.payload_bytes.to_string(),
    }
    .print(format);

    Ok(SUCCESS)
}

fn is_stdout(path: &Path) -> bool {
    path.as_os_str() == "-"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dash_means_stdout() {
        assert!(is_stdout(Path::new("-")));
        assert!(!is_stdout(Path::new("./-")));
        assert!(!is_stdout(Path::new("out.bin")));
    }
}
