use std::io::{IsTerminal, Write};

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;

#[derive(Clone, Debug, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

/// One command result, rendered according to the selected [`OutputFormat`].
///
/// `Json` serializes `value`. `Table` and `Pretty` render `rows` in
/// order. `Raw` prints only `raw`.
pub struct Record<'a, T: Serialize> {
    pub title: &'a str,
    pub value: &'a T,
    pub rows: Vec<(&'static str, String)>,
    pub raw: String,
}

impl<T: Serialize> Record<'_, T> {
    pub fn print(&self, format: OutputFormat) {
        match format {
            OutputFormat::Json => println!("{}", to_json(self.value)),
            OutputFormat::Table => println!("{}", self.table()),
            OutputFormat::Pretty => {
                println!("{}:", self.title);
                let width = self.rows.iter().map(|(k, _)| k.len()).max().unwrap_or(0) + 1;
                for (key, value) in &self.rows {
                    println!("  {:<width$} {}", format!("{key}:"), value);
                }
            }
            OutputFormat::Raw => println!("{}", self.raw),
        }
    }

    fn table(&self) -> Table {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![self.title.to_uppercase(), String::new()]);
        for (key, value) in &self.rows {
            table.add_row(vec![key.to_string(), value.clone()]);
        }
        table
    }
}

pub fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "{}".to_string())
}

/// Write `data` to stdout unmodified. Short or failed writes are errors.
pub fn print_raw(data: &[u8]) -> std::io::Result<()> {
    let mut out = std::io::stdout().lock();
    out.write_all(data)?;
    out.flush()
}

/// Render `payload` for display: text as-is, anything else summarized.
pub fn payload_preview(payload: &[u8]) -> String {
    match std::str::from_utf8(payload) {
        Ok(text) => text.to_string(),
        Err(_) => format!("<binary {} bytes>", payload.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Sample {
        bits: u64,
    }

    #[test]
    fn table_lists_rows_in_order() {
        let record = Record {
            title: "capacity",
            value: &Sample { bits: 48 },
            rows: vec![("Bits", "48".to_string()), ("Max bytes", "2".to_string())],
            raw: "2".to_string(),
        };
        let rendered = record.table().to_string();
        let bits = rendered.find("Bits").expect("bits row");
        let max = rendered.find("Max bytes").expect("max row");
        assert!(bits < max);
        assert!(rendered.contains("CAPACITY"));
    }

    #[test]
    fn json_uses_serialized_value() {
        assert_eq!(to_json(&Sample { bits: 48 }), r#"{"bits":48}"#);
    }

    #[test]
    fn preview_summarizes_binary() {
        assert_eq!(payload_preview(b"hi"), "hi");
        assert_eq!(payload_preview(&[0xFF, 0xFE]), "<binary 2 bytes>");
    }
}
