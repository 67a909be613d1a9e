use std::io::Write;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde_json::{Map, Value as JsonValue};

use crate::data::model::{CellValue, Dataset};

/// Output encodings for headless runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

/// Write `dataset` to `out` in the requested format, columns in dataset order.
pub fn write_dataset<W: Write>(dataset: &Dataset, format: OutputFormat, out: W) -> Result<()> {
    match format {
        OutputFormat::Csv => write_csv(dataset, out),
        OutputFormat::Json => write_json(dataset, out),
    }
}

fn write_csv<W: Write>(dataset: &Dataset, out: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer
        .write_record(&dataset.columns)
        .context("writing CSV header")?;
    for row in 0..dataset.len() {
        let fields = dataset
            .columns
            .iter()
            .map(|col| dataset.value(row, col).to_string());
        writer
            .write_record(fields)
            .with_context(|| format!("writing CSV row {row}"))?;
    }
    writer.flush().context("flushing CSV output")?;
    Ok(())
}

fn write_json<W: Write>(dataset: &Dataset, mut out: W) -> Result<()> {
    let rows: Vec<JsonValue> = (0..dataset.len())
        .map(|row| {
            let obj: Map<String, JsonValue> = dataset
                .columns
                .iter()
                .map(|col| (col.clone(), cell_to_json(dataset.value(row, col))))
                .collect();
            JsonValue::Object(obj)
        })
        .collect();
    serde_json::to_writer_pretty(&mut out, &rows).context("writing JSON output")?;
    writeln!(out).context("writing JSON output")?;
    Ok(())
}

fn cell_to_json(cell: &CellValue) -> JsonValue {
    serde_json::to_value(cell).unwrap_or(JsonValue::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Record;

    fn sample() -> Dataset {
        let mut a = Record::new();
        a.insert("Full name".into(), CellValue::String("Ana, Jr.".into()));
        a.insert("Age".into(), CellValue::Integer(21));
        let mut b = Record::new();
        b.insert("Full name".into(), CellValue::String("Bea".into()));
        b.insert("Age".into(), CellValue::Null);
        Dataset::new(vec!["Full name".into(), "Age".into()], vec![a, b])
    }

    #[test]
    fn csv_quotes_fields_and_blanks_nulls() {
        let mut buf = Vec::new();
        write_dataset(&sample(), OutputFormat::Csv, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "Full name,Age\n\"Ana, Jr.\",21\nBea,\n");
    }

    #[test]
    fn json_is_an_array_of_objects() {
        let mut buf = Vec::new();
        write_dataset(&sample(), OutputFormat::Json, &mut buf).unwrap();
        let parsed: JsonValue = serde_json::from_slice(&buf).unwrap();
        let rows = parsed.as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["Full name"], "Ana, Jr.");
        assert_eq!(rows[0]["Age"], 21);
        assert!(rows[1]["Age"].is_null());
    }
}
