//! Summary aggregation over the flat export CSV.
//!
//! Reads cost rows back from disk, sums amounts per service or per account,
//! and writes a summary CSV sorted by total descending. Bad input degrades
//! instead of failing: a blank service becomes "Uncategorized" and an
//! unparsable amount counts as zero.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryKey {
    Service,
    Account,
}

impl SummaryKey {
    fn header(&self) -> &'static str {
        match self {
            SummaryKey::Service => "service",
            SummaryKey::Account => "account",
        }
    }
}

/// Lenient view of one export row. Optional fields so a truncated or
/// hand-edited CSV still aggregates.
#[derive(Deserialize, Debug, Default)]
struct FlatRow {
    #[serde(default)]
    account_id: Option<String>,
    #[serde(default)]
    account_name: Option<String>,
    #[serde(default)]
    service: Option<String>,
    #[serde(default)]
    amount: Option<String>,
    #[serde(default)]
    unit: Option<String>,
}

impl FlatRow {
    fn key(&self, key: SummaryKey) -> String {
        match key {
            SummaryKey::Service => {
                let service = self.service.as_deref().unwrap_or("").trim();
                if service.is_empty() {
                    "Uncategorized".to_string()
                } else {
                    service.to_string()
                }
            }
            SummaryKey::Account => {
                let id = self.account_id.as_deref().unwrap_or("").trim();
                if !id.is_empty() {
                    return id.to_string();
                }
                let name = self.account_name.as_deref().unwrap_or("").trim();
                if !name.is_empty() {
                    return name.to_string();
                }
                "unknown".to_string()
            }
        }
    }

    fn amount(&self) -> f64 {
        self.amount
            .as_deref()
            .unwrap_or("0")
            .trim()
            .parse::<f64>()
            .unwrap_or(0.0)
    }
}

/// Accumulate per-key totals from a flat cost CSV. Returns the totals and
/// the currency unit (last non-empty one observed, "USD" by default).
pub fn load_totals<R: Read>(reader: R, key: SummaryKey) -> Result<(HashMap<String, f64>, String)> {
    let mut totals: HashMap<String, f64> = HashMap::new();
    let mut unit = "USD".to_string();

    let mut csv_reader = csv::ReaderBuilder::new().from_reader(reader);
    for record in csv_reader.deserialize() {
        let row: FlatRow = record.context("read cost row")?;
        if let Some(u) = row.unit.as_deref() {
            let u = u.trim();
            if !u.is_empty() {
                unit = u.to_string();
            }
        }
        *totals.entry(row.key(key)).or_insert(0.0) += row.amount();
    }

    Ok((totals, unit))
}

/// Write the summary table sorted by total descending. Ties may land in any
/// order.
pub fn write_summary<W: Write>(
    writer: W,
    totals: &HashMap<String, f64>,
    unit: &str,
    key: SummaryKey,
) -> Result<()> {
    let mut sorted: Vec<(&String, &f64)> = totals.iter().collect();
    sorted.sort_by(|a, b| b.1.partial_cmp(a.1).unwrap_or(Ordering::Equal));

    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record([key.header(), "total_amount", "unit"])?;
    for (name, total) in sorted {
        let formatted = format_amount(*total, unit);
        csv_writer.write_record([name.as_str(), formatted.as_str(), unit])?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Aggregate `input` into `output`. Returns false (writing nothing) when the
/// input holds no data rows.
pub fn summarize_file(input: &str, output: &str, key: SummaryKey) -> Result<bool> {
    if !Path::new(input).exists() {
        anyhow::bail!("Input CSV not found: {input}");
    }
    let file = File::open(input).with_context(|| format!("open {input}"))?;
    let (totals, unit) = load_totals(file, key)?;

    if totals.is_empty() {
        println!("No cost data found to aggregate.");
        return Ok(false);
    }

    let out = File::create(output).with_context(|| format!("create {output}"))?;
    write_summary(out, &totals, &unit, key)?;
    println!("Wrote cost summary to {output}");
    Ok(true)
}

/// Two decimals with thousands separators, `$`-prefixed for USD
/// (e.g. `$1,234.56`).
pub fn format_amount(value: f64, unit: &str) -> String {
    let prefix = if unit == "USD" { "$" } else { "" };
    let sign = if value < 0.0 { "-" } else { "" };
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    format!("{prefix}{sign}{grouped}.{frac_part}")
}
