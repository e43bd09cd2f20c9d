use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result, bail};

use super::model::Profile;

/// Leading lines of a `.dat` file that hold instrument metadata, not data.
/// The count is fixed by the converter's output layout; the content is never
/// inspected here.
pub const HEADER_LINES: usize = 5;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a profile from a tab-separated `.dat` file.
///
/// The first [`HEADER_LINES`] lines are skipped unconditionally; every
/// following line must carry at least two tab-separated numeric fields,
/// read as (position, height).
pub fn load_dat(path: &Path) -> Result<Profile> {
    let file = File::open(path)
        .with_context(|| format!("opening data file {}", path.display()))?;
    parse_dat(BufReader::new(file))
}

/// Parse the `.dat` layout from any buffered reader.
pub fn parse_dat(mut reader: impl BufRead) -> Result<Profile> {
    let mut line = String::new();
    for n in 0..HEADER_LINES {
        line.clear();
        let read = reader.read_line(&mut line).context("reading header")?;
        if read == 0 {
            bail!("file ends inside the header ({n} of {HEADER_LINES} lines)");
        }
    }

    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut profile = Profile::default();

    for (i, result) in csv_reader.records().enumerate() {
        let line_no = HEADER_LINES + i + 1;
        let record = result.with_context(|| format!("line {line_no}"))?;

        if record.len() < 2 {
            bail!(
                "line {line_no}: expected at least 2 tab-separated fields, got {}",
                record.len()
            );
        }

        profile.x.push(parse_field(&record, 0, line_no, "position")?);
        profile.z.push(parse_field(&record, 1, line_no, "height")?);
    }

    if profile.is_empty() {
        bail!("no data rows after the {HEADER_LINES}-line header");
    }

    log::debug!("parsed {} sample pairs", profile.len());
    Ok(profile)
}

fn parse_field(record: &csv::StringRecord, idx: usize, line_no: usize, col: &str) -> Result<f64> {
    let raw = record.get(idx).unwrap_or("");
    raw.trim()
        .parse::<f64>()
        .with_context(|| format!("line {line_no}: {col} field '{raw}' is not a number"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
