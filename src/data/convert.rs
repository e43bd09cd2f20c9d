use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use thiserror::Error;

use super::model::{Profile, ProfileMetadata};

// ---------------------------------------------------------------------------
// Converter: profiler XML export → tab-separated .dat
// ---------------------------------------------------------------------------

/// Number of metadata elements a complete profiler export carries.
const METADATA_FIELDS: usize = 7;

/// Failure kinds of the XML conversion.
///
/// Incomplete metadata is not among them: the profiler occasionally drops
/// fields, so those are logged and defaulted instead of aborting the run.
#[derive(Debug, Error, PartialEq)]
pub enum ConvertError {
    #[error("line {line}: cannot parse sample value '{text}'")]
    BadSample { line: usize, text: String },
    #[error("unpaired trace data: {x_count} X samples vs {z_count} Z samples")]
    Unpaired { x_count: usize, z_count: usize },
}

/// Convert a profiler XML export into a `.dat` file next to it.
///
/// Returns the path of the written `.dat` file (the input path with its
/// extension replaced). An existing file at that path is overwritten.
pub fn xml_to_dat(path: &Path) -> Result<PathBuf> {
    let file = File::open(path)
        .with_context(|| format!("opening profiler XML {}", path.display()))?;
    let (meta, profile) = parse_profiler_xml(BufReader::new(file))
        .with_context(|| format!("parsing profiler XML {}", path.display()))?;

    let out_path = dat_output_path(path);
    let out = File::create(&out_path)
        .with_context(|| format!("creating {}", out_path.display()))?;
    let mut writer = BufWriter::new(out);
    write_dat(&mut writer, &meta, &profile)
        .with_context(|| format!("writing {}", out_path.display()))?;
    writer.flush().context("flushing .dat output")?;

    log::info!(
        "converted {} sample pairs to {}",
        profile.len(),
        out_path.display()
    );
    Ok(out_path)
}

/// The `.dat` path for a given XML input: extension swapped for `dat`.
pub fn dat_output_path(path: &Path) -> PathBuf {
    path.with_extension("dat")
}

// ---------------------------------------------------------------------------
// XML parsing
// ---------------------------------------------------------------------------

/// Scan the profiler export line by line.
///
/// The instrument writes one element per line, so no general XML machinery is
/// needed (or wanted: the layout is fixed and exports from other instruments
/// are not supported). Metadata elements may appear in any order before or
/// between the samples; `<X>` and `<Z>` samples are paired by order of
/// appearance.
pub fn parse_profiler_xml(reader: impl BufRead) -> Result<(ProfileMetadata, Profile)> {
    let mut meta = ProfileMetadata::default();
    let mut found = 0usize;
    let mut x = Vec::new();
    let mut z = Vec::new();

    for (i, line) in reader.lines().enumerate() {
        let line_no = i + 1;
        let line = line.with_context(|| format!("reading line {line_no}"))?;
        let Some((tag, text)) = element(&line) else {
            continue;
        };

        match tag {
            "TestDate" => {
                meta.date = first_token(text).to_string();
                found += 1;
            }
            "TestTime" => {
                meta.time = first_token(text).to_string();
                found += 1;
            }
            "XUnits" => {
                meta.x_unit = first_token(text).to_string();
                found += 1;
            }
            "ZUnits" => {
                meta.z_unit = first_token(text).to_string();
                found += 1;
            }
            "NumData" => {
                meta.data_points = parse_meta_number(text, tag).unwrap_or(0);
                found += 1;
                x.reserve(meta.data_points);
                z.reserve(meta.data_points);
            }
            "DataGain" => {
                meta.gain = parse_meta_number(text, tag).unwrap_or(0.0);
                found += 1;
            }
            "DataOffset" => {
                meta.offset = parse_meta_number(text, tag).unwrap_or(0.0);
                found += 1;
            }
            "X" => x.push(parse_sample(text, line_no)?),
            "Z" => z.push(parse_sample(text, line_no)?),
            _ => {}
        }
    }

    if found < METADATA_FIELDS {
        log::warn!(
            "incomplete metadata: {found} of {METADATA_FIELDS} fields found"
        );
    }
    if x.len() != z.len() {
        return Err(ConvertError::Unpaired {
            x_count: x.len(),
            z_count: z.len(),
        }
        .into());
    }

    Ok((meta, Profile { x, z }))
}

/// Split a line of the form `<Tag>text…` into `(tag, text)`.
///
/// Closing tags and any trailing `</Tag>` are dropped; lines that are not
/// elements return `None`.
fn element(line: &str) -> Option<(&str, &str)> {
    let rest = line.trim().strip_prefix('<')?;
    let gt = rest.find('>')?;
    let tag = &rest[..gt];
    if tag.starts_with('/') || tag.is_empty() {
        return None;
    }
    let text = &rest[gt + 1..];
    let text = match text.find('<') {
        Some(lt) => &text[..lt],
        None => text,
    };
    Some((tag, text))
}

/// First whitespace-separated token; the profiler appends unit suffixes to
/// numeric element text ("1000 points").
fn first_token(text: &str) -> &str {
    text.split_whitespace().next().unwrap_or("")
}

fn parse_meta_number<T: std::str::FromStr>(text: &str, tag: &str) -> Option<T> {
    match first_token(text).parse() {
        Ok(v) => Some(v),
        Err(_) => {
            log::warn!("ignoring unreadable <{tag}> value '{}'", text.trim());
            None
        }
    }
}

fn parse_sample(text: &str, line: usize) -> Result<f64, ConvertError> {
    first_token(text).parse().map_err(|_| ConvertError::BadSample {
        line,
        text: text.trim().to_string(),
    })
}

// ---------------------------------------------------------------------------
// .dat output
// ---------------------------------------------------------------------------

/// Write the `.dat` layout: five `#`-commented metadata lines, then one
/// `x<TAB>z` row per sample. This header is exactly what the plot stage
/// skips.
pub fn write_dat(
    mut writer: impl Write,
    meta: &ProfileMetadata,
    profile: &Profile,
) -> std::io::Result<()> {
    writeln!(writer, "# Date: {} {}", meta.date, meta.time)?;
    writeln!(writer, "# Units - x: {}\tz: {}", meta.x_unit, meta.z_unit)?;
    writeln!(writer, "# Data Points: {}", profile.len())?;
    writeln!(writer, "# Gain: {}", meta.gain)?;
    writeln!(writer, "# Offset: {}", meta.offset)?;
    for (x, z) in profile.points() {
        writeln!(writer, "{x}\t{z}")?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader;
    use std::io::Cursor;

    const SAMPLE_XML: &str = r#"<Profile>
    <Header>
        <TestDate>03-01-19</TestDate>
        <TestTime>10:15:02</TestTime>
        <XUnits>micrometres</XUnits>
        <ZUnits>nanometres</ZUnits>
        <NumData>3 points</NumData>
        <DataGain>1.5 nm/count</DataGain>
        <DataOffset>-0.25 nm</DataOffset>
    </Header>
    <Data>
        <Point>
            <X>0 um</X>
            <Z>12.5 nm</Z>
        </Point>
        <Point>
            <X>0.5 um</X>
            <Z>13.75 nm</Z>
        </Point>
        <Point>
            <X>1 um</X>
            <Z>-2 nm</Z>
        </Point>
    </Data>
</Profile>
"#;

    fn parse(text: &str) -> Result<(ProfileMetadata, Profile)> {
        parse_profiler_xml(Cursor::new(text.as_bytes().to_vec()))
    }

    #[test]
    fn metadata_is_extracted() {
        let (meta, profile) = parse(SAMPLE_XML).unwrap();
        assert_eq!(meta.date, "03-01-19");
        assert_eq!(meta.time, "10:15:02");
        assert_eq!(meta.x_unit, "micrometres");
        assert_eq!(meta.z_unit, "nanometres");
        assert_eq!(meta.data_points, 3);
        assert_eq!(meta.gain, 1.5);
        assert_eq!(meta.offset, -0.25);
        assert_eq!(profile.x, vec![0.0, 0.5, 1.0]);
        assert_eq!(profile.z, vec![12.5, 13.75, -2.0]);
    }

    #[test]
    fn missing_metadata_defaults() {
        let (meta, profile) = parse("<X>1</X>\n<Z>2</Z>\n").unwrap();
        assert_eq!(meta, ProfileMetadata::default());
        assert_eq!(profile.len(), 1);
    }

    #[test]
    fn unpaired_samples_are_fatal() {
        let err = parse("<X>1</X>\n<Z>2</Z>\n<X>3</X>\n").unwrap_err();
        assert_eq!(
            err.downcast_ref::<ConvertError>(),
            Some(&ConvertError::Unpaired { x_count: 2, z_count: 1 })
        );
    }

    #[test]
    fn unreadable_sample_is_fatal() {
        let err = parse("<X>wat</X>\n<Z>2</Z>\n").unwrap_err();
        match err.downcast_ref::<ConvertError>() {
            Some(ConvertError::BadSample { line: 1, .. }) => {}
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn dat_layout_matches_the_header_skip() {
        let (meta, profile) = parse(SAMPLE_XML).unwrap();
        let mut buf = Vec::new();
        write_dat(&mut buf, &meta, &profile).unwrap();
        let text = String::from_utf8(buf).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "# Date: 03-01-19 10:15:02");
        assert_eq!(lines[1], "# Units - x: micrometres\tz: nanometres");
        assert_eq!(lines[2], "# Data Points: 3");
        assert_eq!(lines[3], "# Gain: 1.5");
        assert_eq!(lines[4], "# Offset: -0.25");
        assert_eq!(lines[5], "0\t12.5");
        assert_eq!(lines.len(), 8);

        // The plot-stage loader reads the converter's output back as written.
        let reloaded = loader::parse_dat(Cursor::new(text.into_bytes())).unwrap();
        assert_eq!(reloaded.x, profile.x);
        assert_eq!(reloaded.z, profile.z);
    }

    #[test]
    fn dat_path_swaps_the_extension() {
        assert_eq!(
            dat_output_path(Path::new("runs/scan01.xml")),
            PathBuf::from("runs/scan01.dat")
        );
        assert_eq!(dat_output_path(Path::new("scan01")), PathBuf::from("scan01.dat"));
    }
}
