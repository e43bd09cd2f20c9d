use std::ops::Range;
use std::path::Path;

use anyhow::{Context, Result};
use image::{Rgba, RgbaImage};
use plotters::prelude::*;

use super::style::PlotStyle;
use crate::data::model::Profile;

/// Fraction of the data span left as breathing room beyond the trace.
const AXIS_MARGIN: f64 = 0.05;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Render the profile as a line plot and write it as a transparent-background
/// PNG. An existing file at `path` is overwritten.
pub fn render_png(profile: &Profile, style: &PlotStyle, path: &Path) -> Result<()> {
    let rgb = draw(profile, style)?;
    let rgba = keyed_rgba(&rgb, style.width, style.height);
    rgba.save_with_format(path, image::ImageFormat::Png)
        .with_context(|| format!("writing {}", path.display()))?;
    log::info!("wrote {}", path.display());
    Ok(())
}

// ---------------------------------------------------------------------------
// Chart drawing
// ---------------------------------------------------------------------------

/// Draw the chart into an RGB pixel buffer on a white canvas.
///
/// The white canvas doubles as the transparency key: anything left white after
/// drawing becomes fully transparent in the encoded PNG.
pub fn draw(profile: &Profile, style: &PlotStyle) -> Result<Vec<u8>> {
    let (x_range, z_range) = axis_ranges(profile)?;

    let mut buf = vec![0u8; style.width as usize * style.height as usize * 3];
    {
        let root =
            BitMapBackend::with_buffer(&mut buf, (style.width, style.height)).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .margin(style.margin)
            .x_label_area_size(style.x_label_area_size)
            .y_label_area_size(style.y_label_area_size)
            .build_cartesian_2d(x_range, z_range)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .disable_y_mesh()
            .x_desc(style.x_label.as_str())
            .y_desc(style.y_label.as_str())
            .axis_desc_style(("sans-serif", style.label_size))
            .draw()?;

        chart.draw_series(LineSeries::new(profile.points(), style.line_style()))?;

        root.present()?;
    }
    Ok(buf)
}

/// Axis ranges: x clamped to start at zero with headroom on the right, z
/// padded on both sides. A degenerate span falls back to a unit pad so a
/// single-row trace still renders.
fn axis_ranges(profile: &Profile) -> Result<(Range<f64>, Range<f64>)> {
    let x_max = profile.x_max().context("profile holds no samples")?;
    let (z_min, z_max) = profile.z_range().context("profile holds no samples")?;

    let x_hi = if x_max > 0.0 {
        x_max * (1.0 + AXIS_MARGIN)
    } else {
        1.0
    };

    let z_span = z_max - z_min;
    let z_pad = if z_span > 0.0 { z_span * AXIS_MARGIN } else { 1.0 };

    Ok((0.0..x_hi, (z_min - z_pad)..(z_max + z_pad)))
}

// ---------------------------------------------------------------------------
// Transparency keying + PNG encoding
// ---------------------------------------------------------------------------

/// Convert the RGB canvas to RGBA, keying the white background out.
fn keyed_rgba(rgb: &[u8], width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        let i = (y as usize * width as usize + x as usize) * 3;
        match (rgb[i], rgb[i + 1], rgb[i + 2]) {
            (0xff, 0xff, 0xff) => Rgba([0, 0, 0, 0]),
            (r, g, b) => Rgba([r, g, b, 0xff]),
        }
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
