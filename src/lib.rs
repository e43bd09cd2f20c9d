//! Surface profilometer data tooling: convert the instrument's XML export to
//! tab-separated `.dat` files and render them as transparent-background PNG
//! line plots.

pub mod data;
pub mod plot;

use std::path::Path;

use anyhow::{Context, Result};

use data::{convert, loader};
use plot::style::{PlotStyle, STYLE_FILE};

/// Run the pipeline for one input file.
///
/// `.xml` inputs are converted to a `.dat` file next to them first; anything
/// else is treated as an already-converted tab-separated data file. The plot
/// is written to the `.dat` path with every `".dat"` replaced by `".png"`.
pub fn run(input: &Path) -> Result<()> {
    let ext = input
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dat_path = match ext.as_str() {
        "xml" => convert::xml_to_dat(input)?,
        _ => input.to_path_buf(),
    };

    let profile = loader::load_dat(&dat_path)
        .with_context(|| format!("loading {}", dat_path.display()))?;
    log::info!(
        "loaded {} sample pairs from {}",
        profile.len(),
        dat_path.display()
    );

    let style = PlotStyle::load_or_default(Path::new(STYLE_FILE));
    let png_path = plot::derived_png_path(&dat_path);
    plot::render::render_png(&profile, &style, &png_path)
}
