/// Plot layer: style parameters, chart rendering, and output-path derivation.
pub mod render;
pub mod style;

use std::path::{Path, PathBuf};

/// The PNG path for a data file: every literal `".dat"` in the path string is
/// replaced by `".png"`.
///
/// This is a global textual substitution, not a suffix swap: `run.dat.dat`
/// derives to `run.png.png`, and a path without any `".dat"` occurrence comes
/// back unchanged.
pub fn derived_png_path(path: &Path) -> PathBuf {
    PathBuf::from(path.to_string_lossy().replace(".dat", ".png"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suffix_is_replaced() {
        assert_eq!(derived_png_path(Path::new("data.dat")), PathBuf::from("data.png"));
        assert_eq!(
            derived_png_path(Path::new("runs/scan01.dat")),
            PathBuf::from("runs/scan01.png")
        );
    }

    #[test]
    fn every_occurrence_is_replaced() {
        assert_eq!(
            derived_png_path(Path::new("run.dat.dat")),
            PathBuf::from("run.png.png")
        );
        // Occurrences inside directory names are rewritten too.
        assert_eq!(
            derived_png_path(Path::new("my.data/file.dat")),
            PathBuf::from("my.pnga/file.png")
        );
    }

    #[test]
    fn path_without_dat_is_unchanged() {
        assert_eq!(derived_png_path(Path::new("scan.txt")), PathBuf::from("scan.txt"));
    }
}
