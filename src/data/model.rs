// ---------------------------------------------------------------------------
// Profile – the loaded (position, height) trace
// ---------------------------------------------------------------------------

/// A single surface trace: parallel position/height columns of equal length.
#[derive(Debug, Clone, Default)]
pub struct Profile {
    /// Position along the scan axis (microns).
    pub x: Vec<f64>,
    /// Surface height (nanometres) – same length as `x`.
    pub z: Vec<f64>,
}

impl Profile {
    /// Number of sample pairs.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Whether the trace holds no samples.
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Largest position value, or `None` for an empty trace.
    pub fn x_max(&self) -> Option<f64> {
        self.x.iter().copied().reduce(f64::max)
    }

    /// (min, max) of the height column, or `None` for an empty trace.
    pub fn z_range(&self) -> Option<(f64, f64)> {
        let min = self.z.iter().copied().reduce(f64::min)?;
        let max = self.z.iter().copied().reduce(f64::max)?;
        Some((min, max))
    }

    /// Iterate over (position, height) pairs.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.z.iter().copied())
    }
}

// ---------------------------------------------------------------------------
// ProfileMetadata – the header block of a profiler run
// ---------------------------------------------------------------------------

/// Run metadata the profiler reports alongside the trace.
///
/// The instrument's XML export carries exactly these seven fields; they become
/// the five `#`-commented header lines of a `.dat` file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileMetadata {
    pub date: String,
    pub time: String,
    pub x_unit: String,
    pub z_unit: String,
    /// Sample count the instrument claims; used for pre-allocation only.
    pub data_points: usize,
    pub gain: f64,
    pub offset: f64,
}
