/// Data layer: core types, XML conversion, and `.dat` loading.
///
/// Architecture:
/// ```text
///  profiler .xml
///        │
///        ▼
///   ┌──────────┐
///   │ convert   │  scan export → metadata + paired samples → write .dat
///   └──────────┘
///        │
///        ▼
///     .dat file    5-line # header, x<TAB>z rows
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  skip header → parse columns → Profile
///   └──────────┘
/// ```
pub mod convert;
pub mod loader;
pub mod model;
