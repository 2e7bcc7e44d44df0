/// Data layer: core types, loading, cleaning and statistics.
///
/// Architecture:
/// ```text
///        .csv
///         │
///         ▼
///   ┌──────────┐
///   │  loader   │  parse + infer column types → Table
///   └──────────┘
///         │
///         ▼
///   ┌────────────────┐
///   │ TabularDataset  │  owns Option<Table>
///   └────────────────┘
///      │        │         │
///      ▼        ▼         ▼
///  cleaning    ops      stats     fill/drop, slice/sort/count, describe
///         │
///         ▼
///   ┌──────────┐
///   │ display   │  text rendering for the terminal
///   └──────────┘
/// ```

pub mod cleaning;
pub mod dataset;
pub mod display;
pub mod loader;
pub mod model;
pub mod ops;
pub mod stats;
