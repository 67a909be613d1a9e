/// Data layer: core types, loading, and the search pipeline.
///
/// Architecture:
/// ```text
///  .parquet / .json / .csv  (one file per competition)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse files → Dataset, tag rows with source_file
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  ordered columns + rows
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  competition → position → age/height → passport → projection
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod position;
