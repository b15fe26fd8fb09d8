/// Data layer: record types, ingestion, filtering, and ranking.
///
/// Architecture:
/// ```text
///  NASA feed / .json        .geojson / .csv
///        │                        │
///        ▼                        ▼
///   ┌──────────┐  raw shapes → ┌───────────┐
///   │  loader   │──────────────│ normalize  │  age grammar, coordinates,
///   └──────────┘               └───────────┘  numeric coercion
///        │
///        ▼
///   ┌────────────────────────────┐
///   │ MeteoriteCatalog / Crater… │  records + category universes
///   └────────────────────────────┘
///        │
///        ▼
///   ┌──────────┐      ┌──────────┐
///   │  filter   │─────▶│   rank    │  index views → top-N
///   └──────────┘      └──────────┘
/// ```
pub mod filter;
pub mod loader;
pub mod model;
pub mod normalize;
pub mod rank;
