/// Data layer: core types, loading, and aggregation.
///
/// Architecture:
/// ```text
///  <base>/alpha/<method><n>*          <base>/beta.txt
///        │                                  │
///        ▼                                  ▼
///   ┌──────────────────┐             ┌───────────────┐
///   │ loader::discover │ MetricFile  │ loader::beta  │ Vec<BetaSample>
///   └──────────────────┘             └───────────────┘
///        │                                  │
///        ▼                                  ▼
///   ┌──────────────────┐             ┌───────────────┐
///   │ loader::alpha    │ AlphaSeries │ stats         │ AggregatedBetaPoint
///   └──────────────────┘             └───────────────┘
/// ```

pub mod loader;
pub mod model;
pub mod stats;
