/// Data layer: core types, loading, filtering and view computation.
///
/// Architecture:
/// ```text
///  data dir (.parquet / .json / .csv)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse files → Frame → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  hourly / weekly / historical tables, counters
///   └──────────┘
///        │            ┌───────────┐
///        ├───────────▶│ selection │  empty choice → everything
///        ▼            └───────────┘
///   ┌──────────┐
///   │  filter   │  counter membership, date window, per-counter sums
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │   view    │  DashboardView, rebuilt per interaction
///   └──────────┘
/// ```

pub mod filter;
pub mod frame;
pub mod loader;
pub mod model;
pub mod selection;
pub mod view;
