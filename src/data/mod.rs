/// Data layer: core types, Arrow/JSON interop, and row selection.
///
/// Architecture:
/// ```text
///  RecordBatch / JSON records / Column builders
///        │
///        ▼
///   ┌──────────┐
///   │ interop  │  map physical types → SemanticType
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Table   │  Vec<Column>, equal lengths, unique names
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter  │  duplicate rows, head/tail indices
///   └──────────┘
/// ```

pub mod filter;
pub mod interop;
pub mod model;
