/// Data layer: raw table types, sources, and loading.
///
/// Architecture:
/// ```text
///  DirectorySource / RemoteSource / MemorySource
///        │  fetch("{Shot}/{Phase}_{view}") → CSV text
///        ▼
///   ┌──────────┐
///   │  loader   │  parse + validate 9 tables per shot type
///   └──────────┘
///        │  (a failing shot type is excluded, never partial)
///        ▼
///   ┌─────────────────┐
///   │ DatasetRegistry  │  ShotType → ShotTables, immutable
///   └─────────────────┘
/// ```

pub mod loader;
pub mod model;
pub mod source;

#[cfg(test)]
pub(crate) mod fixtures;
