//! Data layer: core types, loading, searching and grouping.
//!
//! Architecture:
//! ```text
//!  .csv / .tsv / .json / .parquet
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse file → Dataset   (memoized by cache)
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │ Dataset   │  Vec<TrainingRecord>, one row per course enrolment
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter   │  name / identifier predicate → SearchResult
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │ grouping  │  identifier → Trainee (personal fields + courses)
//!   └──────────┘
//! ```

pub mod cache;
pub mod filter;
pub mod grouping;
pub mod loader;
pub mod model;
pub mod stats;

#[cfg(test)]
pub(crate) mod fixtures;
