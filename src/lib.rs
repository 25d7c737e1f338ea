//! Trainee lookup - search a trainee table and print course reports
//!
//! The table is one row per course enrolment, with the trainee's personal
//! fields repeated on every row. This library provides:
//!
//! - Loading the table from CSV, TSV, JSON or Parquet, with trainee numbers
//!   and phone numbers kept as exact strings
//! - A process-lifetime cache of loaded tables keyed by path and mtime
//! - Searching by name fragment or exact trainee number
//! - Grouping rows into one trainee record with an ordered course list
//! - Rendering a trainee as a report document, HTML page or text card
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use trainee_lookup::{group, load_file, render, search, to_html};
//!
//! let dataset = load_file(Path::new("data (1).csv"))?;
//! for id in search(&dataset, "Ahmad").iter() {
//!     let trainee = group(&dataset, id)?;
//!     println!("{}", to_html(&render(&trainee)));
//! }
//! # Ok::<(), trainee_lookup::DataError>(())
//! ```

pub mod cli;
pub mod data;
pub mod error;
pub mod report;
pub mod state;

// Re-export commonly used types
pub use data::cache::DatasetCache;
pub use data::filter::{SearchResult, search};
pub use data::grouping::group;
pub use data::loader::load_file;
pub use data::model::{CourseEntry, Dataset, Trainee, TrainingRecord};
pub use error::DataError;
pub use report::{Document, render, to_html};
