//! Exploratory data analysis helpers for in-memory tables.
//!
//! * [`inspect()`] prints shape, memory, types, nulls, duplicates, head/tail.
//! * [`summary::profile_columns`] classifies each column and reports
//!   cardinality and missingness.
//! * [`summary::summarize_numeric`] computes descriptive statistics for
//!   integer and floating columns.
//! * [`summary::summarize_categorical`] reports count, distinct values, top
//!   value and frequency for the remaining columns.
//! * [`display`] renders several objects side by side as HTML or text.
//!
//! ```
//! use rusty_eda::data::model::{Column, Table};
//! use rusty_eda::summary::{profile_columns, summarize_numeric, Category};
//!
//! let table = Table::new(vec![
//!     Column::integer("id", (0..4).map(Some)),
//!     Column::floating("score", [Some(1.0), None, Some(2.5), Some(4.0)]),
//! ])
//! .unwrap();
//!
//! let profile = profile_columns(&table);
//! assert_eq!(profile.get("id").unwrap().category, Category::NumericIndex);
//!
//! let numeric = summarize_numeric(&table);
//! assert_eq!(numeric.get("score").unwrap().missing, 1);
//! ```

pub mod data;
pub mod display;
pub mod error;
pub mod inspect;
pub mod stats;
pub mod summary;

pub use data::model::{Column, SemanticType, Table, Value};
pub use error::{EdaError, Result};
pub use inspect::{inspect, inspect_with, InspectOptions, InspectionReport};
