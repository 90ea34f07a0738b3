//! Screener - range filtering, text search and cyclic sorting over
//! stock-pattern detection results.
//!
//! The engine works on an immutable, in-memory snapshot of [`Record`]s and
//! derives the displayed sequence in three pure stages:
//!
//! - **Range filter**: every pattern metric within its inclusive bounds
//! - **Text search**: code OR name contains the query, ignoring case
//! - **Sort**: one column, ascending or descending, stable on ties
//!
//! # Quick Start
//!
//! ```rust
//! use screener_core::{derive_view, Bounds, Field, RangeConditions, ScreenParams, SortState};
//! use screener_core::loader;
//!
//! let records = loader::sample_records();
//!
//! let conditions = RangeConditions::default()
//!     .with(Field::CupDepth, Bounds::new(15.0, 30.0))
//!     .unwrap();
//!
//! let params = ScreenParams::new()
//!     .conditions(conditions)
//!     .sort(SortState::Unsorted.select(Field::VolumeRatio));
//!
//! let view = derive_view(&records, &params);
//! assert!(view.iter().all(|r| (15.0..=30.0).contains(&r.cup_depth)));
//! assert!(view.len() <= view.total());
//! ```
//!
//! # Sort Cycle
//!
//! Selecting the same column repeatedly moves through
//! ascending, descending and unsorted:
//!
//! ```rust
//! use screener_core::{Field, SortState};
//!
//! let s = SortState::Unsorted.select(Field::Price);
//! assert_eq!(s, SortState::asc(Field::Price));
//! let s = s.select(Field::Price);
//! assert_eq!(s, SortState::desc(Field::Price));
//! assert_eq!(s.select(Field::Price), SortState::Unsorted);
//! ```
//!
//! # Comparison
//!
//! | Kind | Fields | Ordering |
//! |------|--------|----------|
//! | Text | `code`, `name`, `detection_date` | Unicode root collation |
//! | Numeric | `price`, `cup_depth`, `handle_days`, `volume_ratio` | numeric |

mod error;
pub mod loader;
mod ordering;
mod range;
mod record;
mod search;
mod view;

pub use error::{Result, ScreenerError};
pub use ordering::{collate, compare_records, sort, Dir, SortState};
pub use range::{filter_by_range, Bounds, RangeConditions};
pub use record::{Field, FieldKind, Record, Value};
pub use search::{matches_query, search, SearchQuery};
pub use view::{derive_view, ScreenParams, ScreenView, Screener};
