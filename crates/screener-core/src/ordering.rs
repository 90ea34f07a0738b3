//! Sort state machine and record ordering.
//!
//! [`SortState`] tracks the selected column and direction. Selecting a
//! column cycles it through ascending, descending and unsorted:
//!
//! ```text
//! Unsorted ──select F──▶ (F, Asc) ──select F──▶ (F, Desc) ──select F──▶ Unsorted
//!                           ▲                      │
//!                           └──── select G ≠ F ────┘  (always lands on (G, Asc))
//! ```
//!
//! [`sort`] applies a state to a sequence. Ties keep their input order.

use std::cell::RefCell;
use std::cmp::Ordering;
use std::fmt;

use feruca::Collator;
use serde::{Deserialize, Serialize};

use crate::record::{Field, FieldKind, Record};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dir {
    /// Ascending order (smallest first).
    #[default]
    Asc,
    /// Descending order (largest first).
    Desc,
}

impl Dir {
    /// Returns `true` if this is ascending order.
    pub fn is_asc(self) -> bool {
        matches!(self, Dir::Asc)
    }

    /// Returns `true` if this is descending order.
    pub fn is_desc(self) -> bool {
        matches!(self, Dir::Desc)
    }

    /// Applies this direction to an ordering.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Dir::Asc => ordering,
            Dir::Desc => ordering.reverse(),
        }
    }

    /// Returns the display name of this direction.
    pub fn as_str(self) -> &'static str {
        match self {
            Dir::Asc => "asc",
            Dir::Desc => "desc",
        }
    }
}

impl fmt::Display for Dir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Current ordering of the view.
///
/// Only the three shapes of the selection cycle are representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum SortState {
    /// Input order.
    #[default]
    Unsorted,
    /// Ordered by one column.
    Sorted { field: Field, dir: Dir },
}

impl SortState {
    /// Ascending on `field`.
    pub fn asc(field: Field) -> Self {
        SortState::Sorted {
            field,
            dir: Dir::Asc,
        }
    }

    /// Descending on `field`.
    pub fn desc(field: Field) -> Self {
        SortState::Sorted {
            field,
            dir: Dir::Desc,
        }
    }

    /// Returns the state after the user selects `field`.
    pub fn select(self, field: Field) -> Self {
        match self {
            SortState::Sorted {
                field: current,
                dir: Dir::Asc,
            } if current == field => SortState::desc(field),
            SortState::Sorted {
                field: current,
                dir: Dir::Desc,
            } if current == field => SortState::Unsorted,
            SortState::Sorted { .. } | SortState::Unsorted => SortState::asc(field),
        }
    }

    /// Returns the selected column, if any.
    pub fn field(self) -> Option<Field> {
        match self {
            SortState::Unsorted => None,
            SortState::Sorted { field, .. } => Some(field),
        }
    }

    /// Returns the direction, if sorted.
    pub fn dir(self) -> Option<Dir> {
        match self {
            SortState::Unsorted => None,
            SortState::Sorted { dir, .. } => Some(dir),
        }
    }

    /// Returns `true` for the unsorted state.
    pub fn is_unsorted(self) -> bool {
        matches!(self, SortState::Unsorted)
    }
}

impl fmt::Display for SortState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortState::Unsorted => write!(f, "unsorted"),
            SortState::Sorted { field, dir } => write!(f, "{field} {dir}"),
        }
    }
}

thread_local! {
    static ROOT_COLLATOR: RefCell<Collator> = RefCell::new(Collator::default());
}

/// Collated string comparison under the Unicode root collation.
///
/// Accented letters sort next to their base letter and hiragana sorts
/// together with katakana. Strings the collation considers equal fall back
/// to code-point order, so only identical strings compare equal.
pub fn collate(a: &str, b: &str) -> Ordering {
    ROOT_COLLATOR
        .with(|collator| collator.borrow_mut().collate(a, b))
        .then_with(|| a.cmp(b))
}

/// Compares two records on one column, ascending.
///
/// The comparator is chosen by the column's [`FieldKind`], not by the
/// runtime value.
pub fn compare_records(a: &Record, b: &Record, field: Field) -> Ordering {
    match field.kind() {
        FieldKind::Text => collate(text(a, field), text(b, field)),
        FieldKind::Numeric => number(a, field).total_cmp(&number(b, field)),
    }
}

fn text(record: &Record, field: Field) -> &str {
    record.text(field).unwrap_or_default()
}

fn number(record: &Record, field: Field) -> f64 {
    record.number(field).unwrap_or_default()
}

/// Reorders `records` according to `state`.
///
/// `Unsorted` returns the input order. Otherwise records are paired with
/// their input position, which breaks every tie, so the result is stable
/// regardless of the underlying sort.
pub fn sort<'a>(records: &[&'a Record], state: SortState) -> Vec<&'a Record> {
    let SortState::Sorted { field, dir } = state else {
        return records.to_vec();
    };

    let mut indexed: Vec<(usize, &'a Record)> = records.iter().copied().enumerate().collect();
    indexed.sort_unstable_by(|(ia, a), (ib, b)| {
        dir.apply(compare_records(a, b, field))
            .then_with(|| ia.cmp(ib))
    });
    indexed.into_iter().map(|(_, record)| record).collect()
}
