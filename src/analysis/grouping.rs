//! Row grouping by category.
//!
//! Rows are partitioned by the value of a category column, or kept
//! together as one implicit group when no category column is used.

use crate::dataset::Dataset;
use crate::error::Result;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

/// Label of the single group produced by [`Grouping::Ungrouped`].
pub const UNGROUPED_LABEL: &str = "all";

/// How rows are split into regression groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Grouping {
    /// One group per distinct value of the named column.
    Grouped { by: String },
    /// Every row in a single group.
    Ungrouped,
}

impl Grouping {
    /// Grouping for an optional category column. An empty name means ungrouped.
    pub fn from_column(column: Option<&str>) -> Self {
        match column {
            Some(name) if !name.is_empty() => Grouping::Grouped {
                by: name.to_string(),
            },
            _ => Grouping::Ungrouped,
        }
    }

    /// The category column, if any.
    pub fn column(&self) -> Option<&str> {
        match self {
            Grouping::Grouped { by } => Some(by),
            Grouping::Ungrouped => None,
        }
    }
}

/// Key of a category group.
///
/// Numeric cells order numerically and sort before text cells, which
/// order lexicographically. Numeric keys compare by value only, so "1" and
/// "1.0" are one group, labelled with the text seen first.
#[derive(Debug, Clone)]
pub enum CategoryKey {
    Number(f64, String),
    Text(String),
}

impl CategoryKey {
    pub fn parse(cell: &str) -> Self {
        match cell.parse::<f64>() {
            // Adding 0.0 folds -0.0 into 0.0.
            Ok(v) if !v.is_nan() => CategoryKey::Number(v + 0.0, cell.to_string()),
            _ => CategoryKey::Text(cell.to_string()),
        }
    }

    /// Text as it appeared in the data file.
    pub fn label(&self) -> &str {
        match self {
            CategoryKey::Number(_, text) | CategoryKey::Text(text) => text,
        }
    }
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Ord for CategoryKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (CategoryKey::Number(a, _), CategoryKey::Number(b, _)) => a.total_cmp(b),
            (CategoryKey::Number(..), CategoryKey::Text(_)) => Ordering::Less,
            (CategoryKey::Text(_), CategoryKey::Number(..)) => Ordering::Greater,
            (CategoryKey::Text(a), CategoryKey::Text(b)) => a.cmp(b),
        }
    }
}

impl PartialOrd for CategoryKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for CategoryKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for CategoryKey {}

/// A set of rows regressed together.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub label: String,
    /// Indices into the dataset, in original row order.
    pub rows: Vec<usize>,
}

/// Group item positions by key in one pass.
///
/// Positions within each group keep their input order; groups iterate in
/// ascending key order.
pub fn group_by<K, I>(keys: I) -> BTreeMap<K, Vec<usize>>
where
    K: Ord,
    I: IntoIterator<Item = K>,
{
    let mut grouped: BTreeMap<K, Vec<usize>> = BTreeMap::new();

    for (idx, key) in keys.into_iter().enumerate() {
        grouped.entry(key).or_default().push(idx);
    }

    grouped
}

/// Split the dataset's rows into regression groups.
pub fn partition(dataset: &Dataset, grouping: &Grouping) -> Result<Vec<Group>> {
    match grouping {
        Grouping::Ungrouped => Ok(vec![Group {
            label: UNGROUPED_LABEL.to_string(),
            rows: (0..dataset.len()).collect(),
        }]),
        Grouping::Grouped { by } => {
            let cells = dataset.column(by)?;
            let grouped = group_by(cells.into_iter().map(CategoryKey::parse));

            Ok(grouped
                .into_iter()
                .map(|(key, rows)| Group {
                    label: key.label().to_string(),
                    rows,
                })
                .collect())
        }
    }
}
