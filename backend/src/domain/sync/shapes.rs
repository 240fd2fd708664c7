//! Requested data shapes.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A named subset of the sync snapshot a client can opt into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Shape {
    /// Today's jobs visible to the caller.
    Jobs,
    /// Pools referenced by the returned jobs.
    Pools,
    /// Visit entries for the caller's jobs.
    Visits,
    /// Water readings taken on returned visits.
    Readings,
    /// Chemicals dosed on returned visits.
    Chemicals,
    /// Issues raised on returned visits.
    Issues,
    /// Van stock; always empty.
    VanStock,
}

impl Shape {
    /// Every shape in snapshot order.
    pub const ALL: [Self; 7] = [
        Self::Jobs,
        Self::Pools,
        Self::Visits,
        Self::Readings,
        Self::Chemicals,
        Self::Issues,
        Self::VanStock,
    ];

    /// Wire name as used in the `shapes` query parameter.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Jobs => "jobs",
            Self::Pools => "pools",
            Self::Visits => "visits",
            Self::Readings => "readings",
            Self::Chemicals => "chemicals",
            Self::Issues => "issues",
            Self::VanStock => "vanStock",
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for a shape name outside the fixed vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown shape: {0}")]
pub struct ParseShapeError(pub String);

impl FromStr for Shape {
    type Err = ParseShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|shape| shape.as_str() == s)
            .ok_or_else(|| ParseShapeError(s.to_owned()))
    }
}

/// Set of shapes requested for one sync call.
///
/// # Examples
/// ```
/// use backend::domain::{Shape, ShapeSet};
///
/// let shapes = ShapeSet::parse(Some("jobs, readings,bogus"));
/// assert!(shapes.contains(Shape::Jobs));
/// assert!(shapes.contains(Shape::Readings));
/// assert!(!shapes.contains(Shape::Pools));
///
/// let defaults = ShapeSet::parse(None);
/// assert!(defaults.contains(Shape::Visits));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ShapeSet(BTreeSet<Shape>);

impl ShapeSet {
    /// Shapes returned when the client does not say which it wants.
    pub const DEFAULT: [Shape; 3] = [Shape::Jobs, Shape::Pools, Shape::Visits];

    /// Parse the raw `shapes` parameter.
    ///
    /// `None` yields [`Self::DEFAULT`]. Unknown and blank entries are
    /// skipped rather than rejected.
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::defaults();
        };
        raw.split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .filter_map(|name| name.parse::<Shape>().ok())
            .collect()
    }

    /// The default shape selection.
    #[must_use]
    pub fn defaults() -> Self {
        Self::DEFAULT.into_iter().collect()
    }

    /// Whether `shape` was requested.
    #[must_use]
    pub fn contains(&self, shape: Shape) -> bool {
        self.0.contains(&shape)
    }

    /// Whether no shapes were requested.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate requested shapes in snapshot order.
    pub fn iter(&self) -> impl Iterator<Item = Shape> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<Shape> for ShapeSet {
    fn from_iter<T: IntoIterator<Item = Shape>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for ShapeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for shape in self.iter() {
            if !first {
                f.write_str(",")?;
            }
            f.write_str(shape.as_str())?;
            first = false;
        }
        Ok(())
    }
}
