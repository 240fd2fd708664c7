//! Non-empty identifier sets for child-record lookups.

use std::collections::BTreeSet;

/// Ordered, de-duplicated set of ids holding at least one element.
///
/// Record-store lookups filtered by parent ids take this type instead of a
/// slice, so an `IN ()` filter cannot be issued.
///
/// # Examples
/// ```
/// use backend::domain::{JobId, NonEmptyIds};
///
/// assert!(NonEmptyIds::<JobId>::collect(Vec::new()).is_none());
///
/// let id = JobId::random();
/// let ids = NonEmptyIds::collect([id, id]).expect("one id");
/// assert_eq!(ids.iter().count(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonEmptyIds<T: Ord>(BTreeSet<T>);

impl<T: Ord + Copy> NonEmptyIds<T> {
    /// Collect ids, returning `None` when there are none.
    pub fn collect(ids: impl IntoIterator<Item = T>) -> Option<Self> {
        let set: BTreeSet<T> = ids.into_iter().collect();
        if set.is_empty() { None } else { Some(Self(set)) }
    }

    /// Whether `id` is a member.
    #[must_use]
    pub fn contains(&self, id: &T) -> bool {
        self.0.contains(id)
    }

    /// Iterate ids in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        self.0.iter().copied()
    }
}
