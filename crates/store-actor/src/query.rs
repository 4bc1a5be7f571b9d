//! # Lookup Queries
//!
//! [`FindQuery`] bundles criteria, ordering, limit and offset for the `Find` request.
//! Defaults follow the listing endpoints: no criteria, ordered by id ascending, ten
//! results from offset zero.

use crate::entity::StoreEntity;
use std::cmp::Ordering;

/// Sort direction for a single key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Direction::Asc => ordering,
            Direction::Desc => ordering.reverse(),
        }
    }
}

/// Criteria + ordering + pagination for a `find` request.
///
/// ```rust,ignore
/// let query = FindQuery::<User>::new()
///     .filter(UserCriterion::State(UserState::Fresh))
///     .order_by(UserSortKey::CreatedAt, Direction::Desc)
///     .limit(20)
///     .offset(40);
/// ```
#[derive(Debug)]
pub struct FindQuery<T: StoreEntity> {
    pub criteria: Vec<T::Criterion>,
    pub order_by: Vec<(T::SortKey, Direction)>,
    pub limit: usize,
    pub offset: usize,
}

impl<T: StoreEntity> Default for FindQuery<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: StoreEntity> FindQuery<T> {
    /// Number of records returned when no limit is given.
    pub const DEFAULT_LIMIT: usize = 10;

    pub fn new() -> Self {
        Self {
            criteria: Vec::new(),
            order_by: Vec::new(),
            limit: Self::DEFAULT_LIMIT,
            offset: 0,
        }
    }

    /// Adds a criterion. All criteria must match.
    pub fn filter(mut self, criterion: T::Criterion) -> Self {
        self.criteria.push(criterion);
        self
    }

    /// Adds a sort key. Earlier keys take precedence; ties fall back to the id.
    pub fn order_by(mut self, key: T::SortKey, direction: Direction) -> Self {
        self.order_by.push((key, direction));
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    /// Runs the query over `records`, returning owned copies.
    pub fn apply<'a, I>(&self, records: I) -> Vec<T>
    where
        I: IntoIterator<Item = &'a T>,
    {
        let mut matched: Vec<T> = records
            .into_iter()
            .filter(|record| self.criteria.iter().all(|c| record.matches(c)))
            .cloned()
            .collect();

        matched.sort_by(|a, b| {
            self.order_by
                .iter()
                .map(|(key, direction)| direction.apply(a.compare_by(b, key)))
                .find(|ordering| ordering.is_ne())
                .unwrap_or_else(|| a.id().cmp(b.id()))
        });

        matched
            .into_iter()
            .skip(self.offset)
            .take(self.limit)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Item {
        id: u32,
        name: String,
        rank: u32,
    }

    #[derive(Debug)]
    enum ItemCriterion {
        Name(String),
        MinRank(u32),
    }

    #[derive(Debug)]
    enum ItemSortKey {
        Name,
        Rank,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("item error")]
    struct ItemError;

    impl StoreEntity for Item {
        type Id = u32;
        type Create = ();
        type Criterion = ItemCriterion;
        type SortKey = ItemSortKey;
        type Error = ItemError;

        fn from_create_params(id: u32, _: ()) -> Result<Self, Self::Error> {
            Ok(Self {
                id,
                name: String::new(),
                rank: 0,
            })
        }

        fn id(&self) -> &u32 {
            &self.id
        }

        fn matches(&self, criterion: &ItemCriterion) -> bool {
            match criterion {
                ItemCriterion::Name(name) => &self.name == name,
                ItemCriterion::MinRank(rank) => self.rank >= *rank,
            }
        }

        fn compare_by(&self, other: &Self, key: &ItemSortKey) -> Ordering {
            match key {
                ItemSortKey::Name => self.name.cmp(&other.name),
                ItemSortKey::Rank => self.rank.cmp(&other.rank),
            }
        }
    }

    fn items() -> Vec<Item> {
        [(3, "c", 1), (1, "a", 2), (2, "b", 2), (4, "a", 5)]
            .into_iter()
            .map(|(id, name, rank)| Item {
                id,
                name: name.to_string(),
                rank,
            })
            .collect()
    }

    fn ids(found: &[Item]) -> Vec<u32> {
        found.iter().map(|i| i.id).collect()
    }

    #[test]
    fn test_default_query_orders_by_id() {
        let records = items();
        let found = FindQuery::<Item>::new().apply(&records);
        assert_eq!(ids(&found), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_criteria_are_combined() {
        let records = items();
        let found = FindQuery::<Item>::new()
            .filter(ItemCriterion::Name("a".into()))
            .filter(ItemCriterion::MinRank(3))
            .apply(&records);
        assert_eq!(ids(&found), vec![4]);
    }

    #[test]
    fn test_ordering_with_tie_break_on_id() {
        let records = items();
        let found = FindQuery::<Item>::new()
            .order_by(ItemSortKey::Rank, Direction::Desc)
            .apply(&records);
        assert_eq!(ids(&found), vec![4, 1, 2, 3]);

        let found = FindQuery::<Item>::new()
            .order_by(ItemSortKey::Name, Direction::Asc)
            .order_by(ItemSortKey::Rank, Direction::Desc)
            .apply(&records);
        assert_eq!(ids(&found), vec![4, 1, 2, 3]);
    }

    #[test]
    fn test_limit_and_offset() {
        let records = items();
        let found = FindQuery::<Item>::new().offset(1).limit(2).apply(&records);
        assert_eq!(ids(&found), vec![2, 3]);

        let found = FindQuery::<Item>::new().offset(10).apply(&records);
        assert!(found.is_empty());
    }
}
