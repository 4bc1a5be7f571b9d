use std::collections::BTreeSet;

/// Names of the business fields modified on an entity instance.
///
/// Starts empty for every freshly built or loaded entity. The store persists a clean copy,
/// so the set never has to be reset on the caller's instance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Changes(BTreeSet<&'static str>);

impl Changes {
    pub fn mark(&mut self, field: &'static str) {
        self.0.insert(field);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Changed field names in alphabetical order.
    pub fn fields(&self) -> Vec<&'static str> {
        self.0.iter().copied().collect()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}
