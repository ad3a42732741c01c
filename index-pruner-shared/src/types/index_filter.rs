//! Selection of the indices to delete.

use std::fmt;
use std::sync::Arc;

/// The operational index that is never deleted.
pub const RESERVED_INDEX: &str = ".kibana";

/// Predicate deciding whether an index is targeted for deletion.
///
/// The default filter targets every index except [`RESERVED_INDEX`].
/// Matching is exact and case-sensitive.
#[derive(Clone)]
pub struct IndexFilter {
    predicate: Arc<dyn Fn(&str) -> bool + Send + Sync>,
}

impl IndexFilter {
    /// Create a filter from an arbitrary predicate.
    pub fn new(predicate: impl Fn(&str) -> bool + Send + Sync + 'static) -> Self {
        Self {
            predicate: Arc::new(predicate),
        }
    }

    /// Whether `index_name` should be deleted.
    pub fn matches(&self, index_name: &str) -> bool {
        (self.predicate)(index_name)
    }
}

impl Default for IndexFilter {
    fn default() -> Self {
        Self::new(|name| name != RESERVED_INDEX)
    }
}

impl fmt::Debug for IndexFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndexFilter").finish_non_exhaustive()
    }
}
