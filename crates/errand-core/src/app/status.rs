//! Status - プールの混み具合

use serde::{Deserialize, Serialize};

/// Number of active tasks per state.
///
/// Finished tasks are not counted; they leave the registry on completion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolCounts {
    pub pending: usize,
    pub running: usize,
}

impl PoolCounts {
    pub fn total(&self) -> usize {
        self.pending + self.running
    }

    pub fn is_idle(&self) -> bool {
        self.total() == 0
    }
}
