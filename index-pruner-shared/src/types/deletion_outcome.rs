//! Result of a single index deletion.

/// How the cluster answered a delete request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeletionStatus {
    /// The cluster acknowledged the deletion.
    Acknowledged,
    /// The response was well-formed but `acknowledged` was false or absent.
    NotAcknowledged,
    /// The call failed; carries the error message.
    Failed(String),
}

/// Outcome of deleting one index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletionOutcome {
    /// The index the delete request targeted.
    pub index_name: String,
    /// What happened.
    pub status: DeletionStatus,
}

impl DeletionOutcome {
    pub fn acknowledged(index_name: impl Into<String>) -> Self {
        Self {
            index_name: index_name.into(),
            status: DeletionStatus::Acknowledged,
        }
    }

    pub fn not_acknowledged(index_name: impl Into<String>) -> Self {
        Self {
            index_name: index_name.into(),
            status: DeletionStatus::NotAcknowledged,
        }
    }

    pub fn failed(index_name: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            index_name: index_name.into(),
            status: DeletionStatus::Failed(error.into()),
        }
    }

    /// Whether the cluster acknowledged the deletion.
    pub fn is_acknowledged(&self) -> bool {
        self.status == DeletionStatus::Acknowledged
    }
}
