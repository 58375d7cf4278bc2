use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::CallRecord;

/// Count of call records sharing one grouping key (call type or calendar
/// date), as exposed to the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct GroupCount {
    pub key: String,
    pub count: u64,
}

/// Boundary to the document store holding processed call records. The store
/// itself is an external collaborator; this port is the contract the
/// pipeline's aggregation step must satisfy.
#[async_trait]
pub trait CallRepository: Send + Sync {
    async fn insert(&self, record: &CallRecord) -> Result<Uuid, RepositoryError>;

    async fn list(&self) -> Result<Vec<CallRecord>, RepositoryError>;

    async fn count_by_call_type(&self) -> Result<Vec<GroupCount>, RepositoryError>;

    /// Counts grouped by `%Y-%m-%d` of `created_at`, sorted by date.
    async fn count_by_date(&self) -> Result<Vec<GroupCount>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("connection failed: {0}")]
    ConnectionFailed(String),
    #[error("query failed: {0}")]
    QueryFailed(String),
    #[error("not found: {0}")]
    NotFound(String),
}
