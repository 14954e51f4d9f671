//! Read-only access to the hosting platform's service history.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::lookup::HistoryQuery;

/// Existence queries against the platform-owned hosting history.
///
/// Implementations never create, update, or delete records. A failed
/// query is returned as an error; deciding whether that blocks checkout
/// is the caller's job.
#[async_trait]
pub trait HostingHistory: Send + Sync + 'static {
    /// Whether at least one record matches `query`.
    async fn exists(&self, query: &HistoryQuery) -> AppResult<bool>;
}
