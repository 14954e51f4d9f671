//! Hosting service entity model.

use serde::{Deserialize, Serialize};

use trialgate_core::types::id::{ClientId, ProductId};
use trialgate_core::types::lookup::{HistoryOwner, HistoryQuery};
use trialgate_core::types::status::HostingStatus;

/// A provisioned service as recorded by the hosting platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostingRecord {
    /// Row identifier.
    pub id: i64,
    /// Owning client account.
    pub userid: ClientId,
    /// Product the service was ordered from.
    pub packageid: ProductId,
    /// Lifecycle status.
    pub domainstatus: HostingStatus,
    /// Email captured with the order, if any.
    #[serde(default)]
    pub email: Option<String>,
}

impl HostingRecord {
    /// Whether this record satisfies an existence query.
    pub fn matches(&self, query: &HistoryQuery) -> bool {
        if self.packageid != query.product_id || !query.status.admits(self.domainstatus) {
            return false;
        }

        match &query.owner {
            HistoryOwner::Client(client_id) => self.userid == *client_id,
            // MySQL's default collation compares case-insensitively.
            HistoryOwner::Email(email) => self
                .email
                .as_deref()
                .is_some_and(|stored| stored.eq_ignore_ascii_case(email)),
        }
    }
}
