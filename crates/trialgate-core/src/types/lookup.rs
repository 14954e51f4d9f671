//! Parameters of a hosting history existence query.

use serde::{Deserialize, Serialize};

use super::id::{ClientId, ProductId};
use super::status::HostingStatus;

/// Whose history is being looked up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryOwner {
    /// Match on `tblhosting.userid`.
    Client(ClientId),
    /// Match on the email recorded against the service.
    Email(String),
}

/// Which `domainstatus` values count as a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    /// Status must be one of the listed values.
    In(Vec<HostingStatus>),
    /// Status must not be any of the listed values.
    Except(Vec<HostingStatus>),
}

impl StatusFilter {
    /// Whether a record with `status` passes this filter.
    pub fn admits(&self, status: HostingStatus) -> bool {
        match self {
            Self::In(allowed) => allowed.contains(&status),
            Self::Except(excluded) => !excluded.contains(&status),
        }
    }
}

/// A read-only "does any record exist" query against hosting history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryQuery {
    /// Account or email the records must belong to.
    pub owner: HistoryOwner,
    /// Product (`packageid`) the records must reference.
    pub product_id: ProductId,
    /// Status restriction.
    pub status: StatusFilter,
}

impl HistoryQuery {
    /// Records for a client account, in any of the listed statuses.
    pub fn for_client(client_id: ClientId, product_id: ProductId, statuses: &[HostingStatus]) -> Self {
        Self {
            owner: HistoryOwner::Client(client_id),
            product_id,
            status: StatusFilter::In(statuses.to_vec()),
        }
    }

    /// Records for an email address, in any status except the listed ones.
    pub fn for_email(
        email: impl Into<String>,
        product_id: ProductId,
        excluded: &[HostingStatus],
    ) -> Self {
        Self {
            owner: HistoryOwner::Email(email.into()),
            product_id,
            status: StatusFilter::Except(excluded.to_vec()),
        }
    }
}
