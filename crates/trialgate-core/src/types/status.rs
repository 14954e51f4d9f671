//! Lifecycle status of a provisioned hosting service.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AppError;

/// `tblhosting.domainstatus` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HostingStatus {
    /// Ordered, awaiting activation.
    Pending,
    /// Provisioned and running.
    Active,
    /// Temporarily disabled.
    Suspended,
    /// Removed from the server.
    Terminated,
    /// Cancelled before or after provisioning.
    Cancelled,
    /// Flagged as fraudulent.
    Fraud,
    /// One-off product whose lifecycle has finished.
    Completed,
}

impl HostingStatus {
    /// Every status the platform knows about.
    pub const ALL: [HostingStatus; 7] = [
        Self::Pending,
        Self::Active,
        Self::Suspended,
        Self::Terminated,
        Self::Cancelled,
        Self::Fraud,
        Self::Completed,
    ];

    /// Return the status as stored by the platform.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Active => "Active",
            Self::Suspended => "Suspended",
            Self::Terminated => "Terminated",
            Self::Cancelled => "Cancelled",
            Self::Fraud => "Fraud",
            Self::Completed => "Completed",
        }
    }
}

impl fmt::Display for HostingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for HostingStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| {
                AppError::validation(format!(
                    "Invalid hosting status: '{s}'. Expected one of: Pending, Active, \
                     Suspended, Terminated, Cancelled, Fraud, Completed"
                ))
            })
    }
}
