//! Read-only repository over the platform's hosting service table.

use async_trait::async_trait;
use sqlx::MySqlPool;
use tracing::debug;

use trialgate_core::error::{AppError, ErrorKind};
use trialgate_core::result::AppResult;
use trialgate_core::traits::HostingHistory;
use trialgate_core::types::lookup::{HistoryOwner, HistoryQuery, StatusFilter};

/// Existence queries against `tblhosting` (or the configured table).
#[derive(Debug, Clone)]
pub struct HostingRepository {
    pool: MySqlPool,
    table: String,
}

impl HostingRepository {
    /// Create a repository over `table`.
    ///
    /// The table name is interpolated into SQL, so it is restricted to
    /// ASCII letters, digits and underscores.
    pub fn new(pool: MySqlPool, table: &str) -> AppResult<Self> {
        let valid = !table.is_empty()
            && table
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !valid {
            return Err(AppError::configuration(format!(
                "Invalid hosting table name: '{table}'"
            )));
        }

        Ok(Self {
            pool,
            table: table.to_string(),
        })
    }
}

/// Build the `SELECT 1 ... LIMIT 1` statement for a query.
fn existence_sql(table: &str, query: &HistoryQuery) -> String {
    let owner_column = match &query.owner {
        HistoryOwner::Client(_) => "userid",
        HistoryOwner::Email(_) => "email",
    };

    let status_clause = match &query.status {
        StatusFilter::In(statuses) if statuses.is_empty() => " AND 1 = 0".to_string(),
        StatusFilter::In(statuses) => {
            format!(" AND domainstatus IN ({})", placeholders(statuses.len()))
        }
        StatusFilter::Except(statuses) if statuses.is_empty() => String::new(),
        StatusFilter::Except(statuses) => {
            format!(" AND domainstatus NOT IN ({})", placeholders(statuses.len()))
        }
    };

    format!(
        "SELECT 1 FROM `{table}` WHERE {owner_column} = ? AND packageid = ?{status_clause} LIMIT 1"
    )
}

fn placeholders(count: usize) -> String {
    vec!["?"; count].join(", ")
}

#[async_trait]
impl HostingHistory for HostingRepository {
    async fn exists(&self, query: &HistoryQuery) -> AppResult<bool> {
        let sql = existence_sql(&self.table, query);
        debug!(sql = %sql, product_id = %query.product_id, "Querying hosting history");

        let mut statement = sqlx::query(&sql);
        statement = match &query.owner {
            HistoryOwner::Client(client_id) => statement.bind(client_id.get()),
            HistoryOwner::Email(email) => statement.bind(email.as_str()),
        };
        statement = statement.bind(query.product_id.get());

        let statuses = match &query.status {
            StatusFilter::In(statuses) | StatusFilter::Except(statuses) => statuses,
        };
        for status in statuses {
            statement = statement.bind(status.as_str());
        }

        let row = statement.fetch_optional(&self.pool).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                format!("Failed to query {}", self.table),
                e,
            )
        })?;

        Ok(row.is_some())
    }
}
