use crate::error::{AnalyticsError, Result};
use crate::schema::{Category, Transaction, TransactionType};
use chrono::{DateTime, NaiveDate};
use log::debug;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A transaction exactly as the storage layer hands it over. Nothing here is
/// trusted until it has been converted into a [`Transaction`].
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    pub id: String,

    #[serde(rename = "type")]
    #[schemars(description = "Either 'income' or 'expense'. Any other value is rejected.")]
    pub kind: String,

    #[schemars(description = "Non-negative amount in the user's currency")]
    pub amount: f64,

    pub category_id: String,

    #[schemars(
        description = "Either a calendar date (YYYY-MM-DD) or an RFC 3339 timestamp. Timestamps are reduced to the calendar date at their own offset."
    )]
    pub date: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub payment_method: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRecord {
    pub id: String,
    pub name: String,
    pub color: String,

    #[serde(rename = "type")]
    #[schemars(description = "Either 'income' or 'expense'")]
    pub kind: String,
}

/// Everything the storage layer supplies for one user.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct LedgerSnapshot {
    #[serde(default)]
    #[schemars(description = "All transactions of the user, in storage order")]
    pub transactions: Vec<TransactionRecord>,

    #[serde(default)]
    #[schemars(description = "The user's category catalog")]
    pub categories: Vec<CategoryRecord>,
}

/// Validated, typed counterpart of [`LedgerSnapshot`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Ledger {
    pub transactions: Vec<Transaction>,
    pub categories: Vec<Category>,
}

impl LedgerSnapshot {
    pub fn generate_json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(LedgerSnapshot)
    }

    pub fn schema_as_json() -> std::result::Result<String, serde_json::Error> {
        let schema = Self::generate_json_schema();
        serde_json::to_string_pretty(&schema)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Converts every record, failing on the first malformed one.
    pub fn into_ledger(self) -> Result<Ledger> {
        let transactions = self
            .transactions
            .into_iter()
            .map(Transaction::try_from)
            .collect::<Result<Vec<_>>>()?;

        let categories = self
            .categories
            .into_iter()
            .map(Category::try_from)
            .collect::<Result<Vec<_>>>()?;

        debug!(
            "Ingested {} transactions and {} categories",
            transactions.len(),
            categories.len()
        );

        Ok(Ledger {
            transactions,
            categories,
        })
    }
}

impl Ledger {
    pub fn from_json(json: &str) -> Result<Self> {
        LedgerSnapshot::from_json(json)?.into_ledger()
    }
}

impl TryFrom<TransactionRecord> for Transaction {
    type Error = AnalyticsError;

    fn try_from(record: TransactionRecord) -> Result<Self> {
        let kind = TransactionType::parse(&record.kind).ok_or_else(|| {
            AnalyticsError::MalformedTransaction {
                id: record.id.clone(),
                details: format!(
                    "unknown type '{}', expected 'income' or 'expense'",
                    record.kind
                ),
            }
        })?;

        let date = parse_record_date(&record.date).ok_or_else(|| {
            AnalyticsError::MalformedTransaction {
                id: record.id.clone(),
                details: format!(
                    "unparsable date '{}', expected YYYY-MM-DD or RFC 3339",
                    record.date
                ),
            }
        })?;

        let transaction = Transaction {
            id: record.id,
            kind,
            amount: record.amount,
            category_id: record.category_id,
            date,
            description: record.description,
            payment_method: record.payment_method,
        };
        transaction.validate()?;

        Ok(transaction)
    }
}

impl TryFrom<CategoryRecord> for Category {
    type Error = AnalyticsError;

    fn try_from(record: CategoryRecord) -> Result<Self> {
        let kind = TransactionType::parse(&record.kind).ok_or_else(|| {
            AnalyticsError::MalformedCategory {
                id: record.id.clone(),
                details: format!(
                    "unknown type '{}', expected 'income' or 'expense'",
                    record.kind
                ),
            }
        })?;

        Ok(Category {
            id: record.id,
            name: record.name,
            color: record.color,
            kind,
        })
    }
}

fn parse_record_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.date_naive())
        })
}
