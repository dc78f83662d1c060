use crate::error::{AnalyticsError, Result};
use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    #[schemars(description = "Money received (salary, refunds, interest)")]
    Income,

    #[schemars(description = "Money spent (groceries, rent, subscriptions)")]
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "income" => Some(TransactionType::Income),
            "expense" => Some(TransactionType::Expense),
            _ => None,
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    #[schemars(description = "Opaque unique identifier assigned by the storage layer")]
    pub id: String,

    #[serde(rename = "type")]
    #[schemars(description = "Whether the amount was received or spent")]
    pub kind: TransactionType,

    #[schemars(
        description = "Non-negative amount in the user's currency. The sign shown to the user is derived from the type."
    )]
    pub amount: f64,

    #[schemars(
        description = "Reference to a category. May point to a category that no longer exists, in which case the transaction is grouped as 'Other'."
    )]
    pub category_id: String,

    #[schemars(description = "Calendar date in YYYY-MM-DD format. Only used for month membership.")]
    pub date: NaiveDate,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub payment_method: String,
}

impl Transaction {
    pub fn new(
        id: impl Into<String>,
        kind: TransactionType,
        amount: f64,
        category_id: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            amount,
            category_id: category_id.into(),
            date,
            description: String::new(),
            payment_method: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Rejects amounts that are negative or not finite. Aggregations call this
    /// for every transaction they consume and fail the whole computation on the
    /// first violation.
    pub fn validate(&self) -> Result<()> {
        if !self.amount.is_finite() {
            return Err(AnalyticsError::MalformedTransaction {
                id: self.id.clone(),
                details: format!("amount {} is not a finite number", self.amount),
            });
        }

        if self.amount < 0.0 {
            return Err(AnalyticsError::MalformedTransaction {
                id: self.id.clone(),
                details: format!("amount {} is negative", self.amount),
            });
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,

    #[schemars(
        description = "Display label. Breakdowns group by this name, so two categories sharing a name are merged."
    )]
    pub name: String,

    #[schemars(description = "Display color carried through to breakdown output unchanged (e.g. '#10B981')")]
    pub color: String,

    #[serde(rename = "type")]
    #[schemars(
        description = "Nominal type of the category. Does not restrict which transaction types may reference it."
    )]
    pub kind: TransactionType,
}

impl Category {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        color: impl Into<String>,
        kind: TransactionType,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color: color.into(),
            kind,
        }
    }
}
