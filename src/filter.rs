//! Transaction-list helpers: free-text search with a type filter, and the
//! short "recent transactions" list shown next to the dashboard figures.

use crate::breakdown::CategoryResolver;
use crate::schema::{Category, Transaction, TransactionType};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionQuery {
    /// Case-insensitive substring matched against the description and, when
    /// the category id exists in the catalog, the category name. The text is
    /// used as given, so only an empty string matches everything.
    pub search: Option<String>,
    pub kind: Option<TransactionType>,
}

impl TransactionQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    pub fn kind(mut self, kind: TransactionType) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn apply<'a>(
        &self,
        transactions: &'a [Transaction],
        categories: &[Category],
    ) -> Vec<&'a Transaction> {
        let resolver = CategoryResolver::new(categories);
        let needle = self.search.as_deref().map(str::to_lowercase);

        transactions
            .iter()
            .filter(|t| self.kind.map_or(true, |kind| t.kind == kind))
            .filter(|t| match &needle {
                None => true,
                Some(needle) => {
                    t.description.to_lowercase().contains(needle)
                        || resolver
                            .lookup(&t.category_id)
                            .is_some_and(|c| c.name.to_lowercase().contains(needle))
                }
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentTransaction {
    pub id: String,
    pub description: String,
    pub category_name: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub amount: f64,
    pub date: NaiveDate,
}

/// The first `limit` transactions in the order the storage layer supplied
/// them, which is newest first.
pub fn recent_transactions(
    transactions: &[Transaction],
    resolver: &CategoryResolver<'_>,
    limit: usize,
) -> Vec<RecentTransaction> {
    transactions
        .iter()
        .take(limit)
        .map(|t| RecentTransaction {
            id: t.id.clone(),
            description: t.description.clone(),
            category_name: resolver.resolve(&t.category_id).name.to_string(),
            kind: t.kind,
            amount: t.amount,
            date: t.date,
        })
        .collect()
}
