use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("Malformed transaction {id}: {details}")]
    MalformedTransaction { id: String, details: String },

    #[error("Malformed category {id}: {details}")]
    MalformedCategory { id: String, details: String },

    #[error("Invalid month count {0}: must be at least 1")]
    InvalidMonthCount(u32),

    #[error("Date calculation error: {0}")]
    DateError(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AnalyticsError>;
