use crate::breakdown::{FALLBACK_CATEGORY_COLOR, FALLBACK_CATEGORY_NAME};
use crate::error::{AnalyticsError, Result};
use crate::series::DEFAULT_MONTH_LABEL_FORMAT;
use crate::utils::validate_label_format;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AnalyticsConfig {
    #[schemars(description = "Number of months in the dashboard income/expense series, current month included")]
    pub dashboard_months: u32,

    #[schemars(description = "Number of months in the analytics income/expense series, current month included")]
    pub analytics_months: u32,

    #[schemars(description = "How many of the most recent transactions the dashboard lists")]
    pub recent_limit: usize,

    #[schemars(description = "Breakdown name used for transactions whose category no longer exists")]
    pub fallback_category_name: String,

    #[schemars(description = "Display color used together with the fallback category name")]
    pub fallback_category_color: String,

    #[schemars(description = "chrono format string for series month labels, e.g. '%b %Y' for 'Feb 2024'")]
    pub month_label_format: String,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            dashboard_months: 6,
            analytics_months: 6,
            recent_limit: 5,
            fallback_category_name: FALLBACK_CATEGORY_NAME.to_string(),
            fallback_category_color: FALLBACK_CATEGORY_COLOR.to_string(),
            month_label_format: DEFAULT_MONTH_LABEL_FORMAT.to_string(),
        }
    }
}

impl AnalyticsConfig {
    /// Parses and validates a config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn validate(&self) -> Result<()> {
        if self.dashboard_months == 0 {
            return Err(AnalyticsError::InvalidMonthCount(self.dashboard_months));
        }

        if self.analytics_months == 0 {
            return Err(AnalyticsError::InvalidMonthCount(self.analytics_months));
        }

        if self.fallback_category_name.trim().is_empty() {
            return Err(AnalyticsError::InvalidConfig(
                "Fallback category name must not be empty".to_string(),
            ));
        }

        validate_label_format(&self.month_label_format)
    }

    pub fn generate_json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(AnalyticsConfig)
    }
}
