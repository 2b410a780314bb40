//! Transaction history records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single historical purchase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub amount: f64,
    pub timestamp: DateTime<Utc>,
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    "USD".to_string()
}

impl TransactionRecord {
    pub fn new(amount: f64, timestamp: DateTime<Utc>) -> Self {
        Self {
            amount,
            timestamp,
            currency: default_currency(),
        }
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }
}

/// All records for one merchant, as grouped by the history provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MerchantRecords {
    pub merchant: String,
    #[serde(default)]
    pub transactions: Vec<TransactionRecord>,
}

impl MerchantRecords {
    pub fn new(merchant: impl Into<String>, transactions: Vec<TransactionRecord>) -> Self {
        Self {
            merchant: merchant.into(),
            transactions,
        }
    }
}
