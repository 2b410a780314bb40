//! JSON file record store
//!
//! [`JsonRecordStore`] implements all three record provider ports over a
//! directory of JSON files:
//!
//! ```text
//! <data_dir>/
//!   transactions/user_<id>_merchant_<m>.json   {"transactions": [...]}
//!   groups/<group_id>.json                     {"name", "members": [{"name", "role"}]}
//!   chats/<chat_id>.json                       {"messages": [{"sender_type", "content"}]}
//! ```
//!
//! A missing directory or file means "no records". A transaction file that
//! fails to parse is skipped with a warning so one bad export never hides
//! the rest of the history; a single transaction with an unreadable
//! timestamp is dropped.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use lattice_application::ports::record_providers::{
    ConversationHistoryProvider, GroupRosterProvider, ProviderError, TransactionHistoryProvider,
};
use lattice_domain::{GroupMember, HistoryEntry, MerchantRecords, TransactionRecord};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const UNKNOWN_MERCHANT: &str = "Unknown merchant";

#[derive(Debug, Deserialize)]
struct TransactionFile {
    #[serde(default)]
    transactions: Vec<RawTransaction>,
}

#[derive(Debug, Deserialize)]
struct RawTransaction {
    #[serde(default)]
    datetime: Option<String>,
    #[serde(default)]
    price: Option<RawPrice>,
    #[serde(default)]
    merchant: Option<RawMerchant>,
    #[serde(default)]
    currency: Option<String>,
    #[serde(default)]
    payment_methods: Vec<RawPaymentMethod>,
}

#[derive(Debug, Deserialize)]
struct RawPrice {
    #[serde(default)]
    total: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawMerchant {
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawPaymentMethod {
    #[serde(default)]
    transaction_amount: Option<f64>,
}

impl RawTransaction {
    /// Price total, else the sum of the payment-method amounts
    fn amount(&self) -> f64 {
        match self.price.as_ref().and_then(|p| p.total) {
            Some(total) if total != 0.0 => total,
            _ => self
                .payment_methods
                .iter()
                .filter_map(|pm| pm.transaction_amount)
                .sum(),
        }
    }

    fn merchant_name(&self) -> &str {
        self.merchant
            .as_ref()
            .and_then(|m| m.name.as_deref())
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(UNKNOWN_MERCHANT)
    }
}

#[derive(Debug, Deserialize)]
struct GroupFile {
    #[serde(default)]
    members: Vec<GroupMember>,
}

#[derive(Debug, Deserialize)]
struct ChatFile {
    #[serde(default)]
    messages: Vec<HistoryEntry>,
}

/// Parse an ISO-8601 timestamp; offset-less values are taken as UTC.
fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Group one file's transactions by merchant name, in first-seen order
fn group_by_merchant(file: TransactionFile, path: &Path) -> Vec<MerchantRecords> {
    let mut order: Vec<String> = Vec::new();
    let mut grouped: BTreeMap<String, Vec<TransactionRecord>> = BTreeMap::new();

    for tx in file.transactions {
        let Some(timestamp) = tx.datetime.as_deref().and_then(parse_timestamp) else {
            debug!(
                "Skipping transaction with unreadable datetime {:?} in {}",
                tx.datetime,
                path.display()
            );
            continue;
        };
        let mut record = TransactionRecord::new(tx.amount(), timestamp);
        if let Some(currency) = tx.currency.as_deref() {
            record = record.with_currency(currency);
        }

        let merchant = tx.merchant_name().to_string();
        if !grouped.contains_key(&merchant) {
            order.push(merchant.clone());
        }
        grouped.entry(merchant).or_default().push(record);
    }

    order
        .into_iter()
        .filter_map(|name| {
            let records = grouped.remove(&name)?;
            Some(MerchantRecords::new(name, records))
        })
        .collect()
}

/// Record store over a directory of JSON files
#[derive(Debug, Clone)]
pub struct JsonRecordStore {
    root: PathBuf,
}

impl JsonRecordStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<root>/<dir>/<id>.json`; ids that could leave `dir` name no record
    fn record_path(&self, dir: &str, id: &str) -> Result<PathBuf, ProviderError> {
        let id = id.trim();
        if id.is_empty() || id == "." || id.contains("..") || id.contains(['/', '\\']) {
            return Err(ProviderError::NotFound(format!("{} id {:?}", dir, id)));
        }
        Ok(self.root.join(dir).join(format!("{}.json", id)))
    }

    /// Read and parse one JSON file; `Ok(None)` when it does not exist.
    async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, ProviderError> {
        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(ProviderError::Io(format!("{}: {}", path.display(), e))),
        };
        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|e| ProviderError::Malformed {
                path: path.display().to_string(),
                reason: e.to_string(),
            })
    }

    /// Transaction files belonging to `user_id`, sorted by file name
    async fn transaction_files(&self, user_id: &str) -> Result<Vec<PathBuf>, ProviderError> {
        let dir = self.root.join("transactions");
        let mut entries = match tokio::fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(ProviderError::Io(format!("{}: {}", dir.display(), e))),
        };

        let prefix = format!("user_{}_merchant_", user_id);
        let mut files = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| ProviderError::Io(e.to_string()))?
        {
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            if name.starts_with(&prefix) && name.ends_with(".json") {
                files.push(entry.path());
            }
        }
        files.sort();
        Ok(files)
    }
}

#[async_trait]
impl TransactionHistoryProvider for JsonRecordStore {
    async fn merchant_records(&self, user_id: &str) -> Result<Vec<MerchantRecords>, ProviderError> {
        let mut all = Vec::new();

        for path in self.transaction_files(user_id).await? {
            match Self::read_json::<TransactionFile>(&path).await {
                Ok(Some(file)) => all.extend(group_by_merchant(file, &path)),
                Ok(None) => {}
                Err(e) => warn!("Skipping transaction file: {}", e),
            }
        }

        debug!(
            "Loaded {} merchant group(s) for user {}",
            all.len(),
            user_id
        );
        Ok(all)
    }
}

#[async_trait]
impl GroupRosterProvider for JsonRecordStore {
    async fn members(&self, group_id: &str) -> Result<Vec<GroupMember>, ProviderError> {
        let path = self.record_path("groups", group_id)?;
        let file: Option<GroupFile> = Self::read_json(&path).await?;
        Ok(file
            .map(|f| {
                f.members
                    .into_iter()
                    .filter(|m| !m.name.trim().is_empty())
                    .collect()
            })
            .unwrap_or_default())
    }
}

#[async_trait]
impl ConversationHistoryProvider for JsonRecordStore {
    async fn recent_messages(
        &self,
        chat_id: &str,
        limit: usize,
    ) -> Result<Vec<HistoryEntry>, ProviderError> {
        let path = self.record_path("chats", chat_id)?;
        let Some(file) = Self::read_json::<ChatFile>(&path).await? else {
            return Ok(Vec::new());
        };
        let mut messages = file.messages;
        if messages.len() > limit {
            messages.drain(..messages.len() - limit);
        }
        Ok(messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use lattice_domain::SenderType;
    use std::fs;
    use tempfile::TempDir;

    fn store_with(files: &[(&str, &str)]) -> (TempDir, JsonRecordStore) {
        let dir = TempDir::new().unwrap();
        for (rel, content) in files {
            let path = dir.path().join(rel);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }
        let store = JsonRecordStore::new(dir.path());
        (dir, store)
    }

    const COFFEE: &str = r#"{"transactions": [
        {"datetime": "2025-03-10T09:00:00Z", "price": {"total": 4.5},
         "merchant": {"name": "Blue Bottle"}, "currency": "USD"},
        {"datetime": "2025-03-11T09:00:00", "price": {"total": 0},
         "merchant": {"name": "Blue Bottle"},
         "payment_methods": [{"transaction_amount": 3.0}, {"transaction_amount": 2.25}]},
        {"datetime": "yesterday-ish", "price": {"total": 99.0},
         "merchant": {"name": "Blue Bottle"}},
        {"datetime": "2025-03-12T10:30:00+02:00", "price": {"total": 12.0}}
    ]}"#;

    #[test]
    fn test_parse_timestamp_variants() {
        let utc = Utc.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap();
        assert_eq!(parse_timestamp("2025-03-10T09:00:00Z"), Some(utc));
        assert_eq!(parse_timestamp("2025-03-10T09:00:00"), Some(utc));
        assert_eq!(parse_timestamp("2025-03-10T11:00:00+02:00"), Some(utc));
        assert_eq!(parse_timestamp("not a date"), None);
    }

    #[tokio::test]
    async fn test_merchant_records() {
        let (_dir, store) = store_with(&[
            ("transactions/user_u1_merchant_coffee.json", COFFEE),
            ("transactions/user_u2_merchant_coffee.json", COFFEE),
            ("transactions/notes.txt", "ignore me"),
        ]);

        let records = store.merchant_records("u1").await.unwrap();
        assert_eq!(records.len(), 2);

        assert_eq!(records[0].merchant, "Blue Bottle");
        let amounts: Vec<f64> = records[0].transactions.iter().map(|t| t.amount).collect();
        assert_eq!(amounts, vec![4.5, 5.25]);

        assert_eq!(records[1].merchant, UNKNOWN_MERCHANT);
        assert_eq!(records[1].transactions[0].amount, 12.0);
    }

    #[tokio::test]
    async fn test_malformed_file_is_skipped() {
        let (_dir, store) = store_with(&[
            ("transactions/user_u1_merchant_a.json", "{not json"),
            ("transactions/user_u1_merchant_b.json", COFFEE),
        ]);
        let records = store.merchant_records("u1").await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].merchant, "Blue Bottle");
    }

    #[tokio::test]
    async fn test_missing_directories_mean_no_records() {
        let (_dir, store) = store_with(&[]);
        assert!(store.merchant_records("u1").await.unwrap().is_empty());
        assert!(store.members("g1").await.unwrap().is_empty());
        assert!(store.recent_messages("c1", 6).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_group_roster() {
        let (_dir, store) = store_with(&[(
            "groups/g1.json",
            r#"{"name": "Ski trip", "members": [
                {"name": "Alice", "role": "owner"},
                {"name": "Bob"},
                {"name": " "}
            ]}"#,
        )]);
        let members = store.members("g1").await.unwrap();
        assert_eq!(
            members,
            vec![GroupMember::new("Alice").with_role("owner"), GroupMember::new("Bob")]
        );
    }

    #[tokio::test]
    async fn test_malformed_group_is_an_error() {
        let (_dir, store) = store_with(&[("groups/g1.json", r#"{"members": 3}"#)]);
        assert!(matches!(
            store.members("g1").await,
            Err(ProviderError::Malformed { .. })
        ));
    }

    #[tokio::test]
    async fn test_ids_cannot_leave_the_data_dir() {
        let (dir, store) = store_with(&[("chats/c1.json", r#"{"messages": []}"#)]);
        fs::write(
            dir.path().join("secret.json"),
            r#"{"members": [{"name": "Mallory"}], "messages": []}"#,
        )
        .unwrap();

        for id in ["../secret", "..", "a/b", "a\\b", "  "] {
            assert!(
                matches!(store.members(id).await, Err(ProviderError::NotFound(_))),
                "group id {:?} accepted",
                id
            );
            assert!(
                matches!(store.recent_messages(id, 6).await, Err(ProviderError::NotFound(_))),
                "chat id {:?} accepted",
                id
            );
        }
        assert!(store.recent_messages("c1", 6).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_recent_messages_keeps_tail() {
        let (_dir, store) = store_with(&[(
            "chats/c1.json",
            r#"{"messages": [
                {"sender_type": "user", "content": "one"},
                {"sender_type": "ai", "content": "two"},
                {"sender_type": "user", "content": "three"}
            ]}"#,
        )]);
        let messages = store.recent_messages("c1", 2).await.unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].sender_type, SenderType::Ai);
        assert_eq!(messages[1].content, "three");
    }
}
