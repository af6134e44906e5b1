//! Record sources
//!
//! The analytics functions never read data themselves; callers fetch the
//! full record lists from a [`RecordSource`] and pass slices in.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::{SavingTransaction, Transaction};

/// Read side of the record store
///
/// Records come back in unspecified order.
pub trait RecordSource: Send + Sync {
    /// Human-readable name for this source
    fn name(&self) -> &str;

    /// Every income and expense record
    fn transactions(&self) -> Result<Vec<Transaction>>;

    /// Every savings movement
    fn savings(&self) -> Result<Vec<SavingTransaction>>;
}

/// On-disk layout of a snapshot file; both keys are optional
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub savings: Vec<SavingTransaction>,
}

/// A JSON export of the store, read once at open
#[derive(Debug, Clone)]
pub struct JsonSnapshot {
    path: Option<PathBuf>,
    name: String,
    snapshot: Snapshot,
}

impl JsonSnapshot {
    /// Read and parse a snapshot file
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::InvalidData(format!(
                "Data file not found: {}",
                path.display()
            )));
        }

        let content = fs::read_to_string(path)?;
        let mut source = Self::from_json(&content)?;
        source.name = path.display().to_string();
        source.path = Some(path.to_path_buf());

        tracing::debug!(
            path = %path.display(),
            transactions = source.snapshot.transactions.len(),
            savings = source.snapshot.savings.len(),
            "Loaded snapshot"
        );
        Ok(source)
    }

    /// Parse a snapshot from a JSON string
    pub fn from_json(content: &str) -> Result<Self> {
        let snapshot: Snapshot = serde_json::from_str(content)?;
        Ok(Self {
            path: None,
            name: "inline".to_string(),
            snapshot,
        })
    }

    /// Path the snapshot was read from, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

impl RecordSource for JsonSnapshot {
    fn name(&self) -> &str {
        &self.name
    }

    fn transactions(&self) -> Result<Vec<Transaction>> {
        Ok(self.snapshot.transactions.clone())
    }

    fn savings(&self) -> Result<Vec<SavingTransaction>> {
        Ok(self.snapshot.savings.clone())
    }
}

/// Records held in memory (tests, embedding)
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    transactions: Vec<Transaction>,
    savings: Vec<SavingTransaction>,
}

impl InMemorySource {
    pub fn new(transactions: Vec<Transaction>, savings: Vec<SavingTransaction>) -> Self {
        Self {
            transactions,
            savings,
        }
    }
}

impl RecordSource for InMemorySource {
    fn name(&self) -> &str {
        "memory"
    }

    fn transactions(&self) -> Result<Vec<Transaction>> {
        Ok(self.transactions.clone())
    }

    fn savings(&self) -> Result<Vec<SavingTransaction>> {
        Ok(self.savings.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SavingType, TransactionType};
    use std::io::Write;

    const SAMPLE: &str = r#"{
        "transactions": [
            {"id": "t1", "date": "2024-01-05T12:00:00", "amount": 100, "category": "Food",
             "description": "Lunch", "type": "expense"},
            {"id": "t2", "date": "2024-01-01", "amount": 1000, "category": "Salary",
             "type": "income"}
        ],
        "savings": [
            {"id": "s1", "date": "2024-01-31", "amount": 200, "type": "deposit"}
        ]
    }"#;

    #[test]
    fn test_from_json() {
        let source = JsonSnapshot::from_json(SAMPLE).unwrap();
        let transactions = source.transactions().unwrap();
        assert_eq!(transactions.len(), 2);
        assert_eq!(transactions[0].kind, TransactionType::Expense);
        assert_eq!(transactions[0].description, "Lunch");
        assert_eq!(transactions[1].amount, 1000.0);

        let savings = source.savings().unwrap();
        assert_eq!(savings.len(), 1);
        assert_eq!(savings[0].kind, SavingType::Deposit);
    }

    #[test]
    fn test_missing_keys_are_empty() {
        let source = JsonSnapshot::from_json(r#"{"transactions": []}"#).unwrap();
        assert!(source.savings().unwrap().is_empty());

        let source = JsonSnapshot::from_json("{}").unwrap();
        assert!(source.transactions().unwrap().is_empty());
    }

    #[test]
    fn test_malformed_json_is_json_error() {
        let err = JsonSnapshot::from_json("{not json").unwrap_err();
        assert!(matches!(err, Error::Json(_)));

        let bad_type = r#"{"transactions": [{"id": "x", "date": "2024-01-01",
            "amount": 1, "category": "A", "type": "transfer"}]}"#;
        assert!(matches!(
            JsonSnapshot::from_json(bad_type).unwrap_err(),
            Error::Json(_)
        ));
    }

    #[test]
    fn test_open_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let source = JsonSnapshot::open(file.path()).unwrap();
        assert_eq!(source.path(), Some(file.path()));
        assert_eq!(source.name(), file.path().display().to_string());
        assert_eq!(source.transactions().unwrap().len(), 2);
    }

    #[test]
    fn test_open_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = JsonSnapshot::open(&dir.path().join("missing.json")).unwrap_err();
        assert!(err.to_string().contains("Data file not found"));
    }

    #[test]
    fn test_in_memory_source() {
        let date = crate::models::parse_record_date("2024-01-01").unwrap();
        let source = InMemorySource::new(
            vec![Transaction::new("t", date, 5.0, "A", TransactionType::Expense)],
            Vec::new(),
        );
        assert_eq!(source.name(), "memory");
        assert_eq!(source.transactions().unwrap().len(), 1);
    }
}
