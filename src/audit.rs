//! Query audit log
//!
//! Bounded, in-memory record of every query the pipeline handled: the text
//! the filter actually saw, the verdict, and how the request ended. A filter
//! BLOCK and a generator failure both read as apologetic text to the caller;
//! the audit log is what keeps them distinguishable so the evaluation harness
//! can compute accurate bypass statistics.

use std::collections::VecDeque;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::filter::Verdict;
use crate::normalize::Modality;

/// How a request ultimately ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryOutcome {
    /// Filter allowed the query and the generator answered.
    Answered,
    /// Filter blocked the query; the generator was never invoked.
    Blocked,
    /// Filter allowed the query but the generator failed; the caller got
    /// the fixed apology string.
    GeneratorFailed,
}

/// One audit record per handled query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryRecord {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub modality: Modality,
    /// The normalized text the filter saw (for audio, the transcription).
    pub text: String,
    pub verdict: Verdict,
    pub matched_keyword: Option<String>,
    pub outcome: QueryOutcome,
}

impl QueryRecord {
    pub fn new(
        modality: Modality,
        text: impl Into<String>,
        verdict: Verdict,
        matched_keyword: Option<String>,
        outcome: QueryOutcome,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            modality,
            text: text.into(),
            verdict,
            matched_keyword,
            outcome,
        }
    }
}

/// Thread-safe audit log with bounded capacity. Oldest records are evicted.
pub struct AuditLog {
    records: RwLock<VecDeque<QueryRecord>>,
    max_records: usize,
}

impl AuditLog {
    pub fn new(max_records: usize) -> Self {
        Self {
            records: RwLock::new(VecDeque::new()),
            max_records,
        }
    }

    /// Append a record, evicting the oldest if at capacity.
    pub fn record(&self, record: QueryRecord) {
        let Ok(mut records) = self.records.write() else {
            tracing::error!("Audit log lock poisoned, dropping record");
            return;
        };
        if records.len() >= self.max_records {
            records.pop_front();
        }
        records.push_back(record);
    }

    /// All records, oldest first.
    pub fn records(&self) -> Vec<QueryRecord> {
        self.records
            .read()
            .map(|r| r.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Records with the given outcome.
    pub fn records_with_outcome(&self, outcome: QueryOutcome) -> Vec<QueryRecord> {
        self.records
            .read()
            .map(|r| r.iter().filter(|q| q.outcome == outcome).cloned().collect())
            .unwrap_or_default()
    }

    /// Most recent record, if any.
    pub fn last(&self) -> Option<QueryRecord> {
        self.records.read().ok().and_then(|r| r.back().cloned())
    }

    pub fn len(&self) -> usize {
        self.records.read().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        if let Ok(mut records) = self.records.write() {
            records.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_record(text: &str, verdict: Verdict, outcome: QueryOutcome) -> QueryRecord {
        QueryRecord::new(Modality::Text, text, verdict, None, outcome)
    }

    #[test]
    fn test_record_and_retrieve() {
        let log = AuditLog::new(100);
        assert!(log.is_empty());

        log.record(make_record("a", Verdict::Allow, QueryOutcome::Answered));
        log.record(make_record("b", Verdict::Block, QueryOutcome::Blocked));

        assert_eq!(log.len(), 2);
        let records = log.records();
        assert_eq!(records[0].text, "a");
        assert_eq!(records[1].text, "b");
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let log = AuditLog::new(2);
        log.record(make_record("a", Verdict::Allow, QueryOutcome::Answered));
        log.record(make_record("b", Verdict::Allow, QueryOutcome::Answered));
        log.record(make_record("c", Verdict::Block, QueryOutcome::Blocked));

        assert_eq!(log.len(), 2);
        let records = log.records();
        assert_eq!(records[0].text, "b");
        assert_eq!(records[1].text, "c");
    }

    #[test]
    fn test_block_and_failure_stay_distinguishable() {
        let log = AuditLog::new(100);
        log.record(make_record("x", Verdict::Block, QueryOutcome::Blocked));
        log.record(make_record(
            "y",
            Verdict::Allow,
            QueryOutcome::GeneratorFailed,
        ));

        let blocked = log.records_with_outcome(QueryOutcome::Blocked);
        assert_eq!(blocked.len(), 1);
        assert_eq!(blocked[0].text, "x");

        let failed = log.records_with_outcome(QueryOutcome::GeneratorFailed);
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].verdict, Verdict::Allow);
    }

    #[test]
    fn test_record_serialization() {
        let record = make_record("hello", Verdict::Block, QueryOutcome::Blocked);
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("blocked"));

        let parsed: QueryRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.outcome, QueryOutcome::Blocked);
        assert_eq!(parsed.text, "hello");
    }
}
