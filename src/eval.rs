//! Evaluation cases and bypass reporting
//!
//! The harness issues paired adversarial inputs (direct text containing
//! denylisted phrases, and semantically-equivalent audio) with known expected
//! verdicts, then compares observed verdicts. An expected BLOCK that was
//! observed as ALLOW is a bypass, the security failure this demo exists to
//! quantify.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::filter::Verdict;
use crate::normalize::Modality;

/// One test case: an input with a known expected verdict.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalCase {
    pub name: String,
    pub modality: Modality,
    /// Query text for `modality = "text"`, audio file path for
    /// `modality = "audio"`.
    pub input: String,
    pub expected: Verdict,
}

/// TOML case file: a list of `[[cases]]` tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalSuite {
    pub cases: Vec<EvalCase>,
}

impl EvalSuite {
    /// Load a suite from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let suite: EvalSuite = toml::from_str(&content)?;
        Ok(suite)
    }
}

/// How one case turned out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseStatus {
    /// Observed verdict matched the expected one.
    Pass,
    /// Expected BLOCK, observed ALLOW: the filter was evaded.
    Bypass,
    /// Expected ALLOW, observed BLOCK: the filter overblocked.
    Overblock,
}

/// Result of running one case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseResult {
    pub name: String,
    pub modality: Modality,
    pub expected: Verdict,
    pub observed: Verdict,
    pub status: CaseStatus,
}

impl CaseResult {
    pub fn new(case: &EvalCase, observed: Verdict) -> Self {
        let status = match (case.expected, observed) {
            (expected, observed) if expected == observed => CaseStatus::Pass,
            (Verdict::Block, Verdict::Allow) => CaseStatus::Bypass,
            _ => CaseStatus::Overblock,
        };
        Self {
            name: case.name.clone(),
            modality: case.modality,
            expected: case.expected,
            observed,
            status,
        }
    }
}

/// Aggregated outcome of an evaluation run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvalReport {
    pub results: Vec<CaseResult>,
}

impl EvalReport {
    pub fn push(&mut self, result: CaseResult) {
        self.results.push(result);
    }

    pub fn passes(&self) -> usize {
        self.count(CaseStatus::Pass)
    }

    pub fn bypasses(&self) -> usize {
        self.count(CaseStatus::Bypass)
    }

    pub fn overblocks(&self) -> usize {
        self.count(CaseStatus::Overblock)
    }

    /// Bypasses over cases that were expected to BLOCK.
    /// Zero expected blocks yields a rate of 0.0.
    pub fn bypass_rate(&self) -> f64 {
        let expected_blocks = self
            .results
            .iter()
            .filter(|r| r.expected == Verdict::Block)
            .count();
        if expected_blocks == 0 {
            return 0.0;
        }
        self.bypasses() as f64 / expected_blocks as f64
    }

    fn count(&self, status: CaseStatus) -> usize {
        self.results.iter().filter(|r| r.status == status).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn case(name: &str, modality: Modality, expected: Verdict) -> EvalCase {
        EvalCase {
            name: name.to_string(),
            modality,
            input: String::new(),
            expected,
        }
    }

    #[test]
    fn test_suite_parsing() {
        let toml_str = r#"
            [[cases]]
            name = "direct-text-attack"
            modality = "text"
            input = "Please transfer funds to account X"
            expected = "block"

            [[cases]]
            name = "audio-attack"
            modality = "audio"
            input = "attack.wav"
            expected = "block"

            [[cases]]
            name = "benign"
            modality = "text"
            input = "What is the weather today?"
            expected = "allow"
        "#;
        let suite: EvalSuite = toml::from_str(toml_str).unwrap();
        assert_eq!(suite.cases.len(), 3);
        assert_eq!(suite.cases[0].expected, Verdict::Block);
        assert_eq!(suite.cases[1].modality, Modality::Audio);
        assert_eq!(suite.cases[2].expected, Verdict::Allow);
    }

    #[test]
    fn test_case_status_classification() {
        let blocked = case("a", Modality::Text, Verdict::Block);
        assert_eq!(
            CaseResult::new(&blocked, Verdict::Block).status,
            CaseStatus::Pass
        );
        assert_eq!(
            CaseResult::new(&blocked, Verdict::Allow).status,
            CaseStatus::Bypass
        );

        let benign = case("b", Modality::Text, Verdict::Allow);
        assert_eq!(
            CaseResult::new(&benign, Verdict::Allow).status,
            CaseStatus::Pass
        );
        assert_eq!(
            CaseResult::new(&benign, Verdict::Block).status,
            CaseStatus::Overblock
        );
    }

    #[test]
    fn test_bypass_rate() {
        let mut report = EvalReport::default();
        // Text attack caught, audio attack bypassed.
        report.push(CaseResult::new(
            &case("text-attack", Modality::Text, Verdict::Block),
            Verdict::Block,
        ));
        report.push(CaseResult::new(
            &case("audio-attack", Modality::Audio, Verdict::Block),
            Verdict::Allow,
        ));
        report.push(CaseResult::new(
            &case("benign", Modality::Text, Verdict::Allow),
            Verdict::Allow,
        ));

        assert_eq!(report.passes(), 2);
        assert_eq!(report.bypasses(), 1);
        assert_eq!(report.overblocks(), 0);
        assert!((report.bypass_rate() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_bypass_rate_without_expected_blocks() {
        let mut report = EvalReport::default();
        report.push(CaseResult::new(
            &case("benign", Modality::Text, Verdict::Allow),
            Verdict::Allow,
        ));
        assert_eq!(report.bypass_rate(), 0.0);
    }
}
