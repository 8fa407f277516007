//! Naive keyword filter
//!
//! A deliberately weak policy filter: case-insensitive substring containment
//! against a fixed phrase denylist. No stemming, no paraphrase detection, no
//! semantic matching. A transcription that renders "transfer funds" as
//! "transfer the funds" (or drops a word) evades it — that gap is the subject
//! of this demo, not a bug to patch.

use serde::{Deserialize, Serialize};

/// Outcome of classifying a piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Allow,
    Block,
}

/// Result of running the filter over one normalized query.
///
/// Computed once per query and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub verdict: Verdict,
    /// First denylisted phrase found, in list order. `None` on ALLOW.
    pub matched_keyword: Option<String>,
}

impl Decision {
    pub fn is_blocked(&self) -> bool {
        self.verdict == Verdict::Block
    }
}

/// Substring-containment filter over an ordered phrase denylist.
///
/// The denylist is loaded once at startup and immutable thereafter. The
/// filter is a total, pure function over all string inputs (including the
/// empty string and non-ASCII text) and never suspends.
pub struct KeywordFilter {
    denylist: Vec<String>,
}

impl KeywordFilter {
    /// Build a filter from configured phrases. Phrases are lowercased here so
    /// matching later is a plain `contains`.
    pub fn new(denylist: &[String]) -> Self {
        Self {
            denylist: denylist.iter().map(|p| p.to_lowercase()).collect(),
        }
    }

    /// Classify text: BLOCK iff any denylisted phrase is a case-insensitive
    /// substring; first match in list order wins.
    ///
    /// Emits an observability record (text + verdict) so the evaluation
    /// harness can reproduce filter behavior from logs.
    pub fn classify(&self, text: &str) -> Decision {
        let normalized = text.to_lowercase();
        let matched = self
            .denylist
            .iter()
            .find(|phrase| normalized.contains(phrase.as_str()));

        let decision = match matched {
            Some(phrase) => Decision {
                verdict: Verdict::Block,
                matched_keyword: Some(phrase.clone()),
            },
            None => Decision {
                verdict: Verdict::Allow,
                matched_keyword: None,
            },
        };

        match &decision.matched_keyword {
            Some(keyword) => {
                tracing::info!(text, keyword = %keyword, "Naive filter BLOCKED")
            }
            None => tracing::info!(text, "Naive filter ALLOWED"),
        }

        decision
    }

    /// Number of phrases in the denylist.
    pub fn len(&self) -> usize {
        self.denylist.len()
    }

    pub fn is_empty(&self) -> bool {
        self.denylist.is_empty()
    }
}
