//! Decision pipeline
//!
//! Ties normalization, filtering, and generation into one linear flow with a
//! single branch point. The original demo expressed this as a graph of three
//! nodes (checker, blocker, responder); here the graph is static and linear,
//! so it is an explicit stage enum instead of a graph-execution layer:
//!
//! ```text
//! Checking -> Blocked    -> Done   (canned refusal; generator never runs)
//! Checking -> Responding -> Done   (generator output, or the fixed apology
//!                                   if the generator fails)
//! ```
//!
//! Exactly one of {canned refusal, generator output, apology} is produced per
//! request. A generator failure never propagates past this module.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::audit::{AuditLog, QueryOutcome, QueryRecord};
use crate::backend::Generator;
use crate::filter::{Decision, KeywordFilter};
use crate::normalize::Modality;

/// Where a response's text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseSource {
    /// The generator answered.
    Model,
    /// The filter blocked the query.
    Blocked,
    /// The generator failed; text is the fixed apology.
    GeneratorFailed,
}

/// Terminal artifact returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub text: String,
    pub source: ResponseSource,
}

/// Pipeline stages. The single conditional edge is Checking's fan-out.
enum Stage {
    Checking,
    Blocked(Decision),
    Responding(Decision),
    Done(Response),
}

/// The filter → generate pipeline, parameterized over the generator strategy.
///
/// The filter is pure and synchronous; the generator call is the only
/// suspension point. All state is request-local, so concurrent `handle`
/// calls share nothing but the read-only filter and the audit log.
pub struct Pipeline {
    filter: KeywordFilter,
    generator: Arc<dyn Generator>,
    audit: Arc<AuditLog>,
    blocked_message: String,
    apology_message: String,
}

impl Pipeline {
    pub fn new(
        filter: KeywordFilter,
        generator: Arc<dyn Generator>,
        audit: Arc<AuditLog>,
        blocked_message: impl Into<String>,
        apology_message: impl Into<String>,
    ) -> Self {
        Self {
            filter,
            generator,
            audit,
            blocked_message: blocked_message.into(),
            apology_message: apology_message.into(),
        }
    }

    /// Run one normalized query through the pipeline.
    ///
    /// Calls the filter exactly once. On BLOCK, short-circuits to the canned
    /// refusal with no side effects beyond the audit record.
    pub async fn handle(&self, modality: Modality, query_text: &str) -> Response {
        let mut stage = Stage::Checking;

        loop {
            stage = match stage {
                Stage::Checking => {
                    let decision = self.filter.classify(query_text);
                    if decision.is_blocked() {
                        Stage::Blocked(decision)
                    } else {
                        Stage::Responding(decision)
                    }
                }

                Stage::Blocked(decision) => {
                    self.audit.record(QueryRecord::new(
                        modality,
                        query_text,
                        decision.verdict,
                        decision.matched_keyword,
                        QueryOutcome::Blocked,
                    ));
                    Stage::Done(Response {
                        text: self.blocked_message.clone(),
                        source: ResponseSource::Blocked,
                    })
                }

                Stage::Responding(decision) => match self.generator.generate(query_text).await
                {
                    Ok(text) => {
                        self.audit.record(QueryRecord::new(
                            modality,
                            query_text,
                            decision.verdict,
                            None,
                            QueryOutcome::Answered,
                        ));
                        Stage::Done(Response {
                            text,
                            source: ResponseSource::Model,
                        })
                    }
                    Err(e) => {
                        tracing::warn!(
                            generator = self.generator.name(),
                            error = %e,
                            "Generator failed, returning apology"
                        );
                        self.audit.record(QueryRecord::new(
                            modality,
                            query_text,
                            decision.verdict,
                            None,
                            QueryOutcome::GeneratorFailed,
                        ));
                        Stage::Done(Response {
                            text: self.apology_message.clone(),
                            source: ResponseSource::GeneratorFailed,
                        })
                    }
                },

                Stage::Done(response) => return response,
            };
        }
    }

    /// The audit log this pipeline records into.
    pub fn audit(&self) -> &Arc<AuditLog> {
        &self.audit
    }
}
