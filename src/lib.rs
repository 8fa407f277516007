//! # voxgate
//!
//! Reference demo of a security-bypass vulnerability: a text-based keyword
//! filter that blocks malicious text queries, but is evaded when the same
//! intent arrives as audio and is transcribed (lossily) before filtering.
//!
//! ## Pipeline
//!
//! ```text
//! raw input ──> normalize (identity | speech-to-text) ──> query text
//!                                                            │
//!                                             keyword filter classify()
//!                                              │                    │
//!                                            BLOCK                ALLOW
//!                                              │                    │
//!                                       canned refusal     generator (LLM)
//! ```
//!
//! The filter is deliberately naive (case-insensitive substring containment
//! against a configured denylist). A transcription that alters the literal
//! phrase — "trans fur funds" for "transfer funds" — slips through; the
//! audit log and the `eval` subcommand make that bypass observable and
//! quantifiable.

pub mod api;
pub mod audit;
pub mod backend;
pub mod cli;
pub mod config;
pub mod dirs;
pub mod error;
pub mod eval;
pub mod filter;
pub mod normalize;
pub mod pipeline;
pub mod server;

// Re-export core types
pub use audit::{AuditLog, QueryOutcome, QueryRecord};
pub use config::VoxgateConfig;
pub use error::{Result, VoxgateError};
pub use filter::{Decision, KeywordFilter, Verdict};
pub use normalize::{Modality, NormalizedText, Query, Transcriber};
pub use pipeline::{Pipeline, Response, ResponseSource};
