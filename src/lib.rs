//! # FIRESIGHT
//!
//! Fire-risk analysis pipeline with an encrypted, tamper-evident audit log.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                      FIRESIGHT CORE                      │
//! │  ┌─────────────┐  ┌─────────────┐  ┌─────────────────┐  │
//! │  │  FEATURE    │  │  RISK       │  │  RISK           │  │
//! │  │  EXTRACTOR  │→ │  SCORER     │→ │  CLASSIFIER     │  │
//! │  └─────────────┘  └─────────────┘  └────────┬────────┘  │
//! │                                              │           │
//! │  ┌───────────────────────────────────────────┴────────┐ │
//! │  │                 ANALYSIS PIPELINE                   │ │
//! │  └───────────────────────┬─────────────────────────────┘ │
//! │                          │                               │
//! │  ┌─────────────┐  ┌──────┴──────┐  ┌─────────────────┐  │
//! │  │  KEYSTORE   │→ │  AEAD       │→ │  AUDIT LOG      │  │
//! │  │  (16B key)  │  │  AES-128-GCM│  │  (append-only)  │  │
//! │  └─────────────┘  └─────────────┘  └─────────────────┘  │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Security Model
//!
//! - Every analysis record sealed with AES-128-GCM before it touches disk
//! - Fresh random 96-bit nonce per record, prepended to the ciphertext
//! - One persistent key file per deployment, created atomically on first use
//! - Tampered or foreign ciphertext always fails authentication, never
//!   decrypts to garbage
//! - Audit rows are append-only: no update or delete surface exists

pub mod audit;
pub mod classifier;
pub mod crypto;
pub mod error;
pub mod features;
pub mod pipeline;
pub mod prompts;
pub mod scorer;

pub use audit::{AuditLog, AuditRecord};
pub use classifier::{voltage_ratio, BurnSmell, RiskClassifier, RiskTier};
pub use crypto::{AeadCipher, AnalysisKey, KeyStore};
pub use error::{FireError, FireResult};
pub use features::{ColorVector, FeatureExtractor, ImageFeatures};
pub use pipeline::{AnalysisInput, AnalysisOutcome, AnalysisPipeline, AnalysisResult, NarrativeSet};
pub use scorer::RiskScorer;

/// FIRESIGHT version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
