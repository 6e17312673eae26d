//! Personal Finance Tracker
//!
//! Keeps a running ledger of income, expenses and debt and layers two
//! local language components on top of it:
//! - Smart input: free text → transaction request (fixed lexical rules)
//! - Assistant: chat text → intent (small trained network) → canned reply
//!
//! FLOW:
//! TEXT → PARSE → LEDGER.APPLY → METRICS → DASHBOARD / ASSISTANT

pub mod api;
pub mod assistant;
pub mod classifier;
pub mod config;
pub mod error;
pub mod ledger;
pub mod market;
pub mod models;
pub mod portfolio;
pub mod smart_input;
pub mod tracker;

pub use error::Result;

// Re-export common types
pub use models::*;
pub use classifier::IntentClassifier;
pub use ledger::Ledger;
pub use smart_input::{ParseOutcome, SmartInputParser};
pub use tracker::Tracker;
