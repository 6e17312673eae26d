//! Fixed training set for the assistant's intent classifier

use crate::models::Intent;

/// Hand-authored examples: (utterance, intent).
///
/// Every word is longer than three characters so it survives encoding.
pub const TRAINING_EXAMPLES: &[(&str, Intent)] = &[
    ("hello good", Intent::Greeting),
    ("savings advice", Intent::SavingsAdvice),
    ("tips save", Intent::SavingsAdvice),
    ("invest money", Intent::InvestmentAdvice),
    ("stocks market", Intent::InvestmentAdvice),
    ("debt repay", Intent::DebtAdvice),
];
