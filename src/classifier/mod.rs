//! Intent Classifier
//!
//! Maps a chat utterance to one of the assistant's intents:
//! - Greeting
//! - SavingsAdvice
//! - InvestmentAdvice
//! - DebtAdvice
//! - Unknown (fallback when nothing is recognised)
//!
//! Trained once from [`training::TRAINING_EXAMPLES`] and read-only afterwards.

pub mod network;
pub mod training;

use crate::models::Intent;
use network::{DenseNetwork, TrainingConfig};
use std::collections::BTreeSet;
use tracing::{debug, info};

/// Tokens this short or shorter are dropped by [`encode`]
const MIN_TOKEN_CHARS: usize = 3;

/// Bag-of-words encoding: lowercase whitespace tokens longer than three
/// characters, as a set (order and repetition are not encoded).
pub fn encode(text: &str) -> BTreeSet<String> {
    text.split_whitespace()
        .map(|w| w.to_lowercase())
        .filter(|w| w.chars().count() > MIN_TOKEN_CHARS)
        .collect()
}

/// Frozen intent model
#[derive(Debug, Clone)]
pub struct IntentClassifier {
    network: DenseNetwork,
}

impl IntentClassifier {
    /// Train on the built-in example set
    pub fn train() -> Self {
        Self::train_with(training::TRAINING_EXAMPLES, TrainingConfig::default())
    }

    pub fn train_with(examples: &[(&str, Intent)], config: TrainingConfig) -> Self {
        let samples: Vec<(BTreeSet<String>, usize)> = examples
            .iter()
            .filter_map(|(text, intent)| {
                Intent::LABELS
                    .iter()
                    .position(|label| label == intent)
                    .map(|index| (encode(text), index))
            })
            .collect();

        let network = DenseNetwork::train(&samples, Intent::LABELS.len(), config);

        info!(
            examples = samples.len(),
            vocabulary = network.vocabulary_size(),
            "Intent classifier trained"
        );

        Self { network }
    }

    /// Per-label scores in [`Intent::LABELS`] order
    pub fn scores(&self, text: &str) -> Vec<(Intent, f64)> {
        let features = encode(text);
        Intent::LABELS
            .iter()
            .copied()
            .zip(self.network.run(&features))
            .collect()
    }

    /// Classify an utterance. Never fails.
    ///
    /// `Unknown` means no token of the utterance was seen in training; any
    /// recognised utterance gets the highest-scoring label.
    pub fn classify(&self, text: &str) -> Intent {
        let features = encode(text);

        if !self.network.recognizes(&features) {
            debug!(tokens = features.len(), "No trained features in utterance");
            return Intent::Unknown;
        }

        let mut best = Intent::Unknown;
        let mut max = 0.0;

        // Strict comparison keeps the earlier label on ties
        for (intent, score) in Intent::LABELS.iter().zip(self.network.run(&features)) {
            if score > max {
                max = score;
                best = *intent;
            }
        }

        debug!(intent = %best, score = max, "Classified utterance");
        best
    }
}

impl Default for IntentClassifier {
    fn default() -> Self {
        Self::train()
    }
}
