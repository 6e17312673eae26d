//! Single-layer dense network
//!
//! One sigmoid unit per label over a fixed vocabulary. Weights start at zero
//! and are fitted with full-batch gradient descent, so training is fully
//! deterministic.

use std::collections::{BTreeMap, BTreeSet};

/// Hyperparameters for [`DenseNetwork::train`]
#[derive(Debug, Clone, Copy)]
pub struct TrainingConfig {
    pub epochs: usize,
    pub learning_rate: f64,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            epochs: 2_000,
            learning_rate: 0.5,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DenseNetwork {
    vocabulary: BTreeMap<String, usize>,
    weights: Vec<Vec<f64>>,
    biases: Vec<f64>,
}

impl DenseNetwork {
    /// Fit a network with `labels` output units.
    ///
    /// Each sample is a feature set and the index of its target unit.
    pub fn train(samples: &[(BTreeSet<String>, usize)], labels: usize, config: TrainingConfig) -> Self {
        let vocabulary: BTreeMap<String, usize> = samples
            .iter()
            .flat_map(|(features, _)| features.iter())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .enumerate()
            .map(|(i, token)| (token.clone(), i))
            .collect();

        let mut network = Self {
            weights: vec![vec![0.0; vocabulary.len()]; labels],
            biases: vec![0.0; labels],
            vocabulary,
        };

        if samples.is_empty() || labels == 0 {
            return network;
        }

        let encoded: Vec<(Vec<usize>, usize)> = samples
            .iter()
            .map(|(features, target)| (network.active_indices(features), *target))
            .collect();

        let scale = config.learning_rate / encoded.len() as f64;

        for _ in 0..config.epochs {
            let mut weight_grads = vec![vec![0.0; network.vocabulary.len()]; labels];
            let mut bias_grads = vec![0.0; labels];

            for (active, target) in &encoded {
                for label in 0..labels {
                    let expected = if label == *target { 1.0 } else { 0.0 };
                    let delta = network.activation(label, active) - expected;

                    bias_grads[label] += delta;
                    for &i in active {
                        weight_grads[label][i] += delta;
                    }
                }
            }

            for label in 0..labels {
                network.biases[label] -= scale * bias_grads[label];
                for (w, g) in network.weights[label].iter_mut().zip(&weight_grads[label]) {
                    *w -= scale * g;
                }
            }
        }

        network
    }

    fn active_indices(&self, features: &BTreeSet<String>) -> Vec<usize> {
        features
            .iter()
            .filter_map(|token| self.vocabulary.get(token).copied())
            .collect()
    }

    fn activation(&self, label: usize, active: &[usize]) -> f64 {
        let z = self.biases[label] + active.iter().map(|&i| self.weights[label][i]).sum::<f64>();
        sigmoid(z)
    }

    /// Whether any feature was seen during training
    pub fn recognizes(&self, features: &BTreeSet<String>) -> bool {
        features.iter().any(|token| self.vocabulary.contains_key(token))
    }

    /// Score in `[0, 1]` for every output unit
    pub fn run(&self, features: &BTreeSet<String>) -> Vec<f64> {
        let active = self.active_indices(features);
        (0..self.biases.len())
            .map(|label| self.activation(label, &active))
            .collect()
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(tokens: &[&str]) -> BTreeSet<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_separates_two_labels() {
        let samples = vec![(set(&["alpha"]), 0), (set(&["beta"]), 1)];
        let network = DenseNetwork::train(&samples, 2, TrainingConfig::default());

        let alpha = network.run(&set(&["alpha"]));
        assert!(alpha[0] > 0.9);
        assert!(alpha[1] < 0.1);

        let beta = network.run(&set(&["beta"]));
        assert!(beta[1] > alpha[1]);
    }

    #[test]
    fn test_training_is_deterministic() {
        let samples = vec![(set(&["alpha", "gamma"]), 0), (set(&["beta"]), 1)];
        let a = DenseNetwork::train(&samples, 2, TrainingConfig::default());
        let b = DenseNetwork::train(&samples, 2, TrainingConfig::default());

        let input = set(&["gamma", "beta"]);
        assert_eq!(a.run(&input), b.run(&input));
    }

    #[test]
    fn test_unseen_tokens_are_ignored() {
        let samples = vec![(set(&["alpha"]), 0)];
        let network = DenseNetwork::train(&samples, 1, TrainingConfig::default());

        assert!(!network.recognizes(&set(&["omega"])));
        assert_eq!(network.run(&set(&["omega"])), network.run(&BTreeSet::new()));
        assert_eq!(network.vocabulary_size(), 1);
    }
}
