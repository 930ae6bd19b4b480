//! ChannelNet: the two-layer network scoring channel-worthiness.
//!
//! `score = sigmoid(w2 · relu(W1 · x + b1) + b2)`, a pure function of the
//! loaded weights.

use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};

/// Hidden layer width produced by the training procedure.
pub const HIDDEN_UNITS: usize = 16;

/// Scores strictly above this are channel-worthy.
pub const CHANNEL_WORTHY_THRESHOLD: f32 = 0.5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelNet {
    /// One row per hidden unit, each `input_size` long.
    hidden_weights: Vec<Vec<f32>>,
    hidden_bias: Vec<f32>,
    output_weights: Vec<f32>,
    output_bias: f32,
}

impl ChannelNet {
    pub fn new(
        hidden_weights: Vec<Vec<f32>>,
        hidden_bias: Vec<f32>,
        output_weights: Vec<f32>,
        output_bias: f32,
    ) -> Result<Self> {
        let net = Self {
            hidden_weights,
            hidden_bias,
            output_weights,
            output_bias,
        };
        net.validate()?;
        Ok(net)
    }

    pub fn input_size(&self) -> usize {
        self.hidden_weights.first().map(Vec::len).unwrap_or(0)
    }

    pub fn hidden_size(&self) -> usize {
        self.hidden_weights.len()
    }

    /// Checks that all layer shapes agree with each other.
    pub fn validate(&self) -> Result<()> {
        let hidden = self.hidden_size();
        let input = self.input_size();

        if hidden == 0 || input == 0 {
            return Err(AppError::Artifact("Model has an empty layer".to_string()));
        }
        if let Some(row) = self.hidden_weights.iter().position(|r| r.len() != input) {
            return Err(AppError::Artifact(format!(
                "Hidden weight row {} has {} inputs, expected {}",
                row,
                self.hidden_weights[row].len(),
                input
            )));
        }
        if self.hidden_bias.len() != hidden || self.output_weights.len() != hidden {
            return Err(AppError::Artifact(format!(
                "Layer size mismatch: {} hidden units, {} biases, {} output weights",
                hidden,
                self.hidden_bias.len(),
                self.output_weights.len()
            )));
        }
        Ok(())
    }

    /// Channel-worthiness score in [0, 1].
    pub fn predict(&self, features: &[f32]) -> f32 {
        debug_assert_eq!(features.len(), self.input_size());

        let logit = self
            .hidden_weights
            .iter()
            .zip(&self.hidden_bias)
            .zip(&self.output_weights)
            .map(|((row, bias), out)| {
                let activation: f32 = row.iter().zip(features).map(|(w, x)| w * x).sum::<f32>() + bias;
                relu(activation) * out
            })
            .sum::<f32>()
            + self.output_bias;

        sigmoid(logit)
    }
}

pub fn is_channel_worthy(score: f32) -> bool {
    score > CHANNEL_WORTHY_THRESHOLD
}

fn relu(x: f32) -> f32 {
    x.max(0.0)
}

fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}
