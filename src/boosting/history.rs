//! Per-round training records.

use crate::core::types::IterationIndex;
use serde::{Deserialize, Serialize};

/// What happened in one boosting round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub round: IterationIndex,
    /// Training loss of the ensemble before this round's tree was added
    pub loss: f64,
    /// Shrink factor recorded on the round's tree
    pub shrinkage: f64,
    pub num_leaves: usize,
    pub depth: usize,
}

/// Loss trajectory of a training run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingHistory {
    rounds: Vec<RoundRecord>,
    final_loss: Option<f64>,
}

impl TrainingHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, record: RoundRecord) {
        self.rounds.push(record);
    }

    pub fn set_final_loss(&mut self, loss: f64) {
        self.final_loss = Some(loss);
    }

    pub fn rounds(&self) -> &[RoundRecord] {
        &self.rounds
    }

    /// Loss of the complete ensemble, once training has finished.
    pub fn final_loss(&self) -> Option<f64> {
        self.final_loss
    }

    /// Per-round losses in round order.
    pub fn losses(&self) -> Vec<f64> {
        self.rounds.iter().map(|r| r.loss).collect()
    }

    pub fn len(&self) -> usize {
        self.rounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }
}
