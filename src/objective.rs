//! Loss functions for Newton boosting.
//!
//! Each loss turns the ensemble's current raw predictions and the labels into
//! per-row first and second derivatives plus a scalar mean loss. The set of
//! losses is closed and selected at configuration time through [`LossType`].

use crate::core::error::{DatasetError, GbtError, Result};
use crate::core::types::{Label, LossType, Score};
use ndarray::{Array1, ArrayView1, Zip};

/// Gradients, hessians and mean loss for one set of predictions.
#[derive(Debug, Clone, PartialEq)]
pub struct LossEvaluation {
    /// First derivative of the loss per row
    pub gradients: Array1<Score>,
    /// Second derivative of the loss per row
    pub hessians: Array1<Score>,
    /// Mean loss over all rows
    pub loss: f64,
}

/// Logistic function.
#[inline]
pub fn sigmoid(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

/// `log(1 + e^x)` without overflow for large `|x|`.
#[inline]
fn softplus(x: f64) -> f64 {
    if x > 0.0 {
        x + (-x).exp().ln_1p()
    } else {
        x.exp().ln_1p()
    }
}

impl LossType {
    /// Human readable name used in log output.
    pub fn name(&self) -> &'static str {
        match self {
            LossType::Squared => "squared_error",
            LossType::Logistic => "logistic",
        }
    }

    /// Compute gradients, hessians and mean loss.
    ///
    /// Fails with [`GbtError::DimensionMismatch`] when the two vectors differ
    /// in length.
    pub fn evaluate(
        &self,
        predictions: ArrayView1<'_, Score>,
        labels: ArrayView1<'_, Label>,
    ) -> Result<LossEvaluation> {
        if predictions.len() != labels.len() {
            return Err(GbtError::dimension_mismatch(
                format!("{} predictions", labels.len()),
                format!("{} predictions", predictions.len()),
            ));
        }

        let n = predictions.len();
        let mut gradients = Array1::zeros(n);
        let mut hessians = Array1::zeros(n);
        let mut total = 0.0;

        match self {
            LossType::Squared => {
                Zip::from(&mut gradients)
                    .and(&mut hessians)
                    .and(predictions)
                    .and(labels)
                    .for_each(|g, h, &pred, &y| {
                        let residual = pred - y;
                        *g = 2.0 * residual;
                        *h = 2.0;
                        total += residual * residual;
                    });
            }
            LossType::Logistic => {
                Zip::from(&mut gradients)
                    .and(&mut hessians)
                    .and(predictions)
                    .and(labels)
                    .for_each(|g, h, &pred, &y| {
                        let p = sigmoid(pred);
                        *g = p - y;
                        *h = p * (1.0 - p);
                        total += y * softplus(-pred) + (1.0 - y) * softplus(pred);
                    });
            }
        }

        let loss = if n == 0 { 0.0 } else { total / n as f64 };

        Ok(LossEvaluation {
            gradients,
            hessians,
            loss,
        })
    }

    /// Mean loss only.
    pub fn loss(
        &self,
        predictions: ArrayView1<'_, Score>,
        labels: ArrayView1<'_, Label>,
    ) -> Result<f64> {
        Ok(self.evaluate(predictions, labels)?.loss)
    }

    /// Map a raw ensemble score to the output scale.
    pub fn transform(&self, score: Score) -> Score {
        match self {
            LossType::Squared => score,
            LossType::Logistic => sigmoid(score),
        }
    }

    /// Check that labels are usable with this loss.
    pub fn validate_labels(&self, labels: ArrayView1<'_, Label>) -> Result<()> {
        if let LossType::Logistic = self {
            for (row, &value) in labels.iter().enumerate() {
                if value != 0.0 && value != 1.0 {
                    return Err(DatasetError::NonBinaryLabel { row, value }.into());
                }
            }
        }
        Ok(())
    }
}
