//! Gradient boosting driver.
//!
//! [`GBDT`] runs a fixed number of Newton boosting rounds. Every round
//! evaluates the loss at the current training scores, grows one tree on the
//! resulting gradients and hessians, and appends it to the [`Ensemble`].
//! Training scores are maintained incrementally, one tree at a time.

pub mod ensemble;
pub mod history;

pub use ensemble::Ensemble;
pub use history::{RoundRecord, TrainingHistory};

use crate::config::Config;
use crate::core::error::{GbtError, Result};
use crate::core::types::{FeatureValue, Score};
use crate::dataset::Dataset;
use crate::tree::{NodeSample, TreeBuilder};
use log::{debug, info};
use ndarray::{Array1, ArrayView1, ArrayView2};

/// Gradient Boosting Decision Tree model.
#[derive(Debug, Clone)]
pub struct GBDT {
    config: Config,
    ensemble: Ensemble,
    history: TrainingHistory,
    num_features: Option<usize>,
}

impl GBDT {
    /// Creates an untrained model, validating the configuration.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        config.warn_inert_shrinkage();
        let ensemble = Ensemble::new(config.shrinkage_mode);
        Ok(GBDT {
            config,
            ensemble,
            history: TrainingHistory::new(),
            num_features: None,
        })
    }

    /// Trains exactly `num_rounds` trees on `dataset`.
    ///
    /// Any previously trained ensemble is replaced, so repeated calls with the
    /// same data produce identical models. On error the model is left
    /// untrained.
    pub fn train(&mut self, dataset: &Dataset) -> Result<&TrainingHistory> {
        let loss = self.config.loss;
        loss.validate_labels(dataset.labels())?;

        let features = dataset.features();
        let labels = dataset.labels();
        let params = self.config.tree_params();
        let builder = TreeBuilder::new(&params);

        self.ensemble = Ensemble::new(self.config.shrinkage_mode);
        self.history = TrainingHistory::new();
        self.num_features = None;

        let mut ensemble = Ensemble::new(self.config.shrinkage_mode);
        let mut history = TrainingHistory::new();

        info!(
            "Training {} rounds on {} rows x {} features ({} loss)",
            self.config.num_rounds,
            dataset.num_data(),
            dataset.num_features(),
            loss.name()
        );

        let mut scores: Array1<Score> = Array1::zeros(dataset.num_data());

        for round in 0..self.config.num_rounds {
            let evaluation = loss.evaluate(scores.view(), labels)?;
            info!("loss at round {}: {:.6}", round, evaluation.loss);

            let shrinkage = self.config.shrinkage_for_round(round);
            let sample = NodeSample::new(features, evaluation.gradients, evaluation.hessians)?;
            let tree = builder.build(sample, shrinkage).map_err(|e| match e {
                GbtError::Numerical { message } => {
                    GbtError::numerical(format!("round {}: {}", round, message))
                }
                other => other,
            })?;

            debug!("Round {}: {}", round, tree);
            history.record(RoundRecord {
                round,
                loss: evaluation.loss,
                shrinkage,
                num_leaves: tree.num_leaves(),
                depth: tree.depth(),
            });

            ensemble.accumulate(&tree, &features, &mut scores);
            ensemble.push(tree);
        }

        let final_loss = loss.loss(scores.view(), labels)?;
        info!("final training loss: {:.6}", final_loss);
        history.set_final_loss(final_loss);

        self.ensemble = ensemble;
        self.history = history;
        self.num_features = Some(dataset.num_features());

        Ok(&self.history)
    }

    /// Raw ensemble score for one row.
    ///
    /// Fails when the row width differs from the training data.
    pub fn predict(&self, row: &ArrayView1<'_, FeatureValue>) -> Result<Score> {
        self.check_width(row.len())?;
        Ok(self.ensemble.predict(row))
    }

    /// Raw ensemble scores for every row of a matrix.
    pub fn predict_batch(&self, features: &ArrayView2<'_, FeatureValue>) -> Result<Array1<Score>> {
        self.check_width(features.ncols())?;
        Ok(self.ensemble.predict_batch(features))
    }

    /// Scores mapped to the output scale of the loss (probabilities for
    /// logistic loss).
    pub fn predict_transformed(
        &self,
        features: &ArrayView2<'_, FeatureValue>,
    ) -> Result<Array1<Score>> {
        let loss = self.config.loss;
        Ok(self.predict_batch(features)?.mapv(|s| loss.transform(s)))
    }

    fn check_width(&self, width: usize) -> Result<()> {
        match self.num_features {
            Some(expected) if expected != width => Err(GbtError::dimension_mismatch(
                format!("{} features", expected),
                format!("{} features", width),
            )),
            _ => Ok(()),
        }
    }

    /// Get the current configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn ensemble(&self) -> &Ensemble {
        &self.ensemble
    }

    pub fn history(&self) -> &TrainingHistory {
        &self.history
    }

    /// Number of trees built so far.
    pub fn num_iterations(&self) -> usize {
        self.ensemble.len()
    }

    /// Feature count seen at training time, if trained.
    pub fn num_features(&self) -> Option<usize> {
        self.num_features
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigBuilder;
    use crate::core::types::{GainFormula, LossType};
    use ndarray::array;

    #[test]
    fn test_new_rejects_invalid_config() {
        let mut config = Config::default();
        config.max_depth = 0;
        assert!(GBDT::new(config).is_err());
    }

    #[test]
    fn test_trains_exact_round_count() {
        let config = ConfigBuilder::new().num_rounds(5).build().unwrap();
        let dataset = Dataset::new(array![[1.0], [2.0], [3.0]], array![1.0, 2.0, 3.0]).unwrap();
        let mut model = GBDT::new(config).unwrap();
        let history = model.train(&dataset).unwrap();
        assert_eq!(history.len(), 5);
        assert!(history.final_loss().is_some());
        assert_eq!(model.num_iterations(), 5);
        assert_eq!(model.ensemble().trees()[0].shrinkage(), 1.0);
        assert_eq!(model.ensemble().trees()[1].shrinkage(), 0.3);
    }

    #[test]
    fn test_first_round_loss_is_at_zero_predictions() {
        let config = ConfigBuilder::new().num_rounds(1).build().unwrap();
        let dataset = Dataset::new(array![[1.0], [2.0]], array![1.0, 3.0]).unwrap();
        let mut model = GBDT::new(config).unwrap();
        let history = model.train(&dataset).unwrap();
        assert_eq!(history.rounds()[0].loss, 5.0);
    }

    #[test]
    fn test_logistic_requires_binary_labels() {
        let config = ConfigBuilder::new()
            .num_rounds(2)
            .loss(LossType::Logistic)
            .build()
            .unwrap();
        let dataset = Dataset::new(array![[1.0], [2.0]], array![0.0, 2.0]).unwrap();
        let mut model = GBDT::new(config).unwrap();
        let err = model.train(&dataset).unwrap_err();
        assert!(err.is_configuration_error());
        assert_eq!(model.num_iterations(), 0);
    }

    #[test]
    fn test_predict_checks_row_width() {
        let config = ConfigBuilder::new()
            .num_rounds(2)
            .gain_formula(GainFormula::Standard)
            .build()
            .unwrap();
        let dataset = Dataset::new(array![[1.0, 0.0], [2.0, 1.0]], array![1.0, 3.0]).unwrap();
        let mut model = GBDT::new(config).unwrap();
        model.train(&dataset).unwrap();

        assert!(model.predict(&array![1.0, 0.0].view()).is_ok());
        let err = model.predict(&array![1.0].view()).unwrap_err();
        assert!(matches!(err, GbtError::DimensionMismatch { .. }));
    }

    #[test]
    fn test_untrained_model_predicts_zero() {
        let model = GBDT::new(Config::default()).unwrap();
        assert_eq!(model.predict(&array![4.0, 2.0].view()).unwrap(), 0.0);
    }
}
