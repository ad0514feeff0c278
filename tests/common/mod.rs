//! Common test utilities for newton-gbt integration tests.

#![allow(dead_code)]

use ndarray::{Array1, Array2};
use newton_gbt::{Dataset, GBDT};
use rand::prelude::*;
use std::fs;
use std::path::Path;

/// Random features in [-5, 5) with a noisy nonlinear target.
pub fn create_regression_data(num_samples: usize, num_features: usize, seed: u64) -> Dataset {
    let mut rng = StdRng::seed_from_u64(seed);

    let mut features = Array2::zeros((num_samples, num_features));
    for value in features.iter_mut() {
        *value = rng.gen_range(-5.0..5.0);
    }

    let mut labels = Array1::zeros(num_samples);
    for i in 0..num_samples {
        let mut label = 0.0;
        for j in 0..num_features {
            label += features[[i, j]] * ((j + 1) as f64 * 0.5);
        }
        if features[[i, 0]] > 1.0 {
            label += 4.0;
        }
        labels[i] = label + rng.gen_range(-0.1..0.1);
    }

    Dataset::new(features, labels).unwrap()
}

/// Random features in [-3, 3) labelled by the sign of an alternating sum.
pub fn create_binary_data(num_samples: usize, num_features: usize, seed: u64) -> Dataset {
    let mut rng = StdRng::seed_from_u64(seed);

    let mut features = Array2::zeros((num_samples, num_features));
    for value in features.iter_mut() {
        *value = rng.gen_range(-3.0..3.0);
    }

    let mut labels = Array1::zeros(num_samples);
    for i in 0..num_samples {
        let mut score = 0.0;
        for j in 0..num_features {
            score += features[[i, j]] * if j % 2 == 0 { 1.0 } else { -1.0 };
        }
        labels[i] = if score > 0.0 { 1.0 } else { 0.0 };
    }

    Dataset::new(features, labels).unwrap()
}

/// One feature, negatives labelled 0 and positives labelled 1, in sorted order.
pub fn create_separable_data(per_class: usize) -> Dataset {
    let n = per_class * 2;
    let mut features = Array2::zeros((n, 1));
    let mut labels = Array1::zeros(n);
    for i in 0..per_class {
        features[[i, 0]] = -((per_class - i) as f64);
        features[[per_class + i, 0]] = (i + 1) as f64;
        labels[per_class + i] = 1.0;
    }
    Dataset::new(features, labels).unwrap()
}

/// Write a dataset as delimited text with the label in the first column.
pub fn write_delimited<P: AsRef<Path>>(
    path: P,
    dataset: &Dataset,
    delimiter: char,
    header: bool,
) -> std::io::Result<()> {
    let mut content = String::new();
    let sep = delimiter.to_string();

    if header {
        let mut names = vec!["label".to_string()];
        names.extend((0..dataset.num_features()).map(|j| format!("f{}", j)));
        content.push_str(&names.join(&sep));
        content.push('\n');
    }

    let features = dataset.features();
    for (i, label) in dataset.labels().iter().enumerate() {
        let mut fields = vec![label.to_string()];
        fields.extend(features.row(i).iter().map(|v| v.to_string()));
        content.push_str(&fields.join(&sep));
        content.push('\n');
    }

    fs::write(path, content)
}

/// Check the structural invariants of every tree in a trained model.
pub fn assert_trees_valid(model: &GBDT) {
    let max_depth = model.config().max_depth;
    for (round, tree) in model.ensemble().trees().iter().enumerate() {
        tree.validate()
            .unwrap_or_else(|e| panic!("tree {} is invalid: {}", round, e));
        for node in tree.nodes() {
            if node.is_leaf() {
                assert!(node.depth() <= max_depth + 1, "leaf too deep in tree {}", round);
            } else {
                assert!(node.depth() <= max_depth, "split too deep in tree {}", round);
            }
        }
    }
}
