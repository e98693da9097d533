// BSD 3-Clause License
//
// Copyright (c) 2025, BlackPortal ○
//
// Redistribution and use in source and binary forms, with or without
// modification, are permitted provided that the following conditions are met:
//
// 1. Redistributions of source code must retain the above copyright notice, this
//    list of conditions and the following disclaimer.
//
// 2. Redistributions in binary form must reproduce the above copyright notice,
//    this list of conditions and the following disclaimer in the documentation
//    and/or other materials provided with the distribution.
//
// 3. Neither the name of the copyright holder nor the names of its
//    contributors may be used to endorse or promote products derived from
//    this software without specific prior written permission.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
// AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
// IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
// DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
// FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
// DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
// SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
// CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
// OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
// OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.

use std::collections::HashMap;

use log::{debug, info};
use ndarray::{Array1, Array2, ArrayView1, Axis, Zip};

use crate::errors::ModelError;
use crate::scalers::{Scaler, StandardScaler};

/// Number of neighbors consulted by the purchase predictor.
pub const NEIGHBORS: usize = 3;

pub struct KNNBuilder {
    k: usize,
    normalize: bool,
    x_scaler: StandardScaler<f64>,
}

impl KNNBuilder {
    pub fn k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    pub fn normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    pub fn scaler(mut self, scaler: StandardScaler<f64>) -> Self {
        self.x_scaler = scaler;
        self
    }

    pub fn build(self) -> KNN {
        KNN {
            x_train: None,
            y_train: None,
            k: self.k,
            normalize: self.normalize,
            x_scaler: self.x_scaler,
        }
    }
}

/// k-nearest-neighbors classifier using unweighted Euclidean distance.
///
/// Features are used as given unless `normalize(true)` is set on the builder,
/// in which case they are standardized with the training set's statistics.
pub struct KNN {
    x_train: Option<Array2<f64>>,
    y_train: Option<Array1<u8>>,
    k: usize,
    normalize: bool,
    x_scaler: StandardScaler<f64>,
}

impl KNN {
    pub fn new() -> KNNBuilder {
        KNNBuilder { k: NEIGHBORS, normalize: false, x_scaler: StandardScaler::new() }
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn fit(&mut self, x: &Array2<f64>, y: &Array1<u8>) -> Result<(), ModelError> {
        if x.ncols() == 0 {
            return Err(ModelError::NoFeatures);
        }
        if x.is_empty() || y.is_empty() {
            return Err(ModelError::EmptyInput);
        }
        if x.nrows() != y.len() {
            return Err(ModelError::DimensionMismatch { expected: x.nrows(), actual: y.len() });
        }
        if self.k == 0 || self.k > x.nrows() {
            return Err(ModelError::InvalidK { k: self.k, n_samples: x.nrows() });
        }

        let x_scaled = if self.normalize { self.x_scaler.fit_transform(x)? } else { x.clone() };

        info!("Fitted KNN with k={} on {} samples", self.k, x.nrows());
        self.x_train = Some(x_scaled);
        self.y_train = Some(y.clone());
        Ok(())
    }

    pub fn predict(&self, x: &Array2<f64>) -> Result<Array1<u8>, ModelError> {
        let x_train = self.x_train.as_ref().ok_or(ModelError::NotFitted)?;
        let y_train = self.y_train.as_ref().ok_or(ModelError::NotFitted)?;

        if x.is_empty() {
            return Err(ModelError::EmptyInput);
        }
        if x.ncols() != x_train.ncols() {
            return Err(ModelError::DimensionMismatch {
                expected: x_train.ncols(),
                actual: x.ncols(),
            });
        }

        let x_scaled = if self.normalize { self.x_scaler.transform(x)? } else { x.clone() };

        let mut predictions = Array1::zeros(x_scaled.nrows());
        for (i, row) in x_scaled.axis_iter(Axis(0)).enumerate() {
            let mut neighbors: Vec<(usize, f64)> = x_train
                .axis_iter(Axis(0))
                .map(|v| euclidean_distance(v, row))
                .enumerate()
                .collect();

            // Equal distances fall back to training order so results are deterministic.
            let nearest_first =
                |a: &(usize, f64), b: &(usize, f64)| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0));
            if self.k < neighbors.len() {
                neighbors.select_nth_unstable_by(self.k - 1, nearest_first);
            }

            let votes = neighbors[..self.k].iter().map(|&(idx, _)| y_train[idx]);
            predictions[i] = majority_vote(votes).ok_or(ModelError::EmptyInput)?;
        }
        debug!("Predicted {} samples", predictions.len());
        Ok(predictions)
    }

    pub fn calculate_accuracy(&self, predictions: &Array1<u8>, y_test: &Array1<u8>) -> f64 {
        let correct = predictions
            .iter()
            .zip(y_test.iter())
            .filter(|(pred, true_label)| pred == true_label)
            .count();
        correct as f64 / predictions.len() as f64
    }
}

/// Fits the purchase predictor: k = 3 on raw, unscaled features.
pub fn train_model(x: &Array2<f64>, y: &Array1<u8>) -> Result<KNN, ModelError> {
    let mut model = KNN::new().k(NEIGHBORS).normalize(false).build();
    model.fit(x, y)?;
    Ok(model)
}

#[inline(always)]
fn euclidean_distance(a: ArrayView1<f64>, b: ArrayView1<f64>) -> f64 {
    let squared_sum = Zip::from(a).and(b).fold(0.0, |acc, &a_i, &b_i| {
        let diff = a_i - b_i;
        acc + diff * diff
    });
    squared_sum.sqrt()
}

/// Most frequent label; ties go to the smallest label.
fn majority_vote(labels: impl Iterator<Item = u8>) -> Option<u8> {
    let mut class_counts: HashMap<u8, usize> = HashMap::new();
    for label in labels {
        *class_counts.entry(label).or_insert(0) += 1;
    }
    class_counts
        .into_iter()
        .max_by(|a, b| a.1.cmp(&b.1).then_with(|| b.0.cmp(&a.0)))
        .map(|(label, _)| label)
}
