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

use log::debug;
use ndarray::{Array1, Array2, Axis};
use rand::Rng;
use rand::seq::SliceRandom;

use crate::errors::SplitError;

/// Fraction of sessions held out for evaluation.
pub const TEST_SIZE: f64 = 0.4;

/// Train and test partitions produced by `train_test_split`.
#[derive(Debug, Clone)]
pub struct Split {
    pub x_train: Array2<f64>,
    pub x_test: Array2<f64>,
    pub y_train: Array1<u8>,
    pub y_test: Array1<u8>,
}

/// Randomly partitions rows into a training and a test set.
///
/// The test partition receives `ceil(test_size * n)` rows and the training
/// partition the rest. Rows keep their labels; the order inside each partition
/// follows the shuffle.
pub fn train_test_split<R: Rng + ?Sized>(
    x: &Array2<f64>,
    y: &Array1<u8>,
    test_size: f64,
    rng: &mut R,
) -> Result<Split, SplitError> {
    if !(test_size > 0.0 && test_size < 1.0) {
        return Err(SplitError::InvalidTestSize(test_size));
    }
    if x.nrows() != y.len() {
        return Err(SplitError::DimensionMismatch { expected: x.nrows(), actual: y.len() });
    }

    let n_samples = x.nrows();
    let n_test = (test_size * n_samples as f64).ceil() as usize;
    let n_train = n_samples - n_test;
    if n_test == 0 || n_train == 0 {
        return Err(SplitError::EmptyPartition { n_samples, test_size });
    }

    let mut indices: Vec<usize> = (0..n_samples).collect();
    indices.shuffle(rng);
    let (test_indices, train_indices) = indices.split_at(n_test);
    debug!("Split data: train_size={}, test_size={}", n_train, n_test);

    Ok(Split {
        x_train: x.select(Axis(0), train_indices),
        x_test: x.select(Axis(0), test_indices),
        y_train: y.select(Axis(0), train_indices),
        y_test: y.select(Axis(0), test_indices),
    })
}
