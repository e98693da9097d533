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

use std::path::Path;

use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::algorithms::{KNN, NEIGHBORS};
use crate::data::split::TEST_SIZE;
use crate::data::{ShoppingLoader, Split, load_data, train_test_split};
use crate::errors::ShoppingError;
use crate::metrics::{Report, evaluate};

/// Settings for one evaluation run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    test_size: f64,
    k: usize,
    normalize: bool,
    seed: Option<u64>,
}

impl RunConfig {
    pub fn new() -> Self {
        RunConfig { test_size: TEST_SIZE, k: NEIGHBORS, normalize: false, seed: None }
    }

    pub fn with_test_size(mut self, test_size: f64) -> Self {
        self.test_size = test_size;
        self
    }

    pub fn with_k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    pub fn with_normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    /// Fixes the shuffle so repeated runs use the same partition.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Loads the dataset at `path`, holds out a test partition, fits the classifier
/// on the rest and evaluates its predictions on the held-out sessions.
pub fn run<P: AsRef<Path>>(path: P, config: &RunConfig) -> Result<Report, ShoppingError> {
    info!("Starting evaluation run with config: {:?}", config);
    let (evidence, labels) = load_data::<ShoppingLoader, _>(path)?;

    let split: Split = match config.seed {
        Some(seed) => {
            train_test_split(&evidence, &labels, config.test_size, &mut StdRng::seed_from_u64(seed))?
        }
        None => train_test_split(&evidence, &labels, config.test_size, &mut rand::thread_rng())?,
    };

    let mut model = KNN::new().k(config.k).normalize(config.normalize).build();
    model.fit(&split.x_train, &split.y_train)?;
    let predictions = model.predict(&split.x_test)?;

    let evaluation = evaluate(&split.y_test, &predictions)?;
    info!(
        "Evaluation finished: sensitivity={:.4}, specificity={:.4}",
        evaluation.sensitivity(),
        evaluation.specificity()
    );
    Ok(Report::new(evaluation))
}
