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

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CsvError {
    #[error("Failed to open file: {0}")]
    FileOpen(#[from] std::io::Error),

    #[error("CSV file is empty")]
    EmptyFile,

    #[error("Missing required column '{column}'")]
    MissingColumn { column: &'static str },

    #[error("Inconsistent column count: row {row} has {actual} columns, expected {expected}")]
    InconsistentColumns { row: usize, actual: usize, expected: usize },

    #[error("Invalid integer '{value}' at row {row}, column {column}: {source}")]
    InvalidInteger {
        value: String,
        row: usize,
        column: &'static str,
        source: std::num::ParseIntError,
    },

    #[error("Invalid float '{value}' at row {row}, column {column}: {source}")]
    InvalidFloat {
        value: String,
        row: usize,
        column: &'static str,
        source: std::num::ParseFloatError,
    },

    #[error("Unknown month '{value}' at row {row}, column Month")]
    UnknownMonth { value: String, row: usize },

    #[error("Failed to shape data into array: {0}")]
    ArrayShape(#[from] ndarray::ShapeError),

    #[error("Failed to parse CSV: {0}")]
    CsvParse(#[from] csv::Error),
}

#[derive(Error, Debug)]
pub enum SplitError {
    #[error("Test size must be between 0 and 1 (exclusive), got {0}")]
    InvalidTestSize(f64),

    #[error("Dimension mismatch: expected {expected} labels, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Splitting {n_samples} samples with test size {test_size} leaves an empty partition")]
    EmptyPartition { n_samples: usize, test_size: f64 },
}

#[derive(Error, Debug)]
pub enum ScalerError {
    #[error("Input is empty")]
    EmptyInput,

    #[error("Scaler has not been fitted")]
    NotFitted,

    #[error("Dimension mismatch: expected {expected} features, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Input is empty")]
    EmptyInput,

    #[error("Input has no features")]
    NoFeatures,

    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Invalid number of neighbors: k = {k} with {n_samples} training samples")]
    InvalidK { k: usize, n_samples: usize },

    #[error("Model has not been fitted")]
    NotFitted,

    #[error("Scaler error: {0}")]
    Scaler(#[from] ScalerError),
}

#[derive(Error, Debug)]
pub enum MetricsError {
    #[error("Dimension mismatch: {expected} actual labels, {actual} predictions")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Invalid label {value} at index {index}, labels must be 0 or 1")]
    InvalidLabel { value: u8, index: usize },

    #[error("Sensitivity is undefined: no positive labels in the test set")]
    NoPositiveLabels,

    #[error("Specificity is undefined: no negative labels in the test set")]
    NoNegativeLabels,
}

#[derive(Error, Debug)]
pub enum ShoppingError {
    #[error("CSV error: {0}")]
    Csv(#[from] CsvError),

    #[error("Split error: {0}")]
    Split(#[from] SplitError),

    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    #[error("Metrics error: {0}")]
    Metrics(#[from] MetricsError),
}
