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

use std::fmt;

use log::debug;
use ndarray::Array1;

use crate::errors::MetricsError;

/// Label-wise tally of a binary classifier's predictions against the truth.
///
/// Only `evaluate` builds an `Evaluation`, and it guarantees that both
/// `positive_total` and `negative_total` are non-zero, so the rates are always
/// defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluation {
    positive_total: usize,
    positive_correct: usize,
    negative_total: usize,
    negative_correct: usize,
}

impl Evaluation {
    pub fn positive_total(&self) -> usize {
        self.positive_total
    }

    pub fn positive_correct(&self) -> usize {
        self.positive_correct
    }

    pub fn negative_total(&self) -> usize {
        self.negative_total
    }

    pub fn negative_correct(&self) -> usize {
        self.negative_correct
    }

    /// True positive rate.
    pub fn sensitivity(&self) -> f64 {
        self.positive_correct as f64 / self.positive_total as f64
    }

    /// True negative rate.
    pub fn specificity(&self) -> f64 {
        self.negative_correct as f64 / self.negative_total as f64
    }

    pub fn total(&self) -> usize {
        self.positive_total + self.negative_total
    }

    pub fn correct(&self) -> usize {
        self.positive_correct + self.negative_correct
    }

    pub fn incorrect(&self) -> usize {
        self.total() - self.correct()
    }
}

/// Compares predicted labels against actual labels.
///
/// Both sequences must have equal length and contain only 0 and 1. A test set
/// without any positive (or any negative) label is rejected, since sensitivity
/// (or specificity) would be a division by zero.
pub fn evaluate(actual: &Array1<u8>, predicted: &Array1<u8>) -> Result<Evaluation, MetricsError> {
    if actual.len() != predicted.len() {
        return Err(MetricsError::DimensionMismatch {
            expected: actual.len(),
            actual: predicted.len(),
        });
    }

    let mut positive_correct = 0;
    let mut positive_total = 0;
    let mut negative_correct = 0;
    let mut negative_total = 0;
    for (index, (&label, &prediction)) in actual.iter().zip(predicted.iter()).enumerate() {
        if label > 1 {
            return Err(MetricsError::InvalidLabel { value: label, index });
        }
        if prediction > 1 {
            return Err(MetricsError::InvalidLabel { value: prediction, index });
        }
        if label == 1 {
            positive_total += 1;
            positive_correct += usize::from(prediction == 1);
        } else {
            negative_total += 1;
            negative_correct += usize::from(prediction == 0);
        }
    }

    if positive_total == 0 {
        return Err(MetricsError::NoPositiveLabels);
    }
    if negative_total == 0 {
        return Err(MetricsError::NoNegativeLabels);
    }

    debug!(
        "Evaluated {} predictions: {}/{} positives, {}/{} negatives correct",
        actual.len(),
        positive_correct,
        positive_total,
        negative_correct,
        negative_total
    );
    Ok(Evaluation { positive_total, positive_correct, negative_total, negative_correct })
}

/// Printable summary of an evaluation run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Report {
    evaluation: Evaluation,
}

impl Report {
    pub fn new(evaluation: Evaluation) -> Self {
        Report { evaluation }
    }

    pub fn evaluation(&self) -> &Evaluation {
        &self.evaluation
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Correct: {}", self.evaluation.correct())?;
        writeln!(f, "Incorrect: {}", self.evaluation.incorrect())?;
        writeln!(f, "True Positive Rate: {:.2}%", 100.0 * self.evaluation.sensitivity())?;
        write!(f, "True Negative Rate: {:.2}%", 100.0 * self.evaluation.specificity())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_evaluate_half_right() {
        let actual = array![1u8, 1, 0, 0];
        let predicted = array![1u8, 0, 0, 1];
        let evaluation = evaluate(&actual, &predicted).unwrap();

        assert_eq!(evaluation.positive_total(), 2);
        assert_eq!(evaluation.positive_correct(), 1);
        assert_eq!(evaluation.negative_total(), 2);
        assert_eq!(evaluation.negative_correct(), 1);
        assert_eq!(evaluation.sensitivity(), 0.5);
        assert_eq!(evaluation.specificity(), 0.5);
    }

    #[test]
    fn test_evaluate_perfect_predictions() {
        let actual = array![0u8, 1, 1, 0, 0, 1];
        let evaluation = evaluate(&actual, &actual.clone()).unwrap();

        assert_eq!(evaluation.sensitivity(), 1.0);
        assert_eq!(evaluation.specificity(), 1.0);
        assert_eq!(evaluation.correct(), 6);
        assert_eq!(evaluation.incorrect(), 0);
    }

    #[test]
    fn test_evaluate_all_negative_predictions() {
        let actual = array![1u8, 0, 1, 0, 0];
        let predicted = array![0u8, 0, 0, 0, 0];
        let evaluation = evaluate(&actual, &predicted).unwrap();

        assert_eq!(evaluation.sensitivity(), 0.0);
        assert_eq!(evaluation.specificity(), 1.0);
        assert_eq!(evaluation.correct(), 3);
        assert_eq!(evaluation.incorrect(), 2);
        assert_eq!(evaluation.total(), 5);
    }

    #[test]
    fn test_evaluate_no_positive_labels() {
        let result = evaluate(&array![0u8, 0], &array![0u8, 1]);
        assert!(matches!(result, Err(MetricsError::NoPositiveLabels)));
    }

    #[test]
    fn test_evaluate_no_negative_labels() {
        let result = evaluate(&array![1u8, 1], &array![0u8, 1]);
        assert!(matches!(result, Err(MetricsError::NoNegativeLabels)));
    }

    #[test]
    fn test_evaluate_empty() {
        let empty: Array1<u8> = Array1::zeros(0);
        let result = evaluate(&empty, &empty);
        assert!(matches!(result, Err(MetricsError::NoPositiveLabels)));
    }

    #[test]
    fn test_evaluate_length_mismatch() {
        let result = evaluate(&array![1u8, 0, 1], &array![1u8, 0]);
        assert!(matches!(result, Err(MetricsError::DimensionMismatch { expected: 3, actual: 2 })));
    }

    #[test]
    fn test_evaluate_rejects_non_binary_labels() {
        let result = evaluate(&array![1u8, 2, 0], &array![1u8, 1, 0]);
        assert!(matches!(result, Err(MetricsError::InvalidLabel { value: 2, index: 1 })));

        let result = evaluate(&array![1u8, 0], &array![1u8, 3]);
        assert!(matches!(result, Err(MetricsError::InvalidLabel { value: 3, index: 1 })));
    }

    #[test]
    fn test_report_format() {
        let actual = array![1u8, 1, 1, 0, 0, 0];
        let predicted = array![1u8, 1, 0, 0, 0, 0];
        let report = Report::new(evaluate(&actual, &predicted).unwrap());

        assert_eq!(
            report.to_string(),
            "Correct: 5\nIncorrect: 1\nTrue Positive Rate: 66.67%\nTrue Negative Rate: 100.00%"
        );
    }
}
