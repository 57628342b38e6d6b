//! Multinomial logistic regression.
//!
//! L2 penalty on the weights (`1 / (2C) * ||W||^2`), intercepts unpenalised.
//! Fitted with full-batch gradient descent from zero weights, so the same
//! inputs always give the same coefficients.

use serde::{Deserialize, Serialize};

/// Solver settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverOptions {
    /// Inverse regularisation strength
    pub c: f64,
    pub learning_rate: f64,
    /// Stop once the largest gradient component falls below this
    pub tolerance: f64,
    pub max_iter: usize,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            c: 1.0,
            learning_rate: 0.1,
            tolerance: 1e-6,
            max_iter: 1000,
        }
    }
}

/// Fitted coefficients, one row per class
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegression {
    coeffs: Vec<Vec<f64>>,
    intercept: Vec<f64>,
    iterations: usize,
}

impl LogisticRegression {
    /// Fit on dense rows `x` with class indices `y` in `0..n_classes`.
    pub fn fit(x: &[Vec<f64>], y: &[usize], n_classes: usize, options: SolverOptions) -> Self {
        let dim = x.first().map(|row| row.len()).unwrap_or(0);
        let mut coeffs = vec![vec![0.0; dim]; n_classes];
        let mut intercept = vec![0.0; n_classes];
        let mut iterations = 0;

        for iter in 0..options.max_iter {
            iterations = iter;

            let mut grad_w: Vec<Vec<f64>> = coeffs
                .iter()
                .map(|row| row.iter().map(|w| w / options.c).collect())
                .collect();
            let mut grad_b = vec![0.0; n_classes];

            for (row, &target) in x.iter().zip(y) {
                let probs = softmax(&scores(&coeffs, &intercept, row));
                for (k, p) in probs.iter().enumerate() {
                    let delta = p - if k == target { 1.0 } else { 0.0 };
                    grad_b[k] += delta;
                    for (g, xj) in grad_w[k].iter_mut().zip(row) {
                        *g += delta * xj;
                    }
                }
            }

            let max_grad = grad_w
                .iter()
                .flatten()
                .chain(grad_b.iter())
                .fold(0.0f64, |acc, g| acc.max(g.abs()));
            if max_grad < options.tolerance {
                break;
            }

            for k in 0..n_classes {
                intercept[k] -= options.learning_rate * grad_b[k];
                for (w, g) in coeffs[k].iter_mut().zip(&grad_w[k]) {
                    *w -= options.learning_rate * g;
                }
            }
        }

        Self {
            coeffs,
            intercept,
            iterations,
        }
    }

    /// Class probabilities for one feature row
    pub fn predict_proba(&self, row: &[f64]) -> Vec<f64> {
        softmax(&scores(&self.coeffs, &self.intercept, row))
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }
}

fn scores(coeffs: &[Vec<f64>], intercept: &[f64], row: &[f64]) -> Vec<f64> {
    coeffs
        .iter()
        .zip(intercept)
        .map(|(w, b)| b + w.iter().zip(row).map(|(wj, xj)| wj * xj).sum::<f64>())
        .collect()
}

fn softmax(z: &[f64]) -> Vec<f64> {
    let max = z.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let exp: Vec<f64> = z.iter().map(|v| (v - max).exp()).collect();
    let total: f64 = exp.iter().sum();
    exp.into_iter().map(|v| v / total).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_softmax_sums_to_one() {
        let p = softmax(&[1.0, 2.0, 3.0]);
        assert!((p.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        assert!(p[2] > p[1] && p[1] > p[0]);
    }

    #[test]
    fn test_separable_classes() {
        let x = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
        let y = vec![0, 1];
        let model = LogisticRegression::fit(&x, &y, 2, SolverOptions::default());

        let p0 = model.predict_proba(&[1.0, 0.0]);
        let p1 = model.predict_proba(&[0.0, 1.0]);
        assert!(p0[0] > 0.5);
        assert!(p1[1] > 0.5);
    }

    #[test]
    fn test_converges_before_cap() {
        let x = vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![0.0, 1.0]];
        let y = vec![0, 1, 1];
        let model = LogisticRegression::fit(&x, &y, 2, SolverOptions::default());
        assert!(model.iterations() < SolverOptions::default().max_iter - 1);
    }

    #[test]
    fn test_zero_row_follows_intercepts() {
        let x = vec![vec![1.0], vec![1.0], vec![0.0]];
        let y = vec![0, 0, 1];
        let model = LogisticRegression::fit(&x, &y, 2, SolverOptions::default());
        let p = model.predict_proba(&[0.0]);
        assert!((p.iter().sum::<f64>() - 1.0).abs() < 1e-12);
    }
}
