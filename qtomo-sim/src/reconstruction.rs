//! Least-squares density-matrix reconstruction
//!
//! The reconstructor fits a free d×d complex matrix to the retained
//! measurements by minimizing the sum of squared residuals
//!
//! ```text
//! cost(ρ) = Σᵢ (Re Tr(Oᵢ ρ) − measuredᵢ)²
//! ```
//!
//! over the 2·d² flattened real and imaginary entries, starting from the
//! maximally mixed state I/d. No Hermiticity, trace, or positivity
//! constraint is imposed, so the estimate is not guaranteed to be a valid
//! density matrix; downstream metric code treats physicality as a soft
//! target.
//!
//! The minimizer is L-BFGS with a two-loop recursion, central
//! finite-difference gradients, and Armijo backtracking line search.
//! Failure to converge is a first-class outcome: callers receive either a
//! tagged [`Reconstruction`] or a [`SimError::ReconstructionFailed`], never
//! a partially-minimized matrix posing as a fit.

use crate::error::{Result, SimError};
use crate::measurement::MeasurementSet;
use num_complex::Complex64;
use qtomo_core::OperatorBasis;
use qtomo_state::DensityMatrix;

/// Configuration for the L-BFGS reconstructor
#[derive(Debug, Clone)]
pub struct ReconstructorConfig {
    /// Maximum number of iterations
    pub max_iterations: usize,

    /// Convergence tolerance for cost change and gradient norm
    pub tolerance: f64,

    /// Number of corrections kept for the inverse-Hessian approximation
    pub memory_size: usize,

    /// Step size for numerical gradient computation
    pub gradient_epsilon: f64,

    /// Maximum number of line search backtracking steps
    pub max_line_search_iterations: usize,
}

impl Default for ReconstructorConfig {
    fn default() -> Self {
        Self {
            max_iterations: 1000,
            tolerance: 1e-9,
            memory_size: 10,
            gradient_epsilon: 1e-7,
            max_line_search_iterations: 30,
        }
    }
}

/// How the optimizer terminated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvergenceStatus {
    /// Not yet converged
    NotConverged,
    /// Cost change below threshold
    CostConverged,
    /// Gradient norm below threshold
    GradientConverged,
    /// Both cost and gradient below threshold
    FullyConverged,
}

/// Summary of a completed optimization
#[derive(Debug, Clone)]
pub struct OptimizationSummary {
    /// Iterations performed
    pub iterations: usize,
    /// Final cost value
    pub final_cost: f64,
    /// Final gradient norm
    pub gradient_norm: f64,
    /// Termination status
    pub status: ConvergenceStatus,
}

/// Outcome of a reconstruction attempt
///
/// Failure (non-convergence) is reported through `SimError`, so both
/// variants here carry a real matrix. Consumers must match explicitly;
/// degenerate estimates carry no measurement information and must be
/// flagged low-confidence wherever they are scored.
#[derive(Debug, Clone)]
pub enum Reconstruction {
    /// The optimizer converged on a genuine fit
    Converged {
        estimate: DensityMatrix,
        summary: OptimizationSummary,
    },

    /// Zero retained measurements: the cost is identically zero and the
    /// returned estimate is just the initial maximally mixed prior
    Degenerate { estimate: DensityMatrix },
}

impl Reconstruction {
    /// The estimated density matrix, whichever variant produced it
    pub fn estimate(&self) -> &DensityMatrix {
        match self {
            Reconstruction::Converged { estimate, .. } => estimate,
            Reconstruction::Degenerate { estimate } => estimate,
        }
    }

    /// Whether this reconstruction carries no measurement information
    pub fn is_degenerate(&self) -> bool {
        matches!(self, Reconstruction::Degenerate { .. })
    }
}

/// L-BFGS least-squares state reconstructor
pub struct StateReconstructor {
    config: ReconstructorConfig,
}

impl StateReconstructor {
    /// Create a reconstructor with the given optimizer settings
    pub fn new(config: ReconstructorConfig) -> Self {
        Self { config }
    }

    /// Fit a density-matrix estimate to the retained measurements
    ///
    /// # Errors
    /// Returns `SimError::ReconstructionFailed` when the iteration budget
    /// is exhausted or the line search cannot improve the objective.
    pub fn reconstruct(
        &self,
        measurements: &MeasurementSet,
        basis: &OperatorBasis,
    ) -> Result<Reconstruction> {
        let num_qubits = basis.num_qubits();
        let dim = basis.dimension();

        if measurements.is_empty() {
            // Uninformative: any candidate minimizes an identically-zero
            // cost, so return the prior and say so.
            let estimate = DensityMatrix::maximally_mixed(num_qubits)?;
            return Ok(Reconstruction::Degenerate { estimate });
        }

        let mut operators = Vec::with_capacity(measurements.len());
        let mut targets = Vec::with_capacity(measurements.len());
        for m in measurements.iter() {
            operators.push(basis.get(m.operator_index)?.matrix.as_slice());
            targets.push(m.expectation);
        }

        // Flattened re/im parameters, initialized to I/d
        let num_params = 2 * dim * dim;
        let mut params = vec![0.0; num_params];
        for i in 0..dim {
            params[2 * (i * dim + i)] = 1.0 / dim as f64;
        }

        let cost_fn = |p: &[f64]| -> f64 {
            let mut cost = 0.0;
            for (op, &target) in operators.iter().zip(targets.iter()) {
                let residual = predicted_expectation(p, op, dim) - target;
                cost += residual * residual;
            }
            cost
        };

        // L-BFGS correction history
        let mut s_history: Vec<Vec<f64>> = Vec::new();
        let mut y_history: Vec<Vec<f64>> = Vec::new();
        let mut rho_history: Vec<f64> = Vec::new();

        let mut prev_cost = f64::INFINITY;
        let mut prev_params: Vec<f64> = Vec::new();
        let mut prev_gradient: Vec<f64> = Vec::new();
        let mut cost = cost_fn(&params);

        for iteration in 0..self.config.max_iterations {
            let gradient = self.numerical_gradient(&cost_fn, &params);
            let gradient_norm = gradient.iter().map(|g| g * g).sum::<f64>().sqrt();
            let cost_change = (cost - prev_cost).abs();

            let status = self.check_convergence(cost_change, gradient_norm);
            if status != ConvergenceStatus::NotConverged {
                let estimate = params_to_matrix(&params, num_qubits, dim)?;
                return Ok(Reconstruction::Converged {
                    estimate,
                    summary: OptimizationSummary {
                        iterations: iteration,
                        final_cost: cost,
                        gradient_norm,
                        status,
                    },
                });
            }

            // Record the correction pair for the step taken last iteration:
            // s = xₖ − xₖ₋₁ paired with y = gₖ − gₖ₋₁. Pairs violating the
            // curvature condition s·y > 0 are skipped to keep the inverse-
            // Hessian approximation positive definite.
            if iteration > 0 {
                let s_k: Vec<f64> = params
                    .iter()
                    .zip(prev_params.iter())
                    .map(|(new, old)| new - old)
                    .collect();
                let y_k: Vec<f64> = gradient
                    .iter()
                    .zip(prev_gradient.iter())
                    .map(|(new, old)| new - old)
                    .collect();

                let sy: f64 = s_k.iter().zip(y_k.iter()).map(|(s, y)| s * y).sum();
                if sy > 1e-12 {
                    s_history.push(s_k);
                    y_history.push(y_k);
                    rho_history.push(1.0 / sy);

                    if s_history.len() > self.config.memory_size {
                        s_history.remove(0);
                        y_history.remove(0);
                        rho_history.remove(0);
                    }
                }
            }

            // Two-loop recursion; steepest descent on the first pass
            let mut direction: Vec<f64> = if s_history.is_empty() {
                gradient.iter().map(|&g| -g).collect()
            } else {
                lbfgs_direction(&gradient, &s_history, &y_history, &rho_history)
            };

            // Fall back to steepest descent if the recursion lost descent
            let dir_deriv: f64 = gradient
                .iter()
                .zip(direction.iter())
                .map(|(g, d)| g * d)
                .sum();
            if dir_deriv >= 0.0 {
                direction = gradient.iter().map(|&g| -g).collect();
            }

            let step = match self.line_search(&cost_fn, &params, &direction, cost, &gradient) {
                Some(step) => step,
                None => {
                    // A stall at numerically zero gradient is convergence,
                    // not failure: there is nowhere left to descend.
                    if gradient_norm < self.config.tolerance.sqrt() {
                        let estimate = params_to_matrix(&params, num_qubits, dim)?;
                        return Ok(Reconstruction::Converged {
                            estimate,
                            summary: OptimizationSummary {
                                iterations: iteration,
                                final_cost: cost,
                                gradient_norm,
                                status: ConvergenceStatus::GradientConverged,
                            },
                        });
                    }
                    return Err(SimError::ReconstructionFailed {
                        iterations: iteration,
                        final_cost: cost,
                        reason: "line search could not improve the objective".to_string(),
                    });
                }
            };

            let new_params: Vec<f64> = params
                .iter()
                .zip(direction.iter())
                .map(|(&p, &d)| p + step * d)
                .collect();

            prev_params = params;
            prev_gradient = gradient;
            prev_cost = cost;
            params = new_params;
            cost = cost_fn(&params);
        }

        Err(SimError::ReconstructionFailed {
            iterations: self.config.max_iterations,
            final_cost: cost,
            reason: "iteration budget exhausted".to_string(),
        })
    }

    /// Central finite-difference gradient
    fn numerical_gradient<F>(&self, cost_fn: &F, params: &[f64]) -> Vec<f64>
    where
        F: Fn(&[f64]) -> f64,
    {
        let eps = self.config.gradient_epsilon;
        let mut gradient = vec![0.0; params.len()];
        let mut probe = params.to_vec();

        for i in 0..params.len() {
            let original = probe[i];

            probe[i] = original + eps;
            let cost_plus = cost_fn(&probe);

            probe[i] = original - eps;
            let cost_minus = cost_fn(&probe);

            probe[i] = original;
            gradient[i] = (cost_plus - cost_minus) / (2.0 * eps);
        }

        gradient
    }

    /// Backtracking line search under the Armijo condition
    ///
    /// Returns the accepted step size, or None if no backtracking step
    /// improves the objective.
    fn line_search<F>(
        &self,
        cost_fn: &F,
        params: &[f64],
        direction: &[f64],
        current_cost: f64,
        gradient: &[f64],
    ) -> Option<f64>
    where
        F: Fn(&[f64]) -> f64,
    {
        const C1: f64 = 1e-4;
        const TAU: f64 = 0.5;
        let mut step = 1.0;

        let dir_deriv: f64 = gradient
            .iter()
            .zip(direction.iter())
            .map(|(g, d)| g * d)
            .sum();

        for _ in 0..self.config.max_line_search_iterations {
            let candidate: Vec<f64> = params
                .iter()
                .zip(direction.iter())
                .map(|(&p, &d)| p + step * d)
                .collect();

            if cost_fn(&candidate) <= current_cost + C1 * step * dir_deriv {
                return Some(step);
            }

            step *= TAU;
        }

        None
    }

    /// Check convergence criteria
    fn check_convergence(&self, cost_change: f64, gradient_norm: f64) -> ConvergenceStatus {
        let tol = self.config.tolerance;
        if cost_change < tol && gradient_norm < tol {
            ConvergenceStatus::FullyConverged
        } else if cost_change < tol {
            ConvergenceStatus::CostConverged
        } else if gradient_norm < tol {
            ConvergenceStatus::GradientConverged
        } else {
            ConvergenceStatus::NotConverged
        }
    }
}

/// Predicted expectation Re Tr(O ρ) for flattened re/im parameters
///
/// ρ[k][j] lives at params[2·(k·dim + j)] (re) and the following slot (im).
fn predicted_expectation(params: &[f64], operator: &[Complex64], dim: usize) -> f64 {
    let mut result = 0.0;
    for j in 0..dim {
        for k in 0..dim {
            let o = operator[j * dim + k];
            let idx = 2 * (k * dim + j);
            // Re(O[j][k] · ρ[k][j])
            result += o.re * params[idx] - o.im * params[idx + 1];
        }
    }
    result
}

/// Rebuild a density matrix from the flattened parameter vector
fn params_to_matrix(params: &[f64], num_qubits: usize, dim: usize) -> Result<DensityMatrix> {
    let mut elements = Vec::with_capacity(dim * dim);
    for idx in 0..dim * dim {
        elements.push(Complex64::new(params[2 * idx], params[2 * idx + 1]));
    }
    Ok(DensityMatrix::from_elements(num_qubits, elements)?)
}

/// L-BFGS two-loop recursion for the search direction
fn lbfgs_direction(
    gradient: &[f64],
    s_history: &[Vec<f64>],
    y_history: &[Vec<f64>],
    rho_history: &[f64],
) -> Vec<f64> {
    let m = s_history.len();
    let mut q = gradient.to_vec();
    let mut alpha = vec![0.0; m];

    // First loop (backward)
    for i in (0..m).rev() {
        alpha[i] = rho_history[i]
            * s_history[i]
                .iter()
                .zip(q.iter())
                .map(|(s, q)| s * q)
                .sum::<f64>();

        for j in 0..q.len() {
            q[j] -= alpha[i] * y_history[i][j];
        }
    }

    // Scale by the approximate diagonal of H₀
    let gamma = {
        let s_last = &s_history[m - 1];
        let y_last = &y_history[m - 1];
        let sy: f64 = s_last.iter().zip(y_last.iter()).map(|(s, y)| s * y).sum();
        let yy: f64 = y_last.iter().map(|y| y * y).sum();
        if yy > 0.0 { sy / yy } else { 1.0 }
    };

    let mut r: Vec<f64> = q.iter().map(|&qi| gamma * qi).collect();

    // Second loop (forward)
    for i in 0..m {
        let beta = rho_history[i]
            * y_history[i]
                .iter()
                .zip(r.iter())
                .map(|(y, r)| y * r)
                .sum::<f64>();

        for j in 0..r.len() {
            r[j] += s_history[i][j] * (alpha[i] - beta);
        }
    }

    // Negate for minimization
    r.iter().map(|&ri| -ri).collect()
}
