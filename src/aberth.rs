//! Aberth-Ehrlich simultaneous root finding.

use std::f64::consts::TAU;

use log::trace;
use num::{complex::Complex64, One, Zero};

use crate::polynomial::Polynomial;

pub const DEFAULT_MAX_ITERATIONS: usize = 100_000;
pub const DEFAULT_THRESHOLD: f64 = 0.001;

/// Output of [`AberthSolver::solve`].
///
/// When `converged` is false the roots are the last iterate after
/// `max_iterations` steps. They are still returned as-is and may contain
/// non-finite values if two estimates collided.
#[derive(Clone, Debug)]
pub struct Solution {
    pub roots: Vec<Complex64>,
    pub iterations: usize,
    pub converged: bool,
}

#[derive(Clone, Copy, Debug)]
pub struct AberthSolver {
    pub max_iterations: usize,
    /// Iteration stops once every offset is smaller than this.
    pub threshold: f64,
}

impl Default for AberthSolver {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl AberthSolver {
    pub fn new(max_iterations: usize, threshold: f64) -> Self {
        Self {
            max_iterations,
            threshold,
        }
    }

    /// Find all `degree` roots of `polynomial` at once.
    ///
    /// Each step computes every offset from the previous iterate before moving
    /// any estimate:
    ///
    /// ```text
    /// N_k = P(z_k) / P'(z_k)
    /// S_k = sum_{j != k} 1 / (z_k - z_j)
    /// z_k <- z_k - N_k / (1 - N_k S_k)
    /// ```
    pub fn solve(&self, polynomial: &Polynomial) -> Solution {
        let derivative = match polynomial.derivative() {
            Some(derivative) => derivative,
            None => {
                return Solution {
                    roots: Vec::new(),
                    iterations: 0,
                    converged: true,
                }
            }
        };

        let mut roots = initial_guesses(polynomial);
        let mut offsets = vec![Complex64::zero(); roots.len()];

        for iteration in 1..=self.max_iterations {
            aberth_offsets(polynomial, &derivative, &roots, &mut offsets);

            for (root, offset) in roots.iter_mut().zip(&offsets) {
                *root -= offset;
            }

            // a NaN offset is never below the threshold
            if offsets.iter().all(|offset| offset.norm() < self.threshold) {
                return Solution {
                    roots,
                    iterations: iteration,
                    converged: true,
                };
            }
        }

        trace!(
            "no convergence after {} iterations for {}",
            self.max_iterations,
            polynomial
        );

        Solution {
            roots,
            iterations: self.max_iterations,
            converged: false,
        }
    }
}

/// Writes the Aberth offset of every estimate in `roots` into `out`.
///
/// Needs `roots.len() == out.len()`.
fn aberth_offsets(
    polynomial: &Polynomial,
    derivative: &Polynomial,
    roots: &[Complex64],
    out: &mut [Complex64],
) {
    debug_assert_eq!(roots.len(), out.len());

    for (k, (z_k, offset)) in roots.iter().zip(out.iter_mut()).enumerate() {
        let newton = polynomial.evaluate(*z_k) / derivative.evaluate(*z_k);

        let coupling: Complex64 = roots
            .iter()
            .enumerate()
            .filter(|&(j, _)| j != k)
            .map(|(_, z_j)| (z_k - z_j).inv())
            .sum();

        *offset = newton / (Complex64::one() - newton * coupling);
    }
}

/// `degree` starting points on a golden-angle spiral filling the annulus
/// given by [`Polynomial::bounds`].
///
/// Point `i` sits at radius `sqrt(t (upper^2 - lower^2) + lower^2)` with
/// `t = i / degree`, so the points are evenly spread by area, and at angle
/// `2 pi i / phi`.
pub fn initial_guesses(polynomial: &Polynomial) -> Vec<Complex64> {
    let golden_ratio = (1.0 + 5.0_f64.sqrt()) / 2.0;
    let bounds = polynomial.bounds();
    let degree = polynomial.degree();
    let (lower_sq, upper_sq) = (bounds.lower * bounds.lower, bounds.upper * bounds.upper);

    (0..degree)
        .map(|i| {
            let t = i as f64 / degree as f64;
            let radius = (t * (upper_sq - lower_sq) + lower_sq).sqrt();
            let theta = TAU * i as f64 / golden_ratio;
            Complex64::from_polar(radius, theta)
        })
        .collect()
}
