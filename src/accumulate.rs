//! Solving a whole Littlewood family in parallel.

use std::ops::Deref;

use log::{debug, info};
use num::complex::Complex64;
use rayon::prelude::{IntoParallelIterator, ParallelIterator};

use crate::{aberth::AberthSolver, error::Result, littlewood::Littlewood};

/// The roots of every polynomial of one degree, in no particular order.
#[derive(Clone, Debug, Default)]
pub struct RootSet {
    roots: Vec<Complex64>,
}

impl RootSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_vec(self) -> Vec<Complex64> {
        self.roots
    }

    fn merge(mut self, other: RootSet) -> Self {
        self.roots.extend(other.roots);
        self
    }
}

impl Deref for RootSet {
    type Target = [Complex64];

    fn deref(&self) -> &Self::Target {
        &self.roots
    }
}

impl From<Vec<Complex64>> for RootSet {
    fn from(roots: Vec<Complex64>) -> Self {
        Self { roots }
    }
}

impl FromIterator<Complex64> for RootSet {
    fn from_iter<I: IntoIterator<Item = Complex64>>(iter: I) -> Self {
        Self {
            roots: iter.into_iter().collect(),
        }
    }
}

/// Solve all `2^(degree + 1)` Littlewood polynomials of `degree` on the
/// current rayon pool and merge their roots.
///
/// Every worker collects into its own `RootSet`; the sets are concatenated
/// once all solves have finished. The first construction error aborts the
/// whole degree.
pub fn accumulate_roots(degree: usize, solver: &AberthSolver) -> Result<RootSet> {
    let family = Littlewood::new(degree)?;

    let roots = (0..family.len())
        .into_par_iter()
        .try_fold(RootSet::new, |mut local, index| -> Result<RootSet> {
            let polynomial = family.polynomial(index)?;
            let solution = solver.solve(&polynomial);
            if !solution.converged {
                debug!("degree {degree} polynomial {index} stopped at the iteration cap");
            }
            local.roots.extend(solution.roots);
            Ok(local)
        })
        .try_reduce(RootSet::new, |a, b| Ok(a.merge(b)))?;

    info!(
        "degree {}: {} roots from {} polynomials",
        degree,
        roots.len(),
        family.len()
    );

    Ok(roots)
}
