//! Dense polynomials with complex coefficients.

use std::fmt;

use num::{complex::Complex64, Zero};

use crate::error::{Error, Result};

/// A polynomial `c_0 + c_1 x + ... + c_d x^d`.
///
/// `coefficients[i]` is the coefficient of `x^i`. There are always exactly
/// `degree + 1` coefficients and `c_d` is never zero.
#[derive(Clone, Debug, PartialEq)]
pub struct Polynomial {
    coefficients: Vec<Complex64>,
}

/// An annulus `lower <= |z| <= upper` containing every root.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub upper: f64,
    pub lower: f64,
}

impl Polynomial {
    pub fn new(degree: usize, coefficients: Vec<Complex64>) -> Result<Self> {
        if coefficients.len() != degree + 1 {
            return Err(Error::CoefficientCount {
                degree,
                expected: degree + 1,
                found: coefficients.len(),
            });
        }

        if coefficients[degree].is_zero() {
            return Err(Error::ZeroLeadingCoefficient);
        }

        Ok(Self { coefficients })
    }

    pub fn degree(&self) -> usize {
        self.coefficients.len() - 1
    }

    pub fn coefficients(&self) -> &[Complex64] {
        &self.coefficients
    }

    pub fn leading_coefficient(&self) -> Complex64 {
        self.coefficients[self.degree()]
    }

    /// Horner evaluation.
    pub fn evaluate(&self, x: Complex64) -> Complex64 {
        self.coefficients
            .iter()
            .rev()
            .fold(Complex64::zero(), |acc, coefficient| acc * x + coefficient)
    }

    /// The derivative, or `None` for a constant polynomial.
    ///
    /// The leading coefficient of the result is `d * c_d`, which is non-zero
    /// whenever `c_d` is, so no revalidation is needed.
    pub fn derivative(&self) -> Option<Self> {
        if self.degree() == 0 {
            return None;
        }

        let coefficients = self
            .coefficients
            .iter()
            .enumerate()
            .skip(1)
            .map(|(power, coefficient)| coefficient * power as f64)
            .collect();

        Some(Self { coefficients })
    }

    /// Cauchy's bound: every root `z` satisfies `lower <= |z| <= upper` where
    /// `upper = 1 + max_i |c_i / c_d|`.
    pub fn bounds(&self) -> Bounds {
        let leading = self.leading_coefficient();
        let upper = 1.0
            + self
                .coefficients
                .iter()
                .map(|coefficient| (coefficient / leading).norm())
                .fold(0.0, f64::max);

        Bounds {
            upper,
            lower: 1.0 / upper,
        }
    }
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (power, coefficient) in self.coefficients.iter().enumerate().rev() {
            if coefficient.is_zero() {
                continue;
            }
            if !first {
                write!(f, " + ")?;
            }
            first = false;
            match power {
                0 => write!(f, "({coefficient})")?,
                1 => write!(f, "({coefficient})x")?,
                _ => write!(f, "({coefficient})x^{power}")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use num::complex::Complex64;

    use super::*;

    fn real(coefficients: &[f64]) -> Polynomial {
        Polynomial::new(
            coefficients.len() - 1,
            coefficients.iter().map(|&c| Complex64::new(c, 0.0)).collect(),
        )
        .unwrap()
    }

    #[test]
    fn rejects_wrong_coefficient_count() {
        let result = Polynomial::new(3, vec![Complex64::new(1.0, 0.0); 3]);
        assert!(matches!(
            result,
            Err(Error::CoefficientCount {
                degree: 3,
                expected: 4,
                found: 3
            })
        ));
    }

    #[test]
    fn rejects_zero_leading_coefficient() {
        let result = Polynomial::new(
            1,
            vec![Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0)],
        );
        assert!(matches!(result, Err(Error::ZeroLeadingCoefficient)));
    }

    #[test]
    fn evaluate_uses_index_as_power() {
        // 1 + 2x + 3x^2
        let p = real(&[1.0, 2.0, 3.0]);
        assert_eq!(p.evaluate(Complex64::new(2.0, 0.0)), Complex64::new(17.0, 0.0));
        // at i: 1 + 2i - 3
        assert_eq!(p.evaluate(Complex64::i()), Complex64::new(-2.0, 2.0));
    }

    #[test]
    fn derivative_scales_by_power() {
        let p = real(&[5.0, -1.0, 1.0, -1.0, 1.0]);
        let dp = p.derivative().unwrap();
        assert_eq!(dp.degree(), p.degree() - 1);
        for i in 0..=dp.degree() {
            assert_eq!(dp.coefficients()[i], p.coefficients()[i + 1] * (i + 1) as f64);
        }
    }

    #[test]
    fn constant_has_no_derivative() {
        assert!(real(&[-1.0]).derivative().is_none());
    }

    #[test]
    fn bounds_contain_known_roots() {
        // (x - 2)(x - 0.5) = x^2 - 2.5x + 1
        let p = real(&[1.0, -2.5, 1.0]);
        let bounds = p.bounds();
        assert_abs_diff_eq!(bounds.upper, 3.5);
        assert_abs_diff_eq!(bounds.lower, 1.0 / 3.5);
        for root in [2.0, 0.5] {
            assert!(bounds.lower <= root && root <= bounds.upper);
        }

        // x^2 + 1, roots on the unit circle
        let bounds = real(&[1.0, 0.0, 1.0]).bounds();
        assert!(bounds.lower <= 1.0 && 1.0 <= bounds.upper);
    }

    #[test]
    fn bounds_normalise_by_leading_coefficient() {
        // 4x - 2, root 0.5
        let bounds = real(&[-2.0, 4.0]).bounds();
        assert_abs_diff_eq!(bounds.upper, 2.0);
        assert_abs_diff_eq!(bounds.lower, 0.5);
    }

    #[test]
    fn display_skips_zero_terms() {
        let p = real(&[-1.0, 0.0, 1.0]);
        assert_eq!(p.to_string(), "(1+0i)x^2 + (-1+0i)");
    }
}
