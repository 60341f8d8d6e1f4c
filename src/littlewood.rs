//! Littlewood polynomials: every coefficient is `-1` or `+1`.

use itertools::{structs::MultiProduct, Itertools};
use num::complex::Complex64;

use crate::{
    error::{Error, Result},
    polynomial::Polynomial,
};

/// The coefficient choices, in enumeration order.
pub const COEFFICIENTS: [Complex64; 2] = [Complex64::new(-1.0, 0.0), Complex64::new(1.0, 0.0)];

/// All `2^(degree + 1)` Littlewood polynomials of one degree.
///
/// Enumeration is a cartesian product over `degree + 1` copies of
/// [`COEFFICIENTS`] with the highest power varying fastest, i.e. binary
/// counting where bit `degree - i` of the index picks coefficient `i`.
/// [`Littlewood::iter`] can be called any number of times and always yields
/// the same sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Littlewood {
    degree: usize,
}

impl Littlewood {
    pub fn new(degree: usize) -> Result<Self> {
        // `len` must fit in a usize
        if degree + 1 >= usize::BITS as usize {
            return Err(Error::DegreeTooLarge { degree });
        }
        Ok(Self { degree })
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn len(&self) -> usize {
        1 << (self.degree + 1)
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn iter(&self) -> Iter {
        Iter {
            degree: self.degree,
            product: std::iter::repeat(COEFFICIENTS)
                .take(self.degree + 1)
                .map(IntoIterator::into_iter)
                .multi_cartesian_product(),
        }
    }

    /// The `index`th polynomial of [`Littlewood::iter`], without walking the
    /// sequence. Used to split the family across worker threads.
    pub fn polynomial(&self, index: usize) -> Result<Polynomial> {
        let len = self.len();
        if index >= len {
            return Err(Error::IndexOutOfRange { index, len });
        }
        let coefficients = (0..=self.degree)
            .map(|power| COEFFICIENTS[(index >> (self.degree - power)) & 1])
            .collect();
        Polynomial::new(self.degree, coefficients)
    }
}

impl IntoIterator for Littlewood {
    type Item = Polynomial;
    type IntoIter = Iter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct Iter {
    degree: usize,
    product: MultiProduct<std::array::IntoIter<Complex64, 2>>,
}

impl Iterator for Iter {
    type Item = Polynomial;

    fn next(&mut self) -> Option<Self::Item> {
        let coefficients = self.product.next()?;
        let polynomial = Polynomial::new(self.degree, coefficients)
            .expect("degree + 1 coefficients with a leading coefficient of +-1");
        Some(polynomial)
    }
}

/// Every Littlewood polynomial of degree `1..n`, lowest degree first.
pub fn littlewood_up_to(n: usize) -> Result<impl Iterator<Item = Polynomial>> {
    let families = (1..n).map(Littlewood::new).collect::<Result<Vec<_>>>()?;
    Ok(families.into_iter().flat_map(Littlewood::into_iter))
}

#[cfg(test)]
mod tests {
    use fnv::FnvHashSet;

    use super::*;

    fn signs(polynomial: &Polynomial) -> Vec<i8> {
        polynomial
            .coefficients()
            .iter()
            .map(|c| if c.re > 0.0 { 1 } else { -1 })
            .collect()
    }

    #[test]
    fn yields_every_sign_vector_once() {
        for degree in 0..8 {
            let family = Littlewood::new(degree).unwrap();
            let all: Vec<Polynomial> = family.iter().collect();
            assert_eq!(all.len(), 1 << (degree + 1));
            assert_eq!(all.len(), family.len());

            let distinct: FnvHashSet<Vec<i8>> = all.iter().map(signs).collect();
            assert_eq!(distinct.len(), all.len());

            for polynomial in &all {
                assert_eq!(polynomial.degree(), degree);
                for c in polynomial.coefficients() {
                    assert!(*c == COEFFICIENTS[0] || *c == COEFFICIENTS[1]);
                }
                assert_ne!(polynomial.leading_coefficient().re, 0.0);
            }
        }
    }

    #[test]
    fn enumeration_is_deterministic() {
        let family = Littlewood::new(6).unwrap();
        let first: Vec<Polynomial> = family.iter().collect();
        let second: Vec<Polynomial> = family.into_iter().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn counts_in_binary_with_highest_power_fastest() {
        let family = Littlewood::new(1).unwrap();
        let all: Vec<Vec<i8>> = family.iter().map(|p| signs(&p)).collect();
        assert_eq!(all, vec![vec![-1, -1], vec![-1, 1], vec![1, -1], vec![1, 1]]);
    }

    #[test]
    fn indexed_access_matches_iteration() {
        let family = Littlewood::new(5).unwrap();
        for (index, polynomial) in family.iter().enumerate() {
            assert_eq!(family.polynomial(index).unwrap(), polynomial);
        }
    }

    #[test]
    fn index_past_the_end_is_an_error() {
        let family = Littlewood::new(3).unwrap();
        assert!(family.polynomial(family.len() - 1).is_ok());
        assert!(matches!(
            family.polynomial(family.len()),
            Err(Error::IndexOutOfRange { index: 16, len: 16 })
        ));
        assert!(matches!(
            family.polynomial(usize::MAX),
            Err(Error::IndexOutOfRange { .. })
        ));
    }

    #[test]
    fn iteration_never_stops_early() {
        for degree in [0, 3, 9] {
            let family = Littlewood::new(degree).unwrap();
            assert_eq!(family.iter().count(), family.len());
            assert_eq!(family.iter().last(), family.polynomial(family.len() - 1).ok());
        }
    }

    #[test]
    fn degree_zero_is_two_constants() {
        let all: Vec<Polynomial> = Littlewood::new(0).unwrap().iter().collect();
        assert_eq!(all.len(), 2);
        assert!(all.iter().all(|p| p.degree() == 0));
    }

    #[test]
    fn rejects_unrepresentable_family() {
        assert!(matches!(
            Littlewood::new(usize::BITS as usize),
            Err(Error::DegreeTooLarge { .. })
        ));
    }

    #[test]
    fn up_to_skips_degree_zero() {
        let all: Vec<Polynomial> = littlewood_up_to(4).unwrap().collect();
        assert_eq!(all.len(), 4 + 8 + 16);
        assert_eq!(all[0].degree(), 1);
        assert_eq!(all.last().unwrap().degree(), 3);
    }
}
