use crate::{
    interpreter::numeral::{MAX_BASE, MIN_BASE},
    util::num::{f64_to_i64_checked, i64_to_f64_checked},
};

/// Default bound on the denominator searched by [`Approximator`].
pub const MAX_DENOMINATOR: u32 = 10_000;

/// A fraction `numerator / denominator` with a positive denominator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rational {
    /// Signed numerator.
    pub numerator:   i64,
    /// Denominator, always at least 1.
    pub denominator: u32,
}

/// Finds low-denominator fractions close to a double.
///
/// Used to decide whether a value has a non-terminating decimal expansion,
/// and to look for a small base in which the same value terminates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Approximator {
    /// Largest denominator tried.
    pub max_denominator: u32,
}

impl Default for Approximator {
    fn default() -> Self {
        Self { max_denominator: MAX_DENOMINATOR }
    }
}

impl Approximator {
    /// Creates an approximator with the given denominator bound (at least 1).
    #[must_use]
    pub fn new(max_denominator: u32) -> Self {
        Self { max_denominator: max_denominator.max(1) }
    }

    /// Best rational approximation of `value` with a denominator up to the
    /// bound.
    ///
    /// Every denominator from 1 upwards is tried with the nearest numerator;
    /// the pair with the smallest absolute error wins, and ties go to the
    /// smaller denominator, so the result is always in lowest terms.
    ///
    /// Returns `None` for non-finite values and for numerators that cannot be
    /// represented exactly.
    ///
    /// # Example
    /// ```
    /// use textcalc::interpreter::rational::{Approximator, Rational};
    ///
    /// let third = Approximator::default().approximate(1.0 / 3.0);
    /// assert_eq!(third, Some(Rational { numerator: 1, denominator: 3 }));
    /// ```
    #[must_use]
    pub fn approximate(&self, value: f64) -> Option<Rational> {
        if !value.is_finite() {
            return None;
        }

        let mut best = (0.0, 1, f64::INFINITY);
        for denominator in 1..=self.max_denominator {
            let scale = f64::from(denominator);
            let numerator = (value * scale).round();
            let error = (value - numerator / scale).abs();
            if error < best.2 {
                best = (numerator, denominator, error);
                if error == 0.0 {
                    break;
                }
            }
        }

        let (numerator, denominator, _) = best;
        let numerator = f64_to_i64_checked(numerator, ()).ok()?;
        Some(Rational { numerator,
                        denominator })
    }

    /// Whether `value` has a non-terminating decimal expansion.
    ///
    /// Integral values never repeat. Otherwise the value repeats when the
    /// denominator of its approximation has a prime factor other than 2 or 5.
    ///
    /// # Example
    /// ```
    /// use textcalc::interpreter::rational::Approximator;
    ///
    /// let approximator = Approximator::default();
    /// assert!(!approximator.has_repeating_decimal(0.5));
    /// assert!(approximator.has_repeating_decimal(1.0 / 3.0));
    /// ```
    #[must_use]
    pub fn has_repeating_decimal(&self, value: f64) -> bool {
        if !value.is_finite() || value.fract() == 0.0 {
            return false;
        }

        self.approximate(value).is_some_and(|rational| {
                                   prime_factors(u64::from(rational.denominator)).iter()
                                                                                 .any(|p| *p != 2 && *p != 5)
                               })
    }

    /// Smallest base in `2..=16` in which `value` has a terminating expansion.
    ///
    /// A base works when every prime factor of the approximated denominator
    /// also divides the base. Integral values, and values for which no base
    /// up to 16 works, yield `None`.
    ///
    /// # Example
    /// ```
    /// use textcalc::interpreter::rational::Approximator;
    ///
    /// let approximator = Approximator::default();
    /// assert_eq!(approximator.find_best_finite_base(1.0 / 3.0), Some(3));
    /// assert_eq!(approximator.find_best_finite_base(1.0 / 6.0), Some(6));
    /// assert_eq!(approximator.find_best_finite_base(4.0), None);
    /// ```
    #[must_use]
    pub fn find_best_finite_base(&self, value: f64) -> Option<u32> {
        if !value.is_finite() || value.fract() == 0.0 {
            return None;
        }

        let rational = self.approximate(value)?;
        let factors = prime_factors(u64::from(rational.denominator));
        (MIN_BASE..=MAX_BASE).find(|base| factors.iter().all(|p| u64::from(*base) % p == 0))
    }

    /// Absolute difference between `value` and its approximation.
    #[must_use]
    pub fn error(&self, value: f64) -> Option<f64> {
        let rational = self.approximate(value)?;
        let numerator = i64_to_f64_checked(rational.numerator, ()).ok()?;
        Some((value - numerator / f64::from(rational.denominator)).abs())
    }
}

/// Prime factors of `n` in non-decreasing order, with multiplicity.
///
/// Trial division up to `sqrt(n)`; whatever remains above 1 is the last
/// factor. `0` and `1` have no factors.
///
/// # Example
/// ```
/// use textcalc::interpreter::rational::prime_factors;
///
/// assert_eq!(prime_factors(360), vec![2, 2, 2, 3, 3, 5]);
/// assert_eq!(prime_factors(97), vec![97]);
/// assert!(prime_factors(1).is_empty());
/// assert_eq!(prime_factors(u64::MAX), vec![3, 5, 17, 257, 641, 65537, 6_700_417]);
/// ```
#[must_use]
pub fn prime_factors(mut n: u64) -> Vec<u64> {
    let mut factors = Vec::new();
    if n < 2 {
        return factors;
    }

    let mut divisor = 2;
    while divisor <= n / divisor {
        while n % divisor == 0 {
            factors.push(divisor);
            n /= divisor;
        }
        divisor += 1;
    }
    if n > 1 {
        factors.push(n);
    }

    factors
}
