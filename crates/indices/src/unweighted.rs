//! Elementary (unweighted) bilateral price indices.
//!
//! Every product in the matched set carries the same importance. Each
//! function takes the base period prices, the compared period prices and the
//! value the result is normalized to.

use crate::error::IndexError;
use crate::matching::{align, finish, nonzero, price_relative};
use core_types::{IndexMethod, ObservationSet};

/// Jevons index: geometric mean of the price relatives.
pub fn jevons_index(
    prices_0: &ObservationSet,
    prices_t: &ObservationSet,
    normalization: f64,
) -> Result<f64, IndexError> {
    let method = IndexMethod::Jevons;
    let matched = align(method, [prices_0, prices_t])?;

    let mut log_sum: f64 = 0.0;
    for (product_id, [p0, pt]) in &matched {
        log_sum += price_relative(method, product_id, *p0, *pt)?.ln();
    }

    finish(method, (log_sum / matched.len() as f64).exp(), normalization)
}

/// Dutot index: ratio of the arithmetic mean prices.
///
/// Not invariant to the units products are priced in; a product priced per
/// kilogram dominates one priced per gram.
pub fn dutot_index(
    prices_0: &ObservationSet,
    prices_t: &ObservationSet,
    normalization: f64,
) -> Result<f64, IndexError> {
    let method = IndexMethod::Dutot;
    let matched = align(method, [prices_0, prices_t])?;

    let sum_0: f64 = matched.iter().map(|(_, [p0, _])| p0).sum();
    let sum_t: f64 = matched.iter().map(|(_, [_, pt])| pt).sum();
    let sum_0 = nonzero(method, sum_0, "sum of base period prices")?;

    // Both means share the same count, so the ratio of sums is the ratio of means.
    finish(method, sum_t / sum_0, normalization)
}

/// Carli index: arithmetic mean of the price relatives.
pub fn carli_index(
    prices_0: &ObservationSet,
    prices_t: &ObservationSet,
    normalization: f64,
) -> Result<f64, IndexError> {
    let method = IndexMethod::Carli;
    let matched = align(method, [prices_0, prices_t])?;

    finish(method, mean_relative(method, &matched)?, normalization)
}

/// Balk-Mehrhoff-Walsh index: geometric mean of the Carli ratio and the
/// harmonic mean of the price relatives.
pub fn bmw_index(
    prices_0: &ObservationSet,
    prices_t: &ObservationSet,
    normalization: f64,
) -> Result<f64, IndexError> {
    let method = IndexMethod::Bmw;
    let matched = align(method, [prices_0, prices_t])?;

    let arithmetic = mean_relative(method, &matched)?;

    let mut inverse_sum = 0.0;
    for (product_id, [p0, pt]) in &matched {
        if *pt == 0.0 {
            return Err(IndexError::division_by_zero(
                method,
                format!("compared period price of '{product_id}'"),
            ));
        }
        inverse_sum += p0 / pt;
    }
    let inverse_sum = nonzero(method, inverse_sum, "sum of inverse price relatives")?;
    let harmonic = matched.len() as f64 / inverse_sum;

    finish(method, (arithmetic * harmonic).sqrt(), normalization)
}

fn mean_relative(method: IndexMethod, matched: &[(&str, [f64; 2])]) -> Result<f64, IndexError> {
    let mut sum = 0.0;
    for (product_id, [p0, pt]) in matched {
        sum += price_relative(method, product_id, *p0, *pt)?;
    }
    Ok(sum / matched.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn set(entries: &[(&str, f64)]) -> ObservationSet {
        entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < EPS,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_uniform_increase_collapses_all_methods() {
        let p0 = set(&[("a", 100.0), ("b", 200.0)]);
        let pt = set(&[("a", 110.0), ("b", 220.0)]);

        assert_close(jevons_index(&p0, &pt, 100.0).unwrap(), 110.0);
        assert_close(dutot_index(&p0, &pt, 100.0).unwrap(), 110.0);
        assert_close(carli_index(&p0, &pt, 100.0).unwrap(), 110.0);
        assert_close(bmw_index(&p0, &pt, 100.0).unwrap(), 110.0);
    }

    #[test]
    fn test_no_price_change_returns_normalization() {
        let p = set(&[("a", 3.5), ("b", 12.0), ("c", 0.25)]);
        for f in [jevons_index, dutot_index, carli_index, bmw_index] {
            assert_eq!(f(&p, &p, 100.0).unwrap(), 100.0);
            assert_eq!(f(&p, &p, 1.0).unwrap(), 1.0);
        }
    }

    #[test]
    fn test_known_values() {
        // Relatives 2.0 and 0.5.
        let p0 = set(&[("a", 10.0), ("b", 40.0)]);
        let pt = set(&[("a", 20.0), ("b", 20.0)]);

        assert_close(jevons_index(&p0, &pt, 100.0).unwrap(), 100.0);
        assert_close(dutot_index(&p0, &pt, 100.0).unwrap(), 80.0);
        assert_close(carli_index(&p0, &pt, 100.0).unwrap(), 125.0);
        // Harmonic mean 2 / (0.5 + 2.0) = 0.8, so sqrt(1.25 * 0.8) = 1.
        assert_close(bmw_index(&p0, &pt, 100.0).unwrap(), 100.0);
    }

    #[test]
    fn test_carli_dominates_jevons_when_relatives_differ() {
        let p0 = set(&[("a", 1.0), ("b", 1.0), ("c", 1.0)]);
        let pt = set(&[("a", 1.2), ("b", 0.9), ("c", 1.5)]);

        let jevons = jevons_index(&p0, &pt, 100.0).unwrap();
        let carli = carli_index(&p0, &pt, 100.0).unwrap();
        let bmw = bmw_index(&p0, &pt, 100.0).unwrap();
        assert!(carli > jevons);
        // BMW sits between the harmonic and arithmetic means.
        assert!(bmw < carli);
    }

    #[test]
    fn test_unmatched_products_are_ignored() {
        let p0 = set(&[("a", 100.0), ("b", 200.0), ("only_base", 1.0)]);
        let pt = set(&[("a", 110.0), ("b", 220.0), ("only_compared", 1000.0)]);
        assert_close(carli_index(&p0, &pt, 100.0).unwrap(), 110.0);
        assert_close(dutot_index(&p0, &pt, 100.0).unwrap(), 110.0);
    }

    #[test]
    fn test_single_product_reduces_to_relative() {
        let p0 = set(&[("a", 4.0)]);
        let pt = set(&[("a", 5.0)]);
        for f in [jevons_index, dutot_index, carli_index, bmw_index] {
            assert_close(f(&p0, &pt, 100.0).unwrap(), 125.0);
        }
    }

    #[test]
    fn test_empty_intersection_is_an_error() {
        let p0 = set(&[("a", 1.0)]);
        let pt = set(&[("b", 1.0)]);
        assert_eq!(
            jevons_index(&p0, &pt, 100.0),
            Err(IndexError::EmptyIntersection {
                method: IndexMethod::Jevons
            })
        );
        assert!(dutot_index(&p0, &pt, 100.0).is_err());
        assert!(carli_index(&p0, &pt, 100.0).is_err());
        assert!(bmw_index(&p0, &pt, 100.0).is_err());
    }

    #[test]
    fn test_zero_prices_are_division_errors() {
        let p0 = set(&[("a", 0.0), ("b", 1.0)]);
        let pt = set(&[("a", 1.0), ("b", 1.0)]);
        assert!(matches!(
            jevons_index(&p0, &pt, 100.0),
            Err(IndexError::DivisionByZero { .. })
        ));
        assert!(matches!(
            carli_index(&p0, &pt, 100.0),
            Err(IndexError::DivisionByZero { .. })
        ));

        let all_zero = set(&[("a", 0.0), ("b", 0.0)]);
        assert!(matches!(
            dutot_index(&all_zero, &pt, 100.0),
            Err(IndexError::DivisionByZero { .. })
        ));

        // BMW also divides by compared period prices.
        let p0 = set(&[("a", 1.0)]);
        let pt = set(&[("a", 0.0)]);
        assert!(matches!(
            bmw_index(&p0, &pt, 100.0),
            Err(IndexError::DivisionByZero { .. })
        ));
    }
}
