//! Weighted bilateral price indices.
//!
//! These methods weight each product's price change by quantity or
//! expenditure information. Törnqvist, Walsh and Sato-Vartia need
//! quantities for both periods and only use products present in all four
//! observation sets. Fisher also needs both, but builds its Laspeyres and
//! Paasche halves over their own baskets.

use crate::error::IndexError;
use crate::matching::{Matched, align, finish, nonzero, price_relative};
use core_types::{IndexMethod, ObservationSet};

/// Laspeyres index: prices weighted by base period quantities.
pub fn laspeyres_index(
    prices_0: &ObservationSet,
    prices_t: &ObservationSet,
    quantities_0: &ObservationSet,
    normalization: f64,
) -> Result<f64, IndexError> {
    let method = IndexMethod::Laspeyres;
    let matched = align(method, [prices_0, prices_t, quantities_0])?;

    let ratio = fixed_basket_ratio(method, matched.iter().map(|(_, [p0, pt, q0])| (*p0, *pt, *q0)))?;
    finish(method, ratio, normalization)
}

/// Paasche index: prices weighted by compared period quantities.
pub fn paasche_index(
    prices_0: &ObservationSet,
    prices_t: &ObservationSet,
    quantities_t: &ObservationSet,
    normalization: f64,
) -> Result<f64, IndexError> {
    let method = IndexMethod::Paasche;
    let matched = align(method, [prices_0, prices_t, quantities_t])?;

    let ratio = fixed_basket_ratio(method, matched.iter().map(|(_, [p0, pt, qt])| (*p0, *pt, *qt)))?;
    finish(method, ratio, normalization)
}

/// Fisher index: geometric mean of the Laspeyres and Paasche ratios.
///
/// Each ratio is taken over its own basket: Laspeyres over products with base
/// quantities, Paasche over products with compared quantities. The result is
/// therefore exactly the geometric mean of `laspeyres_index` and
/// `paasche_index`. Normalization is applied once at the end.
pub fn fisher_index(
    prices_0: &ObservationSet,
    prices_t: &ObservationSet,
    quantities_0: &ObservationSet,
    quantities_t: &ObservationSet,
    normalization: f64,
) -> Result<f64, IndexError> {
    let method = IndexMethod::Fisher;
    let base_basket = align(method, [prices_0, prices_t, quantities_0])?;
    let compared_basket = align(method, [prices_0, prices_t, quantities_t])?;

    let laspeyres = fixed_basket_ratio(
        method,
        base_basket.iter().map(|(_, [p0, pt, q0])| (*p0, *pt, *q0)),
    )?;
    let paasche = fixed_basket_ratio(
        method,
        compared_basket.iter().map(|(_, [p0, pt, qt])| (*p0, *pt, *qt)),
    )?;
    tracing::trace!(laspeyres, paasche, "Fisher components.");

    finish(method, (laspeyres * paasche).sqrt(), normalization)
}

/// Törnqvist index: weighted geometric mean of the price relatives, weighted
/// by the average of the two periods' expenditure shares.
pub fn tornqvist_index(
    prices_0: &ObservationSet,
    prices_t: &ObservationSet,
    quantities_0: &ObservationSet,
    quantities_t: &ObservationSet,
    normalization: f64,
) -> Result<f64, IndexError> {
    let method = IndexMethod::Tornqvist;
    let matched = align(method, [prices_0, prices_t, quantities_0, quantities_t])?;
    let shares = expenditure_shares(method, &matched)?;

    let mut log_index: f64 = 0.0;
    for ((product_id, [p0, pt, _, _]), (s0, st)) in matched.iter().zip(&shares) {
        let weight = (s0 + st) / 2.0;
        tracing::trace!(product_id, weight, "Törnqvist weight.");
        log_index += weight * price_relative(method, product_id, *p0, *pt)?.ln();
    }

    finish(method, log_index.exp(), normalization)
}

/// Walsh index: a fixed basket of geometric-mean quantities `sqrt(q0 * qt)`.
pub fn walsh_index(
    prices_0: &ObservationSet,
    prices_t: &ObservationSet,
    quantities_0: &ObservationSet,
    quantities_t: &ObservationSet,
    normalization: f64,
) -> Result<f64, IndexError> {
    let method = IndexMethod::Walsh;
    let matched = align(method, [prices_0, prices_t, quantities_0, quantities_t])?;

    let ratio = fixed_basket_ratio(
        method,
        matched
            .iter()
            .map(|(_, [p0, pt, q0, qt])| (*p0, *pt, (q0 * qt).sqrt())),
    )?;
    finish(method, ratio, normalization)
}

/// Sato-Vartia index: weighted geometric mean of the price relatives with
/// weights proportional to the logarithmic mean of the two expenditure shares.
pub fn sato_vartia_index(
    prices_0: &ObservationSet,
    prices_t: &ObservationSet,
    quantities_0: &ObservationSet,
    quantities_t: &ObservationSet,
    normalization: f64,
) -> Result<f64, IndexError> {
    let method = IndexMethod::SatoVartia;
    let matched = align(method, [prices_0, prices_t, quantities_0, quantities_t])?;
    let shares = expenditure_shares(method, &matched)?;

    let phi: Vec<f64> = shares
        .iter()
        .map(|(s0, st)| logarithmic_mean(*s0, *st))
        .collect();
    let phi_total = nonzero(method, phi.iter().sum(), "sum of logarithmic mean shares")?;

    let mut log_index: f64 = 0.0;
    for ((product_id, [p0, pt, _, _]), phi) in matched.iter().zip(&phi) {
        let weight = phi / phi_total;
        tracing::trace!(product_id, weight, "Sato-Vartia weight.");
        log_index += weight * price_relative(method, product_id, *p0, *pt)?.ln();
    }

    finish(method, log_index.exp(), normalization)
}

/// `sum(pt * q) / sum(p0 * q)` for a basket of `(p0, pt, q)` triples.
fn fixed_basket_ratio(
    method: IndexMethod,
    basket: impl Iterator<Item = (f64, f64, f64)>,
) -> Result<f64, IndexError> {
    let (cost_0, cost_t) = basket.fold((0.0, 0.0), |(c0, ct), (p0, pt, q)| {
        (c0 + p0 * q, ct + pt * q)
    });
    let cost_0 = nonzero(method, cost_0, "base period basket cost")?;
    Ok(cost_t / cost_0)
}

/// Per-product expenditure shares `(share_0, share_t)` over the matched basket.
fn expenditure_shares(
    method: IndexMethod,
    matched: &[Matched<'_, 4>],
) -> Result<Vec<(f64, f64)>, IndexError> {
    let (total_0, total_t) = matched
        .iter()
        .fold((0.0, 0.0), |(e0, et), (_, [p0, pt, q0, qt])| {
            (e0 + p0 * q0, et + pt * qt)
        });
    let total_0 = nonzero(method, total_0, "base period total expenditure")?;
    let total_t = nonzero(method, total_t, "compared period total expenditure")?;

    Ok(matched
        .iter()
        .map(|(_, [p0, pt, q0, qt])| (p0 * q0 / total_0, pt * qt / total_t))
        .collect())
}

/// Logarithmic mean `(b - a) / (ln b - ln a)`.
///
/// Equal shares are their own mean; a zero share gives zero.
fn logarithmic_mean(a: f64, b: f64) -> f64 {
    if a <= 0.0 || b <= 0.0 {
        return 0.0;
    }
    let log_diff = b.ln() - a.ln();
    if log_diff == 0.0 {
        return (a + b) / 2.0;
    }
    (b - a) / log_diff
}
