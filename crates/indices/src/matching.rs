//! Cross-period product alignment and the numeric guards shared by every formula.

use crate::error::IndexError;
use core_types::{IndexMethod, ObservationSet};

/// One matched product: its id and its value in each aligned observation set,
/// in the order the sets were passed.
pub type Matched<'a, const N: usize> = (&'a str, [f64; N]);

/// Aligns `N` observation sets on the products present in all of them.
///
/// Products missing from any set are dropped. The result is ordered by
/// product id. An empty intersection is an error.
pub fn align<'a, const N: usize>(
    method: IndexMethod,
    sets: [&'a ObservationSet; N],
) -> Result<Vec<Matched<'a, N>>, IndexError> {
    let Some(&first) = sets.first() else {
        return Err(IndexError::EmptyIntersection { method });
    };

    let mut matched = Vec::with_capacity(first.len());
    'products: for product_id in first.keys() {
        let mut values = [0.0; N];
        for (slot, set) in values.iter_mut().zip(sets.iter()) {
            match set.get(product_id) {
                Some(value) => *slot = *value,
                None => continue 'products,
            }
        }
        matched.push((product_id.as_str(), values));
    }

    if matched.is_empty() {
        return Err(IndexError::EmptyIntersection { method });
    }

    let largest = sets.iter().map(|s| s.len()).max().unwrap_or(0);
    if largest > matched.len() {
        tracing::debug!(
            %method,
            matched = matched.len(),
            excluded = largest - matched.len(),
            "Products missing from at least one observation set were excluded."
        );
    } else {
        tracing::debug!(%method, matched = matched.len(), "Aligned observation sets.");
    }

    Ok(matched)
}

/// Returns `value` unless it is zero, in which case it cannot be used as a denominator.
pub(crate) fn nonzero(method: IndexMethod, value: f64, what: &str) -> Result<f64, IndexError> {
    if value == 0.0 {
        return Err(IndexError::division_by_zero(method, what));
    }
    Ok(value)
}

/// The price relative `price_t / price_0` for one product.
pub(crate) fn price_relative(
    method: IndexMethod,
    product_id: &str,
    price_0: f64,
    price_t: f64,
) -> Result<f64, IndexError> {
    if price_0 == 0.0 {
        return Err(IndexError::division_by_zero(
            method,
            format!("base period price of '{product_id}'"),
        ));
    }
    Ok(price_t / price_0)
}

/// Applies the normalization and refuses to hand back NaN or infinity as an index.
pub(crate) fn finish(method: IndexMethod, ratio: f64, normalization: f64) -> Result<f64, IndexError> {
    let value = ratio * normalization;
    if !value.is_finite() {
        return Err(IndexError::NonFinite { method, value });
    }
    tracing::debug!(%method, value, "Computed index.");
    Ok(value)
}
