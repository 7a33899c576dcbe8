//! # Panel Adapter
//!
//! Computes price indices straight from a tidy panel `DataFrame` (one row per
//! product and period). Each `*_index_from_df` function filters the rows of
//! the base and compared periods, projects them into observation sets keyed
//! by product id and hands those to the matching formula in `indices`.
//!
//! The adapter does no aggregation of its own: for the same rows,
//! `jevons_index_from_df` and `jevons_index` on the extracted sets return the
//! same value.
//!
//! Duplicate product ids within one period are rejected with
//! `PanelError::DuplicateProduct`.

pub mod error;
pub mod extract;
pub mod frame;

pub use error::PanelError;
pub use extract::{PanelExtract, PeriodObservations, extract_pair, extract_period_observations};
pub use frame::{PanelRow, panel_frame};

use configuration::PanelColumns;
use core_types::{IndexMethod, ObservationSet, Period};
use extract::period_sets;
use indices::{IndexCalculator, IndexError, IndexInputs, IndexReport};
use polars::prelude::DataFrame;

/// Computes any index method from a panel.
pub fn index_from_df(
    method: IndexMethod,
    df: &DataFrame,
    base_period: impl Into<Period>,
    compared_period: impl Into<Period>,
    columns: &PanelColumns,
    normalization: f64,
) -> Result<f64, PanelError> {
    Ok(report_from_df(method, df, base_period, compared_period, columns, normalization)?.value)
}

/// Like `index_from_df`, but returns the full `IndexReport`.
pub fn report_from_df(
    method: IndexMethod,
    df: &DataFrame,
    base_period: impl Into<Period>,
    compared_period: impl Into<Period>,
    columns: &PanelColumns,
    normalization: f64,
) -> Result<IndexReport, PanelError> {
    let (base, compared) = (base_period.into(), compared_period.into());
    tracing::debug!(%method, %base, %compared, "Computing index from panel.");

    let extract = extract_pair(df, &base, &compared, columns, method.is_weighted())?;
    let inputs = inputs_for(&extract);

    Ok(IndexCalculator::new().report(method, &inputs, normalization)?)
}

fn inputs_for(extract: &PanelExtract) -> IndexInputs<'_> {
    IndexInputs {
        prices_0: &extract.base.prices,
        prices_t: &extract.compared.prices,
        quantities_0: extract.quantities_0(),
        quantities_t: extract.quantities_t(),
    }
}

/// Computes every method the panel has columns for, extracting each period once.
///
/// Without a quantity column only the unweighted methods are attempted. A
/// failing method does not stop the others.
pub fn report_all_from_df(
    df: &DataFrame,
    base_period: impl Into<Period>,
    compared_period: impl Into<Period>,
    columns: &PanelColumns,
    normalization: f64,
) -> Result<Vec<(IndexMethod, Result<IndexReport, IndexError>)>, PanelError> {
    let (base, compared) = (base_period.into(), compared_period.into());
    let with_quantities = df
        .get_column_names()
        .contains(&columns.quantity.as_str());
    if !with_quantities {
        tracing::info!(
            column = %columns.quantity,
            "No quantity column found; computing unweighted methods only."
        );
    }

    let extract = extract_pair(df, &base, &compared, columns, with_quantities)?;
    Ok(IndexCalculator::new().report_all(&inputs_for(&extract), normalization))
}

/// Prices of both periods.
fn extract_prices(
    df: &DataFrame,
    base_period: Period,
    compared_period: Period,
    columns: &PanelColumns,
) -> Result<(ObservationSet, ObservationSet), PanelError> {
    let [prices_0] = period_sets(df, &base_period, columns, [columns.price.as_str()])?;
    let [prices_t] = period_sets(df, &compared_period, columns, [columns.price.as_str()])?;
    Ok((prices_0, prices_t))
}

/// Prices and quantities of both periods.
struct WeightedSets {
    prices_0: ObservationSet,
    prices_t: ObservationSet,
    quantities_0: ObservationSet,
    quantities_t: ObservationSet,
}

fn extract_with_quantities(
    df: &DataFrame,
    base_period: Period,
    compared_period: Period,
    columns: &PanelColumns,
) -> Result<WeightedSets, PanelError> {
    let value_columns = [columns.price.as_str(), columns.quantity.as_str()];
    let [prices_0, quantities_0] = period_sets(df, &base_period, columns, value_columns)?;
    let [prices_t, quantities_t] = period_sets(df, &compared_period, columns, value_columns)?;
    Ok(WeightedSets {
        prices_0,
        prices_t,
        quantities_0,
        quantities_t,
    })
}

// ==============================================================================
// Unweighted Methods
// ==============================================================================

/// Jevons index from a panel.
pub fn jevons_index_from_df(
    df: &DataFrame,
    base_period: impl Into<Period>,
    compared_period: impl Into<Period>,
    columns: &PanelColumns,
    normalization: f64,
) -> Result<f64, PanelError> {
    let (p0, pt) = extract_prices(df, base_period.into(), compared_period.into(), columns)?;
    Ok(indices::jevons_index(&p0, &pt, normalization)?)
}

/// Dutot index from a panel.
pub fn dutot_index_from_df(
    df: &DataFrame,
    base_period: impl Into<Period>,
    compared_period: impl Into<Period>,
    columns: &PanelColumns,
    normalization: f64,
) -> Result<f64, PanelError> {
    let (p0, pt) = extract_prices(df, base_period.into(), compared_period.into(), columns)?;
    Ok(indices::dutot_index(&p0, &pt, normalization)?)
}

/// Carli index from a panel.
pub fn carli_index_from_df(
    df: &DataFrame,
    base_period: impl Into<Period>,
    compared_period: impl Into<Period>,
    columns: &PanelColumns,
    normalization: f64,
) -> Result<f64, PanelError> {
    let (p0, pt) = extract_prices(df, base_period.into(), compared_period.into(), columns)?;
    Ok(indices::carli_index(&p0, &pt, normalization)?)
}

/// Balk-Mehrhoff-Walsh index from a panel.
pub fn bmw_index_from_df(
    df: &DataFrame,
    base_period: impl Into<Period>,
    compared_period: impl Into<Period>,
    columns: &PanelColumns,
    normalization: f64,
) -> Result<f64, PanelError> {
    let (p0, pt) = extract_prices(df, base_period.into(), compared_period.into(), columns)?;
    Ok(indices::bmw_index(&p0, &pt, normalization)?)
}

// ==============================================================================
// Weighted Methods
// ==============================================================================

/// Laspeyres index from a panel. Reads the quantity column.
pub fn laspeyres_index_from_df(
    df: &DataFrame,
    base_period: impl Into<Period>,
    compared_period: impl Into<Period>,
    columns: &PanelColumns,
    normalization: f64,
) -> Result<f64, PanelError> {
    let sets = extract_with_quantities(df, base_period.into(), compared_period.into(), columns)?;
    Ok(indices::laspeyres_index(&sets.prices_0, &sets.prices_t, &sets.quantities_0, normalization)?)
}

/// Paasche index from a panel. Reads the quantity column.
pub fn paasche_index_from_df(
    df: &DataFrame,
    base_period: impl Into<Period>,
    compared_period: impl Into<Period>,
    columns: &PanelColumns,
    normalization: f64,
) -> Result<f64, PanelError> {
    let sets = extract_with_quantities(df, base_period.into(), compared_period.into(), columns)?;
    Ok(indices::paasche_index(&sets.prices_0, &sets.prices_t, &sets.quantities_t, normalization)?)
}

/// Fisher index from a panel. Reads the quantity column.
pub fn fisher_index_from_df(
    df: &DataFrame,
    base_period: impl Into<Period>,
    compared_period: impl Into<Period>,
    columns: &PanelColumns,
    normalization: f64,
) -> Result<f64, PanelError> {
    let sets = extract_with_quantities(df, base_period.into(), compared_period.into(), columns)?;
    Ok(indices::fisher_index(
        &sets.prices_0,
        &sets.prices_t,
        &sets.quantities_0,
        &sets.quantities_t,
        normalization,
    )?)
}

/// Törnqvist index from a panel. Reads the quantity column.
pub fn tornqvist_index_from_df(
    df: &DataFrame,
    base_period: impl Into<Period>,
    compared_period: impl Into<Period>,
    columns: &PanelColumns,
    normalization: f64,
) -> Result<f64, PanelError> {
    let sets = extract_with_quantities(df, base_period.into(), compared_period.into(), columns)?;
    Ok(indices::tornqvist_index(
        &sets.prices_0,
        &sets.prices_t,
        &sets.quantities_0,
        &sets.quantities_t,
        normalization,
    )?)
}

/// Walsh index from a panel. Reads the quantity column.
pub fn walsh_index_from_df(
    df: &DataFrame,
    base_period: impl Into<Period>,
    compared_period: impl Into<Period>,
    columns: &PanelColumns,
    normalization: f64,
) -> Result<f64, PanelError> {
    let sets = extract_with_quantities(df, base_period.into(), compared_period.into(), columns)?;
    Ok(indices::walsh_index(
        &sets.prices_0,
        &sets.prices_t,
        &sets.quantities_0,
        &sets.quantities_t,
        normalization,
    )?)
}

/// Sato-Vartia index from a panel. Reads the quantity column.
pub fn sato_vartia_index_from_df(
    df: &DataFrame,
    base_period: impl Into<Period>,
    compared_period: impl Into<Period>,
    columns: &PanelColumns,
    normalization: f64,
) -> Result<f64, PanelError> {
    let sets = extract_with_quantities(df, base_period.into(), compared_period.into(), columns)?;
    Ok(indices::sato_vartia_index(
        &sets.prices_0,
        &sets.prices_t,
        &sets.quantities_0,
        &sets.quantities_t,
        normalization,
    )?)
}
