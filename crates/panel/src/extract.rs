//! Projection of a tidy panel into per-period observation sets.

use crate::error::PanelError;
use configuration::PanelColumns;
use core_types::{ObservationSet, Period};
use polars::prelude::*;
use std::collections::HashSet;

/// The observation sets extracted from one period's rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PeriodObservations {
    pub prices: ObservationSet,
    /// Present only when quantities were requested.
    pub quantities: Option<ObservationSet>,
}

/// Base and compared period observations pulled from the same panel.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelExtract {
    pub base: PeriodObservations,
    pub compared: PeriodObservations,
}

impl PanelExtract {
    pub fn quantities_0(&self) -> Option<&ObservationSet> {
        self.base.quantities.as_ref()
    }

    pub fn quantities_t(&self) -> Option<&ObservationSet> {
        self.compared.quantities.as_ref()
    }
}

/// Extracts both periods. Quantities are read only when `with_quantities` is set.
pub fn extract_pair(
    df: &DataFrame,
    base_period: &Period,
    compared_period: &Period,
    columns: &PanelColumns,
    with_quantities: bool,
) -> Result<PanelExtract, PanelError> {
    Ok(PanelExtract {
        base: extract_period_observations(df, base_period, columns, with_quantities)?,
        compared: extract_period_observations(df, compared_period, columns, with_quantities)?,
    })
}

/// Builds the observation sets for the rows of a single period.
///
/// - Every column the request needs must exist.
/// - A period without rows is an error.
/// - A product id seen twice within the period is rejected.
/// - Null prices or quantities leave the product out of that observation set.
/// - Rows with a null product id are skipped.
pub fn extract_period_observations(
    df: &DataFrame,
    period: &Period,
    columns: &PanelColumns,
    with_quantities: bool,
) -> Result<PeriodObservations, PanelError> {
    if with_quantities {
        let [prices, quantities] = period_sets(
            df,
            period,
            columns,
            [columns.price.as_str(), columns.quantity.as_str()],
        )?;
        Ok(PeriodObservations {
            prices,
            quantities: Some(quantities),
        })
    } else {
        let [prices] = period_sets(df, period, columns, [columns.price.as_str()])?;
        Ok(PeriodObservations {
            prices,
            quantities: None,
        })
    }
}

/// One observation set per entry of `value_columns`, in the same order,
/// built from the rows of `period`.
pub(crate) fn period_sets<const N: usize>(
    df: &DataFrame,
    period: &Period,
    columns: &PanelColumns,
    value_columns: [&str; N],
) -> Result<[ObservationSet; N], PanelError> {
    require_column(df, &columns.product_id)?;
    for name in value_columns {
        require_column(df, name)?;
    }
    require_column(df, &columns.time_period)?;

    let mask = period_mask(df, &columns.time_period, period)?;
    let rows_in_period = mask.iter().filter(|m| **m).count();
    if rows_in_period == 0 {
        return Err(PanelError::MissingPeriod(period.clone()));
    }

    let product_ids = df.column(&columns.product_id)?.cast(&DataType::String)?;
    let product_ids = product_ids.str()?;
    let mut values = Vec::with_capacity(N);
    for name in value_columns {
        values.push(float_column(df, name)?);
    }

    let mut sets: [ObservationSet; N] = std::array::from_fn(|_| ObservationSet::new());
    let mut seen: HashSet<&str> = HashSet::with_capacity(rows_in_period);

    for (row, _) in mask.iter().enumerate().filter(|(_, m)| **m) {
        let Some(product_id) = product_ids.get(row) else {
            tracing::warn!(row, %period, "Skipping panel row without a product id.");
            continue;
        };
        if !seen.insert(product_id) {
            return Err(PanelError::DuplicateProduct {
                product_id: product_id.to_string(),
                period: period.clone(),
            });
        }

        for (set, column) in sets.iter_mut().zip(&values) {
            if let Some(value) = column.get(row) {
                set.insert(product_id.to_string(), value);
            }
        }
    }

    tracing::debug!(
        %period,
        rows = rows_in_period,
        products = seen.len(),
        "Extracted period observations."
    );
    Ok(sets)
}

fn require_column(df: &DataFrame, name: &str) -> Result<(), PanelError> {
    if df.get_column_names().contains(&name) {
        Ok(())
    } else {
        Err(PanelError::MissingColumn(name.to_string()))
    }
}

/// Casts a value column to `Float64`. Cells that cannot be read as numbers
/// are an error rather than a silent null.
fn float_column(df: &DataFrame, name: &str) -> Result<Float64Chunked, PanelError> {
    let series = df.column(name)?.strict_cast(&DataType::Float64)?;
    Ok(series.f64()?.clone())
}

/// Marks the rows whose time period equals `period`.
///
/// Integer periods compare numerically: against a float column as `f64`, so
/// `0.5` never matches `0`, otherwise against the column cast to `Int64`.
/// Labels compare against its string form.
fn period_mask(df: &DataFrame, name: &str, period: &Period) -> Result<Vec<bool>, PanelError> {
    let series = df.column(name)?;
    let mask = match period {
        Period::Index(target) if series.dtype().is_float() => {
            let target = *target as f64;
            let cast = series.cast(&DataType::Float64)?;
            cast.f64()?.into_iter().map(|v| v == Some(target)).collect()
        }
        Period::Index(target) => {
            let cast = series.cast(&DataType::Int64)?;
            cast.i64()?.into_iter().map(|v| v == Some(*target)).collect()
        }
        Period::Label(target) => {
            let cast = series.cast(&DataType::String)?;
            cast.str()?
                .into_iter()
                .map(|v| v == Some(target.as_str()))
                .collect()
        }
    };
    Ok(mask)
}
