use core_types::Period;
use indices::IndexError;
use polars::prelude::PolarsError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PanelError {
    #[error("Panel does not contain the required column '{0}'")]
    MissingColumn(String),

    #[error("No rows found for time period {0}")]
    MissingPeriod(Period),

    #[error("Product '{product_id}' appears more than once in time period {period}")]
    DuplicateProduct { product_id: String, period: Period },

    #[error("Table error: {0}")]
    Polars(#[from] PolarsError),

    #[error(transparent)]
    Index(#[from] IndexError),
}
