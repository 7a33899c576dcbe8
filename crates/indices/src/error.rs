use core_types::IndexMethod;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum IndexError {
    #[error("No matched products found for the {method} index.")]
    EmptyIntersection { method: IndexMethod },

    #[error("Calculation error: Division by zero encountered in the {method} index ({quantity})")]
    DivisionByZero { method: IndexMethod, quantity: String },

    #[error("The {method} index evaluated to a non-finite value ({value})")]
    NonFinite { method: IndexMethod, value: f64 },

    #[error("The {method} index requires {period} period quantities")]
    MissingQuantities {
        method: IndexMethod,
        period: &'static str,
    },
}

impl IndexError {
    pub(crate) fn division_by_zero(method: IndexMethod, quantity: impl Into<String>) -> Self {
        Self::DivisionByZero {
            method,
            quantity: quantity.into(),
        }
    }
}
