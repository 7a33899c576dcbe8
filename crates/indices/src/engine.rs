use crate::error::IndexError;
use crate::matching::align;
use crate::report::IndexReport;
use crate::unweighted::{bmw_index, carli_index, dutot_index, jevons_index};
use crate::weighted::{
    fisher_index, laspeyres_index, paasche_index, sato_vartia_index, tornqvist_index, walsh_index,
};
use core_types::{IndexMethod, ObservationSet};
use std::collections::BTreeSet;

/// Borrowed observation sets for one base/compared period pair.
///
/// Quantities are optional; a method that needs them fails with
/// `IndexError::MissingQuantities` when they are absent.
#[derive(Debug, Clone, Copy)]
pub struct IndexInputs<'a> {
    pub prices_0: &'a ObservationSet,
    pub prices_t: &'a ObservationSet,
    pub quantities_0: Option<&'a ObservationSet>,
    pub quantities_t: Option<&'a ObservationSet>,
}

impl<'a> IndexInputs<'a> {
    pub fn prices(prices_0: &'a ObservationSet, prices_t: &'a ObservationSet) -> Self {
        Self {
            prices_0,
            prices_t,
            quantities_0: None,
            quantities_t: None,
        }
    }

    pub fn with_quantities(
        mut self,
        quantities_0: &'a ObservationSet,
        quantities_t: &'a ObservationSet,
    ) -> Self {
        self.quantities_0 = Some(quantities_0);
        self.quantities_t = Some(quantities_t);
        self
    }

    /// Returns true if every observation set `method` needs is present.
    pub fn supports(&self, method: IndexMethod) -> bool {
        (!method.requires_base_quantities() || self.quantities_0.is_some())
            && (!method.requires_compared_quantities() || self.quantities_t.is_some())
    }

    fn base_quantities(&self, method: IndexMethod) -> Result<&'a ObservationSet, IndexError> {
        self.quantities_0.ok_or(IndexError::MissingQuantities {
            method,
            period: "base",
        })
    }

    fn compared_quantities(&self, method: IndexMethod) -> Result<&'a ObservationSet, IndexError> {
        self.quantities_t.ok_or(IndexError::MissingQuantities {
            method,
            period: "compared",
        })
    }
}

/// A stateless dispatcher from `IndexMethod` to the index formulas.
#[derive(Debug, Default)]
pub struct IndexCalculator {}

impl IndexCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes a single index.
    ///
    /// # Arguments
    ///
    /// * `method` - The index formula to apply.
    /// * `inputs` - Prices (and, for weighted methods, quantities) for both periods.
    /// * `normalization` - The value an unchanged basket maps to, usually 100.
    pub fn calculate(
        &self,
        method: IndexMethod,
        inputs: &IndexInputs<'_>,
        normalization: f64,
    ) -> Result<f64, IndexError> {
        let IndexInputs {
            prices_0, prices_t, ..
        } = *inputs;

        match method {
            IndexMethod::Jevons => jevons_index(prices_0, prices_t, normalization),
            IndexMethod::Dutot => dutot_index(prices_0, prices_t, normalization),
            IndexMethod::Carli => carli_index(prices_0, prices_t, normalization),
            IndexMethod::Bmw => bmw_index(prices_0, prices_t, normalization),
            IndexMethod::Laspeyres => laspeyres_index(
                prices_0,
                prices_t,
                inputs.base_quantities(method)?,
                normalization,
            ),
            IndexMethod::Paasche => paasche_index(
                prices_0,
                prices_t,
                inputs.compared_quantities(method)?,
                normalization,
            ),
            IndexMethod::Fisher => fisher_index(
                prices_0,
                prices_t,
                inputs.base_quantities(method)?,
                inputs.compared_quantities(method)?,
                normalization,
            ),
            IndexMethod::Tornqvist => tornqvist_index(
                prices_0,
                prices_t,
                inputs.base_quantities(method)?,
                inputs.compared_quantities(method)?,
                normalization,
            ),
            IndexMethod::Walsh => walsh_index(
                prices_0,
                prices_t,
                inputs.base_quantities(method)?,
                inputs.compared_quantities(method)?,
                normalization,
            ),
            IndexMethod::SatoVartia => sato_vartia_index(
                prices_0,
                prices_t,
                inputs.base_quantities(method)?,
                inputs.compared_quantities(method)?,
                normalization,
            ),
        }
    }

    /// Computes a single index and records how many products it was built from.
    pub fn report(
        &self,
        method: IndexMethod,
        inputs: &IndexInputs<'_>,
        normalization: f64,
    ) -> Result<IndexReport, IndexError> {
        let value = self.calculate(method, inputs, normalization)?;
        let matched_products = self.matched_products(method, inputs)?;

        Ok(IndexReport {
            method,
            value,
            matched_products,
            normalization,
        })
    }

    /// Computes every method the inputs carry enough data for, in `IndexMethod::ALL` order.
    ///
    /// A failing method does not stop the others.
    pub fn report_all(
        &self,
        inputs: &IndexInputs<'_>,
        normalization: f64,
    ) -> Vec<(IndexMethod, Result<IndexReport, IndexError>)> {
        IndexMethod::ALL
            .into_iter()
            .filter(|m| inputs.supports(*m))
            .map(|m| (m, self.report(m, inputs, normalization)))
            .collect()
    }

    /// Number of products present in every observation set `method` uses.
    ///
    /// Fisher counts every product that entered either of its two baskets.
    fn matched_products(
        &self,
        method: IndexMethod,
        inputs: &IndexInputs<'_>,
    ) -> Result<usize, IndexError> {
        let (p0, pt) = (inputs.prices_0, inputs.prices_t);
        if method == IndexMethod::Fisher {
            let base = align(method, [p0, pt, inputs.base_quantities(method)?])?;
            let compared = align(method, [p0, pt, inputs.compared_quantities(method)?])?;
            let products: BTreeSet<&str> = base
                .iter()
                .chain(compared.iter())
                .map(|(product_id, _)| *product_id)
                .collect();
            return Ok(products.len());
        }

        let count = match (
            method.requires_base_quantities(),
            method.requires_compared_quantities(),
        ) {
            (false, false) => align(method, [p0, pt])?.len(),
            (true, false) => align(method, [p0, pt, inputs.base_quantities(method)?])?.len(),
            (false, true) => align(method, [p0, pt, inputs.compared_quantities(method)?])?.len(),
            (true, true) => align(
                method,
                [
                    p0,
                    pt,
                    inputs.base_quantities(method)?,
                    inputs.compared_quantities(method)?,
                ],
            )?
            .len(),
        };
        Ok(count)
    }
}
