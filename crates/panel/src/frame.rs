use crate::error::PanelError;
use configuration::PanelColumns;
use core_types::Period;
use polars::prelude::*;

/// One observation in a tidy (long format) panel: a product in a period.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelRow {
    pub product_id: String,
    pub price: f64,
    /// Needed only by weighted methods.
    pub quantity: Option<f64>,
    pub time_period: Period,
}

impl PanelRow {
    pub fn new(product_id: impl Into<String>, price: f64, time_period: impl Into<Period>) -> Self {
        Self {
            product_id: product_id.into(),
            price,
            quantity: None,
            time_period: time_period.into(),
        }
    }

    pub fn with_quantity(mut self, quantity: f64) -> Self {
        self.quantity = Some(quantity);
        self
    }
}

/// Builds a panel `DataFrame` from rows, naming the columns after `columns`.
///
/// The time period column is `Int64` when every period is an integer and a
/// string column otherwise. The quantity column is added only if at least one
/// row carries a quantity.
pub fn panel_frame(rows: &[PanelRow], columns: &PanelColumns) -> Result<DataFrame, PanelError> {
    let product_ids: Vec<&str> = rows.iter().map(|r| r.product_id.as_str()).collect();
    let prices: Vec<f64> = rows.iter().map(|r| r.price).collect();

    let integer_periods: Option<Vec<i64>> = rows
        .iter()
        .map(|r| match r.time_period {
            Period::Index(i) => Some(i),
            Period::Label(_) => None,
        })
        .collect();
    let periods = match integer_periods {
        Some(periods) => Series::new(&columns.time_period, periods),
        None => Series::new(
            &columns.time_period,
            rows.iter()
                .map(|r| r.time_period.to_string())
                .collect::<Vec<String>>(),
        ),
    };

    let mut series = vec![
        Series::new(&columns.product_id, product_ids),
        Series::new(&columns.price, prices),
    ];
    if rows.iter().any(|r| r.quantity.is_some()) {
        let quantities: Vec<Option<f64>> = rows.iter().map(|r| r.quantity).collect();
        series.push(Series::new(&columns.quantity, quantities));
    }
    series.push(periods);

    Ok(DataFrame::new(series)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_periods_stay_integers() {
        let rows = vec![
            PanelRow::new("a", 1.0, 0).with_quantity(2.0),
            PanelRow::new("a", 1.5, 1),
        ];
        let df = panel_frame(&rows, &PanelColumns::default()).unwrap();
        assert_eq!(df.shape(), (2, 4));
        assert_eq!(df.column("time_period").unwrap().dtype(), &DataType::Int64);
        assert_eq!(df.column("quantity").unwrap().null_count(), 1);
    }

    #[test]
    fn test_label_periods_and_custom_names() {
        let rows = vec![PanelRow::new("a", 1.0, "jan"), PanelRow::new("a", 1.2, 3)];
        let columns = PanelColumns::default()
            .with_price("unit_value")
            .with_time_period("month");
        let df = panel_frame(&rows, &columns).unwrap();
        // No quantities, so no quantity column.
        assert_eq!(df.get_column_names(), vec!["product_id", "unit_value", "month"]);
        assert_eq!(df.column("month").unwrap().dtype(), &DataType::String);
    }
}
