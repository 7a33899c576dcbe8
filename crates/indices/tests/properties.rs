use indices::{
    IndexCalculator, IndexInputs, IndexMethod, ObservationSet, fisher_index, laspeyres_index,
    paasche_index,
};
use proptest::prelude::*;

/// A basket of 1..8 products with strictly positive prices and quantities in both periods.
fn basket() -> impl Strategy<Value = Vec<(f64, f64, f64, f64)>> {
    prop::collection::vec(
        (0.5f64..500.0, 0.5f64..500.0, 0.1f64..100.0, 0.1f64..100.0),
        1..8,
    )
}

fn split(
    rows: &[(f64, f64, f64, f64)],
) -> (ObservationSet, ObservationSet, ObservationSet, ObservationSet) {
    let mut p0 = ObservationSet::new();
    let mut pt = ObservationSet::new();
    let mut q0 = ObservationSet::new();
    let mut qt = ObservationSet::new();
    for (i, (a, b, c, d)) in rows.iter().enumerate() {
        let id = format!("product_{i}");
        p0.insert(id.clone(), *a);
        pt.insert(id.clone(), *b);
        q0.insert(id.clone(), *c);
        qt.insert(id, *d);
    }
    (p0, pt, q0, qt)
}

fn relative_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}

proptest! {
    #[test]
    fn every_method_is_homogeneous_in_compared_prices(rows in basket(), k in 0.1f64..10.0) {
        let (p0, pt, q0, qt) = split(&rows);
        let scaled: ObservationSet = pt.iter().map(|(id, p)| (id.clone(), p * k)).collect();

        let calc = IndexCalculator::new();
        let base = IndexInputs::prices(&p0, &pt).with_quantities(&q0, &qt);
        let moved = IndexInputs::prices(&p0, &scaled).with_quantities(&q0, &qt);

        for method in IndexMethod::ALL {
            let before = calc.calculate(method, &base, 100.0).unwrap();
            let after = calc.calculate(method, &moved, 100.0).unwrap();
            prop_assert!(
                relative_eq(after, before * k),
                "{method}: {after} != {before} * {k}"
            );
        }
    }

    #[test]
    fn fisher_is_geometric_mean_of_laspeyres_and_paasche(rows in basket()) {
        let (p0, pt, q0, qt) = split(&rows);

        let laspeyres = laspeyres_index(&p0, &pt, &q0, 100.0).unwrap();
        let paasche = paasche_index(&p0, &pt, &qt, 100.0).unwrap();
        let fisher = fisher_index(&p0, &pt, &q0, &qt, 100.0).unwrap();

        prop_assert!(relative_eq(fisher, (laspeyres * paasche).sqrt()));
    }

    #[test]
    fn fisher_tracks_components_when_quantity_keys_differ(
        rows in basket(),
        keep in prop::collection::vec(any::<bool>(), 8),
    ) {
        let (p0, pt, q0, mut qt) = split(&rows);
        // product_0 always keeps its compared quantity so Paasche has a basket.
        qt.retain(|id, _| {
            let i: usize = id.trim_start_matches("product_").parse().unwrap();
            i == 0 || keep[i]
        });

        let laspeyres = laspeyres_index(&p0, &pt, &q0, 100.0).unwrap();
        let paasche = paasche_index(&p0, &pt, &qt, 100.0).unwrap();
        let fisher = fisher_index(&p0, &pt, &q0, &qt, 100.0).unwrap();

        prop_assert!(relative_eq(fisher, (laspeyres * paasche).sqrt()));
    }

    #[test]
    fn unchanged_basket_maps_to_normalization(rows in basket(), norm in 1.0f64..1000.0) {
        let (p0, _, q0, _) = split(&rows);
        let inputs = IndexInputs::prices(&p0, &p0).with_quantities(&q0, &q0);
        let calc = IndexCalculator::new();

        for method in IndexMethod::ALL {
            let value = calc.calculate(method, &inputs, norm).unwrap();
            prop_assert!(relative_eq(value, norm), "{method}: {value} != {norm}");
        }
    }

    #[test]
    fn uniform_relative_collapses_unweighted_methods(rows in basket(), r in 0.2f64..5.0) {
        let (p0, _, _, _) = split(&rows);
        let pt: ObservationSet = p0.iter().map(|(id, p)| (id.clone(), p * r)).collect();
        let inputs = IndexInputs::prices(&p0, &pt);
        let calc = IndexCalculator::new();

        for method in [IndexMethod::Jevons, IndexMethod::Dutot, IndexMethod::Carli, IndexMethod::Bmw] {
            let value = calc.calculate(method, &inputs, 100.0).unwrap();
            prop_assert!(relative_eq(value, r * 100.0), "{method}: {value}");
        }
    }
}

#[test]
fn jevons_and_carli_differ_when_relatives_differ() {
    let p0: ObservationSet = [("a".to_string(), 1.0), ("b".to_string(), 1.0)].into();
    let pt: ObservationSet = [("a".to_string(), 2.0), ("b".to_string(), 1.0)].into();
    let inputs = IndexInputs::prices(&p0, &pt);
    let calc = IndexCalculator::new();

    let jevons = calc.calculate(IndexMethod::Jevons, &inputs, 100.0).unwrap();
    let carli = calc.calculate(IndexMethod::Carli, &inputs, 100.0).unwrap();
    assert!((jevons - 2.0_f64.sqrt() * 100.0).abs() < 1e-9);
    assert!((carli - 150.0).abs() < 1e-9);
}
