//! Property-based tests for the quadrature rule and the adaptive driver.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::adaptive::{AdaptiveDriver, Step};
    use crate::heap::{RegionHeap, RegionQueue};
    use crate::options::QuadOptions;
    use crate::region::Region;
    use crate::rule::fixed_quadrature;

    // Polynomials up to degree 7, stored lowest coefficient first
    fn poly_deg7() -> impl Strategy<Value = Vec<f64>> {
        proptest::collection::vec(-10.0f64..10.0, 1..=8)
    }

    fn eval(coeffs: &[f64], x: f64) -> f64 {
        coeffs.iter().rev().fold(0.0, |acc, &c| acc * x + c)
    }

    #[allow(clippy::cast_precision_loss)]
    fn antiderivative(coeffs: &[f64], x: f64) -> f64 {
        coeffs
            .iter()
            .enumerate()
            .rev()
            .fold(0.0, |acc, (k, &c)| acc * x + c / (k + 1) as f64)
            * x
    }

    // Bound on |p(x)| over [a, b], used to scale rounding tolerances
    fn magnitude(coeffs: &[f64], a: f64, b: f64) -> f64 {
        let r = a.abs().max(b.abs()).max(1.0);
        coeffs.iter().map(|c| c.abs()).sum::<f64>() * r.powi(7)
    }

    fn interval() -> impl Strategy<Value = (f64, f64)> {
        (-5.0f64..5.0, 0.01f64..5.0).prop_map(|(a, w)| (a, a + w))
    }

    fn sorted_by_a<'a>(regions: impl Iterator<Item = &'a Region>) -> Vec<Region> {
        let mut v: Vec<Region> = regions.copied().collect();
        v.sort_by(|x, y| x.a.total_cmp(&y.a));
        v
    }

    proptest! {
        // Fixed rule is exact for degree <= 7

        #[test]
        fn rule_exact_on_polynomials(coeffs in poly_deg7(), (a, b) in interval()) {
            let region = fixed_quadrature(&|x: f64| eval(&coeffs, x), a, b);
            let exact = antiderivative(&coeffs, b) - antiderivative(&coeffs, a);
            let scale = magnitude(&coeffs, a, b) * (b - a);

            prop_assert!((region.integral - exact).abs() <= 1e-13 * scale);
            prop_assert!(region.error <= 1e-13 * scale);
        }

        #[test]
        fn heap_pops_non_increasing(errors in proptest::collection::vec(0.0f64..1e3, 1..64)) {
            let mut heap = RegionHeap::new();
            for &error in &errors {
                heap.push(Region { a: 0.0, b: 1.0, integral: 0.0, error });
            }

            let mut last = f64::INFINITY;
            let mut count = 0;
            while let Some(region) = heap.pop_max() {
                prop_assert!(region.error <= last);
                last = region.error;
                count += 1;
            }
            prop_assert_eq!(count, errors.len());
        }

        #[test]
        fn refinement_keeps_partition(
            freq in 1.0f64..40.0,
            (a, b) in interval(),
            max_step in 0.01f64..1.0,
            steps in 0usize..60,
        ) {
            let options = QuadOptions::new(0.0, 1e-15).with_max_step(max_step);
            let mut driver = AdaptiveDriver::new(|x: f64| (freq * x).sin() + x, a, b, &options);

            for _ in 0..steps {
                let before = driver.region_count();
                match driver.step() {
                    Step::Refined => prop_assert_eq!(driver.region_count(), before + 1),
                    Step::Done(_) => break,
                }

                let regions = sorted_by_a(driver.regions());
                prop_assert_eq!(regions[0].a, a);
                prop_assert_eq!(regions[regions.len() - 1].b, b);
                for pair in regions.windows(2) {
                    prop_assert_eq!(pair[0].b, pair[1].a);
                }
            }
        }

        #[test]
        fn converges_for_smooth_integrands(
            freq in 0.5f64..10.0,
            (a, b) in interval(),
        ) {
            let options = QuadOptions::new(1e-10, 1e-10);
            let report = AdaptiveDriver::new(|x: f64| (freq * x).cos() + 2.0, a, b, &options).run();
            let exact = ((freq * b).sin() - (freq * a).sin()) / freq + 2.0 * (b - a);

            prop_assert!(report.converged());
            prop_assert!(
                report.error <= 1e-10 || report.error <= 1e-10 * report.integral.abs() * 1.01
            );
            prop_assert!((report.integral - exact).abs() <= 1e-8 * (1.0 + exact.abs()));
        }
    }
}
