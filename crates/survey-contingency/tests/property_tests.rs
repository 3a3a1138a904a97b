//! Property-based tests for the chi-square test

use proptest::prelude::*;
use survey_contingency::chi_square_test;

proptest! {
    // Property: p-values lie in [0, 1] and statistics are non-negative
    #[test]
    fn prop_chi_square_bounds(
        table in prop::collection::vec(prop::array::uniform2(0.5f64..1e4), 2..8),
        correction in any::<bool>()
    ) {
        let test = chi_square_test(&table, correction).unwrap();
        prop_assert!(test.statistic >= 0.0);
        prop_assert!((0.0..=1.0).contains(&test.p_value));
        prop_assert_eq!(test.dof, table.len() - 1);
    }

    // Property: Yates correction never increases the statistic
    #[test]
    fn prop_yates_is_conservative(
        a in 0.5f64..1e3, b in 0.5f64..1e3, c in 0.5f64..1e3, d in 0.5f64..1e3
    ) {
        let corrected = chi_square_test(&[[a, b], [c, d]], true).unwrap();
        let plain = chi_square_test(&[[a, b], [c, d]], false).unwrap();
        prop_assert!(corrected.statistic <= plain.statistic + 1e-12);
    }

    // Property: scaling every cell by a constant scales the statistic
    #[test]
    fn prop_statistic_scales_with_counts(
        table in prop::collection::vec(prop::array::uniform2(1.0f64..100.0), 3..6),
        scale in 1.0f64..50.0
    ) {
        let scaled: Vec<[f64; 2]> = table.iter().map(|r| [r[0] * scale, r[1] * scale]).collect();
        let base = chi_square_test(&table, false).unwrap();
        let big = chi_square_test(&scaled, false).unwrap();
        prop_assert!((big.statistic - base.statistic * scale).abs() < 1e-6 * (1.0 + big.statistic));
    }
}
