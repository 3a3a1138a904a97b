//! Property-based tests for exposure classification

use proptest::prelude::*;
use survey_polars::{Cutoff, ExposureDefinition};

fn measurement() -> impl Strategy<Value = Option<f64>> {
    prop::option::of(40.0f64..260.0)
}

fn definition(cutoff: Cutoff, sbp: Vec<Option<f64>>, dbp: Vec<Option<f64>>) -> ExposureDefinition {
    let n = sbp.len();
    ExposureDefinition::from_vectors(cutoff, sbp, dbp, vec![None; n], vec![None; n]).unwrap()
}

proptest! {
    #[test]
    fn raising_thresholds_never_adds_exposure(
        rows in prop::collection::vec((measurement(), measurement()), 1..60),
        systolic in 100.0f64..200.0,
        diastolic in 60.0f64..120.0,
        raise in 0.0f64..40.0,
    ) {
        let (sbp, dbp): (Vec<_>, Vec<_>) = rows.into_iter().unzip();
        let low = definition(Cutoff::new(systolic, diastolic), sbp.clone(), dbp.clone()).classify();
        let high = definition(Cutoff::new(systolic + raise, diastolic + raise), sbp, dbp).classify();

        for (l, h) in low.iter().zip(&high) {
            prop_assert!(!h || *l);
        }
    }

    #[test]
    fn classification_is_stable(
        rows in prop::collection::vec((measurement(), measurement()), 0..60),
        systolic in 100.0f64..200.0,
        diastolic in 60.0f64..120.0,
    ) {
        let (sbp, dbp): (Vec<_>, Vec<_>) = rows.into_iter().unzip();
        let exposure = definition(Cutoff::new(systolic, diastolic), sbp.clone(), dbp.clone());
        let flags = exposure.classify();

        prop_assert_eq!(flags.len(), sbp.len());
        prop_assert_eq!(&flags, &exposure.classify());
        for ((flag, s), d) in flags.iter().zip(&sbp).zip(&dbp) {
            if s.is_none() && d.is_none() {
                prop_assert!(!flag);
            }
        }
    }
}
