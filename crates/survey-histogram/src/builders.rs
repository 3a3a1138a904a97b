//! Binning a keyed sample and aggregating every bin

use crate::traits::BinAggregator;
use crate::types::{BinEdges, WeightedBin, WeightedHistogram};
use survey_core::{weighted_average, weighted_proportion, Error, Result, WeightedSample};
use tracing::debug;

/// Weighted share of `true` among the non-missing records of a bin
#[derive(Debug, Clone, Copy, Default)]
pub struct WeightedProportion;

impl BinAggregator<bool> for WeightedProportion {
    fn aggregate(&self, bin: &WeightedSample<bool>) -> Result<Option<f64>> {
        if bin.total_weight() <= 0.0 {
            return Ok(None);
        }
        weighted_proportion(bin).map(Some)
    }
}

/// Weighted average of the non-missing values of a bin
#[derive(Debug, Clone, Copy, Default)]
pub struct WeightedAverage;

impl BinAggregator<f64> for WeightedAverage {
    fn aggregate(&self, bin: &WeightedSample<f64>) -> Result<Option<f64>> {
        if bin.drop_missing().total_weight() <= 0.0 {
            return Ok(None);
        }
        weighted_average(bin).map(Some)
    }
}

/// Groups records by a binning key and aggregates each group
///
/// The key (e.g. systolic pressure) is separate from the aggregated value.
/// Records whose key is missing or outside the edges are left out.
#[derive(Debug, Clone, Default)]
pub struct WeightedBinner {
    edges: BinEdges,
}

impl WeightedBinner {
    /// Create a new binner over the given edges
    pub fn new(edges: BinEdges) -> Self {
        Self { edges }
    }

    pub fn edges(&self) -> &BinEdges {
        &self.edges
    }

    /// Split `sample` into one sub-sample per bin, keyed by `keys`
    ///
    /// `keys` pairs with `sample` record by record.
    pub fn group<T: Clone>(
        &self,
        keys: &[f64],
        sample: &WeightedSample<T>,
    ) -> Result<Vec<WeightedSample<T>>> {
        if keys.len() != sample.len() {
            return Err(Error::size_mismatch(
                sample.len(),
                keys.len(),
                "binning keys",
            ));
        }

        let mut groups: Vec<WeightedSample<T>> =
            (0..self.edges.len()).map(|_| WeightedSample::new()).collect();
        for (&key, record) in keys.iter().zip(sample) {
            if let Some(i) = self.edges.bin_of(key) {
                groups[i].push(record.value.clone(), record.weight);
            }
        }
        Ok(groups)
    }

    /// Bin `sample` by `keys` and reduce every bin with `aggregator`
    pub fn aggregate<T, A>(
        &self,
        keys: &[f64],
        sample: &WeightedSample<T>,
        aggregator: &A,
    ) -> Result<WeightedHistogram>
    where
        T: Clone,
        A: BinAggregator<T>,
    {
        let groups = self.group(keys, sample)?;
        let bins = groups
            .iter()
            .enumerate()
            .map(|(i, group)| {
                let (left, right) = self.edges.bounds(i);
                Ok(WeightedBin {
                    left,
                    right,
                    count: group.len(),
                    weight: group.total_weight(),
                    value: aggregator.aggregate(group)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let histogram = WeightedHistogram::new(bins);
        debug!(
            bins = histogram.len(),
            binned = histogram.total_count(),
            records = sample.len(),
            "weighted binning"
        );
        Ok(histogram)
    }

    /// Per-bin weighted proportion of an indicator
    pub fn proportions(
        &self,
        keys: &[f64],
        sample: &WeightedSample<bool>,
    ) -> Result<WeightedHistogram> {
        self.aggregate(keys, sample, &WeightedProportion)
    }

    /// Per-bin weighted average of a continuous value
    pub fn averages(&self, keys: &[f64], sample: &WeightedSample<f64>) -> Result<WeightedHistogram> {
        self.aggregate(keys, sample, &WeightedAverage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn binner() -> WeightedBinner {
        WeightedBinner::new(BinEdges::new(vec![0.0, 10.0, 20.0, 30.0]).unwrap())
    }

    #[test]
    fn test_proportions_per_bin() {
        let keys = [5.0, 10.0, 15.0, 15.0, 35.0];
        let sample = WeightedSample::from_parts(
            &[true, false, true, false, true],
            &[1.0, 3.0, 2.0, 6.0, 100.0],
        )
        .unwrap();

        let histogram = binner().proportions(&keys, &sample).unwrap();
        let values = histogram.values();
        assert_relative_eq!(values[0].unwrap(), 0.25, epsilon = 1e-12);
        assert_relative_eq!(values[1].unwrap(), 0.25, epsilon = 1e-12);
        assert_eq!(values[2], None);
        // The record keyed 35 is outside every bin
        assert_eq!(histogram.counts(), vec![2, 2, 0]);
    }

    #[test]
    fn test_averages_drop_missing_values() {
        let keys = [1.0, 2.0, 12.0, 13.0];
        let sample =
            WeightedSample::from_parts(&[4.0, f64::NAN, f64::NAN, 8.0], &[1.0, 5.0, 1.0, 3.0])
                .unwrap();

        let histogram = binner().averages(&keys, &sample).unwrap();
        assert_eq!(histogram.values(), vec![Some(4.0), Some(8.0), None]);
    }

    #[test]
    fn test_bin_with_only_missing_values() {
        let keys = [25.0];
        let sample = WeightedSample::from_parts(&[f64::NAN], &[2.0]).unwrap();
        let histogram = binner().averages(&keys, &sample).unwrap();
        assert_eq!(histogram.values(), vec![None, None, None]);
        assert_eq!(histogram.counts(), vec![0, 0, 1]);
    }

    #[test]
    fn test_key_length_mismatch() {
        let sample = WeightedSample::from_parts(&[1.0, 2.0], &[1.0, 1.0]).unwrap();
        assert!(matches!(
            binner().averages(&[1.0], &sample),
            Err(Error::DimensionMismatch { .. })
        ));
    }
}
