use super::model::{AggregatedBetaPoint, BetaSample};

// ---------------------------------------------------------------------------
// β aggregation
// ---------------------------------------------------------------------------

/// Mean and population standard deviation (divides by n, not n − 1) of one
/// sample. The error bars drawn for β use the same convention.
///
/// Trials are sorted and summed as offsets from the smallest one, so the
/// result does not depend on trial order and ten equal values give exactly
/// that value with zero deviation.
pub fn aggregate(sample: &BetaSample) -> AggregatedBetaPoint {
    let (mean, stddev) = mean_and_stddev(&sample.trials);
    AggregatedBetaPoint {
        m: sample.m,
        mean,
        stddev,
    }
}

/// [`aggregate`] over every sample, preserving order.
pub fn aggregate_all(samples: &[BetaSample]) -> Vec<AggregatedBetaPoint> {
    samples.iter().map(aggregate).collect()
}

fn mean_and_stddev(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (f64::NAN, f64::NAN);
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let n = sorted.len() as f64;
    let pivot = sorted[0];
    let mean = pivot + sorted.iter().map(|v| v - pivot).sum::<f64>() / n;

    let mut deviations: Vec<f64> = sorted.iter().map(|v| (v - mean).powi(2)).collect();
    deviations.sort_by(f64::total_cmp);
    let variance = deviations.iter().sum::<f64>() / n;

    (mean, variance.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::TRIALS_PER_SAMPLE;
    use approx::assert_relative_eq;

    fn sample(m: u32, trials: [f64; TRIALS_PER_SAMPLE]) -> BetaSample {
        BetaSample { m, trials }
    }

    #[test]
    fn identical_trials_have_zero_deviation() {
        for v in [1.0, 0.1, 2.0134, 1e-7, 12345.6789] {
            let p = aggregate(&sample(10, [v; TRIALS_PER_SAMPLE]));
            assert_eq!(p.m, 10);
            assert_eq!(p.mean, v);
            assert_eq!(p.stddev, 0.0);
        }
    }

    #[test]
    fn population_deviation() {
        let p = aggregate(&sample(3, [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0]));
        assert_relative_eq!(p.mean, 5.5, epsilon = 1e-12);
        // Σ(x − 5.5)² = 82.5, divided by 10
        assert_relative_eq!(p.stddev, 8.25f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn permutation_does_not_change_result() {
        let trials = [2.0134, 1.9871, 2.0402, 1.9999, 2.0001, 1.9563, 2.0788, 2.0112, 1.9405, 2.0222];
        let base = aggregate(&sample(30, trials));

        let mut reversed = trials;
        reversed.reverse();
        let mut rotated = trials;
        rotated.rotate_left(3);
        let mut swapped = trials;
        swapped.swap(0, 9);
        swapped.swap(2, 5);

        for perm in [reversed, rotated, swapped] {
            let p = aggregate(&sample(30, perm));
            assert_eq!(p, base);
        }
    }

    #[test]
    fn aggregate_all_keeps_order() {
        let samples = vec![
            sample(60, [2.0; TRIALS_PER_SAMPLE]),
            sample(3, [1.0; TRIALS_PER_SAMPLE]),
        ];
        let points = aggregate_all(&samples);
        let ms: Vec<u32> = points.iter().map(|p| p.m).collect();
        assert_eq!(ms, [60, 3]);
    }
}
