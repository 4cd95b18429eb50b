//! Fit many independent sample sets in parallel.

use rayon::prelude::*;

use crate::domain::{FitOptions, FitResult, SampleSet};
use crate::error::FitError;
use crate::fit::fitter::fit;

/// Fit each set independently; output order matches input order.
///
/// A failing set does not affect the others.
pub fn fit_many(sets: &[SampleSet], options: &FitOptions) -> Vec<Result<FitResult, FitError>> {
    sets.par_iter().map(|set| fit(set, options)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn preserves_order_and_isolates_failures() {
        let sets: Vec<SampleSet> = (1..=20)
            .map(|k| {
                let slope = k as f64;
                SampleSet::from_pairs(&[(0.0, 1.0), (1.0, 1.0 + slope), (2.0, 1.0 + 2.0 * slope)]).unwrap()
            })
            .chain(std::iter::once(
                SampleSet::from_pairs(&[(3.0, 1.0), (3.0, 2.0), (3.0, 3.0)]).unwrap(),
            ))
            .collect();

        let results = fit_many(&sets, &FitOptions::default());
        assert_eq!(results.len(), 21);
        for (k, result) in results.iter().take(20).enumerate() {
            let fit = result.as_ref().unwrap();
            assert_relative_eq!(fit.slope, (k + 1) as f64, epsilon = 1e-10);
        }
        assert_eq!(results[20], Err(FitError::DegenerateFit));
    }
}
