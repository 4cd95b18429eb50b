//! Built-in laboratory datasets.

use clap::ValueEnum;

use crate::domain::SampleSet;
use crate::error::FitError;

/// Named measurement sets that ship with the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Dataset {
    /// Five points `(n, n-th prime)`.
    Primes,
    /// Seven readings taken every 5 units of x.
    Heating,
    /// ΔP against ΔT with a 0.3 y uncertainty.
    Pressure,
}

impl Dataset {
    pub const ALL: [Dataset; 3] = [Dataset::Primes, Dataset::Heating, Dataset::Pressure];

    pub fn name(self) -> &'static str {
        match self {
            Dataset::Primes => "primes",
            Dataset::Heating => "heating",
            Dataset::Pressure => "pressure",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Dataset::Primes => "x = 1..5, y = 2, 3, 5, 7, 11",
            Dataset::Heating => "x = 5..35 step 5, y = 1.58 .. 3.27",
            Dataset::Pressure => "x = 3.4 .. 3.1, y = 9 .. 6.8, y ± 0.3",
        }
    }

    pub fn samples(self) -> Result<SampleSet, FitError> {
        match self {
            Dataset::Primes => SampleSet::from_xy(&[1.0, 2.0, 3.0, 4.0, 5.0], &[2.0, 3.0, 5.0, 7.0, 11.0]),
            Dataset::Heating => SampleSet::from_xy(
                &[5.0, 10.0, 15.0, 20.0, 25.0, 30.0, 35.0],
                &[1.58, 1.95, 2.1, 2.34, 2.66, 2.98, 3.27],
            ),
            Dataset::Pressure => {
                SampleSet::from_xy(&[3.4, 3.3, 3.2, 3.1], &[9.0, 8.7, 7.9, 6.8])?.with_y_sigma(0.3)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_dataset_is_fittable() {
        for dataset in Dataset::ALL {
            let set = dataset.samples().unwrap();
            assert!(set.len() >= 3, "{}", dataset.name());
        }
        assert_eq!(Dataset::Pressure.samples().unwrap().y_sigma(), Some(0.3));
        assert_eq!(Dataset::Primes.samples().unwrap().y_sigma(), None);
    }
}
