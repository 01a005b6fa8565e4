//! Zonal statistics
//!
//! The closed set of summary statistics the indicator calculators accept,
//! with weight-aware computation. Weights are coverage fractions from the
//! engines; with every weight at 1.0 the formulas reduce to the classical
//! unweighted ones. `sd`/`var` use the unbiased sample form.

use geozonal_core::{Error, Result};

/// One weighted sample: (cell value, coverage weight)
pub type Sample = (f64, f64);

/// Available zonal statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Statistic {
    Mean,
    Median,
    Sd,
    Min,
    Max,
    Sum,
    Var,
}

impl Statistic {
    /// Every recognized statistic, in canonical order
    pub const ALL: [Statistic; 7] = [
        Statistic::Mean,
        Statistic::Median,
        Statistic::Sd,
        Statistic::Min,
        Statistic::Max,
        Statistic::Sum,
        Statistic::Var,
    ];

    /// Accepted tokens, for error messages
    pub const TOKENS: &'static str = "mean, median, sd, min, max, sum, var";

    /// The statistic's string token
    pub fn token(&self) -> &'static str {
        match self {
            Statistic::Mean => "mean",
            Statistic::Median => "median",
            Statistic::Sd => "sd",
            Statistic::Min => "min",
            Statistic::Max => "max",
            Statistic::Sum => "sum",
            Statistic::Var => "var",
        }
    }

    /// Parse a statistic token, failing fast on anything unrecognized
    pub fn parse(token: &str) -> Result<Self> {
        match token {
            "mean" => Ok(Statistic::Mean),
            "median" => Ok(Statistic::Median),
            "sd" => Ok(Statistic::Sd),
            "min" => Ok(Statistic::Min),
            "max" => Ok(Statistic::Max),
            "sum" => Ok(Statistic::Sum),
            "var" => Ok(Statistic::Var),
            _ => Err(Error::UnknownStatistic {
                token: token.to_string(),
                expected: Self::TOKENS,
            }),
        }
    }

    /// Compute the statistic over weighted samples.
    ///
    /// Samples must be NaN-free with positive weights; the engines
    /// guarantee both. An empty slice yields NaN ("no covered cells"),
    /// never an error.
    pub fn compute(&self, samples: &[Sample]) -> f64 {
        if samples.is_empty() {
            return f64::NAN;
        }

        match self {
            Statistic::Sum => samples.iter().map(|(v, w)| v * w).sum(),
            Statistic::Mean => {
                let wsum: f64 = samples.iter().map(|(_, w)| w).sum();
                samples.iter().map(|(v, w)| v * w).sum::<f64>() / wsum
            }
            Statistic::Min => samples.iter().map(|(v, _)| *v).fold(f64::INFINITY, f64::min),
            Statistic::Max => samples
                .iter()
                .map(|(v, _)| *v)
                .fold(f64::NEG_INFINITY, f64::max),
            Statistic::Var => weighted_variance(samples),
            Statistic::Sd => weighted_variance(samples).sqrt(),
            Statistic::Median => weighted_median(samples),
        }
    }
}

/// Parse a list of statistic tokens, in order, failing on the first
/// unknown token
pub fn parse_statistics<S: AsRef<str>>(tokens: &[S]) -> Result<Vec<Statistic>> {
    tokens.iter().map(|t| Statistic::parse(t.as_ref())).collect()
}

/// Unbiased weighted sample variance (reliability weights).
///
/// `sum(w (x - mean)^2) / (W - sum(w^2)/W)`; with unit weights this is the
/// classical n-1 form. A single sample has no sample variance: NaN.
fn weighted_variance(samples: &[Sample]) -> f64 {
    let wsum: f64 = samples.iter().map(|(_, w)| w).sum();
    let mean = samples.iter().map(|(v, w)| v * w).sum::<f64>() / wsum;
    let wsq: f64 = samples.iter().map(|(_, w)| w * w).sum();

    let denom = wsum - wsq / wsum;
    if denom <= 0.0 {
        return f64::NAN;
    }

    samples
        .iter()
        .map(|(v, w)| w * (v - mean) * (v - mean))
        .sum::<f64>()
        / denom
}

/// Weighted median: the value where the cumulative weight crosses half the
/// total. When it lands exactly on the boundary the two neighbors are
/// averaged, matching the classical even-count median at unit weights.
fn weighted_median(samples: &[Sample]) -> f64 {
    let mut sorted: Vec<Sample> = samples.to_vec();
    sorted.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

    let total: f64 = sorted.iter().map(|(_, w)| w).sum();
    let half = total / 2.0;
    let eps = total * 1e-12;

    let mut cum = 0.0;
    for (i, (v, w)) in sorted.iter().enumerate() {
        cum += w;
        if cum >= half - eps {
            if (cum - half).abs() <= eps && i + 1 < sorted.len() {
                return (v + sorted[i + 1].0) / 2.0;
            }
            return *v;
        }
    }
    sorted[sorted.len() - 1].0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit(values: &[f64]) -> Vec<Sample> {
        values.iter().map(|&v| (v, 1.0)).collect()
    }

    #[test]
    fn test_parse_roundtrip() {
        for stat in Statistic::ALL {
            assert_eq!(Statistic::parse(stat.token()).unwrap(), stat);
        }
    }

    #[test]
    fn test_parse_unknown_token() {
        let err = Statistic::parse("average").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("'average'"));
        assert!(msg.contains("median"));
    }

    #[test]
    fn test_parse_statistics_order() {
        let stats = parse_statistics(&["max", "mean"]).unwrap();
        assert_eq!(stats, vec![Statistic::Max, Statistic::Mean]);
    }

    #[test]
    fn test_unweighted_basics() {
        let s = unit(&[1.0, 2.0, 3.0, 4.0]);
        assert_relative_eq!(Statistic::Mean.compute(&s), 2.5);
        assert_relative_eq!(Statistic::Sum.compute(&s), 10.0);
        assert_relative_eq!(Statistic::Min.compute(&s), 1.0);
        assert_relative_eq!(Statistic::Max.compute(&s), 4.0);
        // sample variance of 1..4 is 5/3
        assert_relative_eq!(Statistic::Var.compute(&s), 5.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(
            Statistic::Sd.compute(&s),
            (5.0f64 / 3.0).sqrt(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_median_even_and_odd() {
        assert_relative_eq!(Statistic::Median.compute(&unit(&[1.0, 2.0, 3.0])), 2.0);
        assert_relative_eq!(
            Statistic::Median.compute(&unit(&[1.0, 2.0, 3.0, 10.0])),
            2.5
        );
    }

    #[test]
    fn test_weighted_mean_matches_replication() {
        // weight 2 behaves like the value appearing twice
        let weighted = [(1.0, 2.0), (4.0, 1.0)];
        let replicated = unit(&[1.0, 1.0, 4.0]);
        assert_relative_eq!(
            Statistic::Mean.compute(&weighted),
            Statistic::Mean.compute(&replicated),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_single_sample_variance_is_nan() {
        assert!(Statistic::Var.compute(&unit(&[5.0])).is_nan());
        assert!(Statistic::Sd.compute(&unit(&[5.0])).is_nan());
    }

    #[test]
    fn test_empty_samples_yield_nan() {
        for stat in Statistic::ALL {
            assert!(stat.compute(&[]).is_nan(), "{} of empty", stat.token());
        }
    }

    #[test]
    fn test_weighted_median() {
        // cumulative weights: 0.2, 1.2, 1.4 of 1.4 total; half = 0.7 falls
        // inside the second sample
        let s = [(1.0, 0.2), (5.0, 1.0), (9.0, 0.2)];
        assert_relative_eq!(Statistic::Median.compute(&s), 5.0);
    }
}
