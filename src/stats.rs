//! Descriptive statistics over plain `f64` slices.
//!
//! Callers drop missing values first. Every function returns `None` when the
//! statistic is undefined for the given sample size instead of producing NaN.
//! The reductions come from `u_numflow::stats`: sample (N−1) variance,
//! linear interpolation between order statistics, bias-corrected skewness
//! and excess kurtosis. Sample-size thresholds, the mode tie-break and the
//! zero-variance shape are settled here to match the usual dataframe
//! defaults.

use std::collections::HashMap;

use u_numflow::stats as nf;

/// Variances below this magnitude are treated as floating-point noise.
const FP_NOISE: f64 = 1e-14;

fn zero_out_noise(v: f64) -> f64 {
    if v.abs() < FP_NOISE {
        0.0
    } else {
        v
    }
}

// ---------------------------------------------------------------------------
// Location
// ---------------------------------------------------------------------------

pub fn mean(xs: &[f64]) -> Option<f64> {
    if xs.is_empty() {
        return None;
    }
    nf::mean(xs)
}

pub fn min(xs: &[f64]) -> Option<f64> {
    if xs.is_empty() {
        return None;
    }
    nf::min(xs)
}

pub fn max(xs: &[f64]) -> Option<f64> {
    if xs.is_empty() {
        return None;
    }
    nf::max(xs)
}

/// Quantile `q` (0..=1), interpolating linearly between the two nearest
/// order statistics.
pub fn quantile(xs: &[f64], q: f64) -> Option<f64> {
    if xs.is_empty() || !(0.0..=1.0).contains(&q) {
        return None;
    }
    nf::quantile(xs, q)
}

pub fn median(xs: &[f64]) -> Option<f64> {
    if xs.is_empty() {
        return None;
    }
    nf::median(xs)
}

/// Most frequent value; ties go to the smallest.
pub fn mode(xs: &[f64]) -> Option<f64> {
    let mut counts: HashMap<u64, (f64, usize)> = HashMap::new();
    for &x in xs {
        // fold -0.0 into 0.0
        let x = if x == 0.0 { 0.0 } else { x };
        counts.entry(x.to_bits()).or_insert((x, 0)).1 += 1;
    }
    let top = counts.values().map(|&(_, n)| n).max()?;
    counts
        .values()
        .filter(|&&(_, n)| n == top)
        .map(|&(v, _)| v)
        .reduce(f64::min)
}

// ---------------------------------------------------------------------------
// Dispersion
// ---------------------------------------------------------------------------

/// Sample variance (N−1 denominator). Needs at least two values.
pub fn variance(xs: &[f64]) -> Option<f64> {
    if xs.len() < 2 {
        return None;
    }
    nf::variance(xs)
}

/// Sample standard deviation, the square root of [`variance`].
pub fn std_dev(xs: &[f64]) -> Option<f64> {
    if xs.len() < 2 {
        return None;
    }
    nf::std_dev(xs)
}

fn has_no_spread(xs: &[f64]) -> bool {
    variance(xs).is_some_and(|v| zero_out_noise(v) == 0.0)
}

// ---------------------------------------------------------------------------
// Shape
// ---------------------------------------------------------------------------

/// Adjusted Fisher–Pearson skewness (G1). Needs at least three values;
/// zero-variance input gives 0.
pub fn skewness(xs: &[f64]) -> Option<f64> {
    if xs.len() < 3 {
        return None;
    }
    if has_no_spread(xs) {
        return Some(0.0);
    }
    nf::skewness(xs)
}

/// Bias-corrected excess kurtosis (G2). Needs at least four values;
/// zero-variance input gives 0.
pub fn kurtosis(xs: &[f64]) -> Option<f64> {
    if xs.len() < 4 {
        return None;
    }
    if has_no_spread(xs) {
        return Some(0.0);
    }
    nf::kurtosis(xs)
}
