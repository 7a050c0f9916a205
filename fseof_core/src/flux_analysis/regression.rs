//! Least squares trend extraction over scan traces

/// Fit `y = m*x + b` by least squares and return the slope `m`
///
/// The independent and dependent sequences are passed explicitly, there is no
/// shared state between fits, so per reaction fits are order insensitive.
///
/// # Numeric policy
/// - A constant dependent sequence has slope exactly `0.0`, short circuited
///   before any division so no rounding can turn it into a tiny nonzero value
/// - A zero variance independent sequence (a degenerate enforced flux range)
///   also yields `0.0` rather than dividing by zero
/// - Non finite values or mismatched lengths yield `None`, a reaction level
///   missing value that the caller records without aborting the run
pub fn slope(xs: &[f64], ys: &[f64]) -> Option<f64> {
    if xs.len() != ys.len() || xs.is_empty() {
        return None;
    }
    if xs.iter().chain(ys.iter()).any(|v| !v.is_finite()) {
        return None;
    }
    if ys.iter().all(|&y| y == ys[0]) {
        return Some(0.0);
    }
    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;
    let sxx: f64 = xs.iter().map(|x| (x - mean_x) * (x - mean_x)).sum();
    if sxx == 0.0 {
        return Some(0.0);
    }
    let sxy: f64 = xs
        .iter()
        .zip(ys.iter())
        .map(|(x, y)| (x - mean_x) * (y - mean_y))
        .sum();
    Some(sxy / sxx)
}
