/// Returns the largest argument.
///
/// Arguments are compared with `f64::max`, so a `NaN` argument is ignored
/// unless every argument is `NaN`. The caller guarantees at least one argument.
///
/// # Example
/// ```
/// use tally::interpreter::evaluator::function::min_max::max;
///
/// assert_eq!(max(&[3.0, 8.0, -1.0]), 8.0);
/// assert_eq!(max(&[2.5]), 2.5);
/// ```
#[must_use]
pub fn max(args: &[f64]) -> f64 {
    fold(args, f64::max)
}

/// Returns the smallest argument.
///
/// See [`max`] for how `NaN` is treated.
///
/// # Example
/// ```
/// use tally::interpreter::evaluator::function::min_max::min;
///
/// assert_eq!(min(&[3.0, 8.0, -1.0]), -1.0);
/// ```
#[must_use]
pub fn min(args: &[f64]) -> f64 {
    fold(args, f64::min)
}

fn fold(args: &[f64], pick: fn(f64, f64) -> f64) -> f64 {
    match args.split_first() {
        Some((first, rest)) => rest.iter().copied().fold(*first, pick),
        None => f64::NAN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nan_is_skipped() {
        assert_eq!(max(&[f64::NAN, 1.0]), 1.0);
        assert_eq!(min(&[1.0, f64::NAN]), 1.0);
        assert!(max(&[f64::NAN]).is_nan());
    }

    #[test]
    fn infinities() {
        assert_eq!(max(&[f64::NEG_INFINITY, -1e308]), -1e308);
        assert_eq!(min(&[f64::INFINITY, 1.0, f64::NEG_INFINITY]), f64::NEG_INFINITY);
    }
}
