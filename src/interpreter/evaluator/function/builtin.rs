//! Single-argument and two-argument numeric builtins.
//!
//! Every function here receives a slice whose length has already been
//! checked against the arity registered in
//! [`BuiltinFunction`](super::core::BuiltinFunction), so indexing cannot fail.

/// Generates a builtin that applies an `f64` method to its only argument.
///
/// # Example
/// ```
/// use tally::interpreter::evaluator::function::builtin::sin;
///
/// assert_eq!(sin(&[std::f64::consts::FRAC_PI_2]), 1.0);
/// ```
macro_rules! unary_builtin {
    ($($fname:ident => $method:ident),* $(,)?) => {
        $(
            #[doc = concat!("Applies `f64::", stringify!($method), "` to the argument.")]
            #[must_use]
            pub fn $fname(args: &[f64]) -> f64 {
                args[0].$method()
            }
        )*
    };
}

unary_builtin! {
    cos => cos,
    sin => sin,
    tan => tan,
    acos => acos,
    asin => asin,
    atan => atan,
    abs => abs,
}

/// Converts an angle from degrees to radians.
///
/// # Example
/// ```
/// use tally::interpreter::evaluator::function::builtin::radians;
///
/// assert_eq!(radians(&[180.0]), std::f64::consts::PI);
/// ```
#[must_use]
pub fn radians(args: &[f64]) -> f64 {
    args[0].to_radians()
}

/// Converts an angle from radians to degrees.
///
/// # Example
/// ```
/// use tally::interpreter::evaluator::function::builtin::degrees;
///
/// assert_eq!(degrees(&[std::f64::consts::PI]), 180.0);
/// ```
#[must_use]
pub fn degrees(args: &[f64]) -> f64 {
    args[0].to_degrees()
}

/// Four-quadrant arctangent of `args[0] / args[1]`.
///
/// The first argument is the y coordinate, the second the x coordinate.
///
/// # Example
/// ```
/// use tally::interpreter::evaluator::function::builtin::atan2;
///
/// assert_eq!(atan2(&[1.0, -1.0]), 3.0 * std::f64::consts::FRAC_PI_4);
/// ```
#[must_use]
pub fn atan2(args: &[f64]) -> f64 {
    args[0].atan2(args[1])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inverse_functions() {
        assert!((acos(&[cos(&[0.5])]) - 0.5).abs() < 1e-12);
        assert!((asin(&[sin(&[0.5])]) - 0.5).abs() < 1e-12);
        assert!((atan(&[tan(&[0.5])]) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn out_of_domain_is_nan() {
        assert!(acos(&[2.0]).is_nan());
        assert!(asin(&[-2.0]).is_nan());
    }

    #[test]
    fn abs_of_negative_zero() {
        assert_eq!(abs(&[-3.5]), 3.5);
        assert!(abs(&[-0.0]).is_sign_positive());
    }
}
