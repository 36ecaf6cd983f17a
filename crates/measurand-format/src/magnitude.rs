//! Decimal magnitude helpers.
//!
//! Everything downstream of the rounding engine reasons in decimal digit
//! positions, so the order of magnitude must be exact: `0.001` is -3, `1e23`
//! is 23, never off by one. Naive `log10` misrounds near powers of ten, so
//! [`order_of_magnitude`] reads the exponent off the shortest round-trip
//! decimal representation instead.

/// Unit prefixes of the SI, 10^-30 (`q`) through 10^30 (`Q`) in steps of
/// three, with the empty string at 10^0.
const SI_PREFIXES: [&str; 21] = [
    "q", "r", "y", "z", "a", "f", "p", "n", "u", "m", "", "k", "M", "G", "T", "P", "E", "Z", "Y",
    "R", "Q",
];

/// Returns the decimal order of magnitude of `value`.
///
/// Defined as `floor(log10(|value|))` with the convention that zero and
/// non-finite inputs map to 0.
///
/// # Examples
///
/// ```
/// use measurand_format::magnitude::order_of_magnitude;
///
/// assert_eq!(order_of_magnitude(0.00123), -3);
/// assert_eq!(order_of_magnitude(1.0), 0);
/// assert_eq!(order_of_magnitude(-9999.0), 3);
/// assert_eq!(order_of_magnitude(1e23), 23);
/// assert_eq!(order_of_magnitude(0.0), 0);
/// ```
#[must_use]
pub fn order_of_magnitude(value: f64) -> i32 {
    if value == 0.0 || !value.is_finite() {
        return 0;
    }
    // The exponent of the shortest round-trip representation d.ddd e NN is
    // exactly the decimal order of magnitude.
    let repr = format!("{:e}", value.abs());
    match repr.split_once('e') {
        Some((_, exponent)) => exponent.parse().unwrap_or(0),
        None => 0,
    }
}

/// Returns the SI prefix for a decimal exponent together with the residual
/// factor that aligns a value to that prefix.
///
/// Exponents are bucketed in threes, so exponents 0 to 2 share the empty
/// prefix with factors 1, 10 and 100. Outside the table the nearest prefix
/// is used and the factor absorbs the rest.
///
/// # Examples
///
/// ```
/// use measurand_format::magnitude::si_prefix_factor;
///
/// assert_eq!(si_prefix_factor(0), ("", 1.0));
/// assert_eq!(si_prefix_factor(4), ("k", 10.0));
/// assert_eq!(si_prefix_factor(-6), ("u", 1.0));
/// assert_eq!(si_prefix_factor(34), ("Q", 1e4));
/// ```
#[must_use]
pub fn si_prefix_factor(exponent: i32) -> (&'static str, f64) {
    let residual = exponent.rem_euclid(3);
    let base = exponent - residual;
    if base < -30 {
        ("q", 10f64.powi(exponent + 30))
    } else if base > 30 {
        ("Q", 10f64.powi(exponent - 30))
    } else {
        #[expect(clippy::cast_sign_loss)]
        let index = ((base + 30) / 3) as usize;
        (SI_PREFIXES[index], 10f64.powi(residual))
    }
}
