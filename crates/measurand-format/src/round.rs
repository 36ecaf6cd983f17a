//! Uncertainty-driven rounding.
//!
//! The uncertainty decides how many digits of the central value are
//! meaningful. The digit plan derives the decimal place of the least
//! significant retained digit from the uncertainty and the requested number
//! of significant digits; [`round_pair`] then rounds value and uncertainty
//! to a shared exponent so the two line up digit for digit in the output.

use crate::{
    magnitude::{order_of_magnitude, si_prefix_factor},
    spec::{FormatSpec, Presentation},
};

/// A value rounded and scaled for display.
///
/// `value` is already divided by the displayed power of ten; `suffix`
/// carries that power back as an `e±NN` token, a percent sign or an SI
/// prefix. `precision` is the number of fractional digits to render.
#[derive(Debug, Clone, PartialEq)]
pub struct Rounded {
    /// Scaled, rounded value.
    pub value: f64,
    /// Fractional digits to render.
    pub precision: usize,
    /// Presentation to render `value` with. Scientific and percent types
    /// collapse to fixed-point here because the scaling already happened.
    pub presentation: Presentation,
    /// Decimal exponent the value was scaled by.
    pub exponent: i32,
    /// Exponent token, percent sign or SI prefix, possibly empty.
    pub suffix: String,
}

/// Digit positions derived from one uncertainty.
#[derive(Debug, Clone, Copy)]
pub(crate) struct DigitPlan {
    precision: i32,
    u_exponent: i32,
    finite: bool,
}

impl DigitPlan {
    pub(crate) fn new(spec: &FormatSpec) -> Self {
        #[expect(clippy::cast_possible_wrap)]
        let precision = spec.precision as i32;
        Self { precision, u_exponent: 0, finite: true }
    }

    /// Derives the digit positions from `uncertainty`.
    ///
    /// A zero or non-finite uncertainty cannot carry digit information; the
    /// plan keeps the spec precision and flags itself degenerate.
    pub(crate) fn update(&mut self, spec: &FormatSpec, uncertainty: f64) {
        if uncertainty == 0.0 || !uncertainty.is_finite() {
            self.finite = false;
            return;
        }
        #[expect(clippy::cast_possible_wrap)]
        let digits = spec.precision as i32;
        let exponent = order_of_magnitude(uncertainty);
        self.precision = if exponent - self.precision + 1 >= 0 {
            0
        } else {
            self.precision - exponent + 1
        };
        let mut u_exponent = exponent - digits + 1;
        // Rounding may push the uncertainty into the next decade, e.g.
        // 0.098 -> 0.10 at one digit. Reclaim the digit that freed up.
        if order_of_magnitude(round_to(uncertainty, -u_exponent)) > exponent {
            u_exponent += 1;
        }
        self.u_exponent = u_exponent;
        self.finite = true;
    }

    pub(crate) fn precision(&self) -> usize {
        #[expect(clippy::cast_sign_loss)]
        let precision = self.precision.max(0) as usize;
        precision
    }
}

/// Rounds to `ndigits` decimal places with ties to even.
///
/// For non-negative `ndigits` the rounding goes through the decimal string
/// so results match what rendering with that precision would show. Negative
/// `ndigits` rounds to tens, hundreds and so on.
pub(crate) fn round_to(value: f64, ndigits: i32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    if ndigits >= 0 {
        #[expect(clippy::cast_sign_loss)]
        let precision = ndigits as usize;
        format!("{value:.precision$}").parse().unwrap_or(value)
    } else {
        let factor = 10f64.powi(-ndigits);
        (value / factor).round_ties_even() * factor
    }
}

/// Rounds a value/uncertainty pair to a shared exponent.
///
/// The digit plan comes from the uncertainty; the shared exponent comes
/// from whichever of `|x|` and `u` is larger, after pre-rounding, so a
/// value like 100(600) keeps its digits aligned. Both results carry the
/// same `exponent` and `suffix`.
///
/// # Examples
///
/// ```
/// use measurand_format::{FormatSpec, round_pair};
///
/// let spec = FormatSpec::parse("e")?;
/// let (x, u) = round_pair(1.23456789, 0.0123456789, &spec);
/// assert_eq!(x.value, 1.235);
/// assert_eq!(u.value, 0.012);
/// assert_eq!(x.exponent, u.exponent);
/// assert_eq!(x.suffix, "e+00");
/// # Ok::<_, measurand_format::ParseError>(())
/// ```
#[must_use]
pub fn round_pair(x: f64, u: f64, spec: &FormatSpec) -> (Rounded, Rounded) {
    let mut plan = DigitPlan::new(spec);
    plan.update(spec, u);
    round_pair_with(x, u, spec, &plan)
}

pub(crate) fn round_pair_with(
    x: f64,
    u: f64,
    spec: &FormatSpec,
    plan: &DigitPlan,
) -> (Rounded, Rounded) {
    let maximum = round_to(x.abs().max(u), -plan.u_exponent);
    let shared = round_with(maximum, spec, plan, None);
    let x_rounded = round_with(x, spec, plan, Some(shared.exponent));
    let u_rounded = round_with(u, spec, plan, Some(shared.exponent));
    (x_rounded, u_rounded)
}

/// Rounds a single value, deriving the digit plan from the value itself.
///
/// This serves the zero-uncertainty SI path, where the value's own
/// magnitude picks the prefix. Pass `exponent` to reuse a scale computed
/// elsewhere instead of the value's own.
#[must_use]
pub fn round_value(value: f64, spec: &FormatSpec, exponent: Option<i32>) -> Rounded {
    let mut plan = DigitPlan::new(spec);
    plan.update(spec, value);
    round_with(value, spec, &plan, exponent)
}

#[expect(clippy::cast_sign_loss)]
pub(crate) fn round_with(
    value: f64,
    spec: &FormatSpec,
    plan: &DigitPlan,
    exponent: Option<i32>,
) -> Rounded {
    if !spec.si && !(plan.finite || value.is_finite()) {
        return Rounded {
            value,
            precision: plan.precision(),
            presentation: spec.presentation,
            exponent: 0,
            suffix: String::new(),
        };
    }
    let exponent = exponent.unwrap_or_else(|| order_of_magnitude(value));
    let f_like = match spec.presentation {
        Presentation::LowerExp | Presentation::UpperExp | Presentation::Percent => false,
        Presentation::General | Presentation::UpperGeneral | Presentation::Locale => {
            exponent >= -4 && plan.u_exponent < 0
        }
        _ => true,
    };
    let (factor, digits, precision, suffix) = if f_like {
        (1.0, -plan.u_exponent, (-plan.u_exponent).max(0), String::new())
    } else if spec.presentation == Presentation::Percent {
        let digits = -plan.u_exponent - 2;
        (0.01, digits, digits.max(0), "%".to_owned())
    } else {
        let digits = (exponent - plan.u_exponent).max(0);
        let general = matches!(
            spec.presentation,
            Presentation::General | Presentation::UpperGeneral | Presentation::Locale
        );
        // General notation drops the scale factor entirely at 10^0.
        let suffix = if general && exponent == 0 {
            String::new()
        } else {
            let marker = if spec.presentation.is_upper() { 'E' } else { 'e' };
            format!("{marker}{exponent:+03}")
        };
        (10f64.powi(exponent), digits, digits, suffix)
    };
    let presentation = match spec.presentation {
        Presentation::LowerExp | Presentation::General | Presentation::Percent => {
            Presentation::Fixed
        }
        Presentation::UpperExp | Presentation::UpperGeneral => Presentation::UpperFixed,
        other => other,
    };
    if spec.si {
        let (prefix, si_factor) = si_prefix_factor(exponent);
        let shift = order_of_magnitude(si_factor);
        let precision = (precision - shift).max(0) as usize;
        let value = round_to(value * si_factor / factor, digits - shift);
        let suffix = if prefix.is_empty() { String::new() } else { format!(" {prefix}") };
        Rounded { value, precision, presentation, exponent, suffix }
    } else {
        let value = round_to(value / factor, digits);
        Rounded { value, precision: precision.max(0) as usize, presentation, exponent, suffix }
    }
}
