//! Assembly of the output string.
//!
//! [`Formatter`] is the public entry point. It renders floats itself
//! (fixed, scientific, general, percent and locale presentations) so sign,
//! `#`, grouping and the `e±NN` exponent shape stay consistent across every
//! path, then joins value and uncertainty per the spec's mode, relocates
//! exponent tokens behind the bracket, applies styling and pads to width.

use measurand_stats::Samples;

use crate::{
    locale::Locale,
    magnitude::order_of_magnitude,
    round::{DigitPlan, Rounded, round_pair_with, round_with},
    spec::{Align, FormatSpec, Grouping, Mode, ParseError, Presentation, Sign},
    style::{find_exponent, stylize},
};

/// Renders measured quantities with their uncertainties.
///
/// Holds the [`Locale`] used by the `n` presentation type; everything else
/// comes from the [`FormatSpec`] passed per call.
///
/// # Examples
///
/// ```
/// use measurand_format::{FormatSpec, Formatter};
///
/// let formatter = Formatter::new();
/// let spec = FormatSpec::parse("")?;
/// assert_eq!(formatter.format(1.23456789, 0.0123456789, &spec), "1.235(12)");
///
/// let spec = FormatSpec::parse(".3S")?;
/// assert_eq!(formatter.format(1.866_754e8, 771_431.0, &spec), "186.675(771) M");
/// # Ok::<_, measurand_format::ParseError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Formatter {
    locale: Locale,
}

impl Formatter {
    /// A formatter with POSIX locale conventions.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A formatter with explicit locale conventions for the `n` type.
    #[must_use]
    pub fn with_locale(locale: Locale) -> Self {
        Self { locale }
    }

    /// The locale used by the `n` presentation type.
    #[must_use]
    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// Renders `mean` with `uncertainty` per `spec`.
    ///
    /// Never fails: non-finite and zero inputs degrade to plain renderings
    /// of whatever information is left.
    #[must_use]
    pub fn format(&self, mean: f64, uncertainty: f64, spec: &FormatSpec) -> String {
        let mut engine = Engine::new(spec, &self.locale, uncertainty);
        let assembled = engine.render(mean, uncertainty);
        engine.pad(&stylize(&assembled, spec))
    }

    /// Renders a [`Samples`] aggregate.
    ///
    /// The displayed uncertainty is the standard deviation of the mean.
    ///
    /// # Examples
    ///
    /// ```
    /// use measurand_format::{FormatSpec, Formatter};
    /// use measurand_stats::Samples;
    ///
    /// let samples = Samples::from_stats(1.23456789, 0.0123456789, 1);
    /// let spec = FormatSpec::parse(".1")?;
    /// assert_eq!(Formatter::new().format_samples(&samples, &spec), "1.23(1)");
    /// # Ok::<_, measurand_format::ParseError>(())
    /// ```
    #[must_use]
    pub fn format_samples(&self, samples: &Samples, spec: &FormatSpec) -> String {
        self.format(samples.mean(), samples.stdom(), spec)
    }

    /// Parses `spec` and renders a [`Samples`] aggregate with it.
    pub fn format_samples_spec(
        &self,
        samples: &Samples,
        spec: &str,
    ) -> Result<String, ParseError> {
        Ok(self.format_samples(samples, &FormatSpec::parse(spec)?))
    }
}

/// Per-call rendering state: the spec, the locale and the digit plan.
struct Engine<'a> {
    spec: &'a FormatSpec,
    locale: &'a Locale,
    plan: DigitPlan,
}

impl<'a> Engine<'a> {
    fn new(spec: &'a FormatSpec, locale: &'a Locale, uncertainty: f64) -> Self {
        let mut plan = DigitPlan::new(spec);
        plan.update(spec, uncertainty);
        Self { spec, locale, plan }
    }

    /// Re-derives the digit plan from the value itself.
    ///
    /// Used when the uncertainty carries no digit information but SI
    /// scaling still needs a magnitude to pick the prefix from.
    fn retune_to(&mut self, value: f64) -> Rounded {
        self.plan = DigitPlan::new(self.spec);
        self.plan.update(self.spec, value);
        round_with(value, self.spec, &self.plan, None)
    }

    fn render(&mut self, x: f64, u: f64) -> String {
        if u == 0.0 {
            // No uncertainty to show; fall back to a plain value rendering.
            let v_str = if self.spec.si {
                let rounded = self.retune_to(x);
                let value = self.value_str(rounded.value, rounded.precision, rounded.presentation);
                format!("{value}{}", rounded.suffix)
            } else {
                self.value_str(x, self.plan.precision(), self.spec.presentation)
            };
            return self.pad(&v_str);
        }
        if !(u.is_finite() && x.is_finite()) {
            return self.render_non_finite(x, u);
        }

        let (x_rounded, u_rounded) = round_pair_with(x, u, self.spec, &self.plan);
        let precision = x_rounded.precision;
        let x_str = self.value_str(x_rounded.value, precision, x_rounded.presentation);
        if self.spec.mode == Mode::PlusMinus {
            let u_str = self.uncertainty_str(u_rounded.value, precision, Presentation::Fixed, self.spec.hash);
            let joined = format!("{x_str}+/-{u_str}");
            return if x_rounded.suffix.is_empty() {
                joined
            } else {
                format!("({joined}){}", x_rounded.suffix)
            };
        }

        let u_magnitude = order_of_magnitude(u_rounded.value);
        let u_str = if precision > 0 && u_magnitude >= 0 {
            // Uncertainty straddles the decimal point; keep it verbatim.
            self.uncertainty_str(u_rounded.value, precision, u_rounded.presentation, self.spec.hash)
        } else {
            // Bracket shorthand: the digits of the uncertainty alone.
            let mut hash = self.spec.hash;
            let mut presentation = u_rounded.presentation;
            if u_magnitude < 0 {
                if hash {
                    hash = false;
                } else {
                    presentation = Presentation::Fixed;
                }
            }
            #[expect(clippy::cast_possible_wrap)]
            let scaled = (u_rounded.value * 10f64.powi(precision as i32)).round_ties_even();
            self.uncertainty_str(scaled, 0, presentation, hash)
        };
        format!("{x_str}({u_str}){}", x_rounded.suffix)
    }

    fn render_non_finite(&mut self, x: f64, u: f64) -> String {
        let mut si_suffix = String::new();
        let x_str = if self.spec.si && x.is_finite() {
            let rounded = self.retune_to(x);
            si_suffix = rounded.suffix.clone();
            self.value_str(rounded.value, rounded.precision, rounded.presentation)
        } else {
            self.value_str(x, self.plan.precision(), self.spec.presentation)
        };
        let u_str =
            self.uncertainty_str(u, self.plan.precision(), self.spec.presentation, self.spec.hash);
        let joined = match self.spec.mode {
            Mode::Bracket => format!("{x_str}({u_str}){si_suffix}"),
            Mode::PlusMinus => format!("{x_str}+/-{u_str}{si_suffix}"),
        };
        // An exponent inside the bracket applies to both halves; move it out.
        match find_exponent(&joined) {
            Some((start, end)) => {
                let token = &joined[start..end];
                let rest = format!("{}{}", &joined[..start], &joined[end..]);
                match self.spec.mode {
                    Mode::Bracket => format!("{rest}{token}"),
                    Mode::PlusMinus => format!("({rest}){token}"),
                }
            }
            None => joined,
        }
    }

    fn value_str(&self, value: f64, precision: usize, presentation: Presentation) -> String {
        format_float(
            value,
            self.spec.sign,
            self.spec.hash,
            self.spec.grouping,
            precision,
            presentation,
            self.locale,
        )
    }

    fn uncertainty_str(
        &self,
        value: f64,
        precision: usize,
        presentation: Presentation,
        hash: bool,
    ) -> String {
        // The uncertainty never carries a forced sign.
        format_float(value, None, hash, self.spec.grouping, precision, presentation, self.locale)
    }

    /// Pads `text` to the spec's width.
    fn pad(&self, text: &str) -> String {
        let width = self.spec.width.unwrap_or(0);
        let length = text.chars().count();
        if length >= width {
            return text.to_owned();
        }
        let fill = self
            .spec
            .fill
            .unwrap_or(if self.spec.zero { '0' } else { ' ' });
        let padding = fill.to_string().repeat(width - length);
        match self.spec.align.unwrap_or(Align::Left) {
            Align::Left => format!("{text}{padding}"),
            Align::Right => format!("{padding}{text}"),
            Align::Center => {
                let left = (width - length) / 2;
                let right = width - length - left;
                let fill = fill.to_string();
                format!("{}{text}{}", fill.repeat(left), fill.repeat(right))
            }
            Align::AfterSign => match text.strip_prefix(['+', '-']) {
                Some(rest) => {
                    let sign = &text[..text.len() - rest.len()];
                    format!("{sign}{padding}{rest}")
                }
                None => format!("{padding}{text}"),
            },
        }
    }
}

/// Renders one float the way the format mini-language specifies.
///
/// Presentation types without a float rendering fall back to fixed-point.
fn format_float(
    value: f64,
    sign: Option<Sign>,
    hash: bool,
    grouping: Option<Grouping>,
    precision: usize,
    presentation: Presentation,
    locale: &Locale,
) -> String {
    if !value.is_finite() {
        let token = if value.is_nan() { "nan" } else { "inf" };
        let token = if presentation.is_upper() { token.to_uppercase() } else { token.to_owned() };
        let negative = value.is_sign_negative() && !value.is_nan();
        return apply_sign(token, negative, sign);
    }
    let negative = value.is_sign_negative();
    let magnitude = value.abs();
    let body = match presentation {
        Presentation::LowerExp => exp_str(magnitude, precision, false, hash),
        Presentation::UpperExp => exp_str(magnitude, precision, true, hash),
        Presentation::General => general_str(magnitude, precision, false, hash),
        Presentation::UpperGeneral => general_str(magnitude, precision, true, hash),
        Presentation::Locale => locale_str(magnitude, precision, hash, locale),
        Presentation::Percent => {
            let mut body = fixed_str(magnitude * 100.0, precision, hash, grouping);
            body.push('%');
            body
        }
        _ => fixed_str(magnitude, precision, hash, grouping),
    };
    apply_sign(body, negative, sign)
}

fn apply_sign(body: String, negative: bool, sign: Option<Sign>) -> String {
    if negative {
        format!("-{body}")
    } else {
        match sign {
            Some(Sign::Plus) => format!("+{body}"),
            Some(Sign::Space) => format!(" {body}"),
            _ => body,
        }
    }
}

fn fixed_str(magnitude: f64, precision: usize, hash: bool, grouping: Option<Grouping>) -> String {
    let mut body = format!("{magnitude:.precision$}");
    if hash && precision == 0 {
        body.push('.');
    }
    match grouping {
        Some(grouping) => {
            let (int_part, fraction) = split_point(&body);
            format!("{}{fraction}", group_digits(int_part, grouping.separator(), &[3]))
        }
        None => body,
    }
}

fn exp_str(magnitude: f64, precision: usize, upper: bool, hash: bool) -> String {
    let body = format!("{magnitude:.precision$e}");
    let Some((mantissa, exponent)) = body.split_once('e') else {
        return body;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let mut mantissa = mantissa.to_owned();
    if hash && precision == 0 {
        mantissa.push('.');
    }
    let marker = if upper { 'E' } else { 'e' };
    format!("{mantissa}{marker}{exponent:+03}")
}

fn general_str(magnitude: f64, precision: usize, upper: bool, hash: bool) -> String {
    let digits = precision.max(1);
    let probe_precision = digits - 1;
    let probe = format!("{magnitude:.probe_precision$e}");
    let exponent: i32 = probe
        .split_once('e')
        .and_then(|(_, e)| e.parse().ok())
        .unwrap_or(0);
    #[expect(clippy::cast_possible_wrap)]
    let digits_i = digits as i32;
    if exponent >= -4 && exponent < digits_i {
        #[expect(clippy::cast_sign_loss)]
        let fixed_precision = (digits_i - 1 - exponent).max(0) as usize;
        let mut body = format!("{magnitude:.fixed_precision$}");
        if hash {
            if fixed_precision == 0 {
                body.push('.');
            }
        } else {
            body = strip_trailing_zeros(body);
        }
        body
    } else {
        let Some((mantissa, _)) = probe.split_once('e') else {
            return probe;
        };
        let mut mantissa = mantissa.to_owned();
        if hash {
            if digits == 1 {
                mantissa.push('.');
            }
        } else {
            mantissa = strip_trailing_zeros(mantissa);
        }
        let marker = if upper { 'E' } else { 'e' };
        format!("{mantissa}{marker}{exponent:+03}")
    }
}

fn locale_str(magnitude: f64, precision: usize, hash: bool, locale: &Locale) -> String {
    let body = format!("{magnitude:.precision$}");
    let (int_part, fraction) = split_point(&body);
    let grouped = if locale.thousands_sep.is_empty() || locale.grouping.is_empty() {
        int_part.to_owned()
    } else {
        group_digits(int_part, &locale.thousands_sep, &locale.grouping)
    };
    let mut out = format!("{grouped}{}", fraction.replacen('.', &locale.decimal_point, 1));
    if hash && precision == 0 {
        out.push_str(&locale.decimal_point);
    }
    out
}

/// Splits a rendered number at the decimal point; the point, when present,
/// stays with the fraction.
fn split_point(body: &str) -> (&str, &str) {
    match body.find('.') {
        Some(index) => body.split_at(index),
        None => (body, ""),
    }
}

/// Groups integer digits right to left; the last group size repeats.
fn group_digits(digits: &str, separator: &str, groups: &[usize]) -> String {
    if groups.is_empty() {
        return digits.to_owned();
    }
    let chars: Vec<char> = digits.chars().collect();
    let mut chunks: Vec<String> = Vec::new();
    let mut position = chars.len();
    let mut group_index = 0;
    while position > 0 {
        let size = groups[group_index.min(groups.len() - 1)].max(1);
        let start = position.saturating_sub(size);
        chunks.push(chars[start..position].iter().collect());
        position = start;
        group_index += 1;
    }
    chunks.reverse();
    chunks.join(separator)
}

fn strip_trailing_zeros(mut body: String) -> String {
    if body.contains('.') {
        while body.ends_with('0') {
            body.pop();
        }
        if body.ends_with('.') {
            body.pop();
        }
    }
    body
}
