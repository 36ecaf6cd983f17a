//! Post-assembly styling.
//!
//! The renderer produces plain ASCII. [`stylize`] rewrites that text for
//! publication targets: Unicode swaps the `e±NN` token for `×10` with
//! superscript digits, `+/-` for `±` and the `u` prefix for `µ`; LaTeX
//! emits `\times10^{NN}`, sizes the parentheses and wraps the non-finite
//! tokens in math commands. An exponent of zero is dropped entirely in
//! both styles.

use crate::spec::{FormatSpec, Style};

/// Finds the first `e±NN` exponent token, returning its byte span.
pub(crate) fn find_exponent(text: &str) -> Option<(usize, usize)> {
    let bytes = text.as_bytes();
    for start in 0..bytes.len() {
        if matches!(bytes[start], b'e' | b'E')
            && start + 2 < bytes.len()
            && matches!(bytes[start + 1], b'+' | b'-')
            && bytes[start + 2].is_ascii_digit()
        {
            let mut end = start + 3;
            while end < bytes.len() && bytes[end].is_ascii_digit() {
                end += 1;
            }
            return Some((start, end));
        }
    }
    None
}

fn superscript(c: char) -> &'static str {
    match c {
        '+' => "\u{207A}",
        '-' => "\u{207B}",
        '0' => "\u{2070}",
        '1' => "\u{00B9}",
        '2' => "\u{00B2}",
        '3' => "\u{00B3}",
        '4' => "\u{2074}",
        '5' => "\u{2075}",
        '6' => "\u{2076}",
        '7' => "\u{2077}",
        '8' => "\u{2078}",
        '9' => "\u{2079}",
        _ => "",
    }
}

/// Applies the spec's style, if any, to assembled output.
///
/// # Examples
///
/// ```
/// use measurand_format::{FormatSpec, stylize};
///
/// let spec = FormatSpec::parse("eU")?;
/// assert_eq!(stylize("1.854(94)e+01", &spec), "1.854(94)×10¹");
///
/// let spec = FormatSpec::parse("fL")?;
/// assert_eq!(stylize("3.14(nan)", &spec), "3.14\\left(\\mathrm{NaN}\\right)");
/// # Ok::<_, measurand_format::ParseError>(())
/// ```
#[must_use]
pub fn stylize(text: &str, spec: &FormatSpec) -> String {
    let Some(style) = spec.style else {
        return text.to_owned();
    };
    let mut out = text.to_owned();
    if let Some((start, end)) = find_exponent(text) {
        let exponent: i32 = text[start + 1..end].parse().unwrap_or(0);
        let replacement = if exponent == 0 {
            // 10^0 adds nothing; the token vanishes.
            String::new()
        } else {
            match style {
                Style::Unicode => {
                    let mut token = "\u{00D7}10".to_owned();
                    for digit in exponent.to_string().chars() {
                        token.push_str(superscript(digit));
                    }
                    token
                }
                Style::Latex => format!("\\times10^{{{exponent}}}"),
            }
        };
        out.replace_range(start..end, &replacement);
    }
    let replacements: &[(&str, &str)] = match style {
        Style::Unicode => &[("+/-", "\u{00B1}"), ("u", "\u{00B5}")],
        Style::Latex => &[
            ("(", "\\left("),
            (")", "\\right)"),
            ("nan", "\\mathrm{NaN}"),
            ("NAN", "\\mathrm{NaN}"),
            ("inf", "\\infty"),
            ("INF", "\\infty"),
            ("%", "\\%"),
        ],
    };
    for (from, to) in replacements {
        out = out.replace(from, to);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(text: &str) -> FormatSpec {
        FormatSpec::parse(text).unwrap()
    }

    #[test]
    fn test_find_exponent_token() {
        assert_eq!(find_exponent("1.2e+03"), Some((3, 7)));
        assert_eq!(find_exponent("(1.2+/-0.3)E-12"), Some((11, 15)));
        assert_eq!(find_exponent("1.2e+100 k"), Some((3, 8)));
        assert_eq!(find_exponent("1.235(12)"), None);
        assert_eq!(find_exponent("1.2e3"), None);
    }

    #[test]
    fn test_unstyled_text_passes_through() {
        assert_eq!(stylize("1.235(12)e+03", &spec("e")), "1.235(12)e+03");
    }

    #[test]
    fn test_unicode_exponent() {
        assert_eq!(stylize("1.854(94)e+01", &spec("eU")), "1.854(94)\u{d7}10\u{b9}");
        assert_eq!(stylize("1.235(123)e+100", &spec("eU")), "1.235(123)\u{d7}10\u{b9}\u{2070}\u{2070}");
        assert_eq!(
            stylize("1.235(123)e-100", &spec("eU")),
            "1.235(123)\u{d7}10\u{207b}\u{b9}\u{2070}\u{2070}"
        );
    }

    #[test]
    fn test_zero_exponent_is_dropped() {
        assert_eq!(stylize("1.235(123)e+00", &spec("eU")), "1.235(123)");
        assert_eq!(stylize("1.235(123)e+00", &spec("eL")), "1.235(123)");
    }

    #[test]
    fn test_unicode_symbols() {
        assert_eq!(stylize("929(70) u", &spec("US")), "929(70) \u{b5}");
        assert_eq!(stylize("1.9+/-0.4", &spec("PU")), "1.9\u{b1}0.4");
    }

    #[test]
    fn test_latex_markup() {
        assert_eq!(
            stylize("1.235(123)e+03", &spec("eL")),
            "1.235\\left(123\\right)\\times10^{3}"
        );
        assert_eq!(stylize("15.48(1.23)%", &spec("%L")), "15.48\\left(1.23\\right)\\%");
        assert_eq!(
            stylize("-INF(INF)", &spec("FL")),
            "-\\infty\\left(\\infty\\right)"
        );
    }
}
