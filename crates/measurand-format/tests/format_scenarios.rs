//! End-to-end formatting scenarios, one block per notation family.

use measurand_format::{FormatSpec, Formatter, Locale};
use measurand_stats::Samples;

fn fmt(mean: f64, uncertainty: f64, spec: &str) -> String {
    let spec = FormatSpec::parse(spec).unwrap();
    Formatter::new().format(mean, uncertainty, &spec)
}

fn fmt_locale(mean: f64, uncertainty: f64, spec: &str, locale: Locale) -> String {
    let spec = FormatSpec::parse(spec).unwrap();
    Formatter::with_locale(locale).format(mean, uncertainty, &spec)
}

#[test]
fn bracket_fixed_point() {
    assert_eq!(fmt(1.23456789, 0.0123456789, ""), "1.235(12)");
    assert_eq!(fmt(1.23456789, 0.0123456789, ".1"), "1.23(1)");
    assert_eq!(fmt(1.23456789, 0.0123456789, ".3"), "1.2346(123)");
    assert_eq!(fmt(1.23456789, 1.23456789, ""), "1.2(1.2)");
    assert_eq!(fmt(1.23456789, 12.3456789, ""), "1(12)");
    assert_eq!(fmt(1.23456789, 123.456789, ""), "0(120)");
    assert_eq!(fmt(0.9876, 0.1234, ".1f"), "1.0(1)");
    assert_eq!(fmt(8.545, 26.02, ".1"), "10(30)");
}

#[test]
fn bracket_rounding_carries_into_next_decade() {
    // 0.09781 at one digit rounds to 0.1 and frees a digit.
    assert_eq!(fmt(89.95, 0.09781, ".1"), "90.0(1)");
    assert_eq!(fmt(58740.0, 99.67, ".1f"), "58700(100)");
    assert_eq!(fmt(123.456789, 0.951, ".1e"), "1.23(1)e+02");
}

#[test]
fn scientific_notation() {
    assert_eq!(fmt(1.23456789, 0.0123456789, "e"), "1.235(12)e+00");
    assert_eq!(fmt(1.23456789, 0.0001, ".1e"), "1.2346(1)e+00");
    assert_eq!(fmt(0.02675, 9649.0, ".6e"), "0.00003(9.64900)e+03");
    assert_eq!(fmt(0.02675, 9649.0, ".1e"), "0(1)e+04");
    assert_eq!(fmt(12345.0, 9876.0, "#e"), "1.23(99)e+04");
    assert_eq!(fmt(10.0, 10.0, "#.1E"), "1.(1.)E+01");
}

#[test]
fn general_type_switches_by_magnitude() {
    // Inside the fixed window g behaves like f.
    assert_eq!(fmt(1.23456789, 0.0123456789, "g"), "1.235(12)");
    // Outside it falls back to scientific digit planning.
    assert_eq!(fmt(123.456789, 0.951, ".1g"), "1.23(1)e+02");
    // A unit-sized uncertainty lands on 10^0, which g leaves unwritten.
    assert_eq!(fmt(1.23456789, 5.0, ".1g"), "1(5)");
    assert_eq!(fmt(1.23456789, 5.0, ".1gP"), "1+/-5");
}

#[test]
fn percent_scaling() {
    assert_eq!(fmt(0.1548175123, 0.0123456, ".3%"), "15.48(1.23)%");
    assert_eq!(fmt(0.1548175123, 0.000123456, "%"), "15.482(12)%");
}

#[test]
fn si_prefixes() {
    assert_eq!(fmt(1.866_754e8, 771_431.0, ".3S"), "186.675(771) M");
    assert_eq!(fmt(9.2863e-4, 7.023_005_661e-5, "S"), "929(70) u");
    assert_eq!(fmt(9.2863e-4, 7.023_005_661e-5, "US"), "929(70) \u{b5}");
}

#[test]
fn si_with_zero_uncertainty_scales_the_value_alone() {
    assert_eq!(fmt(1.866_754e8, 0.0, ".3S"), "187 M");
}

#[test]
fn si_with_non_finite_uncertainty() {
    assert_eq!(fmt(1.866_754e8, f64::NAN, ".3S"), "187(nan) M");
    assert_eq!(fmt(1.866_754e4, f64::NAN, "S"), "19(nan) k");
    assert_eq!(fmt(1.866_754e-6, f64::NAN, ".1US"), "2(nan) \u{b5}");
    assert_eq!(fmt(1.866_754e-6, f64::NAN, ".5PUS"), "1.8668\u{b1}nan \u{b5}");
}

#[test]
fn plus_minus_mode() {
    assert_eq!(fmt(1.23456789, 0.0123456789, "P"), "1.235+/-0.012");
    assert_eq!(fmt(1.23456789, 0.0123456789, "PU"), "1.235\u{b1}0.012");
    assert_eq!(fmt(1.543_138_4e7, 4.328_56e6, "eP"), "(1.54+/-0.43)e+07");
}

#[test]
fn unicode_style() {
    assert_eq!(fmt(18.5424, 0.94271, "eU"), "1.854(94)\u{d7}10\u{b9}");
    assert_eq!(fmt(18.5424, 0.94271, "fU"), "18.54(94)");
    assert_eq!(fmt(1.23456789, 0.123456789, ".3eU"), "1.235(123)");
    assert_eq!(
        fmt(1.23456789e100, 0.123456789e100, ".3eU"),
        "1.235(123)\u{d7}10\u{b9}\u{2070}\u{2070}"
    );
    assert_eq!(
        fmt(1.23456789e-100, 0.123456789e-100, ".3eU"),
        "1.235(123)\u{d7}10\u{207b}\u{b9}\u{2070}\u{2070}"
    );
}

#[test]
fn latex_style() {
    assert_eq!(fmt(3.14159, f64::NAN, "fL"), "3.14\\left(\\mathrm{NaN}\\right)");
    assert_eq!(fmt(f64::NEG_INFINITY, f64::INFINITY, "FL"), "-\\infty\\left(\\infty\\right)");
    assert_eq!(fmt(1.23456789, 0.123456789, ".3eL"), "1.235\\left(123\\right)");
    assert_eq!(fmt(0.1548175123, 0.0123456, ".3%L"), "15.48\\left(1.23\\right)\\%");
}

#[test]
fn hash_keeps_the_decimal_point() {
    assert_eq!(fmt(5.4, 1.2, "#.1"), "5.(1.)");
    assert_eq!(fmt(5.4, 1.2, "#"), "5.4(1.2)");
    assert_eq!(fmt(12345.0, 9876.0, "#"), "12300.(9900.)");
}

#[test]
fn grouping() {
    assert_eq!(fmt(123_456_789.0, 123_456.0, ",.6"), "123,456,789(123,456)");
    assert_eq!(fmt(123_456_789.0, 123_456.0, ","), "123,460,000(120,000)");
    assert_eq!(fmt(123_456_789.0, 123_456.0, "_.1"), "123_500_000(100_000)");
}

#[test]
fn width_and_fill() {
    assert_eq!(fmt(1.342, 0.0041, "015.1"), "1.342(4)0000000");
    assert_eq!(fmt(1.342, 0.0041, ">+024.3"), "00000000000+1.34200(410)");
    assert_eq!(fmt(1.342, 0.0041, "-^39.4f"), "------------1.342000(4100)-------------");
}

#[test]
fn non_finite_values() {
    assert_eq!(fmt(f64::INFINITY, f64::NAN, ""), "inf(nan)");
    assert_eq!(fmt(f64::NAN, f64::NAN, ""), "nan(nan)");
    assert_eq!(fmt(3.141e8, f64::INFINITY, " .1F"), " 314100000.0(INF)");
    assert_eq!(fmt(3.14159, f64::NAN, "g"), "3.1(nan)");
}

#[test]
fn non_finite_exponent_tokens_move_out_of_the_bracket() {
    assert_eq!(fmt(3.141e8, f64::INFINITY, " .1e"), " 3.1(inf)e+08");
    assert_eq!(fmt(3.141e8, f64::INFINITY, ".1eP"), "(3.1+/-inf)e+08");
    assert_eq!(fmt(3.141e8, f64::INFINITY, " .4EP"), "( 3.1410+/-INF)E+08");
    assert_eq!(fmt(f64::NAN, 3.141e8, " E"), " NAN(3)E+08");
    assert_eq!(fmt(f64::NAN, 3.141e8, "+e"), "+nan(3)e+08");
}

#[test]
fn zero_uncertainty_renders_the_value_alone() {
    assert_eq!(fmt(1.0, 0.0, ""), "1.00");
    assert_eq!(fmt(1.23456789, 0.0, ""), "1.23");
    assert_eq!(fmt(1.23456789, 0.0, "g"), "1.2");
    assert_eq!(fmt(1.23456789, 0.0, ".3e"), "1.235e+00");
    assert_eq!(fmt(0.0, 0.0, "5.2"), "0.00 ");
}

#[test]
fn locale_presentation() {
    assert_eq!(fmt_locale(1.23456789, 0.987654321, "n", Locale::de()), "1,23(99)");
    assert_eq!(fmt_locale(2345.0, 1234.0, "#.1n", Locale::de()), "2,(1,)e+03");
    assert_eq!(fmt_locale(12345.0, 9876.0, " #n", Locale::de()), " 1,23(99)e+04");
    assert_eq!(
        fmt_locale(1_234_567.8987, 0.987654321, ".4n", Locale::de_ch()),
        "1\u{2019}234\u{2019}567.8987(9877)"
    );
    assert_eq!(
        fmt_locale(12345.6789, 9876.54321, "+.8n", Locale::en()),
        "+12,345.6789(9,876.5432)"
    );
    assert_eq!(
        fmt_locale(1_234_567.8987, 0.987654321, ".4n", Locale::en_in()),
        "12,34,567.8987(9877)"
    );
}

#[test]
fn samples_format_with_the_deviation_of_the_mean() {
    let samples = Samples::from_stats(10.0, 0.2, 4);
    let formatter = Formatter::new();
    assert_eq!(formatter.format_samples_spec(&samples, "").unwrap(), "10.00(10)");

    let samples = Samples::from_stats(1.23456789, 0.0123456789, 1);
    assert_eq!(formatter.format_samples_spec(&samples, ".1").unwrap(), "1.23(1)");
    assert!(formatter.format_samples_spec(&samples, "2.f").is_err());
}

#[test]
fn overloaded_samples_degrade_to_nan() {
    let samples = Samples::from_stats(1.23456789e100, 0.1e100, 1);
    let formatted = Formatter::new().format_samples_spec(&samples, "").unwrap();
    assert_eq!(formatted, "nan(nan)");
}
