//! The `measurand` command.
//!
//! Formats one measured quantity, given either raw readings or statistics
//! reduced elsewhere, and prints the result to stdout.

use anyhow::Context as _;
use clap::{Parser, ValueEnum};
use measurand_format::{FormatSpec, Formatter, Locale};
use measurand_stats::Samples;

/// Named locale presets for the `n` presentation type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LocalePreset {
    /// POSIX `C`: dot radix, no grouping.
    Posix,
    /// English: comma-separated groups of three.
    En,
    /// German: comma radix, dot-separated groups.
    De,
    /// Swiss: apostrophe-separated groups.
    Ch,
    /// Indian: a group of three, then groups of two.
    In,
}

impl LocalePreset {
    fn locale(self) -> Locale {
        match self {
            Self::Posix => Locale::posix(),
            Self::En => Locale::en(),
            Self::De => Locale::de(),
            Self::Ch => Locale::de_ch(),
            Self::In => Locale::en_in(),
        }
    }
}

/// Format a measured quantity with its uncertainty.
#[derive(Debug, Clone, Parser)]
#[command(version, about)]
pub struct Args {
    /// Format specification, e.g. ".3S", "+.2eP" or ".1fU"
    #[arg(long, default_value = "")]
    spec: String,
    /// Locale used by the 'n' presentation type
    #[arg(long, value_enum, default_value = "posix")]
    locale: LocalePreset,
    /// Print the JSON summary record instead of the formatted text
    #[arg(long)]
    json: bool,
    /// Precomputed mean, instead of raw values
    #[arg(long, conflicts_with = "values")]
    mean: Option<f64>,
    /// Precomputed sample standard deviation
    #[arg(long, requires = "mean", conflicts_with = "values")]
    stdev: Option<f64>,
    /// Number of readings the precomputed statistics summarize
    #[arg(long, requires = "mean", conflicts_with = "values")]
    size: Option<u64>,
    /// Overload threshold; means beyond it are discarded as saturation
    #[arg(long)]
    overload: Option<f64>,
    /// Disable the overload check
    #[arg(long, conflicts_with = "overload")]
    no_overload: bool,
    /// Raw sample values
    values: Vec<f64>,
}

impl Args {
    fn samples(&self) -> anyhow::Result<Samples> {
        let mut builder = Samples::builder();
        if self.values.is_empty() {
            if let Some(mean) = self.mean {
                builder = builder.mean(mean);
            }
            if let Some(stdev) = self.stdev {
                builder = builder.stdev(stdev);
            }
            if let Some(size) = self.size {
                builder = builder.size(size);
            }
        } else {
            builder = builder.samples(self.values.iter().copied());
        }
        if self.no_overload {
            builder = builder.overload(None);
        } else if let Some(overload) = self.overload {
            builder = builder.overload(Some(overload));
        }
        builder.build().context("cannot assemble the sample statistics")
    }
}

pub fn run(args: &Args) -> anyhow::Result<()> {
    let spec = FormatSpec::parse(&args.spec)
        .with_context(|| format!("cannot parse format spec {:?}", args.spec))?;
    let samples = args.samples()?;
    if args.json {
        let record = serde_json::to_string(&samples.to_record())
            .context("cannot serialize the summary record")?;
        println!("{record}");
    } else {
        let formatter = Formatter::with_locale(args.locale.locale());
        println!("{}", formatter.format_samples(&samples, &spec));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_values_build_raw_samples() {
        let args = parse(&["measurand", "1.0", "2.0", "3.0"]);
        let samples = args.samples().unwrap();
        assert_eq!(samples.samples(), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_explicit_statistics() {
        let args = parse(&["measurand", "--mean", "1.5", "--stdev", "0.2", "--size", "10"]);
        let samples = args.samples().unwrap();
        assert_eq!(samples.mean(), 1.5);
        assert_eq!(samples.stdev(), 0.2);
        assert_eq!(samples.size(), 10);
    }

    #[test]
    fn test_values_conflict_with_statistics() {
        let result = Args::try_parse_from(["measurand", "--mean", "1.5", "2.0"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_no_overload_disables_the_check() {
        let args = parse(&["measurand", "--mean", "1e35", "--no-overload"]);
        let samples = args.samples().unwrap();
        assert_eq!(samples.mean(), 1e35);
    }

    #[test]
    fn test_bad_spec_is_reported() {
        let args = parse(&["measurand", "--spec", "2.f", "1.0"]);
        assert!(run(&args).is_err());
    }
}
