//! One-dimensional sample data and its summary statistics.
//!
//! [`Samples`] owns a single measured quantity, either as the raw readings
//! or as statistics that were already reduced elsewhere (a multimeter
//! returning mean and deviation over an internal burst, for example). The
//! two forms are mutually exclusive; [`SamplesBuilder`] enforces that.
//!
//! Statistics that cannot be computed are `NaN`, never an error: the mean
//! of no samples, the deviation of a single sample, the relative deviation
//! around a zero mean. Downstream formatting renders `NaN` as-is.

use serde::{Deserialize, Serialize};

use crate::ConstructionError;

/// Default overload threshold applied when none is specified.
///
/// Instruments commonly report a huge sentinel value (`9.9e37` is typical)
/// when the input exceeds the measurement range. Means whose magnitude
/// exceeds the threshold are treated as saturation artifacts and discarded.
pub const DEFAULT_OVERLOAD: f64 = 1e30;

/// A measured quantity with its summary statistics.
///
/// Construct with [`Samples::from_values`], [`Samples::from_stats`],
/// [`Samples::from_csv`] or [`Samples::builder`]. The value is immutable
/// once built.
///
/// # Examples
///
/// ```
/// use measurand_stats::Samples;
///
/// let burst = Samples::from_values([9.8, 10.1, 10.3, 9.9]);
/// assert_eq!(burst.size(), 4);
/// assert!((burst.mean() - 10.025).abs() < 1e-12);
///
/// let reduced = Samples::from_stats(10.025, 0.22, 4);
/// assert_eq!(reduced.mean(), 10.025);
/// assert!(reduced.samples().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Samples {
    samples: Vec<f64>,
    mean: f64,
    stdev: f64,
    size: u64,
    overload: Option<f64>,
}

impl Default for Samples {
    fn default() -> Self {
        Self::from_values([])
    }
}

impl Samples {
    /// Returns a builder for the non-trivial construction cases.
    #[must_use]
    pub fn builder() -> SamplesBuilder {
        SamplesBuilder::default()
    }

    /// Builds from raw readings. Mean and deviation are derived.
    #[must_use]
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Self {
        Self::assemble(values.into_iter().collect(), None, None, None, Some(DEFAULT_OVERLOAD))
    }

    /// Builds from statistics reduced elsewhere. No raw readings are kept.
    #[must_use]
    pub fn from_stats(mean: f64, stdev: f64, size: u64) -> Self {
        Self::assemble(
            Vec::new(),
            Some(mean),
            Some(stdev),
            Some(size),
            Some(DEFAULT_OVERLOAD),
        )
    }

    /// Builds from a comma-separated string of readings.
    ///
    /// Equipment drivers hand back readings as one comma-joined string,
    /// often with a trailing newline. Whitespace around each field is
    /// ignored; an all-whitespace input yields an empty aggregate.
    ///
    /// # Examples
    ///
    /// ```
    /// use measurand_stats::Samples;
    ///
    /// let samples = Samples::from_csv("1.0, 2.0, 3.0\r\n")?;
    /// assert_eq!(samples.samples(), &[1.0, 2.0, 3.0]);
    /// # Ok::<_, measurand_stats::ConstructionError>(())
    /// ```
    pub fn from_csv(text: &str) -> Result<Self, ConstructionError> {
        let trimmed = text.trim_end();
        let mut values = Vec::new();
        if !trimmed.is_empty() {
            for field in trimmed.split(',') {
                let field = field.trim();
                let value = field
                    .parse::<f64>()
                    .map_err(|_| ConstructionError::InvalidSample { text: field.to_owned() })?;
                values.push(value);
            }
        }
        Ok(Self::from_values(values))
    }

    /// Reconstructs an aggregate from its wire record.
    ///
    /// The raw readings are not part of the record, so the result carries
    /// statistics only. Bit patterns of non-finite statistics survive.
    #[must_use]
    pub fn from_record(record: &SamplesRecord) -> Self {
        Self::assemble(
            Vec::new(),
            Some(record.mean),
            Some(record.stdev),
            Some(record.size),
            record.overload,
        )
    }

    #[expect(clippy::cast_precision_loss)]
    fn assemble(
        samples: Vec<f64>,
        mean: Option<f64>,
        stdev: Option<f64>,
        size: Option<u64>,
        overload: Option<f64>,
    ) -> Self {
        let size = size.unwrap_or(samples.len() as u64);
        let mean = mean.unwrap_or_else(|| {
            if samples.is_empty() {
                f64::NAN
            } else {
                samples.iter().sum::<f64>() / samples.len() as f64
            }
        });
        let stdev = stdev.unwrap_or_else(|| sample_stdev(&samples));
        // Saturated readings make the whole aggregate meaningless.
        let overloaded = overload.is_some_and(|limit| mean.is_finite() && mean.abs() > limit);
        let (mean, stdev) = if overloaded { (f64::NAN, f64::NAN) } else { (mean, stdev) };
        Self { samples, mean, stdev, size, overload }
    }

    /// The raw readings, empty when the aggregate was built from statistics.
    #[must_use]
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Arithmetic mean, `NaN` when there is no data.
    #[must_use]
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Sample standard deviation (one delta degree of freedom), `NaN` below
    /// two samples.
    #[must_use]
    pub fn stdev(&self) -> f64 {
        self.stdev
    }

    /// Number of readings the statistics summarize.
    #[must_use]
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Overload threshold, `None` when the check is disabled.
    #[must_use]
    pub fn overload(&self) -> Option<f64> {
        self.overload
    }

    /// Sample variance.
    #[must_use]
    pub fn variance(&self) -> f64 {
        self.stdev * self.stdev
    }

    /// Standard deviation of the mean, `stdev / sqrt(size)`.
    ///
    /// This is the uncertainty a display should attach to the mean. `NaN`
    /// when the aggregate is empty.
    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn stdom(&self) -> f64 {
        if self.size == 0 {
            return f64::NAN;
        }
        self.stdev / (self.size as f64).sqrt()
    }

    /// Relative sample standard deviation in percent, `NaN` around a zero
    /// mean.
    #[must_use]
    pub fn relative_stdev(&self) -> f64 {
        if self.mean == 0.0 {
            return f64::NAN;
        }
        100.0 * self.stdev / self.mean
    }

    /// Relative standard deviation of the mean in percent.
    #[must_use]
    pub fn relative_stdom(&self) -> f64 {
        if self.mean == 0.0 {
            return f64::NAN;
        }
        100.0 * self.stdom() / self.mean
    }

    /// The wire record for this aggregate.
    #[must_use]
    pub fn to_record(&self) -> SamplesRecord {
        SamplesRecord {
            mean: self.mean,
            stdev: self.stdev,
            size: self.size,
            overload: self.overload,
        }
    }
}

#[expect(clippy::cast_precision_loss)]
fn sample_stdev(samples: &[f64]) -> f64 {
    if samples.len() < 2 {
        return f64::NAN;
    }
    let n = samples.len() as f64;
    let mean = samples.iter().sum::<f64>() / n;
    let squared = samples.iter().map(|x| (x - mean) * (x - mean)).sum::<f64>();
    (squared / (n - 1.0)).sqrt()
}

/// Builder for [`Samples`].
///
/// Raw samples and precomputed statistics are mutually exclusive;
/// [`SamplesBuilder::build`] rejects the combination.
///
/// # Examples
///
/// ```
/// use measurand_stats::Samples;
///
/// let samples = Samples::builder()
///     .mean(42.0)
///     .stdev(0.5)
///     .size(10)
///     .overload(None)
///     .build()?;
/// assert_eq!(samples.overload(), None);
/// # Ok::<_, measurand_stats::ConstructionError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct SamplesBuilder {
    samples: Option<Vec<f64>>,
    mean: Option<f64>,
    stdev: Option<f64>,
    size: Option<u64>,
    overload: Option<Option<f64>>,
}

impl SamplesBuilder {
    /// Sets the raw readings.
    #[must_use]
    pub fn samples(mut self, values: impl IntoIterator<Item = f64>) -> Self {
        self.samples = Some(values.into_iter().collect());
        self
    }

    /// Sets a precomputed mean.
    #[must_use]
    pub fn mean(mut self, mean: f64) -> Self {
        self.mean = Some(mean);
        self
    }

    /// Sets a precomputed sample standard deviation.
    #[must_use]
    pub fn stdev(mut self, stdev: f64) -> Self {
        self.stdev = Some(stdev);
        self
    }

    /// Sets the number of readings the statistics summarize.
    #[must_use]
    pub fn size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    /// Sets the overload threshold; `None` disables the check.
    #[must_use]
    pub fn overload(mut self, overload: Option<f64>) -> Self {
        self.overload = Some(overload);
        self
    }

    /// Builds the aggregate.
    pub fn build(self) -> Result<Samples, ConstructionError> {
        if self.samples.is_some()
            && (self.mean.is_some() || self.stdev.is_some() || self.size.is_some())
        {
            return Err(ConstructionError::SamplesWithStats);
        }
        Ok(Samples::assemble(
            self.samples.unwrap_or_default(),
            self.mean,
            self.stdev,
            self.size,
            self.overload.unwrap_or(Some(DEFAULT_OVERLOAD)),
        ))
    }
}

/// Flat JSON summary of a [`Samples`] aggregate.
///
/// JSON has no representation for non-finite floats, so `NaN` and the
/// infinities travel as the strings `"NaN"`, `"Infinity"` and
/// `"-Infinity"`. A disabled overload check is `null`.
///
/// # Examples
///
/// ```
/// use measurand_stats::Samples;
///
/// let record = Samples::from_stats(f64::NAN, 0.5, 3).to_record();
/// let json = serde_json::to_string(&record).unwrap();
/// assert_eq!(json, r#"{"mean":"NaN","stdev":0.5,"size":3,"overload":1e30}"#);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SamplesRecord {
    /// Arithmetic mean.
    #[serde(with = "float_repr")]
    pub mean: f64,
    /// Sample standard deviation.
    #[serde(with = "float_repr")]
    pub stdev: f64,
    /// Number of readings.
    pub size: u64,
    /// Overload threshold, `None` when disabled.
    #[serde(with = "float_repr::optional")]
    pub overload: Option<f64>,
}

mod float_repr {
    use serde::{Deserialize, Deserializer, Serializer, de::Error as _};

    pub(super) fn serialize<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if value.is_finite() {
            serializer.serialize_f64(*value)
        } else if value.is_nan() {
            serializer.serialize_str("NaN")
        } else if *value > 0.0 {
            serializer.serialize_str("Infinity")
        } else {
            serializer.serialize_str("-Infinity")
        }
    }

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Number(f64),
            Text(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Number(value) => Ok(value),
            Repr::Text(text) => match text.as_str() {
                "NaN" => Ok(f64::NAN),
                "Infinity" => Ok(f64::INFINITY),
                "-Infinity" => Ok(f64::NEG_INFINITY),
                other => Err(D::Error::custom(format!("invalid float token {other:?}"))),
            },
        }
    }

    pub(super) mod optional {
        use std::fmt;

        use serde::{Deserializer, Serializer, de};

        pub(in super::super) fn serialize<S>(
            value: &Option<f64>,
            serializer: S,
        ) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match value {
                Some(value) => super::serialize(value, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub(in super::super) fn deserialize<'de, D>(
            deserializer: D,
        ) -> Result<Option<f64>, D::Error>
        where
            D: Deserializer<'de>,
        {
            struct OptionalVisitor;

            impl<'de> de::Visitor<'de> for OptionalVisitor {
                type Value = Option<f64>;

                fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                    formatter.write_str("a float, a float token string, or null")
                }

                fn visit_none<E>(self) -> Result<Self::Value, E>
                where
                    E: de::Error,
                {
                    Ok(None)
                }

                fn visit_unit<E>(self) -> Result<Self::Value, E>
                where
                    E: de::Error,
                {
                    Ok(None)
                }

                fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
                where
                    D: Deserializer<'de>,
                {
                    super::deserialize(deserializer).map(Some)
                }
            }

            deserializer.deserialize_option(OptionalVisitor)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_all_nan() {
        let samples = Samples::default();
        assert!(samples.mean().is_nan());
        assert!(samples.stdev().is_nan());
        assert!(samples.stdom().is_nan());
        assert_eq!(samples.size(), 0);
        assert_eq!(samples.overload(), Some(DEFAULT_OVERLOAD));
    }

    #[test]
    fn test_statistics_from_values() {
        let samples = Samples::from_values([1.0, 2.0, 3.0, 4.0]);
        assert_eq!(samples.size(), 4);
        assert_eq!(samples.mean(), 2.5);
        let expected_stdev = (5.0f64 / 3.0).sqrt();
        assert!((samples.stdev() - expected_stdev).abs() < 1e-12);
        assert!((samples.variance() - 5.0 / 3.0).abs() < 1e-12);
        assert!((samples.stdom() - expected_stdev / 2.0).abs() < 1e-12);
        assert!((samples.relative_stdev() - 100.0 * expected_stdev / 2.5).abs() < 1e-10);
        assert!((samples.relative_stdom() - 50.0 * expected_stdev / 2.5).abs() < 1e-10);
    }

    #[test]
    fn test_single_value_has_nan_stdev() {
        let samples = Samples::from_values([42.0]);
        assert_eq!(samples.mean(), 42.0);
        assert!(samples.stdev().is_nan());
        assert!(samples.stdom().is_nan());
    }

    #[test]
    fn test_relative_stdev_around_zero_mean() {
        let samples = Samples::from_values([-1.0, 1.0]);
        assert_eq!(samples.mean(), 0.0);
        assert!(samples.relative_stdev().is_nan());
        assert!(samples.relative_stdom().is_nan());
    }

    #[test]
    fn test_explicit_statistics() {
        let samples = Samples::from_stats(10.0, 0.5, 25);
        assert_eq!(samples.mean(), 10.0);
        assert_eq!(samples.stdev(), 0.5);
        assert_eq!(samples.size(), 25);
        assert_eq!(samples.stdom(), 0.1);
        assert!(samples.samples().is_empty());
    }

    #[test]
    fn test_builder_rejects_mixed_construction() {
        let err = Samples::builder()
            .samples([1.0, 2.0])
            .mean(1.5)
            .build()
            .unwrap_err();
        assert_eq!(err, ConstructionError::SamplesWithStats);
    }

    #[test]
    fn test_builder_partial_statistics() {
        let samples = Samples::builder().stdev(0.25).build().unwrap();
        assert!(samples.mean().is_nan());
        assert_eq!(samples.stdev(), 0.25);
        assert_eq!(samples.size(), 0);
    }

    #[test]
    fn test_overload_discards_saturated_mean() {
        let samples = Samples::from_stats(1.5e31, 2.0, 4);
        assert!(samples.mean().is_nan());
        assert!(samples.stdev().is_nan());
        assert_eq!(samples.size(), 4);
    }

    #[test]
    fn test_overload_disabled() {
        let samples = Samples::builder()
            .mean(1.5e31)
            .stdev(2.0)
            .size(4)
            .overload(None)
            .build()
            .unwrap();
        assert_eq!(samples.mean(), 1.5e31);
        assert_eq!(samples.stdev(), 2.0);
    }

    #[test]
    fn test_overload_ignores_non_finite_mean() {
        let samples = Samples::from_stats(f64::INFINITY, 2.0, 4);
        assert_eq!(samples.mean(), f64::INFINITY);
        assert_eq!(samples.stdev(), 2.0);
    }

    #[test]
    fn test_from_csv() {
        let samples = Samples::from_csv(" 1.0, 2.5 ,3.5\n").unwrap();
        assert_eq!(samples.samples(), &[1.0, 2.5, 3.5]);
        assert_eq!(samples.size(), 3);
    }

    #[test]
    fn test_from_csv_empty() {
        let samples = Samples::from_csv("  \r\n").unwrap();
        assert!(samples.samples().is_empty());
        assert!(samples.mean().is_nan());
    }

    #[test]
    fn test_from_csv_rejects_garbage() {
        let err = Samples::from_csv("1.0, spam, 3.0").unwrap_err();
        assert_eq!(err, ConstructionError::InvalidSample { text: "spam".to_owned() });
    }

    #[test]
    fn test_record_round_trip_finite() {
        let samples = Samples::from_stats(10.5, 0.25, 8);
        let json = serde_json::to_string(&samples.to_record()).unwrap();
        let record: SamplesRecord = serde_json::from_str(&json).unwrap();
        let restored = Samples::from_record(&record);
        assert_eq!(restored.mean(), 10.5);
        assert_eq!(restored.stdev(), 0.25);
        assert_eq!(restored.size(), 8);
        assert_eq!(restored.overload(), Some(DEFAULT_OVERLOAD));
    }

    #[test]
    fn test_record_round_trip_non_finite() {
        let samples = Samples::builder()
            .mean(f64::NEG_INFINITY)
            .stdev(f64::NAN)
            .size(2)
            .overload(None)
            .build()
            .unwrap();
        let json = serde_json::to_string(&samples.to_record()).unwrap();
        assert_eq!(json, r#"{"mean":"-Infinity","stdev":"NaN","size":2,"overload":null}"#);
        let record: SamplesRecord = serde_json::from_str(&json).unwrap();
        let restored = Samples::from_record(&record);
        assert_eq!(restored.mean(), f64::NEG_INFINITY);
        assert!(restored.stdev().is_nan());
        assert_eq!(restored.overload(), None);
    }
}
