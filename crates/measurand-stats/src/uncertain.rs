//! Export to uncertain-number form.
//!
//! Uncertainty-propagation libraries model a measurement as an elementary
//! uncertain real: value, standard uncertainty and degrees of freedom.
//! [`Samples::to_uncertain`] maps an aggregate onto that shape, using the
//! standard deviation of the mean as the standard uncertainty.

use crate::Samples;

/// An elementary uncertain real number.
#[derive(Debug, Clone, PartialEq)]
pub struct Uncertain {
    /// Best estimate of the measured quantity.
    pub value: f64,
    /// Standard uncertainty attached to the value.
    pub uncertainty: f64,
    /// Degrees of freedom, `None` meaning infinite.
    pub degrees_of_freedom: Option<u64>,
    /// Optional label identifying the quantity.
    pub label: Option<String>,
}

/// Error that can occur while exporting to [`Uncertain`].
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum UncertainError {
    /// The mean is `NaN` or infinite.
    #[display("mean is not finite")]
    NonFiniteMean,
    /// The standard uncertainty is zero, `NaN` or infinite.
    #[display("standard uncertainty is not finite or is zero")]
    InvalidUncertainty,
}

impl Samples {
    /// Exports the aggregate as an elementary uncertain number.
    ///
    /// The uncertainty is [`Samples::stdom`] and the degrees of freedom are
    /// `size - 1`. With one sample or fewer there is no deviation estimate,
    /// so the degrees of freedom become infinite and the uncertainty is
    /// passed through unchecked.
    ///
    /// # Examples
    ///
    /// ```
    /// use measurand_stats::Samples;
    ///
    /// let samples = Samples::from_values([4.0, 5.0, 6.0]);
    /// let uncertain = samples.to_uncertain(Some("voltage")).unwrap();
    /// assert_eq!(uncertain.value, 5.0);
    /// assert_eq!(uncertain.degrees_of_freedom, Some(2));
    /// assert_eq!(uncertain.label.as_deref(), Some("voltage"));
    /// ```
    pub fn to_uncertain(&self, label: Option<&str>) -> Result<Uncertain, UncertainError> {
        if !self.mean().is_finite() {
            return Err(UncertainError::NonFiniteMean);
        }
        let uncertainty = self.stdom();
        if self.size() > 1 && !(uncertainty.is_finite() && uncertainty != 0.0) {
            return Err(UncertainError::InvalidUncertainty);
        }
        let degrees_of_freedom = if self.size() <= 1 { None } else { Some(self.size() - 1) };
        Ok(Uncertain {
            value: self.mean(),
            uncertainty,
            degrees_of_freedom,
            label: label.map(String::from),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_from_values() {
        let samples = Samples::from_values([1.0, 2.0, 3.0]);
        let uncertain = samples.to_uncertain(None).unwrap();
        assert_eq!(uncertain.value, 2.0);
        assert!((uncertain.uncertainty - 1.0 / 3.0f64.sqrt()).abs() < 1e-12);
        assert_eq!(uncertain.degrees_of_freedom, Some(2));
        assert_eq!(uncertain.label, None);
    }

    #[test]
    fn test_single_sample_has_infinite_dof() {
        let samples = Samples::from_stats(7.5, 0.2, 1);
        let uncertain = samples.to_uncertain(Some("r")).unwrap();
        assert_eq!(uncertain.value, 7.5);
        assert_eq!(uncertain.uncertainty, 0.2);
        assert_eq!(uncertain.degrees_of_freedom, None);
    }

    #[test]
    fn test_non_finite_mean_is_rejected() {
        let samples = Samples::from_stats(f64::NAN, 0.2, 3);
        let err = samples.to_uncertain(None).unwrap_err();
        assert_eq!(err, UncertainError::NonFiniteMean);
    }

    #[test]
    fn test_zero_uncertainty_is_rejected() {
        let samples = Samples::from_stats(7.5, 0.0, 3);
        let err = samples.to_uncertain(None).unwrap_err();
        assert_eq!(err, UncertainError::InvalidUncertainty);
    }
}
