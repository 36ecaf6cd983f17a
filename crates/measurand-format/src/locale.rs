//! Numeric locale conventions as explicit values.
//!
//! The `n` presentation type renders with a decimal point, thousands
//! separator and digit group sizes taken from a [`Locale`] value held by the
//! formatter. Nothing here touches process-global locale state, so two
//! formatters with different conventions can coexist in one process.

/// Digit conventions for the `n` presentation type.
///
/// `grouping` lists group sizes right to left; the last entry repeats. An
/// empty separator or an empty grouping list disables grouping entirely.
///
/// # Examples
///
/// ```
/// use measurand_format::Locale;
///
/// let german = Locale::de();
/// assert_eq!(german.decimal_point, ",");
/// assert_eq!(german.thousands_sep, ".");
///
/// let indian = Locale::en_in();
/// assert_eq!(indian.grouping, vec![3, 2]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale {
    /// Radix character, `"."` in the POSIX locale.
    pub decimal_point: String,
    /// Separator inserted between digit groups, empty to disable.
    pub thousands_sep: String,
    /// Group sizes right to left, the last one repeating.
    pub grouping: Vec<usize>,
}

impl Default for Locale {
    fn default() -> Self {
        Self::posix()
    }
}

impl Locale {
    /// Builds a locale from its three conventions.
    #[must_use]
    pub fn new(
        decimal_point: impl Into<String>,
        thousands_sep: impl Into<String>,
        grouping: Vec<usize>,
    ) -> Self {
        Self {
            decimal_point: decimal_point.into(),
            thousands_sep: thousands_sep.into(),
            grouping,
        }
    }

    /// The POSIX `C` locale: dot radix, no grouping.
    #[must_use]
    pub fn posix() -> Self {
        Self::new(".", "", Vec::new())
    }

    /// English conventions: dot radix, comma-separated groups of three.
    #[must_use]
    pub fn en() -> Self {
        Self::new(".", ",", vec![3])
    }

    /// German conventions: comma radix, dot-separated groups of three.
    #[must_use]
    pub fn de() -> Self {
        Self::new(",", ".", vec![3])
    }

    /// Swiss conventions: dot radix, apostrophe-separated groups of three.
    #[must_use]
    pub fn de_ch() -> Self {
        Self::new(".", "\u{2019}", vec![3])
    }

    /// Indian conventions: dot radix, a group of three then groups of two.
    #[must_use]
    pub fn en_in() -> Self {
        Self::new(".", ",", vec![3, 2])
    }
}
