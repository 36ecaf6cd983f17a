//! Metrology-style rendering of values with uncertainties.
//!
//! A measured value and its standard uncertainty are rounded together, the
//! uncertainty deciding how many digits survive, and rendered in bracket
//! notation (`1.235(12)`), plus-minus notation (`1.235+/-0.012`),
//! scientific or percent scaling (`7.25(9)e+03`, `15.48(1.23)%`), SI
//! prefixes (`186.675(771) M`) or Unicode/LaTeX markup.
//!
//! # Examples
//!
//! ```
//! use measurand_format::{FormatSpec, Formatter};
//!
//! let formatter = Formatter::new();
//! let spec = FormatSpec::parse("")?;
//! assert_eq!(formatter.format(1.23456789, 0.0123456789, &spec), "1.235(12)");
//!
//! let spec = FormatSpec::parse(".1eU")?;
//! assert_eq!(formatter.format(123.456789, 0.951, &spec), "1.23(1)×10²");
//! # Ok::<_, measurand_format::ParseError>(())
//! ```

pub use self::{
    locale::Locale,
    render::Formatter,
    round::{Rounded, round_pair, round_value},
    spec::{Align, FormatSpec, Grouping, Mode, ParseError, Presentation, Sign, Style},
    style::stylize,
};

pub mod locale;
pub mod magnitude;
pub mod render;
pub mod round;
pub mod spec;
pub mod style;
