//! The format specification mini-language.
//!
//! A spec string follows the field order of the builtin format grammar,
//! extended with a mode, a style and an SI marker:
//!
//! ```text
//! [[fill]align][sign][#][0][width][grouping][.precision][type][mode][style][si]
//! ```
//!
//! where `align` is one of `< > ^ =`, `sign` one of `+ - ' '`, `grouping`
//! `,` or `_`, `type` one of `bcdeEfFgGnosxX%`, `mode` `B` (bracket, the
//! default) or `P` (plus-minus), `style` `L` (LaTeX) or `U` (Unicode) and
//! `si` the letter `S`. Everything is optional; the empty string selects
//! the defaults (two significant digits of uncertainty, fixed-point,
//! bracket notation).
//!
//! # Examples
//!
//! ```
//! use measurand_format::{FormatSpec, Mode, Presentation};
//!
//! let spec = FormatSpec::parse("+.3eP")?;
//! assert_eq!(spec.precision, 3);
//! assert_eq!(spec.presentation, Presentation::LowerExp);
//! assert_eq!(spec.mode, Mode::PlusMinus);
//! # Ok::<_, measurand_format::ParseError>(())
//! ```

use std::{fmt, str::FromStr};

/// Field alignment inside a padded width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    /// `<`, pad on the right.
    Left,
    /// `>`, pad on the left.
    Right,
    /// `^`, pad on both sides.
    Center,
    /// `=`, pad between the sign and the digits.
    AfterSign,
}

impl Align {
    fn from_char(c: char) -> Option<Self> {
        match c {
            '<' => Some(Self::Left),
            '>' => Some(Self::Right),
            '^' => Some(Self::Center),
            '=' => Some(Self::AfterSign),
            _ => None,
        }
    }

    fn as_char(self) -> char {
        match self {
            Self::Left => '<',
            Self::Right => '>',
            Self::Center => '^',
            Self::AfterSign => '=',
        }
    }
}

/// Sign handling for the central value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    /// `-`, only negative values carry a sign.
    Minus,
    /// `+`, every value carries a sign.
    Plus,
    /// `' '`, positive values carry a leading space.
    Space,
}

impl Sign {
    fn from_char(c: char) -> Option<Self> {
        match c {
            '-' => Some(Self::Minus),
            '+' => Some(Self::Plus),
            ' ' => Some(Self::Space),
            _ => None,
        }
    }

    fn as_char(self) -> char {
        match self {
            Self::Minus => '-',
            Self::Plus => '+',
            Self::Space => ' ',
        }
    }
}

/// Thousands grouping of the integer digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grouping {
    /// `,` between groups of three.
    Comma,
    /// `_` between groups of three.
    Underscore,
}

impl Grouping {
    fn from_char(c: char) -> Option<Self> {
        match c {
            ',' => Some(Self::Comma),
            '_' => Some(Self::Underscore),
            _ => None,
        }
    }

    fn as_char(self) -> char {
        match self {
            Self::Comma => ',',
            Self::Underscore => '_',
        }
    }

    pub(crate) fn separator(self) -> &'static str {
        match self {
            Self::Comma => ",",
            Self::Underscore => "_",
        }
    }
}

/// How the uncertainty is attached to the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// `B`, bracket notation: `1.235(12)`.
    #[default]
    Bracket,
    /// `P`, plus-minus notation: `1.235+/-0.012`.
    PlusMinus,
}

impl Mode {
    fn as_char(self) -> char {
        match self {
            Self::Bracket => 'B',
            Self::PlusMinus => 'P',
        }
    }
}

/// Output styling applied after assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    /// `L`, LaTeX markup.
    Latex,
    /// `U`, Unicode superscripts and symbols.
    Unicode,
}

impl Style {
    fn as_char(self) -> char {
        match self {
            Self::Latex => 'L',
            Self::Unicode => 'U',
        }
    }
}

/// Presentation type of the central value.
///
/// The full type alphabet of the builtin grammar parses; types without a
/// float rendering (`b c d o s x X`) fall back to fixed-point when the
/// value is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Presentation {
    /// `b`
    Binary,
    /// `c`
    Char,
    /// `d`
    Decimal,
    /// `e`, scientific notation.
    LowerExp,
    /// `E`, scientific notation, uppercase markers.
    UpperExp,
    /// `f`, fixed-point. The default.
    #[default]
    Fixed,
    /// `F`, fixed-point, uppercase `NAN`/`INF`.
    UpperFixed,
    /// `g`, general: fixed-point or scientific by magnitude.
    General,
    /// `G`, general, uppercase markers.
    UpperGeneral,
    /// `n`, fixed-point with locale conventions.
    Locale,
    /// `o`
    Octal,
    /// `s`
    Str,
    /// `x`
    LowerHex,
    /// `X`
    UpperHex,
    /// `%`, fixed-point scaled by 100 with a percent sign.
    Percent,
}

impl Presentation {
    fn from_char(c: char) -> Option<Self> {
        match c {
            'b' => Some(Self::Binary),
            'c' => Some(Self::Char),
            'd' => Some(Self::Decimal),
            'e' => Some(Self::LowerExp),
            'E' => Some(Self::UpperExp),
            'f' => Some(Self::Fixed),
            'F' => Some(Self::UpperFixed),
            'g' => Some(Self::General),
            'G' => Some(Self::UpperGeneral),
            'n' => Some(Self::Locale),
            'o' => Some(Self::Octal),
            's' => Some(Self::Str),
            'x' => Some(Self::LowerHex),
            'X' => Some(Self::UpperHex),
            '%' => Some(Self::Percent),
            _ => None,
        }
    }

    fn as_char(self) -> char {
        match self {
            Self::Binary => 'b',
            Self::Char => 'c',
            Self::Decimal => 'd',
            Self::LowerExp => 'e',
            Self::UpperExp => 'E',
            Self::Fixed => 'f',
            Self::UpperFixed => 'F',
            Self::General => 'g',
            Self::UpperGeneral => 'G',
            Self::Locale => 'n',
            Self::Octal => 'o',
            Self::Str => 's',
            Self::LowerHex => 'x',
            Self::UpperHex => 'X',
            Self::Percent => '%',
        }
    }

    /// Whether non-finite tokens and exponent markers render uppercase.
    pub(crate) fn is_upper(self) -> bool {
        matches!(self, Self::UpperExp | Self::UpperFixed | Self::UpperGeneral)
    }
}

/// Error that can occur while parsing a spec string.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseError {
    /// A character was invalid or out of field order.
    #[display("invalid format spec {spec:?}: unexpected character at position {position}")]
    Unexpected {
        /// The whole spec string.
        spec: String,
        /// Character position of the first unconsumed input.
        position: usize,
    },
    /// A `.` without following digits.
    #[display("invalid format spec {spec:?}: missing digits after the decimal point")]
    MissingPrecision {
        /// The whole spec string.
        spec: String,
    },
    /// A width or precision beyond the native integer range.
    #[display("invalid format spec {spec:?}: number {digits:?} is too large")]
    NumberTooLarge {
        /// The whole spec string.
        spec: String,
        /// The offending digit run.
        digits: String,
    },
    /// Grouping was combined with the locale type `n`.
    #[display("invalid format spec {spec:?}: grouping {grouping:?} cannot be combined with 'n'")]
    GroupingWithLocale {
        /// The whole spec string.
        spec: String,
        /// The grouping character.
        grouping: char,
    },
}

/// A parsed, validated format specification.
///
/// `precision` is the number of significant digits kept in the uncertainty
/// (the digit plan is derived from it, so it also bounds the digits of the
/// central value). All fields are plain data; parsing resolves defaults.
///
/// # Examples
///
/// ```
/// use measurand_format::FormatSpec;
///
/// let spec = FormatSpec::parse("")?;
/// assert_eq!(spec.precision, 2);
/// assert_eq!(spec.to_string(), ".2fB");
/// # Ok::<_, measurand_format::ParseError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FormatSpec {
    /// Padding character, only valid together with an alignment.
    pub fill: Option<char>,
    /// Alignment inside the padded width.
    pub align: Option<Align>,
    /// Sign handling.
    pub sign: Option<Sign>,
    /// `#`, keep a trailing decimal point on integral renderings.
    pub hash: bool,
    /// `0`, pad with zeros.
    pub zero: bool,
    /// Minimum field width.
    pub width: Option<usize>,
    /// Thousands grouping.
    pub grouping: Option<Grouping>,
    /// Significant digits of uncertainty.
    pub precision: usize,
    /// Presentation type of the central value.
    pub presentation: Presentation,
    /// Uncertainty notation.
    pub mode: Mode,
    /// Optional output styling.
    pub style: Option<Style>,
    /// `S`, scale to an SI prefix. Forces scientific digit planning.
    pub si: bool,
}

impl Default for FormatSpec {
    fn default() -> Self {
        Self {
            fill: None,
            align: None,
            sign: None,
            hash: false,
            zero: false,
            width: None,
            grouping: None,
            precision: 2,
            presentation: Presentation::default(),
            mode: Mode::default(),
            style: None,
            si: false,
        }
    }
}

impl FormatSpec {
    /// Parses a spec string.
    ///
    /// # Examples
    ///
    /// ```
    /// use measurand_format::{FormatSpec, Style};
    ///
    /// let spec = FormatSpec::parse(".1fU")?;
    /// assert_eq!(spec.precision, 1);
    /// assert_eq!(spec.style, Some(Style::Unicode));
    ///
    /// assert!(FormatSpec::parse("2.f").is_err());
    /// # Ok::<_, measurand_format::ParseError>(())
    /// ```
    pub fn parse(spec: &str) -> Result<Self, ParseError> {
        let chars: Vec<char> = spec.chars().collect();
        let mut out = Self::default();
        let mut i = 0;

        if chars.len() >= 2 && Align::from_char(chars[1]).is_some() {
            out.fill = Some(chars[0]);
            out.align = Align::from_char(chars[1]);
            i = 2;
        } else if let Some(align) = chars.first().copied().and_then(Align::from_char) {
            out.align = Some(align);
            i = 1;
        }
        if let Some(sign) = chars.get(i).copied().and_then(Sign::from_char) {
            out.sign = Some(sign);
            i += 1;
        }
        if chars.get(i) == Some(&'#') {
            out.hash = true;
            i += 1;
        }
        if chars.get(i) == Some(&'0') {
            out.zero = true;
            i += 1;
        }
        let width_start = i;
        while chars.get(i).is_some_and(char::is_ascii_digit) {
            i += 1;
        }
        if i > width_start {
            let digits: String = chars[width_start..i].iter().collect();
            let width = digits
                .parse()
                .map_err(|_| ParseError::NumberTooLarge { spec: spec.to_owned(), digits })?;
            out.width = Some(width);
        }
        if let Some(grouping) = chars.get(i).copied().and_then(Grouping::from_char) {
            out.grouping = Some(grouping);
            i += 1;
        }
        if chars.get(i) == Some(&'.') {
            i += 1;
            let precision_start = i;
            while chars.get(i).is_some_and(char::is_ascii_digit) {
                i += 1;
            }
            if i == precision_start {
                return Err(ParseError::MissingPrecision { spec: spec.to_owned() });
            }
            let digits: String = chars[precision_start..i].iter().collect();
            out.precision = digits
                .parse()
                .map_err(|_| ParseError::NumberTooLarge { spec: spec.to_owned(), digits })?;
        }
        if let Some(presentation) = chars.get(i).copied().and_then(Presentation::from_char) {
            out.presentation = presentation;
            i += 1;
        }
        match chars.get(i) {
            Some('B') => {
                out.mode = Mode::Bracket;
                i += 1;
            }
            Some('P') => {
                out.mode = Mode::PlusMinus;
                i += 1;
            }
            _ => {}
        }
        match chars.get(i) {
            Some('L') => {
                out.style = Some(Style::Latex);
                i += 1;
            }
            Some('U') => {
                out.style = Some(Style::Unicode);
                i += 1;
            }
            _ => {}
        }
        if chars.get(i) == Some(&'S') {
            out.si = true;
            i += 1;
        }
        if i < chars.len() {
            return Err(ParseError::Unexpected { spec: spec.to_owned(), position: i });
        }
        if out.presentation == Presentation::Locale {
            if let Some(grouping) = out.grouping {
                return Err(ParseError::GroupingWithLocale {
                    spec: spec.to_owned(),
                    grouping: grouping.as_char(),
                });
            }
        }
        // SI scaling plans digits like scientific notation.
        if out.si {
            out.presentation = Presentation::LowerExp;
        }
        Ok(out)
    }
}

impl FromStr for FormatSpec {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for FormatSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(align) = self.align {
            if let Some(fill) = self.fill {
                write!(f, "{fill}")?;
            }
            write!(f, "{}", align.as_char())?;
        }
        if let Some(sign) = self.sign {
            write!(f, "{}", sign.as_char())?;
        }
        if self.hash {
            write!(f, "#")?;
        }
        if self.zero {
            write!(f, "0")?;
        }
        if let Some(width) = self.width {
            write!(f, "{width}")?;
        }
        if let Some(grouping) = self.grouping {
            write!(f, "{}", grouping.as_char())?;
        }
        write!(f, ".{}{}{}", self.precision, self.presentation.as_char(), self.mode.as_char())?;
        if let Some(style) = self.style {
            write!(f, "{}", style.as_char())?;
        }
        if self.si {
            write!(f, "S")?;
        }
        Ok(())
    }
}
