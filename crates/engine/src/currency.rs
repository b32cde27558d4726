use serde::{Deserialize, Serialize};

use crate::EngineError;

/// ISO-like currency code used when rendering money values.
///
/// Amounts are always stored as an `i64` number of **minor units** (see
/// `Money`); the currency only decides how they are shown to the user.
///
/// ## Minor units
///
/// `minor_units()` returns how many decimal digits are used when converting
/// between:
/// - major units (human output, e.g. `R$ 10,50`)
/// - minor units (stored integers, e.g. `1050`)
///
/// ## Locale
///
/// Each currency renders with the conventions of the locale it is most used
/// in:
///
/// ```rust
/// use engine::Currency;
///
/// assert_eq!(Currency::Brl.format_minor(123_456), "R$ 1.234,56");
/// assert_eq!(Currency::Eur.format_minor(123_456), "1.234,56 €");
/// assert_eq!(Currency::Usd.format_minor(123_456), "$1,234.56");
/// assert_eq!(Currency::Brl.format_minor(-500), "-R$ 5,00");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Brl,
    Eur,
    Usd,
}

/// Rendering conventions of a currency.
struct Locale {
    symbol: &'static str,
    symbol_first: bool,
    symbol_gap: &'static str,
    group: char,
    decimal: char,
}

impl Currency {
    /// Canonical currency code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Currency::Brl => "BRL",
            Currency::Eur => "EUR",
            Currency::Usd => "USD",
        }
    }

    /// Number of fraction digits used when formatting/parsing amounts.
    #[must_use]
    pub const fn minor_units(self) -> u8 {
        match self {
            Currency::Brl | Currency::Eur | Currency::Usd => 2,
        }
    }

    /// `10^minor_units`, i.e. how many minor units make one major unit.
    #[must_use]
    pub const fn minor_per_major(self) -> i64 {
        10i64.pow(self.minor_units() as u32)
    }

    const fn locale(self) -> Locale {
        match self {
            Currency::Brl => Locale {
                symbol: "R$",
                symbol_first: true,
                symbol_gap: " ",
                group: '.',
                decimal: ',',
            },
            Currency::Eur => Locale {
                symbol: "€",
                symbol_first: false,
                symbol_gap: " ",
                group: '.',
                decimal: ',',
            },
            Currency::Usd => Locale {
                symbol: "$",
                symbol_first: true,
                symbol_gap: "",
                group: ',',
                decimal: '.',
            },
        }
    }

    /// Renders an amount of minor units as localized currency text.
    #[must_use]
    pub fn format_minor(self, minor: i64) -> String {
        let locale = self.locale();
        let sign = if minor < 0 { "-" } else { "" };
        let abs = minor.unsigned_abs();
        let per_major = self.minor_per_major().unsigned_abs();
        let major = group_digits(abs / per_major, locale.group);
        let fraction = abs % per_major;
        let width = usize::from(self.minor_units());
        let number = format!("{major}{}{fraction:0width$}", locale.decimal);

        if locale.symbol_first {
            format!("{sign}{}{}{number}", locale.symbol, locale.symbol_gap)
        } else {
            format!("{sign}{number}{}{}", locale.symbol_gap, locale.symbol)
        }
    }
}

/// Inserts `separator` between each group of three digits, right to left.
fn group_digits(value: u64, separator: char) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}

impl core::fmt::Display for Currency {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.code())
    }
}

impl TryFrom<&str> for Currency {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_uppercase().as_str() {
            "BRL" => Ok(Currency::Brl),
            "EUR" => Ok(Currency::Eur),
            "USD" => Ok(Currency::Usd),
            other => Err(EngineError::UnsupportedCurrency(other.to_string())),
        }
    }
}
