//! Supported locales and their currency conventions.

use serde::{Deserialize, Serialize};

use super::error::FormatError;

/// Locales the report can be rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Locale {
    /// Brazilian Portuguese, Brazilian Real.
    #[default]
    #[serde(rename = "pt_BR")]
    PtBr,
    /// US English, US Dollar.
    #[serde(rename = "en_US")]
    EnUs,
    /// German, Euro.
    #[serde(rename = "de_DE")]
    DeDe,
}

/// Where the currency symbol goes relative to the amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolPosition {
    /// Symbol before the amount.
    Prefix,
    /// Symbol after the amount.
    Suffix,
}

/// Monetary conventions of a locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Conventions {
    /// Currency symbol.
    pub symbol: &'static str,
    /// Symbol placement.
    pub position: SymbolPosition,
    /// Whether a space separates symbol and amount.
    pub spaced: bool,
    /// Thousands grouping separator.
    pub grouping: char,
    /// Decimal separator.
    pub decimal: char,
}

impl Locale {
    /// Returns the monetary conventions of the locale.
    #[must_use]
    pub const fn conventions(self) -> Conventions {
        match self {
            Self::PtBr => Conventions {
                symbol: "R$",
                position: SymbolPosition::Prefix,
                spaced: true,
                grouping: '.',
                decimal: ',',
            },
            Self::EnUs => Conventions {
                symbol: "$",
                position: SymbolPosition::Prefix,
                spaced: false,
                grouping: ',',
                decimal: '.',
            },
            Self::DeDe => Conventions {
                symbol: "€",
                position: SymbolPosition::Suffix,
                spaced: true,
                grouping: '.',
                decimal: ',',
            },
        }
    }

    /// Canonical identifier (`pt_BR`, `en_US`, `de_DE`).
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::PtBr => "pt_BR",
            Self::EnUs => "en_US",
            Self::DeDe => "de_DE",
        }
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

impl std::str::FromStr for Locale {
    type Err = FormatError;

    /// Accepts `pt_BR`, `pt-BR` and `pt_BR.UTF-8` forms, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let language_region = s.split('.').next().unwrap_or_default();
        match language_region.replace('-', "_").to_lowercase().as_str() {
            "pt_br" => Ok(Self::PtBr),
            "en_us" => Ok(Self::EnUs),
            "de_de" => Ok(Self::DeDe),
            _ => Err(FormatError::UnsupportedLocale(s.to_string())),
        }
    }
}
