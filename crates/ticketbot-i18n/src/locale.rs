//! Locale management and utilities

use crate::error::{I18nError, I18nResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use unic_langid::LanguageIdentifier;

/// Supported locales
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum Locale {
    /// English (United States)
    #[serde(rename = "en-US", alias = "en")]
    English,
    /// Portuguese (Brazil)
    #[default]
    #[serde(rename = "pt-BR", alias = "pt")]
    Portuguese,
}

impl Locale {
    /// Get the language code for this locale
    pub const fn code(self) -> &'static str {
        match self {
            Self::English => "en-US",
            Self::Portuguese => "pt-BR",
        }
    }

    /// Get the short language code for this locale
    pub const fn short_code(self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Portuguese => "pt",
        }
    }

    /// Parse a locale from a language code
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "en" | "en-US" => Some(Self::English),
            "pt" | "pt-BR" => Some(Self::Portuguese),
            _ => None,
        }
    }

    /// Language identifier handed to Fluent.
    ///
    /// Plural rules are resolved per language, so the bundle is keyed by the
    /// short code rather than the regional one.
    pub fn language_identifier(self) -> I18nResult<LanguageIdentifier> {
        self.short_code()
            .parse()
            .map_err(|_| I18nError::InvalidLanguageId(self.short_code().to_string()))
    }

    /// Get all supported locales
    pub const fn all() -> [Self; 2] {
        [Self::English, Self::Portuguese]
    }

    /// Get the display name for this locale
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Portuguese => "Português (Brasil)",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = I18nError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| I18nError::UnsupportedLocale(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_codes() {
        assert_eq!(Locale::English.code(), "en-US");
        assert_eq!(Locale::Portuguese.short_code(), "pt");
        assert_eq!(Locale::default(), Locale::Portuguese);
    }

    #[test]
    fn test_locale_parsing() {
        assert_eq!("en".parse::<Locale>().unwrap(), Locale::English);
        assert_eq!("pt-BR".parse::<Locale>().unwrap(), Locale::Portuguese);
        assert!(matches!(
            "fr-FR".parse::<Locale>(),
            Err(I18nError::UnsupportedLocale(code)) if code == "fr-FR"
        ));
    }

    #[test]
    fn test_language_identifiers_are_valid() {
        for locale in Locale::all() {
            let langid = locale.language_identifier().unwrap();
            assert_eq!(langid.language.as_str(), locale.short_code());
        }
    }
}
