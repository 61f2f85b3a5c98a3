use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// ISO 639-1 locales served by the directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Locale {
    #[serde(rename = "en")]
    English,
    #[serde(rename = "ar")]
    Arabic,
    #[serde(rename = "fr")]
    French,
    #[serde(rename = "es")]
    Spanish,
    #[serde(rename = "de")]
    German,
    #[serde(rename = "it")]
    Italian,
    #[serde(rename = "ru")]
    Russian,
    #[serde(rename = "ja")]
    Japanese,
    #[serde(rename = "tr")]
    Turkish,
    #[serde(rename = "zh")]
    Chinese,
}

impl Locale {
    pub const ALL: [Locale; 10] = [
        Locale::English,
        Locale::Arabic,
        Locale::French,
        Locale::Spanish,
        Locale::German,
        Locale::Italian,
        Locale::Russian,
        Locale::Japanese,
        Locale::Turkish,
        Locale::Chinese,
    ];

    /// Locale used when a request does not name one
    pub const FALLBACK: Locale = Locale::English;

    /// Get the ISO 639-1 code as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::English => "en",
            Locale::Arabic => "ar",
            Locale::French => "fr",
            Locale::Spanish => "es",
            Locale::German => "de",
            Locale::Italian => "it",
            Locale::Russian => "ru",
            Locale::Japanese => "ja",
            Locale::Turkish => "tr",
            Locale::Chinese => "zh",
        }
    }

    /// Records carry their localized name and description in English only
    pub fn uses_localized_fields(&self) -> bool {
        *self == Locale::English
    }
}

impl Default for Locale {
    fn default() -> Self {
        Locale::FALLBACK
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported locale: {0}")]
pub struct UnsupportedLocale(pub String);

impl FromStr for Locale {
    type Err = UnsupportedLocale;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_lowercase();
        // Accept region-qualified tags such as "en-US"
        let primary = code.split(['-', '_']).next().unwrap_or_default();

        Locale::ALL
            .into_iter()
            .find(|locale| locale.as_str() == primary)
            .ok_or_else(|| UnsupportedLocale(s.to_string()))
    }
}
