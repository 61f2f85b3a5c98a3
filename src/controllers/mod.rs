use serde::Deserialize;

use crate::domain::directory::Locale;
use crate::error::AppResult;

pub mod directory;
pub mod health;
pub mod listing;
pub mod search;

/// `?locale=` shared by every localized endpoint
#[derive(Debug, Default, Deserialize)]
pub struct LocaleQuery {
    pub locale: Option<String>,
}

impl LocaleQuery {
    /// Missing or blank falls back to the default locale; anything else must be supported
    pub fn resolve(&self) -> AppResult<Locale> {
        match self.locale.as_deref().map(str::trim) {
            None | Some("") => Ok(Locale::FALLBACK),
            Some(code) => Ok(code.parse::<Locale>()?),
        }
    }
}
