//! Embedded Fluent resources.

use crate::error::{I18nError, I18nResult};
use crate::Locale;
use fluent_bundle::FluentResource;
use tracing::error;

const EN_MAIN: &str = include_str!("../locales/en/main.ftl");
const PT_MAIN: &str = include_str!("../locales/pt/main.ftl");

/// Raw FTL source bundled for a locale.
pub const fn source(locale: Locale) -> &'static str {
    match locale {
        Locale::English => EN_MAIN,
        Locale::Portuguese => PT_MAIN,
    }
}

/// Parse the embedded resource of a locale.
pub fn load(locale: Locale) -> I18nResult<FluentResource> {
    FluentResource::try_new(source(locale).to_string()).map_err(|(_, errors)| {
        let errors: Vec<String> = errors.into_iter().map(|e| format!("{e:?}")).collect();
        error!("Failed to parse Fluent resource for {}: {:?}", locale, errors);
        I18nError::FluentParseError {
            locale: locale.code().to_string(),
            errors,
        }
    })
}
