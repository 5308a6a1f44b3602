//! Message catalogue backed by one Fluent bundle per locale.

use crate::error::{I18nError, I18nResult};
use crate::{resource, Locale, TimeUnit};
use fluent_bundle::concurrent::FluentBundle;
use fluent_bundle::{FluentArgs, FluentResource};
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, warn};

/// Localized message catalogue.
///
/// Uses the concurrent bundle flavour so a single catalogue can be shared
/// between command handlers and timer tasks.
pub struct Messages {
    bundles: HashMap<Locale, FluentBundle<FluentResource>>,
}

impl fmt::Debug for Messages {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Messages")
            .field("locales", &self.bundles.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Messages {
    /// Build bundles for every supported locale from the embedded resources.
    pub fn load() -> I18nResult<Self> {
        let mut bundles = HashMap::new();

        for locale in Locale::all() {
            let mut bundle = FluentBundle::new_concurrent(vec![locale.language_identifier()?]);
            bundle.set_use_isolating(false);
            bundle
                .add_resource(resource::load(locale)?)
                .map_err(|errors| I18nError::FluentParseError {
                    locale: locale.code().to_string(),
                    errors: errors.into_iter().map(|e| format!("{e:?}")).collect(),
                })?;

            debug!("Loaded Fluent bundle for {}", locale);
            bundles.insert(locale, bundle);
        }

        Ok(Self { bundles })
    }

    /// Check if a message exists in the bundle
    pub fn has_message(&self, locale: Locale, message_id: &str) -> bool {
        self.bundles
            .get(&locale)
            .is_some_and(|bundle| bundle.has_message(message_id))
    }

    /// Format a message with the given arguments
    pub fn format(
        &self,
        locale: Locale,
        message_id: &str,
        args: Option<&FluentArgs<'_>>,
    ) -> I18nResult<String> {
        let not_found = || I18nError::MessageNotFound {
            key: message_id.to_string(),
        };

        let bundle = self.bundles.get(&locale).ok_or_else(not_found)?;
        let message = bundle.get_message(message_id).ok_or_else(not_found)?;
        let pattern = message.value().ok_or_else(not_found)?;

        let mut errors = Vec::new();
        let formatted = bundle.format_pattern(pattern, args, &mut errors);

        if !errors.is_empty() {
            let errors: Vec<String> = errors.into_iter().map(|e| format!("{e:?}")).collect();
            warn!("Formatting errors for message '{}': {:?}", message_id, errors);
            return Err(I18nError::MessageFormatError {
                key: message_id.to_string(),
                errors,
            });
        }

        Ok(formatted.into_owned())
    }

    /// Format a message from `(name, value)` pairs.
    pub fn format_with(
        &self,
        locale: Locale,
        message_id: &str,
        args: &[(&str, String)],
    ) -> I18nResult<String> {
        let mut fluent_args = FluentArgs::new();
        for (name, value) in args {
            fluent_args.set(*name, value.clone());
        }
        self.format(locale, message_id, Some(&fluent_args))
    }

    /// "5 seconds", "1 minuto": a count of a unit with the locale's plural form.
    pub fn time_unit(&self, locale: Locale, unit: TimeUnit, count: i64) -> I18nResult<String> {
        let mut args = FluentArgs::new();
        args.set("count", count);
        self.format(locale, unit.message_id(), Some(&args))
    }
}
