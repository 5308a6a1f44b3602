//! Build script for ticketbot-i18n crate
//!
//! Validates the embedded Fluent locale files at compile time:
//! - All Fluent syntax is valid
//! - Every locale defines the same set of message keys

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use std::process;

use fluent_syntax::ast::Entry;
use fluent_syntax::parser::parse;

const LOCALES: &[&str] = &["en", "pt"];

fn message_keys(path: &Path) -> Result<BTreeSet<String>, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;

    let resource = parse(content.as_str())
        .map_err(|(_, errors)| format!("parse errors in {}: {errors:?}", path.display()))?;

    Ok(resource
        .body
        .into_iter()
        .filter_map(|entry| match entry {
            Entry::Message(message) => Some(message.id.name.to_string()),
            _ => None,
        })
        .collect())
}

fn main() {
    let locales_dir = Path::new("locales");
    println!("cargo:rerun-if-changed=locales");

    let mut reference: Option<(&str, BTreeSet<String>)> = None;

    for locale in LOCALES {
        let path = locales_dir.join(locale).join("main.ftl");
        let keys = match message_keys(&path) {
            Ok(keys) => keys,
            Err(e) => {
                eprintln!("error: {e}");
                process::exit(1);
            }
        };

        match &reference {
            None => reference = Some((locale, keys)),
            Some((reference_locale, reference_keys)) => {
                let missing: Vec<_> = reference_keys.difference(&keys).collect();
                let extra: Vec<_> = keys.difference(reference_keys).collect();
                if !missing.is_empty() || !extra.is_empty() {
                    eprintln!(
                        "error: locale '{locale}' differs from '{reference_locale}': missing {missing:?}, extra {extra:?}"
                    );
                    process::exit(1);
                }
            }
        }
    }
}
