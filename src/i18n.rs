// File: ./src/i18n.rs
//! Locale selection and message lookup.
//!
//! English and German are compiled in through `rust_i18n` (see `locales/`).
//! Further locales, or overrides for the bundled ones, can be loaded at
//! runtime from `<dir>/<locale>.json`. Lookup order for a key:
//!
//! 1. messages loaded at runtime for the active locale
//! 2. bundled messages for the active locale
//! 3. messages loaded at runtime for the fallback locale
//! 4. bundled messages for the fallback locale
//! 5. the key itself

use crate::config::Config;
use crate::context::AppContext;
use anyhow::{Context, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

pub const SUPPORT_LOCALES: [&str; 2] = ["en", "de"];
pub const DEFAULT_LOCALE: &str = "en";
pub const FALLBACK_LOCALE: &str = "en";

const DEFAULT_MESSAGES: &str = include_str!("../locales/en.json");

pub type Messages = HashMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct I18nOptions {
    pub locale: String,
}

impl Default for I18nOptions {
    fn default() -> Self {
        Self {
            locale: DEFAULT_LOCALE.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct I18n {
    locale: String,
    fallback_locale: String,
    messages: HashMap<String, Messages>,
}

/// Builds a translator for `options.locale` with English as fallback and the
/// default English messages registered.
pub fn setup_i18n(options: I18nOptions) -> I18n {
    let mut i18n = I18n {
        locale: options.locale,
        fallback_locale: FALLBACK_LOCALE.to_string(),
        messages: HashMap::new(),
    };

    match serde_json::from_str::<Value>(DEFAULT_MESSAGES)
        .map_err(anyhow::Error::from)
        .and_then(|v| flatten_messages(&v))
    {
        Ok(defaults) => i18n.set_locale_message(DEFAULT_LOCALE, defaults),
        // Bundled lookups still work through rust_i18n.
        Err(e) => log::error!("Bundled default messages are invalid: {}", e),
    }

    rust_i18n::set_locale(&i18n.locale);
    i18n
}

pub fn is_supported_locale(locale: &str) -> bool {
    SUPPORT_LOCALES.contains(&locale)
}

/// Startup sequence: English defaults, runtime fallback overrides, runtime
/// messages for `locale`, then switch to `locale`.
///
/// Locale files that are present but broken are logged and skipped; the
/// bundled labels still apply.
pub fn init_for(ctx: &dyn AppContext, config: &Config, locale: &str) -> Result<I18n> {
    let mut i18n = setup_i18n(I18nOptions::default());
    let dir = config.effective_locales_dir(ctx)?;

    load_if_present(&mut i18n, &dir, FALLBACK_LOCALE);
    if locale != FALLBACK_LOCALE
        && !load_if_present(&mut i18n, &dir, locale)
        && !is_supported_locale(locale)
    {
        log::warn!(
            "No messages for locale '{}' in {}, falling back to '{}'",
            locale,
            dir.display(),
            i18n.fallback_locale()
        );
    }

    i18n.set_language(locale);
    Ok(i18n)
}

// Returns whether a file for `locale` exists, loaded or not.
fn load_if_present(i18n: &mut I18n, dir: &Path, locale: &str) -> bool {
    if !is_valid_locale_tag(locale) || !dir.join(format!("{}.json", locale)).exists() {
        return false;
    }
    if let Err(e) = i18n.load_locale_messages(dir, locale) {
        log::warn!("Ignoring locale file: {:#}", e);
    }
    true
}

impl I18n {
    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn fallback_locale(&self) -> &str {
        &self.fallback_locale
    }

    /// Language tag to advertise to the embedding document.
    pub fn html_lang(&self) -> &str {
        &self.locale
    }

    /// Switches the active locale, both for this translator and for the
    /// process-wide `rust_i18n` state.
    pub fn set_language(&mut self, locale: &str) {
        log::debug!("Switching locale from '{}' to '{}'", self.locale, locale);
        self.locale = locale.to_string();
        rust_i18n::set_locale(locale);
    }

    /// Registers `messages` for `locale`, replacing anything loaded before.
    pub fn set_locale_message(&mut self, locale: &str, messages: Messages) {
        self.messages.insert(locale.to_string(), messages);
    }

    pub fn has_runtime_messages(&self, locale: &str) -> bool {
        self.messages.contains_key(locale)
    }

    /// Loads `<dir>/<locale>.json` and registers it for `locale`.
    ///
    /// Locales outside [`SUPPORT_LOCALES`] are loaded anyway, with a warning.
    pub fn load_locale_messages(&mut self, dir: &Path, locale: &str) -> Result<()> {
        if !is_supported_locale(locale) {
            log::warn!(
                "Requested locale \"{}\" is not in the list of supported locales. Try to load anyway.",
                locale
            );
        }
        if !is_valid_locale_tag(locale) {
            anyhow::bail!("Invalid locale identifier: {:?}", locale);
        }

        let path = dir.join(format!("{}.json", locale));
        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read locale file '{}'", path.display()))?;
        let value: Value = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse locale file '{}'", path.display()))?;
        let messages = flatten_messages(&value)
            .with_context(|| format!("Invalid locale file '{}'", path.display()))?;

        log::info!("Loaded {} messages for locale '{}'", messages.len(), locale);
        self.set_locale_message(locale, messages);
        Ok(())
    }

    pub fn translate(&self, key: &str) -> String {
        if let Some(text) = self.runtime(&self.locale, key) {
            return text.to_string();
        }

        // rust_i18n answers from the English bundle when the active locale
        // lacks a key; such hits belong to the fallback layers below.
        let fallback_bundled = bundled(&self.fallback_locale, key);
        if is_bundled_locale(&self.locale)
            && let Some(text) = bundled(&self.locale, key)
            && (self.locale == self.fallback_locale || Some(&text) != fallback_bundled.as_ref())
        {
            return text;
        }

        if let Some(text) = self.runtime(&self.fallback_locale, key) {
            return text.to_string();
        }
        if let Some(text) = fallback_bundled {
            return text;
        }
        log::debug!("Missing translation for '{}' ({})", key, self.locale);
        key.to_string()
    }

    /// Every locale a lookup can be served in: bundled, supported, or loaded.
    pub fn available_locales(&self) -> Vec<String> {
        let mut all: Vec<String> = rust_i18n::available_locales!()
            .into_iter()
            .map(|l| l.to_string())
            .chain(SUPPORT_LOCALES.iter().map(|l| l.to_string()))
            .chain(self.messages.keys().cloned())
            .collect();
        all.sort();
        all.dedup();
        all
    }

    fn runtime(&self, locale: &str, key: &str) -> Option<&str> {
        self.messages
            .get(locale)
            .and_then(|m| m.get(key))
            .map(String::as_str)
    }
}

// rust_i18n returns the key (or "<locale>.<key>") when nothing matches.
fn bundled(locale: &str, key: &str) -> Option<String> {
    let translated = rust_i18n::t!(key, locale = locale);
    let text: &str = &translated;
    if text == key || text == format!("{}.{}", locale, key) {
        None
    } else {
        Some(text.to_string())
    }
}

fn is_bundled_locale(locale: &str) -> bool {
    rust_i18n::available_locales!().iter().any(|l| *l == locale)
}

fn is_valid_locale_tag(locale: &str) -> bool {
    !locale.is_empty()
        && locale
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Flattens a JSON object into dotted keys: `{"a": {"b": "x"}}` -> `a.b = x`.
pub fn flatten_messages(value: &Value) -> Result<Messages> {
    let Value::Object(map) = value else {
        anyhow::bail!("Locale messages must be a JSON object");
    };
    let mut out = Messages::new();
    for (k, v) in map {
        flatten_into(k, v, &mut out);
    }
    Ok(out)
}

fn flatten_into(prefix: &str, value: &Value, out: &mut Messages) {
    match value {
        Value::String(s) => {
            out.insert(prefix.to_string(), s.clone());
        }
        Value::Object(map) => {
            for (k, v) in map {
                flatten_into(&format!("{}.{}", prefix, k), v, out);
            }
        }
        Value::Number(n) => {
            out.insert(prefix.to_string(), n.to_string());
        }
        Value::Bool(b) => {
            out.insert(prefix.to_string(), b.to_string());
        }
        Value::Array(_) | Value::Null => {
            log::debug!("Skipping non-text message '{}'", prefix);
        }
    }
}

/// Primary language subtag of the OS locale, e.g. "de-AT" -> "de".
pub fn detect_system_locale() -> Option<String> {
    sys_locale::get_locale().and_then(|tag| primary_language(&tag))
}

pub fn primary_language(tag: &str) -> Option<String> {
    let primary = tag
        .split(['-', '_', '.', '@'])
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();
    match primary.as_str() {
        "" | "c" | "posix" => None,
        _ => Some(primary),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn flatten_nested_objects() {
        let v = json!({
            "tense": { "past": "Vergangenheit" },
            "title": "Kalender",
            "count": 3,
            "list": ["a"],
        });
        let m = flatten_messages(&v).unwrap();
        assert_eq!(m.get("tense.past").map(String::as_str), Some("Vergangenheit"));
        assert_eq!(m.get("title").map(String::as_str), Some("Kalender"));
        assert_eq!(m.get("count").map(String::as_str), Some("3"));
        assert!(!m.contains_key("list"));
    }

    #[test]
    fn flatten_rejects_non_object() {
        assert!(flatten_messages(&json!(["x"])).is_err());
    }

    #[test]
    fn primary_language_parsing() {
        assert_eq!(primary_language("de-AT").as_deref(), Some("de"));
        assert_eq!(primary_language("en_US.UTF-8").as_deref(), Some("en"));
        assert_eq!(primary_language("FR").as_deref(), Some("fr"));
        assert_eq!(primary_language("C"), None);
        assert_eq!(primary_language(""), None);
    }

    #[test]
    fn locale_tags_cannot_escape_dir() {
        assert!(is_valid_locale_tag("pt_BR"));
        assert!(is_valid_locale_tag("zh-Hant"));
        assert!(!is_valid_locale_tag("../secrets"));
        assert!(!is_valid_locale_tag(""));
    }

    #[test]
    fn default_messages_are_registered() {
        let i18n = setup_i18n(I18nOptions::default());
        assert!(i18n.has_runtime_messages("en"));
        assert_eq!(i18n.fallback_locale(), "en");
    }
}
