use std::collections::HashMap;

use tracing::debug;

use crate::DEFAULT_LANGUAGE;

/// Environment variables consulted for the system locale, highest precedence first.
pub const LOCALE_VARS: [&str; 4] = ["LC_ALL", "LC_MESSAGES", "LANG", "LANGUAGE"];

/// Read access to locale variables. Lets callers substitute the environment.
pub trait LocaleSource {
    fn var(&self, key: &str) -> Option<String>;
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl LocaleSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl LocaleSource for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl<F> LocaleSource for F
where
    F: Fn(&str) -> Option<String>,
{
    fn var(&self, key: &str) -> Option<String> {
        self(key)
    }
}

/// Language of the running process, taken from the locale environment.
pub fn system_language() -> String {
    system_language_from(&ProcessEnv)
}

/// Leading language part of the first non-empty locale variable.
///
/// The value is returned as found (e.g. "C" for "C.UTF-8"), not resolved
/// against the language table.
pub fn system_language_from<S: LocaleSource + ?Sized>(source: &S) -> String {
    for key in LOCALE_VARS {
        let Some(value) = source.var(key).filter(|v| !v.is_empty()) else {
            continue;
        };

        let lang = if let Some((lang, _)) = value.split_once('_') {
            lang
        } else if let Some((lang, _)) = value.split_once('.') {
            lang
        } else {
            value.as_str()
        };

        debug!("System language '{}' from {}={}", lang, key, value);
        return lang.to_string();
    }

    DEFAULT_LANGUAGE.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults_to_english_when_unset() {
        assert_eq!(system_language_from(&env(&[])), "en");
        assert_eq!(system_language_from(&env(&[("LANG", "")])), "en");
    }

    #[test]
    fn precedence_follows_variable_order() {
        let source = env(&[
            ("LANGUAGE", "it"),
            ("LANG", "de_DE.UTF-8"),
            ("LC_MESSAGES", "fr_FR.UTF-8"),
        ]);
        assert_eq!(system_language_from(&source), "fr");

        let source = env(&[("LC_ALL", "es_MX.UTF-8"), ("LC_MESSAGES", "fr_FR")]);
        assert_eq!(system_language_from(&source), "es");
    }

    #[test]
    fn empty_values_are_skipped() {
        let source = env(&[("LC_ALL", ""), ("LC_MESSAGES", ""), ("LANGUAGE", "pt")]);
        assert_eq!(system_language_from(&source), "pt");
    }

    #[test]
    fn language_part_is_extracted_raw() {
        assert_eq!(system_language_from(&env(&[("LANG", "C.UTF-8")])), "C");
        assert_eq!(system_language_from(&env(&[("LANG", "POSIX")])), "POSIX");
        assert_eq!(system_language_from(&env(&[("LANG", "EN_us")])), "EN");
    }

    #[test]
    fn closures_act_as_sources() {
        let source = |key: &str| (key == "LANG").then(|| "ko_KR.UTF-8".to_string());
        assert_eq!(system_language_from(&source), "ko");
    }
}
