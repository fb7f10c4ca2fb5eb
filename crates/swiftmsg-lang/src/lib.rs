/// Language code resolution for the message store.
///
/// Free-form language hints ("english", "es_MX", "français") are mapped to the
/// two-letter codes used as storage keys. The table is immutable and built
/// once on first use.

pub mod locale;

use std::collections::HashMap;
use std::sync::LazyLock;

use tracing::debug;

pub use locale::{LOCALE_VARS, LocaleSource, ProcessEnv, system_language, system_language_from};

/// Fallback language for lookups and for empty hints.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Characters that split a locale string into language and region parts.
const SEPARATORS: [char; 3] = ['_', '-', '.'];

/// Known names and variants, keyed lowercase.
pub const LANGUAGE_TABLE: &[(&str, &str)] = &[
    // English
    ("english", "en"),
    ("en", "en"),
    ("eng", "en"),
    ("en_us", "en"),
    ("en_gb", "en"),
    ("en_uk", "en"),
    ("en_ca", "en"),
    ("en_au", "en"),
    // Spanish
    ("spanish", "es"),
    ("es", "es"),
    ("esp", "es"),
    ("español", "es"),
    ("espanol", "es"),
    ("es_es", "es"),
    ("es_mx", "es"),
    ("es_ar", "es"),
    // French
    ("french", "fr"),
    ("fr", "fr"),
    ("fra", "fr"),
    ("français", "fr"),
    ("francais", "fr"),
    ("fr_fr", "fr"),
    ("fr_ca", "fr"),
    ("fr_be", "fr"),
    // German
    ("german", "de"),
    ("de", "de"),
    ("deu", "de"),
    ("deutsch", "de"),
    ("de_de", "de"),
    ("de_at", "de"),
    ("de_ch", "de"),
    // Italian
    ("italian", "it"),
    ("it", "it"),
    ("ita", "it"),
    ("italiano", "it"),
    ("it_it", "it"),
    ("it_ch", "it"),
    // Portuguese
    ("portuguese", "pt"),
    ("pt", "pt"),
    ("por", "pt"),
    ("português", "pt"),
    ("portugues", "pt"),
    ("pt_pt", "pt"),
    ("pt_br", "pt"),
    // Chinese
    ("chinese", "zh"),
    ("zh", "zh"),
    ("zho", "zh"),
    ("mandarin", "zh"),
    ("中文", "zh"),
    ("zh_cn", "zh"),
    ("zh_tw", "zh"),
    ("zh_hk", "zh"),
    // Japanese
    ("japanese", "ja"),
    ("ja", "ja"),
    ("jpn", "ja"),
    ("日本語", "ja"),
    ("ja_jp", "ja"),
    // Korean
    ("korean", "ko"),
    ("ko", "ko"),
    ("kor", "ko"),
    ("한국어", "ko"),
    ("ko_kr", "ko"),
    // Russian
    ("russian", "ru"),
    ("ru", "ru"),
    ("rus", "ru"),
    ("русский", "ru"),
    ("ru_ru", "ru"),
    // Arabic
    ("arabic", "ar"),
    ("ar", "ar"),
    ("ara", "ar"),
    ("العربية", "ar"),
    ("ar_sa", "ar"),
    // Hindi
    ("hindi", "hi"),
    ("hi", "hi"),
    ("hin", "hi"),
    ("हिन्दी", "hi"),
    ("hi_in", "hi"),
    // Others
    ("dutch", "nl"),
    ("nl", "nl"),
    ("nederlands", "nl"),
    ("swedish", "sv"),
    ("sv", "sv"),
    ("svenska", "sv"),
    ("norwegian", "no"),
    ("no", "no"),
    ("norsk", "no"),
    ("finnish", "fi"),
    ("fi", "fi"),
    ("suomi", "fi"),
    ("danish", "da"),
    ("da", "da"),
    ("dansk", "da"),
    ("greek", "el"),
    ("el", "el"),
    ("ελληνικά", "el"),
    ("turkish", "tr"),
    ("tr", "tr"),
    ("türkçe", "tr"),
    ("turkce", "tr"),
    ("thai", "th"),
    ("th", "th"),
    ("ไทย", "th"),
    ("vietnamese", "vi"),
    ("vi", "vi"),
    ("tiếng việt", "vi"),
    ("tieng viet", "vi"),
];

static LANGUAGE_MAP: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| LANGUAGE_TABLE.iter().copied().collect());

/// Exact table lookup. `name` must already be trimmed and lowercased.
pub fn lookup(name: &str) -> Option<&'static str> {
    LANGUAGE_MAP.get(name).copied()
}

/// Convert a language hint into a canonical code.
///
/// Never fails: unknown hints come back trimmed and lowercased, and for
/// locale-style strings only the language part is kept.
pub fn resolve(input: &str) -> String {
    let normalized = input.trim().to_lowercase();
    if normalized.is_empty() {
        return DEFAULT_LANGUAGE.to_string();
    }

    if let Some(code) = lookup(&normalized) {
        return code.to_string();
    }

    if let Some((prefix, _)) = normalized.split_once(&SEPARATORS[..]) {
        if let Some(code) = lookup(prefix) {
            return code.to_string();
        }
        if !prefix.is_empty() {
            debug!("Unmapped locale '{}', keeping prefix '{}'", normalized, prefix);
            return prefix.to_string();
        }
    }

    debug!("Unmapped language hint '{}', passing through", normalized);
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_hint_is_default() {
        assert_eq!(resolve(""), "en");
        assert_eq!(resolve("   "), "en");
    }

    #[test]
    fn names_and_variants_are_case_insensitive() {
        assert_eq!(resolve("English"), "en");
        assert_eq!(resolve("  SPANISH "), "es");
        assert_eq!(resolve("Français"), "fr");
        assert_eq!(resolve("日本語"), "ja");
        assert_eq!(resolve("Tiếng Việt"), "vi");
        assert_eq!(resolve("deu"), "de");
    }

    #[test]
    fn locale_strings_resolve_to_language() {
        assert_eq!(resolve("ES_mx"), "es");
        assert_eq!(resolve("pt_BR"), "pt");
        assert_eq!(resolve("fr_CH"), "fr");
        assert_eq!(resolve("de-DE"), "de");
        assert_eq!(resolve("ja_JP.UTF-8"), "ja");
        assert_eq!(resolve("german_switzerland"), "de");
    }

    #[test]
    fn unknown_locale_keeps_prefix() {
        assert_eq!(resolve("xx_unknown"), "xx");
        assert_eq!(resolve("XX-YY"), "xx");
    }

    #[test]
    fn unknown_hint_passes_through() {
        assert_eq!(resolve("Klingon"), "klingon");
        assert_eq!(resolve(" pl "), "pl");
        assert_eq!(resolve("_x"), "_x");
    }

    #[test]
    fn table_codes_are_canonical() {
        for (name, code) in LANGUAGE_TABLE {
            assert_eq!(code.len(), 2, "bad code for {}", name);
            assert_eq!(*name, name.to_lowercase().as_str());
            assert_eq!(lookup(code), Some(*code), "code {} not self-mapped", code);
        }
    }
}
