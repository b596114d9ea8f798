//! Internationalization (i18n) for the visualizer.
//!
//! Uses a simple key→string HashMap loaded from embedded translation data.
//! The `t!("key")` macro looks up the current language, falling back to English.
//! Language can be switched at runtime via `set_language()`.

use std::collections::HashMap;
use std::sync::Mutex;

/// Global translation state.
static I18N: Mutex<Option<I18nState>> = Mutex::new(None);

struct I18nState {
    current_lang: String,
    /// lang_code → (key → translated_string)
    translations: HashMap<String, HashMap<String, String>>,
}

/// Supported languages: (code, native_name)
pub const LANGUAGES: &[(&str, &str)] = &[("en", "English"), ("es", "Español")];

fn embedded(code: &str) -> Option<&'static str> {
    match code {
        "en" => Some(include_str!("../locales/en.txt")),
        "es" => Some(include_str!("../locales/es.txt")),
        _ => None,
    }
}

/// Initialize the i18n system with embedded translations.
/// Call once at startup.
pub fn init() {
    let mut translations: HashMap<String, HashMap<String, String>> = HashMap::new();
    for &(code, _) in LANGUAGES {
        if let Some(data) = embedded(code) {
            translations.insert(code.to_string(), parse_translations(data));
        }
    }

    if let Ok(mut guard) = I18N.lock() {
        *guard = Some(I18nState {
            current_lang: "en".to_string(),
            translations,
        });
    }
}

/// Set the active language. If `code` is not a known language, falls back to "en".
pub fn set_language(code: &str) {
    if let Ok(mut guard) = I18N.lock()
        && let Some(ref mut state) = *guard
    {
        if state.translations.contains_key(code) {
            state.current_lang = code.to_string();
        } else {
            state.current_lang = "en".to_string();
        }
    }
}

/// Get the current language code.
pub fn current_language() -> String {
    if let Ok(guard) = I18N.lock()
        && let Some(ref state) = *guard
    {
        return state.current_lang.clone();
    }
    "en".to_string()
}

/// Look up a translation key. Returns the translated string if found,
/// or falls back to English, or returns the key itself as last resort.
///
/// Before `init()` has run the embedded English table is consulted directly,
/// so library callers (and tests) get readable text without global setup.
pub fn translate(key: &str) -> String {
    if let Ok(guard) = I18N.lock() {
        if let Some(ref state) = *guard {
            if let Some(map) = state.translations.get(&state.current_lang)
                && let Some(val) = map.get(key)
            {
                return val.clone();
            }
            if state.current_lang != "en"
                && let Some(map) = state.translations.get("en")
                && let Some(val) = map.get(key)
            {
                return val.clone();
            }
            return key.to_string();
        }
    }
    translate_in("en", key)
}

/// Look up `key` in a specific embedded language without touching global state.
pub fn translate_in(code: &str, key: &str) -> String {
    embedded(code)
        .and_then(|data| lookup(data, key))
        .or_else(|| embedded("en").and_then(|data| lookup(data, key)))
        .unwrap_or_else(|| key.to_string())
}

fn lookup(data: &str, key: &str) -> Option<String> {
    data.lines().find_map(|line| {
        let line = line.trim();
        if line.starts_with('#') {
            return None;
        }
        let (k, v) = line.split_once('=')?;
        (k.trim() == key).then(|| v.trim().to_string())
    })
}

/// Detect the system language and return the best matching language code.
/// Returns "en" if no match is found.
pub fn detect_system_language() -> String {
    for var in &["LC_ALL", "LC_MESSAGES", "LANG", "LANGUAGE"] {
        if let Ok(val) = std::env::var(var)
            && let Some(lang) = match_system_locale(&val)
        {
            return lang;
        }
    }
    "en".to_string()
}

/// Match a system locale string (e.g. "en_US.UTF-8", "es-MX") to our supported languages.
pub fn match_system_locale(locale: &str) -> Option<String> {
    let normalized = locale.to_lowercase().replace('_', "-");

    // Strip encoding / modifier
    let lang_part = normalized.split('.').next().unwrap_or(&normalized);
    let lang_part = lang_part.split('@').next().unwrap_or(lang_part);

    for &(code, _) in LANGUAGES {
        if code.to_lowercase() == lang_part {
            return Some(code.to_string());
        }
    }

    // Prefix match ("es-mx" → "es")
    let primary = lang_part.split('-').next().unwrap_or(lang_part);
    for &(code, _) in LANGUAGES {
        let code_primary = code.split('-').next().unwrap_or(code);
        if code_primary.to_lowercase() == primary {
            return Some(code.to_string());
        }
    }

    None
}

/// Parse a simple key=value translation file.
/// Format: one `key=value` per line. Lines starting with `#` are comments. Empty lines ignored.
fn parse_translations(data: &str) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for line in data.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((key, val)) = line.split_once('=') {
            map.insert(key.trim().to_string(), val.trim().to_string());
        }
    }
    map
}

/// Translation macro. Usage: `t!("panel.totals")` or `t!("totals.matrix_value", rows = 8, cols = 24, cells = 192)`
#[macro_export]
macro_rules! t {
    ($key:expr) => {
        $crate::i18n::translate($key)
    };
    ($key:expr, $($name:ident = $val:expr),+ $(,)?) => {{
        let mut s = $crate::i18n::translate($key);
        $(
            s = s.replace(concat!("{", stringify!($name), "}"), &format!("{}", $val));
        )+
        s
    }};
}
