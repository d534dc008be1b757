//! Display language table.

/// Config key the downstream application reads its UI language from.
pub const DISPLAY_LANGUAGE_KEY: &str = "display_language";

/// Language used when nothing else decides.
pub const DEFAULT_LANGUAGE: &str = "zh-CN";

/// One selectable display language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayLanguage {
    /// Name shown to the operator, in the language itself.
    pub label: &'static str,
    /// Code written to the config file.
    pub code: &'static str,
}

/// Languages the downstream application ships translations for.
pub const DISPLAY_LANGUAGES: &[DisplayLanguage] = &[
    DisplayLanguage {
        label: "English",
        code: "en",
    },
    DisplayLanguage {
        label: "简体中文",
        code: "zh-CN",
    },
    DisplayLanguage {
        label: "繁體中文",
        code: "zh-HK",
    },
    DisplayLanguage {
        label: "日本語",
        code: "ja",
    },
    DisplayLanguage {
        label: "Español",
        code: "es",
    },
    DisplayLanguage {
        label: "Русский",
        code: "ru",
    },
    DisplayLanguage {
        label: "Français",
        code: "fr",
    },
];

/// Look up a language by code, ignoring ASCII case.
pub fn find_language(code: &str) -> Option<&'static DisplayLanguage> {
    let code = code.trim();
    DISPLAY_LANGUAGES
        .iter()
        .find(|lang| lang.code.eq_ignore_ascii_case(code))
}
