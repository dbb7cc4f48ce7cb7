//! Target languages offered for translation.

/// A supported target language: ISO code plus its native display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    pub code: &'static str,
    pub name: &'static str,
}

/// Fixed table of target languages, in settings display order.
pub const LANGUAGES: &[Language] = &[
    Language { code: "ko", name: "한국어" },
    Language { code: "en", name: "English" },
    Language { code: "ja", name: "日本語" },
    Language { code: "zh", name: "中文" },
    Language { code: "es", name: "Español" },
    Language { code: "fr", name: "Français" },
    Language { code: "de", name: "Deutsch" },
];

/// Resolve a language code to its display name.
pub fn language_name(code: &str) -> Option<&'static str> {
    LANGUAGES
        .iter()
        .find(|lang| lang.code == code)
        .map(|lang| lang.name)
}
