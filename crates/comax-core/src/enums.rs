//! Culture catalogue, audit actions, and sort direction for Comax.
//!
//! `CultureCode` is a closed set: every culture the console can store or
//! display is listed here, and parsing rejects anything else. Audit enums use
//! the upper-case wire names the audit table stores (`CREATE`, `UPDATE`, ...).

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// TextDirection
// ---------------------------------------------------------------------------

/// Writing direction of a culture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TextDirection {
    Ltr,
    Rtl,
}

impl TextDirection {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ltr => "ltr",
            Self::Rtl => "rtl",
        }
    }
}

impl fmt::Display for TextDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// CultureCode
// ---------------------------------------------------------------------------

macro_rules! culture_catalogue {
    ($( $variant:ident => $code:literal, $name:literal, $native:literal, $dir:ident; )+) => {
        /// Locale identifier naming one translation variant.
        ///
        /// Variants are declared in grid-column order; `Ord` follows that order.
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
            JsonSchema,
        )]
        pub enum CultureCode {
            $( #[serde(rename = $code)] $variant, )+
        }

        impl CultureCode {
            /// Every culture in the catalogue.
            pub const ALL: &'static [Self] = &[ $( Self::$variant, )+ ];

            /// BCP-47 style code stored in `culture_code` columns.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $( Self::$variant => $code, )+
                }
            }

            /// English display name.
            #[must_use]
            pub const fn english_name(self) -> &'static str {
                match self {
                    $( Self::$variant => $name, )+
                }
            }

            /// Name of the language in its own script.
            #[must_use]
            pub const fn native_name(self) -> &'static str {
                match self {
                    $( Self::$variant => $native, )+
                }
            }

            #[must_use]
            pub const fn direction(self) -> TextDirection {
                match self {
                    $( Self::$variant => TextDirection::$dir, )+
                }
            }
        }
    };
}

culture_catalogue! {
    HeIl => "he-IL", "Hebrew", "עברית", Rtl;
    EnUs => "en-US", "English", "English", Ltr;
    RoRo => "ro-RO", "Romanian", "Română", Ltr;
    ThTh => "th-TH", "Thai", "ไทย", Ltr;
    ArSa => "ar-SA", "Arabic", "العربية", Rtl;
    FrFr => "fr-FR", "French", "Français", Ltr;
    DeDe => "de-DE", "German", "Deutsch", Ltr;
    EsEs => "es-ES", "Spanish", "Español", Ltr;
    ItIt => "it-IT", "Italian", "Italiano", Ltr;
    PtBr => "pt-BR", "Portuguese (Brazil)", "Português", Ltr;
    RuRu => "ru-RU", "Russian", "Русский", Ltr;
    ZhCn => "zh-CN", "Chinese (Simplified)", "简体中文", Ltr;
    ZhTw => "zh-TW", "Chinese (Traditional)", "繁體中文", Ltr;
    JaJp => "ja-JP", "Japanese", "日本語", Ltr;
    KoKr => "ko-KR", "Korean", "한국어", Ltr;
    HiIn => "hi-IN", "Hindi", "हिन्दी", Ltr;
    TrTr => "tr-TR", "Turkish", "Türkçe", Ltr;
    PlPl => "pl-PL", "Polish", "Polski", Ltr;
    NlNl => "nl-NL", "Dutch", "Nederlands", Ltr;
    ViVn => "vi-VN", "Vietnamese", "Tiếng Việt", Ltr;
    UkUa => "uk-UA", "Ukrainian", "Українська", Ltr;
    FaIr => "fa-IR", "Persian", "فارسی", Rtl;
    UrPk => "ur-PK", "Urdu", "اردو", Rtl;
}

impl CultureCode {
    /// Cultures seeded into the `languages` table on first open.
    pub const DEFAULTS: &'static [Self] = &[Self::HeIl, Self::EnUs, Self::RoRo, Self::ThTh, Self::ArSa];

    /// Two-letter language subtag (`he-IL` → `he`), as used by translation APIs.
    #[must_use]
    pub fn language_subtag(self) -> &'static str {
        let code = self.as_str();
        code.split_once('-').map_or(code, |(lang, _)| lang)
    }
}

impl fmt::Display for CultureCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CultureCode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|culture| culture.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| CoreError::Validation(format!("unknown culture code '{s}'")))
    }
}

// ---------------------------------------------------------------------------
// AuditAction
// ---------------------------------------------------------------------------

/// Type of action recorded in the audit log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    Create,
    Update,
    Delete,
    Import,
}

impl AuditAction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "CREATE",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
            Self::Import => "IMPORT",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// AuditTable
// ---------------------------------------------------------------------------

/// Table an audit entry refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AuditTable {
    LocalizationResources,
    Applications,
    ApplicationFields,
    Languages,
    Organizations,
}

impl AuditTable {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LocalizationResources => "localization_resources",
            Self::Applications => "applications",
            Self::ApplicationFields => "application_fields",
            Self::Languages => "languages",
            Self::Organizations => "organizations",
        }
    }
}

impl fmt::Display for AuditTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// SortDirection
// ---------------------------------------------------------------------------

/// Direction of an active column sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    macro_rules! test_serde_roundtrip {
        ($name:ident, $ty:ty, $variant:expr, $expected:literal) => {
            #[test]
            fn $name() {
                let json = serde_json::to_string(&$variant).unwrap();
                assert_eq!(json, format!("\"{}\"", $expected));
                let back: $ty = serde_json::from_str(&json).unwrap();
                assert_eq!(back, $variant);
            }
        };
    }

    test_serde_roundtrip!(culture_he_il, CultureCode, CultureCode::HeIl, "he-IL");
    test_serde_roundtrip!(culture_zh_tw, CultureCode, CultureCode::ZhTw, "zh-TW");
    test_serde_roundtrip!(audit_create, AuditAction, AuditAction::Create, "CREATE");
    test_serde_roundtrip!(audit_import, AuditAction, AuditAction::Import, "IMPORT");
    test_serde_roundtrip!(
        table_resources,
        AuditTable,
        AuditTable::LocalizationResources,
        "localization_resources"
    );

    #[test]
    fn as_str_matches_serde_for_every_culture() {
        for culture in CultureCode::ALL {
            let json = serde_json::to_string(culture).unwrap();
            assert_eq!(json, format!("\"{}\"", culture.as_str()));
        }
    }

    #[rstest]
    #[case("he-IL", CultureCode::HeIl)]
    #[case("en-us", CultureCode::EnUs)]
    #[case(" ro-RO ", CultureCode::RoRo)]
    fn parses_known_codes(#[case] raw: &str, #[case] expected: CultureCode) {
        assert_eq!(raw.parse::<CultureCode>().unwrap(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("xx-XX")]
    #[case("he")]
    fn rejects_unknown_codes(#[case] raw: &str) {
        let err = raw.parse::<CultureCode>().unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn language_subtag_strips_region() {
        assert_eq!(CultureCode::HeIl.language_subtag(), "he");
        assert_eq!(CultureCode::ZhCn.language_subtag(), "zh");
    }

    #[test]
    fn defaults_are_in_catalogue_order() {
        assert_eq!(&CultureCode::ALL[..5], CultureCode::DEFAULTS);
        assert_eq!(CultureCode::HeIl.direction(), TextDirection::Rtl);
    }
}
