//! 语言代码模块
//!
//! 翻译服务支持的语言。服务响应中出现未知语言代码时解析失败，
//! 由调用方决定如何处理（翻译器会直接跳过）。

use crate::error::{Result, TranslationError};
use std::fmt;
use std::str::FromStr;

macro_rules! languages {
    ($($variant:ident => $code:literal,)+) => {
        /// 翻译服务支持的语言
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Language {
            $($variant,)+
        }

        impl Language {
            /// 所有语言
            pub const ALL: &'static [Language] = &[$(Language::$variant,)+];

            /// 服务使用的语言代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(Language::$variant => $code,)+
                }
            }
        }
    };
}

languages! {
    Afrikaans => "af",
    Albanian => "sq",
    Amharic => "am",
    Arabic => "ar",
    Armenian => "hy",
    Assamese => "as",
    Azerbaijani => "az",
    Bangla => "bn",
    Bashkir => "ba",
    Basque => "eu",
    Bosnian => "bs",
    Bulgarian => "bg",
    Cantonese => "yue",
    Catalan => "ca",
    ChineseSimplified => "zh-Hans",
    ChineseTraditional => "zh-Hant",
    Croatian => "hr",
    Czech => "cs",
    Danish => "da",
    Dari => "prs",
    Divehi => "dv",
    Dutch => "nl",
    English => "en",
    Estonian => "et",
    Faroese => "fo",
    Fijian => "fj",
    Filipino => "fil",
    Finnish => "fi",
    French => "fr",
    FrenchCanada => "fr-ca",
    Galician => "gl",
    Georgian => "ka",
    German => "de",
    Greek => "el",
    Gujarati => "gu",
    HaitianCreole => "ht",
    Hebrew => "he",
    Hindi => "hi",
    HmongDaw => "mww",
    Hungarian => "hu",
    Icelandic => "is",
    Indonesian => "id",
    Inuinnaqtun => "ikt",
    Inuktitut => "iu",
    Irish => "ga",
    Italian => "it",
    Japanese => "ja",
    Kannada => "kn",
    Kazakh => "kk",
    Khmer => "km",
    Klingon => "tlh-Latn",
    KlingonPiqad => "tlh-Piqd",
    Korean => "ko",
    KurdishCentral => "ku",
    KurdishNorthern => "kmr",
    Kyrgyz => "ky",
    Lao => "lo",
    Latvian => "lv",
    Lithuanian => "lt",
    Macedonian => "mk",
    Malagasy => "mg",
    Malay => "ms",
    Malayalam => "ml",
    Maltese => "mt",
    Maori => "mi",
    Marathi => "mr",
    MongolianCyrillic => "mn-Cyrl",
    MongolianTraditional => "mn-Mong",
    Myanmar => "my",
    Nepali => "ne",
    Norwegian => "nb",
    Odia => "or",
    Pashto => "ps",
    Persian => "fa",
    Polish => "pl",
    Portuguese => "pt",
    PortuguesePortugal => "pt-pt",
    Punjabi => "pa",
    QueretaroOtomi => "otq",
    Romanian => "ro",
    Russian => "ru",
    Samoan => "sm",
    SerbianCyrillic => "sr-Cyrl",
    SerbianLatin => "sr-Latn",
    Slovak => "sk",
    Slovenian => "sl",
    Somali => "so",
    Spanish => "es",
    Swahili => "sw",
    Swedish => "sv",
    Tahitian => "ty",
    Tamil => "ta",
    Tatar => "tt",
    Telugu => "te",
    Thai => "th",
    Tibetan => "bo",
    Tigrinya => "ti",
    Tongan => "to",
    Turkish => "tr",
    Turkmen => "tk",
    Ukrainian => "uk",
    UpperSorbian => "hsb",
    Urdu => "ur",
    Uyghur => "ug",
    Uzbek => "uz",
    Vietnamese => "vi",
    Welsh => "cy",
    YucatecMaya => "yua",
    Zulu => "zu",
}

impl Language {
    /// 校验目标语言列表
    ///
    /// 列表不能为空、不能重复，也不能包含源语言。
    pub fn verify(to: &[Language], from: Language) -> Result<()> {
        if to.is_empty() {
            return Err(TranslationError::InvalidConfiguration(
                "To languages cannot be empty".to_string(),
            ));
        }
        for (i, language) in to.iter().enumerate() {
            if to[..i].contains(language) {
                return Err(TranslationError::InvalidConfiguration(
                    "List of languages must be unique".to_string(),
                ));
            }
        }
        if to.contains(&from) {
            return Err(TranslationError::InvalidConfiguration(format!(
                "List of languages cannot contain '{}'",
                from
            )));
        }
        Ok(())
    }
}

impl FromStr for Language {
    type Err = TranslationError;

    /// 忽略大小写匹配语言代码，服务可能返回 `fr-CA` 这样的写法
    fn from_str(code: &str) -> Result<Self> {
        Language::ALL
            .iter()
            .copied()
            .find(|language| language.code().eq_ignore_ascii_case(code))
            .ok_or_else(|| {
                TranslationError::InvalidConfiguration(format!("Unknown language code '{}'", code))
            })
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
