//! 类型定义模块
//!
//! 定义翻译库中使用的配置类型以及与翻译服务交换的 JSON 结构。

use crate::messages::{MAX_CHARACTERS, MAX_MESSAGES};
use crate::profanity::ProfanityAction;
use crate::request::BaseUrl;
use serde::{Deserialize, Serialize};

/// 翻译器配置
///
/// 包含翻译服务的所有配置选项，如API地址、语言设置、批次上限等。
///
/// # 字段说明
///
/// * `base_url` - 翻译服务地址（不含路径）
/// * `from_lang` - 源语言代码
/// * `to_langs` - 目标语言代码列表
/// * `message_limit` - 单个批次的最大消息数，不超过1000
/// * `character_limit` - 单个批次的最大字符数，不超过50000
/// * `subscription_key` / `bearer_token` - 认证方式，二选一
/// * `subscription_region` - 订阅区域
/// * `resource_id` - 资源ID
/// * `profanity_action` - 脏话处理方式
/// * `placeholders` - 占位符起止标记，未设置时不做占位符保护
/// * `request_timeout_secs` - 单次请求超时时间
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslatorConfig {
    pub base_url: String,
    pub from_lang: String,
    pub to_langs: Vec<String>,
    pub message_limit: usize,
    pub character_limit: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bearer_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription_region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,
    pub profanity_action: ProfanityAction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholders: Option<PlaceholderMarkers>,
    pub request_timeout_secs: u64,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            base_url: BaseUrl::Global.to_string(),
            from_lang: "en".to_string(),
            to_langs: Vec::new(),
            message_limit: MAX_MESSAGES,
            character_limit: MAX_CHARACTERS,
            subscription_key: None,
            bearer_token: None,
            subscription_region: None,
            resource_id: None,
            profanity_action: ProfanityAction::NoAction,
            placeholders: None,
            request_timeout_secs: 30,
        }
    }
}

/// 占位符起止标记
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceholderMarkers {
    pub start: String,
    pub end: String,
}

impl Default for PlaceholderMarkers {
    fn default() -> Self {
        Self {
            start: "{".to_string(),
            end: "}".to_string(),
        }
    }
}

/// 请求体中的单条消息，数组顺序即关联位置
#[derive(Debug, Serialize)]
pub struct RequestItem<'a> {
    #[serde(rename = "Text")]
    pub text: &'a str,
}

/// 响应体中与请求位置对应的一项
#[derive(Debug, Deserialize)]
pub struct ResponseItem {
    #[serde(default)]
    pub translations: Vec<LanguageTranslation>,
}

/// 某一目标语言的译文
#[derive(Debug, Clone, Deserialize)]
pub struct LanguageTranslation {
    pub text: String,
    pub to: String,
}

/// 服务返回的错误响应体
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub innererror: Option<InnerError>,
}

#[derive(Debug, Deserialize)]
pub struct InnerError {
    #[serde(default)]
    pub details: Vec<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub target: Option<String>,
}
